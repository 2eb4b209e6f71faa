//! Readers and writers with observable behaviour

use std::cell::Cell;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// Hands out at most `chunk` bytes per read.
pub struct Trickle<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl<'a> Trickle<'a> {
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self { data, chunk: chunk.max(1) }
    }
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Counts `read` calls through a shared counter.
pub struct Counting<R> {
    inner: R,
    reads: Rc<Cell<usize>>,
}

impl<R> Counting<R> {
    pub fn new(inner: R) -> (Self, Rc<Cell<usize>>) {
        let reads = Rc::new(Cell::new(0));
        (Self { inner, reads: Rc::clone(&reads) }, reads)
    }
}

impl<R: Read> Read for Counting<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.set(self.reads.get() + 1);
        self.inner.read(buf)
    }
}

/// Shared record of what reached a [`FailingWriter`].
#[derive(Debug, Default, Clone)]
pub struct FlushLog {
    pub bytes: Rc<std::cell::RefCell<Vec<u8>>>,
    pub flushes: Rc<Cell<usize>>,
}

/// Writer that accepts bytes until `fail_after` bytes have been written.
pub struct FailingWriter {
    log: FlushLog,
    fail_after: Option<usize>,
}

impl FailingWriter {
    pub fn new(fail_after: Option<usize>) -> (Self, FlushLog) {
        let log = FlushLog::default();
        (Self { log: log.clone(), fail_after }, log)
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.log.bytes.borrow().len();
        if let Some(limit) = self.fail_after {
            if written + buf.len() > limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
        }
        self.log.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.log.flushes.set(self.log.flushes.get() + 1);
        Ok(())
    }
}
