//! `Iterator` adapters over a value stream.
//!
//! Both adapters yield `Result<T>` and stop after the first error. Neither
//! can be restarted: iterating consumes the stream, and an exhausted adapter
//! keeps returning `None`.

use std::io::Read;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::framing::FramingMode;
use crate::iter::StreamIter;
use crate::lexer::ReaderLexer;

/// Values of type `T` pulled from a [`StreamIter`].
#[derive(Debug)]
pub struct Values<R, T> {
    inner: StreamIter<R>,
    failed: bool,
    marker: PhantomData<fn() -> T>,
}

impl<R: Read, T: DeserializeOwned> Values<R, T> {
    pub(crate) fn new(inner: StreamIter<R>) -> Self {
        Self {
            inner,
            failed: false,
            marker: PhantomData,
        }
    }

    /// The resolved framing of the underlying stream.
    pub fn framing(&self) -> FramingMode {
        self.inner.framing()
    }
}

impl<R: Read, T: DeserializeOwned> Iterator for Values<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if self.failed {
            return None;
        }
        let item = match self.inner.has_next() {
            Ok(true) => self.inner.next(),
            Ok(false) => return None,
            Err(e) => Err(e),
        };
        self.failed = item.is_err();
        Some(item)
    }
}

impl<R: Read, T: DeserializeOwned> FusedIterator for Values<R, T> {}

enum State<R> {
    /// Nothing read yet.
    Pending {
        lexer: ReaderLexer<R>,
        mode: FramingMode,
        max_depth: usize,
    },
    Running(StreamIter<R>),
    Finished,
}

/// Lazy, single-pass sequence of `T` values.
///
/// No input is read until the first call to `next`; the framing is resolved
/// at that point. A framing error is yielded as the first item. Once the
/// sequence is exhausted or has failed, it yields nothing more.
pub struct Sequence<R, T> {
    state: State<R>,
    marker: PhantomData<fn() -> T>,
}

impl<R: Read, T: DeserializeOwned> Sequence<R, T> {
    pub(crate) fn new(lexer: ReaderLexer<R>, mode: FramingMode, max_depth: usize) -> Self {
        Self {
            state: State::Pending {
                lexer,
                mode,
                max_depth,
            },
            marker: PhantomData,
        }
    }

    /// Resolved framing, once the first value has been requested.
    pub fn framing(&self) -> Option<FramingMode> {
        match &self.state {
            State::Running(iter) => Some(iter.framing()),
            State::Pending { .. } | State::Finished => None,
        }
    }

    fn start(&mut self) -> Result<()> {
        if let State::Pending {
            lexer,
            mode,
            max_depth,
        } = std::mem::replace(&mut self.state, State::Finished)
        {
            self.state = State::Running(StreamIter::open(lexer, mode, max_depth)?);
        }
        Ok(())
    }
}

impl<R: Read, T: DeserializeOwned> Iterator for Sequence<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if matches!(self.state, State::Pending { .. }) {
            if let Err(e) = self.start() {
                return Some(Err(e));
            }
        }

        let State::Running(iter) = &mut self.state else {
            return None;
        };
        let item = match iter.has_next() {
            Ok(true) => iter.next(),
            Ok(false) => {
                self.state = State::Finished;
                return None;
            }
            Err(e) => Err(e),
        };
        if item.is_err() {
            self.state = State::Finished;
        }
        Some(item)
    }
}

impl<R: Read, T: DeserializeOwned> FusedIterator for Sequence<R, T> {}

impl<R, T> std::fmt::Debug for Sequence<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            State::Pending { mode, .. } => format!("Pending({mode})"),
            State::Running(_) => "Running".to_owned(),
            State::Finished => "Finished".to_owned(),
        };
        f.debug_struct("Sequence").field("state", &state).finish()
    }
}
