//! Shared fixtures for lazyjson integration tests
//!
//! Provides record types used across the stream tests and readers/writers
//! that misbehave in controlled ways.

#![allow(dead_code, unused_imports)]

mod io;

pub use io::{Counting, FailingWriter, FlushLog, Trickle};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringData {
    pub data: String,
}

impl StringData {
    pub fn new(data: &str) -> Self {
        Self { data: data.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntData {
    #[serde(rename = "intV")]
    pub int_v: i32,
}

/// `{"data":"a"}{"data":"b"}{"data":"c"}`
pub const ABC_CONCATENATED: &str = r#"{"data":"a"}{"data":"b"}{"data":"c"}"#;

pub fn abc() -> Vec<StringData> {
    vec![StringData::new("a"), StringData::new("b"), StringData::new("c")]
}
