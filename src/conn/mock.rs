//! An in-memory [`ConnectionExt`] used by unit tests.

use std::collections::VecDeque;

use super::{Connection, ConnectionExt};

/// Raised once the scripted input has been fully consumed.
#[derive(Debug, PartialEq, Eq)]
pub struct Eof;

/// Replays a scripted byte stream and records everything written to it.
#[derive(Debug, Default)]
pub struct MockConnection {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl MockConnection {
    pub fn new(input: &[u8]) -> MockConnection {
        MockConnection {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn output_str(&self) -> &str {
        std::str::from_utf8(&self.output).unwrap()
    }
}

impl Connection for MockConnection {
    type Error = Eof;

    fn write(&mut self, byte: u8) -> Result<(), Eof> {
        self.output.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Eof> {
        Ok(())
    }
}

impl ConnectionExt for MockConnection {
    fn read(&mut self) -> Result<u8, Eof> {
        self.input.pop_front().ok_or(Eof)
    }

    fn peek(&mut self) -> Result<Option<u8>, Eof> {
        Ok(self.input.front().copied())
    }
}

/// Frame `body` as `$<body>#<checksum>`.
pub fn frame(body: &str) -> String {
    let checksum = body.bytes().fold(0u8, |a, b| a.wrapping_add(b));
    format!("${}#{:02x}", body, checksum)
}
