//! Test utilities for qub unit tests.
//!
//! `fixtures` builds repositories and projects on disk under a temp dir;
//! `SharedBuffer` captures shell output.
//!
//! # Example
//!
//! ```rust,ignore
//! use qub::test_support::{RepoFixture, sig};
//!
//! let repo = RepoFixture::new();
//! repo.publish_nested(&sig("me", "b", 5), &[]);
//! assert!(repo.repository().version_folder_exists("me", "b", &sig("me", "b", 5).version));
//! ```

pub mod fixtures;

use std::io::Write;
use std::sync::{Arc, Mutex};

pub use fixtures::*;

/// An in-memory `Write` sink that can be cloned and inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        SharedBuffer::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Everything written so far, split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_buffer_clones_share_contents() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        writeln!(writer, "one").unwrap();
        writeln!(writer, "two").unwrap();

        assert_eq!(buffer.lines(), vec!["one", "two"]);
    }
}
