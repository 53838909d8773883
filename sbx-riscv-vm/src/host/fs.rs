//! Filesystem contracts.
//!
//! The VM owns open handles (see the file table in the VM state); the host
//! owns the medium. A `FileHandle` may also represent an open directory,
//! in which case the iteration methods are meaningful.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

/// Path-level filesystem operations.
pub trait FileStore {
    fn mkdir(&mut self, path: &str) -> bool;
    fn rmdir(&mut self, path: &str) -> bool;
    fn remove(&mut self, path: &str) -> bool;
    fn exists(&mut self, path: &str) -> bool;
    fn is_file(&mut self, path: &str) -> bool;
    fn is_dir(&mut self, path: &str) -> bool;

    /// Open `path` with an fopen-style mode string ("r", "w", "a").
    /// None when the host refuses.
    fn open(&mut self, path: &str, mode: &str) -> Option<Box<dyn FileHandle>>;
}

/// One open file or directory.
pub trait FileHandle {
    /// Bytes left between the position and the end.
    fn available(&mut self) -> i64;

    /// Next byte without consuming it; -1 at end.
    fn peek(&mut self) -> i64;

    /// Read and consume one byte; -1 at end.
    fn read_byte(&mut self) -> i64;

    /// Append one byte; returns bytes written.
    fn write_byte(&mut self, byte: u8) -> u64;

    /// Append a string; returns bytes written.
    fn write_str(&mut self, data: &str) -> u64;

    fn seek(&mut self, pos: u64) -> bool;
    fn position(&self) -> u64;
    fn size(&self) -> u64;
    fn flush(&mut self);

    fn path(&self) -> String;
    fn name(&self) -> String;

    /// Whether this handle is an ordinary file.
    fn is_file(&self) -> bool;

    /// Whether this handle is a directory.
    fn is_dir(&self) -> bool;

    /// Directory iteration: open the next entry, if any.
    fn next_entry(&mut self) -> Option<Box<dyn FileHandle>>;

    /// Directory iteration: name of the next entry without opening it.
    /// Empty when exhausted.
    fn next_name(&mut self) -> String;

    /// Position the directory cursor.
    fn seek_dir(&mut self, pos: u64) -> bool;

    /// Rewind the directory cursor to the first entry.
    fn rewind(&mut self);

    /// Adjust the host-side buffer size for this handle.
    fn set_buffer_size(&mut self, size: u64) -> bool;

    /// Last-modified timestamp, seconds since the epoch the host uses.
    fn last_write(&mut self) -> u64;
}
