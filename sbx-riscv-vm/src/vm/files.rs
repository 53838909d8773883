//! The open file table.
//!
//! Guest code sees files as small integer handles. The table owns the
//! boxed host handles; dropping a slot closes the file on the host side.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use sbx_riscv_abi::INVALID_FILE_HANDLE;

use crate::host::FileHandle;

/// Slot table mapping `u8` guest handles to host file handles.
///
/// Handle 0xFF is reserved as the invalid sentinel, so at most 255 files
/// can be open at once.
pub struct FileTable {
    slots: Vec<Option<Box<dyn FileHandle>>>,
}

impl FileTable {
    pub fn new() -> FileTable {
        FileTable { slots: Vec::new() }
    }

    /// Store a handle, returning its guest id, or `INVALID_FILE_HANDLE`
    /// when the table is full.
    pub fn insert(&mut self, handle: Box<dyn FileHandle>) -> u8 {
        if let Some(free) = self.slots.iter().position(|s| s.is_none()) {
            self.slots[free] = Some(handle);
            return free as u8;
        }
        if self.slots.len() >= INVALID_FILE_HANDLE as usize {
            return INVALID_FILE_HANDLE;
        }
        self.slots.push(Some(handle));
        (self.slots.len() - 1) as u8
    }

    /// The handle behind a guest id, if it is open.
    pub fn get_mut(&mut self, id: u8) -> Option<&mut (dyn FileHandle + 'static)> {
        if id == INVALID_FILE_HANDLE {
            return None;
        }
        self.slots.get_mut(id as usize)?.as_deref_mut()
    }

    /// Close a handle. Closing an unknown id is a no-op.
    pub fn remove(&mut self, id: u8) {
        if let Some(slot) = self.slots.get_mut(id as usize) {
            *slot = None;
        }
    }

    /// Close everything (reset and fault teardown).
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of currently open handles.
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl Default for FileTable {
    fn default() -> Self {
        FileTable::new()
    }
}
