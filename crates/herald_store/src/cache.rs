//! Modification-time-gated cache entries.

use std::time::SystemTime;

/// A cached record together with the backing file's modification time at
/// load. `None` means the file did not exist when loaded.
///
/// An entry is fresh only while the file's current mtime equals the one it
/// was loaded under, which bounds staleness to "since last local read" and
/// lets one process observe the other's writes without restarting.
#[derive(Debug, Clone)]
pub(crate) struct Cached<T> {
    pub mtime: Option<SystemTime>,
    pub value: T,
}

impl<T> Cached<T> {
    pub fn new(mtime: Option<SystemTime>, value: T) -> Self {
        Self { mtime, value }
    }

    pub fn is_fresh(&self, disk_mtime: Option<SystemTime>) -> bool {
        self.mtime == disk_mtime
    }
}
