// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

pub fn default_log_path() -> Option<PathBuf> {
    Some(dirs::cache_dir()?.join("tally").join("tally.log"))
}

// ---------------- single-instance lock ----------------

fn lock_path() -> Result<PathBuf, String> {
    crate::ipc::runtime_dir()
        .map(|dir| dir.join("tally").join("tally.lock"))
        .map_err(|e| format!("{e} (cannot create instance lock)"))
}

/// Held for the daemon lifetime; a second daemon fails to bind it.
pub fn acquire_single_instance_lock() -> Result<UnixListener, String> {
    acquire_lock_at(&lock_path()?)
}

fn acquire_lock_at(path: &Path) -> Result<UnixListener, String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match UnixListener::bind(path) {
        Ok(l) => Ok(l),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => match UnixStream::connect(path) {
            Ok(_) => Err(format!(
                "tally is already running (another instance holds {})",
                path.display()
            )),
            Err(_) => {
                // left behind by a daemon that did not exit cleanly
                let _ = std::fs::remove_file(path);
                UnixListener::bind(path)
                    .map_err(|e| format!("failed to bind instance lock {}: {e}", path.display()))
            }
        },
        Err(e) => Err(format!("failed to bind instance lock {}: {e}", path.display())),
    }
}
