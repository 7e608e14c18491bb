//! Read-only attribute handling.
//!
//! The rest of the crate only sees [`Writability`]. Underneath, Unix maps the
//! two states to mode `0o666` and `0o444`; other platforms flip the native
//! read-only flag and leave everything else alone.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::IxpError;
use crate::types::Writability;

/// Query the current state from fresh metadata.
pub fn query(path: &Path) -> Result<Writability, IxpError> {
    let meta = fs::metadata(path).map_err(|e| IxpError::io(path, e))?;
    Ok(if meta.permissions().readonly() {
        Writability::ReadOnly
    } else {
        Writability::Writable
    })
}

/// Put the file into `state`.
pub fn apply(path: &Path, state: Writability) -> Result<(), IxpError> {
    debug!("setting {} to {state}", path.display());
    platform::apply(path, state).map_err(|e| IxpError::io(path, e))
}

/// Clear the read-only attribute if it is set. Returns whether a change was made.
pub fn ensure_writable(path: &Path) -> Result<bool, IxpError> {
    if query(path)? == Writability::Writable {
        return Ok(false);
    }
    apply(path, Writability::Writable)?;
    Ok(true)
}

#[cfg(unix)]
mod platform {
    use std::fs::{self, Permissions};
    use std::io;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use crate::types::Writability;

    const WRITABLE_MODE: u32 = 0o666;
    const READ_ONLY_MODE: u32 = 0o444;

    pub(super) fn apply(path: &Path, state: Writability) -> io::Result<()> {
        let mode = match state {
            Writability::Writable => WRITABLE_MODE,
            Writability::ReadOnly => READ_ONLY_MODE,
        };
        fs::set_permissions(path, Permissions::from_mode(mode))
    }
}

#[cfg(not(unix))]
mod platform {
    use std::fs;
    use std::io;
    use std::path::Path;

    use crate::types::Writability;

    pub(super) fn apply(path: &Path, state: Writability) -> io::Result<()> {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_readonly(state == Writability::ReadOnly);
        fs::set_permissions(path, perms)
    }
}
