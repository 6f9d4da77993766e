use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;

use crate::error::StoreError;

const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Basic path-syntax check: non-blank, no NUL byte, none of the characters
/// Windows reserves in file names. A leading drive letter (`C:`) is allowed.
pub fn is_valid_path(path: &str) -> bool {
    if path.trim().is_empty() || path.contains('\0') {
        return false;
    }

    // Verbatim prefix produced by canonicalize on Windows
    let path = path.strip_prefix(r"\\?\").unwrap_or(path);

    let bytes = path.as_bytes();
    let rest = if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        &path[2..]
    } else {
        path
    };

    !rest.contains(RESERVED_CHARS)
}

/// Writes `contents` to a temporary file next to the real target and renames
/// it over that target, so the file is either fully replaced or left as it
/// was. Symlinks are followed and an existing file keeps its permissions.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let to_write_error = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = if path.exists() {
        fs::canonicalize(path).map_err(to_write_error)?
    } else {
        path.to_path_buf()
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(to_write_error)?;

    let existing = fs::metadata(&target).ok().map(|meta| meta.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    // New files get rw-r--r-- (narrowed by the umask), not the 0600 of temp files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut tmp = builder.tempfile_in(dir).map_err(to_write_error)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(to_write_error)?;
    }
    tmp.write_all(contents).map_err(to_write_error)?;
    tmp.as_file().sync_all().map_err(to_write_error)?;
    tmp.persist(&target).map_err(|e| to_write_error(e.error))?;
    Ok(())
}
