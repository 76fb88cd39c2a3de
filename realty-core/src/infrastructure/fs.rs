// realty-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Write `content` to `path` through a temporary file in the same directory.
///
/// Readers of the run report never observe a half-written file: the target
/// is either replaced whole or left as it was.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(content.as_ref())?;
    staged
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically.
pub fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), InfrastructureError> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json)
}
