//! Temporary file helpers for file-based parser tests.

use std::io::Write;

/// Write `contents` to a temporary `.fsp` file that is removed on drop.
pub fn write_temp_fsp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("fault_test")
        .suffix(".fsp")
        .tempfile()
        .expect("Failed to create temporary fsp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary fsp file");
    file.flush().expect("Failed to flush temporary fsp file");
    file
}

