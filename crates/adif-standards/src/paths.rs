//! Standards directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "ADIF_STANDARDS_DIR";

/// Get the standards root directory.
///
/// Resolution order:
/// 1. `ADIF_STANDARDS_DIR` environment variable
/// 2. `standards/` directory relative to workspace root
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Path of the field table for an ADIF version directory (e.g. `v3_1_4`).
pub fn field_table_path(version_dir: &str) -> PathBuf {
    standards_root()
        .join("adif")
        .join(version_dir)
        .join("Fields.csv")
}
