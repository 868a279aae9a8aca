use std::path::Path;

/// Port for filesystem existence checks.
pub trait FileProbe {
    /// Whether `path` refers to an existing regular file.
    fn is_file(&self, path: &Path) -> bool;
}
