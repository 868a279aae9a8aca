use std::path::Path;

use crate::ports::FileProbe;

/// File probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileProbe;

impl FileProbe for StdFileProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directories_are_not_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("calc.py");
        std::fs::write(&file, "x = 1\n").unwrap();

        assert!(StdFileProbe.is_file(&file));
        assert!(!StdFileProbe.is_file(dir.path()));
        assert!(!StdFileProbe.is_file(&dir.path().join("missing.py")));
    }
}
