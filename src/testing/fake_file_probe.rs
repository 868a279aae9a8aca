use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::ports::FileProbe;

/// File probe answering from a fixed set of paths and recording every check.
#[derive(Clone, Default)]
pub struct FakeFileProbe {
    existing: HashSet<PathBuf>,
    pub checked: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeFileProbe {
    pub fn with_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self { existing: paths.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    pub fn checked_paths(&self) -> Vec<PathBuf> {
        self.checked.lock().unwrap().clone()
    }
}

impl FileProbe for FakeFileProbe {
    fn is_file(&self, path: &Path) -> bool {
        self.checked.lock().unwrap().push(path.to_path_buf());
        self.existing.contains(path)
    }
}
