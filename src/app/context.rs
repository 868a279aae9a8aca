use std::path::{Path, PathBuf};

use crate::ports::{CollaboratorFactory, FileProbe};

/// Application context holding dependencies for a run.
pub struct AppContext<P: FileProbe, F: CollaboratorFactory> {
    probe: P,
    collaborators: F,
    work_dir: PathBuf,
}

impl<P: FileProbe, F: CollaboratorFactory> AppContext<P, F> {
    /// Create a new application context.
    ///
    /// `work_dir` is the process working directory, resolved once at startup.
    pub fn new(probe: P, collaborators: F, work_dir: impl Into<PathBuf>) -> Self {
        Self { probe, collaborators, work_dir: work_dir.into() }
    }

    /// Get a reference to the file probe.
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Get a reference to the collaborator factory.
    pub fn collaborators(&self) -> &F {
        &self.collaborators
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}
