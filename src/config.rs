use std::path::{ Path, PathBuf };

use crate::implementations::config::OutputConfig;

/// Options handed to the workflow at construction time.
///
/// The output directory is created before the first run and the file is
/// overwritten by each accepted run; nothing is torn down afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub output_path: PathBuf,
}

impl WorkflowOptions {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self { output_path: output_path.into() }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl From<&OutputConfig> for WorkflowOptions {
    fn from(output: &OutputConfig) -> Self {
        Self::new(output.output_path())
    }
}
