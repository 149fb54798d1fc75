use crate::error::{DepickError, Result};
use std::path::{Path, PathBuf};

pub const LOCKFILE_NAME: &str = "yarn.lock";

/// Handle to the project's lockfile.
///
/// Loaded once per run and passed unchanged to every installer invocation;
/// the installer owns reading and writing its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockfile {
    path: PathBuf,
}

impl Lockfile {
    /// Locate the lockfile in `directory`; upgrading requires one to exist
    pub fn load<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let path = directory.as_ref().join(LOCKFILE_NAME);
        if !path.is_file() {
            return Err(DepickError::ProjectValidation(
                "No lockfile in this directory. Run `yarn install` to generate one.".to_string(),
            ));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the installer runs in
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}
