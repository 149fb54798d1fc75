use crate::error::{DepickError, Result};
use std::path::{Path, PathBuf};

pub const MANIFEST_NAME: &str = "package.json";

/// ProjectScanner validates the project structure
pub struct ProjectScanner {
    project_path: PathBuf,
}

impl ProjectScanner {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Validates the project structure
    pub fn validate(&self) -> Result<ProjectInfo> {
        if !self.project_path.is_dir() {
            return Err(DepickError::ProjectValidation(format!(
                "'{}' is not a directory",
                self.project_path.display()
            )));
        }

        let manifest_path = self.project_path.join(MANIFEST_NAME);
        if !manifest_path.is_file() {
            return Err(DepickError::ProjectValidation(format!(
                "{MANIFEST_NAME} not found in '{}'",
                self.project_path.display()
            )));
        }

        Ok(ProjectInfo {
            project_path: self.project_path.clone(),
            manifest_path,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub project_path: PathBuf,
    pub manifest_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn accepts_directory_with_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_NAME), "{}").unwrap();

        let info = ProjectScanner::new(dir.path()).validate().unwrap();
        assert_eq!(info.manifest_path, dir.path().join(MANIFEST_NAME));
    }

    #[test]
    fn rejects_missing_manifest() {
        let dir = tempdir().unwrap();
        let err = ProjectScanner::new(dir.path()).validate().unwrap_err();
        assert!(matches!(err, DepickError::ProjectValidation(_)));
    }

    #[test]
    fn rejects_file_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "test").unwrap();
        assert!(ProjectScanner::new(&file).validate().is_err());
    }
}
