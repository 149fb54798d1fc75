use crate::agents::lockfile::Lockfile;
use crate::error::{DepickError, Result};
use crate::model::InstallConfig;
use log::debug;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Applies a batch of upgrade patterns for one dependency category.
///
/// `install` returns only after the installation finished, so the lockfile
/// reflects this batch when the next one starts.
pub trait Installer {
    fn install(&self, patterns: &[String], config: &InstallConfig, lockfile: &Lockfile)
    -> Result<()>;
}

/// Runs `yarn add` for each batch
pub struct YarnInstaller {
    yarn_bin: PathBuf,
}

impl YarnInstaller {
    pub fn new<P: Into<PathBuf>>(yarn_bin: P) -> Self {
        Self {
            yarn_bin: yarn_bin.into(),
        }
    }

    fn arguments<'a>(patterns: &'a [String], config: &InstallConfig) -> Vec<&'a str> {
        let mut args = vec!["add"];
        args.extend(patterns.iter().map(String::as_str));
        args.extend(config.cli_flags());
        args
    }
}

impl Installer for YarnInstaller {
    fn install(
        &self,
        patterns: &[String],
        config: &InstallConfig,
        lockfile: &Lockfile,
    ) -> Result<()> {
        let args = Self::arguments(patterns, config);
        let failure = |message: String| DepickError::Installer {
            category: config.category,
            message,
        };

        println!("Executing: {} {}", self.yarn_bin.display(), args.join(" "));
        debug!("installing against {}", lockfile.path().display());

        let mut child = Command::new(&self.yarn_bin)
            .current_dir(lockfile.directory())
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| failure(format!("Failed to spawn {}: {e}", self.yarn_bin.display())))?;

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines().map_while(|line| line.ok()) {
                println!("{line}");
            }
        }

        let status = child
            .wait()
            .map_err(|e| failure(format!("Failed to wait for process: {e}")))?;

        if !status.success() {
            return Err(failure(format!(
                "yarn add exited with code {}",
                status
                    .code()
                    .map_or_else(|| "unknown".to_string(), |code| code.to_string())
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::run_config;
    use crate::model::{DependencyCategory, SavePrefix, TargetField};

    #[test]
    fn arguments_list_patterns_then_flags() {
        let run = run_config(TargetField::Latest, SavePrefix::Tilde);
        let config = InstallConfig::for_category(DependencyCategory::Dev, &run);
        let patterns = vec!["jest@~29.0.0".to_string(), "eslint@~8.0.0".to_string()];

        assert_eq!(
            YarnInstaller::arguments(&patterns, &config),
            vec!["add", "jest@~29.0.0", "eslint@~8.0.0", "--dev", "--tilde"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_reports_category() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        let lockfile = Lockfile::load(dir.path()).unwrap();
        let run = run_config(TargetField::Wanted, SavePrefix::Range);
        let config = InstallConfig::for_category(DependencyCategory::Peer, &run);

        let err = YarnInstaller::new("false")
            .install(&["react@^18.0.0".to_string()], &config, &lockfile)
            .unwrap_err();
        assert!(matches!(
            err,
            DepickError::Installer {
                category: DependencyCategory::Peer,
                ..
            }
        ));
    }
}
