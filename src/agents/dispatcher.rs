use crate::agents::installer::Installer;
use crate::agents::lockfile::Lockfile;
use crate::error::Result;
use crate::model::{Dependency, DependencyCategory, InstallConfig, RunConfig};
use colored::Colorize;
use log::debug;

/// One completed installer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledBatch {
    pub category: DependencyCategory,
    pub patterns: Vec<String>,
}

/// Batches applied during a dispatch, in invocation order
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub batches: Vec<InstalledBatch>,
}

impl DispatchReport {
    pub fn total_upgrades(&self) -> usize {
        self.batches.iter().map(|batch| batch.patterns.len()).sum()
    }
}

/// Turns the confirmed selection into one installer call per category.
///
/// Categories are processed in `DependencyCategory::DISPATCH_ORDER`, one at a
/// time. The first failing call aborts the dispatch; batches that already
/// finished are left in place.
pub struct UpgradeDispatcher<'a> {
    installer: &'a dyn Installer,
    run: &'a RunConfig,
    lockfile: &'a Lockfile,
}

impl<'a> UpgradeDispatcher<'a> {
    pub fn new(installer: &'a dyn Installer, run: &'a RunConfig, lockfile: &'a Lockfile) -> Self {
        Self {
            installer,
            run,
            lockfile,
        }
    }

    pub fn dispatch(&self, selection: &[Dependency]) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();

        for category in DependencyCategory::DISPATCH_ORDER {
            let patterns = patterns_for(selection, category);
            if patterns.is_empty() {
                continue;
            }

            let config = InstallConfig::for_category(category, self.run);
            println!(
                "\n{}",
                format!("Upgrading {} ({})...", category, patterns.len()).yellow()
            );
            debug!("dispatching {category}: {patterns:?}");

            self.installer.install(&patterns, &config, self.lockfile)?;

            report.batches.push(InstalledBatch { category, patterns });
        }

        Ok(report)
    }
}

/// Upgrade patterns of the selected dependencies in `category`, in selection order
pub fn patterns_for(selection: &[Dependency], category: DependencyCategory) -> Vec<String> {
    selection
        .iter()
        .filter(|dep| dep.category == category)
        .map(|dep| dep.upgrade_to.clone())
        .collect()
}
