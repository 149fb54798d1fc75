use crate::agents::ProjectInfo;
use crate::error::{DepickError, Result};
use crate::model::{Dependency, DependencyCategory, RunConfig, SavePrefix, TargetField};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use std::time::Duration;

/// Version yarn reports for dependencies that do not come from the registry
const EXOTIC_VERSION: &str = "exotic";

static RANGE_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\^|~|>=|<=|>|<|=)").expect("range operator pattern is valid")
});

/// Supplies the outdated dependencies of a project
pub trait OutdatedSource {
    fn fetch(&self, project: &ProjectInfo, run: &RunConfig) -> Result<Vec<Dependency>>;
}

/// Declared ranges from `package.json`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    optional_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    peer_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DepickError::ManifestParsing(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            DepickError::ManifestParsing(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn range(&self, category: DependencyCategory, name: &str) -> Option<&str> {
        let section = match category {
            DependencyCategory::None => &self.dependencies,
            DependencyCategory::Dev => &self.dev_dependencies,
            DependencyCategory::Optional => &self.optional_dependencies,
            DependencyCategory::Peer => &self.peer_dependencies,
        };
        section.get(name).map(String::as_str)
    }
}

/// One line of `yarn outdated --json`
#[derive(Debug, Deserialize)]
struct ReportLine {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ReportTable {
    head: Vec<String>,
    body: Vec<Vec<String>>,
}

/// Column positions inside the table record
struct TableColumns {
    package: usize,
    current: usize,
    wanted: usize,
    latest: usize,
    package_type: usize,
    url: usize,
}

impl TableColumns {
    fn locate(head: &[String]) -> Result<Self> {
        let find = |label: &str| {
            head.iter().position(|h| h == label).ok_or_else(|| {
                DepickError::OutdatedQuery(format!("Report table has no '{label}' column"))
            })
        };
        Ok(Self {
            package: find("Package")?,
            current: find("Current")?,
            wanted: find("Wanted")?,
            latest: find("Latest")?,
            package_type: find("Package Type")?,
            url: find("URL")?,
        })
    }
}

/// Parse the line-delimited JSON report. `Ok(None)` means no table was printed.
pub fn parse_outdated_report(
    report: &str,
    manifest: &Manifest,
    run: &RunConfig,
) -> Result<Option<Vec<Dependency>>> {
    let Some(table) = find_table(report)? else {
        return Ok(None);
    };
    let columns = TableColumns::locate(&table.head)?;

    let mut dependencies = Vec::with_capacity(table.body.len());
    for row in &table.body {
        let field = |index: usize| {
            row.get(index).cloned().ok_or_else(|| {
                DepickError::OutdatedQuery(format!("Report row is too short: {row:?}"))
            })
        };

        let name = field(columns.package)?;
        let package_type = field(columns.package_type)?;
        let category = DependencyCategory::from_package_type(&package_type).ok_or_else(|| {
            DepickError::OutdatedQuery(format!(
                "Unknown package type '{package_type}' for {name}"
            ))
        })?;
        let wanted = field(columns.wanted)?;
        let range = manifest
            .range(category, &name)
            .map(str::to_string)
            .unwrap_or_else(|| wanted.clone());
        let latest = field(columns.latest)?;
        let url = field(columns.url)?;
        let upgrade_to = upgrade_pattern(&name, &range, &latest, &url, run);

        dependencies.push(Dependency {
            current: field(columns.current)?,
            name,
            wanted,
            latest,
            range,
            category,
            url,
            upgrade_to,
        });
    }

    Ok(Some(dependencies))
}

fn find_table(report: &str) -> Result<Option<ReportTable>> {
    for line in report.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Ok(record) = serde_json::from_str::<ReportLine>(line) else {
            debug!("skipping non-JSON report line: {line}");
            continue;
        };
        if record.kind == "table" {
            return Ok(Some(serde_json::from_value(record.data)?));
        }
    }
    Ok(None)
}

/// Pattern handed to the installer for a selected dependency.
///
/// Wanted mode re-installs the declared range. Latest mode installs the
/// latest version behind the save prefix (or the declared range's operator).
/// Dependencies not served by the registry are re-installed from their URL.
pub fn upgrade_pattern(name: &str, range: &str, latest: &str, url: &str, run: &RunConfig) -> String {
    if latest == EXOTIC_VERSION {
        return url.to_string();
    }

    match run.target {
        TargetField::Wanted => format!("{name}@{range}"),
        TargetField::Latest => {
            let operator = match run.save_prefix {
                SavePrefix::Exact => "",
                SavePrefix::Tilde => "~",
                SavePrefix::Caret => "^",
                SavePrefix::Range => range_operator(range),
            };
            format!("{name}@{operator}{latest}")
        }
    }
}

/// Leading comparison operator of a declared range, or "" if it has none
pub fn range_operator(range: &str) -> &str {
    RANGE_OPERATOR
        .captures(range)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Drop dependencies outside the requested scope or already at their target
pub fn filter_outdated(dependencies: Vec<Dependency>, run: &RunConfig) -> Vec<Dependency> {
    dependencies
        .into_iter()
        .filter(|dep| run.in_scope(&dep.name) && !dep.is_up_to_date(run.target))
        .collect()
}

/// Queries `yarn outdated --json` in the project directory
pub struct YarnOutdated {
    yarn_bin: PathBuf,
}

impl YarnOutdated {
    pub fn new<P: Into<PathBuf>>(yarn_bin: P) -> Self {
        Self {
            yarn_bin: yarn_bin.into(),
        }
    }
}

impl OutdatedSource for YarnOutdated {
    fn fetch(&self, project: &ProjectInfo, run: &RunConfig) -> Result<Vec<Dependency>> {
        let manifest = Manifest::load(&project.manifest_path)?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Checking for outdated packages...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        debug!(
            "running {} outdated --json in {}",
            self.yarn_bin.display(),
            project.project_path.display()
        );
        let output = Command::new(&self.yarn_bin)
            .current_dir(&project.project_path)
            .args(["outdated", "--json"])
            .output();
        spinner.finish_and_clear();

        let output = output.map_err(|e| {
            DepickError::OutdatedQuery(format!("Failed to run {}: {e}", self.yarn_bin.display()))
        })?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        // yarn exits with 1 whenever it found outdated packages
        match parse_outdated_report(&stdout, &manifest, run)? {
            Some(dependencies) => {
                debug!("yarn reported {} outdated package(s)", dependencies.len());
                Ok(dependencies)
            }
            None if output.status.success() => Ok(Vec::new()),
            None => Err(DepickError::OutdatedQuery(format!(
                "yarn outdated failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}
