use super::DependencyCategory;
use std::path::PathBuf;

/// Which version column is the upgrade goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    /// Highest version satisfying the declared range
    Wanted,
    /// Newest published version, ignoring the declared range
    Latest,
}

impl TargetField {
    pub fn from_latest_flag(latest: bool) -> Self {
        if latest {
            TargetField::Latest
        } else {
            TargetField::Wanted
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, TargetField::Latest)
    }
}

/// Range operator written in front of a latest-mode target version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePrefix {
    /// Keep the operator of the declared range
    Range,
    Exact,
    Tilde,
    Caret,
}

impl SavePrefix {
    /// Resolve the `-E/-T/-C` flags; exact wins over tilde, tilde over caret.
    pub fn from_flags(exact: bool, tilde: bool, caret: bool) -> Self {
        if exact {
            SavePrefix::Exact
        } else if tilde {
            SavePrefix::Tilde
        } else if caret {
            SavePrefix::Caret
        } else {
            SavePrefix::Range
        }
    }
}

/// Settings for one run, fixed once the command line is parsed
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub project_path: PathBuf,
    pub target: TargetField,
    pub save_prefix: SavePrefix,
    pub scope: Option<String>,
    pub yarn_bin: String,
}

impl RunConfig {
    /// Scope as a name prefix: `babel` and `@babel` both become `@babel/`
    pub fn normalized_scope(&self) -> Option<String> {
        let scope = self.scope.as_deref()?.trim();
        if scope.is_empty() {
            return None;
        }

        let mut normalized = String::with_capacity(scope.len() + 2);
        if !scope.starts_with('@') {
            normalized.push('@');
        }
        normalized.push_str(scope);
        if !scope.ends_with('/') {
            normalized.push('/');
        }
        Some(normalized)
    }

    pub fn in_scope(&self, name: &str) -> bool {
        match self.normalized_scope() {
            Some(prefix) => name.starts_with(&prefix),
            None => true,
        }
    }
}

/// Installer settings for a single category batch.
///
/// A new value is derived for every batch; exactly one category marker is set
/// (none of them for plain dependencies).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    pub category: DependencyCategory,
    pub dev: bool,
    pub optional: bool,
    pub peer: bool,
    pub save_prefix: SavePrefix,
}

impl InstallConfig {
    pub fn for_category(category: DependencyCategory, run: &RunConfig) -> Self {
        Self {
            category,
            dev: category == DependencyCategory::Dev,
            optional: category == DependencyCategory::Optional,
            peer: category == DependencyCategory::Peer,
            save_prefix: run.save_prefix,
        }
    }

    /// Command line flags understood by `yarn add`
    pub fn cli_flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.dev {
            flags.push("--dev");
        }
        if self.optional {
            flags.push("--optional");
        }
        if self.peer {
            flags.push("--peer");
        }
        match self.save_prefix {
            SavePrefix::Exact => flags.push("--exact"),
            SavePrefix::Tilde => flags.push("--tilde"),
            SavePrefix::Caret | SavePrefix::Range => {}
        }
        flags
    }
}

#[cfg(test)]
pub(crate) fn run_config(target: TargetField, save_prefix: SavePrefix) -> RunConfig {
    RunConfig {
        project_path: PathBuf::from("."),
        target,
        save_prefix,
        scope: None,
        yarn_bin: "yarn".to_string(),
    }
}
