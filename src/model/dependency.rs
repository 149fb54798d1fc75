use super::TargetField;
use std::fmt;

/// Dependency type as declared in `package.json`.
///
/// A plain `dependencies` entry is `None` rather than an absent value so that
/// grouping and dispatch can match on it like every other category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyCategory {
    None,
    Dev,
    Optional,
    Peer,
}

impl DependencyCategory {
    /// Order in which installer invocations are issued.
    pub const DISPATCH_ORDER: [DependencyCategory; 4] = [
        DependencyCategory::None,
        DependencyCategory::Dev,
        DependencyCategory::Optional,
        DependencyCategory::Peer,
    ];

    /// Short hint used to build the group label (`dev`, `optional`, `peer`)
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DependencyCategory::None => None,
            DependencyCategory::Dev => Some("dev"),
            DependencyCategory::Optional => Some("optional"),
            DependencyCategory::Peer => Some("peer"),
        }
    }

    /// Human-readable group label, which is also the `package.json` section name
    pub fn group_label(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{hint}Dependencies"),
            None => "dependencies".to_string(),
        }
    }

    /// Parse the "Package Type" column reported by `yarn outdated`
    pub fn from_package_type(package_type: &str) -> Option<Self> {
        match package_type {
            "dependencies" => Some(DependencyCategory::None),
            "devDependencies" => Some(DependencyCategory::Dev),
            "optionalDependencies" => Some(DependencyCategory::Optional),
            "peerDependencies" => Some(DependencyCategory::Peer),
            _ => None,
        }
    }
}

impl fmt::Display for DependencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.group_label())
    }
}

/// An outdated dependency as reported by the outdated source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub current: String,
    pub wanted: String,
    pub latest: String,
    /// Range as declared in the manifest
    pub range: String,
    pub category: DependencyCategory,
    pub url: String,
    /// Pattern handed to the installer when this dependency is selected
    pub upgrade_to: String,
}

impl Dependency {
    /// Version this dependency would be upgraded to
    pub fn target(&self, field: TargetField) -> &str {
        match field {
            TargetField::Wanted => &self.wanted,
            TargetField::Latest => &self.latest,
        }
    }

    /// Nothing to do when the target already matches the installed version
    pub fn is_up_to_date(&self, field: TargetField) -> bool {
        self.current == self.target(field)
    }

    /// Short label shown once a choice is confirmed
    pub fn short_label(&self, field: TargetField) -> String {
        format!("{}@{}", self.name, self.target(field))
    }
}

#[cfg(test)]
pub(crate) fn sample(
    name: &str,
    current: &str,
    wanted: &str,
    latest: &str,
    category: DependencyCategory,
) -> Dependency {
    Dependency {
        name: name.to_string(),
        current: current.to_string(),
        wanted: wanted.to_string(),
        latest: latest.to_string(),
        range: format!("^{current}"),
        category,
        url: format!("https://registry.yarnpkg.com/{name}"),
        upgrade_to: format!("{name}@{latest}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_labels_follow_package_json_sections() {
        assert_eq!(DependencyCategory::None.group_label(), "dependencies");
        assert_eq!(DependencyCategory::Dev.group_label(), "devDependencies");
        assert_eq!(
            DependencyCategory::Optional.group_label(),
            "optionalDependencies"
        );
        assert_eq!(DependencyCategory::Peer.group_label(), "peerDependencies");
    }

    #[test]
    fn package_type_round_trips_through_label() {
        for category in DependencyCategory::DISPATCH_ORDER {
            assert_eq!(
                DependencyCategory::from_package_type(&category.group_label()),
                Some(category)
            );
        }
        assert_eq!(DependencyCategory::from_package_type("bundled"), None);
    }

    #[test]
    fn target_follows_field() {
        let dep = sample("left-pad", "1.0.0", "1.1.0", "2.0.0", DependencyCategory::None);
        assert_eq!(dep.target(TargetField::Wanted), "1.1.0");
        assert_eq!(dep.target(TargetField::Latest), "2.0.0");
        assert_eq!(dep.short_label(TargetField::Latest), "left-pad@2.0.0");
        assert!(!dep.is_up_to_date(TargetField::Wanted));
    }
}
