use colored::{Color, ColoredString, Colorize};

/// Kind of change between two versions, used to pick the highlight color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
    Prerelease,
    Unchanged,
    /// One of the versions is not valid semver
    Unknown,
}

impl VersionBump {
    pub fn between(current: &str, target: &str) -> Self {
        let (Ok(from), Ok(to)) = (
            semver::Version::parse(current.trim()),
            semver::Version::parse(target.trim()),
        ) else {
            return VersionBump::Unknown;
        };

        if from == to {
            VersionBump::Unchanged
        } else if from.major != to.major {
            VersionBump::Major
        } else if from.minor != to.minor {
            VersionBump::Minor
        } else if from.patch != to.patch {
            VersionBump::Patch
        } else {
            VersionBump::Prerelease
        }
    }

    pub fn color(&self) -> Color {
        match self {
            VersionBump::Major | VersionBump::Prerelease | VersionBump::Unknown => Color::Red,
            VersionBump::Minor => Color::Yellow,
            VersionBump::Patch => Color::Green,
            VersionBump::Unchanged => Color::White,
        }
    }
}

/// Index of the first dot-separated segment of `target` that differs from `current`.
///
/// A segment missing from `current` counts as different. When no segment
/// differs the result is the number of segments in `target`.
pub fn divergence_index(current: &str, target: &str) -> usize {
    let current: Vec<&str> = current.split('.').collect();
    let target: Vec<&str> = target.split('.').collect();

    target
        .iter()
        .enumerate()
        .position(|(i, segment)| current.get(i) != Some(segment))
        .unwrap_or(target.len())
}

/// Split `target` into its unchanged prefix and the changed suffix
pub fn split_diff<'a>(current: &str, target: &'a str) -> (Vec<&'a str>, Vec<&'a str>) {
    let index = divergence_index(current, target);
    let mut segments: Vec<&str> = target.split('.').collect();
    let changed = segments.split_off(index);
    (segments, changed)
}

/// Unchanged prefix of `target` and its changed suffix styled with the bump color.
///
/// The suffix is `None` when `target` adds nothing over `current`.
pub fn highlight_diff(current: &str, target: &str) -> (String, Option<ColoredString>) {
    let (unchanged, changed) = split_diff(current, target);
    if changed.is_empty() {
        return (target.to_string(), None);
    }

    let color = VersionBump::between(current, target).color();
    (unchanged.join("."), Some(changed.join(".").color(color)))
}

/// Render `target` with every segment from the divergence point onwards emphasized
pub fn colorize_diff(current: &str, target: &str) -> String {
    match highlight_diff(current, target) {
        (unchanged, None) => unchanged,
        (unchanged, Some(emphasized)) if unchanged.is_empty() => emphasized.to_string(),
        (unchanged, Some(emphasized)) => format!("{unchanged}.{emphasized}"),
    }
}
