use super::columns::{Column, ColumnWidths};
use super::highlight::colorize_diff;
use crate::model::{Dependency, TargetField};
use colored::{ColoredString, Colorize};

/// How urgently a dependency needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Installed version is what the declared range asks for
    Safe,
    /// A newer version inside the declared range is not installed
    Overdue,
}

impl Severity {
    /// Plain string comparison of `current` and `wanted`, not a semver one
    pub fn of(dep: &Dependency) -> Self {
        if dep.current == dep.wanted {
            Severity::Safe
        } else {
            Severity::Overdue
        }
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            Severity::Safe => text.yellow(),
            Severity::Overdue => text.red(),
        }
    }
}

/// Builds the header row and one aligned row per dependency
#[derive(Debug, Clone, Copy)]
pub struct RowFormatter {
    widths: ColumnWidths,
    target: TargetField,
}

impl RowFormatter {
    pub fn new(dependencies: &[Dependency], target: TargetField) -> Self {
        Self {
            widths: ColumnWidths::compute(dependencies, target),
            target,
        }
    }

    pub fn header_row(&self) -> String {
        let name = self.header(Column::Name);
        let range = self.header(Column::Range);
        let from = self.header(Column::Current);
        let to = self.header(Column::Target);
        let url = "url".bold().underline();

        format!("  {name}  {range}  {from}     {to}  {url}")
    }

    pub fn row(&self, dep: &Dependency) -> String {
        let name = Severity::of(dep).paint(&self.widths.pad(Column::Name, &dep.name));
        let range_value = if self.target.is_latest() {
            "latest"
        } else {
            dep.range.as_str()
        };
        let range = self.widths.pad(Column::Range, range_value).blue();
        let current = self.widths.pad(Column::Current, &dep.current).blue();

        let target_version = dep.target(self.target);
        let target = format!(
            "{}{}",
            colorize_diff(&dep.current, target_version),
            self.widths.padding(Column::Target, target_version)
        );
        let url = dep.url.cyan();

        format!("{name}  {range}  {current}  ❯  {target}  {url}")
    }

    fn header(&self, column: Column) -> String {
        let label = column.header(self.target);
        format!(
            "{}{}",
            label.bold().underline(),
            self.widths.padding(column, label)
        )
    }
}

/// Legend explaining the highlight colors of the target column
pub fn color_legend() -> String {
    format!(
        "Color legend : \n {}    : Major Update backward-incompatible updates \n {} : Minor Update backward-compatible features \n {}  : Patch Update backward-compatible bug fixes",
        "<red>".red(),
        "<yellow>".yellow(),
        "<green>".green()
    )
}
