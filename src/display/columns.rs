use crate::model::{Dependency, TargetField};
use unicode_width::UnicodeWidthStr;

/// Columns of the outdated table that are padded to a common width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Current,
    Range,
    Target,
}

impl Column {
    /// Header label; the range column reads "latest" in latest mode
    pub fn header(&self, target: TargetField) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Current => "from",
            Column::Range if target.is_latest() => "latest",
            Column::Range => "range",
            Column::Target => "to",
        }
    }
}

/// Column widths for one run of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    name: usize,
    current: usize,
    range: usize,
    target: usize,
}

impl ColumnWidths {
    pub fn compute(dependencies: &[Dependency], target: TargetField) -> Self {
        let mut widths = Self {
            name: text_width(Column::Name.header(target)),
            current: text_width(Column::Current.header(target)),
            range: text_width(Column::Range.header(target)),
            target: text_width(Column::Target.header(target)),
        };

        for dep in dependencies {
            widths.name = widths.name.max(text_width(&dep.name));
            widths.current = widths.current.max(text_width(&dep.current));
            widths.target = widths.target.max(text_width(dep.target(target)));
            // latest mode prints a constant label instead of the declared range
            if !target.is_latest() {
                widths.range = widths.range.max(text_width(&dep.range));
            }
        }

        widths
    }

    pub fn width(&self, column: Column) -> usize {
        match column {
            Column::Name => self.name,
            Column::Current => self.current,
            Column::Range => self.range,
            Column::Target => self.target,
        }
    }

    /// Spaces needed after `value` to fill `column`
    pub fn padding(&self, column: Column, value: &str) -> String {
        " ".repeat(self.width(column).saturating_sub(text_width(value)))
    }

    /// Right-pad `value` to the column width; longer values are kept whole
    pub fn pad(&self, column: Column, value: &str) -> String {
        format!("{value}{}", self.padding(column, value))
    }
}

/// Display width in terminal cells
fn text_width(value: &str) -> usize {
    value.width()
}
