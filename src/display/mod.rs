// Display model - turns outdated dependencies into aligned, colored table rows
//
// - ColumnWidths: per-column widths derived from the header labels and data
// - highlight: version diff highlighting and semver bump colors
// - RowFormatter: header row, data rows and the color legend
pub mod columns;
pub mod highlight;
pub mod row;

pub use row::{RowFormatter, color_legend};
