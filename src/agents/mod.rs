// Agents - the steps of an interactive upgrade run
//
// - ProjectScanner / Lockfile: validate the project and locate shared state
// - OutdatedSource: supplies the outdated dependencies
// - Grouper: builds the grouped, separator-interleaved choice list
// - CheckboxPrompt: lets the operator pick upgrades
// - UpgradeDispatcher: applies the picks, one installer call per category
pub mod dispatcher;
pub mod grouper;
pub mod installer;
pub mod lockfile;
pub mod outdated;
pub mod project_scanner;
pub mod selection;

pub use dispatcher::{DispatchReport, UpgradeDispatcher};
pub use grouper::{ChoiceItem, ChoiceList, Grouper};
pub use installer::{Installer, YarnInstaller};
pub use lockfile::Lockfile;
pub use outdated::{OutdatedSource, YarnOutdated, filter_outdated};
pub use project_scanner::{ProjectInfo, ProjectScanner};
pub use selection::{CheckboxPrompt, TerminalCheckbox, select_upgrades};
