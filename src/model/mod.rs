pub mod config;
pub mod dependency;

pub use config::{InstallConfig, RunConfig, SavePrefix, TargetField};
pub use dependency::{Dependency, DependencyCategory};
