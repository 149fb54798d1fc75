use crate::agents::{
    CheckboxPrompt, ChoiceItem, ChoiceList, DispatchReport, Grouper, Installer, Lockfile,
    OutdatedSource, ProjectScanner, TerminalCheckbox, UpgradeDispatcher, YarnInstaller,
    YarnOutdated, filter_outdated, select_upgrades,
};
use crate::display::{RowFormatter, color_legend};
use crate::error::Result;
use crate::model::{Dependency, RunConfig};
use colored::Colorize;
use log::info;

/// Execute the interactive upgrade workflow with the yarn-backed collaborators
pub fn execute_upgrade_interactive(run: &RunConfig) -> Result<()> {
    let source = YarnOutdated::new(&run.yarn_bin);
    let installer = YarnInstaller::new(&run.yarn_bin);
    let mut prompt = TerminalCheckbox::stdio();

    run_upgrade(run, &source, &mut prompt, &installer)
}

/// Run the upgrade and print its summary; cancellation is returned as an error
fn run_upgrade(
    run: &RunConfig,
    source: &dyn OutdatedSource,
    prompt: &mut dyn CheckboxPrompt,
    installer: &dyn Installer,
) -> Result<()> {
    let report = upgrade_interactive(run, source, prompt, installer)?;
    print_dispatch_report(&report);
    Ok(())
}

/// Collect, display, select and apply upgrades.
///
/// Nothing is installed unless the operator confirms at least one package.
pub fn upgrade_interactive(
    run: &RunConfig,
    source: &dyn OutdatedSource,
    prompt: &mut dyn CheckboxPrompt,
    installer: &dyn Installer,
) -> Result<DispatchReport> {
    println!("{}", "Starting interactive upgrade...".cyan().bold());

    println!("\n{}", "1. Validating project structure...".yellow());
    let project = ProjectScanner::new(&run.project_path).validate()?;
    let lockfile = Lockfile::load(&project.project_path)?;
    println!("{}", "✓ Project structure is valid".green());

    println!("\n{}", "2. Checking for outdated packages...".yellow());
    let dependencies = filter_outdated(source.fetch(&project, run)?, run);
    info!("{} package(s) can be upgraded", dependencies.len());

    if dependencies.is_empty() {
        println!("{}", "✨ All of your dependencies are up to date!".green().bold());
        return Ok(DispatchReport::default());
    }

    let choices = build_choices(&dependencies, run);
    println!("\n{}", color_legend());
    let selection = select_upgrades(prompt, &choices)?;

    println!("\n{}", "3. Upgrading selected packages...".yellow());
    UpgradeDispatcher::new(installer, run, &lockfile).dispatch(&selection)
}

/// Execute the outdated workflow - print the grouped table only
pub fn execute_outdated(run: &RunConfig) -> Result<()> {
    outdated(run, &YarnOutdated::new(&run.yarn_bin))
}

fn outdated(run: &RunConfig, source: &dyn OutdatedSource) -> Result<()> {
    let project = ProjectScanner::new(&run.project_path).validate()?;
    let dependencies = filter_outdated(source.fetch(&project, run)?, run);

    if dependencies.is_empty() {
        println!("{}", "✨ All of your dependencies are up to date!".green().bold());
        return Ok(());
    }

    println!("{}", color_legend());
    for line in table_lines(&build_choices(&dependencies, run)) {
        println!("{line}");
    }
    Ok(())
}

fn build_choices(dependencies: &[Dependency], run: &RunConfig) -> ChoiceList {
    let formatter = RowFormatter::new(dependencies, run.target);
    Grouper::new(&formatter, run.target).group(dependencies)
}

/// Choice list rendered as a plain table; rows are indented to line up with the header
fn table_lines(choices: &ChoiceList) -> Vec<String> {
    choices
        .items()
        .iter()
        .map(|item| match item {
            ChoiceItem::Separator(text) => text.clone(),
            ChoiceItem::Choice(choice) => format!("  {}", choice.row),
        })
        .collect()
}

fn print_dispatch_report(report: &DispatchReport) {
    if report.batches.is_empty() {
        return;
    }

    println!("\n{}", "Upgrade Summary:".cyan().bold());
    println!(
        "{}",
        format!("Total upgrades: {}", report.total_upgrades()).green()
    );
    for batch in &report.batches {
        println!("\n{}:", batch.category.to_string().cyan());
        for pattern in &batch.patterns {
            println!("  • {}", pattern.white().bold());
        }
    }
    println!("\n{}", "✨ Upgrade completed successfully!".green().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ProjectInfo;
    use crate::agents::outdated::upgrade_pattern;
    use crate::error::DepickError;
    use crate::model::config::run_config;
    use crate::model::{DependencyCategory, InstallConfig, SavePrefix, TargetField};
    use std::cell::RefCell;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;

    struct FixedSource(Vec<Dependency>);

    impl OutdatedSource for FixedSource {
        fn fetch(&self, _project: &ProjectInfo, _run: &RunConfig) -> Result<Vec<Dependency>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingInstaller {
        calls: RefCell<Vec<(DependencyCategory, Vec<String>)>>,
    }

    impl Installer for RecordingInstaller {
        fn install(
            &self,
            patterns: &[String],
            config: &InstallConfig,
            _lockfile: &Lockfile,
        ) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((config.category, patterns.to_vec()));
            Ok(())
        }
    }

    fn project(dir: &Path) {
        fs::write(dir.join("package.json"), "{}").unwrap();
        fs::write(dir.join("yarn.lock"), "# yarn lockfile v1\n").unwrap();
    }

    fn dependency(
        name: &str,
        current: &str,
        wanted: &str,
        latest: &str,
        category: DependencyCategory,
        run: &RunConfig,
    ) -> Dependency {
        let range = current.to_string();
        Dependency {
            name: name.to_string(),
            current: current.to_string(),
            wanted: wanted.to_string(),
            latest: latest.to_string(),
            upgrade_to: upgrade_pattern(name, &range, latest, "", run),
            range,
            category,
            url: format!("https://registry.yarnpkg.com/{name}"),
        }
    }

    fn latest_run(dir: &Path) -> RunConfig {
        let mut run = run_config(TargetField::Latest, SavePrefix::Range);
        run.project_path = dir.to_path_buf();
        run
    }

    #[test]
    fn upgrades_selected_packages_per_category_in_order() {
        let dir = tempfile::tempdir().unwrap();
        project(dir.path());
        let run = latest_run(dir.path());
        let source = FixedSource(vec![
            dependency("pkg-a", "1.0.0", "1.0.0", "2.0.0", DependencyCategory::None, &run),
            dependency("pkg-b", "0.9.0", "1.0.0", "1.0.0", DependencyCategory::Dev, &run),
        ]);
        let installer = RecordingInstaller::default();
        let mut prompt = TerminalCheckbox::new(Cursor::new(&b"1 2\n\n"[..]), Vec::new());

        let report = upgrade_interactive(&run, &source, &mut prompt, &installer).unwrap();

        assert_eq!(
            *installer.calls.borrow(),
            vec![
                (DependencyCategory::None, vec!["pkg-a@2.0.0".to_string()]),
                (DependencyCategory::Dev, vec!["pkg-b@1.0.0".to_string()]),
            ]
        );
        assert_eq!(report.total_upgrades(), 2);
    }

    #[test]
    fn cancelling_the_prompt_installs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        project(dir.path());
        let run = latest_run(dir.path());
        let source = FixedSource(vec![dependency(
            "pkg-a",
            "1.0.0",
            "1.0.0",
            "2.0.0",
            DependencyCategory::None,
            &run,
        )]);
        let installer = RecordingInstaller::default();
        let mut prompt = TerminalCheckbox::new(Cursor::new(&b"1\nq\n"[..]), Vec::new());

        let err = upgrade_interactive(&run, &source, &mut prompt, &installer).unwrap_err();
        assert!(matches!(err, DepickError::UserCancelled));
        assert!(installer.calls.borrow().is_empty());
    }

    #[test]
    fn cancelled_run_is_returned_as_error() {
        let dir = tempfile::tempdir().unwrap();
        project(dir.path());
        let run = latest_run(dir.path());
        let source = FixedSource(vec![dependency(
            "pkg-a",
            "1.0.0",
            "1.0.0",
            "2.0.0",
            DependencyCategory::None,
            &run,
        )]);
        let installer = RecordingInstaller::default();
        // end of input before any submission
        let mut prompt = TerminalCheckbox::new(Cursor::new(&b""[..]), Vec::new());

        let err = run_upgrade(&run, &source, &mut prompt, &installer).unwrap_err();
        assert!(matches!(err, DepickError::UserCancelled));
        assert_eq!(err.to_string(), "Upgrade cancelled by user");
        assert!(installer.calls.borrow().is_empty());
    }

    #[test]
    fn nothing_outdated_skips_the_prompt() {
        let dir = tempfile::tempdir().unwrap();
        project(dir.path());
        let run = latest_run(dir.path());
        let source = FixedSource(vec![dependency(
            "pkg-a",
            "2.0.0",
            "2.0.0",
            "2.0.0",
            DependencyCategory::None,
            &run,
        )]);
        let installer = RecordingInstaller::default();
        // end of input would cancel if the prompt were shown
        let mut prompt = TerminalCheckbox::new(Cursor::new(&b""[..]), Vec::new());

        let report = upgrade_interactive(&run, &source, &mut prompt, &installer).unwrap();
        assert!(report.batches.is_empty());
        assert!(installer.calls.borrow().is_empty());
    }

    #[test]
    fn missing_lockfile_stops_before_querying() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let run = latest_run(dir.path());
        let installer = RecordingInstaller::default();
        let mut prompt = TerminalCheckbox::new(Cursor::new(&b""[..]), Vec::new());

        let err = upgrade_interactive(&run, &FixedSource(Vec::new()), &mut prompt, &installer)
            .unwrap_err();
        assert!(matches!(err, DepickError::ProjectValidation(_)));
    }

    #[test]
    fn table_lines_indent_rows_under_header() {
        colored::control::set_override(false);
        let run = run_config(TargetField::Wanted, SavePrefix::Range);
        let deps = vec![dependency(
            "ms",
            "2.1.1",
            "2.1.3",
            "3.0.0",
            DependencyCategory::None,
            &run,
        )];
        let lines = table_lines(&build_choices(&deps, &run));

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "dependencies");
        assert!(lines[1].starts_with("  name  range  from"));
        assert!(lines[2].starts_with("  ms    2.1.1  2.1.1"));
        assert_eq!(lines[3], " ");
    }
}
