use crate::agents::grouper::{ChoiceItem, ChoiceList};
use crate::error::{DepickError, Result};
use crate::model::Dependency;
use colored::Colorize;
use log::debug;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

pub const PROMPT_MESSAGE: &str = "Choose which packages to update.";
pub const EMPTY_SELECTION_MESSAGE: &str = "You must choose at least one package.";

/// Checks a submission; the error text is shown before asking again
pub type Validator = fn(&[usize]) -> std::result::Result<(), String>;

/// Settings handed to a checkbox prompt
#[derive(Clone, Copy)]
pub struct PromptConfig {
    /// Name of the answer, used when reporting the result
    pub name: &'static str,
    pub validate: Validator,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            name: "packages",
            validate: require_selection,
        }
    }
}

pub fn require_selection(selected: &[usize]) -> std::result::Result<(), String> {
    if selected.is_empty() {
        Err(EMPTY_SELECTION_MESSAGE.to_string())
    } else {
        Ok(())
    }
}

/// Multi-select prompt over a choice list.
///
/// Returns the indices of the confirmed choices (separators excluded) in
/// display order, or `DepickError::UserCancelled` when the operator aborts.
pub trait CheckboxPrompt {
    fn prompt(
        &mut self,
        message: &str,
        choices: &ChoiceList,
        config: &PromptConfig,
    ) -> Result<Vec<usize>>;
}

/// Ask the operator which upgrades to apply
pub fn select_upgrades(
    prompt: &mut dyn CheckboxPrompt,
    choices: &ChoiceList,
) -> Result<Vec<Dependency>> {
    let config = PromptConfig::default();
    let indices = prompt.prompt(PROMPT_MESSAGE, choices, &config)?;
    debug!(
        "prompt '{}' answered with {} selection(s)",
        config.name,
        indices.len()
    );

    indices
        .into_iter()
        .map(|index| {
            choices
                .choice(index)
                .map(|choice| choice.dependency.clone())
                .ok_or_else(|| {
                    DepickError::InvalidSelection(format!(
                        "prompt returned unknown choice {index}"
                    ))
                })
        })
        .collect()
}

/// Line-based checkbox prompt for terminals.
///
/// Numbers and ranges (`1 3 5-7`) toggle entries, `a` toggles all, `i`
/// inverts, an empty line confirms and `q` or end of input cancels.
pub struct TerminalCheckbox<R, W> {
    input: R,
    output: W,
}

impl TerminalCheckbox<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalCheckbox<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn render(&mut self, choices: &ChoiceList, selected: &BTreeSet<usize>) -> io::Result<()> {
        let mut index = 0;
        for item in choices.items() {
            match item {
                ChoiceItem::Separator(text) => writeln!(self.output, "    {text}")?,
                ChoiceItem::Choice(choice) => {
                    let mark = if selected.contains(&index) {
                        "◉".green()
                    } else {
                        "◯".normal()
                    };
                    writeln!(self.output, "{:>3} {} {}", index + 1, mark, choice.row)?;
                    index += 1;
                }
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> CheckboxPrompt for TerminalCheckbox<R, W> {
    fn prompt(
        &mut self,
        message: &str,
        choices: &ChoiceList,
        config: &PromptConfig,
    ) -> Result<Vec<usize>> {
        let count = choices.choice_count();
        let mut selected = BTreeSet::new();

        loop {
            writeln!(
                self.output,
                "{} {} {}",
                "?".green(),
                message.bold(),
                "(numbers/ranges toggle, a = all, i = invert, enter = confirm, q = quit)".dimmed()
            )?;
            self.render(choices, &selected)?;
            write!(self.output, "{}", "> ".bold())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Err(DepickError::UserCancelled);
            };

            match line.to_lowercase().as_str() {
                "" => {
                    let answer: Vec<usize> = selected.iter().copied().collect();
                    match (config.validate)(&answer) {
                        Ok(()) => {
                            let shorts: Vec<&str> = answer
                                .iter()
                                .filter_map(|i| choices.choice(*i))
                                .map(|choice| choice.short.as_str())
                                .collect();
                            writeln!(
                                self.output,
                                "{} {} {}",
                                "?".green(),
                                message.bold(),
                                shorts.join(", ").cyan()
                            )?;
                            return Ok(answer);
                        }
                        Err(reason) => writeln!(self.output, "{}", reason.red())?,
                    }
                }
                "q" | "quit" => return Err(DepickError::UserCancelled),
                "a" | "all" => {
                    if selected.len() == count {
                        selected.clear();
                    } else {
                        selected = (0..count).collect();
                    }
                }
                "i" | "invert" => {
                    selected = (0..count).filter(|i| !selected.contains(i)).collect();
                }
                other => match parse_toggles(other, count) {
                    Some(toggles) => {
                        for index in toggles {
                            if !selected.remove(&index) {
                                selected.insert(index);
                            }
                        }
                    }
                    None => writeln!(
                        self.output,
                        "{}",
                        format!("Invalid selection '{other}'. Use numbers between 1 and {count}.")
                            .red()
                    )?,
                },
            }
        }
    }
}

/// Parse `1 3 5-7` (or comma separated) into zero-based indices.
/// Returns `None` if any token is malformed or out of range.
fn parse_toggles(input: &str, count: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let (start, end) = match token.split_once('-') {
            Some((start, end)) => (start.parse::<usize>().ok()?, end.parse::<usize>().ok()?),
            None => {
                let n = token.parse::<usize>().ok()?;
                (n, n)
            }
        };
        if start == 0 || start > end || end > count {
            return None;
        }
        indices.extend((start - 1)..end);
    }
    Some(indices)
}
