use crate::display::RowFormatter;
use crate::model::{Dependency, DependencyCategory, TargetField};
use colored::Colorize;

/// A selectable entry of the upgrade prompt
#[derive(Debug, Clone)]
pub struct Choice {
    /// Formatted table row shown to the operator
    pub row: String,
    pub dependency: Dependency,
    /// `name@version`, echoed once the selection is confirmed
    pub short: String,
    pub upgrade_to: String,
}

#[derive(Debug, Clone)]
pub enum ChoiceItem {
    Separator(String),
    Choice(Choice),
}

/// Ordered prompt entries: each group is a label, the header row, its
/// choices and a blank separator.
#[derive(Debug, Clone, Default)]
pub struct ChoiceList {
    items: Vec<ChoiceItem>,
}

impl ChoiceList {
    pub fn items(&self) -> &[ChoiceItem] {
        &self.items
    }

    /// Selectable entries in display order, separators skipped
    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.items.iter().filter_map(|item| match item {
            ChoiceItem::Choice(choice) => Some(choice),
            ChoiceItem::Separator(_) => None,
        })
    }

    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices().nth(index)
    }

    pub fn choice_count(&self) -> usize {
        self.choices().count()
    }
}

/// Groups outdated dependencies by category, keeping the order in which
/// categories first appear in the input.
pub struct Grouper<'a> {
    formatter: &'a RowFormatter,
    target: TargetField,
}

impl<'a> Grouper<'a> {
    pub fn new(formatter: &'a RowFormatter, target: TargetField) -> Self {
        Self { formatter, target }
    }

    pub fn group(&self, dependencies: &[Dependency]) -> ChoiceList {
        let mut groups: Vec<(DependencyCategory, Vec<Choice>)> = Vec::new();

        for dep in dependencies {
            let choice = self.choice(dep);
            match groups.iter_mut().find(|(category, _)| *category == dep.category) {
                Some((_, choices)) => choices.push(choice),
                None => groups.push((dep.category, vec![choice])),
            }
        }

        let header = self.formatter.header_row();
        let mut items = Vec::new();
        for (category, choices) in groups {
            let label = category.group_label().bold().underline().green().to_string();
            items.push(ChoiceItem::Separator(label));
            items.push(ChoiceItem::Separator(header.clone()));
            items.extend(choices.into_iter().map(ChoiceItem::Choice));
            items.push(ChoiceItem::Separator(" ".to_string()));
        }

        ChoiceList { items }
    }

    fn choice(&self, dep: &Dependency) -> Choice {
        Choice {
            row: self.formatter.row(dep),
            dependency: dep.clone(),
            short: dep.short_label(self.target),
            upgrade_to: dep.upgrade_to.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dependency::sample;

    fn labels(list: &ChoiceList) -> Vec<String> {
        list.items()
            .iter()
            .map(|item| match item {
                ChoiceItem::Separator(text) => format!("sep:{text}"),
                ChoiceItem::Choice(choice) => format!("choice:{}", choice.dependency.name),
            })
            .collect()
    }

    #[test]
    fn groups_follow_first_occurrence() {
        colored::control::set_override(false);
        let deps = vec![
            sample("jest", "26.0.0", "26.6.3", "29.0.0", DependencyCategory::Dev),
            sample("react", "17.0.0", "17.0.2", "18.2.0", DependencyCategory::None),
            sample("eslint", "7.0.0", "7.32.0", "8.0.0", DependencyCategory::Dev),
            sample("fsevents", "2.1.0", "2.3.2", "2.3.2", DependencyCategory::Optional),
        ];
        let formatter = RowFormatter::new(&deps, TargetField::Wanted);
        let list = Grouper::new(&formatter, TargetField::Wanted).group(&deps);
        let header = format!("sep:{}", formatter.header_row());

        assert_eq!(
            labels(&list),
            vec![
                "sep:devDependencies".to_string(),
                header.clone(),
                "choice:jest".to_string(),
                "choice:eslint".to_string(),
                "sep: ".to_string(),
                "sep:dependencies".to_string(),
                header.clone(),
                "choice:react".to_string(),
                "sep: ".to_string(),
                "sep:optionalDependencies".to_string(),
                header,
                "choice:fsevents".to_string(),
                "sep: ".to_string(),
            ]
        );
        assert_eq!(list.choice_count(), 4);
    }

    #[test]
    fn choice_carries_short_label_and_pattern() {
        colored::control::set_override(false);
        let deps = vec![sample("ms", "2.1.1", "2.1.3", "3.0.0", DependencyCategory::None)];
        let formatter = RowFormatter::new(&deps, TargetField::Latest);
        let list = Grouper::new(&formatter, TargetField::Latest).group(&deps);

        let choice = list.choice(0).unwrap();
        assert_eq!(choice.short, "ms@3.0.0");
        assert_eq!(choice.upgrade_to, "ms@3.0.0");
        assert_eq!(choice.row, formatter.row(&deps[0]));
        assert!(list.choice(1).is_none());
    }

    #[test]
    fn empty_input_builds_empty_list() {
        let formatter = RowFormatter::new(&[], TargetField::Wanted);
        let list = Grouper::new(&formatter, TargetField::Wanted).group(&[]);
        assert!(list.items().is_empty());
        assert_eq!(list.choice_count(), 0);
    }
}
