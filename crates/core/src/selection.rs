use crate::continent::Continent;
use crate::error::SelectionError;
use crate::grouping::ContinentGroup;
use crate::search::filter_groups;
use crate::transform::DerivedCountryEntry;
use std::collections::{BTreeMap, BTreeSet};

/// Hard cap on countries shown in the chart
pub const MAX_SELECTION: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Adding would exceed [`MAX_SELECTION`]; nothing changed
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinentToggle {
    /// Number of countries added (may be short of the group when the cap is hit)
    Selected(usize),
    Deselected(usize),
}

/// The open country selector: an editable copy of the committed selection
#[derive(Debug, Clone, Default)]
pub struct SelectorDialog {
    pending: BTreeSet<String>,
    search_query: String,
    expanded: BTreeMap<Continent, bool>,
}

impl SelectorDialog {
    pub fn pending(&self) -> &BTreeSet<String> {
        &self.pending
    }

    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.contains(name)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_full(&self) -> bool {
        self.pending.len() >= MAX_SELECTION
    }

    pub fn can_apply(&self) -> bool {
        (1..=MAX_SELECTION).contains(&self.pending.len())
    }

    pub fn toggle_country(&mut self, name: &str) -> ToggleOutcome {
        if self.pending.remove(name) {
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            return ToggleOutcome::Rejected;
        }
        self.pending.insert(name.to_string());
        ToggleOutcome::Added
    }

    /// Deselects the whole group when every member is pending, otherwise
    /// fills in missing members in group order until the cap.
    pub fn toggle_continent(&mut self, group: &ContinentGroup) -> ContinentToggle {
        let all_selected = group.names().all(|name| self.pending.contains(name));

        if all_selected {
            let removed = group
                .names()
                .filter(|name| self.pending.remove(*name))
                .count();
            return ContinentToggle::Deselected(removed);
        }

        let mut added = 0;
        for name in group.names() {
            if self.is_full() {
                break;
            }
            if self.pending.insert(name.to_string()) {
                added += 1;
            }
        }
        ContinentToggle::Selected(added)
    }

    /// Pending members of the group, for the "(3/9 selected)" counter
    pub fn selected_in(&self, group: &ContinentGroup) -> usize {
        group
            .names()
            .filter(|name| self.pending.contains(*name))
            .count()
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Updates the query and expands every continent still visible under it
    pub fn set_query(&mut self, query: impl Into<String>, groups: &[ContinentGroup]) {
        self.search_query = query.into();
        if self.search_query.trim().is_empty() {
            return;
        }
        for group in filter_groups(groups, &self.search_query) {
            self.expanded.insert(group.continent, true);
        }
    }

    pub fn visible_groups(&self, groups: &[ContinentGroup]) -> Vec<ContinentGroup> {
        filter_groups(groups, &self.search_query)
    }

    pub fn is_expanded(&self, continent: Continent) -> bool {
        self.expanded.get(&continent).copied().unwrap_or(false)
    }

    pub fn set_expanded(&mut self, continent: Continent, expanded: bool) {
        self.expanded.insert(continent, expanded);
    }

    pub fn toggle_expanded(&mut self, continent: Continent) {
        let expanded = self.is_expanded(continent);
        self.expanded.insert(continent, !expanded);
    }
}

/// Committed chart selection plus the optional open selector.
///
/// `committed` is never truncated by filter changes: a country whose count
/// drops to zero stays selected and reappears once its count is non-zero.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    committed: BTreeSet<String>,
    dialog: Option<SelectorDialog>,
}

impl SelectionState {
    pub fn committed(&self) -> &BTreeSet<String> {
        &self.committed
    }

    pub fn is_committed(&self, name: &str) -> bool {
        self.committed.contains(name)
    }

    pub const fn dialog(&self) -> Option<&SelectorDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut SelectorDialog> {
        self.dialog.as_mut()
    }

    pub const fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Opens the selector seeded from the committed selection, with every
    /// listed continent expanded. Reopening keeps an existing dialog as is.
    pub fn open_dialog(&mut self, groups: &[ContinentGroup]) {
        if self.dialog.is_some() {
            return;
        }
        let expanded = groups.iter().map(|group| (group.continent, true)).collect();
        self.dialog = Some(SelectorDialog {
            pending: self.committed.clone(),
            search_query: String::new(),
            expanded,
        });
        tracing::debug!(committed = self.committed.len(), "selector opened");
    }

    /// Discards pending edits
    pub fn cancel(&mut self) {
        if self.dialog.take().is_some() {
            tracing::debug!("selector cancelled");
        }
    }

    /// Commits the pending selection and closes the selector. On error the
    /// dialog stays open and `committed` is untouched.
    pub fn apply_selection(&mut self) -> Result<usize, SelectionError> {
        let dialog = self.dialog.as_ref().ok_or(SelectionError::DialogClosed)?;
        match dialog.pending.len() {
            0 => return Err(SelectionError::EmptySelection),
            n if n > MAX_SELECTION => return Err(SelectionError::TooMany(n)),
            _ => {}
        }

        let dialog = self.dialog.take().ok_or(SelectionError::DialogClosed)?;
        self.committed = dialog.pending;
        tracing::info!(countries = self.committed.len(), "selection applied");
        Ok(self.committed.len())
    }

    /// Replaces the committed selection with the `n` highest non-zero
    /// entries of an already count-sorted list, bypassing the selector.
    pub fn reset_to_top_n(&mut self, entries: &[DerivedCountryEntry], n: usize) -> usize {
        self.committed = entries
            .iter()
            .filter(|entry| entry.film_count > 0)
            .take(n.min(MAX_SELECTION))
            .map(|entry| entry.name.clone())
            .collect();
        self.committed.len()
    }

    /// Chart rows: committed entries with a non-zero count, in list order
    pub fn rendered<'a>(&self, entries: &'a [DerivedCountryEntry]) -> Vec<&'a DerivedCountryEntry> {
        entries
            .iter()
            .filter(|entry| entry.film_count > 0 && self.committed.contains(&entry.name))
            .collect()
    }
}
