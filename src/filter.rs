//! Filter state, transitions, and the filtered view over a catalog.
//!
//! Type, labels, and search narrow the result set and combine with AND; labels
//! combine with OR among themselves. The selected category never removes a
//! record: it only decides which labels are offered for selection.

use crate::loader::Catalog;
use crate::types::{Customization, CustomizationKind};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Restriction on record type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    #[default]
    All,
    Only(CustomizationKind),
}

impl TypeFilter {
    pub fn matches(self, kind: CustomizationKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == kind,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// Current filter selection. Each transition yields a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub type_filter: TypeFilter,
    pub labels: BTreeSet<String>,
    /// Already case-folded.
    pub search: String,
    /// Navigational only.
    pub category: Option<String>,
}

/// A user-level change to the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    SetType(TypeFilter),
    ToggleLabel(String),
    SetSearch(String),
    SetCategory(Option<String>),
    ClearAll,
    Remove(ActiveFilter),
}

/// One removable filter chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    Type(CustomizationKind),
    Search(String),
    Label(String),
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(kind) => write!(f, "type: {}", kind),
            Self::Search(term) => write!(f, "search: \"{}\"", term),
            Self::Label(label) => write!(f, "label: {}", label),
        }
    }
}

impl FilterState {
    /// Apply one action, returning the next state.
    #[must_use]
    pub fn reduce(&self, action: FilterAction) -> Self {
        let mut next = self.clone();
        match action {
            FilterAction::SetType(type_filter) => next.type_filter = type_filter,
            FilterAction::ToggleLabel(label) => {
                if let Some(label) = normalize_label(&label)
                    && !next.labels.remove(&label)
                {
                    next.labels.insert(label);
                }
            }
            FilterAction::SetSearch(term) => next.search = term.to_lowercase(),
            FilterAction::SetCategory(category) => next.category = category,
            FilterAction::ClearAll => next = Self::default(),
            FilterAction::Remove(ActiveFilter::Type(_)) => next.type_filter = TypeFilter::All,
            FilterAction::Remove(ActiveFilter::Search(_)) => next.search.clear(),
            FilterAction::Remove(ActiveFilter::Label(label)) => {
                if let Some(label) = normalize_label(&label) {
                    next.labels.remove(&label);
                }
            }
        }
        next
    }

    /// Whether anything narrows the result set. The category does not count.
    pub fn has_active_filters(&self) -> bool {
        self.type_filter != TypeFilter::All || !self.labels.is_empty() || !self.search.is_empty()
    }

    /// Removable chips: type, then search, then labels in sorted order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips = Vec::with_capacity(2 + self.labels.len());
        if let TypeFilter::Only(kind) = self.type_filter {
            chips.push(ActiveFilter::Type(kind));
        }
        if !self.search.is_empty() {
            chips.push(ActiveFilter::Search(self.search.clone()));
        }
        chips.extend(self.labels.iter().cloned().map(ActiveFilter::Label));
        chips
    }

    pub fn matches(&self, record: &Customization) -> bool {
        if !self.type_filter.matches(record.kind) {
            return false;
        }
        if !self.labels.is_empty() && !record.labels.iter().any(|l| self.labels.contains(l)) {
            return false;
        }
        if !self.search.is_empty() && !record.searchable_text().contains(&self.search) {
            return false;
        }
        true
    }
}

/// Trimmed, lowercased label; `None` when nothing is left.
fn normalize_label(label: &str) -> Option<String> {
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_lowercase())
}

/// Records matching `state`, in their original order.
pub fn apply<'a>(records: &'a [Customization], state: &FilterState) -> Vec<&'a Customization> {
    records.iter().filter(|record| state.matches(record)).collect()
}

/// Labels offered for selection: the selected category's labels, or every
/// label when no known category is selected. Sorted alphabetically.
pub fn offered_labels<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a str> {
    let labels = state
        .category
        .as_ref()
        .and_then(|category| catalog.labels_by_category().get(category))
        .unwrap_or_else(|| catalog.all_labels());
    labels.iter().map(String::as_str).collect()
}
