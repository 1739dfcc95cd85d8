pub mod draft;
pub mod filter;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A support ticket as stored by the remote helpdesk service.
///
/// The server owns every field. After creation the client only ever
/// changes `status`, and only through the lifecycle controller once the
/// server has confirmed the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    /// Server-assigned timestamp, kept verbatim; parsed only for sorting.
    pub created_at: String,
}

impl Ticket {
    /// Creation time, if the server string is recognizable.
    pub fn parsed_created_at(&self) -> Option<NaiveDateTime> {
        filter::parse_created_at(&self.created_at)
    }
}

/// Ticket category, fixed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Network,
    Software,
    Hardware,
    Account,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "Network",
            Self::Software => "Software",
            Self::Hardware => "Hardware",
            Self::Account => "Account",
        }
    }

    /// Next category in display order, wrapping; used by form and filter
    /// cycling.
    pub fn next(&self) -> Self {
        match self {
            Self::Network => Self::Software,
            Self::Software => Self::Hardware,
            Self::Hardware => Self::Account,
            Self::Account => Self::Network,
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Network, Self::Software, Self::Hardware, Self::Account].into_iter()
    }
}

/// Ticket priority. The default matches a fresh draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Low, Self::Medium, Self::High].into_iter()
    }
}

/// Ticket status. The set is unordered: the service accepts any
/// transition between the three values, so the client imposes no workflow
/// ordering either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Open, Self::InProgress, Self::Resolved].into_iter()
    }
}

/// An unsaved ticket being edited in the new-ticket form.
///
/// Serializes to exactly the POST body the service expects. Discarded on
/// cancel or successful submit; kept for correction on failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
}

/// Ordering applied to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
        }
    }
}

/// Everything that narrows or orders the visible list.
///
/// `None` on the enum fields is the "All" wildcard. The whole struct is
/// owned by the view layer and reset atomically by `clear`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub sort: SortOrder,
    pub search: String,
}

impl FilterState {
    /// Number of non-default criteria. The sort order never counts; it
    /// reorders the list without narrowing it.
    pub fn active_filter_count(&self) -> usize {
        [
            self.status.is_some(),
            self.priority.is_some(),
            self.category.is_some(),
            !self.search.is_empty(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Reset every field to its default in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Advance the status filter: All -> Open -> In Progress -> Resolved -> All.
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(Status::Open),
            Some(Status::Open) => Some(Status::InProgress),
            Some(Status::InProgress) => Some(Status::Resolved),
            Some(Status::Resolved) => None,
        };
    }

    pub fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Some(Priority::Low),
            Some(Priority::Low) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::High),
            Some(Priority::High) => None,
        };
    }

    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(Category::Network),
            Some(c) if c == Category::Account => None,
            Some(c) => Some(c.next()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names_match_the_service() {
        assert_eq!(serde_json::to_string(&Status::Open).unwrap(), "\"Open\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::to_string(&Status::Resolved).unwrap(),
            "\"Resolved\""
        );
    }

    #[test]
    fn draft_serializes_to_the_post_body() {
        let draft = TicketDraft {
            title: "WiFi down".to_string(),
            description: "Cannot connect".to_string(),
            category: Category::Network,
            priority: Priority::High,
        };
        let body: serde_json::Value = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["title"], "WiFi down");
        assert_eq!(body["description"], "Cannot connect");
        assert_eq!(body["category"], "Network");
        assert_eq!(body["priority"], "High");
    }

    #[test]
    fn default_draft_is_network_low() {
        let draft = TicketDraft::default();
        assert_eq!(draft.category, Category::Network);
        assert_eq!(draft.priority, Priority::Low);
        assert!(draft.title.is_empty());
        assert!(draft.description.is_empty());
    }

    #[test]
    fn active_filter_count_tracks_non_defaults() {
        let mut filter = FilterState::default();
        assert_eq!(filter.active_filter_count(), 0);

        filter.status = Some(Status::Open);
        filter.search = "wifi".to_string();
        assert_eq!(filter.active_filter_count(), 2);

        // Sort order is not a filter.
        filter.sort = SortOrder::Oldest;
        assert_eq!(filter.active_filter_count(), 2);

        filter.clear();
        assert_eq!(filter.active_filter_count(), 0);
        assert_eq!(filter.sort, SortOrder::Newest);
    }

    #[test]
    fn cycle_status_covers_all_values_and_wraps() {
        let mut filter = FilterState::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter.cycle_status();
            seen.push(filter.status);
        }
        assert_eq!(
            seen,
            vec![
                Some(Status::Open),
                Some(Status::InProgress),
                Some(Status::Resolved),
                None
            ]
        );
    }

    #[test]
    fn cycle_category_wraps_back_to_all() {
        let mut filter = FilterState::default();
        for _ in 0..Category::all().count() {
            filter.cycle_category();
            assert!(filter.category.is_some());
        }
        filter.cycle_category();
        assert_eq!(filter.category, None);
    }
}
