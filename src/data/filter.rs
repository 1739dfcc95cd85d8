//! Pure filtering and ordering for the visible ticket list.
//!
//! This module is the single source of truth for what the table shows:
//! given the full collection and a `FilterState` it returns indices into
//! the collection, already ordered. It holds no state, so identical
//! inputs always produce identical output.

use chrono::{NaiveDate, NaiveDateTime};

use super::{FilterState, SortOrder, Ticket};

/// Compute the visible subset as indices into `tickets`, ordered per the
/// filter's sort order.
///
/// Tickets with unparseable timestamps sort as earliest rather than being
/// dropped. The sort is stable, so equal timestamps keep collection order.
pub fn visible_indices(tickets: &[Ticket], filter: &FilterState) -> Vec<usize> {
    let mut keyed: Vec<(usize, Option<NaiveDateTime>)> = tickets
        .iter()
        .enumerate()
        .filter(|(_, ticket)| matches(ticket, filter))
        .map(|(idx, ticket)| (idx, ticket.parsed_created_at()))
        .collect();

    match filter.sort {
        SortOrder::Newest => keyed.sort_by(|a, b| b.1.cmp(&a.1)),
        SortOrder::Oldest => keyed.sort_by(|a, b| a.1.cmp(&b.1)),
    }

    keyed.into_iter().map(|(idx, _)| idx).collect()
}

/// Whether a ticket passes every active criterion (all four are ANDed).
pub fn matches(ticket: &Ticket, filter: &FilterState) -> bool {
    if filter.status.map(|s| ticket.status != s).unwrap_or(false) {
        return false;
    }
    if filter.priority.map(|p| ticket.priority != p).unwrap_or(false) {
        return false;
    }
    if filter.category.map(|c| ticket.category != c).unwrap_or(false) {
        return false;
    }

    if filter.search.is_empty() {
        return true;
    }
    let needle = filter.search.to_lowercase();
    ticket.title.to_lowercase().contains(&needle)
        || ticket.description.to_lowercase().contains(&needle)
}

/// Parse a server timestamp string.
///
/// The service writes second-resolution ISO 8601 (`2024-01-05T09:30:00`);
/// RFC 3339 and bare dates are accepted as well.
pub fn parse_created_at(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, Priority, Status};

    fn make_ticket(id: i64, status: Status, priority: Priority, category: Category, created_at: &str) -> Ticket {
        Ticket {
            id,
            title: format!("Ticket {}", id),
            description: format!("Description for ticket {}", id),
            category,
            priority,
            status,
            created_at: created_at.to_string(),
        }
    }

    fn sample_pair() -> Vec<Ticket> {
        vec![
            make_ticket(1, Status::Open, Priority::Low, Category::Network, "2024-01-01"),
            make_ticket(2, Status::Resolved, Priority::High, Category::Hardware, "2024-02-01"),
        ]
    }

    fn ids(tickets: &[Ticket], indices: &[usize]) -> Vec<i64> {
        indices.iter().map(|&i| tickets[i].id).collect()
    }

    #[test]
    fn newest_first_with_no_filters() {
        let tickets = sample_pair();
        let visible = visible_indices(&tickets, &FilterState::default());
        assert_eq!(ids(&tickets, &visible), vec![2, 1]);
    }

    #[test]
    fn oldest_first_reverses_the_order() {
        let tickets = sample_pair();
        let filter = FilterState {
            sort: SortOrder::Oldest,
            ..FilterState::default()
        };
        let visible = visible_indices(&tickets, &filter);
        assert_eq!(ids(&tickets, &visible), vec![1, 2]);
    }

    #[test]
    fn status_filter_narrows_to_matching_tickets() {
        let tickets = sample_pair();
        let filter = FilterState {
            status: Some(Status::Resolved),
            ..FilterState::default()
        };
        let visible = visible_indices(&tickets, &filter);
        assert_eq!(ids(&tickets, &visible), vec![2]);
    }

    #[test]
    fn all_criteria_are_anded() {
        let tickets = vec![
            make_ticket(1, Status::Open, Priority::High, Category::Network, "2024-01-01"),
            make_ticket(2, Status::Open, Priority::Low, Category::Network, "2024-01-02"),
            make_ticket(3, Status::Resolved, Priority::High, Category::Network, "2024-01-03"),
        ];
        let filter = FilterState {
            status: Some(Status::Open),
            priority: Some(Priority::High),
            category: Some(Category::Network),
            ..FilterState::default()
        };
        let visible = visible_indices(&tickets, &filter);
        assert_eq!(ids(&tickets, &visible), vec![1]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let mut tickets = sample_pair();
        tickets[0].title = "WiFi down in lobby".to_string();
        tickets[1].description = "Replace wifi access point".to_string();

        let filter = FilterState {
            search: "WIFI".to_string(),
            ..FilterState::default()
        };
        let visible = visible_indices(&tickets, &filter);
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn empty_search_matches_everything() {
        let tickets = sample_pair();
        let visible = visible_indices(&tickets, &FilterState::default());
        assert_eq!(visible.len(), tickets.len());
    }

    #[test]
    fn unparseable_timestamps_sort_earliest_not_dropped() {
        let tickets = vec![
            make_ticket(1, Status::Open, Priority::Low, Category::Network, "not a date"),
            make_ticket(2, Status::Open, Priority::Low, Category::Network, "2024-02-01"),
        ];

        let newest = visible_indices(&tickets, &FilterState::default());
        assert_eq!(ids(&tickets, &newest), vec![2, 1]);

        let oldest = visible_indices(
            &tickets,
            &FilterState {
                sort: SortOrder::Oldest,
                ..FilterState::default()
            },
        );
        assert_eq!(ids(&tickets, &oldest), vec![1, 2]);
    }

    #[test]
    fn filtering_the_visible_subset_is_a_fixed_point() {
        let tickets = vec![
            make_ticket(1, Status::Open, Priority::Low, Category::Network, "2024-01-01"),
            make_ticket(2, Status::Resolved, Priority::High, Category::Hardware, "2024-02-01"),
            make_ticket(3, Status::Open, Priority::Medium, Category::Software, "2024-03-01"),
        ];
        let filter = FilterState {
            status: Some(Status::Open),
            ..FilterState::default()
        };

        let first = visible_indices(&tickets, &filter);
        let subset: Vec<Ticket> = first.iter().map(|&i| tickets[i].clone()).collect();
        let second = visible_indices(&subset, &filter);

        assert_eq!(second, (0..subset.len()).collect::<Vec<_>>());
    }

    #[test]
    fn identical_inputs_yield_identical_ordering() {
        let tickets = vec![
            make_ticket(1, Status::Open, Priority::Low, Category::Network, "2024-01-01T09:00:00"),
            make_ticket(2, Status::Open, Priority::Low, Category::Network, "2024-01-01T09:00:00"),
            make_ticket(3, Status::Open, Priority::Low, Category::Network, "2023-12-31"),
        ];
        let filter = FilterState::default();
        assert_eq!(
            visible_indices(&tickets, &filter),
            visible_indices(&tickets, &filter)
        );
        // Stable sort keeps collection order among equal timestamps.
        assert_eq!(ids(&tickets, &visible_indices(&tickets, &filter)), vec![1, 2, 3]);
    }

    #[test]
    fn parse_accepts_the_service_formats() {
        assert!(parse_created_at("2024-01-05T09:30:00").is_some());
        assert!(parse_created_at("2024-01-05").is_some());
        assert!(parse_created_at("2024-01-05T09:30:00+00:00").is_some());
        assert!(parse_created_at("yesterday").is_none());
        assert!(parse_created_at("").is_none());
    }
}
