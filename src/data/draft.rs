//! Draft validation, run before any request is issued.

use crate::error::TicketError;

use super::TicketDraft;

/// Validate a draft and return a trimmed copy ready for submission.
///
/// Title and description must be non-empty after trimming. Category and
/// priority are enum-constrained with defaults, so nothing to check.
pub fn validate(draft: &TicketDraft) -> Result<TicketDraft, TicketError> {
    let title = draft.title.trim();
    let description = draft.description.trim();

    if title.is_empty() {
        return Err(TicketError::Validation("Title is required".to_string()));
    }
    if description.is_empty() {
        return Err(TicketError::Validation(
            "Description is required".to_string(),
        ));
    }

    Ok(TicketDraft {
        title: title.to_string(),
        description: description.to_string(),
        category: draft.category,
        priority: draft.priority,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, Priority};

    #[test]
    fn empty_title_is_rejected() {
        let draft = TicketDraft {
            title: String::new(),
            description: "x".to_string(),
            ..TicketDraft::default()
        };
        assert!(matches!(validate(&draft), Err(TicketError::Validation(_))));
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let draft = TicketDraft {
            title: "   ".to_string(),
            description: "Cannot connect".to_string(),
            ..TicketDraft::default()
        };
        assert!(matches!(validate(&draft), Err(TicketError::Validation(_))));

        let draft = TicketDraft {
            title: "WiFi down".to_string(),
            description: "\t\n".to_string(),
            ..TicketDraft::default()
        };
        assert!(matches!(validate(&draft), Err(TicketError::Validation(_))));
    }

    #[test]
    fn valid_draft_comes_back_trimmed() {
        let draft = TicketDraft {
            title: "  WiFi down  ".to_string(),
            description: " Cannot connect ".to_string(),
            category: Category::Network,
            priority: Priority::High,
        };
        let trimmed = validate(&draft).unwrap();
        assert_eq!(trimmed.title, "WiFi down");
        assert_eq!(trimmed.description, "Cannot connect");
        assert_eq!(trimmed.category, Category::Network);
        assert_eq!(trimmed.priority, Priority::High);
    }
}
