//! Item Data

use crate::domain::requests::records::RequestId;

/// New Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// Short title.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Whether the item can be booked.
    pub available: bool,
    /// Request this item answers.
    pub request_id: Option<RequestId>,
}

/// Item Update Data
///
/// Absent fields, and blank text fields, leave the stored value unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemUpdate {
    /// New title.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New availability.
    pub available: Option<bool>,
}

impl ItemUpdate {
    /// Drops blank text values so they are treated as absent.
    #[must_use]
    pub fn without_blanks(self) -> Self {
        Self {
            name: self.name.filter(|name| !name.trim().is_empty()),
            description: self
                .description
                .filter(|description| !description.trim().is_empty()),
            available: self.available,
        }
    }
}

/// New Comment Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    /// Comment body.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_fields_are_dropped_but_availability_kept() {
        let update = ItemUpdate {
            name: Some(" ".to_string()),
            description: Some("Cordless".to_string()),
            available: Some(false),
        }
        .without_blanks();

        assert_eq!(update.name, None);
        assert_eq!(update.description.as_deref(), Some("Cordless"));
        assert_eq!(update.available, Some(false));
    }
}
