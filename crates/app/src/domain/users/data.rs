//! User Data

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: String,
}

/// User Update Data
///
/// Absent or blank fields leave the stored value unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

impl UserUpdate {
    /// Drops blank values so they are treated as absent.
    #[must_use]
    pub fn without_blanks(self) -> Self {
        Self {
            name: self.name.filter(|name| !name.trim().is_empty()),
            email: self.email.filter(|email| !email.trim().is_empty()),
        }
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_dropped() {
        let update = UserUpdate {
            name: Some("   ".to_string()),
            email: Some("new@example.com".to_string()),
        }
        .without_blanks();

        assert_eq!(update.name, None);
        assert_eq!(update.email.as_deref(), Some("new@example.com"));
        assert!(!update.is_empty());
    }

    #[test]
    fn all_blank_update_is_empty() {
        let update = UserUpdate {
            name: Some(String::new()),
            email: None,
        }
        .without_blanks();

        assert!(update.is_empty());
    }
}
