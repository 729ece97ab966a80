//! Request Data

/// New Request Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    /// What the requestor is looking for.
    pub description: String,
}
