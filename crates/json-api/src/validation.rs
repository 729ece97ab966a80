//! Request body validation.
//!
//! Bodies derive `garde::Validate` and are checked while being converted
//! into domain input; the database constraints back these checks up.

use garde::Validate;
use salvo::prelude::StatusError;

/// Runs the body's `garde` rules, reporting every failed field as a 400.
pub(crate) fn validate<T>(request: &T) -> Result<(), StatusError>
where
    T: Validate,
    T::Context: Default,
{
    request.validate().map_err(|report| {
        StatusError::bad_request().brief(report.to_string().trim_end().to_string())
    })
}

/// `garde` rule: the text holds something besides whitespace.
pub(crate) fn not_blank(value: &str, _context: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }

    Ok(())
}

/// A page of an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Page {
    pub(crate) from: usize,
    pub(crate) size: Option<usize>,
}

impl Page {
    /// `from` defaults to the start of the listing and must not be negative;
    /// `size`, when given, must be positive.
    pub(crate) fn new(from: Option<i64>, size: Option<i64>) -> Result<Self, StatusError> {
        let from = usize::try_from(from.unwrap_or(0))
            .map_err(|_negative| StatusError::bad_request().brief("from must not be negative"))?;

        let size = size
            .map(|size| {
                usize::try_from(size)
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| StatusError::bad_request().brief("size must be positive"))
            })
            .transpose()?;

        Ok(Self { from, size })
    }

    /// Applies the page to an already ordered listing.
    pub(crate) fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        let items = items.into_iter().skip(self.from);

        match self.size {
            Some(size) => items.take(size).collect(),
            None => items.collect(),
        }
    }
}
