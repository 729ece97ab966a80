//! Point-in-time query parsing helpers.

use jiff::{Timestamp, civil::DateTime, tz::TimeZone};
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait PointInTimeExt {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError> {
        self.into_inner()
            .map(|value| parse_timestamp(&value))
            .transpose()
            .or_400("could not parse \"at\" query parameter")
            .map(|point_in_time| point_in_time.unwrap_or_else(Timestamp::now))
    }
}

/// Parses an RFC 3339 instant, or an offset-less civil date-time read as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Result<Timestamp, jiff::Error> {
    value.parse::<Timestamp>().or_else(|_instant_error| {
        value
            .parse::<DateTime>()?
            .to_zoned(TimeZone::UTC)
            .map(|zoned| zoned.timestamp())
    })
}
