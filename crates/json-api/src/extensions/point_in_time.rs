//! `?at=` reference instants.

use jiff::Timestamp;
use salvo::oapi::extract::QueryParam;

use crate::errors::ApiError;

pub(crate) trait PointInTimeExt {
    /// The `at` instant live fines are measured against, defaulting to now.
    fn into_point_in_time(self) -> Result<Timestamp, ApiError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Timestamp, ApiError> {
        parse_point_in_time(self.into_inner().as_deref(), Timestamp::now)
    }
}

fn parse_point_in_time(
    raw: Option<&str>,
    now: impl FnOnce() -> Timestamp,
) -> Result<Timestamp, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(now()),
        Some(value) => value.parse().map_err(|_ignored| {
            ApiError::bad_request(format!(
                "\"at\" must be an RFC 3339 timestamp, got \"{value}\""
            ))
        }),
    }
}
