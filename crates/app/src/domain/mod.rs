//! Rental Marketplace Domain Concerns

use std::str::FromStr;

use sqlx::{Row, postgres::PgRow};
use thiserror::Error;

pub mod identity;
pub mod products;
pub mod rentals;
pub mod users;

/// A stored or submitted value that does not name any variant of a status enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Decode a `TEXT` column holding one of an enum's string forms.
pub(crate) fn try_get_variant<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    let raw: String = row.try_get(column)?;

    raw.parse::<T>().map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}
