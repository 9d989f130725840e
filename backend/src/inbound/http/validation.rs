//! Shared request parsing helpers for inbound HTTP adapters.

use std::str::FromStr;

use crate::domain::Error;

/// Parse a path identifier, treating anything unparseable as not found.
///
/// A segment that is not a positive integer cannot name a stored record, so
/// the caller's not-found message is returned rather than a 400.
pub(crate) fn parse_resource_id<T>(raw: &str, not_found: &'static str) -> Result<T, Error>
where
    T: FromStr,
{
    raw.parse().map_err(|_| Error::not_found(not_found))
}

/// Parse an optional `sortOrder` query value.
pub(crate) fn parse_sort_order<T>(raw: Option<&str>) -> Result<Option<T>, Error>
where
    T: FromStr<Err = String>,
{
    raw.map(|value| value.parse().map_err(Error::invalid_request))
        .transpose()
}
