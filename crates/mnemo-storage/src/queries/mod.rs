pub mod atom_crud;
pub mod atom_query;
pub mod audit_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use mnemo_core::errors::MnemoResult;

use crate::to_storage_err;

/// Fixed-width RFC 3339 so lexicographic order equals time order.
pub(crate) fn fmt_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_time(s: &str) -> MnemoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp '{s}': {e}")))
}
