//! Listing parameters: sort direction and optional filter values.

use serde::{Deserialize, Serialize};

/// Raw filter value that disables a filter which accepts it.
pub const MATCH_ALL: &str = "all";

/// Generic sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    #[default]
    Desc,
    Asc,
}

/// One optional filter parameter of a listing.
///
/// Only `Value` narrows the result. `MatchAll` is what the `"all"` sentinel
/// parses to and behaves exactly like `Absent` when the query is built; it is
/// kept distinct so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterParam<T> {
    #[default]
    Absent,
    MatchAll,
    Value(T),
}

impl FilterParam<String> {
    /// Interpret a raw request value. Surrounding whitespace is dropped and an
    /// empty value counts as absent.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Absent,
            Some(value) => Self::Value(value.to_owned()),
        }
    }

    /// Like [`FilterParam::from_raw`], additionally mapping [`MATCH_ALL`] to
    /// [`FilterParam::MatchAll`].
    pub fn from_raw_with_sentinel(raw: Option<&str>) -> Self {
        match Self::from_raw(raw) {
            Self::Value(value) if value == MATCH_ALL => Self::MatchAll,
            other => other,
        }
    }
}

impl<T> FilterParam<T> {
    /// The value to filter on, if this parameter narrows the listing.
    pub fn active(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::MatchAll => None,
        }
    }

    pub fn into_active(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::MatchAll => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Convert the carried value, keeping `Absent`/`MatchAll` as they are.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<FilterParam<U>, E> {
        Ok(match self {
            Self::Absent => FilterParam::Absent,
            Self::MatchAll => FilterParam::MatchAll,
            Self::Value(value) => FilterParam::Value(f(value)?),
        })
    }
}
