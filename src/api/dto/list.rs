//! Query parameters shared by the collection endpoints.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::range::{RangeDescriptor, RangeError, RangeQuery};

/// `?range=[from,to]&sort=...&filter=...`
///
/// `sort` and `filter` are never interpreted; their presence only switches
/// the range to inclusive mode. Empty values count as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub range: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub filter: Option<String>,
}

impl ListParams {
    /// True when the client sent a sort or filter specifier.
    pub fn is_inclusive(&self) -> bool {
        self.sort.is_some() || self.filter.is_some()
    }

    /// The `range` parameter, unless blank.
    pub fn raw_range(&self) -> Option<&str> {
        non_blank(self.range.as_deref())
    }

    /// Parses `raw` into a query using this request's inclusivity mode.
    pub fn range_query(&self, raw: &str) -> Result<RangeQuery, RangeError> {
        let descriptor: RangeDescriptor = raw.parse()?;
        Ok(RangeQuery::new(descriptor, self.is_inclusive()))
    }
}

/// Trims `value` and drops it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
