//! Range descriptor parsing and `Content-Range` computation.
//!
//! Clients select a slice of a collection with a compact JSON pair
//! `[from,to]`. By default `to` is exclusive (`limit = to - from`); when the
//! client is sorting or filtering it is inclusive (`limit = to - from + 1`).
//!
//! The response always carries a `Content-Range` value describing the slice
//! that was actually returned:
//!
//! ```text
//! links 0-9/42     ten rows starting at 0 out of 42
//! links */42       nothing returned, 42 in total
//! ```

use std::str::FromStr;

use thiserror::Error;

/// Reasons a range descriptor is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range must be a JSON array of two integers")]
    Malformed,

    #[error("range bounds must not be negative")]
    Negative,

    #[error("range end must not precede its start")]
    Reversed,
}

/// A parsed `[from,to]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeDescriptor {
    pub from: i64,
    pub to: i64,
}

impl RangeDescriptor {
    pub const fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }
}

impl FromStr for RangeDescriptor {
    type Err = RangeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let bounds: Vec<i64> =
            serde_json::from_str(raw.trim()).map_err(|_| RangeError::Malformed)?;

        let [from, to] = bounds[..] else {
            return Err(RangeError::Malformed);
        };

        if from < 0 || to < 0 {
            return Err(RangeError::Negative);
        }
        if to < from {
            return Err(RangeError::Reversed);
        }

        Ok(Self { from, to })
    }
}

/// Offset and row count to request from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

/// A range descriptor together with its inclusivity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    pub descriptor: RangeDescriptor,
    /// Set when the request carries a sort or filter specifier.
    pub inclusive: bool,
}

impl RangeQuery {
    pub fn new(descriptor: RangeDescriptor, inclusive: bool) -> Self {
        Self {
            descriptor,
            inclusive,
        }
    }

    /// Number of rows the client asked for, clamped to `i64::MAX`.
    pub fn limit(&self) -> i64 {
        let span = self.descriptor.to.saturating_sub(self.descriptor.from);
        if self.inclusive {
            span.saturating_add(1)
        } else {
            span
        }
    }

    /// Reconciles the request with the live `total`.
    ///
    /// Returns `Ok(None)` when nothing can be returned (empty collection,
    /// zero-length span, or start past the end) and the store must not be
    /// queried.
    pub fn window(&self, total: i64) -> Result<Option<Window>, RangeError> {
        let limit = self.limit();
        if limit < 0 {
            return Err(RangeError::Reversed);
        }

        let offset = self.descriptor.from;
        if total == 0 || limit == 0 || offset >= total {
            return Ok(None);
        }

        Ok(Some(Window { offset, limit }))
    }
}

/// Formats a `Content-Range` value for `count` rows starting at `from`.
pub fn content_range(resource: &str, from: i64, count: usize, total: i64) -> String {
    if count == 0 {
        return format!("{resource} */{total}");
    }
    let end = from + count as i64 - 1;
    format!("{resource} {from}-{end}/{total}")
}

/// A slice of a collection plus its `Content-Range` value.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub content_range: String,
}

impl<T> Page<T> {
    /// A page with no rows.
    pub fn empty(resource: &str, total: i64) -> Self {
        Self {
            items: Vec::new(),
            content_range: content_range(resource, 0, 0, total),
        }
    }

    /// A page of `items` located at `from`.
    pub fn new(resource: &str, from: i64, items: Vec<T>, total: i64) -> Self {
        let content_range = content_range(resource, from, items.len(), total);
        Self {
            items,
            content_range,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            content_range: self.content_range,
        }
    }
}
