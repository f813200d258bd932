//! Link visit entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A visit recorded when a short link is resolved.
///
/// Visits are append-only. Client metadata is best-effort and stored as an
/// empty string when the request did not carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkVisit {
    pub id: i64,
    pub link_id: i64,
    pub created_at: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub status: i32,
}

/// Input data for recording a visit.
///
/// `created_at` is set by the database at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkVisit {
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
    pub status: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_visit_allows_empty_metadata() {
        let visit = NewLinkVisit {
            link_id: 7,
            ip: String::new(),
            user_agent: String::new(),
            referer: String::new(),
            status: 302,
        };

        assert_eq!(visit.link_id, 7);
        assert!(visit.ip.is_empty());
        assert!(visit.user_agent.is_empty());
        assert_eq!(visit.status, 302);
    }
}
