//! Link entity representing a short code to destination URL mapping.

/// A persisted short link.
///
/// `id` is assigned by the store and never changes. `short_name` is unique
/// across all links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, original_url: String, short_name: String) -> Self {
        Self {
            id,
            original_url,
            short_name,
        }
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_url: String,
    pub short_name: String,
}

/// Full replacement of the mutable fields of an existing link.
#[derive(Debug, Clone)]
pub struct LinkChanges {
    pub original_url: String,
    pub short_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let link = Link::new(1, "https://example.com".to_string(), "abc".to_string());

        assert_eq!(link.id, 1);
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_name, "abc");
    }

    #[test]
    fn test_new_link_creation() {
        let new_link = NewLink {
            original_url: "https://rust-lang.org".to_string(),
            short_name: "xyz789".to_string(),
        };

        assert_eq!(new_link.short_name, "xyz789");
        assert_eq!(new_link.original_url, "https://rust-lang.org");
    }
}
