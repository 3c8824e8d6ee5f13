//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short code mapped to a target URL, with click tracking metadata.
///
/// `code` is the primary key and immutable once created. `clicks` and
/// `last_clicked` are mutated only by the redirect path.
#[derive(Debug, Clone)]
pub struct Link {
    pub code: String,
    pub target: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        target: String,
        clicks: i64,
        last_clicked: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            target,
            clicks,
            last_clicked,
            created_at,
        }
    }

    /// Returns true if the link has been visited at least once.
    pub fn is_visited(&self) -> bool {
        self.last_clicked.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub target: String,
}
