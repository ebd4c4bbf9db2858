//! Search facade configuration.

use std::time::Duration;

use rand::RngCore;

/// Default hard deadline for a search request.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default page size for paginated queries.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default validity window for view tokens.
pub const DEFAULT_VIEW_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for [`SearchService`](crate::facade::SearchService).
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Wall-clock deadline for a search request.
    pub search_timeout: Duration,
    /// Page size used when the caller does not supply one.
    pub default_page_size: usize,
    /// Upper bound on concurrently running searches.
    pub max_concurrent_searches: usize,
    /// Validity window for view tokens.
    pub view_token_ttl: Duration,
    /// Signing key for view tokens. Regenerating the key invalidates
    /// outstanding tokens, which at worst re-counts a view.
    pub token_key: Vec<u8>,
}

impl SearchConfig {
    /// Configuration with defaults and a freshly generated token key.
    pub fn new() -> Self {
        let mut key = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        Self {
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_concurrent_searches: 8,
            view_token_ttl: DEFAULT_VIEW_TOKEN_TTL,
            token_key: key,
        }
    }

    /// Set the search deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    /// Set the default page size.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Set the concurrent-search bound.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent_searches = n.max(1);
        self
    }

    /// Set the view-token validity window.
    pub fn with_view_token_ttl(mut self, ttl: Duration) -> Self {
        self.view_token_ttl = ttl;
        self
    }

    /// Set the token signing key.
    pub fn with_token_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.token_key = key.into();
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
