//! Search configuration.

/// Configuration parameters for trip search and directory queries.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Page size used when the request does not specify one.
    pub default_limit: u32,

    /// Largest page size a request may ask for; larger values are clamped.
    pub max_limit: u32,

    /// Largest page number a request may ask for; larger values are clamped.
    pub max_page: u32,

    /// Upper bound on suggest results.
    pub suggest_limit: usize,

    /// Upper bound on trending results.
    pub trending_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            max_page: 200,
            suggest_limit: 10,
            trending_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.default_limit, 20);
        assert_eq!(config.max_limit, 100);
        assert_eq!(config.max_page, 200);
        assert_eq!(config.suggest_limit, 10);
        assert_eq!(config.trending_limit, 10);
    }
}
