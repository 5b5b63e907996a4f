//! Application Configuration

use crate::domain::value_objects::DEFAULT_PAGE_SIZE;

/// Blog application configuration
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Posts per page on list endpoints
    pub page_size: i64,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
