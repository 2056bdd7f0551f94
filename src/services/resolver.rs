use std::sync::Arc;

use tracing::trace;

use crate::errors::{Result, SnaplinkError};
use crate::storage::LinkStore;
use crate::utils::is_valid_short_code;

/// Resolves a code to its target and records the visit.
pub struct LinkResolver {
    store: Arc<dyn LinkStore>,
}

impl LinkResolver {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// The returned URL comes from the same atomic step that bumped the
    /// counter. Codes outside the code pattern never reach the store.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        if !is_valid_short_code(code) {
            trace!("Invalid short code rejected: {}", code);
            return Err(SnaplinkError::not_found(format!(
                "Short link not found: {}",
                code
            )));
        }

        let link = self.store.increment_and_touch(code).await?;
        trace!("Resolved {} -> {}", code, link.target_url);
        Ok(link.target_url)
    }
}
