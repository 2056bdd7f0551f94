//! Code allocation
//!
//! Validates the target URL and either validates a caller-supplied code or
//! draws one from the injected [`CodeSource`]. Uniqueness is decided by the
//! store's atomic insert; there is no separate existence check.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkStore, ShortLink};
use crate::utils::is_valid_short_code;
use crate::utils::url_validator::validate_url;

use super::code_source::{CodeSource, GENERATED_CODE_LENGTH};

pub struct CodeAllocator {
    store: Arc<dyn LinkStore>,
    codes: Arc<dyn CodeSource>,
    max_attempts: u32,
}

impl CodeAllocator {
    pub fn new(store: Arc<dyn LinkStore>, codes: Arc<dyn CodeSource>, max_attempts: u32) -> Self {
        Self {
            store,
            codes,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Create a mapping for `target_url`.
    ///
    /// An empty `requested_code` counts as absent. Any other value is trimmed
    /// and must match `^[A-Za-z0-9]{6,8}$`.
    pub async fn allocate(
        &self,
        target_url: &str,
        requested_code: Option<&str>,
    ) -> Result<ShortLink> {
        let target_url =
            validate_url(target_url).map_err(|e| SnaplinkError::invalid_url(e.to_string()))?;

        match requested_code.filter(|c| !c.is_empty()) {
            Some(code) => self.allocate_requested(target_url, code.trim()).await,
            None => self.allocate_generated(target_url).await,
        }
    }

    async fn allocate_requested(&self, target_url: &str, code: &str) -> Result<ShortLink> {
        if !is_valid_short_code(code) {
            return Err(SnaplinkError::invalid_code_format(format!(
                "Code must be 6-8 characters (letters and numbers only): '{}'",
                code
            )));
        }

        match self.store.insert(code, target_url).await {
            Ok(link) => {
                info!("Allocated requested code {} -> {}", link.code, link.target_url);
                Ok(link)
            }
            Err(SnaplinkError::CodeConflict(_)) => {
                warn!("Requested code already taken: {}", code);
                Err(SnaplinkError::code_conflict(format!(
                    "Short code already exists: {}",
                    code
                )))
            }
            Err(e) => Err(e),
        }
    }

    async fn allocate_generated(&self, target_url: &str) -> Result<ShortLink> {
        for attempt in 1..=self.max_attempts {
            let code = self.codes.generate(GENERATED_CODE_LENGTH);

            match self.store.insert(&code, target_url).await {
                Ok(link) => {
                    info!("Allocated generated code {} -> {}", link.code, link.target_url);
                    return Ok(link);
                }
                Err(SnaplinkError::CodeConflict(_)) => {
                    debug!(
                        "Generated code {} collided (attempt {}/{})",
                        code, attempt, self.max_attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            "Code generation exhausted after {} attempts",
            self.max_attempts
        );
        Err(SnaplinkError::allocation_exhausted(format!(
            "Could not find a free code after {} attempts",
            self.max_attempts
        )))
    }
}
