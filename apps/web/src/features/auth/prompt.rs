//! One-shot hand-off of the verification prompt from signup to the dashboard.
//! Lives in memory only, so a reload never sees it, and `take` empties the
//! slot in the same step that hands the payload to the banner.

use crate::features::auth::types::VerificationPrompt;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone, Default)]
pub struct PromptSlot {
    inner: Arc<Mutex<Option<VerificationPrompt>>>,
}

impl PromptSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the payload for the next dashboard mount, replacing any unread one.
    pub fn deliver(&self, prompt: VerificationPrompt) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(prompt);
    }

    /// Consumes the payload; every later call returns `None` until a new delivery.
    pub fn take(&self) -> Option<VerificationPrompt> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
