//! Generation counter for the signed-in account. Every account change advances
//! it; a task that awaited the network compares the token it took before the
//! await and drops its result if anything changed meanwhile.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Clone, Debug, Default)]
pub struct SessionEpoch {
    generation: Arc<AtomicU64>,
}

/// Snapshot taken by [`SessionEpoch::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochToken(u64);

impl SessionEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> EpochToken {
        EpochToken(self.generation.load(Ordering::Acquire))
    }

    pub fn advance(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// True when no account change happened since `token` was taken.
    pub fn is_current(&self, token: EpochToken) -> bool {
        self.generation.load(Ordering::Acquire) == token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_stays_current_without_changes() {
        let epoch = SessionEpoch::new();
        let token = epoch.begin();

        assert!(epoch.is_current(token));
        assert_eq!(epoch.begin(), token);
    }

    #[test]
    fn any_change_invalidates_earlier_tokens() {
        let epoch = SessionEpoch::new();
        let before = epoch.begin();

        epoch.advance();
        let after = epoch.begin();

        assert!(!epoch.is_current(before));
        assert!(epoch.is_current(after));
    }

    #[test]
    fn clones_share_one_generation() {
        let epoch = SessionEpoch::new();
        let shared = epoch.clone();
        let token = epoch.begin();

        shared.advance();

        assert!(!epoch.is_current(token));
    }
}
