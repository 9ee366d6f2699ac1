//! # Sender Selector
//!
//! Resolves exactly one message sender (or none) out of the set of
//! candidates discovered at process start, then initializes the winner
//! once. The result is immutable for the process lifetime; dispatch never
//! re-runs resolution.
//!
//! ## Resolution order
//!
//! 1. Zero candidates: messaging is disabled. Supported, warned once.
//! 2. One candidate: selected unconditionally, configuration ignored.
//! 3. Several candidates: the configured preferred identifier wins, else
//!    the built-in [`DEFAULT_SENDER_ID`], else resolution fails with a
//!    configuration error naming the available candidates.

use crate::config::NotifierConfig;
use crate::constants::DEFAULT_SENDER_ID;
use crate::error::{NotifyError, Result};
use crate::logging::log_sender_operation;
use std::sync::Arc;
use tracing::{info, warn};

use super::MessageSender;

/// The single sender chosen for the process lifetime, or none when
/// messaging is disabled. Read-only shared state after resolution.
#[derive(Clone)]
pub struct ResolvedSender {
    sender: Option<Arc<dyn MessageSender>>,
}

impl ResolvedSender {
    /// Messaging disabled: a valid, permanent state.
    pub fn none() -> Self {
        Self { sender: None }
    }

    pub fn get(&self) -> Option<&Arc<dyn MessageSender>> {
        self.sender.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Identifier of the resolved sender, if any.
    pub fn name(&self) -> Option<&str> {
        self.sender.as_deref().map(MessageSender::name)
    }
}

impl std::fmt::Debug for ResolvedSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSender")
            .field("sender", &self.name().unwrap_or("<none>"))
            .finish()
    }
}

/// Pure selection step: pick the winning candidate index without touching
/// configuration sources or performing initialization.
fn select(
    candidates: &[Arc<dyn MessageSender>],
    preferred: Option<&str>,
) -> Result<Option<usize>> {
    match candidates.len() {
        0 => Ok(None),
        1 => Ok(Some(0)),
        _ => {
            if let Some(preferred) = preferred {
                if let Some(index) = candidates.iter().position(|c| c.name() == preferred) {
                    return Ok(Some(index));
                }
            }
            if let Some(index) = candidates.iter().position(|c| c.name() == DEFAULT_SENDER_ID) {
                return Ok(Some(index));
            }
            let available: Vec<&str> = candidates.iter().map(|c| c.name()).collect();
            Err(NotifyError::configuration(
                "SenderSelector",
                format!(
                    "Multiple message senders discovered and none matches the preferred \
                     identifier {preferred:?} or the default '{DEFAULT_SENDER_ID}'. \
                     Available: {available:?}"
                ),
            ))
        }
    }
}

/// Resolve the process-wide message sender from the discovered candidate
/// set and initialize it exactly once. Run at startup, never per event.
pub async fn resolve_sender(
    candidates: Vec<Arc<dyn MessageSender>>,
    config: &NotifierConfig,
) -> Result<ResolvedSender> {
    if candidates.is_empty() {
        warn!("No message sender candidates discovered - messaging is disabled for this process");
        return Ok(ResolvedSender::none());
    }

    if candidates.len() > 1 {
        let discovered: Vec<&str> = candidates.iter().map(|c| c.name()).collect();
        info!(
            candidates = ?discovered,
            preferred = config.preferred_sender(),
            "Multiple message sender candidates discovered"
        );
    }

    let mut candidates = candidates;
    let Some(index) = select(&candidates, config.preferred_sender())? else {
        return Ok(ResolvedSender::none());
    };
    let winner = candidates.swap_remove(index);

    winner.init().await?;
    log_sender_operation(
        "resolve",
        Some(winner.name()),
        Some(&config.topic),
        "resolved",
        None,
    );

    Ok(ResolvedSender {
        sender: Some(winner),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::events::translator::WireMessage;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct TestSender {
        id: String,
        inits: AtomicU64,
    }

    impl TestSender {
        fn new(id: &str) -> Arc<Self> {
            Arc::new(Self {
                id: id.to_string(),
                inits: AtomicU64::new(0),
            })
        }
    }

    #[async_trait]
    impl MessageSender for TestSender {
        fn name(&self) -> &str {
            &self.id
        }

        async fn init(&self) -> Result<()> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn send_to_topic(&self, _topic: &str, _message: &WireMessage) -> Result<()> {
            Ok(())
        }
    }

    fn config_with_preference(preferred: &str) -> NotifierConfig {
        NotifierConfig {
            preferred_sender: preferred.to_string(),
            ..NotifierConfig::default()
        }
    }

    #[tokio::test]
    async fn test_zero_candidates_disables_messaging() {
        let resolved = resolve_sender(vec![], &NotifierConfig::default())
            .await
            .unwrap();
        assert!(!resolved.is_enabled());
        assert!(resolved.get().is_none());
    }

    #[tokio::test]
    async fn test_single_candidate_wins_despite_mismatched_preference() {
        let sender = TestSender::new("OnlyCandidate");
        let candidates: Vec<Arc<dyn MessageSender>> = vec![sender.clone()];
        let resolved = resolve_sender(candidates, &config_with_preference("SomethingElse"))
            .await
            .unwrap();
        assert_eq!(resolved.name(), Some("OnlyCandidate"));
        assert_eq!(sender.inits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_preferred_identifier_wins_among_many() {
        let a = TestSender::new("A");
        let b = TestSender::new("B");
        let candidates: Vec<Arc<dyn MessageSender>> = vec![a.clone(), b.clone()];
        let resolved = resolve_sender(candidates, &config_with_preference("B"))
            .await
            .unwrap();
        assert_eq!(resolved.name(), Some("B"));
        // Only the winner is initialized
        assert_eq!(a.inits.load(Ordering::SeqCst), 0);
        assert_eq!(b.inits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_identifier_wins_when_preference_unset() {
        let a = TestSender::new("A");
        let default = TestSender::new(DEFAULT_SENDER_ID);
        let candidates: Vec<Arc<dyn MessageSender>> = vec![a, default];
        let resolved = resolve_sender(candidates, &NotifierConfig::default())
            .await
            .unwrap();
        assert_eq!(resolved.name(), Some(DEFAULT_SENDER_ID));
    }

    #[tokio::test]
    async fn test_default_identifier_wins_when_preference_matches_none() {
        let a = TestSender::new("A");
        let default = TestSender::new(DEFAULT_SENDER_ID);
        let candidates: Vec<Arc<dyn MessageSender>> = vec![a, default];
        let resolved = resolve_sender(candidates, &config_with_preference("DoesNotExist"))
            .await
            .unwrap();
        assert_eq!(resolved.name(), Some(DEFAULT_SENDER_ID));
    }

    #[tokio::test]
    async fn test_ambiguous_set_without_match_fails_idempotently() {
        for _ in 0..3 {
            let candidates: Vec<Arc<dyn MessageSender>> =
                vec![TestSender::new("A"), TestSender::new("C")];
            let result = resolve_sender(candidates, &NotifierConfig::default()).await;
            match result {
                Err(NotifyError::Configuration { message, .. }) => {
                    assert!(message.contains("\"A\""));
                    assert!(message.contains("\"C\""));
                }
                other => panic!("expected configuration error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_winner_initialized_exactly_once() {
        let sender = TestSender::new(DEFAULT_SENDER_ID);
        let candidates: Vec<Arc<dyn MessageSender>> = vec![sender.clone()];
        let resolved = resolve_sender(candidates, &NotifierConfig::default())
            .await
            .unwrap();
        assert!(resolved.is_enabled());
        assert_eq!(sender.inits.load(Ordering::SeqCst), 1);
    }

    fn candidate_set(ids: &[String]) -> Vec<Arc<dyn MessageSender>> {
        ids.iter()
            .map(|id| -> Arc<dyn MessageSender> { TestSender::new(id) })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_singleton_always_selected(id in "[A-Za-z]{1,12}", preferred in "[A-Za-z]{0,12}") {
            let candidates = candidate_set(&[id]);
            let preferred = if preferred.is_empty() { None } else { Some(preferred.as_str()) };
            let index = select(&candidates, preferred).unwrap();
            prop_assert_eq!(index, Some(0));
        }

        #[test]
        fn prop_preferred_match_selected(ids in proptest::collection::vec("[A-Za-z]{1,12}", 2..6), pick in 0usize..6) {
            let pick = pick % ids.len();
            let preferred = ids[pick].clone();
            let candidates = candidate_set(&ids);
            let index = select(&candidates, Some(&preferred)).unwrap().unwrap();
            // The selected candidate carries the preferred identifier; ties
            // resolve to the first match in discovery order
            prop_assert_eq!(candidates[index].name(), preferred.as_str());
            prop_assert_eq!(index, ids.iter().position(|id| id == &preferred).unwrap());
        }

        #[test]
        fn prop_no_match_is_configuration_error(ids in proptest::collection::vec("[a-z]{1,12}", 2..6)) {
            // Lowercase identifiers can never equal the default identifier
            let candidates = candidate_set(&ids);
            let result = select(&candidates, Some("NoSuchSender"));
            prop_assert!(
                matches!(result, Err(NotifyError::Configuration { .. })),
                "expected Configuration error"
            );
        }
    }
}
