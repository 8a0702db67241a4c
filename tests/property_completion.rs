//! Property-based tests for post-processing and wire types
//!
//! Covers the cleanup idempotence properties, the reverse message scan and
//! serialization round-trips.

use proptest::prelude::*;

use passerelle::api::types::{ChatCompletionRequest, ChatMessage, Role};
use passerelle::completion::{clean_completion, last_user_message};
use passerelle::metrics::MetricsSnapshot;

// ============================================================================
// Cleanup (sentinel stripping)
// ============================================================================

#[test]
fn test_cleanup_example_from_contract() {
    // POST "hello" → prompt "---\nhello"; raw "---\nhello\nworld" cleans to
    // "hello\nworld"
    assert_eq!(clean_completion("---\nhello\nworld", "---"), "hello\nworld");
}

#[test]
fn test_cleanup_without_sentinel_is_trim_only() {
    assert_eq!(clean_completion("  no marker here \n", "---"), "no marker here");
}

#[test]
fn test_cleanup_empty_input() {
    assert_eq!(clean_completion("", "---"), "");
}

#[test]
fn test_cleanup_sentinel_only() {
    assert_eq!(clean_completion("---", "---"), "");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Sentinel present exactly once: result is everything after it, trimmed.
    // Generated segments avoid '-' so they cannot form extra sentinels.
    #[test]
    fn prop_single_sentinel_keeps_tail(
        prefix in "[a-z \n]{0,40}",
        suffix in "[a-z \n]{0,40}",
    ) {
        let raw = format!("{prefix}---{suffix}");
        prop_assert_eq!(clean_completion(&raw, "---"), suffix.trim());
    }

    // Sentinel absent: result is the trimmed input, unchanged otherwise.
    #[test]
    fn prop_absent_sentinel_is_identity_modulo_trim(raw in "[a-z \n]{0,60}") {
        prop_assert_eq!(clean_completion(&raw, "---"), raw.trim());
    }

    // Cleaning is idempotent: a cleaned text cleans to itself.
    #[test]
    fn prop_cleanup_idempotent(raw in "[a-z \n-]{0,60}") {
        let once = clean_completion(&raw, "---");
        prop_assert_eq!(clean_completion(once, "---"), once);
    }
}

// ============================================================================
// Message selection (reverse scan)
// ============================================================================

#[test]
fn test_no_messages_selects_nothing() {
    assert_eq!(last_user_message(&[]), None);
}

#[test]
fn test_non_user_roles_are_skipped() {
    let messages = vec![
        ChatMessage::new(Role::System, "setup"),
        ChatMessage::new(Role::Assistant, "reply"),
    ];
    assert_eq!(last_user_message(&messages), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Whatever surrounds them, the most recent user entry wins.
    #[test]
    fn prop_most_recent_user_message_wins(
        contents in proptest::collection::vec("[a-z]{1,12}", 1..6),
        trailing_assistant in any::<bool>(),
    ) {
        let mut messages: Vec<ChatMessage> = contents
            .iter()
            .map(|c| ChatMessage::new(Role::User, c.clone()))
            .collect();
        if trailing_assistant {
            messages.push(ChatMessage::new(Role::Assistant, "noise"));
        }

        let expected = contents.last().expect("non-empty").as_str();
        prop_assert_eq!(last_user_message(&messages), Some(expected));
    }
}

// ============================================================================
// Wire-type round-trips
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_chat_message_roundtrip(content in ".{0,80}") {
        let message = ChatMessage::new(Role::User, content.clone());
        let json = serde_json::to_string(&message).expect("serialize");
        let parsed: ChatMessage = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(parsed.role, Role::User);
        prop_assert_eq!(parsed.content, content);
    }

    #[test]
    fn prop_request_roundtrip(
        model in proptest::option::of("[a-z0-9-]{1,20}"),
        contents in proptest::collection::vec("[a-z ]{0,20}", 0..4),
    ) {
        let request = ChatCompletionRequest {
            model: model.clone(),
            messages: contents
                .iter()
                .map(|c| ChatMessage::new(Role::User, c.clone()))
                .collect(),
        };
        let json = serde_json::to_string(&request).expect("serialize");
        let parsed: ChatCompletionRequest = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(parsed.model, model);
        prop_assert_eq!(parsed.messages.len(), contents.len());
    }

    #[test]
    fn prop_metrics_snapshot_roundtrip(
        requests in 0u64..1_000_000,
        errors in 0u64..1_000_000,
        total in 0.0f64..1e9,
    ) {
        let average = if requests > 0 { total / requests as f64 } else { 0.0 };
        let snapshot = MetricsSnapshot {
            requests_total: requests,
            errors_total: errors,
            total_response_time_ms: total,
            average_response_time_ms: average,
        };
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let parsed: MetricsSnapshot = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(parsed, snapshot);
    }
}
