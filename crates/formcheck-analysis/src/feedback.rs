//! Feedback messages and their ranking.

use serde::{Deserialize, Serialize};

/// Maximum number of messages surfaced per frame
pub const MAX_FEEDBACK: usize = 2;

/// Severity class of a feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Warning,
    Error,
    Info,
}

/// One candidate message produced while analyzing a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub message: String,
    pub priority: u8,
}

impl FeedbackMessage {
    pub fn new(kind: FeedbackKind, message: impl Into<String>, priority: u8) -> Self {
        Self {
            kind,
            message: message.into(),
            priority,
        }
    }

    pub fn success(message: impl Into<String>, priority: u8) -> Self {
        Self::new(FeedbackKind::Success, message, priority)
    }

    pub fn warning(message: impl Into<String>, priority: u8) -> Self {
        Self::new(FeedbackKind::Warning, message, priority)
    }

    pub fn error(message: impl Into<String>, priority: u8) -> Self {
        Self::new(FeedbackKind::Error, message, priority)
    }

    pub fn info(message: impl Into<String>, priority: u8) -> Self {
        Self::new(FeedbackKind::Info, message, priority)
    }
}

/// Order messages by descending priority and keep the first `limit`.
///
/// The sort is stable, so equal priorities keep their insertion order.
pub fn rank_feedback(mut messages: Vec<FeedbackMessage>, limit: usize) -> Vec<FeedbackMessage> {
    messages.sort_by(|a, b| b.priority.cmp(&a.priority));
    messages.truncate(limit);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(text: &str, priority: u8) -> FeedbackMessage {
        FeedbackMessage::warning(text, priority)
    }

    #[test]
    fn test_top_two_descending() {
        let ranked = rank_feedback(
            vec![msg("p3", 3), msg("p1", 1), msg("p4", 4), msg("p2", 2)],
            MAX_FEEDBACK,
        );
        let texts: Vec<&str> = ranked.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["p4", "p3"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let ranked = rank_feedback(
            vec![msg("first", 3), msg("low", 0), msg("second", 3), msg("third", 3)],
            MAX_FEEDBACK,
        );
        let texts: Vec<&str> = ranked.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_fewer_than_limit() {
        assert!(rank_feedback(Vec::new(), MAX_FEEDBACK).is_empty());
        assert_eq!(rank_feedback(vec![msg("only", 0)], MAX_FEEDBACK).len(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(FeedbackMessage::error("Knees in", 4)).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "Knees in");
        assert_eq!(json["priority"], 4);
    }
}
