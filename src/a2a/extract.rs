//! Text extraction from inbound message envelopes.

use crate::a2a::types::Message;

/// Join the text parts of `message` with newlines, in part order.
///
/// Returns an empty string when there is no message or it carries no text
/// parts. File and data parts are skipped.
pub fn get_message_text(message: Option<&Message>) -> String {
    let Some(message) = message else {
        return String::new();
    };

    message
        .parts
        .iter()
        .filter_map(|p| p.as_text())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2a::types::{Part, Role};

    fn message_with(parts: Vec<Part>) -> Message {
        Message {
            role: Role::User,
            parts,
            ..Message::user_text("")
        }
    }

    #[test]
    fn test_absent_message_is_empty() {
        assert_eq!(get_message_text(None), "");
    }

    #[test]
    fn test_single_text_part() {
        let msg = Message::user_text("hi");
        assert_eq!(get_message_text(Some(&msg)), "hi");
    }

    #[test]
    fn test_skips_non_text_parts() {
        let msg = message_with(vec![
            Part::Data {
                data: serde_json::json!({"k": 1}),
                metadata: None,
            },
            Part::text("first"),
            Part::text("second"),
        ]);
        assert_eq!(get_message_text(Some(&msg)), "first\nsecond");
    }

    #[test]
    fn test_no_text_parts_is_empty() {
        let msg = message_with(vec![]);
        assert_eq!(get_message_text(Some(&msg)), "");
    }
}
