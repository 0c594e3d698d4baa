use serde::Deserialize;

/// Minimal subset of the Telegram Bot API update payload — only what the
/// webhook handler needs to route commands and register the chat.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_with_command() {
        let doc = json!({
            "update_id": 1001,
            "message": {
                "message_id": 5,
                "chat": { "id": 42, "type": "private" },
                "text": "/start"
            }
        });

        let update: Update = serde_json::from_value(doc).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/start"));
    }

    #[test]
    fn test_update_without_message() {
        let update: Update = serde_json::from_value(json!({ "update_id": 7 })).unwrap();
        assert!(update.message.is_none());
    }
}
