use crate::store::Store;
use nextwatch_models::{ChatMessage, MetadataRecord};
use nextwatch_sources::{LanguageModel, LlmError};
use std::sync::Arc;
use tracing::{debug, info};

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

/// Synthetic opening exchange that anchors the conversation to one title
pub fn context_pair(record: &MetadataRecord) -> [ChatMessage; 2] {
    let context = format!(
        "I'm asking about the movie/show: {} ({}).\nGenre: {}\nDirector: {}\nActors: {}\nPlot: {}\n\nPlease keep your answers focused on this specific title.",
        record.title,
        record.year,
        field(&record.genre),
        field(&record.director),
        field(&record.cast),
        field(&record.plot),
    );
    let acknowledgment = format!(
        "I'll help you with information about {}. What would you like to know?",
        record.title
    );
    [ChatMessage::user(context), ChatMessage::model(acknowledgment)]
}

/// Per-title conversations with the language model
pub struct ChatSession {
    store: Arc<Store>,
    model: Arc<dyn LanguageModel>,
}

impl ChatSession {
    pub fn new(store: Arc<Store>, model: Arc<dyn LanguageModel>) -> Self {
        Self { store, model }
    }

    /// Messages to show the user, without the context preamble's system turns
    pub fn history(&self, external_id: &str) -> Vec<ChatMessage> {
        self.store
            .chat_history(external_id)
            .into_iter()
            .filter(|m| m.is_conversational())
            .collect()
    }

    /// Send `message` about `record` and persist the exchange.
    ///
    /// The new message goes out as the prompt only; history holds the earlier
    /// turns. Nothing is written when the model call fails, so a failed first
    /// message does not leave an orphaned context pair behind.
    pub async fn send(&self, record: &MetadataRecord, message: &str) -> Result<String, LlmError> {
        let mut history = self.store.chat_history(&record.external_id);
        if history.is_empty() {
            history.extend(context_pair(record));
        }

        debug!(external_id = %record.external_id, turns = history.len(), "Sending chat message");
        let reply = self.model.converse(message, &history).await?;

        history.push(ChatMessage::user(message));
        history.push(ChatMessage::model(reply.clone()));
        self.store.save_chat_history(&record.external_id, &history);
        info!(external_id = %record.external_id, turns = history.len(), "Chat exchange saved");

        Ok(reply)
    }

    pub fn clear(&self, external_id: &str) -> bool {
        self.store.clear_chat_history(external_id)
    }

    pub fn clear_all(&self) -> bool {
        self.store.clear_all_chat_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_record, FakeModel};
    use nextwatch_models::ChatRole;

    #[test]
    fn test_context_pair() {
        let record = sample_record("tt1", "Vincenzo");
        let [context, ack] = context_pair(&record);
        assert_eq!(context.role, ChatRole::User);
        assert!(context.content.starts_with("I'm asking about the movie/show: Vincenzo (2021).\nGenre: Drama, Romance\n"));
        assert!(context.content.ends_with("Please keep your answers focused on this specific title."));
        assert_eq!(ack.role, ChatRole::Model);
        assert_eq!(ack.content, "I'll help you with information about Vincenzo. What would you like to know?");
    }

    #[tokio::test]
    async fn test_first_message_sends_context_once() {
        let store = Arc::new(Store::in_memory());
        let model = Arc::new(FakeModel::replying("He is a lawyer."));
        let session = ChatSession::new(store.clone(), model.clone());
        let record = sample_record("tt1", "Vincenzo");

        let reply = session.send(&record, "Who is the lead?").await.unwrap();
        assert_eq!(reply, "He is a lawyer.");

        let (prompt, history) = model.last_call().unwrap();
        assert_eq!(prompt, "Who is the lead?");
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|m| m.content != "Who is the lead?"));

        let saved = store.chat_history("tt1");
        assert_eq!(saved.len(), 4);
        assert_eq!(saved[2], ChatMessage::user("Who is the lead?"));
        assert_eq!(saved[3], ChatMessage::model("He is a lawyer."));
    }

    #[tokio::test]
    async fn test_follow_up_reuses_history() {
        let store = Arc::new(Store::in_memory());
        let model = Arc::new(FakeModel::replying("Yes."));
        let session = ChatSession::new(store.clone(), model.clone());
        let record = sample_record("tt1", "Vincenzo");

        session.send(&record, "First?").await.unwrap();
        session.send(&record, "Second?").await.unwrap();

        let (_, history) = model.last_call().unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(store.chat_history("tt1").len(), 6);
    }

    #[tokio::test]
    async fn test_failure_persists_nothing() {
        let store = Arc::new(Store::in_memory());
        let session = ChatSession::new(store.clone(), Arc::new(FakeModel::failing(LlmError::MissingCredential)));

        let result = session.send(&sample_record("tt1", "Vincenzo"), "Hello?").await;
        assert!(matches!(result, Err(LlmError::MissingCredential)));
        assert!(store.chat_history("tt1").is_empty());
    }

    #[test]
    fn test_history_hides_system_turns_and_clear() {
        let store = Arc::new(Store::in_memory());
        store.save_chat_history(
            "tt1",
            &[ChatMessage::system("legacy"), ChatMessage::user("hi"), ChatMessage::model("hello")],
        );
        let session = ChatSession::new(store.clone(), Arc::new(FakeModel::replying("")));

        assert_eq!(session.history("tt1").len(), 2);
        assert!(session.clear("tt1"));
        assert!(session.history("tt1").is_empty());
    }
}
