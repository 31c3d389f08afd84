use nextwatch_models::MetadataRecord;
use nextwatch_sources::{LanguageModel, LlmError};
use tracing::info;

pub fn plot_prompt(record: &MetadataRecord, spoilers: bool) -> String {
    if spoilers {
        format!(
            "Provide a detailed explanation of the plot for \"{}\" ({}), including all major plot points, twists, and the ending. Include spoilers as this is a full plot explanation.",
            record.title, record.year
        )
    } else {
        format!(
            "Provide a brief explanation of the premise for \"{}\" ({}) without revealing any major plot twists or the ending. This should be spoiler-free and just give a general idea of what the story is about.",
            record.title, record.year
        )
    }
}

/// One-shot plot explanation, no conversation history
pub async fn explain_plot(
    model: &dyn LanguageModel,
    record: &MetadataRecord,
    spoilers: bool,
) -> Result<String, LlmError> {
    info!(external_id = %record.external_id, spoilers, "Requesting plot explanation");
    model.converse(&plot_prompt(record, spoilers), &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_record, FakeModel};

    #[test]
    fn test_prompts() {
        let record = sample_record("tt1", "Vincenzo");
        let safe = plot_prompt(&record, false);
        assert!(safe.starts_with("Provide a brief explanation of the premise for \"Vincenzo\" (2021)"));
        assert!(safe.contains("spoiler-free"));

        let full = plot_prompt(&record, true);
        assert!(full.contains("including all major plot points, twists, and the ending"));
    }

    #[tokio::test]
    async fn test_explain_plot_sends_single_turn() {
        let model = FakeModel::replying("It is about a lawyer.");
        let text = explain_plot(&model, &sample_record("tt1", "Vincenzo"), true).await.unwrap();
        assert_eq!(text, "It is about a lawyer.");

        let (prompt, history) = model.last_call().unwrap();
        assert!(prompt.contains("Include spoilers"));
        assert!(history.is_empty());
    }
}
