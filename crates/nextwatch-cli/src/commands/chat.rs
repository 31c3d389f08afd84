use super::recommend::failure_hint;
use super::spinner::Spinner;
use crate::app::App;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use nextwatch_models::{ChatMessage, ChatRole};
use owo_colors::OwoColorize;
use serde_json::json;

fn print_message(app: &App, message: &ChatMessage) {
    let speaker = match message.role {
        ChatRole::User => "You".bright_green().bold().to_string(),
        _ => "Gemini".bright_cyan().bold().to_string(),
    };
    app.output.println(format!("{}: {}\n", speaker, message.content));
}

pub async fn run_chat(app: &App, external_id: &str, message: &[String], clear: bool) -> Result<()> {
    if clear {
        if app.confirm.confirm("Clear this conversation?", false)? {
            app.output.report(app.chat.clear(external_id), "chat history");
        } else {
            app.output.info("Cancelled");
        }
        return Ok(());
    }

    let text = message.join(" ");
    let text = text.trim();
    if text.is_empty() {
        return show_history(app, external_id);
    }

    let record = app.find_title(external_id).await?;

    let spinner = Spinner::start(format!("Asking about {}...", record.title), &app.output);
    let result = app.chat.send(&record, text).await;
    spinner.finish();

    let reply = match result {
        Ok(reply) => reply,
        Err(e) => {
            app.output.warn(failure_hint(&e));
            return Err(e).wrap_err("Chat request failed");
        }
    };

    if app.output.is_human() {
        print_message(app, &ChatMessage::user(text));
        print_message(app, &ChatMessage::model(reply));
    } else {
        app.output.data(&json!({ "external_id": external_id, "reply": reply }));
    }
    Ok(())
}

fn show_history(app: &App, external_id: &str) -> Result<()> {
    let history = app.chat.history(external_id);

    if !app.output.is_human() {
        app.output.data(&history);
        return Ok(());
    }

    // The first exchange is the generated context pair
    let visible: Vec<&ChatMessage> = history.iter().skip(2).collect();
    if visible.is_empty() {
        app.output.info(format!(
            "No conversation yet. Ask something with `nextwatch chat {} <message>`.",
            external_id
        ));
        return Ok(());
    }
    for message in visible {
        print_message(app, message);
    }
    Ok(())
}
