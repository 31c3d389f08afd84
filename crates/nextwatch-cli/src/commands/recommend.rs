use super::render;
use super::spinner::Spinner;
use crate::app::App;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use nextwatch_core::ActiveView;
use nextwatch_sources::LlmError;

/// Hint printed next to an AI failure
pub fn failure_hint(error: &LlmError) -> &'static str {
    if error.is_credential_problem() {
        "Add or update your Gemini API key with `nextwatch config gemini`."
    } else {
        "Run `nextwatch recommend --refresh` to retry."
    }
}

pub async fn run_recommend(app: &App, refresh: bool) -> Result<()> {
    app.store.save_active_view(ActiveView::Recommendations);

    if app.store.watchlist().is_empty() {
        app.output.info_or_data(
            "Add titles to your watchlist (and rate them) to get personalized recommendations.",
            &Vec::<()>::new(),
        );
        return Ok(());
    }
    app.require_metadata()?;

    let spinner = Spinner::start("Asking for recommendations...", &app.output);
    let result = app.recommendations.load_or_generate(refresh).await;
    spinner.finish();

    let records = match result {
        Ok(records) => records,
        Err(e) => {
            app.output.warn(failure_hint(&e));
            return Err(e).wrap_err("Failed to load recommendations");
        }
    };

    if !app.output.is_human() {
        app.output.data(&records);
        return Ok(());
    }

    if records.is_empty() {
        app.output.info("No recommendations found. Try rating more titles in your watchlist.");
        return Ok(());
    }

    app.output
        .println(render::recommendations(&records, app.theme()).to_string());
    let degraded = records.iter().filter(|r| r.is_degraded()).count();
    if degraded > 0 {
        app.output
            .warn(format!("{} recommendation(s) could not be matched to a title", degraded));
    }
    app.output.info("Use `nextwatch show <ID>` for details or `nextwatch recommend --refresh` for a new list.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_hint() {
        assert!(failure_hint(&LlmError::MissingCredential).contains("config gemini"));
        assert!(failure_hint(&LlmError::Transport("timeout".to_string())).contains("--refresh"));
    }
}
