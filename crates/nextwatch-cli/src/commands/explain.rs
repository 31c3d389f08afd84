use super::recommend::failure_hint;
use super::spinner::Spinner;
use crate::app::App;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use nextwatch_core::explain_plot;
use serde_json::json;

pub async fn run_explain(app: &App, external_id: &str, spoilers: bool) -> Result<()> {
    let record = app.find_title(external_id).await?;

    if spoilers
        && !app.confirm.confirm(
            &format!("The explanation of \"{}\" will contain spoilers. Continue?", record.title),
            false,
        )?
    {
        app.output.info("Cancelled");
        return Ok(());
    }

    let spinner = Spinner::start("Generating plot explanation...", &app.output);
    let result = explain_plot(app.gemini.as_ref(), &record, spoilers).await;
    spinner.finish();

    let text = match result {
        Ok(text) => text,
        Err(e) => {
            app.output.warn(failure_hint(&e));
            return Err(e).wrap_err("Failed to get plot explanation");
        }
    };

    if app.output.is_human() {
        let heading = if spoilers { "Full plot (spoilers)" } else { "Premise" };
        app.output.println(format!("{}: {} ({})\n", heading, record.title, record.year));
        app.output.println(text);
    } else {
        app.output.data(&json!({
            "external_id": record.external_id,
            "spoilers": spoilers,
            "explanation": text,
        }));
    }
    Ok(())
}
