use super::render;
use super::spinner::Spinner;
use crate::app::App;
use color_eyre::Result;
use nextwatch_models::MetadataRecord;
use serde_json::json;

pub async fn run_show(app: &App, external_id: &str, with_similar: bool) -> Result<()> {
    app.require_metadata()?;

    let spinner = Spinner::start("Loading details...", &app.output);
    let record = app.find_title(external_id).await;
    spinner.finish();
    let record = record?;

    app.store.add_to_recently_viewed(&record);
    let entry = app.store.find_in_watchlist(&record.external_id);

    let similar = if with_similar {
        load_similar(app, &record, false).await
    } else {
        Vec::new()
    };

    if !app.output.is_human() {
        app.output.data(&json!({
            "title": record,
            "in_watchlist": entry.is_some(),
            "user_rating": entry.as_ref().and_then(|e| e.user_rating),
            "similar": similar,
        }));
        return Ok(());
    }

    let theme = app.theme();
    app.output.println(render::details(&record, entry.as_ref(), theme).to_string());

    if with_similar {
        app.output.println("\nMore like this");
        if similar.is_empty() {
            app.output.info("No similar shows found.");
        } else {
            app.output.println(render::titles(&similar, theme).to_string());
        }
    }

    if entry.is_none() {
        app.output
            .info(format!("Add it with `nextwatch watchlist add {}`", record.external_id));
    }
    Ok(())
}

pub async fn run_similar(app: &App, external_id: &str, refresh: bool) -> Result<()> {
    app.require_metadata()?;
    let record = app.find_title(external_id).await?;
    let similar = load_similar(app, &record, refresh).await;

    if !app.output.is_human() {
        app.output.data(&similar);
        return Ok(());
    }

    if similar.is_empty() {
        app.output.info("No similar shows found.");
    } else {
        app.output.println(format!("Similar to {} ({})", record.title, record.year));
        app.output.println(render::titles(&similar, app.theme()).to_string());
    }
    Ok(())
}

async fn load_similar(app: &App, record: &MetadataRecord, refresh: bool) -> Vec<MetadataRecord> {
    let spinner = Spinner::start("Finding similar shows...", &app.output);
    let similar = app.similar.for_title(record, refresh).await;
    spinner.finish();
    similar
}
