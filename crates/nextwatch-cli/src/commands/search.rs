use super::render;
use super::spinner::Spinner;
use crate::app::App;
use color_eyre::Result;
use nextwatch_sources::MetadataProvider;
use serde_json::json;
use std::collections::HashSet;

pub const MIN_QUERY_CHARS: usize = 3;

pub fn is_valid_query(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

pub async fn run_search(app: &App, query: &str) -> Result<()> {
    let query = query.trim();
    if !is_valid_query(query) {
        app.output
            .warn(format!("Search query must be at least {} characters", MIN_QUERY_CHARS));
        return Ok(());
    }
    app.require_metadata()?;

    let spinner = Spinner::start(format!("Searching for \"{}\"...", query), &app.output);
    let results = app.metadata.search(query).await;
    spinner.finish();

    let saved: HashSet<String> = app.store.watchlist().into_iter().map(|e| e.external_id).collect();

    if !app.output.is_human() {
        let payload: Vec<_> = results
            .iter()
            .map(|r| json!({ "result": r, "in_watchlist": saved.contains(&r.external_id) }))
            .collect();
        app.output.data(&payload);
        return Ok(());
    }

    if results.is_empty() {
        app.output.info(format!("No results found for \"{}\"", query));
        return Ok(());
    }

    app.output.println(
        render::search_results(&results, |id| saved.contains(id), app.theme()).to_string(),
    );
    app.output
        .info(format!("{} result(s). Use `nextwatch show <ID>` for details.", results.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_length() {
        assert!(!is_valid_query("ab"));
        assert!(!is_valid_query("  ab  "));
        assert!(is_valid_query("abc"));
        assert!(is_valid_query("추노추"));
    }
}
