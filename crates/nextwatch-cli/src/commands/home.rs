use super::render;
use super::spinner::Spinner;
use crate::app::App;
use color_eyre::Result;
use nextwatch_core::ActiveView;
use owo_colors::OwoColorize;

pub async fn run_home(app: &App, refresh: bool) -> Result<()> {
    app.store.save_active_view(ActiveView::Home);
    app.require_metadata()?;

    let spinner = Spinner::start("Loading home content...", &app.output);
    let content = app.home.load(refresh).await;
    spinner.finish();

    if !app.output.is_human() {
        app.output.data(&content);
        return Ok(());
    }

    if content.is_empty() {
        app.output
            .warn("Could not load any titles. Check your OMDb key and try `nextwatch home --refresh`.");
        return Ok(());
    }

    let theme = app.theme();
    app.output.println(format!("{}", "Trending Now".bold()));
    app.output.println(render::titles(&content.trending, theme).to_string());
    for section in content.sections.iter().filter(|s| !s.items.is_empty()) {
        app.output.println(format!("\n{}", section.name.bold()));
        app.output.println(render::titles(&section.items, theme).to_string());
    }
    Ok(())
}

pub fn run_recent(app: &App) -> Result<()> {
    app.store.save_active_view(ActiveView::Recent);
    let recent = app.store.recently_viewed();

    if !app.output.is_human() {
        app.output.data(&recent);
        return Ok(());
    }

    if recent.is_empty() {
        app.output.info("Nothing viewed yet. Open a title with `nextwatch show <ID>`.");
        return Ok(());
    }
    app.output
        .println(render::recently_viewed(&recent, app.theme()).to_string());
    Ok(())
}
