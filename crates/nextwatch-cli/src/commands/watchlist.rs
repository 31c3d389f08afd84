use super::render;
use super::spinner::Spinner;
use crate::app::App;
use clap::ValueEnum;
use color_eyre::Result;
use nextwatch_core::{group_by_year, ActiveView, AddOutcome, WatchlistFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum FilterArg {
    #[default]
    All,
    Rated,
    Unrated,
    Recent,
}

impl From<FilterArg> for WatchlistFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => WatchlistFilter::All,
            FilterArg::Rated => WatchlistFilter::Rated,
            FilterArg::Unrated => WatchlistFilter::Unrated,
            FilterArg::Recent => WatchlistFilter::Recent,
        }
    }
}

pub fn run_list(app: &App, filter: FilterArg) -> Result<()> {
    app.store.save_active_view(ActiveView::Watchlist);
    let entries = app.watchlist.list(filter.into());

    if !app.output.is_human() {
        app.output.data(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        match filter {
            FilterArg::All => {
                app.output.info("Your watchlist is empty.");
                app.output
                    .info("Search for titles with `nextwatch search <query>` and add them with `nextwatch watchlist add <ID>`.");
            }
            _ => app.output.info("No titles match this filter."),
        }
        return Ok(());
    }

    let theme = app.theme();
    let total = entries.len();
    // Recent keeps its own ordering instead of year groups
    if filter == FilterArg::Recent {
        app.output.println(render::watchlist(&entries, theme).to_string());
    } else {
        for (year, group) in group_by_year(entries) {
            app.output.println(format!("\n{}", year));
            app.output.println(render::watchlist(&group, theme).to_string());
        }
    }
    app.output.info(format!("{} title(s)", total));
    Ok(())
}

pub async fn run_add(app: &App, external_id: &str) -> Result<()> {
    app.require_metadata()?;

    let spinner = Spinner::start("Fetching details...", &app.output);
    let outcome = app.watchlist.add(external_id).await;
    spinner.finish();

    match outcome {
        AddOutcome::Added(entry) => {
            app.output
                .success(format!("Added \"{}\" ({}) to your watchlist", entry.title, entry.year));
            Ok(())
        }
        AddOutcome::AlreadyPresent => {
            app.output.warn("This title is already in your watchlist");
            Ok(())
        }
        AddOutcome::NotFound => Err(color_eyre::eyre::eyre!("No title found with id {}", external_id)),
    }
}

pub fn run_remove(app: &App, external_id: &str) -> Result<()> {
    if app.watchlist.remove(external_id) {
        app.output.success("Removed from watchlist");
    } else {
        app.output.warn(format!("{} is not in your watchlist", external_id));
    }
    Ok(())
}

pub fn run_rate(app: &App, external_id: &str, rating: u8) -> Result<()> {
    if app.watchlist.set_rating(external_id, rating) {
        app.output.success(format!("Rated {} {}", external_id, render::stars(Some(rating))));
        Ok(())
    } else {
        Err(color_eyre::eyre::eyre!("{} is not in your watchlist", external_id))
    }
}

pub fn run_clear(app: &App) -> Result<()> {
    if !app
        .confirm
        .confirm("Are you sure you want to clear your entire watchlist?", false)?
    {
        app.output.info("Cancelled");
        return Ok(());
    }

    if app.watchlist.clear() {
        app.output.success("Watchlist cleared");
        Ok(())
    } else {
        Err(color_eyre::eyre::eyre!("Failed to clear watchlist"))
    }
}
