use crate::app::App;
use color_eyre::Result;
use nextwatch_core::StorageKey;

#[derive(Debug, Clone, Copy, Default)]
pub struct ClearTargets {
    pub all: bool,
    pub chat: bool,
    pub watchlist: bool,
    pub recommendations: bool,
    pub cache: bool,
}

impl ClearTargets {
    fn any(&self) -> bool {
        self.all || self.chat || self.watchlist || self.recommendations || self.cache
    }
}

pub fn run_clear(app: &App, targets: ClearTargets) -> Result<()> {
    if !targets.any() {
        app.output
            .warn("No clear option specified. Use --chat, --watchlist, --recommendations, --cache, or --all");
        app.output.println("\nExample: nextwatch clear --cache");
        return Ok(());
    }

    if targets.all {
        if !app.confirm.confirm(
            "This removes your watchlist, ratings, chats, API key and cached data. Continue?",
            false,
        )? {
            app.output.info("Cancelled");
            return Ok(());
        }
        app.output.report(app.store.clear_all(), "all stored data");
        return Ok(());
    }

    if targets.watchlist {
        if app.confirm.confirm("Clear your entire watchlist?", false)? {
            app.output.report(app.watchlist.clear(), "watchlist");
        } else {
            app.output.info("Watchlist kept");
        }
    }

    if targets.chat {
        app.output.report(app.chat.clear_all(), "chat history");
    }

    if targets.recommendations {
        app.output.report(app.store.clear_recommendations(), "recommendations");
    }

    if targets.cache {
        let ok = app.store.remove(StorageKey::HomeContent) & app.store.remove(StorageKey::SimilarShows);
        app.output.report(ok, "home and similar-title cache");
    }

    Ok(())
}
