use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use nextwatch_models::{
    MetadataRecord, RecentlyViewedEntry, RecommendationRecord, SearchResult, WatchlistEntry, MAX_USER_RATING,
    NOT_AVAILABLE,
};

const PLOT_WIDTH: usize = 60;

/// Table colours follow the stored dark-mode preference
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    accent: Color,
    muted: Color,
}

impl Theme {
    pub fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                accent: Color::Cyan,
                muted: Color::DarkGrey,
            }
        } else {
            Self {
                accent: Color::Blue,
                muted: Color::Grey,
            }
        }
    }

    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(self.accent).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
        table
    }
}

pub fn stars(rating: Option<u8>) -> String {
    match rating.filter(|r| *r > 0) {
        Some(r) => {
            let filled = usize::from(r.min(MAX_USER_RATING));
            format!("{}{}", "★".repeat(filled), "☆".repeat(usize::from(MAX_USER_RATING) - filled))
        }
        None => "unrated".to_string(),
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

pub fn search_results(results: &[SearchResult], in_watchlist: impl Fn(&str) -> bool, theme: Theme) -> Table {
    let mut table = theme.table(&["ID", "Title", "Year", "Type", "Watchlist"]);
    for result in results {
        let marker = if in_watchlist(&result.external_id) { "✓" } else { "" };
        table.add_row(vec![
            Cell::new(&result.external_id).fg(theme.muted),
            Cell::new(&result.title),
            Cell::new(&result.year),
            Cell::new(result.media_type.label()),
            Cell::new(marker).fg(Color::Green),
        ]);
    }
    table
}

pub fn details(record: &MetadataRecord, entry: Option<&WatchlistEntry>, theme: Theme) -> Table {
    let mut table = theme.table(&[record.title.as_str(), record.year.as_str()]);
    let rows = [
        ("ID", record.external_id.as_str()),
        ("Type", record.media_type.label()),
        ("Genre", or_na(record.genre.as_deref())),
        ("Director", or_na(record.director.as_deref())),
        ("Cast", or_na(record.cast.as_deref())),
        ("Runtime", or_na(record.runtime.as_deref())),
        ("Rating", or_na(record.external_rating.as_deref())),
        ("Poster", record.poster_url().unwrap_or(NOT_AVAILABLE)),
        ("Plot", or_na(record.plot.as_deref())),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).fg(theme.muted), Cell::new(value)]);
    }

    let watchlist_status = match entry {
        Some(e) => format!("in watchlist, {}", stars(e.user_rating)),
        None => "not in watchlist".to_string(),
    };
    table.add_row(vec![Cell::new("Watchlist").fg(theme.muted), Cell::new(watchlist_status)]);
    table
}

pub fn watchlist(entries: &[WatchlistEntry], theme: Theme) -> Table {
    let mut table = theme.table(&["ID", "Title", "Type", "Your rating", "Added"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.external_id).fg(theme.muted),
            Cell::new(&entry.title),
            Cell::new(entry.media_type.label()),
            Cell::new(stars(entry.user_rating)).fg(Color::Yellow),
            Cell::new(entry.added_at.format("%Y-%m-%d").to_string()),
        ]);
    }
    table
}

/// Degraded records stay in the list with placeholders
pub fn recommendations(records: &[RecommendationRecord], theme: Theme) -> Table {
    let mut table = theme.table(&["#", "ID", "Title", "Year", "Genre", "Plot"]);
    for (index, record) in records.iter().enumerate() {
        let id = match &record.external_id {
            Some(id) => Cell::new(id).fg(theme.muted),
            None => Cell::new("details unavailable").fg(Color::DarkYellow),
        };
        table.add_row(vec![
            Cell::new(index + 1),
            id,
            Cell::new(&record.title),
            Cell::new(&record.year),
            Cell::new(or_na(record.genre.as_deref())),
            Cell::new(truncate(&record.plot, PLOT_WIDTH)),
        ]);
    }
    table
}

pub fn titles(records: &[MetadataRecord], theme: Theme) -> Table {
    let mut table = theme.table(&["ID", "Title", "Year", "Rating", "Genre"]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.external_id).fg(theme.muted),
            Cell::new(&record.title),
            Cell::new(&record.year),
            Cell::new(or_na(record.external_rating.as_deref())),
            Cell::new(or_na(record.genre.as_deref())),
        ]);
    }
    table
}

pub fn recently_viewed(entries: &[RecentlyViewedEntry], theme: Theme) -> Table {
    let mut table = theme.table(&["ID", "Title", "Year", "Type", "Viewed"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.external_id).fg(theme.muted),
            Cell::new(&entry.title),
            Cell::new(&entry.year),
            Cell::new(entry.media_type.label()),
            Cell::new(entry.viewed_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }
    table
}
