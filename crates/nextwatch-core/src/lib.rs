pub mod catalog;
pub mod chat;
pub mod explain;
pub mod extraction;
pub mod home;
pub mod queue;
pub mod recommendations;
pub mod similar;
pub mod store;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::ChatSession;
pub use explain::{explain_plot, plot_prompt};
pub use extraction::extract_candidates;
pub use home::HomeFeed;
pub use queue::RequestQueue;
pub use recommendations::{build_prompt, select_sources, RecommendationPipeline};
pub use similar::SimilarTitles;
pub use store::{ActiveView, FileBackend, MemoryBackend, StorageBackend, StorageKey, Store};
pub use watchlist::{AddOutcome, WatchlistFilter, WatchlistService, group_by_year};
