pub mod chat;
pub mod home;
pub mod media;
pub mod recently_viewed;
pub mod recommendation;
pub mod watchlist;

pub use chat::{ChatMessage, ChatRole};
pub use home::{HomeContent, HomeSection};
pub use media::{MediaType, MetadataRecord, SearchResult, NOT_AVAILABLE};
pub use recently_viewed::RecentlyViewedEntry;
pub use recommendation::{RecommendationCandidate, RecommendationRecord, DEGRADED_PLOT};
pub use watchlist::{WatchlistEntry, MAX_USER_RATING};
