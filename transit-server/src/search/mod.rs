//! Trip search: matching, ranking and pagination.

mod config;
mod rank;
#[allow(clippy::module_inception)]
mod search;

pub use config::SearchConfig;
pub use rank::{PagedSegments, SortMode, paginate, rank};
pub use search::{SearchError, SearchPage, SearchRequest, SearchService};
