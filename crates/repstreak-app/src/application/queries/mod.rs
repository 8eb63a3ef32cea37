mod entry_queries;
mod stats_queries;

pub use entry_queries::{EntryQueries, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
pub use stats_queries::StatsQueries;
