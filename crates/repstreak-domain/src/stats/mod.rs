mod engine;
mod repository;
mod snapshot;


pub use engine::{current_streak, daily_totals, StatsEngine, StreakAnchor};
pub use repository::StatsRepository;
pub use snapshot::{StatsSnapshot, UserStats};
