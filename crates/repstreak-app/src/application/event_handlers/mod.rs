mod personal_best_handler;

pub use personal_best_handler::{PersonalBest, PersonalBestEventHandler};
