mod database;
mod repository_base;
pub mod repositories;

pub use database::Database;
pub use repository_base::{SqliteRepositoryBase, DATE_FORMAT};
