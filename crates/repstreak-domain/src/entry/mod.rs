mod aggregate;
mod repository;


pub use aggregate::{LogEntry, MAX_NOTES_LEN};
pub use repository::{EntryRange, EntryRepository};
