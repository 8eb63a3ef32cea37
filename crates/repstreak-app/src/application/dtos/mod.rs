mod entry_dto;
mod stats_dto;

pub use entry_dto::*;
pub use stats_dto::*;
