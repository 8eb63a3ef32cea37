mod delete_entry_handler;
mod log_entry_handler;
mod provision_user_handler;
mod recalculate_stats_handler;

#[cfg(test)]
mod tests;

pub use delete_entry_handler::DeleteEntryCommandHandler;
pub use log_entry_handler::LogEntryCommandHandler;
pub use provision_user_handler::ProvisionUserCommandHandler;
pub use recalculate_stats_handler::RecalculateStatsCommandHandler;
