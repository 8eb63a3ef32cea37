mod stats_service;
mod user_locks;
mod user_provisioning;

pub use stats_service::{Recomputed, StatsService};
pub use user_locks::UserLocks;
pub use user_provisioning::{ProvisionOutcome, UserProvisioningService};
