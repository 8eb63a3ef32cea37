// Domain layer - Pure business logic
// No dependencies on infrastructure or application layers

pub mod clock;
pub mod entry;
pub mod events;
pub mod shared;
pub mod stats;
pub mod user;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{DomainError, EntryId, UserId};
