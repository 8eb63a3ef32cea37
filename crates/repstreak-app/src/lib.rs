pub mod application;
pub mod bootstrap;
pub mod state;

pub use bootstrap::build_app_state;
pub use state::AppState;
