use serde::{Deserialize, Serialize};

use super::Command;

/// Create a user profile and zero stats if they do not exist yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionUserCommand {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl Command for ProvisionUserCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionUserResult {
    pub user_id: String,
    pub display_name: String,
    pub created: bool,
}
