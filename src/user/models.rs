use serde::{Deserialize, Serialize};

/// Public-facing player identity attached to statistics responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

impl UserProfile {
    /// Placeholder profile for ids that appear in the game log but no longer
    /// resolve to a registered user.
    pub fn unknown(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: "Unknown".to_string(),
            profile_photo: None,
        }
    }
}
