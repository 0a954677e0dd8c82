use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::models::UserProfile;
use crate::shared::AppError;

/// Lookup of registered player profiles.
///
/// The statistics engine works on raw player ids; profiles are resolved only
/// when shaping API responses.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn register_user(&self, profile: UserProfile) -> Result<(), AppError>;

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn register_user(&self, profile: UserProfile) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(&profile.id) {
            return Err(AppError::DatabaseError(format!(
                "User {} already exists",
                profile.id
            )));
        }

        info!(user_id = %profile.id, name = %profile.name, "Registered user");
        users.insert(profile.id.clone(), profile);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        let users = self.users.read().await;
        let profile = users.get(user_id).cloned();

        debug!(user_id = %user_id, found = profile.is_some(), "User lookup");
        Ok(profile)
    }
}
