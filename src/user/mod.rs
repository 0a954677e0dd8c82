// Public API
pub use models::UserProfile;
pub use repository::{InMemoryUserRepository, UserRepository};

// Internal modules
mod models;
mod repository;
