pub mod game_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use game_builders::{round, GameBuilder};
#[allow(unused_imports)]
pub use setup::TestSetup;
