pub mod error;
pub mod events;
pub mod history;
pub mod markdown;

// Re-export common error type
pub use error::HeadspaceError;
