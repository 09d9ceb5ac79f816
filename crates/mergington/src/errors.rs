//! Shared error types and utilities for the mergington project.
pub use color_eyre::Report;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to install color_eyre")]
    ColorEyre(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a signup or unregister request is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    NotFound(String),
    #[error("Student is already signed up")]
    DuplicateRegistration { activity: String, email: String },
    #[error("Student is not signed up for this activity")]
    NotRegistered { activity: String, email: String },
    #[error("Activity is full")]
    Full { activity: String, max_participants: u32 },
}
