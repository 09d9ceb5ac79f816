//! The shared library for Mergington, the extracurricular activities service.
//!
//! This library holds the wire types exchanged with the backend, the domain
//! error taxonomy, and the logging setup used by the server binary.

pub mod data;
pub mod errors;
pub mod log;

pub use serde;
pub use serde_json;
pub use tracing;
