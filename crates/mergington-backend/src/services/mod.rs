//! Backend services for activities and their participants.
//!
//! This module provides the service trait for listing activities and managing
//! signups, an in-memory implementation of it, and the activities the server
//! starts with.

pub mod activities;
pub mod seed;

pub use activities::*;
