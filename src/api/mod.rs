//! Archive host API module.
//!
//! This module provides:
//! - Authenticated HTTP session handling
//! - Login against the host

pub mod auth;
pub mod client;

pub use auth::{login, Credentials};
pub use client::Session;
