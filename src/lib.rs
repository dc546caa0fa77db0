//! Bastion - minimal authentication gateway
//!
//! Issues bearer tokens for a single administrator identity and guards a
//! protected endpoint with them.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod server;
