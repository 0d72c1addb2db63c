//! Onboard worker library
//!
//! Core functionality for the webhook worker that turns Okta
//! group-membership events into client and user registrations.

pub mod config;
pub mod handler;
pub mod processor;
pub mod registrar;
