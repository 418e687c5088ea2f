//! AWS-oriented adapters and handlers for the order-status agent action.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! Redshift Data API adapter, configuration and logging) and drives the
//! submit/poll/fetch lookup protocol. Domain contracts live in
//! `order_status_core`.

pub mod adapters;
pub mod config;
pub mod executor;
pub mod handlers;
pub mod logging;
