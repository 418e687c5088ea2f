//! Shared order-status lookup domain primitives.
//!
//! This crate owns the agent invocation/response contract, parameter
//! extraction, the lookup statement and the rendering of lookup outcomes.
//! It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod outcome;
pub mod parameters;
pub mod statement;
