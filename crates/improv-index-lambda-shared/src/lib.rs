//! Shared infrastructure for Improv Index AWS Lambda functions.
//!
//! This crate provides the common plumbing used by the API handlers:
//!
//! - [`InboundEvent`] / [`Endpoint`]: normalization of raw API Gateway proxy
//!   events into a uniform method/path/parameters shape
//! - [`Envelope`]: the uniform response structure with CORS headers and a
//!   JSON body, with `success` / `failed` / `error` constructors
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides event fixtures for handler testing.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod event;
mod response;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use event::{Endpoint, InboundEvent};
pub use response::{Envelope, SERIALIZATION_FAILURE_BODY};
pub use tracing_init::init_tracing;
