//! Service plumbing shared by Cadastro services.
//!
//! Environment configuration, tracing setup, request-id/trace layers and the
//! JSON body extractor.

pub mod config;
pub mod extract;
pub mod middleware;
pub mod tracing;
