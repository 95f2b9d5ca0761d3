//! Auth types shared across Cadastro services.
//!
//! Provides JWT settings and validation, the bearer-token
//! `AuthenticatedUser` extractor, and claim-policy authorization.

pub mod identity;
pub mod policy;
pub mod token;
