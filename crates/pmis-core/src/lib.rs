//! # pmis-core
//!
//! Core crate for the PMIS document management engine. Contains the
//! repository and lookup traits, configuration schemas, typed identifiers,
//! document events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PMIS crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
