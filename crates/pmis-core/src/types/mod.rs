//! Core type definitions used across the PMIS workspace.

pub mod id;

pub use id::*;
