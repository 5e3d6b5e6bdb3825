//! # pmis-entity
//!
//! Domain entity models for the PMIS document management engine. Every
//! struct in this crate is either a seeded record (documents, projects,
//! users) or a value derived from them (folder nodes and trees). All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod document;
pub mod folder;
pub mod project;
pub mod user;
