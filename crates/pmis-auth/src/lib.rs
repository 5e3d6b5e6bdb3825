//! # pmis-auth
//!
//! Role-based access for the PMIS dashboard.
//!
//! ## Modules
//!
//! - `rbac`: role → capability policies and enforcement
//! - `session`: user directory lookup and login sessions
//!
//! There is no credential verification. A login resolves a username to a
//! seeded user and freezes that user's capability set for the session.

pub mod rbac;
pub mod session;

pub use rbac::{Capability, RbacEnforcer, RbacPolicies};
pub use session::{Session, SessionManager, UserDirectory};
