//! Role hierarchy and permission catalog for the CRM admin console.
//!
//! The [`authz`] functions are the library surface; [`app`] wraps them in a
//! read-only HTTP API.

pub mod app;
pub mod authz;
pub mod catalog;
pub mod config;
pub mod docs;
pub mod errors;
pub mod models;
pub mod routes;

pub use app::create_app;
pub use models::permission::Permission;
pub use models::role::Role;
