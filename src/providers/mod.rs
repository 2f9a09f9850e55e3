//! Upstream data-source providers.
//!
//! Three independent components with no shared abstraction: they have
//! no common operation set, so each is a concrete struct wired into
//! the service container.

pub mod github;
pub mod openapi;
pub mod stackoverflow;

pub use github::GithubProvider;
pub use openapi::SchemaProvider;
pub use stackoverflow::StackSearchProvider;
