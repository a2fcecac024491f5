//! Embeddable core library for themefix.
//!
//! Provides a clap-free entry point suitable for linking into the batch
//! runner, the tool server, or any other host process. The [`Engine`] is a
//! stateless value constructed once per process and passed explicitly to
//! each adapter; every run reads the tree fresh from disk.
//!
//! # Entry points
//!
//! - [`Engine::audit`] — evaluate every rule's detector, read-only
//! - [`Engine::fix_all`] — run every rule's applicator in registry order

mod engine;

pub use engine::Engine;

// Re-export the domain's view types so callers don't need themefix-domain
// directly.
pub use themefix_domain::{FsRepoView, RepoView};
