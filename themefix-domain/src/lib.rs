//! Domain logic: the stabilization rules and the fixed order they run in.
//!
//! This crate owns *what* each rule detects and applies. The low-level
//! idempotent file mutations live in `themefix-edit`.

mod ports;
mod rules;

pub use ports::{FsRepoView, RepoView};
pub use rules::{builtin_rules, Rule};
