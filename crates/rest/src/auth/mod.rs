//! Viewer identity: local accounts and trusted proxy headers.

pub mod identity;
pub mod local;

pub use identity::{Identity, identify};
pub use local::{LocalUser, LocalUsers};
