//! Shared building blocks used by every crate in the workspace:
//! logging bootstrap and small wire types.

pub mod types;
pub mod utils;
