//! Game-specific domain types.

pub mod jungle;
