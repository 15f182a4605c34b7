//! Star Crush (workspace facade crate).
//!
//! Exposes `star_crush::{core,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use star_crush_core as core;
pub use star_crush_types as types;
