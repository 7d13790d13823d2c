//! Cookie Crunch (workspace facade crate).
//!
//! Exposes `cookie_crunch::{core,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use cookie_crunch_core as core;
pub use cookie_crunch_types as types;
