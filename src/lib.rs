//! WordGrid (workspace facade crate).
//!
//! This package keeps a single `wordgrid::{core,engine,adapter,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.

pub use wordgrid_adapter as adapter;
pub use wordgrid_core as core;
pub use wordgrid_engine as engine;
pub use wordgrid_types as types;
