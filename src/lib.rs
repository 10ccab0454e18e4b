pub mod adapter;
pub mod cli;
pub mod codec;
pub mod dom;
pub mod engine;
pub mod identity;
pub mod locator;
pub mod record;
pub mod trace;

pub use crate::engine::engine::Engine;
pub use crate::engine::error::LocatorError;
