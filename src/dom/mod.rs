pub mod dom_model;
pub mod html;
pub mod loader;
pub mod snapshot;
