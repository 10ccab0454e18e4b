pub mod component;
pub mod registry;
