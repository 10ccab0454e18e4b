pub mod recorder;
pub mod tree;
