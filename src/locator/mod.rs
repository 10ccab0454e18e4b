pub mod locator_model;
pub mod matcher;
pub mod resolvers;
