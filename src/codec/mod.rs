pub mod command;
pub mod delimited;
pub mod descriptor;
