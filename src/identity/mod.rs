pub mod deriver;
pub mod monkey_id;
pub mod ordinal;
