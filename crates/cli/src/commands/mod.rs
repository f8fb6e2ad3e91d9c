pub mod chat;
pub mod fixtures;
pub mod generate;
pub mod tools;
