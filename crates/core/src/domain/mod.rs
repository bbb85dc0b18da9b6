pub mod chat;
pub mod report;
pub mod ticker;
