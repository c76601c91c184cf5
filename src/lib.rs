pub mod config;
pub mod diary;
pub mod error;
pub mod ingest;
pub mod record;
pub mod report;
pub mod select;
pub mod stage;
pub mod summary;
