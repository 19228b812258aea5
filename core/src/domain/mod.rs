pub mod catalog;
pub mod classification;
pub mod common;
pub mod ingestion;
pub mod safety;
pub mod text;
