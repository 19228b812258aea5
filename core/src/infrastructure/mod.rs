pub mod catalog;
pub mod classifier;
pub mod db;
pub mod safety;
pub mod sources;
