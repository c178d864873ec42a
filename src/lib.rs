pub mod collector;
pub mod enricher;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod ratings;
pub mod scorer;
pub mod size;
pub mod store;
