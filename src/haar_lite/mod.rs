pub mod types;
pub mod error;
pub mod config;
pub mod rect;
pub mod features;
pub mod scan;
pub mod utils;
pub mod corpus;
pub mod boost;
pub mod select;
pub mod classify;
pub mod render;
pub mod train;
