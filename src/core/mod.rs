pub mod candidate;
pub mod config;
pub mod error;
pub mod matcher;
pub mod ranker;
pub mod render;
pub mod source;
