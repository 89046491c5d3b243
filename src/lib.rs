pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod scoring;

pub use engine::SitingEngine;
pub use error::SitingError;
