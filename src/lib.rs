//! Album-review extraction: review page markup in, normalized table rows out.

pub mod config;
pub mod db;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod rows;

pub use error::ExtractError;
pub use parser::extract;
pub use record::{PublishedAt, ReviewRecord};
pub use rows::CompiledReview;
