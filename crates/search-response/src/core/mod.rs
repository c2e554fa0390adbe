pub mod envelope;
pub mod error;
pub mod outcome;
pub(crate) mod render;
pub mod types;
