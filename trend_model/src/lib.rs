pub mod adapter;
pub mod artifacts;
pub mod classifier;
pub mod error;
pub mod logger;
pub mod scaler;
pub mod schema;
