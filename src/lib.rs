pub mod audio;
pub mod configuration;
pub mod domain;
pub mod error;
pub mod startup;
pub mod telemetry;
pub mod youtube;

pub use error::Error;
