//! Configuration loading and management for the Booking Engine.
//!
//! This module loads engine-wide pricing defaults and the per-business
//! catalog (cancellation tiers, opening-hour prices, tax overrides) from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use booking_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded engine config: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BusinessConfig, EngineConfig, EngineFile, EngineMetadata, PricingDefaults};
