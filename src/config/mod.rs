//! Configuration loading and validation
//!
//! Configuration comes from a TOML file with kebab-case keys; every knob has
//! a default, so the crawler also runs with no file at all.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{CacheConfig, Config, CrawlerConfig, FetchConfig, RenderConfig};
pub use validation::{validate, validate_seed_url};
