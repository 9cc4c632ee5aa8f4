//! # Printlapse Core
//!
//! Shared foundation for the Printlapse workspace: the error taxonomy used
//! across the pipeline and the user-facing import settings.

pub mod error;
pub mod settings;

pub use error::{ConfigError, ConfigResult, Error, ParseError, ParseResult, Result};
pub use settings::{ImportSettings, MAX_SEGMENT_SIZE, MIN_SEGMENT_SIZE};
