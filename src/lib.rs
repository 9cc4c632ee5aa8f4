//! # Printlapse
//!
//! A G-code import pipeline for 3D-printer timelapse animation. A printed
//! part's G-code is parsed into an ordered list of motion segments with
//! absolute coordinates, classified into travel and extrusion moves, and
//! partitioned into layers so downstream tooling can animate the print
//! layer by layer.
//!
//! ## Architecture
//!
//! Printlapse is organized as a workspace:
//!
//! 1. **printlapse-core** - Errors and import settings
//! 2. **printlapse-gcode** - Tokenizer, motion state machine, classifier,
//!    subdivision, and the import pipeline
//! 3. **printlapse** - Command-line front end

pub use printlapse_core::{
    ConfigError, ConfigResult, Error, ImportSettings, ParseError, ParseResult, Result,
};

pub use printlapse_gcode::{
    AxisValues, GcodeImporter, Layer, MixColor, PathModel, PathStats, Segment, SegmentKind,
    SegmentStyle,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output with pretty formatting and RUST_LOG environment
/// variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
