//! # Printlapse G-code pipeline
//!
//! Parses 3D-printer G-code into a structured geometric model for timelapse
//! animation:
//!
//! 1. the line tokenizer splits each raw line into code, arguments and
//!    comment,
//! 2. the argument decoder maps axis letters to numeric values,
//! 3. the motion state machine tracks relative/absolute frames and offsets
//!    and emits [`Segment`] records,
//! 4. the classifier labels segments travel/extrude and partitions them into
//!    print layers,
//! 5. the optional subdivider splits long segments for smoother animation,
//! 6. the [`GcodeImporter`] drives a file through all of the above.
//!
//! The output is a [`PathModel`]: ordered segments plus the layer partition,
//! ready for downstream curve construction.

pub mod args;
pub mod classify;
pub mod command;
pub mod context;
pub mod line;
pub mod model;
pub mod pipeline;
pub mod state;
pub mod stats;
pub mod subdivide;

pub use args::ArgMap;
pub use classify::classify;
pub use command::CommandKind;
pub use context::ParseContext;
pub use line::{tokenize, TokenizedLine};
pub use model::{
    AxisValues, Layer, MixColor, PathModel, Segment, SegmentKind, SegmentStyle, MIX_SLOTS,
};
pub use pipeline::GcodeImporter;
pub use state::MotionState;
pub use stats::PathStats;
pub use subdivide::subdivide;
