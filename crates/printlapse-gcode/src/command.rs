//! Command table
//!
//! Maps a raw command code to its handler tag. The mapping is a single
//! exhaustive match, so handler coverage is checked at compile time. Codes
//! without a handler are tolerated as no-ops: real-world G-code dialects
//! carry far more commands than the motion subset interpreted here.

/// Handler tag for a recognized command code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// G0 rapid move
    Rapid,
    /// G1 linear move
    Linear,
    /// G90 absolute positioning
    AbsoluteMode,
    /// G91 relative positioning
    RelativeMode,
    /// G92 set position (re-anchor offsets)
    SetPosition,
    /// M163 set mix-extruder weight
    SetMixWeight,
    /// `T<n>` tool select
    ToolSelect,
    /// Any other code; ignored without a warning
    Unsupported,
}

impl CommandKind {
    /// Classify a command code
    pub fn from_code(code: &str) -> Self {
        match code {
            "G0" => Self::Rapid,
            "G1" => Self::Linear,
            "G90" => Self::AbsoluteMode,
            "G91" => Self::RelativeMode,
            "G92" => Self::SetPosition,
            "M163" => Self::SetMixWeight,
            _ if code.starts_with('T') => Self::ToolSelect,
            _ => Self::Unsupported,
        }
    }
}
