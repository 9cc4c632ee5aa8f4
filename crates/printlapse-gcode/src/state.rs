//! Motion state machine
//!
//! Tracks the relative/absolute coordinate frame, accumulated origin
//! offsets, active color and tool across an import, and turns motion
//! commands into [`Segment`] records.
//!
//! Coordinate handling follows printer semantics: X/Y/Z resolve to
//! `offset + relative`, the feed rate has no offset, and E is the raw
//! commanded value (printers report cumulative filament feed, so E is
//! neither offset-adjusted nor carried forward like the spatial axes).

use std::sync::OnceLock;

use regex::Regex;

use crate::args::ArgMap;
use crate::command::CommandKind;
use crate::context::ParseContext;
use crate::model::{AxisValues, MixColor, Segment, SegmentKind, MIX_SLOTS};
use printlapse_core::error::ParseResult;

/// Accumulated origin shift per axis from G92 re-anchoring
///
/// F has no offset; the feed rate is always taken from the commanded value.
#[derive(Debug, Clone, Copy, Default)]
struct AxisOffsets {
    x: f64,
    y: f64,
    z: f64,
    e: f64,
}

/// Per-parse mutable interpreter state
///
/// Initialized at parse start, mutated by every interpreted command and
/// discarded after the parse; only the emitted segments matter.
#[derive(Debug, Default)]
pub struct MotionState {
    /// Last commanded value per axis, in the current relative-or-absolute
    /// frame before offsets
    relative: AxisValues,
    offset: AxisOffsets,
    relative_mode: bool,
    color: MixColor,
    tool_number: u32,
}

impl MotionState {
    /// Create interpreter state for a fresh parse
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether G91 relative positioning is active
    pub fn is_relative_mode(&self) -> bool {
        self.relative_mode
    }

    /// Active tool number
    pub fn tool_number(&self) -> u32 {
        self.tool_number
    }

    /// Active material color
    pub fn color(&self) -> MixColor {
        self.color
    }

    /// Interpret one tokenized command
    ///
    /// Returns the emitted segment for motion commands that actually move
    /// the spatial position; everything else returns `None`. Unrecognized
    /// codes are silent no-ops.
    pub fn apply(
        &mut self,
        ctx: &ParseContext,
        code: &str,
        raw_args: &str,
    ) -> ParseResult<Option<Segment>> {
        match CommandKind::from_code(code) {
            CommandKind::Rapid => {
                Ok(self.motion(ctx, SegmentKind::Rapid, &ArgMap::decode(ctx, raw_args)))
            }
            CommandKind::Linear => {
                Ok(self.motion(ctx, SegmentKind::Linear, &ArgMap::decode(ctx, raw_args)))
            }
            CommandKind::AbsoluteMode => {
                self.relative_mode = false;
                Ok(None)
            }
            CommandKind::RelativeMode => {
                self.relative_mode = true;
                Ok(None)
            }
            CommandKind::SetPosition => {
                self.set_position(ctx, &ArgMap::decode(ctx, raw_args));
                Ok(None)
            }
            CommandKind::SetMixWeight => {
                self.set_mix_weight(ctx, &ArgMap::decode(ctx, raw_args));
                Ok(None)
            }
            CommandKind::ToolSelect => {
                self.select_tool(ctx, code);
                Ok(None)
            }
            CommandKind::Unsupported => Ok(None),
        }
    }

    /// G0/G1: update the commanded frame and emit a segment when the
    /// absolute spatial position changes
    fn motion(&mut self, ctx: &ParseContext, kind: SegmentKind, args: &ArgMap) -> Option<Segment> {
        let mut next = self.relative;
        for (letter, value) in args.iter() {
            let slot = match letter {
                'X' => &mut next.x,
                'Y' => &mut next.y,
                'Z' => &mut next.z,
                'F' => &mut next.f,
                'E' => &mut next.e,
                _ => {
                    ctx.warn(format!("Unknown axis '{letter}'"));
                    continue;
                }
            };
            if self.relative_mode {
                *slot += value;
            } else {
                *slot = value;
            }
        }

        let absolute = AxisValues {
            x: self.offset.x + next.x,
            y: self.offset.y + next.y,
            z: self.offset.z + next.z,
            f: next.f,
            // E is the commanded value verbatim, 0 when absent
            e: args.get('E').unwrap_or(0.0),
        };

        let moved = absolute.x != self.relative.x + self.offset.x
            || absolute.y != self.relative.y + self.offset.y
            || absolute.z != self.relative.z + self.offset.z;

        let segment = moved.then(|| {
            Segment::new(
                kind,
                absolute,
                self.color,
                self.tool_number,
                ctx.line_number(),
                ctx.line(),
            )
        });

        // Commit the commanded frame whether or not a segment was emitted
        self.relative = next;
        segment
    }

    /// G92: shift offsets so the current position reads as the given values
    /// without physical motion; bare G92 resets X/Y/Z to zero
    fn set_position(&mut self, ctx: &ParseContext, args: &ArgMap) {
        let reset = [('X', 0.0), ('Y', 0.0), ('Z', 0.0)];
        let entries: Vec<(char, f64)> = if args.is_empty() {
            reset.to_vec()
        } else {
            args.iter().collect()
        };

        for (letter, value) in entries {
            let (offset, relative) = match letter {
                'X' => (&mut self.offset.x, &mut self.relative.x),
                'Y' => (&mut self.offset.y, &mut self.relative.y),
                'Z' => (&mut self.offset.z, &mut self.relative.z),
                'E' => (&mut self.offset.e, &mut self.relative.e),
                _ => {
                    ctx.warn(format!("Unknown axis '{letter}'"));
                    continue;
                }
            };
            *offset += *relative - value;
            *relative = value;
        }
    }

    /// M163: set one blend-weight slot, and pick up an RGB triplet embedded
    /// in the line comment when one is present
    fn set_mix_weight(&mut self, ctx: &ParseContext, args: &ArgMap) {
        let index = args.get('S').unwrap_or(0.0) as i64;
        let weight = args.get('P').unwrap_or(1.0);

        if index < 0 || index >= MIX_SLOTS as i64 {
            ctx.warn(format!("Extruder index '{index}' out of range"));
            return;
        }
        self.color.set_weight(index as usize, weight);

        if let Some(comment) = ctx.comment() {
            if let Some(rgb) = parse_rgb_triplet(comment) {
                self.color.set_rgb(rgb);
            }
        }
    }

    /// `T<n>`: select the active tool
    fn select_tool(&mut self, ctx: &ParseContext, code: &str) {
        match code[1..].parse::<u32>() {
            Ok(tool) => self.tool_number = tool,
            Err(_) => ctx.warn(format!("Invalid tool number in code '{code}'")),
        }
    }
}

/// Parse a bracketed comma-separated three-float list, e.g. `[0.8, 0.1, 0.1]`
/// or `(0.8, 0.1, 0.1)`
///
/// Anything else yields `None`; slicers embed material color this way and a
/// comment that is not a triplet is simply not a color.
fn parse_rgb_triplet(text: &str) -> Option<[f64; 3]> {
    static TRIPLET_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TRIPLET_REGEX.get_or_init(|| {
        Regex::new(r"^\s*[\[(]\s*([^,\s\])]+)\s*,\s*([^,\s\])]+)\s*,\s*([^,\s\])]+)\s*[\])]")
            .expect("invalid regex pattern")
    });

    let caps = regex.captures(text)?;
    let r = caps[1].parse::<f64>().ok()?;
    let g = caps[2].parse::<f64>().ok()?;
    let b = caps[3].parse::<f64>().ok()?;
    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: &mut MotionState, ctx: &mut ParseContext, line: &str) -> Option<Segment> {
        ctx.begin_line(line);
        let tokens = crate::line::tokenize(line);
        ctx.set_comment(tokens.comment);
        state
            .apply(ctx, tokens.code.expect("test line has a code"), tokens.args)
            .expect("no fatal errors in these tests")
    }

    #[test]
    fn test_absolute_motion_emits_segment() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        let seg = apply(&mut state, &mut ctx, "G1 X10 Y5 Z0.2 F1500 E0.4").unwrap();
        assert_eq!(seg.kind, SegmentKind::Linear);
        assert_eq!(seg.coords.x, 10.0);
        assert_eq!(seg.coords.y, 5.0);
        assert_eq!(seg.coords.z, 0.2);
        assert_eq!(seg.coords.f, 1500.0);
        assert_eq!(seg.coords.e, 0.4);
        assert_eq!(seg.line_number, 1);
    }

    #[test]
    fn test_omitted_axes_carry_forward() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        apply(&mut state, &mut ctx, "G1 X10 Y5 Z0.2 F1500");
        let seg = apply(&mut state, &mut ctx, "G1 X20").unwrap();
        assert_eq!(seg.coords.y, 5.0);
        assert_eq!(seg.coords.z, 0.2);
        assert_eq!(seg.coords.f, 1500.0);
    }

    #[test]
    fn test_extrusion_is_not_carried_forward() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        apply(&mut state, &mut ctx, "G1 X10 E5.0");
        let seg = apply(&mut state, &mut ctx, "G1 X20").unwrap();
        // E is the commanded value per move, not sticky state
        assert_eq!(seg.coords.e, 0.0);
    }

    #[test]
    fn test_zero_motion_is_suppressed() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        apply(&mut state, &mut ctx, "G1 X10");
        assert!(apply(&mut state, &mut ctx, "G1 X10").is_none());
        // Feed-only and extrusion-only commands are not motion
        assert!(apply(&mut state, &mut ctx, "G1 F900").is_none());
        assert!(apply(&mut state, &mut ctx, "G1 E2.5").is_none());
    }

    #[test]
    fn test_relative_mode_accumulates() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        apply(&mut state, &mut ctx, "G91");
        assert!(state.is_relative_mode());
        apply(&mut state, &mut ctx, "G1 X5");
        let seg = apply(&mut state, &mut ctx, "G1 X5 Y-2").unwrap();
        assert_eq!(seg.coords.x, 10.0);
        assert_eq!(seg.coords.y, -2.0);

        apply(&mut state, &mut ctx, "G90");
        assert!(!state.is_relative_mode());
        let seg = apply(&mut state, &mut ctx, "G1 X3").unwrap();
        assert_eq!(seg.coords.x, 3.0);
    }

    #[test]
    fn test_g92_reanchors_without_motion() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        // After G92 X5, commanding X5 is the same physical spot
        apply(&mut state, &mut ctx, "G92 X5");
        assert!(apply(&mut state, &mut ctx, "G1 X5 E1").is_none());

        // Commanding X6 moves one unit, to absolute 1
        let seg = apply(&mut state, &mut ctx, "G1 X6").unwrap();
        assert_eq!(seg.coords.x, 1.0);
    }

    #[test]
    fn test_bare_g92_resets_xyz() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        apply(&mut state, &mut ctx, "G1 X10 Y10 Z2");
        apply(&mut state, &mut ctx, "G92");
        // The same physical position now reads as the origin
        assert!(apply(&mut state, &mut ctx, "G1 X0 Y0 Z0").is_none());
        // Commanding X1 in the re-anchored frame is physical X11
        let seg = apply(&mut state, &mut ctx, "G1 X1").unwrap();
        assert_eq!(seg.coords.x, 11.0);
        assert_eq!(seg.coords.y, 10.0);
    }

    #[test]
    fn test_g92_f_axis_is_unknown() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        // F has no offset slot; the command warns and leaves state alone
        apply(&mut state, &mut ctx, "G1 F1200 X1");
        apply(&mut state, &mut ctx, "G92 F0");
        let seg = apply(&mut state, &mut ctx, "G1 X2").unwrap();
        assert_eq!(seg.coords.f, 1200.0);
    }

    #[test]
    fn test_tool_select() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        apply(&mut state, &mut ctx, "T2");
        assert_eq!(state.tool_number(), 2);

        // Invalid suffix warns without mutating
        apply(&mut state, &mut ctx, "Tx");
        assert_eq!(state.tool_number(), 2);

        let seg = apply(&mut state, &mut ctx, "G1 X1").unwrap();
        assert_eq!(seg.tool_number, 2);
    }

    #[test]
    fn test_mix_weight_and_comment_color() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        apply(&mut state, &mut ctx, "M163 S1 P0.75 ;[0.8, 0.1, 0.1]");
        assert_eq!(state.color().weight(1), Some(0.75));
        assert_eq!(state.color().rgb(), [0.8, 0.1, 0.1]);

        // Defaults: S0, P1.0
        apply(&mut state, &mut ctx, "M163");
        assert_eq!(state.color().weight(0), Some(1.0));

        // Out-of-range index leaves the color untouched
        apply(&mut state, &mut ctx, "M163 S9 P0.5 ;[0.0, 1.0, 0.0]");
        assert_eq!(state.color().rgb(), [0.8, 0.1, 0.1]);
    }

    #[test]
    fn test_segment_color_is_snapshot() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        apply(&mut state, &mut ctx, "M163 S0 P1 ;[1.0, 0.0, 0.0]");
        let first = apply(&mut state, &mut ctx, "G1 X1").unwrap();
        apply(&mut state, &mut ctx, "M163 S0 P1 ;[0.0, 0.0, 1.0]");
        let second = apply(&mut state, &mut ctx, "G1 X2").unwrap();

        assert_eq!(first.color.rgb(), [1.0, 0.0, 0.0]);
        assert_eq!(second.color.rgb(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_command_is_silent_noop() {
        let mut state = MotionState::new();
        let mut ctx = ParseContext::new();

        assert!(apply(&mut state, &mut ctx, "G28").is_none());
        assert!(apply(&mut state, &mut ctx, "M104 S210").is_none());
        let seg = apply(&mut state, &mut ctx, "G1 X1").unwrap();
        assert_eq!(seg.coords.x, 1.0);
    }

    #[test]
    fn test_rgb_triplet_parsing() {
        assert_eq!(
            parse_rgb_triplet("[0.8, 0.1, 0.1]"),
            Some([0.8, 0.1, 0.1])
        );
        assert_eq!(parse_rgb_triplet(" (1, 0, 0) trailing"), Some([1.0, 0.0, 0.0]));
        assert_eq!(parse_rgb_triplet("0.8, 0.1, 0.1"), None);
        assert_eq!(parse_rgb_triplet("[0.8, 0.1]"), None);
        assert_eq!(parse_rgb_triplet("[a, b, c]"), None);
        assert_eq!(parse_rgb_triplet("just a comment"), None);
    }
}
