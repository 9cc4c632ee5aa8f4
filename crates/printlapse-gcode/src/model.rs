//! Toolpath data model
//!
//! The output of the pipeline: interpreted motion segments with resolved
//! absolute coordinates, and the layer partition derived from them. Layers
//! hold index ranges into the segment vector rather than owning segments.

use serde::{Deserialize, Serialize};

/// Number of per-extruder blend-weight slots in a mix color
pub const MIX_SLOTS: usize = 5;

/// Absolute values for all five tracked axes at the end of a motion
///
/// Every segment carries all five axes; axes absent from a command carry
/// forward from the parser state, never partially.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValues {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Z position
    pub z: f64,
    /// Feed rate
    pub f: f64,
    /// Cumulative filament feed as reported by the command, not
    /// offset-adjusted like X/Y/Z
    pub e: f64,
}

impl AxisValues {
    /// 3D Euclidean distance between this endpoint and another
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Whether the spatial (X, Y, Z) position differs from another
    pub fn xyz_differs(&self, other: &Self) -> bool {
        self.x != other.x || self.y != other.y || self.z != other.z
    }

    /// The spatial position as a point
    pub fn point(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Source motion command of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// G0 rapid positioning
    Rapid,
    /// G1 linear interpolation
    Linear,
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rapid => write!(f, "G0"),
            Self::Linear => write!(f, "G1"),
        }
    }
}

/// Classification of a segment as material-depositing or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentStyle {
    /// Not yet classified
    #[default]
    Unclassified,
    /// Motion without extrusion
    Travel,
    /// Material-depositing motion
    Extrude,
}

impl std::fmt::Display for SegmentStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unclassified => write!(f, "unclassified"),
            Self::Travel => write!(f, "travel"),
            Self::Extrude => write!(f, "extrude"),
        }
    }
}

/// Material color of a mixing hotend
///
/// Eight channels: slots 0-2 are RGB, slots 3-7 are blend weights for up to
/// [`MIX_SLOTS`] extruders.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MixColor([f64; 8]);

impl MixColor {
    /// All eight channels
    pub fn channels(&self) -> &[f64; 8] {
        &self.0
    }

    /// The RGB channels
    pub fn rgb(&self) -> [f64; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Overwrite the RGB channels
    pub fn set_rgb(&mut self, rgb: [f64; 3]) {
        self.0[0] = rgb[0];
        self.0[1] = rgb[1];
        self.0[2] = rgb[2];
    }

    /// Blend weight of the given extruder slot
    pub fn weight(&self, index: usize) -> Option<f64> {
        if index < MIX_SLOTS {
            Some(self.0[index + 3])
        } else {
            None
        }
    }

    /// Set the blend weight of the given extruder slot
    ///
    /// Returns `false` without mutating when the index is out of range.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> bool {
        if index < MIX_SLOTS {
            self.0[index + 3] = weight;
            true
        } else {
            false
        }
    }
}

/// One interpreted motion with resolved absolute coordinates
///
/// Immutable after creation except for the classification fields (`style`,
/// `layer_index`) and the `distance` assigned during subdivision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Source motion command
    pub kind: SegmentKind,
    /// Absolute axis values at the end of this motion
    pub coords: AxisValues,
    /// Material color at creation time
    pub color: MixColor,
    /// Active tool at creation time
    pub tool_number: u32,
    /// 1-based source line number, for diagnostics
    pub line_number: u32,
    /// Source line text, for diagnostics
    pub line_text: String,
    /// Travel/extrude classification, assigned after all segments exist
    pub style: SegmentStyle,
    /// Layer the segment belongs to, assigned during classification
    pub layer_index: usize,
    /// Euclidean distance from the previous segment's endpoint, assigned
    /// during subdivision
    pub distance: Option<f64>,
}

impl Segment {
    /// Create a new unclassified segment
    pub fn new(
        kind: SegmentKind,
        coords: AxisValues,
        color: MixColor,
        tool_number: u32,
        line_number: u32,
        line_text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            coords,
            color,
            tool_number,
            line_number,
            line_text: line_text.into(),
            style: SegmentStyle::Unclassified,
            layer_index: 0,
            distance: None,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.3}, {:.3}, {:.3}) {} layer={} line={}",
            self.kind,
            self.coords.x,
            self.coords.y,
            self.coords.z,
            self.style,
            self.layer_index,
            self.line_number
        )
    }
}

/// A contiguous run of segments at a shared print height
///
/// Purely indexical: `start..end` is a half-open range into the model's
/// segment vector. Ranges are non-overlapping and, after classification,
/// cover the full segment list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// 0-based layer index
    pub index: usize,
    /// Z height tracked for this layer
    pub z: f64,
    /// First segment of the layer
    pub start: usize,
    /// One past the last segment of the layer
    pub end: usize,
}

impl Layer {
    /// Number of segments in this layer
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the layer holds no segments
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// The interpreted toolpath: ordered segments plus the layer partition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathModel {
    /// All motion segments in source order
    pub segments: Vec<Segment>,
    /// Layer partition over `segments`
    pub layers: Vec<Layer>,
}

impl PathModel {
    /// Segments belonging to a layer
    pub fn layer_segments(&self, layer: &Layer) -> &[Segment] {
        &self.segments[layer.start..layer.end]
    }

    /// The continuous 3D polyline through every segment endpoint
    ///
    /// This is the path handed to downstream curve construction for
    /// timelapse animation.
    pub fn path_points(&self) -> Vec<[f64; 3]> {
        self.segments.iter().map(|s| s.coords.point()).collect()
    }

    /// The 3D polyline through one layer's segment endpoints
    pub fn layer_points(&self, layer: &Layer) -> Vec<[f64; 3]> {
        self.layer_segments(layer)
            .iter()
            .map(|s| s.coords.point())
            .collect()
    }
}
