//! Toolpath statistics
//!
//! Summary numbers over an imported model: counts by style, path lengths,
//! and the spatial bounding box. Drives the CLI summary output.

use serde::Serialize;

use crate::model::{AxisValues, PathModel, SegmentStyle};

/// Aggregate statistics of a [`PathModel`]
#[derive(Debug, Clone, Serialize)]
pub struct PathStats {
    /// Total number of segments
    pub segment_count: usize,
    /// Segments classified as travel
    pub travel_count: usize,
    /// Segments classified as extrude
    pub extrude_count: usize,
    /// Number of detected layers
    pub layer_count: usize,
    /// Summed length of travel motion
    pub travel_length: f64,
    /// Summed length of extruding motion
    pub extrude_length: f64,
    /// Largest commanded extrusion value
    pub max_extrusion: f64,
    /// Minimum corner of the spatial bounding box
    pub bounds_min: [f64; 3],
    /// Maximum corner of the spatial bounding box
    pub bounds_max: [f64; 3],
}

impl PathStats {
    /// Compute statistics over a model
    ///
    /// Lengths are measured from the all-zero start position, matching the
    /// classifier's cursor.
    pub fn compute(model: &PathModel) -> Self {
        let mut cursor = AxisValues::default();
        let mut travel_count = 0;
        let mut extrude_count = 0;
        let mut travel_length = 0.0;
        let mut extrude_length = 0.0;
        let mut max_extrusion = 0.0f64;
        let mut bounds_min = [f64::INFINITY; 3];
        let mut bounds_max = [f64::NEG_INFINITY; 3];

        for seg in &model.segments {
            let length = cursor.distance_to(&seg.coords);
            match seg.style {
                SegmentStyle::Extrude => {
                    extrude_count += 1;
                    extrude_length += length;
                }
                _ => {
                    travel_count += 1;
                    travel_length += length;
                }
            }
            max_extrusion = max_extrusion.max(seg.coords.e);

            let point = seg.coords.point();
            for axis in 0..3 {
                bounds_min[axis] = bounds_min[axis].min(point[axis]);
                bounds_max[axis] = bounds_max[axis].max(point[axis]);
            }
            cursor = seg.coords;
        }

        if model.segments.is_empty() {
            bounds_min = [0.0; 3];
            bounds_max = [0.0; 3];
        }

        Self {
            segment_count: model.segments.len(),
            travel_count,
            extrude_count,
            layer_count: model.layers.len(),
            travel_length,
            extrude_length,
            max_extrusion,
            bounds_min,
            bounds_max,
        }
    }
}

impl std::fmt::Display for PathStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "segments: {} ({} extrude, {} travel)",
            self.segment_count, self.extrude_count, self.travel_count
        )?;
        writeln!(f, "layers:   {}", self.layer_count)?;
        writeln!(
            f,
            "length:   {:.2} extrude, {:.2} travel",
            self.extrude_length, self.travel_length
        )?;
        write!(
            f,
            "bounds:   ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
            self.bounds_min[0],
            self.bounds_min[1],
            self.bounds_min[2],
            self.bounds_max[0],
            self.bounds_max[1],
            self.bounds_max[2]
        )
    }
}
