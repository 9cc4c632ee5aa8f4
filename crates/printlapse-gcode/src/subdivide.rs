//! Segment subdivision
//!
//! Splits segments whose spatial length strictly exceeds a threshold into
//! shorter collinear pieces so downstream curve animation advances smoothly.
//!
//! Sampling convention: `samples = ceil(distance / threshold)` points laid
//! out evenly from the previous endpoint to the segment endpoint, both ends
//! inclusive. The first sample coincides with the previous endpoint and is
//! dropped as zero-length, so a split emits `samples - 1` sub-segments and
//! a positive extrusion amount is distributed as
//! `round5(e / (samples - 1))` per emitted piece.

use crate::model::{AxisValues, PathModel, Segment};

/// Round to five decimal places
fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

/// Subdivide all segments longer than `threshold`
///
/// Every segment gets its `distance` from the previous endpoint recorded;
/// segments at or under the threshold pass through unchanged. Sub-segments
/// inherit kind, color, tool, style and layer from the original.
pub fn subdivide(model: &mut PathModel, threshold: f64) {
    let mut cursor = AxisValues::default();
    let mut result: Vec<Segment> = Vec::with_capacity(model.segments.len());

    for mut seg in std::mem::take(&mut model.segments) {
        let distance = cursor.distance_to(&seg.coords);
        seg.distance = Some(distance);
        let end = seg.coords;

        if distance > threshold {
            let samples = (distance / threshold).ceil() as usize;
            let slice_e = if end.e > 0.0 {
                round5(end.e / (samples - 1) as f64)
            } else {
                0.0
            };

            for i in 0..samples {
                let t = i as f64 / (samples - 1) as f64;
                let coords = AxisValues {
                    x: cursor.x + (end.x - cursor.x) * t,
                    y: cursor.y + (end.y - cursor.y) * t,
                    z: cursor.z + (end.z - cursor.z) * t,
                    f: end.f,
                    e: slice_e,
                };

                // Drops the sample coinciding with the previous endpoint
                if coords.xyz_differs(&cursor) {
                    let mut piece = Segment::new(
                        seg.kind,
                        coords,
                        seg.color,
                        seg.tool_number,
                        seg.line_number,
                        seg.line_text.clone(),
                    );
                    piece.style = seg.style;
                    piece.layer_index = seg.layer_index;
                    result.push(piece);
                }
            }
        } else {
            result.push(seg);
        }

        cursor = end;
    }

    model.segments = result;
}
