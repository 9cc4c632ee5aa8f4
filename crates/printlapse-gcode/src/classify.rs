//! Segment classification and layer partitioning
//!
//! A single forward pass labels every segment as travel or extrude and
//! partitions the sequence into print layers. A layer boundary is a Z change
//! immediately followed by resumed extrusion; a Z-hop during travel does not
//! open a new layer.

use crate::model::{AxisValues, Layer, PathModel, SegmentStyle};

/// Classify all segments and rebuild the layer partition
///
/// Runs over the final segment list (after any subdivision). Safe to re-run:
/// styles and layer indices come out identical.
pub fn classify(model: &mut PathModel) {
    let mut cursor = AxisValues::default();
    let mut layer_z = 0.0;
    let mut layer_index = 0usize;
    let mut layer_start = 0usize;

    model.layers.clear();
    let count = model.segments.len();

    for i in 0..count {
        let style = {
            let seg = &model.segments[i];
            if seg.coords.xyz_differs(&cursor) && seg.coords.e > 0.0 {
                SegmentStyle::Extrude
            } else {
                SegmentStyle::Travel
            }
        };

        // A boundary needs the successor: Z moved away from the tracked
        // layer height and extrusion resumes right after.
        if i + 1 < count {
            let seg_z = model.segments[i].coords.z;
            let next_e = model.segments[i + 1].coords.e;
            if seg_z != layer_z && next_e > 0.0 {
                model.layers.push(Layer {
                    index: layer_index,
                    z: layer_z,
                    start: layer_start,
                    end: i,
                });
                layer_z = seg_z;
                layer_index += 1;
                layer_start = i;
            }
        }

        let seg = &mut model.segments[i];
        seg.style = style;
        seg.layer_index = layer_index;
        cursor = seg.coords;
    }

    // The in-progress layer is closed whether or not it ended cleanly
    if count > 0 {
        model.layers.push(Layer {
            index: layer_index,
            z: layer_z,
            start: layer_start,
            end: count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MixColor, Segment, SegmentKind};

    fn seg(x: f64, y: f64, z: f64, e: f64) -> Segment {
        Segment::new(
            SegmentKind::Linear,
            AxisValues {
                x,
                y,
                z,
                f: 0.0,
                e,
            },
            MixColor::default(),
            0,
            1,
            "",
        )
    }

    fn model_of(segments: Vec<Segment>) -> PathModel {
        PathModel {
            segments,
            layers: Vec::new(),
        }
    }

    #[test]
    fn test_extrude_versus_travel() {
        let mut model = model_of(vec![
            seg(10.0, 0.0, 0.0, 1.0),
            seg(20.0, 0.0, 0.0, 0.0),
            seg(20.0, 0.0, 0.0, 1.0),
        ]);
        classify(&mut model);

        assert_eq!(model.segments[0].style, SegmentStyle::Extrude);
        // No extrusion: travel
        assert_eq!(model.segments[1].style, SegmentStyle::Travel);
        // Extrusion without motion: travel
        assert_eq!(model.segments[2].style, SegmentStyle::Travel);
    }

    #[test]
    fn test_single_layer() {
        let mut model = model_of(vec![seg(10.0, 0.0, 0.0, 1.0), seg(20.0, 0.0, 0.0, 1.0)]);
        classify(&mut model);

        assert_eq!(model.layers.len(), 1);
        assert_eq!(model.layers[0].start, 0);
        assert_eq!(model.layers[0].end, 2);
        assert_eq!(model.segments[0].layer_index, 0);
        assert_eq!(model.segments[1].layer_index, 0);
    }

    #[test]
    fn test_z_change_with_resumed_extrusion_breaks_layer() {
        let mut model = model_of(vec![
            seg(10.0, 0.0, 0.2, 1.0),
            seg(20.0, 0.0, 0.2, 1.0),
            seg(20.0, 0.0, 0.4, 0.0),
            seg(30.0, 0.0, 0.4, 1.0),
        ]);
        classify(&mut model);

        // First boundary fires at segment 0 (Z 0->0.2 with extrusion after),
        // closing an empty leading layer; second at the Z 0.2->0.4 lift.
        assert_eq!(model.layers.len(), 3);
        assert!(model.layers[0].is_empty());
        assert_eq!(model.layers[1].start, 0);
        assert_eq!(model.layers[1].end, 2);
        assert_eq!(model.layers[2].start, 2);
        assert_eq!(model.layers[2].end, 4);
        assert_eq!(model.segments[2].layer_index, 2);
        assert_eq!(model.segments[3].layer_index, 2);
    }

    #[test]
    fn test_z_hop_during_travel_is_not_a_boundary() {
        let mut model = model_of(vec![
            seg(10.0, 0.0, 0.2, 1.0),
            // lift, travel, drop back, all without extrusion resuming
            seg(10.0, 0.0, 0.6, 0.0),
            seg(30.0, 0.0, 0.6, 0.0),
            seg(30.0, 0.0, 0.2, 0.0),
            seg(40.0, 0.0, 0.2, 1.0),
        ]);
        classify(&mut model);

        // The lift itself never fires a boundary because nothing extrudes
        // right after it; only the drop back to 0.2 (followed by resumed
        // extrusion) does.
        assert_eq!(model.layers.len(), 2);
        let last = model.layers[model.layers.len() - 1];
        assert_eq!(last.end, 5);
        assert_eq!(model.segments[4].layer_index, 1);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let mut model = model_of(vec![
            seg(10.0, 0.0, 0.2, 1.0),
            seg(20.0, 0.0, 0.2, 0.0),
            seg(20.0, 0.0, 0.4, 0.0),
            seg(30.0, 0.0, 0.4, 1.0),
        ]);
        classify(&mut model);
        let first_styles: Vec<_> = model.segments.iter().map(|s| s.style).collect();
        let first_layers = model.layers.clone();
        let first_indices: Vec<_> = model.segments.iter().map(|s| s.layer_index).collect();

        classify(&mut model);
        let second_styles: Vec<_> = model.segments.iter().map(|s| s.style).collect();
        let second_indices: Vec<_> = model.segments.iter().map(|s| s.layer_index).collect();

        assert_eq!(first_styles, second_styles);
        assert_eq!(first_indices, second_indices);
        assert_eq!(first_layers, model.layers);
    }

    #[test]
    fn test_empty_model() {
        let mut model = model_of(Vec::new());
        classify(&mut model);
        assert!(model.layers.is_empty());
    }

    #[test]
    fn test_layers_cover_all_segments() {
        let mut model = model_of(vec![
            seg(10.0, 0.0, 0.2, 1.0),
            seg(20.0, 0.0, 0.2, 1.0),
            seg(20.0, 0.0, 0.4, 0.0),
            seg(30.0, 0.0, 0.4, 1.0),
            seg(30.0, 0.0, 0.6, 0.0),
        ]);
        classify(&mut model);

        let mut expected_start = 0;
        for layer in &model.layers {
            assert_eq!(layer.start, expected_start);
            expected_start = layer.end;
        }
        assert_eq!(expected_start, model.segments.len());
    }
}
