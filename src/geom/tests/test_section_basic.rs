use std::num::NonZeroU32;

use super::approx_eq;
use crate::geom::{FacetSpec, GeomError, GeometryFault, SectionSpec, build_section};

fn subdivisions(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("non-zero subdivisions")
}

#[test]
fn section_length_is_sides_times_subdivisions() {
    for sides in [3, 5, 12] {
        for subs in [1, 2, 4] {
            let spec = SectionSpec::new(FacetSpec::apothem(sides, 10.0), 100.0)
                .with_subdivisions(subdivisions(subs));
            let placements = build_section(&spec).expect("valid section");
            assert_eq!(placements.len(), (sides * subs) as usize);
            assert_eq!(placements.len(), spec.placement_count());
        }
    }
}

#[test]
fn dodecagon_with_three_subdivisions() {
    let spec = SectionSpec::new(FacetSpec::apothem(12, 50.0), 301.0)
        .with_labels(true)
        .with_subdivisions(subdivisions(3));

    let placements = build_section(&spec).expect("valid section");
    assert_eq!(placements.len(), 36);

    for (trio_index, trio) in placements.chunks_exact(3).enumerate() {
        let expected_rotation = trio_index as f64 * 30.0;
        let expected_label = (trio_index + 1).to_string();

        for (segment, placement) in trio.iter().enumerate() {
            assert_eq!(placement.index as usize, trio_index);
            assert_eq!(placement.segment as usize, segment);
            assert!(approx_eq(placement.rotation_degrees, expected_rotation, 1e-9));
            assert!(approx_eq(placement.width, 26.79492, 5e-6));
            assert_eq!(placement.height, 301.0);
        }

        assert_eq!(trio[0].label.as_deref(), Some(expected_label.as_str()));
        assert!(trio[1].label.is_none());
        assert!(trio[2].label.is_none());
    }
}

#[test]
fn labels_absent_when_disabled() {
    let spec = SectionSpec::new(FacetSpec::radius(8, 4.0), 10.0).with_subdivisions(subdivisions(2));
    let placements = build_section(&spec).expect("valid section");
    assert!(placements.iter().all(|p| !p.is_labeled()));
}

#[test]
fn section_values_are_copied_to_every_placement() {
    let spec = SectionSpec::new(FacetSpec::radius(5, 20.0), 1501.0)
        .with_scale_factor(5.0)
        .with_offset(300.0);
    let width = spec.facet.facet_width().expect("valid");

    let placements = build_section(&spec).expect("valid section");
    for placement in &placements {
        assert_eq!(placement.width, width);
        assert_eq!(placement.height, 1501.0);
        assert_eq!(placement.longitudinal_offset, 300.0);
        assert_eq!(placement.scale_factor, 5.0);
        assert_eq!(placement.segment, 0);
    }
}

#[test]
fn invalid_facet_spec_propagates() {
    let spec = SectionSpec::new(FacetSpec::apothem(2, 10.0), 100.0);
    assert_eq!(
        build_section(&spec),
        Err(GeomError::InvalidGeometry(GeometryFault::TooFewSides(2)))
    );

    let spec = SectionSpec::new(FacetSpec::apothem(6, 0.0), 100.0);
    assert!(build_section(&spec).is_err());
}

#[test]
fn end_offset_adds_length() {
    let spec = SectionSpec::new(FacetSpec::apothem(6, 1.0), 1501.0).with_offset(300.0);
    assert_eq!(spec.end_offset(), 1801.0);
}
