use std::num::NonZeroU32;

use crate::geom::{DistanceMode, FacetSpec, SectionSpec, TubeLayout};

#[test]
fn section_fields_default_when_omitted() {
    let section: SectionSpec = serde_json::from_str(
        r#"{
            "facet": { "sideCount": 12, "distanceFromAxis": 50.0, "distanceMode": "apothem" },
            "length": 301.0
        }"#,
    )
    .expect("minimal section");

    assert_eq!(section, SectionSpec::new(FacetSpec::apothem(12, 50.0), 301.0));
    assert_eq!(section.scale_factor, 1.0);
    assert_eq!(section.subdivisions, NonZeroU32::MIN);
    assert!(!section.show_labels);
    assert_eq!(section.longitudinal_offset, 0.0);
}

#[test]
fn zero_subdivisions_are_rejected() {
    let result: Result<SectionSpec, _> = serde_json::from_str(
        r#"{
            "facet": { "sideCount": 12, "distanceFromAxis": 50.0, "distanceMode": "radius" },
            "length": 301.0,
            "subdivisions": 0
        }"#,
    );
    assert!(result.is_err());
}

#[test]
fn layout_is_a_plain_array_of_sections() {
    let layout: TubeLayout = serde_json::from_str(
        r#"[
            {
                "facet": { "sideCount": 32, "distanceFromAxis": 50.0, "distanceMode": "apothem" },
                "length": 301.0,
                "showLabels": true,
                "subdivisions": 3
            },
            {
                "facet": { "sideCount": 16, "distanceFromAxis": 50.0, "distanceMode": "apothem" },
                "scaleFactor": 5.0,
                "length": 1501.0,
                "longitudinalOffset": 300.0
            }
        ]"#,
    )
    .expect("array layout");

    assert_eq!(layout.len(), 2);
    let near = &layout.sections()[0];
    assert!(near.show_labels);
    assert_eq!(near.subdivisions.get(), 3);
    assert_eq!(near.facet.distance_mode, DistanceMode::Apothem);
    assert_eq!(layout.sections()[1].scale_factor, 5.0);
    assert_eq!(layout.placement_count(), 32 * 3 + 16);

    let json = serde_json::to_value(&layout).expect("serializable");
    assert!(json.is_array());
}

#[test]
fn object_wrapped_layout_is_rejected() {
    let result: Result<TubeLayout, _> = serde_json::from_str(r#"{ "sections": [] }"#);
    assert!(result.is_err());
}
