mod core;
mod diagnostics;
mod facet;
mod section;
mod tube;

pub use self::core::Tolerance;
pub use diagnostics::{
    LayoutDiagnostics, SectionSeam, inspect_layout, inspect_layout_with_tolerance,
};
pub use facet::{
    DistanceMode, FacetSpec, GeomError, GeometryFault, MIN_SIDE_COUNT, compute_facet_width,
    facet_rotation, facet_rotations,
};
pub use section::{FacetPlacement, SectionSpec, build_section};
#[cfg(feature = "parallel")]
pub use tube::assemble_tube_parallel;
pub use tube::{TubeLayout, assemble_tube};

#[cfg(test)]
mod tests;
