//! Deterministic stubs for the grid-projection boundary.

use nwp_common::{GridProjector, ProjectionParams};

/// Returns the same offsets for every input point.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetProjector {
    x: f64,
    y: f64,
}

impl FixedOffsetProjector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl GridProjector for FixedOffsetProjector {
    fn latlon_to_offsets(&self, _params: &ProjectionParams, _lat: f64, _lon: f64) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Maps degrees of separation from the domain center linearly to grid
/// cells: `scale` cells per degree. Lets one projector place some
/// stations inside and others outside the domain.
#[derive(Debug, Clone, Copy)]
pub struct LinearStubProjector {
    scale: f64,
}

impl LinearStubProjector {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl GridProjector for LinearStubProjector {
    fn latlon_to_offsets(&self, params: &ProjectionParams, lat: f64, lon: f64) -> (f64, f64) {
        (
            (lon - params.ref_lon) * self.scale,
            (lat - params.ref_lat) * self.scale,
        )
    }
}
