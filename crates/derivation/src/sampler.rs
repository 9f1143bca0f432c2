//! Nearest-grid-cell resolution for station coordinates.

use nwp_common::{GridCell, GridDims, GridProjector, ProjectionParams};

/// Outcome of placing a station on the model grid.
///
/// `Outside` is a normal, expected result for stations beyond the
/// domain edge, not an error; the caller skips the station for the
/// current time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPlacement {
    Inside(GridCell),
    Outside { i: i64, j: i64 },
}

/// Resolves a station's geographic location to a discrete grid cell.
///
/// The projector returns fractional offsets relative to the domain
/// center; the sampler converts them to absolute indices centered on
/// `extent / 2` and validates the domain bounds.
pub struct GridSampler<'a, P: GridProjector + ?Sized> {
    projector: &'a P,
}

impl<'a, P: GridProjector + ?Sized> GridSampler<'a, P> {
    pub fn new(projector: &'a P) -> Self {
        Self { projector }
    }

    pub fn resolve(
        &self,
        params: &ProjectionParams,
        dims: GridDims,
        lat: f64,
        lon: f64,
    ) -> GridPlacement {
        let (x_off, y_off) = self.projector.latlon_to_offsets(params, lat, lon);

        let j = (dims.west_east / 2) as i64 + x_off.round() as i64 - 1;
        let i = (dims.south_north / 2) as i64 + y_off.round() as i64 - 1;

        if i >= 0 && (i as usize) < dims.south_north && j >= 0 && (j as usize) < dims.west_east {
            GridPlacement::Inside(GridCell {
                i: i as usize,
                j: j as usize,
            })
        } else {
            GridPlacement::Outside { i, j }
        }
    }
}
