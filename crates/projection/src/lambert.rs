//! Lambert Conformal Conic projection.
//!
//! WRF regional domains are commonly defined on this projection. It
//! maps a cone tangent or secant to the Earth's surface onto a flat
//! plane. The projection parameters come straight from the WRF file
//! attributes:
//! - True latitudes: TRUELAT1 and TRUELAT2 (equal for a tangent cone)
//! - Standard longitude: STAND_LON (the central meridian)
//! - Reference lat/lon: CEN_LAT, CEN_LON (the domain center)
//! - Grid spacing: DX, DY in meters

use std::f64::consts::PI;

use nwp_common::{GridProjector, ProjectionParams};

/// Mean Earth radius used by the WRF preprocessing system (meters).
const EARTH_RADIUS: f64 = 6370000.0;

/// Stateless lat/lon to grid-offset projector.
///
/// Offsets are expressed in grid-cell units relative to the domain
/// center, so a station exactly at (CEN_LAT, CEN_LON) projects to
/// (0, 0).
#[derive(Debug, Clone, Copy, Default)]
pub struct LambertProjector;

impl LambertProjector {
    pub fn new() -> Self {
        Self
    }

    /// Project a geographic point to plane coordinates (meters) in the
    /// cone system defined by `params`.
    fn project(params: &ProjectionParams, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let to_rad = PI / 180.0;
        let lat = lat_deg * to_rad;
        let lon = lon_deg * to_rad;
        let latin1 = params.truelat1 * to_rad;
        let latin2 = params.truelat2 * to_rad;
        let lon0 = params.stand_lon * to_rad;
        let lat_ref = params.ref_lat * to_rad;

        // Cone constant n
        let n = if (latin1 - latin2).abs() < 1e-10 {
            // Tangent cone (single true latitude)
            latin1.sin()
        } else {
            // Secant cone (two true latitudes)
            let ln_ratio = (latin1.cos() / latin2.cos()).ln();
            let tan_ratio =
                ((PI / 4.0 + latin2 / 2.0).tan() / (PI / 4.0 + latin1 / 2.0).tan()).ln();
            ln_ratio / tan_ratio
        };

        let f = (latin1.cos() * (PI / 4.0 + latin1 / 2.0).tan().powf(n)) / n;

        // Radial distance at the target and reference latitudes
        let rho = EARTH_RADIUS * f / (PI / 4.0 + lat / 2.0).tan().powf(n);
        let rho0 = EARTH_RADIUS * f / (PI / 4.0 + lat_ref / 2.0).tan().powf(n);

        // Normalize longitude difference to [-pi, pi]
        let mut dlon = lon - lon0;
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }

        let theta = n * dlon;
        let x = rho * theta.sin();
        let y = rho0 - rho * theta.cos();

        (x, y)
    }
}

impl GridProjector for LambertProjector {
    fn latlon_to_offsets(&self, params: &ProjectionParams, lat: f64, lon: f64) -> (f64, f64) {
        let (x, y) = Self::project(params, lat, lon);
        let (xc, yc) = Self::project(params, params.ref_lat, params.ref_lon);

        ((x - xc) / params.dx, (y - yc) / params.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sofia_domain() -> ProjectionParams {
        // A 9 km tangent-cone domain centered over Bulgaria
        ProjectionParams {
            truelat1: 42.0,
            truelat2: 42.0,
            stand_lon: 25.0,
            ref_lat: 42.7,
            ref_lon: 25.3,
            dx: 9000.0,
            dy: 9000.0,
        }
    }

    #[test]
    fn test_domain_center_is_origin() {
        let params = sofia_domain();
        let proj = LambertProjector::new();
        let (x, y) = proj.latlon_to_offsets(&params, params.ref_lat, params.ref_lon);
        assert!(x.abs() < 1e-9, "x offset at center should be 0, got {}", x);
        assert!(y.abs() < 1e-9, "y offset at center should be 0, got {}", y);
    }

    #[test]
    fn test_north_of_center_increases_y() {
        let params = sofia_domain();
        let proj = LambertProjector::new();

        // 0.1 degrees of latitude is ~11.1 km, just over one grid cell
        let (x, y) = proj.latlon_to_offsets(&params, params.ref_lat + 0.1, params.ref_lon);
        assert!(x.abs() < 0.1, "x should stay near 0, got {}", x);
        assert!(
            (y - 1.24).abs() < 0.1,
            "y should be ~1.24 cells north, got {}",
            y
        );
    }

    #[test]
    fn test_east_of_center_increases_x() {
        let params = sofia_domain();
        let proj = LambertProjector::new();

        // 0.1 degrees of longitude at 42.7N is ~8.2 km
        let (x, y) = proj.latlon_to_offsets(&params, params.ref_lat, params.ref_lon + 0.1);
        assert!(
            (x - 0.91).abs() < 0.1,
            "x should be ~0.91 cells east, got {}",
            x
        );
        assert!(y.abs() < 0.1, "y should stay near 0, got {}", y);
    }

    #[test]
    fn test_secant_cone_matches_tangent_at_shared_parallel() {
        let tangent = sofia_domain();
        let mut secant = sofia_domain();
        secant.truelat1 = 41.999999999;
        secant.truelat2 = 42.000000001;

        let proj = LambertProjector::new();
        let (xt, yt) = proj.latlon_to_offsets(&tangent, 43.5, 26.0);
        let (xs, ys) = proj.latlon_to_offsets(&secant, 43.5, 26.0);

        assert!((xt - xs).abs() < 1e-3, "x diverged: {} vs {}", xt, xs);
        assert!((yt - ys).abs() < 1e-3, "y diverged: {} vs {}", yt, ys);
    }
}
