//! Bounds-checked gridded field containers.
//!
//! WRF arrays are laid out `[south_north][west_east]` for surface
//! fields and `[level][south_north][west_east]` for leveled fields.
//! Out-of-range access surfaces as an `NwpError` so a bad station
//! placement skips that station instead of panicking.

use nwp_common::{GridCell, NwpError, NwpResult};

/// A 2-D surface field for one time step.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceField {
    name: String,
    data: Vec<f64>,
    south_north: usize,
    west_east: usize,
}

impl SurfaceField {
    pub fn new(
        name: impl Into<String>,
        data: Vec<f64>,
        south_north: usize,
        west_east: usize,
    ) -> NwpResult<Self> {
        let name = name.into();
        if data.len() != south_north * west_east {
            return Err(NwpError::InvalidSnapshot(format!(
                "{}: expected {}x{} = {} values, got {}",
                name,
                south_north,
                west_east,
                south_north * west_east,
                data.len()
            )));
        }
        Ok(Self {
            name,
            data,
            south_north,
            west_east,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value at a grid cell.
    pub fn at(&self, cell: GridCell) -> NwpResult<f64> {
        if cell.i >= self.south_north || cell.j >= self.west_east {
            return Err(NwpError::IndexOutOfRange(format!(
                "{}[{}][{}] outside {}x{}",
                self.name, cell.i, cell.j, self.south_north, self.west_east
            )));
        }
        Ok(self.data[cell.i * self.west_east + cell.j])
    }
}

/// A 3-D leveled field for one time step.
///
/// The level count is taken from the variable itself: mass-point
/// fields have `bottom_top` levels, the geopotential fields one more
/// (`bottom_top_stag`).
#[derive(Debug, Clone, PartialEq)]
pub struct LevelField {
    name: String,
    data: Vec<f64>,
    levels: usize,
    south_north: usize,
    west_east: usize,
}

impl LevelField {
    pub fn new(
        name: impl Into<String>,
        data: Vec<f64>,
        levels: usize,
        south_north: usize,
        west_east: usize,
    ) -> NwpResult<Self> {
        let name = name.into();
        if data.len() != levels * south_north * west_east {
            return Err(NwpError::InvalidSnapshot(format!(
                "{}: expected {}x{}x{} = {} values, got {}",
                name,
                levels,
                south_north,
                west_east,
                levels * south_north * west_east,
                data.len()
            )));
        }
        Ok(Self {
            name,
            data,
            levels,
            south_north,
            west_east,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Value at a level and grid cell.
    pub fn at(&self, level: usize, cell: GridCell) -> NwpResult<f64> {
        if level >= self.levels || cell.i >= self.south_north || cell.j >= self.west_east {
            return Err(NwpError::IndexOutOfRange(format!(
                "{}[{}][{}][{}] outside {}x{}x{}",
                self.name, level, cell.i, cell.j, self.levels, self.south_north, self.west_east
            )));
        }
        Ok(self.data[(level * self.south_north + cell.i) * self.west_east + cell.j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_field_indexing() {
        // 2x3 grid, row-major south_north x west_east
        let field = SurfaceField::new("T2", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        assert_eq!(field.at(GridCell { i: 0, j: 0 }).unwrap(), 1.0);
        assert_eq!(field.at(GridCell { i: 0, j: 2 }).unwrap(), 3.0);
        assert_eq!(field.at(GridCell { i: 1, j: 0 }).unwrap(), 4.0);
        assert_eq!(field.at(GridCell { i: 1, j: 2 }).unwrap(), 6.0);
    }

    #[test]
    fn test_surface_field_out_of_range() {
        let field = SurfaceField::new("PSFC", vec![0.0; 6], 2, 3).unwrap();
        assert!(field.at(GridCell { i: 2, j: 0 }).is_err());
        assert!(field.at(GridCell { i: 0, j: 3 }).is_err());
    }

    #[test]
    fn test_surface_field_size_mismatch() {
        let result = SurfaceField::new("HGT", vec![0.0; 5], 2, 3);
        assert!(result.is_err(), "5 values cannot fill a 2x3 grid");
    }

    #[test]
    fn test_level_field_indexing() {
        // 2 levels of a 2x2 grid
        let data = vec![1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0];
        let field = LevelField::new("T", data, 2, 2, 2).unwrap();
        assert_eq!(field.at(0, GridCell { i: 1, j: 0 }).unwrap(), 3.0);
        assert_eq!(field.at(1, GridCell { i: 0, j: 1 }).unwrap(), 20.0);
    }

    #[test]
    fn test_level_field_out_of_range_level() {
        let field = LevelField::new("QVAPOR", vec![0.0; 8], 2, 2, 2).unwrap();
        assert!(field.at(2, GridCell { i: 0, j: 0 }).is_err());
    }
}
