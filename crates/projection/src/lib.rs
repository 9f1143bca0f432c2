//! Map projection routines for WRF model grids.

pub mod lambert;

pub use lambert::LambertProjector;
