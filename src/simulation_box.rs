/*
The simulation box.

The particle domain is the centered box
[-lx/2, lx/2] x [-ly/2, ly/2] x [-lz/2, lz/2]. No periodic wrapping is applied
by the world itself; the box only bounds the initial lattice.
 */
use nalgebra::Vector3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationBox {
    pub x_dimension: f64,
    pub y_dimension: f64,
    pub z_dimension: f64,
}

impl SimulationBox {
    pub fn new(x_dimension: f64, y_dimension: f64, z_dimension: f64) -> Self {
        Self {
            x_dimension,
            y_dimension,
            z_dimension,
        }
    }

    pub fn dimensions(&self) -> Vector3<f64> {
        Vector3::new(self.x_dimension, self.y_dimension, self.z_dimension)
    }

    pub fn lower(&self) -> Vector3<f64> {
        -0.5 * self.dimensions()
    }

    pub fn upper(&self) -> Vector3<f64> {
        0.5 * self.dimensions()
    }

    /// Closed-interval containment on every axis.
    pub fn contains(&self, point: &Vector3<f64>) -> bool {
        let (lo, hi) = (self.lower(), self.upper());
        (0..3).all(|i| point[i] >= lo[i] && point[i] <= hi[i])
    }
}
