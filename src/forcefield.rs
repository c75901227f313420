//! Force field contributors.
//!
//! A force field is the minus gradient of some positional potential. The world
//! keeps an ordered list of them and sums their contributions on every update.

use nalgebra::Vector3;

/// A pluggable contributor of potential energy and forces.
///
/// Implementations add their force on particle `i` into `forces[i]` and return
/// their potential energy. Both slices have one row per particle. The slices
/// are only borrowed for the duration of the call.
pub trait ForceField {
    fn energy_force(&mut self, positions: &[Vector3<f64>], forces: &mut [Vector3<f64>]) -> f64;

    /// Label used in log output.
    fn name(&self) -> &str {
        "force field"
    }
}

impl<F> ForceField for F
where
    F: FnMut(&[Vector3<f64>], &mut [Vector3<f64>]) -> f64,
{
    fn energy_force(&mut self, positions: &[Vector3<f64>], forces: &mut [Vector3<f64>]) -> f64 {
        self(positions, forces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_act_as_force_fields() {
        let mut spring = |positions: &[Vector3<f64>], forces: &mut [Vector3<f64>]| {
            // harmonic tether to the origin, k = 2
            let mut energy = 0.0;
            for (x, f) in positions.iter().zip(forces.iter_mut()) {
                *f -= 2.0 * *x;
                energy += x.norm_squared();
            }
            energy
        };

        let positions = vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, -2.0, 0.0)];
        let mut forces = vec![Vector3::<f64>::zeros(); 2];
        let energy = spring.energy_force(&positions, &mut forces);

        assert!((energy - 5.0).abs() < 1e-12);
        assert_eq!(forces[0], Vector3::new(-2.0, 0.0, 0.0));
        assert_eq!(forces[1], Vector3::new(0.0, 4.0, 0.0));
        assert_eq!(spring.name(), "force field");
    }
}
