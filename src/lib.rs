/*

=========================================================
 Langevin Dynamics: particle world (Rust)
=========================================================

Particle Model
--------------
A `ParticleWorld` holds a fixed number N of point particles in a centered
rectangular box [-lx/2, lx/2] x [-ly/2, ly/2] x [-lz/2, lz/2]:
- Positions, velocities, forces: N rows of Vector3<f64>
- Previous forces, kept for a two-step integrator
- Potential and kinetic energy of the last update
- Friction gamma, temperature T and mass m (reduced units, m gamma D = T)

Initialization
--------------
- Positions on a simple cubic lattice of spacing sigma * 2^(1/6), the minimum
  of the Lennard-Jones potential, so no two particles start too close.
- Velocities drawn uniformly, shifted to zero net momentum and rescaled so
  that (3/2) T = (1/2) <v^2>.

Force Fields
------------
Any number of `ForceField` contributors. Each one adds its force on every
particle and returns its potential energy; the world sums them in
registration order.

Configuration files
-------------------
- .dat: index x y z vx vy vz [fx fy fz]
- .xyz: count, comment line, then index x y z

=========================================================

*/
pub mod config;
pub mod config_io;
pub mod constants;
pub mod error;
pub mod forcefield;
pub mod random;
pub mod simulation_box;
pub mod world;

pub use config::WorldConfig;
pub use config_io::{format_scientific, DumpFields};
pub use error::{ErrorKind, WorldError, WorldResult};
pub use forcefield::ForceField;
pub use random::{RandomSource, UniformSource};
pub use simulation_box::SimulationBox;
pub use world::ParticleWorld;
