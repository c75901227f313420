/*
The particle world.

Holds the state of a fixed ensemble of point particles confined to a centered
box: positions, velocities, forces and energies, together with the list of
active force fields (minus gradient of positional potentials).

Model: the damping term is taken to unity, gamma = 1. The diffusion
coefficient is then given by m * gamma * D = T.
 */
use itertools::iproduct;
use nalgebra::Vector3;

use crate::constants::{
    DEFAULT_FRICTION, DEFAULT_MASS, DEFAULT_TEMPERATURE, LATTICE_SPACING_FACTOR,
};
use crate::error::{WorldError, WorldResult};
use crate::forcefield::ForceField;
use crate::random::RandomSource;
use crate::simulation_box::SimulationBox;

pub struct ParticleWorld {
    particle_count: usize,
    simulation_box: SimulationBox,
    hard_core_diameter: f64,
    friction: f64,
    temperature: f64,
    mass: f64,
    pub(crate) positions: Vec<Vector3<f64>>,
    pub(crate) velocities: Vec<Vector3<f64>>,
    pub(crate) forces: Vec<Vector3<f64>>,
    forces_previous: Vec<Vector3<f64>>,
    potential_energy: f64,
    kinetic_energy: f64,
    force_fields: Vec<Box<dyn ForceField>>,
}

impl std::fmt::Debug for ParticleWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleWorld")
            .field("particle_count", &self.particle_count)
            .field("simulation_box", &self.simulation_box)
            .field("hard_core_diameter", &self.hard_core_diameter)
            .field("temperature", &self.temperature)
            .field("potential_energy", &self.potential_energy)
            .field("kinetic_energy", &self.kinetic_energy)
            .field("force_fields", &self.force_fields.len())
            .finish()
    }
}

impl ParticleWorld {
    /// World with unit friction, temperature and mass.
    pub fn new(
        particle_count: usize,
        lx: f64,
        ly: f64,
        lz: f64,
        hard_core_diameter: f64,
    ) -> WorldResult<Self> {
        Self::with_parameters(
            particle_count,
            lx,
            ly,
            lz,
            hard_core_diameter,
            DEFAULT_FRICTION,
            DEFAULT_TEMPERATURE,
            DEFAULT_MASS,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_parameters(
        particle_count: usize,
        lx: f64,
        ly: f64,
        lz: f64,
        hard_core_diameter: f64,
        friction: f64,
        temperature: f64,
        mass: f64,
    ) -> WorldResult<Self> {
        if particle_count == 0 {
            return Err(WorldError::InvalidArgument {
                reason: "number of particles must be larger than zero".to_string(),
            });
        }
        if !hard_core_diameter.is_finite() || hard_core_diameter <= 0.0 {
            return Err(WorldError::InvalidArgument {
                reason: format!("hard core diameter must be positive, got {hard_core_diameter}"),
            });
        }

        let zeros = vec![Vector3::zeros(); particle_count];
        Ok(Self {
            particle_count,
            simulation_box: SimulationBox::new(lx, ly, lz),
            hard_core_diameter,
            friction,
            temperature,
            mass,
            positions: zeros.clone(),
            velocities: zeros.clone(),
            forces: zeros.clone(),
            forces_previous: zeros,
            potential_energy: 0.0,
            kinetic_energy: 0.0,
            force_fields: Vec::new(),
        })
    }

    pub fn add_force_field(&mut self, field: Box<dyn ForceField>) {
        log::debug!(
            "registering {} as force field #{}",
            field.name(),
            self.force_fields.len()
        );
        self.force_fields.push(field);
    }

    pub fn with_force_field(mut self, field: impl ForceField + 'static) -> Self {
        self.add_force_field(Box::new(field));
        self
    }

    pub fn force_field_count(&self) -> usize {
        self.force_fields.len()
    }

    /// Number of usable lattice sites per axis and the spacing between them.
    ///
    /// Site indices run over [1, n) on every axis, so the layer touching the
    /// lower face is never used.
    pub fn lattice_layout(&self) -> ([usize; 3], f64) {
        let delta = self.hard_core_diameter * LATTICE_SPACING_FACTOR;
        // `as usize` floors and saturates negative or NaN ratios to zero
        let counts = [
            (self.simulation_box.x_dimension / delta) as usize,
            (self.simulation_box.y_dimension / delta) as usize,
            (self.simulation_box.z_dimension / delta) as usize,
        ];
        (counts, delta)
    }

    pub fn lattice_capacity(&self) -> usize {
        let ([nx, ny, nz], _) = self.lattice_layout();
        nx.saturating_sub(1)
            .saturating_mul(ny.saturating_sub(1))
            .saturating_mul(nz.saturating_sub(1))
    }

    pub fn init_positions(&mut self) -> WorldResult<()> {
        /*
        Place the particles on a simple cubic lattice of spacing
        sigma * 2^(1/6), ix outermost and iz innermost, stopping as soon as
        every particle has a site. Nothing is written if the box is too small.
         */
        let available = self.lattice_capacity();
        if available < self.particle_count {
            return Err(WorldError::Capacity {
                requested: self.particle_count,
                available,
            });
        }

        let ([nx, ny, nz], delta) = self.lattice_layout();
        let origin = self.simulation_box.lower();
        let sites = iproduct!(1..nx, 1..ny, 1..nz).map(|(ix, iy, iz)| {
            Vector3::new(
                origin.x + ix as f64 * delta,
                origin.y + iy as f64 * delta,
                origin.z + iz as f64 * delta,
            )
        });
        for (position, site) in self.positions.iter_mut().zip(sites) {
            *position = site;
        }

        log::info!(
            "placed {} particles on a {}x{}x{} lattice (spacing {:.6})",
            self.particle_count,
            nx.saturating_sub(1),
            ny.saturating_sub(1),
            nz.saturating_sub(1),
            delta
        );
        Ok(())
    }

    pub fn init_velocities<S: RandomSource + ?Sized>(&mut self, rng: &mut S) {
        /*
        Draw raw uniform velocities, remove the mean (net momentum) and rescale
        so that <v^2> = 3 T. For a single particle there is no momentum to
        remove and the raw velocity is only rescaled.

        Precondition: the draws must not be degenerate (<v^2> > 0, and a
        positive variance when N > 1), otherwise the velocities become
        non-finite.
         */
        let n = self.particle_count as f64;
        let mut v_sum: Vector3<f64> = Vector3::zeros();
        let mut v_sq_sum = 0.0;

        for v in self.velocities.iter_mut() {
            let vx = rng.uniform();
            let vy = rng.uniform();
            let vz = rng.uniform();
            *v = Vector3::new(vx, vy, vz);

            v_sum += *v;
            v_sq_sum += vx * vx + vy * vy + vz * vz;
        }

        let v_mean = v_sum / n;
        let v_sqm = v_sq_sum / n;
        let v_var = v_sqm - v_mean.norm_squared(); // var = <v^2> - <v>^2

        let scale = if self.particle_count == 1 {
            let scale = (3.0 * self.temperature / v_sqm).sqrt();
            self.velocities[0] *= scale;
            scale
        } else {
            let scale = (3.0 * self.temperature / v_var).sqrt();
            for v in self.velocities.iter_mut() {
                *v = (*v - v_mean) * scale;
            }
            scale
        };

        if !scale.is_finite() {
            log::warn!(
                "degenerate velocity draw (<v^2> = {v_sqm}, var = {v_var}): velocities are not finite"
            );
        } else {
            log::debug!("velocities rescaled by {scale:.6} to T = {}", self.temperature);
        }
    }

    pub fn update_energy_forces(&mut self) -> f64 {
        /*
        Recompute the potential energy and the forces from scratch by summing
        the contribution of every force field in registration order.
         */
        self.potential_energy = 0.0;
        self.forces.fill(Vector3::zeros());

        for field in self.force_fields.iter_mut() {
            self.potential_energy += field.energy_force(&self.positions, &mut self.forces);
        }

        self.potential_energy
    }

    pub fn update_energy_kinetics(&mut self) -> f64 {
        let v_sq: f64 = self.velocities.iter().map(|v| v.norm_squared()).sum();
        self.kinetic_energy = 0.5 * self.mass * v_sq;
        self.kinetic_energy
    }

    /// Instantaneous kinetic temperature 2 E_kin / (3 N) from the last kinetic update.
    pub fn temperature_estimate(&self) -> f64 {
        2.0 * self.kinetic_energy / (3.0 * self.particle_count as f64)
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn simulation_box(&self) -> &SimulationBox {
        &self.simulation_box
    }

    pub fn box_dimensions(&self) -> (f64, f64, f64) {
        (
            self.simulation_box.x_dimension,
            self.simulation_box.y_dimension,
            self.simulation_box.z_dimension,
        )
    }

    pub fn hard_core_diameter(&self) -> f64 {
        self.hard_core_diameter
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn potential_energy(&self) -> f64 {
        self.potential_energy
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.kinetic_energy
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    // Slices keep the row count fixed.
    pub fn positions_mut(&mut self) -> &mut [Vector3<f64>] {
        &mut self.positions
    }

    pub fn velocities(&self) -> &[Vector3<f64>] {
        &self.velocities
    }

    pub fn velocities_mut(&mut self) -> &mut [Vector3<f64>] {
        &mut self.velocities
    }

    pub fn forces(&self) -> &[Vector3<f64>] {
        &self.forces
    }

    pub fn forces_previous(&self) -> &[Vector3<f64>] {
        &self.forces_previous
    }
}
