//! Run configuration loaded from JSON.
//!
//! ```json
//! {
//!   "particle_count": 8,
//!   "box": [4.0, 4.0, 4.0],
//!   "hard_core_diameter": 1.0,
//!   "friction": 1.0,
//!   "temperature": 1.0,
//!   "mass": 1.0,
//!   "seed": 42
//! }
//! ```
//!
//! `friction`, `temperature` and `mass` default to 1.0. Without a `seed` the
//! velocities are drawn from the thread RNG.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FRICTION, DEFAULT_MASS, DEFAULT_TEMPERATURE};
use crate::error::{WorldError, WorldResult};
use crate::world::ParticleWorld;

fn default_friction() -> f64 {
    DEFAULT_FRICTION
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_mass() -> f64 {
    DEFAULT_MASS
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub particle_count: usize,
    #[serde(rename = "box")]
    pub box_dimensions: [f64; 3],
    pub hard_core_diameter: f64,
    #[serde(default = "default_friction")]
    pub friction: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl WorldConfig {
    pub fn from_json_str(json: &str) -> WorldResult<Self> {
        serde_json::from_str(json).map_err(|e| WorldError::Config {
            path: "<string>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let file = File::open(path).map_err(|source| WorldError::Io {
            path: label.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| WorldError::Config {
            path: label,
            reason: e.to_string(),
        })
    }

    pub fn build_world(&self) -> WorldResult<ParticleWorld> {
        let [lx, ly, lz] = self.box_dimensions;
        ParticleWorld::with_parameters(
            self.particle_count,
            lx,
            ly,
            lz,
            self.hard_core_diameter,
            self.friction,
            self.temperature,
            self.mass,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn optional_fields_take_unit_defaults() {
        let config = WorldConfig::from_json_str(
            r#"{ "particle_count": 8, "box": [4.0, 4.0, 4.0], "hard_core_diameter": 1.0 }"#,
        )
        .unwrap();
        assert_eq!(config.friction, 1.0);
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.mass, 1.0);
        assert_eq!(config.seed, None);

        let world = config.build_world().unwrap();
        assert_eq!(world.particle_count(), 8);
        assert_eq!(world.box_dimensions(), (4.0, 4.0, 4.0));
    }

    #[test]
    fn explicit_fields_reach_the_world() {
        let config = WorldConfig::from_json_str(
            r#"{ "particle_count": 2, "box": [3.0, 5.0, 7.0], "hard_core_diameter": 0.5,
                 "friction": 0.1, "temperature": 2.0, "mass": 4.0, "seed": 42 }"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));
        let world = config.build_world().unwrap();
        assert_eq!(world.temperature(), 2.0);
        assert_eq!(world.mass(), 4.0);
        assert_eq!(world.friction(), 0.1);
        assert_eq!(world.hard_core_diameter(), 0.5);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = WorldConfig::from_json_str(r#"{ "particle_count": 2 }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn zero_particles_fail_at_build_time() {
        let config = WorldConfig::from_json_str(
            r#"{ "particle_count": 0, "box": [1.0, 1.0, 1.0], "hard_core_diameter": 1.0 }"#,
        )
        .unwrap();
        assert_eq!(
            config.build_world().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
