// Reduced units: the damping is taken to unity and m * gamma * D = T.
pub const DEFAULT_FRICTION: f64 = 1.0; // friction coefficient gamma
pub const DEFAULT_TEMPERATURE: f64 = 1.0; // target temperature
pub const DEFAULT_MASS: f64 = 1.0; // mass of each particle

// Minimum of the Lennard-Jones potential in units of sigma, 2^(1/6).
pub const LATTICE_SPACING_FACTOR: f64 = 1.122_462_048_309_373;

// Fixed-width columns of the text dumps.
pub const INDEX_WIDTH: usize = 10;
pub const FIELD_WIDTH: usize = 18;
pub const FIELD_PRECISION: usize = 8;
