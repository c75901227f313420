//! Builds a particle world from a JSON configuration, places the particles
//! (or loads a stored configuration), thermalizes the velocities and writes
//! the initial `.dat` and `.xyz` dumps. No time stepping is done here.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use langevin_md::{ParticleWorld, UniformSource, WorldConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Initialize a Langevin particle world")]
struct Args {
    /// JSON world configuration
    #[arg(short, long)]
    config: PathBuf,

    /// Directory receiving config.dat and config.xyz
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Start from a stored .dat configuration (positions and velocities)
    #[arg(long, conflicts_with = "load_xyz")]
    load_dat: Option<PathBuf>,

    /// Start from a stored .xyz configuration (positions only)
    #[arg(long)]
    load_xyz: Option<PathBuf>,

    /// Iteration written in the xyz comment line
    #[arg(long, default_value_t = 0)]
    timestep: usize,
}

fn thermalize(world: &mut ParticleWorld, seed: Option<u64>) {
    match seed {
        Some(seed) => world.init_velocities(&mut UniformSource::seeded(seed)),
        None => world.init_velocities(&mut UniformSource::from_thread()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = WorldConfig::from_json_file(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    let mut world = config.build_world()?;

    if let Some(path) = &args.load_dat {
        world.load_dat(path)?;
    } else {
        match &args.load_xyz {
            Some(path) => {
                world.load_xyz(path)?;
            }
            None => world.init_positions()?,
        }
        thermalize(&mut world, config.seed);
    }

    world.update_energy_forces();
    world.update_energy_kinetics();
    log::info!(
        "N = {}, E_pot = {:.8}, E_kin = {:.8}, T = {:.6}",
        world.particle_count(),
        world.potential_energy(),
        world.kinetic_energy(),
        world.temperature_estimate()
    );

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    let dat = args.output_dir.join("config.dat");
    let xyz = args.output_dir.join("config.xyz");
    world.dump_dat(&dat)?;
    world.dump_xyz(&xyz, args.timestep)?;
    log::info!("wrote {} and {}", dat.display(), xyz.display());

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    world.dump_thermo(&mut handle)?;
    handle.flush()?;

    Ok(())
}
