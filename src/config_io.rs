/*
Configuration dumps and loads.

Two whitespace separated text formats share the same column layout:

  dat:  index x y z vx vy vz [fx fy fz]
  xyz:  <particle count>
        Atoms. Timestep:<iteration>
        index x y z

Indices are left-justified in 10 columns, floats are signed scientific numbers
with 8 fractional digits left-justified in 18 columns.

Loads address particles by the index written on each record, in any order.
All records are validated before anything is written, so a failed load leaves
the world as it was.
 */
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Vector3;

use crate::constants::{FIELD_PRECISION, FIELD_WIDTH, INDEX_WIDTH};
use crate::error::{WorldError, WorldResult};
use crate::world::ParticleWorld;

const XYZ_COMMENT: &str = "Atoms. Timestep:";
const XYZ_HEADER_LINES: usize = 2;
const STREAM_LABEL: &str = "<stream>";

/// Column groups written by [`ParticleWorld::dump_pos`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpFields {
    pub index: bool,
    pub positions: bool,
    pub velocities: bool,
    pub forces: bool,
}

impl DumpFields {
    pub const ALL: DumpFields = DumpFields {
        index: true,
        positions: true,
        velocities: true,
        forces: true,
    };

    pub const POSITIONS: DumpFields = DumpFields {
        index: true,
        positions: true,
        velocities: false,
        forces: false,
    };
}

impl Default for DumpFields {
    fn default() -> Self {
        DumpFields::POSITIONS
    }
}

/// Signed scientific notation with a signed two digit exponent, e.g. `+1.12246205e+00`.
pub fn format_scientific(value: f64) -> String {
    let raw = format!("{:+.prec$e}", value, prec = FIELD_PRECISION);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        // inf and NaN carry no exponent
        None => raw,
    }
}

fn write_index<W: Write>(out: &mut W, index: usize) -> io::Result<()> {
    write!(out, "{:<width$}", index, width = INDEX_WIDTH)
}

fn write_row<W: Write>(out: &mut W, row: &Vector3<f64>) -> io::Result<()> {
    for value in row.iter() {
        write!(out, "{:<width$}", format_scientific(*value), width = FIELD_WIDTH)?;
    }
    Ok(())
}

fn io_error(path: &str) -> impl FnOnce(io::Error) -> WorldError + '_ {
    move |source| WorldError::Io {
        path: path.to_string(),
        source,
    }
}

/*
Parse `index` followed by `N` floats. Trailing fields are ignored, missing or
non-numeric ones are an error, as is an index at or beyond the capacity.
 */
fn parse_record<const N: usize>(
    line_no: usize,
    line: &str,
    capacity: usize,
) -> WorldResult<(usize, [f64; N])> {
    let mut fields = line.split_whitespace();

    let index_field = fields
        .next()
        .ok_or_else(|| WorldError::parse(line_no, "missing particle index"))?;
    let index = index_field.parse::<usize>().map_err(|_| {
        WorldError::parse(line_no, format!("invalid particle index `{index_field}`"))
    })?;

    let mut values = [0.0; N];
    for (column, value) in values.iter_mut().enumerate() {
        let field = fields.next().ok_or_else(|| {
            WorldError::parse(
                line_no,
                format!("expected {} numeric fields, found {column}", N),
            )
        })?;
        *value = field.parse::<f64>().map_err(|_| {
            WorldError::parse(line_no, format!("invalid numeric value `{field}`"))
        })?;
    }

    if index >= capacity {
        return Err(WorldError::IndexOutOfRange {
            line: line_no,
            index,
            capacity,
        });
    }

    Ok((index, values))
}

/*
Header lines are dropped as raw bytes, never decoded. Every remaining line is a
record, so a blank line is a record with all of its fields missing.
 */
fn read_records<R: BufRead, const N: usize>(
    input: R,
    skip_lines: usize,
    capacity: usize,
    label: &str,
) -> WorldResult<Vec<(usize, [f64; N])>> {
    let mut records = Vec::new();
    for (line_idx, bytes) in input.split(b'\n').enumerate() {
        let bytes = bytes.map_err(io_error(label))?;
        if line_idx < skip_lines {
            continue;
        }
        let line_no = line_idx + 1;
        let line = std::str::from_utf8(&bytes)
            .map_err(|e| WorldError::parse(line_no, format!("record is not valid UTF-8: {e}")))?;
        records.push(parse_record::<N>(line_no, line, capacity)?);
    }
    Ok(records)
}

fn open(path: &Path) -> WorldResult<BufReader<File>> {
    let label = path.display().to_string();
    let file = File::open(path).map_err(io_error(&label))?;
    Ok(BufReader::new(file))
}

fn create(path: &Path) -> WorldResult<BufWriter<File>> {
    let label = path.display().to_string();
    let file = File::create(path).map_err(io_error(&label))?;
    Ok(BufWriter::new(file))
}

impl ParticleWorld {
    pub fn dump_pos<W: Write>(&self, out: &mut W, fields: DumpFields) -> io::Result<()> {
        for i in 0..self.particle_count() {
            if fields.index {
                write_index(out, i)?;
            }
            if fields.positions {
                write_row(out, &self.positions[i])?;
            }
            if fields.velocities {
                write_row(out, &self.velocities[i])?;
            }
            if fields.forces {
                write_row(out, &self.forces[i])?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn dump_vel<W: Write>(&self, out: &mut W, index: bool) -> io::Result<()> {
        self.dump_pos(
            out,
            DumpFields {
                index,
                positions: false,
                velocities: true,
                forces: false,
            },
        )
    }

    /// One line: particle count, potential energy, kinetic energy.
    pub fn dump_thermo<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_index(out, self.particle_count())?;
        for energy in [self.potential_energy(), self.kinetic_energy()] {
            write!(out, "{:<width$}", format_scientific(energy), width = FIELD_WIDTH)?;
        }
        writeln!(out)
    }

    pub fn write_dat<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.dump_pos(out, DumpFields::ALL)
    }

    pub fn write_xyz<W: Write>(&self, out: &mut W, iteration: usize) -> io::Result<()> {
        write_index(out, self.particle_count())?;
        writeln!(out)?;
        writeln!(out, "{}{:<width$}", XYZ_COMMENT, iteration, width = INDEX_WIDTH)?;
        self.dump_pos(out, DumpFields::POSITIONS)
    }

    /// Loads positions and velocities from dat records, returning how many were read.
    pub fn read_dat<R: BufRead>(&mut self, input: R) -> WorldResult<usize> {
        self.read_dat_labeled(input, STREAM_LABEL)
    }

    /// Loads positions from an xyz stream. The two header lines are skipped unread.
    pub fn read_xyz<R: BufRead>(&mut self, input: R) -> WorldResult<usize> {
        self.read_xyz_labeled(input, STREAM_LABEL)
    }

    fn read_dat_labeled<R: BufRead>(&mut self, input: R, label: &str) -> WorldResult<usize> {
        let records = read_records::<_, 6>(input, 0, self.particle_count(), label)?;
        for (index, [rx, ry, rz, vx, vy, vz]) in records.iter().copied() {
            self.positions[index] = Vector3::new(rx, ry, rz);
            self.velocities[index] = Vector3::new(vx, vy, vz);
            log::debug!("particle {index} loaded");
        }
        log::info!("loaded {} dat records from {label}", records.len());
        Ok(records.len())
    }

    fn read_xyz_labeled<R: BufRead>(&mut self, input: R, label: &str) -> WorldResult<usize> {
        let records =
            read_records::<_, 3>(input, XYZ_HEADER_LINES, self.particle_count(), label)?;
        for (index, [rx, ry, rz]) in records.iter().copied() {
            self.positions[index] = Vector3::new(rx, ry, rz);
            log::debug!("particle {index} loaded");
        }
        log::info!("loaded {} xyz records from {label}", records.len());
        Ok(records.len())
    }

    pub fn dump_dat(&self, path: impl AsRef<Path>) -> WorldResult<()> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let mut out = create(path)?;
        self.write_dat(&mut out)
            .and_then(|_| out.flush())
            .map_err(io_error(&label))
    }

    pub fn dump_xyz(&self, path: impl AsRef<Path>, iteration: usize) -> WorldResult<()> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let mut out = create(path)?;
        self.write_xyz(&mut out, iteration)
            .and_then(|_| out.flush())
            .map_err(io_error(&label))
    }

    pub fn load_dat(&mut self, path: impl AsRef<Path>) -> WorldResult<usize> {
        let path = path.as_ref();
        let input = open(path)?;
        self.read_dat_labeled(input, &path.display().to_string())
    }

    pub fn load_xyz(&mut self, path: impl AsRef<Path>) -> WorldResult<usize> {
        let path = path.as_ref();
        let input = open(path)?;
        self.read_xyz_labeled(input, &path.display().to_string())
    }
}
