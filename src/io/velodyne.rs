//! Loader for the flat binary dump format used by automotive LIDAR datasets: a headerless,
//! contiguous array of little-endian 32-bit floats in repeating `x, y, z, reflectance` records,
//! 16 bytes per point. There is no framing, checksum, or metadata; the file length alone
//! determines the point count, and a length that is not a whole number of records is rejected.

use crate::errors::ProjectionError;
use crate::scan::{LidarScan, ScanPoint};
use crate::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const RECORD_BYTES: usize = 16;

/// Read a binary scan dump from a file and return a `LidarScan`.
///
/// # Arguments
///
/// * `file_path`: path to the dump file
///
/// returns: Result<LidarScan, Box<dyn Error, Global>>
pub fn load_velodyne_bin(file_path: &Path) -> Result<LidarScan> {
    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);
    read_velodyne(&mut reader)
}

/// Read a binary scan dump from any reader. Points are returned in file order, which is the
/// order the panorama projector uses to resolve raster collisions.
pub fn read_velodyne(reader: &mut impl Read) -> Result<LidarScan> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.len() % RECORD_BYTES != 0 {
        return Err(ProjectionError::InvalidParameter(format!(
            "scan dump length {} is not a whole number of {} byte records",
            bytes.len(),
            RECORD_BYTES
        ))
        .into());
    }

    let mut points = Vec::with_capacity(bytes.len() / RECORD_BYTES);
    for record in bytes.chunks_exact(RECORD_BYTES) {
        let f = |i: usize| f32::from_le_bytes([record[i], record[i + 1], record[i + 2], record[i + 3]]);
        points.push(ScanPoint::from_record([f(0), f(4), f(8), f(12)]));
    }

    Ok(LidarScan::new(points))
}
