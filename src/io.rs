//! Thin file-format glue around the in-memory scan types. The projection engines never touch
//! the filesystem; this module exists so a scan dump can be pulled into a [`LidarScan`] without
//! the caller hand-rolling the record layout.
//!
//! [`LidarScan`]: crate::scan::LidarScan

mod velodyne;

pub use velodyne::{load_velodyne_bin, read_velodyne};
