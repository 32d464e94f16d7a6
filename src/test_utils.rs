//! Helpers shared by unit tests.

use std::path::{Path, PathBuf};

use crate::dep::AttrMap;

/// A temporary directory plus a path to a (not yet existing) file in it.
///
/// The directory is removed on drop.
pub struct TempFixture {
    _temp_dir: tempfile::TempDir,
    temp_path: PathBuf,
}

impl TempFixture {
    /// Creates a temporary directory and a path to a non-existent file with
    /// the given `name`, useful for writing results to during testing.
    pub fn empty(name: &str) -> Self {
        let _temp_dir = tempfile::tempdir().unwrap();
        let temp_path = _temp_dir.path().join(name);
        Self {
            _temp_dir,
            temp_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.temp_path
    }
}

impl AsRef<Path> for TempFixture {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// Attributes for a 5x5 continuous float raster.
pub fn sample_attrs() -> AttrMap {
    AttrMap::new()
        .with("min", 0.0)
        .with("max", 10.0)
        .with("north", 5.0)
        .with("south", 0.0)
        .with("east", 0.0)
        .with("west", 5.0)
        .with("cols", 5)
        .with("rows", 5)
        .with("z_units", "M")
        .with("xy_units", "M")
        .with("data_scale", "continuous")
}

/// Assert the numerical difference between two expressions is below
/// 64-bit machine epsilon or a specified epsilon.
#[macro_export]
macro_rules! assert_near {
    ($left:expr, $right:expr) => {
        assert_near!($left, $right, epsilon = f64::EPSILON)
    };
    ($left:expr, $right:expr, epsilon = $ep:expr) => {
        assert!(
            ($left - $right).abs() < $ep,
            "|{} - {}| = {} is greater than epsilon {:.4e}",
            $left,
            $right,
            ($left - $right).abs(),
            $ep
        )
    };
}
