//! The in-memory grid: a 2-D row-major array of numeric samples.

use ndarray::{Array2, ArrayD, Ix2};

use crate::errors::{Result, WhiteboxError};
use crate::raster::types::DataType;

/// A 2-D row-major grid of samples.
///
/// Bodies on disk hold either 32-bit floats or 16-bit signed integers; the
/// `Float64` variant only arises in memory, when nodata masking widens an
/// integer grid so that NaN can stand in for the sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    Float32(Array2<f32>),
    Int16(Array2<i16>),
    Float64(Array2<f64>),
}

impl Grid {
    /// Grid dimensions as `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        match self {
            Grid::Float32(a) => a.dim(),
            Grid::Int16(a) => a.dim(),
            Grid::Float64(a) => a.dim(),
        }
    }

    /// The numeric kind this grid serializes as.
    pub fn data_type(&self) -> DataType {
        match self {
            Grid::Float32(_) | Grid::Float64(_) => DataType::Float,
            Grid::Int16(_) => DataType::Integer,
        }
    }

    /// Build a grid from a dynamic-rank array.
    ///
    /// Rasters of any rank other than 2 are rejected; there is no implicit
    /// flattening of higher-rank input.
    pub fn from_dyn<T>(array: ArrayD<T>) -> Result<Grid>
    where
        Array2<T>: Into<Grid>,
    {
        let ndim = array.ndim();
        let array = array.into_dimensionality::<Ix2>().map_err(|_| {
            WhiteboxError::Unsupported(format!(
                "only 2-D rasters are supported, got a {ndim}-dimensional array"
            ))
        })?;
        Ok(array.into())
    }

    /// Copy of the samples as `f64`, regardless of the underlying kind.
    pub fn to_f64(&self) -> Array2<f64> {
        match self {
            Grid::Float32(a) => a.mapv(f64::from),
            Grid::Int16(a) => a.mapv(f64::from),
            Grid::Float64(a) => a.clone(),
        }
    }
}

impl From<Array2<f32>> for Grid {
    fn from(a: Array2<f32>) -> Grid {
        Grid::Float32(a)
    }
}

impl From<Array2<i16>> for Grid {
    fn from(a: Array2<i16>) -> Grid {
        Grid::Int16(a)
    }
}

impl From<Array2<f64>> for Grid {
    fn from(a: Array2<f64>) -> Grid {
        Grid::Float64(a)
    }
}
