//! In-memory raster representations.

mod grid;
mod nodata;
mod types;

pub use grid::Grid;
pub use nodata::apply_nodata;
pub use types::{ByteOrder, DataScale, DataType, Sample};

use ndarray::{s, Array1};

use crate::dep::attributes::{AttrMap, RasterAttributes};

/// A caller-supplied grid plus its raw, arbitrary-case attributes.
///
/// This is the encode-side input: attributes are normalized into a
/// [`RasterAttributes`] when the array is written to a file pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterArray {
    pub grid: Grid,
    pub attrs: AttrMap,
}

impl RasterArray {
    pub fn new(grid: impl Into<Grid>, attrs: AttrMap) -> RasterArray {
        RasterArray {
            grid: grid.into(),
            attrs,
        }
    }
}

/// Record of one external-tool invocation, attached to loaded outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// The rewritten parameter mapping the tool was called with.
    pub args: Vec<(String, String)>,
    /// The tool's status code.
    pub return_code: i32,
}

/// A decoded raster: normalized attributes, grid, and derived coordinate axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterRecord {
    pub attrs: RasterAttributes,
    pub grid: Grid,
    /// `cols` samples spaced from east to west. Derived, never persisted.
    pub x: Array1<f64>,
    /// `rows` samples spaced from south to north. Derived, never persisted.
    pub y: Array1<f64>,
    /// Present on records loaded back from a tool invocation.
    pub provenance: Option<Invocation>,
}

impl RasterRecord {
    pub fn new(attrs: RasterAttributes, grid: Grid) -> RasterRecord {
        let x = axis(attrs.east, attrs.west, attrs.cols);
        let y = axis(attrs.south, attrs.north, attrs.rows);
        RasterRecord {
            attrs,
            grid,
            x,
            y,
            provenance: None,
        }
    }

    /// Apply the attribute-declared nodata sentinel to the grid.
    pub fn mask_nodata(&mut self) {
        apply_nodata(&mut self.grid, self.attrs.nodata);
    }
}

/// `n` samples linearly spaced over `[start, end)`: `n + 1` points with the
/// final endpoint dropped.
fn axis(start: f64, end: f64, n: usize) -> Array1<f64> {
    Array1::linspace(start, end, n + 1)
        .slice_move(s![..n])
}
