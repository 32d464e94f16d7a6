//! Stage [`ndarray`] rasters to the WhiteboxTools two-file raster format.
//!
//! WhiteboxTools reads rasters as a pair of files sharing a base name: a
//! text header (`.dep`) describing geometry, numeric kind and display
//! metadata, and a raw binary body (`.tas`) holding the samples row-major.
//! This crate provides a lossless codec between that pair and an in-memory
//! [`Grid`] with attributes, and a [`Stager`] that hands arrays to an
//! external tool invocation and loads its outputs back.
//!
//! ## Use
//!
//! ```no_run
//! use ndarray::Array2;
//! use whitebox_raster::{AttrMap, RasterArray, Stager, StagingConfig, ToolParams};
//!
//! # fn main() -> whitebox_raster::Result<()> {
//! let attrs = AttrMap::new()
//!     .with("min", 0.0)
//!     .with("max", 10.0)
//!     .with("north", 5.0)
//!     .with("south", 0.0)
//!     .with("east", 0.0)
//!     .with("west", 5.0)
//!     .with("rows", 5)
//!     .with("cols", 5)
//!     .with("z_units", "M")
//!     .with("xy_units", "M")
//!     .with("data_scale", "continuous");
//! let dem = RasterArray::new(Array2::<f32>::zeros((5, 5)), attrs);
//!
//! let stager = Stager::new(StagingConfig::from_env()?);
//! let params = ToolParams::new().with("input", dem).with("zfactor", "1.0");
//! let output = stager.run(params, |args| {
//!     // hand `args` to WhiteboxTools and return its status code
//!     # let _ = args;
//!     Ok(0)
//! })?;
//! # let _ = output;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dep;
pub mod errors;
pub mod raster;
pub mod staging;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::StagingConfig;
pub use dep::{read_pair, write_pair, AttrMap, AttrValue, RasterAttributes};
pub use errors::{Result, WhiteboxError};
pub use raster::{
    ByteOrder, DataScale, DataType, Grid, Invocation, RasterArray, RasterRecord,
};
pub use staging::{ParamValue, RunOptions, Stager, ToolOutput, ToolParams};
