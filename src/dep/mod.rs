//! Codec between [`RasterArray`]/[`RasterRecord`](crate::raster::RasterRecord)
//! and the on-disk pair: a text header (`.dep`) plus a raw binary body
//! (`.tas`).

pub mod attributes;
mod body;
pub mod header;

pub use attributes::{normalize, AttrMap, AttrValue, RasterAttributes};
pub use body::{decode_body, encode_body};

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, WhiteboxError};
use crate::raster::{ByteOrder, DataType, RasterArray, RasterRecord};

/// Header file extension.
pub const HEADER_EXT: &str = "dep";
/// Body file extension.
pub const BODY_EXT: &str = "tas";

/// Write `array` as a header+body pair at `base` (extensions appended).
///
/// Attributes are normalized with the numeric kind inferred from the grid,
/// the byte order is stamped little-endian, and the declared `rows`/`cols`
/// must match the grid's dimensions. Returns the `(header, body)` paths.
pub fn write_pair(array: &RasterArray, base: &Path) -> Result<(PathBuf, PathBuf)> {
    let mut attrs = normalize(&array.attrs, array.grid.data_type())?;
    attrs.byte_order = Some(ByteOrder::LittleEndian);

    let dims = array.grid.dims();
    if (attrs.rows, attrs.cols) != dims {
        return Err(WhiteboxError::ShapeMismatch {
            expected: (attrs.rows, attrs.cols),
            actual: dims,
        });
    }

    let header_path = base.with_extension(HEADER_EXT);
    let body_path = base.with_extension(BODY_EXT);
    fs::write(&header_path, header::serialize(&attrs))?;
    fs::write(&body_path, encode_body(&array.grid))?;
    Ok((header_path, body_path))
}

/// Load a header+body pair into a [`RasterRecord`].
///
/// When `body` is `None` the body path is derived from the header path by
/// swapping the extension. Both files must exist. The body decodes per the
/// header's declared data type and byte order; nodata masking is *not*
/// applied here, see [`RasterRecord::mask_nodata`].
pub fn read_pair(header_path: &Path, body: Option<&Path>) -> Result<RasterRecord> {
    if !header_path.is_file() {
        return Err(WhiteboxError::FileNotFound(header_path.to_path_buf()));
    }
    let body_path = match body {
        Some(p) => p.to_path_buf(),
        None => header_path.with_extension(BODY_EXT),
    };
    if !body_path.is_file() {
        return Err(WhiteboxError::FileNotFound(body_path));
    }

    let text = fs::read_to_string(header_path)?;
    let raw = header::parse(&text)?;
    let data_type = match raw.get("Data Type") {
        Some(value) => DataType::from_type_str(&value.to_text()),
        None => return Err(WhiteboxError::MissingFields(vec!["data_type".to_string()])),
    };
    let attrs = normalize(&raw, data_type)?;

    let bytes = fs::read(&body_path)?;
    let grid = decode_body(
        &bytes,
        attrs.rows,
        attrs.cols,
        attrs.data_type,
        attrs.byte_order_or_default(),
    )?;
    Ok(RasterRecord::new(attrs, grid))
}
