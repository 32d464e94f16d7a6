//! The raw binary grid body: fixed-width samples, row-major, no padding.

use ndarray::Array2;

use crate::errors::{Result, WhiteboxError};
use crate::raster::{ByteOrder, DataType, Grid, Sample};

/// Serialize a grid row-major, one fixed-width sample per cell.
///
/// Bodies are always written little-endian regardless of the host's native
/// byte order. `Float64` grids (the widened in-memory form) cast down to f32.
pub fn encode_body(grid: &Grid) -> Vec<u8> {
    match grid {
        Grid::Float32(a) => encode_samples(a.iter().copied()),
        Grid::Float64(a) => encode_samples(a.iter().map(|&v| v as f32)),
        Grid::Int16(a) => encode_samples(a.iter().copied()),
    }
}

fn encode_samples<T: Sample>(samples: impl ExactSizeIterator<Item = T>) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * T::WIDTH);
    for sample in samples {
        sample.write_le(&mut out);
    }
    out
}

/// Interpret `bytes` as `rows * cols` samples of `data_type` in `order`,
/// reshaped into a `(rows, cols)` grid.
pub fn decode_body(
    bytes: &[u8],
    rows: usize,
    cols: usize,
    data_type: DataType,
    order: ByteOrder,
) -> Result<Grid> {
    let expected = rows * cols * data_type.bytes();
    if bytes.len() != expected {
        return Err(WhiteboxError::BodyLength {
            expected,
            actual: bytes.len(),
        });
    }
    match data_type {
        DataType::Float => Ok(Grid::Float32(decode_samples(bytes, rows, cols, order)?)),
        DataType::Integer => Ok(Grid::Int16(decode_samples(bytes, rows, cols, order)?)),
    }
}

fn decode_samples<T: Sample>(
    bytes: &[u8],
    rows: usize,
    cols: usize,
    order: ByteOrder,
) -> Result<Array2<T>> {
    let samples: Vec<T> = bytes
        .chunks_exact(T::WIDTH)
        .map(|chunk| T::read(chunk, order))
        .collect();
    Array2::from_shape_vec((rows, cols), samples).map_err(|_| WhiteboxError::ShapeMismatch {
        expected: (rows, cols),
        actual: (rows, cols),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn float_layout_is_row_major_little_endian() {
        let grid: Grid = array![[1.0f32, 2.0], [3.0, 4.0]].into();
        let bytes = encode_body(&grid);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &2.0f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &3.0f32.to_le_bytes());
    }

    #[test]
    fn integer_samples_are_two_bytes() {
        let grid: Grid = array![[1i16, -2, 300]].into();
        let bytes = encode_body(&grid);
        assert_eq!(bytes.len(), 6);
        assert_eq!(&bytes[2..4], &(-2i16).to_le_bytes());
    }

    #[test]
    fn widened_grids_cast_to_f32() {
        let grid: Grid = array![[0.5f64, 1.5]].into();
        let bytes = encode_body(&grid);
        assert_eq!(&bytes[..4], &0.5f32.to_le_bytes());
    }

    #[test]
    fn decode_round_trip() {
        let grid: Grid = array![[1.0f32, 2.0], [3.0, 4.0]].into();
        let bytes = encode_body(&grid);
        let decoded =
            decode_body(&bytes, 2, 2, DataType::Float, ByteOrder::LittleEndian).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn big_endian_decode_equals_swapped_little_endian() {
        let grid: Grid = array![[10i16, -20], [30, -40]].into();
        let le = encode_body(&grid);
        let be: Vec<u8> = le
            .chunks_exact(2)
            .flat_map(|pair| [pair[1], pair[0]])
            .collect();
        let from_be = decode_body(&be, 2, 2, DataType::Integer, ByteOrder::BigEndian).unwrap();
        let from_le = decode_body(&le, 2, 2, DataType::Integer, ByteOrder::LittleEndian).unwrap();
        assert_eq!(from_be, from_le);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = decode_body(&[0u8; 10], 2, 2, DataType::Float, ByteOrder::LittleEndian)
            .unwrap_err();
        assert!(matches!(
            err,
            WhiteboxError::BodyLength { expected: 16, actual: 10 }
        ));
    }
}
