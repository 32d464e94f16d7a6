//! Nodata masking: sentinel raw values become NaN in memory.

use crate::raster::Grid;

/// Replace every sample exactly equal to `nodata` with NaN.
///
/// Integer grids are widened to `Float64` first, since i16 has no NaN.
/// A `None` sentinel is a no-op, and the substitution is idempotent.
///
/// This runs on the load path only; saving does not restore the sentinel.
/// The asymmetry matches the behavior of the on-disk format's reference
/// tooling and is deliberately preserved.
pub fn apply_nodata(grid: &mut Grid, nodata: Option<f64>) {
    let Some(sentinel) = nodata else {
        return;
    };
    match grid {
        Grid::Int16(a) => {
            let mut widened = a.mapv(f64::from);
            widened.mapv_inplace(|v| if v == sentinel { f64::NAN } else { v });
            *grid = Grid::Float64(widened);
        }
        Grid::Float32(a) => {
            let sentinel = sentinel as f32;
            a.mapv_inplace(|v| if v == sentinel { f32::NAN } else { v });
        }
        Grid::Float64(a) => {
            a.mapv_inplace(|v| if v == sentinel { f64::NAN } else { v });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn none_is_a_noop() {
        let mut g: Grid = array![[1.0f32, 2.0], [3.0, 4.0]].into();
        let before = g.clone();
        apply_nodata(&mut g, None);
        assert_eq!(g, before);
    }

    #[test]
    fn masks_matching_floats_in_place() {
        let mut g: Grid = array![[-9999.0f32, 2.0], [3.0, -9999.0]].into();
        apply_nodata(&mut g, Some(-9999.0));
        let Grid::Float32(a) = &g else { panic!("widened unexpectedly") };
        assert!(a[[0, 0]].is_nan());
        assert!(a[[1, 1]].is_nan());
        assert_eq!(a[[0, 1]], 2.0);
        assert_eq!(a[[1, 0]], 3.0);
    }

    #[test]
    fn widens_integer_grids() {
        let mut g: Grid = array![[1i16, -9999], [3, 4]].into();
        apply_nodata(&mut g, Some(-9999.0));
        let Grid::Float64(a) = &g else { panic!("expected Float64") };
        assert!(a[[0, 1]].is_nan());
        assert_eq!(a[[1, 0]], 3.0);
    }

    #[test]
    fn idempotent() {
        let mut g: Grid = array![[-9999.0f32, 5.0]].into();
        apply_nodata(&mut g, Some(-9999.0));
        let once = g.clone();
        apply_nodata(&mut g, Some(-9999.0));
        // NaN != NaN, so compare cellwise.
        let (Grid::Float32(a), Grid::Float32(b)) = (&once, &g) else {
            panic!("kind changed");
        };
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.is_nan(), y.is_nan());
            if !x.is_nan() {
                assert_eq!(x, y);
            }
        }
    }

    #[test]
    fn untouched_without_matches() {
        let mut g: Grid = array![[1.0f32, 2.0]].into();
        let before = g.clone();
        apply_nodata(&mut g, Some(-9999.0));
        assert_eq!(g, before);
    }
}
