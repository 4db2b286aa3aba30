use ndarray::{Array2, ShapeError};
use rayon::prelude::*;

/// Create a meshgrid of x and y coordinates
///
/// # Arguments
///
/// * `rows` - The number of rows indicating the height of the grid
/// * `cols` - The number of columns indicating the width of the grid
///
/// # Returns
///
/// A tuple of 2D arrays of shape (rows, cols) containing the x and y coordinates
pub fn meshgrid(rows: usize, cols: usize) -> Result<(Array2<f64>, Array2<f64>), ShapeError> {
    meshgrid_from_fn(cols, rows, |x, y| Ok((x as f64, y as f64)))
}

/// Create a meshgrid whose values are computed from the pixel coordinates.
///
/// The function is evaluated once per grid cell, in parallel over rows.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps a column and row index to the `(x, y)` values stored in the grid
///
/// # Returns
///
/// A tuple of 2D arrays of shape (rows, cols) with the x and y values.
pub fn meshgrid_from_fn<E>(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> Result<(f64, f64), E> + Send + Sync,
) -> Result<(Array2<f64>, Array2<f64>), E>
where
    E: From<ShapeError> + Send,
{
    let mut map_x = vec![0.0; rows * cols];
    let mut map_y = vec![0.0; rows * cols];

    if cols > 0 {
        map_x
            .par_chunks_exact_mut(cols)
            .zip(map_y.par_chunks_exact_mut(cols))
            .enumerate()
            .try_for_each(|(r, (row_x, row_y))| {
                for (c, (x, y)) in row_x.iter_mut().zip(row_y.iter_mut()).enumerate() {
                    (*x, *y) = f(c, r)?;
                }
                Ok::<(), E>(())
            })?;
    }

    let map_x = Array2::from_shape_vec((rows, cols), map_x)?;
    let map_y = Array2::from_shape_vec((rows, cols), map_y)?;

    Ok((map_x, map_y))
}
