//! Finite difference Jacobian computation.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::error::{SolverError, SolverResult};

/// One Jacobian column by forward difference, falling back to a backward
/// difference when the forward point cannot be evaluated.
fn column<F>(x: &DVector<f64>, f_x: &DVector<f64>, f: &F, j: usize, epsilon: f64) -> SolverResult<DVector<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let dx = epsilon * x[j].abs().max(1.0);

    let mut x_plus = x.clone();
    x_plus[j] += dx;
    if let Ok(f_plus) = f(&x_plus) {
        return Ok((f_plus - f_x) / dx);
    }

    let mut x_minus = x.clone();
    x_minus[j] -= dx;
    match f(&x_minus) {
        Ok(f_minus) => Ok((f_x - f_minus) / dx),
        Err(SolverError::InvalidState { what }) => Err(SolverError::invalid_state(format!(
            "Jacobian column {j} not evaluable in either direction: {what}"
        ))),
        Err(e) => Err(e),
    }
}

/// Compute the Jacobian of `f` at `x`, given `f_x = f(x)`.
///
/// With `parallel` set, columns are evaluated on the rayon pool. Each column
/// depends only on `x`, so both paths give identical matrices.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    f: F,
    epsilon: f64,
    parallel: bool,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>> + Sync,
{
    let n = x.len();
    let m = f_x.len();

    let columns: Vec<DVector<f64>> = if parallel {
        (0..n)
            .into_par_iter()
            .map(|j| column(x, f_x, &f, j, epsilon))
            .collect::<SolverResult<_>>()?
    } else {
        (0..n)
            .map(|j| column(x, f_x, &f, j, epsilon))
            .collect::<SolverResult<_>>()?
    };

    let mut jac = DMatrix::zeros(m, n);
    for (j, col) in columns.iter().enumerate() {
        jac.set_column(j, col);
    }
    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic(x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        Ok(DVector::from_vec(vec![x[0] * x[0], x[0] * x[1], 3.0 * x[1]]))
    }

    #[test]
    fn jacobian_quadratic() {
        let x = DVector::from_vec(vec![3.0, 2.0]);
        let f_x = quadratic(&x).unwrap();
        let jac = finite_difference_jacobian(&x, &f_x, quadratic, 1e-7, false).unwrap();

        assert_eq!(jac.shape(), (3, 2));
        assert!((jac[(0, 0)] - 6.0).abs() < 1e-5);
        assert!((jac[(1, 0)] - 2.0).abs() < 1e-5);
        assert!((jac[(1, 1)] - 3.0).abs() < 1e-5);
        assert!(jac[(0, 1)].abs() < 1e-12);
    }

    #[test]
    fn parallel_matches_sequential() {
        let x = DVector::from_vec(vec![1.5, -0.5]);
        let f_x = quadratic(&x).unwrap();
        let seq = finite_difference_jacobian(&x, &f_x, quadratic, 1e-7, false).unwrap();
        let par = finite_difference_jacobian(&x, &f_x, quadratic, 1e-7, true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn falls_back_to_backward_difference() {
        // Undefined for x > 1: the forward point at x = 1 fails.
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] > 1.0 {
                Err(SolverError::InvalidState { what: "x > 1".into() })
            } else {
                Ok(DVector::from_element(1, 2.0 * x[0]))
            }
        };
        let x = DVector::from_element(1, 1.0);
        let f_x = f(&x).unwrap();
        let jac = finite_difference_jacobian(&x, &f_x, f, 1e-7, false).unwrap();
        assert!((jac[(0, 0)] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn unevaluable_column_keeps_error_kind() {
        // Defined only at x = 1 exactly.
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] == 1.0 {
                Ok(DVector::from_element(1, 0.0))
            } else {
                Err(SolverError::InvalidState { what: "off grid".into() })
            }
        };
        let x = DVector::from_element(1, 1.0);
        let f_x = f(&x).unwrap();
        let err = finite_difference_jacobian(&x, &f_x, f, 1e-7, false).unwrap_err();
        assert!(err.is_invalid_state());
        assert!(err.to_string().contains("column 0"));
    }
}
