//! Damped Newton / Gauss-Newton iteration with backtracking line search.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;

/// Armijo constant of the line search.
const SUFFICIENT_DECREASE: f64 = 1e-4;

/// Result of a Newton run that started from an evaluable point.
#[derive(Debug, Clone)]
pub struct NewtonOutcome {
    /// Last accepted iterate.
    pub x: DVector<f64>,
    pub iterations: usize,
    /// Largest absolute residual at `x`.
    pub max_residual: f64,
    /// Largest absolute residual after each iteration, starting with `x0`.
    pub history: Vec<f64>,
    pub converged: bool,
    /// The line search found no acceptable point.
    pub stalled: bool,
    /// Jacobian or step failure after `x` was accepted.
    pub failure: Option<SolverError>,
}

fn max_abs(v: &DVector<f64>) -> f64 {
    v.iter().fold(0.0, |m, x| m.max(x.abs()))
}

/// Solve `J dx = -r`: LU for square systems, SVD least squares otherwise or
/// when LU fails (singular or redundant rows).
fn newton_step(jac: DMatrix<f64>, r: &DVector<f64>) -> SolverResult<DVector<f64>> {
    let rhs = -r;
    if jac.is_square()
        && let Some(dx) = jac.clone().lu().solve(&rhs)
        && dx.iter().all(|v| v.is_finite())
    {
        return Ok(dx);
    }
    let svd = jac.svd(true, true);
    let cutoff = 1e-12 * svd.singular_values.max();
    let dx = svd
        .solve(&rhs, cutoff)
        .map_err(|e| SolverError::invalid_state(format!("least-squares step failed: {e}")))?;
    if dx.iter().all(|v| v.is_finite()) {
        Ok(dx)
    } else {
        Err(SolverError::invalid_state("Newton step is not finite"))
    }
}

/// Scale a step by the relaxation factor, then shrink it so that no
/// component changes by more than `max_step * max(|x_i|, 1)`.
fn limit_step(x: &DVector<f64>, mut dx: DVector<f64>, config: &SolverConfig) -> DVector<f64> {
    dx *= config.relaxation;
    let worst = dx
        .iter()
        .zip(x.iter())
        .fold(0.0f64, |m, (d, xi)| m.max(d.abs() / xi.abs().max(1.0)));
    if worst > config.max_step {
        dx *= config.max_step / worst;
    }
    dx
}

/// Drive `residual_fn` to zero starting from `x0`.
///
/// `admissible` rejects trial points before they are evaluated. Evaluation
/// errors at line-search trial points reject the trial; an error at `x0` is
/// returned to the caller. A Jacobian or step failure later on ends the run
/// with the last accepted iterate and the error in `failure`.
///
/// The iteration count includes the pass that evaluates `x0`, so a starting
/// point that already satisfies `tol` reports one iteration.
pub fn newton_solve<F, A>(
    x0: DVector<f64>,
    residual_fn: F,
    admissible: A,
    tol: f64,
    config: &SolverConfig,
) -> SolverResult<NewtonOutcome>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>> + Sync,
    A: Fn(&DVector<f64>) -> bool,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_max = max_abs(&r);
    let mut history = vec![r_max];

    if r_max <= tol {
        return Ok(NewtonOutcome {
            x,
            iterations: 1,
            max_residual: r_max,
            history,
            converged: true,
            stalled: false,
            failure: None,
        });
    }

    for iter in 1..=config.max_iterations {
        let step = finite_difference_jacobian(&x, &r, &residual_fn, config.fd_epsilon, config.parallel_jacobian)
            .and_then(|jac| newton_step(jac, &r));
        let dx = match step {
            Ok(dx) => limit_step(&x, dx, config),
            Err(e) => {
                warn!(iteration = iter, max_residual = r_max, error = %e, "no Newton step");
                return Ok(NewtonOutcome {
                    x,
                    iterations: iter,
                    max_residual: r_max,
                    history,
                    converged: false,
                    stalled: false,
                    failure: Some(e),
                });
            }
        };
        let r_norm = r.norm();

        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..config.max_line_search_iters {
            let x_trial = &x + alpha * &dx;
            if admissible(&x_trial) {
                match residual_fn(&x_trial) {
                    Ok(r_trial) => {
                        let sufficient = r_trial.norm() <= (1.0 - SUFFICIENT_DECREASE * alpha) * r_norm;
                        if sufficient || max_abs(&r_trial) <= tol {
                            accepted = Some((x_trial, r_trial));
                            break;
                        }
                    }
                    Err(e) => warn!(iteration = iter, alpha, error = %e, "rejected trial point"),
                }
            }
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new)) = accepted else {
            warn!(iteration = iter, max_residual = r_max, "line search stalled");
            return Ok(NewtonOutcome {
                x,
                iterations: iter,
                max_residual: r_max,
                history,
                converged: false,
                stalled: true,
                failure: None,
            });
        };

        x = x_new;
        r = r_new;
        r_max = max_abs(&r);
        history.push(r_max);
        debug!(iteration = iter, alpha, max_residual = r_max, "newton iteration");

        if r_max <= tol {
            return Ok(NewtonOutcome {
                x,
                iterations: iter,
                max_residual: r_max,
                history,
                converged: true,
                stalled: false,
                failure: None,
            });
        }
    }

    Ok(NewtonOutcome {
        x,
        iterations: config.max_iterations,
        max_residual: r_max,
        history,
        converged: false,
        stalled: false,
        failure: None,
    })
}
