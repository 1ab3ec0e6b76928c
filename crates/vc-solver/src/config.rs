//! Solver and system configuration.

/// Newton iteration settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// Under-relaxation factor applied to every Newton step, in (0, 1].
    pub relaxation: f64,
    /// Largest change of any scaled unknown per iteration, relative to
    /// `max(|z|, 1)`.
    pub max_step: f64,
    /// Backtracking factor of the line search.
    pub line_search_beta: f64,
    pub max_line_search_iters: usize,
    /// Relative finite-difference perturbation.
    pub fd_epsilon: f64,
    /// Evaluate Jacobian columns in parallel.
    pub parallel_jacobian: bool,
    /// Trial points with any pressure at or below this are rejected [Pa].
    pub min_pressure: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            relaxation: 1.0,
            max_step: 0.5,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
            fd_epsilon: 1e-6,
            parallel_jacobian: false,
            min_pressure: 1.0,
        }
    }
}

/// Immutable configuration handed to `SystemBuilder`.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemConfig {
    pub id: String,
    /// Convergence threshold on the largest scaled residual.
    pub tolerance: f64,
    pub solver: SolverConfig,
}

impl SystemConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        let s = &self.solver;
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(format!("tolerance must be positive, got {}", self.tolerance));
        }
        if s.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(s.relaxation > 0.0 && s.relaxation <= 1.0) {
            return Err(format!("relaxation must be in (0, 1], got {}", s.relaxation));
        }
        if !(s.max_step.is_finite() && s.max_step > 0.0) {
            return Err(format!("max_step must be positive, got {}", s.max_step));
        }
        if !(s.line_search_beta > 0.0 && s.line_search_beta < 1.0) {
            return Err(format!("line_search_beta must be in (0, 1), got {}", s.line_search_beta));
        }
        if !(s.fd_epsilon > 0.0 && s.fd_epsilon < 1e-2) {
            return Err(format!("fd_epsilon must be in (0, 1e-2), got {}", s.fd_epsilon));
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            id: "system".into(),
            tolerance: 1e-6,
            solver: SolverConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_checks() {
        assert!(SystemConfig::new("freezer").check().is_ok());
    }

    #[test]
    fn bad_relaxation_is_reported() {
        let mut cfg = SystemConfig::default();
        cfg.solver.relaxation = 0.0;
        assert!(cfg.check().unwrap_err().contains("relaxation"));
    }
}
