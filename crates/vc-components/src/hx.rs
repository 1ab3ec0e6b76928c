//! Counter-flow effectiveness-NTU relations and zone sizing.

/// Effectiveness above which the inverse relation is continued linearly.
pub const EFFECTIVENESS_CAP: f64 = 0.999;

/// Temperature differences below this are smoothly floored [K].
pub const MIN_TEMPERATURE_DIFFERENCE: f64 = 0.5;

/// Smallest refrigerant-to-air approach kept by the limit-temperature mode [K].
pub const LIMIT_APPROACH: f64 = 0.1;

/// Capacity ratios closer to 1 than this use the balanced-flow formulas.
const BALANCED_EPS: f64 = 1e-9;

/// Counter-flow effectiveness for `ntu` and capacity ratio `cr` in [0, 1].
pub fn effectiveness_counterflow(ntu: f64, cr: f64) -> f64 {
    if ntu <= 0.0 {
        return 0.0;
    }
    if (1.0 - cr).abs() < BALANCED_EPS {
        return ntu / (1.0 + ntu);
    }
    let e = (-ntu * (1.0 - cr)).exp();
    (1.0 - e) / (1.0 - cr * e)
}

/// Inverse of [`effectiveness_counterflow`] for `eps` in [0, 1).
pub fn ntu_counterflow(eps: f64, cr: f64) -> f64 {
    if eps <= 0.0 {
        return 0.0;
    }
    if cr <= 0.0 {
        return -(1.0 - eps).ln();
    }
    if (1.0 - cr).abs() < BALANCED_EPS {
        return eps / (1.0 - eps);
    }
    ((1.0 - eps * cr) / (1.0 - eps)).ln() / (1.0 - cr)
}

/// NTU for any non-negative effectiveness.
///
/// Exact up to [`EFFECTIVENESS_CAP`], then continued with the slope at the cap
/// so required areas keep growing monotonically for infeasible duties.
pub fn ntu_counterflow_extended(eps: f64, cr: f64) -> f64 {
    if eps <= EFFECTIVENESS_CAP {
        return ntu_counterflow(eps, cr);
    }
    let slope = 1.0 / ((1.0 - EFFECTIVENESS_CAP) * (1.0 - EFFECTIVENESS_CAP * cr));
    ntu_counterflow(EFFECTIVENESS_CAP, cr) + (eps - EFFECTIVENESS_CAP) * slope
}

/// Smooth lower bound on a temperature difference.
///
/// Identity above `floor`; below it decays exponentially towards zero, with a
/// continuous first derivative at `floor`.
pub fn soft_floor(dt: f64, floor: f64) -> f64 {
    if dt >= floor {
        dt
    } else {
        floor * (dt / floor - 1.0).exp()
    }
}

/// Capacity rate of a stream that changes temperature by `dt` while
/// exchanging `q`. Isothermal (two-phase) streams have infinite capacity.
pub fn capacity_rate(q: f64, dt: f64) -> f64 {
    if dt.abs() < 1e-9 {
        f64::INFINITY
    } else {
        (q / dt).abs()
    }
}

/// One zone of a zoned heat exchanger.
#[derive(Debug, Clone, Copy)]
pub struct Zone {
    /// Duty of the zone [W], non-negative.
    pub duty: f64,
    /// Heat transfer coefficient [W/(m2 K)].
    pub k: f64,
    /// Refrigerant capacity rate [W/K]; infinite while two-phase.
    pub c_ref: f64,
    /// Secondary (air) capacity rate [W/K].
    pub c_air: f64,
    /// Hot-inlet minus cold-inlet temperature of the zone [K].
    pub dt_max: f64,
}

impl Zone {
    /// Area needed to transfer `duty` in counter-flow [m2].
    pub fn required_area(&self) -> f64 {
        if self.duty <= 0.0 {
            return 0.0;
        }
        let c_min = self.c_ref.min(self.c_air);
        let c_max = self.c_ref.max(self.c_air);
        let cr = if c_max.is_finite() { c_min / c_max } else { 0.0 };
        let eps = self.duty / (c_min * soft_floor(self.dt_max, MIN_TEMPERATURE_DIFFERENCE));
        ntu_counterflow_extended(eps, cr) * c_min / self.k
    }
}

/// Duty carried by the part of `[h_lo, h_hi]` that overlaps `[lo, hi]`.
pub(crate) fn overlap(h_lo: f64, h_hi: f64, lo: f64, hi: f64) -> f64 {
    (h_hi.min(hi) - h_lo.max(lo)).max(0.0)
}

/// Logarithmic area closure `ln(sum(required) / area)`.
pub fn area_closure(required: &[f64], area: f64) -> f64 {
    let total: f64 = required.iter().sum();
    (total.max(1e-12) / area).ln()
}
