//! Internal (suction-line) heat exchanger.

use vc_core::units::Conductance;
use vc_fluids::PropertyProvider;
use vc_graph::PortName;

use crate::common::{check_positive, is_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::eval::{Equation, Evaluation, Performance, PortStates, StateVar, Target};
use crate::hx::effectiveness_counterflow;
use crate::traits::CycleComponent;

const PORTS: &[PortName] = &[
    PortName::InletA,
    PortName::OutletA,
    PortName::InletB,
    PortName::OutletB,
];

/// Inlet temperature differences below this transfer no heat [K].
const MIN_DRIVING_DIFFERENCE: f64 = 1e-6;

/// Counter-flow UA coupling of two refrigerant streams.
///
/// Each side's capacity-limited duty is the duty that would bring it to the
/// other side's inlet temperature; effective capacity rates follow from
/// those duties, and the exchanged duty is `eps * min(Q_max)`.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalHeatExchanger {
    pub ua: Conductance,
    /// Leave the `outlet_A` pressure free so an expansion device can be lumped
    /// into the downstream junction.
    pub expansion_at_outlet_a: bool,
}

impl InternalHeatExchanger {
    pub fn new(ua: Conductance) -> Self {
        Self {
            ua,
            expansion_at_outlet_a: true,
        }
    }
}

impl CycleComponent for InternalHeatExchanger {
    fn ports(&self) -> &'static [PortName] {
        PORTS
    }

    fn equations(&self) -> Vec<Equation> {
        let mut eqs = Vec::with_capacity(6);
        for port in [PortName::OutletA, PortName::OutletB] {
            for var in [StateVar::MassFlow, StateVar::Pressure, StateVar::Enthalpy] {
                if port == PortName::OutletA && var == StateVar::Pressure && self.expansion_at_outlet_a {
                    continue;
                }
                eqs.push(Equation::Target { port, var });
            }
        }
        eqs
    }

    fn validate(&self) -> ComponentResult<()> {
        check_positive(self.ua.value, "IHX UA")
    }

    fn evaluate(&self, props: &dyn PropertyProvider, ports: &PortStates) -> ComponentResult<Evaluation> {
        let a = ports.get(PortName::InletA)?;
        let b = ports.get(PortName::InletB)?;
        if !is_positive(a.mdot) || !is_positive(b.mdot) {
            return Err(ComponentError::invalid_state("IHX mass flows must be positive"));
        }
        let t_a = props.temperature_ph(a.fluid, a.p, a.h)?;
        let t_b = props.temperature_ph(b.fluid, b.p, b.h)?;

        let a_is_hot = t_a >= t_b;
        let (hot, cold, t_hot, t_cold) = if a_is_hot {
            (a, b, t_a, t_b)
        } else {
            (b, a, t_b, t_a)
        };

        let dt_max = t_hot - t_cold;
        let (duty, eps) = if dt_max < MIN_DRIVING_DIFFERENCE {
            (0.0, 0.0)
        } else {
            let q_max_hot = hot.mdot * (hot.h - props.enthalpy_pt(hot.fluid, hot.p, t_cold)?);
            let q_max_cold = cold.mdot * (props.enthalpy_pt(cold.fluid, cold.p, t_hot)? - cold.h);
            let q_max = q_max_hot.min(q_max_cold).max(0.0);
            let c_min = q_max / dt_max;
            let c_max = q_max_hot.max(q_max_cold) / dt_max;
            if c_min <= 0.0 {
                (0.0, 0.0)
            } else {
                let ntu = self.ua.value / c_min;
                let eps = effectiveness_counterflow(ntu, c_min / c_max);
                (eps * q_max, eps)
            }
        };

        let h_hot_out = hot.h - duty / hot.mdot;
        let h_cold_out = cold.h + duty / cold.mdot;
        let (h_a_out, h_b_out) = if a_is_hot {
            (h_hot_out, h_cold_out)
        } else {
            (h_cold_out, h_hot_out)
        };

        let mut targets = Vec::with_capacity(6);
        targets.push(Target::new(PortName::OutletA, StateVar::MassFlow, a.mdot));
        if !self.expansion_at_outlet_a {
            targets.push(Target::new(PortName::OutletA, StateVar::Pressure, a.p));
        }
        targets.push(Target::new(PortName::OutletA, StateVar::Enthalpy, h_a_out));
        targets.push(Target::new(PortName::OutletB, StateVar::MassFlow, b.mdot));
        targets.push(Target::new(PortName::OutletB, StateVar::Pressure, b.p));
        targets.push(Target::new(PortName::OutletB, StateVar::Enthalpy, h_b_out));

        Ok(Evaluation {
            targets,
            closures: Vec::new(),
            performance: Performance {
                duty: Some(duty),
                effectiveness: Some(eps),
                ..Performance::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::w_per_k;

    #[test]
    fn expansion_removes_one_pressure_equation() {
        let mut ihx = InternalHeatExchanger::new(w_per_k(2.3));
        assert_eq!(ihx.equations().len(), 5);
        ihx.expansion_at_outlet_a = false;
        assert_eq!(ihx.equations().len(), 6);
        assert!(ihx.validate().is_ok());
    }
}
