//! Compressor model.

use vc_core::units::{AngularVelocity, TempInterval, Temperature, Volume, ZERO_CELSIUS_K};
use vc_core::{delta_k, k, m3, revolutions_per_second, rpm};
use vc_fluids::PropertyProvider;
use vc_graph::PortName;

use crate::common::{check_fraction, check_positive, is_non_negative};
use crate::error::{ComponentError, ComponentResult};
use crate::eval::{Equation, Evaluation, Performance, PortStates, StateVar, Target};
use crate::traits::CycleComponent;

const PORTS: &[PortName] = &[PortName::InletA, PortName::OutletA];

/// Volumetric-efficiency / isentropic-efficiency map.
///
/// ```text
/// eta_vol = 1 - c * (pr^(1/n) - 1)
/// mdot    = eta_vol * rho_suction * V * rev/s
/// h2      = h1 + (h2s - h1) / eta_is
/// Pel     = mdot * (h2 - h1) / eta_motor
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VolumetricMap {
    /// Swept volume per revolution.
    pub displacement: Volume,
    /// Clearance volume over swept volume.
    pub clearance: f64,
    /// Polytropic exponent of the re-expansion.
    pub polytropic_exponent: f64,
    pub isentropic_efficiency: f64,
    pub motor_efficiency: f64,
    pub speed_range: (AngularVelocity, AngularVelocity),
    pub max_pressure_ratio: f64,
}

impl Default for VolumetricMap {
    /// Small hermetic reciprocating compressor, roughly 20 cm3 per revolution.
    fn default() -> Self {
        Self {
            displacement: m3(2.0e-5),
            clearance: 0.04,
            polytropic_exponent: 1.13,
            isentropic_efficiency: 0.65,
            motor_efficiency: 0.9,
            speed_range: (rpm(1200.0), rpm(7200.0)),
            max_pressure_ratio: 15.0,
        }
    }
}

/// Ten AHRI-540 coefficients, evaluated in dew temperatures [degC]:
///
/// ```text
/// X = C1 + C2 Te + C3 Tc + C4 Te^2 + C5 Te Tc + C6 Tc^2
///     + C7 Te^3 + C8 Tc Te^2 + C9 Te Tc^2 + C10 Tc^3
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolynomialCoefficients(pub [f64; 10]);

impl PolynomialCoefficients {
    pub fn eval(&self, te: f64, tc: f64) -> f64 {
        let c = &self.0;
        c[0] + c[1] * te
            + c[2] * tc
            + c[3] * te * te
            + c[4] * te * tc
            + c[5] * tc * tc
            + c[6] * te * te * te
            + c[7] * tc * te * te
            + c[8] * te * tc * tc
            + c[9] * tc * tc * tc
    }
}

/// Manufacturer polynomial map at a rated speed and suction superheat.
#[derive(Clone, Debug, PartialEq)]
pub struct Ahri540Map {
    /// Mass flow polynomial [kg/h].
    pub mass_flow: PolynomialCoefficients,
    /// Electrical power polynomial [W].
    pub power: PolynomialCoefficients,
    pub rated_speed: AngularVelocity,
    pub rated_superheat: TempInterval,
    /// Share of electrical power lost to ambient instead of the gas.
    pub heat_loss_fraction: f64,
    pub speed_range: (AngularVelocity, AngularVelocity),
    /// Allowed evaporating dew temperatures.
    pub evaporating_range: (Temperature, Temperature),
    /// Allowed condensing dew temperatures.
    pub condensing_range: (Temperature, Temperature),
}

impl Ahri540Map {
    /// Map with a fixed rated superheat of 10 K and an envelope typical of
    /// low-temperature hermetic compressors.
    pub fn new(mass_flow: PolynomialCoefficients, power: PolynomialCoefficients, rated_speed: AngularVelocity) -> Self {
        Self {
            mass_flow,
            power,
            rated_speed,
            rated_superheat: delta_k(10.0),
            heat_loss_fraction: 0.0,
            speed_range: (rated_speed * 0.3, rated_speed * 1.5),
            evaporating_range: (k(ZERO_CELSIUS_K - 45.0), k(ZERO_CELSIUS_K + 15.0)),
            condensing_range: (k(ZERO_CELSIUS_K + 15.0), k(ZERO_CELSIUS_K + 70.0)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CompressorMap {
    Volumetric(VolumetricMap),
    Ahri540(Ahri540Map),
}

impl CompressorMap {
    fn speed_range(&self) -> (AngularVelocity, AngularVelocity) {
        match self {
            CompressorMap::Volumetric(m) => m.speed_range,
            CompressorMap::Ahri540(m) => m.speed_range,
        }
    }
}

/// Variable-speed compressor between `inlet_A` (suction) and `outlet_A` (discharge).
///
/// The discharge pressure is read from the outlet junction; the compressor
/// fixes the suction mass flow, continuity, and the discharge enthalpy.
#[derive(Clone, Debug, PartialEq)]
pub struct Compressor {
    pub speed: AngularVelocity,
    pub map: CompressorMap,
}

/// Map output at one operating point.
struct MapPoint {
    mdot: f64,
    h_out: f64,
    power: f64,
}

impl Compressor {
    pub fn new(speed: AngularVelocity, map: CompressorMap) -> Self {
        Self { speed, map }
    }

    fn volumetric(
        &self,
        map: &VolumetricMap,
        props: &dyn PropertyProvider,
        fluid: vc_fluids::Fluid,
        (p1, h1, p2): (f64, f64, f64),
    ) -> ComponentResult<MapPoint> {
        let pr = p2 / p1;
        let eta_vol = 1.0 - map.clearance * (pr.powf(1.0 / map.polytropic_exponent) - 1.0);
        if eta_vol <= 0.0 {
            return Err(ComponentError::invalid_state(format!(
                "volumetric efficiency {eta_vol:.3} at pressure ratio {pr:.2}"
            )));
        }
        let rho1 = props.density_ph(fluid, p1, h1)?;
        let s1 = props.entropy_ph(fluid, p1, h1)?;
        let h2s = props.enthalpy_ps(fluid, p2, s1)?;

        let mdot = eta_vol * rho1 * map.displacement.value * revolutions_per_second(self.speed);
        let h_out = h1 + (h2s - h1) / map.isentropic_efficiency;
        let power = mdot * (h_out - h1) / map.motor_efficiency;
        Ok(MapPoint { mdot, h_out, power })
    }

    fn ahri540(
        &self,
        map: &Ahri540Map,
        props: &dyn PropertyProvider,
        fluid: vc_fluids::Fluid,
        (p1, h1, p2): (f64, f64, f64),
    ) -> ComponentResult<MapPoint> {
        let t_evap = props.saturation_temperature(fluid, p1)?;
        let t_cond = props.saturation_temperature(fluid, p2)?;
        let in_range = |t: f64, (lo, hi): (Temperature, Temperature)| t >= lo.value && t <= hi.value;
        if !in_range(t_evap, map.evaporating_range) || !in_range(t_cond, map.condensing_range) {
            return Err(ComponentError::invalid_state(format!(
                "operating point Te = {:.1} K, Tc = {:.1} K outside the map envelope",
                t_evap, t_cond
            )));
        }
        let te = t_evap - ZERO_CELSIUS_K;
        let tc = t_cond - ZERO_CELSIUS_K;
        let speed_ratio = self.speed.value / map.rated_speed.value;

        let rho_rated = props.density_pt(fluid, p1, t_evap + map.rated_superheat.value)?;
        let rho_actual = props.density_ph(fluid, p1, h1)?;

        let mdot = map.mass_flow.eval(te, tc) / 3600.0 * speed_ratio * rho_actual / rho_rated;
        let power = map.power.eval(te, tc) * speed_ratio;
        if mdot <= 0.0 || power <= 0.0 {
            return Err(ComponentError::invalid_state(
                "compressor map yields non-positive mass flow or power",
            ));
        }
        let h_out = h1 + power * (1.0 - map.heat_loss_fraction) / mdot;
        Ok(MapPoint { mdot, h_out, power })
    }
}

impl CycleComponent for Compressor {
    fn ports(&self) -> &'static [PortName] {
        PORTS
    }

    fn equations(&self) -> Vec<Equation> {
        vec![
            Equation::Target {
                port: PortName::InletA,
                var: StateVar::MassFlow,
            },
            Equation::Target {
                port: PortName::OutletA,
                var: StateVar::MassFlow,
            },
            Equation::Target {
                port: PortName::OutletA,
                var: StateVar::Enthalpy,
            },
        ]
    }

    fn validate(&self) -> ComponentResult<()> {
        let (lo, hi) = self.map.speed_range();
        check_positive(lo.value, "minimum compressor speed")?;
        if lo > hi {
            return Err(ComponentError::invalid_param("compressor speed range is reversed"));
        }
        match &self.map {
            CompressorMap::Volumetric(m) => {
                check_positive(m.displacement.value, "displacement")?;
                check_positive(m.polytropic_exponent, "polytropic exponent")?;
                check_fraction(m.isentropic_efficiency, "isentropic efficiency")?;
                check_fraction(m.motor_efficiency, "motor efficiency")?;
                if !(is_non_negative(m.clearance) && m.clearance < 1.0) {
                    return Err(ComponentError::invalid_param("clearance ratio must be in [0, 1)"));
                }
                if !m.max_pressure_ratio.is_finite() || m.max_pressure_ratio <= 1.0 {
                    return Err(ComponentError::invalid_param("maximum pressure ratio must exceed 1"));
                }
            }
            CompressorMap::Ahri540(m) => {
                check_positive(m.rated_speed.value, "rated speed")?;
                if !(is_non_negative(m.heat_loss_fraction) && m.heat_loss_fraction < 1.0) {
                    return Err(ComponentError::invalid_param("heat loss fraction must be in [0, 1)"));
                }
                if !is_non_negative(m.rated_superheat.value) {
                    return Err(ComponentError::invalid_param("rated superheat cannot be negative"));
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, props: &dyn PropertyProvider, ports: &PortStates) -> ComponentResult<Evaluation> {
        let inlet = ports.get(PortName::InletA)?;
        let outlet = ports.get(PortName::OutletA)?;
        let fluid = inlet.fluid;
        let (p1, h1, p2) = (inlet.p, inlet.h, outlet.p);

        let (lo, hi) = self.map.speed_range();
        if self.speed < lo || self.speed > hi {
            return Err(ComponentError::invalid_state(format!(
                "speed {:.1} rev/s outside the map range",
                revolutions_per_second(self.speed)
            )));
        }
        let h_dew = props.dew_enthalpy(fluid, p1)?;
        if h1 < h_dew {
            return Err(ComponentError::invalid_state(format!(
                "wet suction: h = {h1:.0} J/kg below dew enthalpy {h_dew:.0} J/kg"
            )));
        }
        let pr = p2 / p1;
        let max_pr = match &self.map {
            CompressorMap::Volumetric(m) => m.max_pressure_ratio,
            CompressorMap::Ahri540(_) => f64::INFINITY,
        };
        if !(1.0..=max_pr).contains(&pr) {
            return Err(ComponentError::invalid_state(format!(
                "pressure ratio {pr:.3} outside [1, {max_pr}]"
            )));
        }

        let point = match &self.map {
            CompressorMap::Volumetric(m) => self.volumetric(m, props, fluid, (p1, h1, p2))?,
            CompressorMap::Ahri540(m) => self.ahri540(m, props, fluid, (p1, h1, p2))?,
        };
        let t_out = props.temperature_ph(fluid, p2, point.h_out)?;

        Ok(Evaluation {
            targets: vec![
                Target::new(PortName::InletA, StateVar::MassFlow, point.mdot),
                Target::new(PortName::OutletA, StateVar::MassFlow, inlet.mdot),
                Target::new(PortName::OutletA, StateVar::Enthalpy, point.h_out),
            ],
            closures: Vec::new(),
            performance: Performance {
                power: Some(point.power),
                mdot: Some(point.mdot),
                outlet_temperature: Some(t_out),
                pressure_ratio: Some(pr),
                ..Performance::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_term_order() {
        let mut c = [0.0; 10];
        c[0] = 1.0;
        c[4] = 2.0; // Te * Tc
        c[7] = 3.0; // Tc * Te^2
        let p = PolynomialCoefficients(c);
        assert_eq!(p.eval(-20.0, 40.0), 1.0 + 2.0 * -800.0 + 3.0 * 40.0 * 400.0);
    }

    #[test]
    fn default_map_validates() {
        let cpr = Compressor::new(rpm(3000.0), CompressorMap::Volumetric(VolumetricMap::default()));
        assert!(cpr.validate().is_ok());
        assert_eq!(cpr.equations().len(), 3);
    }

    #[test]
    fn bad_efficiency_is_rejected() {
        let map = VolumetricMap {
            isentropic_efficiency: 1.2,
            ..VolumetricMap::default()
        };
        let err = Compressor::new(rpm(3000.0), CompressorMap::Volumetric(map))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("isentropic"));
    }

    #[test]
    fn ahri_defaults_are_consistent() {
        let map = Ahri540Map::new(
            PolynomialCoefficients([1.0; 10]),
            PolynomialCoefficients([1.0; 10]),
            rpm(3000.0),
        );
        assert!((map.speed_range.0.value - rpm(900.0).value).abs() < 1e-9);
        assert!(Compressor::new(rpm(3000.0), CompressorMap::Ahri540(map)).validate().is_ok());
    }
}
