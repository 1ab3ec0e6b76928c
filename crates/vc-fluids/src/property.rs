//! Thermodynamic property vocabulary.

use core::fmt;

/// Properties that can be requested from (or passed to) a provider.
///
/// Codes follow the CoolProp single-letter convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Pressure [Pa]
    Pressure,
    /// Temperature [K]
    Temperature,
    /// Specific enthalpy [J/kg]
    Enthalpy,
    /// Specific entropy [J/(kg K)]
    Entropy,
    /// Mass density [kg/m3]
    Density,
    /// Vapour quality [-], defined only inside the two-phase dome
    Quality,
    /// Isobaric specific heat capacity [J/(kg K)]; output only
    Cp,
}

impl Property {
    pub fn code(&self) -> &'static str {
        match self {
            Property::Pressure => "P",
            Property::Temperature => "T",
            Property::Enthalpy => "H",
            Property::Entropy => "S",
            Property::Density => "D",
            Property::Quality => "Q",
            Property::Cp => "C",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Property::Pressure => "Pa",
            Property::Temperature => "K",
            Property::Enthalpy => "J/kg",
            Property::Entropy => "J/(kg K)",
            Property::Density => "kg/m3",
            Property::Quality => "-",
            Property::Cp => "J/(kg K)",
        }
    }

    /// Whether the property can be one of the two independent inputs.
    pub fn is_input(&self) -> bool {
        !matches!(self, Property::Cp)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Property {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "P" | "PRESSURE" => Ok(Property::Pressure),
            "T" | "TEMPERATURE" => Ok(Property::Temperature),
            "H" | "ENTHALPY" => Ok(Property::Enthalpy),
            "S" | "ENTROPY" => Ok(Property::Entropy),
            "D" | "DENSITY" | "RHO" => Ok(Property::Density),
            "Q" | "QUALITY" => Ok(Property::Quality),
            "C" | "CP" => Ok(Property::Cp),
            _ => Err("unknown property code"),
        }
    }
}
