//! Working fluids known to the engine.

use core::fmt;
use rfluids::prelude::Pure;

/// Refrigerants and secondary media used in vapour-compression cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Fluid {
    /// Propane
    R290,
    /// Isobutane
    R600a,
    /// Propylene
    R1270,
    /// 1,1,1,2-Tetrafluoroethane
    R134a,
    /// Difluoromethane
    R32,
    /// 2,3,3,3-Tetrafluoropropene
    R1234yf,
    /// Carbon dioxide
    R744,
    /// Ammonia
    R717,
    /// Air (pseudo-pure backend fluid)
    Air,
    /// Water
    Water,
}

impl Fluid {
    pub const ALL: [Fluid; 10] = [
        Fluid::R290,
        Fluid::R600a,
        Fluid::R1270,
        Fluid::R134a,
        Fluid::R32,
        Fluid::R1234yf,
        Fluid::R744,
        Fluid::R717,
        Fluid::Air,
        Fluid::Water,
    ];

    /// Canonical key used in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            Fluid::R290 => "R290",
            Fluid::R600a => "R600a",
            Fluid::R1270 => "R1270",
            Fluid::R134a => "R134a",
            Fluid::R32 => "R32",
            Fluid::R1234yf => "R1234yf",
            Fluid::R744 => "R744",
            Fluid::R717 => "R717",
            Fluid::Air => "Air",
            Fluid::Water => "Water",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Fluid::R290 => "Propane (R290)",
            Fluid::R600a => "Isobutane (R600a)",
            Fluid::R1270 => "Propylene (R1270)",
            Fluid::R134a => "R134a",
            Fluid::R32 => "R32",
            Fluid::R1234yf => "R1234yf",
            Fluid::R744 => "Carbon dioxide (R744)",
            Fluid::R717 => "Ammonia (R717)",
            Fluid::Air => "Air",
            Fluid::Water => "Water",
        }
    }

    /// CoolProp pure-fluid handle.
    pub fn rfluids_pure(&self) -> Pure {
        match self {
            Fluid::R290 => Pure::nPropane,
            Fluid::R600a => Pure::Isobutane,
            Fluid::R1270 => Pure::Propylene,
            Fluid::R134a => Pure::R134a,
            Fluid::R32 => Pure::R32,
            Fluid::R1234yf => Pure::R1234yf,
            Fluid::R744 => Pure::CarbonDioxide,
            Fluid::R717 => Pure::Ammonia,
            Fluid::Air => Pure::Air,
            Fluid::Water => Pure::Water,
        }
    }

    /// Molar mass in kg/kmol.
    pub fn molar_mass(&self) -> f64 {
        match self {
            Fluid::R290 => 44.097,
            Fluid::R600a => 58.124,
            Fluid::R1270 => 42.081,
            Fluid::R134a => 102.031,
            Fluid::R32 => 52.024,
            Fluid::R1234yf => 114.042,
            Fluid::R744 => 44.010,
            Fluid::R717 => 17.031,
            Fluid::Air => 28.965,
            Fluid::Water => 18.015,
        }
    }

    /// True for media that are used as refrigerants (two-phase working fluids).
    pub fn is_refrigerant(&self) -> bool {
        !matches!(self, Fluid::Air | Fluid::Water)
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Fluid {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "R290" | "PROPANE" | "NPROPANE" => Ok(Fluid::R290),
            "R600A" | "ISOBUTANE" => Ok(Fluid::R600a),
            "R1270" | "PROPYLENE" => Ok(Fluid::R1270),
            "R134A" => Ok(Fluid::R134a),
            "R32" => Ok(Fluid::R32),
            "R1234YF" => Ok(Fluid::R1234yf),
            "R744" | "CO2" | "CARBONDIOXIDE" => Ok(Fluid::R744),
            "R717" | "NH3" | "AMMONIA" => Ok(Fluid::R717),
            "AIR" => Ok(Fluid::Air),
            "WATER" | "H2O" => Ok(Fluid::Water),
            _ => Err("unknown fluid"),
        }
    }
}
