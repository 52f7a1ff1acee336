// xf-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

use crate::{Real, XfResult, ensure_finite};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

/// Dead-state reference for exergy: ambient temperature `T0` and pressure `p0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ambient {
    t0: Temperature,
    p0: Pressure,
}

impl Ambient {
    /// Build an ambient state, rejecting non-finite or non-positive values.
    pub fn new(t0: Temperature, p0: Pressure) -> XfResult<Self> {
        use uom::si::{pressure::pascal, thermodynamic_temperature::kelvin};

        let t = ensure_finite(t0.get::<kelvin>(), "ambient temperature")?;
        let p = ensure_finite(p0.get::<pascal>(), "ambient pressure")?;
        if t <= 0.0 {
            return Err(crate::XfError::InvalidArg {
                what: "ambient temperature must be positive",
            });
        }
        if p <= 0.0 {
            return Err(crate::XfError::InvalidArg {
                what: "ambient pressure must be positive",
            });
        }
        Ok(Self { t0, p0 })
    }

    /// Shorthand for `Ambient::new(k(t0_k), pa(p0_pa))`.
    pub fn from_si(t0_k: Real, p0_pa: Real) -> XfResult<Self> {
        Self::new(k(t0_k), pa(p0_pa))
    }

    pub fn t0(&self) -> Temperature {
        self.t0
    }

    pub fn p0(&self) -> Pressure {
        self.p0
    }

    /// Ambient temperature in kelvin.
    pub fn t0_k(&self) -> Real {
        use uom::si::thermodynamic_temperature::kelvin;
        self.t0.get::<kelvin>()
    }

    /// Ambient pressure in pascal.
    pub fn p0_pa(&self) -> Real {
        use uom::si::pressure::pascal;
        self.p0.get::<pascal>()
    }
}
