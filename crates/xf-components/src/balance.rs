//! Exergy balance results and options shared by all component models.

use xf_core::Real;

/// Analysis switches handed to every balance call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceOptions {
    /// Physical exergy is split into thermal and mechanical parts.
    pub split_physical_exergy: bool,
    /// Chemical exergy is accounted for in cost equations.
    pub chemical_exergy_enabled: bool,
}

/// Fuel, product and destruction of one component (W).
///
/// `e_d == e_f - e_p` holds by construction: destruction is never set on its
/// own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExergyBalance {
    e_f: Real,
    e_p: Real,
    e_d: Real,
    epsilon: Option<Real>,
}

impl ExergyBalance {
    /// Balance with a real product; efficiency is `e_p / e_f` when `e_f > 0`.
    pub fn from_fuel_product(e_f: Real, e_p: Real) -> Self {
        Self {
            e_f,
            e_p,
            e_d: e_f - e_p,
            epsilon: efficiency(e_f, e_p),
        }
    }

    /// Dissipative unit: all fuel is destroyed, no product, no efficiency.
    pub fn dissipative(e_d: Real) -> Self {
        Self {
            e_f: e_d,
            e_p: 0.0,
            e_d,
            epsilon: None,
        }
    }

    /// Fuel exergy flow `E_F`.
    pub fn e_f(&self) -> Real {
        self.e_f
    }

    /// Product exergy flow `E_P`.
    pub fn e_p(&self) -> Real {
        self.e_p
    }

    /// Exergy destruction `E_D`.
    pub fn e_d(&self) -> Real {
        self.e_d
    }

    /// Exergetic efficiency, undefined for dissipative units or `E_F <= 0`.
    pub fn epsilon(&self) -> Option<Real> {
        self.epsilon
    }
}

/// `e_p / e_f`, undefined when `e_f <= 0`.
pub fn efficiency(e_f: Real, e_p: Real) -> Option<Real> {
    if e_f > 0.0 && e_p.is_finite() {
        Some(e_p / e_f)
    } else {
        None
    }
}
