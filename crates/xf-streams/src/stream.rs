//! Stream records and the defensive field accessor.

use std::fmt;
use xf_core::Real;

/// What a connection carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StreamKind {
    #[default]
    Material,
    Power,
    Heat,
}

impl StreamKind {
    pub fn is_material(self) -> bool {
        matches!(self, StreamKind::Material)
    }
}

/// Split of specific/absolute exergy and of cost rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExergyPart {
    /// Total physical exergy (thermal + mechanical).
    Physical,
    Thermal,
    Mechanical,
    Chemical,
}

impl ExergyPart {
    /// Suffix used in field labels (`e_PH`, `C_T`, ...).
    pub fn suffix(self) -> &'static str {
        match self {
            ExergyPart::Physical => "PH",
            ExergyPart::Thermal => "T",
            ExergyPart::Mechanical => "M",
            ExergyPart::Chemical => "CH",
        }
    }
}

impl fmt::Display for ExergyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E_{}", self.suffix())
    }
}

/// Every numeric field a stream record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Mass flow (kg/s).
    MassFlow,
    /// Specific exergy of a part (J/kg).
    Specific(ExergyPart),
    /// Absolute exergy flow of a part (W), when an upstream stage stored it.
    Absolute(ExergyPart),
    /// Cost rate of a part (currency/s).
    Cost(ExergyPart),
    /// Temperature (K).
    Temperature,
    /// Specific enthalpy (J/kg).
    Enthalpy,
    /// Direct energy flow of a power/heat connection (W).
    EnergyFlow,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::MassFlow => write!(f, "m"),
            Field::Specific(part) => write!(f, "e_{}", part.suffix()),
            Field::Absolute(part) => write!(f, "E_{}", part.suffix()),
            Field::Cost(part) => write!(f, "C_{}", part.suffix()),
            Field::Temperature => write!(f, "T"),
            Field::Enthalpy => write!(f, "h"),
            Field::EnergyFlow => write!(f, "energy_flow"),
        }
    }
}

/// Columns of a stream's cost-rate unknowns in the shared cost system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostColumns {
    pub thermal: usize,
    pub mechanical: usize,
    pub chemical: Option<usize>,
}

impl CostColumns {
    pub fn column(&self, part: ExergyPart) -> Option<usize> {
        match part {
            ExergyPart::Thermal => Some(self.thermal),
            ExergyPart::Mechanical => Some(self.mechanical),
            ExergyPart::Chemical => self.chemical,
            ExergyPart::Physical => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PartValues {
    physical: Option<Real>,
    thermal: Option<Real>,
    mechanical: Option<Real>,
    chemical: Option<Real>,
}

impl PartValues {
    fn get(&self, part: ExergyPart) -> Option<Real> {
        match part {
            ExergyPart::Physical => self.physical,
            ExergyPart::Thermal => self.thermal,
            ExergyPart::Mechanical => self.mechanical,
            ExergyPart::Chemical => self.chemical,
        }
    }

    fn slot(&mut self, part: ExergyPart) -> &mut Option<Real> {
        match part {
            ExergyPart::Physical => &mut self.physical,
            ExergyPart::Thermal => &mut self.thermal,
            ExergyPart::Mechanical => &mut self.mechanical,
            ExergyPart::Chemical => &mut self.chemical,
        }
    }
}

/// One material, power or heat connection attached to a component port.
///
/// Records are filled by the stream-resolution stage before any balance runs;
/// balance code only reads them. Any field may be absent. Read fields through
/// [`StreamRecord::get`], which also hides non-finite values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamRecord {
    pub kind: StreamKind,
    pub name: Option<String>,
    m: Option<Real>,
    specific: PartValues,
    absolute: PartValues,
    cost: PartValues,
    t: Option<Real>,
    h: Option<Real>,
    energy_flow: Option<Real>,
    cost_columns: Option<CostColumns>,
}

impl StreamRecord {
    /// Material stream with the given mass flow (kg/s).
    pub fn material(m: Real) -> Self {
        Self {
            kind: StreamKind::Material,
            m: Some(m),
            ..Self::default()
        }
    }

    /// Power connection carrying `energy_flow` watts.
    pub fn power(energy_flow: Real) -> Self {
        Self {
            kind: StreamKind::Power,
            energy_flow: Some(energy_flow),
            ..Self::default()
        }
    }

    /// Heat connection carrying `energy_flow` watts.
    pub fn heat(energy_flow: Real) -> Self {
        Self {
            kind: StreamKind::Heat,
            energy_flow: Some(energy_flow),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mass_flow(mut self, m: Real) -> Self {
        self.m = Some(m);
        self
    }

    pub fn with_specific(mut self, part: ExergyPart, value: Real) -> Self {
        *self.specific.slot(part) = Some(value);
        self
    }

    pub fn with_absolute(mut self, part: ExergyPart, value: Real) -> Self {
        *self.absolute.slot(part) = Some(value);
        self
    }

    pub fn with_cost(mut self, part: ExergyPart, value: Real) -> Self {
        *self.cost.slot(part) = Some(value);
        self
    }

    pub fn with_temperature(mut self, t: Real) -> Self {
        self.t = Some(t);
        self
    }

    pub fn with_enthalpy(mut self, h: Real) -> Self {
        self.h = Some(h);
        self
    }

    pub fn with_cost_columns(mut self, columns: CostColumns) -> Self {
        self.cost_columns = Some(columns);
        self
    }

    /// Defensive accessor: `None` when the field is absent or not a finite number.
    pub fn get(&self, field: Field) -> Option<Real> {
        let raw = match field {
            Field::MassFlow => self.m,
            Field::Specific(part) => self.specific.get(part),
            Field::Absolute(part) => self.absolute.get(part),
            Field::Cost(part) => self.cost.get(part),
            Field::Temperature => self.t,
            Field::Enthalpy => self.h,
            Field::EnergyFlow => self.energy_flow,
        };
        raw.filter(|v| v.is_finite())
    }

    /// [`StreamRecord::get`] with a missing value read as zero.
    pub fn get_or_zero(&self, field: Field) -> Real {
        self.get(field).unwrap_or(0.0)
    }

    pub fn cost_columns(&self) -> Option<CostColumns> {
        self.cost_columns
    }

    /// Positive mass flow; false for power/heat or missing `m`.
    pub fn has_positive_flow(&self) -> bool {
        self.kind.is_material() && self.get(Field::MassFlow).is_some_and(|m| m > 0.0)
    }
}
