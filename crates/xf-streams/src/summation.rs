//! Aggregate exergy summation.
//!
//! Missing numbers count as zero: stream resolution may legitimately leave
//! unused auxiliary ports partially populated.

use xf_core::Real;

use crate::ports::Ports;
use crate::stream::{ExergyPart, Field, StreamRecord};

/// `m * e_part` for a material stream; `None` for power/heat or missing data.
pub fn material_exergy(stream: &StreamRecord, part: ExergyPart) -> Option<Real> {
    if !stream.kind.is_material() {
        return None;
    }
    let m = stream.get(Field::MassFlow)?;
    let e = stream.get(Field::Specific(part))?;
    Some(m * e)
}

/// Stored absolute exergy of `part` when present, else `m * e_part`.
pub fn stored_or_computed_exergy(stream: &StreamRecord, part: ExergyPart) -> Option<Real> {
    stream
        .get(Field::Absolute(part))
        .or_else(|| material_exergy(stream, part))
}

/// Sum of exergy flow over `ports` for one exergy part.
///
/// Material streams contribute `m * e_part`; power and heat connections
/// contribute their `energy_flow` directly.
pub fn sum_exergy(ports: &Ports, part: ExergyPart) -> Real {
    ports
        .values()
        .map(|stream| {
            if stream.kind.is_material() {
                stream.get_or_zero(Field::MassFlow) * stream.get_or_zero(Field::Specific(part))
            } else {
                stream.get_or_zero(Field::EnergyFlow)
            }
        })
        .sum()
}

/// Sum of `m * e_part` over material streams only.
pub fn sum_material_exergy(ports: &Ports, part: ExergyPart) -> Real {
    ports
        .values()
        .filter_map(|stream| material_exergy(stream, part))
        .sum()
}
