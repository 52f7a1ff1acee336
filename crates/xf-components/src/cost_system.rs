//! Shared linear system of cost-balance equations.
//!
//! Components append auxiliary rows `A[row, col] = coefficient`, `b[row] = rhs`
//! to one system whose columns are the cost-rate unknowns of every stream part.

use std::ops::Range;

use nalgebra::{DMatrix, DVector};
use xf_core::Real;

use crate::error::{ComponentError, ComponentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationKind {
    /// Specific cost of a part is equal at inlet and outlet.
    AuxEquality,
    /// Fuel rule: the fuel stream leaves at the specific cost it entered with.
    AuxFRule,
}

impl EquationKind {
    pub fn label(self) -> &'static str {
        match self {
            EquationKind::AuxEquality => "aux_equality",
            EquationKind::AuxFRule => "aux_f_rule",
        }
    }
}

/// What a row of the system means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationLabel {
    pub row: usize,
    pub kind: EquationKind,
    /// Component name followed by the stream names involved.
    pub objects: Vec<String>,
    /// Specific cost constrained by the row (`c_M`, `c_CH`, `c_T`).
    pub property: &'static str,
}

/// One equation waiting to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRow {
    pub coefficients: Vec<(usize, Real)>,
    pub rhs: Real,
    pub kind: EquationKind,
    pub objects: Vec<String>,
    pub property: &'static str,
}

/// Cost system under construction.
#[derive(Debug, Clone)]
pub struct CostSystem {
    a: DMatrix<Real>,
    b: DVector<Real>,
    counter: usize,
    labels: Vec<EquationLabel>,
}

impl CostSystem {
    /// Empty system with `rows` equations and `cols` unknowns.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            a: DMatrix::zeros(rows, cols),
            b: DVector::zeros(rows),
            counter: 0,
            labels: Vec::new(),
        }
    }

    /// Start appending at `row`, e.g. after the component balance rows.
    pub fn starting_at(mut self, row: usize) -> Self {
        self.counter = row;
        self
    }

    /// Next free row.
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn matrix(&self) -> &DMatrix<Real> {
        &self.a
    }

    pub fn rhs(&self) -> &DVector<Real> {
        &self.b
    }

    pub fn labels(&self) -> &[EquationLabel] {
        &self.labels
    }

    pub fn into_parts(self) -> (DMatrix<Real>, DVector<Real>) {
        (self.a, self.b)
    }

    /// Rows left between the counter and the end of the system.
    pub fn free_rows(&self) -> usize {
        self.a.nrows().saturating_sub(self.counter)
    }

    fn check_columns(&self, coefficients: &[(usize, Real)]) -> ComponentResult<()> {
        match coefficients.iter().find(|(col, _)| *col >= self.a.ncols()) {
            Some(&(col, _)) => Err(ComponentError::CostSystem {
                what: format!("column {col} outside {} unknowns", self.a.ncols()),
            }),
            None => Ok(()),
        }
    }

    /// Append one equation and return its row.
    pub fn push_row(
        &mut self,
        coefficients: &[(usize, Real)],
        rhs: Real,
        kind: EquationKind,
        objects: Vec<String>,
        property: &'static str,
    ) -> ComponentResult<usize> {
        let row = self.counter;
        if self.free_rows() == 0 {
            return Err(ComponentError::CostSystem {
                what: format!(
                    "no free row for {} on {:?} ({} rows)",
                    property,
                    objects,
                    self.a.nrows()
                ),
            });
        }
        self.check_columns(coefficients)?;

        for &(col, value) in coefficients {
            self.a[(row, col)] = value;
        }
        self.b[row] = rhs;
        self.labels.push(EquationLabel {
            row,
            kind,
            objects,
            property,
        });
        self.counter += 1;
        Ok(row)
    }

    /// Append every row or none of them; returns the rows written.
    pub fn push_rows(&mut self, rows: Vec<PendingRow>) -> ComponentResult<Range<usize>> {
        let start = self.counter;
        if rows.len() > self.free_rows() {
            let properties: Vec<_> = rows.iter().map(|r| r.property).collect();
            return Err(ComponentError::CostSystem {
                what: format!(
                    "{} rows needed for {:?} but only {} free",
                    rows.len(),
                    properties,
                    self.free_rows()
                ),
            });
        }
        for row in &rows {
            self.check_columns(&row.coefficients)?;
        }

        for row in rows {
            self.push_row(
                &row.coefficients,
                row.rhs,
                row.kind,
                row.objects,
                row.property,
            )?;
        }
        Ok(start..self.counter)
    }
}
