//! Structured diagnostics emitted by balance calculations.
//!
//! Balances never configure logging themselves. They hand [`Diagnostic`]
//! events to a caller-supplied [`DiagnosticSink`]; [`TracingSink`] forwards
//! them to `tracing`, and `Vec<Diagnostic>` collects them.

use std::fmt;

use xf_core::Real;
use xf_streams::{ExergyPart, Field};

use crate::regime::Regime;

/// Event level, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Which side of a component a stream is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortSide {
    Inlet,
    Outlet,
}

impl fmt::Display for PortSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSide::Inlet => write!(f, "inlet"),
            PortSide::Outlet => write!(f, "outlet"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// Streams seen by a balance call, before any arithmetic.
    Inputs {
        inlets: Vec<String>,
        outlets: Vec<String>,
        t0_k: Real,
    },

    /// A field needed for the arithmetic is absent; it was read as zero.
    MissingField {
        stream: String,
        side: PortSide,
        field: Field,
    },

    /// A configured stream name is not attached to the component.
    MissingStream { stream: String, side: PortSide },

    /// A negative destruction inside the rounding band was set to zero.
    ClampedDestruction { e_d: Real },

    /// Destruction is negative beyond rounding noise. The value is kept.
    NegativeDestruction { e_in: Real, e_out: Real, e_d: Real },

    /// Stored absolute exergy disagrees with mass flow times specific exergy.
    DimensionalMismatch {
        stream: String,
        side: PortSide,
        part: ExergyPart,
        stored: Real,
        expected: Real,
        deviation: Real,
    },

    /// Balance mode and pair-configured mode disagree on destruction.
    ModeDivergence {
        balance: Real,
        paired: Real,
        relative: Real,
        uncovered: Vec<String>,
    },

    /// No cost rule exists yet for this temperature regime.
    UnimplementedRegime { regime: Regime },

    /// Structural validation failed; the call returns an error.
    InvalidTopology { message: String },

    /// Result of an exergy balance.
    Summary {
        e_f: Real,
        e_p: Real,
        e_d: Real,
        epsilon: Option<Real>,
    },

    /// Result of a cost balance.
    CostSummary {
        regime: Regime,
        cost_fuel: Option<Real>,
        cost_product: Option<Real>,
    },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::Inputs { .. } | DiagnosticKind::ClampedDestruction { .. } => {
                Severity::Debug
            }
            DiagnosticKind::Summary { .. } | DiagnosticKind::CostSummary { .. } => Severity::Info,
            DiagnosticKind::MissingField { .. }
            | DiagnosticKind::MissingStream { .. }
            | DiagnosticKind::NegativeDestruction { .. }
            | DiagnosticKind::DimensionalMismatch { .. }
            | DiagnosticKind::ModeDivergence { .. }
            | DiagnosticKind::UnimplementedRegime { .. } => Severity::Warning,
            DiagnosticKind::InvalidTopology { .. } => Severity::Error,
        }
    }
}

fn fmt_opt(value: Option<Real>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "undefined".to_string(),
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Inputs {
                inlets,
                outlets,
                t0_k,
            } => write!(
                f,
                "inputs before calc | inlets={inlets:?} outlets={outlets:?} T0={t0_k:.2} K"
            ),
            DiagnosticKind::MissingField {
                stream,
                side,
                field,
            } => write!(f, "missing {field} on {side} '{stream}', using 0"),
            DiagnosticKind::MissingStream { stream, side } => {
                write!(f, "configured {side} '{stream}' is not connected, using 0")
            }
            DiagnosticKind::ClampedDestruction { e_d } => {
                write!(f, "clamped tiny negative E_D={e_d:.6e} W to 0")
            }
            DiagnosticKind::NegativeDestruction { e_in, e_out, e_d } => write!(
                f,
                "significant negative E_D | E_in={e_in:.2} W, E_out={e_out:.2} W, E_D={e_d:.2} W"
            ),
            DiagnosticKind::DimensionalMismatch {
                stream,
                side,
                part,
                stored,
                expected,
                deviation,
            } => write!(
                f,
                "{side} '{stream}': stored {part}={stored:.2} W differs from m*e={expected:.2} W \
                 by {:.3}%",
                deviation * 100.0
            ),
            DiagnosticKind::ModeDivergence {
                balance,
                paired,
                relative,
                uncovered,
            } => {
                write!(
                    f,
                    "E_D_balance={balance:.2} W vs E_D_spez={paired:.2} W differ by {:.2}%; \
                     possible causes: incomplete pair coverage, mismatched exergy part, \
                     unused or dummy streams, pairing error",
                    relative * 100.0
                )?;
                if !uncovered.is_empty() {
                    write!(f, " | streams in no pair: {uncovered:?}")?;
                }
                Ok(())
            }
            DiagnosticKind::UnimplementedRegime { regime } => {
                write!(f, "{regime} is not implemented in exergoeconomics yet")
            }
            DiagnosticKind::InvalidTopology { message } => write!(f, "{message}"),
            DiagnosticKind::Summary {
                e_f,
                e_p,
                e_d,
                epsilon,
            } => write!(
                f,
                "E_F={e_f:.2} W, E_P={e_p:.2} W, E_D={e_d:.2} W, epsilon={}",
                fmt_opt(*epsilon)
            ),
            DiagnosticKind::CostSummary {
                regime,
                cost_fuel,
                cost_product,
            } => write!(
                f,
                "{regime} | C_F={}, C_P={}",
                fmt_opt(*cost_fuel),
                fmt_opt(*cost_product)
            ),
        }
    }
}

/// One event, tagged with the component that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub component: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.component, self.kind)
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let component = diagnostic.component.as_str();
        let message = &diagnostic.kind;
        match diagnostic.severity() {
            Severity::Debug => tracing::debug!(component, "{message}"),
            Severity::Info => tracing::info!(component, "{message}"),
            Severity::Warning => tracing::warn!(component, "{message}"),
            Severity::Error => tracing::error!(component, "{message}"),
        }
    }
}

/// Sink bound to one component name.
pub(crate) struct Reporter<'a> {
    component: &'a str,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(component: &'a str, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { component, sink }
    }

    pub(crate) fn emit(&mut self, kind: DiagnosticKind) {
        self.sink.emit(Diagnostic {
            component: self.component.to_string(),
            kind,
        });
    }

    /// Read `field` from a stream, reporting it when absent.
    pub(crate) fn lookup(
        &mut self,
        stream_name: &str,
        side: PortSide,
        stream: &xf_streams::StreamRecord,
        field: Field,
    ) -> Option<Real> {
        let value = stream.get(field);
        if value.is_none() {
            self.emit(DiagnosticKind::MissingField {
                stream: stream_name.to_string(),
                side,
                field,
            });
        }
        value
    }

    /// Like [`Reporter::lookup`], substituting zero when absent.
    pub(crate) fn require(
        &mut self,
        stream_name: &str,
        side: PortSide,
        stream: &xf_streams::StreamRecord,
        field: Field,
    ) -> Real {
        self.lookup(stream_name, side, stream, field).unwrap_or(0.0)
    }
}
