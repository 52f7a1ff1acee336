use thiserror::Error;

pub type XfResult<T> = Result<T, XfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum XfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid topology: {what}")]
    Topology { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
