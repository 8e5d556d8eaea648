use thiserror::Error;

use crate::circuit::GateType;

/// Errors surfaced by the optimizer core. The core never recovers from any
/// of these; callers get the failure as soon as it is detected and no state
/// is partially committed.
#[derive(Debug, Error)]
pub enum Error {
    /* ---- structural ---- */
    #[error("inconsistent row length: expected {expected}, found {found}")]
    RowLengthMismatch { expected: usize, found: usize },

    #[error("tableau row width {width} is odd, must be 2 * n_qubits")]
    OddRowWidth { width: usize },

    #[error("expected {expected} tableau rows, found {found}")]
    RowCountMismatch { expected: usize, found: usize },

    /* ---- domain ---- */
    #[error("unknown gate name `{0}`")]
    UnknownGate(String),

    #[error("negated controls are not supported")]
    NegatedControl,

    #[error("non-Clifford gate {gate:?} in a Clifford-only context")]
    NonClifford { gate: GateType },

    #[error("gate {gate:?} is not supported by {pass}")]
    UnsupportedGate { gate: GateType, pass: &'static str },

    /* ---- invariant ---- */
    #[error("kernel search failed to converge within {cap} iterations")]
    KernelDiverged { cap: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
