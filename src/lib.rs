pub mod circuit;
pub mod data_structures;
pub mod error;
pub mod interface;
pub mod optimization;
pub mod phase_polynomial;
pub mod synthesis;
pub mod tableau;

pub use error::{Error, Result};
pub use interface::{optimize, tableau_from_circuit, tableau_to_circuit};

pub(crate) type IndexType = usize;
