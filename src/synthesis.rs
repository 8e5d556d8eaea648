mod pauli_rotation;
mod toffoli;

pub use pauli_rotation::{
    implement_pauli_rotation, implement_pauli_z_rotation,
    implement_pauli_z_rotation_from_pauli_product,
};
pub use toffoli::implement_tof;
