mod bit_vector;
mod pauli_product;

pub use bit_vector::BitVector;
pub use pauli_product::PauliProduct;
