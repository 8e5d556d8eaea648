use crate::data_structures::{BitVector, PauliProduct};
use crate::tableau::RowMajorTableau;
use crate::IndexType;

/// Per-qubit stabilizer/destabilizer record used while slicing a circuit.
///
/// The tableau is mutated exclusively by prepending Clifford generators;
/// each generator acts on every stored Pauli independently, so the record
/// is an array of n-qubit `(z, x, sign)` entries per half rather than a
/// row-major bit matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMajorTableau {
    n: usize,
    stabs: Vec<PauliProduct>,
    destabs: Vec<PauliProduct>,
}

impl ColumnMajorTableau {
    pub fn new(n_qubits: usize) -> Self {
        let mut stabs = Vec::with_capacity(n_qubits);
        let mut destabs = Vec::with_capacity(n_qubits);
        for i in 0..n_qubits {
            let mut z = BitVector::new(n_qubits);
            z.xor_bit(i);
            stabs.push(PauliProduct::new(z, BitVector::new(n_qubits), false));

            let mut x = BitVector::new(n_qubits);
            x.xor_bit(i);
            destabs.push(PauliProduct::new(BitVector::new(n_qubits), x, false));
        }
        ColumnMajorTableau { n: n_qubits, stabs, destabs }
    }

    pub fn n_qubits(&self) -> usize {
        self.n
    }

    pub fn stabilizer(&self, q: IndexType) -> &PauliProduct {
        &self.stabs[q]
    }

    pub fn destabilizer(&self, q: IndexType) -> &PauliProduct {
        &self.destabs[q]
    }

    fn for_each(&mut self, update: impl Fn(&mut PauliProduct)) {
        for pauli in self.stabs.iter_mut().chain(self.destabs.iter_mut()) {
            update(pauli);
        }
    }

    pub fn prepend_x(&mut self, q: IndexType) {
        self.for_each(|p| {
            if p.z.get(q) {
                p.sign ^= true;
            }
        });
    }

    pub fn prepend_z(&mut self, q: IndexType) {
        self.for_each(|p| {
            if p.x.get(q) {
                p.sign ^= true;
            }
        });
    }

    pub fn prepend_s(&mut self, q: IndexType) {
        self.for_each(|p| {
            let (zq, xq) = (p.z.get(q), p.x.get(q));
            if zq && xq {
                p.sign ^= true;
            }
            if xq {
                p.z.xor_bit(q);
            }
        });
    }

    pub fn prepend_h(&mut self, q: IndexType) {
        self.for_each(|p| {
            let (zq, xq) = (p.z.get(q), p.x.get(q));
            if zq && xq {
                p.sign ^= true;
            }
            if zq != xq {
                p.z.xor_bit(q);
                p.x.xor_bit(q);
            }
        });
    }

    pub fn prepend_cx(&mut self, ctrl: IndexType, targ: IndexType) {
        self.for_each(|p| {
            if p.z.get(ctrl) && p.x.get(targ) {
                p.sign ^= true;
            }
            if p.z.get(targ) {
                p.z.xor_bit(ctrl);
            }
            if p.x.get(ctrl) {
                p.x.xor_bit(targ);
            }
        });
    }

    /// Lift into a full row-major tableau: stabilizers land on generator
    /// columns `0..n`, destabilizers on `n..2n`.
    pub fn to_row_major(&self) -> RowMajorTableau {
        let mut tab = RowMajorTableau::new(self.n);
        for (i, stab) in self.stabs.iter().enumerate() {
            tab.insert_pauli_product(stab, i);
        }
        for (i, destab) in self.destabs.iter().enumerate() {
            tab.insert_pauli_product(destab, i + self.n);
        }
        tab
    }
}
