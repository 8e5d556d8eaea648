use itertools::Itertools;

use crate::circuit::QuantumCircuit;
use crate::data_structures::BitVector;
use crate::tableau::RowMajorTableau;
use crate::IndexType;

/// Ordered list of Z-masks, each standing for a multi-controlled Z-rotation
/// by pi/4 on the parity selected by the mask. A diagonal {CX, T} circuit
/// in normal form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhasePolynomial {
    n: usize,
    table: Vec<BitVector>,
}

impl PhasePolynomial {
    pub fn new(n_qubits: usize) -> Self {
        PhasePolynomial {
            n: n_qubits,
            table: Vec::new(),
        }
    }

    pub fn n_qubits(&self) -> usize {
        self.n
    }

    pub fn add_row(&mut self, row: BitVector) {
        self.table.push(row);
    }

    pub fn rows(&self) -> &[BitVector] {
        &self.table
    }

    pub fn rows_mut(&mut self) -> &mut Vec<BitVector> {
        &mut self.table
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Emit the CX+T realisation: per row, a CNOT fan-in collecting the
    /// parity onto the lowest set bit, one T, and the fan-in undone.
    pub fn to_circ(&self) -> QuantumCircuit {
        let mut qc = QuantumCircuit::new(0);
        qc.request_qubits(self.n);

        for mask in &self.table {
            if mask.popcount() == 0 {
                continue;
            }
            let pivot = mask.get_first_one();
            if pivot >= self.n {
                continue;
            }
            let controls: Vec<IndexType> = mask
                .get_all_ones(self.n)
                .into_iter()
                .filter(|&c| c != pivot)
                .collect();

            for &c in &controls {
                qc.add_cnot(c, pivot);
            }
            qc.add_t(pivot);
            for &c in controls.iter().rev() {
                qc.add_cnot(c, pivot);
            }
        }
        qc
    }

    /// Clifford residue between this polynomial and the snapshot `ref_rows`
    /// taken before optimisation. The rewrites preserve the per-qubit and
    /// per-pair parity counts modulo 8 up to even differences, which are
    /// exactly S and CZ phases.
    pub fn clifford_correction(&self, ref_rows: &[BitVector], n_qubits: usize) -> RowMajorTableau {
        assert_eq!(n_qubits, self.n, "qubit count mismatch");
        let mut tab = RowMajorTableau::new(n_qubits);

        for (i, j) in (0..n_qubits).tuple_combinations() {
            let before = count_pair(ref_rows, i, j);
            let after = count_pair(&self.table, i, j);
            let diff = (before.wrapping_sub(after)) & 7;
            for _ in 0..diff / 2 {
                tab.append_cz(i, j);
            }
        }

        for i in 0..n_qubits {
            let before = count_single(ref_rows, i);
            let after = count_single(&self.table, i);
            let diff = (before.wrapping_sub(after)) & 7;
            for _ in 0..diff / 2 {
                tab.append_s(i);
            }
        }
        tab
    }
}

/// Rows with both bit `i` and bit `j` set.
fn count_pair(rows: &[BitVector], i: IndexType, j: IndexType) -> usize {
    rows.iter().filter(|r| r.get(i) && r.get(j)).count()
}

/// Rows with bit `i` set.
fn count_single(rows: &[BitVector], i: IndexType) -> usize {
    rows.iter().filter(|r| r.get(i)).count()
}
