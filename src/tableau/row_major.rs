use std::fmt;

use crate::circuit::{GateType, QuantumCircuit};
use crate::data_structures::{BitVector, PauliProduct};
use crate::error::{Error, Result};
use crate::IndexType;

/// Aaronson-Gottesman stabilizer tableau of a fixed `n`-qubit Clifford.
///
/// Row `i` of `z`/`x` holds the Z/X membership of qubit `i` across all `2n`
/// generator columns: column `c < n` is the image of the stabilizer `Z_c`,
/// column `c + n` the image of the destabilizer `X_c`. `signs` carries one
/// phase bit per column. The fresh tableau is the identity map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMajorTableau {
    n: usize,
    z: Vec<BitVector>,
    x: Vec<BitVector>,
    signs: BitVector,
}

fn unit_vector(pos: usize, len: usize) -> BitVector {
    let mut bv = BitVector::new(len);
    bv.xor_bit(pos);
    bv
}

impl RowMajorTableau {
    pub fn new(n_qubits: usize) -> Self {
        let len = 2 * n_qubits;
        RowMajorTableau {
            n: n_qubits,
            z: (0..n_qubits).map(|i| unit_vector(i, len)).collect(),
            x: (0..n_qubits).map(|i| unit_vector(i + n_qubits, len)).collect(),
            signs: BitVector::new(len),
        }
    }

    pub fn n_qubits(&self) -> usize {
        self.n
    }

    pub fn z_row(&self, i: IndexType) -> &BitVector {
        &self.z[i]
    }

    pub fn x_row(&self, i: IndexType) -> &BitVector {
        &self.x[i]
    }

    pub fn signs(&self) -> &BitVector {
        &self.signs
    }

    pub fn sign_bit(&self, col: IndexType) -> bool {
        self.signs.get(col)
    }

    /* ------------------------------------------------------------------ *
     *  Append: right-multiplication, the tableau evolves as T -> T * U.  *
     *  All rules are bit-parallel over the length-2n rows.               *
     * ------------------------------------------------------------------ */

    pub fn append_x(&mut self, q: IndexType) {
        self.signs.xor_with(&self.z[q]);
    }

    pub fn append_z(&mut self, q: IndexType) {
        self.signs.xor_with(&self.x[q]);
    }

    pub fn append_v(&mut self, q: IndexType) {
        // sqrt(X): flips the sign on Z-only columns, then X ^= Z.
        let mut mask = self.x[q].clone();
        mask.negate();
        mask.and_with(&self.z[q]);
        self.signs.xor_with(&mask);
        let z = self.z[q].clone();
        self.x[q].xor_with(&z);
    }

    pub fn append_s(&mut self, q: IndexType) {
        let mut mask = self.z[q].clone();
        mask.and_with(&self.x[q]);
        self.signs.xor_with(&mask);
        let x = self.x[q].clone();
        self.z[q].xor_with(&x);
    }

    pub fn append_h(&mut self, q: IndexType) {
        // Sign flips exactly where the column holds Y, then Z and X swap.
        let mut y_mask = self.x[q].clone();
        y_mask.and_with(&self.z[q]);
        self.signs.xor_with(&y_mask);
        let (z, x) = (&mut self.z[q], &mut self.x[q]);
        z.swap_with(x);
    }

    pub fn append_cx(&mut self, ctrl: IndexType, targ: IndexType) {
        let mut mask = self.z[ctrl].clone();
        mask.negate();
        mask.xor_with(&self.x[targ]);
        mask.and_with(&self.z[targ]);
        mask.and_with(&self.x[ctrl]);
        self.signs.xor_with(&mask);

        let zt = self.z[targ].clone();
        self.z[ctrl].xor_with(&zt);
        let xc = self.x[ctrl].clone();
        self.x[targ].xor_with(&xc);
    }

    pub fn append_cz(&mut self, q1: IndexType, q2: IndexType) {
        self.append_s(q1);
        self.append_s(q2);
        self.append_cx(q1, q2);
        self.append_s(q2);
        self.append_z(q2);
        self.append_cx(q1, q2);
    }

    /* ------------------------------------------------------------------ *
     *  Pauli column extraction / insertion                               *
     * ------------------------------------------------------------------ */

    /// The Pauli on generator column `col` as an n-qubit product.
    pub fn extract_pauli_product(&self, col: IndexType) -> PauliProduct {
        let mut z = BitVector::new(self.n);
        let mut x = BitVector::new(self.n);
        for i in 0..self.n {
            if self.z[i].get(col) {
                z.xor_bit(i);
            }
            if self.x[i].get(col) {
                x.xor_bit(i);
            }
        }
        PauliProduct::new(z, x, self.signs.get(col))
    }

    /// Overwrite generator column `col` with `p`, toggling only the bits
    /// that differ.
    pub fn insert_pauli_product(&mut self, p: &PauliProduct, col: IndexType) {
        for i in 0..self.n {
            if p.z.get(i) != self.z[i].get(col) {
                self.z[i].xor_bit(col);
            }
            if p.x.get(i) != self.x[i].get(col) {
                self.x[i].xor_bit(col);
            }
        }
        if p.sign != self.signs.get(col) {
            self.signs.xor_bit(col);
        }
    }

    /* ------------------------------------------------------------------ *
     *  Prepend: left-multiplication, T -> U * T, via column products.    *
     * ------------------------------------------------------------------ */

    pub fn prepend_x(&mut self, q: IndexType) {
        self.signs.xor_bit(q);
    }

    pub fn prepend_z(&mut self, q: IndexType) {
        self.signs.xor_bit(q + self.n);
    }

    pub fn prepend_s(&mut self, q: IndexType) {
        let stab = self.extract_pauli_product(q);
        let mut destab = self.extract_pauli_product(q + self.n);
        destab.mult(&stab);
        self.insert_pauli_product(&destab, q + self.n);
    }

    pub fn prepend_h(&mut self, q: IndexType) {
        let stab = self.extract_pauli_product(q);
        let destab = self.extract_pauli_product(q + self.n);
        self.insert_pauli_product(&destab, q);
        self.insert_pauli_product(&stab, q + self.n);
    }

    pub fn prepend_cx(&mut self, ctrl: IndexType, targ: IndexType) {
        let stab_c = self.extract_pauli_product(ctrl);
        let mut stab_t = self.extract_pauli_product(targ);
        let mut dest_c = self.extract_pauli_product(ctrl + self.n);
        let dest_t = self.extract_pauli_product(targ + self.n);

        stab_t.mult(&stab_c);
        dest_c.mult(&dest_t);

        self.insert_pauli_product(&stab_t, targ);
        self.insert_pauli_product(&dest_c, ctrl + self.n);
    }

    /* ------------------------------------------------------------------ *
     *  Circuit conversions                                               *
     * ------------------------------------------------------------------ */

    /// Fold an all-Clifford circuit into its tableau. Rejects negated
    /// controls and any non-Clifford gate.
    pub fn from_circ(qc: &QuantumCircuit) -> Result<Self> {
        let mut tab = RowMajorTableau::new(qc.n_qubits as usize);

        for gate in &qc.gates {
            if gate.has_negated_control() {
                return Err(Error::NegatedControl);
            }
            match gate.gate_type() {
                GateType::X => tab.append_x(gate.target()),
                GateType::Z => tab.append_z(gate.target()),
                GateType::H => tab.append_h(gate.target()),
                GateType::S => tab.append_s(gate.target()),
                // S dagger is three quarter-turns.
                GateType::Sdg => {
                    for _ in 0..3 {
                        tab.append_s(gate.target());
                    }
                }
                GateType::Cnot => tab.append_cx(gate.control(), gate.target()),
                GateType::Cz => tab.append_cz(gate.target(), gate.control()),
                GateType::Swap => {
                    let (a, b) = (gate.target(), gate.control());
                    tab.append_cx(b, a);
                    tab.append_cx(a, b);
                    tab.append_cx(b, a);
                }
                other => return Err(Error::NonClifford { gate: other }),
            }
        }
        Ok(tab)
    }

    /// Aaronson-Gottesman synthesis. Reduces a scratch copy to the identity
    /// while mirroring every applied generator into the output circuit; the
    /// recorded sequence realises the inverse Clifford. When `inverse` is
    /// false the sequence is reversed, with a Z appended after every S to
    /// turn it into S dagger, so the result realises the tableau itself.
    pub fn to_circ(&self, inverse: bool) -> QuantumCircuit {
        let mut tab = self.clone();
        let n = tab.n;
        let mut qc = QuantumCircuit::new(0);
        qc.request_qubits(n);

        for i in 0..n {
            // Pivot: lowest stabilizer row with an X in column i.
            let pivot = (0..n).find(|&j| tab.x[j].get(i));

            if let Some(p) = pivot {
                for j in i + 1..n {
                    if tab.x[j].get(i) && j != p {
                        tab.append_cx(p, j);
                        qc.add_cnot(p, j);
                    }
                }
                if tab.z[p].get(i) {
                    tab.append_s(p);
                    qc.add_s(p);
                }
                tab.append_h(p);
                qc.add_h(p);
            }

            // Make sure the stabilizer diagonal carries a Z.
            if !tab.z[i].get(i) {
                if let Some(p2) = (i + 1..n).find(|&j| tab.z[j].get(i)) {
                    tab.append_cx(i, p2);
                    qc.add_cnot(i, p2);
                }
            }

            for j in 0..n {
                if tab.z[j].get(i) && j != i {
                    tab.append_cx(j, i);
                    qc.add_cnot(j, i);
                }
            }

            // Destabilizer column i + n: clear off-diagonal X, then Z.
            for j in 0..n {
                if tab.x[j].get(i + n) && j != i {
                    tab.append_cx(i, j);
                    qc.add_cnot(i, j);
                }
            }
            for j in 0..n {
                if tab.z[j].get(i + n) && j != i {
                    tab.append_cx(i, j);
                    qc.add_cnot(i, j);
                    tab.append_s(j);
                    qc.add_s(j);
                    tab.append_cx(i, j);
                    qc.add_cnot(i, j);
                }
            }
            if tab.z[i].get(i + n) {
                tab.append_s(i);
                qc.add_s(i);
            }

            if tab.signs.get(i) {
                tab.append_x(i);
                qc.add_x(i);
            }
            if tab.signs.get(i + n) {
                tab.append_z(i);
                qc.add_z(i);
            }
        }

        if !inverse {
            let mut out = QuantumCircuit::new(0);
            out.request_qubits(n);
            for gate in qc.gates.iter().rev() {
                out.gates.push(*gate);
                if gate.gate_type() == GateType::S {
                    out.add_z(gate.target());
                }
            }
            return out;
        }
        qc
    }
}

impl fmt::Display for RowMajorTableau {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pauli_char = |z: bool, x: bool| match (z, x) {
            (false, false) => 'I',
            (false, true) => 'X',
            (true, true) => 'Y',
            (true, false) => 'Z',
        };
        for half in 0..2 {
            for c in 0..self.n {
                let col = c + half * self.n;
                write!(f, "{} ", if self.signs.get(col) { '-' } else { '+' })?;
                for row in 0..self.n {
                    write!(f, "{}", pauli_char(self.z[row].get(col), self.x[row].get(col)))?;
                }
                writeln!(f)?;
            }
            if half == 0 {
                writeln!(f, "{}", "-".repeat(self.n + 2))?;
            }
        }
        Ok(())
    }
}
