use crate::circuit::QuantumCircuit;
use crate::data_structures::PauliProduct;
use crate::tableau::RowMajorTableau;
use crate::IndexType;

/// pi/4 Z-rotation about an explicit Pauli product: CNOT fan-in onto the
/// lowest set bit of the Z-mask, a T there, an S.Z pair when the sign is
/// negative, and the fan-in undone. All-identity masks produce nothing
/// (the rotation is a global phase).
pub fn implement_pauli_z_rotation_from_pauli_product(
    tab: &RowMajorTableau,
    p: &PauliProduct,
) -> QuantumCircuit {
    let n = tab.n_qubits();
    let mut qc = QuantumCircuit::new(0);
    qc.request_qubits(n);

    if p.z.popcount() == 0 {
        return qc;
    }
    let pivot = p.z.get_first_one();

    let mut fan_in = QuantumCircuit::new(0);
    fan_in.request_qubits(n);
    for j in 0..n {
        if p.z.get(j) && j != pivot {
            fan_in.add_cnot(j, pivot);
        }
    }

    qc += &fan_in;
    qc.add_t(pivot);
    if p.sign {
        qc.add_s(pivot);
        qc.add_z(pivot);
    }
    qc += &fan_in;
    qc
}

/// Same rotation, with the Z-mask read off the tableau's stabilizer rows at
/// `col`. The tableau is not mutated.
pub fn implement_pauli_z_rotation(tab: &RowMajorTableau, col: IndexType) -> QuantumCircuit {
    let n = tab.n_qubits();
    let mut qc = QuantumCircuit::new(0);
    qc.request_qubits(n);

    let Some(pivot) = (0..n).find(|&j| tab.z_row(j).get(col)) else {
        return qc;
    };

    let mut fan_in = QuantumCircuit::new(0);
    fan_in.request_qubits(n);
    for j in 0..n {
        if tab.z_row(j).get(col) && j != pivot {
            fan_in.add_cnot(j, pivot);
        }
    }

    qc += &fan_in;
    qc.add_t(pivot);
    if tab.sign_bit(col) {
        qc.add_s(pivot);
        qc.add_z(pivot);
    }
    qc += &fan_in;
    qc
}

/// General pi/4 rotation on tableau column `col`: clears every X entry of
/// the column onto a pivot with CNOTs, rotates the pivot into the Z basis
/// (S when it carries Y, then H), and finishes with the pure-Z rotation.
/// The basis-change gates are applied to `tab` and mirrored into the
/// returned circuit.
pub fn implement_pauli_rotation(tab: &mut RowMajorTableau, col: IndexType) -> QuantumCircuit {
    let n = tab.n_qubits();
    let mut qc = QuantumCircuit::new(0);
    qc.request_qubits(n);

    if let Some(pivot) = (0..n).find(|&j| tab.x_row(j).get(col)) {
        for j in 0..n {
            if tab.x_row(j).get(col) && j != pivot {
                tab.append_cx(pivot, j);
                qc.add_cnot(pivot, j);
            }
        }
        if tab.z_row(pivot).get(col) {
            tab.append_s(pivot);
            qc.add_s(pivot);
        }
        tab.append_h(pivot);
        qc.add_h(pivot);
    }

    qc += &implement_pauli_z_rotation(tab, col);
    qc
}
