use crate::circuit::QuantumCircuit;
use crate::data_structures::PauliProduct;
use crate::synthesis::{implement_pauli_rotation, implement_pauli_z_rotation_from_pauli_product};
use crate::tableau::RowMajorTableau;
use crate::IndexType;

/// Phase-polynomial decomposition of a Toffoli (or CCZ when `h_gate` is
/// false) over the tableau columns `[ctrl1, ctrl2, target]`.
///
/// The three columns are first rotated into the Z basis (for a Toffoli the
/// target is addressed through its destabilizer column, which accounts for
/// the conjugating Hadamards), then the seven pi/4 rotations of the
/// standard decomposition are emitted: one per prepared column and four on
/// products of their Z-masks.
pub fn implement_tof(
    tab: &mut RowMajorTableau,
    cols: [IndexType; 3],
    h_gate: bool,
) -> QuantumCircuit {
    let n = tab.n_qubits();
    let mut qc = QuantumCircuit::new(0);
    qc.request_qubits(n);

    qc += &implement_pauli_rotation(tab, cols[0]);
    qc += &implement_pauli_rotation(tab, cols[1]);

    let col_targ = cols[2] + if h_gate { n } else { 0 };
    qc += &implement_pauli_rotation(tab, col_targ);

    let mut p0 = tab.extract_pauli_product(cols[0]);
    let mut p1 = tab.extract_pauli_product(cols[1]);
    let p2 = tab.extract_pauli_product(col_targ);

    merge_and_rotate(tab, &mut qc, &mut p0, &p1);
    merge_and_rotate(tab, &mut qc, &mut p0, &p2);
    merge_and_rotate(tab, &mut qc, &mut p0, &p1);
    merge_and_rotate(tab, &mut qc, &mut p1, &p2);

    qc
}

/// Fold `pb` into `pa` (XOR of Z-masks, sign of the product rotation) and
/// emit the corresponding Z-rotation.
fn merge_and_rotate(
    tab: &RowMajorTableau,
    qc: &mut QuantumCircuit,
    pa: &mut PauliProduct,
    pb: &PauliProduct,
) {
    pa.z.xor_with(&pb.z);
    pa.sign ^= pb.sign ^ true;
    *qc += &implement_pauli_z_rotation_from_pauli_product(tab, pa);
}
