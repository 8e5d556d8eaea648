use tracing::debug;

use crate::circuit::{GateType, QuantumCircuit};
use crate::data_structures::BitVector;
use crate::error::{Error, Result};
use crate::optimization::tohpe;
use crate::phase_polynomial::PhasePolynomial;
use crate::tableau::ColumnMajorTableau;

/// T-count optimisation driver.
///
/// Gates before the first T pass through verbatim. From there the circuit
/// is sliced at Hadamard boundaries into alternating phase-polynomial and
/// Clifford segments: Cliffords are folded into a column-major tableau,
/// every T contributes the tableau-conjugated Z-mask of its qubit as a
/// polynomial row, and each polynomial is run through TOHPE before being
/// re-synthesised together with its Clifford correction. The input must be
/// free of internal Hadamards (see `gadgetize_internal_hadamards`).
pub fn optimize_t_gates(circ: &QuantumCircuit) -> Result<QuantumCircuit> {
    let n = circ.n_qubits as usize;
    let mut out = QuantumCircuit::new(0);
    out.request_qubits(n);

    let first_t = circ.first_t();
    out.gates.extend_from_slice(&circ.gates[..first_t]);
    if first_t == circ.gates.len() {
        return Ok(out);
    }

    let mut tab = ColumnMajorTableau::new(n);
    let mut poly = PhasePolynomial::new(n);
    let mut emitted = false;

    for gate in &circ.gates[first_t..] {
        match gate.gate_type() {
            GateType::H => {
                flush_poly(&mut out, &mut poly, &mut emitted, n)?;
                flush_tableau(&mut out, &mut tab, n);
                tab.prepend_h(gate.target());
            }
            GateType::X => tab.prepend_x(gate.target()),
            GateType::Z => tab.prepend_z(gate.target()),
            GateType::Cnot => tab.prepend_cx(gate.control(), gate.target()),
            GateType::S => {
                // S folds as S.Z under the prepend convention.
                tab.prepend_s(gate.target());
                tab.prepend_z(gate.target());
            }
            GateType::T | GateType::Tdg => {
                if poly.is_empty() && emitted {
                    flush_tableau(&mut out, &mut tab, n);
                }
                let q = gate.target();
                poly.add_row(tab.stabilizer(q).z.clone());
                if tab.stabilizer(q).sign {
                    tab.prepend_s(q);
                    tab.prepend_z(q);
                }
            }
            other => {
                return Err(Error::UnsupportedGate {
                    gate: other,
                    pass: "optimize_t_gates",
                })
            }
        }
    }

    flush_poly(&mut out, &mut poly, &mut emitted, n)?;
    flush_tableau(&mut out, &mut tab, n);
    Ok(out)
}

/// Optimise the pending polynomial and emit its Clifford correction
/// followed by its CX+T realisation.
fn flush_poly(
    out: &mut QuantumCircuit,
    poly: &mut PhasePolynomial,
    emitted: &mut bool,
    n_qubits: usize,
) -> Result<()> {
    if poly.is_empty() {
        return Ok(());
    }
    let reference: Vec<BitVector> = poly.rows().to_vec();
    tohpe(&reference, poly.rows_mut(), n_qubits)?;
    debug!(
        before = reference.len(),
        after = poly.len(),
        "phase polynomial slice optimised"
    );

    *out += &poly.clifford_correction(&reference, n_qubits).to_circ(false);
    *out += &poly.to_circ();
    *poly = PhasePolynomial::new(n_qubits);
    *emitted = true;
    Ok(())
}

/// Emit the pending Clifford segment and reset the tableau.
fn flush_tableau(out: &mut QuantumCircuit, tab: &mut ColumnMajorTableau, n_qubits: usize) {
    *out += &tab.to_row_major().to_circ(true);
    *tab = ColumnMajorTableau::new(n_qubits);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clifford_only_circuit_passes_through() {
        let mut qc = QuantumCircuit::new(2);
        qc.add_h(0);
        qc.add_cnot(0, 1);
        qc.add_s(1);

        let out = optimize_t_gates(&qc).unwrap();
        assert_eq!(out.gates, qc.gates);
    }

    #[test]
    fn lone_t_survives() {
        let mut qc = QuantumCircuit::new(1);
        qc.add_t(0);
        let out = optimize_t_gates(&qc).unwrap();
        assert_eq!(out.num_t(), 1);
    }

    #[test]
    fn adjacent_t_pair_becomes_clifford() {
        // T.T = S: the pair cancels out of the polynomial and only the
        // S/CZ residue remains.
        let mut qc = QuantumCircuit::new(1);
        qc.add_t(0);
        qc.add_t(0);
        let out = optimize_t_gates(&qc).unwrap();
        assert_eq!(out.num_t(), 0);
    }

    #[test]
    fn t_count_never_grows() {
        let mut qc = QuantumCircuit::new(3);
        qc.add_t(0);
        qc.add_cnot(0, 1);
        qc.add_t(1);
        qc.add_cnot(1, 2);
        qc.add_t(2);
        qc.add_s(1);
        qc.add_t(1);

        let out = optimize_t_gates(&qc).unwrap();
        assert!(out.num_t() <= qc.num_t());
    }

    #[test]
    fn cnot_conjugation_widens_the_mask() {
        // CNOT(0 -> 1) then T(1) rotates about Z0.Z1: the emitted
        // realisation needs a CNOT fan-in even after optimisation.
        let mut qc = QuantumCircuit::new(2);
        qc.add_t(0);
        qc.add_cnot(0, 1);
        qc.add_t(1);

        let out = optimize_t_gates(&qc).unwrap();
        assert_eq!(out.num_t(), 2);
        assert!(out.num_2q() > 0);
    }

    #[test]
    fn unsupported_gate_is_fatal() {
        let mut qc = QuantumCircuit::new(3);
        qc.add_t(0);
        qc.add_toffoli(0, 1, 2);
        assert!(matches!(
            optimize_t_gates(&qc),
            Err(Error::UnsupportedGate { .. })
        ));
    }

    #[test]
    fn trailing_hadamards_are_reemitted() {
        let mut qc = QuantumCircuit::new(1);
        qc.add_t(0);
        qc.add_h(0);
        let out = optimize_t_gates(&qc).unwrap();
        assert_eq!(out.num_t(), 1);
        assert_eq!(out.num_h(), 1);
    }
}
