use tracing::debug;

use crate::circuit::{Gate, GateType, QuantumCircuit};
use crate::error::{Error, Result};
use crate::synthesis::{implement_pauli_rotation, implement_tof};
use crate::tableau::RowMajorTableau;

/// Hadamard-count reduction pass.
///
/// A first prepend scan folds the circuit's Clifford gates into a tableau;
/// a reverse scan then replays every gate against that tableau, absorbing
/// each T and Toffoli as a Pauli rotation so the tableau ends up capturing
/// the circuit's full Clifford frame. The output is the frame synthesised
/// in front (`to_circ(false)`), the replayed rotations, and the leftover
/// frame behind (`to_circ(true)`); all surviving Hadamards live in the two
/// synthesised Clifford blocks.
pub fn internal_h_opt(circ: &QuantumCircuit) -> Result<QuantumCircuit> {
    let mut tab = frame_tableau(circ)?;

    let mut out = tab.to_circ(false);

    for gate in &circ.gates {
        match gate.gate_type() {
            GateType::H => tab.prepend_h(gate.target()),
            GateType::X => tab.prepend_x(gate.target()),
            GateType::Z => tab.prepend_z(gate.target()),
            GateType::S => {
                tab.prepend_s(gate.target());
                tab.prepend_z(gate.target());
            }
            GateType::Cnot => tab.prepend_cx(gate.control(), gate.target()),
            GateType::T | GateType::Tdg => {
                let sub = implement_pauli_rotation(&mut tab, gate.target());
                out = &out + &sub;
            }
            GateType::Toffoli => {
                let cols = [gate.control(), gate.control2(), gate.target()];
                let sub = implement_tof(&mut tab, cols, true);
                out = &out + &sub;
            }
            other => {
                return Err(Error::UnsupportedGate {
                    gate: other,
                    pass: "internal_h_opt",
                })
            }
        }
    }

    out = &out + &tab.to_circ(true);
    debug!(
        h_before = circ.num_h(),
        h_after = out.num_internal_h(),
        "hadamard pass finished"
    );
    Ok(out)
}

/// Build the Clifford frame: a forward prepend scan over the Clifford
/// gates, then a reverse scan absorbing every gate, with T and Toffoli
/// folded in as Pauli rotations (their circuits are discarded here).
fn frame_tableau(circ: &QuantumCircuit) -> Result<RowMajorTableau> {
    let mut tab = RowMajorTableau::new(circ.n_qubits as usize);

    for gate in &circ.gates {
        match gate.gate_type() {
            GateType::H => tab.prepend_h(gate.target()),
            GateType::X => tab.prepend_x(gate.target()),
            GateType::Z => tab.prepend_z(gate.target()),
            GateType::S => {
                tab.prepend_s(gate.target());
                tab.prepend_z(gate.target());
            }
            GateType::Cnot => tab.prepend_cx(gate.control(), gate.target()),
            _ => {}
        }
    }

    for gate in circ.gates.iter().rev() {
        fold_reverse(&mut tab, gate)?;
    }
    Ok(tab)
}

fn fold_reverse(tab: &mut RowMajorTableau, gate: &Gate) -> Result<()> {
    match gate.gate_type() {
        GateType::H => tab.prepend_h(gate.target()),
        GateType::X => tab.prepend_x(gate.target()),
        GateType::Z => tab.prepend_z(gate.target()),
        GateType::S => tab.prepend_s(gate.target()),
        GateType::Cnot => tab.prepend_cx(gate.control(), gate.target()),
        GateType::T | GateType::Tdg => {
            implement_pauli_rotation(tab, gate.target());
        }
        GateType::Toffoli => {
            let cols = [gate.control(), gate.control2(), gate.target()];
            implement_tof(tab, cols, true);
        }
        other => {
            return Err(Error::UnsupportedGate {
                gate: other,
                pass: "internal_h_opt",
            })
        }
    }
    Ok(())
}
