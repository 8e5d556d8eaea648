use tracing::debug;

use crate::circuit::{GateType, QuantumCircuit};

/// Rewrite every Hadamard lying strictly between the first and the last
/// T-family gate through a fresh ancilla, so the interior of the circuit
/// becomes Hadamard-free and phase-polynomial slicing can span it.
///
/// Each internal H on `t` turns into the measurement-style gadget
/// `S(a); S(t); CNOT(a->t); S(t); Z(t); CNOT(t->a); CNOT(a->t)` with the
/// ancilla `a` prepared by an H in a separate initialisation circuit that
/// is concatenated in front of the body. Hadamards before the first T or
/// after the last T pass through untouched.
pub fn gadgetize_internal_hadamards(input: &QuantumCircuit) -> QuantumCircuit {
    let mut init = QuantumCircuit::new(input.n_qubits);
    let mut body = QuantumCircuit::new(input.n_qubits);

    let last_t = input.last_t();
    let mut encountered_t = false;
    let mut gadgets = 0usize;

    for (i, gate) in input.gates.iter().enumerate() {
        if gate.is_t() {
            encountered_t = true;
        }

        if gate.gate_type() == GateType::H && encountered_t && i < last_t {
            let target = gate.target();
            let ancilla = body.request_qubit();
            init.request_qubit();
            init.add_h(ancilla);

            body.add_s(ancilla);
            body.add_s(target);
            body.add_cnot(ancilla, target);
            body.add_s(target);
            body.add_z(target);
            body.add_cnot(target, ancilla);
            body.add_cnot(ancilla, target);
            gadgets += 1;
        } else {
            body.gates.push(*gate);
        }
    }

    if gadgets > 0 {
        debug!(gadgets, "gadgetized internal hadamards");
    }
    &init + &body
}
