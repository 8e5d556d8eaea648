use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign};

use crate::IndexType;

mod gate;

pub use gate::{Gate, GateType};

/// Ordered gate sequence over `n_qubits` logical qubits.
///
/// `qubit_mapping[i]` is the global index of local qubit `i`; it starts as
/// the identity and is only ever consulted when two circuits over different
/// qubit spaces are concatenated with `+`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuantumCircuit {
    pub n_qubits: u32,
    pub gates: Vec<Gate>,
    pub qubit_mapping: Vec<u32>,
}

impl QuantumCircuit {
    pub fn new(n_qubits: u32) -> Self {
        QuantumCircuit {
            n_qubits,
            gates: Vec::new(),
            qubit_mapping: (0..n_qubits).collect(),
        }
    }

    /// Allocate one fresh logical qubit and return its index.
    pub fn request_qubit(&mut self) -> IndexType {
        let id = self.n_qubits;
        self.n_qubits += 1;
        self.qubit_mapping.push(id);
        id as IndexType
    }

    pub fn request_qubits(&mut self, count: usize) {
        for _ in 0..count {
            self.request_qubit();
        }
    }

    /* ---- gate builders ---- */

    pub fn add_x(&mut self, target: IndexType) {
        self.gates.push(Gate::single(GateType::X, target));
    }

    pub fn add_z(&mut self, target: IndexType) {
        self.gates.push(Gate::single(GateType::Z, target));
    }

    pub fn add_h(&mut self, target: IndexType) {
        self.gates.push(Gate::single(GateType::H, target));
    }

    pub fn add_s(&mut self, target: IndexType) {
        self.gates.push(Gate::single(GateType::S, target));
    }

    pub fn add_sdg(&mut self, target: IndexType) {
        self.gates.push(Gate::single(GateType::Sdg, target));
    }

    pub fn add_t(&mut self, target: IndexType) {
        self.gates.push(Gate::single(GateType::T, target));
    }

    pub fn add_tdg(&mut self, target: IndexType) {
        self.gates.push(Gate::single(GateType::Tdg, target));
    }

    pub fn add_cnot(&mut self, control: IndexType, target: IndexType) {
        self.gates.push(Gate::controlled(GateType::Cnot, control, target));
    }

    pub fn add_cz(&mut self, control: IndexType, target: IndexType) {
        self.gates.push(Gate::controlled(GateType::Cz, control, target));
    }

    pub fn add_swap(&mut self, a: IndexType, b: IndexType) {
        self.gates.push(Gate::controlled(GateType::Swap, a, b));
    }

    pub fn add_toffoli(&mut self, ctrl1: IndexType, ctrl2: IndexType, target: IndexType) {
        self.gates
            .push(Gate::doubly_controlled(GateType::Toffoli, ctrl1, ctrl2, target));
    }

    /* ---- introspection ---- */

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Number of T and T-dagger gates, the cost metric being minimised.
    pub fn num_t(&self) -> usize {
        self.gates.iter().filter(|g| g.is_t()).count()
    }

    pub fn num_h(&self) -> usize {
        self.gates
            .iter()
            .filter(|g| g.gate_type() == GateType::H)
            .count()
    }

    pub fn num_2q(&self) -> usize {
        self.gates
            .iter()
            .filter(|g| matches!(g.gate_type(), GateType::Cnot | GateType::Cz))
            .count()
    }

    /// Index of the first T-family gate, or `gates.len()` when there is none.
    pub fn first_t(&self) -> usize {
        self.gates
            .iter()
            .position(Gate::is_t)
            .unwrap_or(self.gates.len())
    }

    /// One past the index of the last T-family gate; 0 when there is none.
    pub fn last_t(&self) -> usize {
        self.gates
            .iter()
            .rposition(Gate::is_t)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Hadamard gates in the `[first_t, last_t)` window. These are the ones
    /// that block phase-polynomial slicing and get gadgetised away. Without
    /// any T-family gate the window is empty.
    pub fn num_internal_h(&self) -> usize {
        let (first, last) = (self.first_t(), self.last_t());
        if first >= last {
            return 0;
        }
        self.gates[first..last]
            .iter()
            .filter(|g| g.gate_type() == GateType::H)
            .count()
    }

    pub fn t_depth_of(&self, qubit: IndexType) -> usize {
        self.gates
            .iter()
            .filter(|g| g.is_t() && g.target() == qubit)
            .count()
    }

    pub fn t_depth(&self) -> usize {
        (0..self.n_qubits as IndexType)
            .map(|q| self.t_depth_of(q))
            .max()
            .unwrap_or(0)
    }
}

impl Add for &QuantumCircuit {
    type Output = QuantumCircuit;

    /// Concatenation over the union of qubit spaces: every distinct global
    /// index seen in either mapping is registered once, and both operands'
    /// gates are remapped into the combined space.
    fn add(self, other: &QuantumCircuit) -> QuantumCircuit {
        let mut global_to_combined: HashMap<u32, u32> = HashMap::new();
        let mut combined = QuantumCircuit::default();

        for mapping in [&self.qubit_mapping, &other.qubit_mapping] {
            for &global in mapping {
                let next = global_to_combined.len() as u32;
                global_to_combined.entry(global).or_insert(next);
            }
        }
        combined.n_qubits = global_to_combined.len() as u32;

        for mapping in [&self.qubit_mapping, &other.qubit_mapping] {
            for &global in mapping {
                combined.qubit_mapping.push(global_to_combined[&global]);
            }
        }

        for circ in [self, other] {
            let local_to_combined: Vec<IndexType> = circ
                .qubit_mapping
                .iter()
                .map(|global| global_to_combined[global] as IndexType)
                .collect();
            combined
                .gates
                .extend(circ.gates.iter().map(|g| g.map_qubits(&local_to_combined)));
        }

        combined
    }
}

impl Add for QuantumCircuit {
    type Output = QuantumCircuit;

    fn add(self, other: QuantumCircuit) -> QuantumCircuit {
        &self + &other
    }
}

impl AddAssign<&QuantumCircuit> for QuantumCircuit {
    /// Splice `other`'s gates onto the end, growing the qubit space with
    /// identity-mapped qubits when `other` is wider. Both operands must
    /// already live in the same global space.
    fn add_assign(&mut self, other: &QuantumCircuit) {
        if other.n_qubits > self.n_qubits {
            for q in self.n_qubits..other.n_qubits {
                self.qubit_mapping.push(q);
            }
            self.n_qubits = other.n_qubits;
        }
        self.gates.extend_from_slice(&other.gates);
    }
}

impl fmt::Display for QuantumCircuit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "circuit on {} qubits:", self.n_qubits)?;
        for gate in &self.gates {
            writeln!(f, "  {}", gate)?;
        }
        Ok(())
    }
}
