use serde::{Deserialize, Serialize};

use crate::circuit::{Gate, GateType, QuantumCircuit};
use crate::data_structures::{BitVector, PauliProduct};
use crate::error::{Error, Result};
use crate::optimization::{gadgetize_internal_hadamards, optimize_t_gates};
use crate::tableau::RowMajorTableau;

/// One gate of the host wire format. Two-qubit gates carry `ctrl`,
/// three-qubit gates `ctrl1`/`ctrl2`; unused fields are omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRecord {
    pub name: String,
    pub target: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctrl: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctrl1: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctrl2: Option<usize>,
}

impl GateRecord {
    pub fn single(name: &str, target: usize) -> Self {
        GateRecord {
            name: name.to_owned(),
            target,
            ctrl: None,
            ctrl1: None,
            ctrl2: None,
        }
    }

    pub fn controlled(name: &str, target: usize, ctrl: usize) -> Self {
        GateRecord {
            ctrl: Some(ctrl),
            ..GateRecord::single(name, target)
        }
    }

    pub fn doubly_controlled(name: &str, target: usize, ctrl1: usize, ctrl2: usize) -> Self {
        GateRecord {
            ctrl1: Some(ctrl1),
            ctrl2: Some(ctrl2),
            ..GateRecord::single(name, target)
        }
    }
}

fn gate_type_from_name(name: &str) -> Result<GateType> {
    Ok(match name {
        "X" => GateType::X,
        "Z" => GateType::Z,
        "HAD" => GateType::H,
        "CNOT" => GateType::Cnot,
        "T" => GateType::T,
        "Tdg" => GateType::Tdg,
        "S" => GateType::S,
        "Sdg" => GateType::Sdg,
        "Tof" => GateType::Toffoli,
        "Swap" => GateType::Swap,
        "CZ" => GateType::Cz,
        // CCZ is a Toffoli whose synthesis skips the basis change.
        "CCZ" => GateType::Toffoli,
        _ => return Err(Error::UnknownGate(name.to_owned())),
    })
}

/// Decode a host circuit: an ordered record list over `n_qubits` qubits.
pub fn circuit_from_records(n_qubits: u32, records: &[GateRecord]) -> Result<QuantumCircuit> {
    let mut circ = QuantumCircuit::new(n_qubits);
    for record in records {
        let ty = gate_type_from_name(&record.name)?;
        let gate = match ty.arity() {
            1 => Gate::single(ty, record.target),
            2 => Gate::controlled(ty, record.ctrl.unwrap_or(0), record.target),
            _ => Gate::doubly_controlled(
                ty,
                record.ctrl1.unwrap_or(0),
                record.ctrl2.unwrap_or(0),
                record.target,
            ),
        };
        circ.gates.push(gate);
    }
    Ok(circ)
}

pub fn circuit_to_records(circ: &QuantumCircuit) -> Vec<GateRecord> {
    circ.gates
        .iter()
        .map(|gate| {
            let ty = gate.gate_type();
            match ty.arity() {
                1 => GateRecord::single(ty.name(), gate.target()),
                2 => GateRecord::controlled(ty.name(), gate.target(), gate.control()),
                _ => GateRecord::doubly_controlled(
                    ty.name(),
                    gate.target(),
                    gate.control(),
                    gate.control2(),
                ),
            }
        })
        .collect()
}

/// Host wire form of a tableau: one `'0'/'1'` string of length `2n` per
/// qubit row for the Z and X parts, plus one signs string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableauRecord {
    pub z_rows: Vec<String>,
    pub x_rows: Vec<String>,
    pub signs: String,
}

pub fn tableau_from_record(record: &TableauRecord) -> Result<RowMajorTableau> {
    let rows = record.z_rows.len();
    if rows == 0 || record.x_rows.len() != rows {
        return Err(Error::RowCountMismatch {
            expected: rows.max(1),
            found: record.x_rows.len(),
        });
    }

    let row_len = record.z_rows[0].len();
    for row in record.z_rows.iter().chain(&record.x_rows) {
        if row.len() != row_len {
            return Err(Error::RowLengthMismatch {
                expected: row_len,
                found: row.len(),
            });
        }
    }
    if record.signs.len() != row_len {
        return Err(Error::RowLengthMismatch {
            expected: row_len,
            found: record.signs.len(),
        });
    }
    if row_len % 2 != 0 {
        return Err(Error::OddRowWidth { width: row_len });
    }
    let n_qubits = row_len / 2;
    if rows != n_qubits {
        return Err(Error::RowCountMismatch {
            expected: n_qubits,
            found: rows,
        });
    }

    let z_bits: Vec<Vec<bool>> = record.z_rows.iter().map(|r| bits_of(r)).collect();
    let x_bits: Vec<Vec<bool>> = record.x_rows.iter().map(|r| bits_of(r)).collect();
    let sign_bits = bits_of(&record.signs);

    let mut tab = RowMajorTableau::new(n_qubits);
    for col in 0..row_len {
        let mut z = BitVector::new(n_qubits);
        let mut x = BitVector::new(n_qubits);
        for row in 0..n_qubits {
            if z_bits[row][col] {
                z.xor_bit(row);
            }
            if x_bits[row][col] {
                x.xor_bit(row);
            }
        }
        tab.insert_pauli_product(&PauliProduct::new(z, x, sign_bits[col]), col);
    }
    Ok(tab)
}

pub fn tableau_to_record(tab: &RowMajorTableau) -> TableauRecord {
    let n = tab.n_qubits();
    let row_len = 2 * n;
    let stringify = |bv: &BitVector| -> String {
        (0..row_len).map(|c| if bv.get(c) { '1' } else { '0' }).collect()
    };
    TableauRecord {
        z_rows: (0..n).map(|r| stringify(tab.z_row(r))).collect(),
        x_rows: (0..n).map(|r| stringify(tab.x_row(r))).collect(),
        signs: stringify(tab.signs()),
    }
}

fn bits_of(row: &str) -> Vec<bool> {
    row.chars().map(|c| c == '1').collect()
}

/* ---- entry points ---- */

/// Fold an all-Clifford circuit into its stabilizer tableau.
pub fn tableau_from_circuit(circ: &QuantumCircuit) -> Result<RowMajorTableau> {
    RowMajorTableau::from_circ(circ)
}

/// Synthesise a Clifford circuit realising the tableau.
pub fn tableau_to_circuit(tab: &RowMajorTableau) -> QuantumCircuit {
    tab.to_circ(false)
}

/// Full T-count optimisation: gadgetise the internal Hadamards, then run
/// the slicing driver with TOHPE over every phase-polynomial segment.
pub fn optimize(circ: &QuantumCircuit) -> Result<QuantumCircuit> {
    let hadamard_free = gadgetize_internal_hadamards(circ);
    optimize_t_gates(&hadamard_free)
}
