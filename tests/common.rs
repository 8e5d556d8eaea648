#![allow(dead_code)]

use num_complex::Complex64;
use topt::circuit::{GateType, QuantumCircuit};

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Dense statevector over `n` qubits; qubit `q` is bit `q` of the index.
pub fn basis_state(n_qubits: usize, index: usize) -> Vec<Complex64> {
    let mut state = vec![Complex64::new(0.0, 0.0); 1 << n_qubits];
    state[index] = Complex64::new(1.0, 0.0);
    state
}

/// A fixed full-support state with pairwise-distinct amplitudes, so any
/// wrong permutation or phase shows up in a comparison.
pub fn generic_state(n_qubits: usize) -> Vec<Complex64> {
    let dim = 1 << n_qubits;
    let mut state: Vec<Complex64> = (0..dim)
        .map(|k| Complex64::new(1.0 + k as f64, 0.5 - 0.3 * k as f64))
        .collect();
    normalize(&mut state);
    state
}

pub fn normalize(state: &mut [Complex64]) {
    let norm = state.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
    for amp in state.iter_mut() {
        *amp /= norm;
    }
}

/// Grow the state space by `extra` fresh qubits initialised to |0>.
pub fn with_zero_ancillas(state: &[Complex64], extra: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); state.len() << extra];
    out[..state.len()].copy_from_slice(state);
    out
}

/// Project qubit `q` onto |+> (unnormalised).
pub fn project_plus(state: &[Complex64], qubit: usize) -> Vec<Complex64> {
    let mask = 1usize << qubit;
    let mut out = vec![Complex64::new(0.0, 0.0); state.len()];
    for i in 0..state.len() {
        if i & mask == 0 {
            let plus = (state[i] + state[i | mask]) * 0.5;
            out[i] = plus;
            out[i | mask] = plus;
        }
    }
    out
}

pub fn apply_circuit(circ: &QuantumCircuit, state: &mut Vec<Complex64>) {
    assert_eq!(state.len(), 1 << circ.n_qubits);
    for gate in &circ.gates {
        apply_gate(gate.gate_type(), gate.target(), gate.control(), gate.control2(), state);
    }
}

pub fn simulate(circ: &QuantumCircuit, state: &[Complex64]) -> Vec<Complex64> {
    let mut out = state.to_vec();
    apply_circuit(circ, &mut out);
    out
}

fn apply_gate(
    ty: GateType,
    target: usize,
    control: usize,
    control2: usize,
    state: &mut [Complex64],
) {
    let t = 1usize << target;
    let omega = Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4);
    match ty {
        GateType::X => {
            for i in 0..state.len() {
                if i & t == 0 {
                    state.swap(i, i | t);
                }
            }
        }
        GateType::Z => phase_where(state, |i| i & t != 0, Complex64::new(-1.0, 0.0)),
        GateType::S => phase_where(state, |i| i & t != 0, Complex64::new(0.0, 1.0)),
        GateType::Sdg => phase_where(state, |i| i & t != 0, Complex64::new(0.0, -1.0)),
        GateType::T => phase_where(state, |i| i & t != 0, omega),
        GateType::Tdg => phase_where(state, |i| i & t != 0, omega.conj()),
        GateType::H => {
            for i in 0..state.len() {
                if i & t == 0 {
                    let (a, b) = (state[i], state[i | t]);
                    state[i] = (a + b) * FRAC_1_SQRT_2;
                    state[i | t] = (a - b) * FRAC_1_SQRT_2;
                }
            }
        }
        GateType::Cnot => {
            let c = 1usize << control;
            for i in 0..state.len() {
                if i & c != 0 && i & t == 0 {
                    state.swap(i, i | t);
                }
            }
        }
        GateType::Cz => {
            let c = 1usize << control;
            phase_where(state, |i| i & c != 0 && i & t != 0, Complex64::new(-1.0, 0.0));
        }
        GateType::Swap => {
            let c = 1usize << control;
            for i in 0..state.len() {
                if i & t != 0 && i & c == 0 {
                    state.swap(i, (i & !t) | c);
                }
            }
        }
        GateType::Toffoli => {
            let c1 = 1usize << control;
            let c2 = 1usize << control2;
            for i in 0..state.len() {
                if i & c1 != 0 && i & c2 != 0 && i & t == 0 {
                    state.swap(i, i | t);
                }
            }
        }
    }
}

fn phase_where(state: &mut [Complex64], pred: impl Fn(usize) -> bool, factor: Complex64) {
    for (i, amp) in state.iter_mut().enumerate() {
        if pred(i) {
            *amp *= factor;
        }
    }
}

/// Whether `a` and `b` agree as rays: `b ~ e^{i phi} a` for some phi.
pub fn equal_up_to_phase(a: &[Complex64], b: &[Complex64], tolerance: f64) -> bool {
    assert_eq!(a.len(), b.len());
    let pivot = (0..a.len()).max_by(|&i, &j| {
        a[i].norm().partial_cmp(&a[j].norm()).unwrap()
    });
    let Some(pivot) = pivot else {
        return true;
    };
    if a[pivot].norm() < tolerance {
        return b.iter().all(|amp| amp.norm() < tolerance);
    }
    let phase = b[pivot] / a[pivot];
    if (phase.norm() - 1.0).abs() > tolerance {
        return false;
    }
    a.iter()
        .zip(b)
        .all(|(x, y)| (y - phase * x).norm() < tolerance)
}

/// Whether `b` is proportional to `a` (used after post-selection, where
/// the norm shrinks with the acceptance probability).
pub fn proportional(a: &[Complex64], b: &[Complex64], tolerance: f64) -> bool {
    let mut scaled = b.to_vec();
    let norm = scaled.iter().map(|x| x.norm_sqr()).sum::<f64>().sqrt();
    assert!(norm > tolerance, "post-selected state has vanished");
    for amp in scaled.iter_mut() {
        *amp /= norm;
    }
    equal_up_to_phase(a, &scaled, tolerance)
}
