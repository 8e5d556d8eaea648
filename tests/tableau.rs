mod common;

use common::{equal_up_to_phase, generic_state, simulate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use topt::circuit::QuantumCircuit;
use topt::tableau::RowMajorTableau;
use topt::{tableau_from_circuit, tableau_to_circuit};

const TOL: f64 = 1e-9;

fn random_clifford(n: usize, depth: usize, seed: u64) -> QuantumCircuit {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut qc = QuantumCircuit::new(n as u32);
    for _ in 0..depth {
        let q = rng.random_range(0..n);
        match rng.random_range(0..8) {
            0 => qc.add_h(q),
            1 => qc.add_s(q),
            2 => qc.add_sdg(q),
            3 => qc.add_x(q),
            4 => qc.add_z(q),
            5 | 6 => {
                let mut p = rng.random_range(0..n - 1);
                if p >= q {
                    p += 1;
                }
                qc.add_cnot(q, p);
            }
            _ => {
                let mut p = rng.random_range(0..n - 1);
                if p >= q {
                    p += 1;
                }
                qc.add_cz(q, p);
            }
        }
    }
    qc
}

#[test]
fn identity_tableau_synthesises_nothing() {
    let tab = RowMajorTableau::new(3);
    assert_eq!(tab.to_circ(false).num_gates(), 0);
    assert_eq!(tab.to_circ(true).num_gates(), 0);
}

#[test]
fn bell_preparation_round_trip() {
    let mut qc = QuantumCircuit::new(2);
    qc.add_h(0);
    qc.add_cnot(0, 1);

    let tab = tableau_from_circuit(&qc).unwrap();
    assert_eq!(tab.extract_pauli_product(0).to_string(), "+XX");
    assert_eq!(tab.extract_pauli_product(1).to_string(), "+ZZ");

    let resynth = tableau_to_circuit(&tab);
    let tab2 = tableau_from_circuit(&resynth).unwrap();
    assert_eq!(tab2, tab);
}

#[test]
fn random_clifford_round_trips() {
    for seed in 0..12 {
        let qc = random_clifford(4, 60, seed);
        let tab = tableau_from_circuit(&qc).unwrap();
        let resynth = tableau_to_circuit(&tab);
        let tab2 = tableau_from_circuit(&resynth).unwrap();
        assert_eq!(tab2, tab, "round trip diverged for seed {seed}");
    }
}

#[test]
fn synthesis_preserves_the_unitary() {
    for seed in 0..8 {
        let qc = random_clifford(3, 40, seed);
        let tab = tableau_from_circuit(&qc).unwrap();
        let resynth = tableau_to_circuit(&tab);

        let input = generic_state(3);
        let direct = simulate(&qc, &input);
        let synthesised = simulate(&resynth, &input);
        assert!(
            equal_up_to_phase(&direct, &synthesised, TOL),
            "synthesised circuit changed the unitary for seed {seed}"
        );
    }
}

#[test]
fn inverse_synthesis_cancels_the_circuit() {
    for seed in 0..8 {
        let qc = random_clifford(3, 40, seed);
        let tab = tableau_from_circuit(&qc).unwrap();

        let mut cancelled = qc.clone();
        cancelled += &tab.to_circ(true);

        let input = generic_state(3);
        let output = simulate(&cancelled, &input);
        assert!(
            equal_up_to_phase(&input, &output, TOL),
            "inverse synthesis failed to cancel for seed {seed}"
        );
    }
}

#[test]
fn swap_and_sdg_fold_like_their_expansions() {
    let mut with_swap = QuantumCircuit::new(2);
    with_swap.add_swap(0, 1);
    with_swap.add_sdg(0);

    let mut expanded = QuantumCircuit::new(2);
    expanded.add_cnot(1, 0);
    expanded.add_cnot(0, 1);
    expanded.add_cnot(1, 0);
    expanded.add_s(0);
    expanded.add_s(0);
    expanded.add_s(0);

    assert_eq!(
        tableau_from_circuit(&with_swap).unwrap(),
        tableau_from_circuit(&expanded).unwrap()
    );
}
