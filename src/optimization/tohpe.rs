use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::data_structures::BitVector;
use crate::error::{Error, Result};

/// Floor for the outer-iteration safety cap, so tiny instances still get a
/// few rounds before the divergence check trips.
const CAP_FLOOR: usize = 64;

/// TOHPE: kernel-search T-count reduction of a phase polynomial.
///
/// `table` is replaced by an equivalent list of Z-masks implementing the
/// same phase function up to the Clifford residue recovered by
/// `PhasePolynomial::clifford_correction` against `original`. Each
/// accepted rewrite removes at least one row; the routine stops when the
/// pair-extended matrix has no further kernel vector or no candidate
/// scores positive.
pub fn tohpe(original: &[BitVector], table: &mut Vec<BitVector>, n_qubits: usize) -> Result<()> {
    *table = original.to_vec();
    if table.is_empty() {
        return Ok(());
    }

    let mut ws = Workspace::new(table, n_qubits);
    let cap = (table.len() * n_qubits * n_qubits).max(CAP_FLOOR);

    for round in 0.. {
        if round >= cap {
            return Err(Error::KernelDiverged { cap });
        }

        let Some(y) = ws.kernel(table) else {
            break;
        };
        trace!(round, kernel_weight = y.popcount(), "kernel vector found");

        let Some((best_key, best_score)) = score_candidates(table, &y) else {
            break;
        };
        let width = table[0].size();
        let z = BitVector::from_integer(best_key, width);
        debug!(round, best_score, rows = table.len(), "applying reduction");

        // Rows touched by the kernel vector; odd-parity rewrites borrow a
        // fresh zero row so the XOR set has even size.
        let mut to_update = y.to_bools();
        to_update.resize(table.len(), false);
        if y.popcount() % 2 == 1 {
            ws.push_zero_row(table, &mut to_update);
        }

        for (idx, marked) in to_update.iter().enumerate() {
            if *marked {
                table[idx].xor_with(&z);
            }
        }

        ws.prune(table, &mut to_update);
        ws.resync(table, &to_update, n_qubits);
    }

    debug!(rows = table.len(), "tohpe finished");
    Ok(())
}

/// Score the rewrite candidates for kernel vector `y`.
///
/// A candidate key is a Z-mask encoded as an integer. Masks whose XOR
/// application would zero out a row score 1 (set, not accumulated); masks
/// that would turn a `y`-row into a copy of a non-`y` row score 2 per such
/// collision. Returns the best key, ties broken towards the smallest,
/// or `None` when nothing scores positive.
fn score_candidates(table: &[BitVector], y: &BitVector) -> Option<(u64, i64)> {
    let parity = y.popcount() % 2 == 1;
    let mut score: HashMap<u64, i64> = HashMap::new();

    for (i, row) in table.iter().enumerate() {
        if parity != y.get(i) {
            score.insert(row.to_integer(), 1);
        }
    }

    for i in 0..table.len() {
        if !y.get(i) {
            continue;
        }
        for j in 0..table.len() {
            if y.get(j) {
                continue;
            }
            let mut candidate = table[i].clone();
            candidate.xor_with(&table[j]);
            *score.entry(candidate.to_integer()).or_insert(0) += 2;
        }
    }

    let (mut best_key, mut best_score) = (0u64, 0i64);
    for (&key, &value) in &score {
        if value > best_score || (value == best_score && key < best_key) {
            best_key = key;
            best_score = value;
        }
    }
    (best_score > 0).then_some((best_key, best_score))
}

/// Append the upper-triangular pairwise products `z_q & z_r` (q < r) to a
/// row, widening it by `n * (n - 1) / 2` bits.
fn extend_row(row: &BitVector, n_qubits: usize) -> BitVector {
    let mut extended = row.clone();
    let pair_bits: Vec<bool> = (0..n_qubits)
        .tuple_combinations()
        .map(|(q, r)| row.get(q) && row.get(r))
        .collect();
    extended.extend_bools(&pair_bits);
    extended
}

/// Indices of rows that are all-zero or repeat an earlier row.
fn rows_to_remove(table: &[BitVector]) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut erase = Vec::new();
    for (i, row) in table.iter().enumerate() {
        if row.popcount() == 0 || !seen.insert(row) {
            erase.push(i);
        }
    }
    erase
}

/// GF(2) elimination state running alongside the table: the pair-extended
/// matrix, the augmented recipe matrix, and the pivot map. The three are
/// only ever mutated together, so row indices stay aligned with the table
/// across swap-removes.
struct Workspace {
    matrix: Vec<BitVector>,
    augmented: Vec<BitVector>,
    pivots: HashMap<usize, usize>,
}

impl Workspace {
    fn new(table: &[BitVector], n_qubits: usize) -> Self {
        let rows = table.len();
        let matrix = table.iter().map(|row| extend_row(row, n_qubits)).collect();
        let augmented = (0..rows)
            .map(|i| {
                let mut row = BitVector::new(rows);
                row.xor_bit(i);
                row
            })
            .collect();
        Workspace {
            matrix,
            augmented,
            pivots: HashMap::new(),
        }
    }

    /// Gaussian elimination step: reduce each unpivoted row by the known
    /// pivots; a row that reduces to zero yields its augmented recipe as a
    /// kernel witness, otherwise it becomes a new pivot and its column is
    /// cleared from the other pivot rows.
    fn kernel(&mut self, table: &[BitVector]) -> Option<BitVector> {
        let rows = table.len();
        for i in 0..rows {
            if self.pivots.contains_key(&i) {
                continue;
            }

            let known: Vec<(usize, usize)> =
                self.pivots.iter().map(|(&r, &c)| (r, c)).collect();
            for (row, col) in known {
                if self.matrix[i].get(col) {
                    self.xor_rows(row, i);
                }
            }

            let idx = self.matrix[i].get_first_one();
            if self.matrix[i].get(idx) {
                let holders: Vec<usize> = self
                    .pivots
                    .keys()
                    .copied()
                    .filter(|&row| self.matrix[row].get(idx))
                    .collect();
                for row in holders {
                    self.xor_rows(i, row);
                }
                self.pivots.insert(i, idx);
            } else {
                return Some(self.augmented[i].clone());
            }
        }
        None
    }

    /// `matrix[dst] ^= matrix[src]` and likewise for the augmented rows.
    fn xor_rows(&mut self, src: usize, dst: usize) {
        let m = self.matrix[src].clone();
        self.matrix[dst].xor_with(&m);
        let a = self.augmented[src].clone();
        self.augmented[dst].xor_with(&a);
    }

    /// Append an all-zero table row with a matching zero matrix row and a
    /// self-recipe augmented row.
    fn push_zero_row(&mut self, table: &mut Vec<BitVector>, to_update: &mut Vec<bool>) {
        table.push(BitVector::new(table[0].size()));
        self.matrix.push(BitVector::new(self.matrix[0].size()));

        let rows = table.len();
        let mut recipe = BitVector::new(rows);
        recipe.xor_bit(rows - 1);
        self.augmented.push(recipe);

        to_update.push(true);
    }

    /// Detach row index `i` from the elimination: drop its pivot, make its
    /// augmented diagonal self-held (swapping in a row that references it
    /// when needed), then eliminate every remaining reference to it.
    fn clear_column(&mut self, i: usize) {
        let Some(val) = self.pivots.remove(&i) else {
            return;
        };

        if !self.augmented[i].get(i) {
            if let Some(j) = (0..self.augmented.len()).find(|&j| self.augmented[j].get(i)) {
                self.pivots.insert(j, val);
                self.matrix.swap(i, j);
                self.augmented.swap(i, j);
            }
        }

        let col = self.matrix[i].clone();
        let aug_col = self.augmented[i].clone();
        for j in 0..self.matrix.len() {
            if j != i && self.augmented[j].get(i) {
                self.matrix[j].xor_with(&col);
                self.augmented[j].xor_with(&aug_col);
            }
        }
    }

    /// Remove zero and duplicate rows from all four parallel structures in
    /// one atomic sweep, in descending index order. After each
    /// swap-remove the recipe column of the relocated last row is moved
    /// into the hole and the vacated recipe column is erased.
    fn prune(&mut self, table: &mut Vec<BitVector>, to_update: &mut Vec<bool>) {
        let erase_idx = rows_to_remove(table);
        for &i in erase_idx.iter().rev() {
            self.clear_column(i);

            table.swap_remove(i);
            self.matrix.swap_remove(i);
            self.augmented.swap_remove(i);
            to_update.swap_remove(i);

            let new_len = table.len();
            if let Some(col) = self.pivots.remove(&new_len) {
                self.pivots.insert(i, col);
            }

            for row in self.augmented.iter_mut() {
                let bit_i = row.get(i);
                let bit_last = row.get(new_len);
                if bit_i != bit_last {
                    row.xor_bit(i);
                }
                if bit_last {
                    row.xor_bit(new_len);
                }
                row.erase_bit(new_len);
            }
        }
    }

    /// Re-seat the rewritten rows: clear their old elimination state and
    /// rebuild their matrix rows as the pair-extension of the new masks.
    fn resync(&mut self, table: &[BitVector], to_update: &[bool], n_qubits: usize) {
        for (idx, &marked) in to_update.iter().enumerate() {
            if !marked {
                continue;
            }
            self.clear_column(idx);
            self.matrix[idx] = extend_row(&table[idx], n_qubits);
        }
    }
}
