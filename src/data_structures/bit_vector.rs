use std::fmt;

use bitvec::field::BitField;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use crate::IndexType;

/// Packed GF(2) vector, stored little-endian in 64-bit words.
///
/// All bulk operations run word-parallel over the raw storage and keep the
/// padding bits of the final word clear, so `popcount` and word-wise
/// comparisons never see stale data. Reads past the end return 0 and writes
/// past the end are no-ops.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitVector {
    bits: BitVec<u64, Lsb0>,
}

impl BitVector {
    /// All-zero vector of `size` bits.
    pub fn new(size: usize) -> Self {
        BitVector {
            bits: BitVec::repeat(false, size),
        }
    }

    pub fn from_bools(values: &[bool]) -> Self {
        let mut bv = BitVector::new(0);
        bv.extend_bools(values);
        bv
    }

    /// Little-endian decode: bit `i` of `value` becomes bit `i` of the
    /// vector. Bits at positions >= 64 stay clear.
    pub fn from_integer(value: u64, size: usize) -> Self {
        let mut bv = BitVector::new(size);
        let used = size.min(u64::BITS as usize);
        if used > 0 {
            bv.bits[..used].store_le(value & mask_up_to(used));
        }
        bv
    }

    /// Little-endian encode of the first 64 bits. Only meaningful for
    /// vectors no wider than 64 bits; the TOHPE scoring keys rely on this.
    pub fn to_integer(&self) -> u64 {
        let used = self.bits.len().min(u64::BITS as usize);
        if used == 0 {
            return 0;
        }
        self.bits[..used].load_le()
    }

    pub fn size(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bounds-safe read; out-of-range positions are 0.
    pub fn get(&self, idx: IndexType) -> bool {
        self.bits.get(idx).map(|b| *b).unwrap_or(false)
    }

    /// Toggle bit `idx`; no-op when out of range.
    pub fn xor_bit(&mut self, idx: IndexType) {
        if idx < self.bits.len() {
            let value = self.bits[idx];
            self.bits.set(idx, !value);
        }
    }

    /// `self ^= other`, over the words both vectors share.
    pub fn xor_with(&mut self, other: &BitVector) {
        for (word, rhs) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *word ^= rhs;
        }
        self.bits.set_uninitialized(false);
    }

    /// `self &= other`; words of `self` past the end of `other` become 0.
    pub fn and_with(&mut self, other: &BitVector) {
        let rhs_words = other.bits.as_raw_slice();
        for (i, word) in self.bits.as_raw_mut_slice().iter_mut().enumerate() {
            match rhs_words.get(i) {
                Some(rhs) => *word &= rhs,
                None => *word = 0,
            }
        }
        self.bits.set_uninitialized(false);
    }

    /// Bitwise NOT over the defined bits.
    pub fn negate(&mut self) {
        for word in self.bits.as_raw_mut_slice() {
            *word = !*word;
        }
        self.bits.set_uninitialized(false);
    }

    pub fn swap_with(&mut self, other: &mut BitVector) {
        std::mem::swap(&mut self.bits, &mut other.bits);
    }

    /// Append bits at the end, growing the vector.
    pub fn extend_bools(&mut self, values: &[bool]) {
        self.bits.extend(values.iter().copied());
    }

    /// Remove bit `idx`, shifting every later bit down by one (across word
    /// boundaries). No-op when out of range.
    pub fn erase_bit(&mut self, idx: IndexType) {
        if idx < self.bits.len() {
            self.bits.remove(idx);
        }
    }

    pub fn popcount(&self) -> usize {
        self.bits.count_ones()
    }

    /// Position of the lowest set bit, or 0 when none is set. Callers must
    /// disambiguate "no bit" from "bit 0" with `popcount` or a `get` check.
    pub fn get_first_one(&self) -> IndexType {
        self.bits.first_one().unwrap_or(0)
    }

    /// Indices of set bits in `[0, nb_bits)`.
    pub fn get_all_ones(&self, nb_bits: usize) -> Vec<IndexType> {
        let end = nb_bits.min(self.bits.len());
        self.bits[..end].iter_ones().collect()
    }

    pub fn to_bools(&self) -> Vec<bool> {
        self.bits.iter().by_vals().collect()
    }
}

fn mask_up_to(bits: usize) -> u64 {
    if bits >= u64::BITS as usize {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pattern: &str) -> BitVector {
        BitVector::from_bools(&pattern.chars().map(|c| c == '1').collect::<Vec<_>>())
    }

    #[test]
    fn new_is_all_zero() {
        let bv = BitVector::new(130);
        assert_eq!(bv.size(), 130);
        assert_eq!(bv.popcount(), 0);
    }

    #[test]
    fn out_of_range_access() {
        let mut bv = BitVector::new(3);
        assert!(!bv.get(3));
        assert!(!bv.get(1000));
        bv.xor_bit(3);
        bv.xor_bit(1000);
        assert_eq!(bv.popcount(), 0);
    }

    #[test]
    fn xor_is_involutive() {
        let mut a = sample("1011001110");
        let b = sample("0111010001");
        let original = a.clone();
        a.xor_with(&b);
        a.xor_with(&b);
        assert_eq!(a, original);
    }

    #[test]
    fn popcount_inclusion_exclusion() {
        let a = sample("110101101");
        let b = sample("011100110");
        let mut xored = a.clone();
        xored.xor_with(&b);
        let mut anded = a.clone();
        anded.and_with(&b);
        assert_eq!(
            xored.popcount(),
            a.popcount() + b.popcount() - 2 * anded.popcount()
        );
    }

    #[test]
    fn xor_with_shorter_operand() {
        let mut a = BitVector::new(100);
        a.xor_bit(0);
        a.xor_bit(70);
        let mut b = BitVector::new(10);
        b.xor_bit(0);
        b.xor_bit(3);
        a.xor_with(&b);
        assert!(!a.get(0));
        assert!(a.get(3));
        assert!(a.get(70));
        assert_eq!(a.popcount(), 2);
    }

    #[test]
    fn and_with_zeroes_excess_words() {
        let mut a = BitVector::new(130);
        a.xor_bit(2);
        a.xor_bit(65);
        a.xor_bit(129);
        let mut b = BitVector::new(64);
        b.xor_bit(2);
        a.and_with(&b);
        assert!(a.get(2));
        assert_eq!(a.popcount(), 1);
    }

    #[test]
    fn negate_keeps_padding_clear() {
        let mut a = BitVector::new(65);
        a.negate();
        assert_eq!(a.popcount(), 65);
        a.negate();
        assert_eq!(a.popcount(), 0);
    }

    #[test]
    fn erase_bit_concatenates_around_hole() {
        let a = sample("1101001011");
        for i in 0..a.size() {
            let mut erased = a.clone();
            erased.erase_bit(i);
            assert_eq!(erased.size(), a.size() - 1);
            let mut expected = a.to_bools();
            expected.remove(i);
            assert_eq!(erased.to_bools(), expected);
        }
    }

    #[test]
    fn erase_bit_across_word_boundary() {
        let mut a = BitVector::new(128);
        a.xor_bit(64);
        a.xor_bit(127);
        a.erase_bit(0);
        assert_eq!(a.size(), 127);
        assert!(a.get(63));
        assert!(a.get(126));
        assert_eq!(a.popcount(), 2);
    }

    #[test]
    fn first_one_and_all_ones() {
        let a = sample("00101100");
        assert_eq!(a.get_first_one(), 2);
        assert_eq!(a.get_all_ones(8), vec![2, 4, 5]);
        assert_eq!(a.get_all_ones(5), vec![2, 4]);
        let empty = BitVector::new(8);
        assert_eq!(empty.get_first_one(), 0);
    }

    #[test]
    fn integer_codec_round_trip() {
        for value in [0u64, 1, 0b1011, 0xdead_beef, u64::MAX] {
            let bv = BitVector::from_integer(value, 64);
            assert_eq!(bv.to_integer(), value);
        }
        let narrow = BitVector::from_integer(0b1011, 3);
        assert_eq!(narrow.to_integer(), 0b011);
    }

    #[test]
    fn display_matches_bit_order() {
        let a = sample("10110");
        assert_eq!(a.to_string(), "10110");
    }
}
