// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! Key handling and transposition-table derivation.
//!
//! The transposition table maps each key position to the rank of its
//! character in the ascending sort of the key. For `"KRYPTOS"` the sorted
//! key is `KOPRSTY`, so the table is `[0, 3, 6, 2, 5, 1, 4]`.
//!
//! Duplicate key characters deliberately receive the **last** matching
//! sorted rank rather than the first. This reproduces the reference
//! implementation's scan, which never breaks out of the inner loop once a
//! match is found. For duplicate-letter keys the permutation is therefore
//! not injective and the cipher loses characters; see the tests below.

use super::error::{CipherError, Result};

/// Build the transposition table for a key given as a code-point slice.
///
/// `table[i]` is the destination rank of `key[i]` among the key's characters
/// sorted ascending by code point. Pure and deterministic.
pub fn build_table(key: &[char]) -> Vec<usize> {
    let mut sorted = key.to_vec();
    sorted.sort_unstable();

    let mut table = vec![0usize; key.len()];
    for (i, ch) in key.iter().enumerate() {
        for (j, sorted_ch) in sorted.iter().enumerate() {
            if ch == sorted_ch {
                // No break: the last matching rank wins for duplicates.
                table[i] = j;
            }
        }
    }
    table
}

/// A secret key together with its memoized transposition table.
///
/// Immutable once constructed; [`KryptosCipher`](super::engine::KryptosCipher)
/// rebuilds the whole value when the key changes, which is what invalidates
/// the cached table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspositionKey {
    chars: Vec<char>,
    table: Vec<usize>,
}

impl TranspositionKey {
    /// Build a key from a string. Returns `KeyNotSet` for an empty string:
    /// a zero-width key cannot slice the grid.
    pub fn new(key: &str) -> Result<Self> {
        let chars: Vec<char> = key.chars().collect();
        if chars.is_empty() {
            return Err(CipherError::KeyNotSet);
        }
        let table = build_table(&chars);
        Ok(Self { chars, table })
    }

    /// Key length in code points.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`; empty keys are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The memoized transposition table.
    pub fn table(&self) -> &[usize] {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kryptos_table() {
        assert_eq!(build_table(&"KRYPTOS".chars().collect::<Vec<_>>()), [0, 3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn single_character_key() {
        assert_eq!(build_table(&['X']), [0]);
    }

    #[test]
    fn duplicate_characters_take_the_last_sorted_rank() {
        // Sorted "ABBA" is AABB. Both A positions get rank 1 (not 0), both
        // B positions get rank 3 (not 2) — the reference scan keeps going
        // after a match, so the last equal rank sticks.
        assert_eq!(build_table(&"ABBA".chars().collect::<Vec<_>>()), [1, 3, 3, 1]);
    }

    #[test]
    fn all_same_character_collapses_to_one_rank() {
        assert_eq!(build_table(&"AAA".chars().collect::<Vec<_>>()), [2, 2, 2]);
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(TranspositionKey::new(""), Err(CipherError::KeyNotSet));
    }

    #[test]
    fn key_memoizes_table() {
        let key = TranspositionKey::new("KRYPTOS").unwrap();
        assert_eq!(key.len(), 7);
        assert_eq!(key.table(), [0, 3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn multibyte_key_ranks_by_code_point() {
        // Ż (U+017B) sorts above ASCII letters.
        let key = TranspositionKey::new("ŻAB").unwrap();
        assert_eq!(key.table(), [2, 0, 1]);
    }
}
