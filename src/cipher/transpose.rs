// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! Single-row transposition.
//!
//! One column chunk (at most key-length characters) is scattered into a
//! key-length sparse row: `row[i]` lands at slot `table[i]`, unused slots
//! stay `None`. Output order is by destination slot, i.e. by key rank.

use super::error::{CipherError, Result};
use super::key::TranspositionKey;

/// A key-length sparse row; `None` marks a slot no source character reached.
pub type TransposedRow = Vec<Option<char>>;

/// Transpose one chunk under the key's permutation table.
///
/// # Errors
/// [`CipherError::InvalidTranspositionSourceText`] if the chunk is longer
/// than the key. Under normal use chunks come from [`super::grid::slice_rows`]
/// at key width, so this signals a packing bug.
pub fn transpose_row(key: &TranspositionKey, row: &[char]) -> Result<TransposedRow> {
    if row.len() > key.len() {
        return Err(CipherError::InvalidTranspositionSourceText {
            text_len: row.len(),
            key_len: key.len(),
        });
    }

    let mut out: TransposedRow = vec![None; key.len()];
    for (i, &ch) in row.iter().enumerate() {
        out[key.table()[i]] = Some(ch);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kryptos() -> TranspositionKey {
        TranspositionKey::new("KRYPTOS").unwrap()
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn slots(s: &str) -> TransposedRow {
        // '.' marks an empty slot in the expectation shorthand.
        s.chars().map(|c| if c == '.' { None } else { Some(c) }).collect()
    }

    #[test]
    fn full_width_chunk() {
        assert_eq!(transpose_row(&kryptos(), &chars("?QGNIHT")).unwrap(), slots("?HNQTIG"));
        assert_eq!(transpose_row(&kryptos(), &chars("EHTDESU")).unwrap(), slots("ESDHUET"));
    }

    #[test]
    fn short_chunk_leaves_empty_slots() {
        assert_eq!(transpose_row(&kryptos(), &chars("LS")).unwrap(), slots("L..S..."));
    }

    #[test]
    fn empty_chunk_is_all_empty() {
        assert_eq!(transpose_row(&kryptos(), &[]).unwrap(), vec![None; 7]);
    }

    #[test]
    fn chunk_longer_than_key_is_rejected() {
        assert_eq!(
            transpose_row(&kryptos(), &chars("?QGNIHT!")),
            Err(CipherError::InvalidTranspositionSourceText { text_len: 8, key_len: 7 })
        );
    }

    #[test]
    fn duplicate_key_overwrites_shared_slots() {
        // Table for ABBA is [1, 3, 3, 1]: C overwrites A at slot 1, D
        // overwrites B at slot 3. Two characters are lost, as in the
        // reference implementation.
        let key = TranspositionKey::new("ABBA").unwrap();
        assert_eq!(transpose_row(&key, &chars("ABCD")).unwrap(), slots(".C.D"));
    }
}
