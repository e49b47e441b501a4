// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! Error types for the transposition cipher pipeline.
//!
//! [`CipherError`] covers missing configuration, packing violations and the
//! two shape errors that drive the auto-correction loop.

use std::fmt;

/// Errors that can occur during transposition encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// No key has been configured on the cipher.
    KeyNotSet,
    /// No pad size has been configured on the cipher.
    PadSizeNotSet,
    /// A column chunk is longer than the key. Chunks are produced by slicing
    /// pad rows at key width, so this indicates a packing bug rather than a
    /// bad input.
    InvalidTranspositionSourceText {
        /// Length of the offending chunk.
        text_len: usize,
        /// Length of the configured key.
        key_len: usize,
    },
    /// The chosen pad size produces a ragged matrix whose fill increases
    /// between two rows, which makes the shape unrecoverable from the
    /// ciphertext alone. `row` is the 1-based matrix row where the fill grew.
    InvalidPadSize { pad_size: usize, row: usize },
    /// The per-column lengths recovered from the simulated matrix do not sum
    /// to the ciphertext length: the ciphertext was not produced with the
    /// active key and pad size.
    InvalidUndoTransposition {
        /// Sum of the recovered column lengths.
        recovered: usize,
        /// Actual ciphertext length.
        expected: usize,
    },
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotSet => write!(f, "you must set a key first"),
            Self::PadSizeNotSet => write!(f, "you must set a pad size first"),
            Self::InvalidTranspositionSourceText { text_len, key_len } => write!(
                f,
                "cannot transpose a {text_len}-character chunk with a {key_len}-character key: text is too long"
            ),
            Self::InvalidPadSize { pad_size, row } => write!(
                f,
                "pad size {pad_size} is not valid for this text (matrix fill grows between rows {} and {row}); \
                 decryption would not be possible — decrease or increase the pad size",
                row - 1
            ),
            Self::InvalidUndoTransposition { recovered, expected } => write!(
                f,
                "recovered column lengths sum to {recovered} but the ciphertext has {expected} characters; \
                 it was not produced with this key and pad size"
            ),
        }
    }
}

impl std::error::Error for CipherError {}

pub type Result<T> = std::result::Result<T, CipherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_rows() {
        let err = CipherError::InvalidPadSize { pad_size: 17, row: 15 };
        let msg = err.to_string();
        assert!(msg.contains("17"), "{msg}");
        assert!(msg.contains("rows 14 and 15"), "{msg}");
    }

    #[test]
    fn display_reports_length_mismatch() {
        let err = CipherError::InvalidUndoTransposition { recovered: 23, expected: 22 };
        let msg = err.to_string();
        assert!(msg.contains("23") && msg.contains("22"), "{msg}");
    }
}
