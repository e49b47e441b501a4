// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! Encode/decode orchestration for the Kryptos transposition cipher.
//!
//! Encoding reverses the text, packs it through the two grid stages,
//! transposes every chunk and reads the resulting sparse matrix down its
//! columns. The matrix shape is a function of text length, pad size and key
//! length only, so decoding re-runs the packing stages on the raw ciphertext
//! ("simulation mode", invariant check suppressed) to rediscover the shape,
//! recovers each column's true extent from the last non-empty slot, and then
//! unwinds the pipeline.
//!
//! The invariant that makes this work: reading down the matrix, the number
//! of filled slots per row must never increase. The encoder enforces it and
//! reports [`CipherError::InvalidPadSize`] otherwise.

use crate::cipher::correct;
use crate::cipher::error::{CipherError, Result};
use crate::cipher::grid;
use crate::cipher::key::TranspositionKey;
use crate::cipher::transpose::{transpose_row, TransposedRow};
use crate::trace::{self, TraceSink};

/// Reverse a text's code-point sequence.
pub fn backward(text: &str) -> String {
    text.chars().rev().collect()
}

/// Read the sparse matrix down its columns: for every slot index, append the
/// filled characters of each row in order.
pub fn downward(matrix: &[TransposedRow]) -> String {
    let width = matrix.first().map_or(0, Vec::len);
    let mut out = String::new();
    for i in 0..width {
        for row in matrix {
            if let Some(ch) = row[i] {
                out.push(ch);
            }
        }
    }
    out
}

/// Check that the filled-slot count per matrix row never increases.
///
/// `row` in the error is the 1-based index of the first row that grew. The
/// baseline resets after an all-empty row, mirroring the reference scan.
fn validate_monotonic_fill(matrix: &[TransposedRow], pad_size: usize) -> Result<()> {
    let mut filled = 0usize;
    for (idx, row) in matrix.iter().enumerate() {
        let count = row.iter().filter(|slot| slot.is_some()).count();
        if filled == 0 || count <= filled {
            filled = count;
        } else {
            return Err(CipherError::InvalidPadSize { pad_size, row: idx + 1 });
        }
    }
    Ok(())
}

/// Per-slot column lengths recovered from a simulated matrix: the last
/// non-empty row index plus one, or zero for a never-filled slot.
fn recovered_column_lengths(matrix: &[TransposedRow], key_len: usize) -> Vec<usize> {
    (0..key_len)
        .map(|i| {
            matrix
                .iter()
                .rposition(|row| row[i].is_some())
                .map_or(0, |last| last + 1)
        })
        .collect()
}

/// A recovered length is trustworthy only when the filled rows at that slot
/// form a prefix, i.e. the fill count equals the recovered extent.
fn fill_is_prefix(matrix: &[TransposedRow], lengths: &[usize]) -> bool {
    lengths.iter().enumerate().all(|(i, &len)| {
        matrix.iter().filter(|row| row[i].is_some()).count() == len
    })
}

/// Configuration accepted by [`KryptosCipher::with_options`].
#[derive(Debug, Clone, Default)]
pub struct CipherOptions {
    /// Secret key; empty or absent leaves the key unset.
    pub key: Option<String>,
    /// Pad row width; zero or absent leaves the pad size unset.
    pub pad_size: Option<usize>,
    /// Enable the auto-correction retry loop around encode.
    pub auto_correction: bool,
}

/// The Kryptos transposition cipher.
///
/// Holds mutable configuration (key, pad size, correction settings, trace
/// sink) plus the post-hoc counters of the last encode. Not safe for
/// concurrent use; give each caller its own instance.
pub struct KryptosCipher {
    key: Option<TranspositionKey>,
    pad_size: Option<usize>,
    auto_correction: bool,
    pub(super) max_correction_attempts: Option<usize>,
    pub(super) correction_seed: Option<[u8; 32]>,
    pub(super) auto_correction_count: usize,
    pub(super) failed_decoding_count: usize,
    trace: Option<Box<dyn TraceSink>>,
}

impl Default for KryptosCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl KryptosCipher {
    /// An unconfigured cipher: no key, no pad size, auto-correction off.
    pub fn new() -> Self {
        Self {
            key: None,
            pad_size: None,
            auto_correction: false,
            max_correction_attempts: None,
            correction_seed: None,
            auto_correction_count: 0,
            failed_decoding_count: 0,
            trace: None,
        }
    }

    /// Build a cipher from an options bundle.
    pub fn with_options(options: &CipherOptions) -> Self {
        let mut cipher = Self::new();
        if let Some(key) = &options.key {
            cipher.set_key(key);
        }
        if let Some(pad_size) = options.pad_size {
            cipher.set_pad_size(pad_size);
        }
        cipher.set_auto_correction(options.auto_correction);
        cipher
    }

    /// Set the secret key, replacing any previously derived permutation
    /// table. An empty key leaves the key unset (operations then fail with
    /// [`CipherError::KeyNotSet`]).
    pub fn set_key(&mut self, key: &str) -> &mut Self {
        self.key = TranspositionKey::new(key).ok();
        self
    }

    /// Set the pad row width. Zero leaves the pad size unset (operations
    /// then fail with [`CipherError::PadSizeNotSet`]).
    pub fn set_pad_size(&mut self, pad_size: usize) -> &mut Self {
        self.pad_size = if pad_size > 0 { Some(pad_size) } else { None };
        self
    }

    /// Enable or disable the auto-correction retry loop around encode.
    pub fn set_auto_correction(&mut self, enabled: bool) -> &mut Self {
        self.auto_correction = enabled;
        self
    }

    /// Bound the auto-correction loop. `None` (the default) retries without
    /// limit, like the reference implementation; with a bound, the error
    /// that triggered the last retry is returned once it is exhausted.
    pub fn set_max_correction_attempts(&mut self, attempts: Option<usize>) -> &mut Self {
        self.max_correction_attempts = attempts;
        self
    }

    /// Seed the auto-correction character picker for reproducible runs.
    /// `None` (the default) seeds from OS entropy.
    pub fn set_correction_seed(&mut self, seed: Option<[u8; 32]>) -> &mut Self {
        self.correction_seed = seed;
        self
    }

    /// Attach a diagnostic sink receiving formatted grid views, or detach it
    /// with `None`. Tracing never changes cipher behavior.
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) -> &mut Self {
        self.trace = sink;
        self
    }

    /// Characters appended by auto-correction during the last encode, since
    /// the last decode-failure reset. Callers trim this many trailing
    /// characters from the decoded text.
    pub fn auto_correction_count(&self) -> usize {
        self.auto_correction_count
    }

    /// Self-verification decode failures during the last encode.
    pub fn failed_decoding_count(&self) -> usize {
        self.failed_decoding_count
    }

    /// Encode `text`.
    ///
    /// # Errors
    /// - [`CipherError::KeyNotSet`] / [`CipherError::PadSizeNotSet`] for
    ///   missing configuration.
    /// - [`CipherError::InvalidPadSize`] when the grid shape would not be
    ///   recoverable from the ciphertext (unless auto-correction is on, in
    ///   which case the retry loop consumes it).
    pub fn encode(&mut self, text: &str) -> Result<String> {
        self.auto_correction_count = 0;
        self.failed_decoding_count = 0;

        if self.auto_correction {
            correct::encode_with_correction(self, text)
        } else {
            self.encode_once(text)
        }
    }

    /// One encode pass without retries; used directly and by the
    /// auto-correction loop.
    pub(super) fn encode_once(&mut self, text: &str) -> Result<String> {
        let reversed: Vec<char> = text.chars().rev().collect();

        if let Some(sink) = self.trace.as_deref_mut() {
            sink.emit(&trace::stage_line(&reversed.iter().collect::<String>()));
            sink.emit("");
        }

        let (_, matrix) = self.run_grid(&reversed, false)?;
        Ok(downward(&matrix))
    }

    /// Decode `ciphertext`.
    ///
    /// # Errors
    /// - [`CipherError::KeyNotSet`] / [`CipherError::PadSizeNotSet`] for
    ///   missing configuration.
    /// - [`CipherError::InvalidUndoTransposition`] when the ciphertext is
    ///   inconsistent with the shape implied by the active key and pad size
    ///   — e.g. it was produced under a different configuration. The cipher
    ///   never returns silently corrupted text.
    pub fn decode(&mut self, ciphertext: &str) -> Result<String> {
        let chars: Vec<char> = ciphertext.chars().collect();

        if let Some(sink) = self.trace.as_deref_mut() {
            sink.emit(&trace::stage_line("Started padding and transposing simulation"));
            sink.emit("");
        }

        // The shape depends only on length, pad size and key length, so
        // packing the raw ciphertext reproduces the encode-time grid.
        let (columns, matrix) = self.run_grid(&chars, true)?;

        if let Some(sink) = self.trace.as_deref_mut() {
            sink.emit(&trace::stage_line("Ended padding and transposing simulation"));
            sink.emit("");
        }

        let key = self.key.as_ref().ok_or(CipherError::KeyNotSet)?;
        let key_len = key.len();

        let lengths = recovered_column_lengths(&matrix, key_len);
        let recovered: usize = lengths.iter().sum();
        if recovered != chars.len() || !fill_is_prefix(&matrix, &lengths) {
            return Err(CipherError::InvalidUndoTransposition {
                recovered,
                expected: chars.len(),
            });
        }

        // Undo `downward`: slot i of every row was concatenated into the
        // i-th contiguous segment.
        let mut segments: Vec<&[char]> = Vec::with_capacity(key_len);
        let mut cursor = 0;
        for &len in &lengths {
            segments.push(&chars[cursor..cursor + len]);
            cursor += len;
        }

        // Undo `transpose_row`: rebuild each chunk in source order. Segment
        // characters are consumed in row order, which matches because filled
        // rows form a prefix at every slot.
        let table = key.table();
        let mut taken = vec![0usize; key_len];
        let mut chunks: Vec<Vec<char>> = Vec::with_capacity(matrix.len());
        for row in &matrix {
            let mut chunk = Vec::new();
            let mut consumed = vec![false; key_len];
            for &dest in table {
                // `consumed` guards duplicate-letter keys, whose tables map
                // two source positions onto one slot.
                if row[dest].is_none() || consumed[dest] {
                    continue;
                }
                consumed[dest] = true;
                chunk.push(segments[dest][taken[dest]]);
                taken[dest] += 1;
            }
            chunks.push(chunk);
        }

        // Undo `slice_rows` / `pad_rows` using the simulated shape, then the
        // initial reversal.
        let column_rows: Vec<usize> = columns.iter().map(Vec::len).collect();
        let rows = grid::unslice(&chunks, &column_rows);
        let mut text = grid::unpad(&rows);
        text.reverse();
        Ok(text.into_iter().collect())
    }

    /// Pack `source` through both grid stages and transpose every chunk,
    /// column-major. With `simulate` the monotonic-fill check is suppressed:
    /// decoding packs the raw ciphertext purely to rediscover the shape.
    fn run_grid(
        &mut self,
        source: &[char],
        simulate: bool,
    ) -> Result<(Vec<Vec<Vec<char>>>, Vec<TransposedRow>)> {
        let key = self.key.as_ref().ok_or(CipherError::KeyNotSet)?;
        let pad_size = self.pad_size.ok_or(CipherError::PadSizeNotSet)?;

        let rows = grid::pad_rows(source, pad_size);
        let columns = grid::slice_rows(&rows, key.len());

        let mut matrix: Vec<TransposedRow> = Vec::new();
        for column in &columns {
            for chunk in column {
                matrix.push(transpose_row(key, chunk)?);
            }
        }

        if let Some(sink) = self.trace.as_deref_mut() {
            for line in trace::column_lines(&columns) {
                sink.emit(&line);
            }
            sink.emit("");

            let column_rows: Vec<usize> = columns.iter().map(Vec::len).collect();
            for line in trace::transposed_column_lines(&matrix, &column_rows) {
                sink.emit(&line);
            }
            sink.emit("");

            for line in trace::matrix_lines(&matrix) {
                sink.emit(&line);
            }
            sink.emit("");
        }

        if !simulate {
            validate_monotonic_fill(&matrix, pad_size)?;
        }

        Ok((columns, matrix))
    }
}
