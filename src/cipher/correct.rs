// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! Auto-correction retry loop around encode.
//!
//! When a `(key, pad size)` combination is rejected for the given text
//! length, appending a character changes the grid shape and may make it
//! invertible. The loop retries encode after each append and self-verifies
//! every successful encode by decoding it:
//!
//! - [`CipherError::InvalidPadSize`] → append one character picked uniformly
//!   at random from the original source text, bump the correction counter,
//!   retry.
//! - [`CipherError::InvalidUndoTransposition`] from the verification decode
//!   → the corrected text becomes the new picking baseline, another random
//!   character is appended, the correction counter restarts and the failure
//!   counter is bumped.
//!
//! Termination is not structurally guaranteed: reasonable configurations
//! converge within a few appends, but a pathological pair (e.g. a
//! duplicate-letter key, whose encode is lossy) can retry forever. Callers
//! can cap the loop via
//! [`KryptosCipher::set_max_correction_attempts`](super::engine::KryptosCipher::set_max_correction_attempts).
//!
//! Character picks use a ChaCha20 PRNG with `u32` ranges so that a fixed
//! seed replays identically on 32-bit and 64-bit targets.

use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::engine::KryptosCipher;
use super::error::{CipherError, Result};

/// Pick one character of `baseline` uniformly at random.
fn pick_char(rng: &mut ChaCha20Rng, baseline: &[char]) -> char {
    let idx = rng.gen_range(0..baseline.len() as u32) as usize;
    baseline[idx]
}

/// Run the retry loop. Called by [`KryptosCipher::encode`] when
/// auto-correction is enabled; counters on the cipher are already reset.
pub(super) fn encode_with_correction(cipher: &mut KryptosCipher, text: &str) -> Result<String> {
    let mut rng = match cipher.correction_seed {
        Some(seed) => ChaCha20Rng::from_seed(seed),
        None => {
            let mut seed = [0u8; 32];
            OsRng.fill_bytes(&mut seed);
            ChaCha20Rng::from_seed(seed)
        }
    };

    let mut baseline: Vec<char> = text.chars().collect();
    let mut working = baseline.clone();
    let mut attempts = 0usize;

    loop {
        let failure = match cipher.encode_once(&working.iter().collect::<String>()) {
            Ok(encrypted) => match cipher.decode(&encrypted) {
                Ok(_) => return Ok(encrypted),
                Err(err @ CipherError::InvalidUndoTransposition { .. }) => {
                    // The corrected text produced an encodable but still
                    // ambiguous grid; restart the correction count from it.
                    baseline = working.clone();
                    if !baseline.is_empty() {
                        working.push(pick_char(&mut rng, &baseline));
                    }
                    cipher.auto_correction_count = 0;
                    cipher.failed_decoding_count += 1;
                    err
                }
                Err(err) => return Err(err),
            },
            Err(err @ CipherError::InvalidPadSize { .. }) => {
                if !baseline.is_empty() {
                    working.push(pick_char(&mut rng, &baseline));
                }
                cipher.auto_correction_count += 1;
                err
            }
            Err(err) => return Err(err),
        };

        attempts += 1;
        if let Some(max) = cipher.max_correction_attempts {
            if attempts >= max {
                return Err(failure);
            }
        }
    }
}
