// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! End-to-end auto-correction behavior, mirroring the reference suite's
//! encode-then-decode-then-trim flow.

use vcrypt_core::{CipherError, KryptosCipher};

const SOURCE: &str = "SLOWLYDESPARATLYSLOWLY";

#[test]
fn rejected_without_auto_correction() {
    let mut cipher = KryptosCipher::new();
    cipher.set_key("KRYPTOS").set_pad_size(16);
    assert!(matches!(
        cipher.encode(SOURCE),
        Err(CipherError::InvalidPadSize { pad_size: 16, .. })
    ));
}

#[test]
fn corrected_encode_round_trips_after_trimming() {
    let mut cipher = KryptosCipher::new();
    cipher
        .set_key("KRYPTOS")
        .set_pad_size(16)
        .set_auto_correction(true);

    let encrypted = cipher.encode(SOURCE).unwrap();
    assert!(cipher.auto_correction_count() > 0, "no correction happened");

    let decoded = cipher.decode(&encrypted).unwrap();
    let kept = decoded.chars().count() - cipher.auto_correction_count();
    let trimmed: String = decoded.chars().take(kept).collect();
    assert_eq!(trimmed, SOURCE);
}

#[test]
fn counters_reset_between_encodes() {
    let mut cipher = KryptosCipher::new();
    cipher
        .set_key("KRYPTOS")
        .set_pad_size(16)
        .set_auto_correction(true);

    cipher.encode(SOURCE).unwrap();
    assert!(cipher.auto_correction_count() > 0);

    // 23 characters already encode cleanly at pad size 16.
    cipher.encode("SLOWLYDESPARATLYSLOWLY?").unwrap();
    assert_eq!(cipher.auto_correction_count(), 0);
    assert_eq!(cipher.failed_decoding_count(), 0);
}

#[test]
fn seeded_runs_replay_identically() {
    let seed = [42u8; 32];

    let run = || {
        let mut cipher = KryptosCipher::new();
        cipher
            .set_key("KRYPTOS")
            .set_pad_size(16)
            .set_auto_correction(true)
            .set_correction_seed(Some(seed));
        let encrypted = cipher.encode(SOURCE).unwrap();
        (encrypted, cipher.auto_correction_count())
    };

    assert_eq!(run(), run());
}

#[test]
fn bounded_retries_stop_with_the_triggering_error() {
    // ABBA's duplicate letters make encode lossy, so the self-verifying
    // decode can never succeed and the loop would spin forever unbounded.
    let mut cipher = KryptosCipher::new();
    cipher
        .set_key("ABBA")
        .set_pad_size(8)
        .set_auto_correction(true)
        .set_max_correction_attempts(Some(25));

    let result = cipher.encode("ABCDEFGH");
    assert!(result.is_err());
}
