// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! # vcrypt-core
//!
//! Keyed columnar transposition cipher modeled on the scheme of the Kryptos
//! sculpture's fourth panel. The plaintext is reversed, packed into a
//! fixed-width pad grid, re-sliced into key-width column chunks, each chunk
//! permuted by the rank order of the key's characters, and finally read down
//! the columns of the resulting sparse matrix.
//!
//! The ragged grid is never stored alongside the ciphertext: its shape is a
//! function of ciphertext length, pad size and key length alone, so the
//! decoder reconstructs it by re-running the packing stages on the ciphertext
//! itself. That only works when the matrix fills monotonically — the encoder
//! validates this and rejects a `(key, pad size)` combination that would make
//! decoding ambiguous ([`CipherError::InvalidPadSize`]).
//!
//! An optional auto-correction mode retries a rejected encode after appending
//! characters drawn from the source text, until the grid becomes invertible.
//!
//! These are classical, historical ciphers. They provide **no** real-world
//! confidentiality.
//!
//! # Quick start
//!
//! ```rust
//! use vcrypt_core::KryptosCipher;
//!
//! let mut cipher = KryptosCipher::new();
//! cipher.set_key("KRYPTOS").set_pad_size(86);
//!
//! let encrypted = cipher.encode("SLOWLYDESPARATLYSLOWLY?").unwrap();
//! assert_eq!(encrypted, "?YSLLAWWAYYLESSPOORLLTD");
//! assert_eq!(cipher.decode(&encrypted).unwrap(), "SLOWLYDESPARATLYSLOWLY?");
//! ```

pub mod cipher;
pub mod trace;

pub use cipher::engine::{CipherOptions, KryptosCipher};
pub use cipher::error::{CipherError, Result};
pub use cipher::key::TranspositionKey;
pub use trace::{MemorySink, StdoutSink, TraceSink};
