// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! The columnar transposition cipher core.
//!
//! The pipeline stages are exposed as independently testable pure functions:
//!
//! 1. [`engine::backward`] — reverse the code-point sequence
//! 2. [`grid::pad_rows`] — slice into fixed-width pad rows
//! 3. [`grid::slice_rows`] — re-slice rows into key-width column chunks
//! 4. [`transpose::transpose_row`] — permute one chunk by key rank
//! 5. [`engine::downward`] — read the sparse matrix down its columns
//!
//! [`engine::KryptosCipher`] orchestrates them for encode and decode, and
//! [`correct`] wraps the encode path in the auto-correction retry loop.

pub mod engine;
pub mod error;
pub mod grid;
pub mod key;
pub mod transpose;

mod correct;

pub use engine::{CipherOptions, KryptosCipher};
pub use error::{CipherError, Result};
