// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! Two-stage grid packing.
//!
//! Stage one ([`pad_rows`]) slices a linear text into fixed-width pad rows,
//! the last of which may be short. Stage two ([`slice_rows`]) re-slices every
//! pad row into key-width chunks and groups chunk `k` of each row into
//! column `k`, producing a ragged columns-of-chunks structure: the final pad
//! row usually contributes a shorter chunk to its last column, and the last
//! column may have fewer rows than the rest.
//!
//! Both stages keep do/while semantics from the reference implementation:
//! an empty input still produces one (empty) row and one (empty) chunk, so
//! the shape stays self-describing for every input length.
//!
//! [`unslice`] and [`unpad`] are the inverses, driven by the per-column row
//! counts recomputed at decode time.

/// Slice `text` into rows of `pad_size` code points; the last row may be
/// shorter. An empty text yields a single empty row.
pub fn pad_rows(text: &[char], pad_size: usize) -> Vec<Vec<char>> {
    debug_assert!(pad_size > 0);

    let mut rows = Vec::with_capacity(text.len() / pad_size + 1);
    let mut skip = 0;
    loop {
        let end = (skip + pad_size).min(text.len());
        rows.push(text[skip..end].to_vec());
        skip += pad_size;
        if skip >= text.len() {
            break;
        }
    }
    rows
}

/// Slice every pad row into `width`-wide chunks and group chunk `k` of each
/// row into column `k`. Outer index of the result is the column, inner index
/// is row order within the column.
pub fn slice_rows(rows: &[Vec<char>], width: usize) -> Vec<Vec<Vec<char>>> {
    debug_assert!(width > 0);

    let mut columns: Vec<Vec<Vec<char>>> = Vec::new();
    for row in rows {
        let mut skip = 0;
        let mut idx = 0;
        loop {
            let end = (skip + width).min(row.len());
            if columns.len() <= idx {
                columns.push(Vec::new());
            }
            columns[idx].push(row[skip..end].to_vec());
            skip += width;
            idx += 1;
            if skip >= row.len() {
                break;
            }
        }
    }
    columns
}

/// Rebuild pad rows from chunks listed in column-major order.
///
/// `column_rows[k]` is the number of chunks column `k` received; the row
/// count equals `column_rows[0]` because every pad row contributes at least
/// its first chunk. Inverse of [`slice_rows`] given the original shape.
pub fn unslice(chunks: &[Vec<char>], column_rows: &[usize]) -> Vec<Vec<char>> {
    let row_count = column_rows.first().copied().unwrap_or(0);
    let mut rows: Vec<Vec<char>> = vec![Vec::new(); row_count];

    let mut next = chunks.iter();
    for &rows_in_column in column_rows {
        for row in rows.iter_mut().take(rows_in_column) {
            if let Some(chunk) = next.next() {
                row.extend_from_slice(chunk);
            }
        }
    }
    rows
}

/// Concatenate pad rows back into a linear text. Inverse of [`pad_rows`].
pub fn unpad(rows: &[Vec<char>]) -> Vec<char> {
    rows.iter().flatten().copied().collect()
}
