// Copyright (c) 2026 Tomasz Kuter
// SPDX-License-Identifier: BSD-3-Clause
// https://github.com/loculus/vcrypt

//! Diagnostic tracing of intermediate cipher grids.
//!
//! A [`TraceSink`] configured on the engine receives formatted views of the
//! pad grid, the sliced columns and the transposed matrix as encoding or
//! decoding runs. Purely observational — the cipher never depends on a sink
//! being present, and there is no process-wide debug toggle.
//!
//! Line formats follow the reference debugger: pad rows are numbered from 1
//! with their chunks space-separated, the flattened matrix is numbered with a
//! wider gutter and grouped in blocks of four characters, with blanks for
//! empty slots.

use crate::cipher::transpose::TransposedRow;

/// Characters per group in the matrix view.
const MATRIX_GROUP: usize = 4;

/// A sink accepting formatted trace lines.
pub trait TraceSink {
    fn emit(&mut self, line: &str);
}

/// Sink that prints every trace line to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl TraceSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Sink that buffers trace lines in memory; used by tests and debug demos.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured lines, in emission order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl TraceSink for MemorySink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// `0 | <text>` — the reversed source, or a stage banner.
pub(crate) fn stage_line(text: &str) -> String {
    format!("0 | {text}")
}

/// Row view of a columns-of-chunks grid: one line per pad row, chunks
/// space-separated, 1-based index right-aligned in a 3-character gutter.
pub(crate) fn column_lines(columns: &[Vec<Vec<char>>]) -> Vec<String> {
    let row_count = columns.first().map_or(0, Vec::len);
    (0..row_count)
        .map(|j| {
            let chunks: Vec<String> = columns
                .iter()
                .filter_map(|col| col.get(j))
                .map(|chunk| chunk.iter().collect())
                .collect();
            format!("{:>3} | {}", j + 1, chunks.join(" "))
        })
        .collect()
}

/// Row view of the transposed grid: like [`column_lines`], but each chunk is
/// its transposed row with empty slots dropped, the way the reference
/// debugger joins them.
pub(crate) fn transposed_column_lines(
    matrix: &[TransposedRow],
    column_rows: &[usize],
) -> Vec<String> {
    let row_count = column_rows.first().copied().unwrap_or(0);
    let mut lines = Vec::with_capacity(row_count);

    for j in 0..row_count {
        let mut chunks = Vec::new();
        let mut base = 0;
        for &rows_in_column in column_rows {
            if j < rows_in_column {
                let joined: String = matrix[base + j].iter().flatten().collect();
                chunks.push(joined);
            }
            base += rows_in_column;
        }
        lines.push(format!("{:>3} | {}", j + 1, chunks.join(" ")));
    }
    lines
}

/// Flattened matrix view: one line per transposed row, slots grouped in
/// blocks of four with `' '` for empty slots, 1-based index right-aligned in
/// a 4-character gutter.
pub(crate) fn matrix_lines(matrix: &[TransposedRow]) -> Vec<String> {
    matrix
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let mut line = format!("{:>4} | ", r + 1);
            for (i, slot) in row.iter().enumerate() {
                if i > 0 && i % MATRIX_GROUP == 0 {
                    line.push(' ');
                }
                line.push(slot.unwrap_or(' '));
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn memory_sink_captures_in_order() {
        let mut sink = MemorySink::new();
        sink.emit("first");
        sink.emit("second");
        assert_eq!(sink.lines(), ["first", "second"]);
    }

    #[test]
    fn column_view_numbers_rows_from_one() {
        let columns = vec![
            vec![chars("NAHGNIL"), chars("DEVOMER")],
            vec![chars("BMERTHT"), chars("SAWYAWR")],
            vec![chars("IW"), chars("OO")],
        ];
        assert_eq!(
            column_lines(&columns),
            ["  1 | NAHGNIL BMERTHT IW", "  2 | DEVOMER SAWYAWR OO"]
        );
    }

    #[test]
    fn matrix_view_groups_by_four_and_blanks_empty_slots() {
        let matrix = vec![
            "NIGALNH".chars().map(Some).collect::<Vec<_>>(),
            vec![Some('I'), None, None, Some('W'), None, None, None],
        ];
        assert_eq!(matrix_lines(&matrix), ["   1 | NIGA LNH", "   2 | I  W    "]);
    }

    #[test]
    fn transposed_view_drops_empty_slots() {
        let matrix = vec![
            "NIGALNH".chars().map(Some).collect::<Vec<_>>(),
            vec![Some('I'), None, None, Some('W'), None, None, None],
        ];
        assert_eq!(
            transposed_column_lines(&matrix, &[1, 1]),
            ["  1 | NIGALNH IW"]
        );
    }
}
