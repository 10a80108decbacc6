//! Forward-only line cursor over a finite-source file.
//!
//! The file alternates between header blocks (lines starting with `%`) and
//! numeric data blocks. The cursor hands out one block at a time and never
//! moves backwards, so the position after a data block is always the first
//! line of whatever follows it.

use crate::error::{FspError, FspResult};

/// Comment marker that starts every header line.
pub const HEADER_MARKER: char = '%';

/// One physical line with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn is_header(&self) -> bool {
        self.text.trim_start().starts_with(HEADER_MARKER)
    }
}

/// Cursor over the lines of an in-memory file.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// 1-based number of the next line to be read.
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// True once every line has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }

    fn skip_blank(&mut self) {
        while self.pos < self.lines.len() && self.lines[self.pos].trim().is_empty() {
            self.pos += 1;
        }
    }

    /// Next non-blank line without consuming it.
    pub fn peek(&mut self) -> Option<Line<'a>> {
        self.skip_blank();
        self.lines.get(self.pos).map(|&text| Line {
            number: self.pos + 1,
            text,
        })
    }

    /// True when the next non-blank line is a data row.
    pub fn at_data(&mut self) -> bool {
        self.peek().is_some_and(|line| !line.is_header())
    }

    /// Consume consecutive header lines (blank lines are skipped).
    pub fn header_block(&mut self) -> Vec<Line<'a>> {
        let mut block = Vec::new();
        while let Some(line) = self.peek() {
            if !line.is_header() {
                break;
            }
            block.push(line);
            self.pos += 1;
        }
        block
    }

    /// Read exactly `count` numeric rows of `width` columns each.
    ///
    /// The block must be followed by a header line or the end of the file;
    /// a short or overlong block is a [`FspError::RowCount`].
    pub fn data_rows(&mut self, segment: usize, count: usize, width: usize) -> FspResult<Vec<Vec<f64>>> {
        // The declared count is untrusted; never reserve past the end of the file
        let remaining = self.lines.len().saturating_sub(self.pos);
        let mut rows = Vec::with_capacity(count.min(remaining));
        while rows.len() < count {
            match self.peek() {
                Some(line) if !line.is_header() => {
                    rows.push(parse_row(line, width)?);
                    self.pos += 1;
                }
                _ => {
                    return Err(FspError::RowCount {
                        segment,
                        expected: count,
                        found: rows.len(),
                    })
                }
            }
        }

        let mut extra = 0;
        while self.at_data() {
            extra += 1;
            self.pos += 1;
        }
        if extra > 0 {
            return Err(FspError::RowCount {
                segment,
                expected: count,
                found: count + extra,
            });
        }
        Ok(rows)
    }
}

fn parse_row(line: Line<'_>, width: usize) -> FspResult<Vec<f64>> {
    let values = line
        .text
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| FspError::InvalidNumber {
                line: line.number,
                token: token.to_string(),
            })
        })
        .collect::<FspResult<Vec<f64>>>()?;
    if values.len() != width {
        return Err(FspError::ColumnCount {
            line: line.number,
            expected: width,
            found: values.len(),
        });
    }
    Ok(values)
}
