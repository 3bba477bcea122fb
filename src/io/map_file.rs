//! MovingAI `.map` file parsing.
//!
//! The format carries a four-line header followed by one ASCII row per grid
//! row, top row first:
//!
//! ```text
//! type octile
//! height 3
//! width 5
//! map
//! .....
//! ..@..
//! .....
//! ```
//!
//! `.`, `G` and `S` are traversable; every other character is blocked.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use thiserror::Error;

/// Errors raised while reading a map file.
#[derive(Error, Debug)]
pub enum MapFormatError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of file in header")]
    TruncatedHeader,

    #[error("line {line}: expected `{expected}`, got `{got}`")]
    BadHeaderField {
        line: usize,
        expected: &'static str,
        got: String,
    },

    #[error("line {line}: {message}")]
    BadValue { line: usize, message: String },

    #[error("map body holds {actual} rows, header promised {expected}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("line {line}: row holds {actual} cells, header promised {expected}")]
    RowWidthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },
}

/// A loaded boolean cell map, row-major with the top row first.
#[derive(Clone, Debug)]
pub struct GridMap {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// `true` = traversable, row-major, top row first.
    pub cells: Vec<bool>,
}

impl GridMap {
    /// Build a map from ASCII rows (`.`, `G`, `S` traversable).
    ///
    /// Returns `None` when rows are empty or ragged.
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let cells = rows
            .iter()
            .flat_map(|row| row.chars().map(traversable))
            .collect();
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Cell traversability in top-down coordinates; anything outside the
    /// grid is blocked.
    #[inline]
    pub fn is_traversable(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.cells[y as usize * self.width + x as usize]
    }
}

#[inline]
fn traversable(c: char) -> bool {
    matches!(c, '.' | 'G' | 'S')
}

fn header_field(
    line: Option<std::io::Result<String>>,
    line_no: usize,
    expected: &'static str,
) -> Result<String, MapFormatError> {
    let line = line.ok_or(MapFormatError::TruncatedHeader)??;
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some(tok) if tok == expected => {}
        other => {
            return Err(MapFormatError::BadHeaderField {
                line: line_no,
                expected,
                got: other.unwrap_or("").to_string(),
            })
        }
    }
    Ok(tokens.next().unwrap_or("").to_string())
}

/// Parse a MovingAI map from a reader.
pub fn parse_map<R: Read>(reader: R) -> Result<GridMap, MapFormatError> {
    let mut lines = BufReader::new(reader).lines();

    let kind = header_field(lines.next(), 1, "type")?;
    if kind != "octile" {
        return Err(MapFormatError::BadValue {
            line: 1,
            message: format!("unsupported map type `{kind}`"),
        });
    }
    let height: usize = header_field(lines.next(), 2, "height")?
        .parse()
        .map_err(|e| MapFormatError::BadValue {
            line: 2,
            message: format!("bad height: {e}"),
        })?;
    let width: usize = header_field(lines.next(), 3, "width")?
        .parse()
        .map_err(|e| MapFormatError::BadValue {
            line: 3,
            message: format!("bad width: {e}"),
        })?;
    let map_line = lines.next().ok_or(MapFormatError::TruncatedHeader)??;
    if map_line.trim() != "map" {
        return Err(MapFormatError::BadHeaderField {
            line: 4,
            expected: "map",
            got: map_line,
        });
    }

    let mut cells = Vec::with_capacity(width * height);
    let mut rows = 0usize;
    for (i, row) in lines.enumerate() {
        let row = row?;
        if row.is_empty() {
            continue;
        }
        if rows == height {
            return Err(MapFormatError::RowCountMismatch {
                expected: height,
                actual: rows + 1,
            });
        }
        let count = row.chars().count();
        if count != width {
            return Err(MapFormatError::RowWidthMismatch {
                line: 5 + i,
                expected: width,
                actual: count,
            });
        }
        cells.extend(row.chars().map(traversable));
        rows += 1;
    }
    if rows != height {
        return Err(MapFormatError::RowCountMismatch {
            expected: height,
            actual: rows,
        });
    }

    Ok(GridMap {
        width,
        height,
        cells,
    })
}

/// Load a MovingAI map from disk.
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<GridMap, MapFormatError> {
    parse_map(File::open(path)?)
}
