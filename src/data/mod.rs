//! Loader for the solver's whitespace-delimited numeric output files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};

/// A rectangular table of numbers read from a text file.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: usize,
    values: Vec<f64>,
}

impl DataTable {
    /// Number of columns per row.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.values.len() / self.columns
    }

    /// Returns row `index`, or `None` when out of range.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.columns)?;
        let end = start.checked_add(self.columns)?;
        self.values.get(start..end)
    }

    /// Returns a copy of column `index`, or `None` when out of range.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.columns).then(|| {
            self.values
                .iter()
                .skip(index)
                .step_by(self.columns)
                .copied()
                .collect()
        })
    }

    /// Consumes a single-column table into its values.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has more than one column.
    pub fn into_column(self, path: &Path) -> Result<Vec<f64>> {
        if self.columns != 1 {
            return Err(DataError::NotAColumn {
                path: path.to_path_buf(),
                found: self.columns,
            }
            .into());
        }
        Ok(self.values)
    }
}

/// Parses table text. `path` is used only for error messages.
///
/// Blank lines and anything after `#` are ignored.
///
/// # Errors
///
/// Returns an error on a non-numeric token, rows of differing width, or
/// text without any numbers.
pub fn parse_table(text: &str, path: &Path) -> Result<DataTable> {
    let mut columns = 0;
    let mut values = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default();
        let start = values.len();
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| DataError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                token: token.to_owned(),
            })?;
            values.push(value);
        }

        let found = values.len() - start;
        if found == 0 {
            continue;
        }
        if columns == 0 {
            columns = found;
        } else if found != columns {
            return Err(DataError::Ragged {
                path: path.to_path_buf(),
                line: index + 1,
                expected: columns,
                found,
            }
            .into());
        }
    }

    if values.is_empty() {
        return Err(DataError::Empty(path.to_path_buf()).into());
    }
    Ok(DataTable { columns, values })
}

/// Reads a numeric table from `path`.
///
/// # Errors
///
/// Returns [`DataError::MissingInput`] if the file cannot be read, and the
/// errors of [`parse_table`] otherwise.
pub fn load_table(path: impl AsRef<Path>) -> Result<DataTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataError::MissingInput {
        path: PathBuf::from(path),
        source,
    })?;
    let table = parse_table(&text, path)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.rows(),
        columns = table.columns(),
        "loaded table"
    );
    Ok(table)
}

/// Reads a single-column file of numbers from `path`.
///
/// # Errors
///
/// Returns the errors of [`load_table`], or an error if the file has more
/// than one column.
pub fn load_column(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    load_table(path)?.into_column(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::SpiralError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> Result<DataTable> {
        parse_table(text, Path::new("test.dat"))
    }

    #[test]
    fn single_column_with_comments_and_blanks() {
        let t = parse("# x values\n1.0\n\n  -2.5e1  \n3 # trailing\n").unwrap();
        assert_eq!(t.columns(), 1);
        assert_eq!(t.rows(), 3);
        assert_eq!(t.into_column(Path::new("test.dat")).unwrap(), vec![1.0, -25.0, 3.0]);
    }

    #[test]
    fn two_columns() {
        let t = parse("0 1\n2\t3\n4 5\n").unwrap();
        assert_eq!(t.columns(), 2);
        assert_eq!(t.row(1), Some(&[2.0, 3.0][..]));
        assert_eq!(t.column(1), Some(vec![1.0, 3.0, 5.0]));
        assert_eq!(t.column(2), None);
        assert_eq!(t.row(3), None);
    }

    #[test]
    fn row_far_out_of_range() {
        let single = parse("1\n2\n").unwrap();
        assert_eq!(single.row(usize::MAX), None);
        let wide = parse("1 2 3\n").unwrap();
        assert_eq!(wide.row(usize::MAX / 3), None);
    }

    #[test]
    fn bad_token_reports_line() {
        let err = parse("1\n2\nabc\n").unwrap_err();
        match err {
            SpiralError::Data(DataError::Parse { line, token, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_rows() {
        let err = parse("1 2\n3\n").unwrap_err();
        assert!(matches!(
            err,
            SpiralError::Data(DataError::Ragged {
                line: 2,
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            parse("# nothing\n\n"),
            Err(SpiralError::Data(DataError::Empty(_)))
        ));
    }

    #[test]
    fn multi_column_is_not_a_column() {
        let t = parse("1 2\n").unwrap();
        assert!(t.into_column(Path::new("test.dat")).is_err());
    }

    #[test]
    fn load_column_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0.5\n1.5\n2.5").unwrap();
        assert_eq!(load_column(file.path()).unwrap(), vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_column(dir.path().join("x.dat")).unwrap_err();
        assert!(matches!(
            err,
            SpiralError::Data(DataError::MissingInput { .. })
        ));
        assert!(err.to_string().contains("x.dat"));
    }
}
