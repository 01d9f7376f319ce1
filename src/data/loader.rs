use std::path::Path;

use super::error::LogError;
use super::model::{Log, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a whitespace-delimited numeric log file.
///
/// Layout: one record per line, fields separated by any run of whitespace,
/// each field a decimal float (`-1.5`, `2e-3`, ...). No header.
/// Blank lines are skipped; they never stand for a timestep.
pub fn read_log(path: &Path) -> Result<Log, LogError> {
    read_with(path, true)
}

/// Like [`read_log`] but records may differ in width. Used for weights logs,
/// whose per-step shape is checked against the estimate instead.
pub fn read_ragged_log(path: &Path) -> Result<Log, LogError> {
    read_with(path, false)
}

fn read_with(path: &Path, uniform: bool) -> Result<Log, LogError> {
    let text = std::fs::read_to_string(path).map_err(|source| LogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let log = parse_records(&text, path, uniform)?;
    log::debug!(
        "{}: {} records of arity {}",
        path.display(),
        log.len(),
        log.arity()
    );
    Ok(log)
}

/// Parse log text. `source` is only used to label errors and the result.
pub fn parse_log(text: &str, source: &Path) -> Result<Log, LogError> {
    parse_records(text, source, true)
}

fn parse_records(text: &str, source: &Path, uniform: bool) -> Result<Log, LogError> {
    let mut records: Vec<Record> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let values = parse_whitespace_floats(line, line_no, source)?;

        if let Some(first) = records.first().filter(|_| uniform) {
            if first.len() != values.len() {
                return Err(LogError::Arity {
                    path: source.to_path_buf(),
                    line: line_no,
                    expected: first.len(),
                    found: values.len(),
                });
            }
        }

        records.push(Record::new(values));
    }

    Ok(Log::new(records).with_source(source))
}

fn parse_whitespace_floats(line: &str, line_no: usize, source: &Path) -> Result<Vec<f64>, LogError> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| LogError::Parse {
                path: source.to_path_buf(),
                line: line_no,
                token: tok.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(text: &str) -> Result<Log, LogError> {
        parse_log(text, Path::new("mem.txt"))
    }

    #[test]
    fn parses_mixed_whitespace_and_exponents() {
        let log = parse("1.0  -2.5\t3e2\n+4 5.5E-1   -0\n").unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].values(), &[1.0, -2.5, 300.0]);
        assert_eq!(log[1].values(), &[4.0, 0.55, 0.0]);
    }

    #[test]
    fn skips_blank_lines_and_trailing_newline() {
        let log = parse("\n1 2\n   \n3 4\n\n").unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].values(), &[3.0, 4.0]);
    }

    #[test]
    fn rejects_non_numeric_token_with_line_number() {
        let err = parse("1 2\n3 abc\n").unwrap_err();
        match err {
            LogError::Parse { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_ragged_records() {
        let err = parse("1 2 3\n4 5\n").unwrap_err();
        assert!(matches!(
            err,
            LogError::Arity {
                line: 2,
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn ragged_reader_keeps_uneven_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "0.5 0.5\n\n1.0\n").unwrap();

        assert!(matches!(read_log(file.path()), Err(LogError::Arity { .. })));
        let log = read_ragged_log(file.path()).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].len(), 2);
        assert_eq!(log[1].len(), 1);
    }

    #[test]
    fn round_trips_formatted_values() {
        let original = Log::from(vec![
            vec![0.1, -123.456, 6.02e23],
            vec![1e-300, 42.0, -0.0],
        ]);
        let text: String = original.iter().map(|r| format!("{r}\n")).collect();
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed.records(), original.records());
    }

    #[test]
    fn reads_file_and_keeps_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.5 1.5").unwrap();
        writeln!(file, "2.5 3.5").unwrap();

        let log = read_log(file.path()).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.source(), Some(file.path()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_log(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, LogError::Io { .. }));
    }
}
