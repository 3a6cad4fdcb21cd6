//! Flat `name!value!value` reference-table parsing.

use crate::error::{PropsError, PropsResult};

/// One parsed line of a reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    pub name: String,
    pub values: Vec<f64>,
    /// 1-based source line, kept for error messages.
    pub line: usize,
}

/// Parse a `!`-delimited table where every line carries a name and `fields` numbers.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_table(file: &str, content: &str, fields: usize) -> PropsResult<Vec<TableRecord>> {
    let mut records = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split('!');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(PropsError::Parse {
                file: file.to_string(),
                line,
                message: "missing compound name".to_string(),
            });
        }

        let values = parts
            .map(|part| {
                part.trim().parse::<f64>().map_err(|e| PropsError::Parse {
                    file: file.to_string(),
                    line,
                    message: format!("'{}': {}", part.trim(), e),
                })
            })
            .collect::<PropsResult<Vec<f64>>>()?;

        if values.len() != fields {
            return Err(PropsError::Parse {
                file: file.to_string(),
                line,
                message: format!("expected {} values, found {}", fields, values.len()),
            });
        }

        records.push(TableRecord {
            name: name.to_string(),
            values,
            line,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_with_punctuation() {
        let content = "# comment\n\n1,2-Ethanediol!62.07\nDiethyl ether ! 74.12 \n";
        let records = parse_table("mw", content, 1).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "1,2-Ethanediol");
        assert_eq!(records[0].line, 3);
        assert_eq!(records[1].name, "Diethyl ether");
        assert!((records[1].values[0] - 74.12).abs() < 1e-12);
    }

    #[test]
    fn wrong_field_count_is_reported() {
        let err = parse_table("uniquac", "Water!0.92", 2).unwrap_err();
        match err {
            PropsError::Parse { file, line, .. } => {
                assert_eq!(file, "uniquac");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_number_is_reported() {
        let err = parse_table("mw", "Water!abc", 1).unwrap_err();
        assert!(err.to_string().contains("abc"));
    }
}
