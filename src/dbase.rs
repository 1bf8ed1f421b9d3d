//! Lookups in the `season_flight_pst` table.
//!
//! The table is plain text, one `<pst> <flight> <season>` row per line, separated by any
//! run of whitespace, no header. Extra columns are ignored and `#` starts a comment.

use crate::error::{Error, Result};
use crate::params::Params;
use csv::{ReaderBuilder, StringRecord, Trim};
use glob::{MatchOptions, Pattern};
use log::{debug, trace};
use std::path::Path;

/// One row of the `season_flight_pst` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PstRecord {
    /// Flight-segment identifier, column 0
    pub pst: String,
    /// Flight the PST was acquired on, column 1
    pub flight: String,
    /// Season the PST belongs to, column 2
    pub season: String,
}

/// Read every row of a `season_flight_pst` table, in file order.
///
/// Runs of spaces or tabs count as one separator. Everything after a `#` is a comment,
/// and rows left empty are skipped.
///
/// # Errors
///
/// I/O failures, and [`Error::MalformedRow`] for rows with fewer than three columns.
pub fn read_table(path: &Path) -> Result<Vec<PstRecord>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .quoting(false)
        .trim(Trim::All)
        .from_path(path)?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let fields = row_fields(&rec);
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 3 {
            return Err(Error::MalformedRow {
                path: path.to_path_buf(),
                line: rec.position().map_or(0, |p| p.line()),
            });
        }
        out.push(PstRecord {
            pst: fields[0].to_string(),
            flight: fields[1].to_string(),
            season: fields[2].to_string(),
        });
    }
    trace!("{} rows in {}", out.len(), path.display());
    Ok(out)
}

/// Whitespace-separated fields of a row, up to any inline `#` comment.
fn row_fields(rec: &StringRecord) -> Vec<&str> {
    let mut fields = Vec::new();
    for token in rec.iter().flat_map(str::split_whitespace) {
        match token.split_once('#') {
            Some((head, _)) => {
                if !head.is_empty() {
                    fields.push(head);
                }
                break;
            }
            None => fields.push(token),
        }
    }
    fields
}

/// PSTs of the current season matching a shell-style pattern (`*`, `?`, `[seq]`, `[!seq]`).
///
/// Matching is case-sensitive and `*` crosses `/`, so `"*"` returns every PST of the season.
///
/// # Errors
///
/// [`Error::Pattern`] for an invalid pattern, or any failure reading the table.
pub fn pst(params: &Params, pattern: &str) -> Result<Vec<String>> {
    let pattern = Pattern::new(pattern)?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let matches: Vec<String> = read_table(&params.season_flight_pst)?
        .into_iter()
        .filter(|r| r.season == params.season)
        .filter(|r| pattern.matches_with(&r.pst, options))
        .map(|r| r.pst)
        .collect();
    debug!(
        "{} PSTs of {} match {}",
        matches.len(),
        params.season,
        pattern.as_str()
    );
    Ok(matches)
}

/// Flight a PST was acquired on.
///
/// # Errors
///
/// [`Error::PstNotFound`] when no row carries the PST. With several rows, the first wins.
pub fn flight(params: &Params, pst: &str) -> Result<String> {
    let table = &params.season_flight_pst;
    let mut rows = read_table(table)?.into_iter().filter(|r| r.pst == pst);
    let first = rows.next().ok_or_else(|| Error::PstNotFound {
        pst: pst.to_string(),
        table: table.clone(),
    })?;
    let others = rows.count();
    if others > 0 {
        debug!("{pst} appears {} times, using flight {}", others + 1, first.flight);
    }
    Ok(first.flight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const TABLE: &str = "\
# pst flight season
MIS/JKB2e/Y35a F01 ICP5
MIS/JKB2e/Y36a F01 ICP5
MIS/JKB2e/X01a  F02 ICP5
DRP/JKB2f/Y35a F10 ICP4
GOG/JKB2g/y35a F11 ICP5

MIS/JKB2e/Y35a F99 ICP6
";

    fn setup(table: &str) -> (TempDir, Params) {
        let tmp_dir = tempdir().unwrap();
        let p = Params::from_code_path(tmp_dir.path().join("code/xtra/ICP5/RSR/pik1")).unwrap();
        fs::create_dir_all(p.season_flight_pst.parent().unwrap()).unwrap();
        fs::write(&p.season_flight_pst, table).unwrap();
        (tmp_dir, p)
    }

    #[test]
    fn test_read_table() {
        let (_tmp, p) = setup(TABLE);
        let rows = read_table(&p.season_flight_pst).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(
            rows[2],
            PstRecord {
                pst: "MIS/JKB2e/X01a".into(),
                flight: "F02".into(),
                season: "ICP5".into(),
            }
        );
    }

    #[test]
    fn test_star_returns_whole_season() {
        let (_tmp, p) = setup(TABLE);
        assert_eq!(
            pst(&p, "*").unwrap(),
            vec![
                "MIS/JKB2e/Y35a",
                "MIS/JKB2e/Y36a",
                "MIS/JKB2e/X01a",
                "GOG/JKB2g/y35a"
            ]
        );
    }

    #[test]
    fn test_glob_semantics() {
        let (_tmp, p) = setup(TABLE);
        assert_eq!(pst(&p, "*/Y3?a").unwrap(), vec!["MIS/JKB2e/Y35a", "MIS/JKB2e/Y36a"]);
        assert_eq!(pst(&p, "*[X]01a").unwrap(), vec!["MIS/JKB2e/X01a"]);
        assert_eq!(pst(&p, "*[!Y]35a").unwrap(), vec!["GOG/JKB2g/y35a"]);
        // case-sensitive, and `.` is a literal rather than a regex wildcard
        assert!(pst(&p, "mis/*").unwrap().is_empty());
        assert!(pst(&p, "MIS.JKB2e.Y35a").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let (_tmp, p) = setup(TABLE);
        assert!(matches!(pst(&p, "[Y"), Err(Error::Pattern(_))));
    }

    #[test]
    fn test_flight() {
        let (_tmp, p) = setup(TABLE);
        assert_eq!(flight(&p, "MIS/JKB2e/X01a").unwrap(), "F02");
        assert_eq!(flight(&p, "DRP/JKB2f/Y35a").unwrap(), "F10");
        // first row wins on duplicates
        assert_eq!(flight(&p, "MIS/JKB2e/Y35a").unwrap(), "F01");
    }

    #[test]
    fn test_flight_not_found() {
        let (_tmp, p) = setup(TABLE);
        assert!(matches!(
            flight(&p, "MIS/JKB2e/Z99z"),
            Err(Error::PstNotFound { .. })
        ));
    }

    #[test]
    fn test_tabs_and_inline_comments() {
        let (_tmp, p) = setup(
            "MIS/JKB2e/Y35a\tF01\tICP5\n\
             MIS/JKB2e/Y36a \t F02   ICP5 # reflown\n\
             MIS/JKB2e/X01a F03 ICP5#late\n\
             \t# nothing here\n",
        );
        let rows = read_table(&p.season_flight_pst).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].flight, "F01");
        assert_eq!(rows[1].flight, "F02");
        assert_eq!(rows[2].season, "ICP5");
        assert_eq!(flight(&p, "MIS/JKB2e/Y36a").unwrap(), "F02");
    }

    #[test]
    fn test_malformed_row() {
        let (_tmp, p) = setup("MIS/JKB2e/Y35a F01 ICP5\nMIS/JKB2e/Y36a F01\n");
        assert!(matches!(
            read_table(&p.season_flight_pst),
            Err(Error::MalformedRow { line: 2, .. })
        ));
    }
}
