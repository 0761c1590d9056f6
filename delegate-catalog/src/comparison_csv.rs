//! Parse the current-vs-recommended comparison table from CSV.
//!
//! Leading blank rows are skipped, then a header row starting with
//! `Feature`, then one row per feature:
//! Feature,Current,Recommended,Improvement,Impact

use anyhow::{bail, Context, Result};
use delegate_core::model::{ComparisonRow, Impact, Improvement};
use std::io::Read;
use std::path::Path;

fn parse_improvement(s: &str) -> Option<Improvement> {
    match s.trim().to_ascii_lowercase().as_str() {
        "better" => Some(Improvement::Better),
        "same" => Some(Improvement::Same),
        "worse" => Some(Improvement::Worse),
        _ => None,
    }
}

fn parse_impact(s: &str) -> Option<Impact> {
    match s.trim().to_ascii_lowercase().as_str() {
        "high" => Some(Impact::High),
        "medium" => Some(Impact::Medium),
        "low" => Some(Impact::Low),
        _ => None,
    }
}

/// Parse a comparison CSV file.
pub fn parse_comparison_csv(path: impl AsRef<Path>) -> Result<Vec<ComparisonRow>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_comparison(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse comparison rows from any reader.
pub fn read_comparison(reader: impl Read) -> Result<Vec<ComparisonRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut header_found = false;

    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("").trim();

        if !header_found {
            if field(0).eq_ignore_ascii_case("feature") {
                header_found = true;
            }
            continue;
        }

        let feature = field(0);
        if feature.is_empty() {
            continue;
        }

        let Some(improvement) = parse_improvement(field(3)) else {
            bail!("row {}: unknown improvement {:?}", line + 1, field(3));
        };
        let Some(impact) = parse_impact(field(4)) else {
            bail!("row {}: unknown impact {:?}", line + 1, field(4));
        };

        rows.push(ComparisonRow {
            feature: feature.to_string(),
            current: field(1).to_string(),
            recommended: field(2).to_string(),
            improvement,
            impact,
        });
    }

    if !header_found {
        bail!("missing Feature,Current,Recommended,Improvement,Impact header");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_rows_before_header() {
        let csv = "\n\nFeature,Current,Recommended,Improvement,Impact\n\
                   Annual Premium,\"$1,200\",$695,better,high\n\
                   ,,,,\n\
                   Claims Process,Phone only,App + Phone,Better,Medium\n";
        let rows = read_comparison(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].current, "$1,200");
        assert_eq!(rows[0].impact, Impact::High);
        assert_eq!(rows[1].improvement, Improvement::Better);
        assert_eq!(rows[1].impact, Impact::Medium);
    }

    #[test]
    fn rejects_unknown_levels() {
        let csv = "Feature,Current,Recommended,Improvement,Impact\nDeductible,$500,$250,improved,high\n";
        let err = read_comparison(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("improved"));
    }

    #[test]
    fn requires_header() {
        assert!(read_comparison("Deductible,$500,$250,better,high\n".as_bytes()).is_err());
    }
}
