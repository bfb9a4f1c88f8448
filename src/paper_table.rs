//! Reads page specifications from a tab-separated table.
//!
//! Each record has four fields: page width, page height, and margin (all in millimetres),
//! followed by a nickname for the page type. Empty fields are ignored, as are blank
//! lines, so columns may be padded with extra tabs. Anything after the fourth field is
//! ignored.
//!
//! ```text
//! 210	297	5	a4
//! 215.9	279.4	6.35	letter
//! ```

use crate::error::SheetError;
use crate::pagesize::PageSpec;
use crate::units::Mm;
use csv::ReaderBuilder;
use std::io::Read;
use tracing::debug;

/// Read every page spec from `reader`, in order
pub fn read_paper_table<R: Read>(reader: R) -> Result<Vec<PageSpec>, SheetError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut pages = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let fields: Vec<&str> = record
            .iter()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();

        if fields.is_empty() {
            continue;
        }
        if fields.len() < 4 {
            return Err(SheetError::PaperTable {
                line,
                message: format!("expected at least 4 fields, got {}", fields.len()),
            });
        }

        let width = number(line, 1, fields[0])?;
        let height = number(line, 2, fields[1])?;
        let margin = number(line, 3, fields[2])?;
        let page = PageSpec::new(Mm(width), Mm(height), Mm(margin), fields[3]).map_err(|e| {
            SheetError::PaperTable {
                line,
                message: e.to_string(),
            }
        })?;
        debug!(
            name = page.name(),
            width, height, margin, "read paper size"
        );
        pages.push(page);
    }
    Ok(pages)
}

fn number(line: u64, field: usize, text: &str) -> Result<f64, SheetError> {
    text.parse::<f64>().map_err(|_| SheetError::PaperTable {
        line,
        message: format!("field {field} is not a number: {text:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_records_in_order() {
        let table = "210\t297\t5\ta4\n\n215.9\t279.4\t6.35\tletter\n";
        let pages = read_paper_table(table.as_bytes()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].name(), "a4");
        assert_eq!(pages[0].margin(), Mm(5.0));
        assert_eq!(pages[1].name(), "letter");
        assert_eq!(pages[1].width(), Mm(215.9));
    }

    #[test]
    fn empty_fields_are_skipped() {
        let table = "210\t\t297\t5\t\ta4\textra\n";
        let pages = read_paper_table(table.as_bytes()).unwrap();
        assert_eq!(pages[0].height(), Mm(297.0));
        assert_eq!(pages[0].name(), "a4");
    }

    #[test]
    fn short_records_are_rejected_with_line_numbers() {
        let table = "210\t297\t5\ta4\n210\t297\n";
        match read_paper_table(table.as_bytes()) {
            Err(SheetError::PaperTable { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("got 2"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        let table = "wide\t297\t5\ta4\n";
        assert!(matches!(
            read_paper_table(table.as_bytes()),
            Err(SheetError::PaperTable { line: 1, .. })
        ));
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let table = "210\t297\t150\ta4\n";
        assert!(matches!(
            read_paper_table(table.as_bytes()),
            Err(SheetError::PaperTable { line: 1, .. })
        ));
    }

    #[test]
    fn empty_table_is_empty() {
        assert!(read_paper_table("".as_bytes()).unwrap().is_empty());
    }
}
