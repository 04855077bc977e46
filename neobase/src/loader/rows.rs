//! Caret-delimited row reader.
//!
//! OPTD files use `^` as the column separator and `"` for quoting. Rows may
//! have varying widths (comment lines are short), so the reader is flexible
//! and width checks are left to the loader.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use super::LoadError;

/// Column separator of OPTD files.
pub const DELIMITER: u8 = b'^';

/// One raw row with the line it was read from.
pub(super) struct RawRow {
    pub line: usize,
    pub columns: StringRecord,
}

/// Read every row of a caret-delimited source, header included.
pub(super) fn read_rows<R: Read>(reader: R) -> impl Iterator<Item = Result<RawRow, LoadError>> {
    let reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .into_records()
        .enumerate()
        .map(|(index, result)| {
            let columns = result?;
            let line = columns
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 1);
            Ok(RawRow { line, columns })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_flexible_rows() {
        let data = "code^name\nNCE^Nice^extra\n#^comment\n";
        let rows: Vec<RawRow> = read_rows(data.as_bytes()).collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].columns.len(), 3);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[2].columns.get(0), Some("#"));
    }

    #[test]
    fn test_quoted_columns_keep_delimiter() {
        let data = "h\nNCE^\"Nice ^ Cote\"\n";
        let rows: Vec<RawRow> = read_rows(data.as_bytes()).collect::<Result<_, _>>().unwrap();
        assert_eq!(rows[1].columns.get(1), Some("Nice ^ Cote"));
    }
}
