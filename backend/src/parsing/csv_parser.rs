use log::{debug, warn};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{AuditError, AuditResult};
use crate::models::AuditRow;

/// Header of the column holding the field (node) identifier.
pub const NODE_COLUMN: &str = "node";
/// Header of the column holding the submission (instance) identifier.
pub const INSTANCE_ID_COLUMN: &str = "instanceID";

const REQUIRED_COLUMNS: [&str; 2] = [NODE_COLUMN, INSTANCE_ID_COLUMN];

/// Rows decoded from one audit file.
#[derive(Debug, Clone, Default)]
pub struct ParsedAudit {
    pub rows: Vec<AuditRow>,
    /// Records the CSV reader could not decode (e.g. invalid UTF-8).
    pub undecodable_rows: usize,
}

impl ParsedAudit {
    /// Number of data records seen in the file, decodable or not.
    pub fn total_rows(&self) -> usize {
        self.rows.len() + self.undecodable_rows
    }
}

/// Answer columns whose cells are taken verbatim; a blank-looking answer is
/// still an answer.
const VERBATIM_COLUMNS: [&str; 2] = ["old-value", "new-value"];

/// Parse audit CSV from any reader.
///
/// The header must name the `node` and `instanceID` columns; everything else is
/// optional. Rows shorter than the header are padded with empty cells. Records
/// that cannot be decoded are skipped and counted rather than failing the
/// whole file.
pub fn parse_audit_reader<R: Read>(input: R) -> AuditResult<ParsedAudit> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader.byte_headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column.as_bytes()) {
            return Err(AuditError::missing_column(column));
        }
    }

    let verbatim: Vec<bool> = headers
        .iter()
        .map(|header| VERBATIM_COLUMNS.iter().any(|c| header == c.as_bytes()))
        .collect();

    let mut parsed = ParsedAudit::default();
    for (index, record) in reader.byte_records().enumerate() {
        let decoded = record.and_then(|raw| {
            let record = normalize_record(&raw, &verbatim);
            record.deserialize::<AuditRow>(Some(&headers))
        });
        match decoded {
            Ok(row) => parsed.rows.push(row),
            Err(e) => {
                warn!("Skipping undecodable audit record #{}: {}", index + 1, e);
                parsed.undecodable_rows += 1;
            }
        }
    }

    debug!(
        "Parsed audit CSV: {} rows, {} undecodable",
        parsed.rows.len(),
        parsed.undecodable_rows
    );

    Ok(parsed)
}

/// Trim every cell outside the verbatim columns and pad the record to the
/// header width.
fn normalize_record(raw: &csv::ByteRecord, verbatim: &[bool]) -> csv::ByteRecord {
    let mut record = csv::ByteRecord::with_capacity(raw.as_slice().len(), verbatim.len());
    for (index, field) in raw.iter().enumerate() {
        if verbatim.get(index).copied().unwrap_or(false) {
            record.push_field(field);
        } else {
            record.push_field(trim_ascii(field));
        }
    }
    while record.len() < verbatim.len() {
        record.push_field(b"");
    }
    record
}

fn trim_ascii(field: &[u8]) -> &[u8] {
    let start = field
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(field.len());
    let end = field
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |last| last + 1);
    &field[start..end]
}

/// Parse audit CSV text held in memory.
pub fn parse_audit_csv(content: &str) -> AuditResult<ParsedAudit> {
    parse_audit_reader(content.as_bytes())
}

/// Read an audit CSV file fully into memory and parse it.
pub fn parse_audit_csv_file(path: &Path) -> AuditResult<ParsedAudit> {
    let content = fs::read(path).map_err(|e| AuditError::io(path, e))?;
    parse_audit_reader(content.as_slice())
}
