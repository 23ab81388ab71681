//! CSV serialization of batch results.
//!
//! The output contract is RFC-4180-like with one quirk the download format
//! has always had: every non-empty field is quoted (internal quotes doubled),
//! while an empty field is emitted as a bare empty string between commas, not
//! as `""`. Hand-rolled because no general CSV writer exposes that exact
//! quoting rule.

use std::path::Path;

use tracing::info;

use crate::errors::FlowError;
use crate::models::BatchRow;

/// Default name of the downloaded results file.
pub const DOWNLOAD_FILE_NAME: &str = "generated_bios.csv";

const HEADER: &str = "Name,Company,Email,Bio";

/// Serializes batch results into the download CSV, header included.
/// Every row (the header too) ends with `\n`.
pub fn to_csv(rows: &[BatchRow]) -> String {
    let mut out = String::with_capacity(64 + rows.len() * 64);
    out.push_str(HEADER);
    out.push('\n');

    for row in rows {
        let fields = [&row.name, &row.company, &row.email, &row.bio];
        let line = fields.map(|f| quote_field(f)).join(",");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn quote_field(field: &str) -> String {
    if field.is_empty() {
        String::new()
    } else {
        format!("\"{}\"", field.replace('"', "\"\""))
    }
}

/// Writes the serialized results to `path`. Any IO failure is a batch failure;
/// there is no partial-result salvage.
pub fn write_csv(path: &Path, rows: &[BatchRow]) -> Result<(), FlowError> {
    std::fs::write(path, to_csv(rows))
        .map_err(|e| FlowError::Batch(format!("could not write {}: {e}", path.display())))?;
    info!(rows = rows.len(), path = %path.display(), "batch results written");
    Ok(())
}
