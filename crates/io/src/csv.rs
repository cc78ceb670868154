// CSV export
//
// Serializes the full bounded grid: every field quoted, embedded quotes
// doubled, fields joined with ',' and rows with '\n'. The output covers
// every coordinate so its shape depends only on the configured bounds.

use std::path::Path;

use gridsheet_engine::address::Address;
use gridsheet_engine::sheet::Sheet;

/// Serialize the grid to CSV text.
///
/// A formula cell contributes its source text: the engine never evaluates,
/// so the source is the cell's last-known displayed value.
pub fn export_csv(sheet: &Sheet) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    for row in 0..sheet.rows {
        let record: Vec<String> = (0..sheet.cols)
            .map(|col| sheet.raw_text(Address::new(row, col)))
            .collect();
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    let mut out = String::from_utf8(bytes).map_err(|e| e.to_string())?;
    // The csv writer terminates every record; the grid contract joins rows
    // with '\n' instead, so the final terminator goes
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// Write [`export_csv`] output to a file.
pub fn export_csv_to_path(sheet: &Sheet, path: &Path) -> Result<(), String> {
    let content = export_csv(sheet)?;
    std::fs::write(path, content).map_err(|e| e.to_string())
}
