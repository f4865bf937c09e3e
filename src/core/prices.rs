//! Append-only CSV of price observations.

use crate::errors::AppResult;
use crate::models::PriceRecord;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Append one record, writing the header first when the file is new or empty.
pub fn append_record(path: &Path, record: &PriceRecord) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if needs_header {
        wtr.write_record(PriceRecord::HEADER)?;
    }
    wtr.serialize(record)?;
    wtr.flush()?;

    Ok(())
}

/// All records in the file; an absent file has none.
pub fn read_records(path: &Path) -> AppResult<Vec<PriceRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::Reader::from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        out.push(rec?);
    }
    Ok(out)
}

pub fn last_price(path: &Path) -> AppResult<Option<f64>> {
    Ok(read_records(path)?
        .last()
        .and_then(|r| r.price_usd.parse::<f64>().ok()))
}
