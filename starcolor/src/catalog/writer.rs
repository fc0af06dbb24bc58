//! JSON output of derived star records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use super::record::StarRecord;
use crate::error::CatalogError;

/// Serialize records as a JSON array.
///
/// Pretty output uses two-space indentation.
pub fn write_records<W: Write>(
    writer: W,
    records: &[StarRecord],
    pretty: bool,
) -> Result<(), CatalogError> {
    if pretty {
        serde_json::to_writer_pretty(writer, records)?;
    } else {
        serde_json::to_writer(writer, records)?;
    }
    Ok(())
}

/// Write records to a JSON file, replacing any existing file.
pub fn save_records<P: AsRef<Path>>(
    path: P,
    records: &[StarRecord],
    pretty: bool,
) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| CatalogError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    write_records(&mut writer, records, pretty)?;
    writer.flush().map_err(|e| CatalogError::io(path, e))?;

    info!("Wrote {} stars to {}", records.len(), path.display());
    Ok(())
}

/// Read a previously written record file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<StarRecord>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}
