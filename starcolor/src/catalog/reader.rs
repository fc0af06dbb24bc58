//! Delimited catalog reading.
//!
//! Reads header-first comma-separated catalogs such as the HYG database.
//! Gzip-compressed files (`.gz`) are decompressed on the fly. Bytes that are
//! not valid UTF-8 are replaced rather than rejected, and rows shorter than
//! the header simply lack the trailing columns.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use log::{debug, info, warn};

use super::row::{fields, CatalogRow};
use crate::error::CatalogError;

/// Streaming reader yielding one [`CatalogRow`] per data line.
pub struct CatalogReader<R: Read> {
    records: csv::ByteRecordsIntoIter<R>,
    headers: Vec<String>,
    short_rows: usize,
}

impl<R: Read> CatalogReader<R> {
    /// Wrap any byte source. The first line must be the header.
    pub fn from_reader(source: R) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(CatalogError::MissingHeader);
        }
        if !headers.iter().any(|h| h == fields::MAG) {
            return Err(CatalogError::MissingColumn(fields::MAG.to_string()));
        }

        debug!("Catalog columns: {}", headers.join(","));

        Ok(Self {
            records: reader.into_byte_records(),
            headers,
            short_rows: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of rows seen so far with fewer fields than the header.
    pub fn short_rows(&self) -> usize {
        self.short_rows
    }

    fn build_row(&mut self, record: &csv::ByteRecord) -> CatalogRow {
        if record.len() < self.headers.len() {
            self.short_rows += 1;
        }

        self.headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), String::from_utf8_lossy(value).into_owned()))
            .collect()
    }
}

impl<R: Read> Iterator for CatalogReader<R> {
    type Item = Result<CatalogRow, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|record| self.build_row(&record))
                .map_err(CatalogError::from),
        )
    }
}

/// Open a catalog file, decompressing when the name ends in `.gz`.
pub fn open_catalog<P: AsRef<Path>>(
    path: P,
) -> Result<CatalogReader<Box<dyn Read + Send>>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;

    let is_gzipped = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let source: Box<dyn Read + Send> = if is_gzipped {
        info!("Detected gzipped catalog, decompressing {}", path.display());
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    CatalogReader::from_reader(source)
}

/// Read every row of a catalog file into memory.
///
/// The file handle is dropped on every return path, including a read error
/// partway through.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogRow>, CatalogError> {
    let path = path.as_ref();
    let mut reader = open_catalog(path)?;
    let rows = reader.by_ref().collect::<Result<Vec<_>, _>>()?;

    info!("Read {} rows from {}", rows.len(), path.display());
    if reader.short_rows() > 0 {
        warn!(
            "{} rows had fewer columns than the header",
            reader.short_rows()
        );
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const SAMPLE: &str = "\
id,hip,proper,mag,ci,spect
0,,Sol,-26.7,0.656,G2V
1,1,,9.1,0.482,F5
2,32349,Sirius,-1.44,0.009,A0m...
";

    #[test]
    fn test_reads_rows_by_header_name() {
        let rows: Vec<CatalogRow> = CatalogReader::from_reader(SAMPLE.as_bytes())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text(fields::PROPER), "Sol");
        assert_eq!(rows[1].text(fields::PROPER), "");
        assert_eq!(rows[2].digits(fields::HIP), Some(32349));
        assert_eq!(rows[2].real(fields::MAG), Some(-1.44));
    }

    #[test]
    fn test_short_rows_leave_fields_absent() {
        let data = "mag,ci,spect\n3.2\n4.1,0.5,K0\n";
        let mut reader = CatalogReader::from_reader(data.as_bytes()).unwrap();
        let first = reader.next().unwrap().unwrap();
        assert_eq!(first.get(fields::CI), None);
        assert_eq!(first.real(fields::MAG), Some(3.2));
        let second = reader.next().unwrap().unwrap();
        assert_eq!(second.text(fields::SPECT), "K0");
        assert!(reader.next().is_none());
        assert_eq!(reader.short_rows(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut data = b"mag,proper\n1.0,Gl".to_vec();
        data.push(0xff);
        data.extend_from_slice(b"ese\n");

        let row = CatalogReader::from_reader(data.as_slice())
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(row.text(fields::PROPER), "Gl\u{fffd}ese");
    }

    #[test]
    fn test_missing_magnitude_column() {
        let result = CatalogReader::from_reader("ci,spect\n0.5,G2\n".as_bytes());
        assert!(matches!(result, Err(CatalogError::MissingColumn(c)) if c == "mag"));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let result = CatalogReader::from_reader("".as_bytes());
        assert!(matches!(result, Err(CatalogError::MissingHeader)));
    }

    #[test]
    fn test_load_plain_and_gzipped_files() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("stars.csv");
        std::fs::write(&plain, SAMPLE).unwrap();

        let gz = dir.path().join("stars.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let from_plain = load_catalog(&plain).unwrap();
        let from_gz = load_catalog(&gz).unwrap();
        assert_eq!(from_plain, from_gz);
        assert_eq!(from_plain.len(), 3);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_catalog("/nonexistent/hyg.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/hyg.csv"));
    }
}
