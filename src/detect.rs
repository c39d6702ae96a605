//! PDF input validation.
//!
//! Uploads are checked before any engine sees them: the filename must carry
//! a `.pdf` extension and the payload must start with a `%PDF-x.y` header.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// PDF header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Detect the PDF header of a file.
///
/// # Example
/// ```no_run
/// use docstruct::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("paper.pdf").unwrap();
/// println!("PDF version: {}", format.version);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(PDF_MAGIC_LEN + VERSION_LEN);
    BufReader::new(file)
        .take((PDF_MAGIC_LEN + VERSION_LEN) as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the PDF header from the first bytes of a payload.
///
/// # Returns
/// * `Ok(PdfFormat)` if the data starts with a valid PDF header
/// * `Err(Error::UnknownFormat)` if the data is not a PDF
/// * `Err(Error::UnsupportedVersion)` if the version is malformed
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check that an upload name carries a `.pdf` extension (any case).
pub fn ensure_pdf_filename(filename: &str) -> Result<()> {
    let is_pdf = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Ok(())
    } else {
        Err(Error::NotPdfFile(filename.to_string()))
    }
}

/// Validate an upload: filename first, then the header.
pub fn validate_upload(filename: &str, data: &[u8]) -> Result<PdfFormat> {
    ensure_pdf_filename(filename)?;
    if data.is_empty() {
        return Err(Error::EmptyInput("file"));
    }
    detect_format_from_bytes(data)
}

/// Check if a file starts with a valid PDF header.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.version, "1.7");
        assert_eq!(format.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_invalid_format() {
        assert!(matches!(
            detect_format_from_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(detect_format_from_bytes(b"%PDF"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_bad_version() {
        assert!(matches!(
            detect_format_from_bytes(b"%PDF-x.y\n"),
            Err(Error::UnsupportedVersion(v)) if v == "x.y"
        ));
    }

    #[test]
    fn test_pdf_filename() {
        assert!(ensure_pdf_filename("paper.pdf").is_ok());
        assert!(ensure_pdf_filename("PAPER.PDF").is_ok());
        assert!(matches!(
            ensure_pdf_filename("notes.txt"),
            Err(Error::NotPdfFile(name)) if name == "notes.txt"
        ));
        assert!(ensure_pdf_filename("pdf").is_err());
    }

    #[test]
    fn test_validate_upload_order() {
        assert!(matches!(
            validate_upload("a.docx", b"%PDF-1.4"),
            Err(Error::NotPdfFile(_))
        ));
        assert!(matches!(validate_upload("a.pdf", b""), Err(Error::EmptyInput("file"))));
        assert!(matches!(
            validate_upload("a.pdf", b"PK\x03\x04 zip"),
            Err(Error::UnknownFormat)
        ));
        assert_eq!(validate_upload("a.pdf", b"%PDF-2.0\n").unwrap().version, "2.0");
    }

    #[test]
    fn test_is_pdf_path() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.pdf");
        let bad = dir.path().join("b.pdf");
        std::fs::write(&good, b"%PDF-1.5\nrest").unwrap();
        std::fs::write(&bad, b"hello").unwrap();
        assert!(is_pdf(&good));
        assert!(!is_pdf(&bad));
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
    }
}
