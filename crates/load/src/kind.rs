use crate::error::{ErrorKind, Result};
use derive_more::Display;
use std::path::Path;

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const PDF_MAGIC: [u8; 5] = *b"%PDF-";

/// A supported input document type.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Zip-based e-book container of XHTML documents (.epub)
    #[display("EPUB")]
    Epub,
    /// PDF with a text layer (.pdf)
    #[display("PDF")]
    Pdf,
    /// A single XHTML/HTML document
    #[display("XHTML")]
    Markup,
    /// An already flattened text stream (.txt)
    #[display("text")]
    Text,
}
impl DocumentKind {
    /// Detect the document type from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
        match extension.as_deref() {
            Some("epub") => Ok(Self::Epub),
            Some("pdf") => Ok(Self::Pdf),
            Some("xhtml" | "html" | "htm") => Ok(Self::Markup),
            Some("txt") => Ok(Self::Text),
            _ => exn::bail!(ErrorKind::UnsupportedInput(path.to_path_buf())),
        }
    }

    /// Cross-checks the content signature for container formats. Markup and
    /// text have no signature and always pass.
    pub fn check_magic_bytes(self, bytes: &[u8]) -> Result<()> {
        let valid = match self {
            Self::Epub => bytes.starts_with(&ZIP_MAGIC),
            Self::Pdf => bytes.starts_with(&PDF_MAGIC),
            Self::Markup | Self::Text => true,
        };
        if !valid {
            exn::bail!(ErrorKind::KindMismatch(self));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bibel.epub", DocumentKind::Epub)]
    #[case("Bibel.EPUB", DocumentKind::Epub)]
    #[case("/tmp/scan.pdf", DocumentKind::Pdf)]
    #[case("OEBPS/bi12_1.xhtml", DocumentKind::Markup)]
    #[case("page.html", DocumentKind::Markup)]
    #[case("page.htm", DocumentKind::Markup)]
    #[case("stream.txt", DocumentKind::Text)]
    fn test_from_path(#[case] path: &str, #[case] expected: DocumentKind) {
        assert_eq!(DocumentKind::from_path(path).unwrap(), expected);
    }

    #[rstest]
    #[case("bibel.docx")]
    #[case("bibel")]
    #[case(".epub")]
    #[case("archive.epub.zip")]
    fn test_from_path_unsupported(#[case] path: &str) {
        let err = DocumentKind::from_path(path).unwrap_err();
        assert!(err.is_input_error());
    }

    #[rstest]
    #[case(DocumentKind::Epub, b"PK\x03\x04rest", true)]
    #[case(DocumentKind::Epub, b"%PDF-1.7", false)]
    #[case(DocumentKind::Epub, b"", false)]
    #[case(DocumentKind::Pdf, b"%PDF-1.7", true)]
    #[case(DocumentKind::Pdf, b"PK\x03\x04", false)]
    #[case(DocumentKind::Markup, b"<html>", true)]
    #[case(DocumentKind::Text, b"", true)]
    fn test_check_magic_bytes(#[case] kind: DocumentKind, #[case] bytes: &[u8], #[case] valid: bool) {
        assert_eq!(kind.check_magic_bytes(bytes).is_ok(), valid);
    }
}
