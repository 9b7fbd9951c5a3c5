use encoding_rs::Encoding;
use xhtmlchardet::detect;

use crate::error::Error;

/// Detect the encoding of an XML document from its bytes (BOM and XML
/// declaration), falling back to UTF-8.
pub(crate) fn detect_encoding(data: &[u8]) -> Result<&'static Encoding, Error> {
    let mut cursor = std::io::Cursor::new(data);
    let charsets = detect(&mut cursor, None).map_err(|_| Error::UnknownEncoding)?;
    let label = charsets.first().map(|s| s.as_str()).unwrap_or("UTF-8");
    Encoding::for_label(label.as_bytes()).ok_or(Error::UnknownEncoding)
}
