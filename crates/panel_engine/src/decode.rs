use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the page to look for a `<meta charset>` declaration.
const META_SNIFF_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode a saved page into UTF-8 using: BOM -> meta charset -> chardetng fallback.
pub fn decode_page(bytes: &[u8]) -> Result<DecodedPage, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(enc) = sniff_meta_charset(bytes).and_then(|l| Encoding::for_label(l.as_bytes())) {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let value: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    (!value.is_empty()).then_some(value)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedPage, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "decoding error".into(),
        });
    }
    Ok(DecodedPage {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_wins() {
        let decoded = decode_page(b"\xEF\xBB\xBFhello").unwrap();
        assert_eq!(decoded.html, "hello");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn meta_charset_is_honoured() {
        let bytes = b"<html><head><meta charset=\"iso-8859-1\"></head><body>caf\xe9</body></html>";
        let decoded = decode_page(bytes).unwrap();
        assert!(decoded.html.contains("caf\u{e9}"));
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn http_equiv_content_type_is_sniffed() {
        let bytes = br#"<meta http-equiv="Content-Type" content="text/html; charset=UTF-8">"#;
        assert_eq!(sniff_meta_charset(bytes).as_deref(), Some("utf-8"));
    }

    #[test]
    fn plain_utf8_without_hints_decodes() {
        let decoded = decode_page("<p>na\u{ef}ve</p>".as_bytes()).unwrap();
        assert_eq!(decoded.html, "<p>na\u{ef}ve</p>");
    }
}
