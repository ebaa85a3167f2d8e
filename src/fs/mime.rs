//! ## Mime
//!
//! Content type detection

/// Detects the content type of a file
pub trait MimeTypeDetector {
    /// Returns the mime type for the file at `path` having `contents`, if it can be determined
    fn detect_mime_type(&self, path: &str, contents: &[u8]) -> Option<String>;
}

/// Default detector.
///
/// Contents are sniffed for a known magic number first; the file extension is used otherwise.
/// An extension naming a binary format the contents don't match is not trusted: such a file is
/// `text/plain` if it is valid UTF-8 and undetermined otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentMimeTypeDetector;

impl MimeTypeDetector for ContentMimeTypeDetector {
    fn detect_mime_type(&self, path: &str, contents: &[u8]) -> Option<String> {
        if let Some(kind) = infer::get(contents) {
            return Some(kind.mime_type().to_string());
        }
        let guess = mime_guess::from_path(path).first_raw()?;
        let contradicted =
            !contents.is_empty() && !guess.starts_with("text/") && infer::is_mime_supported(guess);
        if !contradicted {
            return Some(guess.to_string());
        }
        debug!("contents of {} don't match {}", path, guess);
        std::str::from_utf8(contents)
            .ok()
            .map(|_| "text/plain".to_string())
    }
}

#[cfg(test)]
mod test {

    use pretty_assertions::assert_eq;

    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn should_sniff_mime_type_from_contents() {
        let detector = ContentMimeTypeDetector;
        assert_eq!(
            detector.detect_mime_type("scan", b"%PDF-1.7\n").as_deref(),
            Some("application/pdf")
        );
        assert_eq!(
            detector.detect_mime_type("logo.txt", PNG_HEADER).as_deref(),
            Some("image/png")
        );
    }

    #[test]
    fn should_guess_mime_type_from_extension() {
        let detector = ContentMimeTypeDetector;
        assert_eq!(
            detector.detect_mime_type("docs/readme.txt", b"hello").as_deref(),
            Some("text/plain")
        );
        assert_eq!(
            detector.detect_mime_type("image.png", &[]).as_deref(),
            Some("image/png")
        );
        assert_eq!(
            detector.detect_mime_type("image.png", PNG_HEADER).as_deref(),
            Some("image/png")
        );
    }

    #[test]
    fn should_not_trust_extension_contradicted_by_contents() {
        let detector = ContentMimeTypeDetector;
        assert_eq!(
            detector
                .detect_mime_type("fake.png", b"just some text")
                .as_deref(),
            Some("text/plain")
        );
        assert!(detector
            .detect_mime_type("fake.png", &[0xc3, 0x28, 0xa0, 0xa1])
            .is_none());
    }

    #[test]
    fn should_not_guess_unknown_mime_type() {
        let detector = ContentMimeTypeDetector;
        assert!(detector.detect_mime_type("Makefile", b"all:").is_none());
        assert!(detector
            .detect_mime_type("archive.qqqqzzzz", &[0, 1, 2])
            .is_none());
    }
}
