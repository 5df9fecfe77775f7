//! Local filename derivation for downloaded documents

use url::Url;

/// Derives a local filename from the URL's final path segment
///
/// Returns `None` when the path yields no usable name (e.g. the URL ends
/// with a slash or has an empty path).
pub fn filename_from_url(url: &Url) -> Option<String> {
    let name = url.path_segments()?.next_back()?;
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_final_segment_is_filename() {
        let url = parse("https://example.com/files/2024/report.pdf");
        assert_eq!(filename_from_url(&url).as_deref(), Some("report.pdf"));
    }

    #[test]
    fn test_trailing_slash_has_no_filename() {
        let url = parse("https://example.com/files/");
        assert_eq!(filename_from_url(&url), None);
    }

    #[test]
    fn test_bare_domain_has_no_filename() {
        let url = parse("https://example.com");
        assert_eq!(filename_from_url(&url), None);
    }

    #[test]
    fn test_query_string_ignored() {
        let url = parse("https://example.com/brief.docx?version=2");
        assert_eq!(filename_from_url(&url).as_deref(), Some("brief.docx"));
    }
}
