//! Link target validation.

use url::Url;

/// Origin used to resolve relative link targets, standing in for the page
/// the rendered HTML is served from.
const PAGE_ORIGIN: &str = "http://localhost/";

/// Returns true only if `candidate` is a fragment reference (`#...`) or
/// resolves to an `http`/`https` URL.
///
/// Relative targets are resolved against the page origin before the scheme
/// check, so `/agents/3` and `docs/readme.md` are accepted while
/// `javascript:` and `data:` targets are rejected. Anything that fails to
/// parse is treated as unsafe.
pub fn is_safe_url(candidate: &str) -> bool {
    if candidate.starts_with('#') {
        return true;
    }

    let resolved = match Url::parse(candidate) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(PAGE_ORIGIN).and_then(|base| base.join(candidate))
        }
        Err(err) => Err(err),
    };

    match resolved {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("http://example.com/path?q=1"));
    }

    #[test]
    fn test_accepts_fragment_reference() {
        assert!(is_safe_url("#anchor"));
        assert!(is_safe_url("#"));
    }

    #[test]
    fn test_accepts_relative_paths() {
        assert!(is_safe_url("/agents/3"));
        assert!(is_safe_url("docs/readme.md"));
    }

    #[test]
    fn test_rejects_javascript_scheme() {
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("JAVASCRIPT:alert(1)"));
    }

    #[test]
    fn test_rejects_data_scheme() {
        assert!(!is_safe_url("data:text/html,<script>alert(1)</script>"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(!is_safe_url("ftp://example.com/file"));
        assert!(!is_safe_url("vbscript:msgbox(1)"));
    }
}
