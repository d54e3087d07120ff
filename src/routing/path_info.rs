//! Request URL decomposition into resource path, selectors, and extension.

/// Decomposed form of a request path.
///
/// Only the final path segment is decomposed: it splits at its first dot
/// (end of the resource name) and its last dot (start of the extension), and
/// the dot-separated tokens in between are the selectors. A segment without
/// dots has neither selectors nor an extension; a segment with a single dot
/// has an extension and no selectors.
///
/// # Examples
///
/// ```rust
/// use repo_harness::routing::RequestPathInfo;
///
/// let info = RequestPathInfo::parse("content/page.print.a4.txt");
/// assert_eq!(info.resource_path, "content/page");
/// assert_eq!(info.selectors, vec!["print", "a4"]);
/// assert_eq!(info.extension.as_deref(), Some("txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPathInfo {
    /// Path of the addressed resource, without selectors or extension.
    pub resource_path: String,
    /// Selector tokens, in the order they appear in the URL.
    pub selectors: Vec<String>,
    /// File-type extension, when present.
    pub extension: Option<String>,
}

impl RequestPathInfo {
    /// Decompose a request path.
    pub fn parse(path: &str) -> Self {
        let (dir, segment) = match path.rfind('/') {
            Some(idx) => (&path[..=idx], &path[idx + 1..]),
            None => ("", path),
        };

        let mut parts = segment.split('.');
        let name = parts.next().unwrap_or_default();
        let mut selectors: Vec<String> = parts.map(str::to_string).collect();
        let extension = selectors.pop();

        Self {
            resource_path: format!("{dir}{name}"),
            selectors,
            extension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_segment_has_no_selectors_or_extension() {
        let info = RequestPathInfo::parse("content/page");
        assert_eq!(info.resource_path, "content/page");
        assert!(info.selectors.is_empty());
        assert_eq!(info.extension, None);
    }

    #[test]
    fn single_dot_yields_extension_only() {
        let info = RequestPathInfo::parse("page.txt");
        assert_eq!(info.resource_path, "page");
        assert!(info.selectors.is_empty());
        assert_eq!(info.extension.as_deref(), Some("txt"));
    }

    #[test]
    fn tokens_between_first_and_last_dot_are_selectors() {
        let info = RequestPathInfo::parse("page.print.a4.txt");
        assert_eq!(info.resource_path, "page");
        assert_eq!(info.selectors, vec!["print", "a4"]);
        assert_eq!(info.extension.as_deref(), Some("txt"));
    }

    #[test]
    fn directories_stay_in_the_resource_path() {
        let info = RequestPathInfo::parse("some/nested/dir/page.print.txt");
        assert_eq!(info.resource_path, "some/nested/dir/page");
        assert_eq!(info.selectors, vec!["print"]);
        assert_eq!(info.extension.as_deref(), Some("txt"));
    }

    #[test]
    fn dots_in_earlier_segments_are_not_decomposed() {
        let info = RequestPathInfo::parse("v1.2/page.txt");
        assert_eq!(info.resource_path, "v1.2/page");
        assert!(info.selectors.is_empty());
        assert_eq!(info.extension.as_deref(), Some("txt"));
    }

    proptest! {
        #[test]
        fn parse_recovers_the_composed_parts(
            dir in "[a-z]{1,6}(/[a-z]{1,6}){0,2}",
            name in "[a-z]{1,8}",
            selectors in proptest::collection::vec("[a-z][a-z0-9]{0,5}", 0..4),
            extension in "[a-z]{1,4}",
        ) {
            let mut segment = name.clone();
            for selector in &selectors {
                segment.push('.');
                segment.push_str(selector);
            }
            segment.push('.');
            segment.push_str(&extension);

            let info = RequestPathInfo::parse(&format!("{dir}/{segment}"));
            prop_assert_eq!(info.resource_path, format!("{dir}/{name}"));
            prop_assert_eq!(info.selectors, selectors);
            prop_assert_eq!(info.extension, Some(extension));
        }
    }
}
