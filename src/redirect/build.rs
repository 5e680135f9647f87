// src/redirect/build.rs
// =============================================================================
// Builds the search tool URL for a username.
//
// The query always carries the same five parameters in the same order:
//   ?backend=<backend>&mode=<mode>&author=<username>&limit=<limit>&sort=<sort>
// Values are form-urlencoded (spaces become '+', '&' becomes %26, ...).
// =============================================================================

use url::Url;

use crate::settings::Settings;

/// Appends the redirect query to `base`. Any query or fragment already on
/// `base` is replaced.
pub fn build_redirect_url(base: &Url, username: &str, settings: &Settings) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    url.query_pairs_mut()
        .append_pair("backend", &settings.backend)
        .append_pair("mode", settings.mode.as_str())
        .append_pair("author", username)
        .append_pair("limit", &settings.limit.to_string())
        .append_pair("sort", settings.sort.as_str());

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SearchMode, SortOrder};

    fn base() -> Url {
        Url::parse("https://ihsoyct.github.io/").unwrap()
    }

    fn settings(limit: u32, sort: SortOrder, mode: SearchMode, backend: &str) -> Settings {
        Settings {
            limit,
            sort,
            mode,
            backend: backend.to_string(),
        }
    }

    #[test]
    fn test_exact_wire_form() {
        let url = build_redirect_url(
            &base(),
            "alice",
            &settings(50, SortOrder::Asc, SearchMode::Comments, "artic_shift"),
        );
        assert_eq!(
            url.as_str(),
            "https://ihsoyct.github.io/?backend=artic_shift&mode=comments&author=alice&limit=50&sort=asc"
        );
    }

    #[test]
    fn test_exactly_five_parameters() {
        let url = build_redirect_url(
            &base(),
            "alice",
            &settings(50, SortOrder::Asc, SearchMode::Comments, "artic_shift"),
        );
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("backend".to_string(), "artic_shift".to_string()),
                ("mode".to_string(), "comments".to_string()),
                ("author".to_string(), "alice".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("sort".to_string(), "asc".to_string()),
            ]
        );
        assert_eq!(url.origin(), base().origin());
    }

    #[test]
    fn test_defaults_are_not_omitted() {
        let url = build_redirect_url(
            &base(),
            "bob",
            &settings(100, SortOrder::Desc, SearchMode::Submissions, "artic_shift"),
        );
        assert_eq!(
            url.query(),
            Some("backend=artic_shift&mode=submissions&author=bob&limit=100&sort=desc")
        );
    }

    #[test]
    fn test_values_are_encoded() {
        let url = build_redirect_url(
            &base(),
            "a b&c=d",
            &settings(1, SortOrder::Desc, SearchMode::Submissions, "x/y"),
        );
        assert_eq!(
            url.query(),
            Some("backend=x%2Fy&mode=submissions&author=a+b%26c%3Dd&limit=1&sort=desc")
        );

        let author = url
            .query_pairs()
            .find(|(key, _)| key == "author")
            .map(|(_, value)| value.into_owned());
        assert_eq!(author, Some("a b&c=d".to_string()));
    }

    #[test]
    fn test_existing_query_on_base_is_replaced() {
        let base = Url::parse("https://search.example/tool/?old=1#frag").unwrap();
        let url = build_redirect_url(
            &base,
            "alice",
            &settings(5, SortOrder::Asc, SearchMode::Comments, "b"),
        );
        assert_eq!(
            url.as_str(),
            "https://search.example/tool/?backend=b&mode=comments&author=alice&limit=5&sort=asc"
        );
    }
}
