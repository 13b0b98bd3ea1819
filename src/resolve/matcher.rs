use regex::Regex;
use scraper::{Html, Selector};

/// A rule that pulls image URLs out of a fetched page.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Regular expression whose first capture group is the URL.
    Pattern {
        regex: Regex,
        /// Hits containing any of these (case-insensitive) are skipped.
        reject: &'static [&'static str],
        /// Hits shorter than this are skipped.
        min_len: usize,
    },
    /// Attribute values of the elements matching `selector`.
    Attribute {
        selector: Selector,
        attrs: &'static [&'static str],
        /// Accepted hosts (and optional path prefix), scheme excluded.
        hosts: &'static [&'static str],
    },
}

// The constructors panic on malformed expressions, so only the built-in
// matcher sets in `patterns` may call them.
impl Matcher {
    /// A pattern without filters.
    pub(super) fn pattern(regex: &str) -> Self {
        Self::filtered(regex, &[], 0)
    }

    pub(super) fn filtered(regex: &str, reject: &'static [&'static str], min_len: usize) -> Self {
        Matcher::Pattern {
            regex: Regex::new(regex).unwrap(),
            reject,
            min_len,
        }
    }

    pub(super) fn attribute(
        selector: &str,
        attrs: &'static [&'static str],
        hosts: &'static [&'static str],
    ) -> Self {
        Matcher::Attribute {
            selector: Selector::parse(selector).unwrap(),
            attrs,
            hosts,
        }
    }

    /// First accepted hit of this matcher. `document` is parsed on demand
    /// and shared between the attribute matchers of one page.
    fn first_hit(&self, html: &str, document: &mut Option<Html>) -> Option<String> {
        match self {
            Matcher::Pattern {
                regex,
                reject,
                min_len,
            } => regex
                .captures_iter(html)
                .filter_map(|captures| captures.get(1))
                .map(|hit| unescape(hit.as_str()))
                .find(|url| {
                    let lowered = url.to_lowercase();
                    url.len() >= *min_len && !reject.iter().any(|word| lowered.contains(word))
                }),
            Matcher::Attribute {
                selector,
                attrs,
                hosts,
            } => {
                let attrs: &'static [&'static str] = *attrs;
                let document = document.get_or_insert_with(|| Html::parse_document(html));
                document
                    .select(selector)
                    .flat_map(move |element| {
                        attrs
                            .iter()
                            .filter_map(move |attr| element.value().attr(attr))
                    })
                    .map(unescape)
                    .find(|url| on_host(url, hosts))
            }
        }
    }
}

/// Scans `html` with `matchers` in order. The first matcher with a hit
/// wins and its first hit is returned.
///
/// ```
/// use storefront_images::resolve::{extract_image_url, patterns};
///
/// let page = r#"<script>var data = {"hiRes":"https://m.media-amazon.com/images/I/71Kum.jpg"};</script>"#;
/// assert_eq!(
///     extract_image_url(page, &patterns::amazon_product()).as_deref(),
///     Some("https://m.media-amazon.com/images/I/71Kum.jpg")
/// );
/// ```
pub fn extract_image_url(html: &str, matchers: &[Matcher]) -> Option<String> {
    let mut document = None;
    matchers
        .iter()
        .find_map(|matcher| matcher.first_hit(html, &mut document))
}

/// Undoes the `/` escaping found in embedded JSON.
fn unescape(url: &str) -> String {
    url.replace("\\u002F", "/").replace("\\/", "/")
}

fn on_host(url: &str, hosts: &[&str]) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };
    hosts.iter().any(|host| rest.starts_with(host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matcher_with_a_hit_wins() {
        let html = r#"{"large":"https://a.example/large.jpg","hiRes":"https://a.example/hires.jpg"}"#;
        let matchers = [
            Matcher::pattern(r#""hiRes":"([^"]+)""#),
            Matcher::pattern(r#""large":"([^"]+)""#),
        ];
        assert_eq!(
            extract_image_url(html, &matchers).as_deref(),
            Some("https://a.example/hires.jpg")
        );
    }

    #[test]
    fn rejected_hits_fall_through_to_the_next_one() {
        let html = r#"["https://www.gstatic.com/x.jpg",1,1] ["https://shop.example/images/kum.jpg",600,600]"#;
        let matchers = [Matcher::filtered(
            r#"\["(https?://[^"]+\.jpg)",\d+,\d+\]"#,
            &["gstatic"],
            0,
        )];
        assert_eq!(
            extract_image_url(html, &matchers).as_deref(),
            Some("https://shop.example/images/kum.jpg")
        );
    }

    #[test]
    fn attribute_matcher_checks_host() {
        let html = r#"<img src="https://tracker.example/p.jpg"><img data-src="https://i.ebayimg.com/a.jpg">"#;
        let matchers = [Matcher::attribute("img", &["src", "data-src"], &["i.ebayimg"])];
        assert_eq!(
            extract_image_url(html, &matchers).as_deref(),
            Some("https://i.ebayimg.com/a.jpg")
        );
    }

    #[test]
    fn escaped_slashes_are_restored() {
        let html = r#""hiRes":"https:\u002F\u002Fm.media-amazon.com\u002Fimages\u002FI\u002Fx.jpg""#;
        let matchers = [Matcher::pattern(r#""hiRes":"([^"]+)""#)];
        assert_eq!(
            extract_image_url(html, &matchers).as_deref(),
            Some("https://m.media-amazon.com/images/I/x.jpg")
        );
    }

    #[test]
    fn no_hit_is_none() {
        let matchers = [Matcher::pattern(r#""hiRes":"([^"]+)""#)];
        assert_eq!(extract_image_url("<html></html>", &matchers), None);
        assert_eq!(extract_image_url("", &[]), None);
    }
}
