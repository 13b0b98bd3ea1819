//! Matcher sets for the scraped pages, most specific first.

use super::Matcher;

const AMAZON_MEDIA: &[&str] = &["m.media-amazon.com/images/I/"];

const RETAILER_CDNS: &[&str] = &[
    "m.media-amazon",
    "images-na.ssl-images-amazon",
    "i.ebayimg",
    "media.real",
    "cdn.idealo",
];

/// Amazon product detail page (`/dp/<asin>`).
pub fn amazon_product() -> Vec<Matcher> {
    vec![
        Matcher::pattern(r#""hiRes"\s*:\s*"(https://m\.media-amazon\.com/images/I/[^"]+)""#),
        Matcher::pattern(r#""large"\s*:\s*"(https://m\.media-amazon\.com/images/I/[^"]+)""#),
        Matcher::pattern(r#""mainUrl"\s*:\s*"(https://m\.media-amazon\.com/images/I/[^"]+)""#),
        Matcher::attribute("[data-old-hires]", &["data-old-hires"], AMAZON_MEDIA),
        Matcher::attribute("img#landingImage", &["src"], AMAZON_MEDIA),
        Matcher::pattern(r"(https://m\.media-amazon\.com/images/I/[A-Za-z0-9+%-]+\._AC_SL\d+_\.jpg)"),
    ]
}

/// Amazon search results page (`/s?k=...`).
pub fn amazon_search() -> Vec<Matcher> {
    vec![
        Matcher::pattern(r#""hiRes"\s*:\s*"(https://m\.media-amazon\.com/images/I/[^"]+)""#),
        Matcher::pattern(r#""large"\s*:\s*"(https://m\.media-amazon\.com/images/I/[^"]+)""#),
        Matcher::pattern(r#"src="(https://m\.media-amazon\.com/images/I/[^"]+\._AC_SL1[0-9]+_\.jpg)""#),
        Matcher::pattern(r#"src="(https://m\.media-amazon\.com/images/I/[^"]+\._AC_SX[0-9]+_\.jpg)""#),
        Matcher::pattern(r"(https://m\.media-amazon\.com/images/I/[A-Za-z0-9+%-]+\._AC_SL\d+_\.jpg)"),
        Matcher::filtered(
            r"(https://m\.media-amazon\.com/images/I/[A-Za-z0-9+%-]+\.jpg)",
            &["sprite", "icon"],
            0,
        ),
    ]
}

/// Google Images results page.
pub fn google_images() -> Vec<Matcher> {
    vec![
        Matcher::filtered(
            r#"\["(https?://[^"]+\.(?:jpg|jpeg|png|webp))",\d+,\d+\]"#,
            &["gstatic", "google"],
            31,
        ),
        Matcher::attribute("[data-src], [src]", &["data-src", "src"], RETAILER_CDNS),
    ]
}
