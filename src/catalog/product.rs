use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// A storefront product whose image has to be prepared.
pub struct Product {
    /// Identifier of the product, also the stem of its image file.
    pub slug: String,
    /// Text printed on the placeholder, lines separated by `\n`.
    pub label: String,
    /// Amazon catalog identifiers, tried in order.
    pub asins: Vec<String>,
    /// Free text searched on Amazon when no ASIN page yields an image.
    pub search: Option<String>,
    /// Google Images query used as the last resort.
    pub query: Option<String>,
    /// Direct image URL found by hand earlier.
    pub known_image: Option<String>,
    /// Identifier the backend issued for this product.
    pub remote_id: Option<String>,
}

impl Product {
    /// File name of the product image, e.g. `lineal.jpg`.
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.slug)
    }

    /// Location of the product image below `output_dir`.
    pub fn image_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name())
    }

    /// Thumbnail path as stored on the backend, e.g. `/products/lineal.jpg`.
    pub fn thumbnail_path(&self, prefix: &str) -> String {
        format!("{}/{}", prefix.trim_end_matches('/'), self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_path_joins_prefix_once() {
        let product = Product {
            slug: "lineal".into(),
            ..Default::default()
        };
        assert_eq!(product.thumbnail_path("/products"), "/products/lineal.jpg");
        assert_eq!(product.thumbnail_path("/products/"), "/products/lineal.jpg");
        assert_eq!(
            product.image_path(Path::new("public/products")),
            PathBuf::from("public/products/lineal.jpg")
        );
    }
}
