mod product;

pub use product::Product;

struct Entry {
    slug: &'static str,
    label: &'static str,
    asins: &'static [&'static str],
    search: Option<&'static str>,
    query: Option<&'static str>,
    known_image: Option<&'static str>,
    remote_id: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        slug: "suppenkelle",
        label: "WMF Suppenkelle\nLinkshaender",
        asins: &["B00008XWZ3"],
        search: None,
        query: None,
        known_image: Some("https://m.media-amazon.com/images/I/51h2-yEtwwL._AC_UL320_.jpg"),
        remote_id: "prod_01KH10B5DX21W45HZ7BT518XE3",
    },
    Entry {
        slug: "brotmesser",
        label: "Victorinox\nBrotmesser 21cm",
        asins: &["B000IAZC4Q", "B07YZWF6DS"],
        search: Some("Victorinox Linkshänder Brotmesser"),
        query: None,
        known_image: Some("https://m.media-amazon.com/images/I/517W3dHkwgL._AC_UL320_.jpg"),
        remote_id: "prod_01KH10BBXNYQJFDF8BAGTHBSDD",
    },
    Entry {
        slug: "kinderschere",
        label: "Maped Vivo\nKinderschere",
        asins: &["B000KJR6MO", "B001BKHHGS"],
        search: Some("Maped Vivo Linkshänder Kinderschere"),
        query: None,
        known_image: Some("https://m.media-amazon.com/images/I/51ByLGC6M5L._AC_UL320_.jpg"),
        remote_id: "prod_01KH10BJ8SBJ6RTNDME3YXKTSH",
    },
    Entry {
        slug: "anspitzer",
        label: "KUM\nAnspitzer",
        asins: &["B003BVI1KK", "B07VJY67SX", "B003BVKWME", "B000KJMUKY", "B001G7R1RW"],
        search: Some("KUM Linkshänder Anspitzer"),
        query: Some("KUM Linkshänder Anspitzer Dosenspitzer"),
        known_image: None,
        remote_id: "prod_01KH10BRJAXG4C5C11DTGAT1YT",
    },
    Entry {
        slug: "collegeblock",
        label: "Oxford\nCollegeblock A4",
        asins: &["B07M8CRCYB", "B07LCNQ39V", "B07BRGGB3M"],
        search: Some("Oxford Collegeblock Linkshänder"),
        query: Some("Oxford Collegeblock Linkshänder A4 liniert"),
        known_image: None,
        remote_id: "prod_01KH10BYW49WRQY2TYWJKW3YXP",
    },
    Entry {
        slug: "bleistift",
        label: "Pelikan Griffix\nBleistift",
        asins: &["B003AZ2KBM", "B005CJJXAA", "B07CQHSVTF", "B004L6MUKY", "B00BXWUHB6"],
        search: Some("Pelikan Griffix Linkshänder Bleistift"),
        query: Some("Pelikan Griffix Schreiblernbleistift Linkshänder grün"),
        known_image: None,
        remote_id: "prod_01KH10C54S7SEBCWQ8KHP9RKCJ",
    },
    Entry {
        slug: "korkenzieher",
        label: "Kellnermesser\nKorkenzieher",
        asins: &["B0077OZ6X0", "B003FDJ88G", "B001E5BQTK"],
        search: Some("Linkshänder Korkenzieher Kellnermesser"),
        query: Some("Kellnermesser Korkenzieher Linkshänder Edelstahl"),
        known_image: None,
        remote_id: "prod_01KH10CBF0DZYR27M7SYA79M4X",
    },
    Entry {
        slug: "baseballhandschuh",
        label: "Rawlings\nBaseballhandschuh",
        asins: &["B07PLBJ38P", "B002H4FWS2", "B07DWSL2KL", "B0002LY6AO", "B07K1QWFNY"],
        search: Some("Rawlings Baseballhandschuh Links"),
        query: Some("Rawlings Baseball Handschuh Linkshänder braun"),
        known_image: None,
        remote_id: "prod_01KH10CHRFQF3KDX992AYH1AYP",
    },
    Entry {
        slug: "lineal",
        label: "Wedo Lineal\n30cm",
        asins: &["B001Q3L6MO", "B007JFKXYA", "B004L6MUKY"],
        search: Some("Wedo Linkshänder Lineal"),
        query: Some("Wedo Linkshänder Lineal 30cm transparent"),
        known_image: None,
        remote_id: "prod_01KH10CR0WMVZ34607H8C66TT8",
    },
    Entry {
        slug: "kartoffelschaeler",
        label: "Kartoffel-\nschaeler",
        asins: &["B0050AC9VO", "B003BVKXY6", "B07F6F5K6P", "B000SE5GY4"],
        search: Some("Linkshänder Kartoffelschäler"),
        query: Some("Kartoffelschäler Linkshänder Edelstahl Sparschäler"),
        known_image: None,
        remote_id: "prod_01KH10CYBRSQTHMSHB1KA4H6K0",
    },
    Entry {
        slug: "fueller",
        label: "ONLINE Switch\nFueller Rosegold",
        asins: &["B07N2YJPZQ", "B09MQ8GNQY", "B07MZKHG1J", "B07YZK2SJW"],
        search: Some("ONLINE Switch Linkshänder Füller"),
        query: Some("ONLINE Switch Füller Linkshänder Rosegold"),
        known_image: None,
        remote_id: "prod_01KH10D4P53YSTMMEAAQ1GNKSJ",
    },
    Entry {
        slug: "bumerang",
        label: "Bumerang\nClassic",
        asins: &["B00B9OPFHK", "B001U1MPZA", "B001DXJL3S"],
        search: Some("Linkshänder Bumerang"),
        query: Some("Bumerang Linkshänder Holz"),
        known_image: None,
        remote_id: "prod_01KH10DAYJGS814XP1EYBBQX05",
    },
];

/// The storefront's product table.
pub fn builtin() -> Vec<Product> {
    ENTRIES
        .iter()
        .map(|entry| Product {
            slug: entry.slug.into(),
            label: entry.label.into(),
            asins: entry.asins.iter().map(|asin| asin.to_string()).collect(),
            search: entry.search.map(Into::into),
            query: entry.query.map(Into::into),
            known_image: entry.known_image.map(Into::into),
            remote_id: Some(entry.remote_id.into()),
        })
        .collect()
}

/// Keeps the products named in `only`, or all of them when `only` is empty.
pub fn select<'a>(products: &'a [Product], only: &[String]) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| only.is_empty() || only.iter().any(|slug| *slug == product.slug))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_slugs_and_remote_ids_are_unique() {
        let products = builtin();
        assert_eq!(products.len(), 12);

        let slugs: HashSet<_> = products.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs.len(), products.len());

        let ids: HashSet<_> = products.iter().filter_map(|p| p.remote_id.as_deref()).collect();
        assert_eq!(ids.len(), products.len());
        assert!(ids.iter().all(|id| id.starts_with("prod_")));
    }

    #[test]
    fn select_filters_by_slug() {
        let products = builtin();
        assert_eq!(select(&products, &[]).len(), products.len());

        let picked = select(&products, &["lineal".into(), "bumerang".into()]);
        let slugs: Vec<_> = picked.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["lineal", "bumerang"]);
    }
}
