use std::error::Error;
use std::time::Duration;
use storefront_images::{build_client, catalog, Config, Resolver, Source};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::default();
    let timeout = Duration::from_secs(15);
    let resolver = Resolver::new(build_client(timeout)?, config.endpoints, timeout);

    let product = &catalog::builtin()[0];
    for asin in &product.asins {
        let found = resolver.resolve(&Source::AmazonProduct(asin.clone())).await;
        println!("{}: {:?}", asin, found);
    }
    Ok(())
}
