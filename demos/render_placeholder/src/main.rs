use std::error::Error;
use std::path::Path;
use storefront_images::placeholder::Placeholder;

fn main() -> Result<(), Box<dyn Error>> {
    let renderer = Placeholder::with_discovered_font(None, "Demo Shop");
    let bytes = renderer.write("Ordnungsbox\nA4 blau", Path::new("ordnungsbox.jpg"))?;
    println!("ordnungsbox.jpg: {} bytes", bytes);
    Ok(())
}
