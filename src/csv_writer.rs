use std::fs::File;
use std::path::Path;
use log::info;
use crate::error::WriteError;
use crate::product::{Product, CSV_HEADER};

/// Creates or truncates `path` and writes the header plus one row per product.
/// The header is written even when `products` is empty.
pub fn write_products<P: AsRef<Path>>(products: &[Product], path: P) -> Result<(), WriteError> {
    let path = path.as_ref();
    let file = File::create(path)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    csv_writer.write_record(CSV_HEADER)?;
    for product in products {
        csv_writer.serialize(product)?;
    }
    csv_writer.flush()?;

    info!("Wrote {} products to {:?}", products.len(), path);
    Ok(())
}
