//! Catalog commands. Create, update, and delete are admin-gated locally;
//! the server enforces the role again on its side.

use std::path::Path;

use rust_decimal::Decimal;

use shopfront_client::{ImageUpload, NewProduct};
use shopfront_core::{Price, ProductId};

use super::{CliError, Context};

pub async fn list(ctx: &Context) -> Result<(), CliError> {
    let products = ctx.client.list_products().await?;
    if products.is_empty() {
        println!("no products");
        return Ok(());
    }
    for product in products {
        println!(
            "{:>5}  {:<30} {:>10}  stock {:>4}",
            product.id, product.name, product.price, product.stock
        );
    }
    Ok(())
}

pub async fn create(
    ctx: &Context,
    name: &str,
    price: &str,
    stock: u32,
    image: Option<&Path>,
) -> Result<(), CliError> {
    ctx.require_admin()?;
    let product = new_product(name, price, stock, image)?;
    let created = ctx.client.create_product(product).await?;
    println!("created product {} ({})", created.id, created.name);
    Ok(())
}

pub async fn update(
    ctx: &Context,
    id: i32,
    name: &str,
    price: &str,
    stock: u32,
    image: Option<&Path>,
) -> Result<(), CliError> {
    ctx.require_admin()?;
    let product = new_product(name, price, stock, image)?;
    let updated = ctx
        .client
        .update_product(ProductId::new(id), product)
        .await?;
    println!("updated product {} ({})", updated.id, updated.name);
    Ok(())
}

pub async fn delete(ctx: &Context, id: i32) -> Result<(), CliError> {
    ctx.require_admin()?;
    ctx.client.delete_product(ProductId::new(id)).await?;
    println!("deleted product {id}");
    Ok(())
}

fn new_product(
    name: &str,
    price: &str,
    stock: u32,
    image: Option<&Path>,
) -> Result<NewProduct, CliError> {
    let price: Decimal = price.parse().map_err(|_| CliError::InvalidArgument {
        what: "price",
        value: price.to_string(),
    })?;
    let image = image.map(read_image).transpose()?;
    Ok(NewProduct {
        name: name.to_string(),
        price: Price::new(price),
        stock,
        image,
    })
}

fn read_image(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ImageRead {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());
    let content_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    };
    Ok(ImageUpload {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_parses_decimal_price() {
        let product = new_product("Kettle", "19.99", 3, None).unwrap();
        assert_eq!(product.price.to_string(), "19.99");
        assert!(product.image.is_none());
    }

    #[test]
    fn test_new_product_rejects_garbage_price() {
        assert!(matches!(
            new_product("Kettle", "cheap", 3, None),
            Err(CliError::InvalidArgument { what: "price", .. })
        ));
    }
}
