//! Cart commands.
//!
//! `add` resolves the product against the cached catalog snapshot,
//! refetching the catalog once when the id is not cached.

use shopfront_core::{CartItem, Product, ProductId};

use super::{CliError, Context};

pub async fn add(ctx: &Context, product_id: i32, quantity: u32) -> Result<(), CliError> {
    if quantity < 1 {
        return Err(CliError::InvalidArgument {
            what: "quantity",
            value: quantity.to_string(),
        });
    }
    let product = resolve_product(ctx, product_id).await?;
    ctx.cart.add(CartItem::new(&product, quantity));
    println!("added {quantity} x {} to the cart", product.name);
    Ok(())
}

pub fn remove(ctx: &Context, product_id: i32) {
    ctx.cart.remove(ProductId::new(product_id));
    println!("removed product {product_id} from the cart");
}

pub fn set_quantity(ctx: &Context, product_id: i32, quantity: u32) {
    if quantity < 1 {
        println!("quantity must be at least 1; use `cart remove` to drop a line");
        return;
    }
    ctx.cart.update_quantity(ProductId::new(product_id), quantity);
    println!("set product {product_id} quantity to {quantity}");
}

pub fn clear(ctx: &Context) {
    ctx.cart.clear();
    println!("cart cleared");
}

pub fn show(ctx: &Context) {
    let items = ctx.cart.items();
    if items.is_empty() {
        println!("cart is empty");
        return;
    }
    let all: std::collections::HashSet<ProductId> =
        items.iter().map(|line| line.product_id).collect();
    for line in &items {
        println!(
            "{:>5}  {:<30} {:>4} x {:>10} = {:>10}",
            line.product_id, line.product_name, line.quantity, line.unit_price, line.subtotal
        );
    }
    println!("total: {}", ctx.cart.total(&all));
}

/// Find `product_id` in the cached catalog, refetching it once on a miss.
async fn resolve_product(ctx: &Context, product_id: i32) -> Result<Product, CliError> {
    let id = ProductId::new(product_id);
    let cached = ctx
        .client
        .session()
        .products()
        .into_iter()
        .find(|product| product.id == id);
    if let Some(product) = cached {
        return Ok(product);
    }

    ctx.client
        .list_products()
        .await?
        .into_iter()
        .find(|product| product.id == id)
        .ok_or(CliError::UnknownProduct(product_id))
}
