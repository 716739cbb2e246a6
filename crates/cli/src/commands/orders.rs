//! Checkout, payment, and purchase-history commands.

use std::collections::HashSet;

use shopfront_core::{PaymentMethod, ProductId, Transaction, TransactionId};

use super::{CliError, Context};

pub async fn checkout(ctx: &Context, select: &[i32], note: Option<&str>) -> Result<(), CliError> {
    let user = ctx.current_user()?;
    let selected: HashSet<ProductId> = select.iter().copied().map(ProductId::new).collect();
    let items = ctx.cart.selected_items(&selected);

    let transaction = ctx.client.checkout(user.id, &items, note).await?;

    // The purchased lines leave the cart; unselected lines stay.
    for item in &items {
        ctx.cart.remove(item.product_id);
    }

    println!(
        "order {} placed: transaction {} for {}",
        transaction.code, transaction.id, transaction.total
    );
    println!("pay with: shopfront pay {} -m <method>", transaction.id);
    Ok(())
}

pub async fn pay(ctx: &Context, transaction_id: i32, method: &str) -> Result<(), CliError> {
    let method: PaymentMethod = method.parse().map_err(|_| CliError::InvalidArgument {
        what: "payment method",
        value: method.to_string(),
    })?;
    let payment = ctx
        .client
        .submit_payment(TransactionId::new(transaction_id), method)
        .await?;
    println!(
        "payment {} submitted: {} via {} ({})",
        payment.id, payment.amount, payment.method, payment.status
    );
    Ok(())
}

pub async fn payment_details(ctx: &Context, transaction_id: i32) -> Result<(), CliError> {
    let details = ctx
        .client
        .payment_details(TransactionId::new(transaction_id))
        .await?;
    println!("virtual account: {}", details.virtual_account);
    println!("amount due:      {}", details.amount);
    println!("method:          {}", details.payment_method);
    Ok(())
}

pub async fn history_list(ctx: &Context) -> Result<(), CliError> {
    let transactions = ctx.client.list_transactions().await?;
    if transactions.is_empty() {
        println!("no transactions");
        return Ok(());
    }
    for transaction in transactions {
        println!(
            "{:>5}  {:<20} {}  {:>10}  {}",
            transaction.id,
            transaction.code,
            transaction.created_at.format("%Y-%m-%d %H:%M"),
            transaction.total,
            transaction.status
        );
    }
    Ok(())
}

pub async fn history_show(ctx: &Context, id: i32) -> Result<(), CliError> {
    let transaction = ctx.client.get_transaction(TransactionId::new(id)).await?;
    print_transaction(&transaction);
    Ok(())
}

pub async fn history_delete(ctx: &Context, id: i32) -> Result<(), CliError> {
    ctx.client
        .delete_transaction(TransactionId::new(id))
        .await?;
    println!("deleted transaction {id}");
    Ok(())
}

fn print_transaction(transaction: &Transaction) {
    println!("transaction {} ({})", transaction.id, transaction.code);
    println!("placed:  {}", transaction.created_at.format("%Y-%m-%d %H:%M"));
    println!("status:  {}", transaction.status);
    if let Some(note) = &transaction.note {
        println!("note:    {note}");
    }
    for item in &transaction.items {
        println!(
            "  {:<30} {:>4} x {:>10} = {:>10}",
            item.product_name, item.quantity, item.unit_price, item.subtotal
        );
    }
    println!("total:   {}", transaction.total);
    match &transaction.payment {
        Some(payment) => println!(
            "payment: {} via {} ({})",
            payment.amount, payment.method, payment.status
        ),
        None => println!("payment: none"),
    }
}
