//! Session and cart state surviving process restarts through their JSON
//! files.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use shopfront_client::{CartStore, SessionStore};
use shopfront_core::{CartItem, ProductId};
use shopfront_integration_tests::{customer, product};

fn temp_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "shopfront-it-{}-{name}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn test_session_survives_reopen() {
    let path = temp_file("session-reopen");

    let store = SessionStore::open(path.clone());
    store.login(
        customer(),
        SecretString::from("token-1"),
        Some(SecretString::from("refresh-1")),
    );
    store.set_products(vec![product(5, "Kettle", 1000)]);
    drop(store);

    let reopened = SessionStore::open(path.clone());
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.user().unwrap(), customer());
    assert_eq!(reopened.bearer_token().unwrap().expose_secret(), "token-1");
    assert_eq!(
        reopened.refresh_token().unwrap().expose_secret(),
        "refresh-1"
    );
    assert_eq!(reopened.products().len(), 1);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_logout_persists_the_cleared_state() {
    let path = temp_file("session-logout");

    let store = SessionStore::open(path.clone());
    store.login(
        customer(),
        SecretString::from("token-1"),
        Some(SecretString::from("refresh-1")),
    );
    store.logout();
    drop(store);

    let reopened = SessionStore::open(path.clone());
    assert!(!reopened.is_authenticated());
    assert!(reopened.user().is_none());
    assert!(reopened.refresh_token().is_none());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_corrupt_session_file_yields_empty_session() {
    let path = temp_file("session-corrupt");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = SessionStore::open(path.clone());
    assert!(!store.is_authenticated());
    assert!(store.user().is_none());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_cart_survives_reopen_with_subtotals_intact() {
    let path = temp_file("cart-reopen");

    let cart = CartStore::open(path.clone());
    cart.add(CartItem::new(&product(5, "Kettle", 1000), 2));
    cart.add(CartItem::new(&product(7, "Mug", 250), 1));
    drop(cart);

    let reopened = CartStore::open(path.clone());
    assert_eq!(reopened.len(), 2);
    let line = reopened
        .items()
        .into_iter()
        .find(|line| line.product_id == ProductId::new(5))
        .unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.subtotal, line.unit_price * line.quantity);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_session_file_never_leaks_plaintext_debug() {
    // The Debug impl redacts both secrets; only the JSON file holds them.
    let store = SessionStore::new();
    store.login(
        customer(),
        SecretString::from("super-secret-token"),
        Some(SecretString::from("super-secret-refresh")),
    );
    let debugged = format!("{store:?}");
    assert!(!debugged.contains("super-secret-token"));
    assert!(!debugged.contains("super-secret-refresh"));
}
