mod common;

use cartflow::domain::money::Money;
use cartflow::domain::ports::CartStore;
use cartflow::domain::product::Product;
use cartflow::domain::user::DEFAULT_ADDRESS;
use cartflow::error::CartError;
use common::{Shop, product, qty};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_checkout_clears_and_debits() {
    let shop = Shop::new();
    let user = shop.register("u1", dec!(100), "1 Main St").await;
    let cart = shop.cart_engine();
    cart.add_item(&user, &product("p1"), qty(2)).await.unwrap();
    cart.add_item(&user, &product("p2"), qty(1)).await.unwrap();

    shop.checkout_engine().checkout(&user).await.unwrap();

    assert_eq!(shop.balance(&user).await, Money::new(dec!(75)));
    let stored = shop.carts.get("u1@example.com").await.unwrap().unwrap();
    assert!(stored.items.is_empty());
}

#[tokio::test]
async fn test_emptied_cart_cannot_be_checked_out_again() {
    let shop = Shop::new();
    let user = shop.register("u1", dec!(100), "1 Main St").await;
    shop.cart_engine()
        .add_item(&user, &product("p1"), qty(1))
        .await
        .unwrap();
    let checkout = shop.checkout_engine();
    checkout.checkout(&user).await.unwrap();

    let err = checkout.checkout(&user).await.unwrap_err();
    assert!(matches!(err, CartError::InvalidState(_)));
    assert!(err.to_string().starts_with("No products in user cart"));
}

#[tokio::test]
async fn test_cart_usable_again_after_checkout() {
    let shop = Shop::new();
    let user = shop.register("u1", dec!(100), "1 Main St").await;
    let cart = shop.cart_engine();
    let checkout = shop.checkout_engine();

    cart.add_item(&user, &product("p1"), qty(1)).await.unwrap();
    checkout.checkout(&user).await.unwrap();
    cart.add_item(&user, &product("p1"), qty(3)).await.unwrap();
    checkout.checkout(&user).await.unwrap();

    assert_eq!(shop.balance(&user).await, Money::new(dec!(60)));
}

#[tokio::test]
async fn test_insufficient_funds_scenario() {
    let shop = Shop::new();
    let user = shop.register("u1", dec!(100), "1 Main St").await;
    let cart = shop.cart_engine();
    cart.add_item(&user, &product("p3"), qty(2)).await.unwrap();
    let before = shop.carts.get("u1@example.com").await.unwrap();

    let err = shop.checkout_engine().checkout(&user).await.unwrap_err();

    assert!(matches!(err, CartError::InsufficientFunds(_)));
    assert_eq!(err.to_string(), "Insufficient Balance");
    assert_eq!(shop.balance(&user).await, Money::new(dec!(100)));
    assert_eq!(shop.carts.get("u1@example.com").await.unwrap(), before);
}

#[tokio::test]
async fn test_default_address_scenario() {
    let shop = Shop::new();
    let user = shop.register("u1", dec!(100), DEFAULT_ADDRESS).await;
    shop.cart_engine()
        .add_item(&user, &product("p1"), qty(2))
        .await
        .unwrap();
    let before = shop.carts.get("u1@example.com").await.unwrap();

    let err = shop.checkout_engine().checkout(&user).await.unwrap_err();

    assert!(matches!(err, CartError::PreconditionFailed(_)));
    assert_eq!(err.to_string(), "Set a valid address to checkout");
    assert_eq!(shop.balance(&user).await, Money::new(dec!(100)));
    assert_eq!(shop.carts.get("u1@example.com").await.unwrap(), before);
}

#[tokio::test]
async fn test_exact_balance_checkout_leaves_zero() {
    let shop = Shop::new();
    let user = shop.register("u1", dec!(60), "1 Main St").await;
    shop.cart_engine()
        .add_item(&user, &product("p3"), qty(1))
        .await
        .unwrap();

    let receipt = shop.checkout_engine().checkout(&user).await.unwrap();
    assert_eq!(receipt.remaining_balance, Money::ZERO);
}

#[tokio::test]
async fn test_sub_cent_prices_are_exact() {
    let shop = Shop::new();
    shop.catalog
        .insert(cartflow::domain::product::Product::new(
            "tiny",
            "Washer",
            Money::new(dec!(0.0001)),
        ))
        .await;
    let user = shop.register("u1", dec!(1), "1 Main St").await;
    shop.cart_engine()
        .add_item(&user, &product("tiny"), qty(3))
        .await
        .unwrap();

    let receipt = shop.checkout_engine().checkout(&user).await.unwrap();
    assert_eq!(receipt.total, Money::new(dec!(0.0003)));
    assert_eq!(shop.balance(&user).await, Money::new(dec!(0.9997)));
}

#[tokio::test]
async fn test_failed_commit_rolls_back_debit() {
    let shop = Shop::new();
    let user = shop.register("u1", dec!(100), "1 Main St").await;
    shop.cart_engine()
        .add_item(&user, &product("p1"), qty(1))
        .await
        .unwrap();
    shop.carts.set_fail_on_store(true);

    let err = shop.checkout_engine().checkout(&user).await.unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert_eq!(shop.balance(&user).await, Money::new(dec!(100)));
}

#[tokio::test]
async fn test_price_at_decimal_limit_is_rejected_not_charged() {
    let shop = Shop::new();
    shop.catalog
        .insert(Product::new("big", "Yacht", Money::new(Decimal::MAX)))
        .await;
    let user = shop.register("u1", dec!(100), "1 Main St").await;
    let cart = shop.cart_engine();

    let result = cart.add_item(&user, &product("big"), qty(2)).await;
    assert!(matches!(result, Err(CartError::ValidationError(_))));
    assert!(shop.carts.get("u1@example.com").await.unwrap().is_none());

    cart.add_item(&user, &product("big"), qty(1)).await.unwrap();
    let result = cart.add_item(&user, &product("p1"), qty(1)).await;
    assert!(matches!(result, Err(CartError::ValidationError(_))));

    let result = shop.checkout_engine().checkout(&user).await;
    assert!(matches!(result, Err(CartError::InsufficientFunds(_))));
    assert_eq!(shop.balance(&user).await, Money::new(dec!(100)));
    let stored = shop.carts.get("u1@example.com").await.unwrap().unwrap();
    assert_eq!(stored.total().unwrap(), Money::new(Decimal::MAX));
}
