use crate::application::cart::CartEngine;
use crate::application::checkout::CheckoutEngine;
use crate::domain::cart::Cart;
use crate::domain::money::Quantity;
use crate::domain::product::ProductRef;
use crate::domain::user::CurrentUser;
use crate::error::{CartError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;

/// Body of `POST cart/add` and `PUT cart/update`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub product_id: ProductRef,
    pub quantity: u32,
}

/// Body of `DELETE cart/item`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub product_id: ProductRef,
}

/// A decoded cart call, independent of how it arrived.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum CartRequest {
    Get,
    Add(ItemRequest),
    Update(ItemRequest),
    Remove(ProductRequest),
    Checkout,
}

/// Status code plus optional JSON body, ready for any transport to write out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: u16,
    pub body: Option<Value>,
}

impl Response {
    fn ok(cart: &Cart) -> Result<Self> {
        Ok(Self {
            status: 200,
            body: Some(serde_json::to_value(cart)?),
        })
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    /// Client faults keep their message; internal failures are opaque.
    pub fn from_error(err: &CartError) -> Self {
        let status = err.status_code();
        let message = if err.is_client_fault() {
            err.to_string()
        } else {
            error!(error = %err, "internal error while handling cart request");
            "Internal Server Error".to_string()
        };
        Self {
            status,
            body: Some(json!({ "code": status, "message": message })),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Maps cart requests onto the engines and their outcomes onto responses.
pub struct CartController {
    cart: CartEngine,
    checkout: CheckoutEngine,
}

impl CartController {
    pub fn new(cart: CartEngine, checkout: CheckoutEngine) -> Self {
        Self { cart, checkout }
    }

    pub async fn handle(&self, user: &CurrentUser, request: CartRequest) -> Response {
        match self.dispatch(user, request).await {
            Ok(response) => response,
            Err(err) => Response::from_error(&err),
        }
    }

    async fn dispatch(&self, user: &CurrentUser, request: CartRequest) -> Result<Response> {
        match request {
            CartRequest::Get => Response::ok(&self.cart.fetch_cart(user).await?),
            CartRequest::Add(item) => {
                let quantity = Quantity::new(item.quantity)?;
                let cart = self.cart.add_item(user, &item.product_id, quantity).await?;
                Response::ok(&cart)
            }
            CartRequest::Update(item) => {
                let quantity = Quantity::new(item.quantity)?;
                let cart = self
                    .cart
                    .update_item(user, &item.product_id, quantity)
                    .await?;
                Response::ok(&cart)
            }
            CartRequest::Remove(target) => {
                self.cart.remove_item(user, &target.product_id).await?;
                Ok(Response::no_content())
            }
            CartRequest::Checkout => {
                self.checkout.checkout(user).await?;
                Ok(Response::no_content())
            }
        }
    }
}
