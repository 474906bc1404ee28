use crate::application::locks::OwnerLocks;
use crate::domain::cart::{Cart, LineItem};
use crate::domain::money::Quantity;
use crate::domain::ports::{CartStoreHandle, CatalogHandle};
use crate::domain::product::{Product, ProductRef};
use crate::domain::user::CurrentUser;
use crate::error::{
    CART_MISSING_FOR_UPDATE, CART_NOT_FOUND, CartError, PRODUCT_NOT_IN_CATALOG, Result,
};
use tracing::debug;

/// Business rules for a user's cart.
///
/// Every mutation runs under the owner's lock and validates before it writes,
/// so a rejected call never touches the cart store.
pub struct CartEngine {
    cart_store: CartStoreHandle,
    catalog: CatalogHandle,
    locks: OwnerLocks,
}

impl CartEngine {
    /// # Arguments
    ///
    /// * `cart_store` - Where carts are read from and written to.
    /// * `catalog` - Product existence and price lookup.
    /// * `locks` - Per-owner serialization, shared with the checkout engine.
    pub fn new(cart_store: CartStoreHandle, catalog: CatalogHandle, locks: OwnerLocks) -> Self {
        Self {
            cart_store,
            catalog,
            locks,
        }
    }

    pub async fn fetch_cart(&self, user: &CurrentUser) -> Result<Cart> {
        self.cart_store
            .get(user.cart_owner())
            .await?
            .ok_or(CartError::NotFound(CART_NOT_FOUND))
    }

    /// Adds a product the cart does not hold yet, creating the cart on first use.
    ///
    /// The catalog price is copied into the line item and stays fixed from
    /// then on.
    pub async fn add_item(
        &self,
        user: &CurrentUser,
        product: &ProductRef,
        quantity: Quantity,
    ) -> Result<Cart> {
        let product = self.lookup_product(product).await?;
        let _guard = self.locks.acquire(user.cart_owner()).await;

        let mut cart = self
            .cart_store
            .get(user.cart_owner())
            .await?
            .unwrap_or_else(|| Cart::new(user.cart_owner()));
        cart.add_line(LineItem::from_product(&product, quantity))?;

        self.cart_store.store(cart.clone()).await?;
        debug!(owner = %cart.owner, product = %product.id, quantity = quantity.value(), "added to cart");
        Ok(cart)
    }

    pub async fn update_item(
        &self,
        user: &CurrentUser,
        product: &ProductRef,
        quantity: Quantity,
    ) -> Result<Cart> {
        self.lookup_product(product).await?;
        let _guard = self.locks.acquire(user.cart_owner()).await;

        let mut cart = self
            .cart_store
            .get(user.cart_owner())
            .await?
            .ok_or(CartError::PreconditionFailed(CART_MISSING_FOR_UPDATE))?;
        cart.set_quantity(product, quantity)?;

        self.cart_store.store(cart.clone()).await?;
        debug!(owner = %cart.owner, %product, quantity = quantity.value(), "updated cart quantity");
        Ok(cart)
    }

    pub async fn remove_item(&self, user: &CurrentUser, product: &ProductRef) -> Result<()> {
        let _guard = self.locks.acquire(user.cart_owner()).await;

        let mut cart = self
            .cart_store
            .get(user.cart_owner())
            .await?
            .ok_or(CartError::PreconditionFailed(CART_MISSING_FOR_UPDATE))?;
        cart.remove_line(product)?;

        self.cart_store.store(cart).await?;
        debug!(owner = user.cart_owner(), %product, "removed from cart");
        Ok(())
    }

    async fn lookup_product(&self, product: &ProductRef) -> Result<Product> {
        self.catalog
            .get_product(product)
            .await?
            .ok_or(CartError::InvalidReference(PRODUCT_NOT_IN_CATALOG))
    }
}
