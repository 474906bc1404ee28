use crate::application::locks::OwnerLocks;
use crate::domain::money::Money;
use crate::domain::ports::{CartStoreHandle, UserStoreHandle};
use crate::domain::user::CurrentUser;
use crate::error::{
    ADDRESS_NOT_SET, CART_NOT_FOUND, CartError, EMPTY_CART, INSUFFICIENT_BALANCE, Result,
};
use serde::Serialize;
use tracing::{error, info, warn};

/// What a successful checkout charged and what is left in the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub total: Money,
    pub remaining_balance: Money,
}

/// Converts a user's cart into a wallet debit.
///
/// The sequence is load, non-empty check, total, funds gate, address gate,
/// commit. Nothing is written until both gates pass. The commit debits the
/// wallet first and then stores the emptied cart; if the cart write fails the
/// debit is credited back before the error is returned.
pub struct CheckoutEngine {
    cart_store: CartStoreHandle,
    user_store: UserStoreHandle,
    locks: OwnerLocks,
}

impl CheckoutEngine {
    pub fn new(cart_store: CartStoreHandle, user_store: UserStoreHandle, locks: OwnerLocks) -> Self {
        Self {
            cart_store,
            user_store,
            locks,
        }
    }

    pub async fn checkout(&self, user: &CurrentUser) -> Result<CheckoutReceipt> {
        let _guard = self.locks.acquire(user.cart_owner()).await;

        let mut cart = self
            .cart_store
            .get(user.cart_owner())
            .await?
            .ok_or(CartError::NotFound(CART_NOT_FOUND))?;
        if cart.is_empty() {
            return Err(CartError::InvalidState(EMPTY_CART));
        }

        let total = cart.total()?;

        // The caller's snapshot may be stale; gate on the stored account.
        let account = self.user_store.get(&user.id).await?.ok_or_else(|| {
            CartError::internal(format!("no stored account for authenticated user {}", user.id))
        })?;
        if total > account.wallet_balance {
            return Err(CartError::InsufficientFunds(INSUFFICIENT_BALANCE));
        }
        if !self.user_store.has_non_default_address(&user.id).await? {
            return Err(CartError::PreconditionFailed(ADDRESS_NOT_SET));
        }

        let remaining_balance = self.user_store.debit_wallet(&user.id, total).await?;
        cart.clear();
        if let Err(err) = self.cart_store.store(cart).await {
            return Err(self.compensate(user, total, err).await);
        }

        info!(user = %user.id, %total, %remaining_balance, "checkout committed");
        Ok(CheckoutReceipt {
            total,
            remaining_balance,
        })
    }

    /// Undoes the wallet debit after the cart write failed.
    async fn compensate(&self, user: &CurrentUser, total: Money, cause: CartError) -> CartError {
        warn!(user = %user.id, %total, error = %cause, "cart write failed after debit, refunding");
        match self.user_store.credit_wallet(&user.id, total).await {
            Ok(_) => cause,
            Err(refund_err) => {
                error!(
                    user = %user.id,
                    %total,
                    error = %cause,
                    refund_error = %refund_err,
                    "refund failed, wallet debited but cart not cleared"
                );
                CartError::internal(format!(
                    "checkout for user {} left wallet debited by {} without clearing the cart: {}",
                    user.id, total, refund_err
                ))
            }
        }
    }
}
