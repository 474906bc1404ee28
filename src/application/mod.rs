//! Application layer containing the cart and checkout orchestration.
//!
//! `CartEngine` and `CheckoutEngine` hold explicit store handles and share one
//! `OwnerLocks` registry so all mutations of a given user's cart run one at a
//! time.

pub mod cart;
pub mod checkout;
pub mod locks;
