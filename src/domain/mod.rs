//! Domain model: money, products, carts, user accounts, and the storage
//! ports the engines depend on.

pub mod cart;
pub mod money;
pub mod ports;
pub mod product;
pub mod user;
