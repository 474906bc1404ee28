use crate::domain::product::ProductRef;
use crate::domain::user::UserId;
use crate::error::{CartError, Result};
use crate::interfaces::transport::{CartRequest, ItemRequest, ProductRequest};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Get,
    Add,
    Update,
    Remove,
    Checkout,
    Address,
}

/// One row of a command file: `op, user, product, quantity, address`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CartCommand {
    pub op: CommandType,
    pub user: UserId,
    pub product: Option<ProductRef>,
    pub quantity: Option<u32>,
    pub address: Option<String>,
}

/// What a command asks for once its columns have been checked.
#[derive(Debug, Clone)]
pub enum CommandAction {
    Cart(CartRequest),
    SetAddress(String),
}

impl CartCommand {
    pub fn into_action(self) -> Result<CommandAction> {
        let op = self.op;
        let product = || {
            self.product.clone().ok_or_else(|| {
                CartError::ValidationError(format!("{op:?} command requires a product"))
            })
        };
        let quantity = || {
            self.quantity.ok_or_else(|| {
                CartError::ValidationError(format!("{op:?} command requires a quantity"))
            })
        };

        let action = match op {
            CommandType::Get => CommandAction::Cart(CartRequest::Get),
            CommandType::Add => CommandAction::Cart(CartRequest::Add(ItemRequest {
                product_id: product()?,
                quantity: quantity()?,
            })),
            CommandType::Update => CommandAction::Cart(CartRequest::Update(ItemRequest {
                product_id: product()?,
                quantity: quantity()?,
            })),
            CommandType::Remove => CommandAction::Cart(CartRequest::Remove(ProductRequest {
                product_id: product()?,
            })),
            CommandType::Checkout => CommandAction::Cart(CartRequest::Checkout),
            CommandType::Address => match self.address.clone() {
                Some(address) if !address.is_empty() => CommandAction::SetAddress(address),
                _ => {
                    return Err(CartError::ValidationError(
                        "Address command requires an address".to_string(),
                    ));
                }
            },
        };
        Ok(action)
    }
}

/// Reads cart commands from a CSV source.
///
/// Whitespace is trimmed and rows may omit trailing columns they do not use.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    /// Lazily deserializes commands, one `Result` per row.
    pub fn commands(self) -> impl Iterator<Item = Result<CartCommand>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CartError::from))
    }
}
