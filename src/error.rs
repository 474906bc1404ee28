use thiserror::Error;

pub const CART_NOT_FOUND: &str = "User doesn't have a cart";
pub const CART_MISSING_FOR_UPDATE: &str =
    "User does not have a cart. Use POST to create cart and add a product";
pub const PRODUCT_NOT_IN_CATALOG: &str = "Product doesn't exist in database";
pub const PRODUCT_ALREADY_IN_CART: &str =
    "Product already in cart. Use the cart sidebar to update or remove product from cart";
pub const PRODUCT_NOT_IN_CART: &str = "Product not in cart";
pub const EMPTY_CART: &str = "No products in user cart. Add products before checkout";
pub const INSUFFICIENT_BALANCE: &str = "Insufficient Balance";
pub const ADDRESS_NOT_SET: &str = "Set a valid address to checkout";
pub const USER_NOT_FOUND: &str = "User not found";
pub const AMOUNT_OUT_OF_RANGE: &str = "Amount exceeds the supported range";

/// Every failure the cart and checkout engines can report.
///
/// Client-fault kinds carry a fixed, human-readable message that is surfaced
/// verbatim. Storage and I/O failures collapse into opaque internal errors.
#[derive(Error, Debug)]
pub enum CartError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidReference(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("{0}")]
    InvalidState(&'static str),
    #[error("{0}")]
    InsufficientFunds(&'static str),
    #[error("{0}")]
    PreconditionFailed(&'static str),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CartError>;

impl CartError {
    /// Conventional HTTP status for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            CartError::NotFound(_) => 404,
            CartError::InvalidReference(_)
            | CartError::Conflict(_)
            | CartError::InvalidState(_)
            | CartError::InsufficientFunds(_)
            | CartError::PreconditionFailed(_)
            | CartError::ValidationError(_) => 400,
            CartError::InternalError(_) | CartError::CsvError(_) | CartError::IoError(_) => 500,
        }
    }

    pub fn is_client_fault(&self) -> bool {
        self.status_code() < 500
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CartError::InternalError(Box::new(std::io::Error::other(message.into())))
    }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::InternalError(Box::new(err))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for CartError {
    fn from(err: rocksdb::Error) -> Self {
        CartError::InternalError(Box::new(err))
    }
}
