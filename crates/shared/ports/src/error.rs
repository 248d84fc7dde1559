use bazaar_core::OrderId;
use thiserror::Error;

/// Domain-level errors for matching operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error("Orders cannot match: bid {bid} vs ask {ask}")]
    CannotMatch { bid: OrderId, ask: OrderId },

    #[error("No quantity to match")]
    NoQuantity,

    #[error("Wrong side: order {0} is on the wrong side of the book")]
    WrongSide(OrderId),
}

pub type MatchingResult<T> = std::result::Result<T, MatchingError>;
