mod order;
mod side;
mod trade;

pub use order::{CompletedOrder, Order};
pub use side::Side;
pub use trade::Trade;
