use bazaar_core::{Order, Price, Quantity, Side, Tick, Trade};
use bazaar_ports::{MatchingAlgorithm, MatchingError, MatchingResult};
use rust_decimal::Decimal;

/// Standard price-time priority matching engine
///
/// Orders are matched based on:
/// 1. Best price (highest bid, lowest ask)
/// 2. Time priority (earlier tick first at the same price)
///
/// The standing (older) order sets the transaction price. Orders placed in
/// the same tick trade at the midpoint of the two limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceTimeMatchingEngine;

impl PriceTimeMatchingEngine {
    pub fn new() -> Self {
        Self
    }
}

impl MatchingAlgorithm for PriceTimeMatchingEngine {
    fn name(&self) -> &str {
        "Price-Time Priority"
    }

    fn can_match(&self, bid: &Order, ask: &Order) -> bool {
        // Must be opposite sides
        if bid.side != Side::Buy || ask.side != Side::Sell {
            return false;
        }

        bid.is_active() && ask.is_active() && bid.price >= ask.price
    }

    fn execution_price(&self, bid: &Order, ask: &Order) -> Price {
        if bid.tick_placed > ask.tick_placed {
            // Bid is the aggressor, ask is standing
            ask.price
        } else if ask.tick_placed > bid.tick_placed {
            bid.price
        } else {
            (bid.price + ask.price) / Decimal::TWO
        }
    }

    fn match_orders(
        &self,
        bid: &Order,
        ask: &Order,
        tick: Tick,
    ) -> MatchingResult<(Trade, Quantity, Quantity)> {
        if bid.side != Side::Buy {
            return Err(MatchingError::WrongSide(bid.id));
        }
        if ask.side != Side::Sell {
            return Err(MatchingError::WrongSide(ask.id));
        }
        if !self.can_match(bid, ask) {
            return Err(MatchingError::CannotMatch {
                bid: bid.id,
                ask: ask.id,
            });
        }

        let match_qty = bid.quantity.min(ask.quantity);
        if match_qty == 0 {
            return Err(MatchingError::NoQuantity);
        }

        let match_price = self.execution_price(bid, ask);
        let trade = Trade::new(bid.id, ask.id, match_price, match_qty, tick);

        Ok((trade, bid.quantity - match_qty, ask.quantity - match_qty))
    }
}
