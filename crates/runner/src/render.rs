//! Plain-text rendering of a snapshot for the console.

use bazaar_sim::{MarketSnapshot, NewsDirection, Order};
use std::fmt::Write;

const COLUMN_WIDTH: usize = 28;

/// Render the header, news state and the top `depth` rows of each book side
pub fn render_snapshot(snapshot: &MarketSnapshot, depth: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Tick: {} | Current Price: {:.2} | Avg: {:.2} | Reversion: {:+.4}",
        snapshot.tick,
        snapshot.current_price,
        snapshot.running_average,
        snapshot.mean_reversion_bias
    );
    let _ = writeln!(out, "{}", news_line(snapshot));
    let spread = snapshot
        .spread()
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "Spread: {} | Trades this tick: {} | Filled orders: {}",
        spread,
        snapshot.trades.len(),
        snapshot.completed_orders.len()
    );

    let _ = writeln!(
        out,
        "{:<width$}{}",
        format!("Bids ({})", snapshot.active_bids.len()),
        format!("Asks ({})", snapshot.active_asks.len()),
        width = COLUMN_WIDTH
    );

    let rows = depth.min(snapshot.active_bids.len().max(snapshot.active_asks.len()));
    for row in 0..rows {
        let _ = writeln!(
            out,
            "{:<width$}{}",
            cell(snapshot.active_bids.get(row)),
            cell(snapshot.active_asks.get(row)),
            width = COLUMN_WIDTH
        );
    }

    out
}

fn cell(order: Option<&Order>) -> String {
    order.map(Order::to_string).unwrap_or_default()
}

fn news_line(snapshot: &MarketSnapshot) -> String {
    match &snapshot.news_bias {
        Some(bias) => {
            let label = match bias.direction {
                NewsDirection::Up => "UP",
                NewsDirection::Down => "DOWN",
            };
            format!(
                "News: {} (ticks {}..={})",
                label, bias.start_tick, bias.end_tick
            )
        }
        None => "News: none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_sim::{NewsBias, PricePoint, Side};
    use rust_decimal_macros::dec;

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot {
            tick: 12,
            current_price: dec!(100.5),
            active_bids: vec![
                Order::new(3, Side::Buy, dec!(100.3), 5, 11),
                Order::new(1, Side::Buy, dec!(99), 2, 10),
            ],
            active_asks: vec![Order::new(2, Side::Sell, dec!(101), 7, 10)],
            completed_orders: Vec::new(),
            news_bias: None,
            running_average: dec!(100.25),
            mean_reversion_bias: -0.0025,
            price_history: vec![PricePoint::new(0, dec!(100))],
            trades: Vec::new(),
        }
    }

    #[test]
    fn test_render_lists_both_sides() {
        let text = render_snapshot(&snapshot(), 10);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Tick: 12 | Current Price: 100.50"));
        assert!(lines[0].contains("Reversion: -0.0025"));
        assert_eq!(lines[1], "News: none");
        assert!(lines[2].starts_with("Spread: 0.70 |"));
        assert!(lines[3].starts_with("Bids (2)"));
        assert!(lines[4].starts_with("Price: 100.30 - Qty: 5"));
        assert!(lines[4].ends_with("Price: 101.00 - Qty: 7"));
        assert_eq!(lines[5].trim_end(), "Price: 99.00 - Qty: 2");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_one_sided_book_has_no_spread() {
        let mut snap = snapshot();
        snap.active_asks.clear();
        let text = render_snapshot(&snap, 0);
        assert!(text.contains("Spread: - |"));
    }

    #[test]
    fn test_render_respects_depth() {
        let text = render_snapshot(&snapshot(), 1);
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_render_news_state() {
        let mut snap = snapshot();
        snap.news_bias = Some(NewsBias {
            direction: NewsDirection::Down,
            start_tick: 10,
            end_tick: 40,
        });
        let text = render_snapshot(&snap, 0);
        assert!(text.contains("News: DOWN (ticks 10..=40)"));
    }
}
