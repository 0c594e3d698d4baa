use crate::models::ChangeEvent;

/// Fixed service replies.
pub const CHAT_REGISTERED: &str = "Chat ID set. You will now receive updates.";
pub const FETCH_FAILED: &str = "Failed to fetch portfolio data. Please try again later.";
pub const BUSY: &str = "An update is already in progress. Please try again.";

/// Format a single change event. Quantities and monetary amounts are
/// rendered with exactly 2 decimal places.
pub fn format_change_event(event: &ChangeEvent) -> String {
    match event {
        ChangeEvent::Buy {
            symbol,
            quantity,
            price_usd,
            spent_usd,
            remaining,
        } => format!(
            "BUY of {symbol}\n\
             Quantity: {quantity:.2}\n\
             Price: {price_usd:.2} USD\n\
             Money spent: {spent_usd:.2} USD\n\
             Remaining quantity: {remaining:.2}\n"
        ),
        ChangeEvent::Sell {
            symbol,
            quantity,
            price_usd,
            received_usd,
            remaining,
        } => format!(
            "SELL of {symbol}\n\
             Quantity: {quantity:.2}\n\
             Price: {price_usd:.2} USD\n\
             Money received: {received_usd:.2} USD\n\
             Remaining quantity: {remaining:.2}\n"
        ),
        ChangeEvent::Liquidated { symbol } => {
            format!("Token sold out: {symbol} (Symbol: {symbol})")
        }
    }
}

/// Wrap a change event for delivery.
pub fn format_update(event: &ChangeEvent) -> String {
    format!("Update:\n\n{}", format_change_event(event))
}

/// Wrap the portfolio summary for delivery.
pub fn format_summary(summary: &str) -> String {
    format!("Portfolio Summary:\n\n{summary}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_event_formats_to_two_decimals() {
        let event = ChangeEvent::Buy {
            symbol: "BTC".into(),
            quantity: 0.5,
            price_usd: 50_000.0,
            spent_usd: 25_000.0,
            remaining: 1.5,
        };

        assert_eq!(
            format_change_event(&event),
            "BUY of BTC\nQuantity: 0.50\nPrice: 50000.00 USD\nMoney spent: 25000.00 USD\nRemaining quantity: 1.50\n"
        );
    }

    #[test]
    fn test_sell_event_reports_money_received() {
        let event = ChangeEvent::Sell {
            symbol: "ETH".into(),
            quantity: 2.0,
            price_usd: 3_000.555,
            received_usd: 6_001.11,
            remaining: 0.0,
        };

        let text = format_change_event(&event);
        assert!(text.starts_with("SELL of ETH\n"));
        assert!(text.contains("Price: 3000.56 USD\n"));
        assert!(text.contains("Money received: 6001.11 USD\n"));
    }

    #[test]
    fn test_liquidation_text() {
        let event = ChangeEvent::Liquidated {
            symbol: "DOT".into(),
        };
        assert_eq!(
            format_change_event(&event),
            "Token sold out: DOT (Symbol: DOT)"
        );
    }

    #[test]
    fn test_delivery_wrappers() {
        let event = ChangeEvent::Liquidated {
            symbol: "DOT".into(),
        };
        assert!(format_update(&event).starts_with("Update:\n\n"));
        assert!(format_summary("Symbol: BTC").starts_with("Portfolio Summary:\n\n"));
    }
}
