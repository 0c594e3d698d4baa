use serde::Serialize;

/// A notification-worthy difference derived between two consecutive
/// snapshots. Carries raw feed values; formatting to 2 decimal places
/// happens only at the message boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChangeEvent {
    Buy {
        symbol: String,
        quantity: f64,
        price_usd: f64,
        spent_usd: f64,
        /// The position's current total quantity, not a running balance.
        remaining: f64,
    },
    Sell {
        symbol: String,
        quantity: f64,
        price_usd: f64,
        received_usd: f64,
        remaining: f64,
    },
    /// The position disappeared from the feed entirely.
    Liquidated { symbol: String },
}

impl ChangeEvent {
    pub fn symbol(&self) -> &str {
        match self {
            ChangeEvent::Buy { symbol, .. }
            | ChangeEvent::Sell { symbol, .. }
            | ChangeEvent::Liquidated { symbol } => symbol,
        }
    }
}
