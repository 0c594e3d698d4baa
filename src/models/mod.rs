pub mod event;
pub mod portfolio;

pub use event::ChangeEvent;
pub use portfolio::{Position, Snapshot, Transaction, UsdValue, EXCLUDED_SYMBOLS};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TransactionKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Buy,
    Sell,
    /// Anything else the feed may emit (transfers, rewards). Never reported.
    #[serde(other)]
    Other,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "BUY"),
            TransactionKind::Sell => write!(f, "SELL"),
            TransactionKind::Other => write!(f, "OTHER"),
        }
    }
}
