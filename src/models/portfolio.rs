use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::TransactionKind;

/// Stablecoin symbols excluded from all analysis and reporting.
pub const EXCLUDED_SYMBOLS: [&str; 3] = ["USD", "USDT", "USDC"];

// ---------------------------------------------------------------------------
// Portfolio document (share API)
// ---------------------------------------------------------------------------

/// One fetched portfolio state. Identity is structural; the feed carries no
/// version field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, rename = "portfolios")]
    pub positions: Vec<Position>,
}

impl Snapshot {
    /// Look up a position by its feed id. Ids are authoritative for matching
    /// across snapshots; symbols are not unique enough.
    pub fn position_by_id(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }
}

/// One token holding with its quantity and transaction history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    #[serde(deserialize_with = "string_lenient")]
    pub id: String,
    pub symbol: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub quantity: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default, rename = "unrealizedProfit")]
    pub unrealized_profit: Option<UsdValue>,
    #[serde(default, rename = "unrealizedProfitPercent")]
    pub unrealized_profit_percent: Option<UsdValue>,
}

impl Position {
    pub fn is_excluded(&self) -> bool {
        EXCLUDED_SYMBOLS.contains(&self.symbol.as_str())
    }

    /// Precomputed unrealized profit in USD; 0 when the feed omits it.
    pub fn unrealized_profit_usd(&self) -> f64 {
        self.unrealized_profit.as_ref().map_or(0.0, |v| v.usd)
    }

    /// Precomputed unrealized profit percentage; 0 when the feed omits it.
    pub fn unrealized_profit_percent(&self) -> f64 {
        self.unrealized_profit_percent.as_ref().map_or(0.0, |v| v.usd)
    }
}

/// A single BUY or SELL entry in a position's history. Feed order is
/// authoritative and not necessarily chronological; `date` is informational
/// only and never used for sorting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transactionType")]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub quantity: f64,
    #[serde(default, rename = "priceUsd", deserialize_with = "f64_lenient")]
    pub price_usd: f64,
    #[serde(default, deserialize_with = "datetime_lenient")]
    pub date: Option<DateTime<Utc>>,
}

/// USD-denominated value object (`{"usd": ...}`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UsdValue {
    #[serde(default, deserialize_with = "f64_lenient")]
    pub usd: f64,
}

// ---------------------------------------------------------------------------
// Lenient deserializers
// ---------------------------------------------------------------------------
// The share API is inconsistent about numeric encoding: quantities and prices
// arrive as JSON numbers or as numeric strings depending on the endpoint
// version. Malformed fields degrade to their zero default instead of failing
// the whole fetch.

fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
        Other(serde_json::Value),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n,
        Raw::Str(s) => s.trim().parse().unwrap_or(0.0),
        Raw::Other(_) => 0.0,
    })
}

fn string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

fn datetime_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_datetime))
}

fn parse_datetime(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => {
            let ts = n.as_i64()?;
            // If >1e12, it's milliseconds
            if ts > 1_000_000_000_000 {
                DateTime::from_timestamp(ts / 1000, ((ts % 1000) * 1_000_000) as u32)
            } else {
                DateTime::from_timestamp(ts, 0)
            }
        }
        serde_json::Value::String(s) => {
            if let Ok(ts) = s.parse::<i64>() {
                return parse_datetime(&serde_json::Value::from(ts));
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_from_feed_document() {
        let doc = json!({
            "portfolios": [
                {
                    "id": 42,
                    "symbol": "BTC",
                    "quantity": "1.5",
                    "transactions": [
                        { "transactionType": "BUY", "quantity": 0.5, "priceUsd": "50000", "date": 1714000000000u64 }
                    ],
                    "unrealizedProfit": { "usd": 123.45 }
                }
            ]
        });

        let snapshot: Snapshot = serde_json::from_value(doc).unwrap();
        assert_eq!(snapshot.positions.len(), 1);

        let position = &snapshot.positions[0];
        assert_eq!(position.id, "42");
        assert_eq!(position.quantity, 1.5);
        assert_eq!(position.unrealized_profit_usd(), 123.45);
        assert_eq!(position.unrealized_profit_percent(), 0.0);

        let tx = &position.transactions[0];
        assert_eq!(tx.kind, TransactionKind::Buy);
        assert_eq!(tx.price_usd, 50_000.0);
        assert!(tx.date.is_some());
    }

    #[test]
    fn test_missing_and_malformed_fields_degrade_to_defaults() {
        let doc = json!({
            "portfolios": [
                { "id": "7", "symbol": "ETH", "quantity": null },
                { "id": "8", "symbol": "SOL", "quantity": "not-a-number" }
            ]
        });

        let snapshot: Snapshot = serde_json::from_value(doc).unwrap();
        assert_eq!(snapshot.positions[0].quantity, 0.0);
        assert_eq!(snapshot.positions[1].quantity, 0.0);
        assert!(snapshot.positions[0].transactions.is_empty());
    }

    #[test]
    fn test_unknown_transaction_type_maps_to_other() {
        let doc = json!({ "transactionType": "AIRDROP", "quantity": 1.0, "priceUsd": 0.0 });
        let tx: Transaction = serde_json::from_value(doc).unwrap();
        assert_eq!(tx.kind, TransactionKind::Other);
    }

    #[test]
    fn test_excluded_symbols() {
        for symbol in ["USD", "USDT", "USDC"] {
            let position = Position {
                id: "1".into(),
                symbol: symbol.into(),
                quantity: 100.0,
                transactions: vec![],
                unrealized_profit: None,
                unrealized_profit_percent: None,
            };
            assert!(position.is_excluded(), "{symbol} should be excluded");
        }
    }
}
