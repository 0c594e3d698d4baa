use crate::models::{Snapshot, TransactionKind};

/// Render a human-readable summary of the portfolio: one three-line block
/// per non-stablecoin position, in snapshot order, blocks separated by a
/// blank line. Total invested is summed over BUY transactions; profit
/// figures come from the feed's precomputed unrealized-profit fields (0
/// when absent). An empty portfolio renders as an empty string.
pub fn summarize(snapshot: &Snapshot) -> String {
    let blocks: Vec<String> = snapshot
        .positions
        .iter()
        .filter(|p| !p.is_excluded())
        .map(|position| {
            let invested: f64 = position
                .transactions
                .iter()
                .filter(|tx| tx.kind == TransactionKind::Buy)
                .map(|tx| tx.price_usd * tx.quantity)
                .sum();

            format!(
                "Symbol: {}\nTotal Invested: {:.2} USD\nCurrent Profit: {:.2} USD ({:.2}%)\n",
                position.symbol,
                invested,
                position.unrealized_profit_usd(),
                position.unrealized_profit_percent(),
            )
        })
        .collect();

    blocks.join("\n\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Transaction, UsdValue};

    fn tx(kind: TransactionKind, quantity: f64, price_usd: f64) -> Transaction {
        Transaction {
            kind,
            quantity,
            price_usd,
            date: None,
        }
    }

    fn position(symbol: &str, transactions: Vec<Transaction>, profit: Option<(f64, f64)>) -> Position {
        Position {
            id: symbol.to_lowercase(),
            symbol: symbol.into(),
            quantity: 1.0,
            transactions,
            unrealized_profit: profit.map(|(usd, _)| UsdValue { usd }),
            unrealized_profit_percent: profit.map(|(_, pct)| UsdValue { usd: pct }),
        }
    }

    #[test]
    fn test_summary_block_format() {
        let snapshot = Snapshot {
            positions: vec![position(
                "BTC",
                vec![
                    tx(TransactionKind::Buy, 0.5, 40_000.0),
                    tx(TransactionKind::Buy, 0.5, 50_000.0),
                    // SELLs never count toward invested
                    tx(TransactionKind::Sell, 0.2, 60_000.0),
                ],
                Some((1234.5, 12.345)),
            )],
        };

        assert_eq!(
            summarize(&snapshot),
            "Symbol: BTC\nTotal Invested: 45000.00 USD\nCurrent Profit: 1234.50 USD (12.35%)\n"
        );
    }

    #[test]
    fn test_blocks_separated_by_blank_line_in_snapshot_order() {
        let snapshot = Snapshot {
            positions: vec![
                position("ETH", vec![], None),
                position("SOL", vec![], None),
            ],
        };

        let text = summarize(&snapshot);
        let eth = text.find("Symbol: ETH").unwrap();
        let sol = text.find("Symbol: SOL").unwrap();
        assert!(eth < sol);
        assert!(text.contains("%)\n\n\nSymbol: SOL"));
    }

    #[test]
    fn test_missing_profit_fields_default_to_zero() {
        let snapshot = Snapshot {
            positions: vec![position("ETH", vec![], None)],
        };

        assert!(summarize(&snapshot).contains("Current Profit: 0.00 USD (0.00%)"));
    }

    #[test]
    fn test_stablecoin_only_portfolio_renders_empty() {
        let snapshot = Snapshot {
            positions: vec![
                position("USDT", vec![tx(TransactionKind::Buy, 100.0, 1.0)], Some((5.0, 5.0))),
                position("USDC", vec![], None),
            ],
        };

        assert_eq!(summarize(&snapshot), "");
    }

    #[test]
    fn test_empty_portfolio_renders_empty() {
        assert_eq!(summarize(&Snapshot::default()), "");
    }
}
