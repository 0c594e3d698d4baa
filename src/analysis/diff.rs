use crate::models::{ChangeEvent, Snapshot, TransactionKind};

/// Derive the ordered list of change events between two consecutive
/// snapshots.
///
/// Rules:
/// - No `prev` means this fetch is the baseline; nothing is reported.
/// - Positions are matched across snapshots by `id`, never by symbol.
/// - A position new in `curr` reports one BUY per BUY transaction in its
///   history; each event carries the position's current total quantity as
///   the remaining amount, not a running balance.
/// - A quantity increase of Δ reports a BUY only for transactions whose
///   quantity equals Δ exactly. A Δ assembled from several partial buys
///   matches no single transaction and reports nothing.
/// - A quantity decrease consumes SELL transactions greedily in feed order,
///   each no larger than the still-unattributed decrease, until it is
///   accounted for or the history runs out.
/// - A position missing from `curr` reports a single liquidation.
///
/// Output ordering: events for new/changed positions in `curr` order, then
/// liquidations in `prev` order. Stablecoin positions are skipped on both
/// sides.
pub fn detect(prev: Option<&Snapshot>, curr: &Snapshot) -> Vec<ChangeEvent> {
    let Some(prev) = prev else {
        return Vec::new();
    };

    let mut events = Vec::new();

    for position in curr.positions.iter().filter(|p| !p.is_excluded()) {
        match prev.position_by_id(&position.id) {
            None => {
                for tx in &position.transactions {
                    if tx.kind == TransactionKind::Buy {
                        events.push(ChangeEvent::Buy {
                            symbol: position.symbol.clone(),
                            quantity: tx.quantity,
                            price_usd: tx.price_usd,
                            spent_usd: tx.quantity * tx.price_usd,
                            remaining: position.quantity,
                        });
                    }
                }
            }
            Some(prev_position) => {
                let delta = position.quantity - prev_position.quantity;

                if delta > 0.0 {
                    for tx in &position.transactions {
                        // Exact float match is the attribution contract:
                        // approximate, but must not be widened.
                        if tx.kind == TransactionKind::Buy && tx.quantity == delta {
                            events.push(ChangeEvent::Buy {
                                symbol: position.symbol.clone(),
                                quantity: tx.quantity,
                                price_usd: tx.price_usd,
                                spent_usd: tx.quantity * tx.price_usd,
                                remaining: position.quantity,
                            });
                        }
                    }
                } else if delta < 0.0 {
                    let mut outstanding = -delta;
                    for tx in &position.transactions {
                        if tx.kind == TransactionKind::Sell && tx.quantity <= outstanding {
                            events.push(ChangeEvent::Sell {
                                symbol: position.symbol.clone(),
                                quantity: tx.quantity,
                                price_usd: tx.price_usd,
                                received_usd: tx.quantity * tx.price_usd,
                                remaining: position.quantity,
                            });
                            outstanding -= tx.quantity;
                        }
                    }
                }
                // Unchanged quantity: no event, even if the transaction
                // list differs.
            }
        }
    }

    for position in prev.positions.iter().filter(|p| !p.is_excluded()) {
        if curr.position_by_id(&position.id).is_none() {
            events.push(ChangeEvent::Liquidated {
                symbol: position.symbol.clone(),
            });
        }
    }

    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
