use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use foliowatch::models::{Position, Snapshot, Transaction, TransactionKind};
use foliowatch::services::watcher::{MessageSink, SnapshotSource};

/// Snapshot source fed from a scripted queue of fetch results.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<anyhow::Result<Snapshot>>>,
}

impl ScriptedSource {
    #[allow(dead_code)]
    pub fn new(responses: Vec<anyhow::Result<Snapshot>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn fetch(&self) -> anyhow::Result<Snapshot> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("scripted source exhausted")))
    }
}

/// Message sink that records everything it is asked to deliver.
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<(i64, String)>>>,
}

impl RecordingSink {
    #[allow(dead_code)]
    pub fn messages(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, chat_id: i64, text: &str) {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
    }
}

#[allow(dead_code)]
pub fn buy_tx(quantity: f64, price_usd: f64) -> Transaction {
    Transaction {
        kind: TransactionKind::Buy,
        quantity,
        price_usd,
        date: None,
    }
}

#[allow(dead_code)]
pub fn make_position(
    id: &str,
    symbol: &str,
    quantity: f64,
    transactions: Vec<Transaction>,
) -> Position {
    Position {
        id: id.into(),
        symbol: symbol.into(),
        quantity,
        transactions,
        unrealized_profit: None,
        unrealized_profit_percent: None,
    }
}

#[allow(dead_code)]
pub fn make_snapshot(positions: Vec<Position>) -> Snapshot {
    Snapshot { positions }
}
