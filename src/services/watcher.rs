use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::analysis::{diff, summary};
use crate::models::Snapshot;
use crate::services::notifier;

const COMMAND_QUEUE_CAPACITY: usize = 8;

/// Source of portfolio snapshots. Fetches may fail transiently; the watcher
/// never retries and simply waits for the next tick.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Snapshot>;
}

/// Outbound message delivery. Fire-and-forget: implementations log failures
/// and never surface them to the watcher.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str);
}

/// Commands accepted by the watcher actor.
#[derive(Debug)]
pub enum WatcherCommand {
    /// `/start`: register the chat, send a portfolio summary, and make the
    /// fetched snapshot the new diff baseline.
    Summary { chat_id: i64 },
    /// `/update`: register the chat and run one diff cycle immediately.
    PollNow { chat_id: i64 },
    /// Any plain message: register the chat for future notifications.
    RegisterChat { chat_id: i64 },
}

/// The command queue was full — the caller should ask the user to try again.
#[derive(Debug, thiserror::Error)]
#[error("watcher is busy")]
pub struct WatcherBusy;

/// Cloneable handle for submitting commands to the watcher actor.
#[derive(Debug, Clone)]
pub struct WatcherHandle {
    tx: mpsc::Sender<WatcherCommand>,
}

impl WatcherHandle {
    /// Non-blocking submit. An in-flight cycle keeps processing while
    /// commands queue up; a full queue is reported as [`WatcherBusy`].
    pub fn submit(&self, command: WatcherCommand) -> Result<(), WatcherBusy> {
        self.tx.try_send(command).map_err(|_| WatcherBusy)
    }
}

/// Create the bounded command channel for one watcher actor.
pub fn command_channel() -> (WatcherHandle, mpsc::Receiver<WatcherCommand>) {
    let (tx, rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    (WatcherHandle { tx }, rx)
}

/// The poll-loop actor. Sole owner of the mutable polling state: the
/// previous snapshot used as the diff baseline and the registered recipient
/// chat. No other task reads or writes either.
pub struct Watcher<S, N> {
    source: S,
    sink: N,
    previous: Option<Snapshot>,
    chat_id: Option<i64>,
}

impl<S: SnapshotSource, N: MessageSink> Watcher<S, N> {
    pub fn new(source: S, sink: N) -> Self {
        Self {
            source,
            sink,
            previous: None,
            chat_id: None,
        }
    }

    /// Drive the watcher until the command channel closes. Ticks and
    /// commands are handled one at a time on this task, so every
    /// fetch→detect→notify→store cycle runs as a single critical section;
    /// a tick that fires during an in-flight command is skipped, never
    /// interleaved.
    pub async fn run(mut self, mut rx: mpsc::Receiver<WatcherCommand>, poll_interval: Duration) {
        tracing::info!(
            interval_secs = poll_interval.as_secs(),
            "Portfolio watcher started"
        );

        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.poll_cycle().await,
                command = rx.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => {
                        tracing::warn!("Watcher command channel closed — stopping");
                        break;
                    }
                },
            }
        }
    }

    /// Apply one inbound command.
    pub async fn handle_command(&mut self, command: WatcherCommand) {
        match command {
            WatcherCommand::Summary { chat_id } => self.send_summary(chat_id).await,
            WatcherCommand::PollNow { chat_id } => {
                self.chat_id = Some(chat_id);
                tracing::info!(chat_id, "Manual update requested");
                self.poll_cycle().await;
            }
            WatcherCommand::RegisterChat { chat_id } => {
                self.chat_id = Some(chat_id);
                tracing::info!(chat_id, "Recipient chat registered");
                self.sink.send(chat_id, notifier::CHAT_REGISTERED).await;
            }
        }
    }

    /// One diff cycle: fetch, detect changes against the previous snapshot,
    /// notify, and store the fetched snapshot as the new baseline. On fetch
    /// failure the baseline is left untouched and the next tick retries.
    pub async fn poll_cycle(&mut self) {
        counter!("poll_cycles_total").increment(1);

        let curr = match self.source.fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                counter!("poll_failures_total").increment(1);
                tracing::error!(error = %e, "Failed to fetch portfolio — keeping previous snapshot");
                return;
            }
        };

        if self.previous.is_none() {
            tracing::info!(
                positions = curr.positions.len(),
                "Initial portfolio state loaded"
            );
        }

        let events = diff::detect(self.previous.as_ref(), &curr);
        if events.is_empty() {
            tracing::debug!("No portfolio changes detected");
        } else {
            counter!("change_events_total").increment(events.len() as u64);
            tracing::info!(events = events.len(), "Portfolio changes detected");

            for event in &events {
                match self.chat_id {
                    Some(chat_id) => {
                        self.sink.send(chat_id, &notifier::format_update(event)).await;
                        counter!("notifications_sent_total").increment(1);
                    }
                    None => tracing::warn!(
                        symbol = event.symbol(),
                        "No recipient chat registered — dropping notification"
                    ),
                }
            }
        }

        // Stored unconditionally on fetch success, even if nothing changed.
        self.previous = Some(curr);
    }

    /// `/start`: register the chat, send the portfolio summary, and refresh
    /// the baseline so the next tick diffs against this known-good point.
    /// Fetch failure is reported back to the requesting chat.
    async fn send_summary(&mut self, chat_id: i64) {
        self.chat_id = Some(chat_id);
        counter!("summary_requests_total").increment(1);
        tracing::info!(chat_id, "Portfolio summary requested");

        match self.source.fetch().await {
            Ok(curr) => {
                let text = notifier::format_summary(&summary::summarize(&curr));
                self.sink.send(chat_id, &text).await;
                counter!("notifications_sent_total").increment(1);
                self.previous = Some(curr);
            }
            Err(e) => {
                counter!("poll_failures_total").increment(1);
                tracing::error!(error = %e, chat_id, "Failed to fetch portfolio for summary");
                self.sink.send(chat_id, notifier::FETCH_FAILED).await;
            }
        }
    }
}
