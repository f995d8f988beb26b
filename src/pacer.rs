//! Send-cadence timing for the streaming session.
//!
//! The pacer is the only timing authority in the system: every outbound audio
//! frame is gated by one of its ticks. The tick source is injectable so tests
//! can drive the loop synchronously instead of depending on wall-clock time.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};

/// What the handler wants the pacer to do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking
    Continue,
    /// Stop the loop; `on_stop` fires next
    Stop,
}

/// Source of tick events.
#[async_trait]
pub trait Ticker: Send {
    /// Wait until the next tick is due.
    async fn tick(&mut self);
}

/// Wall-clock ticker with a fixed period.
///
/// Best-effort cadence: a late tick delays the schedule rather than bursting
/// to catch up, so at most one frame is ever in flight.
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Channel-driven ticker for tests: each message on the channel is one tick.
pub struct ManualTicker {
    rx: mpsc::Receiver<()>,
}

impl ManualTicker {
    pub fn new() -> (mpsc::Sender<()>, Self) {
        let (tx, rx) = mpsc::channel(16);
        (tx, Self { rx })
    }
}

#[async_trait]
impl Ticker for ManualTicker {
    async fn tick(&mut self) {
        if self.rx.recv().await.is_none() {
            // Sender dropped: no further ticks, ever
            std::future::pending::<()>().await;
        }
    }
}

/// Receives the pacer's tick and stop events.
#[async_trait]
pub trait PacerHandler: Send {
    async fn on_tick(&mut self) -> anyhow::Result<TickOutcome>;
    async fn on_stop(&mut self) -> anyhow::Result<()>;
}

/// Drives a [`PacerHandler`] at the ticker's cadence until the handler signals
/// stop or fails.
///
/// `run` consumes the pacer, so a pacer can only ever start once. `on_stop`
/// fires exactly once per lifecycle, whether the loop ended by exhaustion or
/// by a tick error, and no tick is delivered afterwards since the loop has
/// already returned.
pub struct Pacer<T: Ticker> {
    ticker: T,
}

impl<T: Ticker> Pacer<T> {
    pub fn new(ticker: T) -> Self {
        Self { ticker }
    }

    pub async fn run<H: PacerHandler>(mut self, handler: &mut H) -> anyhow::Result<()> {
        loop {
            self.ticker.tick().await;

            match handler.on_tick().await {
                Ok(TickOutcome::Continue) => {}
                Ok(TickOutcome::Stop) => {
                    handler.on_stop().await?;
                    return Ok(());
                }
                Err(tick_err) => {
                    // The tick error is the one worth reporting; a failed
                    // stop on an already-dead session is secondary.
                    if let Err(stop_err) = handler.on_stop().await {
                        tracing::warn!("Pacer stop handler failed: {}", stop_err);
                    }
                    return Err(tick_err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingHandler {
        ticks: usize,
        stops: usize,
        stop_after: usize,
        fail_on_tick: Option<usize>,
    }

    impl CountingHandler {
        fn new(stop_after: usize) -> Self {
            Self {
                ticks: 0,
                stops: 0,
                stop_after,
                fail_on_tick: None,
            }
        }
    }

    #[async_trait]
    impl PacerHandler for CountingHandler {
        async fn on_tick(&mut self) -> anyhow::Result<TickOutcome> {
            assert_eq!(self.stops, 0, "tick delivered after stop");
            self.ticks += 1;

            if self.fail_on_tick == Some(self.ticks) {
                anyhow::bail!("simulated tick failure");
            }

            if self.ticks >= self.stop_after {
                Ok(TickOutcome::Stop)
            } else {
                Ok(TickOutcome::Continue)
            }
        }

        async fn on_stop(&mut self) -> anyhow::Result<()> {
            self.stops += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stop_fires_exactly_once() {
        let (tx, ticker) = ManualTicker::new();
        let mut handler = CountingHandler::new(3);

        for _ in 0..3 {
            tx.send(()).await.unwrap();
        }

        Pacer::new(ticker).run(&mut handler).await.unwrap();

        assert_eq!(handler.ticks, 3);
        assert_eq!(handler.stops, 1, "on_stop should fire exactly once");
    }

    #[tokio::test]
    async fn test_no_tick_consumed_after_stop() {
        let (tx, ticker) = ManualTicker::new();
        let mut handler = CountingHandler::new(2);

        // Queue more ticks than the handler will accept
        for _ in 0..5 {
            tx.send(()).await.unwrap();
        }

        Pacer::new(ticker).run(&mut handler).await.unwrap();

        // The loop returned on tick 2; the queued extras were never delivered
        assert_eq!(handler.ticks, 2);
        assert_eq!(handler.stops, 1);
    }

    #[tokio::test]
    async fn test_stop_fires_once_on_tick_error() {
        let (tx, ticker) = ManualTicker::new();
        let mut handler = CountingHandler::new(10);
        handler.fail_on_tick = Some(2);

        for _ in 0..4 {
            tx.send(()).await.unwrap();
        }

        let result = Pacer::new(ticker).run(&mut handler).await;

        assert!(result.is_err());
        assert_eq!(handler.ticks, 2);
        assert_eq!(handler.stops, 1, "on_stop should fire even when a tick fails");
    }

    #[tokio::test]
    async fn test_interval_ticker_paces() {
        // Two ticks at a 5ms period should take at least one period of
        // wall-clock time (the first tick completes immediately).
        let mut ticker = IntervalTicker::new(Duration::from_millis(5));
        let start = tokio::time::Instant::now();
        ticker.tick().await;
        ticker.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
