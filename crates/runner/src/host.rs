//! Simulation Host - drives the synchronous core on a timer
//!
//! The engine sits behind one async mutex; each tick takes the lock, runs a
//! whole `step()`, and releases it before publishing. Full snapshots are
//! only taken when one is due: no more often than the publish interval,
//! plus always on the final tick.

use bazaar_sim::{MarketSimulation, MarketSnapshot, SimulationError, SimulationStats};
use log::{error, info, trace};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast, watch};
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::HostConfig;
use crate::error::Result;

const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

/// Why a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// Configured tick limit reached
    TickLimit,
    /// Stop requested through a [`StopHandle`]
    Stopped,
    /// A step failed and the engine is corrupted
    Fault(SimulationError),
}

/// Outcome of [`SimulationHost::run`]
#[derive(Debug, Clone)]
pub struct HostReport {
    pub reason: StopReason,
    pub seed: u64,
    pub final_snapshot: MarketSnapshot,
    pub stats: SimulationStats,
}

/// Requests a running host to stop after its current tick
#[derive(Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }
}

pub struct SimulationHost {
    config: HostConfig,
    seed: u64,
    simulation: Arc<Mutex<MarketSimulation>>,
    snapshot_tx: broadcast::Sender<MarketSnapshot>,
    stop_tx: Arc<watch::Sender<bool>>,
}

impl SimulationHost {
    /// Validate the configuration and build the engine.
    ///
    /// Nothing steps until [`run`](Self::run) is awaited.
    pub fn new(config: HostConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let simulation = MarketSimulation::with_seed(config.simulation.clone(), seed)?;
        let (snapshot_tx, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        let (stop_tx, _) = watch::channel(false);

        info!(
            "Simulation host ready: seed={}, interval={}ms, max_ticks={:?}",
            seed, config.tick_interval_ms, config.max_ticks
        );

        Ok(Self {
            config,
            seed,
            simulation: Arc::new(Mutex::new(simulation)),
            snapshot_tx,
            stop_tx: Arc::new(stop_tx),
        })
    }

    /// Subscribe to published snapshots
    pub fn subscribe(&self) -> broadcast::Receiver<MarketSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.stop_tx.clone(),
        }
    }

    /// Shared engine, for inspection or seeding orders between ticks
    pub fn simulation(&self) -> Arc<Mutex<MarketSimulation>> {
        self.simulation.clone()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Step on every timer tick until the tick limit, a stop request, or a
    /// core fault.
    pub async fn run(self) -> HostReport {
        let mut interval = tokio::time::interval(Duration::from_millis(self.config.tick_interval_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let publish_every = Duration::from_millis(self.config.publish_interval_ms);
        let mut stop_rx = self.stop_tx.subscribe();
        let mut last_publish: Option<Instant> = None;

        info!("Simulation started ({}ms ticks)", self.config.tick_interval_ms);

        let reason = loop {
            if *stop_rx.borrow_and_update() {
                break StopReason::Stopped;
            }

            tokio::select! {
                _ = interval.tick() => {}
                _ = stop_rx.changed() => continue,
            }

            // Step and, when due, snapshot under one lock so the published
            // view is exactly the state this tick committed
            let step = {
                let mut simulation = self.simulation.lock().await;
                simulation.step().map(|report| {
                    let limit_reached = self.config.max_ticks.is_some_and(|max| report.tick >= max);
                    let publish_due =
                        last_publish.is_none_or(|at| at.elapsed() >= publish_every);
                    let snapshot = (publish_due || limit_reached).then(|| simulation.snapshot());
                    (report.tick, limit_reached, snapshot)
                })
            };

            let (tick, limit_reached, snapshot) = match step {
                Ok(stepped) => stepped,
                Err(e) => {
                    error!("Simulation halted: {}", e);
                    break StopReason::Fault(e);
                }
            };

            if let Some(snapshot) = snapshot {
                if self.snapshot_tx.send(snapshot).is_err() {
                    trace!("No snapshot subscribers at tick {}", tick);
                }
                last_publish = Some(Instant::now());
            }

            if limit_reached {
                break StopReason::TickLimit;
            }
        };

        let (final_snapshot, stats) = {
            let simulation = self.simulation.lock().await;
            (simulation.snapshot(), simulation.stats().clone())
        };

        info!(
            "Simulation stopped at tick {} ({:?}): {} trades, {} units, {} evicted",
            final_snapshot.tick, reason, stats.trades, stats.volume, stats.evicted
        );

        HostReport {
            reason,
            seed: self.seed,
            final_snapshot,
            stats,
        }
    }
}
