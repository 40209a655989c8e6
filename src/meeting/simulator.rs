//! Lifecycle simulator.
//!
//! Stands in for a real transcription/summarization backend: on every tick
//! each non-terminal meeting may advance one step along the fixed
//! progression. The randomness source and the tick are both explicit so
//! tests drive deterministic ticks instead of wall-clock chance.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::store::MeetingStore;
use crate::demo;

/// Uniform draws in `[0, 1)` feeding the advancement decision.
pub trait AdvanceSource: Send {
    fn draw(&mut self) -> f64;
}

/// Production source backed by a small PRNG seeded from entropy.
pub struct EntropySource(SmallRng);

impl EntropySource {
    pub fn new() -> Self {
        Self(SmallRng::from_entropy())
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvanceSource for EntropySource {
    fn draw(&mut self) -> f64 {
        self.0.gen()
    }
}

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Wall-clock cadence of the background task.
    pub tick_interval: Duration,
    /// A meeting advances when the draw exceeds this threshold.
    pub advance_threshold: f64,
    /// Per-tick chance of spawning an auto-generated demo meeting.
    /// Zero disables spawning.
    pub spawn_chance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(3),
            advance_threshold: 0.7,
            spawn_chance: 0.0,
        }
    }
}

/// Advances non-terminal meetings through the store on a fixed cadence.
pub struct LifecycleSimulator {
    store: MeetingStore,
    config: SimulatorConfig,
    source: Box<dyn AdvanceSource>,
    spawned: u32,
}

impl LifecycleSimulator {
    pub fn new(store: MeetingStore, config: SimulatorConfig) -> Self {
        Self::with_source(store, config, Box::new(EntropySource::new()))
    }

    /// Inject a specific draw source (deterministic in tests).
    pub fn with_source(
        store: MeetingStore,
        config: SimulatorConfig,
        source: Box<dyn AdvanceSource>,
    ) -> Self {
        Self {
            store,
            config,
            source,
            spawned: 0,
        }
    }

    /// One evaluation pass: maybe spawn a demo meeting, then give every
    /// non-terminal meeting a chance to advance one step.
    ///
    /// A failed transition attempt for one meeting never affects the others
    /// and never stops the timer.
    pub async fn tick(&mut self) {
        if self.config.spawn_chance > 0.0 && self.source.draw() < self.config.spawn_chance {
            self.spawned += 1;
            let meeting = demo::generated_meeting(self.spawned);
            info!("Simulator spawning demo meeting: {}", meeting.title);
            self.store.add(meeting).await;
        }

        let snapshot = self.store.snapshot().await;
        for meeting in snapshot {
            if meeting.status.is_terminal() {
                continue;
            }
            if self.source.draw() <= self.config.advance_threshold {
                continue;
            }
            match meeting.status.next() {
                Some(next) => {
                    debug!(
                        "Advancing meeting {} from {} to {}",
                        meeting.id,
                        meeting.status.as_str(),
                        next.as_str()
                    );
                    // The meeting may have been removed by a reseed since the
                    // snapshot was taken; the store ignores unknown ids.
                    self.store.update_status(&meeting.id, next).await;
                }
                None => warn!(
                    "Meeting {} is {} but has no next state",
                    meeting.id,
                    meeting.status.as_str()
                ),
            }
        }
    }

    /// Run the simulator on its own task until the handle is shut down.
    pub fn spawn(mut self) -> SimulatorHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let interval = self.config.tick_interval;

        info!(
            "Lifecycle simulator running every {:?} (threshold {})",
            interval, self.config.advance_threshold
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately; skip it so the demo data is
            // visible untouched for at least one interval.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        info!("Lifecycle simulator stopped");
                        break;
                    }
                    _ = ticker.tick() => self.tick().await,
                }
            }
        });

        SimulatorHandle { cancel, task }
    }
}

/// Owns the simulator's timer task. Dropping without `shutdown` aborts
/// nothing; call `shutdown` to stop the timer deterministically.
pub struct SimulatorHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Cancel the timer and wait for the task to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::model::{Meeting, MeetingStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Replays a fixed sequence of draws, then repeats the last one.
    struct ScriptedSource {
        draws: Vec<f64>,
        at: usize,
    }

    impl ScriptedSource {
        fn new(draws: Vec<f64>) -> Self {
            Self { draws, at: 0 }
        }
    }

    impl AdvanceSource for ScriptedSource {
        fn draw(&mut self) -> f64 {
            let value = self.draws[self.at.min(self.draws.len() - 1)];
            self.at += 1;
            value
        }
    }

    fn seeded_store(entries: &[(&str, MeetingStatus)]) -> MeetingStore {
        let meetings = entries
            .iter()
            .map(|(id, status)| {
                let mut m = Meeting::new(format!("Meeting {}", id), *status);
                m.id = id.to_string();
                m
            })
            .collect();
        MeetingStore::with_meetings(meetings)
    }

    fn simulator(store: MeetingStore, draws: Vec<f64>) -> LifecycleSimulator {
        LifecycleSimulator::with_source(
            store,
            SimulatorConfig::default(),
            Box::new(ScriptedSource::new(draws)),
        )
    }

    #[tokio::test]
    async fn test_advances_one_step_when_draw_exceeds_threshold() {
        let store = seeded_store(&[("1", MeetingStatus::Recording)]);
        let mut sim = simulator(store.clone(), vec![0.9]);

        sim.tick().await;

        // Single-step only: recording can only ever become transcribing
        assert_eq!(
            store.get("1").await.unwrap().status,
            MeetingStatus::Transcribing
        );
    }

    #[tokio::test]
    async fn test_no_advance_at_or_below_threshold() {
        let store = seeded_store(&[("1", MeetingStatus::Recording)]);
        let mut sim = simulator(store.clone(), vec![0.7]);

        sim.tick().await;
        sim.tick().await;

        assert_eq!(
            store.get("1").await.unwrap().status,
            MeetingStatus::Recording
        );
    }

    #[tokio::test]
    async fn test_terminal_absorption() {
        let store = seeded_store(&[("2", MeetingStatus::Completed)]);
        let before = store.get("2").await.unwrap();
        let mut sim = simulator(store.clone(), vec![0.99]);

        for _ in 0..5 {
            sim.tick().await;
        }

        let after = store.get("2").await.unwrap();
        assert_eq!(after.status, MeetingStatus::Completed);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn test_full_progression_takes_three_ticks() {
        let store = seeded_store(&[("1", MeetingStatus::Recording)]);
        let mut sim = simulator(store.clone(), vec![0.99]);

        sim.tick().await;
        assert_eq!(
            store.get("1").await.unwrap().status,
            MeetingStatus::Transcribing
        );
        sim.tick().await;
        assert_eq!(
            store.get("1").await.unwrap().status,
            MeetingStatus::Analyzing
        );
        sim.tick().await;
        assert_eq!(
            store.get("1").await.unwrap().status,
            MeetingStatus::Completed
        );
        sim.tick().await;
        assert_eq!(
            store.get("1").await.unwrap().status,
            MeetingStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_meetings_advance_independently() {
        let store = seeded_store(&[
            ("1", MeetingStatus::Recording),
            ("2", MeetingStatus::Analyzing),
        ]);
        // Meetings are evaluated in collection order: "1" draws first.
        let mut sim = simulator(store.clone(), vec![0.5, 0.9]);

        sim.tick().await;

        assert_eq!(
            store.get("1").await.unwrap().status,
            MeetingStatus::Recording
        );
        assert_eq!(
            store.get("2").await.unwrap().status,
            MeetingStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_spawn_chance_inserts_demo_meeting() {
        let store = seeded_store(&[]);
        let config = SimulatorConfig {
            spawn_chance: 0.2,
            ..Default::default()
        };
        // First draw (0.1) is below spawn_chance -> spawn; the spawned
        // meeting's advancement draw (0.5) stays below the threshold.
        let mut sim = LifecycleSimulator::with_source(
            store.clone(),
            config,
            Box::new(ScriptedSource::new(vec![0.1, 0.5])),
        );

        sim.tick().await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].status, MeetingStatus::Recording);
    }

    /// Never advances anything, but counts every draw.
    struct CountingSource(Arc<AtomicUsize>);

    impl AdvanceSource for CountingSource {
        fn draw(&mut self) -> f64 {
            self.0.fetch_add(1, Ordering::SeqCst);
            0.0
        }
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_timer() {
        let store = seeded_store(&[("1", MeetingStatus::Recording)]);
        let draws = Arc::new(AtomicUsize::new(0));
        let config = SimulatorConfig {
            tick_interval: Duration::from_millis(5),
            ..Default::default()
        };
        let sim = LifecycleSimulator::with_source(
            store.clone(),
            config,
            Box::new(CountingSource(draws.clone())),
        );

        let handle = sim.spawn();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(draws.load(Ordering::SeqCst) > 0);

        handle.shutdown().await;

        // No further ticks after shutdown
        let after = draws.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(draws.load(Ordering::SeqCst), after);
    }
}
