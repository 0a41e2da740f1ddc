//! Polling controller
//!
//! Drives the fetch → reconcile → render → validate cycle for one grid at a
//! time. A ticker task fires on a fixed cadence; each tick spawns at most one
//! fetch. Results are tagged with the run they belong to, so anything that
//! arrives after `stop()` or a newer `start()` is dropped without touching
//! the run state.
//!
//! State transitions:
//!
//! ```text
//! Idle ──start──▶ Running ──done──▶ Done
//!                    │
//!                    ├──transport error──▶ Failed
//!                    └──stop──▶ Idle
//! ```
//!
//! `Done` and `Failed` hold until the next `start`.

use super::fetcher::{GridSnapshot, SnapshotFetcher};
use crate::communication::GridService;
use parking_lot::Mutex;
use pixelpong_core::{
    EventDispatcher, GridConfig, PixelStore, PollEvent, RunPhase, RunStatus, Snapshot,
    TransportError, UniquenessValidator, ValidationResult,
};
use pixelpong_visualizer::{Canvas, CanvasRenderer};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default tick cadence
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Collaborators and cadence of a controller
#[derive(Clone)]
pub struct PollingOptions {
    /// Delay between ticks; the first tick fires immediately
    pub interval: Duration,
    /// Validator run once per finished run
    pub validator: UniquenessValidator,
    /// Renderer invoked on every snapshot replacement
    pub renderer: CanvasRenderer,
    /// Where poll events are published
    pub events: EventDispatcher,
}

impl Default for PollingOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            validator: UniquenessValidator::default(),
            renderer: CanvasRenderer::default(),
            events: EventDispatcher::default(),
        }
    }
}

#[derive(Default)]
struct RunState {
    run_id: u64,
    config: Option<GridConfig>,
    phase: RunPhase,
    status: RunStatus,
    store: PixelStore,
    validation: Option<ValidationResult>,
    canvas: Option<Canvas>,
    in_flight: bool,
    ticker: Option<JoinHandle<()>>,
    ticks_skipped: u64,
}

impl RunState {
    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    fn is_current(&self, run_id: u64) -> bool {
        self.run_id == run_id && self.phase.is_running()
    }
}

struct Shared {
    fetcher: SnapshotFetcher,
    interval: Duration,
    validator: UniquenessValidator,
    renderer: CanvasRenderer,
    events: EventDispatcher,
    state: Mutex<RunState>,
}

/// Polls a [`GridService`] for one grid at a time
///
/// `start` must be called from within a Tokio runtime.
pub struct PollingController {
    shared: Arc<Shared>,
}

impl PollingController {
    /// Create an idle controller over `service`
    pub fn new(service: Arc<dyn GridService>, options: PollingOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                fetcher: SnapshotFetcher::new(service),
                interval: options.interval,
                validator: options.validator,
                renderer: options.renderer,
                events: options.events,
                state: Mutex::new(RunState::default()),
            }),
        }
    }

    /// Begin polling `config`, discarding everything from the previous run
    pub fn start(&self, config: GridConfig) {
        let mut state = self.shared.state.lock();
        state.cancel_ticker();

        let run_id = state.run_id.wrapping_add(1);
        *state = RunState {
            run_id,
            config: Some(config),
            phase: RunPhase::Running,
            status: RunStatus::for_grid(config),
            ..RunState::default()
        };
        state.ticker = Some(spawn_ticker(
            Arc::downgrade(&self.shared),
            self.shared.interval,
            run_id,
        ));

        tracing::info!("Polling {} grid (run {})", config, run_id);
        self.shared.events.publish(PollEvent::Started(config));
    }

    /// Stop polling. Safe to call in any state, any number of times.
    ///
    /// A running poll returns to `Idle` and keeps its last status and
    /// snapshot; `Done` and `Failed` are left as they are.
    pub fn stop(&self) {
        let mut state = self.shared.state.lock();
        state.cancel_ticker();

        if state.phase.is_running() {
            state.run_id = state.run_id.wrapping_add(1);
            state.phase = RunPhase::Idle;
            state.in_flight = false;
            tracing::info!("Polling stopped at {}", state.status);
            self.shared.events.publish(PollEvent::Stopped);
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> RunPhase {
        self.shared.state.lock().phase.clone()
    }

    /// Whether ticks are being scheduled
    pub fn is_running(&self) -> bool {
        self.shared.state.lock().phase.is_running()
    }

    /// Progress of the current or last run
    pub fn status(&self) -> RunStatus {
        self.shared.state.lock().status
    }

    /// Grid being polled, if a run was ever started
    pub fn config(&self) -> Option<GridConfig> {
        self.shared.state.lock().config
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.shared.state.lock().store.snapshot()
    }

    /// Validation of the finished run; `None` while running or before any run
    pub fn validation(&self) -> Option<ValidationResult> {
        self.shared.state.lock().validation.clone()
    }

    /// Copy of the latest rendered canvas
    pub fn canvas(&self) -> Option<Canvas> {
        self.shared.state.lock().canvas.clone()
    }

    /// Run `f` against the latest rendered canvas without copying it
    ///
    /// `f` runs with the controller state locked. It must stay short and must
    /// not call back into this controller; use [`canvas`](Self::canvas) for
    /// slow work such as writing files.
    pub fn with_canvas<R>(&self, f: impl FnOnce(&Canvas) -> R) -> Option<R> {
        let state = self.shared.state.lock();
        state.canvas.as_ref().map(f)
    }

    /// Ticks skipped in the current run because a fetch was still in flight
    pub fn ticks_skipped(&self) -> u64 {
        self.shared.state.lock().ticks_skipped
    }

    /// Subscribe to poll events
    pub fn subscribe(&self) -> broadcast::Receiver<PollEvent> {
        self.shared.events.subscribe()
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        self.shared.state.lock().cancel_ticker();
    }
}

fn spawn_ticker(shared: Weak<Shared>, interval: Duration, run_id: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let Some(shared) = shared.upgrade() else {
                break;
            };
            if !shared.tick(run_id) {
                break;
            }
        }
    })
}

impl Shared {
    /// Returns false once the run is over and the ticker should exit
    fn tick(self: &Arc<Self>, run_id: u64) -> bool {
        let mut state = self.state.lock();
        if !state.is_current(run_id) {
            return false;
        }
        let Some(config) = state.config else {
            return false;
        };

        if state.in_flight {
            state.ticks_skipped += 1;
            tracing::debug!("Tick skipped, fetch still in flight (run {})", run_id);
            self.events.publish(PollEvent::TickSkipped);
            return true;
        }
        state.in_flight = true;
        drop(state);

        tracing::debug!("Tick: fetching {} grid (run {})", config, run_id);
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let result = shared.fetcher.fetch(config).await;
            shared.complete(run_id, config, result);
        });
        true
    }

    fn complete(&self, run_id: u64, config: GridConfig, result: Result<GridSnapshot, TransportError>) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if !state.is_current(run_id) {
            tracing::warn!("Discarding response for superseded run {}", run_id);
            return;
        }
        state.in_flight = false;

        let fetched = match result {
            Ok(fetched) => fetched,
            Err(err) => {
                tracing::error!("Polling {} failed: {}", config, err);
                state.cancel_ticker();
                state.phase = RunPhase::Failed(err.clone());
                self.events.publish(PollEvent::Failed(err));
                return;
            }
        };

        state
            .status
            .update(fetched.status.colored_count, fetched.status.done);
        let snapshot = state.store.reconcile(fetched.cells);

        let rendered = match state.canvas.take() {
            Some(mut canvas) => self
                .renderer
                .render_into(&mut canvas, &snapshot, config)
                .map(|()| canvas),
            None => self.renderer.render(&snapshot, config),
        };
        match rendered {
            Ok(canvas) => state.canvas = Some(canvas),
            Err(err) => tracing::warn!("Cannot render {} grid: {}", config, err),
        }

        tracing::debug!("Status {}", state.status);
        self.events.publish(PollEvent::StatusUpdated(state.status));
        self.events.publish(PollEvent::SnapshotReplaced {
            cells: snapshot.len(),
        });

        if state.status.done {
            let result = self.validator.validate(&snapshot, config);
            if result.is_valid {
                tracing::info!("Run finished: {}", result);
            } else {
                tracing::warn!("Run finished: {}", result);
            }
            state.cancel_ticker();
            state.phase = RunPhase::Done;
            state.validation = Some(result.clone());
            self.events.publish(PollEvent::Validated(result));
        }
    }
}
