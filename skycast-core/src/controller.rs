//! Orchestrates geocoding and weather lookups for one live location.
//!
//! The controller is the only writer of [`ResolutionState`]. Every search or
//! coordinate change starts a new cycle with a fresh generation number; a
//! result is committed only while its generation is still the newest, so a
//! slow answer for an old query can never replace the state of a newer one.
//!
//! Weather fetching is driven by coordinates, not by searches: whenever a new
//! coordinate pair is published the reactor task fetches weather for it and
//! aborts the fetch it was running for the previous pair.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    error::FailureReason,
    model::{Coordinates, TemperatureUnit, WeatherSnapshot},
    provider::{Geocoder, WeatherSource},
    view::Screen,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResolutionState {
    #[default]
    Idle,
    Loading,
    Ready(WeatherSnapshot),
    Failed(FailureReason),
}

impl ResolutionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Coordinates tagged with the cycle that produced them.
#[derive(Debug, Clone, Copy)]
struct Cycle {
    generation: u64,
    coordinates: Coordinates,
}

/// State shared with the reactor task.
#[derive(Debug)]
struct Shared {
    generation: AtomicU64,
    state: watch::Sender<ResolutionState>,
}

impl Shared {
    /// Start a new cycle and move to `Loading`.
    ///
    /// The generation bump happens inside the watch lock so it is ordered
    /// against [`Shared::commit`].
    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ResolutionState::Loading;
        });
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Write `next` if `generation` is still the newest cycle.
    fn commit(&self, generation: u64, next: ResolutionState) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        })
    }
}

pub struct ResolutionController {
    geocoder: Arc<dyn Geocoder>,
    shared: Arc<Shared>,
    coordinates: watch::Sender<Option<Cycle>>,
    unit: watch::Sender<TemperatureUnit>,
    reactor: JoinHandle<()>,
}

impl ResolutionController {
    /// Create a controller and spawn its weather reactor.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
        unit: TemperatureUnit,
    ) -> Self {
        let (state, _) = watch::channel(ResolutionState::Idle);
        let (coordinates, coordinates_rx) = watch::channel(None);
        let (unit, _) = watch::channel(unit);

        let shared = Arc::new(Shared {
            generation: AtomicU64::new(0),
            state,
        });

        let reactor = tokio::spawn(weather_reactor(shared.clone(), weather, coordinates_rx));

        Self {
            geocoder,
            shared,
            coordinates,
            unit,
            reactor,
        }
    }

    /// Resolve `query` and, on success, publish its coordinates for the
    /// weather reactor.
    ///
    /// Returns once geocoding has finished; the weather half of the cycle
    /// completes in the background (see [`settled`](Self::settled)). Blank
    /// queries are ignored.
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring empty query");
            return;
        }

        let generation = self.shared.begin();
        tracing::info!(generation, query, "search started");

        match self.geocoder.resolve(query).await {
            Ok(coordinates) => self.publish(Cycle {
                generation,
                coordinates,
            }),
            Err(e) => {
                tracing::warn!(generation, error = %e, "geocoding failed");
                if !self
                    .shared
                    .commit(generation, ResolutionState::Failed(e.reason()))
                {
                    tracing::debug!(generation, "discarding stale geocoding failure");
                }
            }
        }
    }

    /// Start a cycle from known coordinates, skipping geocoding.
    pub fn set_coordinates(&self, coordinates: Coordinates) {
        let generation = self.shared.begin();
        tracing::info!(generation, %coordinates, "coordinates set");
        self.publish(Cycle {
            generation,
            coordinates,
        });
    }

    fn publish(&self, cycle: Cycle) {
        // Checked and written under the coordinates lock, so an older cycle
        // cannot replace a newer pair that was published first.
        let published = self.coordinates.send_if_modified(|current| {
            if !self.shared.is_current(cycle.generation) {
                return false;
            }
            *current = Some(cycle);
            true
        });
        if !published {
            tracing::debug!(generation = cycle.generation, "discarding stale coordinates");
        }
    }

    pub fn state(&self) -> ResolutionState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResolutionState> {
        self.shared.state.subscribe()
    }

    /// Coordinates of the newest cycle that got past geocoding.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates.borrow().map(|cycle| cycle.coordinates)
    }

    /// Wait until the current cycle has left `Loading`.
    pub async fn settled(&self) -> ResolutionState {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // the sender lives in `self`, so this only happens during teardown
            Err(_) => self.state(),
        };
        settled
    }

    pub fn unit(&self) -> TemperatureUnit {
        *self.unit.borrow()
    }

    /// Display-only: never touches the network.
    pub fn set_unit(&self, unit: TemperatureUnit) {
        self.unit.send_replace(unit);
    }

    pub fn toggle_unit(&self) -> TemperatureUnit {
        let mut now = TemperatureUnit::default();
        self.unit.send_modify(|unit| {
            *unit = unit.toggled();
            now = *unit;
        });
        now
    }

    pub fn subscribe_unit(&self) -> watch::Receiver<TemperatureUnit> {
        self.unit.subscribe()
    }

    /// What the presentation layer should show right now.
    pub fn screen(&self) -> Screen {
        Screen::from_state(&self.shared.state.borrow(), self.unit())
    }
}

impl Drop for ResolutionController {
    fn drop(&mut self) {
        self.reactor.abort();
    }
}

/// Aborts the wrapped task when dropped, so a fetch never outlives the
/// reactor that spawned it.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// On every coordinate change, fetch weather for the new pair.
async fn weather_reactor(
    shared: Arc<Shared>,
    weather: Arc<dyn WeatherSource>,
    mut coordinates: watch::Receiver<Option<Cycle>>,
) {
    let mut in_flight: Option<AbortOnDrop> = None;

    while coordinates.changed().await.is_ok() {
        let Some(cycle) = *coordinates.borrow_and_update() else {
            continue;
        };

        // dropping the guard aborts the superseded fetch
        drop(in_flight.take());

        if !shared.is_current(cycle.generation) {
            tracing::debug!(generation = cycle.generation, "skipping superseded coordinates");
            continue;
        }

        let shared = shared.clone();
        let weather = weather.clone();
        in_flight = Some(AbortOnDrop(tokio::spawn(async move {
            let next = match weather.fetch(cycle.coordinates).await {
                Ok(snapshot) => {
                    tracing::info!(generation = cycle.generation, "weather ready");
                    ResolutionState::Ready(snapshot)
                }
                Err(e) => {
                    tracing::warn!(generation = cycle.generation, error = %e, "weather fetch failed");
                    ResolutionState::Failed(e.reason())
                }
            };
            if !shared.commit(cycle.generation, next) {
                tracing::debug!(generation = cycle.generation, "discarding stale weather result");
            }
        })));
    }
}
