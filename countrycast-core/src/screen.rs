use std::time::Duration;

use tracing::{debug, warn};

use crate::{model::WeatherSnapshot, provider::FetchError};

/// Delay between a successful fetch and the panel becoming visible. Drives
/// the entrance transition in whatever frontend consumes [`View`].
pub const REVEAL_DELAY: Duration = Duration::from_millis(100);

/// View-model for the single weather screen.
///
/// Owns the selection, the last snapshot and the loading/visible flags.
/// Every fetch cycle is tagged with a generation; results and reveals that
/// arrive for a superseded generation are discarded, so an old response can
/// never overwrite state belonging to a newer selection.
#[derive(Debug)]
pub struct WeatherScreen {
    selection: String,
    snapshot: Option<WeatherSnapshot>,
    loading: bool,
    visible: bool,
    generation: u64,
}

/// One fetch cycle: the query to send and the generation identifying it.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub query: String,
    generation: u64,
}

/// Token for the delayed visibility transition of a successful cycle.
///
/// The holder is expected to wait `delay`, then hand the ticket back via
/// [`WeatherScreen::reveal`].
#[derive(Debug, Clone, Copy)]
pub struct RevealTicket {
    pub delay: Duration,
    generation: u64,
}

/// Outcome of committing a provider result back into the screen.
#[derive(Debug)]
pub enum Resolution {
    /// Snapshot replaced; schedule the reveal after [`RevealTicket::delay`].
    Loaded(RevealTicket),
    /// Fetch failed; the previous snapshot, if any, is kept.
    Failed,
    /// The cycle was superseded by a newer one; the result was discarded.
    Superseded,
}

/// What the presentation layer should draw.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    /// No snapshot exists yet: show the loading indicator only.
    Loading,
    /// Country picker plus weather panel; `visible` drives the entrance
    /// effect.
    Screen {
        selection: &'a str,
        snapshot: &'a WeatherSnapshot,
        visible: bool,
    },
}

impl WeatherScreen {
    pub fn new(default_selection: impl Into<String>) -> Self {
        Self {
            selection: default_selection.into(),
            snapshot: None,
            loading: false,
            visible: false,
            generation: 0,
        }
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    /// Begin a new fetch cycle for the current selection.
    ///
    /// Supersedes any cycle still in flight: its result will be discarded
    /// when it comes back.
    pub fn request_fetch(&mut self) -> FetchRequest {
        self.generation += 1;
        self.loading = true;
        self.visible = false;

        FetchRequest { query: self.selection.clone(), generation: self.generation }
    }

    /// Change the selection and begin a fetch cycle for it.
    ///
    /// Empty input is ignored. Anything else goes through as-is; unknown
    /// region names are the provider's problem.
    pub fn set_selection(&mut self, value: &str) -> Option<FetchRequest> {
        if value.is_empty() {
            return None;
        }

        self.selection = value.to_string();
        Some(self.request_fetch())
    }

    /// Commit the provider result for `request` back into the screen.
    pub fn resolve(
        &mut self,
        request: &FetchRequest,
        result: Result<WeatherSnapshot, FetchError>,
    ) -> Resolution {
        if request.generation != self.generation {
            debug!(query = %request.query, "discarding result of superseded fetch");
            return Resolution::Superseded;
        }

        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.loading = false;
                Resolution::Loaded(RevealTicket {
                    delay: REVEAL_DELAY,
                    generation: self.generation,
                })
            }
            Err(err) => {
                warn!(query = %request.query, error = %err, "weather fetch failed");
                self.loading = false;
                Resolution::Failed
            }
        }
    }

    /// Complete the delayed visibility transition, if `ticket` still belongs
    /// to the current cycle. Returns whether the panel became visible.
    pub fn reveal(&mut self, ticket: RevealTicket) -> bool {
        if ticket.generation != self.generation {
            debug!("discarding reveal of superseded fetch");
            return false;
        }

        self.visible = true;
        true
    }

    pub fn view(&self) -> View<'_> {
        match &self.snapshot {
            None => View::Loading,
            Some(snapshot) => View::Screen {
                selection: &self.selection,
                snapshot,
                visible: self.visible,
            },
        }
    }
}
