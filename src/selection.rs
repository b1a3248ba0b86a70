//! Route selection state.
//!
//! Holds the fetched route set together with two indices: the highlighted
//! route (a preview, e.g. a tapped list entry) and the selected route (the
//! confirmed choice). All mutation goes through the transition methods on
//! [`RouteSelection`]; the rendering layer only reads.
//!
//! Fetches are tracked by generation. [`RouteSelection::begin_fetch`] hands
//! out a [`FetchTicket`], and a response is applied only if its ticket is
//! still the latest one, so a slow response can never overwrite a newer set
//! or resurrect routes the user cleared.
//!
//! Time is passed in explicitly (`now`) so the select pulse is deterministic.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{DirectionsError, SelectionError};
use crate::route::{RouteOption, route_label};
use crate::traits::{DirectionsProvider, DirectionsRequest};
use crate::viewport::{Bounds, EdgePadding, MapFit};

/// How long the endpoint markers pulse after a route is selected.
pub const DEFAULT_PULSE: Duration = Duration::from_millis(420);

/// What happens right after a fetch returns routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Select (and highlight) the first route immediately.
    #[default]
    EagerSelect,
    /// Leave everything unselected until the user picks a route.
    ExplicitSelect,
}

impl SelectionMode {
    /// Parses `eager` or `explicit` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "eager" => Some(SelectionMode::EagerSelect),
            "explicit" => Some(SelectionMode::ExplicitSelect),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionOptions {
    pub mode: SelectionMode,
    pub pulse: Duration,
    pub padding: EdgePadding,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            pulse: DEFAULT_PULSE,
            padding: EdgePadding::default(),
        }
    }
}

/// Coarse state, derived from the indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// No routes.
    Idle,
    /// Routes present, nothing highlighted or selected.
    Loaded,
    Highlighted(usize),
    Selected(usize),
}

/// Proof that a fetch was started; see [`RouteSelection::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { count: usize },
    /// The fetch succeeded with no routes; state stays idle.
    Empty,
    /// A newer fetch or a clear superseded this one. Nothing changed.
    Stale,
}

/// Route set plus highlight/selection indices.
#[derive(Debug, Clone, Default)]
pub struct RouteSelection {
    routes: Vec<RouteOption>,
    highlighted: Option<usize>,
    selected: Option<usize>,
    generation: u64,
    fetching: bool,
    pulse_until: Option<Instant>,
    options: SelectionOptions,
}

impl RouteSelection {
    pub fn new(options: SelectionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Starts a fetch: drops the current set and resets both indices.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.reset();
        self.fetching = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Installs the routes from a finished fetch, if `ticket` is still current.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        routes: Vec<RouteOption>,
        now: Instant,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale route fetch"
            );
            return FetchOutcome::Stale;
        }

        self.fetching = false;
        self.reset();
        if routes.is_empty() {
            return FetchOutcome::Empty;
        }

        let count = routes.len();
        self.routes = routes;
        if self.options.mode == SelectionMode::EagerSelect {
            self.selected = Some(0);
            self.highlighted = Some(0);
            self.start_pulse(now);
        }

        debug!(count, mode = ?self.options.mode, "route set loaded");
        FetchOutcome::Applied { count }
    }

    /// Records a failed fetch. Returns false if the ticket was stale.
    pub fn fail_fetch(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.fetching = false;
        self.reset();
        true
    }

    /// Runs a whole fetch against `provider` synchronously.
    pub fn fetch_with<P: DirectionsProvider>(
        &mut self,
        provider: &P,
        request: &DirectionsRequest,
        now: Instant,
    ) -> Result<FetchOutcome, DirectionsError> {
        let ticket = self.begin_fetch();
        match provider.route_alternatives(request) {
            Ok(routes) => Ok(self.complete_fetch(ticket, routes, now)),
            Err(err) => {
                self.fail_fetch(ticket);
                Err(err)
            }
        }
    }

    /// Previews route `index` without changing the selection.
    pub fn highlight(&mut self, index: usize) -> Result<(), SelectionError> {
        self.check_index(index)?;
        self.highlighted = Some(index);
        Ok(())
    }

    /// Confirms route `index`; it also becomes the highlighted route.
    ///
    /// The pulse only starts when the selection actually changes.
    pub fn select(&mut self, index: usize, now: Instant) -> Result<(), SelectionError> {
        self.check_index(index)?;
        if self.selected != Some(index) {
            self.start_pulse(now);
        }
        self.selected = Some(index);
        self.highlighted = Some(index);
        Ok(())
    }

    /// Moves the highlight back onto the selected route, if there is one.
    pub fn focus_selected(&mut self) -> Option<usize> {
        let selected = self.selected?;
        self.highlighted = Some(selected);
        Some(selected)
    }

    /// Drops the route set. Any fetch still in flight becomes stale.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.fetching = false;
        self.reset();
    }

    /// Cancels timers; call when the owning view goes away.
    pub fn teardown(&mut self) {
        self.pulse_until = None;
    }

    /// Expires the pulse. Returns true if it ended on this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pulse_until {
            Some(until) if now >= until => {
                self.pulse_until = None;
                true
            }
            _ => false,
        }
    }

    /// True from `begin_fetch` until that fetch completes, fails or is cleared.
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.pulse_until.is_some_and(|until| now < until)
    }

    pub fn routes(&self) -> &[RouteOption] {
        &self.routes
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Index the map fits to: the selection wins over the highlight.
    pub fn active_index(&self) -> Option<usize> {
        self.selected.or(self.highlighted)
    }

    pub fn phase(&self) -> SelectionPhase {
        match (self.selected, self.highlighted) {
            (Some(i), _) => SelectionPhase::Selected(i),
            (None, Some(i)) => SelectionPhase::Highlighted(i),
            (None, None) if !self.routes.is_empty() => SelectionPhase::Loaded,
            (None, None) => SelectionPhase::Idle,
        }
    }

    pub fn route_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_route(&self) -> Option<&RouteOption> {
        self.routes.get(self.selected?)
    }

    pub fn active_route(&self) -> Option<&RouteOption> {
        self.routes.get(self.active_index()?)
    }

    /// Start and end of the selected route, for the endpoint markers.
    pub fn selected_endpoints(&self) -> Option<((f64, f64), (f64, f64))> {
        self.selected_route().map(|route| (route.start(), route.end()))
    }

    /// Anchor point and text for the selected route's duration badge.
    ///
    /// `None` when nothing is selected or the service gave no duration.
    pub fn duration_badge(&self) -> Option<((f64, f64), &str)> {
        let route = self.selected_route()?;
        if route.duration_text().is_empty() {
            return None;
        }
        Some((route.polyline().midpoint()?, route.duration_text()))
    }

    pub fn label(&self, index: usize) -> Option<String> {
        (index < self.routes.len()).then(|| route_label(index))
    }

    /// Camera target for the active route. `None` means leave the map alone.
    pub fn map_fit(&self) -> Option<MapFit> {
        let route = self.active_route()?;
        Some(MapFit {
            bounds: Bounds::from_points(route.coordinates())?,
            padding: self.options.padding,
        })
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    fn reset(&mut self) {
        self.routes.clear();
        self.highlighted = None;
        self.selected = None;
        self.pulse_until = None;
    }

    fn start_pulse(&mut self, now: Instant) {
        self.pulse_until = Some(now + self.options.pulse);
    }

    fn check_index(&self, index: usize) -> Result<(), SelectionError> {
        if index < self.routes.len() {
            Ok(())
        } else {
            Err(SelectionError::OutOfRange {
                index,
                len: self.routes.len(),
            })
        }
    }
}
