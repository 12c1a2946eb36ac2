//! Client-side viewer model.
//!
//! The browser runs the viewer, but its transition rules live here as an
//! explicit state machine: the constants below are injected into
//! `templates/viewer.html`, and the in-page script follows the same
//! rules, so model and script cannot drift.

use std::time::{Duration, Instant};

use serde::Serialize;

pub const DEFAULT_ZOOM: f32 = 1.2;
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_IN_FACTOR: f32 = 1.25;
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

/// Accumulated wheel delta that triggers a page turn.
pub const SCROLL_THRESHOLD: f64 = 100.0;
/// Lockout after a wheel-triggered page turn, against double fires.
pub const NAV_COOLDOWN: Duration = Duration::from_millis(300);
/// Idle period after which the wheel accumulator resets.
pub const SCROLL_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Pages render at this multiple of the display scale for crispness.
pub const RENDER_OVERSAMPLE: f32 = 2.0;

/// Constants handed to the viewer template.
#[derive(Debug, Serialize)]
pub struct ViewerScriptConfig {
    pub initial_zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub scroll_threshold: f64,
    pub nav_cooldown_ms: u64,
    pub scroll_quiet_ms: u64,
    pub render_oversample: f32,
}

pub fn script_config() -> ViewerScriptConfig {
    ViewerScriptConfig {
        initial_zoom: DEFAULT_ZOOM,
        min_zoom: MIN_ZOOM,
        max_zoom: MAX_ZOOM,
        zoom_in_factor: ZOOM_IN_FACTOR,
        zoom_out_factor: ZOOM_OUT_FACTOR,
        scroll_threshold: SCROLL_THRESHOLD,
        nav_cooldown_ms: NAV_COOLDOWN.as_millis() as u64,
        scroll_quiet_ms: SCROLL_QUIET_PERIOD.as_millis() as u64,
        render_oversample: RENDER_OVERSAMPLE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
    Closed,
}

/// Per-open-document viewer state.
///
/// Renders are single-flight: a request arriving while one is in flight
/// is dropped, but the latest intent is remembered so [`Self::finish_render`]
/// can report the page to re-request when the display lags.
#[derive(Debug)]
pub struct ViewerSession {
    phase: Phase,
    current_page: u32,
    desired_page: u32,
    inflight_page: u32,
    total_pages: u32,
    zoom: f32,
    rendering: bool,
    pan: (f32, f32),
}

impl ViewerSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            current_page: 1,
            desired_page: 1,
            inflight_page: 1,
            total_pages: 0,
            zoom: DEFAULT_ZOOM,
            rendering: false,
            pan: (0.0, 0.0),
        }
    }

    /// Document metadata arrived; returns the first page to render.
    pub fn open(&mut self, total_pages: u32) -> Option<u32> {
        if self.phase != Phase::Loading || total_pages == 0 {
            return None;
        }
        self.phase = Phase::Ready;
        self.total_pages = total_pages;
        self.request_render(1).then_some(1)
    }

    /// The document failed to load; terminal.
    pub fn fail(&mut self) {
        if self.phase == Phase::Loading {
            self.phase = Phase::Failed;
        }
    }

    pub fn close(&mut self) {
        self.phase = Phase::Closed;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> (f32, f32) {
        self.pan
    }

    /// Fraction of the document reached, for the progress indicator.
    pub fn progress(&self) -> f32 {
        if self.total_pages == 0 {
            0.0
        } else {
            self.current_page as f32 / self.total_pages as f32
        }
    }

    /// Ask for a page render. Returns `false` when the request is
    /// dropped (out of range, not ready, or a render is in flight).
    pub fn request_render(&mut self, page: u32) -> bool {
        if self.phase != Phase::Ready || page < 1 || page > self.total_pages {
            return false;
        }
        self.desired_page = page;
        if self.rendering {
            return false;
        }
        self.rendering = true;
        self.inflight_page = page;
        true
    }

    /// A render completed. Returns the page to immediately re-request
    /// when navigation outran the in-flight render.
    pub fn finish_render(&mut self) -> Option<u32> {
        if !self.rendering {
            return None;
        }
        self.rendering = false;
        self.current_page = self.inflight_page;
        (self.desired_page != self.current_page).then_some(self.desired_page)
    }

    /// Advance one page; no-op on the last page.
    pub fn next(&mut self) -> bool {
        if self.phase != Phase::Ready || self.current_page >= self.total_pages {
            return false;
        }
        self.request_render(self.current_page + 1)
    }

    /// Go back one page; no-op on the first page.
    pub fn previous(&mut self) -> bool {
        if self.phase != Phase::Ready || self.current_page <= 1 {
            return false;
        }
        self.request_render(self.current_page - 1)
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom * ZOOM_IN_FACTOR)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom * ZOOM_OUT_FACTOR)
    }

    pub fn reset_zoom(&mut self) -> f32 {
        self.set_zoom(DEFAULT_ZOOM)
    }

    fn set_zoom(&mut self, scale: f32) -> f32 {
        self.zoom = scale.clamp(MIN_ZOOM, MAX_ZOOM);
        // Zoom changes redraw the current page at the new scale.
        self.request_render(self.current_page);
        self.zoom
    }

    /// Drag-to-pan is only offered once zoomed past the initial scale.
    pub fn pan_enabled(&self) -> bool {
        self.zoom > DEFAULT_ZOOM
    }

    /// Apply a pointer drag as a scroll offset, clamped to the origin.
    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        if !self.pan_enabled() {
            return;
        }
        self.pan = (
            (self.pan.0 - dx).max(0.0),
            (self.pan.1 - dy).max(0.0),
        );
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    NextPage,
    PreviousPage,
}

/// Wheel-delta accumulator for scroll-to-navigate.
#[derive(Debug, Default)]
pub struct ScrollNavigator {
    accumulator: f64,
    locked_until: Option<Instant>,
    last_event: Option<Instant>,
}

impl ScrollNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one wheel event; returns a navigation intent when the
    /// accumulated delta crosses the threshold outside the cooldown.
    pub fn wheel(&mut self, delta_y: f64, now: Instant) -> Option<NavIntent> {
        if let Some(last) = self.last_event
            && now.duration_since(last) >= SCROLL_QUIET_PERIOD
        {
            self.accumulator = 0.0;
        }
        self.last_event = Some(now);
        self.accumulator += delta_y;

        if let Some(until) = self.locked_until {
            if now < until {
                return None;
            }
            self.locked_until = None;
        }

        if self.accumulator.abs() > SCROLL_THRESHOLD {
            let intent = if self.accumulator > 0.0 {
                NavIntent::NextPage
            } else {
                NavIntent::PreviousPage
            };
            self.accumulator = 0.0;
            self.locked_until = Some(now + NAV_COOLDOWN);
            return Some(intent);
        }
        None
    }
}
