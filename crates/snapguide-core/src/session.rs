//! Drag session lifecycle and the per-tick guide pipeline.
//!
//! A [`DragController`] owns one [`DragSession`]. Pointer-down starts a
//! drag and acquires the pointer listeners, every pointer-move runs
//! measure → select → compute edges → snap → commit, and pointer-up
//! clears the guides and releases the listeners.

use crate::config::SnapConfig;
use crate::edges::{EdgeSet, compute_edge_set};
use crate::error::{ConfigResult, TickError};
use crate::input::{InputState, MouseButton, PointerEvent};
use crate::reference::Reference;
use crate::scene::{Draggable, PointerCapture, Subscription, Surface};
use crate::snap::{SnapResult, snap_position};
use crate::surface::DragSurface;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Whether a drag gesture is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Cursor the host should show over the draggable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorIcon {
    Grab,
    Grabbing,
}

/// State held for the duration of one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub state: DragState,
    /// Pointer position minus element origin, captured on pointer-down.
    pub grab_offset: Vec2,
    /// Last committed canvas-local position.
    pub position: Point,
    /// Guides for the last committed tick.
    pub edges: Option<EdgeSet>,
    /// Snap flags for the last committed tick.
    pub last_snap: Option<SnapResult>,
}

impl DragSession {
    /// Create an idle session with the element at `position`.
    pub fn new(position: Point) -> Self {
        Self {
            state: DragState::Idle,
            grab_offset: Vec2::ZERO,
            position,
            edges: None,
            last_snap: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn cursor(&self) -> CursorIcon {
        match self.state {
            DragState::Idle => CursorIcon::Grab,
            DragState::Dragging => CursorIcon::Grabbing,
        }
    }

    /// Return to idle, dropping any guides. The position is kept.
    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.grab_offset = Vec2::ZERO;
        self.edges = None;
        self.last_snap = None;
    }
}

/// Output of one committed pointer-move tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Committed canvas-local position.
    pub position: Point,
    /// Guides to draw, `None` when there are no reference elements.
    pub edges: Option<EdgeSet>,
    pub snap: SnapResult,
}

/// Read-only observer notified after every commit and reset.
pub trait GuideObserver {
    fn on_commit(&mut self, session: &DragSession);
}

impl<F: FnMut(&DragSession)> GuideObserver for F {
    fn on_commit(&mut self, session: &DragSession) {
        self(session)
    }
}

/// Drives a single draggable element through drag gestures.
pub struct DragController {
    session: DragSession,
    config: SnapConfig,
    subscription: Option<Subscription>,
    observer: Option<Box<dyn GuideObserver>>,
}

impl DragController {
    /// Create an idle controller, rejecting an invalid configuration.
    pub fn new(config: SnapConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: SnapConfig) -> Self {
        Self {
            session: DragSession::new(config.initial_position),
            config,
            subscription: None,
            observer: None,
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Whether pointer listeners are currently registered.
    pub fn is_capturing(&self) -> bool {
        self.subscription.is_some()
    }

    /// Install the observer notified after each commit.
    pub fn set_observer(&mut self, observer: impl GuideObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Start a drag from a pointer-down at `pointer` (viewport coordinates).
    ///
    /// Returns `false` if the element or surface cannot be measured or the
    /// pointer is not over the element, in which case the controller stays
    /// idle. A second pointer-down during a
    /// drag re-captures the grab offset without registering new listeners.
    pub fn pointer_down(
        &mut self,
        pointer: Point,
        draggable: &dyn Draggable,
        surface: &dyn Surface,
        capture: &mut dyn PointerCapture,
    ) -> bool {
        let (frame, rect) = match measure(draggable, surface) {
            Ok(measured) => measured,
            Err(err) => {
                log::debug!("drag not started: {err}");
                return false;
            }
        };

        let local = frame.to_canvas(pointer);
        if !rect.contains(local) {
            log::debug!("drag not started: pointer {local:?} outside element {rect:?}");
            return false;
        }

        self.session.grab_offset = local - rect.origin();
        self.session.position = rect.origin();
        self.session.state = DragState::Dragging;

        if self.subscription.is_none() {
            self.subscription = Some(capture.capture());
        }

        log::debug!(
            "drag started at {:?}, grab offset {:?}",
            self.session.position,
            self.session.grab_offset
        );
        self.notify();
        true
    }

    /// Run one pointer-move tick and commit the result.
    ///
    /// Returns `None` when the tick was skipped; the element then keeps its
    /// last committed position.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        override_active: bool,
        draggable: &mut dyn Draggable,
        surface: &dyn Surface,
    ) -> Option<Tick> {
        let tick = match self.run_tick(pointer, override_active, &*draggable, surface) {
            Ok(tick) => tick,
            Err(TickError::NotDragging) => return None,
            Err(err) => {
                log::debug!("tick skipped: {err}");
                return None;
            }
        };

        log::trace!(
            "tick: position {:?}, reference {:?}, snapped h={} v={}",
            tick.position,
            tick.edges.map(|set| set.reference),
            tick.snap.snapped_horizontal,
            tick.snap.snapped_vertical
        );

        self.session.position = tick.position;
        self.session.edges = tick.edges;
        self.session.last_snap = Some(tick.snap);
        draggable.apply_position(tick.position);
        self.notify();

        Some(tick)
    }

    /// End the drag, clearing guides and releasing the pointer listeners.
    pub fn pointer_up(&mut self) {
        if self.session.is_dragging() {
            log::debug!("drag ended at {:?}", self.session.position);
        }
        self.end();
    }

    /// Abort any drag because the owning view is going away.
    pub fn cancel(&mut self) {
        if self.session.is_dragging() {
            log::debug!("drag cancelled at {:?}", self.session.position);
        }
        self.end();
    }

    /// Route a pointer event. Only the left button starts or ends a drag.
    pub fn handle_pointer_event(
        &mut self,
        event: PointerEvent,
        input: &InputState,
        draggable: &mut dyn Draggable,
        surface: &dyn Surface,
        capture: &mut dyn PointerCapture,
    ) -> Option<Tick> {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                self.pointer_down(position, &*draggable, surface, capture);
                None
            }
            PointerEvent::Move { position } => {
                let override_active = input.snap_override(self.config.override_modifier);
                self.pointer_move(position, override_active, draggable, surface)
            }
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => {
                self.pointer_up();
                None
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => None,
        }
    }

    fn run_tick(
        &self,
        pointer: Point,
        override_active: bool,
        draggable: &dyn Draggable,
        surface: &dyn Surface,
    ) -> Result<Tick, TickError> {
        if !self.session.is_dragging() {
            return Err(TickError::NotDragging);
        }

        let (frame, measured) = measure(draggable, surface)?;
        let proposed = frame.to_canvas(pointer) - self.session.grab_offset;
        let dragged = Rect::from_origin_size(proposed, measured.size());

        let references: Vec<Reference> = surface
            .references()
            .into_iter()
            .filter_map(|r| {
                frame
                    .to_canvas_rect(r.rect)
                    .map(|rect| Reference::with_id(r.id, rect))
            })
            .collect();

        let edges = compute_edge_set(dragged, &references);
        let snap = match &edges {
            Some(set) => snap_position(proposed, &set.edges, self.config.threshold, override_active),
            None => SnapResult::none(proposed),
        };

        Ok(Tick {
            position: snap.point,
            edges,
            snap,
        })
    }

    fn end(&mut self) {
        let was_dragging = self.session.is_dragging();
        self.session.reset();
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
        if was_dragging {
            self.notify();
        }
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_commit(&self.session);
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::with_config(SnapConfig::default())
    }
}

impl std::fmt::Debug for DragController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("session", &self.session)
            .field("config", &self.config)
            .field("subscription", &self.subscription)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Measure the surface frame and the dragged element's canvas-local rect.
fn measure(
    draggable: &dyn Draggable,
    surface: &dyn Surface,
) -> Result<(DragSurface, Rect), TickError> {
    let frame = surface
        .measure()
        .and_then(DragSurface::from_viewport)
        .ok_or(TickError::SurfaceUnavailable)?;
    let rect = draggable
        .measure()
        .and_then(|r| frame.to_canvas_rect(r))
        .ok_or(TickError::DraggedUnavailable)?;
    if rect.is_zero_area() {
        return Err(TickError::DegenerateDragged);
    }
    Ok((frame, rect))
}
