//! Measurement capabilities supplied by the host UI layer.
//!
//! The drag controller never talks to a rendering technology directly. It
//! asks a [`Draggable`] for its current rect and tells it where to go, asks
//! a [`Surface`] for its own rect and the reference elements on it, and
//! acquires pointer listeners through [`PointerCapture`].

use crate::reference::Reference;
use kurbo::{Point, Rect, Size};
use std::fmt;

/// The element being dragged.
pub trait Draggable {
    /// Current rect in viewport coordinates, or `None` if not mounted.
    fn measure(&self) -> Option<Rect>;

    /// Move the element to a canvas-local position.
    fn apply_position(&mut self, position: Point);
}

/// The drag surface and the reference elements placed on it.
pub trait Surface {
    /// The surface's rect in viewport coordinates, or `None` if not mounted.
    fn measure(&self) -> Option<Rect>;

    /// Viewport rects of every element carrying the reference marker, in a
    /// stable order. Elements that cannot be measured are left out.
    fn references(&self) -> Vec<Reference>;
}

/// Acquisition of the global pointer listeners used during a drag.
pub trait PointerCapture {
    /// Register move/up listeners. They stay registered until the returned
    /// subscription is released or dropped.
    fn capture(&mut self) -> Subscription;
}

/// A scoped pointer-listener registration.
///
/// The release callback runs exactly once, either through [`release`](Self::release)
/// or when the subscription is dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `release` when it ends.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Unregister the listeners now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// In-memory draggable element for headless hosts and tests.
///
/// Its viewport rect is derived from the canvas-local position it was last
/// given, offset by the surface origin.
#[derive(Debug, Clone)]
pub struct MemoryDraggable {
    /// Viewport position of the surface's top-left corner.
    pub surface_origin: Point,
    /// Canvas-local position.
    pub position: Point,
    pub size: Size,
    /// Cleared to simulate an unmounted element.
    pub mounted: bool,
}

impl MemoryDraggable {
    /// Create a mounted element.
    pub fn new(surface_origin: Point, position: Point, size: Size) -> Self {
        Self {
            surface_origin,
            position,
            size,
            mounted: true,
        }
    }
}

impl Draggable for MemoryDraggable {
    fn measure(&self) -> Option<Rect> {
        if !self.mounted {
            return None;
        }
        let origin = self.position + self.surface_origin.to_vec2();
        Some(Rect::from_origin_size(origin, self.size))
    }

    fn apply_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// In-memory surface for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    /// Surface rect in viewport coordinates. `None` simulates an unmounted surface.
    pub rect: Option<Rect>,
    /// Reference elements in viewport coordinates.
    pub references: Vec<Reference>,
}

impl MemorySurface {
    /// Create a mounted surface with no references.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect: Some(rect),
            references: Vec::new(),
        }
    }

    /// Place a reference element at a canvas-local rect.
    pub fn add_reference(&mut self, canvas_rect: Rect) -> Reference {
        let offset = self.rect.map(|r| r.origin().to_vec2()).unwrap_or_default();
        let reference = Reference::new(canvas_rect + offset);
        self.references.push(reference);
        reference
    }
}

impl Surface for MemorySurface {
    fn measure(&self) -> Option<Rect> {
        self.rect
    }

    fn references(&self) -> Vec<Reference> {
        self.references.clone()
    }
}

/// Pointer capture that counts live subscriptions.
#[derive(Debug, Clone, Default)]
pub struct CountingCapture {
    active: std::rc::Rc<std::cell::Cell<usize>>,
}

impl CountingCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscriptions currently registered.
    pub fn active(&self) -> usize {
        self.active.get()
    }
}

impl PointerCapture for CountingCapture {
    fn capture(&mut self) -> Subscription {
        let active = self.active.clone();
        active.set(active.get() + 1);
        Subscription::new(move || active.set(active.get().saturating_sub(1)))
    }
}
