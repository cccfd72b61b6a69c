// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Client-space input handling: wheel, pinch, and pointer drag gestures.
//!
//! The host caches the drawing surface's client rectangle with
//! [`InteractionManager::set_surface_rect`] and forwards raw client
//! coordinates. The manager converts them to view space, drives the camera,
//! and moves the selected shape, publishing [`StageEvent`]s as it goes.
//!
//! A pointer gesture runs `pointer_down → pointer_move* → pointer_up`, or is
//! abandoned with [`InteractionManager::cancel_gesture`].

use drawboard_geom::{ViewPoint, ViewVector, WorldPoint, WorldVector};
use drawboard_shape::ShapeId;
use tracing::{debug, trace};

use crate::events::{EventBus, StageEvent};
use crate::stage::Stage;

bitflags::bitflags! {
    /// Keyboard modifiers held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1;
        /// Control.
        const CTRL = 2;
        /// Alt / Option.
        const ALT = 4;
        /// Meta / Command.
        const META = 8;
    }
}

/// Client-space rectangle of the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    /// Left edge in client coordinates.
    pub left: f64,
    /// Top edge in client coordinates.
    pub top: f64,
    /// Width in client units.
    pub width: f64,
    /// Height in client units.
    pub height: f64,
}

/// A wheel or trackpad scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelInput {
    /// Pointer x in client coordinates.
    pub client_x: f64,
    /// Pointer y in client coordinates.
    pub client_y: f64,
    /// Horizontal scroll delta.
    pub delta_x: f64,
    /// Vertical scroll delta.
    pub delta_y: f64,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

/// Tunables for [`InteractionManager`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionConfig {
    /// Zoom rate per unit of vertical wheel delta.
    pub zoom_sensitivity: f64,
    /// Wheel pan deltas are divided by this before being applied.
    pub pan_divisor: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            zoom_sensitivity: 0.005,
            pan_divisor: 3.0,
        }
    }
}

/// Pointer positions of an active drag, in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct DragState {
    id: Option<ShapeId>,
    last: Option<WorldPoint>,
}

impl DragState {
    fn start(&mut self, id: ShapeId, at: WorldPoint) {
        self.id = Some(id);
        self.last = Some(at);
    }

    /// Delta since the previous position, recording `at` as the new one.
    fn update(&mut self, at: WorldPoint) -> Option<(ShapeId, WorldVector)> {
        let id = self.id?;
        let last = self.last.replace(at)?;
        Some((id, at - last))
    }

    fn end(&mut self) {
        self.id = None;
        self.last = None;
    }

    fn is_dragging(&self) -> bool {
        self.id.is_some()
    }
}

/// Turns client-space input into camera moves, selection, and drags.
#[derive(Debug, Default)]
pub struct InteractionManager {
    config: InteractionConfig,
    surface: SurfaceRect,
    selected: Option<ShapeId>,
    drag: DragState,
    pinch_scale: Option<f64>,
    events: EventBus,
}

impl InteractionManager {
    /// A manager with no selection and a surface at the client origin.
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current tunables.
    #[must_use]
    pub fn config(&self) -> InteractionConfig {
        self.config
    }

    /// Caches the surface's client rectangle. Call again after layout changes.
    pub fn set_surface_rect(&mut self, rect: SurfaceRect) {
        self.surface = rect;
    }

    /// The cached surface rectangle.
    #[must_use]
    pub fn surface_rect(&self) -> SurfaceRect {
        self.surface
    }

    /// Converts client coordinates to view coordinates.
    #[must_use]
    pub fn view_coordinate_from_client(&self, client_x: f64, client_y: f64) -> ViewPoint {
        ViewPoint::new(client_x - self.surface.left, client_y - self.surface.top)
    }

    /// Zooms about the pointer when `CTRL` or `META` is held, pans otherwise.
    pub fn handle_wheel(&mut self, stage: &mut Stage, input: WheelInput) {
        let camera = stage.camera_mut();
        if input.modifiers.intersects(Modifiers::CTRL | Modifiers::META) {
            let rate = 1.0 - input.delta_y * self.config.zoom_sensitivity;
            let anchor = self.view_coordinate_from_client(input.client_x, input.client_y);
            trace!(rate, ?anchor, "wheel zoom");
            camera.zoom(rate, anchor);
        } else {
            let divisor = self.config.pan_divisor;
            let view = ViewVector::new(input.delta_x / divisor, input.delta_y / divisor);
            let world = camera.to_world_vector(view);
            trace!(?world, "wheel pan");
            camera.translate(world.x, world.y);
        }
    }

    /// Records the pinch scale at the start of a pinch.
    pub fn pinch_start(&mut self, scale: f64) {
        self.pinch_scale = Some(scale);
    }

    /// Zooms by the change in pinch scale since the last call, about the
    /// pinch centre. Ignored outside a pinch.
    pub fn pinch_move(&mut self, stage: &mut Stage, scale: f64, client_x: f64, client_y: f64) {
        let Some(last) = self.pinch_scale else {
            return;
        };
        if !(scale.is_finite() && scale > 0.0) {
            return;
        }
        let anchor = self.view_coordinate_from_client(client_x, client_y);
        stage.camera_mut().zoom(scale / last, anchor);
        self.pinch_scale = Some(scale);
    }

    /// Ends the pinch.
    pub fn pinch_end(&mut self) {
        self.pinch_scale = None;
    }

    /// Starts a pointer gesture.
    ///
    /// On a hit the shape becomes the selection and a drag begins; on a miss
    /// the selection is cleared. Returns the shape hit.
    pub fn pointer_down(
        &mut self,
        stage: &mut Stage,
        client_x: f64,
        client_y: f64,
    ) -> Option<ShapeId> {
        let view = self.view_coordinate_from_client(client_x, client_y);
        self.drag.end();
        match stage.hit(view) {
            Some(id) => {
                self.select(Some(id));
                self.drag.start(id, stage.camera().to_world_point(view));
                debug!(%id, "drag started");
                Some(id)
            }
            None => {
                self.select(None);
                None
            }
        }
    }

    /// Moves the dragged shape with the pointer. Returns `true` if a shape
    /// moved.
    ///
    /// If the dragged shape was removed from the stage, the gesture ends and
    /// the selection is cleared.
    pub fn pointer_move(&mut self, stage: &mut Stage, client_x: f64, client_y: f64) -> bool {
        if !self.drag.is_dragging() {
            return false;
        }
        let view = self.view_coordinate_from_client(client_x, client_y);
        let world = stage.camera().to_world_point(view);
        let Some((id, delta)) = self.drag.update(world) else {
            return false;
        };
        if stage.translate_shape(&id, delta.x, delta.y).is_err() {
            debug!(%id, "dragged shape vanished");
            self.drag.end();
            self.select(None);
            return false;
        }
        if let Some(shape) = stage.get_shape(&id) {
            self.events.emit(&StageEvent::Move(id, shape.translation()));
        }
        true
    }

    /// Applies the final pointer position and ends the gesture.
    pub fn pointer_up(&mut self, stage: &mut Stage, client_x: f64, client_y: f64) {
        if self.drag.is_dragging() {
            self.pointer_move(stage, client_x, client_y);
        }
        self.drag.end();
    }

    /// Abandons the gesture without touching the stage again.
    pub fn cancel_gesture(&mut self) {
        self.drag.end();
        self.pinch_scale = None;
    }

    /// Clears the selection if it is `id`, ending any drag of it.
    pub fn forget(&mut self, id: &ShapeId) {
        if self.selected == Some(*id) {
            self.drag.end();
            self.select(None);
        }
    }

    /// The selected shape.
    #[must_use]
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Returns `true` while a pinch is in progress.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch_scale.is_some()
    }

    /// The event channel.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    fn select(&mut self, id: Option<ShapeId>) {
        if self.selected == id {
            return;
        }
        self.selected = id;
        let event = match id {
            Some(id) => StageEvent::Select(id),
            None => StageEvent::Unselect,
        };
        self.events.emit(&event);
    }
}
