// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use drawboard_geom::{Obb, View};
use drawboard_shape::{Shape, ShapeId};

use crate::error::StageError;
use crate::events::{StageEvent, SubscriptionId};
use crate::interaction::{InteractionConfig, InteractionManager, SurfaceRect, WheelInput};
use crate::stage::{Stage, StageOptions};

/// A stage paired with the input handling that drives it.
///
/// This is the object a host embeds: it forwards client-space input here and
/// reads shapes and the camera back through [`Board::stage`].
#[derive(Debug, Default)]
pub struct Board {
    stage: Stage,
    interaction: InteractionManager,
}

impl Board {
    /// A board with an empty stage.
    #[must_use]
    pub fn new(options: StageOptions, config: InteractionConfig) -> Self {
        Self {
            stage: Stage::new(options),
            interaction: InteractionManager::new(config),
        }
    }

    /// The stage.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The stage, mutably.
    ///
    /// Prefer [`Board::remove_shape`] over removing through the stage, so the
    /// selection is cleared along with the shape.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// The input handler.
    #[must_use]
    pub fn interaction(&self) -> &InteractionManager {
        &self.interaction
    }

    /// The input handler, mutably.
    pub fn interaction_mut(&mut self) -> &mut InteractionManager {
        &mut self.interaction
    }

    /// Subscribes to selection and movement events.
    pub fn subscribe(&mut self, handler: impl FnMut(&StageEvent) + 'static) -> SubscriptionId {
        self.interaction.events_mut().subscribe(handler)
    }

    /// Drops a subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.interaction.events_mut().unsubscribe(id)
    }

    /// See [`InteractionManager::set_surface_rect`].
    pub fn set_surface_rect(&mut self, rect: SurfaceRect) {
        self.interaction.set_surface_rect(rect);
    }

    /// Adds a shape on top of the stack.
    pub fn add_shape(&mut self, shape: impl Shape + 'static) -> ShapeId {
        self.stage.add_shape(shape)
    }

    /// Removes a shape, clearing the selection if it was selected.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Result<Box<dyn Shape>, StageError> {
        let shape = self.stage.remove_shape(id)?;
        self.interaction.forget(id);
        Ok(shape)
    }

    /// See [`InteractionManager::pointer_down`].
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) -> Option<ShapeId> {
        self.interaction
            .pointer_down(&mut self.stage, client_x, client_y)
    }

    /// See [`InteractionManager::pointer_move`].
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> bool {
        self.interaction
            .pointer_move(&mut self.stage, client_x, client_y)
    }

    /// See [`InteractionManager::pointer_up`].
    pub fn pointer_up(&mut self, client_x: f64, client_y: f64) {
        self.interaction
            .pointer_up(&mut self.stage, client_x, client_y);
    }

    /// See [`InteractionManager::cancel_gesture`].
    pub fn cancel_gesture(&mut self) {
        self.interaction.cancel_gesture();
    }

    /// See [`InteractionManager::handle_wheel`].
    pub fn wheel(&mut self, input: WheelInput) {
        self.interaction.handle_wheel(&mut self.stage, input);
    }

    /// See [`InteractionManager::pinch_start`].
    pub fn pinch_start(&mut self, scale: f64) {
        self.interaction.pinch_start(scale);
    }

    /// See [`InteractionManager::pinch_move`].
    pub fn pinch_move(&mut self, scale: f64, client_x: f64, client_y: f64) {
        self.interaction
            .pinch_move(&mut self.stage, scale, client_x, client_y);
    }

    /// See [`InteractionManager::pinch_end`].
    pub fn pinch_end(&mut self) {
        self.interaction.pinch_end();
    }

    /// Applies a view-space box from a transform-handle widget to the
    /// selected shape. Returns `false` when nothing is selected.
    pub fn transform_selected(&mut self, view_obb: Obb<View>) -> Result<bool, StageError> {
        let Some(id) = self.interaction.selected() else {
            return Ok(false);
        };
        self.stage.apply_view_obb(&id, view_obb)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use drawboard_geom::{Obb, ViewPoint, WorldPoint};
    use drawboard_shape::Rectangle;

    use super::Board;
    use crate::error::StageError;

    fn board() -> Board {
        let mut b = Board::default();
        b.stage_mut().camera_mut().translate(-400.0, -300.0);
        b
    }

    #[test]
    fn transform_without_selection_is_a_no_op() {
        let mut b = board();
        let obb = Obb::new(ViewPoint::new(400.0, 300.0), 10.0, 10.0, 0.0);
        assert_eq!(b.transform_selected(obb), Ok(false));
    }

    #[test]
    fn transform_selected_writes_back_the_box() {
        let mut b = board();
        let id = b.add_shape(Rectangle::new(50.0, 50.0));
        assert_eq!(b.pointer_down(400.0, 300.0), Some(id));
        b.pointer_up(400.0, 300.0);

        let obb = Obb::new(ViewPoint::new(500.0, 300.0), 100.0, 25.0, 30.0);
        assert_eq!(b.transform_selected(obb), Ok(true));
        let shape = b.stage().get_shape(&id).map(|s| s.obb());
        let Some(shape) = shape else {
            panic!("shape vanished");
        };
        assert!(shape.center.approx_eq(WorldPoint::new(100.0, 0.0), 1e-9));
        assert!((shape.width - 100.0).abs() < 1e-9);
        assert!((shape.height - 25.0).abs() < 1e-9);
        assert!((shape.rotation - 30.0).abs() < 1e-9);
    }

    #[test]
    fn removing_selected_shape_clears_selection() {
        let mut b = board();
        let id = b.add_shape(Rectangle::new(50.0, 50.0));
        b.pointer_down(400.0, 300.0);
        assert!(b.remove_shape(&id).is_ok());
        assert_eq!(b.interaction().selected(), None);
        assert!(!b.interaction().is_dragging());
        assert!(matches!(b.remove_shape(&id), Err(StageError::NotFound(_))));
    }
}
