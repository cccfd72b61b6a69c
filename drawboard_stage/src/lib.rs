// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawboard Stage: the interactive core of a 2D drawing board.
//!
//! - [`Stage`] owns shapes, a [`Camera`](drawboard_view2d::Camera), and a
//!   [`CollisionDetector`]. Every shape mutation goes through it so the
//!   spatial index never drifts from the shapes' bounds.
//! - [`CollisionDetector`] answers point hit tests in two phases: a quadtree
//!   of world-space bounding boxes narrows the candidates, then each
//!   candidate is rendered alone off-screen and the pixel under the pointer
//!   is sampled.
//! - [`InteractionManager`] turns client-space wheel, pinch, and pointer
//!   input into camera moves, selection, and drags, publishing
//!   [`StageEvent`]s on an [`EventBus`].
//! - [`Board`] bundles a stage with its input handling for embedding.
//!
//! Failures are reported through [`StageError`]; structured records can be
//! observed with a [`DiagnosticsSink`], and the crate logs through
//! [`tracing`].
//!
//! ```rust
//! use drawboard_shape::{Ellipse, Rectangle};
//! use drawboard_stage::{Board, StageEvent};
//!
//! let mut board = Board::default();
//! board.stage_mut().camera_mut().translate(-400.0, -300.0);
//! let rect = board.add_shape(Rectangle::new(50.0, 50.0));
//! let far = board.add_shape(Ellipse::circle(10.0));
//! board.stage_mut().translate_shape(&far, 200.0, 0.0).unwrap();
//!
//! let events = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! let sink = events.clone();
//! board.subscribe(move |e| sink.borrow_mut().push(*e));
//!
//! // The camera origin sits at world (-400, -300), so view (400, 300) is the
//! // world origin.
//! assert_eq!(board.pointer_down(400.0, 300.0), Some(rect));
//! board.pointer_up(400.0, 300.0);
//! assert_eq!(events.borrow()[0], StageEvent::Select(rect));
//! ```

mod board;
mod collision;
mod diagnostics;
mod error;
mod events;
mod interaction;
mod stage;

pub use board::Board;
pub use collision::{CollisionDetector, HitOutcome};
pub use diagnostics::{Diagnostic, DiagnosticsSink};
pub use error::StageError;
pub use events::{EventBus, StageEvent, SubscriptionId};
pub use interaction::{InteractionConfig, InteractionManager, Modifiers, SurfaceRect, WheelInput};
pub use stage::{Stage, StageDebugInfo, StageOptions};
