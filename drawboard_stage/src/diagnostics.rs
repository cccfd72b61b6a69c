// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured diagnostics a host can attach to a [`Stage`](crate::Stage).

use drawboard_geom::WorldPoint;
use drawboard_shape::ShapeId;

/// A notable event inside the stage.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// A shape was added. `indexed` is `false` when its bounds fall outside
    /// the world bounding.
    ShapeAdded {
        /// The new shape.
        id: ShapeId,
        /// Whether the spatial index accepted it.
        indexed: bool,
    },
    /// A shape was removed.
    ShapeRemoved {
        /// The removed shape.
        id: ShapeId,
    },
    /// The spatial index was rebuilt from scratch.
    IndexRebuilt {
        /// Shapes owned by the stage.
        shapes: usize,
        /// Shapes the index accepted.
        indexed: usize,
    },
    /// A hit test ran.
    HitTest {
        /// World point probed.
        at: WorldPoint,
        /// Shapes that survived the broad phase.
        candidates: usize,
        /// Topmost shape covering the point, if any.
        hit: Option<ShapeId>,
    },
}

/// Receiver for [`Diagnostic`] records.
///
/// Implemented for any `FnMut(&Diagnostic)`.
pub trait DiagnosticsSink {
    /// Called synchronously for every record.
    fn record(&mut self, diagnostic: &Diagnostic);
}

impl<F: FnMut(&Diagnostic)> DiagnosticsSink for F {
    fn record(&mut self, diagnostic: &Diagnostic) {
        self(diagnostic);
    }
}
