// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use drawboard_geom::SingularMatrixError;
use drawboard_shape::ShapeId;

/// Errors returned by [`Stage`](crate::Stage) mutations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StageError {
    /// The stage does not own a shape with this identifier.
    #[error("shape not found: {0}")]
    NotFound(ShapeId),
    /// The requested transform would make the shape degenerate.
    #[error(transparent)]
    Transform(#[from] SingularMatrixError),
}
