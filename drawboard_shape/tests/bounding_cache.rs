// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached bounds stay consistent with the transform under random mutation.

use drawboard_geom::Aabb;
use drawboard_shape::{Ellipse, Rectangle, Shape};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_consistent(shape: &dyn Shape) {
    let aabb = shape.aabb();
    let m = shape.transform_matrix();
    let slack = 1e-6 * (1.0 + aabb.width.max(aabb.height));
    let grown = Aabb::new(
        aabb.x - slack,
        aabb.y - slack,
        aabb.width + 2.0 * slack,
        aabb.height + 2.0 * slack,
    );
    for corner in shape.local_extents().corners() {
        let w = m.apply_to_point(corner);
        assert!(grown.contains_point(w), "{w:?} escapes {aabb:?}");
    }
    let obb = shape.obb();
    assert_eq!(obb.center, shape.translation());
    assert_eq!(obb.rotation, shape.rotation());
    // The rotated OBB corners span exactly the cached AABB.
    let from_obb = obb.bounding_aabb();
    assert!((from_obb.width - aabb.width).abs() < slack, "{from_obb:?} vs {aabb:?}");
    assert!((from_obb.height - aabb.height).abs() < slack, "{from_obb:?} vs {aabb:?}");
}

#[test]
fn random_mutations_keep_bounds_consistent() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(Rectangle::new(40.0, 10.0)),
        Box::new(Ellipse::new(12.0, 30.0)),
    ];
    for _ in 0..400 {
        for shape in &mut shapes {
            match rng.random_range(0..6) {
                0 => shape.translate(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)),
                1 => shape.translate_to(rng.random_range(-1e3..1e3), rng.random_range(-1e3..1e3)),
                2 => shape.rotate(rng.random_range(-180.0..180.0)),
                3 => shape.rotate_to(rng.random_range(-720.0..720.0)),
                4 => {
                    let f = rng.random_range(0.5..2.0);
                    // Keep the accumulated scale within a sane band.
                    if shape.scaling().x * f < 20.0 && shape.scaling().x * f > 0.05 {
                        shape.scale(f, 1.0).unwrap();
                    }
                }
                _ => shape
                    .scale_to(rng.random_range(-3.0..3.0_f64).max(0.1), rng.random_range(0.1..3.0))
                    .unwrap(),
            }
            assert_consistent(shape.as_ref());
        }
    }
}

#[test]
fn failed_scale_leaves_cache_untouched() {
    let mut r = Rectangle::new(10.0, 10.0);
    r.translate_to(3.0, 4.0);
    r.rotate_to(15.0);
    let (aabb, obb) = (r.aabb(), r.obb());
    assert!(r.scale(0.0, 0.0).is_err());
    assert_eq!(r.aabb(), aabb);
    assert_eq!(r.obb(), obb);
}
