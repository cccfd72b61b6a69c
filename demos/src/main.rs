// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless scripted session: builds a board, drives it with synthetic
//! pointer and wheel input, and writes a frame before and after to PNG.
//!
//! Run with `cargo run -p drawboard_demos -- [output-dir]`. Set `RUST_LOG`
//! (for example `RUST_LOG=drawboard_stage=debug`) to see the stage's logs.

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use drawboard_raster::RasterSurface;
use drawboard_shape::{Ellipse, Rectangle};
use drawboard_stage::{
    Board, InteractionConfig, Modifiers, StageOptions, SurfaceRect, WheelInput,
};
use kurbo::Size;
use peniko::Color;
use png::{BitDepth, ColorType, Encoder};
use tracing::info;
use tracing_subscriber::EnvFilter;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 640.0;

/// Where the surface sits in the imaginary page.
const SURFACE: SurfaceRect = SurfaceRect {
    left: 32.0,
    top: 48.0,
    width: WIDTH,
    height: HEIGHT,
};

fn client(view_x: f64, view_y: f64) -> (f64, f64) {
    (SURFACE.left + view_x, SURFACE.top + view_y)
}

fn build_board() -> Board {
    let mut options = StageOptions::default();
    options.camera.viewport = Size::new(WIDTH, HEIGHT);
    let mut board = Board::new(options, InteractionConfig::default());
    board.set_surface_rect(SURFACE);
    board
        .stage_mut()
        .camera_mut()
        .translate(-WIDTH * 0.5, -HEIGHT * 0.5);

    let palette = [
        Color::from_rgba8(0x00, 0x89, 0xff, 0xff),
        Color::from_rgba8(0xff, 0x6b, 0x3d, 0xff),
        Color::from_rgba8(0x2e, 0xb8, 0x72, 0xff),
        Color::from_rgba8(0x9b, 0x59, 0xd0, 0xff),
    ];
    for row in 0..3_i32 {
        for col in 0..4_i32 {
            let fill = palette[(row * 4 + col) as usize % palette.len()];
            let id = if (row + col) % 2 == 0 {
                board.add_shape(Rectangle::new(90.0, 60.0).with_fill(fill))
            } else {
                board.add_shape(Ellipse::new(45.0, 35.0).with_fill(fill))
            };
            let x = f64::from(col - 2) * 160.0 + 80.0;
            let y = f64::from(row - 1) * 150.0;
            let stage = board.stage_mut();
            if let Err(err) = stage.translate_shape_to(&id, x, y) {
                tracing::warn!(%err, "could not place shape");
            }
            let _ = stage.rotate_shape_to(&id, f64::from(row * 4 + col) * 7.5);
        }
    }
    board
}

fn write_frame(
    board: &Board,
    surface: &mut RasterSurface,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    surface.reset();
    surface.clear(Color::from_rgba8(0xfa, 0xfa, 0xf7, 0xff));
    board.stage().render(surface);
    surface.finish();

    let file = BufWriter::new(File::create(path)?);
    let (width, height) = (u32::from(surface.width()), u32::from(surface.height()));
    let mut encoder = Encoder::new(file, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&surface.to_rgba8())?;
    info!(path = %path.display(), "wrote frame");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let out_dir = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let mut board = build_board();
    board.subscribe(|event| info!(?event, "board event"));

    let mut surface = RasterSurface::for_viewport(board.stage().camera().viewport());
    write_frame(&board, &mut surface, &out_dir.join("drawboard_before.png"))?;

    // Drag the ellipse sitting just right of the world origin.
    let (x, y) = client(WIDTH * 0.5 + 80.0, HEIGHT * 0.5);
    if board.pointer_down(x, y).is_some() {
        for step in 1..=10 {
            let t = f64::from(step);
            board.pointer_move(x + t * 12.0, y + t * 9.0);
        }
        board.pointer_up(x + 120.0, y + 90.0);
    }

    // Ctrl + wheel zooms out about the top-left quarter, then a plain wheel
    // pans right.
    let (zx, zy) = client(WIDTH * 0.25, HEIGHT * 0.25);
    board.wheel(WheelInput {
        client_x: zx,
        client_y: zy,
        delta_x: 0.0,
        delta_y: 60.0,
        modifiers: Modifiers::CTRL,
    });
    board.wheel(WheelInput {
        client_x: zx,
        client_y: zy,
        delta_x: 90.0,
        delta_y: 0.0,
        modifiers: Modifiers::empty(),
    });

    // Clicking empty space clears the selection.
    let (ex, ey) = client(4.0, 4.0);
    board.pointer_down(ex, ey);
    board.pointer_up(ex, ey);

    write_frame(&board, &mut surface, &out_dir.join("drawboard_after.png"))?;
    info!(debug = ?board.stage().debug_info(), "session finished");
    Ok(())
}
