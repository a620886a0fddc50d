//! Demo binary for the logo-reveal loading widget.
//!
//! Run with no arguments for a generated placeholder logo, with an image
//! path to reveal your own logo, or with a `.json` style file to drive the
//! raw attribute layer.

mod app;

use std::path::PathBuf;

use anyhow::Context;
use image::{Rgba, RgbaImage};
use logo_reveal::{LogoReveal, RevealConfig, RevealStyle};

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let config = demo_config().context("resolving the reveal configuration")?;
    let reveal = LogoReveal::new(config).context("building the loading widget")?;

    iced::application(
        move || app::App::new(reveal.clone()),
        app::App::update,
        app::App::view,
    )
    .title("logo-reveal demo")
    .subscription(app::App::subscription)
    .theme(app::App::theme)
    .antialiasing(true)
    .run()?;

    Ok(())
}

/// Configuration for the demo: an optional image or style-file argument,
/// otherwise a generated placeholder logo with the stock defaults.
fn demo_config() -> anyhow::Result<RevealConfig> {
    match std::env::args().nth(1) {
        Some(arg) if arg.ends_with(".json") => {
            let style = RevealStyle::load_from_file(&PathBuf::from(&arg))?;
            Ok(style.resolve()?)
        }
        Some(arg) => {
            let style = RevealStyle {
                image: Some(PathBuf::from(arg)),
                // The stock repeat-mode attribute default is rejected at
                // resolution; the demo picks restart.
                repeat_mode: 1,
                ..Default::default()
            };
            Ok(style.resolve()?)
        }
        None => Ok(RevealConfig::new(placeholder_logo())),
    }
}

/// A generated stand-in logo: a ring next to a rounded bar, soft-edged.
fn placeholder_logo() -> RgbaImage {
    const WIDTH: u32 = 256;
    const HEIGHT: u32 = 128;
    const COLOR: [u8; 3] = [235, 74, 140];

    let mut logo = RgbaImage::new(WIDTH, HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            // Ring centered in the left half.
            let center_distance = ((px - 64.0).powi(2) + (py - 64.0).powi(2)).sqrt();
            let ring = edge(44.0 - center_distance).min(edge(center_distance - 26.0));

            // Capsule bar in the right half.
            let nearest_x = px.clamp(136.0, 220.0);
            let bar_distance = ((px - nearest_x).powi(2) + (py - 64.0).powi(2)).sqrt();
            let bar = edge(12.0 - bar_distance);

            let alpha = ring.max(bar);
            if alpha > 0.0 {
                logo.put_pixel(
                    x,
                    y,
                    Rgba([COLOR[0], COLOR[1], COLOR[2], (alpha * 255.0).round() as u8]),
                );
            }
        }
    }
    logo
}

/// One-pixel soft edge for the generated shapes.
fn edge(signed_distance: f32) -> f32 {
    (signed_distance + 0.5).clamp(0.0, 1.0)
}
