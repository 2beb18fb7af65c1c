//! `slideloop` - Timed slide presentation core
//!
//! Demo driver composing the library end-to-end: a sample deck, the
//! coordinator runtime, and a terminal stand-in for the presentation
//! layer. Render commands print to stdout; lines on stdin act as taps.

use anyhow::{Context, Result};
use slideloop::config::ConfigManager;
use slideloop::coordinator::{CoordinatorRuntime, RenderCommand};
use slideloop::deck::{ImageHandle, Slide, SlideDeck};
use slideloop::navigation::NavigationController;
use slideloop::progress::SlotState;
use slideloop::utils;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc;
use tracing::info;

/// Viewport width assumed for translating `l`/`r` input into tap positions
const VIEWPORT_WIDTH: f64 = 400.0;

fn main() -> Result<()> {
    utils::init_logging(None).context("Failed to initialize logging system")?;

    let config = ConfigManager::load(Path::new("slideloop.json"))
        .context("Failed to load session configuration")?;
    info!(
        "Session configured with a {:?} advance period",
        config.timing.period()
    );

    let deck = Arc::new(SlideDeck::new(vec![
        Slide::new(ImageHandle::new("img/welcome"), "Welcome"),
        Slide::new(ImageHandle::new("img/explore"), "Explore the features"),
        Slide::new(ImageHandle::new("img/done"), "You're all set"),
    ]));

    let (render_tx, render_rx) = mpsc::channel::<RenderCommand>();
    let runtime = CoordinatorRuntime::spawn(Arc::clone(&deck), config.timing, render_tx)
        .context("Failed to start presentation session")?;
    let navigation = NavigationController::new(runtime.handle());

    // Terminal presentation layer: print what a view would draw
    let deck_len = deck.len();
    let presenter = std::thread::spawn(move || {
        for command in render_rx {
            match command {
                RenderCommand::RenderSlide { index, slide } => {
                    println!(
                        "[slide {}/{}] {} ({})",
                        index + 1,
                        deck_len,
                        slide.title(),
                        slide.image()
                    );
                }
                RenderCommand::SlotStateChanged { index, state } => {
                    let glyph = match state {
                        SlotState::Idle => "·",
                        SlotState::Running => "▶",
                        SlotState::Complete => "█",
                    };
                    println!("  bar {index}: {glyph}");
                }
            }
        }
    });

    println!("slideloop demo: r = tap right, l = tap left, n = next button, s = stop, a = resume, q = quit");
    navigation.appeared();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        match line.trim() {
            "r" => navigation.handle_tap(VIEWPORT_WIDTH * 0.75, VIEWPORT_WIDTH),
            "l" => navigation.handle_tap(VIEWPORT_WIDTH * 0.25, VIEWPORT_WIDTH),
            "n" => navigation.next_pressed(),
            "s" => navigation.dismissed(),
            "a" => navigation.appeared(),
            "q" => break,
            "" => {}
            other => println!("unrecognized input: {other}"),
        }
    }

    navigation.dismissed();
    runtime.shutdown();
    let _ = presenter.join();

    info!("slideloop demo shutting down");
    Ok(())
}
