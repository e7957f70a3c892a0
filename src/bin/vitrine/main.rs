//! Vitrine - an interactive terminal showcase for the Omoro jewelry studio.
//!
//! Renders a scrollable page (masthead, gallery, FAQ, order form) in the
//! alternate screen and reacts to keys and mouse clicks. Preferences and
//! interest counters persist across sessions through a small key/value
//! store.
//!
//! # Architecture
//!
//! - Input thread: reads terminal events, forwards them over a channel
//! - Main loop: owns all state, ticks effect deadlines, repaints
//! - Library crate: storage, counters, validation, pricing, greeting

mod calculator;
mod cli;
mod effects;
mod event_loop;
mod faq;
mod form;
mod frame;
mod help;
mod input;
mod lightbox;
mod page;
mod render;
mod screen;
mod theme;

use std::io;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::bounded;
use tracing::{debug, info};

use vitrine::catalog::PRODUCTS;
use vitrine::greeting;
use vitrine::storage::{FileStore, KeyValueStore, MemoryStore};
use vitrine::telemetry::init_tracing;

use crate::cli::ShowcaseConfig;
use crate::page::PageState;
use crate::screen::TerminalSession;
use crate::theme::DisplayMode;

/// Max pending input events before the reader thread blocks.
const INPUT_CHANNEL_CAPACITY: usize = 256;

fn open_store(config: &ShowcaseConfig) -> Box<dyn KeyValueStore> {
    if let Some(dir) = &config.app.storage_dir {
        return Box::new(FileStore::at_dir(dir));
    }
    match FileStore::open_default() {
        Some(store) => Box::new(store),
        // No resolvable home directory: run the session without persistence.
        None => Box::new(MemoryStore::new()),
    }
}

fn main() -> Result<()> {
    let config = ShowcaseConfig::parse();

    if config.list_themes {
        for mode in [DisplayMode::Light, DisplayMode::Dark] {
            println!("{mode}");
        }
        return Ok(());
    }

    init_tracing(&config.app);

    let name = greeting::visitor_name(Some(&config.name));
    let greeting_line = greeting::greeting_line(&name, greeting::current_hour());
    info!(greeting = %greeting_line, "session started");
    for (index, product) in PRODUCTS.iter().enumerate() {
        debug!(position = index + 1, product = product.name, "catalog entry");
    }

    let store = open_store(&config);
    let mut state = PageState::new(
        store,
        greeting_line,
        config.color_depth(),
        config.ascii,
        config.mode_override(),
    );

    let session = TerminalSession::new()?;
    let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
    let _input_handle = input::spawn_input_thread(input_tx);

    let mut stdout = io::stdout();
    let result = event_loop::run(&mut state, &input_rx, &mut stdout);
    drop(session);
    result
}
