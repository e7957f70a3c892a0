//! Page state: every interactive surface plus the operations behind them.
//!
//! All mutation happens here, on the event-loop thread. Persistence writes
//! go through the injected [`KeyValueStore`] immediately after each
//! mutation so the stored record always matches what is on screen.

use std::time::Instant;

use tracing::{debug, info};

use vitrine::catalog::ProductKey;
use vitrine::counters::{Direction, InterestCounters};
use vitrine::storage::KeyValueStore;

use crate::calculator::Calculator;
use crate::effects::{Celebration, EffectTimers};
use crate::faq::FaqState;
use crate::form::OrderForm;
use crate::lightbox::Lightbox;
use crate::theme::{
    load_display_mode, persist_display_mode, resolve_colors, ColorDepth, DisplayMode, ThemeColors,
};

/// Scroll units per text row. Keeps the back-to-top threshold in the same
/// units the source page measured.
pub(crate) const SCROLL_UNITS_PER_ROW: usize = 20;
/// The back-to-top control appears at or past this scroll offset.
pub(crate) const BACK_TO_TOP_THRESHOLD_UNITS: usize = 200;

/// Which overlay, if any, sits over the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum OverlayMode {
    #[default]
    None,
    Help,
    Lightbox,
    Calculator,
}

/// Vertical scroll position with an optional smooth return-to-top.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ScrollState {
    offset_units: usize,
    easing_to_top: bool,
}

impl ScrollState {
    /// Current offset in whole rows.
    #[must_use]
    pub(crate) fn offset_rows(&self) -> usize {
        self.offset_units / SCROLL_UNITS_PER_ROW
    }

    /// Current offset in scroll units.
    #[must_use]
    pub(crate) fn offset_units(&self) -> usize {
        self.offset_units
    }

    /// Scroll by whole rows, clamped to `[0, max_rows]`. Manual scrolling
    /// cancels a smooth return in progress.
    pub(crate) fn scroll_rows(&mut self, delta: isize, max_rows: usize) {
        self.easing_to_top = false;
        let max_units = max_rows * SCROLL_UNITS_PER_ROW;
        let delta_units = delta.unsigned_abs() * SCROLL_UNITS_PER_ROW;
        self.offset_units = if delta >= 0 {
            self.offset_units.saturating_add(delta_units).min(max_units)
        } else {
            self.offset_units.saturating_sub(delta_units)
        };
    }

    /// Whether the back-to-top control should be visible.
    #[must_use]
    pub(crate) fn back_to_top_visible(&self) -> bool {
        self.offset_units >= BACK_TO_TOP_THRESHOLD_UNITS
    }

    /// Begin a smooth, eased scroll back to the top.
    pub(crate) fn start_smooth_top(&mut self) {
        self.easing_to_top = true;
    }

    /// Advance the smooth return one step. Returns `true` while moving.
    pub(crate) fn tick(&mut self) -> bool {
        if !self.easing_to_top {
            return false;
        }
        // Close two thirds of the remaining distance each step, landing
        // exactly on zero at the end.
        self.offset_units = self.offset_units / 3;
        if self.offset_units < SCROLL_UNITS_PER_ROW {
            self.offset_units = 0;
            self.easing_to_top = false;
        }
        true
    }
}

/// The whole interactive page.
pub(crate) struct PageState {
    pub(crate) mode: DisplayMode,
    pub(crate) depth: ColorDepth,
    pub(crate) ascii: bool,
    pub(crate) greeting: String,
    pub(crate) counters: InterestCounters,
    pub(crate) form: OrderForm,
    pub(crate) faq: FaqState,
    pub(crate) lightbox: Lightbox,
    pub(crate) calculator: Option<Calculator>,
    pub(crate) overlay: OverlayMode,
    pub(crate) effects: EffectTimers,
    pub(crate) scroll: ScrollState,
    /// Card the gallery keys act on.
    pub(crate) selected_card: usize,
    /// Persistent per-card highlight toggled by clicking the card body.
    pub(crate) card_highlight: [bool; 3],
    store: Box<dyn KeyValueStore>,
}

impl PageState {
    /// Build the page from persisted state.
    pub(crate) fn new(
        store: Box<dyn KeyValueStore>,
        greeting: String,
        depth: ColorDepth,
        ascii: bool,
        mode_override: Option<DisplayMode>,
    ) -> Self {
        let mode = mode_override.unwrap_or_else(|| load_display_mode(store.as_ref()));
        let counters = InterestCounters::load(store.as_ref());
        Self {
            mode,
            depth,
            ascii,
            greeting,
            counters,
            form: OrderForm::new(),
            faq: FaqState::new(),
            lightbox: Lightbox::new(),
            calculator: None,
            overlay: OverlayMode::None,
            effects: EffectTimers::new(),
            scroll: ScrollState::default(),
            selected_card: 0,
            card_highlight: [false; 3],
            store,
        }
    }

    /// Palette for the current mode and color settings.
    #[must_use]
    pub(crate) fn colors(&self) -> ThemeColors {
        resolve_colors(self.mode, self.depth, self.ascii)
    }

    /// Flip the display mode, persist it, and start the transition pulse.
    pub(crate) fn toggle_theme(&mut self, now: Instant) {
        self.mode = self.mode.toggled();
        persist_display_mode(self.store.as_mut(), self.mode);
        self.effects.start_theme_pulse(now);
        info!(mode = %self.mode, "display mode toggled");
    }

    /// Adjust one interest counter, flash it, and persist the record.
    pub(crate) fn adjust_counter(&mut self, key: ProductKey, direction: Direction, now: Instant) {
        if self.counters.adjust(key, direction) {
            self.effects.flash_counter(key, now);
            self.counters.persist(self.store.as_mut());
            debug!(product = %key, count = self.counters.get(key), "counter adjusted");
        }
    }

    /// Toggle a card's persistent highlight.
    pub(crate) fn toggle_card_highlight(&mut self, card: usize) {
        if let Some(slot) = self.card_highlight.get_mut(card) {
            *slot = !*slot;
        }
    }

    pub(crate) fn open_lightbox(&mut self, key: ProductKey) {
        self.lightbox.open(key);
        self.overlay = OverlayMode::Lightbox;
    }

    pub(crate) fn open_calculator(&mut self, key: ProductKey) {
        self.calculator = Some(Calculator::open(key));
        self.overlay = OverlayMode::Calculator;
    }

    pub(crate) fn open_help(&mut self) {
        self.overlay = OverlayMode::Help;
    }

    /// Close whichever overlay is up.
    pub(crate) fn close_overlay(&mut self) {
        self.lightbox.close();
        self.calculator = None;
        self.overlay = OverlayMode::None;
    }

    /// Run the submit gate; on success spawn the confetti celebration.
    pub(crate) fn submit_form(&mut self, now: Instant, cols: u16) {
        if self.form.submit(now).is_some() {
            self.effects.celebration = Some(Celebration::spawn(now, cols, &mut rand::rng()));
        }
    }

    /// Advance every deadline. Returns `true` when the page needs repainting.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        let form_changed = self.form.tick(now);
        let effects_changed = self.effects.tick(now);
        let scroll_changed = self.scroll.tick();
        form_changed || effects_changed || scroll_changed
    }
}
