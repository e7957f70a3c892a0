//! Decorative effect timers: confetti, theme pulse, counter flash, shimmer.
//!
//! Every effect is a deadline owned by the page state and checked from the
//! event-loop tick; nothing here runs on its own thread. Re-triggering an
//! effect replaces its pending deadline.

use std::time::{Duration, Instant};

use rand::Rng;

use vitrine::catalog::ProductKey;

/// Number of confetti particles per celebration.
pub(crate) const CONFETTI_COUNT: usize = 100;
/// The whole celebration is removed this long after spawn.
pub(crate) const CONFETTI_LIFETIME: Duration = Duration::from_secs(5);
/// Longest randomized particle start delay.
const CONFETTI_MAX_DELAY_MS: u64 = 2_000;
/// Randomized fall duration range.
const CONFETTI_FALL_MIN_MS: u64 = 2_000;
const CONFETTI_FALL_MAX_MS: u64 = 5_000;

/// Theme-change transition pulse length.
pub(crate) const THEME_PULSE: Duration = Duration::from_millis(500);
/// Counter flash length after an adjust.
pub(crate) const COUNTER_HIGHLIGHT: Duration = Duration::from_millis(1_000);
/// Entrance shimmer sweep length per card.
pub(crate) const SHIMMER_SWEEP: Duration = Duration::from_millis(800);

/// Confetti color palette (truecolor foregrounds).
pub(crate) const CONFETTI_COLORS: [&str; 10] = [
    "\x1b[38;2;255;82;82m",   // #ff5252
    "\x1b[38;2;255;64;129m",  // #ff4081
    "\x1b[38;2;224;64;251m",  // #e040fb
    "\x1b[38;2;124;77;255m",  // #7c4dff
    "\x1b[38;2;83;109;254m",  // #536dfe
    "\x1b[38;2;68;138;255m",  // #448aff
    "\x1b[38;2;64;196;255m",  // #40c4ff
    "\x1b[38;2;24;255;255m",  // #18ffff
    "\x1b[38;2;100;255;218m", // #64ffda
    "\x1b[38;2;105;240;174m", // #69f0ae
];

const CONFETTI_GLYPHS_UNICODE: [char; 4] = ['✦', '•', '▪', '◦'];
const CONFETTI_GLYPHS_ASCII: [char; 4] = ['*', 'o', '.', '+'];

/// One falling particle with randomized column, color, and timing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConfettiParticle {
    pub(crate) column: u16,
    pub(crate) color: usize,
    pub(crate) delay: Duration,
    pub(crate) fall: Duration,
}

/// A full confetti celebration, alive for [`CONFETTI_LIFETIME`].
#[derive(Debug, Clone)]
pub(crate) struct Celebration {
    started_at: Instant,
    particles: Vec<ConfettiParticle>,
}

impl Celebration {
    /// Spawn a fresh celebration across the given terminal width.
    pub(crate) fn spawn(now: Instant, cols: u16, rng: &mut impl Rng) -> Self {
        let cols = cols.max(1);
        let particles = (0..CONFETTI_COUNT)
            .map(|_| ConfettiParticle {
                column: rng.random_range(0..cols),
                color: rng.random_range(0..CONFETTI_COLORS.len()),
                delay: Duration::from_millis(rng.random_range(0..=CONFETTI_MAX_DELAY_MS)),
                fall: Duration::from_millis(
                    rng.random_range(CONFETTI_FALL_MIN_MS..=CONFETTI_FALL_MAX_MS),
                ),
            })
            .collect();
        Self {
            started_at: now,
            particles,
        }
    }

    /// Whether the celebration should be removed.
    #[must_use]
    pub(crate) fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.started_at) >= CONFETTI_LIFETIME
    }

    /// Screen positions of the currently visible particles.
    /// A particle is visible between its delay and the end of its fall,
    /// moving top to bottom over its fall duration.
    #[must_use]
    pub(crate) fn frame(&self, now: Instant, rows: u16) -> Vec<(u16, u16, usize)> {
        let elapsed = now.duration_since(self.started_at);
        let mut cells = Vec::new();
        for particle in &self.particles {
            let Some(falling) = elapsed.checked_sub(particle.delay) else {
                continue;
            };
            if falling >= particle.fall {
                continue;
            }
            let progress = falling.as_secs_f32() / particle.fall.as_secs_f32();
            let row = (progress * f32::from(rows.saturating_sub(1))) as u16;
            cells.push((row, particle.column, particle.color));
        }
        cells
    }

    /// Glyph for a particle, varied by its color slot.
    #[must_use]
    pub(crate) fn glyph(color: usize, ascii: bool) -> char {
        let glyphs = if ascii {
            CONFETTI_GLYPHS_ASCII
        } else {
            CONFETTI_GLYPHS_UNICODE
        };
        glyphs[color % glyphs.len()]
    }
}

/// All page-level effect deadlines.
#[derive(Debug, Default)]
pub(crate) struct EffectTimers {
    /// Transition pulse after a theme toggle.
    theme_pulse_until: Option<Instant>,
    /// Per-product counter flash.
    counter_flash_until: [Option<Instant>; 3],
    /// Active confetti celebration, if any.
    pub(crate) celebration: Option<Celebration>,
    /// Entrance shimmer start; `None` while stopped.
    shimmer_started_at: Option<Instant>,
}

impl EffectTimers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn slot(key: ProductKey) -> usize {
        match key {
            ProductKey::Ring => 0,
            ProductKey::Necklace => 1,
            ProductKey::Earrings => 2,
        }
    }

    /// Arm (or re-arm) the theme transition pulse.
    pub(crate) fn start_theme_pulse(&mut self, now: Instant) {
        self.theme_pulse_until = Some(now + THEME_PULSE);
    }

    #[must_use]
    pub(crate) fn theme_pulse_active(&self, now: Instant) -> bool {
        self.theme_pulse_until.is_some_and(|until| now < until)
    }

    /// Arm (or re-arm) the counter flash for one product.
    pub(crate) fn flash_counter(&mut self, key: ProductKey, now: Instant) {
        self.counter_flash_until[Self::slot(key)] = Some(now + COUNTER_HIGHLIGHT);
    }

    #[must_use]
    pub(crate) fn counter_flashing(&self, key: ProductKey, now: Instant) -> bool {
        self.counter_flash_until[Self::slot(key)].is_some_and(|until| now < until)
    }

    /// Start the entrance shimmer sweep over the product cards.
    pub(crate) fn start_shimmer(&mut self, now: Instant) {
        self.shimmer_started_at = Some(now);
    }

    /// Freeze the shimmer immediately.
    pub(crate) fn stop_shimmer(&mut self) {
        self.shimmer_started_at = None;
    }

    #[must_use]
    pub(crate) fn shimmer_running(&self) -> bool {
        self.shimmer_started_at.is_some()
    }

    /// Which card (by gallery position) the shimmer currently sweeps.
    /// Cycles while running.
    #[must_use]
    pub(crate) fn shimmer_position(&self, now: Instant, cards: usize) -> Option<usize> {
        let started = self.shimmer_started_at?;
        if cards == 0 {
            return None;
        }
        let sweeps = now.duration_since(started).as_millis() / SHIMMER_SWEEP.as_millis();
        Some((sweeps as usize) % cards)
    }

    /// Expire finished deadlines. Returns `true` when anything changed and
    /// the page should repaint.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.theme_pulse_until.is_some_and(|until| now >= until) {
            self.theme_pulse_until = None;
            changed = true;
        }
        for slot in &mut self.counter_flash_until {
            if slot.is_some_and(|until| now >= until) {
                *slot = None;
                changed = true;
            }
        }
        if self
            .celebration
            .as_ref()
            .is_some_and(|celebration| celebration.expired(now))
        {
            self.celebration = None;
            changed = true;
        }
        // A running shimmer or celebration animates every frame.
        changed || self.shimmer_started_at.is_some() || self.celebration.is_some()
    }
}
