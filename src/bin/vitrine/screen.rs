//! Terminal session lifecycle and frame painting.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue, style};

use crate::calculator::{calculator_height, calculator_width_for_terminal, format_calculator};
use crate::effects::{Celebration, CONFETTI_COLORS};
use crate::help::{format_help_overlay, help_overlay_height, help_width_for_terminal};
use crate::lightbox::{format_lightbox, lightbox_height, lightbox_width_for_terminal};
use crate::page::{OverlayMode, PageState};
use crate::render::{back_to_top_label, back_to_top_rect, RenderedPage};
use crate::theme::{ColorDepth, GlyphSet};
use std::time::Instant;

/// Raw-mode + alternate-screen guard. Dropping it restores the terminal.
pub(crate) struct TerminalSession;

impl TerminalSession {
    pub(crate) fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

/// Screen placement of the active overlay: (col, row, width, height).
#[must_use]
pub(crate) fn overlay_geometry(
    state: &PageState,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16, usize, usize)> {
    let (width, height) = match state.overlay {
        OverlayMode::None => return None,
        OverlayMode::Help => (
            help_width_for_terminal(cols as usize),
            help_overlay_height(),
        ),
        OverlayMode::Lightbox => {
            let key = state.lightbox.showing()?;
            (lightbox_width_for_terminal(cols as usize), lightbox_height(key))
        }
        OverlayMode::Calculator => (
            calculator_width_for_terminal(cols as usize),
            calculator_height(),
        ),
    };
    let col = (cols as usize).saturating_sub(width) / 2;
    let row = (rows as usize).saturating_sub(height) / 2;
    Some((col as u16, row as u16, width, height))
}

fn overlay_content(state: &PageState, cols: u16) -> Option<String> {
    let colors = state.colors();
    match state.overlay {
        OverlayMode::None => None,
        OverlayMode::Help => Some(format_help_overlay(&colors, cols as usize)),
        OverlayMode::Lightbox => state
            .lightbox
            .showing()
            .map(|key| format_lightbox(key, &colors, cols as usize)),
        OverlayMode::Calculator => state
            .calculator
            .as_ref()
            .map(|calc| format_calculator(calc, &colors, cols as usize)),
    }
}

/// Paint one frame: page slice, overlay, confetti, back-to-top button.
pub(crate) fn draw(
    out: &mut impl Write,
    state: &PageState,
    page: &RenderedPage,
    now: Instant,
    cols: u16,
    rows: u16,
) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;

    let top = state.scroll.offset_rows();
    for (screen_row, line) in page
        .lines
        .iter()
        .skip(top)
        .take(rows as usize)
        .enumerate()
    {
        queue!(
            out,
            cursor::MoveTo(0, screen_row as u16),
            style::Print(line)
        )?;
    }

    if let (Some((col, row, _, _)), Some(content)) = (
        overlay_geometry(state, cols, rows),
        overlay_content(state, cols),
    ) {
        for (index, line) in content.lines().enumerate() {
            queue!(
                out,
                cursor::MoveTo(col, row + index as u16),
                style::Print(line)
            )?;
        }
    }

    if let Some(celebration) = &state.effects.celebration {
        draw_confetti(out, state, celebration, now, rows)?;
    }

    if state.scroll.back_to_top_visible() {
        let colors = state.colors();
        let (row, col, _) = back_to_top_rect(cols, rows);
        let label = back_to_top_label(colors.glyph_set);
        queue!(
            out,
            cursor::MoveTo(col, row),
            style::Print(format!("{}{label}{}", colors.accent, colors.reset))
        )?;
    }

    out.flush()
}

fn draw_confetti(
    out: &mut impl Write,
    state: &PageState,
    celebration: &Celebration,
    now: Instant,
    rows: u16,
) -> io::Result<()> {
    let colors = state.colors();
    let ascii = colors.glyph_set == GlyphSet::Ascii;
    for (row, col, color_index) in celebration.frame(now, rows) {
        let glyph = Celebration::glyph(color_index, ascii);
        let (color, reset) = match state.depth {
            ColorDepth::Plain => ("", ""),
            ColorDepth::True => (CONFETTI_COLORS[color_index], colors.reset),
        };
        queue!(
            out,
            cursor::MoveTo(col, row),
            style::Print(format!("{color}{glyph}{reset}"))
        )?;
    }
    Ok(())
}
