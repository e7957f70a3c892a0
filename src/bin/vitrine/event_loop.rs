//! Core runtime loop coordinating input events, effect deadlines, and repaints.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{select, Receiver};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use vitrine::catalog::PRODUCTS;
use vitrine::counters::Direction;

use crate::form::Field;
use crate::input::InputEvent;
use crate::page::{OverlayMode, PageState};
use crate::render::{self, Action, RenderedPage};
use crate::screen;

/// Idle tick interval; also paces effect animation frames.
pub(crate) const EVENT_LOOP_IDLE_MS: u64 = 20;

pub(crate) struct Viewport {
    pub(crate) cols: u16,
    pub(crate) rows: u16,
}

fn max_scroll_rows(page: &RenderedPage, viewport: &Viewport) -> usize {
    page.lines.len().saturating_sub(viewport.rows as usize)
}

/// Run until quit. All state mutation happens on this thread.
pub(crate) fn run(
    state: &mut PageState,
    input_rx: &Receiver<InputEvent>,
    out: &mut impl Write,
) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport { cols, rows };
    let mut running = true;
    let mut page = render::render_page(state, Instant::now(), viewport.cols);
    let mut needs_redraw = true;

    while running {
        if needs_redraw {
            let now = Instant::now();
            page = render::render_page(state, now, viewport.cols);
            screen::draw(out, state, &page, now, viewport.cols, viewport.rows)?;
            needs_redraw = false;
        }
        select! {
            recv(input_rx) -> event => match event {
                Ok(event) => {
                    needs_redraw =
                        handle_input(state, event, &mut viewport, &page, &mut running);
                }
                Err(_) => running = false,
            },
            default(Duration::from_millis(EVENT_LOOP_IDLE_MS)) => {
                if state.tick(Instant::now()) {
                    needs_redraw = true;
                }
            }
        }
    }
    Ok(())
}

fn handle_input(
    state: &mut PageState,
    event: InputEvent,
    viewport: &mut Viewport,
    page: &RenderedPage,
    running: &mut bool,
) -> bool {
    match event {
        InputEvent::Resize { cols, rows } => {
            viewport.cols = cols;
            viewport.rows = rows;
            true
        }
        InputEvent::Wheel { delta_rows } => {
            state
                .scroll
                .scroll_rows(delta_rows as isize, max_scroll_rows(page, viewport));
            true
        }
        InputEvent::Click { column, row } => handle_click(state, column, row, viewport, page),
        InputEvent::Key(key) => handle_key(state, key, viewport, page, running),
    }
}

pub(crate) fn handle_key(
    state: &mut PageState,
    key: KeyEvent,
    viewport: &Viewport,
    page: &RenderedPage,
    running: &mut bool,
) -> bool {
    let now = Instant::now();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => {
                *running = false;
                false
            }
            KeyCode::Char('t') if state.overlay == OverlayMode::None => {
                state.toggle_theme(now);
                true
            }
            KeyCode::Char('s') if state.overlay == OverlayMode::None => {
                state.submit_form(now, viewport.cols);
                true
            }
            _ => false,
        };
    }

    match state.overlay {
        // Help and lightbox dismiss on any key.
        OverlayMode::Help | OverlayMode::Lightbox => {
            state.close_overlay();
            true
        }
        OverlayMode::Calculator => handle_calculator_key(state, key),
        OverlayMode::None => handle_page_key(state, key, now, viewport, page, running),
    }
}

fn handle_calculator_key(state: &mut PageState, key: KeyEvent) -> bool {
    let Some(calc) = state.calculator.as_mut() else {
        state.close_overlay();
        return true;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.close_overlay();
            true
        }
        KeyCode::Tab => {
            calc.focus_next();
            true
        }
        KeyCode::Backspace => {
            calc.backspace();
            true
        }
        KeyCode::Char(ch) => {
            calc.insert_char(ch);
            true
        }
        _ => false,
    }
}

fn handle_page_key(
    state: &mut PageState,
    key: KeyEvent,
    now: Instant,
    viewport: &Viewport,
    page: &RenderedPage,
    running: &mut bool,
) -> bool {
    let max_rows = max_scroll_rows(page, viewport);
    let editing_text = state
        .form
        .focus
        .is_some_and(|field| field.is_text());
    let screen_rows = viewport.rows.max(4) as isize;

    match key.code {
        KeyCode::Tab => {
            state.form.focus_next();
            true
        }
        KeyCode::BackTab => {
            state.form.focus_prev();
            true
        }
        KeyCode::Esc => {
            state.form.focus = None;
            true
        }
        KeyCode::Up => {
            state.scroll.scroll_rows(-1, max_rows);
            true
        }
        KeyCode::Down => {
            state.scroll.scroll_rows(1, max_rows);
            true
        }
        KeyCode::PageUp => {
            state.scroll.scroll_rows(-(screen_rows - 2), max_rows);
            true
        }
        KeyCode::PageDown => {
            state.scroll.scroll_rows(screen_rows - 2, max_rows);
            true
        }
        KeyCode::Home => {
            state.scroll.start_smooth_top();
            true
        }
        KeyCode::Backspace if editing_text => {
            state.form.backspace();
            true
        }
        KeyCode::Left | KeyCode::Right => match state.form.focus {
            Some(Field::Product) => {
                state.form.cycle_product(key.code == KeyCode::Right);
                true
            }
            Some(Field::Contact) => {
                state.form.toggle_contact();
                true
            }
            _ => false,
        },
        KeyCode::Enter => match state.form.focus {
            Some(Field::Submit) => {
                state.submit_form(now, viewport.cols);
                true
            }
            Some(Field::Product) => {
                state.form.cycle_product(true);
                true
            }
            Some(Field::Contact) => {
                state.form.toggle_contact();
                true
            }
            Some(_) => {
                state.form.focus_next();
                true
            }
            None => {
                state.open_lightbox(PRODUCTS[state.selected_card].key);
                true
            }
        },
        KeyCode::Char(ch) if editing_text => {
            state.form.insert_char(ch);
            true
        }
        KeyCode::Char(ch) => handle_shortcut_char(state, ch, now, running),
        _ => false,
    }
}

fn handle_shortcut_char(
    state: &mut PageState,
    ch: char,
    now: Instant,
    running: &mut bool,
) -> bool {
    let selected_key = PRODUCTS[state.selected_card].key;
    match ch {
        'q' => {
            *running = false;
            false
        }
        '?' => {
            state.open_help();
            true
        }
        '1'..='3' => {
            state.selected_card = (ch as usize) - ('1' as usize);
            true
        }
        '4'..='7' => {
            state.faq.toggle((ch as usize) - ('4' as usize));
            true
        }
        '+' | '=' => {
            state.adjust_counter(selected_key, Direction::Up, now);
            true
        }
        '-' => {
            state.adjust_counter(selected_key, Direction::Down, now);
            true
        }
        'c' => {
            state.open_calculator(selected_key);
            true
        }
        'h' => {
            state.toggle_card_highlight(state.selected_card);
            true
        }
        'a' => {
            if state.effects.shimmer_running() {
                state.effects.stop_shimmer();
            } else {
                state.effects.start_shimmer(now);
            }
            true
        }
        _ => false,
    }
}

pub(crate) fn handle_click(
    state: &mut PageState,
    column: u16,
    row: u16,
    viewport: &Viewport,
    page: &RenderedPage,
) -> bool {
    let now = Instant::now();

    // An open overlay captures every click: the backdrop and the close
    // control dismiss it, the body (the enlarged image) is inert.
    if state.overlay != OverlayMode::None {
        if let Some((col, overlay_row, width, height)) =
            screen::overlay_geometry(state, viewport.cols, viewport.rows)
        {
            let inside = (col..col + width as u16).contains(&column)
                && (overlay_row..overlay_row + height as u16).contains(&row);
            let on_close_row = row as usize == overlay_row as usize + height.saturating_sub(2);
            if !inside || on_close_row || state.overlay == OverlayMode::Help {
                state.close_overlay();
                return true;
            }
            return false;
        }
        state.close_overlay();
        return true;
    }

    // Floating back-to-top button sits above the page.
    if state.scroll.back_to_top_visible() {
        let (button_row, col_start, col_end) = render::back_to_top_rect(viewport.cols, viewport.rows);
        if row == button_row && (col_start..col_end).contains(&column) {
            state.scroll.start_smooth_top();
            return true;
        }
    }

    let page_row = state.scroll.offset_rows() + row as usize;
    match page.action_at(page_row, column as usize) {
        Some(action) => dispatch_action(state, action, now, viewport.cols),
        None => false,
    }
}

fn dispatch_action(state: &mut PageState, action: Action, now: Instant, cols: u16) -> bool {
    match action {
        Action::ToggleTheme => state.toggle_theme(now),
        Action::CounterAdjust(key, direction) => state.adjust_counter(key, direction, now),
        Action::OpenLightbox(key) => state.open_lightbox(key),
        Action::OpenCalculator(key) => state.open_calculator(key),
        Action::ToggleCardHighlight(card) => {
            state.selected_card = card;
            state.toggle_card_highlight(card);
        }
        Action::StartShimmer => state.effects.start_shimmer(now),
        Action::StopShimmer => state.effects.stop_shimmer(),
        Action::ToggleFaq(index) => state.faq.toggle(index),
        Action::FocusField(field) => state.form.focus = Some(field),
        Action::Submit => state.submit_form(now, cols),
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorDepth, DisplayMode};
    use vitrine::catalog::ProductKey;
    use vitrine::storage::MemoryStore;

    fn page_state() -> PageState {
        PageState::new(
            Box::new(MemoryStore::new()),
            String::new(),
            ColorDepth::Plain,
            true,
            None,
        )
    }

    fn viewport() -> Viewport {
        Viewport { cols: 80, rows: 24 }
    }

    fn rendered(state: &PageState) -> RenderedPage {
        render::render_page(state, Instant::now(), 80)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn region_click(state: &mut PageState, action: Action) -> bool {
        let page = rendered(state);
        let region = page
            .regions
            .iter()
            .find(|region| region.action == action)
            .copied()
            .unwrap_or_else(|| panic!("missing region {action:?}"));
        // Page is unscrolled in these tests, so page row == screen row.
        handle_click(
            state,
            region.col_start as u16,
            region.row as u16,
            &viewport(),
            &page,
        )
    }

    #[test]
    fn ctrl_t_toggles_theme() {
        let mut state = page_state();
        let mut running = true;
        let page = rendered(&state);
        assert!(handle_key(&mut state, ctrl('t'), &viewport(), &page, &mut running));
        assert_eq!(state.mode, DisplayMode::Dark);
        assert!(running);
    }

    #[test]
    fn ctrl_q_quits() {
        let mut state = page_state();
        let mut running = true;
        let page = rendered(&state);
        handle_key(&mut state, ctrl('q'), &viewport(), &page, &mut running);
        assert!(!running);
    }

    #[test]
    fn clicking_the_counter_buttons_adjusts() {
        let mut state = page_state();
        assert!(region_click(
            &mut state,
            Action::CounterAdjust(ProductKey::Ring, Direction::Up)
        ));
        assert_eq!(state.counters.get(ProductKey::Ring), 1);

        assert!(region_click(
            &mut state,
            Action::CounterAdjust(ProductKey::Ring, Direction::Down)
        ));
        assert_eq!(state.counters.get(ProductKey::Ring), 0);
    }

    #[test]
    fn typing_flows_into_the_focused_field() {
        let mut state = page_state();
        let mut running = true;
        let page = rendered(&state);
        state.form.focus = Some(Field::Name);
        for ch in "Ada".chars() {
            handle_key(
                &mut state,
                press(KeyCode::Char(ch)),
                &viewport(),
                &page,
                &mut running,
            );
        }
        assert_eq!(state.form.name, "Ada");
        handle_key(
            &mut state,
            press(KeyCode::Backspace),
            &viewport(),
            &page,
            &mut running,
        );
        assert_eq!(state.form.name, "Ad");
    }

    #[test]
    fn gallery_shortcuts_work_when_nothing_is_focused() {
        let mut state = page_state();
        let mut running = true;
        let page = rendered(&state);

        handle_key(&mut state, press(KeyCode::Char('2')), &viewport(), &page, &mut running);
        assert_eq!(state.selected_card, 1);

        handle_key(&mut state, press(KeyCode::Char('+')), &viewport(), &page, &mut running);
        assert_eq!(state.counters.get(ProductKey::Necklace), 1);

        handle_key(&mut state, press(KeyCode::Char('4')), &viewport(), &page, &mut running);
        assert!(state.faq.is_expanded(0));

        handle_key(&mut state, press(KeyCode::Char('c')), &viewport(), &page, &mut running);
        assert_eq!(state.overlay, OverlayMode::Calculator);
    }

    #[test]
    fn lightbox_backdrop_click_closes_but_image_click_does_not() {
        let mut state = page_state();
        state.open_lightbox(ProductKey::Ring);
        let page = rendered(&state);
        let (col, row, width, _height) =
            screen::overlay_geometry(&state, 80, 24).expect("geometry");

        // Click on the image body (second row inside the frame): inert.
        assert!(!handle_click(
            &mut state,
            col + width as u16 / 2,
            row + 3,
            &viewport(),
            &page
        ));
        assert!(state.lightbox.is_open());

        // Click outside the frame: dismissed.
        assert!(handle_click(&mut state, 0, 0, &viewport(), &page));
        assert!(!state.lightbox.is_open());
        assert_eq!(state.overlay, OverlayMode::None);
    }

    #[test]
    fn lightbox_close_row_click_closes() {
        let mut state = page_state();
        state.open_lightbox(ProductKey::Ring);
        let page = rendered(&state);
        let (col, row, _width, height) =
            screen::overlay_geometry(&state, 80, 24).expect("geometry");
        assert!(handle_click(
            &mut state,
            col + 2,
            row + height as u16 - 2,
            &viewport(),
            &page
        ));
        assert!(!state.lightbox.is_open());
    }

    #[test]
    fn calculator_keys_edit_the_focused_input() {
        let mut state = page_state();
        state.open_calculator(ProductKey::Ring);
        let mut running = true;
        let page = rendered(&state);

        handle_key(&mut state, press(KeyCode::Backspace), &viewport(), &page, &mut running);
        handle_key(&mut state, press(KeyCode::Char('3')), &viewport(), &page, &mut running);
        let calc = state.calculator.as_ref().expect("calculator open");
        assert_eq!(calc.quantity_input, "3");

        handle_key(&mut state, press(KeyCode::Esc), &viewport(), &page, &mut running);
        assert_eq!(state.overlay, OverlayMode::None);
        assert!(state.calculator.is_none());
    }

    #[test]
    fn help_dismisses_on_any_key() {
        let mut state = page_state();
        let mut running = true;
        let page = rendered(&state);
        handle_key(&mut state, press(KeyCode::Char('?')), &viewport(), &page, &mut running);
        assert_eq!(state.overlay, OverlayMode::Help);

        handle_key(&mut state, press(KeyCode::Char('x')), &viewport(), &page, &mut running);
        assert_eq!(state.overlay, OverlayMode::None);
    }

    #[test]
    fn submit_via_ctrl_s_spawns_celebration_when_valid() {
        let mut state = page_state();
        state.form.name = "Ada Lovelace".to_string();
        state.form.email = "ada@example.org".to_string();
        state.form.phone = "555-0100".to_string();
        state.form.product = Some(ProductKey::Ring);
        state.form.quantity = "1".to_string();

        let mut running = true;
        let page = rendered(&state);
        assert!(handle_key(&mut state, ctrl('s'), &viewport(), &page, &mut running));
        assert!(state.form.success_visible());
        assert!(state.effects.celebration.is_some());
    }

    #[test]
    fn wheel_and_resize_update_the_view() {
        let mut state = page_state();
        let mut viewport = viewport();
        let page = rendered(&state);
        let mut running = true;

        assert!(handle_input(
            &mut state,
            InputEvent::Wheel { delta_rows: 3 },
            &mut viewport,
            &page,
            &mut running
        ));
        assert_eq!(state.scroll.offset_rows(), 3);

        assert!(handle_input(
            &mut state,
            InputEvent::Resize { cols: 100, rows: 30 },
            &mut viewport,
            &page,
            &mut running
        ));
        assert_eq!(viewport.cols, 100);
        assert_eq!(viewport.rows, 30);
    }

    #[test]
    fn escape_clears_form_focus() {
        let mut state = page_state();
        let mut running = true;
        let page = rendered(&state);
        state.form.focus = Some(Field::Email);
        handle_key(&mut state, press(KeyCode::Esc), &viewport(), &page, &mut running);
        assert_eq!(state.form.focus, None);
    }
}
