//! Page composition: sections, styled lines, and click hit-regions.
//!
//! Rendering produces plain strings with ANSI color codes plus a region
//! list in page coordinates; the screen layer slices by scroll offset and
//! translates clicks back through the same regions.

use std::time::Instant;

use vitrine::catalog::{ProductKey, PRODUCTS};
use vitrine::counters::Direction;
use vitrine::pricing::format_currency;

use crate::faq::FAQ_ENTRIES;
use crate::form::{Field, Validity};
use crate::frame::{
    display_width, fit_display, frame_bottom, frame_separator, frame_top, framed_row,
    truncate_display,
};
use crate::page::PageState;
use crate::theme::{GlyphSet, ThemeColors};

/// Everything a click can do on the page surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    ToggleTheme,
    CounterAdjust(ProductKey, Direction),
    OpenLightbox(ProductKey),
    OpenCalculator(ProductKey),
    ToggleCardHighlight(usize),
    StartShimmer,
    StopShimmer,
    ToggleFaq(usize),
    FocusField(Field),
    Submit,
}

/// A clickable span in page coordinates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HitRegion {
    pub(crate) row: usize,
    pub(crate) col_start: usize,
    pub(crate) col_end: usize,
    pub(crate) action: Action,
}

/// The composed page: one string per row plus its click regions.
pub(crate) struct RenderedPage {
    pub(crate) lines: Vec<String>,
    pub(crate) regions: Vec<HitRegion>,
}

impl RenderedPage {
    /// Action under a page coordinate, if any.
    #[must_use]
    pub(crate) fn action_at(&self, row: usize, col: usize) -> Option<Action> {
        self.regions
            .iter()
            .find(|region| {
                region.row == row && col >= region.col_start && col < region.col_end
            })
            .map(|region| region.action)
    }
}

/// Page width for a terminal width.
#[must_use]
pub(crate) fn page_width(cols: u16) -> usize {
    (cols as usize).clamp(44, 72)
}

/// One styled line under construction, tracking visible width and spans.
struct LineBuilder {
    text: String,
    width: usize,
    spans: Vec<(usize, usize, Action)>,
}

impl LineBuilder {
    fn new() -> Self {
        Self {
            text: String::new(),
            width: 0,
            spans: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        self.text.push_str(text);
        self.width += display_width(text);
    }

    fn push_colored(&mut self, color: &str, text: &str, reset: &str) {
        self.text.push_str(color);
        self.push(text);
        self.text.push_str(reset);
    }

    fn push_action(&mut self, color: &str, text: &str, reset: &str, action: Action) {
        let start = self.width;
        self.push_colored(color, text, reset);
        self.spans.push((start, self.width, action));
    }
}

/// Append a framed content row, translating its spans into page regions.
fn emit_framed(
    lines: &mut Vec<String>,
    regions: &mut Vec<HitRegion>,
    colors: &ThemeColors,
    width: usize,
    builder: LineBuilder,
) {
    let row = lines.len();
    // framed_row prefixes one border column and one padding space.
    for (start, end, action) in &builder.spans {
        regions.push(HitRegion {
            row,
            col_start: start + 2,
            col_end: end + 2,
            action: *action,
        });
    }
    lines.push(framed_row(colors, width, &builder.text, builder.width));
}

/// Append an unframed row, keeping spans as-is.
fn emit_open(lines: &mut Vec<String>, regions: &mut Vec<HitRegion>, builder: LineBuilder) {
    let row = lines.len();
    for (start, end, action) in &builder.spans {
        regions.push(HitRegion {
            row,
            col_start: *start,
            col_end: *end,
            action: *action,
        });
    }
    lines.push(builder.text);
}

fn blank(lines: &mut Vec<String>) {
    lines.push(String::new());
}

fn masthead(
    lines: &mut Vec<String>,
    regions: &mut Vec<HitRegion>,
    state: &PageState,
    colors: &ThemeColors,
    width: usize,
) {
    lines.push(frame_top(colors, width));

    let mut title = LineBuilder::new();
    title.push_colored(colors.heading, "OMORO JEWELRY", colors.reset);
    let toggle = format!("[{}]", state.mode.toggle_label(colors.glyph_set));
    let gap = width
        .saturating_sub(4)
        .saturating_sub(title.width + display_width(&toggle));
    title.push(&" ".repeat(gap));
    title.push_action(colors.accent, &toggle, colors.reset, Action::ToggleTheme);
    emit_framed(lines, regions, colors, width, title);

    let mut tagline = LineBuilder::new();
    let clipped = truncate_display(&state.greeting, width.saturating_sub(4));
    tagline.push_colored(colors.dim, &clipped, colors.reset);
    emit_framed(lines, regions, colors, width, tagline);

    lines.push(frame_bottom(colors, width));
}

fn gallery_card(
    lines: &mut Vec<String>,
    regions: &mut Vec<HitRegion>,
    state: &PageState,
    colors: &ThemeColors,
    width: usize,
    card: usize,
    now: Instant,
) {
    let entry = &PRODUCTS[card];
    let key = entry.key;
    let selected = state.selected_card == card;
    let highlighted = state.card_highlight[card];
    let shimmering = state
        .effects
        .shimmer_position(now, PRODUCTS.len())
        .is_some_and(|position| position == card);

    lines.push(frame_top(colors, width));

    // Title row: index, name, price; selection and highlight markers.
    let mut title = LineBuilder::new();
    let marker = if selected { "▸" } else { " " };
    let marker = if colors.glyph_set == GlyphSet::Ascii && selected {
        ">"
    } else {
        marker
    };
    title.push_colored(colors.accent, marker, colors.reset);
    title.push(" ");
    let name_color = if highlighted {
        colors.highlight
    } else {
        colors.heading
    };
    title.push_action(
        name_color,
        &format!("{}. {}", card + 1, entry.name),
        colors.reset,
        Action::ToggleCardHighlight(card),
    );
    let price = format_currency(entry.price);
    let gap = width
        .saturating_sub(4)
        .saturating_sub(title.width + display_width(&price));
    title.push(&" ".repeat(gap));
    title.push_colored(colors.dim, &price, colors.reset);
    emit_framed(lines, regions, colors, width, title);

    // Art rows double as the lightbox click target.
    let art_color = if shimmering {
        colors.highlight
    } else {
        colors.accent
    };
    for row in entry.art {
        let mut art = LineBuilder::new();
        let left = width.saturating_sub(4).saturating_sub(display_width(row)) / 2;
        art.push(&" ".repeat(left));
        art.push_action(art_color, row, colors.reset, Action::OpenLightbox(key));
        emit_framed(lines, regions, colors, width, art);
    }

    let mut blurb = LineBuilder::new();
    let clipped = truncate_display(entry.blurb, width.saturating_sub(4));
    blurb.push_colored(colors.dim, &clipped, colors.reset);
    emit_framed(lines, regions, colors, width, blurb);

    // Counter row: count plus the adjust buttons.
    let mut counter = LineBuilder::new();
    counter.push("Interest: ");
    let count = state.counters.get(key).to_string();
    let count_color = if state.effects.counter_flashing(key, now) {
        colors.highlight
    } else {
        colors.accent
    };
    counter.push_colored(count_color, &count, colors.reset);
    counter.push("  ");
    counter.push_action(
        colors.accent,
        "[-]",
        colors.reset,
        Action::CounterAdjust(key, Direction::Down),
    );
    counter.push(" ");
    counter.push_action(
        colors.accent,
        "[+]",
        colors.reset,
        Action::CounterAdjust(key, Direction::Up),
    );
    counter.push("   ");
    counter.push_action(
        colors.accent,
        "[view]",
        colors.reset,
        Action::OpenLightbox(key),
    );
    counter.push(" ");
    counter.push_action(
        colors.accent,
        "[price]",
        colors.reset,
        Action::OpenCalculator(key),
    );
    emit_framed(lines, regions, colors, width, counter);

    lines.push(frame_bottom(colors, width));
}

fn animation_controls(
    lines: &mut Vec<String>,
    regions: &mut Vec<HitRegion>,
    state: &PageState,
    colors: &ThemeColors,
) {
    let mut controls = LineBuilder::new();
    controls.push("  ");
    controls.push_action(
        colors.accent,
        "[start animation]",
        colors.reset,
        Action::StartShimmer,
    );
    controls.push(" ");
    controls.push_action(
        colors.accent,
        "[stop animation]",
        colors.reset,
        Action::StopShimmer,
    );
    if state.effects.shimmer_running() {
        controls.push("  ");
        controls.push_colored(colors.dim, "running", colors.reset);
    }
    emit_open(lines, regions, controls);
}

fn section_heading(lines: &mut Vec<String>, colors: &ThemeColors, width: usize, title: &str) {
    let mut heading = LineBuilder::new();
    heading.push("  ");
    heading.push_colored(colors.heading, title, colors.reset);
    lines.push(heading.text);
    lines.push(format!(
        "{}{}{}",
        colors.border,
        frame_rule(colors, width),
        colors.reset
    ));
}

fn frame_rule(colors: &ThemeColors, width: usize) -> String {
    std::iter::repeat(colors.borders.horizontal)
        .take(width)
        .collect()
}

fn faq_section(
    lines: &mut Vec<String>,
    regions: &mut Vec<HitRegion>,
    state: &PageState,
    colors: &ThemeColors,
    width: usize,
) {
    section_heading(lines, colors, width, "QUESTIONS, ANSWERED");
    for (index, entry) in FAQ_ENTRIES.iter().enumerate() {
        let mut question = LineBuilder::new();
        question.push("  ");
        let indicator = state.faq.indicator(index, colors.glyph_set);
        question.push_action(
            colors.accent,
            &format!("{indicator} {}", entry.question),
            colors.reset,
            Action::ToggleFaq(index),
        );
        emit_open(lines, regions, question);

        if state.faq.is_expanded(index) {
            let mut answer = LineBuilder::new();
            answer.push("    ");
            answer.push_colored(
                colors.dim,
                &truncate_display(entry.answer, width.saturating_sub(4)),
                colors.reset,
            );
            emit_open(lines, regions, answer);
        }
    }
}

fn validity_marker(colors: &ThemeColors, validity: Validity) -> (&'static str, &'static str) {
    match (validity, colors.glyph_set) {
        (Validity::Valid, GlyphSet::Unicode) => ("✓", colors.success),
        (Validity::Valid, GlyphSet::Ascii) => ("+", colors.success),
        (Validity::Invalid, GlyphSet::Unicode) => ("✗", colors.error),
        (Validity::Invalid, GlyphSet::Ascii) => ("x", colors.error),
        (Validity::Unchecked, _) => (" ", ""),
    }
}

fn text_field_row(
    lines: &mut Vec<String>,
    regions: &mut Vec<HitRegion>,
    state: &PageState,
    colors: &ThemeColors,
    width: usize,
    field: Field,
    label: &str,
) {
    let focused = state.form.focus == Some(field);
    let validity = state.form.validity(field);
    let (mark, mark_color) = validity_marker(colors, validity);

    let mut row = LineBuilder::new();
    row.push_colored(mark_color, mark, colors.reset);
    row.push(" ");
    let value = state.form.text_value(field);
    let cursor = if focused { "_" } else { "" };
    let label_column = format!("{label:<9}");
    let body = format!("{value}{cursor}");
    let field_color = if focused { colors.highlight } else { colors.accent };
    row.push_action(
        if focused { colors.accent } else { "" },
        &label_column,
        colors.reset,
        Action::FocusField(field),
    );
    row.push_action(
        field_color,
        &fit_display(&body, width.saturating_sub(4).saturating_sub(row.width)),
        colors.reset,
        Action::FocusField(field),
    );
    emit_framed(lines, regions, colors, width, row);

    if state.form.error_visible(field) {
        emit_framed(lines, regions, colors, width, error_row(colors, width, field));
    }
}

fn error_row(colors: &ThemeColors, width: usize, field: Field) -> LineBuilder {
    let mut error = LineBuilder::new();
    error.push("  ");
    error.push_colored(
        colors.error,
        &truncate_display(field.error_message(), width.saturating_sub(6)),
        colors.reset,
    );
    error
}

fn form_section(
    lines: &mut Vec<String>,
    regions: &mut Vec<HitRegion>,
    state: &PageState,
    colors: &ThemeColors,
    width: usize,
) {
    lines.push(frame_top(colors, width));
    let mut title = LineBuilder::new();
    title.push_colored(colors.heading, "PLACE AN ORDER", colors.reset);
    emit_framed(lines, regions, colors, width, title);
    lines.push(frame_separator(colors, width));

    text_field_row(lines, regions, state, colors, width, Field::Name, "Name");
    text_field_row(lines, regions, state, colors, width, Field::Email, "Email");
    text_field_row(lines, regions, state, colors, width, Field::Phone, "Phone");

    // Product selector.
    {
        let focused = state.form.focus == Some(Field::Product);
        let (mark, mark_color) = validity_marker(colors, state.form.validity(Field::Product));
        let mut row = LineBuilder::new();
        row.push_colored(mark_color, mark, colors.reset);
        row.push(" ");
        row.push_action(
            if focused { colors.accent } else { "" },
            "Product  ",
            colors.reset,
            Action::FocusField(Field::Product),
        );
        let chosen = state
            .form
            .product
            .map(|key| vitrine::catalog::product(key).name)
            .unwrap_or("choose a piece");
        let body = format!("< {chosen} >");
        let field_color = if focused { colors.highlight } else { colors.accent };
        row.push_action(field_color, &body, colors.reset, Action::FocusField(Field::Product));
        emit_framed(lines, regions, colors, width, row);
        if state.form.error_visible(Field::Product) {
            emit_framed(
                lines,
                regions,
                colors,
                width,
                error_row(colors, width, Field::Product),
            );
        }
    }

    text_field_row(lines, regions, state, colors, width, Field::Quantity, "Quantity");
    text_field_row(lines, regions, state, colors, width, Field::Message, "Message");

    // Contact-method radio.
    {
        let focused = state.form.focus == Some(Field::Contact);
        let mut row = LineBuilder::new();
        row.push("  ");
        row.push_action(
            if focused { colors.accent } else { "" },
            "Contact  ",
            colors.reset,
            Action::FocusField(Field::Contact),
        );
        let (email_mark, phone_mark) = match state.form.contact {
            crate::form::ContactMethod::Email => ("(*)", "( )"),
            crate::form::ContactMethod::Phone => ("( )", "(*)"),
        };
        row.push_action(
            colors.accent,
            &format!("{email_mark} email  {phone_mark} phone"),
            colors.reset,
            Action::FocusField(Field::Contact),
        );
        emit_framed(lines, regions, colors, width, row);
    }

    lines.push(frame_separator(colors, width));

    // Submit row, disabled while the post-success reset is pending.
    {
        let focused = state.form.focus == Some(Field::Submit);
        let mut row = LineBuilder::new();
        row.push("  ");
        let label = if state.form.submit_enabled() {
            "[ Place order ]"
        } else {
            "[ ... ]"
        };
        let color = if !state.form.submit_enabled() {
            colors.dim
        } else if focused {
            colors.highlight
        } else {
            colors.accent
        };
        row.push_action(color, label, colors.reset, Action::Submit);
        emit_framed(lines, regions, colors, width, row);
    }

    if state.form.success_visible() {
        let mut success = LineBuilder::new();
        success.push("  ");
        let check = match colors.glyph_set {
            GlyphSet::Unicode => "✓",
            GlyphSet::Ascii => "+",
        };
        success.push_colored(
            colors.success,
            &truncate_display(
                &format!("{check} Thank you! Your order has been received."),
                width.saturating_sub(6),
            ),
            colors.reset,
        );
        emit_framed(lines, regions, colors, width, success);
    }

    lines.push(frame_bottom(colors, width));
}

/// Compose the whole page for the current state.
#[must_use]
pub(crate) fn render_page(state: &PageState, now: Instant, cols: u16) -> RenderedPage {
    let mut colors = state.colors();
    // The theme transition pulse tints every frame and rule until it expires.
    if state.effects.theme_pulse_active(now) {
        colors.border = colors.highlight;
    }
    let width = page_width(cols);
    let mut lines = Vec::new();
    let mut regions = Vec::new();

    masthead(&mut lines, &mut regions, state, &colors, width);
    blank(&mut lines);

    section_heading(&mut lines, &colors, width, "THE COLLECTION");
    for card in 0..PRODUCTS.len() {
        gallery_card(&mut lines, &mut regions, state, &colors, width, card, now);
        blank(&mut lines);
    }
    animation_controls(&mut lines, &mut regions, state, &colors);
    blank(&mut lines);

    faq_section(&mut lines, &mut regions, state, &colors, width);
    blank(&mut lines);

    form_section(&mut lines, &mut regions, state, &colors, width);
    blank(&mut lines);

    let mut footer = LineBuilder::new();
    footer.push("  ");
    footer.push_colored(
        colors.dim,
        "Omoro Studio - handmade in small batches since 2011.",
        colors.reset,
    );
    lines.push(footer.text);

    RenderedPage { lines, regions }
}

/// Floating back-to-top button placement in screen coordinates.
#[must_use]
pub(crate) fn back_to_top_rect(cols: u16, rows: u16) -> (u16, u16, u16) {
    let label_width = back_to_top_label(GlyphSet::Ascii).len() as u16;
    let col = cols.saturating_sub(label_width + 2);
    (rows.saturating_sub(2), col, col + label_width)
}

#[must_use]
pub(crate) fn back_to_top_label(glyphs: GlyphSet) -> &'static str {
    match glyphs {
        GlyphSet::Unicode => "[ ↑ ]",
        GlyphSet::Ascii => "[ ^ ]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{OverlayMode, PageState};
    use crate::theme::ColorDepth;
    use vitrine::storage::MemoryStore;

    fn page() -> PageState {
        PageState::new(
            Box::new(MemoryStore::new()),
            "Good evening, Guest! Welcome to our jewelry showcase.".to_string(),
            ColorDepth::Plain,
            true,
            None,
        )
    }

    fn rendered(state: &PageState) -> RenderedPage {
        render_page(state, Instant::now(), 80)
    }

    #[test]
    fn page_mentions_every_section() {
        let state = page();
        let page = rendered(&state);
        let text = page.lines.join("\n");
        assert!(text.contains("OMORO JEWELRY"));
        assert!(text.contains("THE COLLECTION"));
        assert!(text.contains("Gemstone Ring"));
        assert!(text.contains("Pearl Necklace"));
        assert!(text.contains("Diamond Earrings"));
        assert!(text.contains("QUESTIONS, ANSWERED"));
        assert!(text.contains("PLACE AN ORDER"));
        assert!(text.contains("[ Place order ]"));
        assert!(text.contains("Good evening, Guest"));
    }

    #[test]
    fn toggle_button_region_exists() {
        let state = page();
        let page = rendered(&state);
        assert!(page
            .regions
            .iter()
            .any(|region| region.action == Action::ToggleTheme));
    }

    #[test]
    fn every_product_has_counter_and_overlay_regions() {
        let state = page();
        let page = rendered(&state);
        for key in ProductKey::ALL {
            for action in [
                Action::CounterAdjust(key, Direction::Up),
                Action::CounterAdjust(key, Direction::Down),
                Action::OpenLightbox(key),
                Action::OpenCalculator(key),
            ] {
                assert!(
                    page.regions.iter().any(|region| region.action == action),
                    "missing region {action:?}"
                );
            }
        }
    }

    #[test]
    fn action_at_resolves_regions() {
        let state = page();
        let page = rendered(&state);
        let region = page
            .regions
            .iter()
            .find(|region| region.action == Action::ToggleTheme)
            .expect("toggle region");
        assert_eq!(
            page.action_at(region.row, region.col_start),
            Some(Action::ToggleTheme)
        );
        assert_eq!(page.action_at(region.row, region.col_end), None);
        assert_eq!(page.action_at(9_999, 0), None);
    }

    #[test]
    fn faq_answers_render_only_when_expanded() {
        let mut state = page();
        let collapsed_len = rendered(&state).lines.len();
        assert!(!rendered(&state).lines.join("\n").contains("Insured shipping"));

        state.faq.toggle(0);
        let expanded = rendered(&state);
        assert!(expanded.lines.join("\n").contains("Insured shipping"));
        assert_eq!(expanded.lines.len(), collapsed_len + 1);
    }

    #[test]
    fn invalid_field_shows_error_row() {
        let mut state = page();
        state.form.focus = Some(Field::Phone);
        state.form.insert_char('a');
        let text = rendered(&state).lines.join("\n");
        assert!(text.contains(Field::Phone.error_message()));
    }

    #[test]
    fn success_row_renders_after_submit() {
        let mut state = page();
        state.form.name = "Ada Lovelace".to_string();
        state.form.email = "ada@example.org".to_string();
        state.form.phone = "555-0100".to_string();
        state.form.product = Some(ProductKey::Ring);
        state.form.quantity = "2".to_string();
        state.submit_form(Instant::now(), 80);

        let text = rendered(&state).lines.join("\n");
        assert!(text.contains("Thank you! Your order has been received."));
        assert!(text.contains("[ ... ]"));
        assert!(!text.contains("[ Place order ]"));
        assert_eq!(state.overlay, OverlayMode::None);
    }

    #[test]
    fn counters_render_their_values() {
        let mut state = page();
        state.adjust_counter(ProductKey::Ring, Direction::Up, Instant::now());
        state.adjust_counter(ProductKey::Ring, Direction::Up, Instant::now());
        let text = rendered(&state).lines.join("\n");
        assert!(text.contains("Interest: 2"));
    }

    #[test]
    fn page_width_is_clamped() {
        assert_eq!(page_width(10), 44);
        assert_eq!(page_width(80), 72);
        assert_eq!(page_width(200), 72);
    }

    #[test]
    fn back_to_top_rect_sits_in_the_corner() {
        let (row, col_start, col_end) = back_to_top_rect(80, 24);
        assert_eq!(row, 22);
        assert!(col_end <= 80);
        assert!(col_start < col_end);
        assert_eq!(back_to_top_label(GlyphSet::Ascii), "[ ^ ]");
    }
}
