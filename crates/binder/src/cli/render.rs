//! # Rendering Module
//!
//! Turns `CmdResult` pieces into terminal text. Layout math (widths, truncation,
//! padding) is Unicode aware through `unicode-width`; colors come from
//! [`super::styles`].
//!
//! Every public `render_*` function detects color support itself; the `_internal`
//! variants take `use_color` so tests can compare plain text.

use super::styles::{self, paint};
use binderapp::commands::{BinderView, CmdMessage, ListedBinder, MessageLevel, SlottedCard};
use binderapp::model::Card;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
pub const CELL_WIDTH: usize = 16;
pub const EMPTY_MARKER: &str = "·";

pub fn render_binder_list(binders: &[ListedBinder]) -> String {
    render_binder_list_internal(binders, None)
}

fn render_binder_list_internal(binders: &[ListedBinder], use_color: Option<bool>) -> String {
    if binders.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    for lb in binders {
        let b = &lb.binder;
        let index = format!("{:>3}. ", lb.position);
        let details = format!(
            "{}x{} · {} page(s) · {}/{} cards",
            b.rows,
            b.columns,
            b.total_pages,
            lb.card_count,
            b.total_slots()
        );

        let fixed = index.width() + details.width() + TIME_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&b.name, available);
        let padding = available.saturating_sub(name.width());

        out.push_str(&format!(
            "{}{}{}  {}{}\n",
            paint(&styles::INDEX, &index, use_color),
            paint(&styles::TITLE, &name, use_color),
            " ".repeat(padding),
            paint(&styles::MUTED, &details, use_color),
            paint(&styles::TIME, &format_time_ago(b.created_at), use_color),
        ));
    }
    out
}

/// Draw each page as a grid of card names. Without a page filter, pages with no
/// cards are summarized in one line instead of drawn.
pub fn render_binder_view(view: &BinderView) -> String {
    render_binder_view_internal(view, None)
}

fn render_binder_view_internal(view: &BinderView, use_color: Option<bool>) -> String {
    let binder = &view.binder;
    let geometry = binder.geometry();
    let mut out = format!(
        "{} {}\n",
        paint(&styles::TITLE, &binder.name, use_color),
        paint(
            &styles::MUTED,
            &format!(
                "({}x{}, {} page(s), {}/{} cards)",
                binder.rows,
                binder.columns,
                binder.total_pages,
                view.cards.len(),
                binder.total_slots()
            ),
            use_color
        )
    );

    // Without a filter only pages holding cards are drawn, so a binder with many
    // blank pages costs nothing extra.
    let pages: BTreeSet<usize> = match view.page {
        Some(page) => BTreeSet::from([page]),
        None => view
            .cards
            .iter()
            .map(|c| c.index / geometry.cards_per_page() + 1)
            .collect(),
    };
    let hidden = match view.page {
        Some(_) => 0,
        None => binder.total_pages.saturating_sub(pages.len()),
    };

    for page in pages {
        let range = geometry.page_range(page);
        let on_page: Vec<&Card> = view
            .cards
            .iter()
            .filter(|c| range.contains(&c.index))
            .collect();

        out.push('\n');
        out.push_str(&paint(&styles::INDEX, &format!("Page {}", page), use_color));
        out.push('\n');
        for row in 0..binder.rows {
            let mut line = String::from("  ");
            for col in 0..binder.columns {
                let index = range.start + row * binder.columns + col;
                let cell = match on_page.iter().find(|c| c.index == index) {
                    Some(card) => paint(
                        &styles::TITLE,
                        &pad_to_width(&truncate_to_width(&card.name, CELL_WIDTH), CELL_WIDTH),
                        use_color,
                    ),
                    None => paint(
                        &styles::EMPTY_SLOT,
                        &pad_to_width(EMPTY_MARKER, CELL_WIDTH),
                        use_color,
                    ),
                };
                line.push_str(&cell);
                line.push(' ');
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    if hidden > 0 {
        out.push('\n');
        out.push_str(&paint(
            &styles::MUTED,
            &format!("{} empty page(s) not shown", hidden),
            use_color,
        ));
        out.push('\n');
    }
    out
}

/// One line per card a command placed or moved.
pub fn render_affected_cards(cards: &[SlottedCard]) -> String {
    render_affected_cards_internal(cards, None)
}

fn render_affected_cards_internal(cards: &[SlottedCard], use_color: Option<bool>) -> String {
    let mut out = String::new();
    for sc in cards {
        let from = sc
            .previous_address
            .map(|old| format!("{} -> ", old))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {}  {}{}\n",
            truncate_to_width(&sc.card.name, CELL_WIDTH * 2),
            paint(&styles::MUTED, &from, use_color),
            paint(&styles::MOVED, &sc.address.to_string(), use_color),
        ));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, None)
}

fn render_messages_internal(messages: &[CmdMessage], use_color: Option<bool>) -> String {
    messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => &styles::INFO,
                MessageLevel::Success => &styles::SUCCESS,
                MessageLevel::Warning => &styles::WARNING,
                MessageLevel::Error => &styles::ERROR,
            };
            format!("{}\n", paint(style, &msg.content, use_color))
        })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use binderapp::address::SlotAddress;
    use binderapp::model::{Binder, Geometry};

    fn binder(rows: usize, columns: usize, pages: usize) -> Binder {
        Binder::new("Main".into(), Geometry::new(rows, columns, pages).unwrap())
    }

    #[test]
    fn test_render_empty_list() {
        assert!(render_binder_list_internal(&[], Some(false)).is_empty());
    }

    #[test]
    fn test_render_list_line() {
        let listed = vec![ListedBinder {
            position: 1,
            binder: binder(3, 3, 10),
            card_count: 4,
        }];
        let output = render_binder_list_internal(&listed, Some(false));
        assert!(output.contains("  1. Main"));
        assert!(output.contains("3x3 · 10 page(s) · 4/90 cards"));
        assert!(output.trim_end().ends_with("ago"));
    }

    #[test]
    fn test_render_view_grid() {
        let b = binder(2, 2, 2);
        let cards = vec![
            Card::new(b.id, "Pikachu".into(), 0),
            Card::new(b.id, "Mew".into(), 3),
        ];
        let view = BinderView {
            binder: b,
            cards,
            page: None,
        };
        let output = render_binder_view_internal(&view, Some(false));
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("Main (2x2, 2 page(s), 2/8 cards)"));
        assert!(output.contains("Page 1"));
        assert!(!output.contains("Page 2"));
        assert!(output.contains("1 empty page(s) not shown"));
        let first_row = lines.iter().find(|l| l.contains("Pikachu")).unwrap();
        assert!(first_row.contains(EMPTY_MARKER));
        let second_row = lines.iter().find(|l| l.contains("Mew")).unwrap();
        assert!(second_row.trim_start().starts_with(EMPTY_MARKER));
    }

    #[test]
    fn test_render_huge_binder_draws_only_filled_pages() {
        let b = binder(10, 10, 100_000_000);
        let cards = vec![Card::new(b.id, "Mew".into(), 350)];
        let view = BinderView {
            binder: b,
            cards,
            page: None,
        };
        let output = render_binder_view_internal(&view, Some(false));
        assert!(output.contains("Page 4\n"));
        assert!(output.contains("99999999 empty page(s) not shown"));
    }

    #[test]
    fn test_render_single_empty_page_is_drawn() {
        let view = BinderView {
            binder: binder(1, 2, 3),
            cards: vec![],
            page: Some(2),
        };
        let output = render_binder_view_internal(&view, Some(false));
        assert!(output.contains("Page 2"));
        assert!(!output.contains("not shown"));
    }

    #[test]
    fn test_render_affected_cards_shows_old_and_new_slot() {
        let b = binder(3, 3, 3);
        let card = Card::new(b.id, "Mew".into(), 9);
        let sc = SlottedCard {
            address: SlotAddress::from_index(9, &b.geometry()),
            card,
            previous_index: Some(0),
            previous_address: Some(SlotAddress::from_index(0, &b.geometry())),
        };
        let output = render_affected_cards_internal(&[sc], Some(false));
        assert!(output.contains("Mew"));
        assert!(output.contains("1:1 -> 2:1"));
    }

    #[test]
    fn test_render_messages_multiple() {
        let messages = vec![
            CmdMessage::info("Info message"),
            CmdMessage::warning("Warning message"),
            CmdMessage::error("Error message"),
        ];
        let output = render_messages_internal(&messages, Some(false));
        assert_eq!(output, "Info message\nWarning message\nError message\n");
    }

    #[test]
    fn test_render_with_color_includes_ansi() {
        let output = render_messages_internal(&[CmdMessage::success("done")], Some(true));
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Pikachu", 10), "Pikachu");
        assert_eq!(truncate_to_width("Charizard ex", 8), "Chariza…");
        assert_eq!(truncate_to_width("ピカチュウ", 5), "ピカ…");
    }
}
