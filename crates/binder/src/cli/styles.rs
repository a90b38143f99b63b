//! Styles for the binder CLI.
//!
//! Rendering code refers to styles by what they mark (an index, a time, an empty
//! slot), never by color. All styles are built once through `once_cell::sync::Lazy`.

use console::Style;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static EMPTY_SLOT: Lazy<Style> = Lazy::new(|| Style::new().color256(240));
pub static MOVED: Lazy<Style> = Lazy::new(|| Style::new().cyan());

pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());

/// Apply `style`, with color forced on or off when `use_color` is set and
/// detected from the terminal otherwise.
pub fn paint(style: &Style, text: &str, use_color: Option<bool>) -> String {
    match use_color {
        Some(enabled) => style
            .clone()
            .force_styling(enabled)
            .apply_to(text)
            .to_string(),
        None => style.apply_to(text).to_string(),
    }
}
