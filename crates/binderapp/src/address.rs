//! # Addressing Pages, Slots and Binders
//!
//! Internally a card lives at a zero-based slot index. Nobody wants to type those, so
//! user input uses 1-based numbers:
//!
//! - **Absolute slot**: `N` is slot N counted from the first slot of page 1.
//! - **Page and slot**: `P:S` is slot S on page P.
//! - **Page**: a single page number `P`.
//! - **Binder**: its position in the listing (`1`, `2`, ...) or its name.
//!
//! Page moves work on exactly one page. Input such as `1-3` or `1,2` is rejected
//! with [`BinderError::MultiPageMove`] instead of being guessed at.

use std::str::FromStr;

use crate::error::{BinderError, Result};
use crate::model::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAddress {
    Absolute(usize),
    PageSlot { page: usize, slot: usize },
}

impl SlotAddress {
    /// Resolve to a zero-based index inside `geometry`.
    pub fn to_index(&self, geometry: &Geometry) -> Result<usize> {
        let index = match *self {
            SlotAddress::Absolute(n) => n
                .checked_sub(1)
                .ok_or_else(|| BinderError::Api("slot numbers start at 1".to_string()))?,
            SlotAddress::PageSlot { page, slot } => {
                geometry.check_page(page)?;
                if slot == 0 || slot > geometry.cards_per_page() {
                    return Err(BinderError::Api(format!(
                        "Page {} only has {} slots",
                        page,
                        geometry.cards_per_page()
                    )));
                }
                (page - 1) * geometry.cards_per_page() + (slot - 1)
            }
        };
        geometry.check_index(index)?;
        Ok(index)
    }

    /// The `P:S` address of a zero-based index.
    pub fn from_index(index: usize, geometry: &Geometry) -> Self {
        let cpp = geometry.cards_per_page();
        SlotAddress::PageSlot {
            page: index / cpp + 1,
            slot: index % cpp + 1,
        }
    }
}

impl std::fmt::Display for SlotAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotAddress::Absolute(n) => write!(f, "{}", n),
            SlotAddress::PageSlot { page, slot } => write!(f, "{}:{}", page, slot),
        }
    }
}

fn parse_positive(s: &str, what: &str) -> Result<usize> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| BinderError::Api(format!("Invalid {}: '{}'", what, s)))?;
    if n == 0 {
        return Err(BinderError::Api(format!("{} numbers start at 1", what)));
    }
    Ok(n)
}

impl FromStr for SlotAddress {
    type Err = BinderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((page, slot)) => Ok(SlotAddress::PageSlot {
                page: parse_positive(page, "page")?,
                slot: parse_positive(slot, "slot")?,
            }),
            None => Ok(SlotAddress::Absolute(parse_positive(s, "slot")?)),
        }
    }
}

/// Parse a single page number, refusing ranges and lists.
pub fn parse_page(s: &str) -> Result<usize> {
    let trimmed = s.trim();
    if trimmed.contains('-') || trimmed.contains(',') || trimmed.contains(' ') {
        return Err(BinderError::MultiPageMove(trimmed.to_string()));
    }
    parse_positive(trimmed, "page")
}

/// How the user picked a binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinderSelector {
    Position(usize),
    Name(String),
}

impl BinderSelector {
    pub fn parse(s: &str) -> Self {
        match s.trim().parse::<usize>() {
            Ok(n) if n > 0 => BinderSelector::Position(n),
            _ => BinderSelector::Name(s.trim().to_string()),
        }
    }
}

impl std::fmt::Display for BinderSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinderSelector::Position(n) => write!(f, "{}", n),
            BinderSelector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry::new(3, 3, 2).unwrap()
    }

    #[test]
    fn parse_absolute_and_page_slot() {
        assert_eq!(
            "5".parse::<SlotAddress>().unwrap(),
            SlotAddress::Absolute(5)
        );
        assert_eq!(
            "2:3".parse::<SlotAddress>().unwrap(),
            SlotAddress::PageSlot { page: 2, slot: 3 }
        );
        assert!("0".parse::<SlotAddress>().is_err());
        assert!("2:0".parse::<SlotAddress>().is_err());
        assert!("abc".parse::<SlotAddress>().is_err());
    }

    #[test]
    fn resolve_to_index() {
        let g = geometry();
        assert_eq!(SlotAddress::Absolute(1).to_index(&g).unwrap(), 0);
        assert_eq!(SlotAddress::Absolute(18).to_index(&g).unwrap(), 17);
        assert_eq!(
            SlotAddress::PageSlot { page: 2, slot: 1 }
                .to_index(&g)
                .unwrap(),
            9
        );
        assert!(SlotAddress::Absolute(19).to_index(&g).is_err());
        assert!(SlotAddress::PageSlot { page: 3, slot: 1 }
            .to_index(&g)
            .is_err());
        assert!(SlotAddress::PageSlot { page: 1, slot: 10 }
            .to_index(&g)
            .is_err());
    }

    #[test]
    fn from_index_round_trips() {
        let g = geometry();
        for index in 0..g.total_slots() {
            assert_eq!(SlotAddress::from_index(index, &g).to_index(&g).unwrap(), index);
        }
        assert_eq!(SlotAddress::from_index(10, &g).to_string(), "2:2");
    }

    #[test]
    fn page_ranges_are_rejected() {
        assert_eq!(parse_page("3").unwrap(), 3);
        assert!(matches!(
            parse_page("1-3"),
            Err(BinderError::MultiPageMove(_))
        ));
        assert!(matches!(
            parse_page("1,2"),
            Err(BinderError::MultiPageMove(_))
        ));
        assert!(parse_page("0").is_err());
    }

    #[test]
    fn binder_selector_parsing() {
        assert_eq!(BinderSelector::parse("2"), BinderSelector::Position(2));
        assert_eq!(
            BinderSelector::parse("Trade Binder"),
            BinderSelector::Name("Trade Binder".into())
        );
        assert_eq!(
            BinderSelector::parse("0"),
            BinderSelector::Name("0".into())
        );
    }
}
