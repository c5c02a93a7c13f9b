//! # Menu Selections
//!
//! Parsing of the numbered choices the operator types.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Main menu            Update submenu    │
//! │  ─────────            ──────────────    │
//! │  1. View cart         1. Name           │
//! │  2. Add item          2. Quantity       │
//! │  3. Update item       3. Price          │
//! │  4. Remove item                         │
//! │  5. Price breakdown                     │
//! │  6. Reset transaction                   │
//! │  7. Quit                                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Anything else is a [`MenuError`]: reported, then the menu is shown again.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Why a typed selection was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{choice} is not an option, choose 1 to {max}")]
    OutOfRange { choice: i64, max: u8 },
}

fn parse_selection(raw: &str, max: u8) -> Result<u8, MenuError> {
    let trimmed = raw.trim();
    let choice: i64 = trimmed
        .parse()
        .map_err(|_| MenuError::NotANumber(trimmed.to_string()))?;

    if choice < 1 || choice > i64::from(max) {
        return Err(MenuError::OutOfRange { choice, max });
    }
    Ok(choice as u8)
}

// =============================================================================
// Main Menu
// =============================================================================

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewCart,
    AddItem,
    UpdateItem,
    RemoveItem,
    PriceBreakdown,
    ResetTransaction,
    Quit,
}

impl MenuChoice {
    /// All entries in menu order.
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::ViewCart,
        MenuChoice::AddItem,
        MenuChoice::UpdateItem,
        MenuChoice::RemoveItem,
        MenuChoice::PriceBreakdown,
        MenuChoice::ResetTransaction,
        MenuChoice::Quit,
    ];

    /// Number the operator types for this entry.
    pub fn number(self) -> u8 {
        match self {
            MenuChoice::ViewCart => 1,
            MenuChoice::AddItem => 2,
            MenuChoice::UpdateItem => 3,
            MenuChoice::RemoveItem => 4,
            MenuChoice::PriceBreakdown => 5,
            MenuChoice::ResetTransaction => 6,
            MenuChoice::Quit => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ViewCart => "View cart",
            MenuChoice::AddItem => "Add item",
            MenuChoice::UpdateItem => "Update item",
            MenuChoice::RemoveItem => "Remove item",
            MenuChoice::PriceBreakdown => "Price breakdown",
            MenuChoice::ResetTransaction => "Reset transaction",
            MenuChoice::Quit => "Quit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl FromStr for MenuChoice {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = parse_selection(s, MenuChoice::ALL.len() as u8)?;
        Ok(MenuChoice::ALL[usize::from(n) - 1])
    }
}

// =============================================================================
// Update Submenu
// =============================================================================

/// Which field of a line item to update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Name,
    Quantity,
    Price,
}

impl UpdateField {
    pub const ALL: [UpdateField; 3] = [UpdateField::Name, UpdateField::Quantity, UpdateField::Price];

    pub fn label(self) -> &'static str {
        match self {
            UpdateField::Name => "Name",
            UpdateField::Quantity => "Quantity",
            UpdateField::Price => "Price",
        }
    }
}

impl FromStr for UpdateField {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = parse_selection(s, UpdateField::ALL.len() as u8)?;
        Ok(UpdateField::ALL[usize::from(n) - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_numbers_round_trip() {
        for choice in MenuChoice::ALL {
            let parsed: MenuChoice = choice.number().to_string().parse().unwrap();
            assert_eq!(parsed, choice);
        }
    }

    #[test]
    fn test_menu_accepts_padding() {
        assert_eq!(" 7 ".parse::<MenuChoice>(), Ok(MenuChoice::Quit));
    }

    #[test]
    fn test_menu_rejects_garbage() {
        assert_eq!(
            "abc".parse::<MenuChoice>(),
            Err(MenuError::NotANumber("abc".to_string()))
        );
        assert_eq!(
            "0".parse::<MenuChoice>(),
            Err(MenuError::OutOfRange { choice: 0, max: 7 })
        );
        assert_eq!(
            "8".parse::<MenuChoice>(),
            Err(MenuError::OutOfRange { choice: 8, max: 7 })
        );
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_update_field() {
        assert_eq!("2".parse::<UpdateField>(), Ok(UpdateField::Quantity));
        assert!("4".parse::<UpdateField>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(MenuChoice::PriceBreakdown.to_string(), "5. Price breakdown");
    }
}
