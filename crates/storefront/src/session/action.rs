//! Named cart commands.
//!
//! Pages and the CLI refer to cart operations by name (`add`, `remove`,
//! `increase`, `decrease`, `clear`) plus an argument. [`Action::parse`] maps
//! that pair to a typed command which [`super::Session::apply`] dispatches.

use core::fmt;

use thiserror::Error;

use shopfront_core::{IdParseError, ProductId};

use crate::cart::ClearConfirmation;

/// Errors that can occur when parsing a named action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The name does not match any action.
    #[error("unknown cart action: {0}")]
    Unknown(String),

    /// The action needs a product id and none was given.
    #[error("cart action '{0}' needs a product id")]
    MissingProductId(&'static str),

    /// The product id could not be parsed.
    #[error(transparent)]
    InvalidProductId(#[from] IdParseError),

    /// Clearing the cart was not confirmed.
    #[error("clearing the cart must be confirmed")]
    ConfirmationRequired,
}

/// A cart command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Add one unit of a cached catalog product.
    Add(ProductId),
    /// Remove a line item.
    Remove(ProductId),
    /// One more unit of a line item.
    Increase(ProductId),
    /// One fewer unit of a line item.
    Decrease(ProductId),
    /// Empty the cart.
    Clear(ClearConfirmation),
}

impl Action {
    /// Build an action from its name and argument.
    ///
    /// Id actions take the product id as the argument. `clear` takes the
    /// user's answer to the confirmation prompt (`true`, `yes`, `1` or
    /// `confirm`).
    ///
    /// # Errors
    ///
    /// Returns `ActionError` for unknown names, missing or malformed ids, and
    /// unconfirmed clears.
    pub fn parse(name: &str, argument: Option<&str>) -> Result<Self, ActionError> {
        let name = name.trim().to_ascii_lowercase();

        if name == "clear" {
            let confirmed = argument.is_some_and(is_affirmative);
            return ClearConfirmation::from_answer(confirmed)
                .map(Self::Clear)
                .ok_or(ActionError::ConfirmationRequired);
        }

        let (name, constructor): (&'static str, fn(ProductId) -> Self) = match name.as_str() {
            "add" => ("add", Self::Add),
            "remove" => ("remove", Self::Remove),
            "increase" => ("increase", Self::Increase),
            "decrease" => ("decrease", Self::Decrease),
            _ => return Err(ActionError::Unknown(name.clone())),
        };

        let raw = argument.ok_or(ActionError::MissingProductId(name))?;
        Ok(constructor(raw.parse()?))
    }

    /// The action's name, as accepted by [`Action::parse`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Increase(_) => "increase",
            Self::Decrease(_) => "decrease",
            Self::Clear(_) => "clear",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(id) | Self::Remove(id) | Self::Increase(id) | Self::Decrease(id) => {
                write!(f, "{} {id}", self.name())
            }
            Self::Clear(_) => f.write_str(self.name()),
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "on" | "confirm"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_actions() {
        assert_eq!(
            Action::parse("add", Some("3")).unwrap(),
            Action::Add(ProductId::new(3))
        );
        assert_eq!(
            Action::parse("Remove", Some("4")).unwrap(),
            Action::Remove(ProductId::new(4))
        );
        assert_eq!(
            Action::parse("increase", Some("5")).unwrap(),
            Action::Increase(ProductId::new(5))
        );
        assert_eq!(
            Action::parse("decrease", Some("6")).unwrap(),
            Action::Decrease(ProductId::new(6))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Action::parse("checkout", Some("1")).unwrap_err(),
            ActionError::Unknown("checkout".to_string())
        );
        assert_eq!(
            Action::parse("add", None).unwrap_err(),
            ActionError::MissingProductId("add")
        );
        assert!(matches!(
            Action::parse("add", Some("ten")).unwrap_err(),
            ActionError::InvalidProductId(_)
        ));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        assert_eq!(
            Action::parse("clear", None).unwrap_err(),
            ActionError::ConfirmationRequired
        );
        assert_eq!(
            Action::parse("clear", Some("false")).unwrap_err(),
            ActionError::ConfirmationRequired
        );
        assert_eq!(
            Action::parse("clear", Some("true")).unwrap(),
            Action::Clear(ClearConfirmation::confirmed())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::Add(ProductId::new(2)).to_string(), "add 2");
        assert_eq!(
            Action::Clear(ClearConfirmation::confirmed()).to_string(),
            "clear"
        );
    }
}
