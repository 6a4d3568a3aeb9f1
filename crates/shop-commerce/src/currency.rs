//! Currency selection for a business's storefront.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::CurrencyCode;

/// Which currency prices are shown in, out of those the business offers.
///
/// Once `available` is non-empty, `selected` is always one of its members.
/// The first code in server order becomes the default when nothing is
/// selected; a selection made by the user is kept across refreshes as long as
/// the business still offers it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySelection {
    available: Vec<CurrencyCode>,
    selected: Option<CurrencyCode>,
    user_selected: bool,
}

impl CurrencySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available(&self) -> &[CurrencyCode] {
        &self.available
    }

    pub fn selected(&self) -> Option<&CurrencyCode> {
        self.selected.as_ref()
    }

    /// Whether the current selection was made by the user rather than defaulted.
    pub fn is_user_selected(&self) -> bool {
        self.user_selected
    }

    /// Replace the available list with a fresh server answer, then apply the
    /// default rule.
    pub fn refresh(&mut self, available: Vec<CurrencyCode>) {
        self.available = available;

        let stale = match &self.selected {
            Some(code) => !self.available.is_empty() && !self.available.contains(code),
            None => false,
        };
        if stale {
            self.selected = None;
            self.user_selected = false;
        }

        self.apply_default();
    }

    /// Select the first available code if nothing is selected yet.
    ///
    /// Returns `true` when a default was picked.
    pub fn apply_default(&mut self) -> bool {
        if self.selected.is_some() {
            return false;
        }
        match self.available.first() {
            Some(first) => {
                self.selected = Some(first.clone());
                self.user_selected = false;
                true
            }
            None => false,
        }
    }

    /// User override.
    ///
    /// Rejected when the business has published its list and the code is not
    /// on it. Before the list arrives any valid code is accepted.
    pub fn select(&mut self, code: CurrencyCode) -> Result<(), CommerceError> {
        if !self.available.is_empty() && !self.available.contains(&code) {
            return Err(CommerceError::UnknownCurrency {
                code: code.to_string(),
                available: self
                    .available
                    .iter()
                    .map(CurrencyCode::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        self.selected = Some(code);
        self.user_selected = true;
        Ok(())
    }
}
