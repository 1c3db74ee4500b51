use serde::{Deserialize, Serialize};

use super::messages::Locale;

/// Default upper bound on line items per document.
pub const DEFAULT_MAX_ITEMS: usize = 10_000;

/// Tunables for validation and totals.
///
/// Every field has a default matching current production behaviour, so a
/// host can deserialize a partial configuration:
///
/// ```
/// use facture::core::Settings;
///
/// let settings = Settings::default().allow_zero_unit_price(true);
/// assert!(settings.allow_zero_unit_price);
/// assert!(!settings.cap_fixed_discounts);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language for rendered messages.
    pub locale: Locale,
    /// Accept a unit price of exactly 0 (free or promotional lines).
    /// Negative prices are rejected either way.
    pub allow_zero_unit_price: bool,
    /// Clamp FIXED discounts to the amount they apply to, so line and
    /// document totals cannot go negative.
    pub cap_fixed_discounts: bool,
    /// Maximum number of line items accepted on one document.
    pub max_items: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::Fr,
            allow_zero_unit_price: false,
            cap_fixed_discounts: false,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl Settings {
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn allow_zero_unit_price(mut self, allow: bool) -> Self {
        self.allow_zero_unit_price = allow;
        self
    }

    pub fn cap_fixed_discounts(mut self, cap: bool) -> Self {
        self.cap_fixed_discounts = cap;
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = max;
        self
    }
}
