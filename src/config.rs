use crate::order::Currency;

/// Knobs for a form session. The defaults match the stock purchase order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Order currency after init and after reset.
    pub default_currency: Currency,
    /// Longest budget accepted by the validator.
    pub budget_max_digits: usize,
    /// bech32 human readable part for generated section ids.
    pub section_id_prefix: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::USD,
            budget_max_digits: 5,
            section_id_prefix: "req".into(),
        }
    }
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }
    pub fn set_budget_max_digits(mut self, digits: usize) -> Self {
        self.budget_max_digits = digits;
        self
    }
    pub fn set_section_id_prefix(mut self, prefix: &str) -> Self {
        self.section_id_prefix = prefix.into();
        self
    }
}
