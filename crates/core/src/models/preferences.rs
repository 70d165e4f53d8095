use serde::{Deserialize, Serialize};

/// UI preferences. Not domain state: losing them only resets the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Hide monetary values behind a mask
    pub hide_values: bool,

    pub sidebar_collapsed: bool,

    /// Whether the user linked a Telegram account for notifications
    pub telegram_linked: bool,
}

impl Preferences {
    pub fn toggle_values(&mut self) -> bool {
        self.hide_values = !self.hide_values;
        self.hide_values
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }

    /// Format an amount for display, masked when values are hidden.
    pub fn display_amount(&self, value: f64, currency: &str) -> String {
        mask_amount(value, currency, !self.hide_values)
    }
}

/// `"USD 1,234.50"` when visible, `"USD ****"` otherwise.
pub fn mask_amount(value: f64, currency: &str, visible: bool) -> String {
    if !visible {
        return format!("{currency} ****");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{currency} {sign}{grouped}.{frac_part}")
}
