//! Conversion from the base currency (USD) and price formatting
//!
//! Exchange rates are an explicit table handed to every conversion; the
//! forecasting core never sees currencies at all.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Currency {
    USD,
    OMR,
    SAR,
    AED,
    EUR,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::USD,
        Currency::OMR,
        Currency::SAR,
        Currency::AED,
        Currency::EUR,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::OMR => "ر.ع.",
            Currency::SAR => "ر.س",
            Currency::AED => "د.إ",
            Currency::EUR => "€",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::OMR => "Omani Rial",
            Currency::SAR => "Saudi Riyal",
            Currency::AED => "UAE Dirham",
            Currency::EUR => "Euro",
        }
    }

    /// Whether the symbol is written before the amount
    pub fn symbol_first(self) -> bool {
        matches!(self, Currency::USD | Currency::EUR)
    }
}

impl FromStr for Currency {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        Currency::ALL
            .iter()
            .copied()
            .find(|c| format!("{:?}", c).eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Units of each currency worth one USD
#[derive(Debug, Clone, PartialEq)]
pub struct Rates {
    per_usd: HashMap<Currency, f64>,
}

impl Default for Rates {
    fn default() -> Self {
        let per_usd = [
            (Currency::USD, 1.0),
            (Currency::OMR, 0.385),
            (Currency::SAR, 3.75),
            (Currency::AED, 3.67),
            (Currency::EUR, 0.92),
        ]
        .into_iter()
        .collect();
        Self { per_usd }
    }
}

impl Rates {
    /// Rate for `currency`, `1.0` if the table has none
    pub fn rate(&self, currency: Currency) -> f64 {
        self.per_usd.get(&currency).copied().unwrap_or(1.0)
    }

    pub fn convert(&self, usd: f64, currency: Currency) -> f64 {
        usd * self.rate(currency)
    }
}

/// `usd` shown in `currency` with two decimals and the currency symbol
pub fn format_price(usd: f64, currency: Currency, rates: &Rates) -> String {
    let converted = rates.convert(usd, currency);
    if currency.symbol_first() {
        format!("{}{:.2}", currency.symbol(), converted)
    } else {
        format!("{:.2} {}", converted, currency.symbol())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn conversion() {
        let rates = Rates::default();
        assert_relative_eq!(rates.convert(10.0, Currency::USD), 10.0);
        assert_relative_eq!(rates.convert(10.0, Currency::SAR), 37.5);
        assert_relative_eq!(rates.convert(100.0, Currency::OMR), 38.5);
        assert_relative_eq!(rates.convert(10.0, Currency::EUR), 9.2);
        let missing = Rates {
            per_usd: HashMap::new(),
        };
        assert_relative_eq!(missing.convert(10.0, Currency::AED), 10.0);
    }

    #[test]
    fn formatting() {
        let rates = Rates::default();
        assert_eq!(format_price(15.99, Currency::USD, &rates), "$15.99");
        assert_eq!(format_price(10.0, Currency::EUR, &rates), "€9.20");
        assert_eq!(format_price(10.0, Currency::SAR, &rates), "37.50 ر.س");
        assert_eq!(format_price(10.0, Currency::AED, &rates), "36.70 د.إ");
    }

    #[test]
    fn parsing() {
        assert_eq!("usd".parse::<Currency>(), Ok(Currency::USD));
        assert_eq!("OMR".parse::<Currency>(), Ok(Currency::OMR));
        assert_eq!("GBP".parse::<Currency>(), Err(()));
    }
}
