use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::ops;
use std::str::FromStr;

use crate::lib::date::Date;

/// Monetary value in hundredths of the base currency (USD)
///
/// Sums saturate instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Amount(pub i64);

impl Amount {
    /// Largest price a listing may declare, ten million USD
    pub const MAX_PRICE: Amount = Amount(1_000_000_000);

    /// `usd` rounded to the cent, `None` if negative, not finite or above `MAX_PRICE`
    pub fn from_usd(usd: f64) -> Option<Self> {
        if usd.is_finite() && (0.0..=Self::MAX_PRICE.to_f64()).contains(&usd) {
            Some(Amount((usd * 100.0).round() as i64))
        } else {
            None
        }
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.0.abs() / 100, self.0.abs() % 100)
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl ops::Add for Amount {
    type Output = Self;
    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount(0), |a, b| a + b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Entertainment = 0,
    Productivity,
    Health,
    Education,
    News,
    Music,
    Cloud,
    Gaming,
    Shopping,
    Transport,
    Utilities,
    Other,
}

impl Category {
    pub const COUNT: usize = 12;

    pub fn id(self) -> &'static str {
        use Category::*;
        match self {
            Entertainment => "entertainment",
            Productivity => "productivity",
            Health => "health",
            Education => "education",
            News => "news",
            Music => "music",
            Cloud => "cloud",
            Gaming => "gaming",
            Shopping => "shopping",
            Transport => "transport",
            Utilities => "utilities",
            Other => "other",
        }
    }

    /// Display color used by charts
    pub fn color(self) -> &'static str {
        use Category::*;
        match self {
            Entertainment => "#FF6B6B",
            Productivity => "#4ECDC4",
            Health => "#45B7D1",
            Education => "#96CEB4",
            News => "#FFEAA7",
            Music => "#DFE6E9",
            Cloud => "#74B9FF",
            Gaming => "#A29BFE",
            Shopping => "#FD79A8",
            Transport => "#FDCB6E",
            Utilities => "#6C5CE7",
            Other => "#B2BEC3",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl FromStr for Category {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        (0..Category::COUNT)
            .filter_map(Category::from_usize)
            .find(|c| c.id() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    ApplePay,
    GooglePay,
    BankAccount,
    Other,
}

impl FromStr for PaymentMethod {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        use PaymentMethod::*;
        Ok(match s {
            "credit_card" => CreditCard,
            "debit_card" => DebitCard,
            "paypal" => Paypal,
            "apple_pay" => ApplePay,
            "google_pay" => GooglePay,
            "bank_account" => BankAccount,
            "other" => Other,
            _ => return Err(()),
        })
    }
}

/// How often a subscription is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Yearly,
}

impl Default for BillingCycle {
    fn default() -> Self {
        BillingCycle::Monthly
    }
}

impl FromStr for BillingCycle {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "monthly" => Ok(BillingCycle::Monthly),
            "quarterly" => Ok(BillingCycle::Quarterly),
            "yearly" => Ok(BillingCycle::Yearly),
            _ => Err(()),
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::Yearly => "yearly",
        };
        write!(f, "{}", s)
    }
}

/// A recurring service
///
/// `price` is per period of the tracker (monthly), in USD.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub name: String,
    pub price: Amount,
    /// day of the month in 1..=31
    pub due_day: u8,
    pub category: Category,
    pub cycle: BillingCycle,
    pub method: Option<PaymentMethod>,
    pub start: Option<Date>,
}

/// Fixtures for tests, listings build subscriptions field by field
#[cfg(test)]
impl Subscription {
    pub fn new(name: &str, price: Amount, due_day: u8) -> Self {
        Self {
            name: name.to_string(),
            price,
            due_day,
            category: Category::default(),
            cycle: BillingCycle::default(),
            method: None,
            start: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_cycle(mut self, cycle: BillingCycle) -> Self {
        self.cycle = cycle;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    DueDay,
}

impl FromStr for SortKey {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "name" => Ok(SortKey::Name),
            "price" => Ok(SortKey::Price),
            "due" => Ok(SortKey::DueDay),
            _ => Err(()),
        }
    }
}

impl SortKey {
    fn compare(self, a: &Subscription, b: &Subscription) -> Ordering {
        match self {
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::DueDay => a.due_day.cmp(&b.due_day),
        }
    }
}

/// Stable sort of `subs` by `key`
pub fn sort(subs: &mut [Subscription], key: SortKey, descending: bool) {
    subs.sort_by(|a, b| {
        let ord = key.compare(a, b);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}
