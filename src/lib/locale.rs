//! Display strings for the supported languages
//!
//! Tables only cover what the command line prints. Strings that were never
//! translated fall back to English.

use std::str::FromStr;

use crate::lib::{
    date::Month,
    subscription::{Category, PaymentMethod},
    trend::Trend,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Ar,
    De,
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl FromStr for Language {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            "de" => Ok(Language::De),
            _ => Err(()),
        }
    }
}

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_AR: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر",
    "نوفمبر", "ديسمبر",
];
const MONTHS_DE: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];

/// Labels printed around the tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Title,
    TotalExpenses,
    Name,
    Price,
    DueDate,
    Next,
    Weekly,
    Monthly,
    Yearly,
    CategoryBreakdown,
    Forecast,
    Insights,
    MostExpensive,
    Cheapest,
    TopCategory,
    OfTotal,
    Average,
    PerYear,
    Recommendations,
    NoSubscriptions,
}

impl Language {
    /// Written right to left
    pub fn is_rtl(self) -> bool {
        self == Language::Ar
    }

    pub fn month(self, month: Month) -> &'static str {
        let table = match self {
            Language::En => &MONTHS_EN,
            Language::Ar => &MONTHS_AR,
            Language::De => &MONTHS_DE,
        };
        table[month as usize]
    }

    pub fn text(self, text: Text) -> &'static str {
        use Text::*;
        match (self, text) {
            (Language::Ar, Title) => "الاشتراكات",
            (Language::Ar, TotalExpenses) => "إجمالي المصروفات الشهرية",
            (Language::Ar, Name) => "الاسم",
            (Language::Ar, Price) => "السعر",
            (Language::Ar, DueDate) => "تاريخ الاستحقاق",
            (Language::Ar, Next) => "التالي",
            (Language::Ar, Weekly) => "أسبوعي",
            (Language::Ar, Monthly) => "شهري",
            (Language::Ar, Yearly) => "سنوي",
            (Language::Ar, NoSubscriptions) => "لا توجد اشتراكات بعد",
            (Language::De, Title) => "Abonnements",
            (Language::De, TotalExpenses) => "Monatliche Gesamtausgaben",
            (Language::De, Name) => "Name",
            (Language::De, Price) => "Preis",
            (Language::De, DueDate) => "Fälligkeitsdatum",
            (Language::De, Next) => "Weiter",
            (Language::De, Weekly) => "Wöchentlich",
            (Language::De, Monthly) => "Monatlich",
            (Language::De, Yearly) => "Jährlich",
            (Language::De, NoSubscriptions) => "Noch keine Abonnements",
            (_, text) => english(text),
        }
    }

    pub fn category(self, category: Category) -> &'static str {
        use Category::*;
        match self {
            Language::En => match category {
                Entertainment => "Entertainment",
                Productivity => "Productivity",
                Health => "Health & Fitness",
                Education => "Education",
                News => "News & Media",
                Music => "Music",
                Cloud => "Cloud Storage",
                Gaming => "Gaming",
                Shopping => "Shopping",
                Transport => "Transport",
                Utilities => "Utilities",
                Other => "Other",
            },
            Language::Ar => match category {
                Entertainment => "ترفيه",
                Productivity => "إنتاجية",
                Health => "صحة ولياقة",
                Education => "تعليم",
                News => "أخبار ووسائط",
                Music => "موسيقى",
                Cloud => "تخزين سحابي",
                Gaming => "ألعاب",
                Shopping => "تسوق",
                Transport => "نقل",
                Utilities => "مرافق",
                Other => "أخرى",
            },
            Language::De => match category {
                Entertainment => "Unterhaltung",
                Productivity => "Produktivität",
                Health => "Gesundheit",
                Education => "Bildung",
                News => "Nachrichten",
                Music => "Musik",
                Cloud => "Cloud-Speicher",
                Gaming => "Spiele",
                Shopping => "Einkaufen",
                Transport => "Transport",
                Utilities => "Nebenkosten",
                Other => "Andere",
            },
        }
    }

    pub fn payment_method(self, method: PaymentMethod) -> &'static str {
        use PaymentMethod::*;
        match (self, method) {
            (_, Paypal) => "PayPal",
            (Language::En, CreditCard) => "Credit Card",
            (Language::En, DebitCard) => "Debit Card",
            (Language::En, ApplePay) => "Apple Pay",
            (Language::En, GooglePay) => "Google Pay",
            (Language::En, BankAccount) => "Bank Account",
            (Language::En, Other) => "Other",
            (Language::Ar, CreditCard) => "بطاقة ائتمان",
            (Language::Ar, DebitCard) => "بطاقة خصم",
            (Language::Ar, ApplePay) => "آبل باي",
            (Language::Ar, GooglePay) => "جوجل باي",
            (Language::Ar, BankAccount) => "حساب بنكي",
            (Language::Ar, Other) => "أخرى",
            (Language::De, CreditCard) => "Kreditkarte",
            (Language::De, DebitCard) => "Debitkarte",
            (Language::De, ApplePay) => "Apple Pay",
            (Language::De, GooglePay) => "Google Pay",
            (Language::De, BankAccount) => "Bankkonto",
            (Language::De, Other) => "Andere",
        }
    }

    /// Short sentence describing a trend
    ///
    /// Histories without a usable trend read as stable.
    pub fn trend_message(self, trend: Trend) -> &'static str {
        use Trend::*;
        match (self, trend) {
            (Language::En, IncreasingRapidly) => "Spending increasing rapidly",
            (Language::En, Increasing) => "Spending gradually increasing",
            (Language::En, Decreasing) => "Spending decreasing",
            (Language::En, DecreasingRapidly) => "Spending decreasing significantly",
            (Language::En, Stable | NoTrend | InsufficientData) => "Spending remains stable",
            (Language::Ar, IncreasingRapidly) => "الإنفاق يتزايد بسرعة",
            (Language::Ar, Increasing) => "الإنفاق يتزايد تدريجيا",
            (Language::Ar, Decreasing) => "الإنفاق يتناقص",
            (Language::Ar, DecreasingRapidly) => "الإنفاق يتناقص بشكل ملحوظ",
            (Language::Ar, Stable | NoTrend | InsufficientData) => "الإنفاق مستقر",
            (Language::De, IncreasingRapidly) => "Ausgaben steigen schnell",
            (Language::De, Increasing) => "Ausgaben steigen allmählich",
            (Language::De, Decreasing) => "Ausgaben sinken",
            (Language::De, DecreasingRapidly) => "Ausgaben sinken deutlich",
            (Language::De, Stable | NoTrend | InsufficientData) => "Ausgaben bleiben stabil",
        }
    }
}

fn english(text: Text) -> &'static str {
    use Text::*;
    match text {
        Title => "Subscriptions",
        TotalExpenses => "Total Monthly Expenses",
        Name => "Name",
        Price => "Price",
        DueDate => "Due Date",
        Next => "Next",
        Weekly => "Weekly",
        Monthly => "Monthly",
        Yearly => "Yearly",
        CategoryBreakdown => "Category Breakdown",
        Forecast => "Forecast",
        Insights => "Insights",
        MostExpensive => "Most Expensive",
        Cheapest => "Most Affordable",
        TopCategory => "Top Category",
        OfTotal => "of total",
        Average => "Average per Subscription",
        PerYear => "per year",
        Recommendations => "Smart Recommendations",
        NoSubscriptions => "No subscriptions yet",
    }
}

/// Replace Arabic-Indic (and Eastern Arabic-Indic) digits by ASCII digits
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn months() {
        assert_eq!(Language::En.month(Month::Mar), "Mar");
        assert_eq!(Language::De.month(Month::Mar), "Mär");
        assert_eq!(Language::De.month(Month::Oct), "Okt");
        assert_eq!(Language::Ar.month(Month::Jan), "يناير");
    }

    #[test]
    fn fallback_to_english() {
        assert_eq!(Language::De.text(Text::Next), "Weiter");
        assert_eq!(Language::De.text(Text::Forecast), "Forecast");
        assert_eq!(Language::Ar.text(Text::PerYear), "per year");
    }

    #[test]
    fn names() {
        assert_eq!(Language::En.category(Category::Health), "Health & Fitness");
        assert_eq!(Language::De.category(Category::Utilities), "Nebenkosten");
        assert_eq!(Language::Ar.payment_method(PaymentMethod::Paypal), "PayPal");
        assert_eq!(Language::De.payment_method(PaymentMethod::BankAccount), "Bankkonto");
    }

    #[test]
    fn trend_messages() {
        assert_eq!(
            Language::En.trend_message(Trend::InsufficientData),
            Language::En.trend_message(Trend::Stable)
        );
        assert_eq!(Language::En.trend_message(Trend::Increasing), "Spending gradually increasing");
        assert_eq!(Language::De.trend_message(Trend::NoTrend), "Ausgaben bleiben stabil");
        assert_eq!(Language::Ar.trend_message(Trend::Decreasing), "الإنفاق يتناقص");
        assert_ne!(
            Language::De.trend_message(Trend::DecreasingRapidly),
            Language::En.trend_message(Trend::DecreasingRapidly)
        );
    }

    #[test]
    fn digits() {
        assert_eq!(normalize_digits("١٥.٩٩"), "15.99");
        assert_eq!(normalize_digits("due ۳۱;"), "due 31;");
        assert_eq!(normalize_digits("plain 42"), "plain 42");
        assert!(Language::Ar.is_rtl());
        assert!(!Language::De.is_rtl());
    }
}
