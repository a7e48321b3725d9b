//! Command line configuration

use clap::{App, Arg, ArgMatches};
use thiserror::Error;

use crate::lib::{
    currency::{Currency, Rates},
    date::{Date, DateError},
    locale::Language,
    subscription::SortKey,
    summary::ViewPeriod,
};

pub const DEFAULT_FILE: &str = "subscriptions.sub";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown currency '{0}', expected one of USD, OMR, SAR, AED, EUR")]
    Currency(String),
    #[error("unknown language '{0}', expected one of en, ar, de")]
    Language(String),
    #[error("unknown view period '{0}', expected one of weekly, monthly, yearly")]
    View(String),
    #[error("unknown sort key '{0}', expected one of name, price, due")]
    Sort(String),
    #[error("invalid reference date: {0}")]
    Today(#[from] DateError),
}

/// Everything the command line can choose
#[derive(Debug, Clone)]
pub struct Settings {
    pub file: String,
    pub currency: Currency,
    pub rates: Rates,
    pub language: Language,
    pub view: ViewPeriod,
    pub sort: SortKey,
    pub descending: bool,
    /// reference date for payment projection
    pub today: Date,
    /// where to write the SVG plot, if anywhere
    pub plot: Option<String>,
    pub json: bool,
    /// fabricate a history when the listing has none
    pub synthetic: bool,
}

fn app() -> App<'static, 'static> {
    App::new("subtrack")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("FILE")
                .help("Listing of subscriptions and past totals")
                .index(1),
        )
        .arg(
            Arg::with_name("currency")
                .long("currency")
                .takes_value(true)
                .value_name("CUR")
                .help("Currency prices are shown in [default: USD]"),
        )
        .arg(
            Arg::with_name("lang")
                .long("lang")
                .takes_value(true)
                .value_name("LANG")
                .help("Display language: en, ar, de [default: en]"),
        )
        .arg(
            Arg::with_name("view")
                .long("view")
                .takes_value(true)
                .value_name("PERIOD")
                .help("Period of the headline total: weekly, monthly, yearly [default: monthly]"),
        )
        .arg(
            Arg::with_name("sort")
                .long("sort")
                .takes_value(true)
                .value_name("KEY")
                .help("Order of the subscriptions: name, price, due [default: name]"),
        )
        .arg(
            Arg::with_name("desc")
                .long("desc")
                .help("Sort in descending order"),
        )
        .arg(
            Arg::with_name("today")
                .long("today")
                .takes_value(true)
                .value_name("YYYY-Mmm-DD")
                .help("Reference date for payment projection [default: current date]"),
        )
        .arg(
            Arg::with_name("plot")
                .long("plot")
                .takes_value(true)
                .value_name("PATH")
                .help("Write an SVG plot of history and predictions"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Print the forecast as JSON instead of tables"),
        )
        .arg(
            Arg::with_name("synthetic-history")
                .long("synthetic-history")
                .help("Fabricate six past periods when the listing has no history"),
        )
}

impl Settings {
    /// Read the process arguments, exits on `--help` or clap usage errors
    pub fn from_args() -> Result<Self, SettingsError> {
        Self::from_matches(&app().get_matches(), Date::today)
    }

    #[cfg(test)]
    fn parse_from<I>(args: I, today: Date) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self::from_matches(&app().get_matches_from(args), || today)
    }

    fn from_matches<F>(matches: &ArgMatches, today: F) -> Result<Self, SettingsError>
    where
        F: FnOnce() -> Date,
    {
        let currency = match matches.value_of("currency") {
            Some(s) => s
                .parse::<Currency>()
                .map_err(|()| SettingsError::Currency(s.to_string()))?,
            None => Currency::USD,
        };
        let language = match matches.value_of("lang") {
            Some(s) => s
                .parse::<Language>()
                .map_err(|()| SettingsError::Language(s.to_string()))?,
            None => Language::default(),
        };
        let view = match matches.value_of("view") {
            Some(s) => s
                .parse::<ViewPeriod>()
                .map_err(|()| SettingsError::View(s.to_string()))?,
            None => ViewPeriod::default(),
        };
        let sort = match matches.value_of("sort") {
            Some(s) => s
                .parse::<SortKey>()
                .map_err(|()| SettingsError::Sort(s.to_string()))?,
            None => SortKey::Name,
        };
        let today = match matches.value_of("today") {
            Some(s) => s.parse::<Date>()?,
            None => today(),
        };
        Ok(Self {
            file: matches.value_of("FILE").unwrap_or(DEFAULT_FILE).to_string(),
            currency,
            rates: Rates::default(),
            language,
            view,
            sort,
            descending: matches.is_present("desc"),
            today,
            plot: matches.value_of("plot").map(String::from),
            json: matches.is_present("json"),
            synthetic: matches.is_present("synthetic-history"),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::date::Month;

    fn today() -> Date {
        Date::from(2024, Month::Mar, 15).unwrap()
    }

    #[test]
    fn defaults() {
        let s = Settings::parse_from(vec!["subtrack"], today()).unwrap();
        assert_eq!(s.file, DEFAULT_FILE);
        assert_eq!(s.currency, Currency::USD);
        assert_eq!(s.language, Language::En);
        assert_eq!(s.view, ViewPeriod::Monthly);
        assert_eq!(s.sort, SortKey::Name);
        assert!(!s.descending && !s.json && !s.synthetic);
        assert_eq!(s.today, today());
        assert_eq!(s.plot, None);
    }

    #[test]
    fn all_flags() {
        let s = Settings::parse_from(
            vec![
                "subtrack",
                "mine.sub",
                "--currency",
                "sar",
                "--lang",
                "ar",
                "--view",
                "yearly",
                "--sort",
                "price",
                "--desc",
                "--today",
                "2023-Dec-31",
                "--plot",
                "out.svg",
                "--json",
                "--synthetic-history",
            ],
            today(),
        )
        .unwrap();
        assert_eq!(s.file, "mine.sub");
        assert_eq!(s.currency, Currency::SAR);
        assert_eq!(s.language, Language::Ar);
        assert_eq!(s.view, ViewPeriod::Yearly);
        assert_eq!(s.sort, SortKey::Price);
        assert!(s.descending && s.json && s.synthetic);
        assert_eq!(s.today, Date::from(2023, Month::Dec, 31).unwrap());
        assert_eq!(s.plot.as_deref(), Some("out.svg"));
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(matches!(
            Settings::parse_from(vec!["subtrack", "--currency", "GBP"], today()),
            Err(SettingsError::Currency(c)) if c == "GBP"
        ));
        assert!(matches!(
            Settings::parse_from(vec!["subtrack", "--lang", "fr"], today()),
            Err(SettingsError::Language(_))
        ));
        assert!(matches!(
            Settings::parse_from(vec!["subtrack", "--view", "daily"], today()),
            Err(SettingsError::View(_))
        ));
        assert!(matches!(
            Settings::parse_from(vec!["subtrack", "--sort", "category"], today()),
            Err(SettingsError::Sort(_))
        ));
        assert!(matches!(
            Settings::parse_from(vec!["subtrack", "--today", "2023-Feb-30"], today()),
            Err(SettingsError::Today(_))
        ));
    }
}
