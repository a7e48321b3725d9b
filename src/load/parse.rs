//! Convert the contents of a listing into subscriptions and a history

#![allow(clippy::upper_case_acronyms)]

use pest::Parser;
use pest_derive::*;
use tracing::debug;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;
/// Wrapper around Pest's `Pairs`
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

use crate::lib::{
    date::{Date, Month},
    history::History,
    subscription::{Amount, BillingCycle, Category, PaymentMethod, Subscription},
};
use crate::load::error;

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/subtrack.pest"]
pub struct ListingParser;

/// Everything a listing file declares
#[derive(Debug, Default)]
pub struct Listing {
    pub subscriptions: Vec<Subscription>,
    /// `None` if the file has no `history` item
    pub history: Option<History>,
}

/// A field that may be given at most once
struct Once<'i, T> {
    name: &'i str,
    hint: &'i str,
    loc: &'i error::Loc<'i>,
    /// at least one definition was encountered
    defined: bool,
    /// all definitions so far held a correct value
    valid: bool,
    data: Option<T>,
}

impl<'i, T> Once<'i, T> {
    fn new(name: &'i str, hint: &'i str, loc: &'i error::Loc<'i>) -> Self {
        Self {
            name,
            hint,
            loc,
            defined: false,
            valid: true,
            data: None,
        }
    }

    /// `None` stands for a definition whose value was already reported as invalid
    fn try_set(&mut self, val: Option<T>, errs: &mut error::Record) {
        if self.defined {
            errs.make("Duplicate field definition")
                .span(self.loc, format!("attempt to override {}", self.name))
                .text("Each field may only be defined once")
                .hint("remove one of the field definitions");
            self.valid = false;
        }
        self.defined = true;
        match val {
            Some(val) => self.data = Some(val),
            None => self.valid = false,
        }
    }

    /// Required field
    fn try_get(self, errs: &mut error::Record) -> Option<T> {
        if !self.valid {
            return None;
        }
        if !self.defined {
            errs.make("Missing field definition")
                .span(self.loc, format!("'{}' may not be omitted", self.name))
                .text("This field must be defined once")
                .hint(format!(
                    "add definition for the missing field: '{} {};'",
                    self.name, self.hint
                ));
        }
        self.data
    }

    /// Optional field, `Ok(None)` when absent
    fn try_get_optional(self) -> Result<Option<T>, ()> {
        if self.valid {
            Ok(self.data)
        } else {
            Err(())
        }
    }
}

// get first and rest of inner
macro_rules! decapitate {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No head"));
        (fst, items)
    }};
}

// extract single-element inner
macro_rules! subrule {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No subrule"));
        assert!(items.next().is_none(), "Several subrules");
        fst
    }};
}

// pair to float contents, the grammar only accepts valid floats
macro_rules! parse_f64 {
    ( $node:expr ) => {
        $node.as_str().parse::<f64>().unwrap_or(f64::INFINITY)
    };
}

// pair to usize contents, saturating on absurdly long numbers
macro_rules! parse_usize {
    ( $node:expr ) => {
        $node.as_str().parse::<usize>().unwrap_or(usize::MAX)
    };
}

/// Get the subscriptions and history described in `contents`
///
/// The return value may be non-empty even if some errors (including fatal ones) occured.
/// Caller should determine the success of this function not through its return value
/// but by querying `errs` (e.g. by checking `errs.is_fatal()`)
pub fn extract(path: &str, errs: &mut error::Record, contents: &str) -> Listing {
    match ListingParser::parse(Rule::program, contents) {
        Ok(pairs) => validate(path, errs, pairs),
        Err(e) => {
            errs.make("Parsing failure").from(e.with_path(path));
            Listing::default()
        }
    }
}

/// Check all items
///
/// Sequentially validates each subscription or history, records errors,
/// accumulates the correct ones into the return value.
fn validate(path: &str, errs: &mut error::Record, pairs: Pairs) -> Listing {
    let mut listing = Listing::default();
    let mut history_loc: Option<error::Loc> = None;
    for pair in pairs {
        match pair.as_rule() {
            Rule::subscription => {
                let loc = (path, pair.as_span());
                if let Some(sub) = validate_subscription(path, errs, pair) {
                    if listing.subscriptions.iter().any(|s| s.name == sub.name) {
                        errs.make("Duplicate subscription")
                            .nonfatal()
                            .span(&loc, format!("'{}' is listed again here", sub.name))
                            .text("Both entries count toward the total")
                            .hint("remove one of them if this is a mistake");
                    }
                    listing.subscriptions.push(sub);
                }
            }
            Rule::history => {
                let loc = (path, pair.as_span());
                if let Some(first) = &history_loc {
                    errs.make("Duplicate history")
                        .span(&loc, "second history provided here")
                        .span(first, "first defined here")
                        .text("A listing may contain at most one history")
                        .hint("merge both into a single 'history [ ... ];'");
                    continue;
                }
                listing.history = validate_history(errs, &loc, pair);
                history_loc = Some(loc);
            }
            Rule::EOI => break,
            _ => unreachable!(),
        }
    }
    debug!(
        subscriptions = listing.subscriptions.len(),
        history = listing.history.as_ref().map(|h| h.as_slice().len()),
        "listing validated"
    );
    listing
}

/// Check a subscription
///
/// The grammar can't ensure that no field is duplicated or that the
/// required ones are present, nor that values are in range
fn validate_subscription(path: &str, errs: &mut error::Record, pair: Pair) -> Option<Subscription> {
    let loc = (path, pair.as_span());
    let (name, fields) = decapitate!(pair);
    assert_eq!(name.as_rule(), Rule::tag_text);
    let name_loc = (path, name.as_span());
    let name = subrule!(name).as_str().trim().to_string();
    let mut price = Once::new("price", "15.99", &loc);
    let mut due = Once::new("due", "15", &loc);
    let mut category = Once::new("category", "entertainment", &loc);
    let mut cycle = Once::new("cycle", "monthly", &loc);
    let mut method = Once::new("method", "credit_card", &loc);
    let mut since = Once::new("since", "2023-Jan-10", &loc);
    let mut valid = true;
    for field in fields {
        let field_loc = (path, field.as_span());
        let rule = field.as_rule();
        let value = subrule!(field);
        match rule {
            Rule::field_price => price.try_set(validate_price(errs, &field_loc, value), errs),
            Rule::field_due => due.try_set(validate_due(errs, &field_loc, value), errs),
            Rule::field_category => {
                category.try_set(Some(validate_category(errs, &field_loc, value)), errs)
            }
            Rule::field_cycle => cycle.try_set(validate_cycle(errs, &field_loc, value), errs),
            Rule::field_method => {
                method.try_set(Some(validate_method(errs, &field_loc, value)), errs)
            }
            Rule::field_since => since.try_set(validate_date(errs, &field_loc, value), errs),
            _ => unreachable!("{:?}", rule),
        }
    }
    if name.is_empty() {
        errs.make("Missing service name")
            .span(&name_loc, "empty name provided here")
            .hint("give the subscription a name, e.g. \"Netflix\"");
        valid = false;
    }
    let price = price.try_get(errs);
    let due = due.try_get(errs);
    let category = category.try_get_optional().ok()?;
    let cycle = cycle.try_get_optional().ok()?;
    let method = method.try_get_optional().ok()?;
    let start = since.try_get_optional().ok()?;
    if !valid {
        return None;
    }
    Some(Subscription {
        name,
        price: price?,
        due_day: due?,
        category: category.unwrap_or_default(),
        cycle: cycle.unwrap_or_default(),
        method: method.flatten(),
        start,
    })
}

/// A price must be strictly positive and at most `Amount::MAX_PRICE`
fn validate_price(errs: &mut error::Record, loc: &error::Loc, pair: Pair) -> Option<Amount> {
    match Amount::from_usd(parse_f64!(pair)) {
        Some(amount) if amount.0 > 0 => Some(amount),
        Some(_) => {
            errs.make("Invalid price")
                .span(loc, "provided here")
                .text(format!("'{}' is not a valid price", pair.as_str()))
                .hint("prices must be greater than zero");
            None
        }
        None => {
            errs.make("Invalid price")
                .span(loc, "provided here")
                .text(format!("'{}' is not a valid price", pair.as_str()))
                .hint(format!("prices must be at most {}", Amount::MAX_PRICE));
            None
        }
    }
}

fn validate_due(errs: &mut error::Record, loc: &error::Loc, pair: Pair) -> Option<u8> {
    let day = parse_usize!(pair);
    if (1..=31).contains(&day) {
        Some(day as u8)
    } else {
        errs.make("Invalid due day")
            .span(loc, "provided here")
            .text(format!("'{}' is not a day of the month", pair.as_str()))
            .hint("due day must be between 1 and 31");
        None
    }
}

/// Unknown categories are not fatal, they fall back to `other`
fn validate_category(errs: &mut error::Record, loc: &error::Loc, pair: Pair) -> Category {
    match pair.as_str().parse::<Category>() {
        Ok(category) => category,
        Err(()) => {
            errs.make("Unknown category")
                .nonfatal()
                .span(loc, "provided here")
                .text(format!("'{}' is not a known category, using 'other'", pair.as_str()))
                .hint("use one of entertainment, productivity, health, education, news, music")
                .hint("or cloud, gaming, shopping, transport, utilities, other");
            Category::Other
        }
    }
}

fn validate_cycle(errs: &mut error::Record, loc: &error::Loc, pair: Pair) -> Option<BillingCycle> {
    match pair.as_str().parse::<BillingCycle>() {
        Ok(cycle) => Some(cycle),
        Err(()) => {
            errs.make("Invalid billing cycle")
                .span(loc, "provided here")
                .text(format!("'{}' is not a billing cycle", pair.as_str()))
                .hint("use one of monthly, quarterly, yearly");
            None
        }
    }
}

/// Unknown payment methods are dropped with a warning
fn validate_method(
    errs: &mut error::Record,
    loc: &error::Loc,
    pair: Pair,
) -> Option<PaymentMethod> {
    match pair.as_str().parse::<PaymentMethod>() {
        Ok(method) => Some(method),
        Err(()) => {
            errs.make("Unknown payment method")
                .nonfatal()
                .span(loc, "provided here")
                .text(format!("'{}' is not a known payment method, ignoring it", pair.as_str()))
                .hint("use one of credit_card, debit_card, paypal, apple_pay")
                .hint("or google_pay, bank_account, other");
            None
        }
    }
}

fn validate_date(errs: &mut error::Record, loc: &error::Loc, pair: Pair) -> Option<Date> {
    let mut inner = pair.into_inner();
    let (year, month, day) = match (inner.next(), inner.next(), inner.next()) {
        (Some(y), Some(m), Some(d)) => (parse_usize!(y), m, parse_usize!(d)),
        _ => unreachable!(),
    };
    let month = match month.as_str().parse::<Month>() {
        Ok(month) => month,
        Err(()) => {
            errs.make("Invalid month")
                .span(loc, "provided here")
                .text(format!("'{}' is not a valid month", month.as_str()))
                .hint("Months are 'Jan', 'Feb', ..., 'Dec'");
            return None;
        }
    };
    match Date::from(year, month, day) {
        Ok(date) => Some(date),
        Err(e) => {
            errs.make("Invalid date")
                .span(loc, "provided here")
                .text(format!("{}", e))
                .hint("choose a date that exists")
                .hint(e.fix_hint());
            None
        }
    }
}

/// Grammar ensures amounts are non-negative
fn validate_history(errs: &mut error::Record, loc: &error::Loc, pair: Pair) -> Option<History> {
    let totals = pair
        .into_inner()
        .map(|item| parse_f64!(item))
        .collect::<Vec<_>>();
    match History::new(totals) {
        Ok(history) => Some(history),
        Err(e) => {
            errs.make("Invalid history")
                .span(loc, "provided here")
                .text(format!("{}", e))
                .hint(format!(
                    "past totals must be between 0 and {}",
                    History::MAX_TOTAL
                ));
            None
        }
    }
}
