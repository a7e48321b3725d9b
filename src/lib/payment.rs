//! Next payment date of a subscription
//!
//! Due days that a month does not have (29 to 31) are moved back to the last
//! day of that month, so a subscription due on the 31st is charged on
//! Feb 28 (or 29), Apr 30, and so on.

use crate::lib::{
    date::Date,
    locale::{Language, Text},
    subscription::{BillingCycle, Subscription},
};

/// Next occurrence of `due_day`, on or after `today`
///
/// `start` only matters for yearly subscriptions: it fixes the month of the
/// yearly charge.
pub fn next_payment_date(
    due_day: u8,
    cycle: BillingCycle,
    start: Option<Date>,
    today: Date,
) -> Date {
    if today.day() <= due_day {
        return today.with_day_clamped(due_day);
    }
    match cycle {
        BillingCycle::Monthly => today.with_day_clamped(1).jump_month(1).with_day_clamped(due_day),
        BillingCycle::Quarterly => today
            .with_day_clamped(1)
            .jump_month(3)
            .with_day_clamped(due_day),
        BillingCycle::Yearly => {
            let month = start.map(|s| s.month()).unwrap_or_else(|| today.month());
            today
                .with_day_clamped(1)
                .jump_year(1)
                .with_month_clamped(month)
                .with_day_clamped(due_day)
        }
    }
}

/// Whole days from `today` until `next`, `0` when due today
pub fn days_until_payment(next: Date, today: Date) -> i64 {
    today.days_to(next)
}

/// `Mmm D, YYYY` with the month name in `language`
pub fn format_payment_date(date: Date, language: Language) -> String {
    format!("{} {}, {}", language.month(date.month()), date.day(), date.year())
}

/// `Next: Mmm D` label for a monthly due day
pub fn due_date_text(due_day: u8, today: Date, language: Language) -> String {
    let next = next_payment_date(due_day, BillingCycle::Monthly, None, today);
    format!(
        "{}: {} {}",
        language.text(Text::Next),
        language.month(next.month()),
        next.day()
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSummary {
    pub next_payment: Date,
    pub days_until: i64,
    pub cycle: BillingCycle,
    /// start of the subscription, `today` if unknown
    pub start: Date,
}

pub fn payment_summary(sub: &Subscription, today: Date) -> PaymentSummary {
    let next_payment = next_payment_date(sub.due_day, sub.cycle, sub.start, today);
    PaymentSummary {
        next_payment,
        days_until: days_until_payment(next_payment, today),
        cycle: sub.cycle,
        start: sub.start.unwrap_or(today),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{date::Month::*, subscription::Amount};
    use pretty_assertions::assert_eq;

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            Date::from($y, $m, $d).unwrap()
        };
    }

    macro_rules! next {
        ( $due:expr, $cycle:ident, $start:expr, $today:expr => $res:expr ) => {
            assert_eq!(
                next_payment_date($due, BillingCycle::$cycle, $start, $today),
                $res
            )
        };
    }

    #[test]
    fn due_later_this_month() {
        next!(20, Monthly, None, dt!(2026-Oct-14) => dt!(2026-Oct-20));
        next!(14, Monthly, None, dt!(2026-Oct-14) => dt!(2026-Oct-14));
        next!(20, Yearly, Some(dt!(2020-Mar-1)), dt!(2026-Oct-14) => dt!(2026-Oct-20));
        next!(20, Quarterly, None, dt!(2026-Oct-14) => dt!(2026-Oct-20));
    }

    #[test]
    fn due_day_passed() {
        next!(5, Monthly, None, dt!(2026-Oct-14) => dt!(2026-Nov-5));
        next!(5, Monthly, None, dt!(2026-Dec-14) => dt!(2027-Jan-5));
        next!(5, Quarterly, None, dt!(2026-Oct-14) => dt!(2027-Jan-5));
        next!(5, Yearly, None, dt!(2026-Oct-14) => dt!(2027-Oct-5));
        next!(5, Yearly, Some(dt!(2021-Mar-9)), dt!(2026-Oct-14) => dt!(2027-Mar-5));
    }

    #[test]
    fn short_months_clamp() {
        next!(31, Monthly, None, dt!(2026-Feb-10) => dt!(2026-Feb-28));
        next!(30, Monthly, None, dt!(2026-Jan-31) => dt!(2026-Feb-28));
        next!(31, Monthly, None, dt!(2024-Feb-10) => dt!(2024-Feb-29));
        next!(29, Quarterly, None, dt!(2026-Nov-30) => dt!(2027-Feb-28));
        next!(31, Yearly, Some(dt!(2020-Apr-1)), dt!(2026-Oct-14) => dt!(2026-Oct-31));
        next!(10, Yearly, Some(dt!(2020-Feb-1)), dt!(2026-Oct-14) => dt!(2027-Feb-10));
    }

    #[test]
    fn days_until() {
        assert_eq!(days_until_payment(dt!(2026-Oct-14), dt!(2026-Oct-14)), 0);
        assert_eq!(days_until_payment(dt!(2026-Nov-5), dt!(2026-Oct-14)), 22);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_payment_date(dt!(2026-Mar-5), Language::En), "Mar 5, 2026");
        assert_eq!(format_payment_date(dt!(2026-Mar-5), Language::De), "Mär 5, 2026");
        assert_eq!(format_payment_date(dt!(2026-Jan-5), Language::Ar), "يناير 5, 2026");
        assert_eq!(due_date_text(5, dt!(2026-Oct-14), Language::En), "Next: Nov 5");
        assert_eq!(due_date_text(20, dt!(2026-Oct-14), Language::De), "Weiter: Okt 20");
    }

    #[test]
    fn summary() {
        let sub = Subscription::new("Cloud", Amount(299), 3).with_cycle(BillingCycle::Quarterly);
        let summary = payment_summary(&sub, dt!(2026-Oct-14));
        assert_eq!(summary.next_payment, dt!(2027-Jan-3));
        assert_eq!(summary.days_until, 81);
        assert_eq!(summary.cycle, BillingCycle::Quarterly);
        assert_eq!(summary.start, dt!(2026-Oct-14));
    }
}
