use num_traits::FromPrimitive;
use std::ops;
use std::str::FromStr;

use crate::lib::{
    regression::round_to,
    subscription::{Amount, Category, Subscription},
};

/// Weeks in an average month
const WEEKS_PER_MONTH: f64 = 4.33;
/// Above this many subscriptions, bundling is worth suggesting
const BUNDLE_THRESHOLD: usize = 5;

/// Period over which the headline total is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl Default for ViewPeriod {
    fn default() -> Self {
        ViewPeriod::Monthly
    }
}

impl FromStr for ViewPeriod {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "weekly" => Ok(ViewPeriod::Weekly),
            "monthly" => Ok(ViewPeriod::Monthly),
            "yearly" => Ok(ViewPeriod::Yearly),
            _ => Err(()),
        }
    }
}

impl ViewPeriod {
    /// Scale a monthly value to this period
    pub fn scale(self, monthly: f64) -> f64 {
        match self {
            ViewPeriod::Weekly => monthly / WEEKS_PER_MONTH,
            ViewPeriod::Monthly => monthly,
            ViewPeriod::Yearly => monthly * 12.0,
        }
    }
}

/// Running totals, overall and per category
#[derive(Debug, Clone)]
pub struct Summary {
    total: Amount,
    count: usize,
    categories: [(Amount, usize); Category::COUNT],
}

impl Summary {
    pub fn new() -> Self {
        Self {
            total: Amount(0),
            count: 0,
            categories: [(Amount(0), 0); Category::COUNT],
        }
    }

    pub fn query(&self, cat: Category) -> Amount {
        self.categories[cat as usize].0
    }

    /// Number of subscriptions in `cat`
    pub fn count_of(&self, cat: Category) -> usize {
        self.categories[cat as usize].1
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl ops::AddAssign<&Subscription> for Summary {
    fn add_assign(&mut self, sub: &Subscription) {
        let slot = &mut self.categories[sub.category as usize];
        slot.0 += sub.price;
        slot.1 += 1;
        self.total += sub.price;
        self.count += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub total: Amount,
    pub count: usize,
    /// share of the overall total, one decimal
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    ReviewHighCost,
    Consolidate,
    AnnualPlans,
}

impl Recommendation {
    pub fn title(self) -> &'static str {
        match self {
            Recommendation::ReviewHighCost => "Review High-Cost Subscriptions",
            Recommendation::Consolidate => "Consider Bundling",
            Recommendation::AnnualPlans => "Try Annual Plans",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Recommendation::ReviewHighCost => {
                "Consider if you really use all features of your most expensive subscriptions."
            }
            Recommendation::Consolidate => {
                "Look for bundle deals that combine multiple services at a lower price."
            }
            Recommendation::AnnualPlans => {
                "Switching to annual billing often saves 15-20% compared to monthly."
            }
        }
    }
}

/// Aggregate view over a list of subscriptions
#[derive(Debug, Clone)]
pub struct Analytics<'d> {
    summary: Summary,
    /// by decreasing price, ties in input order
    by_price: Vec<&'d Subscription>,
}

impl<'d> Analytics<'d> {
    pub fn from(subs: &'d [Subscription]) -> Self {
        let mut summary = Summary::new();
        for sub in subs {
            summary += sub;
        }
        let mut by_price = subs.iter().collect::<Vec<_>>();
        by_price.sort_by(|a, b| b.price.cmp(&a.price));
        Self { summary, by_price }
    }

    pub fn count(&self) -> usize {
        self.summary.count()
    }

    /// Total monthly spending in USD
    pub fn total(&self) -> f64 {
        self.summary.total().to_f64()
    }

    pub fn average(&self) -> f64 {
        if self.count() == 0 {
            0.0
        } else {
            self.total() / self.count() as f64
        }
    }

    pub fn highest(&self) -> Option<&'d Subscription> {
        self.by_price.first().copied()
    }

    pub fn lowest(&self) -> Option<&'d Subscription> {
        self.by_price.last().copied()
    }

    pub fn projected_total(&self, view: ViewPeriod) -> f64 {
        view.scale(self.total())
    }

    pub fn yearly_total(&self) -> f64 {
        self.projected_total(ViewPeriod::Yearly)
    }

    /// Categories that have at least one subscription, largest share first
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        let total = self.total();
        let mut shares = (0..Category::COUNT)
            .filter_map(Category::from_usize)
            .filter_map(|category| {
                let amount = self.summary.query(category);
                let count = self.summary.count_of(category);
                if count == 0 {
                    return None;
                }
                let percentage = if total == 0.0 {
                    0.0
                } else {
                    round_to(amount.to_f64() / total * 100.0, 1)
                };
                Some(CategoryShare {
                    category,
                    total: amount,
                    count,
                    percentage,
                })
            })
            .collect::<Vec<_>>();
        shares.sort_by(|a, b| b.total.cmp(&a.total));
        shares
    }

    pub fn top_category(&self) -> Option<CategoryShare> {
        self.category_breakdown().into_iter().next()
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut recs = vec![Recommendation::ReviewHighCost];
        if self.count() > BUNDLE_THRESHOLD {
            recs.push(Recommendation::Consolidate);
        }
        recs.push(Recommendation::AnnualPlans);
        recs
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn sub(name: &str, cents: i64, cat: Category) -> Subscription {
        Subscription::new(name, Amount(cents), 1).with_category(cat)
    }

    fn sample() -> Vec<Subscription> {
        vec![
            sub("Netflix", 1500, Category::Entertainment),
            sub("Disney", 1000, Category::Entertainment),
            sub("Dropbox", 1000, Category::Cloud),
            sub("Gym", 2500, Category::Health),
        ]
    }

    #[test]
    fn empty() {
        let a = Analytics::from(&[]);
        assert_eq!(a.count(), 0);
        assert_eq!(a.total(), 0.0);
        assert_eq!(a.average(), 0.0);
        assert!(a.highest().is_none());
        assert!(a.lowest().is_none());
        assert!(a.category_breakdown().is_empty());
    }

    #[test]
    fn totals() {
        let subs = sample();
        let a = Analytics::from(&subs);
        assert_eq!(a.count(), 4);
        assert_relative_eq!(a.total(), 60.0);
        assert_relative_eq!(a.average(), 15.0);
        assert_relative_eq!(a.projected_total(ViewPeriod::Weekly), 60.0 / 4.33);
        assert_relative_eq!(a.yearly_total(), 720.0);
        assert_eq!(a.summary.query(Category::Entertainment), Amount(2500));
        assert_eq!(a.summary.query(Category::Music), Amount(0));
    }

    #[test]
    fn large_listing_saturates() {
        let subs = (0..20)
            .map(|i| sub("Max", i64::MAX / 10 + i, Category::Other))
            .collect::<Vec<_>>();
        let a = Analytics::from(&subs);
        assert_eq!(a.summary.total(), Amount(i64::MAX));
        assert_eq!(a.summary.query(Category::Other), Amount(i64::MAX));
        assert!(a.total().is_finite());
    }

    #[test]
    fn extremes_keep_input_order_on_ties() {
        let subs = sample();
        let a = Analytics::from(&subs);
        assert_eq!(a.highest().unwrap().name, "Gym");
        // Disney and Dropbox tie, the later one is last
        assert_eq!(a.lowest().unwrap().name, "Dropbox");
    }

    #[test]
    fn breakdown() {
        let subs = sample();
        let a = Analytics::from(&subs);
        let shares = a
            .category_breakdown()
            .into_iter()
            .map(|s| (s.category, s.count, s.percentage))
            .collect::<Vec<_>>();
        assert_eq!(
            shares,
            vec![
                (Category::Entertainment, 2, 41.7),
                (Category::Health, 1, 41.7),
                (Category::Cloud, 1, 16.7),
            ]
        );
        assert_eq!(a.top_category().unwrap().category, Category::Entertainment);
    }

    #[test]
    fn recommendations() {
        let subs = sample();
        assert_eq!(
            Analytics::from(&subs).recommendations(),
            vec![Recommendation::ReviewHighCost, Recommendation::AnnualPlans]
        );
        let many = (0..6)
            .map(|i| sub(&format!("s{}", i), 100, Category::Other))
            .collect::<Vec<_>>();
        assert!(Analytics::from(&many)
            .recommendations()
            .contains(&Recommendation::Consolidate));
    }
}
