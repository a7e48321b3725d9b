use std::fmt;

use crate::cli::settings::Settings;
use crate::lib::{
    currency::format_price,
    forecast::{ForecastResult, HORIZONS},
    locale::{Language, Text},
    payment::{due_date_text, format_payment_date, payment_summary},
    subscription::Subscription,
    summary::{Analytics, ViewPeriod},
};

/// A box-drawn grid with a title
pub struct Table {
    title: String,
    grid: GridFmt,
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    /// right-aligned contents
    right: bool,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
}

impl Table {
    /// One line per subscription, in the order given
    pub fn subscriptions(subs: &[Subscription], settings: &Settings) -> Self {
        let lang = settings.language;
        let mut grid = GridFmt::with_labels(
            lang.text(Text::Name),
            &[
                lang.text(Text::Price),
                lang.text(Text::DueDate),
                lang.text(Text::Next),
                "",
                "",
            ],
        );
        grid.labels.right = lang.is_rtl();
        for sub in subs {
            let payment = payment_summary(sub, settings.today);
            grid.push_line(
                BoxFmt::from(sub.name.clone()),
                vec![
                    BoxFmt::price(sub.price.to_f64(), settings),
                    BoxFmt::from(due_date_text(sub.due_day, settings.today, lang)),
                    BoxFmt::from(format!(
                        "{} (+{})",
                        format_payment_date(payment.next_payment, lang),
                        payment.days_until
                    )),
                    BoxFmt::from(lang.category(sub.category).to_string()),
                    BoxFmt::from(
                        sub.method
                            .map(|m| lang.payment_method(m))
                            .unwrap_or("")
                            .to_string(),
                    ),
                ],
            );
        }
        Self {
            title: lang.text(Text::Title).to_string(),
            grid,
        }
    }

    /// Share of each category in the monthly total, largest first
    pub fn categories(analytics: &Analytics, settings: &Settings) -> Self {
        let lang = settings.language;
        let mut grid = GridFmt::with_labels("", &[lang.text(Text::Price), "#", "%"]);
        for share in analytics.category_breakdown() {
            grid.push_line(
                BoxFmt::from(lang.category(share.category).to_string()),
                vec![
                    BoxFmt::price(share.total.to_f64(), settings),
                    BoxFmt::from(share.count.to_string()),
                    BoxFmt::from(format!("{:.1}", share.percentage)),
                ],
            );
        }
        Self {
            title: lang.text(Text::CategoryBreakdown).to_string(),
            grid,
        }
    }

    /// Cumulative and average projected spending for each horizon
    pub fn forecast(forecast: &ForecastResult, settings: &Settings) -> Self {
        let lang = settings.language;
        let mut grid = GridFmt::with_labels("", &["Σ", lang.text(Text::Monthly)]);
        for &horizon in &HORIZONS {
            let (total, average) = match (
                forecast.cumulative(horizon),
                forecast.monthly_average(horizon),
            ) {
                (Some(t), Some(a)) => (t, a),
                _ => continue,
            };
            grid.push_line(
                BoxFmt::from(format!("+{}", horizon)),
                vec![BoxFmt::price(total, settings), BoxFmt::price(average, settings)],
            );
        }
        Self {
            title: lang.text(Text::Forecast).to_string(),
            grid,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.grid.labels.len() == 0
    }
}

/// Headline total for the selected view period
pub struct Headline<'a> {
    pub analytics: &'a Analytics<'a>,
    pub settings: &'a Settings,
}

impl fmt::Display for Headline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lang = self.settings.language;
        let view = match self.settings.view {
            ViewPeriod::Weekly => Text::Weekly,
            ViewPeriod::Monthly => Text::Monthly,
            ViewPeriod::Yearly => Text::Yearly,
        };
        writeln!(
            f,
            "{}: {} ({})",
            lang.text(Text::TotalExpenses),
            format_price(
                self.analytics.projected_total(self.settings.view),
                self.settings.currency,
                &self.settings.rates
            ),
            lang.text(view),
        )
    }
}

/// Trend sentence under the forecast table
pub struct TrendLine<'a> {
    pub forecast: &'a ForecastResult,
    pub language: Language,
}

impl fmt::Display for TrendLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let trend = &self.forecast.trend;
        writeln!(
            f,
            "{} ({:+.1}% / {}%)",
            self.language.trend_message(trend.trend),
            trend.change_percentage,
            trend.confidence
        )
    }
}

/// Extremes, top category, averages and recommendations
pub struct Insights<'a> {
    pub analytics: &'a Analytics<'a>,
    pub settings: &'a Settings,
}

impl fmt::Display for Insights<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lang = self.settings.language;
        let price = |usd| format_price(usd, self.settings.currency, &self.settings.rates);
        writeln!(f, "{}", lang.text(Text::Insights))?;
        if let Some(sub) = self.analytics.highest() {
            writeln!(
                f,
                "  {}: {} {}",
                lang.text(Text::MostExpensive),
                sub.name,
                price(sub.price.to_f64())
            )?;
        }
        if let Some(sub) = self.analytics.lowest() {
            writeln!(
                f,
                "  {}: {} {}",
                lang.text(Text::Cheapest),
                sub.name,
                price(sub.price.to_f64())
            )?;
        }
        if let Some(top) = self.analytics.top_category() {
            writeln!(
                f,
                "  {}: {} {:.1}% {}",
                lang.text(Text::TopCategory),
                lang.category(top.category),
                top.percentage,
                lang.text(Text::OfTotal)
            )?;
        }
        writeln!(
            f,
            "  {}: {}",
            lang.text(Text::Average),
            price(self.analytics.average())
        )?;
        writeln!(
            f,
            "  {} {}",
            price(self.analytics.yearly_total()),
            lang.text(Text::PerYear)
        )?;
        writeln!(f, "{}", lang.text(Text::Recommendations))?;
        for rec in self.analytics.recommendations() {
            writeln!(f, "  * {}: {}", rec.title(), rec.description())?;
        }
        Ok(())
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }

    fn price(usd: f64, settings: &Settings) -> Self {
        Self::from(format_price(usd, settings.currency, &settings.rates))
    }
}

impl ColFmt {
    fn with_label(label: BoxFmt) -> Self {
        Self {
            width: label.width,
            right: true,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }
}

impl GridFmt {
    fn with_labels(corner: &str, columns: &[&str]) -> Self {
        Self {
            labels: ColFmt {
                right: false,
                ..ColFmt::with_label(BoxFmt::from(corner.to_string()))
            },
            columns: columns
                .iter()
                .map(|c| ColFmt::with_label(BoxFmt::from(c.to_string())))
                .collect(),
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (i, b) in boxes.into_iter().enumerate() {
            self.columns[i].push(b);
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", self.grid)
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // upper border
        write!(f, "{}", ULCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", LOJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", URCORNER)?;
        // title line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        // separator
        write!(f, "{}", RTJOIN)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", CROSS)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", LTJOIN)?;

        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        // lower border
        write!(f, "{}", DLCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", HIJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", DRCORNER)?;
        Ok(())
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, true)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize) -> fmt::Result {
        self.boxes[idx].write(f, self.width, self.right)
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let padding = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", padding, self.text)
        } else {
            write!(f, " {}{} ", self.text, padding)
        }
    }
}
