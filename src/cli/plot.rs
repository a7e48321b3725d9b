use std::io;

use svg::{
    node::element::{path::Data, Circle, Line, Path, Rectangle},
    Document,
};

use crate::lib::{forecast::ForecastResult, history::History, summary::CategoryShare};

/// Past totals followed by the predicted ones
///
/// Optionally with a bar underneath splitting the current total by category.
pub struct Plotter<'d> {
    history: &'d [f64],
    predictions: &'d [f64],
    categories: Vec<CategoryShare>,
}

impl<'d> Plotter<'d> {
    pub fn from(history: &'d History, forecast: &'d ForecastResult) -> Self {
        Self {
            history: history.as_slice(),
            predictions: &forecast.predictions,
            categories: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<CategoryShare>) -> Self {
        self.categories = categories;
        self
    }

    pub fn save(&self, file: &str) -> io::Result<()> {
        svg::save(file, &self.render())
    }

    /// Solid line for the history, dashed line for the predictions
    ///
    /// The dashed line starts from the last known point so that both
    /// curves are connected.
    fn render(&self) -> Document {
        let count = self.history.len() + self.predictions.len();
        let ymax = self
            .history
            .iter()
            .chain(self.predictions.iter())
            .fold(0.0_f64, |m, y| m.max(*y));
        let fheight = 700.0;
        let fwidth = 1000.0;
        let stroke_width = 2.0;
        let margin = 20.0;
        let bar_height = if self.categories.is_empty() { 0.0 } else { 30.0 };
        let resize_x = |x: usize| {
            if count > 1 {
                x as f64 / (count - 1) as f64 * fwidth
            } else {
                0.0
            }
        };
        let resize_y = |y: f64| {
            if ymax > 0.0 {
                (1.0 - y / ymax) * fheight
            } else {
                fheight
            }
        };
        let mut document = Document::new().set(
            "viewBox",
            (
                -margin,
                -margin,
                fwidth + 2.0 * margin,
                fheight + 2.0 * margin + bar_height + margin,
            ),
        );
        let past = self
            .history
            .iter()
            .enumerate()
            .map(|(i, y)| (resize_x(i), resize_y(*y)))
            .collect::<Vec<_>>();
        let start = past.len();
        let future = past
            .last()
            .copied()
            .into_iter()
            .chain(
                self.predictions
                    .iter()
                    .enumerate()
                    .map(|(i, y)| (resize_x(start + i), resize_y(*y))),
            )
            .collect::<Vec<_>>();
        if let Some(line) = polyline(&past) {
            document = document.add(
                Path::new()
                    .set("fill", "none")
                    .set("stroke", HISTORY_COLOR)
                    .set("stroke-width", stroke_width)
                    .set("d", line),
            );
        }
        if let Some(line) = polyline(&future) {
            document = document.add(
                Path::new()
                    .set("fill", "none")
                    .set("stroke", PREDICTION_COLOR)
                    .set("stroke-width", stroke_width)
                    .set("stroke-dasharray", "8 6")
                    .set("d", line),
            );
        }
        for (x, y) in &past {
            document = document.add(
                Circle::new()
                    .set("cx", *x)
                    .set("cy", *y)
                    .set("r", 4.0)
                    .set("fill", HISTORY_COLOR),
            );
        }
        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", stroke_width);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", fwidth)
            .set("y1", fheight)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", stroke_width);
        let mut offset = 0.0;
        for share in &self.categories {
            let width = share.percentage / 100.0 * fwidth;
            document = document.add(
                Rectangle::new()
                    .set("x", offset)
                    .set("y", fheight + margin)
                    .set("width", width)
                    .set("height", bar_height)
                    .set("fill", share.category.color()),
            );
            offset += width;
        }
        document.add(yaxis).add(xaxis)
    }
}

/// `None` for fewer than two points
fn polyline(points: &[(f64, f64)]) -> Option<Data> {
    if points.len() < 2 {
        return None;
    }
    let data = points[1..]
        .iter()
        .fold(Data::new().move_to(points[0]), |d, p| d.line_to(*p));
    Some(data)
}

const HISTORY_COLOR: &str = "#2D3436";
const PREDICTION_COLOR: &str = "#E17055";

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        forecast::generate_forecast,
        subscription::{Amount, Category, Subscription},
        summary::Analytics,
    };

    #[test]
    fn both_curves_drawn() {
        let history = History::new(vec![80.0, 85.0, 90.0, 95.0, 100.0, 100.0]).unwrap();
        let forecast = generate_forecast(history.as_slice(), 100.0);
        let text = Plotter::from(&history, &forecast).render().to_string();
        assert!(text.contains(HISTORY_COLOR));
        assert!(text.contains(PREDICTION_COLOR));
        assert!(text.contains("stroke-dasharray"));
        assert_eq!(text.matches("<circle").count(), 6);
        assert!(!text.contains("<rect"));
    }

    #[test]
    fn category_bar() {
        let subs = vec![
            Subscription::new("Netflix", Amount(1500), 5).with_category(Category::Entertainment),
            Subscription::new("Gym", Amount(500), 20).with_category(Category::Health),
        ];
        let history = History::empty();
        let forecast = generate_forecast(history.as_slice(), 20.0);
        let text = Plotter::from(&history, &forecast)
            .with_categories(Analytics::from(&subs).category_breakdown())
            .render()
            .to_string();
        assert_eq!(text.matches("<rect").count(), 2);
        assert!(text.contains(Category::Entertainment.color()));
        assert!(text.contains(Category::Health.color()));
    }

    #[test]
    fn empty_history_still_renders() {
        let history = History::empty();
        let forecast = generate_forecast(history.as_slice(), 0.0);
        let text = Plotter::from(&history, &forecast).render().to_string();
        assert!(!text.contains(HISTORY_COLOR));
        // all-zero predictions still form a line along the axis
        assert!(text.contains(PREDICTION_COLOR));
        assert!(text.contains("<line"));
    }
}
