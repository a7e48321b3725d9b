mod cli;
mod lib;
mod load;

use anyhow::{bail, Context};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{
    plot::Plotter,
    settings::Settings,
    table::{Headline, Insights, Table, TrendLine},
};
use lib::{
    forecast::generate_forecast,
    history::History,
    locale::Text,
    subscription,
    summary::Analytics,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subtrack=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_args()?;
    debug!(?settings, "settings");

    let mut errs = load::error::Record::new();
    let listing = load::read_listing(&settings.file, &mut errs);
    eprint!("{}", errs);
    let load::Listing {
        mut subscriptions,
        history,
    } = match listing {
        Some(listing) => listing,
        None => bail!("could not load '{}'", settings.file),
    };
    subscription::sort(&mut subscriptions, settings.sort, settings.descending);

    let analytics = Analytics::from(&subscriptions);
    let current_total = analytics.total();
    let history = match history {
        Some(history) => history,
        None if settings.synthetic => {
            warn!(current_total, "no history in listing, using a synthetic one");
            History::synthetic(current_total)
        }
        None => {
            debug!("no history in listing");
            History::empty()
        }
    };
    let forecast = generate_forecast(history.as_slice(), current_total);

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    } else {
        let lang = settings.language;
        let headline = Headline {
            analytics: &analytics,
            settings: &settings,
        };
        print!("{}", headline);
        println!();
        if subscriptions.is_empty() {
            println!("{}", lang.text(Text::NoSubscriptions));
        } else {
            let title = format!(
                "{} ({}, {})",
                lang.text(Text::Title),
                settings.file,
                settings.currency.name()
            );
            println!("{}", Table::subscriptions(&subscriptions, &settings).with_title(&title));
            let categories = Table::categories(&analytics, &settings);
            if !categories.is_empty() {
                println!("{}", categories);
            }
        }
        print!("{}", Table::forecast(&forecast, &settings));
        let trend = TrendLine {
            forecast: &forecast,
            language: lang,
        };
        println!("{}", trend);
        if !subscriptions.is_empty() {
            let insights = Insights {
                analytics: &analytics,
                settings: &settings,
            };
            print!("{}", insights);
        }
    }

    if let Some(path) = &settings.plot {
        Plotter::from(&history, &forecast)
            .with_categories(analytics.category_breakdown())
            .save(path)
            .with_context(|| format!("could not write plot to '{}'", path))?;
        debug!(%path, "plot written");
    }
    Ok(())
}
