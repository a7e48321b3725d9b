//! Implementations that are useful accross the whole project
//!
//! Forecasting core (regression, trend, forecast) and the subscription
//! domain around it: dates, payments, currencies, aggregation

pub mod currency;
pub mod date;
pub mod forecast;
pub mod history;
pub mod locale;
pub mod payment;
pub mod regression;
pub mod subscription;
pub mod summary;
pub mod trend;
