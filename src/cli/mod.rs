pub mod plot;
pub mod settings;
pub mod table;
