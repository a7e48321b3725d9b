pub mod error;
pub mod parse;

use tracing::{debug, info};

use crate::lib::locale::normalize_digits;
pub use parse::Listing;

/// Read and validate the listing stored in `filename`
///
/// `None` if any fatal error was recorded, in which case `errs` explains why.
pub fn read_listing(filename: &str, errs: &mut error::Record) -> Option<Listing> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(e) => {
            debug!(%filename, error = %e, "could not read listing");
            errs.make("File not found")
                .text(format!("Initial file loaded is '{}'", filename))
                .hint("check the path or create the file");
            return None;
        }
    };
    // Eastern Arabic and Persian digits are accepted wherever digits are
    let contents = normalize_digits(&contents);
    let listing = parse::extract(filename, errs, &contents);
    if errs.is_fatal() {
        return None;
    }
    info!(
        %filename,
        subscriptions = listing.subscriptions.len(),
        warnings = errs.count_warnings(),
        "listing loaded"
    );
    Some(listing)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file() {
        let mut errs = error::Record::new();
        assert!(read_listing("/nonexistent/listing.sub", &mut errs).is_none());
        assert!(errs.is_fatal());
        assert_eq!(errs.iter().next().unwrap().label(), "File not found");
    }

    #[test]
    fn reads_localized_digits() {
        let path = std::env::temp_dir().join("subtrack-localized-digits.sub");
        std::fs::write(&path, "subscription \"Anghami\" { price ٤.٩٩; due ١٥; }\n").unwrap();
        let mut errs = error::Record::new();
        let listing = read_listing(path.to_str().unwrap(), &mut errs).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(listing.subscriptions[0].due_day, 15);
        assert_eq!(listing.subscriptions[0].price.0, 499);
    }
}
