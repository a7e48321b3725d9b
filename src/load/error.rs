//! Diagnostics for a listing, printed against its source
//!
//! Spans are laid out by `pest::error::Error::new_from_span`, reports
//! here only group them with notes and hints and color the result:
//!
//! ```txt
//! --> Error: Invalid due day
//!  |     --> subscriptions.sub:4:5
//!  |      |
//!  |    4 |     due 45;
//!  |      |     ^----^
//!  |      |
//!  |      = provided here
//!  |  '45' is not a day of the month
//!  |      ? hint: use a day between 1 and 31
//! ```

use std::fmt;

use crate::load::parse::Rule;

/// Listing path and the span a diagnostic points at
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// One diagnostic, fatal unless marked otherwise
///
/// Labels, notes and hints are each printed on a single line.
#[must_use]
#[derive(Debug)]
pub struct Error {
    fatal: bool,
    label: String,
    items: Vec<Item>,
}

#[derive(Debug)]
enum Item {
    /// source excerpt
    Block(pest::error::Error<Rule>),
    Text(String),
    Hint(String),
}

/// Every diagnostic emitted while loading one listing
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// fatal diagnostics before the last one
    fatal: usize,
    contents: Vec<Error>,
}

impl Error {
    fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Attach a syntax error reported by the parser
    pub fn from(&mut self, err: pest::error::Error<Rule>) -> &mut Self {
        self.items.push(Item::Block(err.renamed_rules(rule_rename)));
        self
    }

    /// Downgrade to a warning, the listing is still usable
    pub fn nonfatal(&mut self) -> &mut Self {
        self.fatal = false;
        self
    }

    /// Point at `loc` with a short caption
    pub fn span<S>(&mut self, loc: &Loc, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Block(
            pest::error::Error::new_from_span(
                pest::error::ErrorVariant::CustomError {
                    message: msg.to_string(),
                },
                loc.1.clone(),
            )
            .with_path(loc.0),
        ));
        self
    }

    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Suggest a fix
    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    #[cfg(test)]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the listing must be rejected
    pub fn is_fatal(&self) -> bool {
        self.fatal > 0 || self.last_is_fatal()
    }

    fn last_is_fatal(&self) -> bool {
        self.contents.last().map(|e| e.fatal).unwrap_or(false)
    }

    fn count_errors(&self) -> usize {
        self.fatal + usize::from(self.last_is_fatal())
    }

    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.count_errors()
    }

    /// Diagnostics in order of emission
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.contents.iter()
    }

    /// Start a new diagnostic, fatal until `nonfatal` is called on it
    pub fn make<S>(&mut self, msg: S) -> &mut Error
    where
        S: ToString,
    {
        if self.last_is_fatal() {
            self.fatal += 1;
        }
        self.contents.push(Error::new(msg));
        let last = self.contents.len() - 1;
        &mut self.contents[last]
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    let mut align = "   ".to_string();
                    let mut align_found = false;
                    for line in format!("{}", err).split('\n') {
                        write!(
                            f,
                            " {}|{}  {}",
                            color,
                            if align_found { &align } else { "" },
                            BLUE
                        )?;
                        for c in line.chars() {
                            match c {
                                '-' if !align_found => {
                                    align_found = true;
                                    write!(f, "{}-", align)?;
                                }
                                ' ' if !align_found => {
                                    align.pop();
                                    write!(f, " ")?;
                                }
                                '|' => write!(f, "|{}", NONE)?,
                                '=' => write!(f, "={}", NONE)?,
                                '^' => write!(f, "{}^", color)?,
                                '␊' => (), // pest shows line endings explicitly
                                _ => write!(f, "{}", c)?,
                            }
                        }
                        writeln!(f)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal {
            self.count_errors()
        } else {
            self.count_warnings()
        };
        let color = if fatal { RED } else { YELLOW };
        let trunc = 10;
        // only print errors with the maximum fatality
        for err in self
            .contents
            .iter()
            .filter(|err| err.fatal == fatal)
            .take(trunc)
        {
            writeln!(f, "{}", err)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.", color, count - trunc)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(
                f,
                "{}Fatal: {}{} error{} emitted{}",
                color, WHITE, count, plural, NONE
            )?;
        } else {
            writeln!(
                f,
                "{}Nonfatal: {}{} warning{} emitted{}",
                color, WHITE, count, plural, NONE
            )?;
        }
        Ok(())
    }
}

fn rule_rename(r: &Rule) -> String {
    String::from(match r {
        Rule::EOI => "EOF",
        Rule::number => "a number",
        Rule::money_amount => "a monetary value ('XXX.XX')",
        Rule::string => "a string of non-'\"' characters",
        Rule::tag_text => "a service name ('\"Netflix\"')",
        Rule::identifier => "an identifier composed of a..zA..Z0..9_",
        Rule::month_name => "a month name ('Jan' ... 'Dec')",
        Rule::full_date => "a date YYYY-Mmm-DD",
        Rule::field_price => "a 'price' field",
        Rule::field_due => "a 'due' field",
        Rule::field_category => "a 'category' field",
        Rule::field_cycle => "a 'cycle' field",
        Rule::field_method => "a 'method' field",
        Rule::field_since => "a 'since' field",
        Rule::subscription => "a subscription 'subscription \"Name\" { ... }'",
        Rule::history => "a history 'history [ ... ];'",
        Rule::field => "a field 'name value;'",
        Rule::program => "a listing of subscriptions and histories",
        Rule::digit => "a digit",
        Rule::WHITESPACE => "whitespace",
        Rule::COMMENT => "a comment",
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counting() {
        let mut errs = Record::new();
        assert!(!errs.is_fatal());
        errs.make("first").nonfatal();
        assert!(!errs.is_fatal());
        assert_eq!(errs.count_warnings(), 1);
        errs.make("second").text("some detail");
        errs.make("third").hint("some fix");
        assert!(errs.is_fatal());
        assert_eq!(errs.count_errors(), 2);
        assert_eq!(errs.count_warnings(), 1);
        let labels = errs.iter().map(|e| e.label()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn display_summary() {
        let mut errs = Record::new();
        errs.make("Unknown category").nonfatal().hint("use other");
        let text = format!("{}", errs);
        assert!(text.contains("Warning"));
        assert!(text.contains("Unknown category"));
        assert!(text.contains("1 warning emitted"));
    }
}
