use once_cell::sync::Lazy;
use regex::Regex;

static PNR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+-?\d+$").unwrap());

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// A classified person-lookup term: personal number, email or username.
///
/// Classification is total: every input lands on exactly one kind, with
/// username as the fallback. A purely numeric username is indistinguishable
/// from a personal number and classifies as `Pnr`; callers who hit that
/// ambiguity fall back to the name search instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonLookup {
    Pnr(String),
    Email(String),
    Username(String),
}

impl PersonLookup {
    pub fn classify(term: &str) -> Self {
        let term = term.trim();
        if PNR_PATTERN.is_match(term) {
            PersonLookup::Pnr(term.to_string())
        } else if EMAIL_PATTERN.is_match(term) {
            PersonLookup::Email(term.to_string())
        } else {
            PersonLookup::Username(term.to_string())
        }
    }

    /// The single query parameter this lookup contributes to `findPerson`.
    pub fn query_param(&self) -> (&'static str, &str) {
        match self {
            PersonLookup::Pnr(value) => ("pnr", value),
            PersonLookup::Email(value) => ("email", value),
            PersonLookup::Username(value) => ("username", value),
        }
    }
}
