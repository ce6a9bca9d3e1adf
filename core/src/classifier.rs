//! # Number Classifier
//!
//! Decides whether a phone number of the São Paulo (11) area is an old-format
//! mobile number missing its leading "9".
//!
//! Numbers are matched against an optional dialing prefix (`11`, `011` or
//! `0xx11`, where `xx` is a carrier selection code) followed by exactly eight
//! digits whose first digit is 5 to 9. Anything else is outside the scheme
//! and left alone.

use std::sync::OnceLock;

use nono_common::contact::normalize_label;
use regex::Regex;
use tracing::debug;

/// ASCII classes only: `\d` would also accept non-latin digits.
const AREA_11_OLD_MOBILE: &str = r"^(?:(?:0(?:[0-9]{2})?)?11)?([5-9])[0-9]{7}$";

pub const MOBILE_DIGIT: char = '9';

static PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PATTERN.get_or_init(|| Regex::new(AREA_11_OLD_MOBILE).expect("invalid area 11 pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Outside the scheme, or already fixed. No change.
    NonMobile,
    /// The leading digit is only used by mobile lines.
    Mobile { candidate: String, digit_at: usize },
    /// The leading digit is shared by mobile and fixed lines.
    Ambiguous {
        candidate: String,
        digit_at: usize,
        label: Option<String>,
    },
}

impl Classification {
    pub fn candidate(&self) -> Option<&str> {
        match self {
            Classification::NonMobile => None,
            Classification::Mobile { candidate, .. }
            | Classification::Ambiguous { candidate, .. } => Some(candidate),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberClassifier {
    mobile_threshold: u8,
}

impl NumberClassifier {
    /// `mobile_threshold` is the lowest leading digit treated as mobile-only.
    pub fn new(mobile_threshold: u8) -> Self {
        Self { mobile_threshold }
    }

    pub fn classify(&self, number: &str, label: Option<&str>) -> Classification {
        let Some(first) = pattern().captures(number).and_then(|caps| caps.get(1)) else {
            debug!(number, "outside the area 11 mobile scheme");
            return Classification::NonMobile;
        };

        let digit_at = first.start();
        let candidate = insert_digit(number, digit_at);
        let leading = first.as_str().as_bytes()[0] - b'0';

        if leading >= self.mobile_threshold {
            debug!(number, %candidate, "mobile");
            Classification::Mobile {
                candidate,
                digit_at,
            }
        } else {
            debug!(number, %candidate, "ambiguous");
            Classification::Ambiguous {
                candidate,
                digit_at,
                label: normalize_label(label).map(str::to_owned),
            }
        }
    }
}

fn insert_digit(number: &str, at: usize) -> String {
    let mut with_digit = String::with_capacity(number.len() + 1);
    with_digit.push_str(&number[..at]);
    with_digit.push(MOBILE_DIGIT);
    with_digit.push_str(&number[at..]);
    with_digit
}

/// Removes a dialing prefix, refusing to leave an empty number behind.
pub fn strip_dialing_prefix<'a>(number: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    number.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}
