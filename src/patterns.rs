//! RPSL attribute patterns.
//!
//! These must stay compatible with the text the registry serves, so they
//! match loosely (substring anywhere in a line) rather than parsing RPSL.

use regex::Regex;

pub const MEMBERS_PATTERN: &str = r"members:\s*(.*)";
pub const IMPORT_PATTERN: &str = r"import:\s*.*from\s([A-Z\d-]+)\saccept(.*)";
pub const EXPORT_PATTERN: &str = r"export:\s*.*to\s([A-Z\d-]+)\sannounce\s(.*)";

lazy_static::lazy_static! {
    pub static ref MEMBERS_RE: Regex = Regex::new(MEMBERS_PATTERN).expect("valid members pattern");
    pub static ref IMPORT_RE: Regex = Regex::new(IMPORT_PATTERN).expect("valid import pattern");
    pub static ref EXPORT_RE: Regex = Regex::new(EXPORT_PATTERN).expect("valid export pattern");
}

/// Every `(peer, expression)` pair matched by `re`, in textual order.
pub fn rule_captures<'t>(re: &Regex, text: &'t str) -> Vec<(&'t str, &'t str)> {
    re.captures_iter(text)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect()
}
