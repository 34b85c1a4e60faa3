//! Regular expressions used by the extraction engine
//!
//! All expressions are compiled once and shared read-only.
//!
//! The value grammar accepts, in order of composition:
//! - a number: optional comparison/sign prefix, digits with optional
//!   thousands separators and decimals, optional exponent
//! - a range of two numbers (`12-15`, `12 to 15`, `12...15`, `12…15`)
//! - up to three `x`-joined dimensions of ranges (`12 x 5 x 3`)
//! - one optional `/`-joined alternative (`230/400`)

use lazy_static::lazy_static;
use regex::Regex;

/// Delimiter joining two entries in one cell ("slots / poles", "36/6")
pub const MULTIPLE_ENTRY_DELIMITER: char = '/';

const NUMBER: &str = r"[-+><=~\s]{0,3}\s*(?:\b(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]+)?|\.[0-9]+)\s*(?:[eE^]\s*[-+]?\s*[0-9]+\b)?";
const RANGE: &str = r"(?:-|to|\.{3}|…)";
const DIMENSION: &str = r"[xX]";
const ALTERNATIVE: &str = r"/";

/// Numeric token of a compound row value ("36", "0.5-1.2", "12 x 5")
const SPLIT_NUMBER: &str = r"[-+<>=~]?\s*[0-9]+(?:[.,][0-9]+)?";
/// Unit following a compound row value ("mm", "[kw]", "(%)")
const SPLIT_UNIT: &str = r"\s*[\[(]?\s*[a-zA-Z%°][a-zA-Z0-9%°]*(?:\^-?[0-9]+)?\s*[\])]?";

fn range_number() -> String {
    format!(r"{NUMBER}(?:\s*{RANGE}\s*{NUMBER})?")
}

fn dimension_value() -> String {
    let range_number = range_number();
    format!(r"{range_number}(?:\s*{DIMENSION}\s*{range_number}){{0,2}}")
}

fn split_value() -> String {
    let number = format!(r"{SPLIT_NUMBER}(?:\s*(?:-|to)\s*{SPLIT_NUMBER})?");
    format!(r"{number}(?:\s*{DIMENSION}\s*{number}){{0,2}}")
}

lazy_static! {
    /// First value in a candidate string
    pub static ref VALUE: Regex = {
        let dimension_value = dimension_value();
        Regex::new(&format!(
            r"{dimension_value}(?:\s*{ALTERNATIVE}\s*{dimension_value})?"
        ))
        .unwrap()
    };

    /// A cell starting like two entities joined by the delimiter,
    /// e.g. "number of slots / poles" or "length [mm] / width / height".
    /// Only the start is checked; anything after the right entity's first
    /// word is left to the key resolution.
    pub static ref POSSIBLE_MULTIPLE_ENTITIES: Regex = Regex::new(
        r"^[a-zA-Z]+(?: [a-zA-Z]+)*\s?[\[(,]?\s?\w*\s?[\])]?\s?/\s?[a-zA-Z]+"
    )
    .unwrap();

    /// A bracketed unit fragment inside a key cell ("[mm]", "(kw)")
    pub static ref KEY_UNIT: Regex =
        Regex::new(r"[\[(][^\[\]()/]*[\])]").unwrap();

    /// Delimiter-joined values with optional units ("36/6", "5 mm / 3").
    ///
    /// `left` is the first value; `right` keeps every further value
    /// ("12/5/3" gives "12" and "5/3") for the next splitting pass.
    pub static ref VALUE_PAIR: Regex = {
        let value = split_value();
        Regex::new(&format!(
            r"^\s*(?P<left>{value})(?P<left_unit>{SPLIT_UNIT})?\s*/\s*(?P<right>{value}(?:\s*/\s*{value})*)(?P<right_unit>{SPLIT_UNIT})?\s*$"
        ))
        .unwrap()
    };

    /// One value with a unit, reused for both halves of a split row
    pub static ref SINGLE_VALUE_WITH_UNIT: Regex = {
        let value = split_value();
        Regex::new(&format!(r"^\s*(?P<value>{value})(?P<unit>{SPLIT_UNIT})\s*$"))
            .unwrap()
    };

    /// Word, number or single punctuation token for normalization
    pub static ref TOKEN: Regex =
        Regex::new(r"\w+(?:[.,]\w+)*|[^\w\s]").unwrap();
}

/// Build the matcher for one unit or symbol.
///
/// The unit must be preceded by the start of the text, whitespace or a
/// digit, and followed by whitespace, a digit or the end of the text, so
/// that "m" never matches inside "mm" or "mean".
pub fn unit_expression(unit: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?:^|[\s\d])({})(?:[\s\d]|$)", regex::escape(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_value(text: &str) -> Option<&str> {
        VALUE.find(text).map(|m| m.as_str().trim())
    }

    #[test]
    fn test_value_plain_numbers() {
        assert_eq!(first_value("power 5.5 "), Some("5.5"));
        assert_eq!(first_value("speed 5500 "), Some("5500"));
        assert_eq!(first_value("mass 1,250.5 "), Some("1,250.5"));
        assert_eq!(first_value("no digits here"), None);
    }

    #[test]
    fn test_value_ranges_and_dimensions() {
        assert_eq!(first_value("temp -20 to 40 "), Some("-20 to 40"));
        assert_eq!(first_value("size 12 x 5 x 3 "), Some("12 x 5 x 3"));
        assert_eq!(first_value("voltage 230/400 "), Some("230/400"));
        assert_eq!(first_value("gap 12...15"), Some("12...15"));
    }

    #[test]
    fn test_value_exponent() {
        assert_eq!(first_value("resistivity 1.7 e-8 "), Some("1.7 e-8"));
    }

    #[test]
    fn test_possible_multiple_entities() {
        assert!(POSSIBLE_MULTIPLE_ENTITIES.is_match("number of slots / poles"));
        assert!(POSSIBLE_MULTIPLE_ENTITIES.is_match("length [mm] / width"));
        assert!(!POSSIBLE_MULTIPLE_ENTITIES.is_match("36/6"));
        assert!(!POSSIBLE_MULTIPLE_ENTITIES.is_match("rated power"));
        assert!(POSSIBLE_MULTIPLE_ENTITIES.is_match("length / width / height"));
        assert!(POSSIBLE_MULTIPLE_ENTITIES.is_match("efficiency / power factor at 75 % load"));
    }

    #[test]
    fn test_value_pair() {
        let caps = VALUE_PAIR.captures("36/6").unwrap();
        assert_eq!(&caps["left"], "36");
        assert_eq!(&caps["right"], "6");

        let caps = VALUE_PAIR.captures("12 mm / 5").unwrap();
        assert_eq!(caps["left"].trim(), "12");
        assert_eq!(caps.name("left_unit").unwrap().as_str().trim(), "mm");
        assert!(caps.name("right_unit").is_none());

        let caps = VALUE_PAIR.captures("12/5/3 mm").unwrap();
        assert_eq!(&caps["left"], "12");
        assert_eq!(&caps["right"], "5/3");
        assert_eq!(caps.name("right_unit").unwrap().as_str().trim(), "mm");
    }

    #[test]
    fn test_single_value_with_unit() {
        assert!(SINGLE_VALUE_WITH_UNIT.is_match("50 hz"));
        assert!(!SINGLE_VALUE_WITH_UNIT.is_match("50"));
    }

    #[test]
    fn test_unit_expression_boundaries() {
        let m = unit_expression("m").unwrap();
        assert!(m.is_match("length 12 m"));
        assert!(m.is_match("12m"));
        assert!(!m.is_match("12 mm"));
        assert!(!m.is_match("mean value"));
    }
}
