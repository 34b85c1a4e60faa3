//! Static lookup tables
//!
//! - artefact replacements applied before tokenization
//! - SI prefixes used by the unit converter

use phf::phf_map;

/// Known extraction artefacts and their replacements.
///
/// Micro signs map to "u" ahead of transliteration, which would turn the
/// Greek letter into "m".
///
/// Applied in the order of [`REPLACE_ORDER`] so that longer patterns win
/// over their prefixes ("r.p.m." before "r.p . m").
pub static REPLACE_PATTERNS: phf::Map<&'static str, &'static str> = phf_map! {
    "—" => "-",
    "–" => "-",
    "’" => "'",
    "µ" => "u",
    "μ" => "u",
    "N-m" => "nm",
    "min-1" => "rpm",
    "min1" => "rpm",
    "r/min" => "rpm",
    "r.p.m." => "rpm",
    "r.p . m" => "rpm",
    "ohm" => "o",
    "\u{a0}" => " ",
    "\t" => " ",
};

/// Deterministic application order of [`REPLACE_PATTERNS`]
pub const REPLACE_ORDER: &[&str] = &[
    "—", "–", "’", "µ", "μ", "N-m", "min-1", "min1", "r/min", "r.p.m.", "r.p . m", "ohm", "\u{a0}", "\t",
];

/// SI prefix symbols and their decimal exponent
pub static SI_PREFIXES: phf::Map<&'static str, i32> = phf_map! {
    "y" => -24,
    "z" => -21,
    "a" => -18,
    "f" => -15,
    "p" => -12,
    "n" => -9,
    "µ" => -6,
    "μ" => -6,
    "u" => -6,
    "m" => -3,
    "c" => -2,
    "d" => -1,
    "da" => 1,
    "h" => 2,
    "k" => 3,
    "M" => 6,
    "G" => 9,
    "T" => 12,
    "P" => 15,
    "E" => 18,
    "Z" => 21,
    "Y" => 24,
};

/// Decimal exponent of `unit` relative to `base`, if `unit` is `base` with
/// an SI prefix (or the other way round).
///
/// ```rust
/// use kvu::data::replacements::prefix_exponent;
///
/// assert_eq!(prefix_exponent("kw", "w"), Some(3));
/// assert_eq!(prefix_exponent("w", "kw"), Some(-3));
/// assert_eq!(prefix_exponent("w", "w"), Some(0));
/// assert_eq!(prefix_exponent("rpm", "w"), None);
/// ```
pub fn prefix_exponent(unit: &str, base: &str) -> Option<i32> {
    if unit.is_empty() || base.is_empty() {
        return None;
    }
    if unit == base {
        return Some(0);
    }
    if let Some(prefix) = unit.strip_suffix(base) {
        return SI_PREFIXES.get(prefix).copied();
    }
    if let Some(prefix) = base.strip_suffix(unit) {
        return SI_PREFIXES.get(prefix).map(|e| -e);
    }
    None
}
