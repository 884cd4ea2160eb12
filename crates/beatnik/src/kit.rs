//! Named drum aliases for the General MIDI percussion map.
//!
//! Aliases are upper-case so they fit the `[0-9A-Z]+` instrument grammar.
//! Any key 1-255 can also be written as a plain number.

/// Alias to MIDI key, in General MIDI key order
pub const GM_KIT: &[(&str, u8)] = &[
    ("K", 36),
    ("BD", 36),
    ("SS", 37),
    ("S", 38),
    ("SD", 38),
    ("CL", 39),
    ("ES", 40),
    ("FT", 41),
    ("LFT", 41),
    ("H", 42),
    ("HH", 42),
    ("HFT", 43),
    ("PH", 44),
    ("LT", 45),
    ("OH", 46),
    ("LMT", 47),
    ("MT", 48),
    ("HMT", 48),
    ("C", 49),
    ("CR", 49),
    ("HT", 50),
    ("R", 51),
    ("RD", 51),
    ("CH", 52),
    ("RB", 53),
    ("TB", 54),
    ("SP", 55),
    ("CB", 56),
    ("C2", 57),
    ("CR2", 57),
    ("R2", 59),
    ("RD2", 59),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_are_valid_identifiers() {
        for (name, key) in GM_KIT {
            assert!(
                name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
                "alias {name} would never tokenize as an instrument"
            );
            // Pure numbers are reserved for raw MIDI keys
            assert!(name.parse::<u32>().is_err(), "alias {name} shadows a number");
            assert!((35..=81).contains(key), "alias {name} maps outside the GM kit");
        }
    }
}
