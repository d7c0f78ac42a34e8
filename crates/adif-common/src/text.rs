//! Non-ASCII replacement for ADI export.

use std::collections::HashMap;

/// Replace every non-ASCII character of `text`.
///
/// Characters found in `map` are replaced by their mapping, all others by
/// `default`.
#[must_use]
pub fn replace_non_ascii<S: AsRef<str>>(text: &str, map: &HashMap<char, S>, default: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some(replacement) = map.get(&c) {
            out.push_str(replacement.as_ref());
        } else {
            out.push_str(default);
        }
    }
    out
}

/// Replace every non-ASCII character of `text` with `_`.
#[must_use]
pub fn to_ascii(text: &str) -> String {
    replace_non_ascii::<&str>(text, &HashMap::new(), "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Es saß ´ne hübsche YL am Funkegrät und funkte, nach Östereich auf 70cm sie blödelte und unkte";

    #[test]
    fn default_replacement() {
        assert_eq!(
            to_ascii(TEXT),
            "Es sa_ _ne h_bsche YL am Funkegr_t und funkte, nach _stereich auf 70cm sie bl_delte und unkte"
        );
        assert_eq!(
            replace_non_ascii::<&str>(TEXT, &HashMap::new(), "#"),
            "Es sa# #ne h#bsche YL am Funkegr#t und funkte, nach #stereich auf 70cm sie bl#delte und unkte"
        );
    }

    #[test]
    fn mapped_replacement() {
        let map = HashMap::from([
            ('ß', "ss"),
            ('´', "'"),
            ('ä', "ae"),
            ('ö', "oe"),
            ('Ö', "Oe"),
            ('ü', "ue"),
        ]);
        assert_eq!(
            replace_non_ascii(TEXT, &map, "_"),
            "Es sass 'ne huebsche YL am Funkegraet und funkte, nach Oestereich auf 70cm sie bloedelte und unkte"
        );
    }
}
