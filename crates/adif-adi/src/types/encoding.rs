//! Text encodings for ADI values.
//!
//! Tag lengths count bytes, so values are decoded from their raw byte slice
//! only after the tag has been measured.

use std::borrow::Cow;
use std::str::FromStr;

use crate::error::{AdiError, Result};

/// Character encoding of ADI file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// 7-bit ASCII.
    Ascii,
    /// UTF-8 (default for reading).
    #[default]
    Utf8,
    /// ISO 8859-1.
    Latin1,
}

impl Encoding {
    /// Decode one value's bytes.
    pub fn decode(self, bytes: &[u8], field: &str) -> Result<String> {
        match self {
            Self::Ascii if bytes.is_ascii() => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Ascii => Err(AdiError::invalid_encoding(field, self)),
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| AdiError::invalid_encoding(field, self)),
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Encode output text.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>> {
        match self {
            Self::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            _ if text.is_ascii() => Ok(Cow::Borrowed(text.as_bytes())),
            Self::Ascii => Err(AdiError::Unencodable { encoding: self }),
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect::<Option<Vec<u8>>>()
                .map(Cow::Owned)
                .ok_or(AdiError::Unencodable { encoding: self }),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            other => Err(format!("unknown encoding: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let text = "Jörg".as_bytes();
        assert_eq!(Encoding::Utf8.decode(text, "NAME").unwrap(), "Jörg");
        // cut inside the two-byte o-umlaut
        let err = Encoding::Utf8.decode(&text[..2], "NAME").unwrap_err();
        assert!(matches!(err, AdiError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_decode_latin1() {
        let bytes = [b'J', 0xF6, b'r', b'g'];
        assert_eq!(Encoding::Latin1.decode(&bytes, "NAME").unwrap(), "Jörg");
        assert!(Encoding::Ascii.decode(&bytes, "NAME").is_err());
    }

    #[test]
    fn test_encode() {
        assert_eq!(Encoding::Latin1.encode("Jörg").unwrap().as_ref(), &[b'J', 0xF6, b'r', b'g']);
        assert!(matches!(
            Encoding::Ascii.encode("Jörg"),
            Err(AdiError::Unencodable { encoding: Encoding::Ascii })
        ));
        assert!(Encoding::Latin1.encode("日本").is_err());
        assert_eq!(Encoding::Ascii.encode("abc").unwrap().as_ref(), b"abc");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("UTF8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("iso-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!("ebcdic".parse::<Encoding>().is_err());
    }
}
