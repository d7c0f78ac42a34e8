//! Splitting ADI text into header and record sections.

use crate::error::{AdiError, Result};

/// End-of-header marker (matched case-insensitively).
pub const EOH_MARKER: &[u8] = b"<EOH>";
/// End-of-record marker (matched case-insensitively).
pub const EOR_MARKER: &[u8] = b"<EOR>";

/// Find `marker` in `data` at or after `from`, ignoring ASCII case.
#[must_use]
pub fn find_marker(data: &[u8], marker: &[u8], from: usize) -> Option<usize> {
    if from > data.len() {
        return None;
    }
    data[from..]
        .windows(marker.len())
        .position(|window| window.eq_ignore_ascii_case(marker))
        .map(|offset| from + offset)
}

fn count_markers(data: &[u8], marker: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while let Some(at) = find_marker(data, marker, pos) {
        count += 1;
        pos = at + marker.len();
    }
    count
}

/// Separate the header section from the record data.
///
/// Without an end-of-header marker the header is `None` and all data is
/// record data.
pub fn split_header(data: &[u8]) -> Result<(Option<&[u8]>, &[u8])> {
    match count_markers(data, EOH_MARKER) {
        0 => Ok((None, data)),
        1 => {
            let at = find_marker(data, EOH_MARKER, 0).unwrap_or_default();
            Ok((Some(&data[..at]), &data[at + EOH_MARKER.len()..]))
        }
        count => Err(AdiError::TooManyHeaders { count }),
    }
}

fn is_blank(segment: &[u8]) -> bool {
    segment.iter().all(u8::is_ascii_whitespace)
}

/// Lazy iterator over the non-blank record sections of record data.
#[derive(Debug, Clone)]
pub struct RecordSections<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordSections<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for RecordSections<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.data.len() {
            let start = self.pos;
            let segment = match find_marker(self.data, EOR_MARKER, start) {
                Some(at) => {
                    self.pos = at + EOR_MARKER.len();
                    &self.data[start..at]
                }
                None => {
                    self.pos = self.data.len();
                    let tail = &self.data[start..];
                    if !is_blank(tail) {
                        tracing::warn!(offset = start, "record data without end-of-record marker");
                    }
                    tail
                }
            };
            if !is_blank(segment) {
                return Some(segment);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_marker_case_insensitive() {
        assert_eq!(find_marker(b"ab<eOh>", EOH_MARKER, 0), Some(2));
        assert_eq!(find_marker(b"<EOR><EOR>", EOR_MARKER, 1), Some(5));
        assert_eq!(find_marker(b"<EO", EOR_MARKER, 0), None);
        assert_eq!(find_marker(b"", EOR_MARKER, 3), None);
    }

    #[test]
    fn test_split_header() {
        let (header, rest) = split_header(b"comment <A:1>x<eoh>\n<B:1>y<EOR>").unwrap();
        assert_eq!(header, Some(&b"comment <A:1>x"[..]));
        assert_eq!(rest, b"\n<B:1>y<EOR>");

        let (header, rest) = split_header(b"<B:1>y<EOR>").unwrap();
        assert!(header.is_none());
        assert_eq!(rest, b"<B:1>y<EOR>");
    }

    #[test]
    fn test_split_header_twice() {
        let err = split_header(b"<EOH><A:1>x<EOR><eoh>").unwrap_err();
        assert!(matches!(err, AdiError::TooManyHeaders { count: 2 }));
    }

    #[test]
    fn test_record_sections() {
        let data = b"\n<A:1>1<EOR>\n\n<A:1>2<eor>\n  \n<EOR><A:1>3";
        let sections: Vec<_> = RecordSections::new(data).collect();
        assert_eq!(sections, vec![&b"\n<A:1>1"[..], b"\n\n<A:1>2", b"<A:1>3"]);
    }

    #[test]
    fn test_record_sections_blank() {
        assert_eq!(RecordSections::new(b"\n \r\n").count(), 0);
        assert_eq!(RecordSections::new(b"").count(), 0);
    }
}
