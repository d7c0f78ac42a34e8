//! Decode the tags of one header or record section into a field map.

use adif_model::{FieldMap, USERDEF_PREFIX, UserDef};

use crate::error::Result;
use crate::tag::{TagCheck, decode_tag};
use crate::types::Encoding;

/// Decode every tag in `section`.
///
/// Text outside tags is ignored. `USERDEF*` tags become user-defined field
/// declarations; all other names are stored uppercased. A repeated name keeps
/// its first position and takes the last value.
pub fn unpack(section: &[u8], encoding: Encoding, check: Option<&TagCheck<'_>>) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    let mut pos = 0;

    while let Some(offset) = section[pos..].iter().position(|&b| b == b'<') {
        let (tag, end) = decode_tag(section, pos + offset)?;
        if let Some(check) = check {
            check.check(tag.name)?;
        }

        let name = tag.name.to_ascii_uppercase();
        let value = encoding.decode(tag.value, &name)?;
        if tag.value.len() < tag.length {
            tracing::warn!(
                field = %name,
                declared = tag.length,
                available = tag.value.len(),
                "value truncated at end of input"
            );
        }

        if name.starts_with(USERDEF_PREFIX) {
            fields.push_userdef(UserDef {
                dtype: tag.dtype.map(str::to_owned),
                definition: value,
            });
        } else if fields.insert(&name, value).is_some() {
            tracing::warn!(field = %name, "duplicate field, keeping last value");
        }
        pos = end;
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use adif_model::FieldContext;
    use adif_standards::FieldValidator;

    use super::*;
    use crate::error::AdiError;

    #[test]
    fn test_unpack_record() {
        let fields = unpack(
            b"<CALL:6>DF1ASC comment <qso_date:8:D>20240101 <NAME:4>J\xF6rg",
            Encoding::Latin1,
            None,
        )
        .unwrap();
        assert_eq!(fields.get("CALL"), Some("DF1ASC"));
        assert_eq!(fields.get("QSO_DATE"), Some("20240101"));
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["CALL", "QSO_DATE", "NAME"]);
    }

    #[test]
    fn test_unpack_utf8_byte_length() {
        let fields = unpack("<NAME:5>Jörg<CALL:1>X".as_bytes(), Encoding::Utf8, None).unwrap();
        assert_eq!(fields.get("NAME"), Some("Jörg"));
        assert_eq!(fields.get("CALL"), Some("X"));

        let err = unpack("<NAME:2>Jörg".as_bytes(), Encoding::Utf8, None).unwrap_err();
        assert!(matches!(err, AdiError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_unpack_userdefs() {
        let fields = unpack(
            b"<USERDEF1:12:E>Test,{A,B,C} <userdef2:12:N>Test2,{5:20} <PROGRAMID:1>X",
            Encoding::Ascii,
            None,
        )
        .unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.userdefs().len(), 2);
        assert_eq!(fields.userdefs()[0].dtype.as_deref(), Some("E"));
        assert_eq!(fields.userdefs()[1].definition, "Test2,{5:20}");
        assert_eq!(fields.userdef_names(), vec!["TEST", "TEST2"]);
    }

    #[test]
    fn test_unpack_duplicate_last_wins() {
        let fields = unpack(b"<A:1>1<B:1>2<a:1>3", Encoding::Ascii, None).unwrap();
        assert_eq!(fields.iter().collect::<Vec<_>>(), vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_unpack_checked() {
        let declared = vec!["TEST".to_string()];
        let check = TagCheck {
            validator: FieldValidator::default(),
            context: FieldContext::Record,
            userdefs: &declared,
        };
        assert!(unpack(b"<CALL:1>X<TEST:1>Y", Encoding::Ascii, Some(&check)).is_ok());
        let err = unpack(b"<CALL:1>X<OTHER:1>Y", Encoding::Ascii, Some(&check)).unwrap_err();
        assert!(matches!(err, AdiError::IllegalFieldName { ref field, .. } if field == "OTHER"));
    }

    #[test]
    fn test_unpack_empty() {
        assert!(unpack(b"  just a comment\n", Encoding::Ascii, None).unwrap().is_empty());
    }
}
