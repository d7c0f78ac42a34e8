//! End-to-end behaviour of the ADI reader and writer.

use std::collections::BTreeMap;

use adif_adi::{
    AdiError, AdiReaderOptions, AdiWriterOptions, Encoding, TagCheck, decode_tag, dump,
    dump_with_options, encode_tag, load, load_records, load_with_options, pack_record, read_adi,
    read_adi_with_options, unpack, write_adi, write_adi_with_options,
};
use adif_model::{Document, FieldContext, FieldMap, UserDef};
use adif_standards::FieldValidator;
use proptest::prelude::*;

const SAMPLE: &str = "ADIF export by some logger \n\
<ADIF_VER:5>3.1.4\n<PROGRAMID:6>Logger\n<USERDEF1:4:N>Test\n<EOH>\n\n\
<CALL:6>DF1ASC <QSO_DATE:8>20230201 <TEST:4>Data \n<EOR>\n\n\
<CALL:5>DL1AA <QSO_DATE:8>20230202 \n<EOR>\n\n\
<CALL:5>DL2BB <QSO_DATE:8>20230203 \n<EOR>\n\n\
<CALL:5>DL3CC <QSO_DATE:8>20230204 \n<EOR>\n";

#[test]
fn load_sample_document() {
    let doc = load(SAMPLE).unwrap();
    let header = doc.header.as_ref().unwrap();
    assert_eq!(header.get("PROGRAMID"), Some("Logger"));
    assert_eq!(header.userdefs(), &[UserDef::new("Test", Some("N"))]);
    assert_eq!(doc.records.len(), 4);
    assert_eq!(doc.records[0].get("TEST"), Some("Data"));
}

#[test]
fn two_end_of_header_markers_are_rejected() {
    let text = "<ADIF_VER:5>3.1.4<EOH><CALL:5>DL1AA<EOR><eoh>";
    assert!(matches!(load(text), Err(AdiError::TooManyHeaders { count: 2 })));
}

#[test]
fn record_userdefs_follow_the_header() {
    let header = unpack(b"<USERDEF1:4:N>Test", Encoding::Ascii, None).unwrap();
    let declared = header.userdef_names();
    assert_eq!(declared, vec!["TEST"]);

    let with = TagCheck {
        validator: FieldValidator::default(),
        context: FieldContext::Record,
        userdefs: &declared,
    };
    let record = unpack(b"<TEST:4>Data", Encoding::Ascii, Some(&with)).unwrap();
    assert_eq!(record.get("TEST"), Some("Data"));

    let without = TagCheck { userdefs: &[], ..with };
    assert!(matches!(
        unpack(b"<TEST:4>Data", Encoding::Ascii, Some(&without)),
        Err(AdiError::IllegalFieldName { .. })
    ));

    let opts = AdiReaderOptions::new().validated();
    assert_eq!(load_with_options(SAMPLE, &opts).unwrap().num_records(), 4);
}

#[test]
fn intl_and_empty_values_never_emit() {
    let check = TagCheck {
        validator: FieldValidator::default(),
        context: FieldContext::Record,
        userdefs: &[],
    };
    for check in [None, Some(&check)] {
        assert_eq!(encode_tag("NAME_INTL", "x", None, check).unwrap(), "");
        assert_eq!(encode_tag("NAME", "", None, check).unwrap(), "");
    }
}

#[test]
fn dump_fills_header_defaults() {
    let mut doc = Document::with_header(FieldMap::from([("PROGRAMID", "X")]));
    doc.push_record(FieldMap::from([("NAME", "Joerg")]));

    let text = dump(&doc).unwrap();
    let (header, record) = text.split_once("<EOH>").unwrap();
    assert!(header.starts_with("ADIF export by adif-rs \n<PROGRAMID:1>X\n"));
    assert!(header.contains("<ADIF_VER:5>3.1.4\n"));
    assert!(header.contains("<CREATED_TIMESTAMP:15>"));
    assert!(header.contains("<PROGRAMVERSION:"));
    assert_eq!(record, "\n\n<NAME:5>Joerg \n<EOR>");
}

#[test]
fn dump_compact_document() {
    let mut doc = Document::with_header(FieldMap::from([
        ("ADIF_VER", "3.1.4"),
        ("PROGRAMID", "T"),
        ("PROGRAMVERSION", "1"),
        ("CREATED_TIMESTAMP", "20240101 000000"),
    ]));
    doc.push_record(FieldMap::from([("CALL", "DL1AA"), ("BAND", "20m")]));
    doc.push_record(FieldMap::from([("CALL", "DL2BB"), ("BAND", "40m")]));
    let opts = AdiWriterOptions::new().compact().with_comment("log");
    assert_eq!(
        dump_with_options(&doc, &opts).unwrap(),
        "log \n<ADIF_VER:5>3.1.4 <PROGRAMID:1>T <PROGRAMVERSION:1>1 \
         <CREATED_TIMESTAMP:15>20240101 000000 <EOH>\n\
         <CALL:5>DL1AA <BAND:3>20m <EOR>\n<CALL:5>DL2BB <BAND:3>40m <EOR>"
    );
}

#[test]
fn skip_equals_slicing() {
    let all: Vec<FieldMap> = load_records(SAMPLE, &AdiReaderOptions::default())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let skipped: Vec<FieldMap> = load_records(SAMPLE, &AdiReaderOptions::new().with_skip(2))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(skipped[0], all[0]);
    assert_eq!(&skipped[1..], &all[3..]);
}

#[test]
fn file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.adi");

    let doc = load(SAMPLE).unwrap();
    write_adi(&path, &doc).unwrap();
    let back = read_adi(&path).unwrap();
    assert_eq!(back.records, doc.records);
    assert_eq!(back.header.unwrap().userdefs(), doc.header.unwrap().userdefs());
}

#[test]
fn file_encoding_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.adi");
    std::fs::write(&path, b"<EOH><NAME:4>J\xF6rg<EOR>").unwrap();

    let opts = AdiReaderOptions::new().with_encoding(Encoding::Latin1);
    let doc = read_adi_with_options(&path, opts).unwrap();
    assert_eq!(doc.records[0].get("NAME"), Some("Jörg"));

    // UTF-8 read keeps byte semantics and rejects the invalid sequence
    assert!(matches!(
        read_adi(&path),
        Err(AdiError::InvalidEncoding { .. })
    ));

    let out = dir.path().join("out.adi");
    let opts = AdiWriterOptions::new().compact().with_encoding(Encoding::Latin1);
    write_adi_with_options(&out, &Document::new(), opts).unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"");
}

#[test]
fn rejected_document_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.adi");
    std::fs::write(&path, "previous contents").unwrap();

    let mut doc = Document::new();
    doc.push_record(FieldMap::from([("NOT_A_FIELD", "x")]));
    assert!(matches!(
        write_adi(&path, &doc),
        Err(AdiError::IllegalFieldName { .. })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous contents");
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.adi");
    assert!(matches!(read_adi(&path), Err(AdiError::FileNotFound { .. })));
}

#[test]
fn tag_spacing_survives_load() {
    let mut doc = Document::new();
    doc.push_record(FieldMap::from([("CALL", "DL1AA"), ("NAME", "Hans"), ("QSO_DATE", "20230201")]));

    for spaces in [0, 3] {
        let opts = AdiWriterOptions::new().with_spaces(spaces);
        let text = dump_with_options(&doc, &opts).unwrap();
        assert_eq!(text.contains("Hans<QSO_DATE"), spaces == 0);
        assert_eq!(load(&text).unwrap().records, doc.records);
    }
}

fn field_maps() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("F[A-Z0-9]{0,8}", "[ -~\r\n]{1,24}", 1..8)
}

proptest! {
    #[test]
    fn unpack_reverses_pack(fields in field_maps()) {
        let record: FieldMap = fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let opts = AdiWriterOptions::new();
        let packed = pack_record(&record, &opts, None).unwrap().unwrap();
        let section = packed.strip_suffix("<EOR>").unwrap();
        let back = unpack(section.as_bytes(), Encoding::Ascii, None).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn document_roundtrip(records in proptest::collection::vec(
        proptest::collection::btree_map("F[A-Z0-9]{0,8}", "[a-zA-Z0-9 ]{1,12}", 1..5),
        0..5,
    )) {
        let mut doc = Document::new();
        for fields in &records {
            doc.push_record(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect());
        }
        let text = dump_with_options(&doc, &AdiWriterOptions::new().lenient()).unwrap();
        let back = load(&text).unwrap();
        prop_assert_eq!(back.records, doc.records);
    }

    #[test]
    fn decode_takes_declared_or_remaining_bytes(
        value in "[ -~]{0,16}",
        extra in 0usize..8,
    ) {
        let declared = value.len() + extra;
        let text = format!("<NAME:{declared}>{value}");
        let (tag, end) = decode_tag(text.as_bytes(), 0).unwrap();
        prop_assert_eq!(tag.name, "NAME");
        prop_assert_eq!(tag.value, value.as_bytes());
        prop_assert_eq!(end, text.len());
    }
}
