//! ADX file handling and conversion to and from ADI.

use adif_adx::{
    AdxError, AdxReaderOptions, AdxWriterOptions, dump_adx, dumps_adx, load_adx,
    load_adx_with_options, loads_adx,
};
use adif_model::{Document, FieldMap, UserDef};

const ADI: &str = "log <ADIF_VER:5>3.1.4 <PROGRAMID:6>Logger <PROGRAMVERSION:3>1.0 \
<CREATED_TIMESTAMP:15>20240101 120000 <USERDEF1:19:E>SweaterSize,{S,M,L} <EOH>\n\
<CALL:5>DL1AA <APP_LOGGER_AWARD:3>DLD <SWEATERSIZE:1>M <EOR>\n\
<CALL:5>DL2BB <COMMENT:11>a <b> & 'c' <EOR>\n";

#[test]
fn adi_document_survives_adx() {
    let doc = adif_adi::load(ADI).unwrap();
    let out = dumps_adx(&doc, AdxWriterOptions::new()).unwrap();
    assert!(out.issues.is_empty());
    assert!(out.xml.contains("<COMMENT>a &lt;b&gt; &amp; "));

    let back = loads_adx(&out.xml).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn adx_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.adx");

    let mut header = FieldMap::from([("PROGRAMID", "Logger")]);
    header.push_userdef(UserDef::new("ShoeSize,{5:20}", Some("N")));
    let mut doc = Document::with_header(header);
    doc.push_record(FieldMap::from([("CALL", "DL1AA"), ("SHOESIZE", "11")]));

    let issues = dump_adx(&path, &doc).unwrap();
    assert!(issues.is_empty());

    let back = load_adx_with_options(&path, &AdxReaderOptions::new().validated()).unwrap();
    let header = back.header.as_ref().unwrap();
    assert_eq!(header.userdefs(), doc.header.as_ref().unwrap().userdefs());
    assert!(header.get("CREATED_TIMESTAMP").is_some());
    assert_eq!(back.records, doc.records);
}

#[test]
fn failed_dump_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.adx");
    let mut doc = Document::new();
    doc.push_record(FieldMap::from([("NOT_A_FIELD", "1")]));

    assert!(matches!(
        dump_adx(&path, &doc),
        Err(AdxError::UndefinedElement { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn failed_dump_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.adx");
    std::fs::write(&path, "previous contents").unwrap();
    let mut doc = Document::new();
    doc.push_record(FieldMap::from([("NOT_A_FIELD", "x")]));

    assert!(dump_adx(&path, &doc).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous contents");
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_adx(&dir.path().join("missing.adx")),
        Err(AdxError::FileNotFound { .. })
    ));
}
