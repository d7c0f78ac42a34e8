use std::path::PathBuf;
use std::time::Instant;

use adif_cli::check::{CheckReport, check_file};
use adif_cli::convert::{FileFormat, ReadSettings, WriteSettings, read_document, write_document};
use adif_model::FieldContext;
use adif_standards::FieldTable;
use anyhow::{Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use crate::cli::{CheckArgs, ConvertArgs, FieldsArgs};
use crate::summary::{apply_table_style, header_cell};

/// Outcome of a conversion.
#[derive(Debug)]
pub struct ConvertSummary {
    pub input: PathBuf,
    pub input_format: FileFormat,
    pub output: PathBuf,
    pub output_format: FileFormat,
    pub records: usize,
    pub issues: Vec<String>,
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertSummary> {
    let span = info_span!("convert", input = %args.input.display(), output = %args.output.display());
    let _guard = span.enter();
    let start = Instant::now();

    let input_format = FileFormat::from_path(&args.input)?;
    let output_format = FileFormat::from_path(&args.output)?;
    if args.input == args.output {
        bail!("input and output are the same file: {}", args.input.display());
    }

    let read = ReadSettings {
        validate: args.validate,
        skip: args.skip,
        encoding: args.encoding.into(),
    };
    let doc = read_document(&args.input, &read)?;

    let write = WriteSettings {
        validate: args.validate,
        compact: args.compact,
        lax: args.lax,
        replace_non_ascii: args.replace_non_ascii,
    };
    let issues = write_document(&args.output, &doc, &write)?;

    info!(
        records = doc.records.len(),
        issues = issues.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(ConvertSummary {
        input: args.input.clone(),
        input_format,
        output: args.output.clone(),
        output_format,
        records: doc.records.len(),
        issues,
    })
}

pub fn run_check(args: &CheckArgs) -> Result<Vec<CheckReport>> {
    args.inputs
        .iter()
        .map(|path| check_file(path, args.encoding.into()))
        .collect()
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let table_data = FieldTable::adif_3_1_4();
    let contexts = match args.context {
        Some(context) => vec![FieldContext::from(context)],
        None => vec![FieldContext::Header, FieldContext::Record],
    };
    let filter = args.filter.as_deref().map(str::to_ascii_uppercase);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Context"),
        header_cell("Data Type"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    let mut count = 0usize;
    for context in contexts {
        let matching = table_data
            .definitions(context)
            .filter(|d| filter.as_deref().is_none_or(|f| d.name.contains(f)));
        for definition in matching {
            table.add_row(vec![
                definition.name.clone(),
                context.to_string(),
                definition.data_type.clone(),
                definition.description.clone(),
            ]);
            count += 1;
        }
    }
    if count == 0 {
        println!("No matching fields.");
    } else {
        println!("{table}");
    }
    Ok(())
}
