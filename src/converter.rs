use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    ast::{ConstantsTable, Program, Record},
    ir::IrDocument,
};

/// Classifies single lines of source code into IR records.
pub mod classifier;

pub use classifier::{classify, SourceLine};

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    #[clap(help = "Assembly source file")]
    pub input: PathBuf,
    #[clap(help = "IR document to write")]
    pub output: PathBuf,
}

/// Builds a [`Program`] one source line at a time.
///
/// The converter owns the constants table that is filled while classifying, so independent
/// sources never share any state.
#[derive(Debug, Default)]
pub struct Converter {
    constants: ConstantsTable,
    records: Vec<Record>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: SourceLine) {
        if let Some(record) = classify(line, &mut self.constants) {
            self.records.push(record);
        }
    }

    pub fn finish(self) -> Program {
        Program::new(self.records, self.constants)
    }
}

/// Classify every line of an assembly source.
#[tracing::instrument(skip(source))]
pub fn convert_source(source: &str) -> Program {
    let mut converter = Converter::new();
    for (ix, text) in source.lines().enumerate() {
        converter.feed(SourceLine::new(ix + 1, text));
    }

    let program = converter.finish();
    tracing::debug!(
        records = program.len(),
        constants = program.constants().len(),
        "classified source"
    );
    program
}

/// Convert an assembly source file to an IR document.
pub fn convert(args: &ConvertArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot open file: {}", args.input.display()))?;

    let program = convert_source(&source);
    let json = IrDocument::from_program(&program).to_json()?;

    std::fs::write(&args.output, json)
        .with_context(|| format!("Cannot create output file: {}", args.output.display()))?;
    println!(
        "Successfully converted {} to {}",
        args.input.display(),
        args.output.display()
    );

    Ok(())
}
