use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{ast::Program, ir::IrDocument, translator};

/// The main source file with the translated code.
pub mod code;

/// The header with the constant definitions.
pub mod constants;

/// The data loader and the data pointers header.
pub mod data;

/// First lines of every generated file.
pub const GENERATED_HEADER: &str =
    "// This is an automatically generated file.\n// Do not edit directly.\n//\n";

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Invalid base address: {0}")]
    InvalidAddress(String),
    #[error("Cannot create output directory: {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot create output file: {}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse an address given as `0x8000`, `$8000` or `32768`.
pub fn parse_address(text: &str) -> Result<u16, EmitError> {
    let text = text.trim();
    let parsed = if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
    {
        u16::from_str_radix(hex, 16)
    } else {
        text.parse::<u16>()
    };
    parsed.map_err(|_| EmitError::InvalidAddress(text.to_owned()))
}

/// Names and addresses the generated code is built around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Prefix of the file names and the generated types, e.g. `SMB` for `SMBEngine`
    pub prefix: String,
    /// Load address of the first data table
    pub base_address: u16,
    /// Label jumped to on reset
    pub start_label: String,
    /// Label jumped to on NMI
    pub interrupt_label: String,
    pub exit_label: String,
    pub jump_table: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            prefix: "SMB".to_owned(),
            base_address: 0x8000,
            start_label: "Start".to_owned(),
            interrupt_label: "NonMaskableInterrupt".to_owned(),
            exit_label: translator::DEFAULT_EXIT_LABEL.to_owned(),
            jump_table: translator::DEFAULT_JUMP_TABLE.to_owned(),
        }
    }
}

impl EmitConfig {
    /// Name of the class implementing the generated code.
    pub fn engine(&self) -> String {
        format!("{}Engine", self.prefix)
    }

    /// Name of the data pointers struct.
    pub fn pointers(&self) -> String {
        format!("{}DataPointers", self.prefix)
    }
}

#[derive(clap::Args, Debug)]
pub struct EmitArgs {
    #[clap(help = "IR document to read")]
    pub input: PathBuf,
    #[clap(help = "Directory to write the generated files to")]
    pub output: PathBuf,
    #[clap(long, default_value = "SMB")]
    #[clap(help = "Prefix of the generated file and type names")]
    pub prefix: String,
    #[clap(long, default_value = "0x8000", value_parser = parse_address)]
    #[clap(help = "Load address of the first data table")]
    pub base_address: u16,
    #[clap(long, default_value = "Start")]
    #[clap(help = "Label to start at on reset")]
    pub start_label: String,
    #[clap(long, default_value = "NonMaskableInterrupt")]
    #[clap(help = "Label to start at on NMI")]
    pub interrupt_label: String,
    #[clap(long, default_value = translator::DEFAULT_EXIT_LABEL)]
    #[clap(help = "Jumps to this label end the program")]
    pub exit_label: String,
    #[clap(long, default_value = translator::DEFAULT_JUMP_TABLE)]
    #[clap(help = "Calls to this subroutine are left for manual translation")]
    pub jump_table: String,
}

impl From<&EmitArgs> for EmitConfig {
    fn from(args: &EmitArgs) -> Self {
        Self {
            prefix: args.prefix.clone(),
            base_address: args.base_address,
            start_label: args.start_label.clone(),
            interrupt_label: args.interrupt_label.clone(),
            exit_label: args.exit_label.clone(),
            jump_table: args.jump_table.clone(),
        }
    }
}

/// A generated file, not yet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub contents: String,
}

/// Lowers a program into C++ source files.
#[derive(Debug, Default)]
pub struct Emitter {
    config: EmitConfig,
}

impl Emitter {
    pub fn new(config: EmitConfig) -> Self {
        Self { config }
    }

    /// Generate every file for a program.
    ///
    /// Return sites are numbered from 0 for every call.
    #[tracing::instrument(skip(program))]
    pub fn emit(&self, program: &Program) -> Vec<GeneratedFile> {
        let prefix = &self.config.prefix;
        let tables = data::collect_tables(program);
        tracing::debug!(tables = tables.len(), "collected data tables");

        vec![
            GeneratedFile {
                name: format!("{}.cpp", prefix),
                contents: code::generate_code(program, &self.config),
            },
            GeneratedFile {
                name: format!("{}Data.cpp", prefix),
                contents: data::generate_data(&tables, &self.config),
            },
            GeneratedFile {
                name: format!("{}DataPointers.hpp", prefix),
                contents: data::generate_pointers(&tables, &self.config),
            },
            GeneratedFile {
                name: format!("{}Constants.hpp", prefix),
                contents: constants::generate_constants(program, &self.config),
            },
        ]
    }
}

/// Write generated files into a directory, creating it if needed.
pub fn write_files(dir: &Path, files: &[GeneratedFile]) -> Result<(), EmitError> {
    std::fs::create_dir_all(dir).map_err(|source| EmitError::CreateDir {
        path: dir.to_owned(),
        source,
    })?;
    for file in files {
        let path = dir.join(&file.name);
        std::fs::write(&path, &file.contents)
            .map_err(|source| EmitError::WriteFile { path, source })?;
    }
    Ok(())
}

/// Generate C++ code from an IR document.
pub fn emit(args: &EmitArgs) -> Result<()> {
    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot open JSON file: {}", args.input.display()))?;
    let document = IrDocument::from_json(&json)
        .with_context(|| format!("Cannot read IR document: {}", args.input.display()))?;

    let files = Emitter::new(EmitConfig::from(args)).emit(&document.to_program());
    write_files(&args.output, &files)?;

    println!("Generated C++ files in {}:", args.output.display());
    for file in &files {
        println!("  {}", file.name);
    }

    Ok(())
}
