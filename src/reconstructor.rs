use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    ast::{Node, Program, Record},
    ir::IrDocument,
};

/// Column at which trailing comments start.
pub const COMMENT_COLUMN: usize = 40;

const INDENT: &str = "    ";

#[derive(clap::Args, Debug)]
pub struct UnconvertArgs {
    #[clap(help = "IR document to read")]
    pub input: PathBuf,
    #[clap(help = "Assembly source file to write")]
    pub output: PathBuf,
}

/// Collapse whitespace runs to a single space and trim the ends.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn indented(text: impl ToString) -> String {
    format!("{}{}", INDENT, normalize(&text.to_string()))
}

/// Render the code part of a record, without its comment.
///
/// Returns an empty string for records that have nothing to render.
fn render_code(node: &Node) -> String {
    match node {
        Node::Constant(constant) => normalize(&constant.to_string()),
        Node::Label(name) => format!("{}:", normalize(name)),
        Node::Instruction(ins) if normalize(&ins.mnemonic).is_empty() => String::new(),
        Node::Instruction(ins) => indented(ins),
        Node::Data(data) if normalize(&data.directive).is_empty() => String::new(),
        Node::Data(data) => indented(data),
        Node::Directive(directive) => match normalize(&directive.name) {
            name if name.is_empty() => String::new(),
            name if name.starts_with('.') => normalize(&directive.to_string()),
            _ => indented(directive),
        },
        Node::Comment => String::new(),
        Node::Unknown(text) => text.clone(),
    }
}

/// Reconstruct a single line of assembly from a record.
///
/// E.g. `    lda #$05                            ; load five`
pub fn reconstruct_line(record: &Record) -> String {
    let mut line = render_code(&record.node);

    if let Some(comment) = &record.comment {
        let comment = normalize(comment);
        if line.is_empty() {
            line = format!("; {}", comment);
        } else {
            line = format!("{:<width$}; {}", line, comment, width = COMMENT_COLUMN);
        }
    }

    line
}

/// Reconstruct assembly source from a program, one line per record.
///
/// Records that render to nothing are left out.
#[tracing::instrument(skip(program))]
pub fn reconstruct(program: &Program) -> String {
    let mut out = String::new();
    for record in program.records() {
        let line = reconstruct_line(record);
        if line.is_empty() {
            tracing::debug!(line = record.line, "skipping empty record");
            continue;
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Convert an IR document back to assembly source.
pub fn unconvert(args: &UnconvertArgs) -> Result<()> {
    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot open JSON file: {}", args.input.display()))?;

    let document = IrDocument::from_json(&json)
        .with_context(|| format!("Cannot read IR document: {}", args.input.display()))?;
    let source = reconstruct(&document.to_program());

    std::fs::write(&args.output, source)
        .with_context(|| format!("Cannot create output file: {}", args.output.display()))?;
    println!(
        "Successfully converted {} to ca65-compatible {}",
        args.input.display(),
        args.output.display()
    );

    Ok(())
}
