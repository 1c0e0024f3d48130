use crate::{
    ast::{Mnemonic, Node, Program, Record},
    translator::{statement::resume_label, Translator},
};

use super::{EmitConfig, GENERATED_HEADER};

const SEPARATOR: &str =
    "\n//------------------------------------------------------------------------\n";

/// A label and the records following it up to the next label.
#[derive(Debug, PartialEq, Eq)]
pub struct LabelBlock<'a> {
    pub label: &'a str,
    pub comment: Option<&'a str>,
    pub records: Vec<&'a Record>,
}

/// Split a program into label blocks.
///
/// Code and data before the first label can't be jumped to and are dropped.
pub fn label_blocks(program: &Program) -> Vec<LabelBlock> {
    let mut blocks: Vec<LabelBlock> = vec![];

    for record in program.records() {
        if let Node::Label(label) = &record.node {
            blocks.push(LabelBlock {
                label,
                comment: record.comment.as_deref(),
                records: vec![],
            });
            continue;
        }

        match blocks.last_mut() {
            Some(block) => block.records.push(record),
            None if matches!(record.node, Node::Instruction(_) | Node::Data(_)) => {
                tracing::warn!(line = record.line, "skipping code before the first label");
            }
            None => {}
        }
    }

    blocks
}

fn push_comment(out: &mut String, comment: Option<&str>) {
    if let Some(comment) = comment {
        out.push_str(&format!(" // {}", comment));
    }
    out.push('\n');
}

fn generate_block(out: &mut String, block: &LabelBlock, translator: &mut Translator) {
    out.push_str(&format!("\n{}:", block.label));
    push_comment(out, block.comment);

    for record in &block.records {
        match &record.node {
            Node::Instruction(ins) => {
                let statement = translator.translate(ins);
                if statement.is_marker() {
                    tracing::debug!(line = record.line, %statement, "translation needs attention");
                }
                out.push_str(&format!("    {}", statement));
                push_comment(out, record.comment.as_deref());

                if let Some(label) = statement.resume_label() {
                    out.push_str(&format!("{}:\n", label));
                }
                if ins.opcode() == Some(Mnemonic::RTS) {
                    out.push_str(SEPARATOR);
                }
            }
            Node::Data(_) => {
                out.push_str(&format!("    /* Data: {} */", record.node.content()));
                push_comment(out, record.comment.as_deref());
            }
            _ => {}
        }
    }
}

fn generate_return_handler(out: &mut String, return_sites: usize) {
    out.push_str("// Return handler\n");
    out.push_str("// This emulates the RTS instruction using a generated jump table\n//\n");
    out.push_str("Return:\n");
    out.push_str("    switch (popReturnIndex())\n    {\n");
    for return_site in 0..return_sites {
        out.push_str(&format!(
            "    case {}:\n        goto {};\n",
            return_site,
            resume_label(return_site)
        ));
    }
    out.push_str("    }\n");
}

/// Generate the main source file: the entry point dispatch, one block of statements per label
/// and the return handler.
#[tracing::instrument(skip(program))]
pub fn generate_code(program: &Program, config: &EmitConfig) -> String {
    let mut translator = Translator::new(&config.exit_label, &config.jump_table);

    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str(&format!("#include \"{}.hpp\"\n\n", config.prefix));
    out.push_str(&format!("void {}::code(int mode)\n{{\n", config.engine()));
    out.push_str("    switch (mode)\n    {\n");
    out.push_str(&format!(
        "    case 0:\n        loadConstantData();\n        goto {};\n",
        config.start_label
    ));
    out.push_str(&format!("    case 1:\n        goto {};\n", config.interrupt_label));
    out.push_str("    }\n\n");

    let blocks = label_blocks(program);
    for block in &blocks {
        generate_block(&mut out, block, &mut translator);
    }

    tracing::debug!(
        blocks = blocks.len(),
        return_sites = translator.return_sites(),
        "generated code"
    );
    generate_return_handler(&mut out, translator.return_sites());
    out.push_str("}\n");
    out
}
