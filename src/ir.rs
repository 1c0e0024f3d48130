//! The IR document: the JSON form of a [`Program`] shared between all commands.
//!
//! ```text
//! {
//!   "assembly_program": {
//!     "metadata": { "total_lines": 2, "processor": "6502" },
//!     "constants": [],
//!     "labels": [ { "name": "Start", "line": 1 } ],
//!     "instructions": [ { "mnemonic": "lda", "operand": "#$05", "line": 2, "comment": "five" } ],
//!     "data": [],
//!     "directives": [],
//!     "program_flow": [
//!       { "line": 1, "type": "label", "content": "Start" },
//!       { "line": 2, "type": "instruction", "content": "lda #$05", "comment": "five" }
//!     ]
//!   }
//! }
//! ```
//!
//! Reading is lenient: missing fields default to an empty string or a line number of `-1`, and
//! missing sections are empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::{
    Constant, DataBlock, DataKind, Directive, Instruction, Node, Program, Record,
};

pub const PROCESSOR: &str = "6502";

#[derive(Error, Debug)]
pub enum IrError {
    #[error("Malformed IR document: {0}")]
    Json(#[from] serde_json::Error),
}

fn missing_line() -> i64 {
    -1
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub total_lines: usize,
    pub processor: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            total_lines: 0,
            processor: PROCESSOR.to_owned(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ConstantEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "missing_line")]
    pub line: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct LabelEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default = "missing_line")]
    pub line: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct InstructionEntry {
    #[serde(default)]
    pub mnemonic: String,
    #[serde(default)]
    pub operand: String,
    #[serde(default = "missing_line")]
    pub line: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct DataEntry {
    #[serde(default)]
    pub directive: String,
    /// `"bytes"` or `"words"`
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default = "missing_line")]
    pub line: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct DirectiveEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub operand: String,
    #[serde(default = "missing_line")]
    pub line: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One entry of the order preserving program flow.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct FlowEntry {
    #[serde(default = "missing_line")]
    pub line: i64,
    /// One of `label`, `instruction`, `data`, `directive`, `constant` or `unknown`
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyProgram {
    pub metadata: Metadata,
    pub constants: Vec<ConstantEntry>,
    pub labels: Vec<LabelEntry>,
    pub instructions: Vec<InstructionEntry>,
    pub data: Vec<DataEntry>,
    pub directives: Vec<DirectiveEntry>,
    pub program_flow: Vec<FlowEntry>,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct IrDocument {
    #[serde(default)]
    pub assembly_program: AssemblyProgram,
}

/// Records keyed by line number while a document is read back.
///
/// Entries without a valid line number can't be ordered and are dropped.
#[derive(Default)]
struct LineMap {
    records: BTreeMap<usize, Record>,
}

impl LineMap {
    fn valid_line(line: i64) -> Option<usize> {
        match usize::try_from(line) {
            Ok(line) if line > 0 => Some(line),
            _ => {
                tracing::warn!(line, "dropping IR entry without a valid line number");
                None
            }
        }
    }

    /// Insert a record, replacing any earlier record on the same line.
    fn insert(&mut self, line: i64, node: Node, comment: &Option<String>) {
        if let Some(line) = Self::valid_line(line) {
            self.records
                .insert(line, Record::new(line, node, non_empty(comment)));
        }
    }
}

fn non_empty(comment: &Option<String>) -> Option<String> {
    comment.clone().filter(|comment| !comment.is_empty())
}

fn to_line(line: usize) -> i64 {
    i64::try_from(line).unwrap_or(i64::MAX)
}

/// Recover a record from a program flow entry that has no matching section entry.
fn recover(entry: &FlowEntry) -> Option<Node> {
    match (entry.kind.as_str(), entry.content.is_empty()) {
        ("unknown", true) if non_empty(&entry.comment).is_some() => Some(Node::Comment),
        (_, true) => None,
        ("label", false) => Some(Node::Label(entry.content.clone())),
        ("unknown", false) => Some(Node::Unknown(entry.content.clone())),
        (kind, false) => {
            tracing::warn!(
                line = entry.line,
                kind,
                "program flow entry missing from its section, passing it through"
            );
            Some(Node::Unknown(entry.content.clone()))
        }
    }
}

impl IrDocument {
    /// Build the document for a program.
    #[tracing::instrument(skip(program))]
    pub fn from_program(program: &Program) -> IrDocument {
        let mut doc = AssemblyProgram {
            metadata: Metadata {
                total_lines: program.len(),
                ..Metadata::default()
            },
            ..AssemblyProgram::default()
        };

        for record in program.records() {
            let line = to_line(record.line);
            let comment = record.comment.clone();

            match &record.node {
                Node::Constant(constant) => doc.constants.push(ConstantEntry {
                    name: constant.identifier.clone(),
                    value: constant.value.clone(),
                    line,
                    comment: comment.clone(),
                }),
                Node::Label(name) => doc.labels.push(LabelEntry {
                    name: name.clone(),
                    line,
                    comment: comment.clone(),
                }),
                Node::Instruction(ins) => doc.instructions.push(InstructionEntry {
                    mnemonic: ins.mnemonic.clone(),
                    operand: ins.operand.clone(),
                    line,
                    comment: comment.clone(),
                }),
                Node::Data(data) => doc.data.push(DataEntry {
                    directive: data.directive.clone(),
                    kind: data.kind.as_str().to_owned(),
                    values: data.values.clone(),
                    line,
                    comment: comment.clone(),
                }),
                Node::Directive(directive) => doc.directives.push(DirectiveEntry {
                    name: directive.name.clone(),
                    operand: directive.operand.clone(),
                    line,
                    comment: comment.clone(),
                }),
                Node::Comment | Node::Unknown(_) => (),
            }

            doc.program_flow.push(FlowEntry {
                line,
                kind: record.node.flow_type().to_owned(),
                content: record.node.content(),
                comment,
            });
        }

        IrDocument {
            assembly_program: doc,
        }
    }

    /// Rebuild the program described by the document.
    ///
    /// Records are ordered by line number regardless of the order of the entries in the
    /// document. When the document has a program flow it decides which lines exist and of
    /// what kind they are, while the sections supply the details. A line whose section entry
    /// is missing or of another kind is recovered from the flow content, and section entries
    /// without a flow entry are dropped. Without a program flow the sections alone make up the
    /// program, and a later section replaces an earlier one on the same line.
    #[tracing::instrument(skip(self))]
    pub fn to_program(&self) -> Program {
        let doc = &self.assembly_program;
        let mut lines = LineMap::default();

        for entry in &doc.constants {
            let constant = Constant::new(&entry.name, &entry.value);
            lines.insert(entry.line, Node::Constant(constant), &entry.comment);
        }
        for entry in &doc.labels {
            lines.insert(entry.line, Node::Label(entry.name.clone()), &entry.comment);
        }
        for entry in &doc.instructions {
            let ins = Instruction::new(&entry.mnemonic, &entry.operand);
            lines.insert(entry.line, Node::Instruction(ins), &entry.comment);
        }
        for entry in &doc.data {
            let kind = match entry.kind.as_str() {
                "bytes" => DataKind::Bytes,
                "words" => DataKind::Words,
                _ => DataKind::from_directive(&entry.directive),
            };
            let data = DataBlock::new(kind, &entry.directive, entry.values.clone());
            lines.insert(entry.line, Node::Data(data), &entry.comment);
        }
        for entry in &doc.directives {
            let directive = Directive::new(&entry.name, &entry.operand);
            lines.insert(entry.line, Node::Directive(directive), &entry.comment);
        }

        if doc.program_flow.is_empty() {
            return Program::from_records(lines.records.into_values().collect());
        }

        let mut records: BTreeMap<usize, Record> = BTreeMap::new();
        for entry in &doc.program_flow {
            let line = match LineMap::valid_line(entry.line) {
                Some(line) => line,
                None => continue,
            };
            if records.contains_key(&line) {
                tracing::warn!(line, "duplicate program flow entry, keeping the first");
                continue;
            }
            let record = match lines.records.remove(&line) {
                Some(record) if record.node.flow_type() == entry.kind => Some(record),
                section => {
                    if let Some(record) = section {
                        tracing::warn!(
                            line,
                            kind = entry.kind.as_str(),
                            section = record.node.flow_type(),
                            "section entry disagrees with the program flow"
                        );
                    }
                    recover(entry).map(|node| Record::new(line, node, non_empty(&entry.comment)))
                }
            };
            if let Some(record) = record {
                records.insert(line, record);
            }
        }
        for line in lines.records.keys() {
            tracing::warn!(line, "dropping section entry missing from the program flow");
        }

        Program::from_records(records.into_values().collect())
    }

    pub fn to_json(&self) -> Result<String, IrError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<IrDocument, IrError> {
        Ok(serde_json::from_str(json)?)
    }
}
