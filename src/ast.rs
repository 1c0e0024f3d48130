pub mod constant;
pub mod directive;
pub mod instruction;

pub use constant::{Constant, ConstantsTable};
pub use directive::{DataBlock, DataKind, Directive};
pub use instruction::{Instruction, Mnemonic};

/// A single classified line of source code.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Node {
    /// A label to mark a location in the code, e.g. `init:`
    Label(String),
    /// A CPU instruction, e.g. `lda #$05`
    Instruction(Instruction),
    /// A `.db` or `.dw` data block
    Data(DataBlock),
    /// Any other dot-prefixed directive, e.g. `.org $8000`
    Directive(Directive),
    /// A constant definition, e.g. `Speed = $10`
    Constant(Constant),
    /// A line that carries nothing but a comment
    Comment,
    /// A line that could not be classified, kept verbatim
    Unknown(String),
}

impl Node {
    /// The `type` of the node in the program flow of the IR document.
    pub fn flow_type(&self) -> &'static str {
        match self {
            Node::Label(_) => "label",
            Node::Instruction(_) => "instruction",
            Node::Data(_) => "data",
            Node::Directive(_) => "directive",
            Node::Constant(_) => "constant",
            Node::Comment | Node::Unknown(_) => "unknown",
        }
    }

    /// Label name, mnemonic, directive name or constant name.
    pub fn primary(&self) -> &str {
        match self {
            Node::Label(name) => name,
            Node::Instruction(ins) => &ins.mnemonic,
            Node::Data(data) => &data.directive,
            Node::Directive(directive) => &directive.name,
            Node::Constant(constant) => &constant.identifier,
            Node::Comment => "",
            Node::Unknown(text) => text,
        }
    }

    /// Trailing text of instructions, directives and constants.
    pub fn operand(&self) -> &str {
        match self {
            Node::Instruction(ins) => &ins.operand,
            Node::Directive(directive) => &directive.operand,
            Node::Constant(constant) => &constant.value,
            _ => "",
        }
    }

    /// Primary followed by the operand, if there is one.
    pub fn content(&self) -> String {
        match self.operand() {
            "" => self.primary().to_owned(),
            operand => format!("{} {}", self.primary(), operand),
        }
    }
}

/// A classified line together with its provenance and trailing comment.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Record {
    /// 1-based line number in the source file
    pub line: usize,
    pub node: Node,
    pub comment: Option<String>,
}

impl Record {
    pub fn new(line: usize, node: Node, comment: Option<String>) -> Record {
        Record {
            line,
            node,
            comment,
        }
    }
}

/// The intermediate representation of a whole program.
///
/// Records are kept ordered by line number. The program is not modified after it has been
/// built; every later stage derives a separate artifact from it.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Program {
    records: Vec<Record>,
    constants: ConstantsTable,
}

impl Program {
    pub fn new(records: Vec<Record>, constants: ConstantsTable) -> Program {
        let mut records = records;
        records.sort_by_key(|record| record.line);
        Program { records, constants }
    }

    /// Build a program from records alone, collecting the constants table from them.
    pub fn from_records(records: Vec<Record>) -> Program {
        let mut constants = ConstantsTable::new();
        let mut records = records;
        records.sort_by_key(|record| record.line);
        for record in &records {
            if let Node::Constant(constant) = &record.node {
                constants.define(constant);
            }
        }
        Program { records, constants }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn constants(&self) -> &ConstantsTable {
        &self.constants
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
