use std::fmt;

/// Commands to the assembler that are not instructions and don't emit data.
///
/// E.g. `.org $8000`. Only the first word after the name is kept as the operand.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Directive {
    /// Name including the leading dot, e.g. `.org`
    pub name: String,
    pub operand: String,
}

impl Directive {
    pub fn new(name: &str, operand: &str) -> Directive {
        Directive {
            name: name.to_owned(),
            operand: operand.to_owned(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operand.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.operand)
        }
    }
}

/// Width of the elements of a data block.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DataKind {
    /// `.db`
    Bytes,
    /// `.dw`
    Words,
}

impl DataKind {
    /// Infer the kind from a directive name, e.g. `.dw` or `.word`.
    pub fn from_directive(directive: &str) -> DataKind {
        if directive.starts_with(".dw") || directive == ".word" {
            DataKind::Words
        } else {
            DataKind::Bytes
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Bytes => "bytes",
            DataKind::Words => "words",
        }
    }
}

/// A block of literal data, e.g. `.db $01, $02, $03`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DataBlock {
    pub kind: DataKind,
    /// The directive as written, e.g. `.db`
    pub directive: String,
    pub values: Vec<String>,
}

impl DataBlock {
    pub fn new(kind: DataKind, directive: &str, values: Vec<String>) -> DataBlock {
        DataBlock {
            kind,
            directive: directive.to_owned(),
            values,
        }
    }
}

impl fmt::Display for DataBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self
            .values
            .iter()
            .filter(|value| !value.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<&str>>();
        if values.is_empty() {
            write!(f, "{}", self.directive)
        } else {
            write!(f, "{} {}", self.directive, values.join(", "))
        }
    }
}
