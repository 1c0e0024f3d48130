pub mod mnemonic;

use std::fmt;

pub use mnemonic::Mnemonic;

/// A CPU instruction as written in the source.
///
/// The mnemonic is kept as text so that records read back from a hand-edited IR document can
/// carry names outside the 6502 instruction set. The operand is the verbatim remainder of the
/// line; its addressing mode is only resolved when the instruction is translated.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Instruction {
    pub mnemonic: String,
    pub operand: String,
}

impl Instruction {
    pub fn new(mnemonic: &str, operand: &str) -> Instruction {
        Instruction {
            mnemonic: mnemonic.to_owned(),
            operand: operand.to_owned(),
        }
    }

    /// The mnemonic as a member of the instruction set, if it is one.
    pub fn opcode(&self) -> Option<Mnemonic> {
        Mnemonic::parse(&self.mnemonic)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operand.is_empty() {
            write!(f, "{}", self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, self.operand)
        }
    }
}
