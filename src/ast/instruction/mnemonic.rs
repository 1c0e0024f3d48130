/// Mnemonic of an instruction.
///
/// This represents the operation that is performed by the instruction. Parsing is a
/// case-sensitive match against the lowercase name, e.g. `"lda"`.
#[derive(
    Debug,
    Hash,
    Eq,
    PartialEq,
    Clone,
    Copy,
    strum_macros::EnumString,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Mnemonic {
    ADC,
    AND,
    ASL,
    BCC,
    BCS,
    BEQ,
    BIT,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    CMP,
    CPX,
    CPY,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    JMP,
    JSR,
    LDA,
    LDX,
    LDY,
    LSR,
    NOP,
    ORA,
    PHA,
    PHP,
    PLA,
    PLP,
    ROL,
    ROR,
    RTI,
    RTS,
    SBC,
    SEC,
    SED,
    SEI,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
}

impl Mnemonic {
    /// Look up a mnemonic by its lowercase name.
    pub fn parse(word: &str) -> Option<Mnemonic> {
        word.parse().ok()
    }

    /// Flag instructions the generated runtime has no state for.
    pub fn is_unmodeled_flag_instruction(&self) -> bool {
        matches!(
            self,
            Mnemonic::CLD | Mnemonic::CLI | Mnemonic::CLV | Mnemonic::SED | Mnemonic::SEI
        )
    }

    pub fn has_accumulator_addressing_mode(&self) -> bool {
        matches!(
            self,
            Mnemonic::ASL | Mnemonic::LSR | Mnemonic::ROL | Mnemonic::ROR
        )
    }
}
