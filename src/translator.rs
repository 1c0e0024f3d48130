use crate::ast::{Instruction, Mnemonic};

/// Addressing mode resolution of instruction operands.
pub mod operand;

/// Statements of the generated procedural code.
pub mod statement;

pub use operand::{resolve_operand, translate_literal, Operand};
pub use statement::{Condition, Statement};

/// Target of the `jmp` that ends the program.
pub const DEFAULT_EXIT_LABEL: &str = "EndlessLoop";

/// Subroutine that dispatches through a jump table following the `jsr`.
pub const DEFAULT_JUMP_TABLE: &str = "JumpEngine";

/// Translates instructions to statements of the generated code.
///
/// The translator hands out a new return site for every subroutine call, numbered from 0 in
/// the order the calls are translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translator {
    exit_label: String,
    jump_table: String,
    return_sites: usize,
}

impl Default for Translator {
    fn default() -> Self {
        Translator::new(DEFAULT_EXIT_LABEL, DEFAULT_JUMP_TABLE)
    }
}

fn assign(target: &str, value: impl ToString) -> Statement {
    Statement::Assign {
        target: target.to_owned(),
        value: value.to_string(),
    }
}

fn update(op: &'static str, value: impl ToString) -> Statement {
    Statement::Update {
        target: "a".to_owned(),
        op,
        value: value.to_string(),
    }
}

fn call(function: &'static str, args: Vec<String>) -> Statement {
    Statement::Call { function, args }
}

impl Translator {
    pub fn new(exit_label: &str, jump_table: &str) -> Self {
        Self {
            exit_label: exit_label.to_owned(),
            jump_table: jump_table.to_owned(),
            return_sites: 0,
        }
    }

    /// Number of return sites handed out so far.
    pub fn return_sites(&self) -> usize {
        self.return_sites
    }

    /// Translate a single instruction.
    #[tracing::instrument(skip(self))]
    pub fn translate(&mut self, ins: &Instruction) -> Statement {
        match ins.opcode() {
            Some(mnemonic) => self.translate_mnemonic(mnemonic, &ins.operand),
            None => {
                tracing::warn!(mnemonic = ins.mnemonic, "unknown instruction");
                Statement::Unimplemented(ins.mnemonic.clone())
            }
        }
    }

    /// Shift and rotate instructions work on the accumulator when there is no operand.
    ///
    /// The ca65 operand `a` (either case) also selects accumulator mode, so `asl a` shifts the
    /// accumulator and never a memory location named `a`.
    fn shift_target(mnemonic: Mnemonic, operand: &str) -> String {
        let operand = operand.trim();
        if operand.is_empty()
            || (mnemonic.has_accumulator_addressing_mode() && operand.eq_ignore_ascii_case("a"))
        {
            "a".to_owned()
        } else {
            resolve_operand(operand).to_string()
        }
    }

    fn step_target(operand: &Operand) -> String {
        if operand.is_implied() {
            "a".to_owned()
        } else {
            operand.to_string()
        }
    }

    fn subroutine(&mut self, target: &str) -> Statement {
        if target == self.jump_table {
            return Statement::ManualResolution {
                target: target.to_owned(),
            };
        }
        let return_site = self.return_sites;
        self.return_sites += 1;
        Statement::Subroutine {
            target: target.to_owned(),
            return_site,
        }
    }

    fn translate_mnemonic(&mut self, mnemonic: Mnemonic, operand_str: &str) -> Statement {
        let operand = resolve_operand(operand_str);

        match mnemonic {
            // Load
            Mnemonic::LDA => assign("a", &operand),
            Mnemonic::LDX => assign("x", &operand),
            Mnemonic::LDY => assign("y", &operand),

            // Store
            Mnemonic::STA => call("writeData", vec![operand.address(), "a".to_owned()]),
            Mnemonic::STX => call("writeData", vec![operand.address(), "x".to_owned()]),
            Mnemonic::STY => call("writeData", vec![operand.address(), "y".to_owned()]),

            // Transfer
            Mnemonic::TAX => assign("x", "a"),
            Mnemonic::TAY => assign("y", "a"),
            Mnemonic::TXA => assign("a", "x"),
            Mnemonic::TYA => assign("a", "y"),
            Mnemonic::TSX => assign("x", "s"),
            Mnemonic::TXS => assign("s", "x"),

            // Stack
            Mnemonic::PHA => call("pha", vec![]),
            Mnemonic::PHP => call("php", vec![]),
            Mnemonic::PLA => call("pla", vec![]),
            Mnemonic::PLP => call("plp", vec![]),

            // Logical
            Mnemonic::AND => update("&=", &operand),
            Mnemonic::EOR => update("^=", &operand),
            Mnemonic::ORA => update("|=", &operand),
            Mnemonic::BIT => call("bit", vec![operand.to_string()]),

            // Arithmetic
            Mnemonic::ADC => update("+=", &operand),
            Mnemonic::SBC => update("-=", &operand),

            // Compare
            Mnemonic::CMP => call("compare", vec!["a".to_owned(), operand.to_string()]),
            Mnemonic::CPX => call("compare", vec!["x".to_owned(), operand.to_string()]),
            Mnemonic::CPY => call("compare", vec!["y".to_owned(), operand.to_string()]),

            // Increment and decrement
            Mnemonic::INC => Statement::Increment(Self::step_target(&operand)),
            Mnemonic::INX => Statement::Increment("x".to_owned()),
            Mnemonic::INY => Statement::Increment("y".to_owned()),
            Mnemonic::DEC => Statement::Decrement(Self::step_target(&operand)),
            Mnemonic::DEX => Statement::Decrement("x".to_owned()),
            Mnemonic::DEY => Statement::Decrement("y".to_owned()),

            // Shift and rotate
            Mnemonic::ASL => Statement::Update {
                target: Self::shift_target(mnemonic, operand_str),
                op: "<<=",
                value: "1".to_owned(),
            },
            Mnemonic::LSR => Statement::Update {
                target: Self::shift_target(mnemonic, operand_str),
                op: ">>=",
                value: "1".to_owned(),
            },
            Mnemonic::ROL => Statement::Method {
                target: Self::shift_target(mnemonic, operand_str),
                method: "rol",
            },
            Mnemonic::ROR => Statement::Method {
                target: Self::shift_target(mnemonic, operand_str),
                method: "ror",
            },

            // Jumps and subroutines
            Mnemonic::JMP if operand_str == self.exit_label => Statement::Return,
            Mnemonic::JMP => Statement::Goto(operand_str.to_owned()),
            Mnemonic::JSR => self.subroutine(operand_str),
            Mnemonic::RTS => Statement::Goto("Return".to_owned()),

            // Branches
            Mnemonic::BCC
            | Mnemonic::BCS
            | Mnemonic::BEQ
            | Mnemonic::BMI
            | Mnemonic::BNE
            | Mnemonic::BPL
            | Mnemonic::BVC
            | Mnemonic::BVS => match Condition::of(mnemonic) {
                Some(condition) => Statement::Branch {
                    condition,
                    target: operand_str.to_owned(),
                },
                None => Statement::Unimplemented(mnemonic.to_string()),
            },

            // Flags
            Mnemonic::CLC => assign("c", 0),
            Mnemonic::SEC => assign("c", 1),
            Mnemonic::CLD | Mnemonic::CLI | Mnemonic::CLV | Mnemonic::SED | Mnemonic::SEI => {
                Statement::Unmodeled(mnemonic)
            }

            // Misc
            Mnemonic::BRK | Mnemonic::NOP => Statement::Null(mnemonic),
            Mnemonic::RTI => Statement::Return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn translate(mnemonic: &str, operand: &str) -> String {
        Translator::default()
            .translate(&Instruction::new(mnemonic, operand))
            .to_string()
    }

    #[test]
    fn test_translate_instructions() {
        let tests = vec![
            ("lda", "#$05", "a = 0x05;"),
            ("lda", "$0756", "a = M(0x0756);"),
            ("ldx", "Table,y", "x = Table + y;"),
            ("ldy", "($06),y", "y = W(0x06) + y;"),
            ("sta", "$0200", "writeData(0x0200, a);"),
            ("stx", "$0200,y", "writeData(0x0200 + y, x);"),
            ("sty", "($06),y", "writeData(W(0x06) + y, y);"),
            ("tax", "", "x = a;"),
            ("tay", "", "y = a;"),
            ("txa", "", "a = x;"),
            ("tya", "", "a = y;"),
            ("tsx", "", "x = s;"),
            ("txs", "", "s = x;"),
            ("pha", "", "pha();"),
            ("php", "", "php();"),
            ("pla", "", "pla();"),
            ("plp", "", "plp();"),
            ("and", "#%00001111", "a &= BOOST_BINARY(00001111);"),
            ("eor", "#$ff", "a ^= 0xff;"),
            ("ora", "$10", "a |= M(0x10);"),
            ("bit", "$2002", "bit(M(0x2002));"),
            ("adc", "#1", "a += 1;"),
            ("sbc", "Speed", "a -= M(Speed);"),
            ("cmp", "#$10", "compare(a, 0x10);"),
            ("cpx", "$10", "compare(x, M(0x10));"),
            ("cpy", "#0", "compare(y, 0);"),
            ("inc", "$10", "++M(0x10);"),
            ("inx", "", "++x;"),
            ("iny", "", "++y;"),
            ("dec", "$10", "--M(0x10);"),
            ("dex", "", "--x;"),
            ("dey", "", "--y;"),
            ("asl", "", "a <<= 1;"),
            ("asl", "a", "a <<= 1;"),
            ("asl", "$10", "M(0x10) <<= 1;"),
            ("lsr", "", "a >>= 1;"),
            ("lsr", "$10,x", "0x10 + x >>= 1;"),
            ("rol", "", "a.rol();"),
            ("rol", "$10", "M(0x10).rol();"),
            ("ror", "", "a.ror();"),
            ("ror", "A", "a.ror();"),
            ("jmp", "Start", "goto Start;"),
            ("jmp", "EndlessLoop", "return;"),
            ("rts", "", "goto Return;"),
            ("bcc", "Skip", "if (!c)\n        goto Skip;"),
            ("bcs", "Skip", "if (c)\n        goto Skip;"),
            ("beq", "Skip", "if (z)\n        goto Skip;"),
            ("bmi", "Skip", "if (n)\n        goto Skip;"),
            ("bne", "Skip", "if (!z)\n        goto Skip;"),
            ("bpl", "Skip", "if (!n)\n        goto Skip;"),
            ("bvc", "Skip", "if (!v)\n        goto Skip;"),
            ("bvs", "Skip", "if (v)\n        goto Skip;"),
            ("clc", "", "c = 0;"),
            ("sec", "", "c = 1;"),
            ("cld", "", "/* cld */"),
            ("cli", "", "/* cli */"),
            ("clv", "", "/* clv */"),
            ("sed", "", "/* sed */"),
            ("sei", "", "/* sei */"),
            ("brk", "", "; // brk"),
            ("nop", "", "; // nop"),
            ("rti", "", "return;"),
            ("jsr", "JumpEngine", "/* JSR JumpEngine - needs jump table implementation */"),
            ("xyz", "", "/* Unknown instruction: xyz */"),
        ];
        for (mnemonic, operand, expected) in tests {
            assert_eq!(
                translate(mnemonic, operand),
                expected,
                "{} {}",
                mnemonic,
                operand
            );
        }
    }

    #[test]
    fn test_only_unmodeled_instructions_are_markers() {
        for mnemonic in Mnemonic::iter() {
            let operand = if Condition::of(mnemonic).is_some()
                || matches!(mnemonic, Mnemonic::JMP | Mnemonic::JSR)
            {
                "Target"
            } else {
                "$10"
            };
            let statement =
                Translator::default().translate(&Instruction::new(&mnemonic.to_string(), operand));
            assert!(!statement.to_string().is_empty());
            assert_eq!(
                statement.is_marker(),
                mnemonic.is_unmodeled_flag_instruction(),
                "{}",
                mnemonic
            );
        }

        let jump_table = Translator::default().translate(&Instruction::new("jsr", "JumpEngine"));
        assert!(jump_table.is_marker());
    }

    #[test]
    fn test_return_sites_are_sequential() {
        let mut translator = Translator::default();
        let calls = vec!["Foo", "JumpEngine", "Bar", "Foo"];
        let statements = calls
            .iter()
            .map(|target| translator.translate(&Instruction::new("jsr", target)))
            .collect::<Vec<Statement>>();

        assert_eq!(
            statements,
            vec![
                Statement::Subroutine {
                    target: "Foo".into(),
                    return_site: 0
                },
                Statement::ManualResolution {
                    target: "JumpEngine".into()
                },
                Statement::Subroutine {
                    target: "Bar".into(),
                    return_site: 1
                },
                Statement::Subroutine {
                    target: "Foo".into(),
                    return_site: 2
                },
            ]
        );
        assert_eq!(translator.return_sites(), 3);
    }

    #[test]
    fn test_custom_labels() {
        let mut translator = Translator::new("Halt", "Dispatch");
        assert_eq!(
            translator.translate(&Instruction::new("jmp", "Halt")),
            Statement::Return
        );
        assert_eq!(
            translator.translate(&Instruction::new("jmp", "EndlessLoop")),
            Statement::Goto("EndlessLoop".into())
        );
        assert!(translator
            .translate(&Instruction::new("jsr", "Dispatch"))
            .is_marker());
        assert_eq!(translator.return_sites(), 0);
    }
}
