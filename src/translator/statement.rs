use std::fmt;

use crate::ast::Mnemonic;

/// Processor flag tested by a conditional branch.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Condition {
    CarryClear,
    CarrySet,
    Zero,
    NotZero,
    Negative,
    NotNegative,
    OverflowClear,
    OverflowSet,
}

impl Condition {
    /// The condition a branch instruction jumps on.
    pub fn of(mnemonic: Mnemonic) -> Option<Condition> {
        match mnemonic {
            Mnemonic::BCC => Some(Condition::CarryClear),
            Mnemonic::BCS => Some(Condition::CarrySet),
            Mnemonic::BEQ => Some(Condition::Zero),
            Mnemonic::BMI => Some(Condition::Negative),
            Mnemonic::BNE => Some(Condition::NotZero),
            Mnemonic::BPL => Some(Condition::NotNegative),
            Mnemonic::BVC => Some(Condition::OverflowClear),
            Mnemonic::BVS => Some(Condition::OverflowSet),
            _ => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expr = match self {
            Condition::CarryClear => "!c",
            Condition::CarrySet => "c",
            Condition::Zero => "z",
            Condition::NotZero => "!z",
            Condition::Negative => "n",
            Condition::NotNegative => "!n",
            Condition::OverflowClear => "!v",
            Condition::OverflowSet => "v",
        };
        write!(f, "{}", expr)
    }
}

/// A statement of the generated procedural code.
///
/// Rendering a statement gives the code without its leading indentation. Statements that span
/// several lines indent their continuation lines themselves.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Statement {
    /// `x = value;`
    Assign { target: String, value: String },
    /// `a &= value;`, `a <<= 1;`
    Update {
        target: String,
        op: &'static str,
        value: String,
    },
    /// `writeData(address, a);`
    Call {
        function: &'static str,
        args: Vec<String>,
    },
    /// `a.rol();`
    Method {
        target: String,
        method: &'static str,
    },
    /// `++x;`
    Increment(String),
    /// `--x;`
    Decrement(String),
    /// `goto Label;`
    Goto(String),
    /// `if (!z) goto Label;`
    Branch { condition: Condition, target: String },
    /// Subroutine call that resumes at `Return_<return_site>` on return.
    Subroutine { target: String, return_site: usize },
    /// `return;`
    Return,
    /// Empty statement, e.g. for `nop`
    Null(Mnemonic),
    /// An instruction the runtime does not model, e.g. `cld`
    Unmodeled(Mnemonic),
    /// A subroutine call through a jump table that has to be translated by hand
    ManualResolution { target: String },
    /// A mnemonic that is not part of the instruction set
    Unimplemented(String),
}

/// Name of the label the return dispatcher jumps to for a return site.
pub fn resume_label(return_site: usize) -> String {
    format!("Return_{}", return_site)
}

impl Statement {
    /// Statements that mark a gap in the translation to be completed by hand.
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Statement::Unmodeled(_)
                | Statement::ManualResolution { .. }
                | Statement::Unimplemented(_)
        )
    }

    /// The label to emit right after the statement, if any.
    pub fn resume_label(&self) -> Option<String> {
        match self {
            Statement::Subroutine { return_site, .. } => Some(resume_label(*return_site)),
            _ => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assign { target, value } => write!(f, "{} = {};", target, value),
            Statement::Update { target, op, value } => write!(f, "{} {} {};", target, op, value),
            Statement::Call { function, args } => write!(f, "{}({});", function, args.join(", ")),
            Statement::Method { target, method } => write!(f, "{}.{}();", target, method),
            Statement::Increment(target) => write!(f, "++{};", target),
            Statement::Decrement(target) => write!(f, "--{};", target),
            Statement::Goto(target) => write!(f, "goto {};", target),
            Statement::Branch { condition, target } => {
                write!(f, "if ({})\n        goto {};", condition, target)
            }
            Statement::Subroutine {
                target,
                return_site,
            } => write!(
                f,
                "pushReturnIndex({});\n    goto {};",
                return_site, target
            ),
            Statement::Return => write!(f, "return;"),
            Statement::Null(mnemonic) => write!(f, "; // {}", mnemonic),
            Statement::Unmodeled(mnemonic) => write!(f, "/* {} */", mnemonic),
            Statement::ManualResolution { target } => {
                write!(f, "/* JSR {} - needs jump table implementation */", target)
            }
            Statement::Unimplemented(mnemonic) => {
                write!(f, "/* Unknown instruction: {} */", mnemonic)
            }
        }
    }
}
