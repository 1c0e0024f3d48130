use std::fmt;

/// Rewrite a literal into host syntax.
///
/// `$FF` becomes `0xFF` and `%1010` becomes `BOOST_BINARY(1010)`. Decimal literals and names
/// are left untouched.
pub fn translate_literal(expr: &str) -> String {
    if let Some(hex) = expr.strip_prefix('$') {
        format!("0x{}", hex)
    } else if let Some(binary) = expr.strip_prefix('%') {
        format!("BOOST_BINARY({})", binary)
    } else {
        expr.to_owned()
    }
}

/// An instruction operand resolved according to its addressing mode.
///
/// The values are already in host syntax.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Operand {
    /// No operand, e.g. `rts` or `asl`
    Implied,
    /// `#v`, the value itself
    Immediate(String),
    /// `a`, a memory read `M(a)`
    Absolute(String),
    /// `(a)`, a memory read `M(a)`
    Indirect(String),
    /// `a,x`, `a,y` and `(zp,x)`, the address `a + x`
    Indexed { base: String, index: String },
    /// `(zp),y`, a 16 bit read offset by y: `W(zp) + y`
    IndirectIndexedY(String),
}

impl Operand {
    /// The operand as an address rather than as a value read from memory.
    pub fn address(&self) -> String {
        match self {
            Operand::Absolute(address) => address.clone(),
            operand => operand.to_string(),
        }
    }

    pub fn is_implied(&self) -> bool {
        matches!(self, Operand::Implied)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Implied => Ok(()),
            Operand::Immediate(value) => write!(f, "{}", value),
            Operand::Absolute(address) | Operand::Indirect(address) => {
                write!(f, "M({})", address)
            }
            Operand::Indexed { base, index } => write!(f, "{} + {}", base, index),
            Operand::IndirectIndexedY(address) => write!(f, "W({}) + y", address),
        }
    }
}

fn parenthesized(text: &str) -> Option<&str> {
    text.strip_prefix('(')?.strip_suffix(')')
}

fn resolve_indexed(base: &str, index: &str) -> Operand {
    let base = base.trim();
    let index = index.trim();
    match parenthesized(base) {
        Some(inner) if index == "y" => Operand::IndirectIndexedY(translate_literal(inner)),
        _ => Operand::Indexed {
            base: translate_literal(base),
            index: index.to_owned(),
        },
    }
}

/// Resolve the addressing mode of an operand as written in the source.
///
/// The forms are tested in order:
///
/// ```text
///                     -> Implied
/// #$10                -> Immediate        0x10
/// ($10)               -> Indirect         M(0x10)
/// ($10,x)             -> Indexed          0x10 + x
/// ($10),y             -> IndirectIndexedY W(0x10) + y
/// $10,x               -> Indexed          0x10 + x
/// $10                 -> Absolute         M(0x10)
/// ```
pub fn resolve_operand(operand: &str) -> Operand {
    if operand.is_empty() {
        return Operand::Implied;
    }

    if let Some(value) = operand.strip_prefix('#') {
        return Operand::Immediate(translate_literal(value));
    }

    if let Some(inner) = parenthesized(operand) {
        return match inner.split_once(',') {
            Some((base, index)) => resolve_indexed(base, index),
            None => Operand::Indirect(translate_literal(inner)),
        };
    }

    if let Some((base, index)) = operand.split_once(',') {
        return resolve_indexed(base, index);
    }

    Operand::Absolute(translate_literal(operand))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_translate_literal() {
        let tests = vec![
            ("$FF", "0xFF"),
            ("$0200", "0x0200"),
            ("%11001100", "BOOST_BINARY(11001100)"),
            ("42", "42"),
            ("PlayerStatus", "PlayerStatus"),
            ("", ""),
        ];
        for (input, expected) in tests {
            assert_eq!(translate_literal(input), expected);
        }
    }

    #[test]
    fn test_resolve_operand() {
        let tests = vec![
            ("", Operand::Implied),
            ("#$10", Operand::Immediate("0x10".into())),
            ("#%101", Operand::Immediate("BOOST_BINARY(101)".into())),
            ("#Speed", Operand::Immediate("Speed".into())),
            (
                "$10,x",
                Operand::Indexed {
                    base: "0x10".into(),
                    index: "x".into(),
                },
            ),
            (
                "Table, y",
                Operand::Indexed {
                    base: "Table".into(),
                    index: "y".into(),
                },
            ),
            ("($10),y", Operand::IndirectIndexedY("0x10".into())),
            ("($10), y", Operand::IndirectIndexedY("0x10".into())),
            (
                "($10,x)",
                Operand::Indexed {
                    base: "0x10".into(),
                    index: "x".into(),
                },
            ),
            ("($10)", Operand::Indirect("0x10".into())),
            ("$10", Operand::Absolute("0x10".into())),
            ("PlayerStatus", Operand::Absolute("PlayerStatus".into())),
        ];
        for (input, expected) in tests {
            assert_eq!(resolve_operand(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_display() {
        let tests = vec![
            ("", ""),
            ("#$05", "0x05"),
            ("$0200,x", "0x0200 + x"),
            ("($06),y", "W(0x06) + y"),
            ("($06)", "M(0x06)"),
            ("$0756", "M(0x0756)"),
        ];
        for (input, expected) in tests {
            assert_eq!(resolve_operand(input).to_string(), expected);
        }
    }

    #[test]
    fn test_address() {
        let tests = vec![
            ("$0756", "0x0756"),
            ("$0200,x", "0x0200 + x"),
            ("($06),y", "W(0x06) + y"),
            ("($06)", "M(0x06)"),
        ];
        for (input, expected) in tests {
            assert_eq!(resolve_operand(input).address(), expected);
        }
    }
}
