use crate::ast::{
    Constant, ConstantsTable, DataBlock, DataKind, Directive, Instruction, Mnemonic, Node, Record,
};

// Example code:
//
// PlayerStatus = $0756       ; constant
// Start:                     ; label
//       lda #$05             ; instruction
//       .db $01, $02, $03    ; data bytes
//       .dw Start, Reset     ; data words
//       .org $8000           ; directive
//
// ';' = comment, everything after the first one on a line
// ':' = label, only as the last character of a line
// '=' = constant declaration, anywhere on a line

/// A raw line of source code and its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }
}

/// Split a line into its code and its trailing comment, both trimmed.
///
/// An empty comment is no comment.
fn split_comment(text: &str) -> (&str, Option<String>) {
    match text.split_once(';') {
        Some((code, comment)) => {
            let comment = comment.trim();
            (
                code.trim(),
                (!comment.is_empty()).then(|| comment.to_owned()),
            )
        }
        None => (text.trim(), None),
    }
}

/// Split the operand of a data directive into its values.
///
/// A trailing comma does not produce an empty value, but empty values in between are kept.
fn split_values(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    let text = text.strip_suffix(',').unwrap_or(text);
    text.split(',').map(|value| value.trim().to_owned()).collect()
}

fn data_block(kind: DataKind, directive: &str, rest: &str) -> Node {
    Node::Data(DataBlock::new(kind, directive, split_values(rest.trim())))
}

/// Classify a line of code with the comment already stripped.
///
/// The checks are done in a fixed order and the first one that matches wins, e.g. a `.db` line
/// containing a `=` is a constant declaration.
fn classify_code(code: &str, constants: &mut ConstantsTable) -> Node {
    if let Some(label) = code.strip_suffix(':') {
        return Node::Label(label.to_owned());
    }

    if let Some((name, value)) = code.split_once('=') {
        let constant = Constant::new(name.trim(), value.trim());
        constants.define(&constant);
        return Node::Constant(constant);
    }

    if let Some(rest) = code.strip_prefix(".db") {
        return data_block(DataKind::Bytes, ".db", rest);
    }

    if let Some(rest) = code.strip_prefix(".dw") {
        return data_block(DataKind::Words, ".dw", rest);
    }

    if code.starts_with('.') {
        let mut words = code.split_whitespace();
        let name = words.next().unwrap_or_default();
        let operand = words.next().unwrap_or_default();
        return Node::Directive(Directive::new(name, operand));
    }

    let (word, rest) = code
        .split_once(char::is_whitespace)
        .unwrap_or((code, ""));
    match Mnemonic::parse(word) {
        Some(_) => Node::Instruction(Instruction::new(word, rest.trim())),
        None => Node::Unknown(code.to_owned()),
    }
}

/// Classify a single line of source code.
///
/// Returns `None` for lines without code and without a comment. Constant declarations are
/// added to `constants`.
pub fn classify(line: SourceLine, constants: &mut ConstantsTable) -> Option<Record> {
    let (code, comment) = split_comment(line.text);

    let node = if code.is_empty() {
        if comment.is_none() {
            return None;
        }
        Node::Comment
    } else {
        classify_code(code, constants)
    };

    Some(Record::new(line.number, node, comment))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn classify_one(text: &str) -> Option<Record> {
        classify(SourceLine::new(1, text), &mut ConstantsTable::new())
    }

    fn node(text: &str) -> Node {
        classify_one(text).expect("line should produce a record").node
    }

    #[test]
    fn test_split_comment() {
        let tests = vec![
            ("lda #$05 ; load five", ("lda #$05", Some("load five"))),
            ("  lda #$05", ("lda #$05", None)),
            ("; only a comment", ("", Some("only a comment"))),
            ("rts ;", ("rts", None)),
            ("rts ;   ", ("rts", None)),
            ("lda #$05 ; a ; b", ("lda #$05", Some("a ; b"))),
        ];
        for (input, (code, comment)) in tests {
            let (actual_code, actual_comment) = split_comment(input);
            assert_eq!(actual_code, code);
            assert_eq!(actual_comment.as_deref(), comment);
        }
    }

    #[test]
    fn test_split_values() {
        let tests = vec![
            ("$01, $02, $03", vec!["$01", "$02", "$03"]),
            ("$01,$02", vec!["$01", "$02"]),
            ("$01, $02,", vec!["$01", "$02"]),
            ("$01,,$02", vec!["$01", "", "$02"]),
            ("\"HELLO\"", vec!["\"HELLO\""]),
            ("", vec![]),
        ];
        for (input, expected) in tests {
            assert_eq!(split_values(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        assert_eq!(classify_one(""), None);
        assert_eq!(classify_one("   \t "), None);
        assert_eq!(classify_one(";"), None);
        assert_eq!(classify_one("  ;  "), None);
    }

    #[test]
    fn test_comment_only_line() {
        assert_eq!(
            classify_one("; -------- title screen"),
            Some(Record::new(
                1,
                Node::Comment,
                Some("-------- title screen".to_string())
            ))
        );
    }

    #[test]
    fn test_label() {
        let tests = vec![
            ("Start:", "Start"),
            ("  NonMaskableInterrupt:  ", "NonMaskableInterrupt"),
            ("Loop: ; main loop", "Loop"),
            ("-:", "-"),
        ];
        for (input, expected) in tests {
            assert_eq!(node(input), Node::Label(expected.to_string()));
        }
    }

    #[test]
    fn test_constant() {
        let mut constants = ConstantsTable::new();
        let record = classify(SourceLine::new(7, "PlayerStatus = $0756"), &mut constants);
        assert_eq!(
            record,
            Some(Record::new(
                7,
                Node::Constant(Constant::new("PlayerStatus", "$0756")),
                None
            ))
        );
        assert_eq!(constants.get("PlayerStatus"), Some("$0756"));

        classify(SourceLine::new(8, "PlayerStatus=$0757"), &mut constants);
        assert_eq!(constants.get("PlayerStatus"), Some("$0757"));
    }

    #[test]
    fn test_constant_takes_precedence_over_directives() {
        assert_eq!(
            node(".db a=b"),
            Node::Constant(Constant::new(".db a", "b"))
        );
    }

    #[test]
    fn test_data() {
        let tests = vec![
            (
                ".db $01, $02, $03",
                Node::Data(DataBlock::new(
                    DataKind::Bytes,
                    ".db",
                    vec!["$01".into(), "$02".into(), "$03".into()],
                )),
            ),
            (
                "  .dw Start, Reset ; vectors",
                Node::Data(DataBlock::new(
                    DataKind::Words,
                    ".dw",
                    vec!["Start".into(), "Reset".into()],
                )),
            ),
            (
                ".db",
                Node::Data(DataBlock::new(DataKind::Bytes, ".db", vec![])),
            ),
        ];
        for (input, expected) in tests {
            assert_eq!(node(input), expected);
        }
    }

    #[test]
    fn test_directive_keeps_two_words() {
        let tests = vec![
            (".org $8000", Directive::new(".org", "$8000")),
            (".segment \"CODE\"", Directive::new(".segment", "\"CODE\"")),
            (".include a b c", Directive::new(".include", "a")),
            (".endif", Directive::new(".endif", "")),
        ];
        for (input, expected) in tests {
            assert_eq!(node(input), Node::Directive(expected));
        }
    }

    #[test]
    fn test_instruction() {
        let tests = vec![
            ("lda #$05", Instruction::new("lda", "#$05")),
            ("  sta $0200,x", Instruction::new("sta", "$0200,x")),
            ("lda ($00), y", Instruction::new("lda", "($00), y")),
            ("rts", Instruction::new("rts", "")),
            ("asl\ta", Instruction::new("asl", "a")),
        ];
        for (input, expected) in tests {
            assert_eq!(node(input), Node::Instruction(expected));
        }
    }

    #[test]
    fn test_unknown() {
        let tests = vec!["LDA #$05", "Loop: lda #$05", "foo bar", "*+2"];
        for input in tests {
            assert_eq!(node(input), Node::Unknown(input.to_string()));
        }
    }

    #[test]
    fn test_instruction_with_comment() {
        assert_eq!(
            classify(
                SourceLine::new(2, "      lda #$05 ; load five"),
                &mut ConstantsTable::new()
            ),
            Some(Record::new(
                2,
                Node::Instruction(Instruction::new("lda", "#$05")),
                Some("load five".to_string())
            ))
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let lines = vec![
            "Start:",
            "  lda #$05 ; five",
            "Speed = $10",
            ".db 1, 2",
            ".org $8000",
            "garbage here",
            "; note",
        ];
        for text in lines {
            assert_eq!(classify_one(text), classify_one(text));
        }
    }
}
