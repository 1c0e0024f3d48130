use crate::{
    ast::{Node, Program},
    translator::translate_literal,
};

use super::{EmitConfig, GENERATED_HEADER};

/// Generate the header with a `#define` for every constant declaration, in source order.
///
/// Redefinitions are kept as they are in the source.
pub fn generate_constants(program: &Program, config: &EmitConfig) -> String {
    let guard = format!("{}CONSTANTS_HPP", config.prefix.to_uppercase());

    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str(&format!("#ifndef {0}\n#define {0}\n\n", guard));

    for record in program.records() {
        if let Node::Constant(constant) = &record.node {
            out.push_str(&format!(
                "#define {} {}",
                constant.identifier,
                translate_literal(&constant.value)
            ));
            if let Some(comment) = &record.comment {
                out.push_str(&format!(" // {}", comment));
            }
            out.push('\n');
        }
    }

    out.push_str(&format!("\n#endif // {}\n", guard));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::convert_source;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_constants() {
        let program = convert_source(
            "PlayerStatus = $0756 ; status
Mask = %00001111
Lives = 3
Start:
  lda #Lives
",
        );
        let expected = "// This is an automatically generated file.
// Do not edit directly.
//
#ifndef SMBCONSTANTS_HPP
#define SMBCONSTANTS_HPP

#define PlayerStatus 0x0756 // status
#define Mask BOOST_BINARY(00001111)
#define Lives 3

#endif // SMBCONSTANTS_HPP
";
        assert_eq!(
            generate_constants(&program, &EmitConfig::default()),
            expected
        );
    }

    #[test]
    fn test_prefix_names_the_guard() {
        let config = EmitConfig {
            prefix: "Game".into(),
            ..EmitConfig::default()
        };
        let header = generate_constants(&convert_source(""), &config);
        assert!(header.contains("#ifndef GAMECONSTANTS_HPP\n"));
        assert!(header.ends_with("#endif // GAMECONSTANTS_HPP\n"));
    }
}
