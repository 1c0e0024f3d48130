use mos6502_ir::{
    ast::{Node, Program},
    converter::convert_source,
    ir::IrDocument,
    reconstructor::reconstruct,
};

use pretty_assertions::assert_eq;

const DEMO: &str = include_str!("../demos/demo.asm");

fn nodes(program: &Program) -> Vec<(Node, Option<String>)> {
    program
        .records()
        .iter()
        .map(|record| (record.node.clone(), record.comment.clone()))
        .collect()
}

#[test]
fn test_round_trip_through_json() {
    let program = convert_source(DEMO);
    let json = IrDocument::from_program(&program)
        .to_json()
        .expect("serialize");
    let read_back = IrDocument::from_json(&json).expect("deserialize").to_program();

    assert_eq!(read_back.records(), program.records());
}

#[test]
fn test_reconstruction_keeps_kinds_and_operands() {
    let program = convert_source(DEMO);
    let source = reconstruct(&program);
    let reclassified = convert_source(&source);

    assert_eq!(nodes(&reclassified), nodes(&program));
}

#[test]
fn test_reconstruction_is_stable() {
    let once = reconstruct(&convert_source(DEMO));
    let twice = reconstruct(&convert_source(&once));
    assert_eq!(twice, once);
}

#[test]
fn test_demo_classification() {
    let program = convert_source(DEMO);
    let count = |kind: &str| {
        program
            .records()
            .iter()
            .filter(|record| record.node.flow_type() == kind)
            .count()
    };

    assert_eq!(count("constant"), 3);
    assert_eq!(count("label"), 6);
    assert_eq!(count("data"), 2);
    assert_eq!(count("directive"), 2);
    assert_eq!(count("instruction"), 24);
    assert_eq!(count("unknown"), 1);
    assert_eq!(program.constants().get("Mask"), Some("%00001111"));
}
