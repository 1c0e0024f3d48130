/// In-memory representation of classified 6502 assembly.
///
/// A [`ast::Program`] is an ordered list of records, one per non-blank source line, together
/// with the constants declared in the source.
pub mod ast;

/// Converts 6502 assembly source into the IR.
///
/// Every line is classified on its own, the first matching rule wins:
/// 1. **Comment** - everything after the first `;`
/// 2. **Label** - a line ending with `:`
/// 3. **Constant** - a line containing `=`
/// 4. **Data** - `.db` and `.dw` lines
/// 5. **Directive** - any other line starting with `.`
/// 6. **Instruction** - a line starting with a lowercase mnemonic
///
/// Everything else is kept verbatim as unknown.
pub mod converter;

/// JSON document format of the IR.
pub mod ir;

/// Reconstructs ca65 compatible assembly source from the IR.
pub mod reconstructor;

/// Translates instructions into statements of goto driven C++.
pub mod translator;

/// Generates C++ source files from the IR.
///
/// Subroutine calls push a return index and jump to the subroutine, `rts` jumps to a shared
/// return handler that switches on the popped index.
pub mod emitter;

/// Tracing setup
pub mod instrumentation;
