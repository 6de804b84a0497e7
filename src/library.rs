//! Built-in directive libraries.
//!
//! Each library is a plain function over `&mut CompileUnit` making the same
//! `rule`/`guideline` calls a command definition could make inline. Run them
//! through [`CompileUnit::compose`] so diagnostics carry the library trail.
//! Definition files reach them with `include: builtin:<name>`.

use crate::operator as op;
use crate::tools::Tool;
use crate::unit::CompileUnit;

/// Prefix selecting a built-in library from a definition file include.
pub const BUILTIN_PREFIX: &str = "builtin:";

/// Signature shared by every directive library.
pub type LibraryFn = fn(&mut CompileUnit);

/// Built-in libraries by name, in listing order.
pub const BUILTIN_LIBRARIES: &[(&str, LibraryFn)] = &[
    ("quality-gates", quality_gates),
    ("error-handling", error_handling),
    ("parallel-dispatch", parallel_dispatch),
    ("baseline", baseline),
];

/// Look up a built-in library by name (without the `builtin:` prefix).
pub fn builtin(name: &str) -> Option<LibraryFn> {
    BUILTIN_LIBRARIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
}

/// Completion gates every code-changing command shares.
pub fn quality_gates(unit: &mut CompileUnit) {
    unit.rule("tests-pass")
        .critical()
        .text("All tests must pass before the task is reported complete.")
        .text(format!("Run {} and read the full output.", Tool::Bash.call("cargo test")))
        .why("A green report over a red build hides regressions from every later task.")
        .on_violation("Stop, fix the failing tests, and run them again.");

    unit.rule("no-stubs")
        .high()
        .text("Do not leave placeholder implementations, stubbed branches, or commented-out code.")
        .why("Stubs pass review and fail in production.");

    unit.rule("scope-discipline")
        .medium()
        .text("Only modify files the task declares in scope.")
        .on_violation("Revert out-of-scope edits before submitting.");
}

/// The reserved `error-handling` guideline; always rendered last.
pub fn error_handling(unit: &mut CompileUnit) {
    unit.guideline("error-handling")
        .goal("Recover from failures without losing work.")
        .phase(op::if_then_else(
            "a tool call fails",
            "retry once with the same arguments",
            op::note("continue with the next step"),
        ))
        .phase(op::if_then(
            "the retry also fails",
            crate::seq![
                op::report("the failing call and its error output"),
                op::abort_with("do not guess at a workaround"),
            ],
        ));
}

/// Guidance for dispatching independent work in one batch.
pub fn parallel_dispatch(unit: &mut CompileUnit) {
    unit.rule("independent-branches")
        .high()
        .text("Only batch calls that do not depend on each other's results.")
        .why("Dependent branches race and produce inconsistent state.");

    unit.guideline("parallel-dispatch")
        .goal("Gather context with as few round trips as possible.")
        .example()
        .phase(op::parallel([
            Tool::Glob.call("src/**/*.rs"),
            Tool::Grep.call("\"fn main\""),
            Tool::Read.call("Cargo.toml"),
        ]))
        .phase(op::verify(["every branch returned a result"]));
}

/// Everything a typical command starts from.
pub fn baseline(unit: &mut CompileUnit) {
    unit.compose("quality-gates", quality_gates);
    unit.compose("error-handling", error_handling);
}
