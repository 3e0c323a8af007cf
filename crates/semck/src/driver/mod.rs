//! Check pipeline orchestration: source -> tokens -> AST -> semantic pass

use crate::common::{CheckResult, DiagnosticReporter};
use crate::frontend::{self, Lexer};
use crate::sema::{self, Metrics};

/// Options for a check run
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub verbose: bool,
}

/// Runs the phases in order and stops at the first error
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: CheckConfig,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CheckConfig) -> Self {
        Self { config }
    }

    /// Check `source` and return its metrics
    pub fn check_source(&self, source: &str) -> CheckResult<Metrics> {
        if self.config.dump_tokens {
            let tokens = Lexer::new(source).tokenize_all()?;
            eprintln!("=== Tokens ===");
            for token in &tokens {
                eprintln!("{token:?}");
            }
            eprintln!("=== End Tokens ===\n");
        }

        if self.config.verbose {
            eprintln!("Parsing...");
        }
        let program = frontend::parse(source)?;

        if self.config.dump_ast {
            eprintln!("=== AST ===");
            eprintln!("{program:#?}");
            eprintln!("=== End AST ===\n");
        }

        if self.config.verbose {
            eprintln!("Analyzing...");
        }
        Ok(sema::analyze(&program)?)
    }

    /// Check `source` registered as `filename`, reporting any error to `reporter`
    pub fn check_file(
        &self,
        filename: &str,
        source: &str,
        reporter: &mut DiagnosticReporter,
    ) -> CheckResult<Metrics> {
        let file_id = reporter.add_file(filename, source);
        self.check_source(source).inspect_err(|e| reporter.report_error(file_id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CheckError, SemanticError};
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> CheckResult<Metrics> {
        Pipeline::new().check_source(source)
    }

    fn semantic_error(source: &str) -> SemanticError {
        match check(source) {
            Err(CheckError::Semantic(err)) => err,
            other => panic!("expected a semantic error, got {other:?}"),
        }
    }

    #[test]
    fn test_example_a_assignation() {
        let err = semantic_error("int a = 1; bool b = true; a = b;");
        assert_eq!(err.to_string(), "Invalid type in assignation of Identifier a");
    }

    #[test]
    fn test_example_b_multiple_declarations() {
        let err = semantic_error("int a; int a;");
        assert_eq!(err.to_string(), "Identifier a has multiple declarations");
    }

    #[test]
    fn test_example_c_int_if_condition() {
        let err = semantic_error("if (1) { }");
        assert_eq!(err.to_string(), "Invalid type in condition");
    }

    #[test]
    fn test_example_d_block_scoping() {
        let report = check("int a = 1; { bool a = true; } a = 2;").unwrap();
        assert_eq!(report.to_string(), "{VAR:2, WHILE:0, IF:0, OP:0}");
    }

    #[test]
    fn test_example_e_heterogeneous_list() {
        let err = semantic_error("[1, 2, true];");
        assert_eq!(err.to_string(), "Invalid type in expression");
    }

    #[test]
    fn test_example_f_int_while_condition() {
        let err = semantic_error("int a = 1; while (a) {}");
        assert_eq!(err.to_string(), "Invalid type in condition");
    }

    #[test]
    fn test_undefined_value_never_fails_assignment() {
        let report = check("thing t; int a; float f; bool b; a = t; f = t; b = t;").unwrap();
        assert_eq!(report.declarations, 4);
    }

    #[test]
    fn test_chain_counts() {
        for n in 2..6 {
            let source = format!("int x = {};", vec!["1"; n].join(" + "));
            assert_eq!(check(&source).unwrap().operators, n - 1);

            let source = format!("bool y = {};", vec!["true"; n].join(" || "));
            assert_eq!(check(&source).unwrap().operators, n - 1);
        }
    }

    #[test]
    fn test_well_typed_program() {
        let source = r"
            // running sum
            int total = 0;
            int i = 0;
            float scale = 2.5;
            bool done = false;
            list values = [1, 2, 3];
            while (!done) {
                total = total + i * 2;
                i = i + 1;
                done = i >= 10 || total > 100;
            }
            if (total != 0) {
                float scaled = scale * 2.0;
            } else {
                total = -1;
            }
            /* ternaries count as conditionals */
            int sign = total < 0 ? -1 : 1;
        ";
        let report = check(source).unwrap();
        assert_eq!(
            report,
            Metrics {
                declarations: 7,
                while_loops: 1,
                if_and_ternary: 2,
                operators: 12,
            }
        );
    }

    #[test]
    fn test_int_literal_beyond_i64_checks_as_int() {
        let report = check("int a = 99999999999999999999;").unwrap();
        assert_eq!(report.to_string(), "{VAR:1, WHILE:0, IF:0, OP:0}");

        let err = semantic_error("bool b = 99999999999999999999;");
        assert_eq!(err.to_string(), "Invalid type in assignation of Identifier b");
    }

    #[test]
    fn test_deeply_nested_parentheses_fail_to_parse() {
        let source = format!("int a = {}1{};", "(".repeat(20_000), ")".repeat(20_000));
        assert!(matches!(check(&source), Err(CheckError::Parser { .. })));
    }

    #[test]
    fn test_parse_errors_are_not_semantic() {
        assert!(matches!(check("int = 3;"), Err(CheckError::Parser { .. })));
        assert!(matches!(check("int a = 1 @;"), Err(CheckError::Lexer { .. })));
    }

    #[test]
    fn test_check_file_returns_error() {
        let mut reporter = DiagnosticReporter::new();
        let result = Pipeline::new().check_file("bad.src", "x = 1;", &mut reporter);
        assert!(matches!(
            result,
            Err(CheckError::Semantic(SemanticError::UndeclaredVariable { .. }))
        ));
    }
}
