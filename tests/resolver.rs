mod common;

#[cfg(test)]
mod resolver_tests {
    use super::common::run;
    use lox_interpreter::Outcome;

    /// Every case here must be rejected before anything runs.
    fn assert_static_errors(source: &str, expected: &[&str]) {
        let result = run(source);

        assert_eq!(result.outcome, Outcome::StaticError);
        assert_eq!(result.diagnostics, expected);
        assert_eq!(result.output, "", "nothing may execute after a static error");
    }

    #[test]
    fn test_self_reference_in_initializer() {
        assert_static_errors(
            "var a = \"x\";\n{ var a = a; }",
            &["[line 2] Error at 'a': Can't read local variable in its own initializer."],
        );
    }

    #[test]
    fn test_shadowing_initializer_reading_itself() {
        assert_static_errors(
            "var a = 1; { var a = a + 1; print a; }",
            &["[line 1] Error at 'a': Can't read local variable in its own initializer."],
        );
    }

    #[test]
    fn test_global_initializer_may_read_previous_global() {
        let result = run("var a = 1; var a = a + 1; print a;");
        assert_eq!(result.outcome, Outcome::Completed);
        assert_eq!(result.output, "2\n");
    }

    #[test]
    fn test_redeclaration_in_local_scope() {
        assert_static_errors(
            "fun f() {\n  var a = 1;\n  var a = 2;\n}",
            &["[line 3] Error at 'a': Already a variable with this name in this scope."],
        );
    }

    #[test]
    fn test_duplicate_parameter() {
        assert_static_errors(
            "fun f(a, a) {}",
            &["[line 1] Error at 'a': Already a variable with this name in this scope."],
        );
    }

    #[test]
    fn test_top_level_return() {
        assert_static_errors(
            "print 1;\nreturn 2;",
            &["[line 2] Error at 'return': Can't return from top-level code."],
        );
    }

    #[test]
    fn test_return_value_from_initializer() {
        assert_static_errors(
            "class A { init() { return 1; } }",
            &["[line 1] Error at 'return': Can't return a value from an initializer."],
        );
    }

    #[test]
    fn test_bare_return_in_initializer_is_allowed() {
        let result = run("class A { init() { return; } } print A();");
        assert_eq!(result.outcome, Outcome::Completed);
        assert_eq!(result.output, "<A instance>\n");
    }

    #[test]
    fn test_this_outside_class() {
        assert_static_errors(
            "print this;",
            &["[line 1] Error at 'this': Can't use 'this' outside of a class."],
        );
        assert_static_errors(
            "fun f() { return this; }",
            &["[line 1] Error at 'this': Can't use 'this' outside of a class."],
        );
    }

    #[test]
    fn test_super_outside_class() {
        assert_static_errors(
            "super.foo();",
            &["[line 1] Error at 'super': Can't use 'super' outside of a class."],
        );
    }

    #[test]
    fn test_super_without_superclass() {
        assert_static_errors(
            "class A { m() { super.m(); } }",
            &["[line 1] Error at 'super': Can't use 'super' in a class with no superclass."],
        );
    }

    #[test]
    fn test_class_inheriting_from_itself() {
        assert_static_errors(
            "class Oops < Oops {}",
            &["[line 1] Error at 'Oops': A class can't inherit from itself."],
        );
    }

    #[test]
    fn test_resolution_continues_after_error() {
        assert_static_errors(
            "return 1;\nprint this;\nfun f() { var x; var x; }",
            &[
                "[line 1] Error at 'return': Can't return from top-level code.",
                "[line 2] Error at 'this': Can't use 'this' outside of a class.",
                "[line 3] Error at 'x': Already a variable with this name in this scope.",
            ],
        );
    }

    #[test]
    fn test_syntax_error_skips_resolution() {
        // `return` at top level would be a resolution error, but parsing
        // already failed so the resolver never runs.
        let result = run("return 1;\nprint ;");

        assert_eq!(result.outcome, Outcome::StaticError);
        assert_eq!(
            result.diagnostics,
            ["[line 2] Error at ';': Expect expression."]
        );
    }

    #[test]
    fn test_closure_binds_to_declaration_scope() {
        // The function captures the global `a`; the later local must not
        // change what it sees.
        let result = run(
            "var a = \"global\";\n\
             {\n\
               fun show() { print a; }\n\
               show();\n\
               var a = \"block\";\n\
               show();\n\
             }",
        );

        assert_eq!(result.outcome, Outcome::Completed);
        assert_eq!(result.output, "global\nglobal\n");
    }
}
