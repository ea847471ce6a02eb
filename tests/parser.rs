#[cfg(test)]
mod parser_tests {
    use lox_interpreter as lox;

    use lox::ast_printer::AstPrinter;
    use lox::parser::Parser;
    use lox::scanner::scan_tokens;

    /// Parse `source`, returning each statement in prefix form plus the
    /// rendered syntax errors.
    fn parse(source: &str) -> (Vec<String>, Vec<String>) {
        let (tokens, lex_errors) = scan_tokens(source);
        assert!(lex_errors.is_empty(), "unexpected lex errors: {:?}", lex_errors);

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();
        let errors = parser.into_errors();

        (
            statements.iter().map(AstPrinter::print_stmt).collect(),
            errors.iter().map(|e| e.to_string()).collect(),
        )
    }

    fn parse_ok(source: &str) -> Vec<String> {
        let (statements, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
        statements
    }

    #[test]
    fn test_precedence_factor_over_term() {
        assert_eq!(parse_ok("1 + 2 * 3;"), ["(; (+ 1.0 (* 2.0 3.0)))"]);
        assert_eq!(parse_ok("(1 + 2) * 3;"), ["(; (* (group (+ 1.0 2.0)) 3.0))"]);
    }

    #[test]
    fn test_binary_operators_are_left_associative() {
        assert_eq!(parse_ok("1 - 2 - 3;"), ["(; (- (- 1.0 2.0) 3.0))"]);
        assert_eq!(parse_ok("8 / 4 / 2;"), ["(; (/ (/ 8.0 4.0) 2.0))"]);
    }

    #[test]
    fn test_unary_and_comparison() {
        assert_eq!(parse_ok("-a - -b;"), ["(; (- (- a) (- b)))"]);
        assert_eq!(
            parse_ok("!x == 1 < 2;"),
            ["(; (== (! x) (< 1.0 2.0)))"]
        );
    }

    #[test]
    fn test_logical_and_binds_tighter_than_or() {
        assert_eq!(parse_ok("x or y and z;"), ["(; (or x (and y z)))"]);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(parse_ok("a = b = c;"), ["(; (= a (= b c)))"]);
    }

    #[test]
    fn test_property_chains_and_setters() {
        assert_eq!(
            parse_ok("obj.field.other = 1;"),
            ["(; (= (. (. obj field) other) 1.0))"]
        );
        assert_eq!(
            parse_ok("f(1, 2)(3);"),
            ["(; (call (call f 1.0 2.0) 3.0))"]
        );
    }

    #[test]
    fn test_for_desugars_into_while() {
        assert_eq!(
            parse_ok("for (var i = 0; i < 3; i = i + 1) print i;"),
            ["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );
    }

    #[test]
    fn test_for_without_clauses_loops_forever() {
        assert_eq!(parse_ok("for (;;) print 1;"), ["(while true (print 1.0))"]);
    }

    #[test]
    fn test_declarations() {
        assert_eq!(
            parse_ok("var a; var b = \"hi\"; fun add(x, y) { return x + y; }"),
            [
                "(var a)",
                "(var b hi)",
                "(fun add(x y) (return (+ x y)))",
            ]
        );
    }

    #[test]
    fn test_class_with_superclass() {
        assert_eq!(
            parse_ok("class B < A { init(x) { this.x = x; } go() { super.go(); return; } }"),
            ["(class B < A (fun init(x) (; (= (. this x) x))) (fun go() (; (call (super go))) (return)))"]
        );
    }

    #[test]
    fn test_if_else_binds_to_nearest_if() {
        assert_eq!(
            parse_ok("if (a) if (b) print 1; else print 2;"),
            ["(if a (if-else b (print 1.0) (print 2.0)))"]
        );
    }

    #[test]
    fn test_recovers_one_error_per_bad_statement() {
        let (statements, errors) = parse("var = 1;\nprint 2;\nvar y 3;\nprint 4;");

        assert_eq!(statements, ["(print 2.0)", "(print 4.0)"]);
        assert_eq!(
            errors,
            [
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at '3': Expect ';' after variable declaration.",
            ]
        );
    }

    #[test]
    fn test_invalid_assignment_target_keeps_parsing() {
        let (statements, errors) = parse("a + b = c;\nprint 1;");

        assert_eq!(errors, ["[line 1] Error at '=': Invalid assignment target."]);
        assert_eq!(statements, ["(; (+ a b))", "(print 1.0)"]);
    }

    #[test]
    fn test_error_at_end() {
        let (_, errors) = parse("print 1");
        assert_eq!(errors, ["[line 1] Error at end: Expect ';' after value."]);
    }

    #[test]
    fn test_missing_expression() {
        let (_, errors) = parse("print;");
        assert_eq!(errors, ["[line 1] Error at ';': Expect expression."]);
    }

    #[test]
    fn test_too_many_arguments_reported_once() {
        let args = vec!["0"; 256].join(", ");
        let (statements, errors) = parse(&format!("f({});", args));

        assert_eq!(
            errors,
            ["[line 1] Error at '0': Can't have more than 255 arguments."]
        );
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_missing_eof_is_supplied() {
        let (mut tokens, _) = scan_tokens("print 1;");
        tokens.pop();

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        assert_eq!(statements.len(), 1);
        assert!(!parser.had_error());
    }
}
