#[cfg(test)]
mod scanner_tests {
    use lox_interpreter as lox;

    use lox::error::LoxError;
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_maximal_munch() {
        assert_token_sequence(
            "! != = == < <= > >= / // comment ignored",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "class classy _under fun9 this super orchid or",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::IDENTIFIER, "_under"),
                (TokenType::IDENTIFIER, "fun9"),
                (TokenType::THIS, "this"),
                (TokenType::SUPER, "super"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_number_literals_are_doubles() {
        let (tokens, errors) = scan_tokens("0 42 3.14 1234.5678");
        assert!(errors.is_empty());

        let numbers: Vec<f64> = tokens
            .iter()
            .filter_map(|t| match t.token_type {
                TokenType::NUMBER(n) => Some(n),
                _ => None,
            })
            .collect();

        for (n, text) in numbers.iter().zip(["0", "42", "3.14", "1234.5678"]) {
            assert_eq!(*n, text.parse::<f64>().unwrap());
        }
        assert_eq!(numbers.len(), 4);
    }

    #[test]
    fn test_no_leading_or_trailing_dot_numbers() {
        assert_token_sequence(
            ".5 5.",
            &[
                (TokenType::DOT, "."),
                (TokenType::NUMBER(0.0), "5"),
                (TokenType::NUMBER(0.0), "5"),
                (TokenType::DOT, "."),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let (tokens, errors) = scan_tokens("\"one\ntwo\" x");
        assert!(errors.is_empty());

        assert_eq!(tokens[0].token_type, TokenType::STRING(String::new()));
        assert_eq!(tokens[0].lexeme, "\"one\ntwo\"");
        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "one\ntwo"),
            other => panic!("expected string, got {:?}", other),
        }
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_comment_keeps_line_count() {
        let (tokens, _) = scan_tokens("// first\n// second\nvar");
        assert_eq!(tokens[0].token_type, TokenType::VAR);
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn test_unterminated_string_is_reported() {
        let (tokens, errors) = scan_tokens("print \"never closed\n");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 2] Error: Unterminated string.");
        assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::EOF));
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert_eq!(err.to_string(), "[line 1] Error: Unexpected character.");
        }

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_multibyte_character_reported_once() {
        let (tokens, errors) = scan_tokens("a é b");

        assert_eq!(errors.len(), 1);
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, ["a", "b", ""]);
    }

    #[test]
    fn test_token_display() {
        let (tokens, _) = scan_tokens("42 \"hi\" name 2.5");

        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            rendered,
            [
                "NUMBER 42 42.0",
                "STRING \"hi\" hi",
                "IDENTIFIER name null",
                "NUMBER 2.5 2.5",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_scanner_is_fused() {
        let mut scanner = Scanner::new("x");
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
