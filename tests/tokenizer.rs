//! Tokenizer tests against the stock Serpent+ definition
//!
//! These run the embedded configuration end to end: pattern order, placeholder expansion,
//! error categories and the presentation table.

use rstest::rstest;
use serpent::serpent::analyzer::{AnalysisError, Analyzer};
use serpent::serpent::config::LanguageConfig;
use serpent::serpent::formats::format_table;
use serpent::serpent::lexing::{LexOutput, MasterPattern, Tokenizer};
use std::thread;
use serpent::serpent::token::TokenKind;

fn tokenize(source: &str) -> LexOutput {
    Tokenizer::new(LanguageConfig::embedded())
        .expect("stock patterns compile")
        .tokenize(source)
}

fn pairs(output: &LexOutput) -> Vec<(TokenKind, &str)> {
    output.tokens.iter().map(|t| t.pair()).collect()
}

fn error_texts(output: &LexOutput) -> Vec<&str> {
    output.errors.iter().map(|e| e.text.as_str()).collect()
}

#[test]
fn test_simple_assignment() {
    let output = tokenize("x = 1");
    assert!(output.is_clean());
    assert_eq!(
        pairs(&output),
        vec![
            (TokenKind::Ident, "x"),
            (TokenKind::Assign, "="),
            (TokenKind::Number, "1"),
        ]
    );
}

#[rstest]
#[case::keyword("endfor", TokenKind::Keyword)]
#[case::keyword_prefix_is_identifier("endforx", TokenKind::Ident)]
#[case::keyword_suffix_is_identifier("xif", TokenKind::Ident)]
#[case::builtin("len", TokenKind::Builtin)]
#[case::builtin_prefix_is_identifier("length", TokenKind::Ident)]
#[case::underscore_identifier("_tmp1", TokenKind::Ident)]
#[case::integer("42", TokenKind::Number)]
#[case::decimal("3.14", TokenKind::Number)]
#[case::single_quoted("'hi there'", TokenKind::String)]
#[case::double_quoted("\"hi\"", TokenKind::String)]
#[case::augmented("+=", TokenKind::AugAssign)]
#[case::augmented_divide("/=", TokenKind::AugAssign)]
#[case::equality("==", TokenKind::EqEq)]
#[case::inequality("!=", TokenKind::Neq)]
#[case::less_equal("<=", TokenKind::Le)]
#[case::greater_equal(">=", TokenKind::Ge)]
#[case::colon(":", TokenKind::Colon)]
fn test_single_lexeme(#[case] source: &str, #[case] kind: TokenKind) {
    let output = tokenize(source);
    assert!(output.is_clean(), "errors: {:?}", output.errors);
    assert_eq!(pairs(&output), vec![(kind, source)]);
}

#[rstest]
#[case::unknown_symbol("x = @", vec!["@"])]
#[case::several_symbols("x = $ + ?", vec!["$", "?"])]
#[case::digits_then_letters("y = 12abc", vec!["12abc"])]
#[case::unterminated_single_quote("s = 'open", vec!["'open"])]
#[case::unterminated_double_quote("s = \"open\nt = 1", vec!["\"open"])]
fn test_lexical_errors(#[case] source: &str, #[case] expected: Vec<&str>) {
    let output = tokenize(source);
    assert_eq!(error_texts(&output), expected);
    for error in &output.errors {
        assert!(output.tokens.iter().all(|t| t.lexeme != error.text));
    }
}

#[test]
fn test_lexical_error_message() {
    let output = tokenize("x = @");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].to_string(), "Error, '@' is not a valid token");
}

#[test]
fn test_lexical_errors_stop_before_syntax_analysis() {
    // Lexical errors are collected in one pass, then block the parser.
    let analyzer = Analyzer::new(LanguageConfig::embedded()).unwrap();
    match analyzer.analyze("x = @\ny = 1 $") {
        Err(AnalysisError::Lexical(errors)) => {
            let texts: Vec<_> = errors.iter().map(|e| e.text.as_str()).collect();
            assert_eq!(texts, vec!["@", "$"]);
            assert_eq!(errors[1].line, 2);
        }
        other => panic!("expected lexical errors, got {other:?}"),
    }
}

#[test]
fn test_whitespace_is_dropped_and_newlines_are_kept() {
    let output = tokenize("a\t=  b \n\nc = 1\r\n");
    assert_eq!(
        pairs(&output),
        vec![
            (TokenKind::Ident, "a"),
            (TokenKind::Assign, "="),
            (TokenKind::Ident, "b"),
            (TokenKind::Newline, "\n"),
            (TokenKind::Newline, "\n"),
            (TokenKind::Ident, "c"),
            (TokenKind::Assign, "="),
            (TokenKind::Number, "1"),
            (TokenKind::Newline, "\r\n"),
        ]
    );
    assert_eq!(output.tokens[5].line, 3);
}

#[test]
fn test_operators_prefer_longest_form() {
    let output = tokenize("a<=b==c!=d>=e");
    let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::Le,
            TokenKind::Ident,
            TokenKind::EqEq,
            TokenKind::Ident,
            TokenKind::Neq,
            TokenKind::Ident,
            TokenKind::Ge,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn test_string_contents_are_opaque() {
    let output = tokenize("print('if @ endfor')");
    assert!(output.is_clean());
    assert_eq!(output.tokens[2].pair(), (TokenKind::String, "'if @ endfor'"));
}

#[test]
fn test_sample_program_is_clean() {
    let source = include_str!("../samples/average.srp");
    let output = tokenize(source);
    assert!(output.is_clean(), "errors: {:?}", output.errors);
    let keywords: Vec<_> = output
        .tokens
        .iter()
        .filter(|t| t.is(TokenKind::Keyword))
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(
        keywords,
        vec!["if", "for", "in", "endfor", "if", "else", "else", "endif"]
    );
}

#[test]
fn test_token_table() {
    let analyzer = Analyzer::new(LanguageConfig::embedded()).unwrap();
    let output = analyzer.tokenize("if x: \n print(x)\nendif");
    let table = format_table(&analyzer.table(&output.tokens));
    insta::assert_snapshot!(table, @r###"
    Lexeme  Token              Explanation
    --------------------------------------
    if      Keyword            Language reserved word
    x       Identifier         Name of a variable
    :       Colon              Ends a block header
    \n      Newline            End of a statement
    print   Built-in           Predefined function
    (       Left parenthesis   Opens a call or grouping
    x       Identifier         Name of a variable
    )       Right parenthesis  Closes a call or grouping
    \n      Newline            End of a statement
    endif   Keyword            Language reserved word
    "###);
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_tokenizer_and_analyzer_are_thread_safe() {
    assert_send_sync::<MasterPattern>();
    assert_send_sync::<Tokenizer>();
    assert_send_sync::<Analyzer<'static>>();
}

#[test]
fn test_one_tokenizer_shared_across_threads() {
    let tokenizer = Tokenizer::new(LanguageConfig::embedded()).unwrap();
    let sources = ["x = 1\n", "for n in xs:\n print(n)\nendfor\n", "y = @\n"];
    let expected: Vec<LexOutput> = sources.iter().map(|s| tokenizer.tokenize(s)).collect();

    let shared = &tokenizer;
    let results: Vec<LexOutput> = thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || shared.tokenize(source)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, expected);

    let analyzer = Analyzer::new(LanguageConfig::embedded()).unwrap();
    thread::scope(|scope| {
        let ok = scope.spawn(|| analyzer.analyze(sources[1]).is_ok());
        let lexical = scope.spawn(|| analyzer.analyze(sources[2]));
        assert!(ok.join().unwrap());
        assert!(matches!(
            lexical.join().unwrap(),
            Err(AnalysisError::Lexical(_))
        ));
    });
}
