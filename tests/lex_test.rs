use rpn::lang::{lex, ErrorCode, Kind, Scanner, Token};

fn texts(s: &str) -> Vec<String> {
    lex(s).unwrap().into_iter().map(|t| t.text).collect()
}

#[test]
fn test_constants() {
    assert_eq!(lex("123.45").unwrap(), vec![Token::new("123.45", Kind::Constant, 1)]);
    assert_eq!(lex("7").unwrap(), vec![Token::new("7", Kind::Constant, 1)]);
}

#[test]
fn test_identifier_then_space() {
    assert_eq!(lex("$x ").unwrap(), vec![Token::new("$x", Kind::Identifier, 1)]);
}

#[test]
fn test_bang_after_identifier_is_malformed() {
    let error = lex("$x!").unwrap_err();
    assert!(error.is(ErrorCode::MalformedToken));
    assert_eq!(error.to_string(), "malformed token in line 1 at `!`; unrecognized token");
}

#[test]
fn test_statement() {
    assert_eq!(
        texts("$a[$i]=?max($b,-1.5)>=2;"),
        vec!["$a", "[", "$i", "]", "=", "?max", "(", "$b", ",", "-", "1.5", ")", ">=", "2", ";"]
    );
}

#[test]
fn test_comparison_pairs() {
    assert_eq!(texts("= == ! != < <= > >="), vec!["=", "==", "!", "!=", "<", "<=", ">", ">="]);
    assert_eq!(texts("!true"), vec!["!", "true"]);
}

#[test]
fn test_kinds() {
    let tokens = lex(r#"print "hi", endl; @l: # note"#).unwrap();
    let kinds: Vec<Kind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            Kind::Keyword,
            Kind::StringLiteral,
            Kind::Punctuator,
            Kind::Keyword,
            Kind::Punctuator,
            Kind::Identifier,
            Kind::Punctuator,
        ]
    );
}

#[test]
fn test_line_numbers() {
    let tokens = lex("program\n\n\"multi\nline\"\n  ;").unwrap();
    let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 4, 5]);
    assert_eq!(tokens[1].text, "multi\nline");
}

#[test]
fn test_unknown_keyword() {
    let error = lex("begin then").unwrap_err();
    assert!(error.is(ErrorCode::MalformedToken));
}

#[test]
fn test_upper_case_is_malformed() {
    assert!(lex("Print").is_err());
    assert!(lex("$x = 1;").is_ok());
}

#[test]
fn test_unterminated_string() {
    let error = lex("print \"open").unwrap_err();
    assert!(error.is(ErrorCode::UnterminatedToken));
    assert_eq!(error.line_number(), Some(1));
}

#[test]
fn test_string_needs_separator() {
    assert!(lex(r#""a"$b"#).is_err());
    assert!(lex(r#""a"+$b"#).is_ok());
}

#[test]
fn test_scanner_feed() {
    let mut scanner = Scanner::new();
    for c in "inc $i;".chars() {
        scanner.feed(c);
    }
    assert!(scanner.success());
    assert_eq!(scanner.last_token(), Some(&Token::new(";", Kind::Punctuator, 1)));
    assert_eq!(scanner.tokens().len(), 3);
}
