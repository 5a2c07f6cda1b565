use thiserror::Error;

use crate::ast::{BlockStmt, Expr, InfixOp, PrefixOp, Program, Stmt};
use crate::lexer::{Lexer, Pos, Token, TokenKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{pos}: expected next token to be {expected}, got {got}")]
    UnexpectedToken {
        expected: TokenKind,
        got: TokenKind,
        pos: Pos,
    },
    #[error("{pos}: no prefix parse rule for {token}")]
    NoPrefixRule { token: TokenKind, pos: Pos },
    #[error("{pos}: could not parse {literal:?} as integer")]
    BadIntegerLiteral { literal: String, pos: Pos },
    #[error("{pos}: illegal token {literal:?}")]
    IllegalToken { literal: String, pos: Pos },
}

/// Binding powers, weakest first. Comparing two of these is what drives
/// the Pratt loop: an infix rule runs only while the looked-ahead token
/// binds tighter than the expression being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

fn infix_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::Lparen => Precedence::Call,
        TokenKind::Lbracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn infix_op(kind: TokenKind) -> InfixOp {
    match kind {
        TokenKind::Eq => InfixOp::Eq,
        TokenKind::NotEq => InfixOp::NotEq,
        TokenKind::Lt => InfixOp::LessThan,
        TokenKind::Gt => InfixOp::GreaterThan,
        TokenKind::Plus => InfixOp::Add,
        TokenKind::Minus => InfixOp::Subtract,
        TokenKind::Asterisk => InfixOp::Multiply,
        TokenKind::Slash => InfixOp::Divide,
        kind => unreachable!("token was not a valid infix operator: {}", kind),
    }
}

/// Recursive-descent parser with Pratt expression parsing over a one-token
/// lookahead. Errors are accumulated, not fatal: `parse_program` always
/// consumes the whole token stream, and a non-empty `errors()` means the
/// returned AST is best-effort and must not be evaluated.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    cur: Token<'src>,
    peek: Token<'src>,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    pub fn new(mut lexer: Lexer<'src>) -> Parser<'src> {
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while self.cur.kind != TokenKind::Eof {
            match self.parse_statement() {
                Ok(stmt) => {
                    statements.push(stmt);
                    self.advance();
                }
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }
        Program { statements }
    }

    fn advance(&mut self) {
        self.cur = self.peek;
        self.peek = self.lexer.next_token();
    }

    /// Expect `kind` as the next token and step onto it.
    fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek.kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind,
                got: self.peek.kind,
                pos: self.peek.pos,
            })
        }
    }

    // Consume tokens until a ';' has been consumed (or EOF is reached) so
    // the statement after a parse error still gets a clean start.
    fn synchronize(&mut self) {
        loop {
            match self.cur.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => break,
                _ => self.advance(),
            }
        }
    }

    // Every parse_* method is entered with `cur` on its first token and
    // returns with `cur` on its last.

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_peek(TokenKind::Ident)?;
        let name = self.cur.literal.to_string();
        self.expect_peek(TokenKind::Assign)?;
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.eat_optional_semicolon();
        Ok(Stmt::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.eat_optional_semicolon();
        Ok(Stmt::Return { value })
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.eat_optional_semicolon();
        Ok(Stmt::Expr { expression })
    }

    fn eat_optional_semicolon(&mut self) {
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }
    }

    fn parse_expression(&mut self, min_precedence: Precedence) -> Result<Expr, ParseError> {
        let mut left = self.parse_prefix()?;
        while self.peek.kind != TokenKind::Semicolon
            && min_precedence < infix_precedence(self.peek.kind)
        {
            self.advance();
            left = self.parse_infix(left)?;
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        match self.cur.kind {
            TokenKind::Ident => Ok(Expr::Ident(self.cur.literal.to_string())),
            TokenKind::Int => {
                let literal = self.cur.literal;
                literal
                    .parse::<i64>()
                    .map(|value| Expr::Int { value })
                    .map_err(|_| ParseError::BadIntegerLiteral {
                        literal: literal.to_string(),
                        pos: self.cur.pos,
                    })
            }
            TokenKind::Str => Ok(Expr::Str {
                value: self.cur.literal.to_string(),
            }),
            TokenKind::True => Ok(Expr::Bool { value: true }),
            TokenKind::False => Ok(Expr::Bool { value: false }),
            TokenKind::Null => Ok(Expr::Null),
            TokenKind::Bang => self.parse_prefix_operator(PrefixOp::Not),
            TokenKind::Minus => self.parse_prefix_operator(PrefixOp::Negative),
            TokenKind::Lparen => self.parse_grouped(),
            TokenKind::If => self.parse_if(),
            TokenKind::Function => self.parse_function(),
            TokenKind::Lbracket => {
                let elements = self.parse_expression_list(TokenKind::Rbracket)?;
                Ok(Expr::Array { elements })
            }
            TokenKind::Lbrace => self.parse_hash(),
            TokenKind::Illegal => Err(ParseError::IllegalToken {
                literal: self.cur.literal.to_string(),
                pos: self.cur.pos,
            }),
            kind => Err(ParseError::NoPrefixRule {
                token: kind,
                pos: self.cur.pos,
            }),
        }
    }

    fn parse_prefix_operator(&mut self, operator: PrefixOp) -> Result<Expr, ParseError> {
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Ok(Expr::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    // Grouping resets the binding power: the inner expression parses from
    // the lowest precedence again.
    fn parse_grouped(&mut self) -> Result<Expr, ParseError> {
        self.advance();
        let inner = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Rparen)?;
        Ok(inner)
    }

    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        self.expect_peek(TokenKind::Lparen)?;
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::Rparen)?;
        self.expect_peek(TokenKind::Lbrace)?;
        let consequence = self.parse_block()?;
        let alternative = if self.peek.kind == TokenKind::Else {
            self.advance();
            self.expect_peek(TokenKind::Lbrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Expr::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_block(&mut self) -> Result<BlockStmt, ParseError> {
        let mut statements = Vec::new();
        self.advance();
        while self.cur.kind != TokenKind::Rbrace {
            if self.cur.kind == TokenKind::Eof {
                return Err(ParseError::UnexpectedToken {
                    expected: TokenKind::Rbrace,
                    got: TokenKind::Eof,
                    pos: self.cur.pos,
                });
            }
            statements.push(self.parse_statement()?);
            self.advance();
        }
        Ok(BlockStmt { statements })
    }

    fn parse_function(&mut self) -> Result<Expr, ParseError> {
        self.expect_peek(TokenKind::Lparen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::Lbrace)?;
        let body = self.parse_block()?;
        Ok(Expr::Function { parameters, body })
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<String>, ParseError> {
        let mut parameters = Vec::new();
        if self.peek.kind == TokenKind::Rparen {
            self.advance();
            return Ok(parameters);
        }
        self.advance();
        parameters.push(self.expect_current_ident()?);
        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            parameters.push(self.expect_current_ident()?);
        }
        self.expect_peek(TokenKind::Rparen)?;
        Ok(parameters)
    }

    fn expect_current_ident(&mut self) -> Result<String, ParseError> {
        if self.cur.kind == TokenKind::Ident {
            Ok(self.cur.literal.to_string())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: TokenKind::Ident,
                got: self.cur.kind,
                pos: self.cur.pos,
            })
        }
    }

    /// Comma-separated expressions, terminated by `end`. Shared by call
    /// arguments and array literals.
    fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.peek.kind == end {
            self.advance();
            return Ok(items);
        }
        self.advance();
        items.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            items.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(end)?;
        Ok(items)
    }

    fn parse_hash(&mut self) -> Result<Expr, ParseError> {
        let mut pairs = Vec::new();
        while self.peek.kind != TokenKind::Rbrace {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenKind::Colon)?;
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if self.peek.kind != TokenKind::Rbrace {
                self.expect_peek(TokenKind::Comma)?;
            }
        }
        self.expect_peek(TokenKind::Rbrace)?;
        Ok(Expr::Hash { pairs })
    }

    // Entered with `cur` on the operator (or `(`/`[`) that continues `left`.
    fn parse_infix(&mut self, left: Expr) -> Result<Expr, ParseError> {
        match self.cur.kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::Gt => {
                let operator = infix_op(self.cur.kind);
                let precedence = infix_precedence(self.cur.kind);
                self.advance();
                let right = self.parse_expression(precedence)?;
                Ok(Expr::Infix {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                })
            }
            TokenKind::Lparen => {
                let arguments = self.parse_expression_list(TokenKind::Rparen)?;
                Ok(Expr::Call {
                    function: Box::new(left),
                    arguments,
                })
            }
            TokenKind::Lbracket => {
                self.advance();
                let index = self.parse_expression(Precedence::Lowest)?;
                self.expect_peek(TokenKind::Rbracket)?;
                Ok(Expr::Index {
                    left: Box::new(left),
                    index: Box::new(index),
                })
            }
            kind => unreachable!("token has no infix parse rule: {}", kind),
        }
    }
}

/// Parse a whole source text, returning the accumulated errors instead of
/// the program if there were any.
pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if parser.errors.is_empty() {
        Ok(program)
    } else {
        Err(parser.errors)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_ok(input: &str) -> Program {
        let mut parser = Parser::new(Lexer::new(input));
        let program = parser.parse_program();
        assert!(
            parser.errors().is_empty(),
            "unexpected parse errors for {:?}: {:?}",
            input,
            parser.errors()
        );
        program
    }

    fn parse_single_expr(input: &str) -> Expr {
        let mut program = parse_ok(input);
        assert_eq!(1, program.statements.len(), "input: {:?}", input);
        match program.statements.remove(0) {
            Stmt::Expr { expression } => expression,
            other => panic!("expected an expression statement, got {:?}", other),
        }
    }

    fn parse_errors(input: &str) -> Vec<ParseError> {
        let mut parser = Parser::new(Lexer::new(input));
        parser.parse_program();
        parser.errors().to_vec()
    }

    #[test]
    fn let_statements() {
        let program = parse_ok("let x = 5; let y = true; let foobar = y;");
        assert_eq!(
            vec![
                Stmt::Let {
                    name: "x".to_string(),
                    value: Expr::Int { value: 5 },
                },
                Stmt::Let {
                    name: "y".to_string(),
                    value: Expr::Bool { value: true },
                },
                Stmt::Let {
                    name: "foobar".to_string(),
                    value: Expr::Ident("y".to_string()),
                },
            ],
            program.statements
        );
    }

    #[test]
    fn return_statements() {
        let program = parse_ok("return 5; return x + y;");
        assert_eq!(2, program.statements.len());
        for stmt in &program.statements {
            assert!(matches!(stmt, Stmt::Return { .. }), "got {:?}", stmt);
        }
    }

    #[test]
    fn literal_expressions() {
        assert_eq!(Expr::Ident("foobar".to_string()), parse_single_expr("foobar;"));
        assert_eq!(Expr::Int { value: 5 }, parse_single_expr("5;"));
        assert_eq!(
            Expr::Str {
                value: "hello world".to_string()
            },
            parse_single_expr("\"hello world\";")
        );
        assert_eq!(Expr::Bool { value: true }, parse_single_expr("true;"));
        assert_eq!(Expr::Null, parse_single_expr("null;"));
    }

    #[test]
    fn prefix_expressions() {
        let tests = [
            ("!5;", PrefixOp::Not, Expr::Int { value: 5 }),
            ("-15;", PrefixOp::Negative, Expr::Int { value: 15 }),
            ("!true;", PrefixOp::Not, Expr::Bool { value: true }),
        ];
        for (input, operator, right) in tests {
            assert_eq!(
                Expr::Prefix {
                    operator,
                    right: Box::new(right),
                },
                parse_single_expr(input),
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn infix_expressions() {
        let tests = [
            ("5 + 6;", InfixOp::Add),
            ("5 - 6;", InfixOp::Subtract),
            ("5 * 6;", InfixOp::Multiply),
            ("5 / 6;", InfixOp::Divide),
            ("5 > 6;", InfixOp::GreaterThan),
            ("5 < 6;", InfixOp::LessThan),
            ("5 == 6;", InfixOp::Eq),
            ("5 != 6;", InfixOp::NotEq),
        ];
        for (input, operator) in tests {
            assert_eq!(
                Expr::Infix {
                    left: Box::new(Expr::Int { value: 5 }),
                    operator,
                    right: Box::new(Expr::Int { value: 6 }),
                },
                parse_single_expr(input),
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn operator_precedence() {
        let tests = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
            ("true == true", "(true == true)"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];
        for (input, expected) in tests {
            assert_eq!(expected, parse_single_expr(input).to_string(), "input: {:?}", input);
        }
    }

    #[test]
    fn precedence_matches_explicit_grouping() {
        let implicit = parse_single_expr("a + b * c");
        let explicit = parse_single_expr("a + (b * c)");
        assert_eq!(explicit, implicit);
    }

    #[test]
    fn if_expression() {
        let expr = parse_single_expr("if (x < y) { x }");
        match expr {
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                assert_eq!("(x < y)", condition.to_string());
                assert_eq!(1, consequence.statements.len());
                assert!(alternative.is_none());
            }
            other => panic!("expected an if expression, got {:?}", other),
        }
    }

    #[test]
    fn if_else_expression() {
        let expr = parse_single_expr("if (x < y) { x } else { y }");
        match expr {
            Expr::If { alternative, .. } => {
                let alternative = alternative.expect("expected an else block");
                assert_eq!(1, alternative.statements.len());
            }
            other => panic!("expected an if expression, got {:?}", other),
        }
    }

    #[test]
    fn function_literal() {
        let expr = parse_single_expr("fn(x, y) { x + y; }");
        match expr {
            Expr::Function { parameters, body } => {
                assert_eq!(vec!["x".to_string(), "y".to_string()], parameters);
                assert_eq!(1, body.statements.len());
            }
            other => panic!("expected a function literal, got {:?}", other),
        }
    }

    #[test]
    fn function_parameter_lists() {
        let tests: [(&str, &[&str]); 3] = [
            ("fn() {};", &[]),
            ("fn(x) {};", &["x"]),
            ("fn(x, y, z) {};", &["x", "y", "z"]),
        ];
        for (input, expected) in tests {
            match parse_single_expr(input) {
                Expr::Function { parameters, .. } => {
                    assert_eq!(expected.to_vec(), parameters, "input: {:?}", input);
                }
                other => panic!("expected a function literal, got {:?}", other),
            }
        }
    }

    #[test]
    fn call_expression() {
        let expr = parse_single_expr("add(1, 2 * 3, 4 + 5);");
        match expr {
            Expr::Call {
                function,
                arguments,
            } => {
                assert_eq!(Expr::Ident("add".to_string()), *function);
                assert_eq!(3, arguments.len());
                assert_eq!("(2 * 3)", arguments[1].to_string());
            }
            other => panic!("expected a call expression, got {:?}", other),
        }
    }

    #[test]
    fn array_literal_and_index() {
        assert_eq!(
            "[1, (2 * 2), (3 + 3)]",
            parse_single_expr("[1, 2 * 2, 3 + 3]").to_string()
        );
        assert_eq!("[]", parse_single_expr("[]").to_string());
        assert_eq!(
            "(myArray[(1 + 1)])",
            parse_single_expr("myArray[1 + 1]").to_string()
        );
    }

    #[test]
    fn hash_literals() {
        let expr = parse_single_expr(r#"{"one": 1, "two": 2, "three": 3}"#);
        match expr {
            Expr::Hash { pairs } => {
                let rendered: Vec<(String, String)> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                assert_eq!(
                    vec![
                        ("\"one\"".to_string(), "1".to_string()),
                        ("\"two\"".to_string(), "2".to_string()),
                        ("\"three\"".to_string(), "3".to_string()),
                    ],
                    rendered
                );
            }
            other => panic!("expected a hash literal, got {:?}", other),
        }
    }

    #[test]
    fn empty_hash_literal() {
        assert_eq!(Expr::Hash { pairs: Vec::new() }, parse_single_expr("{}"));
    }

    #[test]
    fn hash_literal_with_expression_values() {
        assert_eq!(
            "{\"one\": (0 + 1), \"two\": (10 - 8)}",
            parse_single_expr(r#"{"one": 0 + 1, "two": 10 - 8}"#).to_string()
        );
    }

    #[test]
    fn trailing_semicolon_is_optional() {
        assert_eq!(parse_ok("5"), parse_ok("5;"));
        assert_eq!(parse_ok("let x = 1"), parse_ok("let x = 1;"));
    }

    #[test]
    fn error_reports_expected_and_got() {
        let errors = parse_errors("let x 5;");
        assert_eq!(1, errors.len());
        assert_eq!(
            "1:7: expected next token to be =, got integer",
            errors[0].to_string()
        );
    }

    #[test]
    fn errors_accumulate_across_statements() {
        let errors = parse_errors("let = 5; let y = 10; let 838383;");
        assert_eq!(2, errors.len());
        // The good statement in the middle still parses; both bad ones report
        assert!(errors
            .iter()
            .all(|e| matches!(e, ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn missing_prefix_rule_is_reported() {
        let errors = parse_errors("5 + ;");
        assert_eq!(
            vec![ParseError::NoPrefixRule {
                token: TokenKind::Semicolon,
                pos: Pos { line: 1, column: 5 },
            }],
            errors
        );
    }

    #[test]
    fn illegal_token_is_reported() {
        let errors = parse_errors("let x = 5 @;");
        assert_eq!(1, errors.len());
        assert!(matches!(errors[0], ParseError::IllegalToken { .. }));
    }

    #[test]
    fn unterminated_block_is_reported() {
        let errors = parse_errors("if (x) { y");
        assert!(!errors.is_empty());
    }

    #[test]
    fn integer_overflow_is_reported() {
        let errors = parse_errors("92233720368547758089;");
        assert_eq!(1, errors.len());
        assert!(matches!(errors[0], ParseError::BadIntegerLiteral { .. }));
    }

    #[test]
    fn canonical_text_round_trips() {
        let sources = [
            "let x = 5;",
            "return (1 + (2 * 3));",
            "if (x < y) { x; } else { y; };",
            "let add = fn(a, b) { return (a + b); };",
            "add(1, (2 * 3));",
            "[1, \"two\", true];",
            "{\"one\": 1, true: 2, 3: \"three\"};",
            "((myArray[0])[1]);",
            "(!(-a));",
        ];
        for source in sources {
            let first = parse_ok(source);
            let rendered = first.to_string();
            let second = parse_ok(&rendered);
            assert_eq!(first, second, "source: {:?} rendered: {:?}", source, rendered);
        }
    }

    #[test]
    fn built_ast_round_trips_through_rendering() {
        let program = Program {
            statements: vec![
                Stmt::Let {
                    name: "f".to_string(),
                    value: Expr::Function {
                        parameters: vec!["x".to_string()],
                        body: BlockStmt {
                            statements: vec![Stmt::Return {
                                value: Expr::Infix {
                                    left: Box::new(Expr::Ident("x".to_string())),
                                    operator: InfixOp::Multiply,
                                    right: Box::new(Expr::Int { value: 2 }),
                                },
                            }],
                        },
                    },
                },
                Stmt::Expr {
                    expression: Expr::Call {
                        function: Box::new(Expr::Ident("f".to_string())),
                        arguments: vec![Expr::Int { value: 21 }],
                    },
                },
            ],
        };
        let reparsed = parse_ok(&program.to_string());
        assert_eq!(program, reparsed);
    }

    #[test]
    fn hash_is_not_confused_with_block_in_expression_position() {
        // `{` in expression position is a hash literal
        let expr = parse_single_expr("{1: 2}[1]");
        assert!(matches!(expr, Expr::Index { .. }));
    }
}
