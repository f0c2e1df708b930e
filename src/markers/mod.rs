//! Marker-expression evaluation for extra-gated requirements.
//!
//! Requirement markers are boolean conditions attached to `Requires-Dist`
//! entries (`foo >= 1.0 ; extra == "tls"`). The resolver only needs to decide
//! whether a requirement is active for a candidate extra name, so evaluation
//! is a pure function of the marker text and that single `extra` value.
//!
//! Comparisons over any other environment variable (`python_version`,
//! `sys_platform`, ...) evaluate to true: the resolver introspects a metadata
//! store, not a live interpreter, and over-inclusion degrades gracefully
//! where exclusion would silently drop real edges.

use tracing::debug;

/// Whether a marker expression textually references the `extra` variable.
///
/// Requirements whose marker never mentions `extra` are unconditional with
/// respect to extras and belong to the base dependency set.
#[must_use]
pub fn references_extra(marker: &str) -> bool {
    tokenize(marker)
        .map(|tokens| tokens.iter().any(|t| matches!(t, Token::Ident(name) if name == "extra")))
        .unwrap_or(false)
}

/// Evaluate a marker expression with `extra` bound to the given name.
///
/// Returns false for markers that cannot be parsed; a requirement behind an
/// unintelligible marker is treated as inactive rather than failing the run.
#[must_use]
pub fn evaluate(marker: &str, extra: &str) -> bool {
    let expr = match tokenize(marker).and_then(|tokens| Parser::new(tokens).parse()) {
        Ok(expr) => expr,
        Err(reason) => {
            debug!(marker, reason, "unparseable marker treated as inactive");
            return false;
        }
    };
    eval(&expr, extra)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str(String),
    Op(String),
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Variable(String),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    Or(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Cmp { lhs: Value, op: String, rhs: Value },
}

fn tokenize(input: &str) -> Result<Vec<Token>, &'static str> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '\'' | '"' => {
                let quote = c;
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some(ch) if ch == quote => break,
                        Some(ch) => value.push(ch),
                        None => return Err("unterminated string literal"),
                    }
                }
                tokens.push(Token::Str(value));
            }
            '=' | '!' | '<' | '>' | '~' => {
                chars.next();
                let mut op = String::from(c);
                if chars.peek() == Some(&'=') {
                    chars.next();
                    op.push('=');
                    // PEP 440 arbitrary equality: ===
                    if op == "==" && chars.peek() == Some(&'=') {
                        chars.next();
                        op.push('=');
                    }
                }
                match op.as_str() {
                    "=" | "!" | "~" => return Err("incomplete comparison operator"),
                    _ => tokens.push(Token::Op(op)),
                }
            }
            _ if c.is_ascii_alphanumeric() || c == '_' || c == '.' => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            _ => return Err("unexpected character in marker"),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<Expr, &'static str> {
        let expr = self.parse_or()?;
        if self.pos != self.tokens.len() {
            return Err("trailing tokens after marker expression");
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(name)) if name == keyword) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn parse_or(&mut self) -> Result<Expr, &'static str> {
        let mut lhs = self.parse_and()?;
        while self.eat_keyword("or") {
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, &'static str> {
        let mut lhs = self.parse_atom()?;
        while self.eat_keyword("and") {
            let rhs = self.parse_atom()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_atom(&mut self) -> Result<Expr, &'static str> {
        if matches!(self.peek(), Some(Token::LParen)) {
            self.pos += 1;
            let inner = self.parse_or()?;
            match self.next() {
                Some(Token::RParen) => return Ok(inner),
                _ => return Err("unbalanced parenthesis"),
            }
        }
        let lhs = self.parse_value()?;
        let op = self.parse_op()?;
        let rhs = self.parse_value()?;
        Ok(Expr::Cmp { lhs, op, rhs })
    }

    fn parse_value(&mut self) -> Result<Value, &'static str> {
        match self.next() {
            Some(Token::Ident(name)) => Ok(Value::Variable(name)),
            Some(Token::Str(value)) => Ok(Value::Literal(value)),
            _ => Err("expected variable or string literal"),
        }
    }

    fn parse_op(&mut self) -> Result<String, &'static str> {
        match self.peek().cloned() {
            Some(Token::Op(op)) => {
                self.pos += 1;
                Ok(op)
            }
            Some(Token::Ident(word)) if word == "in" => {
                self.pos += 1;
                Ok("in".into())
            }
            Some(Token::Ident(word)) if word == "not" => {
                self.pos += 1;
                if self.eat_keyword("in") {
                    Ok("not in".into())
                } else {
                    Err("expected 'in' after 'not'")
                }
            }
            _ => Err("expected comparison operator"),
        }
    }
}

fn involves_extra(value: &Value) -> bool {
    matches!(value, Value::Variable(name) if name == "extra")
}

fn resolve<'a>(value: &'a Value, extra: &'a str) -> &'a str {
    match value {
        Value::Variable(name) if name == "extra" => extra,
        // Other environment variables are opaque here; their comparisons
        // never reach this point with a meaningful binding.
        Value::Variable(_) => "",
        Value::Literal(text) => text,
    }
}

fn eval(expr: &Expr, extra: &str) -> bool {
    match expr {
        Expr::Or(lhs, rhs) => eval(lhs, extra) || eval(rhs, extra),
        Expr::And(lhs, rhs) => eval(lhs, extra) && eval(rhs, extra),
        Expr::Cmp { lhs, op, rhs } => {
            if !involves_extra(lhs) && !involves_extra(rhs) {
                // Environment comparison the resolver cannot see; include.
                return true;
            }
            let left = resolve(lhs, extra);
            let right = resolve(rhs, extra);
            match op.as_str() {
                "==" | "===" => left == right,
                "!=" => left != right,
                "in" => right.contains(left),
                "not in" => !right.contains(left),
                // Ordering operators are meaningless on extra names.
                _ => false,
            }
        }
    }
}
