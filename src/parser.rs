//! Hand-written recursive-descent parser for the `.swa` textual assembly
//! format (spec.md §4.7): lexes the source into a flat token stream, then
//! parses one or more `func` blocks, resolving branch-target labels to
//! [`BlockId`]s once all of a function's blocks are known.

use std::collections::HashMap;

use thiserror::Error;

use crate::alu::{BopOp, UopOp};
use crate::operand::Operand;
use crate::program::{BasicBlock, BlockId, Function, Program, Stmt};
use crate::reg::Reg;
use crate::width::Width;

/// Everything that can go wrong turning `.swa` source into a [`Program`].
/// Always line-tagged, matching the engine's own error taxonomy.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: unexpected end of input")]
    UnexpectedEof { line: usize },
    #[error("line {line}: expected {expected}, found `{found}`")]
    UnexpectedToken { line: usize, expected: String, found: String },
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic { line: usize, mnemonic: String },
    #[error("line {line}: invalid width suffix `{suffix}`")]
    InvalidWidth { line: usize, suffix: String },
    #[error("line {line}: invalid register `{name}`")]
    InvalidRegister { line: usize, name: String },
    #[error("line {line}: invalid numeric literal `{text}`")]
    InvalidNumber { line: usize, text: String },
    #[error("line {line}: duplicate function `{name}`")]
    DuplicateFunction { line: usize, name: String },
    #[error("line {line}: branch to undefined block `{label}`")]
    UndefinedLabel { line: usize, label: String },
    #[error("line {line}: unexpected character `{ch}`")]
    UnexpectedChar { line: usize, ch: char },
}

/// Parse a whole `.swa` source file into a [`Program`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser::new(tokens);
    let mut functions = HashMap::new();
    while parser.peek().is_some() {
        let (name, line, function) = parser.parse_function()?;
        if functions.insert(name.clone(), function).is_some() {
            return Err(ParseError::DuplicateFunction { line, name });
        }
    }
    Ok(Program::new(functions))
}

#[derive(Debug, Clone)]
enum TokenKind {
    Ident(String),
    Number(u64),
    Symbol(char),
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(s) => s.clone(),
        TokenKind::Number(n) => n.to_string(),
        TokenKind::Symbol(c) => c.to_string(),
    }
}

fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut line = 1usize;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            c if c.is_whitespace() => i += 1,
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '(' | ')' | '{' | '}' | ':' | ',' | '[' | ']' | '+' | '=' => {
                tokens.push(Token { kind: TokenKind::Symbol(c), line });
                i += 1;
            }
            c if c.is_ascii_digit() => {
                let start = i;
                if c == '0' && chars.get(i + 1) == Some(&'x') {
                    i += 2;
                    while i < chars.len() && chars[i].is_ascii_hexdigit() {
                        i += 1;
                    }
                    let text: String = chars[start..i].iter().collect();
                    let value = u64::from_str_radix(&text[2..], 16)
                        .map_err(|_| ParseError::InvalidNumber { line, text: text.clone() })?;
                    tokens.push(Token { kind: TokenKind::Number(value), line });
                } else {
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                    let text: String = chars[start..i].iter().collect();
                    let value = text
                        .parse::<u64>()
                        .map_err(|_| ParseError::InvalidNumber { line, text: text.clone() })?;
                    tokens.push(Token { kind: TokenKind::Number(value), line });
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token { kind: TokenKind::Ident(text), line });
            }
            other => return Err(ParseError::UnexpectedChar { line, ch: other }),
        }
    }

    Ok(tokens)
}

fn parse_reg(name: &str, line: usize) -> Result<Reg, ParseError> {
    if name == "sp" {
        return Ok(Reg::Sp);
    }
    if name == "none" {
        return Ok(Reg::None);
    }
    if let Some(rest) = name.strip_prefix('r') {
        if let Ok(n) = rest.parse::<u8>() {
            if (1..=32).contains(&n) {
                return Ok(Reg::general(n));
            }
        }
    }
    if let Some(rest) = name.strip_prefix('a') {
        if let Ok(n) = rest.parse::<u8>() {
            if (1..=16).contains(&n) {
                return Ok(Reg::arg(n));
            }
        }
    }
    Err(ParseError::InvalidRegister { line, name: name.to_string() })
}

fn parse_width(suffix: Option<&str>, line: usize) -> Result<Width, ParseError> {
    match suffix {
        Some("i1") => Ok(Width::Bit1),
        Some("i8") => Ok(Width::Bits8),
        Some("i16") => Ok(Width::Bits16),
        Some("i32") => Ok(Width::Bits32),
        Some("i64") => Ok(Width::Bits64),
        other => Err(ParseError::InvalidWidth { line, suffix: other.unwrap_or("").to_string() }),
    }
}

fn split_mnemonic(token: &str) -> (&str, Option<&str>) {
    match token.split_once('.') {
        Some((m, s)) => (m, Some(s)),
        None => (token, None),
    }
}

fn bop_from_mnemonic(m: &str) -> Option<BopOp> {
    Some(match m {
        "udiv" => BopOp::Udiv,
        "sdiv" => BopOp::Sdiv,
        "urem" => BopOp::Urem,
        "srem" => BopOp::Srem,
        "mul" => BopOp::Mul,
        "shl" => BopOp::Shl,
        "lshr" => BopOp::Lshr,
        "ashr" => BopOp::Ashr,
        "and" => BopOp::And,
        "or" => BopOp::Or,
        "xor" => BopOp::Xor,
        "add" => BopOp::Add,
        "sub" => BopOp::Sub,
        "eq" => BopOp::Eq,
        "ne" => BopOp::Ne,
        "ugt" => BopOp::Ugt,
        "uge" => BopOp::Uge,
        "ult" => BopOp::Ult,
        "ule" => BopOp::Ule,
        "sgt" => BopOp::Sgt,
        "sge" => BopOp::Sge,
        "slt" => BopOp::Slt,
        "sle" => BopOp::Sle,
        _ => return None,
    })
}

fn uop_from_mnemonic(m: &str) -> Option<UopOp> {
    Some(match m {
        "incr" => UopOp::Incr,
        "decr" => UopOp::Decr,
        _ => return None,
    })
}

/// Same shape as [`Stmt`], except branch targets are still unresolved
/// labels. Resolved to real [`Stmt`]s once a whole function's blocks (and
/// thus every label in it) are known.
enum RawStmt {
    Ret { line: usize, val: Operand },
    BrUncond { line: usize, target: String },
    BrCond { line: usize, cond: Operand, true_block: String, false_block: String },
    Switch { line: usize, cond: Operand, cases: Vec<(u64, String)>, default: String },
    Malloc { line: usize, lhs: Reg, size: Operand },
    Free { line: usize, ptr: Operand },
    Load { line: usize, lhs: Reg, is_async: bool, width: Width, ptr: Operand, offset: u64 },
    Store { line: usize, width: Width, val: Operand, ptr: Operand, offset: u64 },
    Bop { line: usize, lhs: Reg, op: BopOp, lhs_val: Operand, rhs_val: Operand, size: Width },
    Sum { line: usize, lhs: Reg, values: Box<[Operand; 8]>, size: Width },
    Uop { line: usize, lhs: Reg, op: UopOp, val: Operand, size: Width },
    Select { line: usize, lhs: Reg, cond: Operand, val_true: Operand, val_false: Operand },
    Call { line: usize, lhs: Reg, function: String, args: Vec<Operand> },
    Assert { line: usize, lhs_val: Operand, rhs_val: Operand },
    Read { line: usize, lhs: Reg },
    Write { line: usize, lhs: Reg, val: Operand },
}

fn resolve_function(name: String, nargs: usize, raw_blocks: Vec<(String, Vec<RawStmt>)>) -> Result<Function, ParseError> {
    let label_to_index: HashMap<&str, usize> =
        raw_blocks.iter().enumerate().map(|(i, (label, _))| (label.as_str(), i)).collect();

    let resolve = |label: &str, line: usize| -> Result<BlockId, ParseError> {
        label_to_index
            .get(label)
            .map(|&i| BlockId(i))
            .ok_or_else(|| ParseError::UndefinedLabel { line, label: label.to_string() })
    };

    let mut blocks = Vec::with_capacity(raw_blocks.len());
    for (label, raw_stmts) in raw_blocks {
        let mut stmts = Vec::with_capacity(raw_stmts.len());
        for raw in raw_stmts {
            let stmt = match raw {
                RawStmt::Ret { line, val } => Stmt::Ret { line, val },
                RawStmt::BrUncond { line, target } => {
                    Stmt::BrUncond { line, target: resolve(&target, line)? }
                }
                RawStmt::BrCond { line, cond, true_block, false_block } => Stmt::BrCond {
                    line,
                    cond,
                    true_block: resolve(&true_block, line)?,
                    false_block: resolve(&false_block, line)?,
                },
                RawStmt::Switch { line, cond, cases, default } => {
                    let mut resolved_cases = Vec::with_capacity(cases.len());
                    for (value, target) in cases {
                        resolved_cases.push((value, resolve(&target, line)?));
                    }
                    Stmt::Switch { line, cond, cases: resolved_cases, default: resolve(&default, line)? }
                }
                RawStmt::Malloc { line, lhs, size } => Stmt::Malloc { line, lhs, size },
                RawStmt::Free { line, ptr } => Stmt::Free { line, ptr },
                RawStmt::Load { line, lhs, is_async, width, ptr, offset } => {
                    Stmt::Load { line, lhs, is_async, width, ptr, offset }
                }
                RawStmt::Store { line, width, val, ptr, offset } => {
                    Stmt::Store { line, width, val, ptr, offset }
                }
                RawStmt::Bop { line, lhs, op, lhs_val, rhs_val, size } => {
                    Stmt::Bop { line, lhs, op, lhs_val, rhs_val, size }
                }
                RawStmt::Sum { line, lhs, values, size } => Stmt::Sum { line, lhs, values, size },
                RawStmt::Uop { line, lhs, op, val, size } => Stmt::Uop { line, lhs, op, val, size },
                RawStmt::Select { line, lhs, cond, val_true, val_false } => {
                    Stmt::Select { line, lhs, cond, val_true, val_false }
                }
                RawStmt::Call { line, lhs, function, args } => Stmt::Call { line, lhs, function, args },
                RawStmt::Assert { line, lhs_val, rhs_val } => Stmt::Assert { line, lhs_val, rhs_val },
                RawStmt::Read { line, lhs } => Stmt::Read { line, lhs },
                RawStmt::Write { line, lhs, val } => Stmt::Write { line, lhs, val },
            };
            stmts.push(stmt);
        }
        blocks.push(BasicBlock { label, stmts });
    }

    Ok(Function::new(name, nargs, blocks))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn describe_current(&self) -> String {
        self.peek().map(|t| describe(&t.kind)).unwrap_or_else(|| "<eof>".to_string())
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek_symbol(&self, c: char) -> bool {
        matches!(self.peek(), Some(Token { kind: TokenKind::Symbol(s), .. }) if *s == c)
    }

    fn peek_ident(&self, text: &str) -> bool {
        matches!(self.peek(), Some(Token { kind: TokenKind::Ident(s), .. }) if s == text)
    }

    fn peek_is_label(&self) -> bool {
        matches!(
            (self.tokens.get(self.pos), self.tokens.get(self.pos + 1)),
            (Some(Token { kind: TokenKind::Ident(_), .. }), Some(Token { kind: TokenKind::Symbol(':'), .. }))
        )
    }

    fn peek_is_assignment(&self) -> bool {
        matches!(
            (self.tokens.get(self.pos), self.tokens.get(self.pos + 1)),
            (Some(Token { kind: TokenKind::Ident(_), .. }), Some(Token { kind: TokenKind::Symbol('='), .. }))
        )
    }

    fn expect_symbol(&mut self, c: char) -> Result<(), ParseError> {
        match self.advance() {
            Some(Token { kind: TokenKind::Symbol(s), .. }) if s == c => Ok(()),
            Some(t) => Err(ParseError::UnexpectedToken {
                line: t.line,
                expected: format!("`{c}`"),
                found: describe(&t.kind),
            }),
            None => Err(ParseError::UnexpectedEof { line: self.line() }),
        }
    }

    fn expect_ident(&mut self) -> Result<(String, usize), ParseError> {
        match self.advance() {
            Some(Token { kind: TokenKind::Ident(s), line }) => Ok((s, line)),
            Some(t) => Err(ParseError::UnexpectedToken {
                line: t.line,
                expected: "identifier".into(),
                found: describe(&t.kind),
            }),
            None => Err(ParseError::UnexpectedEof { line: self.line() }),
        }
    }

    fn expect_number(&mut self) -> Result<(u64, usize), ParseError> {
        match self.advance() {
            Some(Token { kind: TokenKind::Number(n), line }) => Ok((n, line)),
            Some(t) => Err(ParseError::UnexpectedToken {
                line: t.line,
                expected: "number".into(),
                found: describe(&t.kind),
            }),
            None => Err(ParseError::UnexpectedEof { line: self.line() }),
        }
    }

    fn skip_comma(&mut self) {
        if self.peek_symbol(',') {
            self.pos += 1;
        }
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        match self.advance() {
            Some(Token { kind: TokenKind::Number(n), .. }) => Ok(Operand::Literal(n)),
            Some(Token { kind: TokenKind::Ident(s), line }) => Ok(Operand::Register(parse_reg(&s, line)?)),
            Some(t) => Err(ParseError::UnexpectedToken {
                line: t.line,
                expected: "operand".into(),
                found: describe(&t.kind),
            }),
            None => Err(ParseError::UnexpectedEof { line: self.line() }),
        }
    }

    fn parse_dest_reg(&mut self) -> Result<Reg, ParseError> {
        let (name, line) = self.expect_ident()?;
        parse_reg(&name, line)
    }

    fn parse_function(&mut self) -> Result<(String, usize, Function), ParseError> {
        let (kw, start_line) = self.expect_ident()?;
        if kw != "func" {
            return Err(ParseError::UnexpectedToken { line: start_line, expected: "`func`".into(), found: kw });
        }
        let (name, _) = self.expect_ident()?;
        self.expect_symbol('(')?;
        let (nargs, _) = self.expect_number()?;
        self.expect_symbol(')')?;
        self.expect_symbol('{')?;

        let mut raw_blocks: Vec<(String, Vec<RawStmt>)> = Vec::new();
        while !self.peek_symbol('}') {
            let (label, _) = self.expect_ident()?;
            self.expect_symbol(':')?;
            let mut stmts = Vec::new();
            while !self.peek_symbol('}') && !self.peek_is_label() {
                stmts.push(self.parse_stmt()?);
            }
            raw_blocks.push((label, stmts));
        }
        self.expect_symbol('}')?;

        let function = resolve_function(name.clone(), nargs as usize, raw_blocks)?;
        Ok((name, start_line, function))
    }

    fn parse_stmt(&mut self) -> Result<RawStmt, ParseError> {
        if self.peek_is_assignment() {
            let lhs = self.parse_dest_reg()?;
            self.expect_symbol('=')?;
            let (mnemonic, mline) = self.expect_ident()?;
            self.parse_assignment_rhs(lhs, &mnemonic, mline)
        } else {
            let (mnemonic, line) = self.expect_ident()?;
            self.parse_no_lhs_stmt(&mnemonic, line)
        }
    }

    fn parse_assignment_rhs(&mut self, lhs: Reg, token: &str, line: usize) -> Result<RawStmt, ParseError> {
        let (mnemonic, suffix) = split_mnemonic(token);
        match mnemonic {
            "malloc" => {
                let size = self.parse_operand()?;
                Ok(RawStmt::Malloc { line, lhs, size })
            }
            "load" | "aload" => {
                let width = parse_width(suffix, line)?;
                self.expect_symbol('[')?;
                let ptr = self.parse_operand()?;
                let offset = if self.peek_symbol('+') {
                    self.pos += 1;
                    self.expect_number()?.0
                } else {
                    0
                };
                self.expect_symbol(']')?;
                Ok(RawStmt::Load { line, lhs, is_async: mnemonic == "aload", width, ptr, offset })
            }
            "select" => {
                let cond = self.parse_operand()?;
                self.skip_comma();
                let val_true = self.parse_operand()?;
                self.skip_comma();
                let val_false = self.parse_operand()?;
                Ok(RawStmt::Select { line, lhs, cond, val_true, val_false })
            }
            "call" => {
                let (fname, _) = self.expect_ident()?;
                self.expect_symbol('(')?;
                let mut args = Vec::new();
                while !self.peek_symbol(')') {
                    args.push(self.parse_operand()?);
                    self.skip_comma();
                }
                self.expect_symbol(')')?;
                Ok(RawStmt::Call { line, lhs, function: fname, args })
            }
            "read" => Ok(RawStmt::Read { line, lhs }),
            "write" => {
                let val = self.parse_operand()?;
                Ok(RawStmt::Write { line, lhs, val })
            }
            "sum8" => {
                let width = parse_width(suffix, line)?;
                let first = self.parse_operand()?;
                self.skip_comma();
                let mut values = [
                    first,
                    Operand::Literal(0),
                    Operand::Literal(0),
                    Operand::Literal(0),
                    Operand::Literal(0),
                    Operand::Literal(0),
                    Operand::Literal(0),
                    Operand::Literal(0),
                ];
                for slot in values.iter_mut().skip(1) {
                    *slot = self.parse_operand()?;
                    self.skip_comma();
                }
                Ok(RawStmt::Sum { line, lhs, values: Box::new(values), size: width })
            }
            _ if uop_from_mnemonic(mnemonic).is_some() => {
                let op = uop_from_mnemonic(mnemonic).expect("checked above");
                let width = parse_width(suffix, line)?;
                let val = self.parse_operand()?;
                Ok(RawStmt::Uop { line, lhs, op, val, size: width })
            }
            _ if bop_from_mnemonic(mnemonic).is_some() => {
                let op = bop_from_mnemonic(mnemonic).expect("checked above");
                let width = parse_width(suffix, line)?;
                let lhs_val = self.parse_operand()?;
                self.skip_comma();
                let rhs_val = self.parse_operand()?;
                Ok(RawStmt::Bop { line, lhs, op, lhs_val, rhs_val, size: width })
            }
            other => Err(ParseError::UnknownMnemonic { line, mnemonic: other.to_string() }),
        }
    }

    fn parse_no_lhs_stmt(&mut self, token: &str, line: usize) -> Result<RawStmt, ParseError> {
        let (mnemonic, suffix) = split_mnemonic(token);
        match mnemonic {
            "ret" => {
                let val = self.parse_operand()?;
                Ok(RawStmt::Ret { line, val })
            }
            "br" => {
                let (label, _) = self.expect_ident()?;
                Ok(RawStmt::BrUncond { line, target: label })
            }
            "brcond" => {
                let cond = self.parse_operand()?;
                self.skip_comma();
                let (true_block, _) = self.expect_ident()?;
                self.skip_comma();
                let (false_block, _) = self.expect_ident()?;
                Ok(RawStmt::BrCond { line, cond, true_block, false_block })
            }
            "switch" => {
                let cond = self.parse_operand()?;
                let mut cases = Vec::new();
                while self.peek_ident("case") {
                    self.pos += 1;
                    let (value, _) = self.expect_number()?;
                    let (label, _) = self.expect_ident()?;
                    cases.push((value, label));
                }
                if !self.peek_ident("default") {
                    return Err(ParseError::UnexpectedToken {
                        line: self.line(),
                        expected: "`default`".into(),
                        found: self.describe_current(),
                    });
                }
                self.pos += 1;
                let (default, _) = self.expect_ident()?;
                Ok(RawStmt::Switch { line, cond, cases, default })
            }
            "free" => {
                let ptr = self.parse_operand()?;
                Ok(RawStmt::Free { line, ptr })
            }
            "store" => {
                let width = parse_width(suffix, line)?;
                self.expect_symbol('[')?;
                let ptr = self.parse_operand()?;
                let offset = if self.peek_symbol('+') {
                    self.pos += 1;
                    self.expect_number()?.0
                } else {
                    0
                };
                self.expect_symbol(']')?;
                self.skip_comma();
                let val = self.parse_operand()?;
                Ok(RawStmt::Store { line, width, val, ptr, offset })
            }
            "assert" => {
                let lhs_val = self.parse_operand()?;
                self.skip_comma();
                let rhs_val = self.parse_operand()?;
                Ok(RawStmt::Assert { line, lhs_val, rhs_val })
            }
            other => Err(ParseError::UnknownMnemonic { line, mnemonic: other.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Engine;
    use std::io::Cursor;

    fn run(source: &str) -> crate::interpreter::RunReport {
        let program = parse(source).expect("parse");
        let engine = Engine::new(&program, Cursor::new(Vec::new()), Vec::<u8>::new());
        engine.run().expect("run")
    }

    #[test]
    fn parses_and_runs_a_minimal_return() {
        let report = run(
            r#"
            func main(0) {
            entry:
                ret 1
            }
            "#,
        );
        assert_eq!(report.return_value, 1);
        assert_eq!(report.execution_cost, 1.0);
    }

    #[test]
    fn parses_addition_with_a_width_suffix() {
        let report = run(
            r#"
            func main(0) {
            entry:
                r1 = add.i32 7, 35
                ret r1
            }
            "#,
        );
        assert_eq!(report.return_value, 42);
    }

    #[test]
    fn resolves_forward_branch_labels() {
        let report = run(
            r#"
            func main(0) {
            entry:
                br done
            done:
                ret 9
            }
            "#,
        );
        assert_eq!(report.return_value, 9);
    }

    #[test]
    fn parses_switch_with_case_and_default() {
        let report = run(
            r#"
            func main(0) {
            entry:
                switch 1
                case 0 zero
                case 1 one
                default other
            zero:
                ret 0
            one:
                ret 100
            other:
                ret 1
            }
            "#,
        );
        assert_eq!(report.return_value, 100);
    }

    #[test]
    fn call_with_arguments_and_a_nested_function() {
        let report = run(
            r#"
            func main(0) {
            entry:
                r1 = call add_one(41)
                ret r1
            }
            func add_one(1) {
            entry:
                r1 = add.i64 a1, 1
                ret r1
            }
            "#,
        );
        assert_eq!(report.return_value, 42);
    }

    #[test]
    fn undefined_branch_target_is_a_parse_error() {
        let err = parse(
            r#"
            func main(0) {
            entry:
                br nowhere
            }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::UndefinedLabel { .. }));
    }

    #[test]
    fn unknown_mnemonic_is_a_parse_error() {
        let err = parse(
            r#"
            func main(0) {
            entry:
                frobnicate 1
            }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::UnknownMnemonic { .. }));
    }

    #[test]
    fn comments_are_ignored() {
        let report = run(
            r#"
            // entry point
            func main(0) { // open
            entry:
                ret 5 // literal
            }
            "#,
        );
        assert_eq!(report.return_value, 5);
    }

    #[test]
    fn hex_literals_are_accepted() {
        let report = run(
            r#"
            func main(0) {
            entry:
                ret 0x2a
            }
            "#,
        );
        assert_eq!(report.return_value, 42);
    }
}
