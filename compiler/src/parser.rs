use crate::{
    tokenizer::Token,
    utils::{error, quote},
    error::TransformerError,
};
use lazy_static::lazy_static;
use regex::Regex;
use struct_transformer_schema::{FieldInfo, Models, Structure};
use tracing::debug;

lazy_static! {
    static ref IDENTIFIER:      Regex = Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").unwrap();
    static ref PACKAGE_KEYWORD: Regex = Regex::new(r"^package$").unwrap();
    static ref TYPE_KEYWORD:    Regex = Regex::new(r"^type$").unwrap();
    static ref STRUCT_KEYWORD:  Regex = Regex::new(r"^struct$").unwrap();
    static ref LEFT_BRACE:      Regex = Regex::new(r"^\{$").unwrap();
    static ref LEFT_PAREN:      Regex = Regex::new(r"^\($").unwrap();
    static ref RIGHT_PAREN:     Regex = Regex::new(r"^\)$").unwrap();
    static ref LEFT_BRACKET:    Regex = Regex::new(r"^\[$").unwrap();
    static ref EQUALS:          Regex = Regex::new(r"^=$").unwrap();
    static ref TAG:             Regex = Regex::new(r#"^(`[^`]*`|"(?:[^"\\]|\\.)*")$"#).unwrap();
}

const EMBEDDED_PREFIX: &str = "embedded_";

/// Extracts the package name and every top-level struct declaration of a Go
/// source file.
pub fn parse_go(tokens: &[Token]) -> Result<Models, TransformerError> {
    let mut parser = Parser { tokens, index: 0 };
    let mut models = Models::default();
    let mut depth: usize = 0;

    while !parser.current()?.is_eof() {
        let tok = parser.current()?;
        match tok.text.as_str() {
            "{" | "(" | "[" => depth += 1,
            "}" | ")" | "]" => {
                depth = depth.checked_sub(1).ok_or_else(|| parser.unexpected())?;
            }
            _ => {}
        }

        if depth == 0 && parser.eat(&PACKAGE_KEYWORD)? {
            let name = parser.expect_identifier()?;
            models.package = Some(name);
            continue;
        }

        if depth == 0 && parser.eat(&TYPE_KEYWORD)? {
            parser.type_decl(&mut models)?;
            continue;
        }

        parser.index += 1;
    }

    if depth != 0 {
        let tok = parser.current()?;
        return Err(error("Unexpected end of file", tok.line, tok.column));
    }
    Ok(models)
}

struct Parser<'a> {
    tokens: &'a [Token],
    index:  usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Result<&'a Token, TransformerError> {
        self.tokens
            .get(self.index)
            .ok_or_else(|| error("Unexpected end of tokens", 0, 0))
    }

    fn eat(&mut self, test: &Regex) -> Result<bool, TransformerError> {
        if test.is_match(&self.current()?.text) {
            self.index += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, test: &Regex, expected: &str) -> Result<(), TransformerError> {
        if !self.eat(test)? {
            let tok = self.current()?;
            return Err(error(
                &format!("Expected {} but found {}", expected, quote(&tok.text)),
                tok.line,
                tok.column,
            ));
        }
        Ok(())
    }

    fn expect_identifier(&mut self) -> Result<String, TransformerError> {
        let tok = self.current()?;
        self.expect(&IDENTIFIER, "identifier")?;
        Ok(tok.text.clone())
    }

    fn unexpected(&self) -> TransformerError {
        match self.current() {
            Ok(tok) => error(
                &format!("Unexpected token {}", quote(&tok.text)),
                tok.line,
                tok.column,
            ),
            Err(e) => e,
        }
    }

    fn skip_separators(&mut self) -> Result<(), TransformerError> {
        while self.current()?.is_newline() || self.current()?.text == ";" {
            self.index += 1;
        }
        Ok(())
    }

    /// `type X ...` or `type ( X ...; Y ... )`
    fn type_decl(&mut self, models: &mut Models) -> Result<(), TransformerError> {
        if !self.eat(&LEFT_PAREN)? {
            return self.type_spec(models);
        }

        loop {
            self.skip_separators()?;
            if self.eat(&RIGHT_PAREN)? {
                return Ok(());
            }
            self.type_spec(models)?;
        }
    }

    fn type_spec(&mut self, models: &mut Models) -> Result<(), TransformerError> {
        let name = self.expect_identifier()?;

        // type parameters
        if LEFT_BRACKET.is_match(&self.current()?.text) {
            self.skip_balanced()?;
        }
        self.eat(&EQUALS)?;

        if self.eat(&STRUCT_KEYWORD)? {
            self.expect(&LEFT_BRACE, "\"{\"")?;
            let structure = self.struct_body(&name)?;
            models.structures.insert(name, structure);
        } else {
            self.skip_line()?;
        }
        Ok(())
    }

    /// Fields up to and including the closing brace.
    fn struct_body(&mut self, struct_name: &str) -> Result<Structure, TransformerError> {
        let mut structure = Structure::new();
        let mut embedded = 0;

        loop {
            self.skip_separators()?;
            let tok = self.current()?;
            if tok.text == "}" {
                self.index += 1;
                return Ok(structure);
            }
            if tok.is_eof() {
                return Err(error("Expected \"}\" but found end of file", tok.line, tok.column));
            }

            let line = self.field_line()?;
            if line.is_empty() {
                return Err(self.unexpected());
            }
            let texts: Vec<&str> = line
                .iter()
                .map(|t| t.text.as_str())
                .filter(|t| !TAG.is_match(t))
                .collect();

            let (names, type_tokens) = split_names(&texts);
            let names = if names.is_empty() {
                let name = format!("{}{}", EMBEDDED_PREFIX, embedded);
                embedded += 1;
                vec![name]
            } else {
                names
            };

            match field_type(type_tokens) {
                Some(info) => {
                    for name in names {
                        structure.insert(name, info.clone());
                    }
                }
                None => debug!(
                    structure = struct_name,
                    field = ?names,
                    type_ = %type_tokens.join(""),
                    "unsupported field type skipped"
                ),
            }
        }
    }

    /// Tokens of one field declaration, stopping before a newline, `;` or the
    /// closing brace of the struct.
    fn field_line(&mut self) -> Result<Vec<&'a Token>, TransformerError> {
        let mut line = Vec::new();
        let mut depth: usize = 0;

        loop {
            let tok = self.current()?;
            if tok.is_eof() {
                return Err(error("Unexpected end of file", tok.line, tok.column));
            }
            match tok.text.as_str() {
                "\n" | ";" if depth == 0 => return Ok(line),
                "}" | ")" | "]" if depth == 0 => return Ok(line),
                "{" | "(" | "[" => depth += 1,
                "}" | ")" | "]" => depth -= 1,
                _ => {}
            }
            line.push(tok);
            self.index += 1;
        }
    }

    /// Skips a non-struct type definition.
    fn skip_line(&mut self) -> Result<(), TransformerError> {
        let mut depth: usize = 0;
        loop {
            let tok = self.current()?;
            match tok.text.as_str() {
                "" => return Ok(()),
                "\n" | ";" if depth == 0 => return Ok(()),
                ")" if depth == 0 => return Ok(()),
                "{" | "(" | "[" => depth += 1,
                "}" | ")" | "]" => {
                    depth = depth.checked_sub(1).ok_or_else(|| self.unexpected())?;
                }
                _ => {}
            }
            self.index += 1;
        }
    }

    /// Skips a bracketed group starting at the current token.
    fn skip_balanced(&mut self) -> Result<(), TransformerError> {
        let mut depth: usize = 0;
        loop {
            let tok = self.current()?;
            match tok.text.as_str() {
                "" => return Err(error("Unexpected end of file", tok.line, tok.column)),
                "{" | "(" | "[" => depth += 1,
                "}" | ")" | "]" => {
                    depth = depth.checked_sub(1).ok_or_else(|| self.unexpected())?;
                }
                _ => {}
            }
            self.index += 1;
            if depth == 0 {
                return Ok(());
            }
        }
    }
}

/// Splits `A, B int` into names and type tokens. Embedded fields
/// (`Base`, `*Base`, `pkg.Base`) have no names.
fn split_names<'t>(texts: &'t [&'t str]) -> (Vec<String>, &'t [&'t str]) {
    match texts {
        [_] | [] => (Vec::new(), texts),
        [_, ".", ..] | ["*", ..] => (Vec::new(), texts),
        _ => {
            let mut names = Vec::new();
            let mut i = 0;
            while i < texts.len() && IDENTIFIER.is_match(texts[i]) {
                names.push(texts[i].to_string());
                if texts.get(i + 1) == Some(&",") {
                    i += 2;
                } else {
                    i += 1;
                    break;
                }
            }
            (names, &texts[i..])
        }
    }
}

/// Type of a field: `T`, `pkg.T`, `*T`, `*pkg.T`, `[]T`, `[]pkg.T`, `[]*T`.
/// Slices report their element type without the package.
fn field_type(tokens: &[&str]) -> Option<FieldInfo> {
    match tokens {
        [name] if IDENTIFIER.is_match(name) => Some(FieldInfo::new(*name)),
        [pkg, ".", name] if IDENTIFIER.is_match(pkg) && IDENTIFIER.is_match(name) => {
            Some(FieldInfo::new(format!("{}.{}", pkg, name)))
        }
        ["*", rest @ ..] => {
            let inner = field_type(rest)?;
            (!inner.is_pointer).then(|| FieldInfo::pointer(inner.type_))
        }
        ["[]", "*", rest @ ..] => element_type(rest).map(FieldInfo::pointer),
        ["[]", rest @ ..] => element_type(rest).map(FieldInfo::new),
        _ => None,
    }
}

fn element_type(tokens: &[&str]) -> Option<String> {
    match tokens {
        [name] | [_, ".", name] if IDENTIFIER.is_match(name) => Some(name.to_string()),
        _ => None,
    }
}
