//! Parser for config templates.
//!
//! Splits the source into literal text and `{{ ... }}` actions. Parsing is
//! complete before anything is executed, so a syntax error never triggers a
//! secret lookup.

use super::TemplateError;

/// A parsed template node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    /// Literal text copied to the output.
    Text(String),
    /// `{{ secret "name" }}`
    Secret(String),
    /// `{{ env "NAME" }}`
    Env(String),
    /// `{{ "literal" }}`
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str(String),
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const FUNCTIONS: [&str; 2] = ["secret", "env"];

/// Parse `src` into a flat list of nodes.
pub(crate) fn parse(src: &str) -> Result<Vec<Node>, TemplateError> {
    Parser { src, pos: 0 }.run()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn run(mut self) -> Result<Vec<Node>, TemplateError> {
        let mut nodes = Vec::new();

        while let Some(offset) = self.rest().find(OPEN) {
            let open = self.pos + offset;
            let mut text = &self.src[self.pos..open];
            self.pos = open + OPEN.len();

            // `{{- ` trims whitespace before the action or comment
            if self.trim_marker() {
                text = text.trim_end_matches(is_space);
                self.bump();
                self.bump();
            }
            if !text.is_empty() {
                nodes.push(Node::Text(text.to_string()));
            }

            let (node, trim_right) = if self.rest().starts_with("/*") {
                (None, self.comment(open)?)
            } else {
                self.action(open)?
            };
            nodes.extend(node);

            if trim_right {
                let skipped = self.rest().len() - self.rest().trim_start_matches(is_space).len();
                self.pos += skipped;
            }
        }

        if !self.rest().is_empty() {
            nodes.push(Node::Text(self.rest().to_string()));
        }
        Ok(nodes)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_space(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.bump();
        }
    }

    /// `-` directly followed by whitespace.
    fn trim_marker(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('-') && chars.next().is_some_and(is_space)
    }

    fn error(&self, at: usize, message: impl Into<String>) -> TemplateError {
        TemplateError::Parse {
            line: line_of(self.src, at),
            message: message.into(),
        }
    }

    /// Consume a close delimiter, returning whether it carried a trim marker.
    fn close(&mut self) -> Option<bool> {
        let rest = self.rest();
        if rest.starts_with(CLOSE) {
            self.pos += CLOSE.len();
            return Some(false);
        }
        let after_space = self.src[..self.pos].ends_with(is_space);
        if after_space && rest.starts_with("-}}") {
            self.pos += 1 + CLOSE.len();
            return Some(true);
        }
        None
    }

    fn comment(&mut self, open: usize) -> Result<bool, TemplateError> {
        let end = self
            .rest()
            .find("*/")
            .ok_or_else(|| self.error(open, "unclosed comment"))?;
        self.pos += end + 2;
        self.skip_space();
        self.close()
            .ok_or_else(|| self.error(open, "comment ends before closing delimiter"))
    }

    fn action(&mut self, open: usize) -> Result<(Option<Node>, bool), TemplateError> {
        let mut tokens = Vec::new();

        let trim_right = loop {
            self.skip_space();
            if let Some(trim) = self.close() {
                break trim;
            }
            let start = self.pos;
            match self.peek() {
                None => return Err(self.error(open, "unclosed action")),
                Some('"') => tokens.push(Token::Str(self.quoted(start)?)),
                Some('`') => tokens.push(Token::Str(self.raw(start)?)),
                Some(c) if c.is_alphabetic() || c == '_' => {
                    while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                        self.bump();
                    }
                    tokens.push(Token::Ident(self.src[start..self.pos].to_string()));
                }
                Some(c) => {
                    return Err(self.error(start, format!("unexpected {:?} in action", c)));
                }
            }
        };

        let node = match tokens.as_slice() {
            [] => return Err(self.error(open, "missing value for action")),
            [Token::Str(s)] => Node::Literal(s.clone()),
            [Token::Str(_), ..] => {
                return Err(self.error(open, "unexpected token after string literal"));
            }
            [Token::Ident(name), ..] if !FUNCTIONS.contains(&name.as_str()) => {
                return Err(self.error(open, format!("function {:?} not defined", name)));
            }
            [Token::Ident(name), Token::Str(arg)] => match name.as_str() {
                "secret" => Node::Secret(arg.clone()),
                _ => Node::Env(arg.clone()),
            },
            [Token::Ident(name), Token::Ident(_)] => {
                return Err(self.error(
                    open,
                    format!("argument to {} must be a quoted string", name),
                ));
            }
            [Token::Ident(name), args @ ..] => {
                return Err(self.error(
                    open,
                    format!("wrong number of args for {}: want 1 got {}", name, args.len()),
                ));
            }
        };
        Ok((Some(node), trim_right))
    }

    fn quoted(&mut self, start: usize) -> Result<String, TemplateError> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error(start, "unterminated quoted string")),
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(c) => {
                        return Err(self.error(start, format!("invalid escape sequence \\{}", c)));
                    }
                    None => return Err(self.error(start, "unterminated quoted string")),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn raw(&mut self, start: usize) -> Result<String, TemplateError> {
        self.bump();
        let end = self
            .rest()
            .find('`')
            .ok_or_else(|| self.error(start, "unterminated raw string"))?;
        let value = self.rest()[..end].to_string();
        self.pos += end + 1;
        Ok(value)
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn line_of(src: &str, at: usize) -> usize {
    src[..at].matches('\n').count() + 1
}
