//! Line-oriented helpers for reading PHP declaration files without executing
//! them.
//!
//! These scanners are deliberately small: they track quoting, escaping,
//! comments and bracket depth, nothing more. They are not a PHP parser and
//! never need to be — declaration files (`db/access.php`, `db/caches.php`,
//! ...) are flat array literals by convention.

use regex::Regex;

/// A quoted string found in PHP source, with its 1-based line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpString {
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Arrow,
    Str,
    Other,
}

struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Next significant token, skipping whitespace and comments. Quoted
    /// strings are collected into `buf` with the line where they began.
    fn next_token(&mut self, buf: &mut PhpString) -> Option<Token> {
        loop {
            let c = self.bump()?;
            match c {
                '\'' | '"' => {
                    buf.value.clear();
                    buf.line = self.line;
                    let mut escaped = false;
                    while let Some(inner) = self.bump() {
                        if escaped {
                            buf.value.push(inner);
                            escaped = false;
                        } else if inner == '\\' {
                            escaped = true;
                        } else if inner == c {
                            break;
                        } else {
                            buf.value.push(inner);
                        }
                    }
                    return Some(Token::Str);
                }
                '/' if self.chars.peek() == Some(&'/') => {
                    while let Some(inner) = self.bump() {
                        if inner == '\n' {
                            break;
                        }
                    }
                }
                '#' => {
                    while let Some(inner) = self.bump() {
                        if inner == '\n' {
                            break;
                        }
                    }
                }
                '/' if self.chars.peek() == Some(&'*') => {
                    self.bump();
                    let mut star = false;
                    while let Some(inner) = self.bump() {
                        if star && inner == '/' {
                            break;
                        }
                        star = inner == '*';
                    }
                }
                '[' | '(' | '{' => return Some(Token::Open),
                ']' | ')' | '}' => return Some(Token::Close),
                '=' if self.chars.peek() == Some(&'>') => {
                    self.bump();
                    return Some(Token::Arrow);
                }
                c if c.is_whitespace() => {}
                _ => return Some(Token::Other),
            }
        }
    }
}

/// Quoted keys at the top level of the file's array literal: strings at
/// bracket depth 1 immediately followed by `=>`.
pub fn top_level_array_keys(content: &str) -> Vec<PhpString> {
    let mut scanner = Scanner::new(content);
    let mut buf = PhpString {
        value: String::new(),
        line: 0,
    };
    let mut keys = Vec::new();
    let mut depth = 0i32;
    let mut pending: Option<PhpString> = None;

    while let Some(token) = scanner.next_token(&mut buf) {
        match token {
            Token::Open => {
                depth += 1;
                pending = None;
            }
            Token::Close => {
                depth -= 1;
                pending = None;
            }
            Token::Str => {
                pending = (depth == 1).then(|| buf.clone());
            }
            Token::Arrow => {
                if let Some(key) = pending.take() {
                    keys.push(key);
                }
            }
            Token::Other => pending = None,
        }
    }
    keys
}

/// Every quoted string literal in the file, with line numbers. Comments are
/// skipped.
pub fn quoted_strings(content: &str) -> Vec<PhpString> {
    let mut scanner = Scanner::new(content);
    let mut buf = PhpString {
        value: String::new(),
        line: 0,
    };
    let mut strings = Vec::new();
    while let Some(token) = scanner.next_token(&mut buf) {
        if token == Token::Str {
            strings.push(buf.clone());
        }
    }
    strings
}

/// Body of a named function, with the 1-based line of its opening brace.
///
/// The body is sliced by brace counting (quote- and comment-aware), so
/// nested closures stay inside it.
pub fn function_body(content: &str, name: &str) -> Option<(String, usize)> {
    let pattern = Regex::new(&format!(r"function\s+{}\s*\(", regex::escape(name))).ok()?;
    let found = pattern.find(content)?;
    let brace = content[found.end()..].find('{')? + found.end();
    let start_line = content[..brace].matches('\n').count() + 1;

    let body_start = brace + 1;
    let mut depth = 1i32;
    let mut end = None;
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    for (idx, c) in content[body_start..].char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => in_string = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(idx);
                    break;
                }
            }
            _ => {}
        }
    }
    let end = end?;
    Some((content[body_start..body_start + end].to_string(), start_line))
}
