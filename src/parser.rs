use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::ParseError;

/// Kind of a parsed type declaration.
///
/// `Other` covers declarations the generator does not model (Java
/// `record`, annotation types); the builder emits a header-only
/// document for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Other,
}

/// One parsed top-level type declaration.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// Single supertype name, generic arguments and qualifiers
    /// stripped. Implemented interfaces are ignored.
    pub supertype: Option<String>,
    /// `(field name, declared type name)` pairs in declaration order.
    pub fields: Vec<(String, String)>,
    /// Constant names in declaration order. Only populated for enums.
    pub enum_constants: Vec<String>,
}

/// Read and parse one Java source file into its top-level declarations.
pub fn load(path: &Path) -> Result<Vec<Declaration>, ParseError> {
    let source = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source)
}

/// Parse Java source text into its top-level type declarations.
///
/// This is a shallow reader, not a Java parser: it blanks comments and
/// string literals, finds `class`/`interface`/`enum` keywords at brace
/// depth zero, and extracts the supertype, fields, or enum constants
/// from each declaration body. Nested declarations are skipped. It
/// covers the object-model subset the generator consumes and nothing
/// more.
pub fn parse(source: &str) -> Result<Vec<Declaration>, ParseError> {
    let text = blank_noise(source);
    let keyword = Regex::new(r"\b(class|interface|enum|record)\s+([A-Za-z_$][A-Za-z0-9_$]*)")
        .unwrap();

    let mut declarations = Vec::new();
    for caps in keyword.captures_iter(&text) {
        let m = caps.get(0).unwrap();
        if brace_depth(&text[..m.start()]) != 0 {
            continue;
        }
        let name = caps[2].to_string();
        // `@interface` declares an annotation type, not an interface.
        let annotation = text[..m.start()].trim_end().ends_with('@');
        let kind = if annotation {
            DeclarationKind::Other
        } else {
            match &caps[1] {
                "class" => DeclarationKind::Class,
                "interface" => DeclarationKind::Interface,
                "enum" => DeclarationKind::Enum,
                _ => DeclarationKind::Other,
            }
        };

        let body_open = match text[m.end()..].find('{') {
            Some(offset) => m.end() + offset,
            None => return Err(ParseError::MissingBody(name)),
        };
        let header = &text[m.end()..body_open];
        if header.contains(';') || header.contains('}') {
            // keyword did not belong to a declaration header
            continue;
        }
        let body_close = matching_brace(&text, body_open)
            .ok_or_else(|| ParseError::UnbalancedBraces(name.clone()))?;
        let body = &text[body_open + 1..body_close];

        let declaration = match kind {
            DeclarationKind::Enum => Declaration {
                name,
                kind,
                supertype: None,
                fields: Vec::new(),
                enum_constants: enum_constants(body),
            },
            DeclarationKind::Class | DeclarationKind::Interface => Declaration {
                name,
                kind,
                supertype: extends_name(header),
                fields: field_declarations(body),
                enum_constants: Vec::new(),
            },
            DeclarationKind::Other => Declaration {
                name,
                kind,
                supertype: None,
                fields: Vec::new(),
                enum_constants: Vec::new(),
            },
        };
        declarations.push(declaration);
    }

    Ok(declarations)
}

/// Replace comments and string/char literals with spaces so the
/// scanning passes never see braces or keywords inside them.
fn blank_noise(source: &str) -> String {
    enum State {
        Code,
        LineComment,
        BlockComment,
        Str,
        Chr,
    }

    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '"' => {
                    out.push(' ');
                    state = State::Str;
                }
                '\'' => {
                    out.push(' ');
                    state = State::Chr;
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    out.push(' ');
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else {
                    out.push(if c == '\n' { '\n' } else { ' ' });
                }
            }
            State::Str => match c {
                '\\' => {
                    chars.next();
                    out.push_str("  ");
                }
                '"' => {
                    out.push(' ');
                    state = State::Code;
                }
                _ => out.push(' '),
            },
            State::Chr => match c {
                '\\' => {
                    chars.next();
                    out.push_str("  ");
                }
                '\'' => {
                    out.push(' ');
                    state = State::Code;
                }
                _ => out.push(' '),
            },
        }
    }
    out
}

fn brace_depth(text: &str) -> i64 {
    let mut depth = 0i64;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
    }
    depth
}

/// Byte index of the `}` matching the `{` at `open`.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0i64;
    for (i, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract the single supertype name from a declaration header.
///
/// Qualifiers are reduced to the bare name (`com.example.Base` →
/// `Base`) and generic arguments stop the match (`Base<T>` → `Base`).
fn extends_name(header: &str) -> Option<String> {
    let re = Regex::new(r"\bextends\s+([A-Za-z_$][A-Za-z0-9_$.]*)").unwrap();
    let caps = re.captures(header)?;
    let qualified = caps.get(1)?.as_str();
    qualified.rsplit('.').next().map(str::to_string)
}

/// Collect the constant names of an enum body.
///
/// Constants run up to the first body-level `;` (or the whole body if
/// there is none). Constructor arguments and constant bodies are
/// tolerated; annotations on constants are stripped.
fn enum_constants(body: &str) -> Vec<String> {
    let mut constants = Vec::new();
    let mut depth = 0i64;
    let mut current = String::new();
    for c in body.chars() {
        match c {
            '{' | '(' => depth += 1,
            '}' | ')' => depth -= 1,
            ';' if depth == 0 => break,
            ',' if depth == 0 => {
                push_constant(&mut constants, &current);
                current.clear();
            }
            _ if depth == 0 => current.push(c),
            _ => {}
        }
    }
    push_constant(&mut constants, &current);
    constants
}

fn push_constant(constants: &mut Vec<String>, raw: &str) {
    let annotation = Regex::new(r"@[A-Za-z_$][A-Za-z0-9_$.]*").unwrap();
    let cleaned = annotation.replace_all(raw, " ");
    let ident = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*").unwrap();
    if let Some(m) = ident.find(cleaned.trim()) {
        constants.push(m.as_str().to_string());
    }
}

/// Collect the field declarations of a class or interface body.
///
/// Walks the body at depth zero, treating each `;`-terminated
/// statement as a field candidate. Method bodies, initializer blocks
/// and nested declarations are skipped by the depth tracking; anything
/// with a parameter list is rejected.
fn field_declarations(body: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let mut depth = 0i64;
    let mut statement = String::new();
    for c in body.chars() {
        match c {
            '{' => {
                if depth == 0 {
                    // the accumulated text was a method or block header
                    statement.clear();
                }
                depth += 1;
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    statement.clear();
                }
            }
            ';' if depth == 0 => {
                if let Some(field) = parse_field(&statement) {
                    fields.push(field);
                }
                statement.clear();
            }
            _ if depth == 0 => statement.push(c),
            _ => {}
        }
    }
    fields
}

/// Parse one statement into `(field name, declared type name)`.
///
/// Returns `None` for anything that is not a field: abstract method
/// signatures, empty statements, bare keywords. Only the first
/// declarator of a multi-declarator statement is kept. The declared
/// type is reduced to its base identifier: generic arguments, array
/// suffixes and package qualifiers are dropped.
fn parse_field(statement: &str) -> Option<(String, String)> {
    let stripped = strip_annotations(statement);
    let stripped = stripped.split('=').next().unwrap_or("").trim();
    if stripped.is_empty() || stripped.contains('(') {
        return None;
    }

    let first = first_declarator(stripped);
    let name_re = Regex::new(r"([A-Za-z_$][A-Za-z0-9_$]*)\s*(\[\s*\]\s*)*$").unwrap();
    let caps = name_re.captures(first)?;
    let name = caps.get(1)?.as_str().to_string();
    let type_text = first[..caps.get(0)?.start()].trim();
    let type_name = base_type_name(type_text)?;
    Some((name, type_name))
}

/// First comma-separated declarator, ignoring commas inside generic
/// arguments.
fn first_declarator(statement: &str) -> &str {
    let mut angle = 0i64;
    for (i, c) in statement.char_indices() {
        match c {
            '<' => angle += 1,
            '>' => angle -= 1,
            ',' if angle == 0 => return &statement[..i],
            _ => {}
        }
    }
    statement
}

/// Remove annotations, including argument lists, from a statement.
fn strip_annotations(statement: &str) -> String {
    let mut out = String::new();
    let mut chars = statement.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '@' {
            out.push(c);
            continue;
        }
        while let Some(&n) = chars.peek() {
            if n.is_alphanumeric() || n == '_' || n == '$' || n == '.' {
                chars.next();
            } else {
                break;
            }
        }
        while let Some(&n) = chars.peek() {
            if n.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }
        if chars.peek() == Some(&'(') {
            let mut depth = 0i64;
            for n in chars.by_ref() {
                if n == '(' {
                    depth += 1;
                } else if n == ')' {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
            }
        }
        out.push(' ');
    }
    out
}

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
    "abstract",
    "default",
];

/// Reduce a type expression to its base identifier.
///
/// `private static java.util.List<Foo>` → `List`.
fn base_type_name(type_text: &str) -> Option<String> {
    let mut rest = type_text.trim_start();
    loop {
        let Some((word, tail)) = rest.split_once(char::is_whitespace) else {
            break;
        };
        if MODIFIERS.contains(&word) {
            rest = tail.trim_start();
        } else {
            break;
        }
    }
    if MODIFIERS.contains(&rest) {
        return None;
    }
    let ident = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$.]*").unwrap();
    let qualified = ident.find(rest)?.as_str();
    qualified
        .rsplit('.')
        .next()
        .map(str::to_string)
}
