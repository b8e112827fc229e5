//! Minimal SVG markup parser → element tree.
//!
//! Built on `winnow` 0.7. Handles the subset icon sets actually ship:
//! an optional XML declaration/doctype, comments, CDATA, nested and
//! self-closing elements, single- or double-quoted attributes. Text nodes
//! are skipped. Anything structurally broken (unclosed or mismatched tags,
//! a root other than `<svg>`) is an error.

use thiserror::Error;
use winnow::ascii::multispace0;
use winnow::combinator::{alt, delimited};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{take_till, take_until, take_while};

const MAX_DEPTH: usize = 64;

/// One parsed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<SvgElement>,
}

impl SvgElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SvgError {
    #[error("expected {expected} at byte {at}")]
    Syntax { at: usize, expected: &'static str },
    #[error("closing tag </{close}> does not match <{open}> at byte {at}")]
    Mismatched {
        at: usize,
        open: String,
        close: String,
    },
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("root element is <{0}>, expected <svg>")]
    NotSvg(String),
    #[error("unexpected content after the root element at byte {0}")]
    TrailingContent(usize),
    #[error("elements nested deeper than {MAX_DEPTH} levels")]
    TooDeep,
}

/// Parse an SVG document into its root element.
#[must_use = "parsing result should be used"]
pub fn parse_svg(input: &str) -> Result<SvgElement, SvgError> {
    let mut cur = Cursor {
        src: input,
        rest: input,
    };

    skip_misc(&mut cur.rest);
    let root = parse_element(&mut cur, 0)?;
    if root.tag != "svg" {
        return Err(SvgError::NotSvg(root.tag));
    }

    skip_misc(&mut cur.rest);
    if !cur.rest.is_empty() {
        return Err(SvgError::TrailingContent(cur.offset()));
    }
    Ok(root)
}

struct Cursor<'a> {
    src: &'a str,
    rest: &'a str,
}

impl Cursor<'_> {
    fn offset(&self) -> usize {
        self.src.len() - self.rest.len()
    }

    fn syntax(&self, expected: &'static str) -> SvgError {
        SvgError::Syntax {
            at: self.offset(),
            expected,
        }
    }
}

fn parse_element(cur: &mut Cursor<'_>, depth: usize) -> Result<SvgElement, SvgError> {
    if depth > MAX_DEPTH {
        return Err(SvgError::TooDeep);
    }

    literal(&mut cur.rest, "<").map_err(|_| cur.syntax("'<'"))?;
    let tag = parse_name
        .parse_next(&mut cur.rest)
        .map_err(|_| cur.syntax("element name"))?
        .to_string();

    let mut attrs = Vec::new();
    loop {
        skip_space(&mut cur.rest);
        if cur.rest.starts_with("/>") {
            cur.rest = &cur.rest[2..];
            return Ok(SvgElement {
                tag,
                attrs,
                children: Vec::new(),
            });
        }
        if cur.rest.starts_with('>') {
            cur.rest = &cur.rest[1..];
            break;
        }
        if cur.rest.is_empty() {
            return Err(SvgError::Unclosed(tag));
        }
        let attr = parse_attribute
            .parse_next(&mut cur.rest)
            .map_err(|_| cur.syntax("attribute"))?;
        attrs.push(attr);
    }

    let mut children = Vec::new();
    loop {
        skip_text(&mut cur.rest);
        if cur.rest.is_empty() {
            return Err(SvgError::Unclosed(tag));
        }
        if cur.rest.starts_with("</") {
            let at = cur.offset();
            let close = parse_closing_tag
                .parse_next(&mut cur.rest)
                .map_err(|_| cur.syntax("closing tag"))?;
            if close != tag {
                return Err(SvgError::Mismatched {
                    at,
                    open: tag,
                    close: close.to_string(),
                });
            }
            return Ok(SvgElement {
                tag,
                attrs,
                children,
            });
        }
        children.push(parse_element(cur, depth + 1)?);
    }
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn skip_space(input: &mut &str) {
    let _: Result<&str, ErrMode<ContextError>> = multispace0.parse_next(input);
}

fn literal<'a>(input: &mut &'a str, mut lit: &'static str) -> ModalResult<&'a str> {
    lit.parse_next(input)
}

fn parse_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')
    })
    .parse_next(input)
}

fn parse_quoted<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
    ))
    .parse_next(input)
}

fn parse_attribute(input: &mut &str) -> ModalResult<(String, String)> {
    let name = parse_name.parse_next(input)?;
    skip_space(input);
    literal(input, "=")?;
    skip_space(input);
    let value = parse_quoted.parse_next(input)?;
    Ok((name.to_string(), decode_entities(value)))
}

fn parse_closing_tag<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    literal(input, "</")?;
    let name = parse_name.parse_next(input)?;
    skip_space(input);
    literal(input, ">")?;
    Ok(name)
}

/// Skip a `<!-- -->`, `<![CDATA[ ]]>`, `<? ?>` or `<!DOCTYPE >` block.
/// Returns false if none starts here.
fn skip_special(input: &mut &str) -> bool {
    let (open, close) = if input.starts_with("<!--") {
        ("<!--", "-->")
    } else if input.starts_with("<![CDATA[") {
        ("<![CDATA[", "]]>")
    } else if input.starts_with("<?") {
        ("<?", "?>")
    } else if input.starts_with("<!") {
        ("<!", ">")
    } else {
        return false;
    };
    *input = &input[open.len()..];
    let skipped: Result<&str, ErrMode<ContextError>> = take_until(0.., close).parse_next(input);
    if skipped.is_ok() {
        *input = &input[close.len()..];
    } else {
        *input = "";
    }
    true
}

/// Whitespace and special blocks around the root element.
fn skip_misc(input: &mut &str) {
    loop {
        skip_space(input);
        if !skip_special(input) {
            break;
        }
    }
}

/// Character data and special blocks between child elements.
fn skip_text(input: &mut &str) {
    loop {
        let _: Result<&str, ErrMode<ContextError>> = take_till(0.., '<').parse_next(input);
        if !skip_special(input) {
            break;
        }
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
