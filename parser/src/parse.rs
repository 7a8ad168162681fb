//! The pattern parser.
//!
//! Patterns are parsed by plain recursive descent over a character cursor:
//!
//! ```text
//! pattern        := alternative ('|' alternative)*
//! alternative    := '^'? term* '$'?
//! term           := atom quantifier?
//! atom           := group | class | escape | '.' | literal
//! group          := '(' ('?:' | '?=' | '?<=' | '?<name>')? pattern ')'
//! quantifier     := ('?' | '*' | '+' | '{' n (',' n?)? '}') '?'?
//! ```
//!
//! Every alternative becomes a `Sequence` node carrying that branch's anchor
//! flags, so anchoring decisions stay local to the branch they were written
//! in.

use rexgen_core::Bounds;
use rexgen_grammar::{CharSet, GrammarNode};

use crate::classes::{digit_chars, whitespace_chars, word_chars};
use crate::error::{ParseResult, SyntaxError};

/// Parses `pattern` into a grammar tree.
///
/// With `exact = false` the tree is padded so the pattern may match anywhere
/// inside the generated string, the way a regex engine searches unanchored
/// input. With `exact = true` the tree produces matches of the pattern alone.
pub fn parse(pattern: &str, exact: bool) -> ParseResult<GrammarNode> {
    let mut parser = Parser::new(pattern);
    let node = parser.parse_pattern(false)?;
    if parser.peek().is_some() {
        return Err(SyntaxError::new("unmatched `)`", parser.pos));
    }
    let node = node.with_source(pattern);
    Ok(if exact { node } else { node.padded() })
}

// ==================== PARSER STATE ====================

/// Parser state: a character cursor over the pattern.
struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }
}

// ==================== PATTERN STRUCTURE ====================

impl Parser {
    fn parse_pattern(&mut self, in_group: bool) -> ParseResult<GrammarNode> {
        let mut branches = vec![self.parse_alternative(in_group)?];
        while self.eat('|') {
            branches.push(self.parse_alternative(in_group)?);
        }
        if branches.len() == 1 {
            Ok(branches.remove(0))
        } else {
            Ok(GrammarNode::alternative(branches))
        }
    }

    /// One `|`-branch: an optional `^`, a run of quantified atoms, an
    /// optional closing `$`. Anchors anywhere else are errors.
    fn parse_alternative(&mut self, in_group: bool) -> ParseResult<GrammarNode> {
        let start = self.pos;
        let anchor_start = self.eat('^');
        let mut anchor_end = false;
        let mut members = Vec::new();
        loop {
            match self.peek() {
                None | Some('|') => break,
                Some(')') if in_group => break,
                Some(')') => return Err(SyntaxError::new("unmatched `)`", self.pos)),
                Some('^') => {
                    return Err(SyntaxError::new(
                        "`^` may only begin an alternative",
                        self.pos,
                    ))
                }
                Some('$') => {
                    let at = self.pos;
                    self.advance();
                    match self.peek() {
                        None | Some('|') | Some(')') => anchor_end = true,
                        _ => {
                            return Err(SyntaxError::new(
                                "`$` may only end an alternative",
                                at,
                            ))
                        }
                    }
                    break;
                }
                _ => {
                    let atom_start = self.pos;
                    let atom = self.parse_atom()?;
                    let atom = match self.parse_quantifier()? {
                        Some(occurs) => atom.with_occurs(occurs),
                        None => atom,
                    };
                    members.push(atom.with_source(self.slice(atom_start, self.pos)));
                }
            }
        }
        let mut node =
            GrammarNode::sequence(members).with_source(self.slice(start, self.pos));
        if anchor_start {
            node = node.with_anchor_start();
        }
        if anchor_end {
            node = node.with_anchor_end();
        }
        Ok(node)
    }
}

// ==================== ATOMS ====================

impl Parser {
    fn parse_atom(&mut self) -> ParseResult<GrammarNode> {
        let start = self.pos;
        let Some(c) = self.advance() else {
            return Err(SyntaxError::unexpected_end("an atom", self.pos));
        };
        match c {
            '(' => self.parse_group(start),
            '[' => self.parse_class(start),
            '.' => Ok(GrammarNode::any_printable()),
            '\\' => self.parse_escape_atom(start),
            '*' | '+' | '?' => Err(SyntaxError::new(
                format!("nothing to repeat before `{}`", c),
                start,
            )),
            '{' if self.peek().is_some_and(|d| d.is_ascii_digit()) => {
                Err(SyntaxError::new("nothing to repeat before `{`", start))
            }
            ']' => Err(SyntaxError::new("unmatched `]`", start)),
            other => Ok(GrammarNode::literal(other)),
        }
    }

    /// A parenthesized group. Positive look-around is inlined: a generator
    /// satisfies `(?=X)` or `(?<=X)` by emitting text matching `X` in place.
    fn parse_group(&mut self, start: usize) -> ParseResult<GrammarNode> {
        if self.eat('?') {
            match self.peek() {
                Some(':') | Some('=') => {
                    self.advance();
                }
                Some('!') => {
                    return Err(SyntaxError::unsupported("negative look-ahead `(?!`", start))
                }
                Some('<') => match self.peek_at(1) {
                    Some('=') => {
                        self.advance();
                        self.advance();
                    }
                    Some('!') => {
                        return Err(SyntaxError::unsupported(
                            "negative look-behind `(?<!`",
                            start,
                        ))
                    }
                    _ => {
                        self.advance();
                        self.parse_group_name()?;
                    }
                },
                _ => return Err(SyntaxError::new("unrecognized group modifier", self.pos)),
            }
        }
        let node = self.parse_pattern(true)?;
        if !self.eat(')') {
            return Err(SyntaxError::new("unterminated group", start));
        }
        Ok(node)
    }

    /// Validates and discards a `(?<name>` group name; capture indexing has
    /// no meaning for generation.
    fn parse_group_name(&mut self) -> ParseResult<()> {
        let start = self.pos;
        let mut length = 0usize;
        loop {
            match self.peek() {
                Some('>') => {
                    self.advance();
                    break;
                }
                Some(')') | None => {
                    return Err(SyntaxError::new("unterminated group name", start))
                }
                Some(_) => {
                    length += 1;
                    self.advance();
                }
            }
        }
        if length == 0 {
            return Err(SyntaxError::new("empty group name", start));
        }
        Ok(())
    }

    fn parse_escape_atom(&mut self, start: usize) -> ParseResult<GrammarNode> {
        let Some(c) = self.advance() else {
            return Err(SyntaxError::unexpected_end("an escape", self.pos));
        };
        let node = match c {
            'd' => GrammarNode::any_of(digit_chars()),
            'D' => GrammarNode::none_of(digit_chars()),
            'w' => GrammarNode::any_of(word_chars()),
            'W' => GrammarNode::none_of(word_chars()),
            's' => GrammarNode::any_of(whitespace_chars()),
            'S' => GrammarNode::none_of(whitespace_chars()),
            'b' => {
                return Err(SyntaxError::unsupported(
                    "word-boundary assertion `\\b`",
                    start,
                ))
            }
            'B' => {
                return Err(SyntaxError::unsupported(
                    "word-boundary assertion `\\B`",
                    start,
                ))
            }
            '1'..='9' => return Err(SyntaxError::unsupported("back-reference", start)),
            'k' => return Err(SyntaxError::unsupported("named back-reference `\\k`", start)),
            other => GrammarNode::literal(self.resolve_escape(other)),
        };
        Ok(node)
    }

    /// Resolves a single-character escape. Unknown escapes and malformed
    /// `\x`/`\u` sequences fall back to the literal letter.
    fn resolve_escape(&mut self, c: char) -> char {
        match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'f' => '\u{000C}',
            'v' => '\u{000B}',
            '0' => '\0',
            'x' => self.hex_escape(2).unwrap_or('x'),
            'u' => self.hex_escape(4).unwrap_or('u'),
            other => other,
        }
    }

    /// Reads exactly `digits` hex digits as one character, consuming nothing
    /// on failure so the caller can fall back.
    fn hex_escape(&mut self, digits: usize) -> Option<char> {
        let mut value = 0u32;
        for i in 0..digits {
            let d = self.peek_at(i)?.to_digit(16)?;
            value = value * 16 + d;
        }
        let c = char::from_u32(value)?;
        self.pos += digits;
        Some(c)
    }
}

// ==================== CHARACTER CLASSES ====================

/// One parsed item of a character class body.
enum ClassItem {
    /// A single character, usable as a range endpoint.
    Char(char),
    /// A built-in set (`\d`, `\w`, `\s`).
    Set(CharSet),
    /// A negated built-in (`\D`, `\W`, `\S`): everything *outside* the set.
    Negated(CharSet),
}

impl Parser {
    fn parse_class(&mut self, start: usize) -> ParseResult<GrammarNode> {
        let negated = self.eat('^');
        if self.eat(']') {
            return Err(SyntaxError::new("empty character class", start));
        }
        // Characters the class names directly, and built-in sets it includes
        // the complement of. `[0\D]` matches `0` or any non-digit, which is
        // exactly the complement of `digits - {0}`.
        let mut chars = CharSet::empty();
        let mut negated_sets: Vec<CharSet> = Vec::new();
        loop {
            match self.peek() {
                None => return Err(SyntaxError::unexpected_end("`]`", self.pos)),
                Some(']') => {
                    self.advance();
                    break;
                }
                _ => {}
            }
            match self.class_item()? {
                ClassItem::Char(lo) => {
                    let spans_range = self.peek() == Some('-')
                        && self.peek_at(1).is_some()
                        && self.peek_at(1) != Some(']');
                    if spans_range {
                        let dash = self.pos;
                        self.advance();
                        match self.class_item()? {
                            ClassItem::Char(hi) => {
                                if lo > hi {
                                    return Err(SyntaxError::new(
                                        format!(
                                            "character range `{}-{}` is out of order",
                                            lo, hi
                                        ),
                                        dash,
                                    ));
                                }
                                chars.extend(lo..=hi);
                            }
                            // A set cannot be a range endpoint; keep all
                            // three items as literals.
                            ClassItem::Set(set) => {
                                chars.extend([lo, '-']);
                                chars.extend(set);
                            }
                            ClassItem::Negated(set) => {
                                chars.extend([lo, '-']);
                                negated_sets.push(set);
                            }
                        }
                    } else {
                        chars.extend([lo]);
                    }
                }
                ClassItem::Set(set) => chars.extend(set),
                ClassItem::Negated(set) => negated_sets.push(set),
            }
        }

        if negated_sets.is_empty() {
            return Ok(if negated {
                GrammarNode::none_of(chars)
            } else {
                GrammarNode::any_of(chars)
            });
        }
        // The class covers `chars ∪ complement(each negated set)`, which is
        // the complement of `(∩ negated sets) - chars`.
        let mut excluded = negated_sets.remove(0);
        for set in &negated_sets {
            excluded = excluded.intersection(set);
        }
        let excluded = excluded.difference(&chars);
        Ok(if negated {
            GrammarNode::any_of(excluded)
        } else {
            GrammarNode::none_of(excluded)
        })
    }

    fn class_item(&mut self) -> ParseResult<ClassItem> {
        let Some(c) = self.advance() else {
            return Err(SyntaxError::unexpected_end("`]`", self.pos));
        };
        if c != '\\' {
            return Ok(ClassItem::Char(c));
        }
        let Some(e) = self.advance() else {
            return Err(SyntaxError::unexpected_end("an escape", self.pos));
        };
        Ok(match e {
            'd' => ClassItem::Set(digit_chars()),
            'D' => ClassItem::Negated(digit_chars()),
            'w' => ClassItem::Set(word_chars()),
            'W' => ClassItem::Negated(word_chars()),
            's' => ClassItem::Set(whitespace_chars()),
            'S' => ClassItem::Negated(whitespace_chars()),
            // Inside a class `\b` is backspace, not a word boundary.
            'b' => ClassItem::Char('\u{0008}'),
            other => ClassItem::Char(self.resolve_escape(other)),
        })
    }
}

// ==================== QUANTIFIERS ====================

impl Parser {
    fn parse_quantifier(&mut self) -> ParseResult<Option<Bounds>> {
        let occurs = match self.peek() {
            Some('?') => {
                self.advance();
                Bounds::new(0, 1)
            }
            Some('*') => {
                self.advance();
                Bounds::at_least(0)
            }
            Some('+') => {
                self.advance();
                Bounds::at_least(1)
            }
            // `{` opens a quantifier only when a count follows; otherwise it
            // is an ordinary literal.
            Some('{') if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                let start = self.pos;
                self.advance();
                let min = self.parse_number()?;
                let occurs = if self.eat(',') {
                    if self.peek() == Some('}') {
                        Bounds::at_least(min)
                    } else {
                        let max = self.parse_number()?;
                        if max < min {
                            return Err(SyntaxError::new(
                                format!("quantifier range {{{},{}}} is reversed", min, max),
                                start,
                            ));
                        }
                        Bounds::new(min, max)
                    }
                } else {
                    Bounds::exactly(min)
                };
                if !self.eat('}') {
                    return Err(SyntaxError::new("expected `}` to close quantifier", self.pos));
                }
                occurs
            }
            _ => return Ok(None),
        };
        // A lazy marker changes match priority, not the matched language.
        if self.peek() == Some('?') {
            self.advance();
        }
        Ok(Some(occurs))
    }

    fn parse_number(&mut self) -> ParseResult<usize> {
        let start = self.pos;
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.advance();
        }
        if digits.is_empty() {
            return Err(SyntaxError::new("expected a number in quantifier", start));
        }
        digits
            .parse()
            .map_err(|_| SyntaxError::new("quantifier count is too large", start))
    }
}

// ==================== TESTS ====================
