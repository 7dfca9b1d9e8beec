//! Redis 风格的 glob 模式
//!
//! 支持 `*`、`?`、`[abc]`、`[a-z]`、`[^a]` 以及 `\` 转义，与 Redis `SCAN MATCH`
//! 的语法一致，因此内存后端与 Redis 后端对同一模式的匹配结果相同。

use crate::error::CacheError;

#[derive(Debug, Clone, PartialEq)]
enum ClassItem {
    Single(char),
    Range(char, char),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(char),
    AnyChar,
    AnySequence,
    Class { negated: bool, items: Vec<ClassItem> },
}

impl Token {
    fn matches(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyChar => true,
            Token::AnySequence => false,
            Token::Class { negated, items } => {
                let hit = items.iter().any(|item| match item {
                    ClassItem::Single(s) => *s == c,
                    ClassItem::Range(lo, hi) => *lo <= c && c <= *hi,
                });
                hit != *negated
            }
        }
    }
}

/// 解析后的 glob 模式
#[derive(Debug, Clone, PartialEq)]
pub struct GlobPattern {
    source: String,
    tokens: Vec<Token>,
}

impl GlobPattern {
    pub fn parse(pattern: &str) -> Result<Self, CacheError> {
        if pattern.is_empty() {
            return Err(CacheError::InvalidArgument("pattern must not be empty".into()));
        }

        let mut tokens = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                '*' => {
                    // 连续的 * 等价于一个
                    if tokens.last() == Some(&Token::AnySequence) {
                        continue;
                    }
                    Token::AnySequence
                }
                '?' => Token::AnyChar,
                '\\' => Token::Literal(chars.next().ok_or_else(|| {
                    CacheError::InvalidArgument(format!("dangling escape in {:?}", pattern))
                })?),
                '[' => parse_class(&mut chars, pattern)?,
                other => Token::Literal(other),
            };
            tokens.push(token);
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, key: &str) -> bool {
        let text: Vec<char> = key.chars().collect();
        let (mut p, mut t) = (0, 0);
        // 最近一个 * 的位置及其当前吞掉的文本起点
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match self.tokens.get(p) {
                Some(Token::AnySequence) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                Some(token) if token.matches(text[t]) => {
                    p += 1;
                    t += 1;
                }
                _ => match backtrack {
                    Some((star, from)) => {
                        p = star + 1;
                        t = from + 1;
                        backtrack = Some((star, from + 1));
                    }
                    None => return false,
                },
            }
        }

        self.tokens[p..]
            .iter()
            .all(|token| *token == Token::AnySequence)
    }
}

fn parse_class(chars: &mut std::str::Chars<'_>, pattern: &str) -> Result<Token, CacheError> {
    let unterminated =
        || CacheError::InvalidArgument(format!("unterminated character class in {:?}", pattern));

    let mut negated = false;
    let mut items = Vec::new();
    let mut first = true;

    loop {
        let c = chars.next().ok_or_else(unterminated)?;
        match c {
            '^' if first && !negated => {
                negated = true;
                continue;
            }
            ']' => break,
            _ => {}
        }
        first = false;

        let lo = if c == '\\' {
            chars.next().ok_or_else(unterminated)?
        } else {
            c
        };

        // 预读判断是否为区间 a-z
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('-') {
            match lookahead.next() {
                Some(']') | None => items.push(ClassItem::Single(lo)),
                Some(hi) => {
                    chars.next();
                    chars.next();
                    let hi = if hi == '\\' {
                        chars.next().ok_or_else(unterminated)?
                    } else {
                        hi
                    };
                    let (a, b) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                    items.push(ClassItem::Range(a, b));
                }
            }
        } else {
            items.push(ClassItem::Single(lo));
        }
    }

    if items.is_empty() {
        return Err(CacheError::InvalidArgument(format!(
            "empty character class in {:?}",
            pattern
        )));
    }

    Ok(Token::Class { negated, items })
}

/// 转义字面量中的 glob 元字符，用于拼接键前缀
pub fn escape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
