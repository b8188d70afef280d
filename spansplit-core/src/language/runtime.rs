//! Runtime implementation of language rules
//!
//! Bridges a [`LanguageConfig`] and the [`AffixMatcher`] interface the
//! cascade queries on the hot path.

use std::ops::Range;
use std::sync::Arc;

use regex::Regex;

use crate::domain::{AffixMatcher, ExceptionTable};
use crate::error::{Result, TokenizerError};
use crate::language::config::{CharClass, LanguageConfig};

/// Regex-backed affix matcher
///
/// Prefix patterns are combined into one alternation anchored at the
/// start, suffix patterns into one anchored at the end. Earlier patterns
/// win when several match at the same position.
#[derive(Debug, Clone)]
pub struct RegexAffixMatcher {
    prefix: Option<Regex>,
    suffix: Option<Regex>,
    infix: Option<Regex>,
    contextual: Vec<ContextualInfix>,
}

#[derive(Debug, Clone)]
struct ContextualInfix {
    regex: Regex,
    before: Option<CharClass>,
    after: Option<CharClass>,
}

impl ContextualInfix {
    fn accepts(&self, text: &str, range: &Range<usize>) -> bool {
        let neighbour_ok = |class: Option<CharClass>, ch: Option<char>| match class {
            None => true,
            Some(class) => ch.is_some_and(|c| class.matches(c)),
        };
        neighbour_ok(self.before, text[..range.start].chars().next_back())
            && neighbour_ok(self.after, text[range.end..].chars().next())
    }
}

impl RegexAffixMatcher {
    /// Compile the patterns of `config`
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        let prefix = alternation(&config.prefixes.patterns, "prefix")?
            .map(|alt| compile(&format!("^(?:{alt})"), "prefix"))
            .transpose()?;
        let suffix = alternation(&config.suffixes.patterns, "suffix")?
            .map(|alt| compile(&format!("(?:{alt})$"), "suffix"))
            .transpose()?;
        let infix = alternation(&config.infixes.patterns, "infix")?
            .map(|alt| compile(&alt, "infix"))
            .transpose()?;

        let contextual = config
            .infixes
            .contextual
            .iter()
            .map(|rule| {
                Ok(ContextualInfix {
                    regex: compile(&rule.pattern, "contextual infix")?,
                    before: rule.before,
                    after: rule.after,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            prefix,
            suffix,
            infix,
            contextual,
        })
    }
}

/// Join patterns into one alternation, checking each on its own first so
/// errors name the offending pattern
fn alternation(patterns: &[String], kind: &str) -> Result<Option<String>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    for pattern in patterns {
        compile(pattern, kind)?;
    }
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(joined))
}

fn compile(pattern: &str, kind: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        TokenizerError::Configuration(format!("invalid {kind} pattern '{pattern}': {e}"))
    })
}

impl AffixMatcher for RegexAffixMatcher {
    #[inline]
    fn prefix_len(&self, text: &str) -> Result<Option<usize>> {
        Ok(self
            .prefix
            .as_ref()
            .and_then(|re| re.find(text))
            .map(|m| m.end()))
    }

    #[inline]
    fn suffix_len(&self, text: &str) -> Result<Option<usize>> {
        Ok(self
            .suffix
            .as_ref()
            .and_then(|re| re.find(text))
            .map(|m| text.len() - m.start()))
    }

    fn infix_spans(&self, text: &str) -> Result<Vec<Range<usize>>> {
        let mut found: Vec<Range<usize>> = Vec::new();
        if let Some(re) = &self.infix {
            found.extend(re.find_iter(text).map(|m| m.range()));
        }
        for rule in &self.contextual {
            found.extend(
                rule.regex
                    .find_iter(text)
                    .map(|m| m.range())
                    .filter(|range| rule.accepts(text, range)),
            );
        }
        if self.contextual.is_empty() {
            found.retain(|range| !range.is_empty());
            return Ok(found);
        }

        // Merge the sources: leftmost first, longest on ties, drop overlaps
        found.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        let mut merged: Vec<Range<usize>> = Vec::with_capacity(found.len());
        for range in found {
            if range.is_empty() {
                continue;
            }
            if merged.last().map_or(true, |last| range.start >= last.end) {
                merged.push(range);
            }
        }
        Ok(merged)
    }
}

/// Compiled rules for one language
#[derive(Debug, Clone)]
pub struct LanguageRules {
    code: String,
    name: String,
    matcher: Arc<RegexAffixMatcher>,
    exceptions: Arc<ExceptionTable>,
}

impl LanguageRules {
    /// Validate and compile a configuration
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        config.validate()?;
        let matcher = RegexAffixMatcher::from_config(config)?;
        let exceptions = config.exception_table()?;
        log::debug!(
            "compiled rules for '{}': {} prefix, {} suffix, {} infix patterns, {} special cases",
            config.metadata.code,
            config.prefixes.patterns.len(),
            config.suffixes.patterns.len(),
            config.infixes.patterns.len() + config.infixes.contextual.len(),
            exceptions.len()
        );

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            matcher: Arc::new(matcher),
            exceptions: Arc::new(exceptions),
        })
    }

    /// Language code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiled affix matcher
    pub fn matcher(&self) -> Arc<RegexAffixMatcher> {
        Arc::clone(&self.matcher)
    }

    /// Special-case table
    pub fn exceptions(&self) -> Arc<ExceptionTable> {
        Arc::clone(&self.exceptions)
    }
}
