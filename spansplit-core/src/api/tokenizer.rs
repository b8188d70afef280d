//! Tokenizer entry point

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::Input;
use crate::domain::{
    AffixMatcher, Document, ExceptionTable, NoAffixes, Segmenter, SpacePolicy, SpanBuilder,
    SpecialCase,
};
use crate::error::{Result, TokenizerError};
use crate::language::{get_rules, load_rules_from_file, LanguageConfig, LanguageRules};

/// Compact description from which an equivalent tokenizer can be rebuilt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerDescriptor {
    /// Code of an embedded language
    pub language: String,
    #[serde(default)]
    pub space_policy: SpacePolicy,
}

/// Rule-based tokenizer
///
/// Holds its rules behind `Arc`s and never mutates them, so one instance
/// can be cloned cheaply or shared between threads.
#[derive(Clone)]
pub struct Tokenizer {
    matcher: Arc<dyn AffixMatcher>,
    exceptions: Arc<ExceptionTable>,
    space_policy: SpacePolicy,
    verify_output: bool,
    threads: Option<usize>,
    language: Option<String>,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("language", &self.language)
            .field("special_cases", &self.exceptions.len())
            .field("space_policy", &self.space_policy)
            .field("verify_output", &self.verify_output)
            .finish()
    }
}

impl Tokenizer {
    /// Create a tokenizer from a matcher and exception table
    pub fn new(matcher: impl AffixMatcher + 'static, exceptions: ExceptionTable) -> Self {
        Self {
            matcher: Arc::new(matcher),
            exceptions: Arc::new(exceptions),
            space_policy: SpacePolicy::default(),
            verify_output: false,
            threads: None,
            language: None,
        }
    }

    /// Create a tokenizer builder
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::default()
    }

    /// Tokenizer for an embedded language
    pub fn for_language(code: &str) -> Result<Self> {
        Self::builder().language(code).build()
    }

    /// Tokenizer for a parsed language configuration
    pub fn from_config(config: LanguageConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Tokenizer for a language configuration file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder().config_file(path).build()
    }

    /// Rebuild a tokenizer from its descriptor
    pub fn from_descriptor(descriptor: &TokenizerDescriptor) -> Result<Self> {
        Self::builder()
            .language(&descriptor.language)
            .space_policy(descriptor.space_policy)
            .build()
    }

    /// Descriptor of this tokenizer
    ///
    /// `None` when the rules did not come unmodified from an embedded
    /// language, since a descriptor could not reproduce them.
    pub fn descriptor(&self) -> Option<TokenizerDescriptor> {
        self.language.as_ref().map(|language| TokenizerDescriptor {
            language: language.clone(),
            space_policy: self.space_policy,
        })
    }

    /// Tokenize `text`
    pub fn tokenize(&self, text: &str) -> Result<Document> {
        self.tokenize_owned(text.to_string())
    }

    /// Resolve `input` to text and tokenize it
    pub fn tokenize_input(&self, input: Input) -> Result<Document> {
        self.tokenize_owned(input.into_text()?)
    }

    fn tokenize_owned(&self, text: String) -> Result<Document> {
        let builder = SpanBuilder::new(self.matcher.as_ref(), &self.exceptions);
        let spans = Segmenter::new(builder, self.space_policy).segment(&text)?;
        let document = Document::new(text, spans, self.space_policy);
        if self.verify_output {
            document.verify()?;
        }
        Ok(document)
    }

    /// Tokenize several texts in parallel
    ///
    /// Stops at the first error.
    #[cfg(feature = "parallel")]
    pub fn tokenize_batch<S>(&self, texts: &[S]) -> Result<Vec<Document>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        let run = || {
            texts
                .par_iter()
                .map(|text| self.tokenize(text.as_ref()))
                .collect::<Result<Vec<_>>>()
        };
        match self.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    TokenizerError::Configuration(format!("cannot start thread pool: {e}"))
                })?
                .install(run),
            None => run(),
        }
    }

    /// Tokenize several texts
    ///
    /// Stops at the first error.
    #[cfg(not(feature = "parallel"))]
    pub fn tokenize_batch<S>(&self, texts: &[S]) -> Result<Vec<Document>>
    where
        S: AsRef<str>,
    {
        texts.iter().map(|text| self.tokenize(text.as_ref())).collect()
    }

    /// Embedded language this tokenizer was built from
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Space policy
    pub fn space_policy(&self) -> SpacePolicy {
        self.space_policy
    }

    /// Special-case table
    pub fn exceptions(&self) -> &ExceptionTable {
        &self.exceptions
    }

    /// Whether every document is verified before it is returned
    pub fn verifies_output(&self) -> bool {
        self.verify_output
    }
}

impl Default for Tokenizer {
    /// Whitespace-only tokenizer
    fn default() -> Self {
        Self::new(NoAffixes, ExceptionTable::new())
    }
}

/// Fluent builder for [`Tokenizer`]
#[derive(Default)]
pub struct TokenizerBuilder {
    language: Option<String>,
    config: Option<LanguageConfig>,
    config_file: Option<PathBuf>,
    matcher: Option<Arc<dyn AffixMatcher>>,
    exceptions: Option<ExceptionTable>,
    special_cases: Vec<(String, Vec<SpecialCase>)>,
    space_policy: SpacePolicy,
    verify_output: bool,
    threads: Option<usize>,
}

impl TokenizerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the rules of an embedded language
    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    /// Use the rules of a parsed configuration
    pub fn config(mut self, config: LanguageConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use the rules of a configuration file
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Replace the affix matcher
    pub fn matcher(mut self, matcher: impl AffixMatcher + 'static) -> Self {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    /// Replace the exception table
    pub fn exceptions(mut self, exceptions: ExceptionTable) -> Self {
        self.exceptions = Some(exceptions);
        self
    }

    /// Add one special case on top of the exception table
    pub fn special_case(mut self, key: impl Into<String>, cases: Vec<SpecialCase>) -> Self {
        self.special_cases.push((key.into(), cases));
        self
    }

    /// Set the space policy
    pub fn space_policy(mut self, policy: SpacePolicy) -> Self {
        self.space_policy = policy;
        self
    }

    /// Verify every document before returning it
    pub fn verify_output(mut self, verify: bool) -> Self {
        self.verify_output = verify;
        self
    }

    /// Number of threads for batch tokenization
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Build the tokenizer
    pub fn build(self) -> Result<Tokenizer> {
        if self.threads == Some(0) {
            return Err(TokenizerError::Configuration(
                "threads must be greater than 0".into(),
            ));
        }
        let sources = [
            self.language.is_some(),
            self.config.is_some(),
            self.config_file.is_some(),
        ];
        if sources.iter().filter(|set| **set).count() > 1 {
            return Err(TokenizerError::Configuration(
                "only one of language, config and config_file may be set".into(),
            ));
        }

        let rules: Option<Arc<LanguageRules>> = if let Some(code) = &self.language {
            Some(get_rules(code)?)
        } else if let Some(config) = &self.config {
            Some(Arc::new(LanguageRules::from_config(config)?))
        } else if let Some(path) = &self.config_file {
            Some(Arc::new(load_rules_from_file(path)?))
        } else {
            None
        };

        // Only unmodified embedded rules can be described by their code
        let mut language = match (&self.language, &rules) {
            (Some(_), Some(rules)) => Some(rules.code().to_string()),
            _ => None,
        };

        let mut matcher: Arc<dyn AffixMatcher> = match &rules {
            Some(rules) => rules.matcher(),
            None => Arc::new(NoAffixes),
        };
        if let Some(custom) = self.matcher {
            matcher = custom;
            language = None;
        }

        let mut exceptions = match (self.exceptions, &rules) {
            (Some(table), _) => {
                language = None;
                Arc::new(table)
            }
            (None, Some(rules)) => rules.exceptions(),
            (None, None) => Arc::new(ExceptionTable::new()),
        };
        if !self.special_cases.is_empty() {
            language = None;
            let table = Arc::make_mut(&mut exceptions);
            for (key, cases) in self.special_cases {
                table.insert(key, cases)?;
            }
        }

        log::debug!(
            "created tokenizer (language: {}, {} special cases, {:?} spaces)",
            language.as_deref().unwrap_or("custom"),
            exceptions.len(),
            self.space_policy
        );

        Ok(Tokenizer {
            matcher,
            exceptions,
            space_policy: self.space_policy,
            verify_output: self.verify_output,
            threads: self.threads,
            language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FnAffixMatcher;

    fn dash_tokenizer() -> Tokenizer {
        Tokenizer::builder()
            .matcher(FnAffixMatcher::new().infix(|s| {
                s.match_indices('-')
                    .map(|(i, m)| i..i + m.len())
                    .collect()
            }))
            .special_case(
                "don't",
                vec![SpecialCase::new("do"), SpecialCase::with_norm("n't", "not")],
            )
            .verify_output(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_tokenizer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Tokenizer>();
    }

    #[test]
    fn test_plain_sentence() {
        let doc = Tokenizer::default().tokenize("I love apples").unwrap();
        assert_eq!(doc.token_texts(), vec!["I", " ", "love", " ", "apples"]);
        let flags: Vec<bool> = doc.words().map(|t| t.trailing_space()).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_double_space_and_trailing_space() {
        let doc = Tokenizer::default().tokenize("I  love apples ").unwrap();
        assert_eq!(
            doc.token_texts(),
            vec!["I", "  ", "love", " ", "apples", " "]
        );
        doc.verify().unwrap();
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        let doc = Tokenizer::default().tokenize(" I love ").unwrap();
        assert_eq!(doc.token_texts(), vec![" ", "I", " ", "love", " "]);
    }

    #[test]
    fn test_infix_hyphen() {
        let doc = dash_tokenizer().tokenize("I love-apples").unwrap();
        assert_eq!(doc.token_texts(), vec!["I", " ", "love", "-", "apples"]);
        let bounds: Vec<(usize, usize)> = doc.spans().iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(bounds, vec![(0, 0), (1, 1), (2, 5), (6, 6), (7, 12)]);
    }

    #[test]
    fn test_special_case() {
        let doc = dash_tokenizer().tokenize("I don't know").unwrap();
        assert_eq!(doc.token_texts(), vec!["I", " ", "do", "n't", " ", "know"]);
        assert_eq!(doc.get(3).unwrap().norm(), "not");
    }

    #[test]
    fn test_tokenize_input() {
        let doc = Tokenizer::default()
            .tokenize_input(Input::from_bytes(b"a b".to_vec()))
            .unwrap();
        assert_eq!(doc.len(), 3);

        let err = Tokenizer::default()
            .tokenize_input(Input::from_file("/nonexistent/doc.txt"))
            .unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidInput(_)));
    }

    #[test]
    fn test_pattern_fault_propagates() {
        let tokenizer = Tokenizer::new(
            FnAffixMatcher::new().suffix(|s| Some(s.len() + 3)),
            ExceptionTable::new(),
        );
        assert!(matches!(
            tokenizer.tokenize("hello world"),
            Err(TokenizerError::PatternFault { .. })
        ));
    }

    #[test]
    fn test_invalid_special_case_rejected_at_build() {
        let result = Tokenizer::builder()
            .special_case("won't", vec![SpecialCase::new("will"), SpecialCase::new("not")])
            .build();
        assert!(matches!(
            result,
            Err(TokenizerError::ExceptionTableMismatch { .. })
        ));
    }

    #[test]
    fn test_descriptor_round_trip() {
        let tokenizer = Tokenizer::builder()
            .language("english")
            .space_policy(SpacePolicy::Absorb)
            .build()
            .unwrap();
        let descriptor = tokenizer.descriptor().unwrap();
        assert_eq!(descriptor.language, "en");
        assert_eq!(descriptor.space_policy, SpacePolicy::Absorb);

        let json = serde_json::to_string(&descriptor).unwrap();
        let parsed: TokenizerDescriptor = serde_json::from_str(&json).unwrap();
        let rebuilt = Tokenizer::from_descriptor(&parsed).unwrap();

        let text = "She said \"don't\" (twice).";
        assert_eq!(
            tokenizer.tokenize(text).unwrap().spans(),
            rebuilt.tokenize(text).unwrap().spans()
        );
    }

    #[test]
    fn test_descriptor_absent_for_custom_rules() {
        assert!(dash_tokenizer().descriptor().is_none());
        assert!(Tokenizer::default().descriptor().is_none());

        let extended = Tokenizer::builder()
            .language("en")
            .special_case("gimme", vec![SpecialCase::new("gim"), SpecialCase::new("me")])
            .build()
            .unwrap();
        assert!(extended.descriptor().is_none());
        assert!(extended.exceptions().contains("gimme"));
        assert!(extended.exceptions().contains("don't"));

        // The cached English table is left untouched
        assert!(!Tokenizer::for_language("en")
            .unwrap()
            .exceptions()
            .contains("gimme"));
    }

    #[test]
    fn test_conflicting_sources_rejected() {
        let result = Tokenizer::builder()
            .language("en")
            .config(LanguageConfig::empty("xx", "Empty"))
            .build();
        assert!(matches!(result, Err(TokenizerError::Configuration(_))));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = Tokenizer::builder().threads(Some(0)).build();
        assert!(matches!(result, Err(TokenizerError::Configuration(_))));
    }

    #[test]
    fn test_unknown_language() {
        assert!(matches!(
            Tokenizer::for_language("tlh"),
            Err(TokenizerError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_batch() {
        let tokenizer = Tokenizer::builder().threads(Some(2)).build().unwrap();
        let texts = vec!["one two", "", "three  four five"];
        let docs = tokenizer.tokenize_batch(&texts).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].len(), 3);
        assert!(docs[1].is_empty());
        assert_eq!(docs[2].token_texts()[1], "  ");
    }

    #[test]
    fn test_absorb_policy() {
        let tokenizer = Tokenizer::builder()
            .space_policy(SpacePolicy::Absorb)
            .verify_output(true)
            .build()
            .unwrap();
        let doc = tokenizer.tokenize("I  love apples").unwrap();
        assert_eq!(doc.token_texts(), vec!["I", " ", "love", "apples"]);
        assert_eq!(doc.reconstruct(), "I  love apples");
    }
}
