//! Compiled pattern library.
//!
//! A [`PatternLibrary`] is built once from a [`LibrarySpec`] and is read-only
//! afterwards; analyzers on any number of threads share it by reference.

use regex::{Regex, RegexBuilder};

use crate::config::{LibrarySpec, LimitsConfig, PatternSpec};
use crate::error::PorkError;

/// Expansion of `{amount}`: a `$`-prefixed figure or one followed by
/// "dollars", either with an optional magnitude word.
const AMOUNT_FRAGMENT: &str = concat!(
    r"(?:\$\s?\d[\d,]*(?:\.\d+)?(?:\s*(?:thousand|million|billion|mil|bil)\b)?",
    r"|\b\d[\d,]*(?:\.\d+)?(?:\s*(?:thousand|million|billion|mil|bil))?\s+dollars\b)",
);

/// Expansion of `{place}`: one or more capitalized words on a single line.
const PLACE_FRAGMENT: &str = r"[A-Z][\w-]*(?:[ \t]+[A-Z][\w-]*)*";

/// Compiled program size limit; bounded spans unroll into large automata.
const REGEX_SIZE_LIMIT: usize = 32 * (1 << 20);

/// A compiled, named regular expression.
#[derive(Debug, Clone)]
pub struct NamedPattern {
    name: String,
    regex: Regex,
}

impl NamedPattern {
    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiled expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// A keyword phrase and its whole-phrase matcher.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    phrase: String,
    regex: Regex,
}

impl KeywordMatcher {
    /// The lowercase phrase.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Matcher for the phrase bounded by word boundaries.
    ///
    /// The matcher is case-sensitive and expects ASCII-lowercased text.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Read-only registry of every keyword and pattern the detector uses.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    currency_patterns: Vec<NamedPattern>,
    keywords: Vec<KeywordMatcher>,
    suspicious_patterns: Vec<NamedPattern>,
    location_indicators: Vec<String>,
    item_categories: Vec<NamedPattern>,
    beneficiary_strategies: Vec<NamedPattern>,
    beneficiary_fallback: String,
    public_benefit_terms: Vec<String>,
}

impl PatternLibrary {
    /// Compiles a library specification.
    ///
    /// Fails on the first invalid expression, on currency patterns without a
    /// `number` group, and on beneficiary patterns without a capture group.
    pub fn compile(spec: &LibrarySpec, limits: &LimitsConfig) -> Result<Self, PorkError> {
        let max_span = limits.max_span_bytes;

        let currency_patterns = spec
            .currency_patterns
            .iter()
            .map(|p| compile_pattern("currency_patterns", p, max_span, true))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(missing) = currency_patterns
            .iter()
            .find(|p| !p.regex.capture_names().flatten().any(|n| n == "number"))
        {
            return Err(PorkError::InvalidConfig(format!(
                "currency pattern '{}' has no (?P<number>...) group",
                missing.name
            )));
        }

        let keywords = spec
            .keywords
            .iter()
            .map(|phrase| compile_keyword(phrase))
            .collect::<Result<Vec<_>, _>>()?;

        let suspicious_patterns = spec
            .suspicious_patterns
            .iter()
            .map(|p| compile_pattern("suspicious_patterns", p, max_span, true))
            .collect::<Result<Vec<_>, _>>()?;

        let item_categories = spec
            .item_categories
            .iter()
            .map(|p| compile_pattern("item_categories", p, max_span, true))
            .collect::<Result<Vec<_>, _>>()?;

        // Location phrases come first; beneficiary capture is case-sensitive
        // because it keys on capitalized names.
        let mut beneficiary_strategies = spec
            .location_indicators
            .iter()
            .map(|indicator| compile_location_strategy(indicator, max_span))
            .collect::<Result<Vec<_>, _>>()?;
        for pattern in &spec.beneficiary_patterns {
            let compiled = compile_pattern("beneficiary_patterns", pattern, max_span, false)?;
            if compiled.regex.captures_len() < 2 {
                return Err(PorkError::InvalidConfig(format!(
                    "beneficiary pattern '{}' has no capture group",
                    compiled.name
                )));
            }
            beneficiary_strategies.push(compiled);
        }

        Ok(Self {
            currency_patterns,
            keywords,
            suspicious_patterns,
            location_indicators: spec.location_indicators.clone(),
            item_categories,
            beneficiary_strategies,
            beneficiary_fallback: spec.beneficiary_fallback.clone(),
            public_benefit_terms: spec
                .public_benefit_terms
                .iter()
                .map(|term| term.to_lowercase())
                .collect(),
        })
    }

    /// Currency expressions, in extraction order.
    pub fn currency_patterns(&self) -> &[NamedPattern] {
        &self.currency_patterns
    }

    /// Keyword matchers.
    pub fn keywords(&self) -> &[KeywordMatcher] {
        &self.keywords
    }

    /// Suspicious spending constructions.
    pub fn suspicious_patterns(&self) -> &[NamedPattern] {
        &self.suspicious_patterns
    }

    /// Location indicator phrases as configured.
    pub fn location_indicators(&self) -> &[String] {
        &self.location_indicators
    }

    /// Item category patterns.
    pub fn item_categories(&self) -> &[NamedPattern] {
        &self.item_categories
    }

    /// Beneficiary strategies in priority order.
    pub fn beneficiary_strategies(&self) -> &[NamedPattern] {
        &self.beneficiary_strategies
    }

    /// Beneficiary reported when no strategy captures one.
    pub fn beneficiary_fallback(&self) -> &str {
        &self.beneficiary_fallback
    }

    /// Lowercase public-benefit terms.
    pub fn public_benefit_terms(&self) -> &[String] {
        &self.public_benefit_terms
    }
}

/// Replaces `{amount}`, `{span}` and `{place}` with their expressions.
fn expand_placeholders(pattern: &str, max_span: usize) -> String {
    pattern
        .replace("{amount}", AMOUNT_FRAGMENT)
        .replace("{span}", &format!("[^.]{{0,{max_span}}}"))
        .replace("{place}", PLACE_FRAGMENT)
}

fn build_regex(source: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(case_insensitive)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
}

fn compile_pattern(
    group: &'static str,
    spec: &PatternSpec,
    max_span: usize,
    case_insensitive: bool,
) -> Result<NamedPattern, PorkError> {
    let source = expand_placeholders(&spec.pattern, max_span);
    let regex =
        build_regex(&source, case_insensitive).map_err(|source| PorkError::InvalidPattern {
            group,
            name: spec.name.clone(),
            source,
        })?;

    Ok(NamedPattern {
        name: spec.name.clone(),
        regex,
    })
}

/// Joins the escaped words of a phrase so any run of whitespace matches.
fn phrase_expression(phrase: &str) -> Option<String> {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(r"\s+"))
    }
}

/// Keywords are matched against ASCII-folded text, so they must be ASCII.
fn compile_keyword(phrase: &str) -> Result<KeywordMatcher, PorkError> {
    if !phrase.is_ascii() {
        return Err(PorkError::InvalidConfig(format!(
            "library.keywords entry '{}' must be ASCII",
            phrase.trim()
        )));
    }
    let phrase = phrase.to_ascii_lowercase();
    let expression = phrase_expression(&phrase)
        .ok_or_else(|| PorkError::InvalidConfig("library.keywords contains an empty keyword".to_string()))?;

    let regex = build_regex(&format!(r"\b{expression}\b"), false).map_err(|source| {
        PorkError::InvalidPattern {
            group: "keywords",
            name: phrase.clone(),
            source,
        }
    })?;

    Ok(KeywordMatcher { phrase, regex })
}

fn compile_location_strategy(indicator: &str, max_span: usize) -> Result<NamedPattern, PorkError> {
    let expression = phrase_expression(indicator).ok_or_else(|| {
        PorkError::InvalidConfig("library.location_indicators contains an empty phrase".to_string())
    })?;

    let spec = PatternSpec {
        name: format!("location: {}", indicator.trim()),
        pattern: format!(r"\b(?i:{expression})\s+(?:the\s+)?({{place}})"),
    };
    compile_pattern("location_indicators", &spec, max_span, false)
}
