//! Pipeline stages.
//!
//! Each stage is one order-dependent text transformation. Stages are pure
//! functions of their input string plus tables built at construction; none
//! of them can fail, and all of them accept the empty string.

use std::fmt;
use std::sync::Arc;

use regex::{Captures, NoExpand, Regex};
use vntext_core::SentenceNormalizer;

use crate::dicts::AcronymTable;
use crate::tables::{
    is_vietnamese_letter, DiacriticsMapper, PunctuationCombinationIndex, SymbolTable,
    ASCII_PUNCTUATION,
};

/// A single text transformation within the pipeline.
pub trait Stage: Send + Sync + fmt::Debug {
    /// Get the stage name.
    fn name(&self) -> &str;

    /// Apply the transformation to the input text.
    fn apply(&self, input: &str) -> String;
}

/// The fixed stage sequence of the pipeline, in application order.
///
/// The order is load-bearing: punctuation spacing must run before acronym
/// expansion (acronym matching relies on space-bounded tokens) and after
/// symbol substitution (symbol tokens are matched before punctuation
/// splits them). Reordering changes output.
pub fn default_stages(
    acronyms: AcronymTable,
    sentence: Arc<dyn SentenceNormalizer>,
) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(NumberFormatStage::new()),
        Box::new(SentenceNormalizeStage::new(sentence)),
        Box::new(UrlRemovalStage::new()),
        Box::new(LowercaseStage),
        Box::new(RepeatedCharacterStage),
        Box::new(WhitespaceStage),
        Box::new(RepeatedWordStage),
        Box::new(DoublePunctuationStage),
        Box::new(SymbolStage::new()),
        Box::new(PunctuationSpacingStage::new()),
        Box::new(AcronymStage::new(acronyms)),
        Box::new(SpacedPunctuationStage::new()),
        Box::new(AllowedCharacterStage),
    ]
}

/// Standardize number formats: `98k` -> `98000`, thousands separators
/// removed, `15000đ` -> `15000 đồng`.
#[derive(Debug)]
pub struct NumberFormatStage {
    kilo_suffix: Regex,
    thousands_separator: Regex,
    dong_suffix: Regex,
}

impl NumberFormatStage {
    pub fn new() -> Self {
        Self {
            kilo_suffix: Regex::new(r"(\d+)[kK]\b").expect("valid kilo suffix pattern"),
            thousands_separator: Regex::new(r"(\d+),(\d{3})")
                .expect("valid thousands separator pattern"),
            dong_suffix: Regex::new(r"(\d+)đ\b").expect("valid dong suffix pattern"),
        }
    }
}

impl Default for NumberFormatStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for NumberFormatStage {
    fn name(&self) -> &str {
        "normalize_numbers"
    }

    fn apply(&self, input: &str) -> String {
        let mut text = self
            .kilo_suffix
            .replace_all(input, |caps: &Captures<'_>| {
                match caps[1].parse::<u64>().ok().and_then(|n| n.checked_mul(1000)) {
                    Some(value) => value.to_string(),
                    // Overflow or a non-ASCII digit run: leave the token alone.
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        // A single pass only removes every other separator in a chain like
        // 15,000,000, so repeat to a fixed point.
        while self.thousands_separator.is_match(&text) {
            text = self
                .thousands_separator
                .replace_all(&text, "${1}${2}")
                .into_owned();
        }

        self.dong_suffix.replace_all(&text, "${1} đồng").into_owned()
    }
}

/// Bridge to the external sentence-level normalizer, invoked exactly once
/// per pipeline run.
pub struct SentenceNormalizeStage {
    collaborator: Arc<dyn SentenceNormalizer>,
}

impl SentenceNormalizeStage {
    pub fn new(collaborator: Arc<dyn SentenceNormalizer>) -> Self {
        Self { collaborator }
    }
}

impl fmt::Debug for SentenceNormalizeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceNormalizeStage").finish_non_exhaustive()
    }
}

impl Stage for SentenceNormalizeStage {
    fn name(&self) -> &str {
        "sentence_normalize"
    }

    fn apply(&self, input: &str) -> String {
        self.collaborator.normalize_sentence(input)
    }
}

/// Delete host-like dotted tokens, with or without an http scheme.
///
/// The pattern is greedy and also swallows non-URL dotted tokens such as
/// version numbers. That is the accepted contract, not a defect.
#[derive(Debug)]
pub struct UrlRemovalStage {
    pattern: Regex,
}

impl UrlRemovalStage {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(http\S+)?(\w+\.)+\S+").expect("valid url pattern"),
        }
    }
}

impl Default for UrlRemovalStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for UrlRemovalStage {
    fn name(&self) -> &str {
        "remove_url"
    }

    fn apply(&self, input: &str) -> String {
        self.pattern.replace_all(input, "").into_owned()
    }
}

/// Unicode-aware lower-casing of the whole string.
#[derive(Debug)]
pub struct LowercaseStage;

impl Stage for LowercaseStage {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn apply(&self, input: &str) -> String {
        input.to_lowercase()
    }
}

/// Collapse runs of three or more identical characters down to one,
/// leaving digit-only tokens untouched.
#[derive(Debug)]
pub struct RepeatedCharacterStage;

impl RepeatedCharacterStage {
    fn collapse_runs(token: &str) -> String {
        let mut out = String::with_capacity(token.len());
        let mut chars = token.chars().peekable();
        while let Some(c) = chars.next() {
            let mut run_len = 1usize;
            while chars.peek() == Some(&c) {
                chars.next();
                run_len += 1;
            }
            let keep = if run_len >= 3 { 1 } else { run_len };
            for _ in 0..keep {
                out.push(c);
            }
        }
        out
    }
}

impl Stage for RepeatedCharacterStage {
    fn name(&self) -> &str {
        "collapse_repeated_characters"
    }

    fn apply(&self, input: &str) -> String {
        input
            .split_whitespace()
            .map(|token| {
                if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
                    token.to_string()
                } else {
                    Self::collapse_runs(token)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Collapse whitespace runs to a single space and trim.
#[derive(Debug)]
pub struct WhitespaceStage;

impl Stage for WhitespaceStage {
    fn name(&self) -> &str {
        "normalize_whitespace"
    }

    fn apply(&self, input: &str) -> String {
        input.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Drop a token when it is identical to the immediately preceding one.
#[derive(Debug)]
pub struct RepeatedWordStage;

impl Stage for RepeatedWordStage {
    fn name(&self) -> &str {
        "collapse_repeated_words"
    }

    fn apply(&self, input: &str) -> String {
        let mut kept: Vec<&str> = Vec::new();
        for word in input.split_whitespace() {
            if kept.last() != Some(&word) {
                kept.push(word);
            }
        }
        kept.join(" ")
    }
}

/// Delete literal ellipses, then collapse doubled punctuation marks
/// (adjacent or separated by one space) to a fixed point per mark.
#[derive(Debug)]
pub struct DoublePunctuationStage;

impl Stage for DoublePunctuationStage {
    fn name(&self) -> &str {
        "collapse_double_punctuation"
    }

    fn apply(&self, input: &str) -> String {
        let mut text = input.replace("...", "");
        for punct in ASCII_PUNCTUATION.chars() {
            let doubled: String = [punct, punct].iter().collect();
            let single = punct.to_string();
            while text.contains(&doubled) {
                text = text.replace(&doubled, &single);
            }
            let doubled_spaced: String = [punct, ' ', punct].iter().collect();
            while text.contains(&doubled_spaced) {
                text = text.replace(&doubled_spaced, &single);
            }
        }
        text
    }
}

/// Replace emoticon-bearing tokens with their sentiment word.
#[derive(Debug)]
pub struct SymbolStage {
    table: SymbolTable,
}

impl SymbolStage {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
        }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }
}

impl Default for SymbolStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for SymbolStage {
    fn name(&self) -> &str {
        "substitute_symbols"
    }

    fn apply(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        // Split on single spaces: emoticons glued to other characters stay
        // inside their token and are still found by substring lookup.
        for token in input.split(' ') {
            match self.table.lookup(token) {
                Some(meaning) => output.push_str(meaning),
                None => output.push_str(token),
            }
            output.push(' ');
        }
        output.trim().to_string()
    }
}

/// Insert a space between punctuation and an adjacent significant
/// character, in precomputed index order.
#[derive(Debug)]
pub struct PunctuationSpacingStage {
    index: PunctuationCombinationIndex,
}

impl PunctuationSpacingStage {
    pub fn new() -> Self {
        Self {
            index: PunctuationCombinationIndex::new(),
        }
    }

    pub fn index(&self) -> &PunctuationCombinationIndex {
        &self.index
    }
}

impl Default for PunctuationSpacingStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for PunctuationSpacingStage {
    fn name(&self) -> &str {
        "space_punctuation"
    }

    fn apply(&self, input: &str) -> String {
        let mut text = input.to_string();
        // One substitution pass per combination; later combinations see
        // the result of earlier ones, so punctuation chains get spaced out
        // progressively rather than iterating to convergence.
        for combo in self.index.iter() {
            if text.contains(&combo.joined) {
                text = text.replace(&combo.joined, &combo.spaced);
            }
            if text.contains(&combo.mirrored) {
                text = text.replace(&combo.mirrored, &combo.mirrored_spaced);
            }
        }
        text
    }
}

/// Expand space-bounded teencode short forms to their canonical words.
#[derive(Debug)]
pub struct AcronymStage {
    table: AcronymTable,
}

impl AcronymStage {
    pub fn new(table: AcronymTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AcronymTable {
        &self.table
    }
}

impl Stage for AcronymStage {
    fn name(&self) -> &str {
        "expand_acronyms"
    }

    fn apply(&self, input: &str) -> String {
        self.table.expand(input)
    }
}

/// Literal replacements removing punctuation isolated by spaces, applied
/// in this exact order. Covers "` x `", "` x`" and "`x `" for each mark.
const SPACED_PUNCTUATION_REPLACEMENTS: &[(&str, &str)] = &[
    (" , ", " "),
    (" . ", " "),
    (" \" ", " "),
    (" ! ", " "),
    (" ( ", " "),
    (" ) ", " "),
    (" = ", " "),
    (" ? ", " "),
    (" ,", " "),
    (" .", " "),
    (" \"", " "),
    (" !", " "),
    (" (", " "),
    (" )", " "),
    (" =", " "),
    (" ?", " "),
    (", ", " "),
    (". ", " "),
    ("\" ", " "),
    ("! ", " "),
    ("( ", " "),
    (") ", " "),
    ("= ", " "),
    ("? ", " "),
];

/// Remove punctuation left isolated by the spacing stage, then strip any
/// trailing punctuation run.
#[derive(Debug)]
pub struct SpacedPunctuationStage {
    whitespace: Regex,
}

impl SpacedPunctuationStage {
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
        }
    }
}

impl Default for SpacedPunctuationStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for SpacedPunctuationStage {
    fn name(&self) -> &str {
        "cleanup_spaced_punctuation"
    }

    fn apply(&self, input: &str) -> String {
        // Collapse runs first so the space-bounded patterns below line up,
        // but do not trim: a leading or trailing space is itself context
        // for the one-sided patterns.
        let mut text = self.whitespace.replace_all(input, NoExpand(" ")).into_owned();
        for &(from, to) in SPACED_PUNCTUATION_REPLACEMENTS {
            text = text.replace(from, to);
        }
        text.trim_end_matches(|c: char| ASCII_PUNCTUATION.contains(c))
            .to_string()
    }
}

/// Replace every character that is not whitespace, ASCII alphanumeric, or
/// a Vietnamese accented letter with a single space.
#[derive(Debug)]
pub struct AllowedCharacterStage;

impl Stage for AllowedCharacterStage {
    fn name(&self) -> &str {
        "keep_allowed_characters"
    }

    fn apply(&self, input: &str) -> String {
        input
            .chars()
            .map(|c| {
                if c.is_whitespace() || c.is_ascii_alphanumeric() || is_vietnamese_letter(c) {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }
}

/// Strip Vietnamese diacritics, case-preserving. Applied by the
/// orchestrator only when requested.
#[derive(Debug)]
pub struct DiacriticsStage {
    mapper: DiacriticsMapper,
}

impl DiacriticsStage {
    pub fn new() -> Self {
        Self {
            mapper: DiacriticsMapper::new(),
        }
    }
}

impl Default for DiacriticsStage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for DiacriticsStage {
    fn name(&self) -> &str {
        "strip_diacritics"
    }

    fn apply(&self, input: &str) -> String {
        self.mapper.strip(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formats() {
        let stage = NumberFormatStage::new();
        assert_eq!(
            stage.apply("giá 15,000,000đ và 98k"),
            "giá 15000000 đồng và 98000"
        );
        assert_eq!(stage.apply("98K nhé"), "98000 nhé");
        // No separator, no suffix: untouched.
        assert_eq!(stage.apply("mua 3 cái"), "mua 3 cái");
        // The k suffix must sit on a word boundary.
        assert_eq!(stage.apply("98kg"), "98kg");
    }

    #[test]
    fn test_number_overflow_keeps_token() {
        let stage = NumberFormatStage::new();
        let big = "99999999999999999999k";
        assert_eq!(stage.apply(big), big);
    }

    #[test]
    fn test_url_removal() {
        let stage = UrlRemovalStage::new();
        assert_eq!(stage.apply("xem http://abc.com nhé"), "xem  nhé");
        assert_eq!(stage.apply("trang shopee.vn giảm giá"), "trang  giảm giá");
        // Greedy by contract: dotted version tokens disappear too.
        assert_eq!(stage.apply("bản 1.2.3 mới"), "bản  mới");
    }

    #[test]
    fn test_repeated_characters() {
        let stage = RepeatedCharacterStage;
        assert_eq!(stage.apply("helloooo    world!!! 98000"), "hello world! 98000");
        // Double letters survive, only runs of three or more collapse.
        assert_eq!(stage.apply("good deeep"), "good dep");
        // Digit-only tokens keep their runs.
        assert_eq!(stage.apply("111222333"), "111222333");
    }

    #[test]
    fn test_whitespace_idempotent() {
        let stage = WhitespaceStage;
        let once = stage.apply("  xin \t chào\n\n thế  giới  ");
        assert_eq!(once, "xin chào thế giới");
        assert_eq!(stage.apply(&once), once);
        assert_eq!(stage.apply(""), "");
    }

    #[test]
    fn test_repeated_words() {
        let stage = RepeatedWordStage;
        assert_eq!(stage.apply("xin xin chào chào bạn bạn"), "xin chào bạn");
        assert_eq!(stage.apply("một một một hai một"), "một hai một");
        let input = "không lặp từ nào";
        assert_eq!(stage.apply(input), input);
    }

    #[test]
    fn test_double_punctuation() {
        let stage = DoublePunctuationStage;
        assert_eq!(stage.apply("hello!!! world..."), "hello! world");
        assert_eq!(stage.apply("sao ? ? ?"), "sao ?");
        assert_eq!(stage.apply("chấm....."), "chấm.");
    }

    #[test]
    fn test_double_punctuation_idempotent() {
        let stage = DoublePunctuationStage;
        for input in ["hello!!! world...", "a !! ! b", "..", ". . .", "x?!?!"] {
            let once = stage.apply(input);
            assert_eq!(stage.apply(&once), once, "not a fixed point for {input:?}");
        }
    }

    #[test]
    fn test_symbol_substitution() {
        let stage = SymbolStage::new();
        assert_eq!(stage.apply("hello :D"), "hello vui");
        assert_eq!(stage.apply("buồn quá :( hic"), "buồn quá buồn hic");
        assert_eq!(stage.apply("không có emoticon"), "không có emoticon");
        assert_eq!(stage.apply(""), "");
    }

    #[test]
    fn test_punctuation_spacing() {
        let stage = PunctuationSpacingStage::new();
        assert_eq!(stage.apply("hello,world"), "hello , world");
        assert_eq!(stage.apply("chào!"), "chào !");
    }

    #[test]
    fn test_punctuation_spacing_protects_numbers() {
        let stage = PunctuationSpacingStage::new();
        for input in ["98.000", "15,5", "3/4", "50%", "1|2"] {
            assert_eq!(stage.apply(input), input, "numeric literal was split");
        }
        // The same marks next to letters still get spaced.
        assert_eq!(stage.apply("a.b"), "a . b");
    }

    #[test]
    fn test_spaced_punctuation_cleanup() {
        let stage = SpacedPunctuationStage::new();
        assert_eq!(stage.apply("hello , world . ").trim(), "hello world");
        assert_eq!(stage.apply("xin chào!!?"), "xin chào");
        // Marks outside the removal list survive.
        assert!(stage.apply("a : b").contains(':'));
    }

    #[test]
    fn test_allowed_characters() {
        let stage = AllowedCharacterStage;
        let out = stage.apply("xin chào! @#$");
        assert!(!out.contains('!'));
        assert!(!out.contains('@'));
        assert_eq!(out.trim(), "xin chào");
        // Accented letters and digits are kept as-is.
        assert_eq!(stage.apply("đường 98"), "đường 98");
    }

    #[test]
    fn test_diacritics_stage() {
        let stage = DiacriticsStage::new();
        assert_eq!(stage.apply("Xin chào thế giới"), "Xin chao the gioi");
    }

    #[test]
    fn test_stages_accept_empty_input() {
        let table = AcronymTable::empty();
        let stages = default_stages(
            table,
            Arc::new(vntext_core::PassthroughSentenceNormalizer),
        );
        for stage in &stages {
            assert_eq!(stage.apply(""), "", "stage {} broke on empty input", stage.name());
        }
    }
}
