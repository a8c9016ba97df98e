//! Static lookup tables driving the normalization stages.
//!
//! Every table is built by an explicit constructor and is immutable after
//! construction. Nothing here relies on import-time side effects; the
//! pipeline owns one instance of each table for the life of the process.

use std::collections::HashMap;

/// ASCII punctuation marks, in the order substitutions are applied.
pub const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Marks that are semantically meaningful inside numeric literals
/// (decimal/thousands separators, percent, fraction, pipe-delimited
/// fields) and must never be split away from an adjacent digit.
const NUMERIC_PUNCTUATION: &str = ".,/%|";

/// Vietnamese accented letters, lower case.
pub const VIETNAMESE_ACCENTED_LOWER: &str =
    "áàảãạăắằẳẵặâấầẩẫậéèẻẽẹêếềểễệóòỏõọôốồổỗộơớờởỡợíìỉĩịúùủũụưứừửữựýỳỷỹỵđ";

/// Vietnamese accented letters, upper case.
pub const VIETNAMESE_ACCENTED_UPPER: &str =
    "ÁÀẢÃẠĂẮẰẲẴẶÂẤẦẨẪẬÉÈẺẼẸÊẾỀỂỄỆÓÒỎÕỌÔỐỒỔỖỘƠỚỜỞỠỢÍÌỈĨỊÚÙỦŨỤƯỨỪỬỮỰÝỲỶỸỴĐ";

/// Accented-to-base character pairs, lower case. The upper-case variants
/// are derived at table construction.
const DIACRITIC_PAIRS: &[(char, char)] = &[
    ('à', 'a'),
    ('á', 'a'),
    ('ả', 'a'),
    ('ã', 'a'),
    ('ạ', 'a'),
    ('ă', 'a'),
    ('ắ', 'a'),
    ('ằ', 'a'),
    ('ẳ', 'a'),
    ('ẵ', 'a'),
    ('ặ', 'a'),
    ('â', 'a'),
    ('ấ', 'a'),
    ('ầ', 'a'),
    ('ẩ', 'a'),
    ('ẫ', 'a'),
    ('ậ', 'a'),
    ('è', 'e'),
    ('é', 'e'),
    ('ẻ', 'e'),
    ('ẽ', 'e'),
    ('ẹ', 'e'),
    ('ê', 'e'),
    ('ế', 'e'),
    ('ề', 'e'),
    ('ể', 'e'),
    ('ễ', 'e'),
    ('ệ', 'e'),
    ('ì', 'i'),
    ('í', 'i'),
    ('ỉ', 'i'),
    ('ĩ', 'i'),
    ('ị', 'i'),
    ('ò', 'o'),
    ('ó', 'o'),
    ('ỏ', 'o'),
    ('õ', 'o'),
    ('ọ', 'o'),
    ('ô', 'o'),
    ('ố', 'o'),
    ('ồ', 'o'),
    ('ổ', 'o'),
    ('ỗ', 'o'),
    ('ộ', 'o'),
    ('ơ', 'o'),
    ('ớ', 'o'),
    ('ờ', 'o'),
    ('ở', 'o'),
    ('ỡ', 'o'),
    ('ợ', 'o'),
    ('ù', 'u'),
    ('ú', 'u'),
    ('ủ', 'u'),
    ('ũ', 'u'),
    ('ụ', 'u'),
    ('ư', 'u'),
    ('ứ', 'u'),
    ('ừ', 'u'),
    ('ử', 'u'),
    ('ữ', 'u'),
    ('ự', 'u'),
    ('ỳ', 'y'),
    ('ý', 'y'),
    ('ỷ', 'y'),
    ('ỹ', 'y'),
    ('ỵ', 'y'),
    ('đ', 'd'),
];

/// Emoticon patterns and their sentiment words, in lookup priority order.
/// Lower-cased aliases are appended by [`SymbolTable::new`].
const SYMBOL_MEANINGS: &[(&str, &str)] = &[
    ("-_- ", "chán"),
    ("8-)", "vui"),
    (":$", "thường"),
    ("=(", "buồn"),
    (":(", "buồn"),
    (":+", "giận"),
    (":-(", "khóc"),
    (":-H", "giận"),
    (":3", "vui"),
    (":<", "buồn"),
    (":>", "vui"),
    (":B", "thường"),
    (":D", "vui"),
    (":L", "mệt"),
    (":P", "vui"),
    (":Q", "bực"),
    (":T", "bực"),
    (":Z", "thường"),
    (":o", "thường"),
    (":V", "thường"),
    (":v", "thường"),
    (":|", "thường"),
    (":~", "lo"),
    (";-X", "bực"),
    (";D", "vui"),
    (";G", "buồn"),
    (";O", "thường"),
    (";P", "vui"),
    ("=)", "vui"),
    (":)", "vui"),
    (";)", "vui"),
    ("=.=", "chán"),
    ("@@", "chán"),
    ("B-)", "vui"),
    ("P-(", "khóc"),
    ("^^", "vui"),
    ("T_T", "buồn"),
    ("T.T", "buồn"),
    (":-O", "ngờ"),
];

/// Whether `c` is a Vietnamese accented letter (either case).
pub fn is_vietnamese_letter(c: char) -> bool {
    VIETNAMESE_ACCENTED_LOWER.contains(c) || VIETNAMESE_ACCENTED_UPPER.contains(c)
}

/// Whether `c` may participate in a punctuation combination: an ASCII
/// letter, a Vietnamese accented letter, or a digit.
pub fn is_significant_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_vietnamese_letter(c)
}

/// All significant characters, in the fixed index order: ASCII lower case,
/// accented lower case, the upper-case counterparts of both, then digits.
pub fn significant_characters() -> Vec<char> {
    let mut chars: Vec<char> = ('a'..='z').collect();
    chars.extend(VIETNAMESE_ACCENTED_LOWER.chars());
    chars.extend('A'..='Z');
    chars.extend(VIETNAMESE_ACCENTED_UPPER.chars());
    chars.extend('0'..='9');
    chars
}

/// Case-preserving accented-to-base character table.
#[derive(Debug, Clone)]
pub struct DiacriticsMapper {
    map: HashMap<char, char>,
}

impl DiacriticsMapper {
    /// Build the table, covering lower and upper case independently.
    pub fn new() -> Self {
        let mut map = HashMap::with_capacity(DIACRITIC_PAIRS.len() * 2);
        for &(accented, base) in DIACRITIC_PAIRS {
            map.insert(accented, base);
            if let Some(upper) = accented.to_uppercase().next() {
                map.insert(upper, base.to_ascii_uppercase());
            }
        }
        Self { map }
    }

    /// Replace every mapped accented character with its base character.
    /// Unmapped characters pass through unchanged.
    pub fn strip(&self, text: &str) -> String {
        text.chars()
            .map(|c| self.map.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

impl Default for DiacriticsMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// One emoticon pattern with its sentiment word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub pattern: String,
    pub meaning: String,
}

/// Ordered emoticon-to-sentiment table.
///
/// Deliberately an association list, not a hash map: lookup order is
/// insertion order and the first substring match wins, so determinism
/// depends on the sequence being preserved.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    /// Build the table from the static emoticon data, appending a
    /// lower-cased alias for every pattern whose lower-casing is distinct
    /// and not already present.
    pub fn new() -> Self {
        let mut entries: Vec<SymbolEntry> = Vec::with_capacity(SYMBOL_MEANINGS.len() * 2);
        for &(pattern, meaning) in SYMBOL_MEANINGS {
            if !entries.iter().any(|e| e.pattern == pattern) {
                entries.push(SymbolEntry {
                    pattern: pattern.to_string(),
                    meaning: meaning.to_string(),
                });
            }
        }
        for &(pattern, meaning) in SYMBOL_MEANINGS {
            let lower = pattern.to_lowercase();
            if !entries.iter().any(|e| e.pattern == lower) {
                entries.push(SymbolEntry {
                    pattern: lower,
                    meaning: meaning.to_string(),
                });
            }
        }
        Self { entries }
    }

    /// First entry whose pattern occurs anywhere inside `token`.
    ///
    /// Substring matching is intentional: a stray emoticon inside a longer
    /// token still classifies it. The occasional false positive is part of
    /// the contract.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| token.contains(e.pattern.as_str()))
            .map(|e| e.meaning.as_str())
    }

    /// Number of entries, aliases included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in lookup priority order.
    pub fn entries(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// One precomputed character/punctuation adjacency with its spaced forms.
#[derive(Debug, Clone)]
pub struct PunctuationCombination {
    /// Significant character directly followed by the mark.
    pub joined: String,
    /// Same pair with a separating space.
    pub spaced: String,
    /// The mark directly followed by the character (mirror adjacency).
    pub mirrored: String,
    /// Mirror pair with a separating space.
    pub mirrored_spaced: String,
}

/// Precomputed set of character/punctuation adjacencies.
///
/// Built once at pipeline construction so punctuation spacing is a flat
/// sequence of literal replacements instead of a backtracking-prone
/// pattern. Combinations of a digit with one of `. , / % |` are excluded
/// to protect numeric literals.
#[derive(Debug, Clone)]
pub struct PunctuationCombinationIndex {
    combinations: Vec<PunctuationCombination>,
}

impl PunctuationCombinationIndex {
    /// Build the full index over every punctuation mark and significant
    /// character, mark-major, in the fixed order of
    /// [`significant_characters`].
    pub fn new() -> Self {
        let chars = significant_characters();
        let mut combinations =
            Vec::with_capacity(ASCII_PUNCTUATION.chars().count() * chars.len());
        for punct in ASCII_PUNCTUATION.chars() {
            for &c in &chars {
                if NUMERIC_PUNCTUATION.contains(punct) && c.is_ascii_digit() {
                    continue;
                }
                combinations.push(PunctuationCombination {
                    joined: format!("{c}{punct}"),
                    spaced: format!("{c} {punct}"),
                    mirrored: format!("{punct}{c}"),
                    mirrored_spaced: format!("{punct} {c}"),
                });
            }
        }
        Self { combinations }
    }

    /// Iterate combinations in index order.
    pub fn iter(&self) -> impl Iterator<Item = &PunctuationCombination> {
        self.combinations.iter()
    }

    /// Number of combinations in the index.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

impl Default for PunctuationCombinationIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_diacritics() {
        let mapper = DiacriticsMapper::new();
        assert_eq!(mapper.strip("Xin chào thế giới"), "Xin chao the gioi");
        assert_eq!(mapper.strip("ĐÀ NẴNG"), "DA NANG");
        assert_eq!(mapper.strip("no accents"), "no accents");
    }

    #[test]
    fn test_strip_diacritics_idempotent() {
        let mapper = DiacriticsMapper::new();
        let once = mapper.strip("Hôm nay trời đẹp quá");
        assert_eq!(mapper.strip(&once), once);
    }

    #[test]
    fn test_symbol_table_first_match_wins() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup(":D"), Some("vui"));
        assert_eq!(table.lookup(":("), Some("buồn"));
        // ":(" is listed before ":D", so a token containing both resolves
        // to the earlier entry regardless of position inside the token.
        assert_eq!(table.lookup(":D:("), Some("buồn"));
        assert_eq!(table.lookup("=.="), Some("chán"));
        assert_eq!(table.lookup("hello"), None);
    }

    #[test]
    fn test_symbol_table_lowercase_aliases_appended() {
        let table = SymbolTable::new();
        // ":d" only matches through the alias pass.
        assert_eq!(table.lookup(":d"), Some("vui"));
        assert_eq!(table.lookup(";-x"), Some("bực"));
        // Aliases come after all original entries.
        let pos_upper = table.entries().position(|e| e.pattern == ":D").unwrap();
        let pos_lower = table.entries().position(|e| e.pattern == ":d").unwrap();
        assert!(pos_upper < pos_lower);
        // Patterns that are already lower case are not duplicated.
        let count = table.entries().filter(|e| e.pattern == ":)").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_symbol_table_substring_match() {
        let table = SymbolTable::new();
        // "@@" buried in a longer token still classifies it.
        assert_eq!(table.lookup("email@@host"), Some("chán"));
    }

    #[test]
    fn test_significant_characters() {
        let chars = significant_characters();
        // 26 ASCII + 67 accented, both cases, plus 10 digits.
        assert_eq!(chars.len(), 26 * 2 + 67 * 2 + 10);
        assert!(chars.contains(&'a'));
        assert!(chars.contains(&'Ế'));
        assert!(chars.contains(&'9'));
        assert!(is_significant_character('ớ'));
        assert!(!is_significant_character('!'));
    }

    #[test]
    fn test_index_excludes_numeric_combinations() {
        let index = PunctuationCombinationIndex::new();
        assert!(!index.iter().any(|c| c.joined == "9."));
        assert!(!index.iter().any(|c| c.joined == "0,"));
        assert!(!index.iter().any(|c| c.joined == "5%"));
        assert!(!index.iter().any(|c| c.joined == "1|"));
        assert!(!index.iter().any(|c| c.joined == "3/"));
        // Letters keep their dot combination, digits keep non-numeric marks.
        assert!(index.iter().any(|c| c.joined == "a."));
        assert!(index.iter().any(|c| c.joined == "9!"));
    }

    #[test]
    fn test_index_size() {
        let index = PunctuationCombinationIndex::new();
        let marks = ASCII_PUNCTUATION.chars().count();
        let chars = significant_characters().len();
        // Five protected marks each skip the ten digits.
        assert_eq!(index.len(), marks * chars - 5 * 10);
    }
}
