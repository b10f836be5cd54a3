use std::collections::HashSet;

use crate::vectorizer::term::TermFrequency;

/// Built-in English stop-word list.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amoungst",
    "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere",
    "are", "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done", "down", "due", "during",
    "each", "eg", "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc",
    "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
    "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt", "have",
    "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least",
    "less", "ltd", "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming",
    "seems", "serious", "several", "she", "should", "show", "side", "since", "sincere", "six",
    "sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them", "themselves",
    "then", "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon",
    "these", "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve",
    "twenty", "two", "un", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
    "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who",
    "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

/// Stop-word filter applied after tokenization.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    /// The built-in English list
    pub fn english() -> Self {
        Self::custom(ENGLISH_STOP_WORDS)
    }

    /// No filtering at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Custom list, matched against lowercased tokens
    pub fn custom<T>(words: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        Self {
            words: words.iter().map(|w| w.as_ref().to_lowercase().into_boxed_str()).collect(),
        }
    }

    #[inline]
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Turns raw text into term counts.
///
/// Text is lowercased and split on every non-alphanumeric character;
/// every non-empty fragment that is not a stop word is a term.
#[derive(Debug, Clone)]
pub struct Analyzer {
    stop_words: StopWords,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl Analyzer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Tokens in text order, stop words removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|frag| !frag.is_empty())
            .map(str::to_lowercase)
            .filter(|tok| !self.stop_words.is_stop_word(tok))
            .collect()
    }

    pub fn analyze(&self, text: &str) -> TermFrequency {
        TermFrequency::from(self.tokenize(text).as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_lowercases() {
        let analyzer = Analyzer::new(StopWords::none());
        assert_eq!(
            analyzer.tokenize("Cat, DOG!  x-y\tÉclair"),
            vec!["cat", "dog", "x", "y", "éclair"]
        );
    }

    #[test]
    fn english_stop_words_are_removed() {
        let analyzer = Analyzer::default();
        assert_eq!(analyzer.tokenize("The cat and THE dog"), vec!["cat", "dog"]);
        assert!(analyzer.analyze("the and of").is_empty());
        assert!(analyzer.analyze("").is_empty());
    }

    #[test]
    fn english_list_covers_numbers_and_common_verbs() {
        assert_eq!(StopWords::english().len(), 318);
        let analyzer = Analyzer::default();
        assert!(analyzer
            .tokenize("First two interest amount bill found get made show see")
            .is_empty());
        assert!(analyzer.analyze("Fifty of them, or sixty").is_empty());
        assert_eq!(analyzer.tokenize("did they just leave"), vec!["did", "just", "leave"]);
    }

    #[test]
    fn custom_stop_words_match_case_insensitively() {
        let analyzer = Analyzer::new(StopWords::custom(&["Robot"]));
        assert_eq!(analyzer.tokenize("robot ai"), vec!["ai"]);
    }
}
