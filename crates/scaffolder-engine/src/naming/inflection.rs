//! English pluralisation and singularisation
//!
//! Only the final word of the input is inflected, so `TangibleThing`,
//! `tangible_thing` and `Tangible Thing` all become their plural forms by
//! changing `Thing`.

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
    "metadata",
];

/// (singular, plural) pairs matched against the whole final word
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("movie", "movies"),
    ("zombie", "zombies"),
    ("ox", "oxen"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("shoe", "shoes"),
    ("curve", "curves"),
    ("valve", "valves"),
];

const ES_PLURALS: &[&str] = &["buffalo", "tomato", "potato", "hero", "echo"];

/// Pluralise the final word of `input`
pub fn pluralize(input: &str) -> String {
    inflect_last_word(input, pluralize_word)
}

/// Singularise the final word of `input`
pub fn singularize(input: &str) -> String {
    inflect_last_word(input, singularize_word)
}

fn inflect_last_word(input: &str, inflect: fn(&str) -> String) -> String {
    let start = last_word_start(input);
    let (head, word) = input.split_at(start);
    if word.is_empty() {
        return input.to_string();
    }
    let inflected = inflect(&word.to_lowercase());
    format!("{}{}", head, restore_case(word, &inflected))
}

/// Byte offset where the final word begins: after the last separator, or at
/// the last uppercase letter that follows a lowercase letter or digit.
fn last_word_start(input: &str) -> usize {
    let mut start = 0;
    let mut previous: Option<char> = None;
    for (index, ch) in input.char_indices() {
        if matches!(ch, '_' | '-' | ' ' | '/' | ':') {
            start = index + ch.len_utf8();
        } else if ch.is_uppercase()
            && previous.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
        {
            start = index;
        }
        previous = Some(ch);
    }
    start
}

fn restore_case(original: &str, inflected: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);
    let all_upper = original.chars().count() > 1 && original.chars().all(|c| !c.is_lowercase());

    if all_upper {
        // acronyms keep their letters and take a lowercase suffix: `APIs`
        let lowered = original.to_lowercase();
        return match inflected.strip_prefix(lowered.as_str()) {
            Some(suffix) => format!("{}{}", original, suffix),
            None => inflected.to_uppercase(),
        };
    }
    if first_upper {
        let mut out = String::with_capacity(inflected.len());
        let mut rest = inflected.chars();
        if let Some(first) = rest.next() {
            out.extend(first.to_uppercase());
        }
        out.extend(rest);
        return out;
    }
    inflected.to_string()
}

fn strip(word: &str, suffix_len: usize) -> &str {
    &word[..word.len() - suffix_len]
}

fn preceded_by_consonant(word: &str, suffix_len: usize) -> bool {
    let stem = strip(word, suffix_len);
    if stem.ends_with("qu") {
        return true;
    }
    stem.chars()
        .last()
        .is_some_and(|c| c.is_alphabetic() && !"aeiouy".contains(c))
}

fn pluralize_word(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == word) {
        return word.to_string();
    }

    if word.ends_with("quiz") {
        return format!("{}zes", word);
    }
    if word.ends_with("matrix") || word.ends_with("vertex") || word.ends_with("index") {
        return format!("{}ices", strip(word, 2));
    }
    if ["alias", "status", "bus"].iter().any(|s| word.ends_with(s)) {
        return format!("{}es", word);
    }
    if word.ends_with("octopus") || word.ends_with("virus") {
        return format!("{}i", strip(word, 2));
    }
    if ["x", "ch", "ss", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{}es", word);
    }
    if word.ends_with("sis") {
        return format!("{}ses", strip(word, 3));
    }
    if word.ends_with('s') {
        return word.to_string();
    }
    if word.ends_with('y') && preceded_by_consonant(word, 1) {
        return format!("{}ies", strip(word, 1));
    }
    if word.ends_with("fe") && !word.ends_with("ffe") {
        return format!("{}ves", strip(word, 2));
    }
    if word.ends_with("lf") || word.ends_with("rf") {
        return format!("{}ves", strip(word, 1));
    }
    if word.ends_with("tum") || word.ends_with("ium") {
        return format!("{}a", strip(word, 2));
    }
    if ES_PLURALS.iter().any(|s| word.ends_with(s)) {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

fn singularize_word(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return (*singular).to_string();
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == word) {
        return word.to_string();
    }

    if word.ends_with("quizzes") {
        return strip(word, 3).to_string();
    }
    if word.ends_with("matrices") {
        return format!("{}ix", strip(word, 4));
    }
    if word.ends_with("vertices") || word.ends_with("indices") {
        return format!("{}ex", strip(word, 4));
    }
    if ["aliases", "statuses", "buses"].iter().any(|s| word.ends_with(s)) {
        return strip(word, 2).to_string();
    }
    if word.ends_with("octopi") || word.ends_with("viri") {
        return format!("{}us", strip(word, 1));
    }
    if ["xes", "ches", "sses", "shes"].iter().any(|s| word.ends_with(s)) {
        return strip(word, 2).to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if word.ends_with("yses") || word.ends_with("theses") {
        return format!("{}is", strip(word, 2));
    }
    if word.len() > 3 && word.ends_with("ies") {
        return format!("{}y", strip(word, 3));
    }
    if word.ends_with("lves") || word.ends_with("rves") {
        return format!("{}f", strip(word, 3));
    }
    if word.ends_with("ves") {
        return format!("{}fe", strip(word, 3));
    }
    if word.ends_with("ta") || word.ends_with("ia") {
        return format!("{}um", strip(word, 1));
    }
    if ES_PLURALS.iter().any(|s| word.ends_with(&format!("{}es", s))) {
        return strip(word, 2).to_string();
    }
    if word.ends_with('s') {
        return strip(word, 1).to_string();
    }
    word.to_string()
}
