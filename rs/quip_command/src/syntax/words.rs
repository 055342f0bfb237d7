//! Word segmentation and ASCII case utilities shared by syntax providers.
//!
//! Case folding here is deliberately ASCII-only: canonical names are typed by
//! chat users, and locale-aware folding would make `name_argument` and
//! `syntactic_equal` disagree between machines.

fn char_to_ascii_lower(c: char) -> char {
    c.to_ascii_lowercase()
}

fn char_to_ascii_upper(c: char) -> char {
    c.to_ascii_uppercase()
}

fn to_ascii_lower_word(word: &str) -> String {
    // Words shorter than two characters keep their declared case, so a
    // single-letter abbreviation stays exactly as written.
    if word.chars().count() < 2 {
        return word.to_string();
    }
    word.chars().map(char_to_ascii_lower).collect()
}

fn to_ascii_upper_word(word: &str) -> String {
    if word.chars().count() < 2 {
        return word.to_string();
    }
    word.chars().map(char_to_ascii_upper).collect()
}

fn capitalize_word(word: &str) -> String {
    // Two-letter words keep their second character, so an abbreviation like
    // `DB` survives capitalization.
    let count = word.chars().count();
    if count < 2 {
        return word.to_string();
    }
    let mut chars = word.chars();
    let first = char_to_ascii_upper(chars.next().unwrap());
    let mut rv = String::with_capacity(word.len());
    rv.push(first);
    if count == 2 {
        rv.push(chars.next().unwrap());
    } else {
        rv.extend(chars.map(char_to_ascii_lower));
    }
    rv
}

/// ASCII-lowercase every word; single-character words pass through unchanged.
pub fn to_ascii_lower(words: &[String]) -> Vec<String> {
    words.iter().map(|w| to_ascii_lower_word(w)).collect()
}

/// ASCII-uppercase every word; single-character words pass through unchanged.
pub fn to_ascii_upper(words: &[String]) -> Vec<String> {
    words.iter().map(|w| to_ascii_upper_word(w)).collect()
}

/// Capitalize every word (first letter upper, rest lower; two-letter words
/// keep their second letter).
pub fn capitalize(words: &[String]) -> Vec<String> {
    words.iter().map(|w| capitalize_word(w)).collect()
}

/// ASCII case-insensitive equality. Non-ASCII characters compare by ordinal
/// value; strings of different lengths are never equal.
pub fn case_insensitive_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Split a capitalized symbol name (command or argument identifier) into
/// words.
///
/// A word boundary falls at a lowercase-to-uppercase transition, or after a
/// run of uppercase letters when a lowercase letter follows (the run up to
/// but excluding its last letter is a finished acronym word, and the last
/// letter starts the next word):
///
/// ```
/// # use quip_command::syntax::split_symbol_name;
/// assert_eq!(split_symbol_name("DBAdmin"), vec!["DB", "Admin"]);
/// assert_eq!(split_symbol_name("DbbAdmin"), vec!["Dbb", "Admin"]);
/// assert_eq!(split_symbol_name("DBBAdmin"), vec!["DB", "B", "Admin"]);
/// ```
pub fn split_symbol_name(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut beg = 0usize;
    let mut upper_run = 0u32; // sequential uppercase letters met
    let mut last_lower = false;
    let mut i = 0usize;

    while beg + i < chars.len() {
        let c = chars[beg + i];
        if c.is_ascii_uppercase() {
            if last_lower || upper_run == 2 {
                words.push(chars[beg..beg + i].iter().collect());
                beg += i;
                i = 0;
                upper_run = 0;
            }
            upper_run += 1;
            last_lower = false;
        } else {
            if upper_run == 2 {
                words.push(chars[beg..beg + i - 1].iter().collect());
                beg += 1;
                i = 1;
            }
            upper_run = 0;
            last_lower = true;
        }
        i += 1;
    }
    words.push(chars[beg..beg + i].iter().collect());
    words
}

/// Split a Rust field identifier into capitalized words.
///
/// Snake-case pieces are capitalized and then camel-segmented, so both
/// `machine_name` and `dbAdminCount`-style identifiers produce usable words.
pub fn split_field_ident(ident: &str) -> Vec<String> {
    let mut words = Vec::new();
    for piece in ident.split('_').filter(|p| !p.is_empty()) {
        let capitalized = capitalize_first(piece);
        words.extend(split_symbol_name(&capitalized));
    }
    words
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut rv = String::with_capacity(word.len());
            rv.push(char_to_ascii_upper(first));
            rv.extend(chars);
            rv
        }
    }
}
