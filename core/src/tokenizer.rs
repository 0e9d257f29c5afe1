use std::collections::HashMap;

/// Punctuation marks stripped from text before tokenizing or counting characters.
pub const PUNCTUATION: [char; 6] = ['.', '!', ':', ';', ',', '?'];

fn is_punctuation(c: char) -> bool { PUNCTUATION.contains(&c) }

/// Tokenize text into terms: lowercase, delete punctuation, split on single spaces.
///
/// Punctuation is deleted rather than replaced, so `"end.start"` yields the single term
/// `"endstart"`. Empty tokens from consecutive spaces are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text.to_lowercase().chars().filter(|c| !is_punctuation(*c)).collect();
    normalized
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of characters left once all whitespace and punctuation are removed.
pub fn char_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace() && !is_punctuation(*c)).count()
}

/// Group tokens into `(term, count)` pairs, one per distinct term, in first-seen order.
pub fn term_frequencies(tokens: &[String]) -> Vec<(String, u32)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut freqs: Vec<(String, u32)> = Vec::new();
    for token in tokens {
        match slots.get(token.as_str()) {
            Some(&i) => freqs[i].1 += 1,
            None => {
                slots.insert(token, freqs.len());
                freqs.push((token.clone(), 1));
            }
        }
    }
    freqs
}
