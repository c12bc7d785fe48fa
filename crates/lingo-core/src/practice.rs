use unicode_normalization::UnicodeNormalization;

pub trait AnswerNormalizer {
    // Default: NFKC, collapse whitespace, lowercase
    fn normalize(&self, text: &str) -> String {
        let text: String = text.trim().nfkc().collect();
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

pub struct DefaultNormalizer;
impl AnswerNormalizer for DefaultNormalizer {}

/// Free-text answer check: trimmed, case-insensitive, width-insensitive
pub fn answers_match(user_answer: &str, expected: &str) -> bool {
    let normalizer = DefaultNormalizer;
    let user = normalizer.normalize(user_answer);
    !user.is_empty() && user == normalizer.normalize(expected)
}

/// Split "B. Katze" or "B) Katze" into its label and text
pub fn option_label(option: &str) -> Option<(char, &str)> {
    let option = option.trim();
    let mut chars = option.char_indices();
    let (_, label) = chars.next()?;
    let (sep_index, sep) = chars.next()?;
    if !label.is_ascii_alphabetic() || !matches!(sep, '.' | ')' | ':') {
        return None;
    }
    Some((
        label.to_ascii_uppercase(),
        option[sep_index + sep.len_utf8()..].trim(),
    ))
}

/// A bare option letter such as "b", "B." or "C)"
fn as_letter(text: &str) -> Option<char> {
    let trimmed = text.trim().trim_end_matches(['.', ')', ':']);
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

/// Multiple-choice check.
///
/// `correct` is usually the option letter ("A"), sometimes the full option. The
/// user may answer with the letter, the full option, or the option text alone.
pub fn choice_matches(user_answer: &str, correct: &str, options: &[String]) -> bool {
    if answers_match(user_answer, correct) {
        return true;
    }

    let Some(letter) = as_letter(correct).or_else(|| option_label(correct).map(|(l, _)| l))
    else {
        return false;
    };

    if as_letter(user_answer) == Some(letter) {
        return true;
    }

    options
        .iter()
        .filter_map(|option| option_label(option).map(|(label, text)| (label, option, text)))
        .filter(|(label, _, _)| *label == letter)
        .any(|(_, option, text)| {
            answers_match(user_answer, option) || answers_match(user_answer, text)
        })
}
