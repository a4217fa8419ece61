//! Case conversion built on the word tokenizer.

use crate::split_words;

/// Final fold applied to a converted key.
///
/// `Standard` is the conventional form of the chosen convention (camelCase,
/// snake_case, PascalCase); `Upper`/`Lower` fold the joined result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseForm {
    #[default]
    Standard,
    Upper,
    Lower,
}

impl CaseForm {
    fn fold(self, s: String) -> String {
        match self {
            CaseForm::Standard => s,
            CaseForm::Upper => s.to_uppercase(),
            CaseForm::Lower => s.to_lowercase(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Converts an identifier to camelCase, then applies `form`.
///
/// ```
/// use json_bind_util::{to_camel, CaseForm};
///
/// assert_eq!(to_camel("user_name", CaseForm::Standard), "userName");
/// ```
pub fn to_camel(name: &str, form: CaseForm) -> String {
    let words = split_words(name);
    let mut out = String::with_capacity(name.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.extend(word.chars().flat_map(char::to_lowercase));
        } else {
            out.push_str(&capitalize(word));
        }
    }
    form.fold(out)
}

/// Converts an identifier to snake_case, then applies `form`.
///
/// ```
/// use json_bind_util::{to_snake, CaseForm};
///
/// assert_eq!(to_snake("userName", CaseForm::Standard), "user_name");
/// assert_eq!(to_snake("userName", CaseForm::Upper), "USER_NAME");
/// ```
pub fn to_snake(name: &str, form: CaseForm) -> String {
    let words = split_words(name);
    let joined = words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    form.fold(joined)
}

/// Converts an identifier to PascalCase, then applies `form`.
///
/// ```
/// use json_bind_util::{to_pascal, CaseForm};
///
/// assert_eq!(to_pascal("user_name", CaseForm::Standard), "UserName");
/// ```
pub fn to_pascal(name: &str, form: CaseForm) -> String {
    let words = split_words(name);
    let mut out = String::with_capacity(name.len());
    for word in &words {
        out.push_str(&capitalize(word));
    }
    form.fold(out)
}
