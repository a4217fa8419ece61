//! Identifier word tokenizer.

/// Splits an identifier into its constituent words.
///
/// Boundaries are `_`, `-`, spaces, lower-to-upper transitions, and the last
/// upper of an acronym run followed by a lower (`"JSONValue"` splits as
/// `["JSON", "Value"]`). Digits stay attached to the current word.
///
/// # Example
///
/// ```
/// use json_bind_util::split_words;
///
/// assert_eq!(split_words("userName"), ["user", "Name"]);
/// assert_eq!(split_words("user_name_2"), ["user", "name", "2"]);
/// assert_eq!(split_words("HTTPStatus"), ["HTTP", "Status"]);
/// ```
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &ch) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
