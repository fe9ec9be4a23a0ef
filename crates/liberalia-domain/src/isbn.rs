//! ISBN normalisation.

/// Maximum stored ISBN length (room for hyphenated ISBN-13 input).
pub const ISBN_MAX_LEN: usize = 16;

/// Strip separators (`-` and whitespace) and upper-case the check digit `x`.
///
/// ```
/// use liberalia_domain::isbn::normalize_isbn;
/// assert_eq!(normalize_isbn(" 978-0-13-468599-1 "), "9780134685991");
/// assert_eq!(normalize_isbn("0-8044-2957-x"), "080442957X");
/// ```
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}
