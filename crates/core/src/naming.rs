//! Item name normalization.

/// Upper-case the first character of an item name.
///
/// Only ASCII letters are changed; names starting with a digit, symbol or
/// non-ASCII character are returned as-is.
///
/// # Examples
///
/// ```
/// use larder_core::naming::normalize_item_name;
///
/// assert_eq!(normalize_item_name("milk"), "Milk");
/// assert_eq!(normalize_item_name("Milk"), "Milk");
/// assert_eq!(normalize_item_name("2%milk"), "2%milk");
/// ```
pub fn normalize_item_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut normalized = String::with_capacity(name.len());
            normalized.push(first.to_ascii_uppercase());
            normalized.push_str(chars.as_str());
            normalized
        }
        _ => name.to_string(),
    }
}
