//! Syntactic checks for language tags such as `en-US` or `zh-Hans-CN`.

/// Returns `true` if the tag looks like a BCP 47 language tag: a primary subtag of two or three
/// letters followed by any number of alphanumeric subtags of one to eight characters, separated by
/// hyphens.
///
/// Only the shape of the tag is checked; whether the service supports the language is up to the
/// service.
pub fn is_well_formed(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let primary = match subtags.next() {
        Some(primary) => primary,
        None => return false,
    };
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    subtags.all(|subtag| {
        (1..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
    })
}

/// Splits a comma-separated list of language tags, dropping blank entries.
pub(crate) fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|tag| !tag.is_empty())
}
