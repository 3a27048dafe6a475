//! Field level sanitization and shape checks shared by the wizard and the
//! submission endpoint.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of characters kept from any text field.
pub const MAX_FIELD_LENGTH: usize = 1000;

/// Maximum number of characters of a business email address.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Minimum and maximum length of a phone number after removing formatting
/// characters.
pub const PHONE_LENGTH: std::ops::RangeInclusive<usize> = 7..=16;

pub static SCRIPT_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap());

/// Top level and country domains accepted by the strict email policy.
pub const RECOGNIZED_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "int", "co", "io", "biz", "info", "name", "pro",
    "museum", "aero", "coop", "jobs", "travel", "mobi", "asia", "cat", "tel", "post", "geo", "xxx",
    "uk", "us", "ca", "au", "de", "fr", "it", "nl", "be", "ch", "at", "dk", "fi", "no", "se", "es",
    "pt", "ie", "pl", "cz", "hu", "ro", "bg", "hr", "si", "sk", "lt", "lv", "ee", "ru", "ua", "by",
    "md", "am", "ge", "az", "kz", "kg", "tj", "tm", "uz", "mn", "cn", "jp", "kr", "tw", "hk", "sg",
    "my", "th", "vn", "ph", "id", "in", "pk", "bd", "lk", "np", "bt", "mv", "af", "ir", "iq", "il",
    "jo", "lb", "sy", "tr", "cy", "eg", "ly", "tn", "dz", "ma", "sd", "ke", "tz", "ug", "et", "so",
    "dj", "er", "mw", "zm", "zw", "bw", "na", "sz", "ls", "mg", "mu", "sc", "km", "za", "ao", "mz",
    "zr", "cg", "cf", "td", "cm", "gq", "ga", "st", "gw", "cv", "sn", "gm", "gn", "sl", "lr", "ci",
    "gh", "tg", "bj", "ne", "bf", "ml", "mr", "eh", "br", "ar", "cl", "ec", "gy", "py", "pe", "sr",
    "uy", "ve", "bo", "cr", "sv", "gt", "hn", "ni", "pa", "bz", "mx", "cu", "do", "ht", "jm", "tt",
    "bb", "gd", "lc", "vc", "ag", "dm", "kn", "bs", "pr", "vi", "ai", "bm", "ky", "tc", "vg", "ms",
    "gp", "mq", "aw", "cw", "sx", "bq", "fk", "gs", "sh", "ac", "ta",
];

/// Sanitizes a free text value.
///
/// Script blocks are removed until none remain, then the value is trimmed and
/// truncated to [`MAX_FIELD_LENGTH`] characters. Applying this function to its
/// own output returns the output unchanged.
pub fn sanitize_text(input: String) -> String {
    let mut text = input;
    while SCRIPT_BLOCK_REGEX.is_match(&text) {
        text = SCRIPT_BLOCK_REGEX.replace_all(&text, "").into_owned();
    }

    let trimmed = text.trim();
    let truncated = match trimmed.char_indices().nth(MAX_FIELD_LENGTH) {
        Some((end, _)) => &trimmed[..end],
        None => trimmed,
    };

    truncated.trim_end().to_owned()
}

/// Sanitizes an email address. Same as [`sanitize_text`], but lowercased.
pub fn sanitize_email(input: String) -> String {
    sanitize_text(input.to_lowercase())
}

/// Sanitizes every entry of a multi choice selection, dropping entries that
/// end up empty and collapsing duplicates while keeping the order of the first
/// selection.
pub fn sanitize_selection<'a>(selection: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut out = Vec::<String>::new();
    for entry in selection {
        let entry = sanitize_text(entry.clone());
        if !entry.is_empty() && !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}

pub fn is_valid_email_shape(email: &str) -> bool {
    email.chars().count() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

pub fn has_recognized_tld(email: &str) -> bool {
    email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(_, tld)| RECOGNIZED_TLDS.contains(&tld.to_lowercase().as_str()))
}

/// Removes the formatting characters ` -().` from a phone number.
pub fn reduce_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect()
}

pub fn is_valid_phone(phone: &str) -> bool {
    let reduced = reduce_phone(phone);
    PHONE_LENGTH.contains(&reduced.chars().count()) && PHONE_REGEX.is_match(&reduced)
}
