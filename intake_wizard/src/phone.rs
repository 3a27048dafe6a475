/// Numbering plan used to format a phone number while it is typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PhoneRegion {
    /// Detect the region from the digits entered so far.
    #[default]
    Auto,
    /// North American Numbering Plan, e.g. `(555) 123-4567`.
    NorthAmerica,
    /// Any other number, grouped as `CC NNNN REST`.
    International,
}

/// Digits of the longest number [`is_valid_phone`] accepts. Further digits
/// are dropped.
///
/// [`is_valid_phone`]: intake_models::sanitize::is_valid_phone
const MAX_DIGITS: usize = 16;

/// Formats the (possibly incomplete) phone number `input` for display.
///
/// Every character except digits is dropped before formatting, so the
/// function can be applied to its own output.
pub fn format_phone(input: &str, region: PhoneRegion) -> String {
    let explicit_country_code = input.trim_start().starts_with('+');
    let digits = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect::<String>();

    if digits.is_empty() {
        return String::new();
    }

    let region = match region {
        PhoneRegion::Auto => detect_region(&digits, explicit_country_code),
        region => region,
    };

    match region {
        PhoneRegion::International => format_international(&digits),
        _ => format_north_american(&digits, explicit_country_code),
    }
}

fn detect_region(digits: &str, explicit_country_code: bool) -> PhoneRegion {
    let north_american = if explicit_country_code {
        digits.starts_with('1') && digits.len() <= 11
    } else {
        digits.len() <= 10 || (digits.len() == 11 && digits.starts_with('1'))
    };

    if north_american {
        PhoneRegion::NorthAmerica
    } else {
        PhoneRegion::International
    }
}

fn format_north_american(digits: &str, explicit_country_code: bool) -> String {
    let has_country_code = digits.starts_with('1') && (explicit_country_code || digits.len() == 11);
    let (prefix, national) = if has_country_code {
        ("+1 ", &digits[1..])
    } else {
        ("", digits)
    };
    let national = &national[..national.len().min(10)];

    let formatted = match national.len() {
        0 => String::new(),
        1..=3 => format!("({national}"),
        4..=6 => format!("({}) {}", &national[..3], &national[3..]),
        _ => format!(
            "({}) {}-{}",
            &national[..3],
            &national[3..6],
            &national[6..]
        ),
    };

    format!("{prefix}{formatted}").trim_end().to_owned()
}

fn format_international(digits: &str) -> String {
    let (country_code, rest) = digits.split_at(digits.len().min(2));
    let (group, rest) = rest.split_at(rest.len().min(4));

    [country_code, group, rest]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
