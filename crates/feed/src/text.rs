// ABOUTME: Text normalization for feed content fields.
// ABOUTME: clean_text is the single source of truth for "clean text" across channel and item fields.

/// Normalizes a raw feed field into clean plain text.
///
/// Steps, in order: unwrap a literal CDATA wrapper, strip markup tags,
/// decode HTML entities, collapse whitespace runs, trim. The same function
/// is applied to every channel and item text field so normalization cannot
/// drift between the two.
pub fn clean_text(s: &str) -> String {
    let unwrapped = unwrap_cdata(s);
    let stripped = strip_tags(unwrapped);
    let decoded = decode_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Removes a `<![CDATA[...]]>` wrapper when the whole value is wrapped in one.
/// A conformant XML parser already unwraps CDATA sections; this catches feeds
/// that ship the wrapper as literal text.
fn unwrap_cdata(s: &str) -> &str {
    let trimmed = s.trim();
    trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
        .unwrap_or(s)
}

/// Strips angle-bracketed markup, returning the text between tags.
fn strip_tags(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Decodes common named HTML entities and decimal/hex numeric entities.
pub fn decode_entities(s: &str) -> String {
    // `&amp;` is decoded last so that doubly-escaped input is not decoded twice.
    let entities = [
        ("&nbsp;", " "),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&apos;", "'"),
        ("&#39;", "'"),
        ("&ndash;", "\u{2013}"),
        ("&mdash;", "\u{2014}"),
        ("&lsquo;", "\u{2018}"),
        ("&rsquo;", "\u{2019}"),
        ("&ldquo;", "\u{201C}"),
        ("&rdquo;", "\u{201D}"),
        ("&hellip;", "\u{2026}"),
        ("&copy;", "©"),
        ("&reg;", "®"),
        ("&trade;", "™"),
        ("&amp;", "&"),
    ];

    let mut result = decode_numeric_entities(s);
    for (entity, replacement) in &entities {
        result = result.replace(entity, replacement);
    }

    result
}

/// Decodes numeric entities like `&#38;` and `&#x26;`, leaving anything
/// unparseable in place.
fn decode_numeric_entities(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '&' && chars.peek() == Some(&'#') {
            chars.next();
            let is_hex = matches!(chars.peek(), Some(&'x') | Some(&'X'));
            if is_hex {
                chars.next();
            }

            let mut digits = String::new();
            let mut terminated = false;
            while let Some(&nc) = chars.peek() {
                if nc == ';' {
                    chars.next();
                    terminated = true;
                    break;
                }
                let valid = if is_hex {
                    nc.is_ascii_hexdigit()
                } else {
                    nc.is_ascii_digit()
                };
                if !valid {
                    break;
                }
                digits.push(nc);
                chars.next();
            }

            if terminated && !digits.is_empty() {
                let code = if is_hex {
                    u32::from_str_radix(&digits, 16).ok()
                } else {
                    digits.parse::<u32>().ok()
                };
                if let Some(decoded) = code.and_then(char::from_u32) {
                    result.push(decoded);
                    continue;
                }
            }

            result.push('&');
            result.push('#');
            if is_hex {
                result.push('x');
            }
            result.push_str(&digits);
            if terminated {
                result.push(';');
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Collapses whitespace runs into single spaces and trims the ends.
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(c);
            last_was_space = false;
        }
    }

    result.trim().to_string()
}
