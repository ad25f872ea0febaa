//! Numeral normalization for citation fields.
//!
//! Taiwanese legal text writes article and subsection numbers in three ways:
//! ASCII digits (`184`), full-width digits (`１８４`), and traditional CJK
//! numerals — either positional (`一百八十四`) or digit-by-digit (`一八四`).
//! Resolved citations carry Arabic digits only, so everything funnels through
//! [`normalize_number`]. Years and serial numbers are digit-only by grammar
//! and only need [`fold_digits`].

/// Fold full-width digits (`０`-`９`) to ASCII and drop interior whitespace.
pub(crate) fn fold_digits(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .collect()
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '零' | '○' => Some(0),
        '一' | '壹' => Some(1),
        '二' | '貳' => Some(2),
        '三' | '參' => Some(3),
        '四' | '肆' => Some(4),
        '五' | '伍' => Some(5),
        '六' | '陸' => Some(6),
        '七' | '柒' => Some(7),
        '八' | '捌' => Some(8),
        '九' | '玖' => Some(9),
        _ => None,
    }
}

fn unit_value(c: char) -> Option<u64> {
    match c {
        '十' | '拾' => Some(10),
        '百' | '佰' => Some(100),
        '千' | '仟' => Some(1000),
        '萬' => Some(10_000),
        _ => None,
    }
}

/// Parse a positional CJK numeral (`一百八十四` -> 184, `十一` -> 11,
/// `二萬三千` -> 23000). ASCII digits inside the run contribute positionally
/// too, so mixed forms like `3千` work.
fn parse_positional(s: &str) -> Option<u64> {
    let mut total: u64 = 0;
    let mut section: u64 = 0;
    let mut num: u64 = 0;
    let mut seen = false;

    for c in s.chars() {
        if let Some(d) = c.to_digit(10) {
            num = num.checked_mul(10)?.checked_add(u64::from(d))?;
            seen = true;
        } else if let Some(d) = digit_value(c) {
            num = num.checked_mul(10)?.checked_add(d)?;
            seen = true;
        } else if let Some(u) = unit_value(c) {
            seen = true;
            if u == 10_000 {
                total = total.checked_add(section.checked_add(num)?.checked_mul(u)?)?;
                section = 0;
            } else {
                // A bare unit counts as one of it: 十 = 10.
                let n = if num == 0 { 1 } else { num };
                section = section.checked_add(n.checked_mul(u)?)?;
            }
            num = 0;
        } else {
            return None;
        }
    }

    if !seen {
        return None;
    }
    total.checked_add(section)?.checked_add(num)
}

/// Normalize one numeric field to ASCII Arabic digits.
///
/// Full-width digits are folded, interior whitespace is dropped, and CJK
/// numerals are converted: runs containing a unit character parse
/// positionally, unit-less runs map digit-by-digit (`一八四` -> `184`). Input
/// that cannot be interpreted as a number is returned folded but otherwise
/// untouched, so an odd capture degrades to passthrough instead of data loss.
pub(crate) fn normalize_number(s: &str) -> String {
    let folded = fold_digits(s);
    if folded.chars().all(|c| c.is_ascii_digit()) {
        return folded;
    }

    if folded.chars().any(|c| unit_value(c).is_some()) {
        if let Some(n) = parse_positional(&folded) {
            return n.to_string();
        }
        return folded;
    }

    // Digit-by-digit run: every char must map cleanly.
    let mut out = String::with_capacity(folded.len());
    for c in folded.chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if let Some(d) = digit_value(c) {
            out.push(char::from(b'0' + d as u8));
        } else {
            return folded;
        }
    }
    out
}
