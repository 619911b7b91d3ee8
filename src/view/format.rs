/// Longest title shown in a result row before it is shortened.
pub const TITLE_LIMIT: usize = 17;

const MAX_DENOMINATOR: u32 = 16;
const FRACTION_TOLERANCE: f64 = 0.01;
/// Smallest magnitude printed, so a non-zero count never shows as `0`.
const MIN_SHOWN: f64 = 0.01;

/// Shorten a title on word boundaries, appending ` ...` when anything was cut.
/// Once a word does not fit, no later word is taken either.
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }
    let mut taken = Vec::new();
    let mut acc = 0;
    for word in title.split(' ') {
        let len = word.chars().count();
        if acc + len <= limit {
            taken.push(word);
        }
        acc += len;
    }
    format!("{} ...", taken.join(" "))
}

fn closest_fraction(value: f64) -> Option<(u32, u32)> {
    let mut best: Option<(u32, u32, f64)> = None;
    for denominator in 2..=MAX_DENOMINATOR {
        let numerator = (value * f64::from(denominator)).round();
        if numerator < 1.0 || numerator >= f64::from(denominator) {
            continue;
        }
        let err = (value - numerator / f64::from(denominator)).abs();
        if best.is_none_or(|(_, _, best_err)| err < best_err - 1e-12) {
            best = Some((numerator as u32, denominator, err));
        }
    }
    best.filter(|(_, _, err)| *err <= FRACTION_TOLERANCE)
        .map(|(n, d, _)| (n, d))
}

/// Human-friendly quantity: `2`, `1/2`, `1 1/3`. Missing or zero counts
/// print as `?`.
pub fn format_count(count: Option<f64>) -> String {
    let Some(count) = count.filter(|c| *c != 0.0 && c.is_finite()) else {
        return "?".to_string();
    };
    if count.abs() < MIN_SHOWN {
        let sign = if count < 0.0 { "-" } else { "" };
        return format!("{sign}{MIN_SHOWN}");
    }
    let rounded = (count * 10_000.0).round() / 10_000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let fraction = magnitude - whole;

    if fraction < 1e-9 {
        return format!("{sign}{}", whole as u64);
    }
    match closest_fraction(fraction) {
        Some((n, d)) if whole == 0.0 => format!("{sign}{n}/{d}"),
        Some((n, d)) => format!("{sign}{} {n}/{d}", whole as u64),
        None => {
            let text = format!("{magnitude:.2}");
            format!("{sign}{}", text.trim_end_matches('0').trim_end_matches('.'))
        }
    }
}
