use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{AppError, AppResult};
use crate::types::Ingredient;

/// Units recognised after long names have been shortened.
const UNITS: [&str; 7] = ["tbsp", "oz", "tsp", "cup", "pound", "kg", "g"];

static LONG_UNITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(tablespoons?|ounces?|teaspoons?|cups|pounds)\b").expect("unit pattern")
});

static PARENTHESES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *\([^)]*\) *").expect("parentheses pattern"));

fn short_unit(long: &str) -> &'static str {
    match long {
        "tablespoons" | "tablespoon" => "tbsp",
        "ounces" | "ounce" => "oz",
        "teaspoons" | "teaspoon" => "tsp",
        "cups" => "cup",
        _ => "pound",
    }
}

/// Parse a single quantity token: `3`, `1.5`, `1/2` or `1-1/2` (one and a half).
/// A range such as `2-3` yields its lower bound.
pub fn parse_quantity(token: &str) -> Option<f64> {
    if let Some((whole, rest)) = token.split_once('-') {
        if !rest.contains('/') {
            return parse_quantity(whole);
        }
        return Some(parse_quantity(whole)? + parse_quantity(rest)?);
    }
    if let Some((numerator, denominator)) = token.split_once('/') {
        let numerator: f64 = numerator.parse().ok()?;
        let denominator: f64 = denominator.parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Turn a raw ingredient line such as `"1 1/2 cups (350 ml) warm water"` into
/// `{count: 1.5, unit: "cup", ingredient: "warm water"}`.
pub fn parse_ingredient(line: &str) -> AppResult<Ingredient> {
    let lowered = line.to_lowercase();
    let shortened = LONG_UNITS.replace_all(&lowered, |caps: &Captures| short_unit(&caps[1]));
    let cleaned = PARENTHESES.replace_all(&shortened, " ");
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    if let Some(unit_index) = words.iter().position(|w| UNITS.contains(w)) {
        let count = match &words[..unit_index] {
            [] => None,
            tokens => {
                let mut total = 0.0;
                for token in tokens {
                    total += parse_quantity(token).ok_or_else(|| AppError::Ingredient {
                        line: line.to_string(),
                        reason: format!("'{token}' is not a quantity"),
                    })?;
                }
                Some(total)
            }
        };
        return Ok(Ingredient {
            count,
            unit: words[unit_index].to_string(),
            ingredient: words[unit_index + 1..].join(" "),
        });
    }

    if let Some(count) = words
        .first()
        .and_then(|w| parse_quantity(w))
        .filter(|c| *c != 0.0)
    {
        return Ok(Ingredient {
            count: Some(count),
            unit: String::new(),
            ingredient: words[1..].join(" "),
        });
    }

    Ok(Ingredient {
        count: Some(1.0),
        unit: String::new(),
        ingredient: words.join(" "),
    })
}

pub fn parse_ingredients(lines: &[String]) -> AppResult<Vec<Ingredient>> {
    lines.iter().map(|line| parse_ingredient(line)).collect()
}
