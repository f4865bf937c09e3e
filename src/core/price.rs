//! Silver price extraction: ordered regex cascades, first hit wins.

use crate::errors::AppResult;
use regex::{Regex, RegexBuilder};

const GRAMS_PER_OUNCE: f64 = 28.3495;
const KILOS_PER_OUNCE: f64 = 0.0311035;

/// Which rule set to run over the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cascade {
    /// Fetched page (raw HTML or markup-stripped text).
    Page,
    /// Saved page text, one quote field per line (`Bid` / `### 85.03`).
    Text,
}

/// Unit the matched number was quoted in; converted to USD per troy ounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Ounce,
    Gram,
    Kilo,
}

impl Unit {
    fn to_ounce(self, value: f64) -> f64 {
        match self {
            Unit::Ounce => value,
            Unit::Gram => value * GRAMS_PER_OUNCE,
            Unit::Kilo => value * KILOS_PER_OUNCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: f64,
    /// Short name of the rule that matched, for diagnostics.
    pub rule: &'static str,
}

struct Rule {
    name: &'static str,
    re: Regex,
    unit: Unit,
}

pub struct PriceExtractor {
    page_rules: Vec<Rule>,
    page_fallback: Regex,
    text_decimal: Regex,
    text_dollar: Regex,
    text_units: Vec<Rule>,
}

fn rule(name: &'static str, pattern: &str, unit: Unit, ci: bool) -> AppResult<Rule> {
    let re = RegexBuilder::new(pattern).case_insensitive(ci).build()?;
    Ok(Rule { name, re, unit })
}

fn number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse().ok()
}

impl PriceExtractor {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            page_rules: vec![
                rule("bid", r"Bid\s*[\n\s]*\$?(\d+\.\d+)", Unit::Ounce, true)?,
                rule("ounce", r"ounce(\d+\.\d+)", Unit::Ounce, true)?,
                rule("gram", r"gram(\d+\.\d+)", Unit::Gram, true)?,
                rule("kilo", r"Kilo([\d,]+\.\d+)", Unit::Kilo, true)?,
                rule("usd-oz", r"\$(\d+\.\d+)\s*USD.*oz", Unit::Ounce, true)?,
                rule("usd-ounce", r"(\d+\.\d+)\s*USD.*ounce", Unit::Ounce, true)?,
            ],
            page_fallback: Regex::new(r"\b(\d+\.\d+)\b")?,
            text_decimal: Regex::new(r"(\d+\.\d+)")?,
            text_dollar: Regex::new(r"\$?(\d+\.\d+)")?,
            text_units: vec![
                rule("ounce", r"ounce(\d+\.\d+)", Unit::Ounce, false)?,
                rule("gram", r"gram(\d+\.\d+)", Unit::Gram, false)?,
                rule("kilo", r"Kilo([\d,]+\.\d+)", Unit::Kilo, false)?,
            ],
        })
    }

    pub fn extract(&self, content: &str, cascade: Cascade) -> Option<Quote> {
        let quote = match cascade {
            Cascade::Page => self.extract_page(content),
            Cascade::Text => self.extract_text(content),
        };
        tracing::debug!(?cascade, ?quote, "price extraction");
        quote
    }

    fn first_rule(rules: &[Rule], content: &str) -> Option<Quote> {
        rules.iter().find_map(|r| {
            let caps = r.re.captures(content)?;
            let value = number(caps.get(1)?.as_str())?;
            Some(Quote {
                price: r.unit.to_ounce(value),
                rule: r.name,
            })
        })
    }

    fn extract_page(&self, content: &str) -> Option<Quote> {
        if let Some(q) = Self::first_rule(&self.page_rules, content) {
            return Some(q);
        }

        self.page_fallback
            .captures_iter(content)
            .filter_map(|c| number(c.get(1)?.as_str()))
            .find(|p| *p > 50.0 && *p < 150.0)
            .map(|price| Quote {
                price,
                rule: "range-50-150",
            })
    }

    fn extract_text(&self, content: &str) -> Option<Quote> {
        let lines: Vec<&str> = content.split('\n').collect();

        // A `Bid` label followed within three lines by the quote itself.
        for (i, line) in lines.iter().enumerate() {
            if !line.contains("Bid") || i + 2 >= lines.len() {
                continue;
            }
            for next in lines.iter().skip(i + 1).take(3) {
                if let Some(c) = self.text_decimal.captures(next.trim())
                    && let Some(price) = c.get(1).and_then(|m| number(m.as_str()))
                {
                    return Some(Quote { price, rule: "bid-line" });
                }
            }
        }

        let in_range = self
            .text_dollar
            .captures_iter(content)
            .filter_map(|c| number(c.get(1)?.as_str()))
            .find(|p| *p > 10.0 && *p < 200.0);
        if let Some(price) = in_range {
            return Some(Quote {
                price,
                rule: "range-10-200",
            });
        }

        Self::first_rule(&self.text_units, content)
    }
}

/// Reduce an HTML page to its visible text, concatenating adjacent elements
/// the way a DOM `text` accessor does (`ounce</td><td>85.03` → `ounce85.03`).
pub fn strip_markup(html: &str) -> AppResult<String> {
    let blocks = Regex::new(r"(?is)<(script|style)\b.*?</(script|style)\s*>")?;
    let tags = Regex::new(r"(?s)<[^>]*>")?;

    let without_blocks = blocks.replace_all(html, "");
    let text = tags.replace_all(&without_blocks, "");

    decode_entities(&text)
}

/// Decode numeric character references (`&#36;`, `&#x24;`) and the named
/// entities that show up around quotes. `&amp;` goes last so `&amp;#36;`
/// stays literal text.
fn decode_entities(text: &str) -> AppResult<String> {
    let numeric = Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));")?;

    let decoded = numeric.replace_all(text, |c: &regex::Captures| {
        let code = match (c.get(1), c.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            _ => None,
        };
        match code.and_then(char::from_u32) {
            Some(ch) => ch.to_string(),
            None => c[0].to_string(),
        }
    });

    Ok(decoded
        .replace("&nbsp;", " ")
        .replace("&dollar;", "$")
        .replace("&amp;", "&"))
}
