//! City carousel patching for the site's `index.html`.
//!
//! Cards and slides are located with regexes and delimited by balancing
//! `<div>`/`</div>` tags, so a card is always removed or inserted whole.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CITY_LINK: &str = "city-template.html?city=";
const SLIDE_OPEN: &str = r#"<div class="carousel-slide""#;
/// Opening tag of a slide, extra classes allowed (`carousel-slide active`).
const SLIDE_OPEN_PATTERN: &str = r#"<div\s+class="carousel-slide(?:\s[^"]*)?""#;
const INDENT_STEP: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCard {
    pub slug: String,
    pub name: String,
    pub tag: String,
    pub image: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl CityCard {
    /// Card markup, every line prefixed with `indent`, trailing newline included.
    pub fn render(&self, indent: &str) -> String {
        let i2 = format!("{indent}{INDENT_STEP}");
        let i3 = format!("{i2}{INDENT_STEP}");

        let mut out = String::new();
        out.push_str(&format!("{indent}<!-- {} -->\n", self.name));
        out.push_str(&format!(
            "{indent}<div class=\"city-card\" onclick=\"window.location.href='cities/{CITY_LINK}{}'\" style=\"cursor: pointer;\">\n",
            self.slug
        ));
        out.push_str(&format!(
            "{i2}<div class=\"city-header\" style=\"background-image: url('{}');\">\n",
            self.image
        ));
        out.push_str(&format!("{i3}<div class=\"city-name\">{}</div>\n", self.name));
        out.push_str(&format!("{i3}<div class=\"city-tag\">{}</div>\n", self.tag));
        out.push_str(&format!("{i2}</div>\n"));
        out.push_str(&format!("{i2}<div class=\"city-details\">\n"));
        for d in &self.details {
            out.push_str(&format!("{i3}<p>{d}</p>\n"));
        }
        out.push_str(&format!("{i2}</div>\n"));
        out.push_str(&format!("{indent}</div>\n"));
        out
    }
}

/// Which existing cards move into a new trailing slide and which new cards join them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselPlan {
    #[serde(default)]
    pub move_cards: Vec<String>,
    #[serde(default)]
    pub new_cards: Vec<CityCard>,
}

impl CarouselPlan {
    pub fn builtin() -> AppResult<Self> {
        Ok(serde_yaml::from_str(include_str!(
            "../../assets/carousel/sixth_slide.yml"
        ))?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Carousel(format!("invalid plan {}: {e}", path.display())))
    }

    /// Every slug the plan expects to find after it is applied.
    pub fn slugs(&self) -> Vec<&str> {
        self.move_cards
            .iter()
            .map(String::as_str)
            .chain(self.new_cards.iter().map(|c| c.slug.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// (slug, 1-based line the card started on when it was cut)
    pub moved: Vec<(String, usize)>,
    pub missing: Vec<String>,
    pub already_in_place: Vec<String>,
    pub added: Vec<String>,
    pub already_present: Vec<String>,
    /// 1-based line of the inserted `<!-- SLIDE -->` comment in the result.
    pub slide_line: Option<usize>,
    pub links_before: usize,
    pub links_after: usize,
    pub slides_before: usize,
    pub slides_after: usize,
    pub title: Option<(u32, u32)>,
    pub counter: Option<(u32, u32)>,
}

impl PatchReport {
    pub fn changed(&self) -> bool {
        self.slide_line.is_some() || self.title.is_some() || self.counter.is_some()
    }
}

pub fn count_city_links(html: &str) -> usize {
    html.matches(CITY_LINK).count()
}

pub fn count_slides(html: &str) -> AppResult<usize> {
    Ok(Regex::new(SLIDE_OPEN_PATTERN)?.find_iter(html).count())
}

pub fn has_card(html: &str, slug: &str) -> bool {
    html.contains(&format!("{CITY_LINK}{slug}'"))
}

fn line_of(html: &str, pos: usize) -> usize {
    html[..pos].matches('\n').count() + 1
}

fn line_start(html: &str, pos: usize) -> usize {
    html[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Byte offset just past the newline ending the line that contains `pos`.
fn line_end(html: &str, pos: usize) -> usize {
    html[pos..].find('\n').map_or(html.len(), |i| pos + i + 1)
}

fn indent_at(html: &str, pos: usize) -> String {
    html[line_start(html, pos)..pos]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// End offset of the `</div>` that closes the `<div` starting at `start`.
fn block_end(html: &str, start: usize) -> AppResult<usize> {
    let tags = Regex::new(r"<div\b|</div\s*>")?;
    let mut depth = 0usize;

    for m in tags.find_iter(&html[start..]) {
        if m.as_str().starts_with("</") {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Ok(start + m.end());
            }
        } else {
            depth += 1;
        }
    }

    Err(AppError::Carousel(format!(
        "unbalanced <div> starting at line {}",
        line_of(html, start)
    )))
}

/// Byte range of the card for `slug`, including its leading comment line,
/// indentation and trailing newline.
fn card_range(html: &str, slug: &str) -> AppResult<Option<(usize, usize)>> {
    let re = Regex::new(&format!(
        r#"(?m)^[ \t]*(?:<!--[^\n]*-->[ \t]*\r?\n[ \t]*)?(<div class="city-card"[^>]*{}{}')"#,
        regex::escape(CITY_LINK),
        regex::escape(slug)
    ))?;

    let Some(caps) = re.captures(html) else {
        return Ok(None);
    };
    let (Some(whole), Some(div)) = (caps.get(0), caps.get(1)) else {
        return Ok(None);
    };

    let end = block_end(html, div.start())?;
    Ok(Some((whole.start(), line_end(html, end))))
}

/// Slugs of the city cards linked inside `fragment`, in document order.
fn slide_slugs(fragment: &str) -> AppResult<Vec<String>> {
    let re = Regex::new(&format!(r"{}([A-Za-z0-9_-]+)'", regex::escape(CITY_LINK)))?;
    Ok(re
        .captures_iter(fragment)
        .map(|c| c[1].to_string())
        .collect())
}

/// Byte range `(open_tag_start, close_tag_end)` of the last carousel slide.
fn last_slide(html: &str) -> AppResult<Option<(usize, usize)>> {
    let Some(start) = Regex::new(SLIDE_OPEN_PATTERN)?
        .find_iter(html)
        .last()
        .map(|m| m.start())
    else {
        return Ok(None);
    };
    Ok(Some((start, block_end(html, start)?)))
}

/// Remove the card for `slug`; returns the new document and the removed block.
pub fn remove_card(html: &str, slug: &str) -> AppResult<Option<(String, String, usize)>> {
    let Some((start, end)) = card_range(html, slug)? else {
        return Ok(None);
    };

    let mut out = String::with_capacity(html.len());
    out.push_str(&html[..start]);
    out.push_str(&html[end..]);
    Ok(Some((out, html[start..end].to_string(), line_of(html, start))))
}

/// Append a new slide holding `cards` (already rendered) after the last slide.
/// Returns the document and the 1-based line of the inserted slide.
pub fn append_slide(html: &str, cards: &str) -> AppResult<(String, usize)> {
    let (start, end) = last_slide(html)?
        .ok_or_else(|| AppError::Carousel("no carousel-slide found".into()))?;

    let indent = indent_at(html, start);
    let at = line_end(html, end);

    let mut slide = String::new();
    slide.push_str(&format!("{indent}<!-- SLIDE -->\n"));
    slide.push_str(&format!("{indent}{SLIDE_OPEN}>\n"));
    slide.push_str(cards);
    slide.push_str(&format!("{indent}</div>\n"));

    let mut out = String::with_capacity(html.len() + slide.len());
    out.push_str(&html[..at]);
    if at == html.len() && !html.ends_with('\n') {
        out.push('\n');
    }
    let line = line_of(&out, out.len());
    out.push_str(&slide);
    out.push_str(&html[at..]);
    Ok((out, line))
}

/// Rewrite `Explore N ... Cities` in the section title. Returns the old count
/// when it differed.
pub fn update_title(html: &str, count: usize) -> AppResult<(String, Option<u32>)> {
    let re = Regex::new(r#"(<h2 class="section-title">Explore )(\d+)( [^<]*Cities</h2>)"#)?;
    let Some(caps) = re.captures(html) else {
        return Ok((html.to_string(), None));
    };

    let old: u32 = caps[2].parse().unwrap_or(0);
    if old as usize == count {
        return Ok((html.to_string(), None));
    }

    let replaced = re.replacen(html, 1, format!("${{1}}{count}${{3}}"));
    Ok((replaced.into_owned(), Some(old)))
}

/// Rewrite the `current / total</div>` slide counter. Returns the old total
/// when it differed.
pub fn update_counter(html: &str, total: usize) -> AppResult<(String, Option<u32>)> {
    let re = Regex::new(r"(\d+) / (\d+)</div>")?;
    let Some(caps) = re.captures(html) else {
        return Ok((html.to_string(), None));
    };

    let old: u32 = caps[2].parse().unwrap_or(0);
    if old as usize == total {
        return Ok((html.to_string(), None));
    }

    let replaced = re.replacen(html, 1, format!("${{1}} / {total}</div>"));
    Ok((replaced.into_owned(), Some(old)))
}

/// Apply `plan` to the document. Re-applying a plan is a no-op: moved cards
/// already sitting in the last slide stay put and present cards are not re-added.
pub fn apply_plan(html: &str, plan: &CarouselPlan) -> AppResult<(String, PatchReport)> {
    let mut report = PatchReport {
        links_before: count_city_links(html),
        slides_before: count_slides(html)?,
        ..Default::default()
    };

    // The trailing slide already holds nothing but plan cards: moves are done.
    let plan_slugs = plan.slugs();
    let in_place: Vec<String> = match last_slide(html)? {
        Some((start, end)) => {
            let slugs = slide_slugs(&html[start..end])?;
            if !slugs.is_empty() && slugs.iter().all(|s| plan_slugs.contains(&s.as_str())) {
                slugs
            } else {
                Vec::new()
            }
        }
        None => Vec::new(),
    };

    let mut doc = html.to_string();
    let mut blocks = String::new();

    for slug in &plan.move_cards {
        if in_place.contains(slug) {
            report.already_in_place.push(slug.clone());
            continue;
        }
        if let Some((next, block, line)) = remove_card(&doc, slug)? {
            doc = next;
            blocks.push_str(&block);
            report.moved.push((slug.clone(), line));
        } else {
            report.missing.push(slug.clone());
        }
    }

    let card_indent = match last_slide(&doc)? {
        Some((start, _)) => format!("{}{INDENT_STEP}", indent_at(&doc, start)),
        None => return Err(AppError::Carousel("no carousel-slide found".into())),
    };

    for card in &plan.new_cards {
        if has_card(&doc, &card.slug) || has_card(&blocks, &card.slug) {
            report.already_present.push(card.slug.clone());
        } else {
            blocks.push_str(&card.render(&card_indent));
            report.added.push(card.slug.clone());
        }
    }

    if !blocks.is_empty() {
        let (next, line) = append_slide(&doc, &blocks)?;
        doc = next;
        report.slide_line = Some(line);
    }

    report.links_after = count_city_links(&doc);
    report.slides_after = count_slides(&doc)?;

    let (next, old_title) = update_title(&doc, report.links_after)?;
    doc = next;
    report.title = old_title.map(|old| (old, report.links_after as u32));

    let (next, old_total) = update_counter(&doc, report.slides_after)?;
    doc = next;
    report.counter = old_total.map(|old| (old, report.slides_after as u32));

    Ok((doc, report))
}

/// One verification line: whether it holds and what was checked.
pub type Check = (bool, String);

/// Consistency checks of a document against a plan.
pub fn verify(html: &str, plan: &CarouselPlan) -> AppResult<Vec<Check>> {
    let links = count_city_links(html);
    let slides = count_slides(html)?;
    let mut checks = Vec::new();

    let title = Regex::new(r"Explore (\d+) [^<]*Cities")?;
    let title_count = title
        .captures(html)
        .and_then(|c| c[1].parse::<usize>().ok());
    checks.push((
        title_count == Some(links),
        format!(
            "Title count {} matches {links} city links",
            title_count.map_or("missing".to_string(), |n| n.to_string())
        ),
    ));

    let counter = Regex::new(r"\d+ / (\d+)</div>")?;
    let counter_total = counter
        .captures(html)
        .and_then(|c| c[1].parse::<usize>().ok());
    checks.push((
        counter_total == Some(slides),
        format!(
            "Slide counter total {} matches {slides} slides",
            counter_total.map_or("missing".to_string(), |n| n.to_string())
        ),
    ));

    for slug in plan.slugs() {
        checks.push((has_card(html, slug), format!("City '{slug}' present")));
    }

    Ok(checks)
}
