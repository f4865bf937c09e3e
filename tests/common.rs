#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};

pub fn tk() -> Command {
    cargo_bin_cmd!("travelkit")
}

/// Write a config pointing the website at `site` and the ideas table at the
/// local SQLite database. Returns the config path.
pub fn write_config(dir: &Path, site: &Path) -> PathBuf {
    let path = dir.join("travelkit.conf");
    let yaml = format!(
        "website_dir: \"{}\"\n\
         local_db: \"{}\"\n\
         ideas:\n  backend: sqlite\n\
         silver:\n  csv: data/silver_prices.csv\n",
        site.display(),
        dir.join("travelkit.sqlite").display()
    );
    fs::write(&path, yaml).expect("write config");
    path
}

fn card(slug: &str, name: &str, indent: &str) -> String {
    format!(
        "{indent}<!-- {name} -->\n\
         {indent}<div class=\"city-card\" onclick=\"window.location.href='cities/city-template.html?city={slug}'\" style=\"cursor: pointer;\">\n\
         {indent}    <div class=\"city-header\" style=\"background-image: url('images/{slug}.jpg');\">\n\
         {indent}        <div class=\"city-name\">{name}</div>\n\
         {indent}    </div>\n\
         {indent}</div>\n"
    )
}

/// Two slides, three cities; Kaifeng sits in the last slide.
pub fn sample_index() -> String {
    let mut html = String::new();
    html.push_str("<html>\n<body>\n");
    html.push_str("    <h2 class=\"section-title\">Explore 3 Chinese Cities</h2>\n");
    html.push_str("    <div class=\"carousel-track\">\n");
    html.push_str("        <!-- SLIDE -->\n");
    html.push_str("        <div class=\"carousel-slide\">\n");
    html.push_str(&card("beijing", "Beijing", "            "));
    html.push_str("        </div>\n");
    html.push_str("        <!-- SLIDE -->\n");
    html.push_str("        <div class=\"carousel-slide\">\n");
    html.push_str(&card("shanghai", "Shanghai", "            "));
    html.push_str(&card("kaifeng", "Kaifeng", "            "));
    html.push_str("        </div>\n");
    html.push_str("    </div>\n");
    html.push_str("    <div class=\"carousel-counter\">1 / 2</div>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// Saved page text the way the quote page renders it.
pub const SAMPLE_QUOTE: &str = "Silver Price Today\nBid\n### 85.03\nAsk\n### 85.33\n";
