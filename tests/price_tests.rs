use travelkit::core::price::{Cascade, PriceExtractor, strip_markup};

fn extractor() -> PriceExtractor {
    PriceExtractor::new().expect("rules compile")
}

#[test]
fn test_page_bid_wins() {
    let q = extractor()
        .extract("Silver Bid\n $31.25 per ounce32.50", Cascade::Page)
        .expect("quote");
    assert_eq!(q.price, 31.25);
    assert_eq!(q.rule, "bid");
}

#[test]
fn test_page_ounce_rule() {
    let q = extractor()
        .extract("Price per ounce85.03 gram2.73", Cascade::Page)
        .expect("quote");
    assert_eq!(q.price, 85.03);
    assert_eq!(q.rule, "ounce");
}

#[test]
fn test_page_gram_converted_to_ounce() {
    let q = extractor().extract("gram3.00", Cascade::Page).expect("quote");
    assert!((q.price - 85.0485).abs() < 1e-9);
    assert_eq!(q.rule, "gram");
}

#[test]
fn test_page_kilo_with_thousands_separator() {
    let q = extractor()
        .extract("Kilo2,734.00", Cascade::Page)
        .expect("quote");
    assert!((q.price - 2734.0 * 0.0311035).abs() < 1e-9);
}

#[test]
fn test_page_fallback_range() {
    let q = extractor()
        .extract("change 1.25 today 84.10 volume 300.00", Cascade::Page)
        .expect("quote");
    assert_eq!(q.price, 84.10);
    assert_eq!(q.rule, "range-50-150");
}

#[test]
fn test_page_nothing_plausible() {
    assert!(extractor().extract("1.25 and 300.00", Cascade::Page).is_none());
}

#[test]
fn test_text_bid_line() {
    let q = extractor()
        .extract("Silver\nBid\n### 85.03\nAsk\n", Cascade::Text)
        .expect("quote");
    assert_eq!(q.price, 85.03);
    assert_eq!(q.rule, "bid-line");
}

#[test]
fn test_text_bid_too_close_to_end_falls_through() {
    // `Bid` on the second to last line is not trusted; the range rule takes over.
    let q = extractor()
        .extract("$5.00 then 42.50\nBid\n99.99", Cascade::Text)
        .expect("quote");
    assert_eq!(q.price, 42.50);
    assert_eq!(q.rule, "range-10-200");
}

#[test]
fn test_text_units_are_case_sensitive() {
    let q = extractor().extract("Kilo2,700.00", Cascade::Text).expect("quote");
    assert_eq!(q.rule, "kilo");
    assert!(extractor().extract("kilo2700.00", Cascade::Text).is_none());
}

#[test]
fn test_strip_markup_joins_cells() {
    let html = "<html><head><script>var x = 99.99;</script><style>p{}</style></head>\
                <body><td>ounce</td><td>85.03</td><p>&#36;1&nbsp;&amp;</p></body></html>";
    let text = strip_markup(html).expect("strip");
    assert!(text.contains("ounce85.03"));
    assert!(text.contains("$1 &"));
    assert!(!text.contains("99.99"));
}

#[test]
fn test_strip_markup_decodes_numeric_entities() {
    let html = "<td>Bid</td><td>&#x24;85&#46;03</td><span>&#X41;&#65;</span>";
    let text = strip_markup(html).expect("strip");
    assert!(text.contains("Bid$85.03"));
    assert!(text.contains("AA"));

    let q = extractor().extract(&text, Cascade::Page).expect("quote");
    assert_eq!(q.price, 85.03);
    assert_eq!(q.rule, "bid");
}

#[test]
fn test_strip_markup_keeps_escaped_ampersand_literal() {
    let text = strip_markup("&amp;#36;5 &#1114112;").expect("strip");
    assert_eq!(text, "&#36;5 &#1114112;");
}
