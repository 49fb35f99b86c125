//! Terminal rendering of an [`AnalysisOutcome`].
//!
//! The narrative is Markdown-ish text from the model. Lines are classified one
//! at a time; there is no multi-line Markdown parsing.

use colored::{ColoredString, Colorize};
use localbench_core::{AnalysisOutcome, CompetitorRecord, RatingBand};

const LABEL_MAX_CHARS: usize = 15;
const BAR_WIDTH: usize = 30;
const MAX_RATING: f64 = 5.0;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Block<'a> {
    Heading(String),
    ListItem(&'a str),
    Emphasis(String),
    Paragraph(Vec<Span<'a>>),
    Break,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Span<'a> {
    Plain(&'a str),
    Bold(&'a str),
}

pub(crate) fn classify_line(line: &str) -> Block<'_> {
    if line.starts_with("## ") || line.starts_with("### ") {
        return Block::Heading(line.replace('#', "").trim().to_string());
    }
    if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Block::ListItem(item);
    }
    if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
        return Block::Emphasis(line.replace("**", ""));
    }
    if line.trim().is_empty() {
        return Block::Break;
    }
    Block::Paragraph(bold_spans(line))
}

/// Splits `line` on `**bold**` pairs. An unmatched `**` stays plain text.
pub(crate) fn bold_spans(line: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };
        if open > 0 {
            spans.push(Span::Plain(&rest[..open]));
        }
        spans.push(Span::Bold(&after_open[..close]));
        rest = &after_open[close + 2..];
    }

    if !rest.is_empty() {
        spans.push(Span::Plain(rest));
    }
    spans
}

/// Competitor name as shown on the chart axis.
pub(crate) fn chart_label(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let head: String = name.chars().take(LABEL_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar_len(rating: f64) -> usize {
    let scaled = (rating.clamp(0.0, MAX_RATING) / MAX_RATING) * BAR_WIDTH as f64;
    (scaled.round() as usize).max(1)
}

fn paint(text: &str, band: RatingBand) -> ColoredString {
    match band {
        RatingBand::Top => text.green(),
        RatingBand::Strong => text.blue(),
        RatingBand::Average => text.yellow(),
    }
}

pub(crate) fn chart_line(record: &CompetitorRecord) -> String {
    let band = RatingBand::for_rating(record.rating);
    let bar = "█".repeat(bar_len(record.rating));
    format!(
        "{:<18} {} {:.1} ({} reviews)",
        chart_label(&record.name),
        paint(&bar, band),
        record.rating,
        record.reviews
    )
}

fn print_narrative(narrative: &str) {
    for line in narrative.lines() {
        match classify_line(line) {
            Block::Heading(text) => {
                println!();
                println!("{}", text.as_str().blue().bold());
            }
            Block::ListItem(item) => println!("  {} {item}", "•".yellow()),
            Block::Emphasis(text) => println!("{}", text.as_str().bold()),
            Block::Break => println!(),
            Block::Paragraph(spans) => {
                let rendered: String = spans
                    .iter()
                    .map(|span| match span {
                        Span::Plain(text) => (*text).to_string(),
                        Span::Bold(text) => text.blue().bold().to_string(),
                    })
                    .collect();
                println!("{rendered}");
            }
        }
    }
}

fn print_chart(outcome: &AnalysisOutcome) {
    println!();
    println!("{}", "Rating comparison (0-5)".bold());

    let charted = outcome.charted_competitors();
    if charted.is_empty() {
        println!(
            "{}",
            "No numeric rating data available to chart.".dimmed()
        );
    } else {
        for record in charted {
            println!("  {}", chart_line(record));
        }
    }

    println!();
    println!(
        "{} competitor(s) identified",
        outcome.competitors().len().to_string().bold()
    );
}

fn print_places(outcome: &AnalysisOutcome) {
    let places: Vec<_> = outcome.map_references().collect();
    if places.is_empty() {
        return;
    }

    println!();
    println!("{}", "Places found".bold());
    for place in places {
        let title = if place.title().trim().is_empty() {
            "Map location"
        } else {
            place.title()
        };
        println!("  {} {}", title, place.uri().dimmed());
    }
}

pub(crate) fn print_report(outcome: &AnalysisOutcome) {
    print_narrative(outcome.narrative());
    print_chart(outcome);
    print_places(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_drop_every_hash() {
        assert_eq!(
            classify_line("## Market overview"),
            Block::Heading("Market overview".to_string())
        );
        assert_eq!(
            classify_line("### Gaps #1"),
            Block::Heading("Gaps 1".to_string())
        );
    }

    #[test]
    fn single_hash_is_a_paragraph() {
        assert_eq!(
            classify_line("# Title"),
            Block::Paragraph(vec![Span::Plain("# Title")])
        );
    }

    #[test]
    fn list_items_accept_dash_and_star() {
        assert_eq!(classify_line("- fresh bread"), Block::ListItem("fresh bread"));
        assert_eq!(classify_line("* delivery"), Block::ListItem("delivery"));
    }

    #[test]
    fn standalone_bold_line_is_emphasis() {
        assert_eq!(
            classify_line("**Opportunities**"),
            Block::Emphasis("Opportunities".to_string())
        );
    }

    #[test]
    fn bare_double_star_is_not_emphasis() {
        assert_eq!(classify_line("**"), Block::Paragraph(vec![Span::Plain("**")]));
    }

    #[test]
    fn blank_lines_are_breaks() {
        assert_eq!(classify_line(""), Block::Break);
        assert_eq!(classify_line("   "), Block::Break);
    }

    #[test]
    fn paragraph_splits_inline_bold() {
        assert_eq!(
            bold_spans("Rated **4.7** by **1204** people"),
            vec![
                Span::Plain("Rated "),
                Span::Bold("4.7"),
                Span::Plain(" by "),
                Span::Bold("1204"),
                Span::Plain(" people"),
            ]
        );
    }

    #[test]
    fn unmatched_bold_marker_stays_plain() {
        assert_eq!(
            bold_spans("half **open"),
            vec![Span::Plain("half **open")]
        );
    }

    #[test]
    fn chart_label_truncates_long_names_by_char() {
        assert_eq!(chart_label("Pão Quente"), "Pão Quente");
        assert_eq!(chart_label("Exactly15Chars!"), "Exactly15Chars!");
        assert_eq!(
            chart_label("Padaria e Confeitaria São João"),
            "Padaria e Confe..."
        );
    }

    #[test]
    fn bar_scales_with_rating() {
        assert_eq!(bar_len(5.0), BAR_WIDTH);
        assert_eq!(bar_len(2.5), BAR_WIDTH / 2);
        assert_eq!(bar_len(0.01), 1);
        assert_eq!(bar_len(9.0), BAR_WIDTH);
    }

    #[test]
    fn chart_line_shows_label_rating_and_reviews() {
        colored::control::set_override(false);
        let line = chart_line(&CompetitorRecord {
            name: "Padaria e Confeitaria São João".to_string(),
            rating: 4.3,
            reviews: 88,
        });
        assert!(line.starts_with("Padaria e Confe..."), "line: {line}");
        assert!(line.ends_with("4.3 (88 reviews)"), "line: {line}");
    }
}
