use std::fmt::Write as _;

use crate::models::{DayPlan, ErrorNotice, Itinerary};
use crate::phrasebook::{fill, phrasebook};

/// HTML fragment in the shape the travel form's stylesheet expects.
pub fn render_html(itinerary: &Itinerary) -> String {
    let header = &itinerary.header;
    let mut out = String::new();

    out.push_str("<div class=\"recommendation-header\">\n");
    let _ = writeln!(out, "  <h2>🌟 {}</h2>", escape_html(&header.title));
    out.push_str("  <div class=\"trip-info\">\n");
    for (icon, label) in [
        ("👥", &header.party_label),
        ("🎯", &header.styles_label),
        ("💰", &header.budget_label),
        ("👤", &header.traveler_label),
    ] {
        let _ = writeln!(
            out,
            "    <span class=\"info-tag\">{icon} {}</span>",
            escape_html(label)
        );
    }
    out.push_str("  </div>\n</div>\n");

    for day in &itinerary.days {
        out.push_str("<div class=\"day-plan\">\n");
        let _ = writeln!(out, "  <h3>{}</h3>", escape_html(&day_heading(itinerary, day)));
        out.push_str("  <div class=\"day-content\">\n");
        for entry in &day.entries {
            out.push_str("    <div class=\"time-slot\">\n");
            let _ = writeln!(out, "      <div class=\"time\">{}</div>", escape_html(&entry.time));
            out.push_str("      <div class=\"activity\">\n");
            let _ = writeln!(out, "        <strong>{}</strong>", escape_html(&entry.title));
            let _ = writeln!(out, "        <p>{}</p>", escape_html(&entry.description));
            out.push_str("      </div>\n    </div>\n");
        }
        out.push_str("  </div>\n</div>\n");
    }

    out.push_str("<div class=\"travel-tips\">\n");
    let _ = writeln!(out, "  <h3>💡 {}</h3>", escape_html(&itinerary.tips.heading));
    out.push_str("  <ul class=\"tips-list\">\n");
    for tip in itinerary.tips.iter() {
        let _ = writeln!(out, "    <li>{}</li>", escape_html(tip));
    }
    out.push_str("  </ul>\n</div>\n");

    out
}

pub fn render_error_html(notice: &ErrorNotice) -> String {
    format!(
        "<div class=\"error-message\">\n  <h3>❌ {}</h3>\n  <p>{}</p>\n  <button onclick=\"location.reload()\" class=\"retry-btn\">{}</button>\n</div>\n",
        escape_html(&notice.title),
        escape_html(&notice.message),
        escape_html(&notice.retry_label),
    )
}

/// Markdown-flavoured text for terminals.
pub fn render_text(itinerary: &Itinerary) -> String {
    let header = &itinerary.header;
    let mut out = String::new();

    let _ = writeln!(out, "# {}", header.title);
    let _ = writeln!(
        out,
        "{} | {} | {} | {}",
        header.party_label, header.styles_label, header.budget_label, header.traveler_label
    );

    for day in &itinerary.days {
        let _ = writeln!(out, "\n## {}", day_heading(itinerary, day));
        for entry in &day.entries {
            let _ = writeln!(out, "- {} **{}**: {}", entry.time, entry.title, entry.description);
        }
    }

    let _ = writeln!(out, "\n## {}", itinerary.tips.heading);
    for tip in itinerary.tips.iter() {
        let _ = writeln!(out, "- {tip}");
    }

    out
}

fn day_heading(itinerary: &Itinerary, day: &DayPlan) -> String {
    fill(
        phrasebook(itinerary.locale).day_heading,
        "{day}",
        &day.day.to_string(),
    )
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
