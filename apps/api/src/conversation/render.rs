//! HTML for the output boundary.
//!
//! Plain coach and user text goes through `text_to_html` (escaping, `**bold**`,
//! line breaks). Structured content (analysis, recommendations, action plan,
//! summary) is built here as a finished fragment and shown as-is.

use std::fmt::Write;

use crate::catalog::{ActionPlan, AnalysisText, Recommendation, SummaryText};
use crate::conversation::selector::{Analysis, Summary};

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders multi-line plain text: every line is escaped and its `**x**` pairs become
/// `<strong>x</strong>`; a blank line becomes `<br>`; lines are joined with `<br>`.
pub fn text_to_html(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                "<br>".to_string()
            } else {
                emphasize(&escape_html(line))
            }
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Replaces each `**...**` pair (shortest match, left to right) with `<strong>`.
/// An unpaired `**` is left alone.
fn emphasize(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str("<strong>");
        out.push_str(&after_open[..close]);
        out.push_str("</strong>");
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Intro line followed by a structured fragment.
pub fn with_intro(intro: &str, fragment: &str) -> String {
    if intro.trim().is_empty() {
        return fragment.to_string();
    }
    format!("<p>{}</p>{}", escape_html(intro), fragment)
}

fn section(out: &mut String, label: &str, body: &str) {
    let _ = write!(
        out,
        r#"<div class="recommendation-section"><strong>{}</strong> {}</div>"#,
        escape_html(label),
        body
    );
}

pub fn analysis_html(text: &AnalysisText, analysis: &Analysis) -> String {
    let mut out = String::from(r#"<div class="analysis-section">"#);
    let _ = write!(out, "<h4>{}</h4>", escape_html(&text.heading));
    section(
        &mut out,
        "Your core drivers:",
        &escape_html(&analysis.core_drivers.join(", ")),
    );
    section(
        &mut out,
        "Your natural strengths:",
        &escape_html(&analysis.strengths.join(", ")),
    );
    section(
        &mut out,
        "Your ideal environment:",
        &escape_html(&text.ideal_environment),
    );
    section(
        &mut out,
        "Growth opportunities:",
        &escape_html(&text.growth_opportunities),
    );
    out.push_str("</div>");
    out
}

pub fn recommendations_html(recommendations: &[Recommendation]) -> String {
    let mut out = String::new();
    for (idx, rec) in recommendations.iter().enumerate() {
        out.push_str(r#"<div class="career-recommendation">"#);
        let _ = write!(
            out,
            "<h4>Career Option {}: {}</h4>",
            idx + 1,
            escape_html(&rec.title)
        );
        section(&mut out, "Perfect fit because:", &escape_html(&rec.fit_reason));
        section(&mut out, "What you'd do:", &escape_html(&rec.responsibilities));
        section(&mut out, "Skills you have:", &escape_html(&rec.current_skills));
        section(
            &mut out,
            "Skills to develop:",
            &escape_html(&rec.skills_to_develop),
        );
        section(&mut out, "Growth path:", &escape_html(&rec.growth_path));
        section(
            &mut out,
            "Potential challenges:",
            &escape_html(&rec.challenges),
        );
        out.push_str("</div>");
    }
    out
}

pub fn action_plan_html(plan: &ActionPlan) -> String {
    let mut out = String::from(r#"<div class="action-plan">"#);
    let _ = write!(out, "<h4>{}</h4>", escape_html(&plan.heading));
    for timeline in &plan.timelines {
        let _ = write!(
            out,
            r#"<div class="action-timeline"><strong>{}</strong><ul>"#,
            escape_html(&timeline.label)
        );
        for item in &timeline.items {
            let _ = write!(out, "<li>{}</li>", escape_html(item));
        }
        out.push_str("</ul></div>");
    }
    out.push_str("</div>");
    out
}

pub fn summary_html(text: &SummaryText, summary: &Summary) -> String {
    let mut out = String::from(r#"<div class="analysis-section">"#);
    let _ = write!(out, "<h4>{}</h4>", escape_html(&text.heading));
    section(
        &mut out,
        "Your Career Profile:",
        &escape_html(&summary.profile),
    );

    let mut paths = String::from("<ol>");
    for path in &summary.top_paths {
        let _ = write!(paths, "<li>{}</li>", escape_html(path));
    }
    paths.push_str("</ol>");
    section(&mut out, "Top Recommended Paths:", &paths);

    section(
        &mut out,
        "Your Immediate Next Step:",
        &escape_html(&text.next_step),
    );
    section(
        &mut out,
        "30-Day Goal:",
        &escape_html(&text.thirty_day_goal),
    );
    out.push_str("</div>");
    out
}
