//! Output formatters for rendered frames

use anyhow::Result;
use colored::*;
use sheetcards_core::card::EMPTY_CARD_NOTICE;
use sheetcards_core::{DisplayCard, Frame, Notice, NoticeLevel};
use std::fmt::Write;
use std::path::Path;

/// Render a frame as colored terminal text
pub fn human(frame: &Frame) -> String {
    let mut out = String::new();

    for notice in &frame.notices {
        let _ = writeln!(out, "{}", notice_line(notice));
    }
    if !frame.notices.is_empty() {
        out.push('\n');
    }

    for card in &frame.cards {
        human_card(&mut out, card);
    }

    out
}

fn human_card(out: &mut String, card: &DisplayCard) {
    let _ = writeln!(out, "{}", card.heading().cyan().bold());

    if card.is_empty() {
        let _ = writeln!(out, "  {}", EMPTY_CARD_NOTICE.blue());
        out.push('\n');
        return;
    }

    let width = card
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);
    for field in &card.fields {
        let padding = " ".repeat(width - field.label.chars().count());
        let _ = writeln!(out, "  {}{}  {}", field.label.bold(), padding, field.value);
    }

    if let Some(message) = &card.message {
        out.push('\n');
        for line in message.lines() {
            let _ = writeln!(out, "  {}", line.bright_black());
        }
    }
    out.push('\n');
}

/// One banner line, e.g. `WARN  The file has no data rows.`
pub fn notice_line(notice: &Notice) -> String {
    let label = match notice.level {
        NoticeLevel::Info => "INFO ".blue().bold(),
        NoticeLevel::Success => "OK   ".green().bold(),
        NoticeLevel::Warning => "WARN ".yellow().bold(),
        NoticeLevel::Error => "ERROR".red().bold(),
    };
    format!("{} {}", label, notice.message)
}

/// Render a frame as a standalone HTML page with centered tables
pub fn html(file_path: &Path, frame: &Frame) -> String {
    let title = escape(&file_path.display().to_string());
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
.main-content {{
    max-width: 800px;
    margin: 0 auto;
}}
table {{
    margin: 0 auto;
}}
.notice-info {{ color: #1c4e80; }}
.notice-success {{ color: #1e7b34; }}
.notice-warning {{ color: #8a6d00; }}
.notice-error {{ color: #a4161a; }}
</style>
</head>
<body>
<div class="main-content">
<h1>Order cards</h1>
"#
    );

    for notice in &frame.notices {
        let class = match notice.level {
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Success => "notice-success",
            NoticeLevel::Warning => "notice-warning",
            NoticeLevel::Error => "notice-error",
        };
        let _ = writeln!(out, "<p class=\"{}\">{}</p>", class, escape(&notice.message));
    }

    for card in &frame.cards {
        let _ = writeln!(
            out,
            "<h3 style='text-align: center;'>{}</h3>",
            escape(&card.heading())
        );

        if card.is_empty() {
            let _ = writeln!(out, "<p class=\"notice-info\">{}</p>", EMPTY_CARD_NOTICE);
            continue;
        }

        out.push_str("<table border=\"1\">\n<thead>\n<tr>");
        out.push_str("<th style='text-align: center;'>Column</th>");
        out.push_str("<th style='text-align: center;'>Value</th>");
        out.push_str("</tr>\n</thead>\n<tbody>\n");
        for field in &card.fields {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(&field.label),
                escape(&field.value)
            );
        }
        out.push_str("</tbody>\n</table>\n");

        if let Some(message) = &card.message {
            let _ = writeln!(out, "<pre>{}</pre>", escape(message));
        }
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

/// Render a frame in JSON format
pub fn json(file_path: &Path, frame: &Frame) -> Result<String> {
    // Reminders are counted on cards that carry a message
    let reminders = |wanted: fn(&DisplayCard) -> bool| {
        frame
            .cards
            .iter()
            .filter(|c| c.message.is_some() && wanted(c))
            .count()
    };

    let output = serde_json::json!({
        "file": file_path.display().to_string(),
        "notices": frame.notices,
        "cards": frame.cards,
        "summary": {
            "cards": frame.cards.len(),
            "empty_cards": frame.cards.iter().filter(|c| c.is_empty()).count(),
            "collection_reminders": reminders(|c| c.needs_collection_reminder),
            "payment_reminders": reminders(|c| c.needs_payment_reminder),
        }
    });

    let mut rendered = serde_json::to_string_pretty(&output)?;
    rendered.push('\n');
    Ok(rendered)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use sheetcards_core::ProjectedField;

    fn sample_frame() -> Frame {
        Frame {
            notices: vec![
                Notice::success("File read successfully!"),
                Notice::info("Displaying rows from 1 to 2."),
            ],
            cards: vec![
                DisplayCard {
                    row: 1,
                    name: "Aisha <3".to_string(),
                    fields: vec![
                        ProjectedField::new("Items", "3 samosas"),
                        ProjectedField::new("payment", "done"),
                    ],
                    needs_collection_reminder: true,
                    needs_payment_reminder: false,
                    message: Some("Assalamu Allaikum\nWassalam\n".to_string()),
                },
                DisplayCard {
                    row: 2,
                    name: "Row 2".to_string(),
                    fields: Vec::new(),
                    needs_collection_reminder: true,
                    needs_payment_reminder: true,
                    message: None,
                },
            ],
        }
    }

    #[test]
    fn test_human_output() {
        colored::control::set_override(false);
        let out = human(&sample_frame());

        assert!(out.starts_with("OK    File read successfully!\n"));
        assert!(out.contains("--- Row 1: Aisha <3 ---"));
        assert!(out.contains("  Items    3 samosas\n"));
        assert!(out.contains("  payment  done\n"));
        assert!(out.contains("  Wassalam\n"));
        assert!(out.contains(&format!("--- Row 2: Row 2 ---\n  {}", EMPTY_CARD_NOTICE)));
    }

    #[test]
    fn test_html_output() {
        let out = html(Path::new("orders.csv"), &sample_frame());

        assert!(out.contains("<th style='text-align: center;'>Column</th>"));
        assert!(out.contains("--- Row 1: Aisha &lt;3 ---"));
        assert!(out.contains("<tr><td>Items</td><td>3 samosas</td></tr>"));
        assert!(out.contains("<pre>Assalamu Allaikum\nWassalam\n</pre>"));
        assert!(out.contains(EMPTY_CARD_NOTICE));
        assert_eq!(out.matches("<table").count(), 1);
    }

    #[test]
    fn test_json_output() -> Result<()> {
        let out = json(Path::new("orders.csv"), &sample_frame())?;
        let value: serde_json::Value = serde_json::from_str(&out)?;

        assert_eq!(value["file"], "orders.csv");
        assert_eq!(value["notices"][0]["level"], "success");
        assert_eq!(value["cards"][0]["fields"][0]["label"], "Items");
        assert_eq!(value["cards"][1]["message"], serde_json::Value::Null);
        assert_eq!(value["summary"]["empty_cards"], 1);
        assert_eq!(value["summary"]["collection_reminders"], 1);
        assert_eq!(value["summary"]["payment_reminders"], 0);
        Ok(())
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
