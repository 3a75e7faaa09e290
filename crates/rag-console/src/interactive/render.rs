//! Text rendering of the tab bar and panels

use console::style;
use std::fmt::Write;

use crate::store::{AppState, ManagePanel, QueryPanel, UploadPanel};
use crate::tabs::Tab;

/// Full screen: tab bar, banner of the active panel, active panel
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tab_bar(state));
    out.push_str(&render_active(state));
    out
}

/// Banner and panel of the active tab only
pub fn render_active(state: &AppState) -> String {
    let mut out = String::new();

    if let Some(error) = state.banner() {
        let _ = writeln!(out, "{} {}", style("Error:").red().bold(), style(error).red());
        out.push('\n');
    }

    match state.active_tab {
        Tab::Query => render_query(&mut out, &state.query),
        Tab::Upload => render_upload(&mut out, &state.upload),
        Tab::Manage => render_manage(&mut out, &state.manage),
    }
    out
}

fn tab_bar(state: &AppState) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            let busy = if state.status(*tab).is_loading { " …" } else { "" };
            let label = format!(" {} {}{} ", tab.number(), tab.label(), busy);
            if *tab == state.active_tab {
                style(label).bold().reverse().to_string()
            } else {
                style(label).dim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn heading(out: &mut String, text: &str) {
    let _ = writeln!(out, "{}", style(text).bold().underlined());
}

fn render_query(out: &mut String, panel: &QueryPanel) {
    heading(out, "Ask a Question");
    if panel.input.trim().is_empty() {
        let _ = writeln!(out, "{}", style("Enter your question: ask <question>").dim());
    } else {
        let _ = writeln!(out, "Question: {}", panel.input);
    }

    if panel.status.is_loading {
        let _ = writeln!(out, "\n{}", style("🤔 Thinking...").yellow());
    }

    let Some(result) = &panel.result else {
        return;
    };
    if result.answer.is_empty() {
        return;
    }

    let _ = writeln!(out, "\n{}", style("💡 Answer").bold());
    let _ = writeln!(out, "{}", result.answer);

    if !result.sources.is_empty() {
        let _ = writeln!(out, "\n{}", style("📚 Sources").bold());
        for (i, source) in result.sources.iter().enumerate() {
            let _ = writeln!(out, "  Source {}: {}", i + 1, source);
        }
    }
}

fn render_upload(out: &mut String, panel: &UploadPanel) {
    heading(out, "📄 Upload PDF Document");
    let _ = writeln!(
        out,
        "Upload a PDF file to add it to the knowledge base for querying."
    );

    match &panel.selected {
        Some(file) => {
            let _ = writeln!(
                out,
                "Selected: {} {}",
                style(&file.name).bold(),
                style(format!("({} KB)", file.size_kb())).dim()
            );
        }
        None => {
            let _ = writeln!(out, "{}", style("Select a PDF file: select <path>").dim());
        }
    }

    if panel.status.is_loading {
        let _ = writeln!(out, "\n{}", style("📤 Uploading...").yellow());
    }

    let Some(result) = &panel.result else {
        return;
    };

    let _ = writeln!(out, "\n{}", style("✅ Upload Successful!").green().bold());
    let _ = writeln!(out, "Status: {}", result.status);
    if let Some(message) = &result.message {
        let _ = writeln!(out, "{}", message);
    }

    if !result.tables.is_empty() {
        let _ = writeln!(
            out,
            "\n{}",
            style(format!("📊 Extracted Tables ({})", result.tables.len())).bold()
        );
        for (i, table) in result.tables.iter().enumerate() {
            let _ = writeln!(out, "Table {}:", i + 1);
            for line in table.lines() {
                let _ = writeln!(out, "    {}", line);
            }
        }
    }

    let _ = writeln!(
        out,
        "\n{}",
        style(
            "💡 Your PDF has been processed and is now available for querying. \
             Switch to the Query tab (tab query) to ask questions about the content."
        )
        .dim()
    );
}

fn render_manage(out: &mut String, panel: &ManagePanel) {
    heading(out, "Add New Document");
    let content = if panel.content_input.is_empty() {
        style("(empty) content <text>".to_string()).dim().to_string()
    } else {
        panel.content_input.clone()
    };
    let metadata = if panel.metadata_input.is_empty() {
        style(r#"(optional JSON) meta {"topic": "example", "author": "Jane Doe"}"#.to_string())
            .dim()
            .to_string()
    } else {
        panel.metadata_input.clone()
    };
    let _ = writeln!(out, "Content:  {}", content);
    let _ = writeln!(out, "Metadata: {}", metadata);

    if panel.status.is_loading {
        let _ = writeln!(out, "\n{}", style("⏳ Adding...").yellow());
    }

    out.push('\n');
    heading(
        out,
        &format!("Knowledge Base ({} documents)", panel.documents.len()),
    );

    if panel.documents.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            style("No documents in the knowledge base yet. Add some documents to get started!")
                .dim()
        );
        return;
    }

    for (i, doc) in panel.documents.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {}",
            style(format!("#{}", i + 1)).cyan().bold(),
            style(format!("id {}", doc.id)).dim()
        );
        let _ = writeln!(out, "  Preview: {}", doc.content_preview);
        if !doc.metadata.is_empty() {
            let _ = writeln!(out, "  Metadata:");
            for line in doc.metadata.to_pretty_json().lines() {
                let _ = writeln!(out, "    {}", line);
            }
        }
        let _ = writeln!(
            out,
            "  {}",
            style(format!("Created: {}", doc.created_at_display())).dim()
        );
    }
}
