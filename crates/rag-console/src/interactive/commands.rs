//! Parsing of interactive console input

use crate::tabs::Tab;
use crate::types::DocumentId;

/// Document to delete, by backend id or by its position in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Id(DocumentId),
    /// 1-based position in the rendered list
    Position(usize),
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    Help,
    Quit,
    Show,
    Refresh,
    Ask(String),
    Select(String),
    Upload,
    Content(String),
    Meta(String),
    Add,
    Delete(DeleteTarget),
}

impl Command {
    /// Tab whose panel owns this command, `None` for global commands
    pub fn owner(&self) -> Option<Tab> {
        match self {
            Self::Ask(_) => Some(Tab::Query),
            Self::Select(_) | Self::Upload => Some(Tab::Upload),
            Self::Content(_) | Self::Meta(_) | Self::Add | Self::Delete(_) => Some(Tab::Manage),
            Self::Tab(_) | Self::Help | Self::Quit | Self::Show | Self::Refresh => None,
        }
    }
}

/// Parse a line typed while `active` is the visible tab.
///
/// Panel commands are only accepted on their own panel.
pub fn parse(line: &str, active: Tab) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "refresh" => Command::Refresh,
        "tab" => Command::Tab(rest.parse()?),
        "1" | "2" | "3" if rest.is_empty() => Command::Tab(verb.parse()?),
        "ask" => Command::Ask(rest.to_string()),
        "select" => {
            if rest.is_empty() {
                return Err("Usage: select <path>".to_string());
            }
            Command::Select(rest.to_string())
        }
        "upload" => Command::Upload,
        "content" => Command::Content(rest.to_string()),
        "meta" | "metadata" => Command::Meta(rest.to_string()),
        "add" => Command::Add,
        "delete" | "rm" => Command::Delete(parse_delete_target(rest)?),
        other => return Err(format!("Unknown command '{}'. Type 'help' for commands.", other)),
    };

    match command.owner() {
        Some(owner) if owner != active => Err(format!(
            "'{}' belongs to the {} tab. Switch with: tab {}",
            verb.to_lowercase(),
            owner.label(),
            owner
        )),
        _ => Ok(command),
    }
}

fn parse_delete_target(rest: &str) -> Result<DeleteTarget, String> {
    if rest.is_empty() {
        return Err("Usage: delete <id> or delete #<n>".to_string());
    }
    match rest.strip_prefix('#') {
        Some(n) => n
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(DeleteTarget::Position)
            .ok_or_else(|| format!("Invalid list position '{}'", rest)),
        None => Ok(DeleteTarget::Id(DocumentId::new(rest))),
    }
}

/// Help text for the active tab
pub fn help(active: Tab) -> String {
    let panel = match active {
        Tab::Query => "  ask <question>      ask the knowledge base",
        Tab::Upload => "  select <path>       pick a PDF file\n  upload              upload the selected PDF",
        Tab::Manage => {
            "  content <text>      set the document content\n  \
             meta <json>         set optional JSON metadata\n  \
             add                 add the document\n  \
             delete <id|#n>      delete a document (asks for confirmation)"
        }
    };

    format!(
        "Commands:\n  \
         tab <query|upload|manage>  switch tab (or 1, 2, 3)\n  \
         refresh             reload the document list\n  \
         show                redraw the screen\n  \
         help                this text\n  \
         quit                leave\n\
         {} tab:\n{}",
        active.label(),
        panel
    )
}
