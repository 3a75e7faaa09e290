//! Interactive console: reads commands, drives workflows, renders panels
//!
//! All in-flight workflow futures are polled from the console task itself,
//! next to user input, so a request keeps running while the user switches
//! tabs and its result lands in the store whenever it settles.

pub mod commands;
pub mod render;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::io::Write;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::tabs::{Tab, TabController};
use crate::types::DocumentId;
use crate::workflows::{Confirm, Settled, Workflows};
use commands::{Command, DeleteTarget};

type InFlight<'a> = FuturesUnordered<LocalBoxFuture<'a, (Tab, Settled)>>;

/// Interactive console session
pub struct Console {
    workflows: Workflows,
    tabs: TabController,
}

impl Console {
    pub fn new(workflows: Workflows) -> Self {
        let tabs = TabController::new(workflows.store().clone());
        Self { workflows, tabs }
    }

    /// Run until `quit` or end of input
    pub async fn run(&self) -> crate::Result<()> {
        let mut lines = spawn_stdin_reader();
        let mut in_flight: InFlight<'_> = FuturesUnordered::new();

        // Initial corpus load
        in_flight.push(Box::pin(async {
            (Tab::Manage, self.workflows.refresh_documents().await)
        }));

        println!("{}", style_title());
        self.redraw();

        loop {
            tokio::select! {
                line = lines.recv() => {
                    let Some(line) = line else {
                        break;
                    };
                    match commands::parse(&line, self.tabs.active()) {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.dispatch(command, &mut lines, &mut in_flight).await,
                        Err(message) => println!("{}", message),
                    }
                    self.redraw();
                }
                Some((tab, settled)) = in_flight.next(), if !in_flight.is_empty() => {
                    tracing::debug!("{} workflow settled: {:?}", tab, settled);
                    self.redraw();
                }
            }
        }

        if !in_flight.is_empty() {
            tracing::info!("Leaving with {} request(s) still in flight", in_flight.len());
        }
        Ok(())
    }

    async fn dispatch<'a>(
        &'a self,
        command: Command,
        lines: &mut UnboundedReceiver<String>,
        in_flight: &mut InFlight<'a>,
    ) {
        let wf = &self.workflows;

        if let Some(owner) = self.busy_owner(&command) {
            println!("Please wait, the {} tab is still working.", owner);
            return;
        }

        match command {
            Command::Tab(tab) => self.tabs.select(tab),
            Command::Help => println!("{}", commands::help(self.tabs.active())),
            Command::Show | Command::Quit => {}
            Command::Refresh => {
                in_flight.push(Box::pin(async move {
                    (Tab::Manage, wf.refresh_documents().await)
                }));
            }
            Command::Ask(question) => {
                if question.trim().is_empty() {
                    println!("Type a question after 'ask'.");
                    return;
                }
                wf.set_query(question);
                in_flight.push(Box::pin(async move { (Tab::Query, wf.submit_query().await) }));
            }
            Command::Select(path) => {
                wf.select_path(&shellexpand::tilde(&path));
            }
            Command::Upload => {
                in_flight.push(Box::pin(async move {
                    (Tab::Upload, wf.upload_selected().await)
                }));
            }
            Command::Content(text) => wf.set_document_content(text),
            Command::Meta(text) => wf.set_document_metadata(text),
            Command::Add => {
                if wf.store().read(|s| s.manage.content_input.trim().is_empty()) {
                    println!("Set the document content first: content <text>");
                    return;
                }
                in_flight.push(Box::pin(async move {
                    (Tab::Manage, wf.add_document().await)
                }));
            }
            Command::Delete(target) => {
                let Some(id) = self.resolve(target) else {
                    println!("No document at that position.");
                    return;
                };
                let mut prompt = LinePrompt { lines };
                if let Some(confirmed) = wf.confirm_delete(&mut prompt, id).await {
                    in_flight.push(Box::pin(async move {
                        (Tab::Manage, wf.delete_document(confirmed).await)
                    }));
                }
            }
        }
    }

    /// Owner tab of `command` when that tab has a request outstanding
    fn busy_owner(&self, command: &Command) -> Option<Tab> {
        command
            .owner()
            .filter(|owner| self.workflows.store().read(|s| s.status(*owner).is_loading))
    }

    fn resolve(&self, target: DeleteTarget) -> Option<DocumentId> {
        match target {
            DeleteTarget::Id(id) => Some(id),
            DeleteTarget::Position(n) => self
                .workflows
                .store()
                .read(|s| s.manage.documents.get(n.checked_sub(1)?).map(|d| d.id.clone())),
        }
    }

    fn redraw(&self) {
        let state = self.workflows.store().snapshot();
        println!("\n{}", render::render(&state));
        print!("{} > ", state.active_tab);
        let _ = std::io::stdout().flush();
    }
}

fn style_title() -> String {
    console::style("🤖 RAG Console · Retrieval-Augmented Generation")
        .bold()
        .to_string()
}

/// Read stdin on a plain thread so the console task never blocks on it
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    if tx.send(line.trim_end_matches(['\r', '\n']).to_string()).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Whether a typed answer means yes
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Confirmation read from the console's own input stream.
///
/// Nothing else is polled while the question is open.
struct LinePrompt<'a> {
    lines: &'a mut UnboundedReceiver<String>,
}

#[async_trait]
impl Confirm for LinePrompt<'_> {
    async fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = std::io::stdout().flush();
        match self.lines.recv().await {
            Some(answer) => is_yes(&answer),
            None => false,
        }
    }
}

/// Confirmation read from stdin, for one-shot commands
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = std::io::stdout().flush();

        let answer = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_yes(&line),
            _ => false,
        }
    }
}
