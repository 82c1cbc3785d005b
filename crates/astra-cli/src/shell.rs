//! Interactive dashboard shell.
//!
//! A rustyline REPL over the service graph: plain text submits a query in
//! the current mode, slash commands drive session, history, and document
//! management. Commands run to completion before the next prompt, so at
//! most one operation of a kind is ever outstanding.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use astra_application::DeleteOutcome;
use astra_core::exchange::QueryMode;
use astra_core::router::{Screen, resolve};

use crate::App;
use crate::render;

/// Shell helper for rustyline that provides completion, highlighting, and
/// hints for slash commands.
#[derive(Clone)]
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            commands: [
                "/help", "/login", "/register", "/logout", "/whoami", "/mode", "/history",
                "/show", "/delete", "/docs", "/upload", "/deldoc", "/quit",
            ]
            .iter()
            .map(|command| command.to_string())
            .collect(),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|command| command.starts_with(line))
                .map(|command| Pair {
                    display: command.clone(),
                    replacement: command.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|command| command.starts_with(line) && command.len() > line.len())
                .map(|command| command[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ShellHelper {}

/// Runs the interactive shell until the user quits.
pub async fn run(app: App) -> Result<()> {
    let helper = ShellHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Astra ===".bright_magenta().bold());
    match app.session.username() {
        Some(username) => {
            println!("{}", format!("signed in as {username}").bright_black());
        }
        None => {
            println!(
                "{}",
                "sign in with /login <email> <password>, or /register <username> <email> <password>"
                    .bright_black()
            );
        }
    }
    println!(
        "{}",
        "Type a query to analyze, /help for commands, /quit to exit.".bright_black()
    );
    println!();

    let mut mode = QueryMode::Standard;

    loop {
        let prompt = prompt_for(&app, mode);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if matches!(trimmed, "/quit" | "quit" | "exit") {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                dispatch(&app, &mut mode, trimmed).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

fn prompt_for(app: &App, mode: QueryMode) -> String {
    match app.session.username() {
        Some(username) => format!("{username}({mode})> "),
        None => "astra(signed out)> ".to_string(),
    }
}

/// Router gate for protected shell commands: resolves the requested screen
/// against session presence and yields the user id when reachable.
fn gate(app: &App, requested: Screen) -> Option<String> {
    match resolve(requested, app.session.session_state()) {
        Screen::Login => {
            render::notify_info("sign in first: /login <email> <password>");
            None
        }
        _ => match app.session.user_id() {
            Some(user_id) => Some(user_id),
            None => {
                render::notify_info("stored session is unreadable; sign in again with /login");
                None
            }
        },
    }
}

async fn dispatch(app: &App, mode: &mut QueryMode, input: &str) {
    let mut parts = input.split_whitespace();
    let Some(head) = parts.next() else {
        return;
    };
    let args: Vec<&str> = parts.collect();

    if !head.starts_with('/') {
        submit_query(app, *mode, input).await;
        return;
    }

    match (head, args.as_slice()) {
        ("/help", _) => help(),
        ("/login", [email, password]) => match app.session.login(email, password).await {
            Ok(session) => render::notify_info(&format!("signed in as {}", session.username)),
            Err(err) => render::notify_error(&err),
        },
        ("/login", _) => render::notify_info("usage: /login <email> <password>"),
        ("/register", [username, email, password]) => {
            match app.session.register(username, email, password).await {
                Ok(message) => {
                    render::notify_info(&message);
                    render::notify_info("now sign in with /login");
                }
                Err(err) => render::notify_error(&err),
            }
        }
        ("/register", _) => {
            render::notify_info("usage: /register <username> <email> <password>");
        }
        ("/logout", _) => match app.session.logout() {
            Ok(()) => render::notify_info("signed out"),
            Err(err) => render::notify_error(&err),
        },
        ("/whoami", _) => match app.session.username() {
            Some(username) => {
                let user_id = app.session.user_id().unwrap_or_else(|| "?".to_string());
                render::notify_info(&format!("{username} ({user_id})"));
            }
            None => render::notify_info("not signed in"),
        },
        ("/mode", []) => render::notify_info(&format!("mode is {mode}")),
        ("/mode", [value]) => match QueryMode::from_str(value) {
            Ok(parsed) => {
                *mode = parsed;
                render::notify_info(&format!("mode set to {parsed}"));
            }
            Err(_) => render::notify_info("usage: /mode <standard|rag>"),
        },
        ("/history", _) => {
            let Some(user_id) = gate(app, Screen::Dashboard) else {
                return;
            };
            match app.history.refresh(&user_id).await {
                Ok(_) => render::history_list(&app.history.entries().await),
                Err(err) => render::notify_error(&err),
            }
        }
        ("/show", [index]) => {
            let Some(user_id) = gate(app, Screen::Dashboard) else {
                return;
            };
            let Ok(position) = index.parse::<usize>() else {
                render::notify_info("usage: /show <number from /history>");
                return;
            };
            if app.history.entries().await.is_empty()
                && let Err(err) = app.history.refresh(&user_id).await
            {
                render::notify_error(&err);
                return;
            }
            match app.history.select(position.saturating_sub(1)).await {
                Some(selected) => {
                    // Replay is local: the stored payload goes straight into
                    // the display slot, no re-query.
                    app.dashboard.show_stored(selected.response.clone()).await;
                    render::exchange(&selected);
                }
                None => render::notify_info("no such history entry"),
            }
        }
        ("/show", _) => render::notify_info("usage: /show <number from /history>"),
        ("/delete", [index]) => {
            if gate(app, Screen::Dashboard).is_none() {
                return;
            }
            let Ok(position) = index.parse::<usize>() else {
                render::notify_info("usage: /delete <number from /history>");
                return;
            };
            let Some(selected) = app.history.select(position.saturating_sub(1)).await else {
                render::notify_info("no such history entry");
                return;
            };
            let confirmed = match render::confirm_on_stdin(&selected.query) {
                Ok(confirmed) => confirmed,
                Err(err) => {
                    render::notify_error(&err);
                    return;
                }
            };
            match app.history.delete(&selected.id, confirmed).await {
                Ok(DeleteOutcome::Deleted) => render::notify_info("exchange deleted"),
                Ok(DeleteOutcome::Declined) => render::notify_info("cancelled"),
                Err(err) => render::notify_error(&err),
            }
        }
        ("/delete", _) => render::notify_info("usage: /delete <number from /history>"),
        ("/docs", _) => {
            let Some(user_id) = gate(app, Screen::Documents) else {
                return;
            };
            match app.documents.refresh(&user_id).await {
                Ok(_) => render::document_list(&app.documents.documents().await),
                Err(err) => render::notify_error(&err),
            }
        }
        ("/upload", [path]) => {
            let Some(user_id) = gate(app, Screen::Documents) else {
                return;
            };
            match app.documents.upload(&user_id, Path::new(path)).await {
                Ok(()) => {
                    render::notify_info("document uploaded");
                    render::document_list(&app.documents.documents().await);
                }
                Err(err) if err.is_validation() => render::notify_info(&err.to_string()),
                Err(err) => render::notify_error(&err),
            }
        }
        ("/upload", _) => render::notify_info("usage: /upload <path>"),
        ("/deldoc", [doc_id]) => {
            let Some(user_id) = gate(app, Screen::Documents) else {
                return;
            };
            match app.documents.delete(&user_id, doc_id).await {
                Ok(()) => {
                    render::notify_info("document deleted");
                    render::document_list(&app.documents.documents().await);
                }
                Err(err) => render::notify_error(&err),
            }
        }
        ("/deldoc", _) => render::notify_info("usage: /deldoc <document id>"),
        _ => render::notify_info("unknown command; /help lists commands"),
    }
}

async fn submit_query(app: &App, mode: QueryMode, query: &str) {
    if app.dashboard.is_query_in_flight().await {
        render::notify_info("a query is already running");
        return;
    }
    if gate(app, Screen::Dashboard).is_none() {
        return;
    }

    let seq = app.dashboard.begin_submission().await;
    println!("{}", format!("analyzing ({mode})…").bright_black());

    match app.queries.submit(query, mode).await {
        Ok(payload) => {
            if app.dashboard.present(seq, payload.clone()).await {
                render::result(&payload);
            }
        }
        Err(err) => {
            app.dashboard.settle_failure(seq).await;
            if err.is_validation() {
                render::notify_info(&err.to_string());
            } else {
                // The previously displayed result, if any, stays put.
                render::notify_error(&err);
            }
        }
    }
}

fn help() {
    println!("{}", "Commands".bold());
    println!("  <query text>                       analyze in the current mode");
    println!("  /mode <standard|rag>               switch analysis mode");
    println!("  /history                           list your past exchanges");
    println!("  /show <n>                          replay a past exchange");
    println!("  /delete <n>                        delete a past exchange");
    println!("  /docs                              list your RAG documents");
    println!("  /upload <path>                     upload a document for RAG");
    println!("  /deldoc <id>                       delete a RAG document");
    println!("  /login /register /logout /whoami   session");
    println!("  /quit                              exit");
}
