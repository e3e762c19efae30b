use super::render::{render_json, render_messages, render_plain, render_table};
use super::setup::{build_command, Cli, Commands, CompletionShell, ListFormat};
use crate::{logging, tui};
use chrono::Utc;
use clap::Parser;
use gctapp::api::GctApi;
use gctapp::clock::Clock;
use gctapp::config::Config;
use gctapp::error::{GctError, Result};
use gctapp::init::initialize;
use gctapp::store::TodoRepository;
use std::io;
use tracing::debug;

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help and version go to stdout and exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(usage_error(&e)),
    };

    // Completion needs neither logging nor a data file
    if let Some(Commands::Completion { shell }) = &cli.command {
        print_completion(*shell);
        return Ok(());
    }

    if cli.command == Some(Commands::Tui) {
        logging::init_for_tui(cli.verbose);
    } else {
        logging::init(cli.verbose);
    }

    let config = match &cli.data_file {
        Some(path) => Config::with_data_file(path)?,
        None => Config::load()?,
    };
    debug!(data_file = %config.data_file.display(), "using data file");

    match cli.command {
        Some(Commands::Tui) => tui::run(&config),
        command => {
            let mut ctx = initialize(&config);
            let output = dispatch(&mut ctx.api, command)?;
            print!("{}", output);
            Ok(())
        }
    }
}

/// Run one non-interactive command and return what should be printed.
pub(crate) fn dispatch<R: TodoRepository, C: Clock>(
    api: &mut GctApi<R, C>,
    command: Option<Commands>,
) -> Result<String> {
    let command = command.unwrap_or(Commands::List {
        format: ListFormat::default(),
    });

    match command {
        Commands::Add { description } => Ok(render_messages(&api.add_todo(&description)?.messages)),
        Commands::List { format } => {
            let todos = api.list_todos()?.listed_todos;
            match format {
                ListFormat::Table => Ok(render_table(&todos, Utc::now())),
                ListFormat::Json => render_json(&todos),
                ListFormat::Plain => Ok(render_plain(&todos)),
            }
        }
        Commands::Toggle { id } => Ok(render_messages(&api.toggle_todo(id)?.messages)),
        Commands::Edit { id, description } => {
            Ok(render_messages(&api.update_todo(id, &description)?.messages))
        }
        Commands::Delete { id } => Ok(render_messages(&api.delete_todo(id)?.messages)),
        Commands::Tui | Commands::Completion { .. } => Err(GctError::invalid_input(
            "command cannot run non-interactively",
        )),
    }
}

fn print_completion(shell: CompletionShell) {
    let mut cmd = build_command();
    let shell: clap_complete::Shell = shell.into();
    clap_complete::generate(shell, &mut cmd, "gct", &mut io::stdout());
}

/// Turn a clap error into the first line of its report, without the `error: ` lead.
fn usage_error(e: &clap::Error) -> GctError {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or("invalid arguments");
    let message = first.strip_prefix("error: ").unwrap_or(first).trim();
    GctError::invalid_input(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;
    use gctapp::clock::ManualClock;
    use gctapp::error::{is_invalid_input, INVALID_ID, TODO_NOT_FOUND};
    use gctapp::store::mem_backend::MemBackend;
    use gctapp::store::InMemoryRepository;
    use gctapp::test_utils::manual_clock;

    fn make_api() -> GctApi<InMemoryRepository, ManualClock> {
        GctApi::new(
            InMemoryRepository::with_backend(MemBackend::new()),
            manual_clock(),
        )
    }

    fn run_cmd(
        api: &mut GctApi<InMemoryRepository, ManualClock>,
        command: Commands,
    ) -> Result<String> {
        dispatch(api, Some(command)).map(|out| strip_ansi_codes(&out).to_string())
    }

    #[test]
    fn add_prints_success_message() {
        let mut api = make_api();
        let out = run_cmd(
            &mut api,
            Commands::Add {
                description: "Buy groceries".into(),
            },
        )
        .unwrap();
        assert_eq!(out, "Todo added successfully: Buy groceries (ID: 1)\n");
    }

    #[test]
    fn bare_invocation_lists_as_table() {
        let mut api = make_api();
        let out = dispatch(&mut api, None).unwrap();
        assert_eq!(strip_ansi_codes(&out), "No todos found.\n");
    }

    #[test]
    fn toggle_edit_delete_messages() {
        let mut api = make_api();
        api.add_todo("a").unwrap();
        api.add_todo("b").unwrap();

        assert_eq!(
            run_cmd(&mut api, Commands::Toggle { id: 1 }).unwrap(),
            "Todo 1 marked as complete: a\n"
        );
        assert_eq!(
            run_cmd(
                &mut api,
                Commands::Edit {
                    id: 2,
                    description: "b2".into()
                }
            )
            .unwrap(),
            "Todo 2 updated: b2\n"
        );
        assert_eq!(
            run_cmd(&mut api, Commands::Delete { id: 1 }).unwrap(),
            "Todo 1 deleted successfully\n"
        );
        assert_eq!(
            run_cmd(
                &mut api,
                Commands::List {
                    format: ListFormat::Plain
                }
            )
            .unwrap(),
            "1. [ ] b2\n"
        );
    }

    #[test]
    fn errors_propagate() {
        let mut api = make_api();
        assert_eq!(
            run_cmd(&mut api, Commands::Toggle { id: 3 }).unwrap_err(),
            TODO_NOT_FOUND
        );
        assert_eq!(
            run_cmd(&mut api, Commands::Delete { id: 0 }).unwrap_err(),
            INVALID_ID
        );
    }

    #[test]
    fn usage_errors_become_invalid_input() {
        let err = Cli::try_parse_from(["gct", "add"]).unwrap_err();
        let err = usage_error(&err);
        assert!(is_invalid_input(&err));
        assert!(!err.message().starts_with("error:"));
        assert!(!err.message().contains('\n'));
    }
}
