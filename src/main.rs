// ez - save, alias, and replay shell commands by name
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use ez_cmd_lib::{
    core::{Resolver, Runner, Suggester},
    shell::{HistoryReader, HistorySetup, SetupOutcome, ShellDetector},
    store::CommandEntry,
    ConfigStore, EzError, Registry, Result,
};
use std::env;
use std::io::Write;

/// Everything `ez` understands, resolved by a static lookup on the first
/// token. Anything unmatched is treated as a saved-command invocation.
#[derive(Debug)]
enum Subcommand {
    Save { name: String, template: String },
    Update { name: String, template: String },
    Delete { name: String },
    Rename { old: String, new: String },
    Copy { old: String, new: String },
    AddAlias { name: String, alias: String },
    RemoveAlias { name: String, alias: String },
    Append { name: String, template: String },
    Pop { name: String },
    List,
    Replay { name: String, filter: Option<String> },
    Install,
    Version,
    Help,
    Run { token: String, args: Vec<String> },
}

impl Subcommand {
    fn parse(args: &[String]) -> Result<Self> {
        let (first, rest) = (args[0].as_str(), &args[1..]);

        match first {
            "save" | "s" => {
                let (name, template) = two_args(rest, "save <name> <command>")?;
                Ok(Self::Save { name, template })
            }
            "update" | "u" => {
                let (name, template) = two_args(rest, "update <name> <command>")?;
                Ok(Self::Update { name, template })
            }
            "delete" | "d" => {
                let name = one_arg(rest, "delete <name>")?;
                Ok(Self::Delete { name })
            }
            "rename" | "r" => {
                let (old, new) = two_args(rest, "rename <old> <new>")?;
                Ok(Self::Rename { old, new })
            }
            "copy" | "c" => {
                let (old, new) = two_args(rest, "copy <old> <new>")?;
                Ok(Self::Copy { old, new })
            }
            "alias" | "a" => Self::parse_alias(rest),
            "append" => {
                let (name, template) = two_args(rest, "append <name> <command>")?;
                Ok(Self::Append { name, template })
            }
            "pop" => {
                let name = one_arg(rest, "pop <name>")?;
                Ok(Self::Pop { name })
            }
            "list" | "ls" => Ok(Self::List),
            "replay" => match rest {
                [name] => Ok(Self::Replay {
                    name: name.clone(),
                    filter: None,
                }),
                [name, filter] => Ok(Self::Replay {
                    name: name.clone(),
                    filter: Some(filter.clone()),
                }),
                _ => Err(EzError::InvalidArguments(
                    "Usage: ez replay <name> [filter]".to_string(),
                )),
            },
            "install" => Ok(Self::Install),
            "version" | "-v" | "--version" => Ok(Self::Version),
            "help" | "-h" | "--help" => Ok(Self::Help),
            _ => Ok(Self::Run {
                token: first.to_string(),
                args: rest.to_vec(),
            }),
        }
    }

    /// `ez alias NAME ALIAS` adds, `ez alias -d NAME ALIAS` removes
    fn parse_alias(rest: &[String]) -> Result<Self> {
        let mut remove = false;
        let mut operands: Vec<String> = Vec::new();

        for arg in rest {
            match arg.as_str() {
                "-d" | "--delete" => remove = true,
                other => operands.push(other.to_string()),
            }
        }

        match operands.as_slice() {
            [name, alias] => {
                if remove {
                    Ok(Self::RemoveAlias {
                        name: name.clone(),
                        alias: alias.clone(),
                    })
                } else {
                    Ok(Self::AddAlias {
                        name: name.clone(),
                        alias: alias.clone(),
                    })
                }
            }
            _ => Err(EzError::InvalidArguments(
                "Usage: ez alias [-d] <name> <alias>".to_string(),
            )),
        }
    }
}

fn two_args(args: &[String], usage: &str) -> Result<(String, String)> {
    match args {
        [first, second] => Ok((first.clone(), second.clone())),
        _ => Err(EzError::InvalidArguments(format!("Usage: ez {}", usage))),
    }
}

fn one_arg(args: &[String], usage: &str) -> Result<String> {
    match args {
        [only] => Ok(only.clone()),
        _ => Err(EzError::InvalidArguments(format!("Usage: ez {}", usage))),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Grab whatever the user typed
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_usage();
        return;
    }

    if let Err(err) = dispatch(&args).await {
        // A failing step propagates its exit status without extra noise,
        // the same as running the command by hand.
        let status = match &err {
            EzError::StepFailed { status, .. } => *status,
            _ => {
                eprintln!("{}", err.user_message());
                1
            }
        };
        std::process::exit(status);
    }
}

async fn dispatch(args: &[String]) -> Result<()> {
    match Subcommand::parse(args)? {
        Subcommand::Save { name, template } => handle_save(&name, &template).await,
        Subcommand::Update { name, template } => handle_update(&name, &template).await,
        Subcommand::Delete { name } => handle_delete(&name).await,
        Subcommand::Rename { old, new } => handle_rename(&old, &new).await,
        Subcommand::Copy { old, new } => handle_copy(&old, &new).await,
        Subcommand::AddAlias { name, alias } => handle_add_alias(&name, &alias).await,
        Subcommand::RemoveAlias { name, alias } => handle_remove_alias(&name, &alias).await,
        Subcommand::Append { name, template } => handle_append(&name, &template).await,
        Subcommand::Pop { name } => handle_pop(&name).await,
        Subcommand::List => handle_list().await,
        Subcommand::Replay { name, filter } => handle_replay(&name, filter.as_deref()).await,
        Subcommand::Install => handle_install().await,
        Subcommand::Version => {
            println!("ez v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Subcommand::Help => {
            print_usage();
            Ok(())
        }
        Subcommand::Run { token, args } => handle_run(&token, &args).await,
    }
}

async fn load_registry() -> Result<(ConfigStore, Registry)> {
    let store = ConfigStore::new()?;
    let registry = store.load().await?;
    Ok((store, registry))
}

async fn handle_save(name: &str, template: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.save_command(name, template)?;
    store.save(&registry).await?;
    println!("Saved command '{}'", name);
    Ok(())
}

async fn handle_update(name: &str, template: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.update_command(name, template)?;
    store.save(&registry).await?;
    println!("Updated command '{}'", name);
    Ok(())
}

async fn handle_delete(name: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.delete_command(name)?;
    store.save(&registry).await?;
    println!("Deleted command '{}' and its aliases", name);
    Ok(())
}

async fn handle_rename(old: &str, new: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.rename_command(old, new)?;
    store.save(&registry).await?;
    println!("Renamed command '{}' to '{}'", old, new);
    Ok(())
}

async fn handle_copy(old: &str, new: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.copy_command(old, new)?;
    store.save(&registry).await?;
    println!("Copied command '{}' to '{}'", old, new);
    Ok(())
}

async fn handle_add_alias(name: &str, alias: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.add_alias(name, alias)?;
    store.save(&registry).await?;
    println!("Added alias '{}' for command '{}'", alias, name);
    Ok(())
}

async fn handle_remove_alias(name: &str, alias: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.remove_alias(name, alias)?;
    store.save(&registry).await?;
    println!("Removed alias '{}' from command '{}'", alias, name);
    Ok(())
}

async fn handle_append(name: &str, template: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.append_step(name, template)?;
    store.save(&registry).await?;
    println!("Appended command to '{}'", name);
    Ok(())
}

async fn handle_pop(name: &str) -> Result<()> {
    let (store, mut registry) = load_registry().await?;
    registry.pop_step(name)?;
    store.save(&registry).await?;
    println!("Removed last command from '{}'", name);
    Ok(())
}

async fn handle_list() -> Result<()> {
    let (_store, registry) = load_registry().await?;

    if registry.is_empty() {
        println!("No commands saved.");
        return Ok(());
    }

    println!("\nSaved Commands");
    println!("{}", "=".repeat(60));

    let singles: Vec<(&str, &CommandEntry)> =
        registry.iter().filter(|(_, e)| !e.is_sequence()).collect();
    let sequences: Vec<(&str, &CommandEntry)> =
        registry.iter().filter(|(_, e)| e.is_sequence()).collect();

    if !singles.is_empty() {
        println!("\nSingle commands:");
        for (name, entry) in singles {
            println!("  {}{}", name, format_aliases(entry));
            for step in &entry.steps {
                println!("      {}", step);
            }
        }
    }

    if !sequences.is_empty() {
        println!("\nCommand sequences:");
        for (name, entry) in sequences {
            println!("  {}{}", name, format_aliases(entry));
            for (i, step) in entry.steps.iter().enumerate() {
                println!("      {}. {}", i + 1, step);
            }
        }
    }

    println!();
    Ok(())
}

fn format_aliases(entry: &CommandEntry) -> String {
    if entry.aliases.is_empty() {
        return String::new();
    }
    let list: Vec<&str> = entry.aliases.iter().map(|a| a.as_str()).collect();
    format!(" (aliases: {})", list.join(", "))
}

async fn handle_run(token: &str, args: &[String]) -> Result<()> {
    let (_store, registry) = load_registry().await?;
    let resolver = Resolver::new(&registry);

    let resolution = match resolver.resolve(token) {
        Ok(resolution) => resolution,
        Err(err) => {
            eprintln!("{}", err.user_message());
            if let Some(candidate) = Suggester::new(&registry).suggest(token) {
                eprintln!("Did you mean '{}'?", candidate);
            }
            std::process::exit(1);
        }
    };

    let steps = resolver.render_steps(resolution.entry, args)?;
    tracing::debug!(
        "resolved '{}' to '{}' ({} step(s))",
        token,
        resolution.name,
        steps.len()
    );

    Runner::new().run_sequence(&steps).await?;
    Ok(())
}

const REPLAY_PAGE_SIZE: usize = 5;

async fn handle_replay(name: &str, filter: Option<&str>) -> Result<()> {
    let (store, mut registry) = load_registry().await?;

    // Fail on name problems before making the user pick anything
    registry.ensure_available(name)?;

    let shell = ShellDetector::detect()?;
    let entries = HistoryReader::new(shell)?.entries(filter)?;

    if entries.is_empty() {
        match filter {
            Some(f) => eprintln!("No commands found matching '{}'.", f),
            None => eprintln!("No commands found in history."),
        }
        std::process::exit(1);
    }

    let mut page = 0;
    let selected = loop {
        let start = page * REPLAY_PAGE_SIZE;
        let end = (start + REPLAY_PAGE_SIZE).min(entries.len());
        let current = &entries[start..end];

        println!("\nRecent commands:");
        if let Some(f) = filter {
            println!("Filtered by: {}", f);
        }
        println!("{}", "=".repeat(60));
        for (i, cmd) in current.iter().enumerate() {
            println!("{:3}. {}", i + 1, cmd);
        }

        println!("\nActions:");
        println!("1-{}: Select command", current.len());
        if start > 0 {
            println!("p: Previous page");
        }
        if end < entries.len() {
            println!("n: Next page");
        }
        println!("q: Quit");

        let choice = match prompt("Choose an action")? {
            Some(line) => line.trim().to_lowercase(),
            // Closed stdin means nobody is there to answer
            None => return Ok(()),
        };

        if choice == "q" {
            return Ok(());
        } else if choice == "n" && end < entries.len() {
            page += 1;
        } else if choice == "p" && start > 0 {
            page -= 1;
        } else if let Ok(n) = choice.parse::<usize>() {
            if n >= 1 && n <= current.len() {
                break current[n - 1].clone();
            }
            println!("Invalid choice. Please try again.");
        } else {
            println!("Invalid choice. Please try again.");
        }
    };

    registry.save_command(name, &selected)?;
    store.save(&registry).await?;
    println!("\nSaved command '{}': {}", name, selected);
    Ok(())
}

async fn handle_install() -> Result<()> {
    let shell = ShellDetector::detect()?;
    let setup = HistorySetup::new(shell)?;

    match setup.apply()? {
        SetupOutcome::AlreadyConfigured => {
            println!("{} history settings are already in place.", shell);
        }
        SetupOutcome::Updated => {
            println!(
                "Added incremental history settings to {}.",
                setup.rc_path().display()
            );
        }
        SetupOutcome::Created => {
            println!(
                "Created {} with incremental history settings.",
                setup.rc_path().display()
            );
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("EZ_LOG"))
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!(
        r#"ez v{} - save, alias, and replay shell commands

USAGE:
    ez <COMMAND> [ARGS]
    ez <name-or-alias> [args...]

COMMAND MANAGEMENT:
    save (s) <name> <command>     Save a new command ({{0}}, {{1}}, ... mark arguments)
    update (u) <name> <command>   Update an existing command
    delete (d) <name>             Delete a command and its aliases
    rename (r) <old> <new>        Rename a command while keeping its aliases
    copy (c) <old> <new>          Copy an existing command to a new name

ALIAS MANAGEMENT:
    alias (a) <name> <alias>      Add an alias for a command
    alias -d <name> <alias>       Remove a command alias

SEQUENCE MANAGEMENT:
    append <name> <command>       Add a step to an existing command
    pop <name>                    Remove the last step from a sequence

HISTORY:
    replay <name> [filter]        Save a command from shell history
    install                       Enable incremental shell history

UTILITY:
    list (ls)                     Show all saved commands
    version                       Show version
    help                          Show this help

EXAMPLES:
    ez save greet "echo Hello {{0}}"       # Save a command with a placeholder
    ez greet World                         # Runs: echo Hello World
    ez alias greet hi                      # Create alias 'hi' for 'greet'
    ez save find-in "grep -r {{0}} {{1}}"  # Multiple placeholders
    ez find-in TODO ./src                  # Runs: grep -r TODO ./src
    ez append deploy "npm install"         # Grow 'deploy' into a sequence
"#,
        env!("CARGO_PKG_VERSION")
    );
}
