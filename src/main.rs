use anyhow::Result;
use clap::Parser;
use log::{debug, error, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use taskwise::cli::Cli;
use taskwise::clock::{Clock, FixedClock, SystemClock};
use taskwise::config::Config;
use taskwise::lists;
use taskwise::report::Report;
use taskwise::TaskParser;

fn main() -> Result<()> {
    taskwise::init_logger();

    let cli = Cli::parse();
    debug!("Arguments: {:?}", cli);

    let config = load_config(&cli)?;
    let clock: Box<dyn Clock> = match &cli.now {
        Some(value) => Box::new(FixedClock::parse(value)?),
        None => Box::new(SystemClock),
    };
    let parser = TaskParser::new(config, clock);

    match cli.title() {
        Some(title) => print_task(&parser, &title, &cli),
        None => run_interactive(&parser, &cli),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn print_task(parser: &TaskParser, input: &str, cli: &Cli) -> Result<()> {
    let task = parser.parse(input);
    let resolved = task
        .list_hint
        .as_deref()
        .and_then(|hint| lists::resolve_list(hint, &cli.lists));
    let report = Report::new(&task, resolved);

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn run_interactive(parser: &TaskParser, cli: &Cli) -> Result<()> {
    info!("Starting interactive mode");
    let mut rl = DefaultEditor::new()?;
    println!("Type a task to see what gets extracted. 'exit' or CTRL-D to quit.");

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                let _ = rl.add_history_entry(line);
                if let Err(err) = print_task(parser, line, cli) {
                    error!("Failed to render task: {:?}", err);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
