pub mod config;
pub mod error;
pub mod input;
pub mod loader;
pub mod render;
pub mod scheduler;

use match_core::{Outcome, Scheduler, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::input::Input;
use crate::scheduler::TokioScheduler;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env(std::env::args().nth(1))?;
    let pairs = loader::load_pairs(&config.pairs_path)?;

    let (tx, mut timers) = mpsc::unbounded_channel();
    let mut session = Session::new(pairs, config.settings, TokioScheduler::new(tx))?
        .on_complete(|| tracing::info!("game complete"));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_board(&session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match input::parse(&line, session.deck().len()) {
                    Ok(Input::Quit) => break,
                    Ok(input) => {
                        handle_input(&mut session, input);
                    }
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                }
            }
            Some(timer) = timers.recv() => {
                session.tick(timer);
            }
        }
        print_board(&session);
    }

    tracing::info!("player exiting");
    Ok(())
}

/// Apply a parsed command to the session. `Quit` is left to the caller.
pub fn handle_input<S: Scheduler>(session: &mut Session<S>, input: Input) -> Option<Outcome> {
    let outcome = match input {
        Input::Select(index) => {
            let card_id = session.deck().cards().get(index)?.id.clone();
            session.select_card(&card_id)
        }
        Input::Previous => session.retreat_batch(),
        Input::PlayAgain => session.play_again(),
        Input::Quit => return None,
    };
    Some(outcome)
}

fn print_board<S: Scheduler>(session: &Session<S>) {
    print!(
        "{}",
        render::board(&session.cards(), session.batch_info(), session.is_complete())
    );
}
