//! Commands typed at the prompt.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Zero-based index into the deck.
    Select(usize),
    Previous,
    PlayAgain,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error("no card {number}; pick 1 to {cards}")]
    OutOfRange { number: usize, cards: usize },
}

/// Parse one line. Card numbers are 1-based.
pub fn parse(line: &str, cards: usize) -> Result<Input, InputError> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "p" | "prev" => return Ok(Input::Previous),
        "r" | "again" => return Ok(Input::PlayAgain),
        "q" | "quit" => return Ok(Input::Quit),
        _ => {}
    }

    let number: usize = line
        .parse()
        .map_err(|_| InputError::Unknown(line.to_string()))?;
    if number == 0 || number > cards {
        return Err(InputError::OutOfRange { number, cards });
    }
    Ok(Input::Select(number - 1))
}
