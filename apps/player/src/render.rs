//! Plain-text board.

use match_core::{BatchInfo, CardView, Role};

const COLUMNS: usize = 4;
const BAR_WIDTH: usize = 20;

/// Draw the batch header and the card grid.
pub fn board(cards: &[CardView], info: BatchInfo, complete: bool) -> String {
    let mut out = String::new();

    if complete {
        out.push_str("All pairs matched!\n");
        out.push_str("Type r to play again or q to quit.\n");
        return out;
    }

    let filled = (info.progress * BAR_WIDTH as f64).round() as usize;
    out.push_str(&format!(
        "Batch {} of {}  [{}{}] {:.0}%\n",
        info.current_batch + 1,
        info.total_batches,
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        info.progress * 100.0
    ));

    for (row, chunk) in cards.chunks(COLUMNS).enumerate() {
        let line: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(col, card)| cell(row * COLUMNS + col + 1, card))
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }

    if info.current_batch > 0 {
        out.push_str("p: previous batch  ");
    }
    out.push_str("number: pick a card  q: quit\n");
    out
}

fn cell(number: usize, card: &CardView) -> String {
    let mark = if card.matched {
        'x'
    } else if card.selected {
        '*'
    } else {
        ' '
    };
    let tag = match card.role {
        Role::Word => 'W',
        Role::Definition => 'D',
    };
    format!("{number:>2}[{mark}]{tag} {}", card.content)
}
