use colorwheel_types::wheel::{
    expected_return, multiplier_sum, wedge_count, wedges, BetState, Color, RoundEvent,
    RoundOutcome, RoundPhase, TableSnapshot,
};

pub fn format_bets(bets: &BetState) -> String {
    if bets.is_empty() {
        return "no bets".to_string();
    }
    bets.iter()
        .filter(|(_, stake)| *stake > 0)
        .map(|(color, stake)| format!("{color} {stake}"))
        .collect::<Vec<_>>()
        .join(" · ")
}

pub fn format_outcome(outcome: &RoundOutcome) -> String {
    let landed = format!(
        "Round {} landed on wedge {} ({} x{})",
        outcome.round_id, outcome.winning_index, outcome.color, outcome.multiplier
    );
    if outcome.is_win() {
        format!(
            "{landed}: won {} on a {} stake",
            outcome.winnings, outcome.wager
        )
    } else {
        format!("{landed}: no win this time, better luck next spin")
    }
}

/// One log line per event. The idle transition is covered by the reset line.
pub fn format_event(event: &RoundEvent) -> Option<String> {
    let line = match event {
        RoundEvent::BetsChanged { bets, balance } => {
            format!("Bets: {} | balance {balance}", format_bets(bets))
        }
        RoundEvent::PhaseChanged {
            round_id, phase, ..
        } => match phase {
            RoundPhase::Spinning => format!("Round {round_id}: wheel spinning…"),
            RoundPhase::Settled => format!("Round {round_id}: wheel stopped"),
            RoundPhase::Idle => return None,
        },
        RoundEvent::OutcomePublished { outcome, balance } => {
            format!("{} | balance {balance}", format_outcome(outcome))
        }
        RoundEvent::RoundReset {
            round_id, balance, ..
        } => format!("Round {round_id}: place your bets (balance {balance})"),
    };
    Some(line)
}

pub fn format_status(snapshot: &TableSnapshot, chip: u64) -> String {
    let mut out = format!(
        "Round {} · {} · balance {} · staked {} · chip {}\nBets: {}",
        snapshot.round_id,
        snapshot.phase,
        snapshot.balance,
        snapshot.total_staked,
        chip,
        format_bets(&snapshot.bets),
    );
    if let Some(outcome) = &snapshot.outcome {
        out.push('\n');
        out.push_str(&format_outcome(outcome));
    }
    out
}

pub fn format_wheel() -> String {
    let mut out = String::from("Wheel (pointer at the top, clockwise):\n");
    for (chunk_idx, chunk) in wedges().chunks(10).enumerate() {
        let row = chunk
            .iter()
            .enumerate()
            .map(|(i, w)| {
                format!(
                    "{:>2}:{}{:<3}",
                    chunk_idx * 10 + i,
                    &w.color.as_str()[..1],
                    w.label()
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&row);
        out.push('\n');
    }
    for color in Color::ALL {
        out.push_str(&format!(
            "  {:<5} {:>2} wedges  Σx{:<3} return {:.3}\n",
            color.as_str(),
            wedge_count(color),
            multiplier_sum(color),
            expected_return(color)
        ));
    }
    out
}
