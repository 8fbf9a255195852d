use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_table_has_forty_wedges() {
    assert_eq!(WEDGE_TABLE.len(), WEDGE_COUNT);
    assert_eq!(wedges().len(), 40);
    assert!(wedge(39).is_some());
    assert!(wedge(40).is_none());
}

#[test]
fn test_table_landmarks() {
    assert_eq!(WEDGE_TABLE[0], Wedge::new(Color::Gold, 20));
    assert_eq!(WEDGE_TABLE[1], Wedge::new(Color::Red, 2));
    assert_eq!(WEDGE_TABLE[20], Wedge::new(Color::Gold, 15));
    assert_eq!(WEDGE_TABLE[35], Wedge::new(Color::Blue, 10));
    assert_eq!(WEDGE_TABLE[39], Wedge::new(Color::Red, 2));
    assert!(WEDGE_TABLE.iter().all(|w| w.multiplier > 0));
}

#[test]
fn test_wedge_counts_per_color() {
    assert_eq!(wedge_count(Color::Red), 15);
    assert_eq!(wedge_count(Color::White), 13);
    assert_eq!(wedge_count(Color::Blue), 10);
    assert_eq!(wedge_count(Color::Gold), 2);
    let total: usize = Color::ALL.iter().map(|c| wedge_count(*c)).sum();
    assert_eq!(total, WEDGE_COUNT);
}

#[test]
fn test_expected_return_table() {
    // Hand-computed from the wedge order.
    assert_eq!(multiplier_sum(Color::Red), 37);
    assert_eq!(multiplier_sum(Color::White), 37);
    assert_eq!(multiplier_sum(Color::Blue), 37);
    assert_eq!(multiplier_sum(Color::Gold), 35);

    assert!(approx(expected_return(Color::Red), 0.925));
    assert!(approx(expected_return(Color::White), 0.925));
    assert!(approx(expected_return(Color::Blue), 0.925));
    assert!(approx(expected_return(Color::Gold), 0.875));
}

#[test]
fn test_wedge_label() {
    assert_eq!(WEDGE_TABLE[0].label(), "x20");
    assert_eq!(WEDGE_TABLE[35].label(), "x10");
}

#[test]
fn test_color_parsing() {
    assert_eq!("red".parse::<Color>(), Ok(Color::Red));
    assert_eq!("WHITE".parse::<Color>(), Ok(Color::White));
    assert_eq!(" Blue ".parse::<Color>(), Ok(Color::Blue));
    assert_eq!("g".parse::<Color>(), Ok(Color::Gold));
    assert_eq!(
        "green".parse::<Color>(),
        Err(RoundError::UnknownColor("green".to_string()))
    );
}

#[test]
fn test_color_indices() {
    for (idx, color) in Color::ALL.iter().enumerate() {
        assert_eq!(color.index(), idx);
        assert_eq!(Color::try_from(idx as u8), Ok(*color));
    }
    assert!(Color::try_from(4).is_err());
    assert_eq!(Color::Gold.to_string(), "Gold");
}

#[test]
fn test_slice_angle() {
    assert!(approx(SLICE_ANGLE_DEG, 9.0));
}

#[test]
fn test_wedge_spans_tile_the_circle() {
    assert_eq!(wedge_span(0), (-4.5, 4.5));
    assert_eq!(wedge_span(1), (4.5, 13.5));
    assert_eq!(wedge_span(39), (346.5, 355.5));
    for i in 0..WEDGE_COUNT - 1 {
        assert!(approx(wedge_span(i).1, wedge_span(i + 1).0));
        let (start, end) = wedge_span(i);
        assert!(approx((start + end) / 2.0, wedge_center(i)));
    }
}

#[test]
fn test_label_anchor() {
    let anchor = label_anchor(10, 220.0);
    assert!(approx(anchor.radius, 154.0));
    assert!(approx(anchor.angle_deg, 90.0));
}

#[test]
fn test_landing_rotation() {
    assert!(approx(landing_rotation(0.0, 0), 1080.0));
    assert!(approx(landing_rotation(0.0, 5), 1035.0));
    assert!(approx(landing_rotation(1035.0, 39), 1764.0));
}

#[test]
fn test_landing_rotation_aligns_from_whole_turns() {
    for turns in 0..3 {
        let start = turns as f64 * 360.0;
        for i in 0..WEDGE_COUNT {
            assert_eq!(wedge_at_pointer(landing_rotation(start, i)), i);
        }
    }
}

#[test]
fn test_wedge_at_pointer_wraps() {
    assert_eq!(wedge_at_pointer(0.0), 0);
    assert_eq!(wedge_at_pointer(-9.0), 1);
    assert_eq!(wedge_at_pointer(9.0), 39);
    assert_eq!(wedge_at_pointer(720.0), 0);
}

#[test]
fn test_bet_state_defaults_and_totals() {
    let mut bets = BetState::default();
    assert!(bets.is_empty());
    assert_eq!(bets.total(), 0);
    assert_eq!(bets.iter().count(), 4);

    bets.add(Color::Red, 10);
    bets.add(Color::Blue, 5);
    bets.add(Color::Red, 25);
    assert_eq!(bets[Color::Red], 35);
    assert_eq!(bets.stake(Color::Blue), 5);
    assert_eq!(bets.stake(Color::Gold), 0);
    assert_eq!(bets.total(), 40);

    bets.clear();
    assert!(bets.is_empty());
}

#[test]
fn test_bet_state_serializes_every_color() {
    let mut bets = BetState::default();
    bets.add(Color::White, 25);
    let json = serde_json::to_value(bets).expect("serialize");
    assert_eq!(json["Red"], 0);
    assert_eq!(json["White"], 25);
    assert_eq!(json["Blue"], 0);
    assert_eq!(json["Gold"], 0);

    let partial: BetState = serde_json::from_str(r#"{"Gold":7}"#).expect("deserialize");
    assert_eq!(partial.stake(Color::Gold), 7);
    assert_eq!(partial.total(), 7);
}

#[test]
fn test_round_event_tagging() {
    let event = RoundEvent::OutcomePublished {
        outcome: RoundOutcome {
            round_id: 1,
            winning_index: 1,
            color: Color::Red,
            multiplier: 2,
            wager: 10,
            winnings: 20,
        },
        balance: 505,
    };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(json["type"], "outcome_published");
    assert_eq!(json["outcome"]["color"], "Red");
    assert_eq!(json["balance"], 505);

    let phase = RoundEvent::PhaseChanged {
        round_id: 1,
        phase: RoundPhase::Idle,
        phase_ends_at_ms: None,
        rotation_deg: 0.0,
    };
    let json = serde_json::to_value(&phase).expect("serialize");
    assert_eq!(json["phase"], "idle");
    assert!(json.get("phase_ends_at_ms").is_none());
}

#[test]
fn test_error_codes() {
    assert_eq!(RoundError::InvalidAmount.code(), "INVALID_AMOUNT");
    assert_eq!(
        RoundError::InsufficientFunds {
            balance: 500,
            amount: 1000
        }
        .code(),
        "INSUFFICIENT_FUNDS"
    );
    assert_eq!(RoundError::NoActiveBet.code(), "NO_ACTIVE_BET");
    assert_eq!(
        RoundError::WrongPhase { phase: RoundPhase::Spinning }.to_string(),
        "not allowed while spinning"
    );
}
