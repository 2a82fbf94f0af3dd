//! Game phase flow for regulation, overtime, and the shootout.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    FirstPeriod,
    SecondPeriod,
    ThirdPeriod,
    Overtime,
    Shootout,
    Finished,
}

impl GamePhase {
    /// Period number fed into the simulation formulas; overtime counts as a
    /// fourth period. `None` for phases that are not played in periods.
    pub fn period_number(self) -> Option<u8> {
        match self {
            GamePhase::FirstPeriod => Some(1),
            GamePhase::SecondPeriod => Some(2),
            GamePhase::ThirdPeriod => Some(3),
            GamePhase::Overtime => Some(4),
            GamePhase::Shootout | GamePhase::Finished => None,
        }
    }
}

/// Advance after the current phase ends.
///
/// `is_tied` should reflect the score at the end of the phase. Overtime and
/// the shootout are reachable only on a tie.
pub fn next_phase(current: GamePhase, is_tied: bool) -> GamePhase {
    match current {
        GamePhase::FirstPeriod => GamePhase::SecondPeriod,
        GamePhase::SecondPeriod => GamePhase::ThirdPeriod,
        GamePhase::ThirdPeriod => {
            if is_tied {
                GamePhase::Overtime
            } else {
                GamePhase::Finished
            }
        }
        GamePhase::Overtime => {
            if is_tied {
                GamePhase::Shootout
            } else {
                GamePhase::Finished
            }
        }
        GamePhase::Shootout => GamePhase::Finished,
        GamePhase::Finished => GamePhase::Finished,
    }
}
