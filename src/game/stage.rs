//! Game stages (screens) and their legal transitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Active screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Landing,
    NameEntry,
    Setup,
    Playing,
    Results,
}

impl Stage {
    /// Get the next stage in the forward sequence
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Landing => Some(Stage::NameEntry),
            Stage::NameEntry => Some(Stage::Setup),
            Stage::Setup => Some(Stage::Playing),
            Stage::Playing => Some(Stage::Results),
            Stage::Results => None, // Leaves via play again or new game
        }
    }

    /// Is `to` a legal transition from this stage?
    pub fn can_transition_to(&self, to: Stage) -> bool {
        match self {
            Stage::Results => matches!(to, Stage::Setup | Stage::Landing),
            _ => self.next() == Some(to),
        }
    }

    /// Can the round engine take moves in this stage?
    pub fn accepts_moves(&self) -> bool {
        matches!(self, Stage::Playing)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Landing => "landing",
            Stage::NameEntry => "name entry",
            Stage::Setup => "setup",
            Stage::Playing => "playing",
            Stage::Results => "results",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Stage; 5] = [
        Stage::Landing,
        Stage::NameEntry,
        Stage::Setup,
        Stage::Playing,
        Stage::Results,
    ];

    #[test]
    fn test_stage_progression() {
        let mut stage = Stage::Landing;
        stage = stage.next().unwrap();
        assert_eq!(stage, Stage::NameEntry);
        stage = stage.next().unwrap();
        assert_eq!(stage, Stage::Setup);
        stage = stage.next().unwrap();
        assert_eq!(stage, Stage::Playing);
        stage = stage.next().unwrap();
        assert_eq!(stage, Stage::Results);
        assert_eq!(stage.next(), None);
    }

    #[test]
    fn test_legal_transitions() {
        let legal = [
            (Stage::Landing, Stage::NameEntry),
            (Stage::NameEntry, Stage::Setup),
            (Stage::Setup, Stage::Playing),
            (Stage::Playing, Stage::Results),
            (Stage::Results, Stage::Setup),
            (Stage::Results, Stage::Landing),
        ];

        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_only_playing_accepts_moves() {
        for stage in ALL {
            assert_eq!(stage.accepts_moves(), stage == Stage::Playing);
        }
    }
}
