use serde::{Deserialize, Serialize};

pub type PlayerId = String;

/// A player in the current session's roster.
///
/// Identity is by `id`; two players with identical names but distinct ids
/// are distinct. Created and mutated externally (presence toggle, removal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_present: bool,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_present: true,
        }
    }
}

/// One side of a court: 1 player (singles) or 2 players (doubles).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub players: Vec<PlayerId>,
}

impl Team {
    pub fn new(players: Vec<PlayerId>) -> Self {
        debug_assert!(
            players.len() == 1 || players.len() == 2,
            "a team holds 1 or 2 players, got {}",
            players.len()
        );
        Self { players }
    }

    pub fn singles(player: PlayerId) -> Self {
        Self::new(vec![player])
    }

    pub fn doubles(a: PlayerId, b: PlayerId) -> Self {
        Self::new(vec![a, b])
    }
}

/// Which side won a court, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Team1,
    Team2,
}

/// A playing venue for the current round.
///
/// Courts exist only for the current round; they are not persisted across
/// rounds. `players` holds everyone assigned to the court (team1 ∪ team2 ∪
/// waiting). `team1`/`team2` hold the court's singles player or doubles
/// pair; for a 3-player manually pinned court they are both singles and the
/// third player sits in `waiting` instead of playing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Court {
    pub court_number: u32,
    pub players: Vec<PlayerId>,
    pub team1: Team,
    pub team2: Team,
    /// Present on a 3-player manually pinned court; absent otherwise.
    pub waiting: Option<PlayerId>,
    pub winner: Option<Winner>,
    pub was_manually_assigned: bool,
}

impl Court {
    pub fn is_singles(&self) -> bool {
        self.team1.players.len() == 1
    }

    pub fn winning_team(&self) -> Option<&Team> {
        match self.winner {
            Some(Winner::Team1) => Some(&self.team1),
            Some(Winner::Team2) => Some(&self.team2),
            None => None,
        }
    }

    pub fn losing_team(&self) -> Option<&Team> {
        match self.winner {
            Some(Winner::Team1) => Some(&self.team2),
            Some(Winner::Team2) => Some(&self.team1),
            None => None,
        }
    }
}

/// The output of one `generate` call: every court plus the derived bench.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub courts: Vec<Court>,
    pub bench: Vec<PlayerId>,
}

impl Round {
    pub fn empty() -> Self {
        Self {
            courts: Vec::new(),
            bench: Vec::new(),
        }
    }

    pub fn court_mut(&mut self, court_number: u32) -> Option<&mut Court> {
        self.courts
            .iter_mut()
            .find(|c| c.court_number == court_number)
    }

    pub fn court(&self, court_number: u32) -> Option<&Court> {
        self.courts.iter().find(|c| c.court_number == court_number)
    }
}

/// A current-session record of which ids contributed wins/losses for a
/// specific court winner, used to reverse those contributions on change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub court_number: u32,
    pub winner: Winner,
    pub winning_player_ids: Vec<PlayerId>,
    pub losing_player_ids: Vec<PlayerId>,
}
