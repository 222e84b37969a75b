use thiserror::Error;

use crate::config::TeamDefinition;

/// Team tracked by the feed server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// 1-based identifier, matching the board row the team is drawn in.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Alternative spellings accepted by operator commands.
    pub aliases: Vec<String>,
    /// Current score.
    pub score: i64,
}

impl Team {
    /// Case-insensitive match against the team name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.name.to_lowercase() == wanted
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase() == wanted)
    }
}

/// Progress of the final countdown as seen by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalCountdown {
    /// The countdown was never started.
    Inactive,
    /// The countdown was started and nothing is disclosed yet.
    Started,
    /// Rank `index` (0 = best) is the one currently disclosed.
    Disclosed(usize),
}

/// One step of the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalStep {
    /// Zero-based rank that was disclosed.
    pub index: usize,
    /// Team holding that rank.
    pub team: Team,
    /// Whether this step disclosed the winner.
    pub finished: bool,
}

/// Reasons the countdown cannot advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FinalStepError {
    /// `next` was requested before the countdown was started.
    #[error("final countdown has not been started")]
    NotStarted,
    /// Every rank was already disclosed.
    #[error("final countdown already finished")]
    Finished,
    /// There are no teams to disclose.
    #[error("no teams on the scoreboard")]
    Empty,
}

/// Reasons a score adjustment is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PointsError {
    /// No team answers to the given name.
    #[error("unknown team")]
    UnknownTeam,
    /// The new score does not fit in an `i64`.
    #[error("adding {delta} to {score} overflows the score")]
    Overflow {
        /// Score before the adjustment.
        score: i64,
        /// Requested adjustment.
        delta: i64,
    },
}

/// In-memory scoreboard backing the polling endpoints.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    teams: Vec<Team>,
    round: u32,
    max_rounds: u32,
    trigger_round: bool,
    countdown: FinalCountdown,
}

impl Scoreboard {
    /// Create a scoreboard with every configured team at zero points.
    pub fn new(definitions: &[TeamDefinition], max_rounds: u32) -> Self {
        let teams = definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| Team {
                id: index as u32 + 1,
                name: definition.name.clone(),
                aliases: definition.aliases.clone(),
                score: 0,
            })
            .collect();

        Self {
            teams,
            round: 1,
            max_rounds,
            trigger_round: false,
            countdown: FinalCountdown::Inactive,
        }
    }

    /// Teams in row order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Round currently announced.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Total number of rounds in the event.
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Whether the board should currently start a race.
    pub fn trigger_round(&self) -> bool {
        self.trigger_round
    }

    /// Countdown progress.
    pub fn countdown(&self) -> FinalCountdown {
        self.countdown
    }

    /// Value published on the final feed: `-2` started, `-1` inactive, otherwise the disclosed rank.
    pub fn final_index(&self) -> i64 {
        match self.countdown {
            FinalCountdown::Inactive => -1,
            FinalCountdown::Started => -2,
            FinalCountdown::Disclosed(index) => index as i64,
        }
    }

    /// Find a team by name or alias.
    pub fn find_team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.answers_to(name))
    }

    /// Add `delta` points to the team answering to `name`, returning `(previous, current)` scores.
    pub fn add_points(&mut self, name: &str, delta: i64) -> Result<(i64, i64), PointsError> {
        let team = self
            .teams
            .iter_mut()
            .find(|team| team.answers_to(name))
            .ok_or(PointsError::UnknownTeam)?;
        let previous = team.score;
        team.score = previous
            .checked_add(delta)
            .ok_or(PointsError::Overflow { score: previous, delta })?;
        Ok((previous, team.score))
    }

    /// Reset every score to zero.
    pub fn reset_scores(&mut self) {
        for team in &mut self.teams {
            team.score = 0;
        }
    }

    /// Teams sorted by score, best first; ties keep row order.
    pub fn ranked(&self) -> Vec<&Team> {
        let mut ranked: Vec<&Team> = self.teams.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Raise the race flag and return the round being started.
    pub fn raise_round_flag(&mut self) -> u32 {
        let round = self.round;
        self.trigger_round = true;
        self.round = (self.round + 1).min(self.max_rounds.max(1));
        round
    }

    /// Drop the race flag.
    pub fn lower_round_flag(&mut self) {
        self.trigger_round = false;
    }

    /// Start (or restart) the final countdown.
    pub fn start_final(&mut self) {
        self.countdown = FinalCountdown::Started;
    }

    /// Disclose the next rank, from the last place up to the winner.
    pub fn next_final(&mut self) -> Result<FinalStep, FinalStepError> {
        let count = self.teams.len();
        if count == 0 {
            return Err(FinalStepError::Empty);
        }

        let index = match self.countdown {
            FinalCountdown::Inactive => return Err(FinalStepError::NotStarted),
            FinalCountdown::Started => count - 1,
            FinalCountdown::Disclosed(0) => return Err(FinalStepError::Finished),
            FinalCountdown::Disclosed(current) => current.min(count) - 1,
        };

        let team = self.ranked()[index].clone();
        self.countdown = FinalCountdown::Disclosed(index);
        Ok(FinalStep {
            index,
            team,
            finished: index == 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<TeamDefinition> {
        vec![
            TeamDefinition::new("WILLIAMS", &["williams", "вилл"]),
            TeamDefinition::new("MERCEDES", &["mercedes", "мерс"]),
            TeamDefinition::new("FERRARI", &["ferrari", "скудерия"]),
        ]
    }

    #[test]
    fn teams_are_found_by_name_or_alias() {
        let board = Scoreboard::new(&roster(), 11);
        assert_eq!(board.find_team("Williams").unwrap().id, 1);
        assert_eq!(board.find_team("МЕРС").unwrap().id, 2);
        assert!(board.find_team("lada").is_none());
    }

    #[test]
    fn add_points_accumulates_and_reset_clears() {
        let mut board = Scoreboard::new(&roster(), 11);
        assert_eq!(board.add_points("ferrari", 5), Ok((0, 5)));
        assert_eq!(board.add_points("скудерия", -2), Ok((5, 3)));
        assert_eq!(board.add_points("unknown", 1), Err(PointsError::UnknownTeam));

        board.reset_scores();
        assert!(board.teams().iter().all(|team| team.score == 0));
    }

    #[test]
    fn overflowing_scores_are_refused_and_left_untouched() {
        let mut board = Scoreboard::new(&roster(), 11);
        assert_eq!(board.add_points("williams", i64::MAX), Ok((0, i64::MAX)));
        assert_eq!(
            board.add_points("williams", 1),
            Err(PointsError::Overflow { score: i64::MAX, delta: 1 })
        );
        assert_eq!(board.find_team("williams").unwrap().score, i64::MAX);
        assert!(board.add_points("williams", -1).is_ok());
    }

    #[test]
    fn round_flag_advances_round_up_to_the_maximum() {
        let mut board = Scoreboard::new(&roster(), 2);
        assert_eq!(board.raise_round_flag(), 1);
        assert!(board.trigger_round());
        assert_eq!(board.raise_round_flag(), 2);
        assert_eq!(board.raise_round_flag(), 2);
        board.lower_round_flag();
        assert!(!board.trigger_round());
    }

    #[test]
    fn countdown_walks_from_last_place_to_winner() {
        let mut board = Scoreboard::new(&roster(), 11);
        board.add_points("mercedes", 10).unwrap();
        board.add_points("ferrari", 5).unwrap();

        assert_eq!(board.final_index(), -1);
        assert_eq!(board.next_final(), Err(FinalStepError::NotStarted));

        board.start_final();
        assert_eq!(board.final_index(), -2);

        let third = board.next_final().unwrap();
        assert_eq!((third.index, third.team.name.as_str()), (2, "WILLIAMS"));
        assert_eq!(board.final_index(), 2);

        let second = board.next_final().unwrap();
        assert_eq!(second.team.name, "FERRARI");
        assert!(!second.finished);

        let winner = board.next_final().unwrap();
        assert_eq!(winner.team.name, "MERCEDES");
        assert!(winner.finished);
        assert_eq!(board.final_index(), 0);

        assert_eq!(board.next_final(), Err(FinalStepError::Finished));

        board.start_final();
        assert_eq!(board.next_final().unwrap().index, 2);
    }
}
