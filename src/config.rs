//! Application-level configuration loading for the board client and the feed server.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::surface::Transition;

/// Default location on disk where both binaries look for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/board.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "STANDINGS_BOARD_CONFIG_PATH";

const DEFAULT_FEED_URL: &str = "http://localhost:8000";
const DEFAULT_EASING: &str = "cubic-bezier(0.2,0,0,1)";
const REVEAL_EASING: &str = "ease";

#[derive(Debug, Clone, Default)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Settings of the animated board client.
    pub board: BoardConfig,
    /// Settings of the feed server.
    pub server: FeedServerConfig,
}

/// Settings of the animated board client.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Where and how often to poll.
    pub feed: FeedConfig,
    /// Number of rows (teams) drawn on the board.
    pub team_count: usize,
    /// Transition timings.
    pub animation: AnimationConfig,
    /// Race simulation pacing.
    pub race: RaceConfig,
    /// Final countdown pacing.
    pub reveal: RevealConfig,
}

/// Polling endpoints and cadence.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the feed server, without trailing slash.
    pub base_url: String,
    /// Interval between two `/api/scores` polls.
    pub scores_poll_interval: Duration,
    /// Interval between two `/api/final` polls.
    pub final_poll_interval: Duration,
    /// Upper bound for a single feed request.
    pub request_timeout: Duration,
}

/// Transitions used by the animation scheduler.
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Transition applied to both sides of an overtake.
    pub swap: Transition,
    /// Transition applied to hide/show during the final countdown.
    pub reveal: Transition,
    /// How long a disclosed entry stays emphasised.
    pub reveal_pop: Duration,
}

/// Race simulation pacing.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// Number of random permutations shown before settling.
    pub shuffle_steps: usize,
    /// Delay between two permutations.
    pub shuffle_interval: Duration,
    /// Pause between the last permutation and the real ranking.
    pub settle_delay: Duration,
    /// Pause after the ranking settled before the race goes back to idle.
    pub cooldown: Duration,
    /// Minimum time between two accepted triggers.
    pub retrigger_cooldown: Duration,
}

/// How the final countdown is paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    /// The start signal alone discloses every rank on a timer.
    SelfPaced,
    /// Each disclosure is requested by the final feed.
    ExternallyPaced,
}

/// Final countdown settings.
#[derive(Debug, Clone)]
pub struct RevealConfig {
    /// Pacing policy.
    pub policy: RevealPolicy,
    /// Delay before each self-paced disclosure outside the podium.
    pub spacing: Duration,
    /// Delay before each self-paced disclosure of the top 3.
    pub podium_spacing: Duration,
}

/// Settings of the feed server.
#[derive(Debug, Clone)]
pub struct FeedServerConfig {
    /// TCP port to listen on.
    pub port: u16,
    /// How long the race flag stays raised after `/round`.
    pub round_flag_reset: Duration,
    /// Number of rounds in the event.
    pub max_rounds: u32,
    /// Token required in `X-Admin-Token` for admin routes, if any.
    pub admin_token: Option<String>,
    /// Team roster, in board row order.
    pub teams: Vec<TeamDefinition>,
}

/// One configured team.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamDefinition {
    /// Display name.
    pub name: String,
    /// Alternative spellings accepted by operator commands.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl TeamDefinition {
    /// Build a definition from borrowed strings.
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        teams = app_config.server.teams.len(),
                        policy = ?app_config.board.reveal.policy,
                        "loaded board configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document; omitted sections and fields keep their defaults.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        RawConfig::default().into_board()
    }
}

impl Default for FeedServerConfig {
    fn default() -> Self {
        RawConfig::default().server.into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    feed: RawFeed,
    board: RawBoard,
    animation: RawAnimation,
    race: RawRace,
    reveal: RawReveal,
    server: RawServer,
}

impl RawConfig {
    fn into_board(self) -> BoardConfig {
        BoardConfig {
            feed: FeedConfig {
                base_url: self.feed.base_url.trim_end_matches('/').to_string(),
                scores_poll_interval: millis(self.feed.scores_poll_ms),
                final_poll_interval: millis(self.feed.final_poll_ms),
                request_timeout: millis(self.feed.request_timeout_ms),
            },
            team_count: self.board.team_count,
            animation: AnimationConfig {
                swap: Transition::new(millis(self.animation.swap_duration_ms), self.animation.easing),
                reveal: Transition::new(millis(self.animation.reveal_duration_ms), REVEAL_EASING),
                reveal_pop: millis(self.animation.reveal_pop_ms),
            },
            race: RaceConfig {
                shuffle_steps: self.race.shuffle_steps,
                shuffle_interval: millis(self.race.shuffle_interval_ms),
                settle_delay: millis(self.race.settle_delay_ms),
                cooldown: millis(self.race.cooldown_ms),
                retrigger_cooldown: millis(self.race.retrigger_cooldown_ms),
            },
            reveal: RevealConfig {
                policy: self.reveal.policy,
                spacing: millis(self.reveal.spacing_ms),
                podium_spacing: millis(self.reveal.podium_spacing_ms),
            },
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(mut value: RawConfig) -> Self {
        let server = std::mem::take(&mut value.server).into();
        Self {
            board: value.into_board(),
            server,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawFeed {
    base_url: String,
    scores_poll_ms: u64,
    final_poll_ms: u64,
    request_timeout_ms: u64,
}

impl Default for RawFeed {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_URL.into(),
            scores_poll_ms: 1_000,
            final_poll_ms: 500,
            request_timeout_ms: 2_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawBoard {
    team_count: usize,
}

impl Default for RawBoard {
    fn default() -> Self {
        Self {
            team_count: default_teams().len(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawAnimation {
    swap_duration_ms: u64,
    easing: String,
    reveal_duration_ms: u64,
    reveal_pop_ms: u64,
}

impl Default for RawAnimation {
    fn default() -> Self {
        Self {
            swap_duration_ms: 500,
            easing: DEFAULT_EASING.into(),
            reveal_duration_ms: 500,
            reveal_pop_ms: 300,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawRace {
    shuffle_steps: usize,
    shuffle_interval_ms: u64,
    settle_delay_ms: u64,
    cooldown_ms: u64,
    retrigger_cooldown_ms: u64,
}

impl Default for RawRace {
    fn default() -> Self {
        Self {
            shuffle_steps: 5,
            shuffle_interval_ms: 400,
            settle_delay_ms: 300,
            cooldown_ms: 600,
            retrigger_cooldown_ms: 6_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawReveal {
    policy: RevealPolicy,
    spacing_ms: u64,
    podium_spacing_ms: u64,
}

impl Default for RawReveal {
    fn default() -> Self {
        Self {
            policy: RevealPolicy::ExternallyPaced,
            spacing_ms: 1_500,
            podium_spacing_ms: 3_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawServer {
    port: u16,
    round_flag_reset_ms: u64,
    max_rounds: u32,
    admin_token: Option<String>,
    teams: Vec<TeamDefinition>,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            port: 8000,
            round_flag_reset_ms: 5_000,
            max_rounds: 11,
            admin_token: None,
            teams: default_teams(),
        }
    }
}

impl From<RawServer> for FeedServerConfig {
    fn from(value: RawServer) -> Self {
        Self {
            port: value.port,
            round_flag_reset: millis(value.round_flag_reset_ms),
            max_rounds: value.max_rounds,
            admin_token: value.admin_token.filter(|token| !token.is_empty()),
            teams: value.teams,
        }
    }
}

fn millis(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in roster shipped with the binary.
fn default_teams() -> Vec<TeamDefinition> {
    vec![
        TeamDefinition::new("WILLIAMS", &["williams", "виллиамс", "вилл"]),
        TeamDefinition::new("MERCEDES", &["mercedes", "мерседес", "мерс"]),
        TeamDefinition::new("MCLAREN", &["mclaren", "макларен", "мак"]),
        TeamDefinition::new("FERRARI", &["ferrari", "феррари", "скудерия"]),
        TeamDefinition::new("SITRAK", &["sitrak", "ситрак"]),
        TeamDefinition::new("RED BULL", &["redbull", "ред булл", "булл"]),
        TeamDefinition::new("HOWO", &["howo", "хоуо"]),
        TeamDefinition::new("ASTON MARTIN", &["aston", "астон", "астонмартин"]),
        TeamDefinition::new("LADA", &["лада", "lada", "ваз"]),
        TeamDefinition::new("AURUS", &["aurus", "аурус"]),
        TeamDefinition::new("БАЗ", &["баз", "baz", "камаз"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_event_setup() {
        let config = AppConfig::default();
        assert_eq!(config.board.team_count, 11);
        assert_eq!(config.board.feed.scores_poll_interval, Duration::from_millis(1_000));
        assert_eq!(config.board.feed.final_poll_interval, Duration::from_millis(500));
        assert_eq!(config.board.race.shuffle_steps, 5);
        assert_eq!(config.board.race.retrigger_cooldown, Duration::from_secs(6));
        assert_eq!(config.board.reveal.policy, RevealPolicy::ExternallyPaced);
        assert_eq!(config.board.animation.swap.duration, Duration::from_millis(500));
        assert_eq!(config.server.teams.len(), 11);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn partial_documents_keep_remaining_defaults() {
        let config = AppConfig::from_json(
            r#"{
                "feed": { "base_url": "http://scores.local:9000/" },
                "race": { "retrigger_cooldown_ms": 15000 },
                "reveal": { "policy": "self_paced" },
                "server": { "admin_token": "", "teams": [{ "name": "LADA" }] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.board.feed.base_url, "http://scores.local:9000");
        assert_eq!(config.board.feed.scores_poll_interval, Duration::from_secs(1));
        assert_eq!(config.board.race.retrigger_cooldown, Duration::from_secs(15));
        assert_eq!(config.board.race.shuffle_interval, Duration::from_millis(400));
        assert_eq!(config.board.reveal.policy, RevealPolicy::SelfPaced);
        assert_eq!(config.server.admin_token, None);
        assert_eq!(config.server.teams, vec![TeamDefinition::new("LADA", &[])]);
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        assert!(AppConfig::from_json(r#"{ "reveal": { "policy": "random" } }"#).is_err());
    }
}
