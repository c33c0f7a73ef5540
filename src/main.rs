//! Divinim - demo binary
//!
//! Plays a local game between random players and logs every turn.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use divinim::{
    BoardGenConfig, ChannelObserver, ConfigError, Game, GameConfig, GameEvent, GameId, GameState,
    RandomPlayer, SessionInfo,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "divinim")]
#[command(about = "Slice boards until nothing is left to cut", long_about = None)]
struct Cli {
    /// JSON game config; overrides the rule and board flags below
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Win condition (repeatable): no-moves-left, highest-score, lowest-score
    #[arg(long = "win", value_name = "NAME", default_value = "no-moves-left")]
    win_conditions: Vec<String>,

    /// Score condition (repeatable): marked-squares, total-area
    #[arg(long = "score", value_name = "NAME")]
    score_conditions: Vec<String>,

    /// Number of random players
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Number of boards at setup
    #[arg(long, default_value_t = 3)]
    boards: usize,

    #[arg(long, default_value_t = 2)]
    min_side: u32,

    #[arg(long, default_value_t = 6)]
    max_side: u32,

    /// Probability that a tile starts marked
    #[arg(long, default_value_t = 0.35)]
    mark_probability: f64,

    /// Seed for boards, board ids and player choices
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Thinking delay per random move, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig, ConfigError> {
        if let Some(path) = &self.config {
            let json = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Malformed(format!("{}: {e}", path.display())))?;
            return GameConfig::from_json(&json);
        }

        let config = GameConfig::from_names(&self.win_conditions, &self.score_conditions)?
            .with_board_gen(
                BoardGenConfig::default()
                    .with_board_count(self.boards)
                    .with_sides(self.min_side, self.max_side)
                    .with_mark_probability(self.mark_probability),
            )
            .with_seed(self.seed)
            .with_random_player_delay_ms(self.delay_ms);
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> divinim::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;

    let mut session = SessionInfo::new(GameId::random());
    for seat in 0..cli.players.max(1) {
        session.join(format!("p{seat}"), format!("Random {}", seat + 1));
    }
    let players = session.player_infos();

    let state = GameState::new_random(players.clone(), &config)?;
    for board in state.boards().values() {
        info!(board = %board, hash = %board.content_hash(), "Initial board");
    }

    let mut game = Game::new(config.clone(), state)?.with_game_id(session.game_id);
    for (seat, info) in players.into_iter().enumerate() {
        let player = RandomPlayer::new(info, config.seed.wrapping_add(seat as u64))
            .with_delay(Duration::from_millis(config.random_player_delay_ms));
        game.add_player(Box::new(player))?;
    }

    let (observer, mut events) = ChannelObserver::new();
    game.subscribe(Box::new(observer));
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                GameEvent::TurnPlayed(result) => {
                    let survivors: Vec<_> = result
                        .slice_result
                        .survivors()
                        .map(ToString::to_string)
                        .collect();
                    println!(
                        "turn {:>3}  {:<24} -> [{}]",
                        result.turn_number(),
                        result.turn.to_string(),
                        survivors.join(", ")
                    );
                }
                GameEvent::GameOver { winners } => {
                    let names: Vec<_> = winners.iter().map(|w| w.name.as_str()).collect();
                    println!("winners: {}", names.join(", "));
                }
            }
        }
    });

    game.play_loop().await?;
    let final_state = game.state().clone();
    drop(game);
    let _ = printer.await;

    for player in final_state.players() {
        println!(
            "{:<12} score {}",
            player.name,
            final_state.score_of(&player.id).unwrap_or_default()
        );
    }
    Ok(())
}
