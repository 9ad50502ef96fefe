//! Stress Dungeon Engine - headless runner.
//!
//! Registers a demo player against the in-memory adapters and plays rounds of
//! every role's mini-game until the boss falls, logging each health update.

use std::collections::HashMap;

use stressdungeon_domain::{MiniGame, RawParameters, Role};
use stressdungeon_engine::use_cases::{Credentials, DamageDelivery};
use stressdungeon_engine::{App, EngineConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stressdungeon_engine=debug,stressdungeon_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stress Dungeon Engine");

    let config = EngineConfig::from_env();
    tracing::info!(
        frame_interval_ms = config.frame_interval.as_millis() as u64,
        max_frames = config.max_simulation_frames,
        rounds = config.demo_max_rounds,
        "Configuration loaded"
    );

    let app = App::in_memory(&config);
    let credentials = Credentials::new(config.demo_email.clone(), config.demo_password.clone());
    let session = app
        .auth
        .register(&credentials)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    // Log every health change the store pushes
    let mut updates = session.encounter.observe().await?;
    let observer = tokio::spawn(async move {
        while let Some(update) = updates.next().await {
            match update {
                Ok(encounter) => tracing::info!(
                    player_id = %encounter.owner_id(),
                    health = encounter.health().value(),
                    phase = ?encounter.phase(),
                    "Boss health update"
                ),
                Err(e) => tracing::warn!(error = %e, "Boss health update failed"),
            }
        }
    });

    let mut won = false;
    'rounds: for round in 1..=config.demo_max_rounds {
        tracing::info!(round, "Starting round");
        for role in Role::ALL {
            tracing::debug!(role = %role, "{}", role.description());
            for game in role.mini_games() {
                let report = app
                    .mini_games
                    .start(&session.encounter, game, &demo_parameters(game))
                    .wait()
                    .await?;
                tracing::info!(
                    round,
                    role = %role,
                    game = %game,
                    frames = report.frames,
                    "{}",
                    report.message()
                );
                if let DamageDelivery::Applied { health: 0, .. } = report.delivery {
                    won = true;
                    break 'rounds;
                }
            }
        }
    }

    if won {
        let restored = session.encounter.acknowledge_win().await?;
        tracing::info!(health = restored.health().value(), "Victory! The boss has been defeated");
    } else {
        let encounter = session.encounter.current().await?;
        tracing::info!(
            health = encounter.health().value(),
            "Out of rounds before the boss fell"
        );
    }

    // Let the observer drain the final updates before shutting down
    tokio::task::yield_now().await;
    observer.abort();
    Ok(())
}

/// Inputs a practised player would type; everything else uses the form defaults.
fn demo_parameters(game: MiniGame) -> RawParameters {
    let mut raw = HashMap::new();
    if game == MiniGame::SorcererJump {
        raw.insert("jumpForce".to_string(), "100".to_string());
    }
    raw
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
