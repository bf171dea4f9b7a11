//! JSON-lines front end for the game runtime.
//!
//! Reads one `Action` per stdin line, writes outbound messages to stdout as
//! `{"to": ..., "msg": ...}` objects. Real transports sit in front of the
//! same `GameHandle`.

use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use sevens_server::runtime::Scope;
use sevens_server::{Action, EngineConfig, GameServer, Lobby};

mod telemetry;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    telemetry::init_tracing();

    let config = EngineConfig::from_env();
    let roster =
        std::env::var("SEVENS_PLAYERS").unwrap_or_else(|_| "alice,bob,carol".to_string());
    let mut lobby = Lobby::new();
    for name in roster.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        lobby.add_ready(name, Some(uuid::Uuid::new_v4()));
    }

    let (handle, mut outbound) = GameServer::spawn(config, lobby);

    tokio::spawn(async move {
        while let Some(out) = outbound.recv().await {
            let to = match out.scope {
                Scope::All => json!("all"),
                Scope::Player(id) => json!(id),
            };
            match serde_json::to_value(&out.msg) {
                Ok(msg) => println!("{}", json!({ "to": to, "msg": msg })),
                Err(err) => warn!(error = %err, "unserializable outbound message"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Action>(&line) {
            Ok(action) => {
                if handle.send(action).is_err() {
                    break;
                }
            }
            Err(err) => warn!(error = %err, "unparseable action line"),
        }
    }
}
