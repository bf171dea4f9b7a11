//! Detached timers that post commands back into the runtime channel.
//!
//! Every armed timer is a spawned sleep racing a `CancellationToken`. Timers
//! carry the generation current at arm time; cancellation is best-effort
//! because the generation check on delivery is the real guard.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::state::PlayerId;
use crate::runtime::commands::{Command, TeardownStep};

pub struct TimerRegistry {
    tx: UnboundedSender<Command>,
    reconnect: HashMap<PlayerId, CancellationToken>,
    bot: Option<CancellationToken>,
    teardown: Option<CancellationToken>,
}

impl TimerRegistry {
    pub fn new(tx: UnboundedSender<Command>) -> Self {
        Self {
            tx,
            reconnect: HashMap::new(),
            bot: None,
            teardown: None,
        }
    }

    /// Start (or restart) the grace countdown for a disconnected player.
    pub fn arm_reconnect(&mut self, player: PlayerId, grace: Duration, generation: u64) {
        self.cancel_reconnect(player);
        let token = CancellationToken::new();
        self.reconnect.insert(player, token.clone());
        debug!(player = %player, secs = grace.as_secs(), "grace timer armed");
        self.schedule(token, grace, Command::GraceExpired { player, generation });
    }

    pub fn cancel_reconnect(&mut self, player: PlayerId) {
        if let Some(token) = self.reconnect.remove(&player) {
            token.cancel();
        }
    }

    pub fn arm_bot(&mut self, delay: Duration, generation: u64) {
        self.cancel_bot();
        let token = CancellationToken::new();
        self.bot = Some(token.clone());
        self.schedule(token, delay, Command::BotTick { generation });
    }

    pub fn cancel_bot(&mut self) {
        if let Some(token) = self.bot.take() {
            token.cancel();
        }
    }

    pub fn arm_teardown(&mut self, step: TeardownStep, delay: Duration, generation: u64) {
        self.cancel_teardown();
        let token = CancellationToken::new();
        self.teardown = Some(token.clone());
        self.schedule(token, delay, Command::Teardown { step, generation });
    }

    pub fn cancel_teardown(&mut self) {
        if let Some(token) = self.teardown.take() {
            token.cancel();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, token) in self.reconnect.drain() {
            token.cancel();
        }
        self.cancel_bot();
        self.cancel_teardown();
    }

    fn schedule(&self, token: CancellationToken, delay: Duration, command: Command) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    // Receiver gone means the runtime is shutting down.
                    let _ = tx.send(command);
                }
            }
        });
    }
}
