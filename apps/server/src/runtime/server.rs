//! The runtime task that owns the one mutable `GameState`.
//!
//! A single spawned task drains a command channel; no locks, no shared
//! mutability. Connection layers talk to it through `GameHandle` and receive
//! `Outbound` messages to fan out to clients.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use crate::config::EngineConfig;
use crate::domain::cards::Card;
use crate::domain::snapshot;
use crate::domain::state::{
    ConnectionId, DeckMode, GameSettings, GameState, Phase, PlayerId, PlayerStatus, WinCondition,
};
use crate::engine::actions::{self, TurnOutcome};
use crate::engine::round_lifecycle::{self, StartRoundOutcome};
use crate::engine::{bots, presence};
use crate::error::EngineError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::lobby::Lobby;
use crate::runtime::commands::{Action, Command, Outbound, ServerMsg, SettingsMsg, TeardownStep};
use crate::runtime::timers::TimerRegistry;

/// Cloneable sender half handed to connection layers.
#[derive(Clone)]
pub struct GameHandle {
    tx: UnboundedSender<Command>,
}

impl GameHandle {
    pub fn send(&self, action: Action) -> Result<(), EngineError> {
        self.tx
            .send(Command::Action(action))
            .map_err(|_| EngineError::ChannelClosed)
    }
}

pub struct GameServer {
    config: EngineConfig,
    lobby: Lobby,
    state: Option<GameState>,
    timers: TimerRegistry,
    outbound: UnboundedSender<Outbound>,
}

impl GameServer {
    /// Spawn the runtime task. Returns the command handle and the stream of
    /// outbound messages the transport must deliver.
    pub fn spawn(config: EngineConfig, lobby: Lobby) -> (GameHandle, UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let server = GameServer {
            config,
            lobby,
            state: None,
            timers: TimerRegistry::new(tx.clone()),
            outbound: out_tx,
        };
        tokio::spawn(server.run(rx));
        (GameHandle { tx }, out_rx)
    }

    async fn run(mut self, mut rx: UnboundedReceiver<Command>) {
        info!("game runtime started");
        while let Some(command) = rx.recv().await {
            self.handle(command);
        }
        info!("game runtime stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Action(action) => self.handle_action(action),
            Command::BotTick { generation } => self.on_bot_tick(generation),
            Command::GraceExpired { player, generation } => {
                self.on_grace_expired(player, generation)
            }
            Command::Teardown { step, generation } => self.on_teardown(step, generation),
        }
    }

    fn handle_action(&mut self, action: Action) {
        let (requester, result) = match action {
            Action::StartRound {
                requester,
                settings,
            } => (requester, self.on_start_round(requester, settings)),
            Action::PlayCard { player, card } => (player, self.on_play_card(player, card)),
            Action::PassTurn { player } => (player, self.on_pass_turn(player)),
            Action::RequestNextRound { requester } => {
                (requester, self.on_request_next_round(requester))
            }
            Action::MarkPlayerAfk { requester, target } => {
                (requester, self.on_mark_afk(requester, target))
            }
            Action::PlayerIsBack { player } => (player, self.on_player_back(player)),
            Action::EndSession { requester } => (requester, self.on_end_session(requester)),
            Action::PlayerDisconnected { player } => (player, self.on_disconnected(player)),
            Action::PlayerReconnected {
                player,
                prior,
                name,
                connection,
            } => (
                player,
                self.on_reconnected(player, prior, &name, connection),
            ),
        };
        if let Err(err) = result {
            self.reject(requester, &err);
        }
    }

    // Action handlers

    fn on_start_round(
        &mut self,
        requester: PlayerId,
        settings: SettingsMsg,
    ) -> Result<(), DomainError> {
        if self.state.is_some() {
            return Err(DomainError::conflict("a game is already running"));
        }
        let host = self
            .lobby
            .players
            .iter()
            .find(|p| p.is_host)
            .map(|p| p.id)
            .ok_or_else(|| DomainError::invariant("lobby has no host"))?;
        if requester != host {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                "only the host can start the game",
            ));
        }
        let settings = parse_settings(&settings)?;
        let seats: Vec<(PlayerId, String, Option<ConnectionId>)> = self
            .lobby
            .ready_players()
            .map(|p| (p.id, p.name.clone(), p.connection))
            .collect();
        if seats.len() < 2 {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                "need at least two ready players",
            ));
        }
        info!(players = seats.len(), mode = %settings.deck_mode.as_str(), "starting session");
        self.state = Some(GameState::new(settings, seats, self.config.log_cap));
        self.start_round_flow(None)
    }

    fn on_play_card(&mut self, player: PlayerId, card: Card) -> Result<(), DomainError> {
        let state = self.require_state()?;
        let outcome = actions::apply_play(state, player, card)?;
        self.after_turn(outcome);
        Ok(())
    }

    fn on_pass_turn(&mut self, player: PlayerId) -> Result<(), DomainError> {
        let state = self.require_state()?;
        let outcome = actions::apply_pass(state, player)?;
        self.after_turn(outcome);
        Ok(())
    }

    fn on_request_next_round(&mut self, requester: PlayerId) -> Result<(), DomainError> {
        let state = self.require_state()?;
        if state.phase != Phase::BetweenRounds {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "the current round has not finished",
            ));
        }
        let seat = state.require_player(requester)?;
        if seat.is_bot || seat.status != PlayerStatus::Active {
            return Err(DomainError::validation(
                ValidationKind::Other("not_active".into()),
                "only an active player can start the next round",
            ));
        }
        self.start_round_flow(None)
    }

    fn on_mark_afk(&mut self, requester: PlayerId, target: PlayerId) -> Result<(), DomainError> {
        let grace = self.config.reconnect_grace;
        let state = self.require_state()?;
        let name = presence::mark_afk(state, requester, target)?;
        let generation = state.generation;
        self.timers.arm_reconnect(target, grace, generation);
        self.timers.cancel_bot();
        self.send_all(ServerMsg::AfkNotice { player: name });
        self.broadcast_state();
        Ok(())
    }

    fn on_player_back(&mut self, player: PlayerId) -> Result<(), DomainError> {
        let state = self.require_state()?;
        if presence::mark_back(state, player)? {
            self.timers.cancel_reconnect(player);
            self.broadcast_state();
            self.maybe_schedule_bot();
        }
        Ok(())
    }

    fn on_end_session(&mut self, requester: PlayerId) -> Result<(), DomainError> {
        let state = self.require_state()?;
        if !state.require_player(requester)?.is_host {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                "only the host can end the session",
            ));
        }
        info!("host ended the session");
        self.begin_teardown();
        Ok(())
    }

    fn on_disconnected(&mut self, player: PlayerId) -> Result<(), DomainError> {
        let grace = self.config.reconnect_grace;
        let state = self.require_state()?;
        if presence::mark_disconnected(state, player)? {
            let generation = state.generation;
            self.timers.arm_reconnect(player, grace, generation);
            self.timers.cancel_bot();
            self.broadcast_state();
        }
        Ok(())
    }

    fn on_reconnected(
        &mut self,
        player: PlayerId,
        prior: Option<PlayerId>,
        name: &str,
        connection: ConnectionId,
    ) -> Result<(), DomainError> {
        let state = self.require_state()?;
        let matched = presence::reconnect(state, connection, player, prior, name)?;
        self.timers.cancel_reconnect(matched);
        self.broadcast_state();
        self.maybe_schedule_bot();
        Ok(())
    }

    // Timer callbacks

    fn on_bot_tick(&mut self, generation: u64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.generation != generation {
            return;
        }
        match bots::take_bot_action(state) {
            Ok(Some(outcome)) => self.after_turn(outcome),
            Ok(None) => {}
            Err(err) => error!(error = %err, "bot turn failed"),
        }
    }

    fn on_grace_expired(&mut self, player: PlayerId, generation: u64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.generation != generation {
            return;
        }
        let removal = match presence::remove_player(state, player) {
            Ok(removal) => removal,
            Err(err) => {
                error!(error = %err, "removal failed");
                return;
            }
        };
        let Some(removal) = removal else {
            return;
        };
        if state.seated_human_count() < 2 {
            warn!(player = %removal.name, "too few humans remain after removal");
            self.begin_teardown();
            return;
        }
        self.broadcast_state();
        // The removal may have cleared the pause with a bot-controlled seat
        // on turn (not necessarily the seat just removed, if its pending
        // tick was cancelled by a later disconnect), so always re-evaluate.
        self.maybe_schedule_bot();
    }

    fn on_teardown(&mut self, step: TeardownStep, generation: u64) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if state.generation != generation {
            return;
        }
        match step {
            TeardownStep::BroadcastLog => {
                self.send_all(ServerMsg::SessionEnded {
                    log: state.log.entries(),
                });
                self.timers.arm_teardown(
                    TeardownStep::ReturnToLobby,
                    self.config.teardown_lobby_delay,
                    generation,
                );
            }
            TeardownStep::ReturnToLobby => {
                let Some(state) = self.state.take() else {
                    return;
                };
                self.lobby = Lobby::from_survivors(&state);
                info!(survivors = self.lobby.players.len(), "returned to lobby");
                self.send_all(ServerMsg::LobbyState {
                    players: self.lobby.public(),
                });
            }
        }
    }

    // Shared flows

    fn start_round_flow(&mut self, seed: Option<u64>) -> Result<(), DomainError> {
        let grace = self.config.reconnect_grace;
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| DomainError::invariant("no game state to start a round in"))?;
        let outcome = round_lifecycle::start_new_round(state, seed);
        // The generation bump orphaned every pending timer; re-arm grace
        // countdowns for players who are still out.
        let generation = state.generation;
        let still_out: Vec<PlayerId> = state
            .players
            .iter()
            .filter(|p| p.status == PlayerStatus::Disconnected)
            .map(|p| p.id)
            .collect();
        if outcome == StartRoundOutcome::SessionEnds {
            self.begin_teardown();
            return Ok(());
        }
        for player in still_out {
            self.timers.arm_reconnect(player, grace, generation);
        }
        self.broadcast_state();
        self.maybe_schedule_bot();
        Ok(())
    }

    fn after_turn(&mut self, outcome: TurnOutcome) {
        match outcome {
            TurnOutcome::Continues => {
                self.broadcast_state();
                self.maybe_schedule_bot();
            }
            TurnOutcome::RoundOver { winner } => {
                self.timers.cancel_bot();
                let Some(state) = self.state.as_mut() else {
                    return;
                };
                let summary = round_lifecycle::end_round(state, winner);
                self.send_all(ServerMsg::RoundOver { summary });
                self.broadcast_state();
            }
        }
    }

    fn begin_teardown(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.phase = Phase::SessionEnding;
        state.generation += 1;
        let generation = state.generation;
        let winner_names = round_lifecycle::session_winner_names(state);
        state.log.push(match winner_names.len() {
            0 => "Session over".to_string(),
            _ => format!("Session over, won by {}", winner_names.join(", ")),
        });
        self.timers.cancel_all();
        self.send_all(ServerMsg::GameOver { winner_names });
        self.timers.arm_teardown(
            TeardownStep::BroadcastLog,
            self.config.teardown_log_delay,
            generation,
        );
    }

    fn maybe_schedule_bot(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if state.phase != Phase::RoundInProgress || state.pause.is_paused {
            return;
        }
        let Some(mover) = state.player(state.current_player) else {
            return;
        };
        if mover.is_bot {
            self.timers.arm_bot(self.config.bot_delay, state.generation);
        }
    }

    // Outbound plumbing

    fn broadcast_state(&self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        for player in &state.players {
            if player.is_bot || player.connection.is_none() {
                continue;
            }
            let view = snapshot::for_player(state, player.id);
            self.send_out(Outbound::to(player.id, ServerMsg::GameState { view }));
        }
    }

    fn send_all(&self, msg: ServerMsg) {
        self.send_out(Outbound::all(msg));
    }

    fn send_out(&self, outbound: Outbound) {
        // A dropped receiver only matters during shutdown.
        let _ = self.outbound.send(outbound);
    }

    fn reject(&self, requester: PlayerId, err: &DomainError) {
        warn!(player = %requester, error = %err, "action rejected");
        self.send_out(Outbound::to(
            requester,
            ServerMsg::Warning {
                title: err.title().to_string(),
                message: err.to_string(),
            },
        ));
    }

    fn require_state(&mut self) -> Result<&mut GameState, DomainError> {
        self.state
            .as_mut()
            .ok_or_else(|| DomainError::conflict("no game is running"))
    }
}

fn parse_settings(msg: &SettingsMsg) -> Result<GameSettings, DomainError> {
    let deck_mode = DeckMode::parse(&msg.deck_mode).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidSettings,
            format!("unknown deck mode {:?}", msg.deck_mode),
        )
    })?;
    let win_condition = WinCondition::parse(&msg.win_condition).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidSettings,
            format!("unknown win condition {:?}", msg.win_condition),
        )
    })?;
    Ok(GameSettings {
        deck_mode,
        win_condition,
    })
}
