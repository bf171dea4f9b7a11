//! Presence transitions: disconnect, AFK, reconnect, removal, host transfer.
//!
//! Transport-driven transitions only take effect while a round is in
//! progress; during between-round or teardown sequences they are logged and
//! suppressed so they cannot race the transition. Timer-driven removal is
//! allowed between rounds, since the grace period may simply outlive a round.

use tracing::{debug, info, warn};

use crate::domain::state::{ConnectionId, GameState, Phase, PlayerId, PlayerStatus};
use crate::errors::domain::{DomainError, ValidationKind};

/// Outcome of a grace-period expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub name: String,
    /// The removed player held the turn; bot fallback must act for them now.
    pub held_turn: bool,
}

/// Transport lost the player's connection. Returns true when the transition
/// took effect (arming a grace timer is then the caller's job).
pub fn mark_disconnected(state: &mut GameState, who: PlayerId) -> Result<bool, DomainError> {
    if state.phase != Phase::RoundInProgress {
        debug!(player = %who, phase = ?state.phase, "disconnect suppressed during transition");
        return Ok(false);
    }
    let player = state.require_player_mut(who)?;
    if player.is_bot || player.status != PlayerStatus::Active {
        return Ok(false);
    }
    player.status = PlayerStatus::Disconnected;
    player.connection = None;
    let name = player.name.clone();
    state.log.push(format!("{name} disconnected"));
    info!(player = %name, "player disconnected, game pausing");
    state.recompute_pause();
    Ok(true)
}

/// Host flags a player as away. Same state transition as a disconnect, but
/// the connection itself stays alive so `PlayerIsBack` can clear it.
pub fn mark_afk(
    state: &mut GameState,
    requester: PlayerId,
    target: PlayerId,
) -> Result<String, DomainError> {
    if !state.require_player(requester)?.is_host {
        return Err(DomainError::validation(
            ValidationKind::NotHost,
            "only the host can flag a player as away",
        ));
    }
    if state.phase != Phase::RoundInProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "cannot flag players during a round transition",
        ));
    }
    let player = state.require_player_mut(target)?;
    if player.is_bot || player.status != PlayerStatus::Active {
        return Err(DomainError::validation(
            ValidationKind::Other("not_active".into()),
            "player is not active",
        ));
    }
    player.status = PlayerStatus::Disconnected;
    let name = player.name.clone();
    state.log.push(format!("{name} was flagged as away"));
    info!(player = %name, "player flagged AFK, game pausing");
    state.recompute_pause();
    Ok(name)
}

/// A flagged or disconnected player announces they are back on their existing
/// connection. Returns true when the transition took effect.
pub fn mark_back(state: &mut GameState, who: PlayerId) -> Result<bool, DomainError> {
    if state.phase == Phase::SessionEnding {
        debug!(player = %who, "return suppressed during teardown");
        return Ok(false);
    }
    let player = state.require_player_mut(who)?;
    if player.status != PlayerStatus::Disconnected {
        return Ok(false);
    }
    player.status = PlayerStatus::Active;
    let name = player.name.clone();
    state.log.push(format!("{name} is back"));
    info!(player = %name, "player returned");
    state.recompute_pause();
    Ok(true)
}

/// A new connection claims an existing seat: match by stable id first, then
/// by case-insensitive display name. Removed players cannot return.
pub fn reconnect(
    state: &mut GameState,
    connection: ConnectionId,
    claimed: PlayerId,
    prior: Option<PlayerId>,
    name: &str,
) -> Result<PlayerId, DomainError> {
    if state.phase == Phase::SessionEnding {
        debug!(player = %claimed, "reconnect suppressed during teardown");
        return Err(DomainError::conflict("session is ending"));
    }
    let target = prior.unwrap_or(claimed);
    let seat = state
        .seat_of(target)
        .or_else(|| {
            state
                .players
                .iter()
                .position(|p| p.name.eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("no seat matches {name}"),
            )
        })?;

    let player = &mut state.players[seat];
    if player.status == PlayerStatus::Removed {
        return Err(DomainError::conflict(format!(
            "{} was already removed from the game",
            player.name
        )));
    }
    player.status = PlayerStatus::Active;
    player.connection = Some(connection);
    let (id, pname) = (player.id, player.name.clone());
    state.log.push(format!("{pname} reconnected"));
    info!(player = %pname, "player reconnected");
    state.recompute_pause();
    Ok(id)
}

/// Grace period expired without a reconnection: permanent bot conversion.
/// `None` means the expiry lost the race against a reconnect and there is
/// nothing to do.
pub fn remove_player(
    state: &mut GameState,
    who: PlayerId,
) -> Result<Option<Removal>, DomainError> {
    let held_turn = state.current_player == who;
    let Some(player) = state.player_mut(who) else {
        return Ok(None);
    };
    if player.status != PlayerStatus::Disconnected {
        return Ok(None);
    }
    player.status = PlayerStatus::Removed;
    player.is_bot = true;
    player.connection = None;
    let was_host = player.is_host;
    player.is_host = false;
    let name = player.name.clone();

    state.log.push(format!("{name} did not return and is now bot-controlled"));
    warn!(player = %name, "grace period expired, converting to bot");

    if was_host {
        promote_host(state);
    }
    state.recompute_pause();
    Ok(Some(Removal { name, held_turn }))
}

/// Most-senior (earliest-seated) remaining active human becomes host.
pub fn promote_host(state: &mut GameState) {
    if let Some(next) = state
        .players
        .iter_mut()
        .find(|p| !p.is_bot && p.status == PlayerStatus::Active)
    {
        next.is_host = true;
        info!(player = %next.name, "host transferred");
        let name = next.name.clone();
        state.log.push(format!("{name} is now the host"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::{Card, CopyTag, Rank, Suit};
    use crate::engine::test_helpers::{fresh_state, in_play};

    #[test]
    fn disconnect_pauses_and_reconnect_unpauses() {
        let mut state = fresh_state(&["alice", "bob", "carol"]);
        in_play(&mut state, 0, true);
        let bob = state.players[1].id;

        assert!(mark_disconnected(&mut state, bob).unwrap());
        assert!(state.pause.is_paused);
        assert_eq!(state.pause.paused_for, vec!["bob".to_string()]);

        let conn = uuid::Uuid::new_v4();
        let matched = reconnect(&mut state, conn, bob, None, "bob").unwrap();
        assert_eq!(matched, bob);
        assert!(!state.pause.is_paused);
        assert_eq!(state.players[1].connection, Some(conn));
    }

    #[test]
    fn reconnect_falls_back_to_case_insensitive_name_match() {
        let mut state = fresh_state(&["Alice", "Bob"]);
        in_play(&mut state, 0, true);
        let bob = state.players[1].id;
        mark_disconnected(&mut state, bob).unwrap();

        // A brand-new id, matched by name.
        let stranger = uuid::Uuid::new_v4();
        let matched =
            reconnect(&mut state, uuid::Uuid::new_v4(), stranger, None, "BOB").unwrap();
        assert_eq!(matched, bob);
    }

    #[test]
    fn removal_converts_to_bot_and_transfers_host() {
        let mut state = fresh_state(&["alice", "bob"]);
        in_play(&mut state, 0, true);
        let alice = state.players[0].id;
        assert!(state.players[0].is_host);

        mark_disconnected(&mut state, alice).unwrap();
        let removal = remove_player(&mut state, alice).unwrap().unwrap();
        assert!(removal.held_turn);
        assert!(state.players[0].is_bot);
        assert_eq!(state.players[0].status, PlayerStatus::Removed);
        assert!(state.players[1].is_host);
        assert!(!state.pause.is_paused);
        assert_eq!(state.seated_human_count(), 1);
    }

    #[test]
    fn removal_after_reconnect_is_a_silent_no_op() {
        let mut state = fresh_state(&["alice", "bob"]);
        in_play(&mut state, 0, true);
        let bob = state.players[1].id;
        mark_disconnected(&mut state, bob).unwrap();
        mark_back(&mut state, bob).unwrap();

        assert_eq!(remove_player(&mut state, bob).unwrap(), None);
        assert_eq!(state.players[1].status, PlayerStatus::Active);
    }

    #[test]
    fn removed_players_cannot_reconnect() {
        let mut state = fresh_state(&["alice", "bob"]);
        in_play(&mut state, 0, true);
        let bob = state.players[1].id;
        mark_disconnected(&mut state, bob).unwrap();
        remove_player(&mut state, bob).unwrap();

        let err = reconnect(&mut state, uuid::Uuid::new_v4(), bob, None, "bob").unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn afk_flag_requires_host() {
        let mut state = fresh_state(&["alice", "bob"]);
        in_play(&mut state, 0, true);
        let (alice, bob) = (state.players[0].id, state.players[1].id);

        let err = mark_afk(&mut state, bob, alice).unwrap_err();
        assert_eq!(err.kind(), Some(&ValidationKind::NotHost));

        let name = mark_afk(&mut state, alice, bob).unwrap();
        assert_eq!(name, "bob");
        assert!(state.pause.is_paused);
        // Connection stays alive for a plain AFK flag.
        assert!(mark_back(&mut state, bob).unwrap());
        assert!(!state.pause.is_paused);
    }

    #[test]
    fn transport_transitions_are_suppressed_between_rounds() {
        let mut state = fresh_state(&["alice", "bob"]);
        let bob = state.players[1].id;
        // Phase stays BetweenRounds (fresh_state never started a round).
        assert!(!mark_disconnected(&mut state, bob).unwrap());
        assert_eq!(state.players[1].status, PlayerStatus::Active);
        assert!(!state.pause.is_paused);
    }

    #[test]
    fn removed_bot_keeps_playing_cards_it_holds() {
        let mut state = fresh_state(&["alice", "bob", "carol"]);
        in_play(&mut state, 0, true);
        let carol = state.players[2].id;
        state.players[2].hand = vec![Card::new(Suit::Clubs, Rank::Two, CopyTag::D0)];

        mark_disconnected(&mut state, carol).unwrap();
        remove_player(&mut state, carol).unwrap();
        assert!(state.players[2].is_available());
    }
}
