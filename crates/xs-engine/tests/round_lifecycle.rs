//! Room Round Lifecycle Tests
//!
//! Drives complete rounds through the virtual clock:
//! - Pot locking and payout
//! - Spin-complete idempotence
//! - Inactivity warning and eviction
//! - Stakes returned when a round closes unresolved
//! - Commentary that never holds up the round
//! - Event stream ordering

use xs_core::{
    BalanceStore, BotProfile, Color, Palette, PlayerId, PlayerStatus, Profile, SharedWallet,
    Wallet, XsError,
};
use crossbeam_channel::{Receiver, Sender};
use xs_engine::{
    CommentaryError, CommentaryReply, CommentaryRequest, CommentaryService, GameConfig,
    RoomConfig, RoomSession,
};
use xs_stage::{CloseReason, GameEvent, RoomPhase};

const FIFTEEN_COLORS: [&str; 15] = [
    "red", "blue", "green", "yellow", "purple", "orange", "pink", "cyan", "lime", "teal",
    "indigo", "amber", "brown", "gray", "white",
];

fn config(seed: u64, bots: BotProfile) -> GameConfig {
    let mut config = GameConfig::default();
    config.room = RoomConfig::default().with_seed(seed);
    config.room.bot_profile = bots;
    config
}

fn seat_human(config: &GameConfig, balance: u64) -> (RoomSession, PlayerId, SharedWallet) {
    let wallet = SharedWallet::new(Wallet::new());
    let profile = Profile::new("neo", "Neo");
    wallet.open(profile.id.clone(), balance);
    let room = RoomSession::new(config, Some(&profile), wallet.clone()).unwrap();
    (room, profile.id, wallet)
}

/// Index of the first slice carrying the human's color
fn human_slice(room: &RoomSession) -> usize {
    let color = room.human().unwrap().assigned_color.clone();
    room.segments().iter().position(|s| s.color == color).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// POT AND PAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_fifteen_seat_green_pays_double_pot() {
    let mut config = config(42, BotProfile::fixed(50));
    config.room.palette = Palette::new(FIFTEEN_COLORS.iter().map(|&c| Color::new(c)));
    config.room.capacity = Some(15);
    let (mut room, id, _) = seat_human(&config, 1_000);
    assert_eq!(room.players().len(), 15);
    assert_eq!(room.segments().len(), 45);

    room.place_bet(50).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();

    let green = Color::new("green");
    let holder = room
        .players()
        .iter()
        .find(|p| p.assigned_color == green)
        .unwrap()
        .id
        .clone();
    let green_slice = room.segments().iter().position(|s| s.color == green).unwrap();
    room.force_outcome(green_slice);

    room.tick(15_000);
    assert_eq!(room.phase(), RoomPhase::Locked);
    assert_eq!(room.pot(), 750);

    room.tick(3_000);
    assert_eq!(room.phase(), RoomPhase::Spinning);
    assert_eq!(room.commitment().unwrap().segment.color, green);
    assert!(room.spin_complete(room.round()));

    let result = room.last_result().unwrap();
    assert_eq!(result.pot, 750);
    assert_eq!(result.amount, 1_500);
    assert_eq!(result.winner_id.as_ref(), Some(&holder));
    assert_eq!(result.is_user_win, holder == id);

    let start = if holder == id { 1_000 } else { 10_000 };
    assert_eq!(room.balance(&holder), start - 50 + 1_500);
    for player in room.players().iter().filter(|p| p.id != holder) {
        let start = if player.id == id { 1_000 } else { 10_000 };
        assert_eq!(room.balance(&player.id), start - 50);
    }
}

#[test]
fn test_locked_pot_survives_to_result() {
    let (mut room, _, _) = seat_human(&config(7, BotProfile::default()), 1_000);
    room.place_bet(120).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();

    room.tick(15_000);
    let confirmed: u64 = room
        .players()
        .iter()
        .filter(|p| p.status == PlayerStatus::Confirmed)
        .map(|p| p.bet_amount)
        .sum();
    let locked = room.pot();
    assert_eq!(locked, confirmed);
    assert!(locked >= 120);

    room.tick(3_000);
    assert_eq!(room.pot(), locked);
    room.spin_complete(room.round());
    assert_eq!(room.last_result().unwrap().pot, locked);
    if room.last_result().unwrap().winner_id.is_some() {
        assert_eq!(room.last_result().unwrap().amount, locked * 2);
    }
}

#[test]
fn test_no_match_refunds_every_stake() {
    let (mut room, id, _) = seat_human(&config(8, BotProfile::passive()), 1_000);
    room.place_bet(40).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    assert_eq!(room.balance(&id), 960);

    let human_color = room.human().unwrap().assigned_color.clone();
    let miss = room
        .segments()
        .iter()
        .position(|s| s.color != human_color)
        .unwrap();
    room.force_outcome(miss);
    room.tick(18_000);
    assert!(room.spin_complete(room.round()));

    let result = room.last_result().unwrap();
    assert!(result.winner_id.is_none());
    assert_eq!(result.refunds.len(), 1);
    assert_eq!(room.balance(&id), 1_000);
    assert!(!room.trace().has_event("commentary"));
}

#[test]
fn test_bet_above_balance_rejected() {
    let (mut room, id, mut wallet) = seat_human(&config(9, BotProfile::passive()), 30);
    assert!(matches!(
        room.place_bet(50),
        Err(XsError::InvalidBetAmount { max: 30, .. })
    ));
    assert!(matches!(room.place_bet(5), Err(XsError::InvalidBetAmount { .. })));

    room.place_bet(25).unwrap();
    room.acknowledge_color().unwrap();
    // Balance drained elsewhere between place and confirm
    wallet.apply_delta(&id, -20).unwrap();
    assert!(matches!(
        room.confirm_bet(),
        Err(XsError::InsufficientFunds { needed: 25, available: 10 })
    ));
    assert_eq!(room.human().unwrap().status, PlayerStatus::Placed);
    assert_eq!(room.balance(&id), 10);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SPIN SIGNAL
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_duplicate_spin_complete_pays_once() {
    let (mut room, id, wallet) = seat_human(&config(11, BotProfile::passive()), 500);
    room.place_bet(100).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    room.force_outcome(human_slice(&room));
    room.tick(18_000);

    let round = room.round();
    assert!(!room.spin_complete(round + 1));
    assert!(room.spin_complete(round));
    assert!(!room.spin_complete(round));
    assert!(!room.spin_complete(round));

    // One debit, one credit
    assert_eq!(wallet.entry_count(&id), 2);
    assert_eq!(room.balance(&id), 400 + 200);
    assert_eq!(room.trace().count("round_resolved"), 1);
}

#[test]
fn test_spin_complete_outside_spinning_ignored() {
    let (mut room, _, _) = seat_human(&config(12, BotProfile::passive()), 500);
    assert!(!room.spin_complete(1));
    room.acknowledge_color().unwrap();
    room.tick(15_000);
    assert_eq!(room.phase(), RoomPhase::Closed(CloseReason::Evicted));
    assert!(!room.spin_complete(1));
}

// ═══════════════════════════════════════════════════════════════════════════════
// INACTIVITY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_idle_human_warned_then_evicted_once() {
    let (mut room, id, _) = seat_human(&config(13, BotProfile::passive()), 500);
    let rx = room.subscribe();
    room.acknowledge_color().unwrap();

    room.tick(9_999);
    assert!(!room.trace().has_event("inactivity_warning"));

    room.tick(1);
    let warnings: Vec<_> = rx
        .try_iter()
        .filter_map(|r| match r.event {
            GameEvent::InactivityWarning {
                seconds_remaining, ..
            } => Some((r.timestamp_ms, seconds_remaining)),
            _ => None,
        })
        .collect();
    assert_eq!(warnings, vec![(10_000, 5)]);

    room.tick(5_000);
    assert_eq!(room.phase(), RoomPhase::Closed(CloseReason::Evicted));
    assert!(room.has_been_kicked());
    let evictions = room.trace().events_by_type("player_evicted");
    assert_eq!(evictions.len(), 1);
    assert_eq!(evictions[0].timestamp_ms, 15_000);
    assert!(matches!(
        &evictions[0].event,
        GameEvent::PlayerEvicted { player_id } if *player_id == id
    ));

    room.tick(60_000);
    assert_eq!(room.trace().count("player_evicted"), 1);
    assert!(!room.trace().has_event("pot_locked"));
}

#[test]
fn test_confirm_at_last_moment_prevents_kick() {
    let (mut room, _, _) = seat_human(&config(14, BotProfile::passive()), 500);
    room.place_bet(10).unwrap();
    room.acknowledge_color().unwrap();
    room.tick(14_999);
    room.confirm_bet().unwrap();

    room.tick(1);
    assert_eq!(room.phase(), RoomPhase::Locked);
    assert!(!room.has_been_kicked());
    assert_eq!(room.trace().count("inactivity_warning"), 1);
}

// ═══════════════════════════════════════════════════════════════════════════════
// ROUND CONTINUATION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_result_dwell_starts_next_round() {
    let (mut room, _, _) = seat_human(&config(15, BotProfile::fixed(10)), 500);
    room.place_bet(10).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    room.tick(18_000);
    room.spin_complete(1);
    assert_eq!(room.phase(), RoomPhase::Result);
    assert!(room.trace().has_event("play_again_offered"));

    room.tick(6_000);
    assert_eq!(room.round(), 2);
    assert_eq!(room.phase(), RoomPhase::PreGame);
    assert_eq!(room.pot(), 0);
    assert!(room.players().iter().all(|p| p.status == PlayerStatus::Idle));
    assert!(room.commitment().is_none());
}

#[test]
fn test_exit_to_lobby_closes_room() {
    let (mut room, _, _) = seat_human(&config(16, BotProfile::fixed(10)), 500);
    room.place_bet(10).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    room.tick(18_000);
    room.spin_complete(1);

    room.exit_to_lobby().unwrap();
    assert_eq!(room.phase(), RoomPhase::Closed(CloseReason::ExitedToLobby));
    assert!(matches!(room.play_again(), Err(XsError::RoomClosed)));
}

// ═══════════════════════════════════════════════════════════════════════════════
// CANCELLATION
// ═══════════════════════════════════════════════════════════════════════════════

fn bot_ids(room: &RoomSession) -> Vec<PlayerId> {
    room.players()
        .iter()
        .filter(|p| p.is_bot())
        .map(|p| p.id.clone())
        .collect()
}

#[test]
fn test_eviction_returns_bot_stakes() {
    let (mut room, id, wallet) = seat_human(&config(31, BotProfile::fixed(20)), 500);
    let before = wallet.snapshot().total();
    room.acknowledge_color().unwrap();

    room.tick(14_000);
    assert_eq!(room.pot(), 20 * 11);
    room.tick(1_000);
    assert_eq!(room.phase(), RoomPhase::Closed(CloseReason::Evicted));

    for bot in bot_ids(&room) {
        assert_eq!(room.balance(&bot), 10_000);
    }
    assert_eq!(room.balance(&id), 500);
    assert_eq!(wallet.snapshot().total(), before);

    let returned = room.trace().events_by_type("stakes_returned");
    assert_eq!(returned.len(), 1);
    assert!(matches!(&returned[0].event, GameEvent::StakesReturned { refunds } if refunds.len() == 11));
    assert!(!room.trace().has_event("round_resolved"));
}

#[test]
fn test_leave_while_locked_returns_stakes() {
    let (mut room, id, wallet) = seat_human(&config(32, BotProfile::fixed(20)), 500);
    let before = wallet.snapshot().total();
    room.place_bet(100).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    room.tick(15_000);
    assert_eq!(room.phase(), RoomPhase::Locked);
    assert_eq!(room.pot(), 100 + 20 * 11);

    room.leave().unwrap();
    assert_eq!(room.phase(), RoomPhase::Closed(CloseReason::Left));
    let events = room.trace().len();

    room.tick(10_000);
    assert!(!room.spin_complete(1));
    assert_eq!(room.trace().len(), events);
    assert!(!room.trace().has_event("spin_started"));
    assert!(!room.trace().has_event("round_resolved"));

    assert_eq!(room.balance(&id), 500);
    for bot in bot_ids(&room) {
        assert_eq!(room.balance(&bot), 10_000);
    }
    assert_eq!(wallet.snapshot().total(), before);
}

#[test]
fn test_leave_while_spinning_pays_nothing() {
    let (mut room, id, wallet) = seat_human(&config(33, BotProfile::passive()), 500);
    room.place_bet(100).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    room.force_outcome(human_slice(&room));
    room.tick(18_000);
    assert_eq!(room.phase(), RoomPhase::Spinning);

    room.leave().unwrap();
    assert!(!room.spin_complete(1));
    assert!(!room.trace().has_event("round_resolved"));
    assert!(room.last_result().is_none());

    // Debit then refund; the winning slice never pays
    assert_eq!(room.balance(&id), 500);
    assert_eq!(wallet.entry_count(&id), 2);
    assert_eq!(room.trace().count("stakes_returned"), 1);
}

#[test]
fn test_exit_after_result_returns_nothing_twice() {
    let (mut room, id, wallet) = seat_human(&config(34, BotProfile::passive()), 500);
    room.place_bet(100).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    room.force_outcome(human_slice(&room));
    room.tick(18_000);
    assert!(room.spin_complete(1));

    room.exit_to_lobby().unwrap();
    assert_eq!(room.balance(&id), 400 + 200);
    assert_eq!(wallet.entry_count(&id), 2);
    assert!(!room.trace().has_event("stakes_returned"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMENTARY
// ═══════════════════════════════════════════════════════════════════════════════

struct Offline;

impl CommentaryService for Offline {
    fn request_commentary(&mut self, _request: CommentaryRequest, reply: Sender<CommentaryReply>) {
        reply.send(Err(CommentaryError::Timeout)).unwrap();
    }
}

/// Hands every reply sender to the test, which answers when it likes
struct Relay(Sender<Sender<CommentaryReply>>);

impl CommentaryService for Relay {
    fn request_commentary(&mut self, _request: CommentaryRequest, reply: Sender<CommentaryReply>) {
        self.0.send(reply).unwrap();
    }
}

fn relayed_win(seed: u64) -> (RoomSession, Receiver<Sender<CommentaryReply>>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let (room, _, _) = seat_human(&config(seed, BotProfile::passive()), 500);
    let mut room = room.with_commentary(Box::new(Relay(tx)));
    room.place_bet(10).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    room.force_outcome(human_slice(&room));
    room.tick(18_000);
    assert!(room.spin_complete(1));
    (room, rx)
}

#[test]
fn test_silent_commentary_does_not_hold_result() {
    let (mut room, requests) = relayed_win(18);
    let _pending = requests.try_recv().unwrap();
    assert_eq!(room.phase(), RoomPhase::Result);
    assert!(room.trace().has_event("play_again_offered"));
    assert!(!room.trace().has_event("commentary"));

    room.tick(5_999);
    assert_eq!(room.phase(), RoomPhase::Result);
    assert!(!room.trace().has_event("commentary"));

    room.tick(1);
    assert_eq!(room.round(), 2);
    assert_eq!(room.phase(), RoomPhase::PreGame);
    let record = room.trace().find(|r| r.event.type_name() == "commentary").unwrap();
    assert_eq!(record.round, 1);
    assert_eq!(record.timestamp_ms, 24_000);
    assert!(matches!(&record.event, GameEvent::Commentary { fallback: true, text } if text.contains("Neo")));
}

#[test]
fn test_late_commentary_arrives_on_tick() {
    let (mut room, requests) = relayed_win(19);
    let reply = requests.try_recv().unwrap();
    assert!(!room.trace().has_event("commentary"));

    reply.send(Ok("Neo reads the wheel like a book".into())).unwrap();
    room.tick(1_000);
    assert_eq!(room.phase(), RoomPhase::Result);
    let record = room.trace().find(|r| r.event.type_name() == "commentary").unwrap();
    assert!(matches!(&record.event, GameEvent::Commentary { fallback: false, text } if text.starts_with("Neo reads")));

    room.tick(5_000);
    assert_eq!(room.round(), 2);
    assert_eq!(room.trace().count("commentary"), 1);
}

#[test]
fn test_commentary_failure_falls_back() {
    let (room, _, _) = seat_human(&config(17, BotProfile::passive()), 500);
    let mut room = room.with_commentary(Box::new(Offline));
    room.place_bet(10).unwrap();
    room.acknowledge_color().unwrap();
    room.confirm_bet().unwrap();
    room.force_outcome(human_slice(&room));
    room.tick(18_000);
    room.spin_complete(1);

    let record = room.trace().find(|r| r.event.type_name() == "commentary").unwrap();
    assert!(matches!(&record.event, GameEvent::Commentary { fallback: true, text } if text.contains("Neo")));
    assert_eq!(room.phase(), RoomPhase::Result);
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT STREAM
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_simulation_trace_is_well_formed() {
    let wallet = SharedWallet::default();
    let mut room = RoomSession::new(&config(21, BotProfile::default()), None, wallet).unwrap();
    let rx = room.subscribe();

    for _ in 0..5 {
        room.tick(500);
        while room.phase() != RoomPhase::Spinning {
            room.tick(500);
        }
        room.spin_complete(room.round());
        room.tick(6_000);
    }

    assert!(room.round() >= 6);
    let validation = room.trace().validate();
    assert!(validation.is_valid(), "{:?}", validation.warnings());
    assert_eq!(room.trace().results().len(), 5);

    let streamed: Vec<_> = rx.try_iter().collect();
    // Subscribed after the opening events
    assert!(streamed.len() < room.trace().len());
    assert_eq!(
        streamed.last().map(|r| r.seq),
        room.trace().events.last().map(|r| r.seq)
    );
    assert!(streamed.windows(2).all(|w| w[0].seq < w[1].seq));

    let phases = room.trace().phases();
    let locked = phases.iter().position(|p| *p == RoomPhase::Locked).unwrap();
    assert_eq!(phases[locked + 1], RoomPhase::Spinning);
    assert_eq!(phases[locked + 2], RoomPhase::Result);
}
