//! Room Session Controller: the round state machine for solo, blitz and duel
//!
//! ```text
//! PRE_GAME ──ack──▶ BETTING ──window──▶ LOCKED ──pause──▶ SPINNING ──signal──▶ RESULT
//!    ▲                 │                   │                                   │
//!    └─────────────────┼───────────────────┼──────── play again ◀──────────────┤
//!                      ▼                   ▼                                   ▼
//!              CLOSED(evicted)     CLOSED(aborted)                    CLOSED(exited)
//! ```
//!
//! Time is virtual. The host drives the room with [`RoomSession::tick`] and
//! reports the end of the wheel animation with [`RoomSession::spin_complete`].

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use xs_core::{
    BalanceStore, Color, Player, PlayerId, Profile, RoomId, Segment, SharedWallet, XsError,
    XsResult,
};
use xs_stage::{
    CloseReason, EventRecord, EventStream, GameEvent, PlayerView, RoomMode, RoomPhase, RoomTrace,
    RoundResult, TimingConfig, secs,
};

use crate::bots::{self, BotDecision};
use crate::commentary::{
    CommentaryRequest, CommentaryService, PendingCommentary, TemplateCommentary,
};
use crate::config::{GameConfig, RoomConfig, WheelPreset};
use crate::inactivity::{InactivityMonitor, InactivitySignal};
use crate::ledger::{BetLedger, Resolution, ResolutionRule};
use crate::scheduler::PhaseScheduler;
use crate::wheel::{self, Commitment, WheelGenerator};

/// Display names for simulated opponents
const BOT_NAMES: [&str; 12] = [
    "NeonFox", "VoltRider", "LuckyByte", "RimRunner", "PixelPilot", "HexHopper", "ZeroDrift",
    "WheelWitch", "TurboTam", "GlitchGal", "CobaltCat", "NovaNik",
];

/// Slices per seat on the duel wheel
const DUEL_SLICES_PER_SEAT: usize = 6;

/// Guard against a second spin trigger or completion within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpinLock {
    #[default]
    Idle,
    InProgress,
    Complete,
}

/// What happens after RESULT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextRound {
    PlayAgain,
    ExitToLobby,
}

/// Pull-model view of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub mode: RoomMode,
    pub round: u32,
    pub phase: RoomPhase,
    /// Seconds left on the phase timer
    pub timer_secs: Option<u32>,
    pub pot: u64,
    pub players: Vec<PlayerView>,
    /// Seconds to eviction while the warning is showing
    pub inactivity_warning: Option<u32>,
    pub target_index: Option<usize>,
    pub spin_lock: SpinLock,
    pub last_result: Option<RoundResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Due {
    // Declaration order is the tie-break at equal instants
    Inactivity,
    BotTick,
    Phase,
}

pub struct RoomSession {
    id: RoomId,
    config: RoomConfig,
    timing: TimingConfig,
    phase: RoomPhase,
    round: u32,
    ledger: BetLedger,
    segments: Vec<Segment>,
    wheel: WheelGenerator,
    rng: ChaCha8Rng,
    scheduler: PhaseScheduler<RoomPhase>,
    inactivity: InactivityMonitor,
    next_bot_tick: Option<u64>,
    spin_lock: SpinLock,
    commitment: Option<Commitment>,
    last_result: Option<RoundResult>,
    human: Option<PlayerId>,
    wallet: SharedWallet,
    commentary: Box<dyn CommentaryService>,
    pending_commentary: Option<PendingCommentary>,
    stream: EventStream,
}

impl RoomSession {
    /// Seat the human (if any) and fill the room with bots
    ///
    /// Rooms with a human open in PRE_GAME; simulation rooms open straight
    /// into BETTING.
    pub fn new(config: &GameConfig, human: Option<&Profile>, wallet: SharedWallet) -> XsResult<Self> {
        config.timing.validate().map_err(XsError::Config)?;
        let room = config.room.clone();
        room.validate()?;
        if room.mode == RoomMode::Solo && human.is_none() {
            return Err(XsError::InvalidRoster("solo rooms need a human".into()));
        }

        let seed = room.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let wheel = WheelGenerator::seeded(rng.random::<u64>());

        let capacity = room.effective_capacity();
        let mut players = Vec::with_capacity(capacity);
        for seat in 0..capacity {
            let color = room
                .palette
                .get(seat)
                .cloned()
                .ok_or_else(|| XsError::InvalidRoster(format!("no color for seat {seat}")))?;
            let player = match (seat, human) {
                (0, Some(profile)) => Player::human(profile, seat, color),
                _ => {
                    let name = BOT_NAMES[seat % BOT_NAMES.len()];
                    let username = if seat < BOT_NAMES.len() {
                        name.to_string()
                    } else {
                        format!("{name}{seat}")
                    };
                    let id = format!("bot-{seat}");
                    if !wallet.has_account(&PlayerId::new(id.as_str())) {
                        wallet.open(PlayerId::new(id.as_str()), room.bot_starting_balance);
                    }
                    Player::bot(id, username, seat, color, room.bot_profile.clone())
                }
            };
            players.push(player);
        }

        let id = RoomId::generate();
        let mut session = Self {
            stream: EventStream::new(id.as_str()),
            id,
            ledger: BetLedger::new(players, room.limits),
            segments: Vec::new(),
            config: room,
            timing: config.timing.clone(),
            phase: RoomPhase::PreGame,
            round: 1,
            wheel,
            rng,
            scheduler: PhaseScheduler::new(),
            inactivity: InactivityMonitor::new(),
            next_bot_tick: None,
            spin_lock: SpinLock::Idle,
            commitment: None,
            last_result: None,
            human: human.map(|p| p.id.clone()),
            wallet,
            commentary: Box::new(TemplateCommentary),
            pending_commentary: None,
        };

        log::info!(
            "room {}: {} room with {} seats (seed {seed})",
            session.id,
            session.config.mode.display_name(),
            capacity
        );
        session.publish(GameEvent::RoundReset { round: 1 });
        session.assign_colors();
        if session.human.is_none() {
            session.enter_betting();
        }
        Ok(session)
    }

    /// Replace the commentary collaborator
    pub fn with_commentary(mut self, service: Box<dyn CommentaryService>) -> Self {
        self.commentary = service;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn mode(&self) -> RoomMode {
        self.config.mode
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.scheduler.remaining_ms()
    }

    pub fn players(&self) -> &[Player] {
        self.ledger.players()
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.ledger.player(id)
    }

    pub fn human_id(&self) -> Option<&PlayerId> {
        self.human.as_ref()
    }

    pub fn human(&self) -> Option<&Player> {
        self.human.as_ref().and_then(|id| self.ledger.player(id))
    }

    pub fn pot(&self) -> u64 {
        self.ledger.pot()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn commitment(&self) -> Option<&Commitment> {
        self.commitment.as_ref()
    }

    pub fn spin_lock(&self) -> SpinLock {
        self.spin_lock
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    pub fn has_been_kicked(&self) -> bool {
        self.inactivity.has_been_kicked()
    }

    pub fn balance(&self, id: &PlayerId) -> u64 {
        self.wallet.balance(id)
    }

    pub fn subscribe(&mut self) -> crossbeam_channel::Receiver<EventRecord> {
        self.stream.subscribe()
    }

    pub fn trace(&self) -> &RoomTrace {
        self.stream.trace()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            mode: self.config.mode,
            round: self.round,
            phase: self.phase,
            timer_secs: self.scheduler.remaining_ms().map(secs),
            pot: self.ledger.pot(),
            players: self.ledger.players().iter().map(PlayerView::from).collect(),
            inactivity_warning: self.inactivity.warning_seconds(self.scheduler.now()),
            target_index: self.commitment.as_ref().map(|c| c.target_index),
            spin_lock: self.spin_lock,
            last_result: self.last_result.clone(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // HUMAN OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    fn ensure_phase(&self, operation: &'static str, allowed: &[RoomPhase]) -> XsResult<()> {
        if self.phase.is_closed() {
            return Err(XsError::RoomClosed);
        }
        if !allowed.contains(&self.phase) {
            return Err(XsError::WrongPhase {
                operation,
                phase: self.phase.to_string(),
            });
        }
        Ok(())
    }

    fn human_or_err(&self) -> XsResult<PlayerId> {
        self.human
            .clone()
            .ok_or_else(|| XsError::UnknownPlayer("no human seated".into()))
    }

    /// Stake an amount on the assigned color (entry bet in PRE_GAME)
    pub fn place_bet(&mut self, amount: u64) -> XsResult<()> {
        self.ensure_phase("place_bet", &[RoomPhase::PreGame, RoomPhase::Betting])?;
        let id = self.human_or_err()?;
        self.ledger.place(&id, amount, &self.wallet)?;
        self.publish(GameEvent::BetPlaced {
            player_id: id,
            amount,
        });
        Ok(())
    }

    pub fn cancel_bet(&mut self) -> XsResult<()> {
        self.ensure_phase("cancel_bet", &[RoomPhase::PreGame, RoomPhase::Betting])?;
        let id = self.human_or_err()?;
        self.ledger.cancel(&id)?;
        self.publish(GameEvent::BetCancelled { player_id: id });
        Ok(())
    }

    /// Debit the placed bet; disarms the inactivity monitor
    pub fn confirm_bet(&mut self) -> XsResult<u64> {
        self.ensure_phase("confirm_bet", &[RoomPhase::Betting])?;
        let id = self.human_or_err()?;
        let amount = self.ledger.confirm(&id, &mut self.wallet)?;
        self.inactivity.disarm();
        log::info!("room {}: {id} confirmed {amount}", self.id);
        self.publish(GameEvent::BetConfirmed {
            player_id: id,
            amount,
        });
        Ok(amount)
    }

    /// Accept the assigned color and open betting
    pub fn acknowledge_color(&mut self) -> XsResult<()> {
        self.ensure_phase("acknowledge_color", &[RoomPhase::PreGame])?;
        self.enter_betting();
        Ok(())
    }

    /// Start the next round now instead of waiting out the dwell
    pub fn play_again(&mut self) -> XsResult<()> {
        self.ensure_phase("play_again", &[RoomPhase::Result])?;
        self.apply_next_round(NextRound::PlayAgain);
        Ok(())
    }

    pub fn exit_to_lobby(&mut self) -> XsResult<()> {
        self.ensure_phase("exit_to_lobby", &[RoomPhase::Result])?;
        self.apply_next_round(NextRound::ExitToLobby);
        Ok(())
    }

    /// Leave mid-round: timers cancelled, nothing paid, confirmed stakes returned
    pub fn leave(&mut self) -> XsResult<()> {
        if self.phase.is_closed() {
            return Err(XsError::RoomClosed);
        }
        self.close(CloseReason::Left);
        Ok(())
    }

    /// Queue a forced wheel outcome for the next commit
    pub fn force_outcome(&mut self, index: usize) {
        self.wheel.force_next(index);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DRIVERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Advance virtual time, firing every deadline inside the delta in order
    pub fn tick(&mut self, delta_ms: u64) {
        self.poll_commentary();
        let target = self.scheduler.now().saturating_add(delta_ms);
        while let Some((at, due)) = self.next_due(target) {
            self.scheduler.advance_to(at);
            match due {
                Due::Inactivity => self.on_inactivity(),
                Due::BotTick => self.on_bot_tick(),
                Due::Phase => self.on_phase_expired(),
            }
        }
        self.scheduler.advance_to(target);
    }

    /// Wheel animation finished. Returns false for a duplicate or stale signal.
    pub fn spin_complete(&mut self, round: u32) -> bool {
        if self.phase != RoomPhase::Spinning
            || round != self.round
            || self.spin_lock != SpinLock::InProgress
        {
            log::debug!(
                "room {}: ignoring spin-complete for round {round} (round {}, {}, {:?})",
                self.id,
                self.round,
                self.phase,
                self.spin_lock
            );
            return false;
        }
        let Some(commitment) = self.commitment.clone() else {
            return false;
        };

        self.spin_lock = SpinLock::Complete;
        self.publish(GameEvent::SpinCompleted);
        self.resolve_round(&commitment);
        true
    }

    fn next_due(&self, target: u64) -> Option<(u64, Due)> {
        if self.phase.is_closed() {
            return None;
        }
        [
            (self.inactivity.next_deadline(), Due::Inactivity),
            (self.next_bot_tick, Due::BotTick),
            (self.scheduler.deadline(), Due::Phase),
        ]
        .into_iter()
        .filter_map(|(at, due)| at.map(|t| (t, due)))
        .filter(|&(t, _)| t <= target)
        .min()
    }

    fn on_inactivity(&mut self) {
        let Some(id) = self.human.clone() else {
            self.inactivity.disarm();
            return;
        };
        match self.inactivity.poll(self.scheduler.now()) {
            Some(InactivitySignal::Warning { seconds_remaining }) => {
                log::info!("room {}: inactivity warning for {id}, {seconds_remaining}s left", self.id);
                self.publish(GameEvent::InactivityWarning {
                    player_id: id,
                    seconds_remaining,
                });
            }
            Some(InactivitySignal::Kick) => {
                log::warn!("room {}: evicting {id} for inactivity", self.id);
                self.publish(GameEvent::PlayerEvicted { player_id: id });
                self.close(CloseReason::Evicted);
            }
            None => self.inactivity.disarm(),
        }
    }

    fn on_bot_tick(&mut self) {
        if self.phase != RoomPhase::Betting {
            self.next_bot_tick = None;
            return;
        }
        self.next_bot_tick = Some(self.scheduler.now() + self.timing.bot_tick_ms);

        let min_bet = self.ledger.limits().min_bet;
        let bots: Vec<_> = self
            .ledger
            .players()
            .iter()
            .filter_map(|p| p.bot_profile().map(|b| (p.id.clone(), b.clone(), p.status)))
            .collect();

        for (id, profile, status) in bots {
            let balance = self.wallet.balance(&id);
            let BotDecision::Bet(amount) =
                bots::decide(&profile, status, balance, min_bet, &mut self.rng)
            else {
                continue;
            };
            if let Err(e) = self.ledger.place(&id, amount, &self.wallet) {
                log::debug!("room {}: bot {id} could not place {amount}: {e}", self.id);
                continue;
            }
            self.publish(GameEvent::BetPlaced {
                player_id: id.clone(),
                amount,
            });
            match self.ledger.confirm(&id, &mut self.wallet) {
                Ok(amount) => {
                    log::debug!("room {}: bot {id} confirmed {amount}", self.id);
                    self.publish(GameEvent::BetConfirmed {
                        player_id: id,
                        amount,
                    });
                }
                Err(e) => {
                    log::debug!("room {}: bot {id} could not confirm: {e}", self.id);
                    if self.ledger.cancel(&id).is_ok() {
                        self.publish(GameEvent::BetCancelled { player_id: id });
                    }
                }
            }
        }
    }

    fn on_phase_expired(&mut self) {
        let phase = self.phase;
        if !self.scheduler.take_expired(phase) {
            // Timer armed for a phase we already left
            self.scheduler.cancel();
            return;
        }
        match phase {
            RoomPhase::Betting => self.enter_locked(),
            RoomPhase::Locked => self.start_spin(),
            RoomPhase::Result => {
                let next = if self.config.auto_play_again {
                    NextRound::PlayAgain
                } else {
                    NextRound::ExitToLobby
                };
                self.apply_next_round(next);
            }
            _ => {}
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // PHASE ENTRY
    // ═══════════════════════════════════════════════════════════════════════

    fn enter_betting(&mut self) {
        self.transition(RoomPhase::Betting);
        let now = self.scheduler.now();

        if self.human().is_some_and(|h| !h.is_confirmed()) {
            self.inactivity.arm(
                now,
                self.timing.betting_window_ms,
                self.timing.warning_at_ms(),
            );
        }
        if self.ledger.players().iter().any(Player::is_bot) {
            self.next_bot_tick = Some(now + self.timing.bot_tick_ms);
        }
    }

    fn enter_locked(&mut self) {
        self.inactivity.disarm();
        self.next_bot_tick = None;
        self.transition(RoomPhase::Locked);

        let pot = self.ledger.lock();
        let confirmed_players = self.ledger.confirmed_count();
        log::info!("room {}: pot locked at {pot} ({confirmed_players} bets)", self.id);
        self.publish(GameEvent::PotLocked {
            pot,
            confirmed_players,
        });
    }

    fn start_spin(&mut self) {
        match self.wheel.commit(&self.segments) {
            Ok(commitment) => {
                self.publish(GameEvent::OutcomeCommitted {
                    target_index: commitment.target_index,
                    label: commitment.segment.label.clone(),
                    color: commitment.segment.color.clone(),
                    value: commitment.segment.value,
                });
                let target_index = commitment.target_index;
                self.commitment = Some(commitment);
                self.transition(RoomPhase::Spinning);
                self.spin_lock = SpinLock::InProgress;
                self.publish(GameEvent::SpinStarted { target_index });
            }
            Err(e) => {
                log::warn!("room {}: round {} aborted: {e}", self.id, self.round);
                self.close(CloseReason::Aborted);
            }
        }
    }

    fn resolve_round(&mut self, commitment: &Commitment) {
        let rule = if self.config.mode.resolves_by_seat() {
            ResolutionRule::SeatValue
        } else {
            ResolutionRule::ColorMatch
        };
        let resolution = self.ledger.resolve(&commitment.segment, rule, &mut self.rng);
        if let Err(e) = self.ledger.settle(&resolution, &mut self.wallet) {
            log::warn!("room {}: settlement failed: {e}", self.id);
        }

        let result = match &resolution {
            Resolution::Winner {
                player_id,
                username,
                amount,
                pot,
            } => {
                log::info!(
                    "room {}: round {} won by {username} on {} (+{amount})",
                    self.id,
                    self.round,
                    commitment.segment.color
                );
                RoundResult {
                    round: self.round,
                    target_index: commitment.target_index,
                    winning_color: commitment.segment.color.clone(),
                    winning_value: commitment.segment.value,
                    winner_id: Some(player_id.clone()),
                    winner_name: Some(username.clone()),
                    amount: *amount,
                    pot: *pot,
                    is_user_win: self.human.as_ref() == Some(player_id),
                    refunds: Vec::new(),
                }
            }
            Resolution::NoWinner { pot, refunds } => {
                log::info!(
                    "room {}: round {} no winner on {}, {} stakes returned",
                    self.id,
                    self.round,
                    commitment.segment.color,
                    refunds.len()
                );
                RoundResult {
                    round: self.round,
                    target_index: commitment.target_index,
                    winning_color: commitment.segment.color.clone(),
                    winning_value: commitment.segment.value,
                    winner_id: None,
                    winner_name: None,
                    amount: 0,
                    pot: *pot,
                    is_user_win: false,
                    refunds: refunds.clone(),
                }
            }
        };

        self.last_result = Some(result.clone());
        self.transition(RoomPhase::Result);
        self.publish(GameEvent::RoundResolved {
            result: result.clone(),
        });

        if let Some(name) = &result.winner_name {
            let request = CommentaryRequest {
                winner_name: name.clone(),
                amount: result.amount,
                player_count: self.ledger.players().len(),
            };
            self.pending_commentary =
                Some(PendingCommentary::dispatch(self.commentary.as_mut(), request));
            self.poll_commentary();
        }
        if self.human.is_some() {
            self.publish(GameEvent::PlayAgainOffered);
        }
    }

    fn apply_next_round(&mut self, next: NextRound) {
        self.expire_commentary();
        match next {
            NextRound::ExitToLobby => self.close(CloseReason::ExitedToLobby),
            NextRound::PlayAgain => {
                self.round += 1;
                self.ledger.reset_round();
                self.spin_lock = SpinLock::Idle;
                self.commitment = None;
                self.publish(GameEvent::RoundReset { round: self.round });
                self.assign_colors();
                if self.human.is_some() {
                    self.transition(RoomPhase::PreGame);
                } else {
                    self.enter_betting();
                }
            }
        }
    }

    fn close(&mut self, reason: CloseReason) {
        self.inactivity.disarm();
        self.next_bot_tick = None;
        self.expire_commentary();
        self.return_open_stakes();
        self.transition(RoomPhase::Closed(reason));
    }

    /// Refund confirmed stakes of a round that closes before it settles
    fn return_open_stakes(&mut self) {
        if self.ledger.is_settled() {
            return;
        }
        let refunds = self.ledger.refunds();
        if refunds.is_empty() {
            return;
        }
        let resolution = Resolution::NoWinner {
            pot: self.ledger.pot(),
            refunds: refunds.clone(),
        };
        match self.ledger.settle(&resolution, &mut self.wallet) {
            Ok(_) => {
                log::info!(
                    "room {}: round {} closed unresolved, {} stakes returned",
                    self.id,
                    self.round,
                    refunds.len()
                );
                self.publish(GameEvent::StakesReturned { refunds });
            }
            Err(e) => log::warn!("room {}: refund failed: {e}", self.id),
        }
    }

    fn poll_commentary(&mut self) {
        let Some((text, fallback)) = self.pending_commentary.as_ref().and_then(PendingCommentary::poll)
        else {
            return;
        };
        self.pending_commentary = None;
        self.publish(GameEvent::Commentary { text, fallback });
    }

    /// Publish whatever the service managed, or the fallback line
    fn expire_commentary(&mut self) {
        if let Some(pending) = self.pending_commentary.take() {
            let (text, fallback) = pending.expire();
            self.publish(GameEvent::Commentary { text, fallback });
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    fn transition(&mut self, to: RoomPhase) {
        let from = self.phase;
        debug_assert!(from.can_transition_to(to), "illegal transition {from} -> {to}");
        self.phase = to;

        let duration = self.timing.room_phase_ms(to);
        match duration {
            Some(ms) => {
                self.scheduler.arm(to, ms);
            }
            None => self.scheduler.cancel(),
        }
        log::info!("room {}: {from} -> {to}", self.id);
        self.publish(GameEvent::PhaseChanged {
            from,
            to,
            duration_secs: duration.map(secs),
        });
    }

    /// Shuffle palette colors onto seats and rebuild seat-colored wheels
    fn assign_colors(&mut self) {
        let mut colors: Vec<Color> = self.config.palette.colors().to_vec();
        colors.shuffle(&mut self.rng);
        for (player, color) in self.ledger.players_mut().iter_mut().zip(colors) {
            player.assigned_color = color;
        }
        self.segments = build_segments(&self.config, self.ledger.players());

        let assigned: Vec<(PlayerId, Color)> = self
            .ledger
            .players()
            .iter()
            .map(|p| (p.id.clone(), p.assigned_color.clone()))
            .collect();
        for (player_id, color) in assigned {
            self.publish(GameEvent::ColorAssigned { player_id, color });
        }
    }

    fn publish(&mut self, event: GameEvent) {
        self.stream
            .publish(self.scheduler.now(), self.round, event);
    }
}

fn build_segments(config: &RoomConfig, players: &[Player]) -> Vec<Segment> {
    match config.effective_wheel() {
        WheelPreset::Blitz => wheel::blitz(&config.palette),
        WheelPreset::Classic => wheel::classic(),
        WheelPreset::Duel => match players {
            [a, b, ..] => wheel::duel(
                [&a.assigned_color, &b.assigned_color],
                DUEL_SLICES_PER_SEAT,
            ),
            _ => Vec::new(),
        },
        WheelPreset::Custom(segments) => segments,
    }
}
