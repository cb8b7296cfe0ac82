//! Tournament Bracket Coordinator: the Grand Prix
//!
//! Ten groups of ten spin their own wheels from one shared countdown. Each
//! group advances at most one confirmed color-matching player; the survivors
//! get fresh colors and share a final wheel whose winner takes the whole
//! aggregate pot.
//!
//! ```text
//! REGISTRATION ─▶ BRACKET_VIEW ─▶ GROUP_COUNTDOWN ─▶ GROUP_SPINNING ─signal─▶ GROUP_RESULT
//!                                                                                │
//!      COMPLETE ◀─ FINAL_RESULT ◀─signal─ FINAL_SPINNING ◀─ FINAL_COUNTDOWN ◀─ FINAL_COLOR_ASSIGN
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use xs_core::{
    BalanceStore, BotProfile, Player, PlayerId, PlayerStatus, Profile, RoomId, Segment,
    SharedWallet, XsError, XsResult,
};
use xs_stage::{
    EventRecord, EventStream, GameEvent, GroupRoster, PlayerView, RoomTrace, Standing,
    TimingConfig, TournamentPhase, secs,
};

use crate::config::{GameConfig, TournamentConfig};
use crate::ledger::{BetLedger, BetLimits, ResolutionRule};
use crate::room::SpinLock;
use crate::scheduler::PhaseScheduler;
use crate::wheel::{self, Commitment, WheelGenerator};

const BOT_PREFIXES: [&str; 10] = [
    "Ace", "Blaze", "Comet", "Dash", "Echo", "Flux", "Ghost", "Halo", "Ion", "Jinx",
];

/// One 10-player sub-pot
pub struct Group {
    pub group_number: u32,
    ledger: BetLedger,
    wheel: WheelGenerator,
    commitment: Option<Commitment>,
    winner: Option<PlayerId>,
}

impl Group {
    pub fn players(&self) -> &[Player] {
        self.ledger.players()
    }

    pub fn total_pot(&self) -> u64 {
        self.ledger.pot()
    }

    pub fn commitment(&self) -> Option<&Commitment> {
        self.commitment.as_ref()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref().and_then(|id| self.ledger.player(id))
    }

    pub fn roster(&self) -> GroupRoster {
        GroupRoster {
            group_number: self.group_number,
            players: self.players().iter().map(PlayerView::from).collect(),
            total_pot: self.total_pot(),
        }
    }
}

/// Pull-model view of a Grand Prix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrandPrixSnapshot {
    pub tournament_id: RoomId,
    pub phase: TournamentPhase,
    pub timer_secs: Option<u32>,
    pub groups: Vec<GroupRoster>,
    pub group_winners: Vec<PlayerView>,
    pub finalists: Vec<PlayerView>,
    pub grand_winner: Option<PlayerView>,
    pub aggregate_pot: u64,
    /// Human progress (None without a human)
    pub standing: Option<Standing>,
}

pub struct GrandPrix {
    id: RoomId,
    config: TournamentConfig,
    timing: TimingConfig,
    phase: TournamentPhase,
    scheduler: PhaseScheduler<TournamentPhase>,
    groups: Vec<Group>,
    group_segments: Vec<Segment>,
    group_spin: SpinLock,
    group_winners: Vec<Player>,
    finalists: Vec<Player>,
    final_segments: Vec<Segment>,
    final_wheel: WheelGenerator,
    final_commitment: Option<Commitment>,
    final_spin: SpinLock,
    grand_winner: Option<Player>,
    aggregate_pot: u64,
    /// Payout latch for the aggregate pot
    paid_out: bool,
    human: Option<PlayerId>,
    profile: Option<Profile>,
    standing: Standing,
    wallet: SharedWallet,
    rng: ChaCha8Rng,
    stream: EventStream,
}

impl GrandPrix {
    /// Compose the bracket, placing the human at a random group and seat
    pub fn new(config: &GameConfig, human: Option<Profile>, wallet: SharedWallet) -> XsResult<Self> {
        let tc = &config.tournament;
        tc.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(tc.seed.unwrap_or_else(rand::random::<u64>));

        let human_slot = (rng.random_range(0..tc.groups), rng.random_range(0..tc.players_per_group));
        let mut rosters = Vec::with_capacity(tc.groups);
        for g in 0..tc.groups {
            let mut players = Vec::with_capacity(tc.players_per_group);
            for pos in 0..tc.players_per_group {
                let color = tc
                    .palette
                    .get(pos)
                    .cloned()
                    .ok_or_else(|| XsError::InvalidRoster(format!("no color for seat {pos}")))?;
                let player = match &human {
                    Some(profile) if (g, pos) == human_slot => Player::human(profile, pos, color),
                    _ => {
                        let prefix = BOT_PREFIXES[(g + pos) % BOT_PREFIXES.len()];
                        let username = format!("{prefix}{:03}", rng.random_range(0..1000));
                        let id = format!("g{}-p{}", g + 1, pos);
                        Player::bot(id, username, pos, color, BotProfile::passive())
                    }
                };
                players.push(player);
            }
            rosters.push(players);
        }

        Self::build(config, rosters, human, wallet, rng)
    }

    /// Use prepared group rosters instead of generated ones
    pub fn from_groups(
        config: &GameConfig,
        rosters: Vec<Vec<Player>>,
        human: Option<Profile>,
        wallet: SharedWallet,
    ) -> XsResult<Self> {
        config.tournament.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.tournament.seed.unwrap_or_else(rand::random::<u64>));
        Self::build(config, rosters, human, wallet, rng)
    }

    fn build(
        config: &GameConfig,
        rosters: Vec<Vec<Player>>,
        human: Option<Profile>,
        wallet: SharedWallet,
        mut rng: ChaCha8Rng,
    ) -> XsResult<Self> {
        config.timing.validate().map_err(XsError::Config)?;
        let tc = config.tournament.clone();

        if rosters.is_empty() || rosters.len() > tc.palette.len() {
            return Err(XsError::InvalidRoster(format!(
                "{} groups, palette has {} colors",
                rosters.len(),
                tc.palette.len()
            )));
        }
        for (g, roster) in rosters.iter().enumerate() {
            if roster.is_empty() {
                return Err(XsError::InvalidRoster(format!("group {} is empty", g + 1)));
            }
            for (i, player) in roster.iter().enumerate() {
                if roster[..i].iter().any(|p| p.assigned_color == player.assigned_color) {
                    return Err(XsError::InvalidRoster(format!(
                        "color {} used twice in group {}",
                        player.assigned_color,
                        g + 1
                    )));
                }
                if player.is_bot() && !wallet.has_account(&player.id) {
                    wallet.open(player.id.clone(), tc.bot_starting_balance);
                }
            }
        }

        let limits = BetLimits {
            min_bet: tc.entry_fee,
            max_bet: Some(tc.entry_fee),
        };
        let groups = rosters
            .into_iter()
            .enumerate()
            .map(|(g, players)| Group {
                group_number: g as u32 + 1,
                ledger: BetLedger::new(players, limits),
                wheel: WheelGenerator::seeded(rng.random::<u64>()),
                commitment: None,
                winner: None,
            })
            .collect();

        let id = RoomId::generate_with_prefix("gp");
        log::info!(
            "grand prix {id}: {} groups x {} players, entry {}",
            tc.groups,
            tc.players_per_group,
            tc.entry_fee
        );

        Ok(Self {
            stream: EventStream::new(id.as_str()),
            id,
            group_segments: wheel::tournament(&tc.palette, tc.players_per_group),
            final_wheel: WheelGenerator::seeded(rng.random::<u64>()),
            config: tc,
            timing: config.timing.clone(),
            phase: TournamentPhase::Registration,
            scheduler: PhaseScheduler::new(),
            groups,
            group_spin: SpinLock::Idle,
            group_winners: Vec::new(),
            finalists: Vec::new(),
            final_segments: Vec::new(),
            final_commitment: None,
            final_spin: SpinLock::Idle,
            grand_winner: None,
            aggregate_pot: 0,
            paid_out: false,
            human: human.as_ref().map(|p| p.id.clone()),
            profile: human,
            standing: Standing::Competing,
            wallet,
            rng,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn phase(&self) -> TournamentPhase {
        self.phase
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.scheduler.remaining_ms()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_winners(&self) -> &[Player] {
        &self.group_winners
    }

    pub fn finalists(&self) -> &[Player] {
        &self.finalists
    }

    pub fn final_segments(&self) -> &[Segment] {
        &self.final_segments
    }

    pub fn final_commitment(&self) -> Option<&Commitment> {
        self.final_commitment.as_ref()
    }

    pub fn grand_winner(&self) -> Option<&Player> {
        self.grand_winner.as_ref()
    }

    pub fn aggregate_pot(&self) -> u64 {
        self.aggregate_pot
    }

    pub fn standing(&self) -> Option<Standing> {
        self.human.as_ref().map(|_| self.standing)
    }

    /// The human's profile, including any rank progress from this tournament
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Group holding the human
    pub fn human_group(&self) -> Option<&Group> {
        let id = self.human.as_ref()?;
        self.groups.iter().find(|g| g.ledger.player(id).is_some())
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

    pub fn snapshot(&self) -> GrandPrixSnapshot {
        GrandPrixSnapshot {
            tournament_id: self.id.clone(),
            phase: self.phase,
            timer_secs: self.scheduler.remaining_ms().map(secs),
            groups: self.groups.iter().map(Group::roster).collect(),
            group_winners: self.group_winners.iter().map(PlayerView::from).collect(),
            finalists: self.finalists.iter().map(PlayerView::from).collect(),
            grand_winner: self.grand_winner.as_ref().map(PlayerView::from),
            aggregate_pot: self.aggregate_pot,
            standing: self.standing(),
        }
    }

    /// Queue a forced outcome for one group's wheel (1-based group number)
    pub fn force_group_outcome(&mut self, group_number: u32, index: usize) -> XsResult<()> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.group_number == group_number)
            .ok_or_else(|| XsError::InvalidRoster(format!("no group {group_number}")))?;
        group.wheel.force_next(index);
        Ok(())
    }

    pub fn force_final_outcome(&mut self, index: usize) {
        self.final_wheel.force_next(index);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DRIVERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Collect the entry fee from every seat and open the bracket
    ///
    /// A human who cannot pay is rejected before anyone is charged. Bots
    /// that cannot pay stay IDLE and cannot advance.
    pub fn register(&mut self) -> XsResult<()> {
        if self.phase != TournamentPhase::Registration {
            return Err(XsError::WrongPhase {
                operation: "register",
                phase: self.phase.to_string(),
            });
        }
        let fee = self.config.entry_fee;
        if let Some(id) = &self.human {
            let available = self.wallet.balance(id);
            if available < fee {
                return Err(XsError::InsufficientFunds {
                    needed: fee,
                    available,
                });
            }
        }

        let mut events = Vec::new();
        for group in &mut self.groups {
            let ids: Vec<PlayerId> = group.players().iter().map(|p| p.id.clone()).collect();
            for id in ids {
                let paid = group
                    .ledger
                    .place(&id, fee, &self.wallet)
                    .and_then(|_| group.ledger.confirm(&id, &mut self.wallet));
                match paid {
                    Ok(amount) => events.push(GameEvent::BetConfirmed {
                        player_id: id,
                        amount,
                    }),
                    Err(e) => {
                        log::debug!("grand prix {}: {id} sits out: {e}", self.id);
                        let placed = group
                            .ledger
                            .player(&id)
                            .is_some_and(|p| p.status == PlayerStatus::Placed);
                        let released = if placed { group.ledger.cancel(&id) } else { Ok(()) };
                        if let Err(e) = released {
                            log::warn!("grand prix {}: could not release {id}: {e}", self.id);
                        }
                    }
                }
            }
            self.aggregate_pot += group.ledger.lock();
        }
        for event in events {
            self.publish(event);
        }

        let rosters = self.groups.iter().map(Group::roster).collect();
        self.publish(GameEvent::GroupsComposed { groups: rosters });
        log::info!("grand prix {}: aggregate pot {}", self.id, self.aggregate_pot);
        self.transition(TournamentPhase::BracketView);
        Ok(())
    }

    /// Advance virtual time through every phase deadline inside the delta
    pub fn tick(&mut self, delta_ms: u64) {
        let target = self.scheduler.now().saturating_add(delta_ms);
        while let Some(deadline) = self.scheduler.deadline().filter(|&d| d <= target) {
            self.scheduler.advance_to(deadline);
            self.on_phase_expired();
        }
        self.scheduler.advance_to(target);
    }

    /// All group wheels stopped. Returns false for a duplicate or stale signal.
    pub fn group_spin_complete(&mut self) -> bool {
        if self.phase != TournamentPhase::GroupSpinning || self.group_spin != SpinLock::InProgress {
            log::debug!("grand prix {}: ignoring group spin-complete in {}", self.id, self.phase);
            return false;
        }
        self.group_spin = SpinLock::Complete;
        self.publish(GameEvent::SpinCompleted);
        self.resolve_groups();
        true
    }

    /// Final wheel stopped. Returns false for a duplicate or stale signal.
    pub fn final_spin_complete(&mut self) -> bool {
        if self.phase != TournamentPhase::FinalSpinning || self.final_spin != SpinLock::InProgress {
            log::debug!("grand prix {}: ignoring final spin-complete in {}", self.id, self.phase);
            return false;
        }
        let Some(commitment) = self.final_commitment.clone() else {
            return false;
        };
        self.final_spin = SpinLock::Complete;
        self.publish(GameEvent::SpinCompleted);
        self.resolve_final(&commitment);
        true
    }

    fn on_phase_expired(&mut self) {
        let phase = self.phase;
        if !self.scheduler.take_expired(phase) {
            self.scheduler.cancel();
            return;
        }
        match phase {
            TournamentPhase::BracketView => self.transition(TournamentPhase::GroupCountdown),
            TournamentPhase::GroupCountdown => self.start_group_spins(),
            TournamentPhase::GroupResult => {
                if self.group_winners.is_empty() {
                    self.complete_without_champion();
                } else {
                    self.assign_finalists();
                }
            }
            TournamentPhase::FinalColorAssign => self.transition(TournamentPhase::FinalCountdown),
            TournamentPhase::FinalCountdown => self.start_final_spin(),
            TournamentPhase::FinalResult => self.transition(TournamentPhase::Complete),
            _ => {}
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // GROUP STAGE
    // ═══════════════════════════════════════════════════════════════════════

    /// Every group commits at the same instant, each from its own generator
    fn start_group_spins(&mut self) {
        let mut events = Vec::with_capacity(self.groups.len());
        for group in &mut self.groups {
            match group.wheel.commit(&self.group_segments) {
                Ok(commitment) => {
                    events.push(GameEvent::GroupOutcomeCommitted {
                        group_number: group.group_number,
                        target_index: commitment.target_index,
                        color: commitment.segment.color.clone(),
                    });
                    group.commitment = Some(commitment);
                }
                Err(e) => {
                    log::warn!(
                        "grand prix {}: group {} has no outcome: {e}",
                        self.id,
                        group.group_number
                    );
                }
            }
        }
        for event in events {
            self.publish(event);
        }
        self.transition(TournamentPhase::GroupSpinning);
        self.group_spin = SpinLock::InProgress;
    }

    fn resolve_groups(&mut self) {
        let mut events = Vec::new();
        let mut winners = Vec::new();

        for group in &mut self.groups {
            let Some(commitment) = &group.commitment else {
                continue;
            };
            let resolution =
                group
                    .ledger
                    .resolve(&commitment.segment, ResolutionRule::ColorMatch, &mut self.rng);
            group.winner = resolution.winner_id().cloned();

            let winner = group.winner.as_ref().and_then(|id| group.ledger.player(id));
            log::info!(
                "grand prix {}: group {} lands on {}, winner {}",
                self.id,
                group.group_number,
                commitment.segment.color,
                winner.map_or("none", |p| p.username.as_str())
            );
            events.push(GameEvent::GroupResolved {
                group_number: group.group_number,
                winning_color: commitment.segment.color.clone(),
                winner: winner.map(PlayerView::from),
            });
            if let Some(player) = winner {
                winners.push(player.clone());
            }
            for player in group.players() {
                if Some(&player.id) != group.winner.as_ref() {
                    events.push(GameEvent::PlayerEliminated {
                        player_id: player.id.clone(),
                    });
                }
            }
        }

        if let Some(id) = &self.human {
            self.standing = if winners.iter().any(|w| &w.id == id) {
                Standing::Advanced
            } else {
                Standing::Eliminated
            };
        }

        for event in events {
            self.publish(event);
        }
        self.publish(GameEvent::GroupWinnersDeclared {
            winners: winners.iter().map(PlayerView::from).collect(),
        });
        self.group_winners = winners;
        self.transition(TournamentPhase::GroupResult);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // FINAL
    // ═══════════════════════════════════════════════════════════════════════

    /// Fresh pairwise-distinct colors for the survivors
    fn assign_finalists(&mut self) {
        let palette = self.config.palette.colors();
        self.finalists = self
            .group_winners
            .iter()
            .enumerate()
            .filter_map(|(idx, winner)| {
                let color = palette.get(idx)?.clone();
                let mut finalist = winner.clone();
                finalist.assigned_color = color;
                finalist.seat = idx;
                Some(finalist)
            })
            .collect();
        self.final_segments = wheel::finalists(&self.finalists);

        self.transition(TournamentPhase::FinalColorAssign);
        let finalists = self.finalists.iter().map(PlayerView::from).collect();
        self.publish(GameEvent::FinalistsAssigned { finalists });
    }

    fn start_final_spin(&mut self) {
        match self.final_wheel.commit(&self.final_segments) {
            Ok(commitment) => {
                self.publish(GameEvent::OutcomeCommitted {
                    target_index: commitment.target_index,
                    label: commitment.segment.label.clone(),
                    color: commitment.segment.color.clone(),
                    value: commitment.segment.value,
                });
                let target_index = commitment.target_index;
                self.final_commitment = Some(commitment);
                self.transition(TournamentPhase::FinalSpinning);
                self.final_spin = SpinLock::InProgress;
                self.publish(GameEvent::SpinStarted { target_index });
            }
            Err(e) => {
                log::warn!("grand prix {}: final cannot spin: {e}", self.id);
                self.complete_without_champion();
            }
        }
    }

    fn resolve_final(&mut self, commitment: &Commitment) {
        let Some(winner) = self.finalists.get(commitment.segment.value).cloned() else {
            self.complete_without_champion();
            return;
        };

        let amount = self.aggregate_pot;
        if !self.paid_out {
            self.paid_out = true;
            if let Err(e) = self.wallet.credit(&winner.id, amount) {
                log::warn!("grand prix {}: payout failed: {e}", self.id);
            }
        }
        log::info!("grand prix {}: champion {} (+{amount})", self.id, winner.username);

        let is_user_win = self.human.as_ref() == Some(&winner.id);
        if let Some(id) = &self.human {
            if self.finalists.iter().any(|f| &f.id == id) {
                self.standing = if is_user_win {
                    Standing::Champion
                } else {
                    Standing::RunnerUp
                };
            }
        }

        self.grand_winner = Some(winner.clone());
        self.publish(GameEvent::GrandWinnerDeclared {
            winner: Some(PlayerView::from(&winner)),
            amount,
            is_user_win,
        });

        if is_user_win {
            let rank_up = self.profile.as_mut().and_then(Profile::record_tournament_win);
            if let Some(rank_up) = rank_up {
                log::info!("grand prix {}: {} ranks up to {}", self.id, winner.username, rank_up.to.label());
                self.publish(GameEvent::RankUp {
                    player_id: winner.id.clone(),
                    rank_up,
                });
            }
        }
        self.transition(TournamentPhase::FinalResult);
    }

    /// No finalist: every paid entry fee goes back
    fn complete_without_champion(&mut self) {
        if !self.paid_out {
            self.paid_out = true;
            for group in &self.groups {
                for refund in group.ledger.refunds() {
                    if let Err(e) = self.wallet.credit(&refund.player_id, refund.amount) {
                        log::warn!("grand prix {}: refund failed: {e}", self.id);
                    }
                }
            }
        }
        log::info!("grand prix {}: no champion, {} refunded", self.id, self.aggregate_pot);
        self.publish(GameEvent::GrandWinnerDeclared {
            winner: None,
            amount: 0,
            is_user_win: false,
        });
        self.transition(TournamentPhase::Complete);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    fn transition(&mut self, to: TournamentPhase) {
        let from = self.phase;
        self.phase = to;
        let duration = self.timing.tournament_phase_ms(to);
        match duration {
            Some(ms) => {
                self.scheduler.arm(to, ms);
            }
            None => self.scheduler.cancel(),
        }
        log::info!("grand prix {}: {from} -> {to}", self.id);
        self.publish(GameEvent::TournamentPhaseChanged {
            from,
            to,
            duration_secs: duration.map(secs),
        });
    }

    fn publish(&mut self, event: GameEvent) {
        // Tournaments are a single round
        self.stream.publish(self.scheduler.now(), 1, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xs_core::Wallet;

    fn config(seed: u64) -> GameConfig {
        let mut config = GameConfig::default();
        config.tournament = TournamentConfig::default().with_seed(seed);
        config
    }

    #[test]
    fn test_bracket_composition() {
        let wallet = SharedWallet::new(Wallet::new());
        let profile = Profile::new("neo", "Neo");
        wallet.open(profile.id.clone(), 100);
        let gp = GrandPrix::new(&config(1), Some(profile.clone()), wallet).unwrap();

        assert_eq!(gp.groups().len(), 10);
        let humans: usize = gp
            .groups()
            .iter()
            .map(|g| g.players().iter().filter(|p| p.is_human()).count())
            .sum();
        assert_eq!(humans, 1);
        for group in gp.groups() {
            assert_eq!(group.players().len(), 10);
            for (i, p) in group.players().iter().enumerate() {
                assert!(group.players()[..i].iter().all(|q| q.assigned_color != p.assigned_color));
            }
        }
        assert_eq!(gp.standing(), Some(Standing::Competing));
        assert!(gp.human_group().is_some());
    }

    #[test]
    fn test_register_charges_entry_fee() {
        let wallet = SharedWallet::new(Wallet::new());
        let profile = Profile::new("neo", "Neo");
        wallet.open(profile.id.clone(), 100);
        let mut gp = GrandPrix::new(&config(2), Some(profile.clone()), wallet.clone()).unwrap();

        gp.register().unwrap();
        assert_eq!(gp.phase(), TournamentPhase::BracketView);
        assert_eq!(gp.aggregate_pot(), 1_000);
        assert_eq!(wallet.balance(&profile.id), 90);
        assert!(gp.groups().iter().all(|g| g.total_pot() == 100));
        assert!(gp.id().as_str().starts_with("gp-"));
        assert!(matches!(gp.register(), Err(XsError::WrongPhase { .. })));
    }

    #[test]
    fn test_unfunded_bot_sits_out_idle() {
        let wallet = SharedWallet::new(Wallet::new());
        let broke = PlayerId::new("g3-p0");
        wallet.open(broke.clone(), 0);
        let mut gp = GrandPrix::new(&config(5), None, wallet.clone()).unwrap();

        gp.register().unwrap();
        assert_eq!(gp.aggregate_pot(), 990);
        let seat = gp.groups()[2].players().iter().find(|p| p.id == broke).unwrap();
        assert_eq!(seat.status, PlayerStatus::Idle);
        assert_eq!(seat.bet_amount, 0);
        assert_eq!(wallet.entry_count(&broke), 0);
        assert_eq!(gp.groups()[2].total_pot(), 90);
    }

    #[test]
    fn test_broke_human_rejected_without_charges() {
        let wallet = SharedWallet::new(Wallet::new());
        let profile = Profile::new("neo", "Neo");
        wallet.open(profile.id.clone(), 5);
        let mut gp = GrandPrix::new(&config(3), Some(profile), wallet.clone()).unwrap();

        assert!(matches!(
            gp.register(),
            Err(XsError::InsufficientFunds { needed: 10, available: 5 })
        ));
        assert_eq!(gp.phase(), TournamentPhase::Registration);
        assert!(gp
            .groups()
            .iter()
            .flat_map(|g| g.players())
            .all(|p| p.status == PlayerStatus::Idle));
    }

    #[test]
    fn test_duplicate_color_roster_rejected() {
        let red = xs_core::Color::new("red");
        let roster = vec![
            Player::bot("a", "A", 0, red.clone(), BotProfile::passive()),
            Player::bot("b", "B", 1, red, BotProfile::passive()),
        ];
        let result = GrandPrix::from_groups(&config(4), vec![roster], None, SharedWallet::default());
        assert!(matches!(result, Err(XsError::InvalidRoster(_))));
    }
}
