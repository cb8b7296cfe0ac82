//! Bot behavior: probability-per-tick betting decisions

use rand::Rng;

use xs_core::{BotProfile, PlayerStatus};

/// What a bot does on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotDecision {
    Hold,
    /// Place and confirm this amount
    Bet(u64),
}

/// Roll one bot tick
///
/// Only idle bots act. The amount is drawn from the profile range, raised
/// to `min_bet`, and the bot holds if it cannot afford it.
pub fn decide<R: Rng + ?Sized>(
    profile: &BotProfile,
    status: PlayerStatus,
    balance: u64,
    min_bet: u64,
    rng: &mut R,
) -> BotDecision {
    if status != PlayerStatus::Idle {
        return BotDecision::Hold;
    }

    let p = profile.confirm_probability.clamp(0.0, 1.0);
    if !rng.random_bool(p) {
        return BotDecision::Hold;
    }

    let (lo, hi) = profile.bet_range;
    let (lo, hi) = (lo.min(hi), lo.max(hi));
    let amount = rng.random_range(lo..=hi).max(min_bet);
    if amount > balance {
        return BotDecision::Hold;
    }
    BotDecision::Bet(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fixed_bot_always_bets() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let profile = BotProfile::fixed(50);
        for _ in 0..20 {
            assert_eq!(
                decide(&profile, PlayerStatus::Idle, 1_000, 10, &mut rng),
                BotDecision::Bet(50)
            );
        }
    }

    #[test]
    fn test_passive_and_busy_bots_hold() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            decide(&BotProfile::passive(), PlayerStatus::Idle, 1_000, 10, &mut rng),
            BotDecision::Hold
        );
        assert_eq!(
            decide(&BotProfile::fixed(50), PlayerStatus::Confirmed, 1_000, 10, &mut rng),
            BotDecision::Hold
        );
        assert_eq!(
            decide(&BotProfile::fixed(50), PlayerStatus::Idle, 49, 10, &mut rng),
            BotDecision::Hold
        );
    }

    #[test]
    fn test_default_profile_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let profile = BotProfile::default();
        let mut bets = 0;
        for _ in 0..500 {
            if let BotDecision::Bet(amount) =
                decide(&profile, PlayerStatus::Idle, 10_000, 10, &mut rng)
            {
                assert!((50..=549).contains(&amount));
                bets += 1;
            }
        }
        // ~40% of ticks
        assert!(bets > 120 && bets < 280, "bets = {bets}");
    }
}
