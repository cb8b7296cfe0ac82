//! Wheel Outcome Generator: commits the winning segment before a spin
//!
//! The generator owns a seedable ChaCha RNG so every draw is reproducible
//! from a seed. A forced outcome can be queued for tests and presentation
//! builds; it is validated against the segment count when consumed.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use xs_core::{Color, Palette, Player, Segment, XsError, XsResult};

/// Slices per color on the blitz wheel
pub const BLITZ_SLICES_PER_COLOR: usize = 3;

/// Multiplier of the single green slice on the classic wheel
pub const CLASSIC_GREEN_MULTIPLIER: u64 = 14;

/// Outcome fixed before the wheel starts moving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    pub target_index: usize,
    pub segment: Segment,
}

/// Seedable outcome generator
pub struct WheelGenerator {
    rng: ChaCha8Rng,
    /// Queued forced outcomes (consumed in order)
    forced: VecDeque<usize>,
    /// Total draws made
    draws: u64,
}

impl WheelGenerator {
    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            forced: VecDeque::new(),
            draws: 0,
        }
    }

    /// Queue a forced outcome for the next draw
    pub fn force_next(&mut self, index: usize) {
        self.forced.push_back(index);
    }

    pub fn pending_forced(&self) -> usize {
        self.forced.len()
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Pick a winning index in `[0, segments.len())`
    pub fn resolve(&mut self, segments: &[Segment]) -> XsResult<usize> {
        if segments.is_empty() {
            return Err(XsError::InvalidSegmentSet);
        }
        self.draws += 1;

        while let Some(index) = self.forced.pop_front() {
            if index < segments.len() {
                log::debug!("wheel: forced outcome {index}");
                return Ok(index);
            }
            log::warn!(
                "wheel: discarding forced outcome {index}, wheel has {} segments",
                segments.len()
            );
        }

        Ok(self.rng.random_range(0..segments.len()))
    }

    /// Resolve and pair the index with its segment
    pub fn commit(&mut self, segments: &[Segment]) -> XsResult<Commitment> {
        let target_index = self.resolve(segments)?;
        let segment = segments[target_index].clone();
        Ok(Commitment {
            target_index,
            segment,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// WHEEL PRESETS
// ═══════════════════════════════════════════════════════════════════════════

/// Every palette color three times, payout x2
pub fn blitz(palette: &Palette) -> Vec<Segment> {
    palette
        .colors()
        .iter()
        .enumerate()
        .flat_map(|(i, color)| {
            (0..BLITZ_SLICES_PER_COLOR).map(move |slice| {
                Segment::new(
                    color.short_label(),
                    color.clone(),
                    i * BLITZ_SLICES_PER_COLOR + slice,
                )
            })
        })
        .collect()
}

/// Seven red, seven black and one green slice (green pays x14)
pub fn classic() -> Vec<Segment> {
    let mut segments = Vec::with_capacity(15);
    segments.push(
        Segment::new("0", Color::new("green"), 0).with_multiplier(CLASSIC_GREEN_MULTIPLIER),
    );
    for value in 1..15 {
        let color = if value % 2 == 1 {
            Color::new("red")
        } else {
            Color::new("black")
        };
        segments.push(Segment::new(value.to_string(), color, value));
    }
    segments
}

/// Alternating seat 0 / seat 1 slices in the two seat colors
pub fn duel(seat_colors: [&Color; 2], slices_per_seat: usize) -> Vec<Segment> {
    (0..slices_per_seat * 2)
        .map(|i| {
            let seat = i % 2;
            Segment::new(format!("P{}", seat + 1), seat_colors[seat].clone(), seat)
        })
        .collect()
}

/// One slice per color for the first `n` palette colors
pub fn tournament(palette: &Palette, n: usize) -> Vec<Segment> {
    palette
        .take(n)
        .into_iter()
        .enumerate()
        .map(|(i, color)| Segment::new(color.short_label(), color, i))
        .collect()
}

/// One slice per finalist, value = finalist index
pub fn finalists(players: &[Player]) -> Vec<Segment> {
    players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let label: String = p.username.chars().take(2).collect();
            Segment::new(label.to_uppercase(), p.assigned_color.clone(), i)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_segments_rejected() {
        let mut wheel = WheelGenerator::seeded(1);
        assert!(matches!(wheel.resolve(&[]), Err(XsError::InvalidSegmentSet)));
        assert_eq!(wheel.draws(), 0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let segments = blitz(&Palette::default());
        let mut a = WheelGenerator::seeded(42);
        let mut b = WheelGenerator::seeded(42);
        for _ in 0..50 {
            let ia = a.resolve(&segments).unwrap();
            assert_eq!(ia, b.resolve(&segments).unwrap());
            assert!(ia < segments.len());
        }
    }

    #[test]
    fn test_forced_outcome() {
        let segments = blitz(&Palette::default());
        let mut wheel = WheelGenerator::seeded(7);
        wheel.force_next(30);
        let commitment = wheel.commit(&segments).unwrap();
        assert_eq!(commitment.target_index, 30);
        assert_eq!(commitment.segment.color, Color::new("green"));
        assert_eq!(wheel.pending_forced(), 0);
    }

    #[test]
    fn test_out_of_range_force_is_discarded() {
        let segments = tournament(&Palette::default(), 10);
        let mut wheel = WheelGenerator::seeded(7);
        wheel.force_next(99);
        let index = wheel.resolve(&segments).unwrap();
        assert!(index < 10);
        assert_eq!(wheel.pending_forced(), 0);
    }

    #[test]
    fn test_presets() {
        let blitz = blitz(&Palette::default());
        assert_eq!(blitz.len(), 36);
        assert_eq!(blitz[0].label, "RED");
        assert_eq!(blitz[35].value, 35);
        assert!(blitz.iter().all(|s| s.multiplier == 2));

        let classic = classic();
        assert_eq!(classic.len(), 15);
        let greens: Vec<_> = classic.iter().filter(|s| s.color.name() == "green").collect();
        assert_eq!(greens.len(), 1);
        assert_eq!(greens[0].multiplier, 14);

        let red = Color::new("red");
        let blue = Color::new("blue");
        let duel = duel([&red, &blue], 6);
        assert_eq!(duel.len(), 12);
        assert_eq!(duel.iter().filter(|s| s.value == 1).count(), 6);

        let tournament = tournament(&Palette::default(), 10);
        assert_eq!(tournament.len(), 10);
        assert_eq!(tournament[9].color, Color::new("pink"));
    }
}
