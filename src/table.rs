//! Session state for one player at one table.
//!
//! The phase moves Idle -> BetPlaced -> Spinning -> Resolved -> Idle.
//! Calls that don't fit the current phase are no-ops and report
//! [`Transition::Ignored`].

use log::{debug, info, warn};

use crate::bet::{resolve, Bet, BetError, Selection};
use crate::config::TableConfig;
use crate::outcome::{commit, SpinPlan};
use crate::rng::FairRng;
use crate::roulette::{Segment, Wheel};
use crate::trajectory::{normalize, progress, resolve_landing, sample, Trail};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TablePhase {
    Idle,
    BetPlaced,
    Spinning,
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

/// One picture of the wheel. Angles are reduced to `[0, 2π)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub wheel_angle: f64,
    pub ball_angle: f64,
    pub highlighted: Option<usize>,
    pub trail: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    Won { landed: Segment, payout: i64 },
    Lost { landed: Segment, stake: i64 },
}

impl Settlement {
    pub fn landed(&self) -> Segment {
        match *self {
            Settlement::Won { landed, .. } | Settlement::Lost { landed, .. } => landed,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FrameUpdate {
    Moving(Frame),
    /// Final plain frame, the same frame with the landed pocket highlighted,
    /// and the settled bet.
    Landed {
        last: Frame,
        settled: Frame,
        settlement: Settlement,
    },
}

struct SpinState {
    plan: SpinPlan,
    started_at: Option<f64>,
    trail: Trail,
}

pub struct Table<R> {
    config: TableConfig,
    wheel: Wheel,
    rng: R,
    balance: i64,
    phase: TablePhase,
    bet: Option<Bet>,
    spin: Option<SpinState>,
}

impl<R: FairRng> Table<R> {
    pub fn new(config: TableConfig, rng: R) -> Self {
        Table {
            balance: config.starting_balance,
            config,
            wheel: Wheel::new(),
            rng,
            phase: TablePhase::Idle,
            bet: None,
            spin: None,
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    pub fn active_bet(&self) -> Option<&Bet> {
        self.bet.as_ref()
    }

    /// Takes a bet straight from player input. The phase is checked before
    /// the stake, so input arriving mid-spin is dropped rather than rejected.
    pub fn submit_bet(&mut self, selection: Selection, stake: &str) -> Result<Transition, BetError> {
        if self.phase != TablePhase::Idle {
            debug!("bet ignored in phase {:?}", self.phase);
            return Ok(Transition::Ignored);
        }
        let bet = Bet::from_input(selection, stake)?;
        Ok(self.place_bet(bet))
    }

    pub fn place_bet(&mut self, bet: Bet) -> Transition {
        if self.phase != TablePhase::Idle {
            debug!("bet ignored in phase {:?}", self.phase);
            return Transition::Ignored;
        }
        self.balance = self.balance.saturating_sub(bet.stake);
        self.bet = Some(bet);
        info!("bet placed: {} for {}", bet.selection, bet.stake);
        self.set_phase(TablePhase::BetPlaced);
        Transition::Applied
    }

    /// Commits the outcome. Frames start counting from the next `advance`.
    pub fn start_spin(&mut self) -> Transition {
        if self.phase != TablePhase::BetPlaced {
            debug!("spin ignored in phase {:?}", self.phase);
            return Transition::Ignored;
        }
        let plan = commit(&mut self.rng);
        debug!(
            "spin committed: pocket={} offset={:.4} orbits={:.3} duration={:.0}ms",
            plan.winning_index, plan.offset, plan.ball_orbits, plan.duration_ms
        );
        self.spin = Some(SpinState {
            plan,
            started_at: None,
            trail: Trail::default(),
        });
        self.set_phase(TablePhase::Spinning);
        Transition::Applied
    }

    /// Moves the animation to `now_ms`. Returns `None` when nothing spins.
    pub fn advance(&mut self, now_ms: f64) -> Option<FrameUpdate> {
        if self.phase != TablePhase::Spinning {
            return None;
        }
        let spin = self.spin.as_mut()?;
        let started_at = *spin.started_at.get_or_insert(now_ms);
        let elapsed = now_ms - started_at;
        let plan = spin.plan;
        let (wheel, ball) = sample(elapsed, plan.duration_ms, plan.wheel_target, plan.ball_target);

        if progress(elapsed, plan.duration_ms) < 1.0 {
            spin.trail.push(ball);
            return Some(FrameUpdate::Moving(Frame {
                wheel_angle: normalize(wheel),
                ball_angle: normalize(ball),
                highlighted: None,
                trail: spin.trail.to_vec(),
            }));
        }

        spin.trail.clear();
        self.spin = None;

        let landed_index = resolve_landing(wheel, ball);
        if landed_index != plan.winning_index {
            warn!(
                "ball landed in {} but {} was committed",
                landed_index, plan.winning_index
            );
        }
        let last = Frame {
            wheel_angle: normalize(wheel),
            ball_angle: normalize(ball),
            highlighted: None,
            trail: Vec::new(),
        };
        let settled = Frame {
            highlighted: Some(landed_index),
            ..last.clone()
        };
        let Some(settlement) = self.settle(landed_index) else {
            warn!("spin finished with no bet on the table");
            self.set_phase(TablePhase::Idle);
            return None;
        };
        Some(FrameUpdate::Landed {
            last,
            settled,
            settlement,
        })
    }

    /// Credits `top_up_amount`. Allowed in any phase.
    pub fn top_up(&mut self) -> i64 {
        self.balance = self.balance.saturating_add(self.config.top_up_amount);
        info!("topped up by {}", self.config.top_up_amount);
        self.balance
    }

    fn settle(&mut self, landed_index: usize) -> Option<Settlement> {
        let bet = self.bet.take()?;
        let landed = self.wheel.segment(landed_index);
        let outcome = resolve(&bet, landed);
        self.set_phase(TablePhase::Resolved);

        let settlement = if outcome.won {
            self.balance = self.balance.saturating_add(outcome.payout);
            Settlement::Won {
                landed,
                payout: outcome.payout,
            }
        } else {
            Settlement::Lost {
                landed,
                stake: bet.stake,
            }
        };
        info!(
            "landed on {} {}: {:?}, balance {}",
            landed.number, landed.color, settlement, self.balance
        );

        self.set_phase(TablePhase::Idle);
        Some(settlement)
    }

    fn set_phase(&mut self, phase: TablePhase) {
        debug!("table {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::table_rng;
    use crate::roulette::Color;
    use rand_chacha::ChaCha20Rng;

    fn table() -> Table<ChaCha20Rng> {
        Table::new(TableConfig::default(), table_rng(Some(17)))
    }

    /// Drives a started spin to its end with 16ms frames.
    fn finish(table: &mut Table<ChaCha20Rng>) -> (Vec<Frame>, Frame, Settlement) {
        let mut frames = Vec::new();
        let mut now = 1_000.0;
        loop {
            match table.advance(now).expect("spin in progress") {
                FrameUpdate::Moving(frame) => frames.push(frame),
                FrameUpdate::Landed {
                    settled,
                    settlement,
                    ..
                } => return (frames, settled, settlement),
            }
            now += 16.0;
        }
    }

    #[test]
    fn test_stake_taken_up_front() {
        let mut table = table();
        let transition = table.place_bet(Bet::new(Selection::Number(7), 10).unwrap());
        assert_eq!(transition, Transition::Applied);
        assert_eq!(table.balance(), 990);
        assert_eq!(table.phase(), TablePhase::BetPlaced);
    }

    #[test]
    fn test_second_bet_ignored() {
        let mut table = table();
        table.place_bet(Bet::new(Selection::Number(7), 10).unwrap());
        let second = table.place_bet(Bet::new(Selection::Color(Color::Red), 500).unwrap());
        assert_eq!(second, Transition::Ignored);
        assert_eq!(table.balance(), 990);
        assert_eq!(table.active_bet().unwrap().stake, 10);

        // invalid input is dropped too while a bet is pending
        assert_eq!(
            table.submit_bet(Selection::Number(1), "oops"),
            Ok(Transition::Ignored)
        );
        assert_eq!(table.balance(), 990);
    }

    #[test]
    fn test_invalid_stake_changes_nothing() {
        let mut table = table();
        assert_eq!(
            table.submit_bet(Selection::Number(1), "0"),
            Err(BetError::NonPositiveStake(0))
        );
        assert_eq!(
            table.submit_bet(Selection::Number(1), "abc"),
            Err(BetError::NotANumber("abc".to_string()))
        );
        assert_eq!(table.balance(), 1000);
        assert_eq!(table.phase(), TablePhase::Idle);
        assert!(table.active_bet().is_none());
    }

    #[test]
    fn test_spin_needs_a_bet() {
        let mut table = table();
        assert_eq!(table.start_spin(), Transition::Ignored);
        assert_eq!(table.phase(), TablePhase::Idle);
        assert!(table.advance(0.0).is_none());
    }

    #[test]
    fn test_second_spin_ignored() {
        let mut table = table();
        table.place_bet(Bet::new(Selection::Color(Color::Black), 5).unwrap());
        assert_eq!(table.start_spin(), Transition::Applied);
        assert_eq!(table.start_spin(), Transition::Ignored);
        assert_eq!(
            table.place_bet(Bet::new(Selection::Color(Color::Red), 5).unwrap()),
            Transition::Ignored
        );
        assert_eq!(table.phase(), TablePhase::Spinning);
        assert_eq!(table.balance(), 995);
    }

    #[test]
    fn test_full_spin_settles_committed_pocket() {
        for seed in 0..50 {
            let mut table = Table::new(TableConfig::default(), table_rng(Some(seed)));
            table.place_bet(Bet::new(Selection::Color(Color::Red), 50).unwrap());
            table.start_spin();
            let committed = table.spin.as_ref().unwrap().plan.winning_index;

            let (frames, settled, settlement) = finish(&mut table);
            assert!(frames.len() > 200);
            assert!(frames.iter().all(|f| f.trail.len() <= 10 && f.highlighted.is_none()));
            assert_eq!(settled.highlighted, Some(committed));
            assert!(settled.trail.is_empty());
            assert_eq!(settlement.landed().number as usize, committed);

            let expected = if Color::of(committed as u8) == Color::Red {
                assert_eq!(
                    settlement,
                    Settlement::Won {
                        landed: settlement.landed(),
                        payout: 100
                    }
                );
                1050
            } else {
                assert!(matches!(settlement, Settlement::Lost { stake: 50, .. }));
                950
            };
            assert_eq!(table.balance(), expected);
            assert_eq!(table.phase(), TablePhase::Idle);
            assert!(table.active_bet().is_none());
            assert!(table.advance(1e9).is_none());
        }
    }

    #[test]
    fn test_settle_number_win() {
        let mut table = table();
        table.place_bet(Bet::new(Selection::Number(7), 10).unwrap());
        table.phase = TablePhase::Spinning;
        let settlement = table.settle(7).unwrap();
        assert!(matches!(settlement, Settlement::Won { payout: 1000, .. }));
        // 1000 - 10 + 1000
        assert_eq!(table.balance(), 1990);
        assert_eq!(table.phase(), TablePhase::Idle);
    }

    #[test]
    fn test_settle_loss() {
        let mut table = table();
        table.place_bet(Bet::new(Selection::Number(5), 20).unwrap());
        table.phase = TablePhase::Spinning;
        let settlement = table.settle(6).unwrap();
        assert!(matches!(settlement, Settlement::Lost { stake: 20, .. }));
        assert_eq!(table.balance(), 980);
    }

    #[test]
    fn test_balance_goes_negative() {
        let mut table = Table::new(
            TableConfig {
                starting_balance: 10,
                ..TableConfig::default()
            },
            table_rng(Some(1)),
        );
        table.place_bet(Bet::new(Selection::Number(0), 25).unwrap());
        assert_eq!(table.balance(), -15);
        table.top_up();
        assert_eq!(table.balance(), 985);
    }

    #[test]
    fn test_frames_start_at_rest() {
        let mut table = table();
        table.place_bet(Bet::new(Selection::Number(3), 1).unwrap());
        table.start_spin();
        match table.advance(500.0).unwrap() {
            FrameUpdate::Moving(frame) => {
                assert_eq!(frame.wheel_angle, 0.0);
                assert_eq!(frame.ball_angle, 0.0);
                assert_eq!(frame.trail.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_bet_does_not_lock_table() {
        let mut table = table();
        table.place_bet(Bet::new(Selection::Number(9), 10).unwrap());
        table.start_spin();
        table.bet = None;

        assert!(table.advance(0.0).is_some());
        assert!(table.advance(1e6).is_none());
        assert_eq!(table.phase(), TablePhase::Idle);
        assert_eq!(
            table.place_bet(Bet::new(Selection::Number(9), 10).unwrap()),
            Transition::Applied
        );
    }
}
