//! Session Stage Controller
//!
//! Owns the stage machine and every timer in the session. User intents
//! (`submit`, `verify`, `coupon_edit`, `input_click`) mutate state
//! immediately; everything time-driven runs as tasks on one
//! [`Scheduler`] the host advances with [`SessionController::tick`].
//!
//! Four timer families share that scheduler:
//! - the 10-step processing sequence (repeating, 700ms)
//! - the reward rollup frames (repeating, 20ms, 2500ms total)
//! - the coupon debounce (one-shot, 800ms, generation-tagged)
//! - the ambient market intervals (repeating, 2000ms / 3500ms + 500ms)
//!
//! [`SessionController::shutdown`] cancels all of them together; every
//! task also re-checks stage/liveness before mutating, so a teardown that
//! lands mid-sequence cannot corrupt state.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use vf_core::{EaseCurve, Scheduler, TaskId};
use vf_feed::{ActivityGenerator, ActivityRecord};
use vf_tone::{ToneKind, ToneSink};

use crate::coupon::{self, CouponState, CouponStatus};
use crate::form::{PaymentMethod, SubmitForm};
use crate::logline;
use crate::market::MarketState;
use crate::stage::Stage;

/// Optional host-supplied callback fired when the session locks
pub type VerificationGate = Box<dyn FnMut()>;

/// Completion hand-off, receives the submitted username
pub type CompletionHandler = Box<dyn FnMut(&str)>;

/// All session delays in one place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTiming {
    /// Interval between processing steps
    pub step_interval_ms: u64,
    /// Delay between step 10 and the locked stage
    pub lock_delay_ms: u64,
    /// Total reward rollup duration
    pub reward_duration_ms: u64,
    /// Reward rollup frame interval (divides the duration evenly)
    pub reward_frame_ms: u64,
    /// Coupon debounce window
    pub coupon_debounce_ms: u64,
    /// Verify-click to completion hand-off
    pub verify_complete_ms: u64,
    /// Re-submission (while verified) to completion hand-off
    pub resubmit_complete_ms: u64,
    /// Ambient market drift interval
    pub market_interval_ms: u64,
    /// Ticker rotation interval
    pub rotation_interval_ms: u64,
    /// Ticker blank-out inside one rotation
    pub rotation_blank_ms: u64,
}

/// Number of processing steps
pub const STEP_COUNT: u8 = 10;

impl SessionTiming {
    /// Production timing
    pub fn normal() -> Self {
        Self {
            step_interval_ms: 700,
            lock_delay_ms: 600,
            reward_duration_ms: 2500,
            reward_frame_ms: 20,
            coupon_debounce_ms: 800,
            verify_complete_ms: 1500,
            resubmit_complete_ms: 1000,
            market_interval_ms: 2000,
            rotation_interval_ms: 3500,
            rotation_blank_ms: 500,
        }
    }
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self::normal()
    }
}

/// Controller construction options
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Seed for all session randomness; `None` draws from the OS
    pub seed: Option<u64>,
    pub timing: SessionTiming,
}

/// Read-only view of the full session state, for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub stage: Stage,
    pub progress: u8,
    pub process_log: Vec<String>,
    pub prize_revealed: bool,
    pub allocated_prize: u32,
    pub coupon: CouponState,
    pub market: MarketState,
    pub current_activity: ActivityRecord,
}

/// Mutable session state; tasks run against this
struct SessionCore {
    timing: SessionTiming,
    active: bool,

    stage: Stage,
    username: String,
    payment_method: PaymentMethod,
    payment_handle: String,

    process_log: Vec<String>,
    progress: u8,
    step_index: u8,

    prize_revealed: bool,
    allocated_prize: u32,
    prize_target: u32,
    anim_start_ms: u64,

    coupon: CouponState,
    /// Bumped on every edit; a resolution only applies if its tag matches
    coupon_generation: u64,

    market: MarketState,
    current_activity: ActivityRecord,

    feed: ActivityGenerator,
    rng: ChaCha8Rng,

    tones: Box<dyn ToneSink>,
    gate: Option<VerificationGate>,
    on_complete: Option<CompletionHandler>,

    step_task: Option<TaskId>,
    anim_task: Option<TaskId>,
    coupon_task: Option<TaskId>,
    market_task: Option<TaskId>,
    rotation_task: Option<TaskId>,
}

/// The staged claim session
pub struct SessionController {
    core: SessionCore,
    sched: Scheduler<SessionCore>,
}

impl SessionController {
    /// Create a session and start the ambient market timers
    pub fn new(config: SessionConfig, tones: Box<dyn ToneSink>) -> Self {
        let mut rng = match config.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        let mut feed = ActivityGenerator::new(config.seed);
        let market = MarketState::new(&mut rng, &mut feed);
        let current_activity = feed.generate();

        let mut core = SessionCore {
            timing: config.timing,
            active: true,
            stage: Stage::Idle,
            username: String::new(),
            payment_method: PaymentMethod::default(),
            payment_handle: String::new(),
            process_log: Vec::new(),
            progress: 0,
            step_index: 0,
            prize_revealed: false,
            allocated_prize: 0,
            prize_target: 0,
            anim_start_ms: 0,
            coupon: CouponState::default(),
            coupon_generation: 0,
            market,
            current_activity,
            feed,
            rng,
            tones,
            gate: None,
            on_complete: None,
            step_task: None,
            anim_task: None,
            coupon_task: None,
            market_task: None,
            rotation_task: None,
        };

        let mut sched = Scheduler::new();
        core.market_task = Some(sched.schedule_repeating(
            core.timing.market_interval_ms,
            Box::new(|core: &mut SessionCore, _| core.market_drift()),
        ));
        core.rotation_task = Some(sched.schedule_repeating(
            core.timing.rotation_interval_ms,
            Box::new(|core: &mut SessionCore, sched| core.rotation_begin(sched)),
        ));

        Self { core, sched }
    }

    /// Install the optional verification gate
    pub fn with_gate(mut self, gate: VerificationGate) -> Self {
        self.core.gate = Some(gate);
        self
    }

    /// Install the completion hand-off
    pub fn on_complete(mut self, handler: CompletionHandler) -> Self {
        self.core.on_complete = Some(handler);
        self
    }

    /// Advance virtual time, running due tasks
    pub fn tick(&mut self, dt_ms: u64) {
        self.sched.advance(&mut self.core, dt_ms);
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.sched.now_ms()
    }

    /// Form submission intent
    ///
    /// Accepted from `idle` (complete form starts the sequence) and from
    /// `verified` (idempotent re-hand-off). Anything else is a no-op.
    /// Returns whether the submission was accepted.
    pub fn submit(&mut self, form: &SubmitForm) -> bool {
        if !self.core.active {
            return false;
        }

        match self.core.stage {
            Stage::Idle => {
                if !form.is_complete() {
                    log::debug!("Incomplete submission rejected");
                    return false;
                }
                self.core.begin_processing(form);
                let interval = self.core.timing.step_interval_ms;
                let id = self.sched.schedule_repeating(
                    interval,
                    Box::new(|core: &mut SessionCore, sched| core.processing_step(sched)),
                );
                self.core.step_task = Some(id);
                true
            }
            Stage::Verified => {
                self.core.tones.unlock();
                self.core.tones.play(ToneKind::Coin);
                self.sched.schedule(
                    self.core.timing.resubmit_complete_ms,
                    Box::new(|core: &mut SessionCore, _| core.emit_complete()),
                );
                true
            }
            Stage::Processing | Stage::Locked => {
                log::debug!("Submission ignored in stage {}", self.core.stage.name());
                false
            }
        }
    }

    /// Explicit verify action; only legal while locked
    pub fn verify(&mut self) -> bool {
        if !self.core.active || !self.core.stage.accepts_verify() {
            return false;
        }

        self.core.stage = Stage::Verified;
        self.core.tones.unlock();
        self.core.tones.play(ToneKind::Coin);
        self.core.process_log.push(logline::CONFIRMED_LINE.to_string());
        self.core.process_log.push(logline::WELCOME_LINE.to_string());
        self.core.progress = 100;

        self.sched.schedule(
            self.core.timing.verify_complete_ms,
            Box::new(|core: &mut SessionCore, _| core.emit_complete()),
        );
        true
    }

    /// Coupon field edit; debounced resolution, last edit wins
    pub fn coupon_edit(&mut self, raw: &str) {
        if !self.core.active {
            return;
        }

        let code = coupon::normalize(raw);
        self.core.coupon_generation += 1;

        // The pending resolution (if any) is now stale either way.
        if let Some(id) = self.core.coupon_task.take() {
            self.sched.cancel(id);
        }

        if code.is_empty() {
            self.core.coupon = CouponState::default();
            return;
        }

        self.core.coupon.status = CouponStatus::Checking;
        self.core.coupon.feedback.clear();
        self.core.coupon.code = code;

        let generation = self.core.coupon_generation;
        let id = self.sched.schedule(
            self.core.timing.coupon_debounce_ms,
            Box::new(move |core: &mut SessionCore, _| core.resolve_coupon(generation)),
        );
        self.core.coupon_task = Some(id);
    }

    /// Input focus click: unlock audio on the user gesture, play a click
    pub fn input_click(&mut self) {
        if !self.core.active {
            return;
        }
        self.core.tones.unlock();
        self.core.tones.play(ToneKind::Click);
    }

    /// Tear the session down: every pending timer is cancelled together
    pub fn shutdown(&mut self) {
        self.core.active = false;
        self.sched.cancel_all();
        self.core.step_task = None;
        self.core.anim_task = None;
        self.core.coupon_task = None;
        self.core.market_task = None;
        self.core.rotation_task = None;
    }

    /// Snapshot for presentation
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stage: self.core.stage,
            progress: self.core.progress,
            process_log: self.core.process_log.clone(),
            prize_revealed: self.core.prize_revealed,
            allocated_prize: self.core.allocated_prize,
            coupon: self.core.coupon.clone(),
            market: self.core.market.clone(),
            current_activity: self.core.current_activity.clone(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.core.stage
    }

    pub fn progress(&self) -> u8 {
        self.core.progress
    }

    pub fn process_log(&self) -> &[String] {
        &self.core.process_log
    }

    pub fn coupon(&self) -> &CouponState {
        &self.core.coupon
    }

    pub fn market(&self) -> &MarketState {
        &self.core.market
    }

    pub fn current_activity(&self) -> &ActivityRecord {
        &self.core.current_activity
    }

    pub fn allocated_prize(&self) -> u32 {
        self.core.allocated_prize
    }

    pub fn prize_revealed(&self) -> bool {
        self.core.prize_revealed
    }

    /// Target sampled for the reward rollup (0 before step 5)
    pub fn prize_target(&self) -> u32 {
        self.core.prize_target
    }
}

impl SessionCore {
    fn begin_processing(&mut self, form: &SubmitForm) {
        self.username = form.username.clone();
        self.payment_method = form.payment_method;
        self.payment_handle = form.payment_handle.clone();

        self.tones.unlock();
        self.tones.play(ToneKind::Success);

        self.stage = Stage::Processing;
        self.progress = 0;
        self.step_index = 0;
        self.prize_revealed = false;
        self.allocated_prize = 0;
        self.prize_target = 0;
        self.process_log = vec![logline::INIT_LINE.to_string()];

        self.tones.play(ToneKind::Tick);
    }

    /// One step of the 10-step sequence
    fn processing_step(&mut self, sched: &mut Scheduler<SessionCore>) {
        if !self.active || self.stage != Stage::Processing {
            if let Some(id) = self.step_task.take() {
                sched.cancel(id);
            }
            return;
        }

        self.step_index += 1;
        let step = self.step_index;
        self.progress = step * 10;
        self.tones.play(ToneKind::Tick);

        match step {
            1 => self.process_log.push(logline::auth_line(&self.username)),
            2 => self
                .process_log
                .push(logline::gateway_line(self.payment_method)),
            3 => {
                let line = if self.coupon.status == CouponStatus::Valid {
                    logline::promo_line(&self.coupon.code)
                } else {
                    logline::ELIGIBILITY_LINE.to_string()
                };
                self.process_log.push(line);
            }
            4 => {
                self.process_log.push(logline::TUNNEL_LINE.to_string());
                self.prize_revealed = true;
            }
            5 => {
                self.process_log.push(logline::DECRYPT_LINE.to_string());
                self.start_reward_rollup(sched);
            }
            6 | 7 => {
                let pool =
                    logline::filler_pool(&self.username, self.payment_method, &self.payment_handle);
                let pick = self.rng.random_range(0..pool.len());
                self.process_log.push(pool[pick].clone());
            }
            8 => self
                .process_log
                .push(logline::wallet_line(&self.payment_handle)),
            9 => self.process_log.push(logline::FINALIZE_LINE.to_string()),
            10 => {
                self.process_log
                    .push(logline::VERIFICATION_LINE.to_string());
                if let Some(id) = self.step_task.take() {
                    sched.cancel(id);
                }
                sched.schedule(
                    self.timing.lock_delay_ms,
                    Box::new(|core: &mut SessionCore, _| core.enter_locked()),
                );
            }
            _ => {}
        }

        if step % 3 == 0 {
            self.current_activity = self.feed.generate();
        }
    }

    /// Begin the eased reward counter, concurrent with the step sequence
    fn start_reward_rollup(&mut self, sched: &mut Scheduler<SessionCore>) {
        self.prize_target = self.market.bonus_count;
        self.anim_start_ms = sched.now_ms();
        self.allocated_prize = 0;

        let id = sched.schedule_repeating(
            self.timing.reward_frame_ms,
            Box::new(|core: &mut SessionCore, sched| core.reward_frame(sched)),
        );
        self.anim_task = Some(id);
    }

    fn reward_frame(&mut self, sched: &mut Scheduler<SessionCore>) {
        if !self.active {
            if let Some(id) = self.anim_task.take() {
                sched.cancel(id);
            }
            return;
        }

        let elapsed = sched.now_ms() - self.anim_start_ms;
        let duration = self.timing.reward_duration_ms;

        if elapsed >= duration {
            self.allocated_prize = self.prize_target;
            self.tones.play(ToneKind::Coin);
            if let Some(id) = self.anim_task.take() {
                sched.cancel(id);
            }
            return;
        }

        let t = elapsed as f32 / duration as f32;
        let eased = EaseCurve::CubicOut.evaluate(t);
        self.allocated_prize = (eased * self.prize_target as f32).floor() as u32;

        if self.rng.random_bool(0.5) {
            self.tones.play(ToneKind::Count);
        }
    }

    fn enter_locked(&mut self) {
        if !self.active || self.stage != Stage::Processing {
            return;
        }

        self.tones.play(ToneKind::Alert);
        self.stage = Stage::Locked;

        // Best-effort decoration, not a security boundary.
        match self.gate.as_mut() {
            Some(gate) => gate(),
            None => log::info!("Verification gate not present, skipping"),
        }
    }

    fn resolve_coupon(&mut self, generation: u64) {
        // A newer edit supersedes this resolution.
        if generation != self.coupon_generation || !self.active {
            return;
        }
        self.coupon_task = None;

        if coupon::is_valid(&self.coupon.code) {
            self.coupon.status = CouponStatus::Valid;
            self.coupon.feedback = coupon::FEEDBACK_VALID.to_string();
            self.tones.play(ToneKind::Coin);
        } else {
            self.coupon.status = CouponStatus::Invalid;
            self.coupon.feedback = coupon::FEEDBACK_INVALID.to_string();
            self.tones.play(ToneKind::Alert);
        }
    }

    fn emit_complete(&mut self) {
        if !self.active {
            return;
        }
        match self.on_complete.as_mut() {
            Some(handler) => handler(&self.username),
            None => log::debug!("Session complete for {}, no handler installed", self.username),
        }
    }

    fn market_drift(&mut self) {
        if !self.active {
            return;
        }
        self.market.drift(&mut self.rng);
    }

    fn rotation_begin(&mut self, sched: &mut Scheduler<SessionCore>) {
        if !self.active {
            return;
        }
        self.market.begin_rotation();
        sched.schedule(
            self.timing.rotation_blank_ms,
            Box::new(|core: &mut SessionCore, _| core.rotation_complete()),
        );
    }

    fn rotation_complete(&mut self) {
        if !self.active {
            return;
        }
        self.market.complete_rotation(&mut self.rng, &mut self.feed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use vf_tone::NullSink;

    fn controller(seed: u64) -> SessionController {
        SessionController::new(
            SessionConfig {
                seed: Some(seed),
                timing: SessionTiming::normal(),
            },
            Box::new(NullSink),
        )
    }

    fn claim_form() -> SubmitForm {
        SubmitForm {
            auth_mode: crate::form::AuthMode::Claim,
            username: "Fish99".to_string(),
            password: String::new(),
            payment_method: PaymentMethod::CashApp,
            payment_handle: "$fish99".to_string(),
        }
    }

    #[test]
    fn test_coupon_burst_resolves_last_edit_only() {
        let mut c = controller(1);

        c.coupon_edit("VAULT2025");
        c.tick(300);
        c.coupon_edit("AB");
        c.tick(300);
        c.coupon_edit("BONUS50");
        assert_eq!(c.coupon().status, CouponStatus::Checking);

        // 800ms after the LAST edit: exactly one resolution, for BONUS50.
        c.tick(799);
        assert_eq!(c.coupon().status, CouponStatus::Checking);
        c.tick(1);
        assert_eq!(c.coupon().status, CouponStatus::Valid);
        assert_eq!(c.coupon().code, "BONUS50");
        assert_eq!(c.coupon().feedback, coupon::FEEDBACK_VALID);
    }

    #[test]
    fn test_coupon_empty_input_resets_immediately() {
        let mut c = controller(1);
        c.coupon_edit("VIP777");
        assert_eq!(c.coupon().status, CouponStatus::Checking);
        c.coupon_edit("   ");
        assert_eq!(c.coupon().status, CouponStatus::Idle);
        assert!(c.coupon().feedback.is_empty());
        // The cancelled resolution never lands.
        c.tick(2000);
        assert_eq!(c.coupon().status, CouponStatus::Idle);
    }

    #[test]
    fn test_coupon_invalid_after_debounce() {
        let mut c = controller(1);
        c.coupon_edit("AB");
        c.tick(800);
        assert_eq!(c.coupon().status, CouponStatus::Invalid);
        assert_eq!(c.coupon().feedback, coupon::FEEDBACK_INVALID);
    }

    #[test]
    fn test_submit_rejected_when_incomplete() {
        let mut c = controller(1);
        let mut form = claim_form();
        form.payment_handle.clear();
        assert!(!c.submit(&form));
        assert_eq!(c.stage(), Stage::Idle);
    }

    #[test]
    fn test_submit_ignored_while_processing() {
        let mut c = controller(1);
        assert!(c.submit(&claim_form()));
        assert_eq!(c.stage(), Stage::Processing);
        assert!(!c.submit(&claim_form()));
        // Log still holds only the seed line; no second sequence started.
        assert_eq!(c.process_log(), &[logline::INIT_LINE.to_string()]);
    }

    #[test]
    fn test_verify_rejected_outside_locked() {
        let mut c = controller(1);
        assert!(!c.verify());
        c.submit(&claim_form());
        assert!(!c.verify());
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let completions: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = Rc::clone(&completions);
        let mut c = controller(3).on_complete(Box::new(move |u| sink.borrow_mut().push(u.into())));

        c.submit(&claim_form());
        c.coupon_edit("VAULT2025");
        c.tick(1500); // mid-sequence, coupon pending
        let market_before = c.market().clone();
        let log_before = c.process_log().to_vec();

        c.shutdown();
        c.tick(60_000);

        // Nothing moved after teardown.
        assert_eq!(c.process_log(), log_before.as_slice());
        assert_eq!(c.market().players_online, market_before.players_online);
        assert_eq!(c.coupon().status, CouponStatus::Checking);
        assert!(completions.borrow().is_empty());
    }

    #[test]
    fn test_gate_fires_on_lock() {
        let fired: Rc<RefCell<u32>> = Rc::default();
        let flag = Rc::clone(&fired);
        let mut c = controller(4).with_gate(Box::new(move || *flag.borrow_mut() += 1));

        c.submit(&claim_form());
        c.tick(10 * 700 + 600);
        assert_eq!(c.stage(), Stage::Locked);
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_missing_gate_is_not_an_error() {
        let mut c = controller(4);
        c.submit(&claim_form());
        c.tick(10 * 700 + 600);
        assert_eq!(c.stage(), Stage::Locked);
    }
}
