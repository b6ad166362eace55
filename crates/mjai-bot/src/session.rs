//! Bot session state machine
//!
//! A session owns one decision engine, its seat identity, and the full
//! ordered history of events it has consumed. The history is what makes the
//! reach lookahead possible: replaying it into a fresh identically-configured
//! session reproduces the engine's state at any point of the game.

use std::sync::Arc;

use mjai_core::{BridgeError, Decision, Event, EventKind, GameMode, Result};
use tracing::{debug, info};

use crate::engine::{DecisionEngine, EngineFactory};

/// One bot's view of one game.
pub struct BotSession {
    name: String,
    factory: Arc<dyn EngineFactory>,
    engine: Option<Box<dyn DecisionEngine>>,
    seat: Option<u8>,
    mode: Option<GameMode>,
    history: Vec<Event>,
    suppress_next_self_reach: bool,
}

impl BotSession {
    /// Create an uninitialized session.
    ///
    /// Until `initialize` succeeds the session has no engine and `react`
    /// records history without producing decisions.
    pub fn new(name: impl Into<String>, factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            name: name.into(),
            factory,
            engine: None,
            seat: None,
            mode: None,
            history: Vec::new(),
            suppress_next_self_reach: false,
        }
    }

    /// Bind the session to a seat and rule variant and construct its engine.
    ///
    /// The seat is immutable afterwards; a new game means a new session,
    /// obtained with [`Self::fork`].
    pub fn initialize(&mut self, seat: u8, mode: GameMode) -> Result<()> {
        if self.engine.is_some() {
            return Err(BridgeError::AlreadyInitialized);
        }
        self.engine = Some(self.factory.build(seat, mode)?);
        self.seat = Some(seat);
        self.mode = Some(mode);
        info!(name = %self.name, seat, %mode, "session initialized");
        Ok(())
    }

    /// True once `initialize` has succeeded.
    pub fn initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Seat index, once bound.
    pub fn seat(&self) -> Option<u8> {
        self.seat
    }

    /// Events consumed so far, in arrival order.
    pub fn history(&self) -> &[Event] {
        &self.history
    }

    /// Modes the underlying factory can build engines for.
    pub fn supported_modes(&self) -> Vec<GameMode> {
        self.factory.supported_modes()
    }

    /// Human-readable identity: name plus supported modes.
    pub fn description(&self) -> String {
        let modes: Vec<String> = self
            .supported_modes()
            .iter()
            .map(GameMode::to_string)
            .collect();
        format!("{}: [{}]", self.name, modes.join(","))
    }

    /// Consume one event and produce at most one reaction.
    ///
    /// The event lands in history unconditionally. Without an engine the
    /// session degrades to recording only and returns `Ok(None)`. A
    /// self-authored reach decision comes back with the follow-up discard
    /// attached under `reach_dahai` and arms the echo suppression.
    pub fn react(&mut self, event: Event) -> Result<Option<Decision>> {
        let Some(mut decision) = self.forward(event)? else {
            return Ok(None);
        };
        if self.seat.is_some_and(|seat| decision.is_reach_by(seat)) {
            let dahai = self.reach_dahai()?;
            decision.attach_reach_dahai(dahai);
            // The server will echo this reach back; the engine must not see
            // it a second time.
            self.suppress_next_self_reach = true;
        }
        Ok(Some(decision))
    }

    /// Fast-forward a burst of events, returning only the last reaction.
    ///
    /// Every event still lands in history; all but the last are marked
    /// `can_act=false` so the engine knows no real decision is expected yet.
    pub fn react_batch(&mut self, mut events: Vec<Event>) -> Result<Option<Decision>> {
        let Some(last) = events.pop() else {
            return Ok(None);
        };
        for mut event in events {
            event.set_can_act(false);
            self.react(event)?;
        }
        self.react(last)
    }

    /// Telemetry side channel for end-of-game results.
    pub fn log_result(&self, mode_id: u32, rank: u8, score: i32) {
        info!(name = %self.name, mode_id, rank, score, "game result");
    }

    /// Fresh session with the same identity and an empty history.
    ///
    /// The fork is initialized with the recorded seat and mode when the
    /// original was; engine state is never shared.
    pub fn fork(&self) -> Result<BotSession> {
        let mut fresh = BotSession::new(self.name.clone(), Arc::clone(&self.factory));
        if let (Some(seat), Some(mode)) = (self.seat, self.mode) {
            fresh.initialize(seat, mode)?;
        }
        Ok(fresh)
    }

    /// Record the event and forward it to the engine, honoring the pending
    /// reach suppression.
    fn forward(&mut self, event: Event) -> Result<Option<Decision>> {
        if self.suppress_next_self_reach && self.is_own_reach(&event) {
            self.suppress_next_self_reach = false;
            self.history.push(event);
            debug!("absorbing echoed self reach, engine already saw the declaration");
            return Ok(None);
        }
        self.submit(event)
    }

    /// Record the event and hand it to the engine, bypassing suppression.
    fn submit(&mut self, event: Event) -> Result<Option<Decision>> {
        let raw = event.to_json()?;
        self.history.push(event);
        let Some(engine) = self.engine.as_mut() else {
            return Ok(None);
        };
        match engine.submit(&raw)? {
            Some(reaction) => Decision::parse(&reaction).map(Some),
            None => Ok(None),
        }
    }

    fn is_own_reach(&self, event: &Event) -> bool {
        matches!(event.kind(), EventKind::Reach)
            && self.seat.is_some()
            && event.actor() == self.seat
    }

    /// Compute the discard that follows a reach declaration.
    ///
    /// The wire protocol splits the engine's reach into a declaration message
    /// and a separate discard message, so the follow-up is reconstructed by
    /// replay: fork a shadow session, replay the full history into it, then
    /// probe it with a synthetic reach event and take the answer. The shadow
    /// is discarded afterwards.
    fn reach_dahai(&self) -> Result<Decision> {
        let Some(seat) = self.seat else {
            return Err(BridgeError::Lookahead);
        };
        debug!(
            events = self.history.len(),
            "replaying history into shadow session for the reach discard"
        );
        let mut shadow = self.fork()?;
        for event in &self.history {
            if let Some(reaction) = shadow.forward(event.clone())? {
                // Bookkeeping only: a replayed self-reach reaction arms the
                // shadow's suppression so echoes recorded in history are
                // absorbed again. A shadow never runs its own lookahead.
                if reaction.is_reach_by(seat) {
                    shadow.suppress_next_self_reach = true;
                }
            }
        }
        // The probe bypasses suppression: this is the one delivery of the
        // declaration to the shadow's engine.
        match shadow.submit(Event::reach(seat))? {
            Some(dahai) => Ok(dahai),
            None => Err(BridgeError::Lookahead),
        }
    }
}
