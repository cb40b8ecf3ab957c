//! Play sessions.

use std::sync::Arc;

use dv_core::Dungeon;
use dv_encounters::Agent;

use crate::action::Action;
use crate::error::{EngineError, EngineResult};
use crate::output::{Output, render};
use crate::state::GameState;
use crate::transition::{reject, transition};

/// One player's run through a dungeon.
///
/// The dungeon is shared read-only; the session owns the latest overlay.
/// Calls must be made one at a time.
#[derive(Debug, Clone)]
pub struct Session {
    dungeon: Arc<Dungeon>,
    state: Option<GameState>,
    agents: Vec<Agent>,
}

impl Session {
    /// Create a session. Nothing happens until `init`.
    pub fn new(dungeon: Arc<Dungeon>) -> Self {
        Self {
            dungeon,
            state: None,
            agents: Vec::new(),
        }
    }

    /// Load an exported dungeon graph.
    pub fn from_json(source: &str) -> EngineResult<Self> {
        Ok(Self::new(Arc::new(Dungeon::from_json(source)?)))
    }

    /// Seed agent presence into the initial overlay.
    pub fn with_agents(mut self, agents: Vec<Agent>) -> Self {
        self.agents = agents;
        self
    }

    /// The dungeon being played.
    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    /// The latest state, once started.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Whether the session has ended.
    pub fn is_over(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.end)
    }

    /// Parse player input and act on it.
    ///
    /// Input outside the action alphabet is reported in the output; before
    /// `init` it is as fatal as any other action.
    pub fn step(&mut self, input: &str) -> EngineResult<Output> {
        match Action::parse(input) {
            Ok(action) => self.act(action),
            Err(soft) => {
                let state = self.state.as_ref().ok_or(EngineError::NotStarted)?;
                let next = reject(state, soft);
                let output = render(&self.dungeon, &next)?;
                self.state = Some(next);
                Ok(output)
            }
        }
    }

    /// Apply an action and render the result.
    pub fn act(&mut self, action: Action) -> EngineResult<Output> {
        let starting = self.state.is_none();
        let mut next = transition(&self.dungeon, self.state.as_ref(), action)?;
        if starting {
            for agent in &self.agents {
                next.place_agent(&self.dungeon, agent)?;
            }
        }
        let output = render(&self.dungeon, &next)?;
        self.state = Some(next);
        Ok(output)
    }
}
