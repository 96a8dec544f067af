//! Fixing sessions
//!
//!     One session fixes one file. It moves through a fixed sequence of states:
//!
//!         Idle -> Disambiguated -> Fixing -> Converged
//!                                        -> Stalled
//!
//!     `Idle` holds the freshly tokenized stream. The transformer pipeline runs once to reach
//!     `Disambiguated`. Each `Fixing` pass runs every candidate fixer in priority order; a fixer
//!     counts as having changed the stream when the rendered kinds and texts differ after its
//!     call. A pass without any change converges. A session that uses up its pass bound while
//!     still changing stalls, and the fixers that changed something in the last pass are
//!     reported.
//!
//!     Sessions share nothing, so callers may run as many in parallel as they like.

use crate::error::Error;
use crate::fixer::FixerSet;
use crate::tokenizer::tokens::Tokens;
use crate::tokenizer::transformer::TransformerPipeline;
use tracing::{debug, warn};

pub const DEFAULT_MAX_PASSES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Disambiguated,
    Fixing { pass: usize },
    Converged,
    Stalled,
}

/// Result of a converged session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub code: String,
    /// Fixers that changed the stream, in the order they first did.
    pub applied: Vec<String>,
    /// Passes run, the final clean pass included.
    pub passes: usize,
}

impl FixReport {
    pub fn is_changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

pub struct Engine {
    pipeline: TransformerPipeline,
    fixers: FixerSet,
    max_passes: usize,
}

impl Engine {
    pub fn new(pipeline: TransformerPipeline, fixers: FixerSet) -> Self {
        Self {
            pipeline,
            fixers,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Caps the number of passes; at least one pass always runs.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    pub fn fixers(&self) -> &FixerSet {
        &self.fixers
    }

    pub fn pipeline(&self) -> &TransformerPipeline {
        &self.pipeline
    }

    /// Fixes one file. Either the whole rewritten text comes back or nothing does.
    pub fn fix(&self, source: &str) -> Result<FixReport, Error> {
        Session::new(self, source)?.run()
    }
}

/// State of one file-fixing run.
pub struct Session<'e> {
    engine: &'e Engine,
    tokens: Tokens,
    state: SessionState,
    applied: Vec<String>,
}

impl<'e> Session<'e> {
    pub fn new(engine: &'e Engine, source: &str) -> Result<Self, Error> {
        Ok(Self {
            engine,
            tokens: Tokens::from_source(source)?,
            state: SessionState::Idle,
            applied: Vec::new(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    /// Runs the transformer pipeline. Only valid from `Idle`; later calls do nothing.
    pub fn disambiguate(&mut self) -> Result<(), Error> {
        if self.state != SessionState::Idle {
            return Ok(());
        }
        self.engine.pipeline.run(&mut self.tokens)?;
        self.state = SessionState::Disambiguated;
        Ok(())
    }

    /// Runs one fixer pass and returns the names of the fixers that changed the stream.
    pub fn run_pass(&mut self) -> Result<Vec<String>, Error> {
        let pass = match self.state {
            SessionState::Disambiguated => 1,
            SessionState::Fixing { pass } => pass + 1,
            _ => return Ok(Vec::new()),
        };
        self.state = SessionState::Fixing { pass };

        let mut changed = Vec::new();
        for fixer in self.engine.fixers.iter() {
            if !fixer.is_candidate(&self.tokens) {
                continue;
            }

            let count = self.tokens.change_count();
            let fingerprint = self.tokens.fingerprint();
            fixer
                .fix(&mut self.tokens)
                .map_err(|e| Error::in_stage(fixer.name(), e))?;

            let mutated = self.tokens.change_count() != count
                && self.tokens.fingerprint() != fingerprint;
            self.tokens.clear_empty_tokens();

            if mutated {
                debug!(fixer = fixer.name(), pass, "fixer applied");
                let name = fixer.name().to_string();
                if !self.applied.contains(&name) {
                    self.applied.push(name.clone());
                }
                changed.push(name);
            }
        }

        debug!(pass, changed = changed.len(), "pass finished");
        Ok(changed)
    }

    /// Runs the session to a fixed point.
    pub fn run(mut self) -> Result<FixReport, Error> {
        self.disambiguate()?;

        let max_passes = self.engine.max_passes;
        let mut passes = 0;
        loop {
            passes += 1;
            let changed = self.run_pass()?;
            if changed.is_empty() {
                self.state = SessionState::Converged;
                return Ok(FixReport {
                    code: self.tokens.generate_code(),
                    applied: self.applied,
                    passes,
                });
            }
            if passes >= max_passes {
                self.state = SessionState::Stalled;
                warn!(passes, fixers = ?changed, "fixers did not converge");
                return Err(Error::NonConvergence {
                    passes,
                    fixers: changed,
                });
            }
        }
    }
}
