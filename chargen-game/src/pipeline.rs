//! Generation pipeline: ordered, named document-transform steps.
//!
//! A rule system is its parent's step list followed by its own steps. Steps
//! read and mutate the document in place and draw every random decision from
//! the run's [`DiceEngine`].

use log::debug;
use std::fmt;

use crate::document::CharacterDocument;
use crate::engine::DiceEngine;
use crate::error::Result;
use crate::names::{NameSource, SeededNames};
use crate::params::GenerationParams;
use crate::seed::Seed;

/// Per-run state handed to every step.
pub struct GenerationContext<'a> {
    pub engine: DiceEngine,
    pub names: &'a mut dyn NameSource,
    pub params: GenerationParams,
}

impl fmt::Debug for GenerationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("engine", &self.engine)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

pub type StepFn = fn(&mut GenerationContext<'_>, &mut CharacterDocument) -> Result<()>;

/// One named transformation of a character document.
#[derive(Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub apply: StepFn,
}

impl Step {
    #[must_use]
    pub const fn new(name: &'static str, apply: StepFn) -> Self {
        Self { name, apply }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Step").field(&self.name).finish()
    }
}

/// Static description of one layer before composition.
#[derive(Debug, Clone, Copy)]
pub struct Layer {
    pub id: &'static str,
    pub label: &'static str,
    pub parent: Option<&'static str>,
    /// Abstract layers only exist to be extended.
    pub resolvable: bool,
    pub steps: &'static [Step],
}

/// A layer composed with every ancestor's steps.
#[derive(Debug, Clone)]
pub struct RuleSystem {
    id: &'static str,
    label: &'static str,
    resolvable: bool,
    steps: Vec<Step>,
}

impl RuleSystem {
    pub(crate) fn compose(layer: &Layer, parent: Option<&Self>) -> Self {
        let mut steps = parent.map(|p| p.steps.clone()).unwrap_or_default();
        steps.extend_from_slice(layer.steps);
        Self {
            id: layer.id,
            label: layer.label,
            resolvable: layer.resolvable,
            steps,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        self.resolvable
    }

    /// Composed steps, ancestors first.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name).collect()
    }

    /// Generate a document with names drawn from the seed's own name stream.
    ///
    /// # Errors
    ///
    /// Propagates step failures, which indicate malformed rule tables.
    pub fn generate(&self, seed: Seed, params: GenerationParams) -> Result<CharacterDocument> {
        let mut names = SeededNames::from_seed(&seed);
        self.generate_with_names(seed, params, &mut names)
    }

    /// Generate a document with a caller-supplied name source.
    ///
    /// # Errors
    ///
    /// Propagates step failures, which indicate malformed rule tables.
    pub fn generate_with_names(
        &self,
        seed: Seed,
        params: GenerationParams,
        names: &mut dyn NameSource,
    ) -> Result<CharacterDocument> {
        let mut ctx = GenerationContext {
            engine: DiceEngine::from_seed(&seed),
            names,
            params: params.clamped(),
        };
        let mut doc = CharacterDocument::envelope(self.id, seed);
        for step in &self.steps {
            debug!("{}: {}", self.id, step.name);
            (step.apply)(&mut ctx, &mut doc)?;
        }
        debug!(
            "{}: generated {:?} after {} draws",
            self.id,
            doc.names.first(),
            ctx.engine.draws()
        );
        Ok(doc)
    }
}
