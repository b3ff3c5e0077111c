//! # App — The Deployment Unit
//!
//! The top-level context that owns stacks. An `App` is an explicit value
//! passed to each declaration step; there is no process-global application
//! object for stacks or lint aspects to attach to. Synthesizing the app
//! synthesizes every stack it owns.

use crate::error::SynthError;
use crate::stack::Stack;
use crate::template::Template;

/// Explicit deployment-unit context.
#[derive(Debug, Clone, Default)]
pub struct App {
    stacks: Vec<Stack>,
}

impl App {
    /// Start an empty deployment unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand a declared stack to the app.
    pub fn add_stack(&mut self, stack: Stack) {
        self.stacks.push(stack);
    }

    /// The stacks owned by this app, in attachment order.
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Synthesize every stack, pairing each stack name with its template.
    pub fn synthesize(&self) -> Result<Vec<(String, Template)>, SynthError> {
        self.stacks
            .iter()
            .map(|stack| Ok((stack.name().to_string(), stack.synthesize()?)))
            .collect()
    }
}
