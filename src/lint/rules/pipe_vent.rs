use crate::lint::category::PrefixSet;
use crate::lint::{Finding, Rule};
use crate::types::ResolvedTile;

/// Pipes and vents/scrubbers must not share a tile.
#[derive(Debug, Clone)]
pub struct PipeVentCollision {
    pipes: PrefixSet,
    vents: PrefixSet,
}

impl PipeVentCollision {
    pub const ID: &'static str = "pipe-vent-collision";
    pub const MESSAGE: &'static str = "pipe on same tile as vent or scrubber";

    pub fn new(pipes: PrefixSet, vents: PrefixSet) -> Self {
        Self { pipes, vents }
    }
}

impl Rule for PipeVentCollision {
    fn id(&self) -> &str {
        Self::ID
    }

    fn description(&self) -> &str {
        "a pipe shares a tile with a vent or scrubber"
    }

    fn evaluate(&self, tile: &ResolvedTile<'_>) -> Vec<Finding> {
        // Stack order does not matter.
        if self.pipes.any_in(tile) && self.vents.any_in(tile) {
            vec![Finding::new(Self::MESSAGE)]
        } else {
            Vec::new()
        }
    }
}
