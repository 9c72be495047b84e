//! Abstract root layer: the envelope and the character's name.

use crate::document::CharacterDocument;
use crate::error::Result;
use crate::pipeline::{GenerationContext, Layer, Step};

pub const LAYER: Layer = Layer {
    id: "base",
    label: "Skeleton",
    parent: None,
    resolvable: false,
    steps: STEPS,
};

const STEPS: &[Step] = &[Step::new("name", name)];

fn name(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    doc.names.push(ctx.names.next_full_name());
    Ok(())
}
