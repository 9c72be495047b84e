//! Mage: The Awakening 2nd edition layer.
//!
//! Runs after the CoD layer and rewrites part of its output: a Resistance
//! attribute and Occult gain a dot, one mundane merit is traded for High
//! Speech and Integrity gives way to Wisdom.

use log::{debug, trace, warn};

use crate::bounded::BoundedTrait;
use crate::constants::{
    ADVANTAGE_LIMIT, ARCANUM_CREATION_CAP, FREE_ARCANA_DOTS, GNOSIS, GROUP_ADVANTAGES,
    GROUP_ARCANA, GROUP_MERITS, GROUP_PATH, HIGH_SPEECH, HIGH_SPEECH_DOTS, INTEGRITY, OCCULT,
    OCCULT_BONUS, PRIMARY_REAGENT_DOTS, RESISTANCE_BONUS, SECONDARY_REAGENT_DOTS,
    STARTING_WISDOM, WISDOM,
};
use crate::data::{ARCANA, PATHS, Path, RESISTANCES};
use crate::document::{CharacterDocument, DotMap, TraitGroup};
use crate::engine::DiceEngine;
use crate::error::{ChargenError, Result};
use crate::pipeline::{GenerationContext, Layer, Step};

pub const LAYER: Layer = Layer {
    id: "mtaw2",
    label: "Mage: The Awakening 2nd Edition",
    parent: Some("cod"),
    resolvable: true,
    steps: STEPS,
};

const STEPS: &[Step] = &[
    Step::new("gnosis", gnosis),
    Step::new("resistance", resistance),
    Step::new("occult", occult),
    Step::new("path", path),
    Step::new("arcana", arcana),
    Step::new("high_speech", high_speech),
    Step::new("wisdom", wisdom),
];

fn gnosis(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    debug!("create Mage 2ed character traits");
    doc.dots_mut(GROUP_ADVANTAGES).insert(
        GNOSIS.to_string(),
        BoundedTrait::with_limit(ctx.params.gnosis, ADVANTAGE_LIMIT)?,
    );
    Ok(())
}

fn resistance(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let attribute = *ctx.engine.choice(&RESISTANCES)?;
    if !doc.add_dots(attribute, RESISTANCE_BONUS) {
        trace!("{attribute} already at its ceiling");
    }
    Ok(())
}

fn occult(_ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    if !doc.add_dots(OCCULT, OCCULT_BONUS) {
        trace!("{OCCULT} already at its ceiling");
    }
    Ok(())
}

fn path(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let path = ctx.engine.choice(&PATHS)?;
    doc.set_group(GROUP_PATH, TraitGroup::Label(path.name.to_string()));
    Ok(())
}

fn chosen_path(doc: &CharacterDocument) -> Result<Path> {
    let name = doc.group(GROUP_PATH).and_then(TraitGroup::as_label);
    name.and_then(|name| PATHS.into_iter().find(|path| path.name == name))
        .ok_or_else(|| ChargenError::MalformedTable {
            table: "PATHS",
            detail: format!("no path named {name:?}"),
        })
}

fn arcana(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let path = chosen_path(doc)?;
    let arcana = allocate_arcana(&mut ctx.engine, &path)?;
    doc.set_group(GROUP_ARCANA, TraitGroup::Dots(arcana));
    Ok(())
}

/// Ruling arcana at 2 and 1 dots in random order, then free dots placed one at
/// a time on arcana below the creation cap, never on the inferior arcanum.
///
/// # Errors
///
/// Returns [`ChargenError::MalformedTable`] if the path names unknown arcana.
pub fn allocate_arcana(engine: &mut DiceEngine, path: &Path) -> Result<DotMap> {
    let mut arcana: DotMap = ARCANA
        .iter()
        .map(|arcanum| ((*arcanum).to_string(), BoundedTrait::default()))
        .collect();

    let reagents = engine.sample(&path.reagents, path.reagents.len())?;
    for (reagent, dots) in reagents.iter().zip([PRIMARY_REAGENT_DOTS, SECONDARY_REAGENT_DOTS]) {
        let rating = arcana
            .get_mut(*reagent)
            .ok_or_else(|| ChargenError::MalformedTable {
                table: "PATHS",
                detail: format!("{} rules unknown arcanum {reagent}", path.name),
            })?;
        *rating = BoundedTrait::new(dots);
    }

    let mut remaining = FREE_ARCANA_DOTS;
    while remaining > 0 {
        let arcanum = *engine.choice(&ARCANA)?;
        let rating = arcana.entry(arcanum.to_string()).or_default();
        if *rating >= ARCANUM_CREATION_CAP || arcanum == path.inferior {
            trace!("skip {arcanum} for {}", path.name);
            continue;
        }
        *rating += 1;
        remaining -= 1;
    }
    Ok(arcana)
}

fn high_speech(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let merits = doc.dots_mut(GROUP_MERITS);
    let owned: Vec<String> = merits.keys().cloned().collect();
    match ctx.engine.choice(&owned) {
        Ok(traded) => {
            debug!("trade {traded} for {HIGH_SPEECH}");
            merits.remove(traded);
        }
        Err(ChargenError::EmptySequence) => warn!("no merit to trade for {HIGH_SPEECH}"),
        Err(err) => return Err(err),
    }
    merits.insert(HIGH_SPEECH.to_string(), BoundedTrait::new(HIGH_SPEECH_DOTS));
    Ok(())
}

fn wisdom(_ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let advantages = doc.dots_mut(GROUP_ADVANTAGES);
    advantages.remove(INTEGRITY);
    advantages.insert(
        WISDOM.to_string(),
        BoundedTrait::with_limit(STARTING_WISDOM, ADVANTAGE_LIMIT)?,
    );
    Ok(())
}
