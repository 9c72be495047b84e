//! Chronicles of Darkness layer: the mortal chassis every template builds on.

use log::{debug, trace};
use std::collections::BTreeMap;

use crate::allocation::spend;
use crate::bounded::BoundedTrait;
use crate::constants::{
    ADVANTAGE_LIMIT, ASSET_SKILL_BONUSES, ASSET_SKILL_COUNT, ATTRIBUTE_ALLOCATION_CAP,
    ATTRIBUTE_BASE, ATTRIBUTE_BUDGETS, ATTRIBUTE_GROUPS, COMPOSURE, CONTACT_COUNT,
    CONTACT_MERIT_DOTS, GROUP_ADVANTAGES, GROUP_ANCHORS, GROUP_ASSET_SKILLS, GROUP_ATTRIBUTES,
    GROUP_MERITS, GROUP_PROFESSION, GROUP_SKILLS, INTEGRITY, MERIT_BUDGET, MIN_INTEGRITY,
    PROFESSION_ATTRIBUTE_BONUS, PROFESSION_MERIT_DOTS, RESOLVE, SKILL_ALLOCATION_CAP,
    SKILL_BASE, SKILL_BUDGETS, SKILL_GROUPS, STARTING_INTEGRITY, TEN_AGAIN, VICE, VIRTUE,
    WILLPOWER,
};
use crate::data::{ATTRIBUTES, CONTACTS, MERIT_DOTS, PROFESSIONS, SKILLS, VICES, VIRTUES};
use crate::document::{CharacterDocument, TraitGroup};
use crate::engine::DiceEngine;
use crate::error::{ChargenError, Result};
use crate::pipeline::{GenerationContext, Layer, Step};

pub const LAYER: Layer = Layer {
    id: "cod",
    label: "Chronicles of Darkness",
    parent: Some("base"),
    resolvable: true,
    steps: STEPS,
};

const STEPS: &[Step] = &[
    Step::new("attributes", attributes),
    Step::new("skills", skills),
    Step::new("profession", profession),
    Step::new("contacts", contacts),
    Step::new("anchors", anchors),
    Step::new("merits", merits),
    Step::new("integrity", integrity),
    Step::new("willpower", willpower),
];

fn attributes(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    debug!("create CoD character traits");
    let attrs = spend(
        &mut ctx.engine,
        &ATTRIBUTES,
        &ATTRIBUTE_BUDGETS,
        ATTRIBUTE_GROUPS,
        ATTRIBUTE_BASE,
        Some(ATTRIBUTE_ALLOCATION_CAP),
    )?;
    doc.set_group(GROUP_ATTRIBUTES, TraitGroup::Dots(attrs));
    Ok(())
}

fn skills(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let skills = spend(
        &mut ctx.engine,
        &SKILLS,
        &SKILL_BUDGETS,
        SKILL_GROUPS,
        SKILL_BASE,
        Some(SKILL_ALLOCATION_CAP),
    )?;
    doc.set_group(GROUP_SKILLS, TraitGroup::Dots(skills));
    Ok(())
}

/// Professional training: asset skills with bonus dots, one attribute dot and
/// the Profession merit.
fn profession(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let engine = &mut ctx.engine;
    let profession = *engine.choice(&PROFESSIONS)?;
    let assets = engine.sample(&profession.skills, ASSET_SKILL_COUNT)?;

    let skills = doc.dots_mut(GROUP_SKILLS);
    for asset in &assets {
        let bonus = *engine.choice(&ASSET_SKILL_BONUSES)?;
        *skills.entry((*asset).to_string()).or_default() += bonus;
    }

    let attribute = *engine.choice(profession.attributes)?;
    *doc.dots_mut(GROUP_ATTRIBUTES)
        .entry(attribute.to_string())
        .or_default() += PROFESSION_ATTRIBUTE_BONUS;

    debug!("profession {} with assets {assets:?}", profession.name);
    doc.set_group(GROUP_PROFESSION, TraitGroup::Label(profession.name.to_string()));
    doc.set_group(
        GROUP_ASSET_SKILLS,
        TraitGroup::List(assets.iter().map(ToString::to_string).collect()),
    );
    doc.dots_mut(GROUP_MERITS).insert(
        format!("Profession ({})", profession.name),
        BoundedTrait::new(PROFESSION_MERIT_DOTS),
    );
    Ok(())
}

fn contacts(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let picks = ctx.engine.sample(&CONTACTS, CONTACT_COUNT)?;
    let merits = doc.dots_mut(GROUP_MERITS);
    for contact in picks {
        merits.insert(
            format!("Contacts ({contact})"),
            BoundedTrait::new(CONTACT_MERIT_DOTS),
        );
    }
    Ok(())
}

fn anchors(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let virtue = *ctx.engine.choice(&VIRTUES)?;
    let vice = *ctx.engine.choice(&VICES)?;
    let anchors = BTreeMap::from([
        (VIRTUE.to_string(), virtue.to_string()),
        (VICE.to_string(), vice.to_string()),
    ]);
    doc.set_group(GROUP_ANCHORS, TraitGroup::Labels(anchors));
    Ok(())
}

fn merits(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let ledger = spend_merit_budget(&mut ctx.engine, MERIT_BUDGET)?;
    let merits = doc.dots_mut(GROUP_MERITS);
    for (merit, dots) in ledger {
        merits.insert(merit.to_string(), BoundedTrait::new(dots));
    }
    Ok(())
}

/// Spend `budget` merit dots and return every purchase in order.
///
/// Each purchase takes the better of two legal ratings at or under the
/// remaining budget. A merit with no affordable rating is redrawn without
/// spending anything. The same merit may be bought more than once; when the
/// ledger is applied the last purchase wins.
///
/// # Errors
///
/// Propagates [`ChargenError::EmptySequence`] if the merit table is empty.
pub fn spend_merit_budget(engine: &mut DiceEngine, budget: u8) -> Result<Vec<(&'static str, u8)>> {
    let mut remaining = budget;
    let mut ledger = Vec::new();
    while remaining > 0 {
        let (merit, ratings) = *engine.choice(&MERIT_DOTS)?;
        let first = match engine.choice_under(ratings, remaining) {
            Ok(dots) => dots,
            Err(ChargenError::ImpossibleChoice { ceiling }) => {
                trace!("{merit} has no rating under {ceiling}; redrawing");
                continue;
            }
            Err(err) => return Err(err),
        };
        let second = engine.choice_under(ratings, remaining)?;
        let dots = first.max(second);
        remaining -= dots;
        ledger.push((merit, dots));
    }
    Ok(ledger)
}

/// Resolve + Composure, read from the finished attribute block.
fn resistance_pool(doc: &CharacterDocument) -> u8 {
    let rating = |name: &str| doc.rating(GROUP_ATTRIBUTES, name).map_or(0, BoundedTrait::value);
    rating(RESOLVE).saturating_add(rating(COMPOSURE))
}

/// Integrity starts high and erodes one dot per failed Resolve + Composure roll.
fn integrity(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let pool = u32::from(resistance_pool(doc));
    let mut integrity = STARTING_INTEGRITY;
    while integrity > MIN_INTEGRITY && ctx.engine.roll_pool(pool, &TEN_AGAIN) == 0 {
        integrity -= 1;
    }
    trace!("integrity settled at {integrity} with pool {pool}");
    doc.dots_mut(GROUP_ADVANTAGES).insert(
        INTEGRITY.to_string(),
        BoundedTrait::with_limit(integrity, ADVANTAGE_LIMIT)?,
    );
    Ok(())
}

fn willpower(_ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let willpower = resistance_pool(doc).min(ADVANTAGE_LIMIT);
    doc.dots_mut(GROUP_ADVANTAGES).insert(
        WILLPOWER.to_string(),
        BoundedTrait::with_limit(willpower, ADVANTAGE_LIMIT)?,
    );
    Ok(())
}
