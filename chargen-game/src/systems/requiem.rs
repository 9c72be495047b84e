//! Vampire: The Requiem 2nd edition layer.

use log::debug;

use crate::bounded::BoundedTrait;
use crate::constants::{
    ADVANTAGE_LIMIT, BLOOD_POTENCY, DISCIPLINE_PICKS, GROUP_ADVANTAGES, GROUP_CLAN,
    GROUP_DISCIPLINES,
};
use crate::data::CLAN_DISCIPLINES;
use crate::document::{CharacterDocument, TraitGroup};
use crate::error::Result;
use crate::pipeline::{GenerationContext, Layer, Step};

pub const LAYER: Layer = Layer {
    id: "vtr2",
    label: "Vampire: The Requiem 2nd Edition",
    parent: Some("cod"),
    resolvable: true,
    steps: STEPS,
};

const STEPS: &[Step] = &[
    Step::new("blood_potency", blood_potency),
    Step::new("clan", clan),
];

fn blood_potency(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    debug!("create Requiem 2ed character traits");
    doc.dots_mut(GROUP_ADVANTAGES).insert(
        BLOOD_POTENCY.to_string(),
        BoundedTrait::with_limit(ctx.params.blood_potency, ADVANTAGE_LIMIT)?,
    );
    Ok(())
}

/// Clan and in-clan disciplines; repeated picks stack on the same discipline.
fn clan(ctx: &mut GenerationContext<'_>, doc: &mut CharacterDocument) -> Result<()> {
    let (clan, disciplines) = *ctx.engine.choice(&CLAN_DISCIPLINES)?;
    doc.set_group(GROUP_CLAN, TraitGroup::Label(clan.to_string()));

    let ratings = doc.dots_mut(GROUP_DISCIPLINES);
    for _ in 0..DISCIPLINE_PICKS {
        let discipline = *ctx.engine.choice(disciplines)?;
        *ratings.entry(discipline.to_string()).or_default() += 1;
    }
    debug!("{clan} with disciplines {ratings:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clan_disciplines;
    use crate::engine::DiceEngine;
    use crate::names::FixedNames;
    use crate::params::GenerationParams;
    use crate::seed::Seed;

    #[test]
    fn disciplines_come_from_the_clan() {
        for stream in 0..32 {
            let mut names = FixedNames::new(["A B"]);
            let mut ctx = GenerationContext {
                engine: DiceEngine::from_stream_seed(stream),
                names: &mut names,
                params: GenerationParams::default(),
            };
            let mut doc = CharacterDocument::envelope("vtr2", Seed::from(stream.to_string()));
            clan(&mut ctx, &mut doc).unwrap();

            let clan = doc.group(GROUP_CLAN).and_then(TraitGroup::as_label).unwrap();
            let allowed = clan_disciplines(clan).unwrap();
            let disciplines = doc.dots(GROUP_DISCIPLINES).unwrap();
            assert!(disciplines.keys().all(|d| allowed.contains(&d.as_str())));
            assert_eq!(doc.total_dots(GROUP_DISCIPLINES), 3);
        }
    }

    #[test]
    fn blood_potency_follows_params() {
        let mut names = FixedNames::new(["A B"]);
        let mut ctx = GenerationContext {
            engine: DiceEngine::from_stream_seed(1),
            names: &mut names,
            params: GenerationParams::default().with_blood_potency(4),
        };
        let mut doc = CharacterDocument::envelope("vtr2", Seed::from(1_i64));
        blood_potency(&mut ctx, &mut doc).unwrap();
        let rating = doc.rating(GROUP_ADVANTAGES, BLOOD_POTENCY).unwrap();
        assert_eq!(rating, 4);
        assert_eq!(rating.limit(), ADVANTAGE_LIMIT);
    }
}
