//! Structural checks applied to every document a sweep generates.

use chargen_game::constants::{
    ADVANTAGE_LIMIT, GROUP_ADVANTAGES, GROUP_ARCANA, GROUP_ATTRIBUTES, GROUP_CLAN,
    GROUP_DISCIPLINES, GROUP_MERITS, GROUP_PATH, GROUP_SKILLS, HIGH_SPEECH, INTEGRITY,
    STARTING_WISDOM, WILLPOWER, WISDOM,
};
use chargen_game::data::{ATTRIBUTES, PATHS, SKILLS, clan_disciplines, merit_dots};
use chargen_game::{CharacterDocument, RuleSystem, TraitGroup};

/// Every violated invariant, as human-readable messages; empty when clean.
pub fn check_document(system: &RuleSystem, doc: &CharacterDocument) -> Vec<String> {
    let steps = system.step_names();
    let has = |step: &str| steps.iter().any(|name| *name == step);
    let mut failures = Vec::new();

    if doc.metadata.rules != system.id() {
        failures.push(format!(
            "metadata.rules is {:?}, expected {:?}",
            doc.metadata.rules,
            system.id()
        ));
    }
    if doc.names.len() != 1 {
        failures.push(format!("expected one name, found {}", doc.names.len()));
    }
    if !doc.hooks.is_empty() {
        failures.push("hooks should be empty".to_string());
    }

    if has("attributes") {
        check_block(doc, GROUP_ATTRIBUTES, ATTRIBUTES.len(), 1, &mut failures);
    }
    if has("skills") {
        check_block(doc, GROUP_SKILLS, SKILLS.len(), 0, &mut failures);
    }
    if has("merits") {
        check_merits(doc, &mut failures);
    }
    if has("willpower") {
        check_advantage(doc, WILLPOWER, 2, ADVANTAGE_LIMIT, &mut failures);
    }
    if has("wisdom") {
        if doc.rating(GROUP_ADVANTAGES, INTEGRITY).is_some() {
            failures.push("Integrity should be replaced by Wisdom".to_string());
        }
        check_advantage(doc, WISDOM, STARTING_WISDOM, STARTING_WISDOM, &mut failures);
    } else if has("integrity") {
        check_advantage(doc, INTEGRITY, 1, 7, &mut failures);
    }
    if has("clan") {
        check_disciplines(doc, &mut failures);
    }
    if has("arcana") {
        check_arcana(doc, &mut failures);
    }
    if has("high_speech") && doc.rating(GROUP_MERITS, HIGH_SPEECH).is_none_or(|r| r != 1) {
        failures.push(format!("{HIGH_SPEECH} should be a one-dot merit"));
    }

    failures
}

fn check_block(
    doc: &CharacterDocument,
    group: &str,
    expected: usize,
    floor: u8,
    failures: &mut Vec<String>,
) {
    let Some(block) = doc.dots(group) else {
        failures.push(format!("{group} missing"));
        return;
    };
    if block.len() != expected {
        failures.push(format!("{group} has {} entries, expected {expected}", block.len()));
    }
    for (name, rating) in block {
        if *rating < floor || *rating > 5 {
            failures.push(format!("{group}.{name} = {rating} outside {floor}..=5"));
        }
    }
}

fn check_merits(doc: &CharacterDocument, failures: &mut Vec<String>) {
    let Some(merits) = doc.dots(GROUP_MERITS) else {
        failures.push(format!("{GROUP_MERITS} missing"));
        return;
    };
    for (merit, rating) in merits {
        if merit.starts_with("Profession (") || merit.starts_with("Contacts (") {
            continue;
        }
        if merit.as_str() == HIGH_SPEECH {
            continue;
        }
        match merit_dots(merit) {
            Some(legal) if legal.contains(&rating.value()) => {}
            Some(legal) => failures.push(format!("{merit} = {rating}, legal {legal:?}")),
            None => failures.push(format!("unknown merit {merit}")),
        }
    }
}

fn check_advantage(
    doc: &CharacterDocument,
    name: &str,
    low: u8,
    high: u8,
    failures: &mut Vec<String>,
) {
    match doc.rating(GROUP_ADVANTAGES, name) {
        Some(rating) if (low..=high).contains(&rating.value()) => {}
        Some(rating) => failures.push(format!("{name} = {rating} outside {low}..={high}")),
        None => failures.push(format!("{name} missing")),
    }
}

fn check_disciplines(doc: &CharacterDocument, failures: &mut Vec<String>) {
    let Some(clan) = doc.group(GROUP_CLAN).and_then(TraitGroup::as_label) else {
        failures.push(format!("{GROUP_CLAN} missing"));
        return;
    };
    let Some(allowed) = clan_disciplines(clan) else {
        failures.push(format!("unknown clan {clan}"));
        return;
    };
    let total = doc.total_dots(GROUP_DISCIPLINES);
    if total != 3 {
        failures.push(format!("{GROUP_DISCIPLINES} sum to {total}, expected 3"));
    }
    for name in doc.dots(GROUP_DISCIPLINES).into_iter().flat_map(|d| d.keys()) {
        if !allowed.contains(&name.as_str()) {
            failures.push(format!("{name} is not in-clan for {clan}"));
        }
    }
}

fn check_arcana(doc: &CharacterDocument, failures: &mut Vec<String>) {
    let path = doc
        .group(GROUP_PATH)
        .and_then(TraitGroup::as_label)
        .and_then(|name| PATHS.into_iter().find(|p| p.name == name));
    let (Some(path), Some(arcana)) = (path, doc.dots(GROUP_ARCANA)) else {
        failures.push(format!("{GROUP_PATH} or {GROUP_ARCANA} missing"));
        return;
    };
    if arcana.get(path.inferior).is_some_and(|r| *r != 0) {
        failures.push(format!("inferior arcanum {} has dots", path.inferior));
    }
    let total = doc.total_dots(GROUP_ARCANA);
    if total != 6 {
        failures.push(format!("{GROUP_ARCANA} sum to {total}, expected 6"));
    }
    for (name, rating) in arcana {
        if *rating > 3 {
            failures.push(format!("{name} = {rating} above creation cap"));
        }
    }
}
