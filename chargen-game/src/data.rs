//! Static rule tables shared by every rule system.
//!
//! Tables are immutable process-wide data. Relationship tables are slices of
//! tuples so lookups stay in declaration order, which keeps every random pick
//! over them reproducible.

use crate::constants::{
    ARCANUM_CREATION_CAP, ATTRIBUTE_ALLOCATION_CAP, ATTRIBUTE_BASE, ATTRIBUTE_BUDGETS,
    ATTRIBUTE_GROUPS, DEFAULT_TRAIT_LIMIT, FREE_ARCANA_DOTS, PRIMARY_REAGENT_DOTS,
    SECONDARY_REAGENT_DOTS, SKILL_ALLOCATION_CAP, SKILL_BASE, SKILL_BUDGETS, SKILL_GROUPS,
};
use crate::error::{ChargenError, Result};
use crate::numbers::usize_to_u32;

/// Mental, physical and social attributes, three per group.
pub const ATTRIBUTES: [&str; 9] = [
    "Intelligence", "Wits", "Resolve",
    "Strength", "Dexterity", "Stamina",
    "Presence", "Manipulation", "Composure",
];

pub const RESISTANCES: [&str; 3] = ["Resolve", "Stamina", "Composure"];

/// Mental, physical and social skills, eight per group.
pub const SKILLS: [&str; 24] = [
    "Academics", "Computer", "Crafts", "Investigation",
    "Medicine", "Occult", "Politics", "Science",
    "Athletics", "Brawl", "Drive", "Firearms",
    "Larceny", "Stealth", "Survival", "Weaponry",
    "Animal Ken", "Empathy", "Expression", "Intimidation",
    "Persuasion", "Socialize", "Streetwise", "Subterfuge",
];

/// Professional training: asset skills and the attributes it favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profession {
    pub name: &'static str,
    pub skills: [&'static str; 2],
    pub attributes: &'static [&'static str],
}

const fn profession(
    name: &'static str,
    skills: [&'static str; 2],
    attributes: &'static [&'static str],
) -> Profession {
    Profession {
        name,
        skills,
        attributes,
    }
}

pub const PROFESSIONS: [Profession; 23] = [
    profession("Academic", ["Academics", "Science"], &["Intelligence"]),
    profession("Artist", ["Crafts", "Expression"], &["Dexterity"]),
    profession("Athlete", ["Athletics", "Medicine"], &["Stamina"]),
    profession("Cop", ["Streetwise", "Firearms"], &["Wits"]),
    profession("Criminal", ["Larceny", "Streetwise"], &["Manipulation"]),
    profession("Detective", ["Empathy", "Investigation"], &["Wits"]),
    profession("Doctor", ["Empathy", "Medicine"], &["Intelligence"]),
    profession("Engineer", ["Crafts", "Science"], &["Dexterity"]),
    profession("Hacker", ["Computer", "Science"], &["Intelligence"]),
    profession("Hit Man", ["Firearms", "Stealth"], &["Dexterity"]),
    profession("Journalist", ["Expression", "Investigation"], &["Composure"]),
    profession("Laborer", ["Athletics", "Crafts"], &["Stamina"]),
    profession("Occultist", ["Investigation", "Occult"], &["Composure"]),
    profession("Politician", ["Politics", "Subterfuge"], &["Manipulation"]),
    profession("Religious Leader", ["Academics", "Occult"], &["Manipulation"]),
    profession("Scientist", ["Investigation", "Science"], &["Intelligence"]),
    profession("Socialite", ["Politics", "Socialize"], &["Presence"]),
    profession("Stuntman", ["Athletics", "Drive"], &["Strength"]),
    profession("Survivalist", ["Animal Ken", "Survival"], &["Wits"]),
    profession("Soldier", ["Firearms", "Survival"], &["Resolve"]),
    profession("Technician", ["Crafts", "Investigation"], &["Composure"]),
    profession("Thug", ["Brawl", "Intimidation"], &["Strength"]),
    profession("Vagrant", ["Streetwise", "Survival"], &["Wits"]),
];

pub const CONTACTS: [&str; 33] = [
    "Drug Dealers", "Bloggers", "Financial Speculators",
    "Legal Advisors", "Librarians", "Political Aides", "Contractors",
    "Fashion Models", "Caterers", "Private Security",
    "Police Officers", "First Responders", "Night Doctors",
    "Architects", "Bureaucrats", "Scholars", "Book Publishers",
    "Broadcasters", "Journalists", "Taxi Drivers",
    "Celebrities", "Charities", "Music Scene", "Art Scene",
    "Entrepreneurs", "Sex Workers", "Weapon Dealers",
    "Private Investigators", "Clergy", "Criminal Bosses",
    "Homeless", "Labor Unions", "Hacker Rings",
];

pub const VIRTUES: [&str; 9] = [
    "Patient", "Loving", "Ambitious", "Generous", "Just",
    "Tolerant", "Hopeful", "Courageous", "Confident",
];

pub const VICES: [&str; 9] = [
    "Hateful", "Cruel", "Greedy", "Lustful", "Cowardly",
    "Arrogant", "Gluttonous", "Deceitful", "Reckless",
];

/// Merits and the dot ratings each may legally be bought at.
pub const MERIT_DOTS: [(&str, &[u8]); 49] = [
    ("Anonymity", &[1, 2, 3, 4, 5]),
    ("Fame", &[1, 2, 3]),
    ("Barfly", &[2]),
    ("Alternate Identity", &[1, 2, 3]),
    ("Small-Framed", &[2]),
    ("Giant", &[3]),
    ("Area of Expertise", &[1]),
    ("Common Sense", &[3]),
    ("Eye for the Strange", &[2]),
    ("Danger Sense", &[2]),
    ("Direction Sense", &[1]),
    ("Eidetic Memory", &[2]),
    ("Encyclopedic Knowledge", &[2]),
    ("Fast Reflexes", &[1, 2, 3]),
    ("Good Time Management", &[1]),
    ("Holistic Awareness", &[1]),
    ("Indomitable", &[2]),
    ("Language", &[1]),
    ("Library", &[1, 2, 3]),
    ("Meditative Mind", &[1, 2, 3]),
    ("Multilingual", &[1]),
    ("Tolerance for Biology", &[2]),
    ("Trained Observer", &[1, 3]),
    ("Crack Driver", &[2]),
    ("Demolisher", &[1, 2, 3]),
    ("Double Jointed", &[2]),
    ("Fleet of Foot", &[1, 2, 3]),
    ("Hardy", &[1, 2, 3]),
    ("Iron Stamina", &[1, 2, 3]),
    ("Parkour", &[1, 2, 3, 4, 5]),
    ("Allies", &[1, 2, 3, 4, 5]),
    ("Fast-Talking", &[1, 2, 3, 4, 5]),
    ("Fixer", &[2]),
    ("Hobbyist Clique", &[2]),
    ("Inspiring", &[3]),
    ("Iron Will", &[2]),
    ("Mentor", &[1, 2, 3, 4, 5]),
    ("Mystery Cult Initiation", &[1, 2, 3, 4, 5]),
    ("Resources", &[1, 2, 3, 4, 5]),
    ("Pusher", &[1]),
    ("Retainer", &[1, 2, 3, 4, 5]),
    ("Safe Place", &[1, 2, 3, 4, 5]),
    ("Status", &[1, 2, 3, 4, 5]),
    ("Staff", &[1, 2, 3, 4, 5]),
    ("Striking Looks", &[1, 2]),
    ("Sympathetic", &[2]),
    ("Taste", &[1]),
    ("True Friend", &[3]),
    ("Untouchable", &[1]),
];

/// Vampire clans and their in-clan disciplines.
pub const CLAN_DISCIPLINES: [(&str, &[&str]); 5] = [
    ("Daeva", &["Celerity", "Majesty", "Vigor"]),
    ("Gangrel", &["Animalism", "Protean", "Resilience"]),
    ("Mekhet", &["Auspex", "Celerity", "Obfuscate"]),
    ("Nosferatu", &["Nightmare", "Obfuscate", "Vigor"]),
    ("Ventrue", &["Animalism", "Dominate", "Resilience"]),
];

pub const ARCANA: [&str; 10] = [
    "Death", "Fate", "Forces", "Life", "Matter",
    "Mind", "Prime", "Space", "Spirit", "Time",
];

/// A mage Path: its two ruling (reagent) arcana and its inferior arcanum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Path {
    pub name: &'static str,
    pub reagents: [&'static str; 2],
    pub inferior: &'static str,
}

pub const PATHS: [Path; 5] = [
    Path { name: "Acanthus", reagents: ["Fate", "Time"], inferior: "Forces" },
    Path { name: "Mastigos", reagents: ["Mind", "Space"], inferior: "Matter" },
    Path { name: "Moros", reagents: ["Matter", "Death"], inferior: "Spirit" },
    Path { name: "Obrimos", reagents: ["Prime", "Forces"], inferior: "Death" },
    Path { name: "Thyrsus", reagents: ["Life", "Spirit"], inferior: "Mind" },
];

/// Names of every merit that can be bought with the free merit budget.
#[must_use]
pub fn merit_names() -> Vec<&'static str> {
    MERIT_DOTS.iter().map(|(name, _)| *name).collect()
}

/// Legal dot ratings for a merit, if it is in the table.
#[must_use]
pub fn merit_dots(merit: &str) -> Option<&'static [u8]> {
    MERIT_DOTS
        .iter()
        .find(|(name, _)| *name == merit)
        .map(|(_, dots)| *dots)
}

#[must_use]
pub fn clan_names() -> Vec<&'static str> {
    CLAN_DISCIPLINES.iter().map(|(name, _)| *name).collect()
}

#[must_use]
pub fn clan_disciplines(clan: &str) -> Option<&'static [&'static str]> {
    CLAN_DISCIPLINES
        .iter()
        .find(|(name, _)| *name == clan)
        .map(|(_, disciplines)| *disciplines)
}

/// Check every table once; a failure means the tables themselves are wrong.
///
/// # Errors
///
/// Returns [`ChargenError::MalformedTable`] naming the first broken table.
pub fn validate_tables() -> Result<()> {
    check_grouping(
        "ATTRIBUTES",
        ATTRIBUTES.len(),
        ATTRIBUTE_GROUPS,
        &ATTRIBUTE_BUDGETS,
        ATTRIBUTE_BASE,
        ATTRIBUTE_ALLOCATION_CAP,
    )?;
    check_grouping(
        "SKILLS",
        SKILLS.len(),
        SKILL_GROUPS,
        &SKILL_BUDGETS,
        SKILL_BASE,
        SKILL_ALLOCATION_CAP,
    )?;

    for resistance in RESISTANCES {
        ensure(ATTRIBUTES.contains(&resistance), "RESISTANCES", || {
            format!("{resistance} is not an attribute")
        })?;
    }

    for prof in &PROFESSIONS {
        for skill in prof.skills {
            ensure(SKILLS.contains(&skill), "PROFESSIONS", || {
                format!("{} lists unknown skill {skill}", prof.name)
            })?;
        }
        ensure(!prof.attributes.is_empty(), "PROFESSIONS", || {
            format!("{} has no preferred attribute", prof.name)
        })?;
        for attr in prof.attributes {
            ensure(ATTRIBUTES.contains(attr), "PROFESSIONS", || {
                format!("{} lists unknown attribute {attr}", prof.name)
            })?;
        }
    }

    for (merit, dots) in &MERIT_DOTS {
        ensure(!dots.is_empty(), "MERIT_DOTS", || format!("{merit} has no legal rating"))?;
        ensure(
            dots.iter().all(|d| (1..=DEFAULT_TRAIT_LIMIT).contains(d)),
            "MERIT_DOTS",
            || format!("{merit} has a rating outside 1..={DEFAULT_TRAIT_LIMIT}"),
        )?;
    }

    for (clan, disciplines) in &CLAN_DISCIPLINES {
        ensure(!disciplines.is_empty(), "CLAN_DISCIPLINES", || {
            format!("{clan} has no disciplines")
        })?;
    }

    for path in &PATHS {
        for arcanum in path.reagents.iter().chain(std::iter::once(&path.inferior)) {
            ensure(ARCANA.contains(arcanum), "PATHS", || {
                format!("{} names unknown arcanum {arcanum}", path.name)
            })?;
        }
        ensure(!path.reagents.contains(&path.inferior), "PATHS", || {
            format!("{} rules its own inferior arcanum", path.name)
        })?;
    }

    // Reagents plus free dots must fit under the creation cap without the inferior.
    let open_arcana = usize_to_u32(ARCANA.len().saturating_sub(1));
    let creation_dots = u32::from(PRIMARY_REAGENT_DOTS)
        + u32::from(SECONDARY_REAGENT_DOTS)
        + u32::from(FREE_ARCANA_DOTS);
    ensure(
        open_arcana * u32::from(ARCANUM_CREATION_CAP) >= creation_dots,
        "ARCANA",
        || "not enough arcana to place creation dots".to_string(),
    )
}

fn check_grouping(
    table: &'static str,
    len: usize,
    groups: usize,
    budgets: &[u32],
    base: u8,
    cap: u8,
) -> Result<()> {
    ensure(groups > 0 && len % groups == 0, table, || {
        format!("{len} entries do not split into {groups} groups")
    })?;
    ensure(budgets.len() == groups, table, || {
        format!("{} budgets for {groups} groups", budgets.len())
    })?;
    // Slots start at `base`, so only the room above it takes budget.
    let capacity = usize_to_u32(len / groups) * u32::from(cap.saturating_sub(base));
    ensure(budgets.iter().all(|b| *b <= capacity), table, || {
        format!("a budget exceeds group capacity {capacity}")
    })
}

fn ensure(condition: bool, table: &'static str, detail: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ChargenError::MalformedTable {
            table,
            detail: detail(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_valid() {
        validate_tables().unwrap();
    }

    #[test]
    fn lookups_find_known_entries() {
        assert_eq!(merit_dots("Trained Observer"), Some(&[1_u8, 3][..]));
        assert_eq!(merit_dots("Nonexistent"), None);
        assert_eq!(
            clan_disciplines("Mekhet"),
            Some(&["Auspex", "Celerity", "Obfuscate"][..])
        );
        assert_eq!(merit_names().len(), MERIT_DOTS.len());
        assert_eq!(clan_names().len(), CLAN_DISCIPLINES.len());
    }

    #[test]
    fn grouping_check_rejects_overfull_budgets() {
        let err = check_grouping("TEST", 6, 3, &[5, 1, 1], 0, 2).unwrap_err();
        assert!(matches!(err, ChargenError::MalformedTable { table: "TEST", .. }));
        assert!(check_grouping("TEST", 7, 3, &[1, 1, 1], 0, 2).is_err());
    }

    #[test]
    fn grouping_check_counts_only_room_above_base() {
        // Three attributes starting at 1 under a cap of 4 hold nine extra dots.
        assert!(check_grouping("ATTRIBUTES", 9, 3, &[9, 4, 3], 1, 4).is_ok());
        let err = check_grouping("ATTRIBUTES", 9, 3, &[10, 4, 3], 1, 4).unwrap_err();
        assert!(matches!(err, ChargenError::MalformedTable { table: "ATTRIBUTES", .. }));

        let mut engine = crate::engine::DiceEngine::from_stream_seed(3);
        assert!(matches!(
            crate::allocation::spread(&mut engine, 3, 10, 1, Some(4)),
            Err(ChargenError::BudgetExceedsCapacity { .. })
        ));
    }
}
