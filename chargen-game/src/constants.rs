//! Centralized budgets and tuning constants for character generation.
//!
//! These values define the point-buy math for every rule system. Keeping them
//! together means a rules change is a reviewed code change rather than a
//! scattered edit across the generator layers.

// Trait ceilings ------------------------------------------------------------
/// Ceiling applied to a trait created without an explicit limit.
pub const DEFAULT_TRAIT_LIMIT: u8 = 5;
/// Ceiling for advantages such as Willpower, Integrity, Gnosis and Blood Potency.
pub const ADVANTAGE_LIMIT: u8 = 10;

// Attributes ----------------------------------------------------------------
pub const ATTRIBUTE_GROUPS: usize = 3;
pub const ATTRIBUTE_BUDGETS: [u32; 3] = [5, 4, 3];
pub const ATTRIBUTE_BASE: u8 = 1;
pub const ATTRIBUTE_ALLOCATION_CAP: u8 = 4;

// Skills --------------------------------------------------------------------
pub const SKILL_GROUPS: usize = 3;
pub const SKILL_BUDGETS: [u32; 3] = [11, 7, 4];
pub const SKILL_BASE: u8 = 0;
pub const SKILL_ALLOCATION_CAP: u8 = 4;

// Professional training -----------------------------------------------------
pub const ASSET_SKILL_COUNT: usize = 2;
/// Bonus dots drawn per asset skill; the duplicate 2 weights the draw.
pub const ASSET_SKILL_BONUSES: [u8; 4] = [0, 1, 2, 2];
pub const PROFESSION_ATTRIBUTE_BONUS: u8 = 1;
pub const PROFESSION_MERIT_DOTS: u8 = 1;
pub const CONTACT_COUNT: usize = 2;
pub const CONTACT_MERIT_DOTS: u8 = 1;

// Merits --------------------------------------------------------------------
pub const MERIT_BUDGET: u8 = 7;

// Morality ------------------------------------------------------------------
pub const STARTING_INTEGRITY: u8 = 7;
pub const MIN_INTEGRITY: u8 = 1;
pub const STARTING_WISDOM: u8 = 7;

// Dice pools ----------------------------------------------------------------
pub const DIE_SIDES: u8 = 10;
pub const SUCCESS_THRESHOLD: u8 = 8;
/// Standard "10-again" explosion set.
pub const TEN_AGAIN: [u8; 1] = [10];
/// Hard stop for degenerate explosion sets that would re-roll forever.
pub const MAX_POOL_DICE: u32 = 1_000;

// Supernatural templates ----------------------------------------------------
pub const DEFAULT_POWER_STAT: u8 = 1;
pub const DISCIPLINE_PICKS: usize = 3;
pub const PRIMARY_REAGENT_DOTS: u8 = 2;
pub const SECONDARY_REAGENT_DOTS: u8 = 1;
pub const FREE_ARCANA_DOTS: u8 = 3;
pub const ARCANUM_CREATION_CAP: u8 = 3;
pub const RESISTANCE_BONUS: u8 = 1;
pub const OCCULT_BONUS: u8 = 1;
pub const HIGH_SPEECH_DOTS: u8 = 1;

// Trait group names ---------------------------------------------------------
pub const GROUP_ATTRIBUTES: &str = "Attributes";
pub const GROUP_SKILLS: &str = "Skills";
pub const GROUP_ASSET_SKILLS: &str = "Asset Skills";
pub const GROUP_PROFESSION: &str = "Profession";
pub const GROUP_MERITS: &str = "Merits";
pub const GROUP_ANCHORS: &str = "Anchors";
pub const GROUP_ADVANTAGES: &str = "Advantages";
pub const GROUP_CLAN: &str = "Clan";
pub const GROUP_DISCIPLINES: &str = "Disciplines";
pub const GROUP_PATH: &str = "Path";
pub const GROUP_ARCANA: &str = "Arcana";

// Trait names ---------------------------------------------------------------
pub const WILLPOWER: &str = "Willpower";
pub const INTEGRITY: &str = "Integrity";
pub const WISDOM: &str = "Wisdom";
pub const GNOSIS: &str = "Gnosis";
pub const BLOOD_POTENCY: &str = "Blood Potency";
pub const VIRTUE: &str = "Virtue";
pub const VICE: &str = "Vice";
pub const RESOLVE: &str = "Resolve";
pub const COMPOSURE: &str = "Composure";
pub const OCCULT: &str = "Occult";
pub const HIGH_SPEECH: &str = "High Speech";
