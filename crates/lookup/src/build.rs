//! Entry building: raw provider records in, [`CompendiumEntry`] out.
//!
//! Every builder takes the *requested* item name, which is what the vendor
//! link is generated from, never the name the provider returned.

use crate::models::open5e::Item as Open5eItem;
use crate::models::srd::{Equipment, MagicItem, NamedReference};
use crate::models::{Attunement, CompendiumEntry, roll20_url};
use crate::source::Open5eCategory;
use crate::text::{first_present, is_truthy, summarize, to_text, truncate_summary};
use compendium_extract::normalize_display;
use serde_json::Value;
use url::Url;

const SUMMARY_SEPARATOR: &str = " \u{2022} ";

/// Builds an entry from a primary-source magic item.
pub fn srd_magic_item(requested: &str, item: &MagicItem, source: &Url) -> CompendiumEntry {
    CompendiumEntry {
        kind: normalize_display(NamedReference::name_or(item.equipment_category.as_ref(), "Magic Item")),
        attunement: Attunement::from(is_truthy(&item.requires_attunement)),
        summary: summarize(item.desc.as_ref()),
        source: source.to_string(),
        roll20: roll20_url(requested),
    }
}

/// Builds an entry from a primary-source equipment record.
///
/// Equipment rarely has a description, so one is synthesised from the
/// structured fields when it's missing (see [`equipment_summary`]).
pub fn srd_equipment(requested: &str, item: &Equipment, source: &Url) -> CompendiumEntry {
    let summary = match summarize(item.desc.as_ref()) {
        described if !described.is_empty() => described,
        _ => equipment_summary(item),
    };
    CompendiumEntry {
        kind: normalize_display(NamedReference::name_or(item.equipment_category.as_ref(), "Equipment")),
        attunement: Attunement::No,
        summary,
        source: source.to_string(),
        roll20: roll20_url(requested),
    }
}

/// Synthesises a summary from an equipment record's structured fields.
///
/// Parts, in order, each only when present: category, weapon category,
/// weapon range, damage, armor class, stealth disadvantage, strength
/// minimum, weight, and cost; joined with a bullet.
///
/// # Examples
///
/// ```rust
/// use compendium_lookup::{equipment_summary, models::srd::Equipment};
/// let longsword: Equipment = serde_json::from_value(serde_json::json!({
///     "equipment_category": {"name": "Weapon"},
///     "weapon_category": "Martial",
///     "weapon_range": "Melee",
///     "damage": {"damage_dice": "1d8", "damage_type": {"name": "Slashing"}},
///     "weight": 3,
///     "cost": {"quantity": 15, "unit": "gp"}
/// })).unwrap();
/// assert_eq!(
///     equipment_summary(&longsword),
///     "Weapon \u{2022} Martial \u{2022} Melee \u{2022} Damage: 1d8 Slashing \u{2022} Weight: 3 lb \u{2022} Cost: 15 gp",
/// );
/// ```
pub fn equipment_summary(item: &Equipment) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(category) = item.equipment_category.as_ref().and_then(|c| c.name.clone()) {
        parts.push(category);
    }
    parts.extend(item.weapon_category.clone());
    parts.extend(item.weapon_range.clone());
    if let Some(damage) = &item.damage
        && let Some(dice) = damage.damage_dice.as_deref().filter(|d| !d.is_empty())
    {
        let kind = NamedReference::name_or(damage.damage_type.as_ref(), "");
        parts.push(format!("Damage: {dice} {kind}").trim().to_string());
    }
    if let Some(base) = item.armor_class.as_ref().and_then(|ac| ac.base.as_ref()) {
        parts.push(format!("AC: {}", to_text(base)));
    }
    if item.stealth_disadvantage == Some(true) {
        parts.push("Stealth: Disadvantage".to_string());
    }
    if is_truthy(&item.str_minimum) {
        parts.push(format!("STR min: {}", to_text(&item.str_minimum)));
    }
    if let Some(weight) = &item.weight {
        parts.push(format!("Weight: {} lb", to_text(weight)));
    }
    if let Some(cost) = &item.cost
        && (cost.quantity.is_some() || cost.unit.is_some())
    {
        let quantity = cost.quantity.as_ref().map(to_text).unwrap_or_default();
        let unit = cost.unit.as_deref().unwrap_or_default();
        parts.push(format!("Cost: {quantity} {unit}").trim().to_string());
    }
    parts.retain(|part| !part.is_empty());
    truncate_summary(parts.join(SUMMARY_SEPARATOR))
}

/// Builds an entry from a secondary-source search hit.
///
/// `fallback_source` is cited when the record carries no URL of its own.
pub fn open5e_item(requested: &str, item: &Open5eItem, category: Open5eCategory, fallback_source: &Url) -> CompendiumEntry {
    let (kind, attunement) = match category {
        Open5eCategory::MagicItems => {
            // Only a missing type means "Magic Item"; an explicit null is blank.
            let kind = match &item.kind {
                None => "Magic Item".to_string(),
                Some(Value::Null) => String::new(),
                Some(kind) => to_text(kind),
            };
            (normalize_display(&kind), Attunement::Unknown)
        },
        Open5eCategory::Weapons => ("Weapon".to_string(), Attunement::No),
        Open5eCategory::Armor => ("Armor".to_string(), Attunement::No),
    };
    let source = [item.document_url.as_deref(), item.url.as_deref()]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_source.as_str().trim_end_matches('/').to_string());
    CompendiumEntry {
        kind,
        attunement,
        summary: summarize(first_present([item.desc.as_ref(), item.description.as_ref()])),
        source,
        roll20: roll20_url(requested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn equipment(value: serde_json::Value) -> Equipment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn magic_item_entry() {
        let item: MagicItem = serde_json::from_value(json!({
            "name": "Potion of Healing",
            "equipment_category": {"name": "Potion"},
            "requires_attunement": false,
            "desc": ["A character who drinks the magical red fluid regains 2d4 + 2 hit points."]
        }))
        .unwrap();
        let source = url("https://srd.test/api/2014/magic-items/potion-of-healing");
        let entry = srd_magic_item("Potion of Healing", &item, &source);
        assert_eq!(
            entry,
            CompendiumEntry {
                kind: "Potion".into(),
                attunement: Attunement::No,
                summary: "A character who drinks the magical red fluid regains 2d4 + 2 hit points.".into(),
                source: "https://srd.test/api/2014/magic-items/potion-of-healing".into(),
                roll20: "https://roll20.net/compendium/dnd5e/Potion%20of%20Healing".into(),
            }
        );
    }

    #[test]
    fn magic_item_defaults() {
        let item: MagicItem = serde_json::from_value(json!({"requires_attunement": true})).unwrap();
        let entry = srd_magic_item("Cloak", &item, &url("https://srd.test/x"));
        assert_eq!(entry.kind, "Magic Item");
        assert_eq!(entry.attunement, Attunement::Yes);
        assert_eq!(entry.summary, "");
    }

    #[test]
    fn roll20_uses_requested_name() {
        let item: MagicItem = serde_json::from_value(json!({"name": "Potion of Healing (Greater)"})).unwrap();
        let entry = srd_magic_item("Potion of Greater Healing", &item, &url("https://srd.test/x"));
        assert_eq!(entry.roll20, roll20_url("Potion of Greater Healing"));
    }

    #[rstest]
    #[case(
        json!({"equipment_category": {"name": "Armor"}, "armor_class": {"base": 18, "dex_bonus": false},
               "str_minimum": 15, "stealth_disadvantage": true, "weight": 65, "cost": {"quantity": 1500, "unit": "gp"}}),
        "Armor \u{2022} AC: 18 \u{2022} Stealth: Disadvantage \u{2022} STR min: 15 \u{2022} Weight: 65 lb \u{2022} Cost: 1500 gp"
    )]
    #[case(
        json!({"equipment_category": {"name": "Armor"}, "armor_class": {"base": 11}, "str_minimum": 0,
               "stealth_disadvantage": false}),
        "Armor \u{2022} AC: 11"
    )]
    #[case(
        json!({"equipment_category": {"name": "Adventuring Gear"}, "weight": 0.5, "cost": {"quantity": 2, "unit": "cp"}}),
        "Adventuring Gear \u{2022} Weight: 0.5 lb \u{2022} Cost: 2 cp"
    )]
    #[case(json!({"damage": {"damage_dice": "1d4"}}), "Damage: 1d4")]
    #[case(json!({"damage": {"damage_type": {"name": "Piercing"}}}), "")]
    #[case(json!({"cost": {}}), "")]
    #[case(json!({}), "")]
    fn test_equipment_summary(#[case] record: serde_json::Value, #[case] expected: &str) {
        assert_eq!(equipment_summary(&equipment(record)), expected);
    }

    #[test]
    fn equipment_prefers_description() {
        let item = equipment(json!({
            "equipment_category": {"name": "Adventuring Gear"},
            "desc": ["A set of tools for picking locks."],
            "weight": 1
        }));
        let entry = srd_equipment("Thieves' Tools", &item, &url("https://srd.test/e"));
        assert_eq!(entry.summary, "A set of tools for picking locks.");
        assert_eq!(entry.kind, "Adventuring Gear");
        assert_eq!(entry.attunement, Attunement::No);
    }

    #[test]
    fn equipment_synthesises_when_description_empty() {
        let item = equipment(json!({"desc": [], "weight": 2}));
        let entry = srd_equipment("Crowbar", &item, &url("https://srd.test/e"));
        assert_eq!(entry.summary, "Weight: 2 lb");
        assert_eq!(entry.kind, "Equipment");
    }

    #[rstest]
    #[case(Open5eCategory::MagicItems, "Wondrous item", Attunement::Unknown)]
    #[case(Open5eCategory::Weapons, "Weapon", Attunement::No)]
    #[case(Open5eCategory::Armor, "Armor", Attunement::No)]
    fn open5e_categories(#[case] category: Open5eCategory, #[case] kind: &str, #[case] attunement: Attunement) {
        let item: Open5eItem =
            serde_json::from_value(json!({"name": "Thing", "type": "Wondrous  item", "desc": "Does things."})).unwrap();
        let entry = open5e_item("Thing", &item, category, &url("https://open5e.test/"));
        assert_eq!(entry.kind, kind);
        assert_eq!(entry.attunement, attunement);
        assert_eq!(entry.summary, "Does things.");
    }

    #[rstest]
    #[case(json!({"document__url": "https://doc.test", "url": "https://item.test"}), "https://doc.test")]
    #[case(json!({"document__url": "", "url": "https://item.test"}), "https://item.test")]
    #[case(json!({}), "https://open5e.test")]
    fn open5e_source_fallbacks(#[case] record: serde_json::Value, #[case] expected: &str) {
        let item: Open5eItem = serde_json::from_value(record).unwrap();
        let entry = open5e_item("Thing", &item, Open5eCategory::Weapons, &url("https://open5e.test"));
        assert_eq!(entry.source, expected);
    }

    #[test]
    fn open5e_description_fallback() {
        let item: Open5eItem = serde_json::from_value(json!({"desc": "", "description": "From description."})).unwrap();
        let entry = open5e_item("Thing", &item, Open5eCategory::MagicItems, &url("https://open5e.test"));
        assert_eq!(entry.summary, "From description.");
        assert_eq!(entry.kind, "Magic Item");
    }

    #[rstest]
    #[case(json!({"type": null}), "")]
    #[case(json!({"type": "  Wondrous  item "}), "Wondrous item")]
    #[case(json!({}), "Magic Item")]
    fn open5e_magic_item_type(#[case] record: serde_json::Value, #[case] expected: &str) {
        let item: Open5eItem = serde_json::from_value(record).unwrap();
        let entry = open5e_item("Thing", &item, Open5eCategory::MagicItems, &url("https://open5e.test"));
        assert_eq!(entry.kind, expected);
    }

    #[test]
    fn open5e_fallback_source_is_the_configured_base() {
        let item = Open5eItem::default();
        let entry = open5e_item("Thing", &item, Open5eCategory::Armor, &url("https://api.open5e.com"));
        assert_eq!(entry.source, "https://api.open5e.com");
    }
}
