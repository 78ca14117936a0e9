//! Record shapes served by the primary (SRD) reference source.
//!
//! Only the fields the entry builder reads are modelled. Fields whose type
//! varies between records (numbers that are sometimes floats, flags that are
//! sometimes strings) are kept as raw JSON.

use serde::Deserialize;
use serde_json::Value;

/// A category listing: `GET /{category}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub results: Vec<ResourceReference>,
}

/// One entry of a category listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceReference {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub name: String,
    /// Server-absolute path of the full record.
    #[serde(default)]
    pub url: Option<String>,
}

/// A reference to another resource, of which only the name is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedReference {
    #[serde(default)]
    pub name: Option<String>,
}

/// A full magic item record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MagicItem {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub equipment_category: Option<NamedReference>,
    #[serde(default)]
    pub requires_attunement: Value,
    #[serde(default)]
    pub desc: Option<Value>,
}

/// A full equipment record (weapons, armor, adventuring gear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Equipment {
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub equipment_category: Option<NamedReference>,
    #[serde(default)]
    pub desc: Option<Value>,
    #[serde(default)]
    pub weapon_category: Option<String>,
    #[serde(default)]
    pub weapon_range: Option<String>,
    #[serde(default)]
    pub damage: Option<Damage>,
    #[serde(default)]
    pub armor_class: Option<ArmorClass>,
    #[serde(default)]
    pub stealth_disadvantage: Option<bool>,
    #[serde(default)]
    pub str_minimum: Value,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub cost: Option<Cost>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Damage {
    #[serde(default)]
    pub damage_dice: Option<String>,
    #[serde(default)]
    pub damage_type: Option<NamedReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmorClass {
    #[serde(default)]
    pub base: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cost {
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl NamedReference {
    pub(crate) fn name_or<'a>(reference: Option<&'a Self>, default: &'a str) -> &'a str {
        reference.and_then(|r| r.name.as_deref()).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_without_results_is_empty() {
        let listing: ResourceList = serde_json::from_value(json!({"count": 0})).unwrap();
        assert!(listing.results.is_empty());
    }

    #[test]
    fn equipment_tolerates_sparse_records() {
        let item: Equipment = serde_json::from_value(json!({
            "name": "Torch",
            "equipment_category": {"index": "adventuring-gear", "name": "Adventuring Gear"},
            "weight": 1,
            "cost": {"quantity": 1, "unit": "cp"},
            "desc": []
        }))
        .unwrap();
        assert_eq!(NamedReference::name_or(item.equipment_category.as_ref(), "Equipment"), "Adventuring Gear");
        assert!(item.damage.is_none());
        assert_eq!(item.str_minimum, Value::Null);
    }

    #[test]
    fn null_names_read_as_empty() {
        let listing: ResourceList = serde_json::from_value(json!({
            "results": [{"name": null, "url": "/api/2014/equipment/x"}, {"name": "Torch", "url": "/api/2014/equipment/torch"}]
        }))
        .unwrap();
        assert_eq!(listing.results[0].name, "");
        assert_eq!(listing.results[1].name, "Torch");
        let item: Equipment = serde_json::from_value(json!({"name": null})).unwrap();
        assert_eq!(item.name, "");
    }

    #[test]
    fn null_category_falls_back_to_default() {
        let item: MagicItem = serde_json::from_value(json!({"name": "Orb", "equipment_category": null})).unwrap();
        assert_eq!(NamedReference::name_or(item.equipment_category.as_ref(), "Magic Item"), "Magic Item");
    }
}
