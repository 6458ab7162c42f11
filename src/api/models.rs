//! Wire-format types for the remote Pokémon REST API.
//!
//! These structs mirror the JSON shapes returned by the index, base-data,
//! species, and evolution-chain endpoints. They are deserialization targets
//! only; nothing here is retained past aggregation into
//! [`crate::aggregate::CombinedPokemon`].
//!
//! Fields the aggregation layer does not consume are deliberately omitted -
//! serde ignores unknown keys by default, so the structs stay small even
//! though the remote payloads are large.

use serde::Deserialize;

/// A `{name, url}` reference as used throughout the remote API.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    /// Resource name (species name, type name, stat name, ...)
    pub name: String,
}

/// A bare `{url}` reference to another API resource.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ResourceRef {
    /// Absolute URL of the referenced resource
    pub url: String,
}

/// Response of the index/listing endpoint (`/pokemon?limit=N`).
#[derive(Debug, Clone, Deserialize)]
pub struct IndexResponse {
    /// Total number of entities known to the API
    pub count: u32,
    /// The listed entries, up to the requested limit
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// Sprite URLs attached to a base record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    /// Default front-facing sprite, if the entity has one
    pub front_default: Option<String>,
}

/// One ability slot of a base record.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    /// The referenced ability
    pub ability: NamedResource,
    /// Whether this is a hidden ability
    #[serde(default)]
    pub is_hidden: bool,
}

/// One type slot of a base record.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    /// The referenced type
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

/// One stat slot of a base record.
#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    /// Base value of the stat
    pub base_stat: u32,
    /// The referenced stat (hp, attack, defense, speed, ...)
    pub stat: NamedResource,
}

/// Unprocessed response of the base-data endpoint (`/pokemon/{id|name}`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawPokemon {
    /// Stable entity identifier
    pub id: u32,
    /// Species/form name
    pub name: String,
    /// Height in decimeters
    pub height: Option<u32>,
    /// Weight in hectograms
    pub weight: Option<u32>,
    /// Sprite URLs
    #[serde(default)]
    pub sprites: Sprites,
    /// Ability slots with hidden flags
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    /// Type slots, slot order as returned by the API
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    /// Stat slots, order as returned by the API
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

/// One flavor-text entry, tagged with language and game version.
#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    /// The localized descriptive string (may contain control characters)
    pub flavor_text: String,
    /// Language this entry is written in
    pub language: NamedResource,
    /// Game version the entry is sourced from
    pub version: Option<NamedResource>,
}

/// Unprocessed response of the species endpoint (`/pokemon-species/{id}`).
#[derive(Debug, Clone, Deserialize)]
pub struct Species {
    /// Flavor-text entries across languages and versions
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    /// Reference to this species' evolution chain resource
    pub evolution_chain: Option<ResourceRef>,
    /// Legendary classification flag
    #[serde(default)]
    pub is_legendary: bool,
    /// Mythical classification flag
    #[serde(default)]
    pub is_mythical: bool,
    /// Baby classification flag
    #[serde(default)]
    pub is_baby: bool,
    /// Generation this species was introduced in
    pub generation: Option<NamedResource>,
}

/// One node of the tree-shaped evolution graph.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    /// Species at this stage
    pub species: NamedResource,
    /// Next evolution stages, in source order
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// The evolution-chain resource: a recursive tree of species names.
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChainResource {
    /// Root of the tree (the base form)
    pub chain: ChainLink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_base_record_ignoring_unknown_fields() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "base_experience": 112,
            "sprites": {"front_default": "https://img.example/25.png", "back_default": null},
            "abilities": [
                {"ability": {"name": "static", "url": "u"}, "is_hidden": false, "slot": 1},
                {"ability": {"name": "lightning-rod", "url": "u"}, "is_hidden": true, "slot": 3}
            ],
            "types": [{"slot": 1, "type": {"name": "electric", "url": "u"}}],
            "stats": [
                {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}},
                {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "u"}}
            ]
        }"#;

        let raw: RawPokemon = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id, 25);
        assert_eq!(raw.name, "pikachu");
        assert_eq!(raw.height, Some(4));
        assert_eq!(raw.types[0].type_.name, "electric");
        assert!(raw.abilities[1].is_hidden);
        assert_eq!(raw.stats[1].base_stat, 90);
    }

    #[test]
    fn deserializes_species_with_missing_optional_fields() {
        let json = r#"{
            "flavor_text_entries": [],
            "evolution_chain": null,
            "is_legendary": true
        }"#;

        let species: Species = serde_json::from_str(json).unwrap();
        assert!(species.is_legendary);
        assert!(!species.is_mythical);
        assert!(species.evolution_chain.is_none());
        assert!(species.generation.is_none());
    }

    #[test]
    fn deserializes_recursive_chain() {
        let json = r#"{
            "chain": {
                "species": {"name": "charmander", "url": "u"},
                "evolves_to": [{
                    "species": {"name": "charmeleon", "url": "u"},
                    "evolves_to": [{
                        "species": {"name": "charizard", "url": "u"},
                        "evolves_to": []
                    }]
                }]
            }
        }"#;

        let resource: EvolutionChainResource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.chain.species.name, "charmander");
        assert_eq!(resource.chain.evolves_to[0].evolves_to[0].species.name, "charizard");
    }
}
