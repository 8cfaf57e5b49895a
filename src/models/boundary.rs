//! GeoJSON document shapes on both sides of the mapping.

use serde::{Deserialize, Serialize};

/// Geometry as delivered by the provider.
///
/// Kept as raw JSON and written back exactly as read, including `bbox`,
/// `geometries` or a `null` geometry. Only the `type` member is inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Geometry(pub serde_json::Value);

impl Geometry {
    /// GeoJSON `type` member, if the geometry is an object carrying one
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(serde_json::Value::as_str)
    }

    /// Whether this is an areal geometry an admin boundary is expected to have
    pub fn is_areal(&self) -> bool {
        matches!(self.kind(), Some("Polygon" | "MultiPolygon"))
    }
}

/// Feature properties as returned by osm-boundaries.com.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceProperties {
    /// OSM relation ID, negative for boundary relations
    pub osm_id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub boundary: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub admin_level: u8,

    /// Comma separated raw IDs of every enclosing boundary
    #[serde(default, deserialize_with = "null_as_default")]
    pub parents: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub local_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name_en: String,
}

impl SourceProperties {
    /// Raw ID as text, the form used in other features' `parents`
    pub fn raw_id(&self) -> String {
        self.osm_id.to_string()
    }

    /// Parent IDs in the order the provider listed them
    pub fn parent_ids(&self) -> Vec<&str> {
        self.parents.split(',').collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFeature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Geometry,
    pub properties: SourceProperties,
}

/// A FeatureCollection fetched for a single admin level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<SourceFeature>,
}

impl SourceDocument {
    /// Raw IDs of every feature, in document order
    pub fn raw_ids(&self) -> Vec<String> {
        self.features.iter().map(|f| f.properties.raw_id()).collect()
    }
}

/// Properties the platform's location importer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProperties {
    /// Platform-form ID (`R123`)
    pub osm_id: String,
    pub name: String,
    pub name_en: String,
    /// Platform-form country ID, or `"None"`
    pub is_in_country: String,
    /// Platform-form state ID, or `"None"`
    pub is_in_state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: TargetProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<TargetFeature>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_feature() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "MultiPolygon", "coordinates": [[[[0,0],[1,0],[1,1],[0,0]]]]},
                "properties": {
                    "osm_id": -192830,
                    "boundary": "administrative",
                    "admin_level": 4,
                    "parents": "-192796,-3247585",
                    "name": "Nairobi",
                    "local_name": "Nairobi",
                    "name_en": null
                }
            }]
        }"#;

        let doc: SourceDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.features.len(), 1);

        let props = &doc.features[0].properties;
        assert_eq!(props.raw_id(), "-192830");
        assert_eq!(props.admin_level, 4);
        assert_eq!(props.name_en, "");
        assert_eq!(props.parent_ids(), vec!["-192796", "-3247585"]);
        assert!(doc.features[0].geometry.is_areal());
    }

    #[test]
    fn test_missing_parents_yields_single_empty_entry() {
        let props = SourceProperties {
            osm_id: -1,
            ..Default::default()
        };
        assert_eq!(props.parent_ids(), vec![""]);
    }

    #[test]
    fn test_target_field_order() {
        let feature = TargetFeature {
            kind: "Feature".to_string(),
            properties: TargetProperties {
                osm_id: "R1".to_string(),
                name: "a".to_string(),
                name_en: "b".to_string(),
                is_in_country: "None".to_string(),
                is_in_state: "None".to_string(),
            },
            geometry: Geometry(serde_json::json!({"type": "Polygon", "coordinates": []})),
        };

        let out = serde_json::to_string(&feature).unwrap();
        let props_at = out.find("\"properties\"").unwrap();
        let geom_at = out.find("\"geometry\"").unwrap();
        assert!(out.starts_with("{\"type\":\"Feature\""));
        assert!(props_at < geom_at);
    }

    #[test]
    fn test_geometry_members_survive_round_trip() {
        let json = r#"{"type":"Feature","geometry":{"type":"Polygon","bbox":[0,0,1,1],"coordinates":[[[0,0],[1,0],[1,1],[0,0]]]},"properties":{"osm_id":-1}}"#;
        let feature: SourceFeature = serde_json::from_str(json).unwrap();

        let out = serde_json::to_value(&feature.geometry).unwrap();
        assert_eq!(out["bbox"], serde_json::json!([0, 0, 1, 1]));
        assert_eq!(feature.geometry.kind(), Some("Polygon"));
        assert!(feature.geometry.is_areal());
    }

    #[test]
    fn test_geometry_collection_decodes() {
        let json = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[1,2]}]},"properties":{"osm_id":-2}}]}"#;
        let doc: SourceDocument = serde_json::from_str(json).unwrap();

        let geometry = &doc.features[0].geometry;
        assert_eq!(geometry.kind(), Some("GeometryCollection"));
        assert!(!geometry.is_areal());
        assert_eq!(geometry.0["geometries"][0]["type"], "Point");
    }

    #[test]
    fn test_null_and_missing_geometry_decode() {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":null,"properties":{"osm_id":-3}},
            {"type":"Feature","properties":{"osm_id":-4}}
        ]}"#;
        let doc: SourceDocument = serde_json::from_str(json).unwrap();

        for feature in &doc.features {
            assert!(feature.geometry.0.is_null());
            assert_eq!(feature.geometry.kind(), None);
            assert!(!feature.geometry.is_areal());
        }
        let out = serde_json::to_string(&doc.features[0].geometry).unwrap();
        assert_eq!(out, "null");
    }
}
