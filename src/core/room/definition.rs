//=========================================================================
// Room Definition
//=========================================================================
//
// Immutable catalog entries the room manager instantiates from.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== GeometryHandle ======================================================

/// Opaque key the scene factory resolves into room geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometryHandle(pub String);

impl GeometryHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GeometryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//=== RoomDefinition ======================================================

/// One entry of the room catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDefinition {
    pub name: String,
    #[serde(default)]
    pub geometry: Option<GeometryHandle>,
    /// Item the player must hold to enter through a portal.
    #[serde(default)]
    pub required_item: Option<String>,
    #[serde(default)]
    pub music: Option<String>,
}

impl RoomDefinition {
    pub fn new(name: impl Into<String>, geometry: GeometryHandle) -> Self {
        Self {
            name: name.into(),
            geometry: Some(geometry),
            required_item: None,
            music: None,
        }
    }

    pub fn with_required_item(mut self, item: impl Into<String>) -> Self {
        self.required_item = Some(item.into());
        self
    }

    pub fn with_music(mut self, music: impl Into<String>) -> Self {
        self.music = Some(music.into());
        self
    }

    /// Required item, treating blank strings as no requirement.
    pub fn requirement(&self) -> Option<&str> {
        non_blank(self.required_item.as_deref())
    }
}

/// Filters out empty and whitespace-only strings.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_requirement_is_none() {
        let def = RoomDefinition::new("hall", GeometryHandle::new("hall"))
            .with_required_item("   ");
        assert_eq!(def.requirement(), None);
    }

    #[test]
    fn requirement_is_reported() {
        let def = RoomDefinition::new("vault", GeometryHandle::new("vault"))
            .with_required_item("brass_key");
        assert_eq!(def.requirement(), Some("brass_key"));
    }

    #[test]
    fn catalog_loads_from_json() {
        let json = r#"[
            { "name": "hall", "geometry": "hall_6x3x6" },
            { "name": "vault", "geometry": "vault", "required_item": "brass_key", "music": "drone" },
            { "name": "void" }
        ]"#;
        let catalog: Vec<RoomDefinition> = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].geometry, Some(GeometryHandle::new("hall_6x3x6")));
        assert_eq!(catalog[1].requirement(), Some("brass_key"));
        assert_eq!(catalog[1].music.as_deref(), Some("drone"));
        assert_eq!(catalog[2].geometry, None);
    }
}
