//=========================================================================
// Portal
//=========================================================================
//
// Stateless trigger descriptors. Contact or interaction turns a portal
// into a `PortalTriggered` request for the room manager.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Face;
use crate::core::requests::PortalTriggered;

//=== Portal ==============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub target_room_index: isize,
    pub spawn_name: String,
    /// Overrides the target definition's requirement when non-blank.
    #[serde(default)]
    pub required_item: Option<String>,
    /// Fire on interaction instead of on contact.
    #[serde(default)]
    pub requires_interaction: bool,
    /// Interior face the portal sits against, if any.
    #[serde(default)]
    pub face: Option<Face>,
}

impl Portal {
    pub fn new(target_room_index: isize, spawn_name: impl Into<String>) -> Self {
        Self {
            target_room_index,
            spawn_name: spawn_name.into(),
            required_item: None,
            requires_interaction: false,
            face: None,
        }
    }

    pub fn with_required_item(mut self, item: impl Into<String>) -> Self {
        self.required_item = Some(item.into());
        self
    }

    pub fn with_interaction(mut self, requires_interaction: bool) -> Self {
        self.requires_interaction = requires_interaction;
        self
    }

    /// Player touched the trigger volume.
    pub fn on_contact(&self) -> Option<PortalTriggered> {
        (!self.requires_interaction).then(|| self.request())
    }

    /// Player pressed interact while inside the trigger volume.
    pub fn on_interact(&self) -> Option<PortalTriggered> {
        self.requires_interaction.then(|| self.request())
    }

    fn request(&self) -> PortalTriggered {
        PortalTriggered {
            target_index: self.target_room_index,
            spawn_name: self.spawn_name.clone(),
            required_item: self.required_item.clone(),
        }
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_portal_fires_on_contact_only() {
        let portal = Portal::new(2, "Spawn");
        let request = portal.on_contact().unwrap();
        assert_eq!(request.target_index, 2);
        assert_eq!(request.spawn_name, "Spawn");
        assert!(portal.on_interact().is_none());
    }

    #[test]
    fn interaction_portal_fires_on_interact_only() {
        let portal = Portal::new(1, "Door")
            .with_interaction(true)
            .with_required_item("lens");
        assert!(portal.on_contact().is_none());

        let request = portal.on_interact().unwrap();
        assert_eq!(request.required_item.as_deref(), Some("lens"));
    }
}
