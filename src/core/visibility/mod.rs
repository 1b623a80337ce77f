//=========================================================================
// Wall Visibility
//=========================================================================
//
// Decides how visible each wall of the current room should be and fades
// it there.
//
// Architecture:
//   WallVisibilityController (policy, per tick)
//        │ set_fade_target()
//        ↓
//   WallVisual (one per wall, smoothing) ──> WallRenderer
//
//=========================================================================

//=== Module Declarations =================================================

mod controller;
mod wall_visual;

//=== Public API ==========================================================

pub use controller::WallVisibilityController;
pub use wall_visual::WallVisual;

use serde::{Deserialize, Serialize};

//=== ViewMode ============================================================

/// Camera mode the visibility policy follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// First-person inside the room. Walls fade by viewing angle.
    #[default]
    Inside,
    /// Orbiting outside the cube. Interior walls hide.
    Inspect,
}
