//! Combat engine constants - the contract surface in one place

/// Cap on individual cannon-phase actions before an encounter is abandoned
pub const MAX_CANNON_ACTIONS: usize = 100;

/// Accuracy tier at or above which hits actually resolve into damage
pub const RESOLVED_ACCURACY: i32 = 5;

/// Lowest meaningful accuracy band; bands shifted below this are dropped
pub const MIN_ACCURACY_BAND: i32 = 1;

/// Faces on a normal weapon die; the top face rolls unconditional hits
pub const NORMAL_DIE_FACES: i32 = 6;
