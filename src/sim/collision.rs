//! Collision predicates
//!
//! The world is axis-aligned rectangles, so detection reduces to two pure
//! predicates: a box-overlap test for pickups and a landing test for
//! platforms. Response (bounce forces, breaking) stays in the tick.

use glam::Vec2;

use super::state::{Platform, Player};

/// Overlap between two boxes given by top-left corner and size
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x + a_size.x > b_pos.x
        && a_pos.x < b_pos.x + b_size.x
        && a_pos.y + a_size.y > b_pos.y
        && a_pos.y < b_pos.y + b_size.y
}

/// Landing test for a falling player against one platform.
///
/// `prev_bottom` is the player's bottom edge before this tick's vertical
/// integration. A hit requires all of:
/// - the previous bottom was at or above the platform top (no landings from
///   below, no tunneling through)
/// - the new bottom is inside the platform's top band
/// - horizontal overlap
///
/// Only meaningful while falling; the caller gates on `vel_y > 0`.
pub fn lands_on(player: &Player, prev_bottom: f32, platform: &Platform, platform_height: f32) -> bool {
    let bottom = player.bottom();
    bottom >= platform.pos.y
        && bottom <= platform.pos.y + platform_height
        && player.pos.x + player.width > platform.pos.x
        && player.pos.x < platform.pos.x + platform.width
        && prev_bottom <= platform.pos.y
}
