//! Idle/demo mode driver
//!
//! Looks a short way up the road and nudges the car one lane at a time:
//! away from obstacles in its own lane, otherwise toward the nearest pickup.

use super::state::{GameState, LaneChange};
use crate::consts::{LANE_COUNT, PLAYER_DEPTH, PLAYER_Z};

/// How far ahead of the car the autopilot looks (world units)
pub const LOOKAHEAD: f32 = 14.0;

/// Per-lane view of what is coming
#[derive(Debug, Clone, Copy, Default)]
struct LaneOutlook {
    /// Distance to the nearest obstacle ahead
    obstacle: Option<f32>,
    /// Distance to the nearest pickup ahead
    pickup: Option<f32>,
}

fn nearest(current: Option<f32>, candidate: f32) -> Option<f32> {
    Some(current.map_or(candidate, |c| c.min(candidate)))
}

fn survey(state: &GameState) -> [LaneOutlook; LANE_COUNT as usize] {
    let mut lanes = [LaneOutlook::default(); LANE_COUNT as usize];
    // Anything whose front edge hasn't passed the car's back edge is still a concern
    let behind = PLAYER_Z - PLAYER_DEPTH;
    for entity in state.entities.iter().filter(|e| !e.consumed) {
        let Some(lane) = entity.lane else { continue };
        let ahead = entity.pos.z - PLAYER_Z;
        if entity.pos.z < behind || ahead > LOOKAHEAD {
            continue;
        }
        let outlook = &mut lanes[lane as usize];
        let ahead = ahead.max(0.0);
        if entity.kind.is_obstacle() {
            outlook.obstacle = nearest(outlook.obstacle, ahead);
        } else if entity.kind.is_pickup() {
            outlook.pickup = nearest(outlook.pickup, ahead);
        }
    }
    lanes
}

/// Pick a lane change for this tick, or `None` to hold the lane
pub fn choose_lane_change(state: &GameState) -> Option<LaneChange> {
    let lanes = survey(state);
    let current = state.player.lane;
    let shielded = state.player.shield_active();

    let neighbours = [LaneChange::Left, LaneChange::Right]
        .into_iter()
        .filter_map(|change| change.apply(current).map(|lane| (change, lane)));

    if lanes[current as usize].obstacle.is_some() && !shielded {
        // Dodge toward whichever neighbour is clear furthest ahead
        return neighbours
            .max_by(|(_, a), (_, b)| {
                let clear = |lane: u8| lanes[lane as usize].obstacle.unwrap_or(f32::INFINITY);
                clear(*a).total_cmp(&clear(*b))
            })
            .map(|(change, _)| change);
    }

    if lanes[current as usize].pickup.is_some() {
        return None;
    }

    neighbours
        .filter(|(_, lane)| shielded || lanes[*lane as usize].obstacle.is_none())
        .filter_map(|(change, lane)| lanes[lane as usize].pickup.map(|d| (change, d)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(change, _)| change)
}
