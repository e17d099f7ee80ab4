//! Force accumulation, contact resolution and integration
//!
//! Forces are computed from the previous tick's positions, then both
//! bodies advance by semi-implicit Euler (velocity first, then position).
//! Contacts are penalty forces proportional to penetration depth, not
//! impulses.

use glam::Vec2;

use super::state::SimState;
use crate::consts::*;

/// Advance player and pendulum by one step, then check the respawn bounds
pub fn step(state: &mut SimState, dt: f32) {
    // Spring-damper tension along the player->pendulum axis. The axis is
    // left unnormalized when the bodies nearly coincide.
    let delta = state.pendulum.position - state.player.position;
    let distance = delta.length();
    let (axis, tension) = if distance > SPRING_MIN_LENGTH {
        let axis = delta / distance;
        let relative = state.player.velocity - state.pendulum.velocity;
        let stretch_rate = (state.player.position - state.pendulum.position).dot(relative) / distance;
        let tension = state.spring.stiffness * (distance - state.spring.rest_length)
            + state.spring.damping * stretch_rate;
        (axis, tension)
    } else {
        (delta, state.spring.stiffness * (distance - state.spring.rest_length))
    };

    // Player: thrust at the wingtips, wingtip floor penalties, gravity,
    // spring. Torque comes from the motor imbalance alone.
    {
        let player = &state.player;
        let tangent = player.tangent();
        let normal = player.normal();
        let l_magnitude = player.voltage_to_force(player.l_motor);
        let r_magnitude = player.voltage_to_force(player.r_motor);
        let mut l_force = l_magnitude * normal;
        let mut r_force = r_magnitude * normal;

        let right_tip_y = player.position.y + player.arm * tangent.y;
        if right_tip_y < state.world.floor_level {
            r_force.y += WING_CONTACT_STIFFNESS * (state.world.floor_level - right_tip_y);
        }
        let left_tip_y = player.position.y - player.arm * tangent.y;
        if left_tip_y < state.world.floor_level {
            l_force.y += WING_CONTACT_STIFFNESS * (state.world.floor_level - left_tip_y);
        }

        let spring_force = tension * axis;
        let gravity = Vec2::new(0.0, -player.mass * state.world.g);
        let total = l_force + r_force + spring_force + gravity;

        let player = &mut state.player;
        player.velocity += total / player.mass * dt;
        player.position += player.velocity * dt;

        let angular_accel = player.arm * (r_magnitude - l_magnitude) / player.inertia;
        player.angular_velocity += angular_accel * dt;
        player.theta += player.angular_velocity * dt;
    }

    // Pendulum: spring reaction, gravity, floor / roomba-top penalty,
    // quadratic drag against the player-relative velocity.
    {
        let spring_force = tension * -axis;
        let gravity = Vec2::new(0.0, -state.pendulum.mass * state.world.g);

        // Floor first, then the roomba body top; the later, deeper platform
        // contact overrides the floor when both apply.
        let mut contact = Vec2::ZERO;
        if state.pendulum.position.y < state.world.floor_level {
            contact.y = CONTACT_STIFFNESS * (state.world.floor_level - state.pendulum.position.y);
        }
        let roomba_top = state.world.floor_level + state.roomba.body_top;
        if (state.pendulum.position.x - state.roomba.x).abs() < state.roomba.radius
            && state.pendulum.position.y < roomba_top
        {
            contact.y = CONTACT_STIFFNESS * (roomba_top - state.pendulum.position.y);
        }

        let relative = state.pendulum.velocity - state.player.velocity;
        let drag = -PENDULUM_DRAG * relative * relative.length();

        let total = spring_force + gravity + contact + drag;
        let pendulum = &mut state.pendulum;
        pendulum.velocity += total / pendulum.mass * dt;
        pendulum.position += pendulum.velocity * dt;
    }

    // Soft respawn when the player leaves the arena rectangle
    let position = state.player.position;
    if position.x > state.world.green_line + BOUNDS_MARGIN
        || position.x < state.world.red_line - BOUNDS_MARGIN
        || position.y < state.world.floor_level - BOUNDS_MARGIN
        || position.y > BOUNDS_CEILING
    {
        log::debug!("player out of bounds at {position:?}; respawning");
        state.respawn_bodies();
    }
}

/// Relax the roomba heading toward its target and advance the patrol
pub fn step_roomba(state: &mut SimState, dt: f32) {
    let roomba = &mut state.roomba;
    roomba.direction += ROOMBA_TURN_RATE * (roomba.target_direction - roomba.direction) * dt;
    roomba.x += roomba.direction * roomba.speed * dt;
}
