//! Discrete overlap tests.
//!
//! Both tests are pure: they read body state and return contact geometry
//! without touching the bodies. Tunneling is prevented by the world's substep
//! count, not here.

use crate::arena::BodyHandle;
use crate::body::Body;
use crate::types::{constants, Contact, Segment, Vec2};

/// Test two circles for overlap.
///
/// The normal points from `a` toward `b`. Touching circles (distance equal
/// to the radius sum) count as a contact with zero penetration.
pub fn circle_vs_circle(
    handle_a: BodyHandle,
    a: &Body,
    handle_b: BodyHandle,
    b: &Body,
) -> Option<Contact> {
    let ab = b.position - a.position;
    let distance = ab.magnitude();
    let min_dist = a.radius + b.radius;

    if distance > min_dist {
        return None;
    }

    let normal = if distance > 0.0 {
        ab / distance
    } else {
        constants::COINCIDENT_CIRCLE_NORMAL
    };

    Some(Contact {
        normal,
        penetration: min_dist - distance,
        point: a.position + normal * a.radius,
        body_a: handle_a,
        body_b: Some(handle_b),
    })
}

/// Test a circle against a static segment.
///
/// The normal points from the segment toward the circle center, i.e. the
/// direction the body must move to separate.
pub fn circle_vs_segment(handle: BodyHandle, body: &Body, segment: &Segment) -> Option<Contact> {
    let closest = segment.closest_point(body.position);
    let to_center = body.position - closest;
    let distance = to_center.magnitude();

    if distance > body.radius {
        return None;
    }

    let normal = if distance > 0.0 {
        to_center / distance
    } else {
        constants::ON_SEGMENT_NORMAL
    };

    Some(Contact {
        normal,
        penetration: body.radius - distance,
        point: body.position - normal * body.radius,
        body_a: handle,
        body_b: None,
    })
}

/// Convenience wrapper for a segment given by its endpoints.
pub fn circle_vs_line(handle: BodyHandle, body: &Body, p1: Vec2, p2: Vec2) -> Option<Contact> {
    circle_vs_segment(handle, body, &Segment::new(p1, p2))
}

// =============================================================================
// Tests
// =============================================================================
