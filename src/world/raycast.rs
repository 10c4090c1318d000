use glam::{IVec3, Vec3};

use crate::core::aabb::AABB;
use crate::core::coords;

const EPSILON: f32 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub voxel: IVec3,
    /// Outward normal of the face the ray entered through.
    pub normal: IVec3,
    pub distance: f32,
}

impl RayHit {
    /// Empty cell in front of the hit face, where a placed voxel goes.
    pub fn adjacent(&self) -> IVec3 {
        self.voxel + self.normal
    }
}

fn step_sign(d: f32) -> i32 {
    if d > EPSILON {
        1
    } else if d < -EPSILON {
        -1
    } else {
        0
    }
}

/// Walks voxel by voxel from `start` toward `end`. At each step the three
/// boxes adjacent in the ray's sign direction are slab-tested and the one
/// entered first becomes the current voxel. The voxel containing `start` is
/// never reported.
pub fn world_ray_detection(
    start: Vec3,
    end: Vec3,
    mut is_solid: impl FnMut(IVec3) -> bool,
) -> Option<RayHit> {
    let delta = end - start;
    let length = delta.length();
    if !length.is_finite() || length < EPSILON {
        return None;
    }
    let dir = delta / length;
    let step = IVec3::new(step_sign(dir.x), step_sign(dir.y), step_sign(dir.z));

    let mut voxel = coords::voxel_at(start);
    let mut travelled = 0.0f32;
    // The cast saturates, so very long rays cap the step count instead of overflowing
    let max_steps = (length.ceil() as usize).saturating_add(2).saturating_mul(3);

    for _ in 0..max_steps {
        let mut best: Option<(IVec3, f32, IVec3)> = None;
        for axis in 0..3 {
            if step[axis] == 0 {
                continue;
            }
            let mut candidate = voxel;
            candidate[axis] += step[axis];
            let Some(entry) = AABB::voxel(candidate).ray_intersection(start, dir) else {
                continue;
            };
            if entry.t_exit <= travelled {
                continue;
            }
            if best.is_none_or(|(_, t, _)| entry.t_entry < t) {
                best = Some((candidate, entry.t_entry, entry.normal));
            }
        }

        let (next, t_entry, normal) = best?;
        if t_entry > length {
            return None;
        }
        voxel = next;
        travelled = travelled.max(t_entry);
        if is_solid(voxel) {
            return Some(RayHit {
                voxel,
                normal,
                distance: travelled,
            });
        }
    }

    None
}
