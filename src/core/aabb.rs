use glam::{IVec3, Vec3};

const EPSILON: f32 = 1e-5;

/// Entry and exit parameters of a ray crossing a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayEntry {
    pub t_entry: f32,
    pub t_exit: f32,
    /// Outward normal of the face the ray enters through.
    pub normal: IVec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        AABB { min, max }
    }

    /// Unit box occupied by a voxel.
    pub fn voxel(pos: IVec3) -> Self {
        let min = pos.as_vec3();
        AABB::new(min, min + Vec3::ONE)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test against a ray `origin + t * dir`.
    pub fn ray_intersection(&self, origin: Vec3, dir: Vec3) -> Option<RayEntry> {
        let mut t_entry = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = IVec3::ZERO;

        for axis in 0..3 {
            let (o, d) = (origin[axis], dir[axis]);
            let (min, max) = (self.min[axis], self.max[axis]);

            if d.abs() < EPSILON {
                if o < min || o > max {
                    return None;
                }
                continue;
            }

            let t1 = (min - o) / d;
            let t2 = (max - o) / d;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

            if near > t_entry {
                t_entry = near;
                normal = IVec3::ZERO;
                normal[axis] = if d > 0.0 { -1 } else { 1 };
            }
            t_exit = t_exit.min(far);
        }

        if t_entry > t_exit || t_exit < 0.0 {
            return None;
        }
        Some(RayEntry {
            t_entry,
            t_exit,
            normal,
        })
    }
}
