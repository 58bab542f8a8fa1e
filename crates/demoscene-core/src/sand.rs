//! Toy falling-sand simulation
//!
//! A few hundred sand grains fall under a coarse integer gravity, get
//! clamped to the field bounds, and bounce off a handful of static
//! obstacle blocks. Collision is a plain AABB overlap test per grain and
//! obstacle; grains do not collide with each other.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// The three sand tints grains are drawn in.
pub const SAND_PALETTE: [[u8; 4]; 3] = [
    [76, 70, 50, 255],
    [88, 66, 37, 255],
    [93, 80, 62, 255],
];

/// Obstacle blocks are plain white.
pub const OBSTACLE_COLOR: [u8; 4] = [255, 255, 255, 255];

const GRAIN_SIDE_MIN: i32 = 2;
const GRAIN_SIDE_MAX: i32 = 4;
const OBSTACLE_SIDE_MIN: i32 = 20;
const OBSTACLE_SIDE_MAX: i32 = 40;
const SPAWN_FALL_SPEED: i32 = 2;

/// Tunable parameters for the sand simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandParams {
    /// Grains spawned at startup
    pub grains: u32,
    /// Velocity added to every grain each gravity tick
    pub gravity: i32,
    /// Gravity applies once per this many simulation ticks
    pub gravity_interval: u32,
    /// Fraction of vertical velocity kept after a bounce
    pub bounce: f32,
    /// Obstacle blocks scattered over the field
    pub obstacles: u32,
    /// Sideways kick range applied on obstacle contact
    pub kick_min: i32,
    pub kick_max: i32,
    /// Simulation ticks per second
    pub tick_hz: u32,
}

impl Default for SandParams {
    fn default() -> Self {
        Self {
            grains: 300,
            gravity: 1,
            gravity_interval: 5,
            bounce: 0.5,
            obstacles: 5,
            kick_min: 2,
            kick_max: 5,
            tick_hz: 20,
        }
    }
}

/// A single sand grain: a small colored box with an integer velocity.
#[derive(Debug, Clone)]
pub struct Grain {
    pub rect: Rect,
    pub vel: IVec2,
    pub color: [u8; 4],
}

/// A static white block grains bounce off.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
}

/// The sand field: bounds, grains, and obstacles.
pub struct SandWorld {
    bounds: Rect,
    params: SandParams,
    grains: Vec<Grain>,
    obstacles: Vec<Obstacle>,
    gravity_step: u32,
    ticks: u64,
}

impl SandWorld {
    /// Spawn the initial grain curtain along the top of the field and
    /// scatter obstacle blocks over its middle band.
    pub fn new<R: Rng>(params: &SandParams, bounds: Rect, rng: &mut R) -> Self {
        let mut world = Self {
            bounds,
            params: params.clone(),
            grains: Vec::with_capacity(params.grains as usize),
            obstacles: Vec::with_capacity(params.obstacles as usize),
            gravity_step: 0,
            ticks: 0,
        };

        for i in 0..params.grains as i32 {
            let x = bounds.x + (i * 6) % bounds.w.max(1);
            let y = bounds.y + rng.gen_range(1..=15);
            let grain = world.make_grain(x, y, rng);
            world.grains.push(grain);
        }

        for _ in 0..params.obstacles {
            let w = rng.gen_range(OBSTACLE_SIDE_MIN..=OBSTACLE_SIDE_MAX);
            let h = rng.gen_range(OBSTACLE_SIDE_MIN..=OBSTACLE_SIDE_MAX);
            // Keep the blocks in the middle band so falling sand can reach
            // them and still stream past on either side.
            let x_lo = bounds.x + bounds.w / 5;
            let x_hi = (bounds.x + bounds.w * 4 / 5 - w).max(x_lo + 1);
            let y_lo = bounds.y + bounds.h / 3;
            let y_hi = (bounds.y + bounds.h * 2 / 3 - h).max(y_lo + 1);
            world.obstacles.push(Obstacle {
                rect: Rect::new(rng.gen_range(x_lo..x_hi), rng.gen_range(y_lo..y_hi), w, h),
            });
        }

        world
    }

    fn make_grain<R: Rng>(&self, x: i32, y: i32, rng: &mut R) -> Grain {
        let w = rng.gen_range(GRAIN_SIDE_MIN..=GRAIN_SIDE_MAX);
        let h = rng.gen_range(GRAIN_SIDE_MIN..=GRAIN_SIDE_MAX);
        let color = SAND_PALETTE[rng.gen_range(0..SAND_PALETTE.len())];
        let mut rect = Rect::new(x, y, w, h);
        clamp_into(&mut rect, &self.bounds);
        Grain {
            rect,
            vel: IVec2::new(0, SPAWN_FALL_SPEED),
            color,
        }
    }

    /// Advance the simulation by one tick.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        self.gravity_step += 1;
        let apply_gravity = self.gravity_step >= self.params.gravity_interval;

        for grain in &mut self.grains {
            if apply_gravity {
                grain.vel.y += self.params.gravity;
            }
            grain.rect.x += grain.vel.x;
            grain.rect.y += grain.vel.y;
            clamp_into(&mut grain.rect, &self.bounds);
        }

        if apply_gravity {
            self.gravity_step = 0;
        }

        for grain in &mut self.grains {
            for obstacle in &self.obstacles {
                if grain.rect.overlaps(&obstacle.rect) {
                    // Kick the grain sideways, away from the block, and
                    // reflect the fall with damping.
                    let kick = rng.gen_range(self.params.kick_min..=self.params.kick_max);
                    grain.vel.x = if grain.rect.x < obstacle.rect.x { -kick } else { kick };
                    grain.vel.y = -((grain.vel.y as f32 * self.params.bounce) as i32);
                }
            }
        }

        self.ticks += 1;
    }

    /// Pour extra grains around a point.
    pub fn spawn_at<R: Rng>(&mut self, x: i32, y: i32, count: u32, rng: &mut R) {
        for _ in 0..count {
            let jx = x + rng.gen_range(-4..=4);
            let jy = y + rng.gen_range(-4..=4);
            let grain = self.make_grain(jx, jy, rng);
            self.grains.push(grain);
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn grains(&self) -> &[Grain] {
        &self.grains
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn grain_count(&self) -> usize {
        self.grains.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Clamp a rectangle so it lies entirely inside `bounds`.
fn clamp_into(rect: &mut Rect, bounds: &Rect) {
    rect.x = rect.x.max(bounds.x);
    rect.y = rect.y.max(bounds.y);
    if rect.right() > bounds.right() {
        rect.x = bounds.right() - rect.w;
    }
    if rect.bottom() > bounds.bottom() {
        rect.y = bounds.bottom() - rect.h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn field() -> Rect {
        Rect::new(0, 0, 640, 480)
    }

    #[test]
    fn test_spawn_layout() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let params = SandParams::default();
        let world = SandWorld::new(&params, field(), &mut rng);

        assert_eq!(world.grain_count(), params.grains as usize);
        assert_eq!(world.obstacles().len(), params.obstacles as usize);

        for (i, grain) in world.grains().iter().enumerate() {
            // Grains start near the top, marching across in steps of 6.
            assert!(grain.rect.y <= 15, "grain {i} spawned too low");
            assert_eq!(grain.vel, IVec2::new(0, SPAWN_FALL_SPEED));
            assert!((GRAIN_SIDE_MIN..=GRAIN_SIDE_MAX).contains(&grain.rect.w));
            assert!((GRAIN_SIDE_MIN..=GRAIN_SIDE_MAX).contains(&grain.rect.h));
            assert!(SAND_PALETTE.contains(&grain.color));
        }
    }

    #[test]
    fn test_obstacles_sit_in_middle_band() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(2);
        let bounds = field();
        let world = SandWorld::new(&SandParams::default(), bounds, &mut rng);

        for obstacle in world.obstacles() {
            assert!(bounds.contains(&obstacle.rect));
            assert!(obstacle.rect.x >= bounds.w / 5);
            assert!(obstacle.rect.y >= bounds.h / 3);
        }
    }

    #[test]
    fn test_gravity_applies_on_interval() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let params = SandParams {
            grains: 1,
            obstacles: 0,
            ..SandParams::default()
        };
        let mut world = SandWorld::new(&params, field(), &mut rng);

        let vy0 = world.grains()[0].vel.y;
        for _ in 0..params.gravity_interval - 1 {
            world.step(&mut rng);
        }
        assert_eq!(world.grains()[0].vel.y, vy0, "gravity applied early");

        world.step(&mut rng);
        assert_eq!(world.grains()[0].vel.y, vy0 + params.gravity);
    }

    #[test]
    fn test_grains_stay_in_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        let bounds = field();
        let mut world = SandWorld::new(&SandParams::default(), bounds, &mut rng);

        for _ in 0..500 {
            world.step(&mut rng);
            for grain in world.grains() {
                assert!(bounds.contains(&grain.rect), "grain escaped: {:?}", grain.rect);
            }
        }
    }

    #[test]
    fn test_grains_settle_on_floor() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let bounds = field();
        let params = SandParams {
            obstacles: 0,
            ..SandParams::default()
        };
        let mut world = SandWorld::new(&params, bounds, &mut rng);

        for _ in 0..2000 {
            world.step(&mut rng);
        }
        for grain in world.grains() {
            assert_eq!(grain.rect.bottom(), bounds.bottom());
        }
    }

    #[test]
    fn test_bounce_reflects_and_damps() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(6);
        let params = SandParams {
            grains: 0,
            obstacles: 0,
            ..SandParams::default()
        };
        let mut world = SandWorld::new(&params, field(), &mut rng);

        // Plant one obstacle and drop one grain straight onto it.
        world.obstacles.push(Obstacle {
            rect: Rect::new(300, 200, 40, 40),
        });
        world.grains.push(Grain {
            rect: Rect::new(310, 196, 3, 3),
            vel: IVec2::new(0, 8),
            color: SAND_PALETTE[0],
        });

        world.step(&mut rng);

        let grain = &world.grains()[0];
        // Fell into the block, so the bounce sends it back up at half
        // speed and kicks it sideways.
        assert_eq!(grain.vel.y, -4);
        assert!(grain.vel.x != 0);
        assert!((params.kick_min..=params.kick_max).contains(&grain.vel.x.abs()));
    }

    #[test]
    fn test_kick_direction_points_away_from_obstacle() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let params = SandParams {
            grains: 0,
            obstacles: 0,
            ..SandParams::default()
        };
        let mut world = SandWorld::new(&params, field(), &mut rng);

        world.obstacles.push(Obstacle {
            rect: Rect::new(300, 200, 40, 40),
        });
        // Grain left of the block's origin, overlapping its left edge.
        world.grains.push(Grain {
            rect: Rect::new(298, 210, 4, 4),
            vel: IVec2::new(0, 0),
            color: SAND_PALETTE[0],
        });
        // Grain to the right of the block's origin.
        world.grains.push(Grain {
            rect: Rect::new(330, 210, 4, 4),
            vel: IVec2::new(0, 0),
            color: SAND_PALETTE[1],
        });

        world.step(&mut rng);

        assert!(world.grains()[0].vel.x < 0, "left grain should kick left");
        assert!(world.grains()[1].vel.x > 0, "right grain should kick right");
    }

    #[test]
    fn test_obstacles_never_move() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(8);
        let mut world = SandWorld::new(&SandParams::default(), field(), &mut rng);
        let before: Vec<Rect> = world.obstacles().iter().map(|o| o.rect).collect();

        for _ in 0..200 {
            world.step(&mut rng);
        }
        let after: Vec<Rect> = world.obstacles().iter().map(|o| o.rect).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_spawn_at_adds_grains_in_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        let bounds = field();
        let mut world = SandWorld::new(&SandParams::default(), bounds, &mut rng);
        let before = world.grain_count();

        world.spawn_at(320, 240, 10, &mut rng);
        assert_eq!(world.grain_count(), before + 10);

        // Pouring outside the field still yields clamped, in-bounds grains.
        world.spawn_at(-100, 9999, 5, &mut rng);
        for grain in world.grains() {
            assert!(bounds.contains(&grain.rect));
        }
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let params = SandParams::default();
        let run = |seed: u64| {
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
            let mut world = SandWorld::new(&params, field(), &mut rng);
            for _ in 0..100 {
                world.step(&mut rng);
            }
            world
                .grains()
                .iter()
                .map(|g| (g.rect, g.vel))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}
