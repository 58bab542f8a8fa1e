//! Falling sand over obstacle blocks

use demoscene_core::canvas::{self, Canvas};
use demoscene_core::config::DemoConfig;
use demoscene_core::geometry::Rect;
use demoscene_core::sand::{SandWorld, OBSTACLE_COLOR};
use demoscene_core::timing::FrameTimer;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use super::Demo;

/// Grains poured per tick while the pointer is held down.
const POUR_RATE: u32 = 3;

pub struct SandDemo {
    world: SandWorld,
    timer: FrameTimer,
    rng: Xoshiro256StarStar,
    tick_hz: u32,
    pointer: Option<(i32, i32)>,
    pouring: bool,
}

impl SandDemo {
    pub fn new(config: &DemoConfig, seed: u64) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let bounds = Rect::new(0, 0, config.canvas_width as i32, config.canvas_height as i32);
        let world = SandWorld::new(&config.sand, bounds, &mut rng);

        Self {
            world,
            timer: FrameTimer::new(config.sand.tick_hz),
            rng,
            tick_hz: config.sand.tick_hz,
            pointer: None,
            pouring: false,
        }
    }
}

impl Demo for SandDemo {
    fn name(&self) -> &'static str {
        "sand"
    }

    fn frame_rate(&self) -> u32 {
        self.tick_hz
    }

    fn advance(&mut self) {
        if self.pouring {
            if let Some((x, y)) = self.pointer {
                self.world.spawn_at(x, y, POUR_RATE, &mut self.rng);
            }
        }
        self.world.step(&mut self.rng);
    }

    fn update(&mut self) {
        if self.timer.tick() {
            self.advance();
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.clear(canvas::BLACK);
        for obstacle in self.world.obstacles() {
            canvas.fill_rect(obstacle.rect, OBSTACLE_COLOR);
        }
        for grain in self.world.grains() {
            canvas.fill_rect(grain.rect, grain.color);
        }
    }

    fn pointer(&mut self, x: i32, y: i32, pressed: bool) {
        self.pointer = Some((x, y));
        self.pouring = pressed;
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("grains", self.world.grain_count().to_string()),
            ("ticks", self.world.ticks().to_string()),
        ]
    }
}
