//! Input orchestration
//!
//! Turns pointer and resize events into circle spawning and the two
//! recurring tasks (spawn, update-and-render). Owns the circle collection,
//! the surface registry, and the simulation subscribed to it.
//!
//! All callbacks run one at a time on the host's event loop, so the shared
//! state needs no locking.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::SurfaceError;
use crate::schedule::{MAX_TASK_RUNS_PER_ADVANCE, RecurringTask};
use crate::settings::Settings;
use crate::sim::{Circle, Simulation};
use crate::surface::{SubscriberHandle, Surface, SurfaceRegistry, SurfaceSize};

/// Spawn task plus the pointer position captured when it started
#[derive(Debug, Clone)]
struct Spawner {
    task: RecurringTask,
    origin: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DueTask {
    Spawn,
    Render,
}

pub struct Playground<S: Surface> {
    registry: SurfaceRegistry<S>,
    simulation: Rc<RefCell<Simulation<S::Context>>>,
    circles: Vec<Circle>,
    settings: Settings,
    rng: Pcg32,
    /// Host time in milliseconds
    clock: f64,
    spawner: Option<Spawner>,
    render_task: Option<RecurringTask>,
}

impl<S: Surface> Playground<S> {
    /// Size the surface, bind a simulation to its render context, and
    /// subscribe the simulation to resizes.
    pub fn new(
        surface: S,
        width: u32,
        height: u32,
        mut settings: Settings,
        seed: u64,
    ) -> Result<Self, SurfaceError> {
        settings.sanitize();
        let mut registry = SurfaceRegistry::initialize(surface, width, height);
        let context = registry.render_context()?;
        let simulation = Rc::new(RefCell::new(Simulation::new(context, registry.size())));
        registry.register_subscriber(Rc::downgrade(&simulation) as SubscriberHandle)?;

        Ok(Self {
            registry,
            simulation,
            circles: Vec::new(),
            settings,
            rng: Pcg32::seed_from_u64(seed),
            clock: 0.0,
            spawner: None,
            render_task: None,
        })
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn size(&self) -> SurfaceSize {
        self.registry.size()
    }

    pub fn registry(&self) -> &SurfaceRegistry<S> {
        &self.registry
    }

    pub fn simulation(&self) -> &Rc<RefCell<Simulation<S::Context>>> {
        &self.simulation
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner.is_some()
    }

    pub fn is_rendering(&self) -> bool {
        self.render_task.is_some()
    }

    /// Start spawning at `(x, y)` and, if idle, the update-and-render loop.
    ///
    /// Returns `true` when this call started the render loop, so the host
    /// can switch its hint text to the inactive look.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.spawner = Some(Spawner {
            task: RecurringTask::start(self.clock, self.settings.spawn_interval_ms),
            origin: DVec2::new(x, y),
        });

        if self.render_task.is_some() {
            return false;
        }
        self.render_task = Some(RecurringTask::start(
            self.clock,
            self.settings.frame_interval_ms,
        ));
        log::info!("Render loop started");
        true
    }

    /// Stop spawning. The render loop keeps going unless
    /// `stop_render_on_release` is set.
    pub fn on_pointer_up(&mut self) {
        self.spawner = None;
        if self.settings.stop_render_on_release && self.render_task.take().is_some() {
            log::info!("Render loop stopped");
        }
    }

    pub fn on_surface_resize(&mut self, new_width: u32, new_height: u32) {
        self.registry.update_surface_size(new_width, new_height);
    }

    /// Advance the clock by `dt` milliseconds and run every task that falls
    /// due, earliest first. Returns the number of task runs.
    pub fn advance(&mut self, dt: f64) -> u32 {
        let dt = dt.min(self.settings.max_frame_ms).max(0.0);
        let target = self.clock + dt;

        let mut runs = 0;
        while let Some(task) = self.next_due(target) {
            if runs >= MAX_TASK_RUNS_PER_ADVANCE {
                log::debug!("Dropping missed task runs at t={:.1}ms", target);
                if let Some(spawner) = self.spawner.as_mut() {
                    spawner.task.skip_missed(target);
                }
                if let Some(render) = self.render_task.as_mut() {
                    render.skip_missed(target);
                }
                break;
            }
            match task {
                DueTask::Spawn => self.run_spawn(),
                DueTask::Render => self.run_render(),
            }
            runs += 1;
        }

        self.clock = target;
        runs
    }

    /// Spawn wins ties; it was scheduled first.
    fn next_due(&self, now: f64) -> Option<DueTask> {
        let spawn = self
            .spawner
            .as_ref()
            .map(|s| s.task.next_due())
            .filter(|&t| t <= now);
        let render = self
            .render_task
            .as_ref()
            .map(|t| t.next_due())
            .filter(|&t| t <= now);

        match (spawn, render) {
            (Some(s), Some(r)) if s <= r => Some(DueTask::Spawn),
            (_, Some(_)) => Some(DueTask::Render),
            (Some(_), None) => Some(DueTask::Spawn),
            (None, None) => None,
        }
    }

    fn run_spawn(&mut self) {
        let Some(spawner) = self.spawner.as_mut() else {
            return;
        };
        spawner.task.complete_run();
        let origin = spawner.origin;

        let dx = self.rng.random::<f64>() * self.settings.max_speed;
        let dy = self.rng.random::<f64>() * self.settings.max_speed;
        self.circles.push(Circle::new(
            self.settings.circle_radius,
            self.settings.fill_style.as_str(),
            origin.x,
            origin.y,
            dx,
            dy,
        ));
    }

    fn run_render(&mut self) {
        let Some(task) = self.render_task.as_mut() else {
            return;
        };
        task.complete_run();
        self.simulation.borrow_mut().frame(&mut self.circles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::tests::{DrawCall, FakeSurface};

    fn playground(settings: Settings) -> Playground<FakeSurface> {
        Playground::new(FakeSurface::default(), 800, 600, settings, 12345).unwrap()
    }

    fn still_settings() -> Settings {
        Settings {
            max_speed: 0.0,
            ..Default::default()
        }
    }

    fn run_for(pg: &mut Playground<FakeSurface>, ms: f64) {
        let steps = (ms / 100.0) as usize;
        for _ in 0..steps {
            pg.advance(100.0);
        }
    }

    #[test]
    fn test_new_subscribes_simulation() {
        let pg = playground(Settings::default());
        assert_eq!(pg.size(), SurfaceSize::new(800, 600));
        assert_eq!(pg.registry().subscriber_count(), 1);
        assert_eq!(pg.simulation().borrow().bounds(), SurfaceSize::new(800, 600));
        assert!(!pg.is_spawning());
        assert!(!pg.is_rendering());
    }

    #[test]
    fn test_new_without_context_fails() {
        let surface = FakeSurface {
            no_context: true,
            ..Default::default()
        };
        let result = Playground::new(surface, 800, 600, Settings::default(), 1);
        assert!(matches!(result, Err(SurfaceError::ContextUnavailable(_))));
    }

    #[test]
    fn test_render_loop_starts_once() {
        let mut pg = playground(Settings::default());
        assert!(pg.on_pointer_down(10.0, 10.0));
        pg.on_pointer_up();
        assert!(!pg.on_pointer_down(20.0, 20.0));
        assert!(pg.is_rendering());
    }

    #[test]
    fn test_hold_for_one_second_spawns_five_at_origin() {
        let mut pg = playground(still_settings());
        pg.on_pointer_down(120.0, 340.0);
        run_for(&mut pg, 1000.0);
        pg.on_pointer_up();

        assert_eq!(pg.circles().len(), 5);
        for c in pg.circles() {
            assert_eq!(c.pos, DVec2::new(120.0, 340.0));
            assert_eq!(c.radius, 20.0);
            assert_eq!(c.fill_style, "#E7E247");
        }
    }

    #[test]
    fn test_spawned_velocity_in_range() {
        let mut pg = playground(Settings::default());
        pg.on_pointer_down(400.0, 300.0);
        run_for(&mut pg, 2000.0);

        assert_eq!(pg.circles().len(), 10);
        for c in pg.circles() {
            assert!((0.0..5.0).contains(&c.vel.x.abs()));
            assert!((0.0..5.0).contains(&c.vel.y.abs()));
        }
    }

    #[test]
    fn test_pointer_up_stops_spawning_only() {
        let mut pg = playground(Settings::default());
        pg.on_pointer_down(400.0, 300.0);
        run_for(&mut pg, 400.0);
        pg.on_pointer_up();
        let before: Vec<DVec2> = pg.circles().iter().map(|c| c.pos).collect();

        run_for(&mut pg, 1000.0);

        assert_eq!(pg.circles().len(), 2);
        assert!(!pg.is_spawning());
        assert!(pg.is_rendering());
        let after: Vec<DVec2> = pg.circles().iter().map(|c| c.pos).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_stop_render_on_release() {
        let mut pg = playground(Settings {
            stop_render_on_release: true,
            ..Default::default()
        });
        pg.on_pointer_down(400.0, 300.0);
        run_for(&mut pg, 200.0);
        pg.on_pointer_up();
        assert!(!pg.is_rendering());
        assert_eq!(pg.advance(100.0), 0);

        // The next press restarts the loop
        assert!(pg.on_pointer_down(400.0, 300.0));
    }

    #[test]
    fn test_spawn_origin_fixed_per_press() {
        let mut pg = playground(still_settings());
        pg.on_pointer_down(50.0, 60.0);
        run_for(&mut pg, 200.0);
        pg.on_pointer_up();
        pg.on_pointer_down(500.0, 400.0);
        run_for(&mut pg, 200.0);

        let positions: Vec<DVec2> = pg.circles().iter().map(|c| c.pos).collect();
        assert_eq!(positions, vec![DVec2::new(50.0, 60.0), DVec2::new(500.0, 400.0)]);
    }

    #[test]
    fn test_resize_reaches_simulation() {
        let mut pg = playground(Settings::default());
        pg.on_surface_resize(1024, 768);

        assert_eq!(pg.size(), SurfaceSize::new(1024, 768));
        assert_eq!(pg.simulation().borrow().bounds(), SurfaceSize::new(1024, 768));

        pg.on_pointer_down(10.0, 10.0);
        pg.advance(5.0);
        let calls = pg.simulation().borrow().renderer().calls.borrow().clone();
        assert_eq!(
            calls.first(),
            Some(&DrawCall::Clear { x: 0.0, y: 0.0, width: 1024.0, height: 768.0 })
        );
    }

    #[test]
    fn test_frames_every_five_ms() {
        let mut pg = playground(Settings::default());
        pg.on_pointer_down(400.0, 300.0);
        assert_eq!(pg.advance(100.0), 20);
        let calls = pg.simulation().borrow().renderer().calls.borrow().clone();
        // No circle exists until the first spawn at 200ms
        assert_eq!(calls.len(), 20);
        assert!(calls.iter().all(|c| matches!(c, DrawCall::Clear { .. })));
    }

    #[test]
    fn test_spawn_runs_before_frame_on_tie() {
        let mut pg = playground(still_settings());
        pg.on_pointer_down(400.0, 300.0);
        run_for(&mut pg, 200.0);
        let calls = pg.simulation().borrow().renderer().calls.borrow().clone();
        // The frame at 200ms already draws the circle spawned at 200ms
        assert!(matches!(calls.last(), Some(DrawCall::Disc { .. })));
    }

    #[test]
    fn test_dt_clamped_to_max_frame() {
        let mut pg = playground(Settings::default());
        pg.on_pointer_down(400.0, 300.0);
        pg.advance(10_000.0);
        assert_eq!(pg.clock(), 100.0);
        assert!(pg.circles().is_empty());
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut pg = playground(Settings {
            max_frame_ms: 1_000_000.0,
            ..Default::default()
        });
        pg.on_pointer_down(400.0, 300.0);
        assert_eq!(pg.advance(10_000.0), MAX_TASK_RUNS_PER_ADVANCE);
        // Missed runs were dropped; the loop resumes on its grid
        assert_eq!(pg.advance(5.0), 1);
    }

    #[test]
    fn test_zero_frame_interval_keeps_loop_alive() {
        let mut pg = playground(Settings {
            frame_interval_ms: 0.0,
            spawn_interval_ms: -10.0,
            ..Default::default()
        });
        assert_eq!(pg.settings().frame_interval_ms, 5.0);
        assert_eq!(pg.settings().spawn_interval_ms, 200.0);

        pg.on_pointer_down(400.0, 300.0);
        assert_eq!(pg.advance(0.0), 0);
        assert_eq!(pg.advance(16.0), 3);
        assert_eq!(pg.advance(16.0), 3);
        assert!(pg.is_rendering());
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut pg = playground(Settings::default());
        pg.on_pointer_down(400.0, 300.0);
        assert_eq!(pg.advance(-50.0), 0);
        assert_eq!(pg.clock(), 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = playground(Settings::default());
        let mut b = playground(Settings::default());
        for pg in [&mut a, &mut b] {
            pg.on_pointer_down(300.0, 200.0);
            run_for(pg, 1000.0);
            pg.on_pointer_up();
            run_for(pg, 500.0);
        }
        assert_eq!(a.circles(), b.circles());
    }
}
