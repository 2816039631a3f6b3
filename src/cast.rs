//! Registry of the walkers sharing one viewport.
//!
//! The cast owns every walker by [`WalkerId`], processes them in a fixed
//! order and resolves collaboration targets by id, borrowing the two walkers
//! of a dyad disjointly for the duration of one tick.

use glam::DVec2;
use hashbrown::HashMap;
use log::{info, warn};
use serde::Serialize;

use crate::error::CastError;
use crate::policy::Role;
use crate::random::RandomSource;
use crate::render::{RenderRequest, Renderer};
use crate::walker::animation::Facing;
use crate::walker::kinematics::Viewport;
use crate::walker::{SpriteMeta, Walker, WalkerId};

/// All walkers in the scene and their processing order.
#[derive(Debug, Clone)]
pub struct Cast {
    walkers: HashMap<WalkerId, Walker>,
    order: Vec<WalkerId>,
    ticks: u64,
}

impl Cast {
    /// Builds one walker per [`Role`] at the origin, with Sasara partnered
    /// to Tsudumi.
    ///
    /// # Errors
    /// Returns [`CastError::InvalidSpriteMeta`] for a non-positive or
    /// non-finite cell size.
    pub fn with_cell_size(cell_width: f64, cell_height: f64) -> Result<Self, CastError> {
        let mut walkers = HashMap::with_capacity(Role::ALL.len());
        let mut order = Vec::with_capacity(Role::ALL.len());
        for (index, role) in (0_u32..).zip(Role::ALL) {
            let sprite = SpriteMeta::for_character(cell_width, cell_height, role.char_id())?;
            let id = WalkerId(index);
            walkers.insert(id, Walker::new(role, sprite));
            order.push(id);
        }

        let mut cast = Self {
            walkers,
            order,
            ticks: 0,
        };
        let tsudumi = cast.id_of(Role::Tsudumi);
        if let Some(sasara) = cast.id_of(Role::Sasara).and_then(|id| cast.walkers.get_mut(&id)) {
            sasara.set_partner(tsudumi);
        }
        Ok(cast)
    }

    /// Builds the cast and scatters it across `viewport`.
    ///
    /// # Errors
    /// Returns [`CastError`] when the cell size or viewport is invalid.
    pub fn spawn(
        cell_width: f64,
        cell_height: f64,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, CastError> {
        let bounds = viewport.validated()?;
        let mut cast = Self::with_cell_size(cell_width, cell_height)?;
        cast.scatter(bounds, rng);
        info!(
            "spawned {} walkers in a {}x{} viewport",
            cast.len(),
            bounds.width,
            bounds.height
        );
        Ok(cast)
    }

    /// Places every walker uniformly within `viewport` with a velocity
    /// drawn uniformly from `[-1, 1)` on each axis.
    ///
    /// Positions may overhang the far edges; the first tick clamps them.
    pub fn scatter(&mut self, viewport: Viewport, rng: &mut dyn RandomSource) {
        for id in &self.order {
            let Some(walker) = self.walkers.get_mut(id) else {
                continue;
            };
            let x = rng.next_draw() * viewport.width;
            let y = rng.next_draw() * viewport.height;
            walker.set_position(DVec2::new(x, y));
            let vx = rng.between(-1.0, 1.0);
            let vy = rng.between(-1.0, 1.0);
            walker.update_vector(DVec2::new(vx, vy));
        }
    }

    /// Id of the walker playing `role`.
    #[must_use]
    pub fn id_of(&self, role: Role) -> Option<WalkerId> {
        self.walkers()
            .find(|(_, walker)| walker.role() == role)
            .map(|(id, _)| id)
    }

    /// Walker registered under `id`.
    #[must_use]
    pub fn walker(&self, id: WalkerId) -> Option<&Walker> {
        self.walkers.get(&id)
    }

    /// Mutable walker registered under `id`.
    pub fn walker_mut(&mut self, id: WalkerId) -> Option<&mut Walker> {
        self.walkers.get_mut(&id)
    }

    /// Walkers in processing order.
    pub fn walkers(&self) -> impl Iterator<Item = (WalkerId, &Walker)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.walkers.get(id).map(|walker| (*id, walker)))
    }

    /// Number of walkers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the cast has no walkers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ticks processed so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances every walker by one tick, in order, and forwards each
    /// render request to `renderer`.
    pub fn process_all(
        &mut self,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
        renderer: &mut dyn Renderer,
    ) {
        let order = self.order.clone();
        for id in order {
            if let Some(request) = self.process_one(id, viewport, rng) {
                renderer.present(id, &request);
            }
        }
        self.ticks += 1;
    }

    fn process_one(
        &mut self,
        id: WalkerId,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) -> Option<RenderRequest> {
        let partner = self.walkers.get(&id)?.partner();
        if let Some(partner_id) = partner {
            if let Some([walker, partner]) = self.walkers.get_many_mut([&id, &partner_id]) {
                return Some(walker.process(Some(partner), viewport, rng));
            }
            warn!("walker {id} cannot borrow partner {partner_id}; skipping its motion this tick");
        }
        let walker = self.walkers.get_mut(&id)?;
        Some(walker.process(None, viewport, rng))
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CastSnapshot {
        CastSnapshot {
            ticks: self.ticks,
            walkers: self.walkers().map(|(id, walker)| WalkerSnapshot::new(id, walker)).collect(),
        }
    }
}

/// Point-in-time record of one walker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkerSnapshot {
    /// Registry id.
    pub id: WalkerId,
    /// Character played.
    pub role: Role,
    /// Motion label.
    pub motion: &'static str,
    /// Frames elapsed in the motion, if any tick has observed it.
    pub frames_in_motion: Option<u32>,
    /// Top-left position in pixels.
    pub position: [f64; 2],
    /// Per-frame velocity.
    pub velocity: [f64; 2],
    /// Velocity length.
    pub speed: f64,
    /// Per-frame speed factor.
    pub accel: f64,
    /// Per-frame rotation in degrees.
    pub angle: f64,
    /// Animation column.
    pub anime_frame: u32,
    /// Heading bucket.
    pub facing: Facing,
}

impl WalkerSnapshot {
    fn new(id: WalkerId, walker: &Walker) -> Self {
        Self {
            id,
            role: walker.role(),
            motion: walker.motion().as_str(),
            frames_in_motion: walker.frames_in_motion(),
            position: walker.position().to_array(),
            velocity: walker.velocity().to_array(),
            speed: walker.speed(),
            accel: walker.accel(),
            angle: walker.angle(),
            anime_frame: walker.anime_frame(),
            facing: walker.facing(),
        }
    }
}

/// Point-in-time record of the whole cast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastSnapshot {
    /// Ticks processed.
    pub ticks: u64,
    /// Walkers in processing order.
    pub walkers: Vec<WalkerSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Motion;
    use crate::random::{ScriptedRandom, SeededRandom};
    use crate::render::MockRenderer;
    use approx::assert_relative_eq;
    use mockall::{predicate::eq, Sequence};
    use static_assertions::assert_impl_all;

    assert_impl_all!(Cast: Send, Sync, Clone);

    const VIEWPORT: Viewport = Viewport::new(320.0, 240.0);

    fn seeded_cast(seed: u64) -> (Cast, SeededRandom) {
        let mut rng = SeededRandom::from_seed(seed);
        let cast = Cast::spawn(16.0, 16.0, VIEWPORT, &mut rng).unwrap();
        (cast, rng)
    }

    #[test]
    fn roles_follow_processing_order() {
        let cast = Cast::with_cell_size(16.0, 16.0).unwrap();
        let roles: Vec<Role> = cast.walkers().map(|(_, walker)| walker.role()).collect();
        assert_eq!(roles, Role::ALL);
        let sasara = cast.id_of(Role::Sasara).and_then(|id| cast.walker(id)).unwrap();
        assert_eq!(sasara.partner(), cast.id_of(Role::Tsudumi));
    }

    #[test]
    fn scatter_uses_draws_in_order() {
        let mut rng = ScriptedRandom::new([0.5, 0.25, 1.0, 0.0]).with_fallback(0.5);
        let cast = Cast::spawn(16.0, 16.0, VIEWPORT, &mut rng).unwrap();
        let (_, sasara) = cast.walkers().next().unwrap();
        assert_relative_eq!(sasara.position().x, 160.0);
        assert_relative_eq!(sasara.position().y, 60.0);
        assert_relative_eq!(sasara.velocity().x, 1.0);
        assert_relative_eq!(sasara.velocity().y, -1.0);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let mut rng = SeededRandom::from_seed(1);
        assert!(Cast::spawn(0.0, 16.0, VIEWPORT, &mut rng).is_err());
        assert!(Cast::spawn(16.0, 16.0, Viewport::new(f64::INFINITY, 1.0), &mut rng).is_err());
    }

    #[test]
    fn long_run_keeps_invariants() {
        let (mut cast, mut rng) = seeded_cast(7);
        let mut sink = Vec::new();
        for _ in 0..5_000 {
            cast.process_all(VIEWPORT, &mut rng, &mut sink);
            for (_, walker) in cast.walkers() {
                let position = walker.position();
                assert!((0.0..=VIEWPORT.width - 16.0).contains(&position.x));
                assert!((0.0..=VIEWPORT.height - 16.0).contains(&position.y));
                assert_relative_eq!(
                    walker.speed(),
                    walker.velocity().length(),
                    max_relative = 1e-9,
                    epsilon = 1e-12
                );
            }
        }
        assert_eq!(cast.ticks(), 5_000);
        assert_eq!(sink.len(), 15_000);
    }

    #[test]
    fn renderer_sees_walkers_in_order() {
        let (mut cast, mut rng) = seeded_cast(3);
        let mut renderer = MockRenderer::new();
        let mut seq = Sequence::new();
        for id in [WalkerId(0), WalkerId(1), WalkerId(2)] {
            renderer
                .expect_present()
                .with(eq(id), mockall::predicate::always())
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        cast.process_all(VIEWPORT, &mut rng, &mut renderer);
    }

    #[test]
    fn first_tick_always_carries_a_cell() {
        let (mut cast, mut rng) = seeded_cast(11);
        let mut sink = Vec::new();
        cast.process_all(VIEWPORT, &mut rng, &mut sink);
        assert!(sink.iter().all(|(_, request)| request.cell.is_some()));
    }

    #[test]
    fn dangling_partner_skips_motion_but_moves() {
        let (mut cast, mut rng) = seeded_cast(5);
        let sasara = cast.id_of(Role::Sasara).unwrap();
        cast.walker_mut(sasara).unwrap().set_partner(Some(WalkerId(99)));
        let before = cast.walker(sasara).unwrap().position();

        let mut sink = Vec::new();
        cast.process_all(VIEWPORT, &mut rng, &mut sink);

        let walker = cast.walker(sasara).unwrap();
        assert_eq!(walker.motion(), Motion::Default);
        assert_ne!(walker.position(), before);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn snapshot_serializes_labels() {
        let (mut cast, mut rng) = seeded_cast(9);
        let mut sink = Vec::new();
        cast.process_all(VIEWPORT, &mut rng, &mut sink);
        let json = serde_json::to_value(cast.snapshot()).unwrap();
        assert_eq!(json["ticks"], 1);
        assert_eq!(json["walkers"][0]["role"], "Sasara");
        let label = json["walkers"][2]["motion"].as_str().unwrap();
        assert!(label.parse::<Motion>().is_ok());
    }
}
