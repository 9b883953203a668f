//! Frame tick integration tests: readiness guards, clamps, parallax and
//! clip selection driven through the simulation schedule on a headless world.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Sender, unbounded};
use raylib::prelude::KeyboardKey;

use cibusninja::components::animationmixer::{AnimationMixer, ClipInfo};
use cibusninja::components::depth::Depth;
use cibusninja::components::facing::Facing;
use cibusninja::components::parallaxlayer::ParallaxLayer;
use cibusninja::components::player::Player;
use cibusninja::components::screenposition::ScreenPosition;
use cibusninja::events::character::{CharacterLoadedEvent, observe_character_loaded};
use cibusninja::game::{FAR_KEY, MID_KEY, NEAR_KEY, spawn_scene};
use cibusninja::resources::characterasset::{AssetLoad, AssetMessage, CharacterAsset};
use cibusninja::resources::gameconfig::{GameConfig, SelectionPolicy};
use cibusninja::resources::input::InputState;
use cibusninja::resources::worldtime::WorldTime;
use cibusninja::systems::add_simulation_systems;
use cibusninja::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;
const FRAME: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Six clips like the ninja model; idle is 1, walk is 4, the last one plays first.
fn ninja_clips() -> Vec<ClipInfo> {
    ["Attack", "Idle", "Jump", "Run", "Walk", "Wave"]
        .iter()
        .map(|name| ClipInfo::new(*name, 40))
        .collect()
}

struct Harness {
    world: World,
    schedule: Schedule,
    player: Entity,
    // Keeps the loader channel open so the asset stays pending.
    _tx: Sender<AssetMessage>,
}

impl Harness {
    fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(InputState::default());
        let player = spawn_scene(&mut world, &config);
        world.insert_resource(config);
        let (tx, rx) = unbounded();
        world.insert_resource(CharacterAsset::from_receiver("ninja.glb", rx));
        world.add_observer(observe_character_loaded);
        world.flush();

        let mut schedule = Schedule::default();
        add_simulation_systems(&mut schedule);
        Self {
            world,
            schedule,
            player,
            _tx: tx,
        }
    }

    fn ready(config: GameConfig) -> Self {
        let mut harness = Self::new(config);
        harness.load(ninja_clips());
        assert!(harness.world.resource::<CharacterAsset>().is_ready());
        harness
    }

    fn load(&mut self, clips: Vec<ClipInfo>) {
        self.world.trigger(CharacterLoadedEvent { clips });
        self.world.flush();
    }

    fn press(&mut self, key: KeyboardKey) {
        self.world.resource_mut::<InputState>().on_key_down(key);
    }

    fn release(&mut self, key: KeyboardKey) {
        self.world.resource_mut::<InputState>().on_key_up(key);
    }

    fn tick(&mut self) {
        self.tick_with(FRAME);
    }

    fn tick_with(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
    }

    fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn pos(&self) -> (f32, f32) {
        let p = self.world.get::<ScreenPosition>(self.player).unwrap();
        (p.x(), p.y())
    }

    fn depth(&self) -> f32 {
        self.world.get::<Depth>(self.player).unwrap().z
    }

    fn facing(&self) -> Facing {
        *self.world.get::<Facing>(self.player).unwrap()
    }

    fn active_clip(&self) -> Option<usize> {
        self.world.get::<AnimationMixer>(self.player).unwrap().active()
    }

    fn offset(&mut self, key: &str) -> f32 {
        self.world
            .query::<&ParallaxLayer>()
            .iter(&self.world)
            .find(|l| l.tex_key == key)
            .map(|l| l.offset)
            .unwrap()
    }

    fn place(&mut self, x: f32, y: f32) {
        let mut p = self.world.get_mut::<ScreenPosition>(self.player).unwrap();
        p.pos.x = x;
        p.pos.y = y;
    }
}

#[test]
fn ticks_before_ready_change_nothing() {
    let mut h = Harness::new(GameConfig::new());
    h.press(KeyboardKey::KEY_RIGHT);
    h.press(KeyboardKey::KEY_UP);
    h.ticks(50);

    assert_eq!(h.pos(), (0.0, 0.0));
    assert_eq!(h.depth(), -10.0);
    assert_eq!(h.facing(), Facing::Front);
    assert_eq!(h.active_clip(), None);
    assert_eq!(h.offset(NEAR_KEY), 0.0);
    assert!(h.world.resource::<CharacterAsset>().is_pending());
}

#[test]
fn load_plays_last_clip_first() {
    let h = Harness::ready(GameConfig::new());
    assert_eq!(h.active_clip(), Some(5));
    let mixer = h.world.get::<AnimationMixer>(h.player).unwrap();
    assert_eq!(mixer.active_clip().unwrap().name, "Wave");
    assert_eq!(mixer.active_clip().unwrap().weight, 1.0);
}

#[test]
fn second_load_is_ignored() {
    let mut h = Harness::ready(GameConfig::new());
    h.load(vec![ClipInfo::new("Only", 3)]);
    assert_eq!(h.world.get::<AnimationMixer>(h.player).unwrap().len(), 6);
    assert!(h.world.resource::<CharacterAsset>().is_ready());
}

#[test]
fn missing_walk_clip_fails_the_load() {
    let mut h = Harness::new(GameConfig::new());
    h.load(vec![ClipInfo::new("A", 10), ClipInfo::new("B", 10)]);
    match &h.world.resource::<CharacterAsset>().state {
        AssetLoad::Failed(e) => assert!(e.contains("walk clip index 4")),
        other => panic!("unexpected state {:?}", other),
    }

    // Still gated: nothing moves.
    h.press(KeyboardKey::KEY_LEFT);
    h.ticks(3);
    assert_eq!(h.pos(), (0.0, 0.0));
}

#[test]
fn left_inside_bounds_moves_by_one_step() {
    let mut h = Harness::ready(GameConfig::new());
    h.press(KeyboardKey::KEY_LEFT);
    h.tick();
    assert_eq!(h.pos().0, -2.0);
    assert_eq!(h.offset(NEAR_KEY), 0.0);
    assert_eq!(h.offset(MID_KEY), 0.0);
    assert_eq!(h.offset(FAR_KEY), 0.0);
}

#[test]
fn left_at_bound_scrolls_layers_with_parallax() {
    let mut h = Harness::ready(GameConfig::new());
    h.place(-150.0, 0.0);
    h.press(KeyboardKey::KEY_LEFT);
    h.tick();

    assert_eq!(h.pos().0, -150.0);
    assert_eq!(h.offset(NEAR_KEY), 2.0);
    assert_eq!(h.offset(MID_KEY), 1.0);
    assert_eq!(h.offset(FAR_KEY), 0.5);
}

#[test]
fn vertical_movement_stays_within_limits() {
    let mut h = Harness::ready(GameConfig::new());
    for (key, z_step) in [(KeyboardKey::KEY_UP, -0.05), (KeyboardKey::KEY_DOWN, 0.05)] {
        h.press(key);
        for _ in 0..200 {
            let (_, prev_y) = h.pos();
            let prev_depth = h.depth();
            h.tick();
            let y = h.pos().1;
            assert!((-5.0..=0.0).contains(&y), "y = {}", y);
            // Depth moves together with y and only then.
            let expected = if y != prev_y { prev_depth + z_step } else { prev_depth };
            assert!(approx_eq(h.depth(), expected), "depth = {}", h.depth());
        }
        h.release(key);
    }
    assert_eq!(h.pos().1, 0.0);
    assert!((h.depth() + 10.0).abs() < 0.05 + EPSILON, "depth = {}", h.depth());
}

#[test]
fn holding_right_walks_to_the_limit_then_scrolls() {
    let mut h = Harness::ready(GameConfig::new());
    h.press(KeyboardKey::KEY_RIGHT);
    for n in 1..=120usize {
        h.tick();
        let expected_x = (2.0 * n as f32).min(150.0);
        assert_eq!(h.pos().0, expected_x, "frame {}", n);
        assert_eq!(h.facing(), Facing::Right);
        assert_eq!(h.active_clip(), Some(4));
        // x reaches 150 on frame 75; every later frame scrolls the scene.
        let expected_offset = -2.0 * (n as f32 - 75.0).max(0.0);
        assert_eq!(h.offset(NEAR_KEY), expected_offset, "frame {}", n);
    }
    assert_eq!(h.offset(MID_KEY), -45.0);
    assert_eq!(h.offset(FAR_KEY), -22.5);
}

#[test]
fn idle_scene_faces_front_and_stays_put() {
    let mut h = Harness::ready(GameConfig::new());
    for _ in 0..30 {
        h.tick();
        assert_eq!(h.facing(), Facing::Front);
        assert_eq!(h.active_clip(), Some(1));
        assert_eq!(h.pos(), (0.0, 0.0));
        assert_eq!(h.depth(), -10.0);
    }
}

#[test]
fn reselecting_the_active_clip_does_not_restart_the_crossfade() {
    let mut h = Harness::ready(GameConfig::new());
    h.press(KeyboardKey::KEY_LEFT);
    h.tick();
    let mixer = h.world.get::<AnimationMixer>(h.player).unwrap();
    assert_eq!(mixer.active(), Some(4));
    assert!(mixer.clips()[4].is_fading());
    assert!(mixer.clips()[5].is_fading());
    h.ticks(4);

    let mixer = h.world.get::<AnimationMixer>(h.player).unwrap();
    assert!(mixer.is_crossfading());
    let walk = &mixer.clips()[4];
    // Four advances of fade-in: holding the key did not reset the clip.
    assert!(approx_eq(walk.weight, (4.0 * FRAME) / 0.3), "weight = {}", walk.weight);
    assert!(walk.time > 3.0 * FRAME);

    h.ticks(30);
    let mixer = h.world.get::<AnimationMixer>(h.player).unwrap();
    assert!(!mixer.is_crossfading());
    assert_eq!(mixer.clips()[4].weight, 1.0);
    assert!(!mixer.clips()[5].playing);
}

#[test]
fn up_alone_walks_away_under_first_match() {
    let mut h = Harness::ready(GameConfig::new());
    h.press(KeyboardKey::KEY_UP);
    h.tick();
    assert_eq!(h.facing(), Facing::Back);
    assert_eq!(h.active_clip(), Some(4));
    assert!(h.pos().1 < 0.0);
}

#[test]
fn last_match_lets_vertical_override_horizontal() {
    let mut config = GameConfig::new();
    config.animation.selection = SelectionPolicy::LastMatch;
    let mut h = Harness::ready(config);
    h.press(KeyboardKey::KEY_RIGHT);
    h.press(KeyboardKey::KEY_UP);
    h.tick();
    assert_eq!(h.facing(), Facing::Back);
    assert_eq!(h.active_clip(), Some(4));

    // At the top, up no longer moves, so right wins again.
    h.place(10.0, -5.0);
    h.tick();
    assert_eq!(h.facing(), Facing::Right);
}

#[test]
fn first_match_prefers_horizontal_over_vertical() {
    let mut h = Harness::ready(GameConfig::new());
    h.press(KeyboardKey::KEY_RIGHT);
    h.press(KeyboardKey::KEY_UP);
    h.tick();
    assert_eq!(h.facing(), Facing::Right);
    assert!(h.pos().1 < 0.0);
}

#[test]
fn time_scaled_movement_follows_frame_delta() {
    let mut config = GameConfig::new();
    config.movement.time_scaled = true;
    let mut h = Harness::ready(config);
    h.press(KeyboardKey::KEY_LEFT);
    h.tick_with(1.0 / 30.0);
    assert!(approx_eq(h.pos().0, -4.0), "x = {}", h.pos().0);

    let mut frame_locked = Harness::ready(GameConfig::new());
    frame_locked.press(KeyboardKey::KEY_LEFT);
    frame_locked.tick_with(1.0 / 30.0);
    assert_eq!(frame_locked.pos().0, -2.0);
}

#[test]
fn unrelated_keys_do_not_move_the_character() {
    let mut h = Harness::ready(GameConfig::new());
    h.press(KeyboardKey::KEY_A);
    h.press(KeyboardKey::KEY_SPACE);
    h.ticks(10);
    assert_eq!(h.pos(), (0.0, 0.0));
    assert_eq!(h.facing(), Facing::Front);
    assert!(h.world.query::<&Player>().iter(&h.world).count() == 1);
}
