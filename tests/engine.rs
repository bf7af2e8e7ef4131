use glam::Vec2;
use laggard::ecs::systems::{flocking, steering};
use laggard::spatial::Perceived;
use laggard::{AgentSnapshot, ConfigError, Engine, FlockParams, SimConfig, SpatialHash, MAX_DELAY};

fn open_arena() -> SimConfig {
    SimConfig {
        width: 10_000.0,
        height: 10_000.0,
        ..SimConfig::default()
    }
}

fn run_recording(engine: &mut Engine, ticks: usize) -> Vec<Vec<AgentSnapshot>> {
    let mut states = vec![engine.snapshot()];
    for _ in 0..ticks {
        engine.step();
        states.push(engine.snapshot());
    }
    states
}

#[test]
fn two_boid_scenario() {
    let config = SimConfig {
        delay: 1,
        visual_range: 75.0,
        flock: FlockParams {
            boundary_margin: 0.0,
            ..FlockParams::default()
        },
        ..SimConfig::default()
    };
    let mut engine = Engine::with_agents(
        config,
        &[
            (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
            (Vec2::new(10.0, 0.0), Vec2::new(-1.0, 0.0)),
        ],
    )
    .unwrap();

    engine.step();
    let snap = engine.snapshot();

    // cohesion +0.05, separation -0.5, alignment (-1 - 0.55) * 0.05
    let expected = 1.0 + 0.05 - 0.5 + (-1.0 - 0.55) * 0.05;
    assert!((snap[0].velocity.x - expected).abs() < 1e-5, "A: {:?}", snap[0].velocity);
    assert!((snap[1].velocity.x + expected).abs() < 1e-5, "B: {:?}", snap[1].velocity);
    assert_eq!(snap[0].velocity.y, 0.0);
    assert_eq!(snap[1].velocity.y, 0.0);
    assert!((snap[0].position.x - expected).abs() < 1e-5);
    assert!((snap[1].position.x - (10.0 - expected)).abs() < 1e-5);
}

#[test]
fn identical_runs_are_bitwise_identical() {
    let config = SimConfig {
        agent_count: 300,
        delay: 4,
        seed: Some(42),
        ..SimConfig::default()
    };
    let mut a = Engine::new(config.clone()).unwrap();
    let mut b = Engine::new(config).unwrap();
    for _ in 0..120 {
        a.step();
        b.step();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn speed_never_exceeds_limit() {
    let mut engine = Engine::new(SimConfig {
        agent_count: 250,
        seed: Some(9),
        width: 400.0,
        height: 300.0,
        ..SimConfig::default()
    })
    .unwrap();
    let limit = engine.params().flock.speed_limit;
    for _ in 0..200 {
        engine.step();
        for boid in engine.snapshot() {
            assert!(
                boid.velocity.length() <= limit + 1e-4,
                "boid {} at speed {}",
                boid.id,
                boid.velocity.length()
            );
        }
    }
}

#[test]
fn isolated_boid_only_drifts() {
    let vel = Vec2::new(2.5, -1.5);
    let mut engine = Engine::with_agents(
        open_arena(),
        &[
            (Vec2::new(5_000.0, 5_000.0), vel),
            (Vec2::new(8_000.0, 2_000.0), Vec2::ZERO),
        ],
    )
    .unwrap();
    for tick in 1..=10 {
        engine.step();
        let snap = engine.snapshot();
        assert_eq!(snap[0].velocity, vel);
        assert_eq!(snap[0].position, Vec2::new(5_000.0, 5_000.0) + vel * tick as f32);
        assert_eq!(snap[1].velocity, Vec2::ZERO);
    }
}

#[test]
fn boundary_is_the_only_force_on_a_lonely_edge_boid() {
    let mut engine = Engine::with_agents(
        SimConfig::default(),
        &[(Vec2::new(50.0, 400.0), Vec2::ZERO)],
    )
    .unwrap();
    engine.step();
    assert_eq!(engine.snapshot()[0].velocity, Vec2::new(1.0, 0.0));
}

/// Replays what boid 0 should do each tick, given only the recorded states,
/// and checks the engine agrees. Boid 1 must be seen as it was `delay` ticks
/// before the current tick.
fn assert_neighbor_seen_with_delay(delays: &[u32]) {
    let mut engine = Engine::with_agents(
        open_arena(),
        &[
            (Vec2::new(5_000.0, 5_000.0), Vec2::new(0.5, 0.0)),
            (Vec2::new(5_030.0, 5_010.0), Vec2::new(-0.8, 0.6)),
        ],
    )
    .unwrap();
    let params = *engine.params();
    let grid = SpatialHash::new(params.cell_size, 64);

    let mut states = vec![engine.snapshot()];
    let mut ticks_with_neighbor = 0;
    let mut ticks_with_stale_view = 0;

    for (k, &delay) in delays.iter().enumerate() {
        engine.set_delay(delay).unwrap();
        engine.step();
        states.push(engine.snapshot());

        let me = states[k][0];
        let current = states[k][1];
        let seen = states[k.saturating_sub(delay as usize)][1];

        let (mx, my) = grid.cell_of(me.position);
        let (ox, oy) = grid.cell_of(current.position);
        let candidate = (mx - ox).abs() <= 1 && (my - oy).abs() <= 1;
        let in_range = (me.position - seen.position).length_squared() < params.visual_range_sq();

        let mut neighbors = Vec::new();
        if candidate && in_range {
            neighbors.push(Perceived {
                pos: seen.position,
                vel: seen.velocity,
            });
            ticks_with_neighbor += 1;
            if seen.position != current.position {
                ticks_with_stale_view += 1;
            }
        }

        let mut vel = me.velocity;
        flocking::steer(&mut vel, me.position, &neighbors, &params.flock);
        steering::keep_within_bounds(&mut vel, me.position, params.width, params.height, &params.flock);
        steering::limit_speed(&mut vel, params.flock.speed_limit);

        let actual = states[k + 1][0].velocity;
        assert!(
            (actual - vel).length() < 1e-5,
            "tick {}: expected {vel:?}, got {actual:?}",
            k + 1
        );
    }

    assert!(ticks_with_neighbor > 0);
    assert!(ticks_with_stale_view > 0);
}

#[test]
fn neighbors_are_perceived_with_fixed_delay() {
    assert_neighbor_seen_with_delay(&[3; 40]);
}

#[test]
fn delay_change_applies_from_next_tick_without_reset() {
    let mut schedule = vec![1; 8];
    schedule.extend([6; 12]);
    schedule.extend([2; 10]);
    assert_neighbor_seen_with_delay(&schedule);
}

#[test]
fn snapshot_reports_position_from_delay_ticks_ago() {
    let mut engine = Engine::new(SimConfig {
        agent_count: 20,
        delay: 4,
        seed: Some(5),
        ..SimConfig::default()
    })
    .unwrap();
    let states = run_recording(&mut engine, 15);
    let last = states.len() - 1;
    for boid in &states[last] {
        assert_eq!(boid.delayed_position, states[last - 4][boid.id as usize].position);
    }
    // Before warm-up the delayed view is the initial state.
    for boid in &states[2] {
        assert_eq!(boid.delayed_position, states[0][boid.id as usize].position);
    }
}

#[test]
fn snapshot_does_not_disturb_the_run() {
    let config = SimConfig {
        agent_count: 60,
        seed: Some(77),
        ..SimConfig::default()
    };
    let mut observed = Engine::new(config.clone()).unwrap();
    let mut quiet = Engine::new(config).unwrap();
    for _ in 0..30 {
        assert_eq!(observed.snapshot(), observed.snapshot());
        observed.step();
        quiet.step();
    }
    assert_eq!(observed.snapshot(), quiet.snapshot());
    assert_eq!(observed.tick_count(), 30);
}

#[test]
fn set_delay_clamps_to_interactive_range() {
    let mut engine = Engine::new(SimConfig {
        agent_count: 3,
        delay: 3,
        seed: Some(1),
        ..SimConfig::default()
    })
    .unwrap();
    assert_eq!(engine.set_delay(0), Ok(1));
    assert_eq!(engine.decrease_delay(), Ok(1));
    assert_eq!(engine.set_delay(99), Ok(MAX_DELAY));
    assert_eq!(engine.increase_delay(), Ok(MAX_DELAY));
    assert_eq!(engine.set_delay(7), Ok(7));
    assert_eq!(engine.delay(), 7);
}

#[test]
fn construction_rejects_invalid_config() {
    let bad_delay = SimConfig { delay: 0, ..SimConfig::default() };
    assert_eq!(Engine::new(bad_delay).err(), Some(ConfigError::ZeroDelay));

    let bad_range = SimConfig { visual_range: -5.0, ..SimConfig::default() };
    assert_eq!(
        Engine::new(bad_range).err(),
        Some(ConfigError::InvalidVisualRange(-5.0))
    );

    let bad_arena = SimConfig { width: 0.0, ..SimConfig::default() };
    assert!(matches!(
        Engine::with_agents(bad_arena, &[]).err(),
        Some(ConfigError::InvalidArena { .. })
    ));
}

#[test]
fn empty_flock_steps_cleanly() {
    let mut engine = Engine::new(SimConfig { agent_count: 0, ..SimConfig::default() }).unwrap();
    engine.step();
    assert!(engine.snapshot().is_empty());
    assert_eq!(engine.tick_count(), 1);
}

#[test]
fn trajectory_keeps_trail_len_positions() {
    let mut engine = Engine::new(SimConfig {
        agent_count: 5,
        trail_len: 30,
        seed: Some(11),
        ..SimConfig::default()
    })
    .unwrap();
    let depth = MAX_DELAY as usize + 1;

    engine.step();
    let trail = engine.trajectory(2).unwrap();
    assert_eq!(trail.len(), depth + 1);
    assert_eq!(*trail.last().unwrap(), engine.snapshot()[2].position);

    for _ in 0..50 {
        engine.step();
    }
    let trail = engine.trajectory(2).unwrap();
    assert_eq!(trail.len(), 30);
    assert_eq!(*trail.last().unwrap(), engine.snapshot()[2].position);
    assert!(engine.trajectory(5).is_none());
}

#[test]
fn short_trail_is_not_padded_by_delay_history() {
    let mut engine = Engine::new(SimConfig {
        agent_count: 4,
        trail_len: 5,
        seed: Some(21),
        ..SimConfig::default()
    })
    .unwrap();
    let states = run_recording(&mut engine, 10);

    let trail = engine.trajectory(1).unwrap();
    let expected: Vec<Vec2> = states[6..=10].iter().map(|s| s[1].position).collect();
    assert_eq!(trail, expected);

    // Delayed reads still reach past the trail.
    engine.set_delay(MAX_DELAY).unwrap();
    assert_eq!(engine.snapshot()[1].delayed_position, states[0][1].position);
}

#[test]
fn tuning_constants_apply_from_next_tick() {
    let mut engine = Engine::with_agents(
        SimConfig::default(),
        &[(Vec2::new(50.0, 400.0), Vec2::ZERO)],
    )
    .unwrap();
    engine.flock_params_mut().turn_factor = 3.0;
    engine.step();
    assert_eq!(engine.snapshot()[0].velocity, Vec2::new(3.0, 0.0));

    engine.flock_params_mut().speed_limit = 2.0;
    engine.step();
    let vel = engine.snapshot()[0].velocity;
    assert!((vel.length() - 2.0).abs() < 1e-5, "got {vel:?}");
}
