use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tank_shared::*;
use tank_sim::{do_nothing, play_episode, run_episode, Arena, EnvConfig, Opponent, TankEnv};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_point_blank_hit() {
    let mut arena = Arena::default();
    arena.place_tank(TankId::Tank0, Vec2::new(100.0, 100.0), 0.0);
    arena.place_tank(TankId::Tank1, Vec2::new(150.0, 100.0), 180.0);

    let mut hit_step = None;
    for _ in 0..10 {
        let result = arena.step(Action::Fire, Action::Noop).unwrap();
        if result.info.hits(TankId::Tank0) > 0 {
            hit_step = Some(result);
            break;
        }
    }

    let result = hit_step.expect("bullet should reach a stationary target 50 units away");
    assert_eq!(result.info.hits(TankId::Tank0), 1);
    assert_eq!(result.info.health, [100, 66]);
    assert!(close(result.rewards[0], REWARD_HIT + REWARD_STEP));
    assert!(close(result.rewards[1], REWARD_STEP));
    assert!(!result.done);
}

#[test]
fn test_timeout_draw_pays_only_step_costs() {
    let mut arena = Arena::new(ArenaConfig {
        max_steps: 50,
        ..Default::default()
    })
    .unwrap();

    let mut returns = [0.0f32; 2];
    let mut last = None;
    while !arena.is_done() {
        let r = arena.step(Action::Noop, Action::Noop).unwrap();
        returns[0] += r.rewards[0];
        returns[1] += r.rewards[1];
        last = Some(r);
    }

    let last = last.unwrap();
    assert_eq!(last.info.winner, Some(Winner::Draw));
    assert_eq!(arena.step_count(), arena.max_steps());
    assert_eq!(arena.end_reason(), Some(EndReason::Timeout));
    assert!(close(returns[0], 50.0 * REWARD_STEP));
    assert!(close(returns[1], 50.0 * REWARD_STEP));
}

#[test]
fn test_driving_into_wall_clamps() {
    let mut arena = Arena::default();
    arena.place_tank(TankId::Tank0, Vec2::new(779.0, 300.0), 0.0);

    for _ in 0..3 {
        arena.step(Action::MoveForward, Action::Noop).unwrap();
    }

    let t = arena.tank(TankId::Tank0);
    assert!(close(t.position.x, ARENA_WIDTH - WALL_MARGIN));
    assert!(close(t.position.y, 300.0));
    assert_eq!(t.heading, 0.0);
}

#[test]
fn test_fourth_bullet_rejected_at_ammo_cap() {
    let mut arena = Arena::default();
    // off the firing line so no bullet resolves early
    arena.place_tank(TankId::Tank1, Vec2::new(700.0, 500.0), 180.0);

    for step in 0..61 {
        let action = if step % FIRE_COOLDOWN_TICKS == 0 {
            Action::Fire
        } else {
            Action::Noop
        };
        arena.step(action, Action::Noop).unwrap();
    }
    assert_eq!(arena.tank(TankId::Tank0).ammo_in_flight, 3);

    let result = arena.step(Action::Fire, Action::Noop).unwrap();

    assert_eq!(arena.tank(TankId::Tank0).ammo_in_flight, 3);
    assert_eq!(arena.bullets().len(), 3);
    assert!(result.info.events.contains(&TickEvent::FireRejected {
        tank: TankId::Tank0,
        reason: RejectReason::AmmoExhausted,
    }));
    assert!(!result
        .info
        .events
        .contains(&TickEvent::Fired { tank: TankId::Tank0 }));
    assert_eq!(result.info.fire_rejections(TankId::Tank0), 1);
    assert_eq!(arena.stats().tank(TankId::Tank0).shots, 3);
    assert_eq!(arena.stats().tank(TankId::Tank0).rejected, 1);
}

#[test]
fn test_bullet_leaving_arena_is_one_miss() {
    let mut arena = Arena::default();
    arena.place_tank(TankId::Tank0, Vec2::new(100.0, 300.0), 180.0);

    arena.step(Action::Fire, Action::Noop).unwrap();
    let mut misses = 0;
    let mut hits = 0;
    for _ in 0..30 {
        let r = arena.step(Action::Noop, Action::Noop).unwrap();
        misses += r.info.misses(TankId::Tank0);
        hits += r.info.hits(TankId::Tank0);
    }

    assert_eq!(misses, 1);
    assert_eq!(hits, 0);
    assert!(arena.bullets().is_empty());
    assert_eq!(arena.tank(TankId::Tank0).ammo_in_flight, 0);
    assert_eq!(arena.stats().tank(TankId::Tank0).misses, 1);
}

#[test]
fn test_three_hits_kill_two_do_not() {
    let mut arena = Arena::default();
    arena.place_tank(TankId::Tank0, Vec2::new(100.0, 300.0), 0.0);
    arena.place_tank(TankId::Tank1, Vec2::new(150.0, 300.0), 180.0);

    let mut last = None;
    for step in 0..=2 * FIRE_COOLDOWN_TICKS {
        let action = if step % FIRE_COOLDOWN_TICKS == 0 {
            Action::Fire
        } else {
            Action::Noop
        };
        let r = arena.step(action, Action::Noop).unwrap();
        if step == FIRE_COOLDOWN_TICKS {
            assert_eq!(arena.tank(TankId::Tank1).health, 32);
            assert!(arena.tank(TankId::Tank1).alive);
        }
        last = Some(r);
    }

    let last = last.unwrap();
    assert!(last.done);
    assert_eq!(last.info.winner, Some(Winner::Tank0));
    assert_eq!(arena.tank(TankId::Tank1).health, 0);
    assert!(!arena.tank(TankId::Tank1).alive);
    assert!(close(last.rewards[0], REWARD_HIT + REWARD_WIN + REWARD_STEP));
    assert!(close(last.rewards[1], REWARD_LOSS + REWARD_STEP));
}

#[test]
fn test_reset_same_seed_is_identical() {
    let mut arena = Arena::default();
    let (a, info_a) = arena.reset(Some(7), Some(true));
    arena.step(Action::MoveForward, Action::Fire).unwrap();
    let (b, info_b) = arena.reset(Some(7), Some(true));

    assert_eq!(a, b);
    assert_eq!(info_a.seed, info_b.seed);
    assert!(arena.bullets().is_empty());
    assert_eq!(arena.step_count(), 0);

    for id in TankId::BOTH {
        let p = arena.tank(id).position;
        assert!(p.x >= SPAWN_INSET && p.x < ARENA_WIDTH - SPAWN_INSET);
        assert!(p.y >= SPAWN_INSET && p.y < ARENA_HEIGHT - SPAWN_INSET);
        assert_eq!(p.x.fract(), 0.0);
    }
}

#[test]
fn test_same_seed_and_actions_are_bit_identical() {
    let config = ArenaConfig {
        randomize_positions: true,
        seed: 99,
        ..Default::default()
    };
    let mut a = Arena::new(config.clone()).unwrap();
    let mut b = Arena::new(config).unwrap();
    let mut rng = Pcg64::seed_from_u64(1234);

    while !a.is_done() {
        let a0 = rng.gen_range(0..ACTION_COUNT as i64);
        let a1 = rng.gen_range(0..ACTION_COUNT as i64);
        let ra = a.step_raw(a0, a1).unwrap();
        let rb = b.step_raw(a0, a1).unwrap();
        assert_eq!(ra.observation, rb.observation);
        assert_eq!(ra.rewards[0].to_bits(), rb.rewards[0].to_bits());
        assert_eq!(ra.rewards[1].to_bits(), rb.rewards[1].to_bits());
        assert_eq!(ra.info.events, rb.info.events);
    }
    assert!(b.is_done());
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn test_hunter_beats_do_nothing() {
    let config = EpisodeConfig {
        seed: 42,
        p0_name: "hunter".into(),
        p1_name: "do_nothing".into(),
        ..Default::default()
    };

    let result = play_episode(&config, &Opponent::Hunter, &Opponent::External(do_nothing)).unwrap();

    assert_eq!(
        result.winner,
        Winner::Tank0,
        "Hunter should beat an idle tank. Got {:?} at step {} with health {:?}",
        result.winner,
        result.final_step,
        result.health,
    );
    assert_eq!(result.reason, EndReason::Elimination);
    assert_eq!(result.stats.tank(TankId::Tank0).hits, 3);
    assert!(result.returns[0] > 100.0);
    assert!(result.returns[1] < -100.0);
}

#[test]
fn test_episodes_are_reproducible() {
    let config = EpisodeConfig {
        seed: 5,
        arena: ArenaConfig {
            randomize_positions: true,
            ..Default::default()
        },
        ..Default::default()
    };
    for p0 in Opponent::SCRIPTED {
        let a = play_episode(&config, &p0, &Opponent::Random).unwrap();
        let b = play_episode(&config, &p0, &Opponent::Random).unwrap();
        assert_eq!(a.final_step, b.final_step, "{}", p0.name());
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.health, b.health);
    }
}

#[test]
fn test_replay_json_round_trip() {
    let config = EpisodeConfig {
        seed: 3,
        p0_name: "hunter".into(),
        p1_name: "simple".into(),
        ..Default::default()
    };
    let replay = run_episode(&config, &Opponent::Hunter, &Opponent::Simple).unwrap();

    let json = serde_json::to_string(&replay).unwrap();
    let back: Replay = serde_json::from_str(&json).unwrap();

    assert_eq!(back.frames.len(), replay.frames.len());
    assert_eq!(back.result.winner, replay.result.winner);
    assert_eq!(back.result.final_step, replay.result.final_step);
    assert_eq!(back.result.stats, replay.result.stats);
    assert_eq!(back.config.p0_name, "hunter");
    assert_eq!(
        back.frames.last().map(|f| f.step),
        Some(replay.result.final_step)
    );
}

#[test]
fn test_env_splits_terminated_and_truncated() {
    let mut env = TankEnv::new(EnvConfig {
        arena: ArenaConfig {
            max_steps: 20,
            ..Default::default()
        },
        opponent: Opponent::External(do_nothing),
        agent: TankId::Tank0,
    })
    .unwrap();

    env.reset(Some(0), None);
    let mut last = None;
    for _ in 0..20 {
        last = Some(env.step(Action::TurnLeft.index() as i64).unwrap());
    }
    let last = last.unwrap();
    assert!(last.truncated && !last.terminated);
    assert_eq!(
        env.step(Action::Noop.index() as i64).unwrap_err(),
        EngineError::StepAfterTerminal
    );

    env.set_opponent(Opponent::Hunter);
    env.reset(Some(0), None);
    let mut outcome = None;
    for _ in 0..20 {
        let s = env.step(Action::Noop.index() as i64).unwrap();
        if s.terminated || s.truncated {
            outcome = Some(s);
            break;
        }
    }
    // 20 steps is too short for the hunter to land three hits
    let outcome = outcome.unwrap();
    assert!(outcome.truncated);
    assert!(outcome.info.health[0] <= MAX_HEALTH);
}
