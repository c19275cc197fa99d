//! Battle system integration tests

use grid_battle::battle::*;
use grid_battle::core::{EngineConfig, Position, SimError};

fn unit(id: &str, team: &str, x: i32, y: i32) -> Unit {
    Unit::new(id, team, "soldier").at(Position::new(x, y))
}

fn fighter(id: &str, team: &str, x: i32, y: i32) -> Unit {
    let mut unit = unit(id, team, x, y);
    unit.attack = 30;
    unit.health = 50;
    unit.max_health = 50;
    unit.range = 2;
    unit
}

#[test]
fn test_distance_three_four_five() {
    let a = unit("a", TEAM_A, 0, 0);
    let b = unit("b", TEAM_B, 3, 4);
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-3);
}

#[test]
fn test_damage_floor() {
    assert_eq!(calculate_damage(1, 100), 1);
    assert_eq!(calculate_damage(10, 5), 8);
    assert_eq!(calculate_damage(0, 0), 1);
}

#[test]
fn test_health_clamp() {
    let mut soldier = unit("a", TEAM_A, 0, 0);
    for _ in 0..10 {
        soldier.heal(50);
    }
    assert_eq!(soldier.health, soldier.max_health);
    for _ in 0..10 {
        soldier.take_damage(40);
    }
    assert_eq!(soldier.health, 0);
}

#[test]
fn test_alive_semantics() {
    let mut zero_health = unit("a", TEAM_A, 0, 0);
    zero_health.health = 0;
    assert!(zero_health.alive);
    assert!(!zero_health.is_alive());

    let mut flagged = unit("b", TEAM_A, 0, 0);
    flagged.alive = false;
    assert!(flagged.health > 0);
    assert!(!flagged.is_alive());
}

#[test]
fn test_elimination_battle_with_always_attack() {
    let mut engine = BattleEngine::new(20, 20, 1000);
    engine.add_unit(fighter("a1", TEAM_A, 5, 10));
    engine.add_unit(fighter("b1", TEAM_B, 15, 10));
    engine.set_ai_callback(TEAM_A, |_, _| Action::attack_nearest());
    engine.set_ai_callback(TEAM_B, |_, _| Action::attack_nearest());
    engine.run();

    assert!(engine.is_finished());
    assert!(!engine.winner().is_empty());
    assert!(engine.current_tick() <= 1000);
}

#[test]
fn test_elimination_battle_with_aggressive_teams() {
    let mut engine = BattleEngine::new(20, 20, 1000);
    engine.add_unit(fighter("a1", TEAM_A, 5, 10));
    engine.add_unit(fighter("b1", TEAM_B, 15, 10));
    engine.set_decision_provider(TEAM_A, ai::Aggressive);
    engine.set_decision_provider(TEAM_B, ai::Aggressive);
    engine.run();

    // teamA is processed first and lands the killing blow first
    assert_eq!(engine.winner(), TEAM_A);
    assert_eq!(engine.outcome(), &BattleOutcome::Victory(TEAM_A.to_string()));
    assert_eq!(engine.team_alive_count(TEAM_A), 1);
    assert_eq!(engine.team_alive_count(TEAM_B), 0);
    assert!(engine
        .state()
        .logs
        .iter()
        .any(|line| line.ends_with("teamB unit b1 eliminated!")));

    let stats = engine.battle_stats();
    assert_eq!(stats.team_a_units_remaining, 1);
    assert_eq!(stats.team_b_units_remaining, 0);
    // teamA: 28 + 22 (clamped), teamB: 28
    assert_eq!(stats.damage_by_team.get(TEAM_A), Some(&50));
    assert_eq!(stats.damage_by_team.get(TEAM_B), Some(&28));
    assert_eq!(stats.total_damage_dealt, 78);
}

#[test]
fn test_stalemate_draw_at_max_ticks() {
    let mut engine = BattleEngine::new(20, 20, 50);
    let mut a = unit("a1", TEAM_A, 0, 0);
    a.range = 0;
    let mut b = unit("b1", TEAM_B, 19, 19);
    b.range = 0;
    engine.add_unit(a);
    engine.add_unit(b);
    engine.set_decision_provider(TEAM_A, ai::AttackNearest);
    engine.set_decision_provider(TEAM_B, ai::AttackNearest);
    engine.run();

    assert_eq!(engine.winner(), DRAW_LABEL);
    assert_eq!(engine.current_tick(), 50);
    assert_eq!(engine.team_alive_count(TEAM_A), 1);
    assert_eq!(engine.team_alive_count(TEAM_B), 1);
}

#[test]
fn test_collision_rejection() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(unit("a1", TEAM_A, 4, 4));
    engine.add_unit(unit("b1", TEAM_B, 5, 4));
    engine.set_ai_callback(TEAM_A, |_, _| Action::move_toward(Position::new(5, 4)));
    engine.initialize();
    engine.tick();
    assert_eq!(engine.find_unit("a1").unwrap().position, Position::new(4, 4));
}

#[test]
fn test_boundary_clamp() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(unit("a1", TEAM_A, 9, 9));
    engine.add_unit(unit("b1", TEAM_B, 0, 0));
    engine.set_ai_callback(TEAM_A, |_, _| Action::step(Direction::Forward));
    engine.set_ai_callback(TEAM_B, |_, _| Action::step(Direction::Forward));
    engine.initialize();
    for _ in 0..5 {
        engine.tick();
    }
    assert_eq!(engine.find_unit("a1").unwrap().position, Position::new(9, 9));
    assert_eq!(engine.find_unit("b1").unwrap().position, Position::new(0, 0));
}

#[test]
fn test_unknown_direction_label_idles() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(unit("a1", TEAM_A, 3, 3));
    engine.add_unit(unit("b1", TEAM_B, 8, 8));
    engine.set_ai_callback(TEAM_A, |_, _| Action::step_named("sideways"));
    engine.initialize();
    engine.tick();
    assert_eq!(engine.find_unit("a1").unwrap().position, Position::new(3, 3));
}

#[test]
fn test_log_bound_keeps_most_recent() {
    let mut engine = BattleEngine::new(20, 20, 200);
    for i in 0..4 {
        let mut a = unit(&format!("a{}", i), TEAM_A, 5, 2 * i);
        a.health = 100_000;
        a.max_health = 100_000;
        let mut b = unit(&format!("b{}", i), TEAM_B, 6, 2 * i);
        b.health = 100_000;
        b.max_health = 100_000;
        engine.add_unit(a);
        engine.add_unit(b);
    }
    engine.set_decision_provider(TEAM_A, ai::AttackNearest);
    engine.set_decision_provider(TEAM_B, ai::AttackNearest);
    engine.run();

    let logs = &engine.state().logs;
    assert_eq!(logs.len(), LOG_CAPACITY);
    assert_eq!(
        logs.last(),
        Some("[Tick 200] Battle ended in draw - max ticks reached")
    );
    assert!(!logs.iter().any(|line| line.contains("Battle initialized")));
}

#[test]
fn test_ticks_after_finish_are_noops() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(fighter("a1", TEAM_A, 4, 4));
    engine.add_unit(fighter("b1", TEAM_B, 5, 4));
    engine.set_decision_provider(TEAM_A, ai::AttackNearest);
    engine.set_decision_provider(TEAM_B, ai::AttackNearest);
    engine.run();
    assert!(engine.is_finished());

    let tick = engine.current_tick();
    let winner = engine.winner().to_string();
    let units = engine.state().units.clone();
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.current_tick(), tick);
    assert_eq!(engine.winner(), winner);
    assert_eq!(engine.state().units, units);
}

#[test]
fn test_callback_sees_same_tick_mutations() {
    let mut engine = BattleEngine::new(10, 10, 100);
    let mut a = unit("a1", TEAM_A, 4, 4);
    a.attack = 45;
    engine.add_unit(a);
    engine.add_unit(unit("b1", TEAM_B, 5, 4));
    engine.set_decision_provider(TEAM_A, ai::AttackNearest);
    engine.set_ai_callback(TEAM_B, |unit, _state| {
        // a1 already struck this tick: 45 - 2 = 43
        assert_eq!(unit.health, 57);
        Action::Idle
    });
    engine.initialize();
    engine.tick();
}

#[test]
fn test_explicit_friendly_target_is_honored() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(unit("a1", TEAM_A, 4, 4));
    engine.add_unit(unit("a2", TEAM_A, 4, 5));
    engine.add_unit(unit("b1", TEAM_B, 9, 9));
    engine.set_ai_callback(TEAM_A, |unit, _| {
        if unit.id == "a1" {
            Action::attack("a2")
        } else {
            Action::Idle
        }
    });
    engine.initialize();
    engine.tick();
    assert_eq!(engine.find_unit("a2").unwrap().health, 92);
    assert_eq!(engine.battle_stats().damage_by_team.get(TEAM_A), Some(&8));
}

#[test]
fn test_nearest_enemy_tie_goes_to_list_order() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(unit("a1", TEAM_A, 5, 5));
    engine.add_unit(unit("b-first", TEAM_B, 4, 5));
    engine.add_unit(unit("b-second", TEAM_B, 6, 5));
    engine.set_decision_provider(TEAM_A, ai::AttackNearest);
    engine.initialize();
    engine.tick();
    assert_eq!(engine.find_unit("b-first").unwrap().health, 92);
    assert_eq!(engine.find_unit("b-second").unwrap().health, 100);
    assert_eq!(
        engine.find_unit("a1").unwrap().target_id.as_deref(),
        Some("b-first")
    );
}

#[test]
fn test_query_surface() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(unit("a1", TEAM_A, 0, 0));
    let mut fallen = unit("a2", TEAM_A, 1, 0);
    fallen.health = 0;
    engine.add_unit(fallen);
    engine.add_unit(unit("b1", TEAM_B, 9, 9));

    assert_eq!(engine.alive_units().len(), 2);
    assert_eq!(engine.team_units(TEAM_A).len(), 2);
    assert_eq!(engine.team_alive_count(TEAM_A), 1);
    assert!(engine.find_unit("nobody").is_none());

    let state = engine.state();
    let a1 = state.find_unit("a1").unwrap();
    assert!(state.allies_in_range(a1, 5).is_empty());
    assert!(state.enemies_in_range(a1, 5).is_empty());
    assert_eq!(state.closest_enemy(a1).map(|u| u.id.as_str()), Some("b1"));
}

#[test]
fn test_reset_preserves_roster_terrain_and_providers() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(fighter("a1", TEAM_A, 4, 4));
    engine.add_unit(fighter("b1", TEAM_B, 5, 4));
    let mut terrain = TerrainGrid::new(10, 10);
    terrain.set(Position::new(0, 0), TerrainCell::from(TerrainKind::Water));
    engine.set_terrain(terrain).unwrap();
    engine.set_decision_provider(TEAM_A, ai::AttackNearest);
    engine.run();
    let first = engine.battle_stats();

    engine.reset();
    assert_eq!(engine.status(), BattleStatus::Idle);
    assert_eq!(engine.current_tick(), 0);
    assert!(engine.state().logs.is_empty());
    assert_eq!(engine.alive_units().len(), 2);
    assert_eq!(engine.state().terrain.move_cost_at(Position::new(0, 0)), Some(10.0));

    engine.run();
    assert_eq!(engine.battle_stats(), first);
}

#[test]
fn test_terrain_is_advisory() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(unit("a1", TEAM_A, 0, 0));
    engine.add_unit(unit("b1", TEAM_B, 9, 9));
    let rows = vec![vec![TerrainCell::from(TerrainKind::Swamp); 10]; 10];
    engine.set_terrain_rows(rows).unwrap();
    engine.set_ai_callback(TEAM_A, |_, _| Action::step(Direction::Right));
    engine.initialize();
    engine.tick();
    assert_eq!(engine.find_unit("a1").unwrap().position, Position::new(1, 0));
}

#[test]
fn test_terrain_dimension_mismatch() {
    let mut engine = BattleEngine::new(10, 10, 100);
    assert!(matches!(
        engine.set_terrain(TerrainGrid::new(10, 9)),
        Err(SimError::TerrainSizeMismatch { .. })
    ));
}

#[test]
fn test_with_config_rejects_zero_width() {
    assert!(matches!(
        BattleEngine::with_config(EngineConfig::new(0, 10, 100)),
        Err(SimError::InvalidGrid { .. })
    ));
}

#[test]
fn test_state_serializes_for_hosts() {
    let mut engine = BattleEngine::new(10, 10, 100);
    engine.add_unit(Unit::from_preset("a1", TEAM_A, UnitType::Archer));
    engine.initialize();

    let json = serde_json::to_value(engine.state()).unwrap();
    assert_eq!(json["status"], "initialized");
    assert_eq!(json["units"][0]["type"], "archer");
    assert_eq!(json["units"][0]["maxHealth"], 80);

    let stats = serde_json::to_value(engine.battle_stats()).unwrap();
    assert_eq!(stats["teamAUnitsRemaining"], 1);
    assert_eq!(stats["winner"], "");
}

#[test]
fn test_bundled_scenario_runs_to_completion() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/skirmish.toml");
    let scenario = Scenario::load(path).unwrap();
    let max_ticks = scenario.grid.max_ticks;

    let mut engine = scenario.build_engine().unwrap();
    assert_eq!(engine.state().units.len(), 8);
    engine.run();
    assert!(engine.is_finished());
    assert!(engine.current_tick() <= max_ticks);

    let mut rerun = scenario.build_engine().unwrap();
    rerun.run();
    assert_eq!(rerun.battle_stats(), engine.battle_stats());
}
