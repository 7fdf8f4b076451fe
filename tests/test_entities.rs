use bot_brawl::entities::*;
use bot_brawl::enemy::Enemy;
use bot_brawl::player::{Launched, Player, Swing};
use bot_brawl::projectiles::*;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// A 200-wide slab centred on the origin; its top surface is y = 5.
fn slab() -> Vec<Platform> {
    vec![Platform::new(0.0, 0.0, 200.0)]
}

// ── Platform ──────────────────────────────────────────────────────────────────

#[test]
fn platform_geometry() {
    let p = Platform::new(0.0, 0.0, 200.0);
    assert_eq!(p.left(), -100.0);
    assert_eq!(p.right(), 100.0);
    assert_eq!(p.top(), 5.0);
    assert_eq!(p.bottom(), -5.0);
    assert!(p.overlaps_x(110.0, 15.0)); // body edge at 95
    assert!(!p.overlaps_x(120.0, 15.0));
}

#[test]
fn landing_ignores_upward_motion() {
    let mut pos = Vec2::new(0.0, 18.0);
    let mut vel = Vec2::new(0.0, 10.0);
    assert!(!land_on_platforms(&mut pos, &mut vel, 15.0, &slab()));
    assert_eq!(pos.y, 18.0);
    assert_eq!(vel.y, 10.0);
}

#[test]
fn landing_with_no_platforms_is_a_no_op() {
    let mut pos = Vec2::new(0.0, 18.0);
    let mut vel = Vec2::new(0.0, -10.0);
    assert!(!land_on_platforms(&mut pos, &mut vel, 15.0, &[]));
}

#[test]
fn overlapping_platforms_last_match_wins() {
    let lower = Platform::new(0.0, 0.0, 200.0); // top 5
    let upper = Platform::new(0.0, 2.0, 200.0); // top 7

    // Feet at y = 4 sit inside both bands.
    let mut pos = Vec2::new(0.0, 19.0);
    let mut vel = Vec2::new(0.0, -10.0);
    assert!(land_on_platforms(&mut pos, &mut vel, 15.0, &[lower.clone(), upper.clone()]));
    assert_eq!(pos.y, 22.0);
    assert_eq!(vel.y, 0.0);

    let mut pos = Vec2::new(0.0, 19.0);
    let mut vel = Vec2::new(0.0, -10.0);
    assert!(land_on_platforms(&mut pos, &mut vel, 15.0, &[upper, lower]));
    assert_eq!(pos.y, 20.0);
}

// ── Player physics ────────────────────────────────────────────────────────────

#[test]
fn grounded_player_never_sinks_below_platform() {
    let platforms = slab();
    let mut p = Player::new(1, 0.0, 20.0); // feet exactly on top (5 + 15)
    for _ in 0..240 {
        p.update(DT, &platforms);
        assert!(p.pos.y >= 20.0 - 1e-4, "sank to {}", p.pos.y);
        assert!(p.on_ground);
    }
}

#[test]
fn airborne_player_is_not_grounded() {
    let mut p = Player::new(1, 0.0, 100.0);
    p.on_ground = true;
    p.update(DT, &slab());
    assert!(!p.on_ground);
    assert!(p.pos.y < 100.0);
}

#[test]
fn player_walking_off_the_edge_falls() {
    let mut p = Player::new(1, 130.0, 20.0); // body spans 115..145, clear of the slab
    p.update(DT, &slab());
    assert!(!p.on_ground);
}

#[test]
fn jump_requires_ground() {
    let mut p = Player::new(1, 0.0, 20.0);
    p.jump();
    assert_eq!(p.vel.y, 0.0);

    p.on_ground = true;
    p.jump();
    assert_eq!(p.vel.y, 300.0);
    assert!(!p.on_ground);
}

#[test]
fn take_damage_reports_kill_and_clamps() {
    let mut p = Player::new(1, 0.0, 0.0);
    assert!(!p.take_damage(5));
    assert_eq!(p.health, 95);
    assert_eq!(p.hit_effect, 1.0);

    p.health = 3;
    assert!(p.take_damage(5));
    assert_eq!(p.health, 0);
    assert!(!p.is_alive());
}

#[test]
fn hit_flash_fades() {
    let mut p = Player::new(1, 0.0, 0.0);
    p.take_damage(1);
    p.update(0.1, &[]);
    assert!(close(p.hit_effect, 0.5));
    p.update(0.5, &[]);
    assert_eq!(p.hit_effect, 0.0);
}

#[test]
fn release_only_stops_matching_direction() {
    let mut p = Player::new(1, 0.0, 0.0);
    p.move_toward(Facing::Left);
    assert_eq!(p.vel.x, -20.0);
    assert_eq!(p.facing, Facing::Left);

    p.release(Facing::Right);
    assert_eq!(p.vel.x, -20.0);
    p.release(Facing::Left);
    assert_eq!(p.vel.x, 0.0);
}

// ── Sword swing ───────────────────────────────────────────────────────────────

#[test]
fn sword_swing_arc_and_damage_window() {
    let mut p = Player::new(1, 0.0, 0.0);
    p.grant_weapon(WeaponKind::Sword);
    assert!(p.primary_action(0.0).is_none());
    assert!(p.is_swinging());

    let expected = [
        (30.0, false),
        (60.0, true),
        (90.0, true),
        (60.0, true),
        (30.0, false),
    ];
    for (angle, window) in expected {
        p.update(DT, &[]);
        assert!(p.is_swinging());
        assert_eq!(p.swing_angle(), angle);
        assert_eq!(p.in_swing_window(), window);
    }

    p.update(DT, &[]);
    assert_eq!(p.swing, Swing::Idle);
    assert_eq!(p.swing_angle(), 0.0);
}

#[test]
fn swing_angle_stays_within_limits() {
    let mut p = Player::new(1, 0.0, 0.0);
    p.grant_weapon(WeaponKind::Sword);
    p.primary_action(0.0);
    for _ in 0..20 {
        p.update(DT, &[]);
        assert!(p.swing_angle().abs() <= 90.0);
    }
}

#[test]
fn attack_while_swinging_does_not_restart() {
    let mut p = Player::new(1, 0.0, 0.0);
    p.grant_weapon(WeaponKind::Sword);
    p.primary_action(0.0);
    p.update(DT, &[]);
    p.primary_action(0.1);
    assert_eq!(p.swing_angle(), 30.0);
}

// ── Gun & grenade actions ─────────────────────────────────────────────────────

#[test]
fn gun_respects_shot_delay() {
    let mut p = Player::new(1, 0.0, 0.0);
    p.grant_weapon(WeaponKind::Gun);

    match p.primary_action(0.0) {
        Some(Launched::Bullet(b)) => {
            assert_eq!(b.pos, Vec2::new(15.0, 0.0));
            assert_eq!(b.vx, 120.0);
            assert_eq!(b.owner, 1);
        }
        other => panic!("expected a bullet, got {:?}", other),
    }
    assert!(p.primary_action(0.1).is_none());
    assert!(matches!(p.primary_action(0.25), Some(Launched::Bullet(_))));
    assert_eq!(p.weapon, Some(WeaponKind::Gun));
}

#[test]
fn grenade_throw_consumes_weapon() {
    let mut p = Player::new(2, 0.0, 0.0);
    p.move_toward(Facing::Left);
    p.grant_weapon(WeaponKind::Grenade);

    match p.primary_action(0.0) {
        Some(Launched::Grenade(g)) => {
            assert_eq!(g.pos, Vec2::new(-15.0, 0.0));
            assert_eq!(g.vel, Vec2::new(-40.0, 15.0));
            assert_eq!(g.owner, 2);
        }
        other => panic!("expected a grenade, got {:?}", other),
    }
    assert_eq!(p.weapon, None);
    assert!(p.primary_action(0.0).is_none());
}

#[test]
fn unarmed_attack_does_nothing() {
    let mut p = Player::new(1, 0.0, 0.0);
    assert!(p.primary_action(0.0).is_none());
    assert!(!p.is_swinging());
}

#[test]
fn held_weapon_expires_after_lifetime() {
    let mut p = Player::new(1, 0.0, 0.0);
    p.grant_weapon(WeaponKind::Gun);
    assert_eq!(p.weapon_seconds_left(), Some(30));

    for _ in 0..30 {
        p.update(1.0, &[]);
    }
    assert_eq!(p.weapon, Some(WeaponKind::Gun)); // exactly 30s is still held
    assert_eq!(p.weapon_seconds_left(), Some(0));

    p.update(1.0, &[]);
    assert_eq!(p.weapon, None);
    assert_eq!(p.weapon_seconds_left(), None);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_contact_damage_then_cooldown() {
    let mut rng = seeded_rng();
    let mut target = Player::new(1, 0.0, 0.0);
    let mut e = Enemy::new(Vec2::new(10.0, 0.0));

    assert!(e.update(DT, &[], &mut target, &mut rng));
    assert_eq!(target.health, 95);
    assert_eq!(e.attack_cooldown, 1.0);

    assert!(!e.update(DT, &[], &mut target, &mut rng));
    assert_eq!(target.health, 95);
}

#[test]
fn enemy_hits_again_once_cooldown_lapses() {
    let mut rng = seeded_rng();
    let mut target = Player::new(1, 0.0, 0.0);
    let mut e = Enemy::new(Vec2::new(10.0, 0.0));
    e.update(DT, &[], &mut target, &mut rng);

    // 61 further ticks cover just over one second of game time.
    let hits = (0..61)
        .filter(|_| e.update(DT, &[], &mut target, &mut rng))
        .count();
    assert_eq!(hits, 1);
    assert_eq!(target.health, 90);
}

#[test]
fn enemy_steers_toward_target() {
    let mut rng = seeded_rng();
    let mut target = Player::new(1, 100.0, 0.0);
    let mut e = Enemy::new(Vec2::new(-100.0, 0.0));
    e.update(DT, &[], &mut target, &mut rng);
    assert!(e.vel.x >= 8.0 && e.vel.x <= 12.0, "vx = {}", e.vel.x);
    assert!(e.pos.x > -100.0);
    assert_eq!(target.health, 100);
}

#[test]
fn enemy_is_clamped_to_arena() {
    let mut rng = seeded_rng();
    let mut target = Player::new(1, 900.0, 0.0);
    let mut e = Enemy::new(Vec2::new(560.0, 400.0));
    e.update(DT, &[], &mut target, &mut rng);
    assert!(e.pos.x <= 500.0);
    assert!(e.pos.y <= 250.0);
}

#[test]
fn enemy_lands_on_platform() {
    let mut rng = seeded_rng();
    let mut target = Player::new(1, 300.0, 17.5);
    let mut e = Enemy::new(Vec2::new(0.0, 17.5)); // feet on the slab top
    e.update(DT, &slab(), &mut target, &mut rng);
    assert!(e.on_ground);
    assert!(close(e.pos.y, 17.5));
}

/// A floor wide enough that a chasing enemy never walks off it.
fn wide_floor() -> Vec<Platform> {
    vec![Platform::new(0.0, 0.0, 2000.0)]
}

#[test]
fn grounded_enemy_hops_when_target_is_close() {
    let mut rng = seeded_rng();
    let mut target = Player::new(1, 150.0, 17.5);
    let mut e = Enemy::new(Vec2::new(0.0, 17.5));

    let mut hops = 0;
    for _ in 0..2000 {
        let grounded = e.on_ground;
        e.update(DT, &wide_floor(), &mut target, &mut rng);
        if e.vel.y > 0.0 {
            assert!(grounded, "hopped while airborne");
            hops += 1;
        }
    }
    assert!(hops >= 1);
}

#[test]
fn enemy_never_hops_toward_a_distant_target() {
    let mut rng = seeded_rng();
    let mut target = Player::new(1, 400.0, 17.5);
    let mut e = Enemy::new(Vec2::new(-400.0, 17.5));

    // Twenty seconds of chasing closes at most 240 of the 800 units.
    for _ in 0..1200 {
        e.update(DT, &wide_floor(), &mut target, &mut rng);
        assert!(e.on_ground);
        assert_eq!(e.vel.y, 0.0);
    }
    assert!(target.pos.distance(e.pos) > 200.0);
}

#[test]
fn spawned_enemy_has_bounded_depth() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let e = Enemy::spawn(Vec2::ZERO, &mut rng);
        assert!(e.z >= -20.0 && e.z < 20.0);
        assert_eq!(e.vel.x.abs(), 10.0);
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn bullet_expires_with_lifetime() {
    let mut b = Bullet::new(Vec2::ZERO, Facing::Right, 1);
    assert!(b.update(0.5));
    assert!(b.update(0.5));
    assert!(b.update(0.5));
    assert!(!b.update(0.5)); // lifetime hits zero at x = 240
    assert!(b.pos.x < 500.0);
}

#[test]
fn bullet_dies_leaving_arena() {
    let mut b = Bullet::new(Vec2::new(490.0, 0.0), Facing::Right, 1);
    assert!(b.update(DT));
    b.pos.x = 499.0;
    assert!(!b.update(DT));
    assert!(b.lifetime > 0.0);
}

#[test]
fn bullet_has_no_gravity() {
    let mut b = Bullet::new(Vec2::new(0.0, 42.0), Facing::Left, 2);
    for _ in 0..10 {
        b.update(DT);
    }
    assert_eq!(b.pos.y, 42.0);
    assert!(b.pos.x < 0.0);
}

// ── Grenades ──────────────────────────────────────────────────────────────────

#[test]
fn grenade_bounce_damps_velocity() {
    let mut g = Grenade::new(Vec2::ZERO, Facing::Right, 1);
    g.vel = Vec2::new(10.0, -20.0);
    g.bounce();
    assert!(close(g.vel.x, 8.0));
    assert!(close(g.vel.y, 12.0));
}

#[test]
fn grenade_bounces_off_platform() {
    let mut g = Grenade::new(Vec2::new(0.0, 14.0), Facing::Right, 1);
    g.vel = Vec2::new(40.0, -60.0);
    let tick = g.update(DT, &slab());
    assert_eq!(tick, GrenadeTick::Flying);

    // Gravity first takes vy to -65, then the bounce reflects it.
    assert!(close(g.vel.y, 0.6 * 65.0));
    assert!(close(g.vel.x, 0.8 * 40.0));
    assert!(close(g.pos.y, 13.0)); // top (5) + grenade radius (8)
}

#[test]
fn grenade_detonates_exactly_once() {
    let mut g = Grenade::new(Vec2::ZERO, Facing::Right, 1);
    let ticks: Vec<GrenadeTick> = (0..5).map(|_| g.update(0.5, &[])).collect();
    assert_eq!(
        ticks,
        vec![
            GrenadeTick::Flying,
            GrenadeTick::Flying,
            GrenadeTick::Flying,
            GrenadeTick::Detonate,
            GrenadeTick::Gone,
        ]
    );
    assert!(g.exploded);
}

#[test]
fn grenade_leaving_arena_is_gone_without_exploding() {
    let mut g = Grenade::new(Vec2::new(499.0, 0.0), Facing::Right, 1);
    assert_eq!(g.update(0.1, &[]), GrenadeTick::Gone);
    assert!(!g.exploded);
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[test]
fn blast_damage_falls_off_linearly() {
    assert_eq!(blast_damage(0.0), 25);
    assert_eq!(blast_damage(150.0), 12);
    assert_eq!(blast_damage(270.0), 2);
    assert_eq!(blast_damage(299.0), 0);
    assert_eq!(blast_damage(300.0), 0);
    assert_eq!(blast_damage(1000.0), 0);
}

#[test]
fn explosion_grows_then_expires() {
    let mut e = Explosion::new(Vec2::ZERO);
    assert_eq!(e.radius, 5.0);
    let mut last = e.radius;
    for _ in 0..7 {
        assert!(e.update(1.0));
        assert!(e.radius > last);
        last = e.radius;
    }
    assert!(!e.update(1.0));
    assert_eq!(e.radius, 300.0);
    assert!(!e.active);
    assert_eq!(e.intensity(), 0.0);
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn pickup_lifetime_uses_simulation_time() {
    let w = WeaponPickup::new(Vec2::ZERO, WeaponKind::Sword, 10.0);
    assert!(w.is_active(10.0));
    assert!(w.is_active(39.9));
    assert!(!w.is_active(40.0));
}

#[test]
fn pickup_pulse_is_cosmetic() {
    let mut w = WeaponPickup::new(Vec2::new(3.0, 4.0), WeaponKind::Gun, 0.0);
    w.update(0.05);
    assert!(w.pulse > 0.0);
    assert!(w.rotation > 0.0);
    assert_eq!(w.pos, Vec2::new(3.0, 4.0));
    assert_eq!(w.kind, WeaponKind::Gun);
}

#[test]
fn random_pickup_kinds_are_all_reachable() {
    let mut rng = seeded_rng();
    let kinds: Vec<WeaponKind> = (0..60)
        .map(|_| WeaponPickup::random(Vec2::ZERO, 0.0, &mut rng).kind)
        .collect();
    for kind in WeaponKind::ALL {
        assert!(kinds.contains(&kind), "{:?} never spawned", kind);
    }
}
