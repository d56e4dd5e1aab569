//! Pooling tests: the bookkeeping pool, the timed lifetime, and the ECS
//! lifecycle systems driven on a bare `World`.

use std::time::Duration;

use avian3d::prelude::*;
use bevy::prelude::*;
use proptest::prelude::*;

use super::*;
use crate::common::layers::Layer;
use crate::common::test_utils::{run_system_once, set_delta};

#[derive(Component, Debug, Default)]
struct Dummy {
    uses: u32,
}

impl Pooled for Dummy {
    const LABEL: &'static str = "dummy";

    fn on_release(&mut self) {
        self.uses = 0;
    }
}

fn counting_factory() -> impl FnMut() -> u32 {
    let mut next = 0;
    move || {
        next += 1;
        next
    }
}

// --------------------------------------------------------------------------------------
// ObjectPool
// --------------------------------------------------------------------------------------

#[test]
fn initialize_constructs_all_free() {
    let mut pool = ObjectPool::new("test", PoolPolicy::Fixed);
    pool.initialize(4, counting_factory());

    assert_eq!(pool.free_len(), 4);
    assert_eq!(pool.in_use_len(), 0);
    assert_eq!(pool.total_constructed(), 4);
}

#[test]
fn fixed_pool_refuses_when_exhausted() {
    let mut pool = ObjectPool::new("projectile", PoolPolicy::Fixed);
    pool.initialize(2, counting_factory());

    let a = pool.acquire(|| unreachable!()).unwrap();
    let b = pool.acquire(|| unreachable!()).unwrap();
    assert_ne!(a, b);

    let err = pool.acquire(|| unreachable!()).unwrap_err();
    assert_eq!(
        err,
        PoolError::Exhausted {
            label: "projectile",
            constructed: 2
        }
    );
    assert_eq!(pool.total_constructed(), 2);
}

#[test]
fn acquire_free_never_constructs() {
    let mut pool = ObjectPool::new("audio", PoolPolicy::Growable { max: None });
    pool.initialize(1, || 7);

    assert_eq!(pool.acquire_free(), Ok(7));
    assert!(matches!(pool.acquire_free(), Err(PoolError::Exhausted { constructed: 1, .. })));
    assert_eq!(pool.total_constructed(), 1);

    pool.release(7).unwrap();
    assert_eq!(pool.acquire_free(), Ok(7));
}

#[test]
fn growable_pool_constructs_on_exhaustion() {
    let mut pool = ObjectPool::new("audio", PoolPolicy::Growable { max: None });
    pool.initialize(1, || 10);

    assert_eq!(pool.acquire(|| 99).unwrap(), 10);
    assert_eq!(pool.acquire(|| 11).unwrap(), 11);
    assert_eq!(pool.in_use_len(), 2);
    assert_eq!(pool.total_constructed(), 2);
}

#[test]
fn growable_pool_respects_hard_cap() {
    let mut pool = ObjectPool::new("audio", PoolPolicy::Growable { max: Some(2) });
    let mut factory = counting_factory();

    assert!(pool.acquire(&mut factory).is_ok());
    assert!(pool.acquire(&mut factory).is_ok());
    assert!(matches!(
        pool.acquire(&mut factory),
        Err(PoolError::Exhausted { constructed: 2, .. })
    ));
}

#[test]
fn double_release_is_rejected_without_duplicating_free_entries() {
    let mut pool = ObjectPool::new("test", PoolPolicy::Fixed);
    pool.initialize(1, || 7);

    let item = pool.acquire(|| unreachable!()).unwrap();
    pool.release(item).unwrap();
    assert_eq!(
        pool.release(item),
        Err(PoolError::InvalidRelease { label: "test" })
    );

    assert_eq!(pool.free_len(), 1);
    assert_eq!(pool.total_constructed(), 1);
}

#[test]
fn releasing_a_foreign_instance_is_rejected() {
    let mut pool = ObjectPool::new("test", PoolPolicy::Fixed);
    pool.initialize(1, || 1);

    assert!(pool.release(42).is_err());
    assert_eq!(pool.free_len(), 1);
    assert!(!pool.is_in_use(42));
}

#[derive(Debug, Clone)]
enum Op {
    Acquire,
    Release(usize),
    DoubleRelease(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Acquire),
        (0usize..16).prop_map(Op::Release),
        (0usize..16).prop_map(Op::DoubleRelease),
    ]
}

proptest! {
    #[test]
    fn conservation_holds_for_any_sequence(
        initial in 0usize..6,
        growable in any::<bool>(),
        ops in proptest::collection::vec(op_strategy(), 0..64),
    ) {
        let policy = if growable { PoolPolicy::Growable { max: None } } else { PoolPolicy::Fixed };
        let mut pool = ObjectPool::new("prop", policy);
        let mut next = 0u32;
        pool.initialize(initial, || { next += 1; next });

        let mut held: Vec<u32> = Vec::new();
        let mut constructed = initial;

        for op in ops {
            match op {
                Op::Acquire => {
                    let before = pool.total_constructed();
                    let fresh = next + 1;
                    if let Ok(item) = pool.acquire(|| fresh) {
                        if item == fresh {
                            next = fresh;
                            constructed += 1;
                        }
                        prop_assert!(!held.contains(&item));
                        held.push(item);
                    } else {
                        prop_assert!(!growable);
                        prop_assert_eq!(pool.total_constructed(), before);
                    }
                }
                Op::Release(i) => {
                    if !held.is_empty() {
                        let item = held.swap_remove(i % held.len());
                        prop_assert!(pool.release(item).is_ok());
                    }
                }
                Op::DoubleRelease(i) => {
                    if !held.is_empty() {
                        let item = held.swap_remove(i % held.len());
                        prop_assert!(pool.release(item).is_ok());
                        prop_assert!(pool.release(item).is_err());
                    }
                }
            }

            prop_assert_eq!(pool.free_len() + pool.in_use_len(), constructed);
            prop_assert_eq!(pool.in_use_len(), held.len());
        }
    }
}

// --------------------------------------------------------------------------------------
// Lifetime
// --------------------------------------------------------------------------------------

#[test]
fn lifetime_expires_exactly_once() {
    let mut lifetime = Lifetime::running(Duration::from_millis(100));
    let step = Duration::from_millis(30);

    let fired: usize = (0..10).filter(|_| lifetime.tick(step)).count();
    assert_eq!(fired, 1);
    assert!(!lifetime.is_running());
}

#[test]
fn lifetime_expires_at_or_after_duration() {
    let mut lifetime = Lifetime::running(Duration::from_millis(100));
    let step = Duration::from_millis(25);

    assert!(!lifetime.tick(step));
    assert!(!lifetime.tick(step));
    assert!(!lifetime.tick(step));
    assert_eq!(lifetime.elapsed(), Duration::from_millis(75));
    assert!(lifetime.tick(step));
}

#[test]
fn reactivation_restarts_from_zero() {
    let mut lifetime = Lifetime::running(Duration::from_millis(100));
    assert!(!lifetime.tick(Duration::from_millis(90)));

    lifetime.activate(Duration::from_millis(100));
    assert_eq!(lifetime.elapsed(), Duration::ZERO);

    // The earlier activation would have expired here.
    assert!(!lifetime.tick(Duration::from_millis(20)));
    assert!(lifetime.tick(Duration::from_millis(80)));
    assert!(!lifetime.tick(Duration::from_millis(500)));
}

#[test]
fn cancelled_lifetime_never_fires() {
    let mut lifetime = Lifetime::running(Duration::from_millis(10));
    assert!(lifetime.cancel());
    assert!(!lifetime.cancel());
    assert!(!lifetime.tick(Duration::from_secs(1)));
}

#[test]
fn idle_lifetime_never_fires() {
    let mut lifetime = Lifetime::idle();
    assert!(!lifetime.tick(Duration::from_secs(3600)));
    assert_eq!(lifetime.duration(), None);
}

// --------------------------------------------------------------------------------------
// ECS lifecycle
// --------------------------------------------------------------------------------------

fn spawn_dummy(world: &mut World, slot: PoolSlot, lifetime: Lifetime) -> Entity {
    world
        .spawn((
            Dummy { uses: 3 },
            slot,
            lifetime,
            Visibility::Visible,
            CollisionLayers::new(Layer::PlayerProjectile, [Layer::Enemy]),
        ))
        .id()
}

fn world_with_pool() -> World {
    let mut world = World::new();
    world.insert_resource(EntityPool::<Dummy>::new(PoolPolicy::Fixed));
    world
}

/// Check an entity out of the world's pool so commit has something to return.
fn check_out(world: &mut World, e: Entity) {
    let mut pool = world.resource_mut::<EntityPool<Dummy>>();
    pool.initialize(1, || e);
    assert_eq!(pool.acquire(|| unreachable!()).unwrap(), e);
}

#[test]
fn expire_marks_pending_only_for_in_use() {
    let mut world = world_with_pool();
    let live = spawn_dummy(&mut world, PoolSlot::InUse, Lifetime::running(Duration::from_millis(10)));
    let free = spawn_dummy(&mut world, PoolSlot::Free, Lifetime::running(Duration::from_millis(10)));

    set_delta(&mut world, Duration::from_millis(20));
    run_system_once(&mut world, expire_lifetimes::<Dummy>);

    assert_eq!(*world.get::<PoolSlot>(live).unwrap(), PoolSlot::PendingRelease);
    assert_eq!(*world.get::<PoolSlot>(free).unwrap(), PoolSlot::Free);
}

#[test]
fn commit_restores_inactive_invariants_and_releases_once() {
    let mut world = world_with_pool();
    let e = spawn_dummy(&mut world, PoolSlot::PendingRelease, Lifetime::running(Duration::from_secs(1)));
    check_out(&mut world, e);

    run_system_once(&mut world, commit_releases::<Dummy>);

    assert_eq!(*world.get::<PoolSlot>(e).unwrap(), PoolSlot::Free);
    assert!(!world.get::<Lifetime>(e).unwrap().is_running());
    assert_eq!(world.get::<Dummy>(e).unwrap().uses, 0);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
    assert_eq!(world.get::<CollisionLayers>(e).unwrap().filters, LayerMask::NONE);

    // A second commit has nothing pending and must not release again.
    run_system_once(&mut world, commit_releases::<Dummy>);

    let pool = world.resource::<EntityPool<Dummy>>();
    assert_eq!(pool.free_len(), 1);
    assert_eq!(pool.in_use_len(), 0);
}

#[test]
fn timeout_then_commit_round_trip() {
    let mut world = world_with_pool();
    let e = spawn_dummy(&mut world, PoolSlot::InUse, Lifetime::running(Duration::from_millis(50)));
    check_out(&mut world, e);

    set_delta(&mut world, Duration::from_millis(30));
    run_system_once(&mut world, expire_lifetimes::<Dummy>);
    run_system_once(&mut world, commit_releases::<Dummy>);
    assert!(world.resource::<EntityPool<Dummy>>().is_in_use(e));

    run_system_once(&mut world, expire_lifetimes::<Dummy>);
    run_system_once(&mut world, commit_releases::<Dummy>);
    assert!(!world.resource::<EntityPool<Dummy>>().is_in_use(e));

    // The cancelled lifetime leaves no dangling timer behind.
    run_system_once(&mut world, expire_lifetimes::<Dummy>);
    assert_eq!(*world.get::<PoolSlot>(e).unwrap(), PoolSlot::Free);
}
