use hyeval::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn var(name: &str) -> Expression {
    variable(name).unwrap()
}

fn unbound(name: &str) -> EvalError {
    EvalError::UnboundVariable {
        name: name.to_string(),
    }
}

// Seeded generator local to the tests; leaves are constants or variables `a`..`d`.
fn random_tree(budget: usize, rng: &mut impl Rng) -> Expression {
    const NAMES: [&str; 4] = ["a", "b", "c", "d"];
    if budget == 0 || rng.random_bool(0.2) {
        return if rng.random_bool(0.5) {
            var(NAMES[rng.random_range(0..NAMES.len())])
        } else {
            constant(rng.random_bool(0.5))
        };
    }
    match rng.random_range(0..7) {
        0 => identity(random_tree(budget - 1, rng)),
        1 => not(random_tree(budget - 1, rng)),
        n => {
            let lhs = random_tree(budget - 1, rng);
            let rhs = random_tree(budget - 1, rng);
            let op = [
                BinaryOp::And,
                BinaryOp::Or,
                BinaryOp::Xor,
                BinaryOp::Equivalence,
                BinaryOp::Implication,
            ][n - 2];
            Expression::binary(op, lhs, rhs)
        }
    }
}

// Forks expected for `bound`, computed from cached counts without evaluating.
fn expected_forks(e: &Expression, bound: usize) -> usize {
    match e {
        Expression::Constant(_) | Expression::Variable(_) => 0,
        Expression::Unary(node) => expected_forks(node.operand(), bound),
        Expression::Binary(node) => {
            if node.lhs().node_count() + node.rhs().node_count() >= bound {
                1 + expected_forks(node.lhs(), bound) + expected_forks(node.rhs(), bound)
            } else {
                0
            }
        }
    }
}

#[test]
fn single_fork_at_threshold() {
    let ctx = Context::new();
    let counter = ForkCounter::new();
    let e = and(constant(true), constant(false));

    assert_eq!(e.evaluate_parallel(Some(&ctx), 2, &counter), Ok(false));
    assert_eq!(counter.get(), 1);

    counter.reset();
    assert_eq!(e.evaluate_parallel(Some(&ctx), 3, &counter), Ok(false));
    assert_eq!(counter.get(), 0);
}

#[test]
fn bound_one_with_bound_variables() {
    let mut ctx = Context::new();
    ctx.set("a", false);
    let counter = ForkCounter::new();

    assert_eq!(
        and(var("a"), var("a")).evaluate_parallel(Some(&ctx), 1, &counter),
        Ok(false)
    );
    assert_eq!(counter.get(), 1);
}

#[test]
fn nested_forks() {
    let ctx = Context::new();
    let counter = ForkCounter::new();
    let bigger = equiv(
        implies(constant(false), constant(true)),
        or(not(constant(false)), identity(constant(true))),
    );

    assert_eq!(bigger.evaluate_parallel(Some(&ctx), 6, &counter), Ok(true));
    assert_eq!(counter.get(), 1);

    counter.reset();
    assert_eq!(bigger.evaluate_parallel(Some(&ctx), 2, &counter), Ok(true));
    assert_eq!(counter.get(), 3);

    counter.reset();
    assert_eq!(bigger.evaluate_parallel(Some(&ctx), 9, &counter), Ok(true));
    assert_eq!(counter.get(), 0);
}

#[test]
fn unary_nodes_never_fork() {
    let mut ctx = Context::new();
    ctx.set("a", false);
    ctx.set("b", false);
    ctx.set("c", true);
    let counter = ForkCounter::new();
    let bigger = identity(and(xor(var("a"), not(var("b"))), var("c")));

    assert_eq!(bigger.evaluate_parallel(Some(&ctx), 2, &counter), Ok(true));
    assert_eq!(counter.get(), 2);

    counter.reset();
    let chain = not(not(not(identity(constant(true)))));
    assert_eq!(chain.evaluate_parallel(None, 0, &counter), Ok(false));
    assert_eq!(counter.get(), 0);
}

#[test]
fn forked_task_never_short_circuits() {
    let ctx = Context::new();
    let counter = ForkCounter::new();
    let e = and(constant(false), var("x"));

    assert_eq!(e.evaluate_short(Some(&ctx)), Ok(false));
    assert_eq!(e.evaluate_parallel(Some(&ctx), 2, &counter), Err(unbound("x")));
    assert_eq!(counter.get(), 1);

    // Below the threshold the exhaustive path is taken, which fails the same way.
    counter.reset();
    assert_eq!(e.evaluate_parallel(Some(&ctx), 3, &counter), Err(unbound("x")));
    assert_eq!(counter.get(), 0);
}

#[test]
fn error_crosses_thread_boundary() {
    let mut ctx = Context::new();
    ctx.set("a", true);
    let counter = ForkCounter::new();
    let e = or(var("a"), and(var("a"), not(var("missing"))));

    assert_eq!(e.evaluate_short(Some(&ctx)), Ok(true));
    for bound in 0..=5 {
        assert_eq!(
            e.evaluate_parallel(Some(&ctx), bound, &counter),
            Err(unbound("missing")),
            "bound {bound}"
        );
    }
}

#[test]
fn left_error_wins_when_both_sides_fail() {
    let ctx = Context::new();
    let counter = ForkCounter::new();
    let e = xor(not(var("left")), identity(var("right")));

    for bound in 0..6 {
        assert_eq!(
            e.evaluate_parallel(Some(&ctx), bound, &counter),
            Err(unbound("left")),
            "bound {bound}"
        );
    }
}

#[test]
fn forked_task_is_joined_even_when_left_fails() {
    let ctx: Context = [("a", true)].into_iter().collect();
    let counter = ForkCounter::new();
    // The right side forks again below the root; all of those forks must be counted
    // before the root returns its left-hand error.
    let right = and(
        and(var("a"), var("a")),
        and(var("a"), var("a")),
    );
    let e = equiv(var("missing"), right);

    assert_eq!(
        e.evaluate_parallel(Some(&ctx), 2, &counter),
        Err(unbound("missing"))
    );
    assert_eq!(counter.get(), 4);
}

#[test]
fn agrees_with_exhaustive_on_random_trees() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x42);
    let counter = ForkCounter::new();

    for _ in 0..60 {
        let e = random_tree(7, &mut rng);
        let ctx: Context = ["a", "b", "c", "d"]
            .into_iter()
            .map(|name| (name, rng.random_bool(0.5)))
            .collect();

        let complete = e.evaluate_complete(Some(&ctx)).unwrap();
        assert_eq!(e.evaluate_short(Some(&ctx)), Ok(complete), "{e}");

        for bound in [0, 1, 2, 3, 5, 8, 13, e.node_count(), e.node_count() + 1] {
            counter.reset();
            assert_eq!(
                e.evaluate_parallel(Some(&ctx), bound, &counter),
                Ok(complete),
                "{e} with bound {bound}"
            );
            assert_eq!(counter.get(), expected_forks(&e, bound), "{e} with bound {bound}");
        }
    }
}

#[test]
fn partial_contexts_fail_like_exhaustive() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x1337);
    let counter = ForkCounter::new();

    for _ in 0..60 {
        let e = random_tree(6, &mut rng);
        // Only `a` and `b` are bound; `c` and `d` are missing.
        let ctx: Context = [("a", rng.random_bool(0.5)), ("b", rng.random_bool(0.5))]
            .into_iter()
            .collect();

        let complete = e.evaluate_complete(Some(&ctx));
        for bound in [0, 2, 4, 16] {
            assert_eq!(
                e.evaluate_parallel(Some(&ctx), bound, &counter),
                complete,
                "{e} with bound {bound}"
            );
        }
        if let Ok(value) = complete {
            assert_eq!(e.evaluate_short(Some(&ctx)), Ok(value), "{e}");
        }
    }
}

#[test]
fn global_counter_is_shared() {
    let global = ForkCounter::global();
    let before = global.get();
    let e = or(constant(false), constant(true));
    assert_eq!(e.evaluate_parallel(None, 0, global), Ok(true));
    assert!(global.get() >= before + 1);
}

#[test]
fn deep_chains_agree_with_exhaustive_evaluation() {
    let mut chain = constant(true);
    for _ in 0..200_000 {
        chain = not(chain);
    }
    let e = and(constant(true), chain);
    let counter = ForkCounter::new();

    assert_eq!(e.evaluate_complete(None), Ok(true));
    assert_eq!(e.evaluate_short(None), Ok(true));
    assert_eq!(e.evaluate_parallel(None, 0, &counter), Ok(true));
    assert_eq!(counter.get(), 1);

    let config = EvalConfig::from_toml_str("bound = 0\nstack_size = 65536").unwrap();
    let evaluator = Evaluator::new(config);
    assert_eq!(evaluator.evaluate(&e, None), Ok(true));
    assert_eq!(evaluator.forks(), 1);
}
