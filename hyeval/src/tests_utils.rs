//! Seeded generators for random trees and contexts.
use rand::Rng;

use crate::context::Context;
use crate::expr::Expression;
use crate::expr::func::*;

/// Name of the `index`-th generated variable: `a`..`z`, then `aa`, `ab`, ...
pub fn variable_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'a' + (index % 26) as u8);
        index /= 26;
        if index == 0 {
            break;
        }
        index -= 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

/// Build a random tree of depth at most `budget + 1`.
///
/// Leaves are constants, or variables drawn from the first `vars` names of
/// [`variable_name`] when `vars > 0`.
pub fn random_expression(budget: usize, vars: usize, rng: &mut impl Rng) -> Expression {
    if budget == 0 || rng.random_bool(0.15) {
        return if vars > 0 && rng.random_bool(0.5) {
            variable(variable_name(rng.random_range(0..vars)))
                .unwrap_or_else(|_| unreachable!("generated names are lowercase letters"))
        } else {
            constant(rng.random_bool(0.5))
        };
    }

    match rng.random_range(0..=6) {
        0 => identity(random_expression(budget - 1, vars, rng)),
        1 => not(random_expression(budget - 1, vars, rng)),
        n => {
            let lhs = random_expression(budget - 1, vars, rng);
            let rhs = random_expression(budget - 1, vars, rng);
            match n {
                2 => and(lhs, rhs),
                3 => or(lhs, rhs),
                4 => xor(lhs, rhs),
                5 => equiv(lhs, rhs),
                6 => implies(lhs, rhs),
                _ => unreachable!(),
            }
        }
    }
}

/// Bind the first `vars` generated names to random values.
pub fn random_context(vars: usize, rng: &mut impl Rng) -> Context {
    (0..vars)
        .map(|i| (variable_name(i), rng.random_bool(0.5)))
        .collect()
}
