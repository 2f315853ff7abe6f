use super::cost::Cost;
use super::cost::Objective;
use super::tree::StrategyTree;
use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use crate::codes::rules::Rules;
use crate::engine::engine::Engine;

/// lower bound on the cost of any guess made from outside the
/// possibility set, or None when no bound can be established
/// cheaply. groups the possibilities by their color multisets:
/// against any outside guess, secrets sharing a multiset share
/// their total match count, so each group is confined to one
/// diagonal band of feedbacks, and the bands can only tell apart
/// a limited number of secrets each.
fn non_possible_bound(rules: &Rules, possibilities: &[Codeword]) -> Option<Cost> {
    let p = rules.pegs();
    let n = possibilities.len();
    if n > p * (p + 3) / 2 {
        return None;
    }

    // sizes of the color-multiset groups, counting extra members
    // beyond the first
    let mut visited = vec![false; n];
    let mut groups = Vec::new();
    for i in 0..n {
        if visited[i] {
            continue;
        }
        let mut extra = 0;
        for j in i + 1..n {
            if !visited[j] && possibilities[i].same_colors(&possibilities[j]) {
                visited[j] = true;
                extra += 1;
            }
        }
        groups.push(extra);
    }
    if groups.len() > p + 1 {
        return None;
    }

    // assign the largest groups to the widest feedback bands; a
    // group that does not fill its band forfeits the bound
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let mut extra = 0;
    for (i, group) in groups.into_iter().enumerate() {
        let avail = p.checked_sub(i + if i < 2 { 1 } else { 0 })?;
        if group >= avail {
            extra += group - avail;
        } else {
            return None;
        }
    }
    Some(Cost::new(
        (extra + n * 2) as u32,
        if extra > 0 { 3 } else { 2 },
        (if extra > 0 { extra } else { n }) as u32,
    ))
}

/// an obviously optimal guess for the given possibilities, with
/// the exact cost of the strategy it starts and the strength in
/// which it is optimal. three levels:
/// - one possibility: guess it;
/// - two possibilities: guess the first;
/// - up to P(P+3)/2 possibilities: a possibility whose partition
///   is all singletons, or failing that all cells of size at most
///   two, accepted only when no outside guess could beat it.
pub fn obvious_guess(
    engine: &Engine,
    possibilities: &[Codeword],
    max_depth: u32,
    objective: Objective,
) -> Option<(Codeword, Cost, Objective)> {
    let count = possibilities.len();
    if count == 0 || max_depth < 1 {
        return None;
    }
    if count == 1 {
        return Some((possibilities[0], Cost::new(1, 1, 1), Objective::MinWorst));
    }
    if max_depth < 2 {
        return None;
    }
    if count == 2 {
        return Some((possibilities[0], Cost::new(3, 2, 1), Objective::MinWorst));
    }
    let p = engine.rules().pegs();
    if count > p * (p + 3) / 2 {
        return None;
    }

    // scan the possibilities; ignore the perfect bucket and the
    // unreachable (P-1, 1) slot just below it
    let size = Feedback::size(engine.rules());
    let mut best: Option<(Codeword, usize)> = None;
    for guess in possibilities {
        let freq = engine.frequencies(guess, possibilities);
        let mut cells = 1; // the perfect cell
        let mut widest = 0;
        for k in 0..size - 2 {
            if freq[k] > 0 {
                widest = widest.max(freq[k]);
                cells += 1;
            }
        }
        if widest == 1 {
            // all singleton cells: one secret in one step, the
            // rest in two
            let cost = Cost::new(2 * count as u32 - 1, 2, count as u32 - 1);
            return Some((*guess, cost, Objective::MinWorst));
        }
        if widest > 2 {
            continue;
        }
        let extra = count - cells; // number of two-secret cells
        match best {
            Some((_, least)) if least <= extra => {}
            _ => best = Some((*guess, extra)),
        }
    }

    let (guess, extra) = best?;
    if max_depth < 3 {
        return None;
    }
    let cost = Cost::new((2 * count - 1 + extra) as u32, 3, extra as u32);

    // a single two-secret cell is unbeatable on steps alone
    if extra == 1 && objective == Objective::MinSteps {
        return Some((guess, cost, Objective::MinSteps));
    }

    // otherwise accept only if no outside guess could do better
    // under the requested objective
    let bound = non_possible_bound(engine.rules(), possibilities);
    match bound {
        Some(bound) if objective.superior(&bound, &cost) => None,
        None => None,
        Some(_) => Some((guess, cost, objective)),
    }
}

/// emit the strategy started by an obvious guess into the tree
/// and return its cost. every cell holds at most two secrets:
/// a singleton is revealed by guessing it, a pair by guessing
/// its first member and then, on a miss, the second.
pub fn fill_obvious(
    engine: &Engine,
    secrets: &[Codeword],
    max_depth: u32,
    objective: Objective,
    tree: &mut StrategyTree,
    parent: usize,
) -> Option<Cost> {
    let (guess, cost, _) = obvious_guess(engine, secrets, max_depth, objective)?;
    let perfect = engine.perfect();
    let feedbacks = engine.feedbacks(&guess, secrets);

    let mut steps = 0;
    for k in 0..Feedback::size(engine.rules()) {
        let fb = Feedback::from_ordinal(k);
        let mut cell: Option<(Codeword, usize)> = None;
        for (i, secret) in secrets.iter().enumerate() {
            if feedbacks[i] != fb {
                continue;
            }
            match cell {
                None => {
                    steps += 1;
                    let node = tree.insert_child(parent, guess, fb);
                    if fb != perfect {
                        steps += 1;
                        tree.insert_child(node, *secret, perfect);
                    }
                    cell = Some((*secret, node));
                }
                Some((first, node)) => {
                    steps += 3;
                    let miss = engine.compare(secret, &first);
                    let inner = tree.insert_child(node, first, miss);
                    tree.insert_child(inner, *secret, perfect);
                }
            }
        }
    }
    debug_assert!(steps == cost.steps);
    Some(cost)
}
