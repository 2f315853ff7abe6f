use super::bounds::Bounds;
use super::cost::Constraints;
use super::cost::Cost;
use super::cost::Objective;
use super::obvious::fill_obvious;
use super::tree::StrategyTree;
use crate::Error;
use crate::codes::codeword::Codeword;
use crate::codes::feedback::Feedback;
use crate::engine::engine::Engine;
use crate::filters::filter::Filter;

/// exhaustive branch-and-bound search for a provably optimal
/// strategy under the given objective and constraints. two-phase
/// equivalence filtering thins the candidates: the response-
/// independent constraint filter runs once per guess, and the
/// response-dependent color filter refines each cell.
pub fn build_optimal_strategy_tree(
    engine: &Engine,
    objective: Objective,
    constraints: Constraints,
) -> Result<(StrategyTree, Cost), Error> {
    let mut secrets = engine.universe().to_vec();
    let filter1 = Filter::constraint(engine.rules());
    let filter2 = Filter::color(engine.rules());
    let bounds = Bounds::new(engine);
    let initial = filter2.canonical(engine, &filter1.canonical(engine, engine.universe()));
    log::info!(
        "optimal search for {}: {} candidate openings",
        engine.rules(),
        initial.len()
    );

    let mut tree = StrategyTree::new(*engine.rules());
    let threshold = Cost::new(1_000_000, 100, 0);
    let cost = search(
        engine,
        &mut secrets,
        &initial,
        &filter1,
        &filter2,
        &bounds,
        0,
        objective,
        constraints,
        threshold,
        &mut tree,
        StrategyTree::root(),
    );
    match cost {
        Some(cost) => {
            log::info!("optimal strategy found: {}", cost);
            Ok((tree, cost))
        }
        None => Err(Error::SearchInfeasible),
    }
}

/// find the cheapest strategy for the given secrets, splicing it
/// under `parent`. the returned cost counts every guess made
/// from this state on; None means no strategy fits the depth
/// limit or beats the threshold (exclusive of the guess that
/// led here).
#[allow(clippy::too_many_arguments)]
fn search(
    engine: &Engine,
    secrets: &mut [Codeword],
    candidates: &[Codeword],
    filter1: &Filter,
    filter2: &Filter,
    bounds: &Bounds,
    depth: u32,
    objective: Objective,
    constraints: Constraints,
    threshold: Cost,
    tree: &mut StrategyTree,
    parent: usize,
) -> Option<Cost> {
    if secrets.is_empty() || constraints.max_depth == 0 {
        return None;
    }
    let n = secrets.len() as u32;
    let perfect = engine.perfect();
    if n == 1 {
        tree.insert_child(parent, secrets[0], perfect);
        return Some(Cost::new(1, 1, 1));
    }

    // a provably optimal shortcut settles this state outright
    if constraints.use_obvious {
        if let Some(cost) = fill_obvious(
            engine,
            secrets,
            constraints.max_depth,
            objective,
            tree,
            parent,
        ) {
            return Some(cost);
        }
    }

    // from here every secret costs one initial guess plus at
    // least one more level; rebase the limits to the state after
    // that initial guess
    let mut constraints = constraints;
    if constraints.max_depth == 1 {
        return None;
    }
    constraints.max_depth -= 1;
    let mut threshold = threshold;
    if threshold.steps <= n {
        return None;
    }
    threshold.steps -= n;
    if threshold.depth <= 1 {
        return None;
    }
    threshold.depth -= 1;

    // score candidates by their lower bounds; trying promising
    // guesses first tightens the threshold early
    let scores = bounds.evaluate(engine, secrets, candidates);
    let mut order = (0..candidates.len()).collect::<Vec<_>>();
    let snapshot = constraints.pos_only.then(|| secrets.to_vec());

    let mut best: Option<(Cost, StrategyTree)> = None;
    for index in 0..order.len() {
        // selection scan keeps the earliest of tied candidates,
        // like a stable sort, without paying for a full sort
        let mut pick = index;
        for j in index + 1..order.len() {
            if objective.superior(&scores[order[j]], &scores[order[pick]]) {
                pick = j;
            }
        }
        order.swap(index, pick);
        let i = order[index];

        // the sort guarantees no remaining candidate can win
        if !objective.superior(&scores[i], &threshold) {
            log::trace!(
                "depth {}: pruned {} candidates at bound {}",
                depth,
                order.len() - index,
                scores[i]
            );
            break;
        }
        if scores[i].depth > constraints.max_depth {
            continue;
        }

        let guess = candidates[i];
        let (freq, cells) = engine.partition(secrets, &guess);

        // solve small cells first: they are cheap and refine the
        // running bound before the expensive ones start
        let mut responses = cells.occupied().collect::<Vec<_>>();
        responses.sort_by_key(|k| cells.cell(*k).len());
        if responses.len() <= 1 {
            continue;
        }

        let mut bound = vec![Cost::zero(); freq.len()];
        let mut actual = vec![None::<Cost>; freq.len()];
        for k in responses.iter().copied() {
            if k == perfect.ordinal() {
                actual[k] = Some(Cost::zero());
            } else {
                bound[k] = bounds.simple_estimate(freq[k] as usize);
            }
        }
        let running = |actual: &[Option<Cost>], bound: &[Cost]| {
            responses.iter().fold(Cost::zero(), |mut total, k| {
                total.absorb(actual[*k].unwrap_or(bound[*k]));
                total
            })
        };
        debug_assert!(running(&actual, &bound).steps == scores[i].steps);

        let mut pruned = false;
        let mut this_tree = StrategyTree::new(*engine.rules());
        let mut pre_filter = None;
        let mut pre_filtered: Option<Vec<Codeword>> = None;

        for k in responses.iter().copied() {
            let feedback = Feedback::from_ordinal(k);
            let node = this_tree.insert_child(StrategyTree::root(), guess, feedback);
            if feedback == perfect {
                continue;
            }
            let cell = cells.cell(k);
            if constraints.max_depth == 1 && cell.len() > 1 {
                pruned = true;
                break;
            }

            // response-independent filtering, shared by all cells
            if pre_filtered.is_none() {
                let mut filter = filter1.clone();
                filter.constrain(engine, &guess, Feedback::empty(), engine.universe());
                let base = snapshot.as_deref().unwrap_or(engine.universe());
                pre_filtered = Some(filter.canonical(engine, base));
                pre_filter = Some(filter);
            }

            // response-dependent filtering for this cell
            let mut child_filter = filter2.clone();
            child_filter.constrain(engine, &guess, feedback, &secrets[cell.clone()]);
            let canonical = child_filter.canonical(engine, pre_filtered.as_ref().unwrap());

            // everything the other cells are guaranteed to cost
            // eats into this cell's share of the threshold
            let slack = running(&actual, &bound).steps - bound[k].steps;
            let child_threshold = Cost {
                steps: threshold.steps.saturating_sub(slack),
                ..threshold
            };
            let cost = search(
                engine,
                &mut secrets[cell],
                &canonical,
                pre_filter.as_ref().unwrap(),
                &child_filter,
                bounds,
                depth + 1,
                objective,
                constraints,
                child_threshold,
                &mut this_tree,
                node,
            );
            match cost {
                None => {
                    pruned = true;
                    break;
                }
                Some(cost) => {
                    actual[k] = Some(cost);
                    if !objective.superior(&running(&actual, &bound), &threshold) {
                        pruned = true;
                        break;
                    }
                }
            }
        }

        if !pruned {
            let total = running(&actual, &bound);
            threshold = total;
            best = Some((total, this_tree));
        }
    }

    let (mut cost, subtree) = best?;
    tree.insert_subtree(parent, &subtree, false);
    cost.deepen(n);
    Some(cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::rules::Rules;
    use crate::solve::builder::build_strategy_tree;
    use crate::solve::heuristic::Heuristic;
    use crate::solve::strategy::Strategy;

    #[test]
    fn tiny_game_optimum_is_exact() {
        // p2c2r: no first guess separates all four secrets, so
        // the best any strategy can do is 1+2+2+3 = 8 steps
        let engine = Engine::new(Rules::try_from("p2c2r").unwrap());
        let (tree, cost) =
            build_optimal_strategy_tree(&engine, Objective::MinSteps, Constraints::default())
                .unwrap();
        assert!(cost.steps == 8);
        assert!(cost.depth == 3);
        let leaves = (0..tree.len()).filter(|i| tree.is_leaf(*i)).count();
        assert!(leaves == 4);
        let (_, total) = tree.depth_info(10);
        assert!(total == cost.steps);
    }

    #[test]
    fn optimal_beats_or_ties_every_heuristic() {
        let engine = Engine::new(Rules::try_from("p3c3r").unwrap());
        let (_, optimal) =
            build_optimal_strategy_tree(&engine, Objective::MinSteps, Constraints::default())
                .unwrap();
        for heuristic in [
            Heuristic::MinMax,
            Heuristic::MinAvg,
            Heuristic::MaxEntropy,
            Heuristic::MaxParts,
        ] {
            let tree = build_strategy_tree(
                &engine,
                &Strategy::Heuristic(heuristic),
                &Filter::standard(engine.rules()),
                &Constraints::default(),
            );
            let (_, total) = tree.depth_info(10);
            assert!(optimal.steps <= total);
        }
    }

    #[test]
    fn optimal_tree_reveals_every_secret() {
        let engine = Engine::new(Rules::try_from("p3c3r").unwrap());
        let (tree, cost) =
            build_optimal_strategy_tree(&engine, Objective::MinSteps, Constraints::default())
                .unwrap();
        let leaves = (0..tree.len()).filter(|i| tree.is_leaf(*i)).count();
        assert!(leaves == engine.universe().len());
        let (freq, total) = tree.depth_info(10);
        assert!(total == cost.steps);
        assert!(freq.iter().sum::<u32>() as usize == engine.universe().len());
    }

    #[test]
    fn depth_cap_can_be_infeasible() {
        let engine = Engine::new(Rules::try_from("p2c2r").unwrap());
        let strict = Constraints {
            max_depth: 2,
            ..Constraints::default()
        };
        let result = build_optimal_strategy_tree(&engine, Objective::MinSteps, strict);
        assert!(matches!(result, Err(Error::SearchInfeasible)));
    }

    #[test]
    fn min_depth_objective_caps_the_tree() {
        let engine = Engine::new(Rules::try_from("p3c3r").unwrap());
        let (tree, cost) =
            build_optimal_strategy_tree(&engine, Objective::MinDepth, Constraints::default())
                .unwrap();
        let (freq, _) = tree.depth_info(10);
        let deepest = freq.iter().rposition(|n| *n > 0).unwrap() + 1;
        assert!(deepest as u32 == cost.depth);
    }

    // the classic benchmark; takes a while, run on demand with
    // cargo test --release knuth -- --ignored
    #[test]
    #[ignore]
    fn knuth_optimum_for_mastermind() {
        let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
        let (tree, cost) =
            build_optimal_strategy_tree(&engine, Objective::MinSteps, Constraints::default())
                .unwrap();
        assert!(cost.steps == 5625);
        let leaves = (0..tree.len()).filter(|i| tree.is_leaf(*i)).count();
        assert!(leaves == 1296);
        let (freq, total) = tree.depth_info(10);
        assert!(total == 5625);
        assert!(freq[6..].iter().all(|n| *n == 0));
    }
}
