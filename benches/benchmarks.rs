use codebreaker::codes::rules::Rules;
use codebreaker::engine::compare::Comparer;
use codebreaker::engine::compare::Kernel;
use codebreaker::engine::engine::Engine;
use codebreaker::filters::filter::Filter;
use codebreaker::solve::heuristic::Heuristic;
use codebreaker::solve::strategy::Strategy;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        enumerating_the_universe,
        comparing_generic_kernel,
        comparing_norepeat_kernel,
        tallying_frequencies,
        partitioning_the_universe,
        filtering_color_equivalence,
        filtering_constraint_equivalence,
        scoring_a_heuristic_guess,
}

fn enumerating_the_universe(c: &mut criterion::Criterion) {
    let rules = Rules::try_from("p4c6r").unwrap();
    c.bench_function("enumerate the p4c6r universe", |b| b.iter(|| rules.enumerate()));
}

fn comparing_generic_kernel(c: &mut criterion::Criterion) {
    let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
    let guess = engine.rules().codeword("1122").unwrap();
    let universe = engine.universe();
    c.bench_function("compare one guess against 1296 secrets (generic)", |b| {
        b.iter(|| {
            let comparer = Comparer::new(Kernel::Generic, &guess);
            universe
                .iter()
                .map(|s| comparer.compare(s).ordinal())
                .sum::<usize>()
        })
    });
}

fn comparing_norepeat_kernel(c: &mut criterion::Criterion) {
    let engine = Engine::new(Rules::try_from("p4c10n").unwrap());
    let guess = engine.rules().codeword("0123").unwrap();
    let universe = engine.universe();
    c.bench_function("compare one guess against 5040 secrets (no-repeat)", |b| {
        b.iter(|| {
            let comparer = Comparer::new(Kernel::NoRepeat, &guess);
            universe
                .iter()
                .map(|s| comparer.compare(s).ordinal())
                .sum::<usize>()
        })
    });
}

fn tallying_frequencies(c: &mut criterion::Criterion) {
    let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
    let guess = engine.rules().codeword("1122").unwrap();
    c.bench_function("tally feedback frequencies over the universe", |b| {
        b.iter(|| engine.frequencies(&guess, engine.universe()))
    });
}

fn partitioning_the_universe(c: &mut criterion::Criterion) {
    let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
    let guess = engine.rules().codeword("1122").unwrap();
    c.bench_function("partition the universe in place", |b| {
        b.iter_batched(
            || engine.universe().to_vec(),
            |mut secrets| engine.partition(&mut secrets, &guess),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn filtering_color_equivalence(c: &mut criterion::Criterion) {
    let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
    let guess = engine.rules().codeword("1122").unwrap();
    let response = codebreaker::codes::feedback::Feedback::try_from("0A1B").unwrap();
    let remaining = engine.filter_by_feedback(engine.universe(), &guess, response);
    let mut filter = Filter::color(engine.rules());
    filter.constrain(&engine, &guess, response, &remaining);
    c.bench_function("color-equivalence filter over the universe", |b| {
        b.iter(|| filter.canonical(&engine, engine.universe()))
    });
}

fn filtering_constraint_equivalence(c: &mut criterion::Criterion) {
    let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
    let filter = Filter::constraint(engine.rules());
    c.bench_function("constraint-equivalence filter over the universe", |b| {
        b.iter(|| filter.canonical(&engine, engine.universe()))
    });
}

fn scoring_a_heuristic_guess(c: &mut criterion::Criterion) {
    let engine = Engine::new(Rules::try_from("p4c6r").unwrap());
    let strategy = Strategy::Heuristic(Heuristic::MinAvg);
    let candidates = Filter::standard(engine.rules()).canonical(&engine, engine.universe());
    let universe = engine.universe().to_vec();
    c.bench_function("pick a minavg guess among canonical openings", |b| {
        b.iter(|| strategy.make_guess(&engine, &universe, &candidates))
    });
}
