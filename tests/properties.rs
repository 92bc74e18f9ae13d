//! Property tests for permutation validity, evaluation and the run loop.

use proptest::prelude::*;
use rand::seq::SliceRandom;
use tsp_evo::ga::{
    order_crossover_at, Crossover, EvolutionConfig, EvolutionEngine, Inversion, Mutation,
    OrderedCrossover, PartiallyMatchedCrossover, Population, ShuffleIndexes,
};
use tsp_evo::random::create_rng;
use tsp_evo::tsp::{is_permutation, CoordinateTable, TourEvaluator};

fn shuffled(n: usize, seed: u64) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut create_rng(seed));
    perm
}

fn coords_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-1000.0..1000.0f64, -1000.0..1000.0f64), min..max)
}

proptest! {
    #[test]
    fn tour_length_non_negative_and_reversal_symmetric(
        coords in coords_strategy(1, 25),
        seed in any::<u64>(),
    ) {
        let table = CoordinateTable::from_coordinates(coords).unwrap();
        let eval = TourEvaluator::new(&table);
        let tour = shuffled(table.len(), seed);
        let mut reversed = tour.clone();
        reversed.reverse();

        let forward = eval.tour_length(&tour);
        prop_assert!(forward >= 0.0);
        prop_assert!((forward - eval.tour_length(&reversed)).abs() <= 1e-9 * forward.max(1.0));
    }

    #[test]
    fn ordered_crossover_any_cut_points_is_valid(
        (n, s1, s2, a, b) in (1usize..40).prop_flat_map(|n| {
            (Just(n), any::<u64>(), any::<u64>(), 0..n, 0..n)
        })
    ) {
        let p1 = shuffled(n, s1);
        let p2 = shuffled(n, s2);
        let (start, end) = (a.min(b), a.max(b));
        let (c1, c2) = order_crossover_at(&p1, &p2, start, end);

        prop_assert!(is_permutation(&c1, n), "child1 {:?}", c1);
        prop_assert!(is_permutation(&c2, n), "child2 {:?}", c2);
        prop_assert_eq!(&c1[start..=end], &p1[start..=end]);
        prop_assert_eq!(&c2[start..=end], &p2[start..=end]);
    }

    #[test]
    fn random_crossovers_are_valid(n in 1usize..40, seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let p1 = shuffled(n, seed ^ 1);
        let p2 = shuffled(n, seed ^ 2);

        let (c1, c2) = OrderedCrossover.crossover(&p1, &p2, &mut rng);
        prop_assert!(is_permutation(&c1, n) && is_permutation(&c2, n));

        let (c1, c2) = PartiallyMatchedCrossover.crossover(&p1, &p2, &mut rng);
        prop_assert!(is_permutation(&c1, n) && is_permutation(&c2, n));
    }

    #[test]
    fn mutation_sequences_keep_permutation(
        n in 1usize..40,
        indpb in 0.0..=1.0f64,
        rounds in 1usize..30,
        seed in any::<u64>(),
    ) {
        let mut rng = create_rng(seed);
        let mut genome = shuffled(n, seed);
        let shuffle = ShuffleIndexes::new(indpb);
        for _ in 0..rounds {
            shuffle.mutate(&mut genome, &mut rng);
            Inversion.mutate(&mut genome, &mut rng);
            prop_assert!(is_permutation(&genome, n), "{:?}", genome);
        }
    }

    #[test]
    fn evaluate_invalid_only_touches_invalid(
        coords in coords_strategy(3, 15),
        size in 1usize..30,
        seed in any::<u64>(),
    ) {
        let table = CoordinateTable::from_coordinates(coords).unwrap();
        let eval = TourEvaluator::new(&table);
        let mut rng = create_rng(seed);
        let mut pop = Population::initialize(size, table.len(), &mut rng);
        prop_assert_eq!(pop.evaluate_invalid(&eval, false), size);

        // Invalidate every other individual and remember the rest.
        let mut edited = pop.individuals().to_vec();
        for ind in edited.iter_mut().step_by(2) {
            let mut genome = ind.genome().to_vec();
            genome.reverse();
            ind.replace_genome(genome);
        }
        let before: Vec<_> = edited.iter().map(|ind| ind.fitness()).collect();
        pop.replace(edited);

        let evaluated = pop.evaluate_invalid(&eval, false);
        prop_assert_eq!(evaluated, size.div_ceil(2));
        for (ind, old) in pop.iter().zip(before) {
            prop_assert!(ind.is_valid());
            if old.is_valid() {
                prop_assert_eq!(ind.fitness(), old);
            } else {
                let expected = eval.tour_length(ind.genome());
                prop_assert_eq!(ind.length(), Some(expected));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_generation_holds_permutations(
        coords in coords_strategy(2, 20),
        seed in any::<u64>(),
    ) {
        let table = CoordinateTable::from_coordinates(coords).unwrap();
        let n = table.len();
        let config = EvolutionConfig::default()
            .with_population_size(20)
            .with_max_generations(15)
            .with_crossover_rate(0.9)
            .with_mutation_rate(0.5)
            .with_indpb(0.2)
            .with_seed(seed);
        let engine = EvolutionEngine::new(config).unwrap();

        let mut violations = Vec::new();
        let mut sizes = Vec::new();
        let result = engine
            .run_observed(&table, None, |stats, pop| {
                sizes.push(pop.len());
                for ind in pop {
                    if !is_permutation(ind.genome(), n) || !ind.is_valid() {
                        violations.push((stats.generation, ind.genome().to_vec()));
                    }
                }
            })
            .unwrap();

        prop_assert!(violations.is_empty(), "{:?}", violations);
        prop_assert!(sizes.iter().all(|&s| s == 20));
        prop_assert_eq!(sizes.len(), 16);
        prop_assert!(is_permutation(&result.tour.points, n));
        prop_assert!(result.tour.length >= 0.0);
    }
}
