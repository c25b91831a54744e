use crate::cards::Deck;
use crate::config::Config;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::time::Instant;

/// Heuristic deck search: evolve a population of decks toward winning at
/// every cut, scoring each deck with the concrete evaluator.
///
/// Unlike the constraint model this never proves anything. It either finds a
/// deck that wins all requested cuts or returns the best deck it saw.
#[derive(Debug, Clone, Copy)]
pub struct Genetic {
    config: Config,
    seed: u64,
    population: usize,
    crossovers: usize,
    mutations: usize,
}

/// What a search run ended with.
#[derive(Debug, Clone)]
pub struct Evolved {
    pub deck: Deck,
    pub wins: usize,
    pub generations: usize,
}

impl Evolved {
    pub fn is_perfect(&self, config: &Config) -> bool {
        self.wins == config.num_cuts
    }
}

impl Genetic {
    pub const POPULATION: usize = 10;
    pub const CROSSOVERS: usize = 15;
    pub const MUTATIONS: usize = 15;

    pub fn new(config: Config, seed: u64) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            seed,
            population: Self::POPULATION,
            crossovers: Self::CROSSOVERS,
            mutations: Self::MUTATIONS,
        })
    }

    /// cuts at which player 0 wins
    pub fn score(&self, deck: &Deck) -> usize {
        deck.wins(self.config.num_players, self.config.num_cuts).len()
    }

    /// Evolve until a deck wins every cut, the configured timeout passes, or
    /// `generations` generations have run.
    pub fn run(&self, generations: usize) -> Evolved {
        let begin = Instant::now();
        let ref mut rng = SmallRng::seed_from_u64(self.seed);
        let mut scored = self.evaluate((0..self.population).map(|_| Deck::shuffled(rng)).collect());
        let mut best = scored[0].1;
        log::info!(
            "initial best {}/{} over {} decks",
            best,
            self.config.num_cuts,
            self.population
        );
        let mut generation = 0;
        while generation < generations
            && best < self.config.num_cuts
            && begin.elapsed() < self.config.timeout
        {
            generation += 1;
            let children = self.breed(&scored, rng);
            scored.extend(self.evaluate(children));
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            scored.truncate((scored.len() / 2).max(self.population));
            if scored[0].1 > best {
                best = scored[0].1;
                log::info!(
                    "generation {:>6}: best {}/{}",
                    generation,
                    best,
                    self.config.num_cuts
                );
            } else if generation % crate::LOG_EVERY == 0 {
                log::debug!(
                    "generation {:>6}: best {}/{} (population {})",
                    generation,
                    best,
                    self.config.num_cuts,
                    scored.len()
                );
            }
        }
        let (deck, wins) = scored.swap_remove(0);
        Evolved {
            deck,
            wins,
            generations: generation,
        }
    }

    /// crossover children of random pairs, then mutants of random members
    fn breed(&self, scored: &[(Deck, usize)], rng: &mut SmallRng) -> Vec<Deck> {
        let n = scored.len();
        let mut children = Vec::with_capacity(self.crossovers + self.mutations);
        for _ in 0..self.crossovers {
            let (i, j) = (rng.random_range(0..n), rng.random_range(0..n));
            if i != j {
                children.push(scored[i].0.crossover(&scored[j].0, rng));
            }
        }
        for _ in 0..self.mutations {
            let i = rng.random_range(0..n);
            children.push(scored[i].0.clone().mutate(rng));
        }
        children
    }

    /// score in parallel, best first
    fn evaluate(&self, decks: Vec<Deck>) -> Vec<(Deck, usize)> {
        let mut scored = decks
            .into_par_iter()
            .map(|deck| {
                let wins = self.score(&deck);
                (deck, wins)
            })
            .collect::<Vec<(Deck, usize)>>();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
    }
}
