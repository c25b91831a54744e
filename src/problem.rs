use crate::cards::Card;
use crate::cards::Deck;
use crate::config::Config;
use crate::encoding::Properties;
use crate::encoding::deal_cut;
use crate::model::IntVar;
use crate::model::Model;
use crate::model::ValueOrder;
use crate::solver::Engine;
use crate::solver::Parameters;
use crate::solver::Response;
use crate::solver::Status;
use anyhow::Context;
use rayon::prelude::*;

/// What a solve concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// a deck under which player 0 wins every requested cut
    Solved(Deck),
    /// no such deck exists
    Infeasible,
    /// the time limit ran out first
    Unknown,
}

/// One satisfiability instance covering every requested cut over a single
/// shared deck.
pub struct Problem {
    config: Config,
    model: Model,
    deck: [IntVar; crate::DECK],
}

impl Problem {
    pub fn build(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let ref mut model = Model::new();
        let deck: [IntVar; crate::DECK] =
            std::array::from_fn(|_| model.new_int_var(0, crate::DECK as i64 - 1));
        model.add_all_different(deck);
        let properties: [Properties; crate::DECK] =
            std::array::from_fn(|i| Properties::extract(model, deck[i]));
        log::info!(
            "encoding {} cuts for {} players",
            config.num_cuts,
            config.num_players
        );
        let fragments = (0..config.num_cuts)
            .into_par_iter()
            .map(|cut| {
                let mut fragment = model.fork();
                deal_cut(&mut fragment, &properties, cut, config.num_players);
                fragment
            })
            .collect::<Vec<Model>>();
        for (cut, fragment) in fragments.into_iter().enumerate() {
            model.merge(fragment);
            if (cut + 1) % crate::LOG_EVERY == 0 || cut + 1 == config.num_cuts {
                log::info!("encoded cut {:>2}/{}", cut + 1, config.num_cuts);
            }
        }
        // positions no requested cut deals
        model.add_decision_strategy(deck, ValueOrder::Ascending);
        log::info!(
            "model has {} variables ({} boolean), {} constraints",
            model.len(),
            model.num_booleans(),
            model.constraints().len()
        );
        Ok(Self {
            config,
            model: std::mem::take(model),
            deck,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn model(&self) -> &Model {
        &self.model
    }
    pub fn deck(&self) -> &[IntVar; crate::DECK] {
        &self.deck
    }

    /// fix a deck position to a card
    pub fn pin(&mut self, position: usize, card: Card) -> anyhow::Result<()> {
        anyhow::ensure!(
            position < crate::DECK,
            "deck position {} out of range",
            position
        );
        self.model
            .add_eq(self.deck[position], u8::from(card) as i64);
        Ok(())
    }

    pub fn parameters(&self) -> Parameters {
        Parameters::from(&self.config)
    }

    pub fn solve(&self, engine: &impl Engine, params: &Parameters) -> anyhow::Result<Verdict> {
        let response = engine.solve(&self.model, params)?;
        match response.status {
            Status::Optimal | Status::Feasible => Ok(Verdict::Solved(self.decode(&response)?)),
            Status::Infeasible => Ok(Verdict::Infeasible),
            Status::Unknown => {
                log::warn!("no verdict within {:?}", params.time_limit);
                Ok(Verdict::Unknown)
            }
        }
    }

    fn decode(&self, response: &Response) -> anyhow::Result<Deck> {
        let ids = self
            .deck
            .iter()
            .map(|var| {
                response
                    .value(*var)
                    .with_context(|| format!("no value for deck position {}", var.index()))
            })
            .collect::<anyhow::Result<Vec<i64>>>()?;
        Deck::try_from(ids.as_slice()).context("engine returned a deck that is not a permutation")
    }
}
