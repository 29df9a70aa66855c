//! Trial runner - builds and scores one route per diet.

use thiserror::Error;
use zoo_route::{
    score_breakdown, Diet, FedSet, PlanError, Point2, Route, RouteBuilder, ScoreBreakdown,
    ScoreParams, Zoo,
};

use crate::config::{PlannerConfig, Retention};

#[derive(Debug, Error)]
pub enum TrialError {
    #[error("{diet} trial aborted")]
    Plan {
        diet: Diet,
        #[source]
        source: PlanError,
    },
}

/// A built and scored route for one diet.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub diet: Diet,
    pub route: Route,
    pub fed: FedSet,
    pub score: ScoreBreakdown,
}

/// Result of running every diet.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// One outcome per diet, in trial order.
    pub trials: Vec<TrialOutcome>,
    pub retention: Retention,
}

impl RunSummary {
    /// Highest-scoring trial; the earliest diet wins ties.
    pub fn best(&self) -> Option<&TrialOutcome> {
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for trial in &self.trials {
            if trial.score.score > best_score {
                best_score = trial.score.score;
                best = Some(trial);
            }
        }
        best
    }

    /// Trials kept under the summary's retention.
    pub fn retained(&self) -> Vec<&TrialOutcome> {
        match self.retention {
            Retention::Best => self.best().into_iter().collect(),
            Retention::All => self.trials.iter().collect(),
        }
    }

    /// Paths of the retained trials, ready for output.
    pub fn paths(&self) -> Vec<Vec<Point2>> {
        self.retained()
            .into_iter()
            .map(|trial| trial.route.path.clone())
            .collect()
    }

    pub fn summary(&self) -> String {
        let scores: Vec<String> = self
            .trials
            .iter()
            .map(|t| format!("{}={:.2}", t.diet.letter(), t.score.score))
            .collect();
        format!(
            "Trials: {}, Retained: {}, Scores: [{}]",
            self.trials.len(),
            self.retained().len(),
            scores.join(", ")
        )
    }
}

/// Runs the per-diet trials for one zoo.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    builder: RouteBuilder,
    params: ScoreParams,
    retention: Retention,
}

impl TrialRunner {
    pub fn new(builder: RouteBuilder, params: ScoreParams, retention: Retention) -> Self {
        Self {
            builder,
            params,
            retention,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(
            config.route_builder(),
            config.score_params(),
            config.retention(),
        )
    }

    /// Build and score a single diet from a clean fed state.
    pub fn run_trial(&self, zoo: &Zoo, diet: Diet) -> Result<TrialOutcome, TrialError> {
        let mut fed = FedSet::new();
        let route = self
            .builder
            .build(zoo, diet, &mut fed)
            .map_err(|source| TrialError::Plan { diet, source })?;
        let score = score_breakdown(zoo, &route.path, diet, &fed, &self.params);

        if !route.skipped.is_empty() {
            tracing::debug!(
                diet = %diet,
                skipped = route.skipped.len(),
                "Skipped enclosures out of battery range"
            );
        }
        tracing::info!(
            diet = %diet,
            stops = route.visits.len(),
            importance = score.importance,
            distance = score.distance,
            score = score.score,
            "Trial scored"
        );

        Ok(TrialOutcome {
            diet,
            route,
            fed,
            score,
        })
    }

    /// Run every diet in order. The first failing trial aborts the run.
    pub fn run(&self, zoo: &Zoo) -> Result<RunSummary, TrialError> {
        let trials = Diet::ALL
            .into_iter()
            .map(|diet| self.run_trial(zoo, diet))
            .collect::<Result<Vec<_>, _>>()?;

        let summary = RunSummary {
            trials,
            retention: self.retention,
        };
        tracing::info!(summary = %summary.summary(), "Run finished");
        Ok(summary)
    }
}
