use chrono::{DateTime, Utc};

use crate::aggregate::AggregateParams;
use crate::cli::EffectiveConfig;

pub fn build_aggregate_params(cfg: &EffectiveConfig, project_name: String, now: DateTime<Utc>) -> AggregateParams {
  AggregateParams {
    project_name,
    author: cfg.author.clone(),
    days: cfg.days,
    today: cfg.tz.date_of(&now),
    generated_at: now,
    tz: cfg.tz.clone(),
    lang: cfg.lang,
    estimator: cfg.estimator,
  }
}
