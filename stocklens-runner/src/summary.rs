//! One-screen digest of a result bundle.
//!
//! Per module: status plus a few headline figures (latest values, counts,
//! the Close/Volume correlation). Used after a run and by `inspect`.

use std::fmt;

use serde::Serialize;
use stocklens_core::domain::Series;

use crate::result::{ModuleName, ModuleOutcome, ModuleStatus, ResultBundle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSummary {
    pub module: ModuleName,
    pub status: ModuleStatus,
    pub headlines: Vec<Headline>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleSummary {
    pub modules: Vec<ModuleSummary>,
}

impl BundleSummary {
    pub fn from_bundle(bundle: &ResultBundle) -> Self {
        let modules = vec![
            summarize(ModuleName::PriceTrend, &bundle.price_trend, |d| {
                let ma = &d.moving_averages;
                let mut h = Vec::new();
                push_last(&mut h, "sma_20", &ma.sma_20);
                push_last(&mut h, "sma_50", &ma.sma_50);
                push_last(&mut h, "ema_20", &ma.ema_20);
                push_last(&mut h, "price_change", &d.price_change);
                h
            }),
            summarize(ModuleName::VolumeAnalysis, &bundle.volume_analysis, |d| {
                let mut h = Vec::new();
                push_last(&mut h, "volume_ma_20", &d.volume_averages.volume_ma_20);
                push_last(&mut h, "volume_ma_50", &d.volume_averages.volume_ma_50);
                h
            }),
            summarize(ModuleName::TechnicalAnalysis, &bundle.technical_analysis, |d| {
                let mut h = Vec::new();
                push_last(&mut h, "rsi", &d.rsi);
                push_last(&mut h, "bollinger_upper", &d.bollinger_bands.upper);
                push_last(&mut h, "bollinger_lower", &d.bollinger_bands.lower);
                h
            }),
            summarize(ModuleName::SentimentAnalysis, &bundle.sentiment_analysis, |d| {
                let vs = &d.volume_sentiment;
                let mut h = Vec::new();
                push_last(&mut h, "volatility", &d.volatility);
                h.push(headline("up_days", vs.positive_volume.len() as f64));
                h.push(headline("down_days", vs.negative_volume.len() as f64));
                h
            }),
            summarize(ModuleName::SeasonalAnalysis, &bundle.seasonal_analysis, |d| {
                let mut h = Vec::new();
                push_last(&mut h, "trend", &d.trend);
                let (lo, hi) = d
                    .seasonal
                    .defined()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
                        (lo.min(v), hi.max(v))
                    });
                if lo.is_finite() && hi.is_finite() {
                    h.push(headline("seasonal_amplitude", hi - lo));
                }
                h
            }),
            summarize(ModuleName::CorrelationAnalysis, &bundle.correlation_analysis, |d| {
                let mut h = Vec::new();
                if let Some(r) = d.correlation_matrix.get("Close", "Volume") {
                    h.push(headline("close_volume_corr", r));
                }
                if let Some(ratio) = d.explained_variance_ratio.first() {
                    h.push(headline("pc1_explained", *ratio));
                }
                h
            }),
        ];
        Self { modules }
    }

    pub fn completed(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| m.status == ModuleStatus::Completed)
            .count()
    }
}

impl fmt::Display for BundleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modules {
            match &m.status {
                ModuleStatus::Completed => writeln!(f, "  {:<22} ok", m.module.as_str())?,
                ModuleStatus::Failed { message } => {
                    writeln!(f, "  {:<22} error: {message}", m.module.as_str())?
                }
            }
            for h in &m.headlines {
                writeln!(f, "      {:<20} {:.4}", h.label, h.value)?;
            }
        }
        write!(f, "  {}/{} modules completed", self.completed(), self.modules.len())
    }
}

fn summarize<T>(
    module: ModuleName,
    outcome: &ModuleOutcome<T>,
    headlines: impl FnOnce(&T) -> Vec<Headline>,
) -> ModuleSummary {
    match outcome {
        ModuleOutcome::Completed(data) => ModuleSummary {
            module,
            status: ModuleStatus::Completed,
            headlines: headlines(data),
        },
        ModuleOutcome::Failed(failure) => ModuleSummary {
            module,
            status: ModuleStatus::Failed {
                message: failure.message.clone(),
            },
            headlines: Vec::new(),
        },
    }
}

fn headline(label: &str, value: f64) -> Headline {
    Headline {
        label: label.to_string(),
        value,
    }
}

fn push_last(out: &mut Vec<Headline>, label: &str, series: &Series) {
    if let Some((_, v)) = series.last_defined() {
        out.push(headline(label, v));
    }
}
