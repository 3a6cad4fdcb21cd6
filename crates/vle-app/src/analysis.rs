//! Isothermal and isobaric analysis pipelines.
//!
//! An analysis orders the pair by volatility, strips pure-component points,
//! back-computes experimental activity coefficients and G^E, estimates a
//! constant relative volatility and fits the requested models. Each model
//! is fitted in isolation: a failing fit is recorded in its
//! [`ModelOutcome`] and the remaining models still run.

use serde::Serialize;
use tracing::{info, warn};
use vle_models::{
    AlphaEstimate, CompoundPair, Condition, CorrelationModel, ExperimentalExcess, FailureKind,
    FitOptions, FitResult, Margules, ModelCurves, ModelError, ModelKind, ModelResult, Nrtl,
    OrderedPair, RaoultCurves, RedlichKister, TxyCurve, Uniquac, VanLaar, VleDataset, Wilson,
    Wohls, estimate_alpha_gm,
};
use vle_props::{MolarVolumeProvider, ReferenceData};

use crate::cache::{FitCache, fit_fingerprint};
use crate::config::AnalysisConfig;
use crate::dataset_io::LoadedDataset;
use crate::error::{AppError, AppResult};

/// Why a model produced no result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&ModelError> for ModelFailure {
    fn from(err: &ModelError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Relative-volatility estimate, or why none could be computed.
pub type AlphaSummary = Result<AlphaEstimate, ModelFailure>;

/// A successful fit and its derived series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub fit: FitResult,
    /// Isothermal prediction on the composition grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curves: Option<ModelCurves>,
    /// Isobaric bubble-temperature prediction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txy: Option<TxyCurve>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelOutcome {
    pub model: ModelKind,
    pub outcome: Result<ModelReport, ModelFailure>,
}

impl ModelOutcome {
    pub fn report(&self) -> Option<&ModelReport> {
        self.outcome.as_ref().ok()
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsothermalReport {
    pub name: String,
    pub pair: OrderedPair,
    pub temperature_k: f64,
    /// Pure-component points dropped before fitting
    pub removed_points: usize,
    pub experimental: ExperimentalExcess,
    pub alpha: AlphaSummary,
    pub raoult: RaoultCurves,
    pub models: Vec<ModelOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsobaricReport {
    pub name: String,
    pub pair: OrderedPair,
    pub pressure_kpa: f64,
    pub removed_points: usize,
    pub experimental: ExperimentalExcess,
    pub alpha: AlphaSummary,
    pub uniquac: ModelOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum AnalysisReport {
    Isothermal(IsothermalReport),
    Isobaric(IsobaricReport),
}

impl AnalysisReport {
    pub fn name(&self) -> &str {
        match self {
            AnalysisReport::Isothermal(r) => &r.name,
            AnalysisReport::Isobaric(r) => &r.name,
        }
    }
}

/// Reference data, configuration and fit cache for a sequence of analyses.
#[derive(Debug)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    reference: ReferenceData,
    cache: FitCache,
}

impl AnalysisSession {
    /// Validate `config` and load reference tables from its `reference_dir`,
    /// or the bundled tables when none is set.
    pub fn new(config: AnalysisConfig) -> AppResult<Self> {
        config.validate()?;
        let reference = match &config.reference_dir {
            Some(dir) => ReferenceData::from_dir(dir)?,
            None => ReferenceData::shared()?.clone(),
        };
        Ok(Self::with_reference(config, reference))
    }

    pub fn with_reference(config: AnalysisConfig, reference: ReferenceData) -> Self {
        Self {
            config,
            reference,
            cache: FitCache::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn cache(&self) -> &FitCache {
        &self.cache
    }

    /// Analyze with the configured model list.
    pub fn analyze(&mut self, dataset: &LoadedDataset) -> AppResult<AnalysisReport> {
        let models = self.config.models.clone();
        self.analyze_with_models(dataset, &models)
    }

    /// Analyze with an explicit model list (isothermal data only; isobaric
    /// data are always fitted with UNIQUAC).
    pub fn analyze_with_models(
        &mut self,
        dataset: &LoadedDataset,
        models: &[ModelKind],
    ) -> AppResult<AnalysisReport> {
        match dataset.data.condition() {
            Condition::Isothermal { .. } => Ok(AnalysisReport::Isothermal(self.analyze_isothermal(
                &dataset.name,
                &dataset.pair,
                &dataset.data,
                models,
            )?)),
            Condition::Isobaric { .. } => Ok(AnalysisReport::Isobaric(self.analyze_isobaric(
                &dataset.name,
                &dataset.pair,
                &dataset.data,
            )?)),
        }
    }

    pub fn analyze_isothermal(
        &mut self,
        name: &str,
        pair: &CompoundPair,
        data: &VleDataset,
        models: &[ModelKind],
    ) -> AppResult<IsothermalReport> {
        let Condition::Isothermal { temperature_k } = data.condition() else {
            return Err(AppError::InvalidInput(format!(
                "{name}: expected isothermal data"
            )));
        };
        info!(dataset = name, temperature_k, points = data.len(), "isothermal analysis");

        let (ordered, stripped, removed_points) = self.prepare(pair, data)?;
        let psat = ordered.psat_kpa;
        let n = stripped.len();
        let experimental =
            ExperimentalExcess::from_dataset(&stripped, &vec![psat[0]; n], &vec![psat[1]; n])?;
        let alpha = self.alpha(&stripped);
        let raoult = RaoultCurves::isothermal(psat, self.config.grid_points);

        let mut outcomes = Vec::with_capacity(models.len());
        for &kind in models {
            let result = self.isothermal_model(kind, &ordered.pair, temperature_k, psat, &experimental);
            outcomes.push(outcome(kind, result));
        }

        Ok(IsothermalReport {
            name: name.to_string(),
            pair: ordered,
            temperature_k,
            removed_points,
            experimental,
            alpha,
            raoult,
            models: outcomes,
        })
    }

    pub fn analyze_isobaric(
        &mut self,
        name: &str,
        pair: &CompoundPair,
        data: &VleDataset,
    ) -> AppResult<IsobaricReport> {
        let Condition::Isobaric { pressure_kpa } = data.condition() else {
            return Err(AppError::InvalidInput(format!(
                "{name}: expected isobaric data"
            )));
        };
        info!(dataset = name, pressure_kpa, points = data.len(), "isobaric analysis");

        let (ordered, stripped, removed_points) = self.prepare(pair, data)?;
        let experimental = ExperimentalExcess::from_provider(&stripped, &ordered.pair, &self.reference)?;
        let alpha = self.alpha(&stripped);
        let result = self.isobaric_uniquac(&ordered.pair, pressure_kpa, &stripped, &experimental);

        Ok(IsobaricReport {
            name: name.to_string(),
            pair: ordered,
            pressure_kpa,
            removed_points,
            experimental,
            alpha,
            uniquac: outcome(ModelKind::Uniquac, result),
        })
    }

    /// Order the pair, orient the data to match and drop pure-component points.
    fn prepare(
        &self,
        pair: &CompoundPair,
        data: &VleDataset,
    ) -> AppResult<(OrderedPair, VleDataset, usize)> {
        let t_ref = data
            .reference_temperature_k()
            .ok_or_else(|| AppError::InvalidInput("dataset has no points".to_string()))?;
        let ordered = pair.order_by_volatility(&self.reference, t_ref)?;
        let oriented = if ordered.swapped {
            info!(first = %ordered.pair.first, "swapped pair so the more volatile compound is first");
            data.mirrored()
        } else {
            data.clone()
        };

        let (stripped, removed) = oriented.strip_pure_points();
        if stripped.is_empty() {
            return Err(AppError::InvalidInput(
                "dataset holds only pure-component points".to_string(),
            ));
        }
        Ok((ordered, stripped, removed))
    }

    fn alpha(&self, data: &VleDataset) -> AlphaSummary {
        match estimate_alpha_gm(data.x1(), data.y1(), self.config.alpha_r2_threshold) {
            Ok(estimate) => {
                if let AlphaEstimate::Rejected { alpha, r_squared } = estimate {
                    warn!(alpha, r_squared, "relative volatility withheld: poor constant-alpha fit");
                }
                Ok(estimate)
            }
            Err(e) => {
                warn!(error = %e, "relative volatility not available");
                Err(ModelFailure::from(&e))
            }
        }
    }

    fn build_model(
        &self,
        kind: ModelKind,
        pair: &CompoundPair,
        t_k: f64,
    ) -> ModelResult<Box<dyn CorrelationModel>> {
        Ok(match kind {
            ModelKind::Margules => Box::new(Margules),
            ModelKind::RedlichKister => Box::new(RedlichKister),
            ModelKind::VanLaar => Box::new(VanLaar),
            ModelKind::Wohls => {
                let (v1, v2) = self.volumes(pair, t_k)?;
                Box::new(Wohls::new(v1, v2)?)
            }
            ModelKind::Wilson => {
                let (v1, v2) = self.volumes(pair, t_k)?;
                Box::new(Wilson::new(v1, v2)?)
            }
            ModelKind::Nrtl => Box::new(Nrtl {
                alpha: self.config.nrtl_alpha,
            }),
            ModelKind::Uniquac => Box::new(Uniquac::from_reference(&self.reference, pair)?),
        })
    }

    fn volumes(&self, pair: &CompoundPair, t_k: f64) -> ModelResult<(f64, f64)> {
        Ok((
            self.reference.molar_volume_m3(&pair.first, t_k)?,
            self.reference.molar_volume_m3(&pair.second, t_k)?,
        ))
    }

    fn isothermal_model(
        &mut self,
        kind: ModelKind,
        pair: &CompoundPair,
        t_k: f64,
        psat: [f64; 2],
        experimental: &ExperimentalExcess,
    ) -> ModelResult<ModelReport> {
        let model = self.build_model(kind, pair, t_k)?;
        let constants = model.constants();

        let fit = if kind == ModelKind::Uniquac {
            let uniquac = Uniquac::from_reference(&self.reference, pair)?;
            let data = experimental.activity_data();
            self.cached_fit(kind, &constants, &data, |options| {
                uniquac.fit_activity(&data, options)
            })?
        } else {
            let data = experimental.excess_data();
            self.cached_fit(kind, &constants, &data, |options| model.fit(&data, options))?
        };

        let curves = ModelCurves::isothermal(
            model.as_ref(),
            &fit.parameters.values,
            t_k,
            psat,
            self.config.grid_points,
        );
        Ok(ModelReport {
            fit,
            curves: Some(curves),
            txy: None,
        })
    }

    fn isobaric_uniquac(
        &mut self,
        pair: &CompoundPair,
        pressure_kpa: f64,
        data: &VleDataset,
        experimental: &ExperimentalExcess,
    ) -> ModelResult<ModelReport> {
        let model = Uniquac::from_reference(&self.reference, pair)?;
        let activity = experimental.activity_data();
        let fit = self.cached_fit(ModelKind::Uniquac, &model.constants(), &activity, |options| {
            model.fit_activity(&activity, options)
        })?;

        let t = data.measured();
        let t_range = (
            t.iter().copied().fold(f64::INFINITY, f64::min),
            t.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        );
        let txy = model.predict_txy(
            &fit.parameters.values,
            pair,
            &self.reference,
            pressure_kpa,
            t_range,
            self.config.txy_points,
            &self.config.secant_config(),
        );
        if txy.num_failed > 0 {
            warn!(
                failed = txy.num_failed,
                total = txy.x1.len(),
                "bubble temperature not found for some compositions"
            );
        }

        Ok(ModelReport {
            fit,
            curves: None,
            txy: Some(txy),
        })
    }

    fn cached_fit<D, F>(
        &mut self,
        kind: ModelKind,
        constants: &[f64],
        data: &D,
        fit: F,
    ) -> ModelResult<FitResult>
    where
        D: Serialize,
        F: FnOnce(&FitOptions) -> ModelResult<FitResult>,
    {
        let options = self.config.fit_options();
        if !self.config.use_cache {
            return fit(&options);
        }

        let key = fit_fingerprint(kind, constants, &options, data);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let result = fit(&options)?;
        self.cache.insert(key, result.clone());
        Ok(result)
    }
}

fn outcome(kind: ModelKind, result: ModelResult<ModelReport>) -> ModelOutcome {
    match &result {
        Ok(report) => info!(
            model = %kind,
            r_squared = report.fit.r_squared,
            evaluations = report.fit.evaluations,
            "model fitted"
        ),
        Err(e) => warn!(model = %kind, error = %e, "model fit failed"),
    }
    ModelOutcome {
        model: kind,
        outcome: result.map_err(|e| ModelFailure::from(&e)),
    }
}
