//! The land-cover check: validate, build the region, classify, measure when qualifying.
//!
//! Each request runs as one future inside its own `request_id` span. Remote calls are the only
//! suspension points and each is bounded by the configured timeout. Dropping the future (client
//! disconnect) abandons any pending call; nothing after it runs.

use crate::error::LandCoverError;
use crate::geometry::validate_ring;
use crate::measure::AreaMeasurement;
use crate::reducer::{ReducerError, RemoteReducer};
use crate::taxonomy::{LandCoverClass, Qualified, Taxonomy};
use fcheck_kernel::domain::geometry::CoordinateRing;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::Instrument;

/// Outcome of a successful check.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResponse {
    Qualifying(QualifiedArea),
    NonQualifying { class: LandCoverClass, message: String },
}

impl ClassificationResponse {
    /// Qualifying response; needs the taxonomy's proof of qualification.
    #[must_use]
    pub const fn qualifying(proof: &Qualified, area: AreaMeasurement) -> Self {
        Self::Qualifying(QualifiedArea { class: proof.class(), area })
    }

    #[must_use]
    pub const fn class(&self) -> LandCoverClass {
        match self {
            Self::Qualifying(measured) => measured.class,
            Self::NonQualifying { class, .. } => *class,
        }
    }
}

/// Measured area of a qualifying class.
///
/// Only [`ClassificationResponse::qualifying`] builds one:
///
/// ```compile_fail
/// use fcheck_landcover::LandCoverClass;
/// use fcheck_landcover::pipeline::QualifiedArea;
///
/// let _ = QualifiedArea { class: LandCoverClass::Water, area: todo!() };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualifiedArea {
    class: LandCoverClass,
    area: AreaMeasurement,
}

impl QualifiedArea {
    #[must_use]
    pub const fn class(&self) -> LandCoverClass {
        self.class
    }

    #[must_use]
    pub const fn area(&self) -> AreaMeasurement {
        self.area
    }
}

/// Steps of a check, reported with terminal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Building,
    Classifying,
    Measuring,
    Responding,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Building => "building",
            Self::Classifying => "classifying",
            Self::Measuring => "measuring",
            Self::Responding => "responding",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ReducerError> for LandCoverError {
    fn from(err: ReducerError) -> Self {
        match err {
            ReducerError::NotReady { message, context } => Self::ServiceNotReady { message, context },
            ReducerError::Service { message, context } => Self::RemoteProcessing { message, context },
        }
    }
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe view of a [`Pipeline`], stored in the feature slice.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Runs a check on the raw `coordinates` value of a request body.
    fn check<'a>(
        &'a self,
        coordinates: Option<&'a Value>,
    ) -> BoxFuture<'a, Result<ClassificationResponse, LandCoverError>>;

    fn is_ready(&self) -> bool;
}

type StageResult<T> = Result<T, (Stage, LandCoverError)>;

#[derive(Debug)]
pub struct Pipeline<R> {
    reducer: R,
    taxonomy: Taxonomy,
    timeout: Duration,
}

impl<R: RemoteReducer> Pipeline<R> {
    pub const fn new(reducer: R, taxonomy: Taxonomy, timeout: Duration) -> Self {
        Self { reducer, taxonomy, timeout }
    }

    /// Runs one check under a fresh request id.
    pub async fn run(
        &self,
        coordinates: Option<&Value>,
    ) -> Result<ClassificationResponse, LandCoverError> {
        let span = tracing::info_span!("check_farm", request_id = %fcheck_kernel::request_id());
        self.execute(coordinates).instrument(span).await
    }

    async fn execute(
        &self,
        coordinates: Option<&Value>,
    ) -> Result<ClassificationResponse, LandCoverError> {
        let ring = validate_ring(coordinates).inspect_err(|e| {
            let input = coordinates.map_or_else(|| "<missing>".to_owned(), Value::to_string);
            tracing::warn!(
                stage = %Stage::Validating,
                input = %input,
                error = %e,
                "Land-cover check rejected"
            );
        })?;

        self.process(&ring).await.map_err(|(stage, e)| {
            match &e {
                LandCoverError::ServiceNotReady { .. } => tracing::warn!(
                    stage = %stage, ring = ?ring.points(), error = %e, "Land-cover check refused"
                ),
                _ => tracing::error!(
                    stage = %stage, ring = ?ring.points(), error = %e, "Land-cover check failed"
                ),
            }
            e
        })
    }

    async fn process(&self, ring: &CoordinateRing) -> StageResult<ClassificationResponse> {
        self.reducer.ensure_ready().map_err(|e| (Stage::Building, e.into()))?;
        let polygon = self.reducer.polygon(ring).map_err(|e| (Stage::Building, e.into()))?;
        tracing::debug!(points = ring.len(), "Region built");

        let code = self.bounded(Stage::Classifying, self.reducer.majority_class(&polygon)).await?;
        let result = self.taxonomy.classify(code);
        tracing::info!(
            code = ?code,
            class = result.label(),
            qualifies = result.qualifies_for_area(),
            "Land cover classified"
        );

        let Some(proof) = result.qualified() else {
            tracing::debug!(stage = %Stage::Responding, "Area not measured");
            return Ok(ClassificationResponse::NonQualifying {
                class: result.class(),
                message: self.taxonomy.rejection_message(),
            });
        };

        let area = self.measure(&polygon, &proof).await?;
        tracing::info!(
            stage = %Stage::Responding,
            square_meters = area.square_meters(),
            acres = area.acres(),
            "Area measured"
        );
        Ok(ClassificationResponse::qualifying(&proof, area))
    }

    async fn measure(&self, polygon: &R::Polygon, _proof: &Qualified) -> StageResult<AreaMeasurement> {
        let square_meters = self.bounded(Stage::Measuring, self.reducer.area(polygon)).await?;

        AreaMeasurement::from_square_meters(square_meters).ok_or_else(|| {
            let e = LandCoverError::RemoteProcessing {
                message: format!("invalid area {square_meters}").into(),
                context: None,
            };
            (Stage::Measuring, e)
        })
    }

    async fn bounded<T>(
        &self,
        stage: Stage,
        call: impl Future<Output = Result<T, ReducerError>> + Send,
    ) -> StageResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(reply) => reply.map_err(|e| (stage, e.into())),
            Err(_) => {
                let e = LandCoverError::RemoteProcessing {
                    message: format!("no reply within {:?}", self.timeout).into(),
                    context: Some(stage.as_str().into()),
                };
                Err((stage, e))
            },
        }
    }
}

impl<R> Classifier for Pipeline<R>
where
    R: RemoteReducer + fmt::Debug,
{
    fn check<'a>(
        &'a self,
        coordinates: Option<&'a Value>,
    ) -> BoxFuture<'a, Result<ClassificationResponse, LandCoverError>> {
        Box::pin(self.run(coordinates))
    }

    fn is_ready(&self) -> bool {
        self.reducer.is_ready()
    }
}
