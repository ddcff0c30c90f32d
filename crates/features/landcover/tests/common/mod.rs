#![allow(dead_code)]

use fcheck_kernel::domain::geometry::{CoordinateRing, Position};
use fcheck_kernel::domain::landcover::LandCoverCode;
use fcheck_landcover::{ReducerError, RemoteReducer};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Remote calls observed by a [`MockReducer`].
#[derive(Debug, Clone, Default)]
pub struct Calls {
    polygon: Arc<AtomicUsize>,
    majority: Arc<AtomicUsize>,
    area: Arc<AtomicUsize>,
}

impl Calls {
    pub fn polygon(&self) -> usize {
        self.polygon.load(Ordering::SeqCst)
    }

    pub fn majority(&self) -> usize {
        self.majority.load(Ordering::SeqCst)
    }

    pub fn area(&self) -> usize {
        self.area.load(Ordering::SeqCst)
    }

    pub fn remote(&self) -> usize {
        self.polygon() + self.majority() + self.area()
    }
}

#[derive(Debug, Clone)]
pub struct MockReducer {
    ready: bool,
    majority: Result<Option<LandCoverCode>, &'static str>,
    area: Result<f64, &'static str>,
    majority_delay: Option<Duration>,
    area_delay: Option<Duration>,
    calls: Calls,
}

impl MockReducer {
    pub fn returning(code: Option<LandCoverCode>) -> Self {
        Self {
            ready: true,
            majority: Ok(code),
            area: Ok(4000.0),
            majority_delay: None,
            area_delay: None,
            calls: Calls::default(),
        }
    }

    pub fn failing(message: &'static str) -> Self {
        Self { majority: Err(message), ..Self::returning(None) }
    }

    pub fn not_ready() -> Self {
        Self { ready: false, ..Self::returning(Some(10)) }
    }

    pub fn with_area(mut self, square_meters: f64) -> Self {
        self.area = Ok(square_meters);
        self
    }

    pub fn with_area_failure(mut self, message: &'static str) -> Self {
        self.area = Err(message);
        self
    }

    /// Delays the majority-class reply.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.majority_delay = Some(delay);
        self
    }

    /// Delays the area reply.
    pub fn with_slow_area(mut self, delay: Duration) -> Self {
        self.area_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

impl RemoteReducer for MockReducer {
    type Polygon = Vec<Position>;

    fn ensure_ready(&self) -> Result<(), ReducerError> {
        if self.ready {
            Ok(())
        } else {
            Err(ReducerError::NotReady { message: "authentication in progress".into(), context: None })
        }
    }

    fn polygon(&self, ring: &CoordinateRing) -> Result<Self::Polygon, ReducerError> {
        self.calls.polygon.fetch_add(1, Ordering::SeqCst);
        Ok(ring.points().to_vec())
    }

    async fn majority_class(
        &self,
        _polygon: &Self::Polygon,
    ) -> Result<Option<LandCoverCode>, ReducerError> {
        self.calls.majority.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.majority_delay {
            tokio::time::sleep(delay).await;
        }
        self.majority
            .map_err(|message| ReducerError::Service { message: message.into(), context: None })
    }

    async fn area(&self, _polygon: &Self::Polygon) -> Result<f64, ReducerError> {
        self.calls.area.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.area_delay {
            tokio::time::sleep(delay).await;
        }
        self.area.map_err(|message| ReducerError::Service { message: message.into(), context: None })
    }
}

/// A small field near Kyiv.
pub fn field() -> Value {
    json!([[30.52, 50.45], [30.53, 50.45], [30.53, 50.46], [30.52, 50.46]])
}
