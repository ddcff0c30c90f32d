//! Type-erased registry entries for feature slices.
//!
//! Every vertical slice exposes one state object; the server stores them keyed by [`TypeId`]
//! and handlers pull their own slice back out with a downcast.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Shared state of a feature slice.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Upcast used for downcasting back to the concrete slice.
    fn as_any(&self) -> &dyn Any;

    /// Short name used in health reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether the slice can serve requests (e.g. its remote session is authenticated).
    fn is_ready(&self) -> bool {
        true
    }
}

/// A slice ready to be registered in the API state.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }
}
