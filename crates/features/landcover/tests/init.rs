mod common;

use common::MockReducer;
use fcheck_kernel::domain::config::ApiConfig;
use fcheck_landcover::{LandCover, init};
use std::any::TypeId;

#[test]
fn init_registers_the_slice() {
    let slice = init(&ApiConfig::default(), MockReducer::returning(Some(10))).unwrap();

    assert_eq!(slice.id, TypeId::of::<LandCover>());
    assert_eq!(slice.state.name(), "landcover");
    assert!(slice.state.is_ready());
}

#[test]
fn slice_follows_session_readiness() {
    let slice = init(&ApiConfig::default(), MockReducer::not_ready()).unwrap();

    assert!(!slice.state.is_ready());
    let landcover = slice.state.as_any().downcast_ref::<LandCover>().unwrap();
    assert!(!landcover.classifier().is_ready());
}
