use confhub_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::{Any, TypeId};

#[derive(Debug)]
struct Agenda(u32);

impl FeatureSlice for Agenda {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Venue;

impl FeatureSlice for Venue {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn initialized_slice_records_type_and_downcasts() {
    let slice = InitializedSlice::new(Agenda(3));

    assert_eq!(slice.id, TypeId::of::<Agenda>());
    assert!(slice.name.ends_with("Agenda"));
    assert_eq!(slice.downcast_ref::<Agenda>().map(|a| a.0), Some(3));
    assert!(slice.downcast_ref::<Venue>().is_none());
}
