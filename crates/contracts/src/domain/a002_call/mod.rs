pub mod aggregate;

pub use aggregate::{
    AdHocVisitDto, Call, CallDto, CallId, CallStatus, CompleteCallDto, AVAILABLE_OUTCOMES,
};
