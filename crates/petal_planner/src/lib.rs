pub mod assembler;
pub mod elevation;
pub mod error;
pub mod leaf;
pub mod length_filter;
pub mod output;
pub mod params;
pub mod planner;
pub mod request;
pub mod score;
pub mod selector;
pub mod surface;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_utils;

pub use elevation::{ElevationError, ElevationProfile, ElevationProvider, NoElevation, SampledElevations};
pub use error::PlannerError;
pub use output::{EdgeAnalysis, PlanDiagnostics, RouteOutput};
pub use params::{PlannerParams, Threads};
pub use planner::RoutePlanner;
pub use request::{CircularRouteRequest, PointToPointRequest};
pub use surface::{SurfaceClass, SurfaceTable};
