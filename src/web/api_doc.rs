use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::report::{AnalysisResponse, ExportQuery};
use super::api::telemetry::{
    AutoWaypointRequest, MissionQuery, SampleListResponse, SampleResponse, WaypointListResponse,
    WaypointResponse, WaypointSubmission,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::telemetry::submit_sample,
        super::api::telemetry::submit_waypoint,
        super::api::telemetry::auto_waypoint,
        super::api::telemetry::list_samples,
        super::api::telemetry::list_waypoints,
        super::api::report::analysis,
        super::api::report::report_data,
        super::api::report::export,
    ),
    components(
        schemas(
            ErrorResponse,
            MissionQuery,
            SampleResponse,
            SampleListResponse,
            WaypointSubmission,
            AutoWaypointRequest,
            WaypointResponse,
            WaypointListResponse,
            AnalysisResponse,
            ExportQuery,
            crate::export::ExportEnvelope,
            crate::export::ExportFormat,
            crate::route::LocatedSample,
            crate::route::Waypoint,
            crate::route::Position,
            crate::route::PointKind,
            crate::route::RoutePoint,
            crate::route::RouteStatistics,
            crate::route::RangeSummary,
            crate::route::ReportData,
            crate::route::AnnotatedPoint,
            crate::route::AnnotatedSegment,
            crate::route::StyleBucket,
        )
    ),
    info(
        title = "Rover Base API",
        description = "Rover mission telemetry logging and route analysis",
        version = "0.1.0"
    ),
    tags(
        (name = "telemetry", description = "Sample and waypoint ingestion"),
        (name = "report", description = "Route analysis and export")
    )
)]
pub struct ApiDoc;
