//! # Analytics Endpoints
//!
//! Read-mostly network analytics: overview, node and service metrics, time
//! series, charts, earnings, errors, user activity, predictions and health.
//! Alerts can be acknowledged and reports exported.

use serde::Serialize;
use shared::{
    Ack, AnalyticsExportRequest, AnalyticsTimeRange, ChartData, ChartRequest,
    CustomDashboardData, EarningsAnalytics, ErrorAnalytics, ExportData, NetworkHealthScore,
    NetworkMetrics, NodeDistribution, NodeMetrics, PerformanceMetrics, PredictiveAnalytics,
    RangeQuery, RealTimeAlert, ServiceDistribution, ServiceMetrics, TimeSeriesData,
    TimeSeriesQuery, UserActivityAnalytics,
};

use super::client::ApiClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeRangeQuery {
    time_range: AnalyticsTimeRange,
}

pub async fn get_network_metrics(client: &ApiClient) -> Result<NetworkMetrics, String> {
    client
        .get("/analytics/network/overview")
        .await
        .into_result()
}

/// Metrics for every node, or only `node_id` when given.
pub async fn get_node_metrics(
    client: &ApiClient,
    node_id: Option<&str>,
) -> Result<Vec<NodeMetrics>, String> {
    let endpoint = match node_id {
        Some(id) => format!("/analytics/nodes/{}", id),
        None => "/analytics/nodes".to_string(),
    };
    client.get(&endpoint).await.into_result()
}

/// Metrics for every service, or only `service_id` when given.
pub async fn get_service_metrics(
    client: &ApiClient,
    service_id: Option<&str>,
) -> Result<Vec<ServiceMetrics>, String> {
    let endpoint = match service_id {
        Some(id) => format!("/analytics/services/{}", id),
        None => "/analytics/services".to_string(),
    };
    client.get(&endpoint).await.into_result()
}

pub async fn get_performance_metrics(
    client: &ApiClient,
    node_id: &str,
) -> Result<PerformanceMetrics, String> {
    client
        .get(&format!("/analytics/nodes/{}/performance", node_id))
        .await
        .into_result()
}

pub async fn get_time_series(
    client: &ApiClient,
    query: &TimeSeriesQuery,
) -> Result<Vec<TimeSeriesData>, String> {
    client
        .get_with_query("/analytics/timeseries", query)
        .await
        .into_result()
}

pub async fn get_node_distribution(client: &ApiClient) -> Result<Vec<NodeDistribution>, String> {
    client
        .get("/analytics/nodes/distribution")
        .await
        .into_result()
}

#[tracing::instrument(skip(client, request), fields(kind = ?request.kind))]
pub async fn get_chart_data(
    client: &ApiClient,
    request: &ChartRequest,
) -> Result<ChartData, String> {
    client
        .post("/analytics/charts", request)
        .await
        .into_result()
}

pub async fn get_service_distribution(
    client: &ApiClient,
) -> Result<Vec<ServiceDistribution>, String> {
    client
        .get("/analytics/services/distribution")
        .await
        .into_result()
}

pub async fn get_earnings(
    client: &ApiClient,
    query: &RangeQuery,
) -> Result<EarningsAnalytics, String> {
    client
        .get_with_query("/analytics/earnings", query)
        .await
        .into_result()
}

pub async fn get_error_analytics(
    client: &ApiClient,
    time_range: AnalyticsTimeRange,
) -> Result<ErrorAnalytics, String> {
    client
        .get_with_query("/analytics/errors", &TimeRangeQuery { time_range })
        .await
        .into_result()
}

pub async fn get_user_activity(
    client: &ApiClient,
    time_range: AnalyticsTimeRange,
) -> Result<UserActivityAnalytics, String> {
    client
        .get_with_query("/analytics/users", &TimeRangeQuery { time_range })
        .await
        .into_result()
}

pub async fn get_health_score(client: &ApiClient) -> Result<NetworkHealthScore, String> {
    client.get("/analytics/health").await.into_result()
}

pub async fn get_predictions(client: &ApiClient) -> Result<PredictiveAnalytics, String> {
    client.get("/analytics/predictions").await.into_result()
}

pub async fn get_dashboard(
    client: &ApiClient,
    dashboard_id: &str,
) -> Result<CustomDashboardData, String> {
    client
        .get(&format!("/analytics/dashboards/{}", dashboard_id))
        .await
        .into_result()
}

pub async fn get_alerts(client: &ApiClient) -> Result<Vec<RealTimeAlert>, String> {
    client.get("/analytics/alerts").await.into_result()
}

#[tracing::instrument(skip(client))]
pub async fn acknowledge_alert(client: &ApiClient, alert_id: &str) -> Result<Ack, String> {
    client
        .post_empty(&format!("/analytics/alerts/{}/acknowledge", alert_id))
        .await
        .into_result()
}

#[tracing::instrument(skip(client, request), fields(data_type = ?request.data_type))]
pub async fn export_analytics(
    client: &ApiClient,
    request: &AnalyticsExportRequest,
) -> Result<ExportData, String> {
    client
        .post("/analytics/export", request)
        .await
        .into_result()
}
