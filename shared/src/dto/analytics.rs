//! Analytics DTOs (`/analytics/*`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::devices::{DeviceStatus, Severity};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnalyticsTimeRange {
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsDataType {
    Network,
    Nodes,
    Services,
    Earnings,
    Errors,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Compute,
    Storage,
    Network,
    Ai,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Area,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub total_nodes: u64,
    pub active_nodes: u64,
    pub total_services: u64,
    pub active_services: u64,
    pub total_transactions: u64,
    pub total_volume: f64,
    pub average_response_time: f64,
    pub uptime: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeLocation {
    pub country: String,
    pub city: String,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetrics {
    pub node_id: String,
    pub status: DeviceStatus,
    pub uptime: f64,
    pub response_time: f64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub earnings: f64,
    pub last_activity: DateTime<Utc>,
    pub location: NodeLocation,
    pub services: Vec<String>,
}

impl NodeMetrics {
    /// Share of successful requests in `[0, 1]`; zero when the node has not
    /// served anything yet.
    pub fn success_ratio(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.successful_requests as f64 / self.total_requests as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetrics {
    pub service_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceType,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time: f64,
    pub total_earnings: f64,
    pub rating: f64,
    pub reviews: u64,
    pub availability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CpuUsage {
    pub usage: f64,
    pub temperature: f64,
    pub cores: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacityUsage {
    pub used: f64,
    pub total: f64,
    pub usage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkUsage {
    pub bandwidth: f64,
    pub latency: f64,
    pub packets_lost: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    pub cpu: CpuUsage,
    pub memory: CapacityUsage,
    pub network: NetworkUsage,
    pub storage: CapacityUsage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesData {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDistribution {
    pub country: String,
    pub node_count: u64,
    pub active_nodes: u64,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EarningsBreakdown {
    pub service: String,
    pub earnings: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EarningsAnalytics {
    pub total_earnings: f64,
    pub average_per_hour: f64,
    pub average_per_day: f64,
    pub trend: f64,
    pub breakdown: Vec<EarningsBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthFactor {
    pub factor: String,
    pub score: f64,
    pub impact: Impact,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkHealthScore {
    pub overall: f64,
    pub uptime: f64,
    pub performance: f64,
    pub security: f64,
    pub reliability: f64,
    pub factors: Vec<HealthFactor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_nodes: Option<Vec<String>>,
    pub resolved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

/// Chart-ready series; every dataset has one value per label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Body of `POST /analytics/charts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    #[serde(rename = "type")]
    pub kind: ChartType,
    pub metrics: Vec<String>,
    pub time_range: AnalyticsTimeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDistribution {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
    pub percentage: f64,
    pub total_earnings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorType {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorAnalytics {
    pub total_errors: u64,
    pub error_rate: f64,
    pub error_types: Vec<ErrorType>,
    pub affected_nodes: u64,
    /// Mean minutes to resolution.
    pub resolution_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopService {
    pub service: String,
    pub requests: u64,
    pub users: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserActivityAnalytics {
    pub active_users: u64,
    pub new_users: u64,
    pub user_growth: f64,
    pub average_session_duration: f64,
    pub top_services: Vec<TopService>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedAction {
    pub action: String,
    pub priority: Priority,
    pub impact: String,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trend {
    pub metric: String,
    pub trend: TrendDirection,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveAnalytics {
    pub predicted_load: f64,
    pub predicted_earnings: f64,
    pub recommended_actions: Vec<RecommendedAction>,
    pub trends: Vec<Trend>,
}

/// Widget payloads are free-form and rendered by the dashboard itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardWidget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub config: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomDashboardData {
    pub widgets: Vec<DashboardWidget>,
}

/// Query for `/analytics/timeseries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesQuery {
    pub metric: String,
    pub time_range: AnalyticsTimeRange,
}

/// Query shared by the earnings/errors/users analytics endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub time_range: AnalyticsTimeRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsExportRequest {
    pub data_type: AnalyticsDataType,
    pub format: super::wallet::ExportFormat,
    pub time_range: AnalyticsTimeRange,
}
