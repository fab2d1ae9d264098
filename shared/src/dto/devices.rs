//! Device registry DTOs (`/devices/*`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wallet::ExportFormat;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Server,
    Edge,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Busy,
    Maintenance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Active,
    Inactive,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Performance,
    Security,
    Maintenance,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceType {
    Routine,
    Emergency,
    Upgrade,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackupState {
    Success,
    Failed,
    InProgress,
}

/// Firewall and antivirus state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionStatus {
    Enabled,
    Disabled,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FirewallAction {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceExportDataType {
    Performance,
    Logs,
    Alerts,
    All,
}

/// Time windows accepted by `/devices/{id}/performance`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeviceTimeRange {
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceLocation {
    pub country: String,
    pub city: String,
    /// `[latitude, longitude]`
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CpuSpec {
    pub cores: u32,
    pub model: String,
    /// GHz.
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapacitySpec {
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<f64>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    pub bandwidth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
    pub connection_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceSpecifications {
    pub cpu: CpuSpec,
    pub memory: CapacitySpec,
    pub storage: CapacitySpec,
    pub network: NetworkSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceEarnings {
    pub total: f64,
    pub this_month: f64,
    pub this_week: f64,
    pub today: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DevicePerformance {
    pub uptime: f64,
    pub response_time: f64,
    pub success_rate: f64,
    pub total_requests: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceType,
    pub status: DeviceStatus,
    pub location: DeviceLocation,
    pub specifications: DeviceSpecifications,
    pub services: Vec<String>,
    pub earnings: DeviceEarnings,
    pub performance: DevicePerformance,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceRegistration {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceType,
    pub location: DeviceLocation,
    pub specifications: DeviceSpecifications,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistered {
    pub device_id: String,
    pub success: bool,
}

/// Partial device update; only the set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<DeviceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
}

/// Query filters for `GET /devices`. Services are sent comma-separated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DeviceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_earnings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_earnings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_uptime: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uptime: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopPerformingDevice {
    pub id: String,
    pub name: String,
    pub earnings: f64,
    pub uptime: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStats {
    pub total_devices: u64,
    pub online_devices: u64,
    pub total_earnings: f64,
    pub average_uptime: f64,
    #[serde(default)]
    pub average_response_time: f64,
    #[serde(default)]
    pub top_performing_devices: Vec<TopPerformingDevice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub metric: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DevicePerformanceMetrics {
    pub uptime: f64,
    pub response_time: f64,
    pub success_rate: f64,
    pub total_requests: u64,
    pub earnings: f64,
    pub errors: u64,
    pub time_series: Vec<MetricPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceServiceInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ServiceStatus,
    pub requests: u64,
    pub earnings: f64,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceLog {
    pub id: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMaintenance {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    /// Minutes.
    pub estimated_duration: u32,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSchedule {
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub estimated_duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceScheduled {
    pub maintenance_id: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBackupStatus {
    pub last_backup: DateTime<Utc>,
    /// Bytes.
    pub backup_size: u64,
    pub backup_status: BackupState,
    pub next_scheduled_backup: DateTime<Utc>,
    pub retention_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackupStarted {
    pub backup_id: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceVulnerability {
    pub id: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve: Option<String>,
    pub patch_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSecurityStatus {
    pub security_score: f64,
    pub vulnerabilities: Vec<DeviceVulnerability>,
    pub last_security_scan: DateTime<Utc>,
    pub next_security_scan: DateTime<Utc>,
    pub firewall_status: ProtectionStatus,
    pub antivirus_status: ProtectionStatus,
}

impl DeviceSecurityStatus {
    /// Most severe open vulnerability, if any.
    pub fn worst_vulnerability(&self) -> Option<&DeviceVulnerability> {
        self.vulnerabilities.iter().min_by_key(|v| v.severity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScanStarted {
    pub scan_id: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallRule {
    pub id: String,
    pub name: String,
    pub action: FirewallAction,
    pub protocol: String,
    pub port: u16,
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceNetworkInfo {
    pub ip_address: String,
    pub mac_address: String,
    pub connection_type: String,
    pub bandwidth: f64,
    pub latency: f64,
    pub packet_loss: f64,
    pub firewall_rules: Vec<FirewallRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceExportRequest {
    pub format: ExportFormat,
    pub data_type: DeviceExportDataType,
}
