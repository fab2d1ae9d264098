//! # Device Endpoints
//!
//! Device registry, per-device performance, hosted services, logs and alerts,
//! plus maintenance, backup, security and network details for one device.

use serde::Serialize;
use shared::{
    Ack, BackupStarted, Device, DeviceAlert, DeviceBackupStatus, DeviceExportDataType,
    DeviceExportRequest, DeviceFilter, DeviceLog, DeviceMaintenance, DeviceNetworkInfo,
    DevicePerformanceMetrics, DeviceRegistered, DeviceRegistration, DeviceSecurityStatus,
    DeviceServiceInfo, DeviceStats, DeviceTimeRange, DeviceUpdate, ExportData, ExportFormat,
    LogLevel, MaintenanceSchedule, MaintenanceScheduled, SecurityScanStarted,
};

use super::client::ApiClient;

/// Log lines fetched per call unless the caller asks for a different count.
pub const DEFAULT_LOG_LIMIT: u32 = 100;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PerformanceQuery {
    time_range: DeviceTimeRange,
}

#[derive(Serialize)]
struct LogQuery {
    level: LogLevel,
    limit: u32,
}

#[derive(Serialize)]
struct ToggleService {
    enabled: bool,
}

// ========== Registry ==========

#[tracing::instrument(skip(client, filter))]
pub async fn get_devices(client: &ApiClient, filter: &DeviceFilter) -> Result<Vec<Device>, String> {
    client
        .get_with_query("/devices", filter)
        .await
        .into_result()
}

pub async fn get_device(client: &ApiClient, device_id: &str) -> Result<Device, String> {
    client
        .get(&format!("/devices/{}", device_id))
        .await
        .into_result()
}

#[tracing::instrument(skip(client, registration), fields(name = %registration.name))]
pub async fn register_device(
    client: &ApiClient,
    registration: &DeviceRegistration,
) -> Result<DeviceRegistered, String> {
    let registered: DeviceRegistered = client
        .post("/devices/register", registration)
        .await
        .into_result()?;
    tracing::info!(device_id = %registered.device_id, "Device registered");
    Ok(registered)
}

pub async fn update_device(
    client: &ApiClient,
    device_id: &str,
    update: &DeviceUpdate,
) -> Result<Ack, String> {
    client
        .patch(&format!("/devices/{}", device_id), update)
        .await
        .into_result()
}

#[tracing::instrument(skip(client))]
pub async fn delete_device(client: &ApiClient, device_id: &str) -> Result<Ack, String> {
    client
        .delete(&format!("/devices/{}", device_id))
        .await
        .into_result()
}

pub async fn get_device_stats(client: &ApiClient) -> Result<DeviceStats, String> {
    client.get("/devices/stats").await.into_result()
}

// ========== Performance & Services ==========

pub async fn get_device_performance(
    client: &ApiClient,
    device_id: &str,
    time_range: DeviceTimeRange,
) -> Result<DevicePerformanceMetrics, String> {
    client
        .get_with_query(
            &format!("/devices/{}/performance", device_id),
            &PerformanceQuery { time_range },
        )
        .await
        .into_result()
}

pub async fn get_device_services(
    client: &ApiClient,
    device_id: &str,
) -> Result<Vec<DeviceServiceInfo>, String> {
    client
        .get(&format!("/devices/{}/services", device_id))
        .await
        .into_result()
}

#[tracing::instrument(skip(client))]
pub async fn toggle_service(
    client: &ApiClient,
    device_id: &str,
    service_id: &str,
    enabled: bool,
) -> Result<Ack, String> {
    client
        .post(
            &format!("/devices/{}/services/{}/toggle", device_id, service_id),
            &ToggleService { enabled },
        )
        .await
        .into_result()
}

// ========== Logs & Alerts ==========

/// Recent log lines at `level` and above. Defaults to `info` and
/// [`DEFAULT_LOG_LIMIT`] lines.
pub async fn get_device_logs(
    client: &ApiClient,
    device_id: &str,
    level: Option<LogLevel>,
    limit: Option<u32>,
) -> Result<Vec<DeviceLog>, String> {
    let query = LogQuery {
        level: level.unwrap_or(LogLevel::Info),
        limit: limit.unwrap_or(DEFAULT_LOG_LIMIT),
    };
    client
        .get_with_query(&format!("/devices/{}/logs", device_id), &query)
        .await
        .into_result()
}

pub async fn get_device_alerts(
    client: &ApiClient,
    device_id: &str,
) -> Result<Vec<DeviceAlert>, String> {
    client
        .get(&format!("/devices/{}/alerts", device_id))
        .await
        .into_result()
}

pub async fn resolve_alert(
    client: &ApiClient,
    device_id: &str,
    alert_id: &str,
) -> Result<Ack, String> {
    client
        .post_empty(&format!("/devices/{}/alerts/{}/resolve", device_id, alert_id))
        .await
        .into_result()
}

// ========== Maintenance & Backup ==========

pub async fn get_maintenance(
    client: &ApiClient,
    device_id: &str,
) -> Result<Vec<DeviceMaintenance>, String> {
    client
        .get(&format!("/devices/{}/maintenance", device_id))
        .await
        .into_result()
}

#[tracing::instrument(skip(client, schedule), fields(kind = ?schedule.kind))]
pub async fn schedule_maintenance(
    client: &ApiClient,
    device_id: &str,
    schedule: &MaintenanceSchedule,
) -> Result<MaintenanceScheduled, String> {
    let scheduled: MaintenanceScheduled = client
        .post(&format!("/devices/{}/maintenance", device_id), schedule)
        .await
        .into_result()?;
    tracing::info!(maintenance_id = %scheduled.maintenance_id, "Maintenance scheduled");
    Ok(scheduled)
}

pub async fn get_backup_status(
    client: &ApiClient,
    device_id: &str,
) -> Result<DeviceBackupStatus, String> {
    client
        .get(&format!("/devices/{}/backup", device_id))
        .await
        .into_result()
}

#[tracing::instrument(skip(client))]
pub async fn start_backup(client: &ApiClient, device_id: &str) -> Result<BackupStarted, String> {
    client
        .post_empty(&format!("/devices/{}/backup", device_id))
        .await
        .into_result()
}

// ========== Security & Network ==========

pub async fn get_security_status(
    client: &ApiClient,
    device_id: &str,
) -> Result<DeviceSecurityStatus, String> {
    client
        .get(&format!("/devices/{}/security", device_id))
        .await
        .into_result()
}

#[tracing::instrument(skip(client))]
pub async fn run_security_scan(
    client: &ApiClient,
    device_id: &str,
) -> Result<SecurityScanStarted, String> {
    client
        .post_empty(&format!("/devices/{}/security/scan", device_id))
        .await
        .into_result()
}

pub async fn get_network_info(
    client: &ApiClient,
    device_id: &str,
) -> Result<DeviceNetworkInfo, String> {
    client
        .get(&format!("/devices/{}/network", device_id))
        .await
        .into_result()
}

// ========== Export ==========

#[tracing::instrument(skip(client))]
pub async fn export_device_data(
    client: &ApiClient,
    device_id: &str,
    format: ExportFormat,
    data_type: DeviceExportDataType,
) -> Result<ExportData, String> {
    client
        .post(
            &format!("/devices/{}/export", device_id),
            &DeviceExportRequest { format, data_type },
        )
        .await
        .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::client::tests::{client_for, spawn_server};
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use shared::{
        BackupState, DeviceStatus, DeviceType, FirewallAction, MaintenanceStatus, MaintenanceType,
        Severity,
    };
    use std::collections::HashMap;

    fn query_echo(params: HashMap<String, String>) -> Value {
        let mut keys: Vec<_> = params.into_iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        keys.sort();
        json!(keys)
    }

    // ========== Registry Tests ==========

    #[tokio::test]
    async fn test_get_devices_sends_filters_as_query() {
        let router = Router::new().route(
            "/devices",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(
                    query_echo(params),
                    json!(["country=Kenya", "status=online", "type=edge"])
                );
                Json(json!([]))
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let filter = DeviceFilter {
            status: Some(DeviceStatus::Online),
            kind: Some(DeviceType::Edge),
            country: Some("Kenya".to_string()),
            ..Default::default()
        };
        let devices = get_devices(&client, &filter).await.unwrap();
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn test_register_device_returns_new_id() {
        let router = Router::new().route(
            "/devices/register",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["type"], "server");
                Json(json!({ "deviceId": "dev-42", "success": true }))
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let registration: DeviceRegistration = serde_json::from_value(json!({
            "name": "rack-1",
            "type": "server",
            "location": { "country": "Germany", "city": "Berlin", "coordinates": [52.52, 13.4] },
            "specifications": {
                "cpu": { "cores": 16, "model": "EPYC", "speed": 3.1 },
                "memory": { "total": 64.0, "type": "DDR5" },
                "storage": { "total": 2000.0, "type": "NVMe" },
                "network": { "bandwidth": 1000.0, "connectionType": "fiber" }
            },
            "services": ["compute"]
        }))
        .unwrap();

        let registered = register_device(&client, &registration).await.unwrap();
        assert_eq!(registered.device_id, "dev-42");
        assert!(registered.success);
    }

    #[tokio::test]
    async fn test_delete_device_surfaces_error_message() {
        let router = Router::new().route(
            "/devices/{id}",
            axum::routing::delete(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "message": "Device is still earning" })),
                )
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let err = delete_device(&client, "dev-1").await.unwrap_err();
        assert_eq!(err, "Device is still earning");
    }

    // ========== Service Tests ==========

    #[tokio::test]
    async fn test_toggle_service_posts_enabled_flag() {
        let router = Router::new().route(
            "/devices/{id}/services/{service}/toggle",
            post(
                |Path((id, service)): Path<(String, String)>, Json(body): Json<Value>| async move {
                    let ok = id == "dev-1" && service == "svc-9" && body["enabled"] == false;
                    Json(json!({ "success": ok }))
                },
            ),
        );
        let client = client_for(&spawn_server(router).await);

        let ack = toggle_service(&client, "dev-1", "svc-9", false).await.unwrap();
        assert!(ack.success);
    }

    #[tokio::test]
    async fn test_get_device_performance_sends_time_range() {
        let router = Router::new().route(
            "/devices/{id}/performance",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("timeRange").map(String::as_str), Some("7d"));
                Json(json!({
                    "uptime": 99.1,
                    "responseTime": 120.0,
                    "successRate": 98.0,
                    "totalRequests": 5000,
                    "earnings": 12.5,
                    "errors": 3,
                    "timeSeries": []
                }))
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let metrics = get_device_performance(&client, "dev-1", DeviceTimeRange::Week)
            .await
            .unwrap();
        assert_eq!(metrics.total_requests, 5000);
        assert_eq!(metrics.errors, 3);
    }

    // ========== Log & Alert Tests ==========

    #[tokio::test]
    async fn test_get_device_logs_defaults() {
        let router = Router::new().route(
            "/devices/{id}/logs",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(query_echo(params), json!(["level=info", "limit=100"]));
                Json(json!([{
                    "id": "log-1",
                    "level": "info",
                    "message": "service started",
                    "timestamp": "2025-06-01T12:00:00Z"
                }]))
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let logs = get_device_logs(&client, "dev-1", None, None).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].level, LogLevel::Info);
        assert_eq!(logs[0].service, None);
    }

    #[tokio::test]
    async fn test_resolve_alert_posts_without_body() {
        let router = Router::new().route(
            "/devices/{id}/alerts/{alert}/resolve",
            post(|body: String| async move { Json(json!({ "success": body.is_empty() })) }),
        );
        let client = client_for(&spawn_server(router).await);

        let ack = resolve_alert(&client, "dev-1", "alert-3").await.unwrap();
        assert!(ack.success);
    }

    // ========== Maintenance & Backup Tests ==========

    #[tokio::test]
    async fn test_schedule_and_list_maintenance() {
        let router = Router::new().route(
            "/devices/{id}/maintenance",
            get(|Path(id): Path<String>| async move {
                Json(json!([{
                    "id": format!("{}-m1", id),
                    "type": "upgrade",
                    "description": "firmware 2.1",
                    "scheduledAt": "2025-07-01T02:00:00Z",
                    "estimatedDuration": 45,
                    "status": "in-progress"
                }]))
            })
            .post(|Json(body): Json<Value>| async move {
                assert_eq!(body["type"], "routine");
                assert_eq!(body["estimatedDuration"], 30);
                Json(json!({ "maintenanceId": "m-2", "success": true }))
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let schedule = MaintenanceSchedule {
            kind: MaintenanceType::Routine,
            description: "disk check".to_string(),
            scheduled_at: "2025-07-02T02:00:00Z".parse().unwrap(),
            estimated_duration: 30,
        };
        let scheduled = schedule_maintenance(&client, "dev-1", &schedule).await.unwrap();
        assert_eq!(scheduled.maintenance_id, "m-2");

        let windows = get_maintenance(&client, "dev-1").await.unwrap();
        assert_eq!(windows[0].id, "dev-1-m1");
        assert_eq!(windows[0].status, MaintenanceStatus::InProgress);
    }

    #[tokio::test]
    async fn test_backup_status_and_start() {
        let router = Router::new().route(
            "/devices/{id}/backup",
            get(|| async {
                Json(json!({
                    "lastBackup": "2025-06-01T00:00:00Z",
                    "backupSize": 1_048_576,
                    "backupStatus": "failed",
                    "nextScheduledBackup": "2025-06-02T00:00:00Z",
                    "retentionDays": 14
                }))
            })
            .post(|body: String| async move {
                Json(json!({ "backupId": "b-7", "success": body.is_empty() }))
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let status = get_backup_status(&client, "dev-1").await.unwrap();
        assert_eq!(status.backup_status, BackupState::Failed);
        assert_eq!(status.retention_days, 14);

        let started = start_backup(&client, "dev-1").await.unwrap();
        assert_eq!(started.backup_id, "b-7");
        assert!(started.success);
    }

    // ========== Security & Network Tests ==========

    #[tokio::test]
    async fn test_security_status_and_scan() {
        let router = Router::new()
            .route(
                "/devices/{id}/security",
                get(|| async {
                    Json(json!({
                        "securityScore": 88.0,
                        "vulnerabilities": [{
                            "id": "v-1",
                            "severity": "medium",
                            "description": "outdated openssl",
                            "patchAvailable": true
                        }],
                        "lastSecurityScan": "2025-06-01T00:00:00Z",
                        "nextSecurityScan": "2025-06-08T00:00:00Z",
                        "firewallStatus": "enabled",
                        "antivirusStatus": "disabled"
                    }))
                }),
            )
            .route(
                "/devices/{id}/security/scan",
                post(|Path(id): Path<String>| async move {
                    Json(json!({ "scanId": format!("scan-{}", id), "success": true }))
                }),
            );
        let client = client_for(&spawn_server(router).await);

        let status = get_security_status(&client, "dev-1").await.unwrap();
        assert_eq!(status.vulnerabilities[0].severity, Severity::Medium);
        assert_eq!(status.vulnerabilities[0].cve, None);

        let scan = run_security_scan(&client, "dev-1").await.unwrap();
        assert_eq!(scan.scan_id, "scan-dev-1");
    }

    #[tokio::test]
    async fn test_get_network_info() {
        let router = Router::new().route(
            "/devices/{id}/network",
            get(|| async {
                Json(json!({
                    "ipAddress": "10.0.0.12",
                    "macAddress": "00:1A:2B:3C:4D:5E",
                    "connectionType": "fiber",
                    "bandwidth": 1000.0,
                    "latency": 8.5,
                    "packetLoss": 0.1,
                    "firewallRules": [{
                        "id": "r-1",
                        "name": "ssh",
                        "action": "deny",
                        "protocol": "tcp",
                        "port": 22,
                        "source": "0.0.0.0/0",
                        "destination": "10.0.0.12"
                    }]
                }))
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let info = get_network_info(&client, "dev-1").await.unwrap();
        assert_eq!(info.ip_address, "10.0.0.12");
        assert_eq!(info.firewall_rules[0].action, FirewallAction::Deny);
        assert_eq!(info.firewall_rules[0].port, 22);
    }

    #[tokio::test]
    async fn test_export_device_data_body() {
        let router = Router::new().route(
            "/devices/{id}/export",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({ "format": "csv", "dataType": "logs" }));
                Json(json!({
                    "downloadUrl": "https://files.nodara.network/dev-1-logs.csv",
                    "expiresAt": "2026-01-01T00:00:00Z"
                }))
            }),
        );
        let client = client_for(&spawn_server(router).await);

        let export =
            export_device_data(&client, "dev-1", ExportFormat::Csv, DeviceExportDataType::Logs)
                .await
                .unwrap();
        assert!(export.download_url.ends_with("dev-1-logs.csv"));
    }
}
