//! # Wallet Endpoints
//!
//! Balances, payments, swaps, contacts and preferences for a wallet address.
//! Every call goes through [`ApiClient`] and unwraps the envelope, so callers
//! get `Err(message)` for both transport and server failures.

use serde::Serialize;
use shared::{
    Ack, AddressValidation, ExportData, ExportFormat, ExportRequest, FeeEstimate,
    FeeEstimateRequest, NewContact, PaymentRequest, SupportedToken, SwapRequest, SwapResponse,
    TokenPrice, TransactionHistory, TransactionQuery, TransactionReceipt, TransactionResponse,
    WalletActivity, WalletBalance, WalletContact, WalletPreferences, WalletPreferencesUpdate,
    WalletStats, WalletTransaction,
};

use super::client::ApiClient;

/// Days of activity returned when the caller does not ask for a window.
pub const DEFAULT_ACTIVITY_DAYS: u32 = 30;

#[derive(Serialize)]
struct ActivityQuery {
    days: u32,
}

// ========== Balances & History ==========

#[tracing::instrument(skip(client))]
pub async fn get_balance(client: &ApiClient, address: &str) -> Result<WalletBalance, String> {
    client
        .get(&format!("/wallet/{}/balance", address))
        .await
        .into_result()
}

/// Paged transaction list; unset filters are not sent.
#[tracing::instrument(skip(client, query))]
pub async fn get_transactions(
    client: &ApiClient,
    address: &str,
    query: &TransactionQuery,
) -> Result<TransactionHistory, String> {
    client
        .get_with_query(&format!("/wallet/{}/transactions", address), query)
        .await
        .into_result()
}

pub async fn get_transaction_status(
    client: &ApiClient,
    transaction_id: &str,
) -> Result<WalletTransaction, String> {
    client
        .get(&format!("/transactions/{}", transaction_id))
        .await
        .into_result()
}

pub async fn get_transaction_receipt(
    client: &ApiClient,
    transaction_id: &str,
) -> Result<TransactionReceipt, String> {
    client
        .get(&format!("/transactions/{}/receipt", transaction_id))
        .await
        .into_result()
}

pub async fn get_wallet_stats(client: &ApiClient, address: &str) -> Result<WalletStats, String> {
    client
        .get(&format!("/wallet/{}/stats", address))
        .await
        .into_result()
}

/// Daily activity for the last `days` days (defaults to
/// [`DEFAULT_ACTIVITY_DAYS`]).
pub async fn get_wallet_activity(
    client: &ApiClient,
    address: &str,
    days: Option<u32>,
) -> Result<Vec<WalletActivity>, String> {
    let query = ActivityQuery {
        days: days.unwrap_or(DEFAULT_ACTIVITY_DAYS),
    };
    client
        .get_with_query(&format!("/wallet/{}/activity", address), &query)
        .await
        .into_result()
}

// ========== Payments & Swaps ==========

#[tracing::instrument(skip(client, request), fields(amount = request.amount, token = %request.token))]
pub async fn send_payment(
    client: &ApiClient,
    address: &str,
    request: &PaymentRequest,
) -> Result<TransactionResponse, String> {
    tracing::info!("Submitting payment");
    client
        .post(&format!("/wallet/{}/send", address), request)
        .await
        .into_result()
}

#[tracing::instrument(skip(client, request), fields(from = %request.from_token, to = %request.to_token))]
pub async fn swap_tokens(
    client: &ApiClient,
    address: &str,
    request: &SwapRequest,
) -> Result<SwapResponse, String> {
    tracing::info!("Submitting swap");
    client
        .post(&format!("/wallet/{}/swap", address), request)
        .await
        .into_result()
}

pub async fn estimate_fee(
    client: &ApiClient,
    address: &str,
    request: &FeeEstimateRequest,
) -> Result<FeeEstimate, String> {
    client
        .post(&format!("/wallet/{}/estimate-fee", address), request)
        .await
        .into_result()
}

// ========== Tokens ==========

pub async fn get_supported_tokens(client: &ApiClient) -> Result<Vec<SupportedToken>, String> {
    client.get("/wallet/supported-tokens").await.into_result()
}

pub async fn get_token_price(client: &ApiClient, token: &str) -> Result<TokenPrice, String> {
    client
        .get(&format!("/wallet/token-price/{}", token))
        .await
        .into_result()
}

pub async fn validate_address(
    client: &ApiClient,
    address: &str,
) -> Result<AddressValidation, String> {
    client
        .get(&format!("/wallet/validate-address/{}", address))
        .await
        .into_result()
}

// ========== Contacts ==========

pub async fn get_contacts(client: &ApiClient, address: &str) -> Result<Vec<WalletContact>, String> {
    client
        .get(&format!("/wallet/{}/contacts", address))
        .await
        .into_result()
}

pub async fn add_contact(
    client: &ApiClient,
    address: &str,
    contact: &NewContact,
) -> Result<Ack, String> {
    client
        .post(&format!("/wallet/{}/contacts", address), contact)
        .await
        .into_result()
}

pub async fn remove_contact(
    client: &ApiClient,
    address: &str,
    contact_address: &str,
) -> Result<Ack, String> {
    client
        .delete(&format!("/wallet/{}/contacts/{}", address, contact_address))
        .await
        .into_result()
}

// ========== Preferences ==========

pub async fn get_preferences(
    client: &ApiClient,
    address: &str,
) -> Result<WalletPreferences, String> {
    client
        .get(&format!("/wallet/{}/preferences", address))
        .await
        .into_result()
}

/// Partial update; only the `Some` fields are sent.
pub async fn update_preferences(
    client: &ApiClient,
    address: &str,
    update: &WalletPreferencesUpdate,
) -> Result<Ack, String> {
    client
        .patch(&format!("/wallet/{}/preferences", address), update)
        .await
        .into_result()
}

// ========== Export ==========

#[tracing::instrument(skip(client, request), fields(format = ?request.format))]
pub async fn export_transactions(
    client: &ApiClient,
    address: &str,
    request: &ExportRequest<ExportFormat>,
) -> Result<ExportData, String> {
    client
        .post(&format!("/wallet/{}/export", address), request)
        .await
        .into_result()
}
