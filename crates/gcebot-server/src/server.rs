use crate::features::command_dispatch::controller::{InteractionController, InteractionOutcome};
use crate::features::command_dispatch::service::CommandDispatcher;
use crate::features::cost_guard::controller::CostGuardController;
use crate::features::cost_guard::repo::{InMemoryNotificationLedger, Notifier};
use crate::features::cost_guard::service::CostGuardService;
use crate::features::instance_gateway::repo::ComputeRepository;
use crate::features::instance_gateway::service::{ComputeGateway, InstanceGateway};
use crate::features::instance_lifecycle::service::LifecycleService;
use crate::features::observability::controller::global_observability_controller;
use crate::shared::config::BotConfig;
use crate::shared::error::BotResult;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gcebot_core::InteractionResponseType;
use gcebot_providers::{DiscordWebhookClient, GceComputeClient};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const BAD_SIGNATURE_BODY: &str = "Bad request signature";
pub const BAD_PAYLOAD_BODY: &str = "Invalid interaction payload";

#[derive(Clone)]
pub struct AppState {
    interactions: Arc<InteractionController>,
    cost_guard: Arc<CostGuardController>,
}

impl AppState {
    pub fn new(
        interactions: Arc<InteractionController>,
        cost_guard: Arc<CostGuardController>,
    ) -> Self {
        Self {
            interactions,
            cost_guard,
        }
    }

    pub fn cost_guard(&self) -> Arc<CostGuardController> {
        self.cost_guard.clone()
    }
}

/// Wires the provider clients and feature services from one config.
pub fn build_state(config: &BotConfig) -> BotResult<AppState> {
    let compute = GceComputeClient::new(
        config.target.clone(),
        config.token_source.clone(),
        config.request_timeout,
    )?;
    let repo: Arc<dyn ComputeRepository> = Arc::new(compute);
    let gateway: Arc<dyn InstanceGateway> = Arc::new(ComputeGateway::new(repo));

    let lifecycle = Arc::new(LifecycleService::new(gateway.clone()));
    let dispatcher = Arc::new(CommandDispatcher::new(lifecycle));
    let interactions = Arc::new(InteractionController::new(
        dispatcher,
        config.public_key.clone(),
    ));

    let notifier = match &config.notification_webhook_url {
        Some(url) => {
            let client = DiscordWebhookClient::new(url.clone(), config.request_timeout)?;
            Some(Arc::new(client) as Arc<dyn Notifier>)
        }
        None => {
            info!("DISCORD_WEBHOOK_URL not set; cost warnings cannot be delivered");
            None
        }
    };
    let cost_guard = Arc::new(CostGuardController::new(Arc::new(CostGuardService::new(
        gateway,
        notifier,
        Arc::new(InMemoryNotificationLedger::new()),
        config.notify_policy,
        config.target.instance_name.clone(),
    ))));

    Ok(AppState::new(interactions, cost_guard))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_interaction))
        .route("/interactions", post(handle_interaction))
        .route("/cost-guard", get(handle_cost_guard).post(handle_cost_guard))
        .route("/healthz", get(handle_health))
        .route("/metrics", get(handle_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();

    let (kind, response) = match state.interactions.handle(&headers, &body).await {
        InteractionOutcome::Unauthorized => (
            "unauthorized",
            (StatusCode::UNAUTHORIZED, BAD_SIGNATURE_BODY).into_response(),
        ),
        InteractionOutcome::BadRequest(_) => (
            "invalid",
            (StatusCode::BAD_REQUEST, BAD_PAYLOAD_BODY).into_response(),
        ),
        InteractionOutcome::Reply(reply) => {
            let kind = match reply.kind {
                InteractionResponseType::Pong => "ping",
                InteractionResponseType::ChannelMessageWithSource => "command",
            };
            (kind, Json(reply).into_response())
        }
    };

    global_observability_controller().record_interaction(
        kind,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

async fn handle_cost_guard(State(state): State<AppState>) -> (StatusCode, String) {
    let report = state.cost_guard.check().await;
    let status =
        StatusCode::from_u16(report.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, report.message)
}

async fn handle_health() -> &'static str {
    "ok"
}

async fn handle_metrics() -> Response {
    match global_observability_controller().render_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(message) => {
            error!(error = %message, "Failed to render metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}
