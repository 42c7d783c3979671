//! Server module.

use std::time::Duration;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use codeagent_ai_interface::AiService;
use codeagent_config::Config;
use codeagent_core::{
    workspace::{MemoryWorkspaceStore, WorkspaceStore},
    CoreContext, CoreModule,
};
use codeagent_ghapi_interface::ApiService;
use codeagent_git_interface::GitService;
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    ai::MetricsAiService, ghapi::MetricsApiService, git::MetricsGitService,
    health::health_check_route, metrics::build_metrics_handler, middlewares::VerifySignature,
    webhook::configure_webhook_handlers, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// API adapter.
    pub api_service: Box<dyn ApiService>,
    /// AI backend adapter.
    pub ai_service: Box<dyn AiService>,
    /// Git adapter.
    pub git_service: Box<dyn GitService>,
    /// Workspace cache and clone records.
    pub workspace_store: Box<dyn WorkspaceStore>,
}

impl AppContext {
    /// Create new app context.
    pub fn new(config: Config, core_module: CoreModule) -> Self {
        Self {
            api_service: Box::new(MetricsApiService::new(config.clone())),
            ai_service: Box::new(MetricsAiService::new(&config.ai)),
            git_service: Box::new(MetricsGitService::new(&config.git)),
            workspace_store: Box::new(Self::build_workspace_store(&config)),
            config,
            core_module,
        }
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        api_service: Box<dyn ApiService>,
        ai_service: Box<dyn AiService>,
        git_service: Box<dyn GitService>,
    ) -> Self {
        Self {
            workspace_store: Box::new(Self::build_workspace_store(&config)),
            config,
            core_module,
            api_service,
            ai_service,
            git_service,
        }
    }

    fn build_workspace_store(config: &Config) -> MemoryWorkspaceStore {
        MemoryWorkspaceStore::new(
            Duration::from_secs(config.git.cache_ttl),
            Duration::from_secs(config.git.clone_interval),
        )
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            api_service: self.api_service.as_ref(),
            ai_service: self.ai_service.as_ref(),
            git_service: self.git_service.as_ref(),
            workspace_store: self.workspace_store.as_ref(),
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let prometheus = build_metrics_handler();

    App::new()
        .app_data(context.clone())
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .service(
            web::scope("/webhook")
                .wrap(VerifySignature::new(&context.config))
                .configure(configure_webhook_handlers),
        )
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on codeagent!" }))
            }),
        )
}

/// Run bot server.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        ai_backend = %context.ai_service.name(),
        message = "Starting bot server",
    );

    run_bot_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_bot_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();

    let mut server = HttpServer::new(move || build_actix_app(context.clone()));

    if let Some(workers) = cloned_context.config.server.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
