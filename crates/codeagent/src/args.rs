use std::sync::Arc;

use clap::Parser;
use codeagent_ai_interface::AiService;
use codeagent_config::{ApiDriver, Config};
use codeagent_core::CoreModule;
use codeagent_ghapi_interface::ApiService;
use codeagent_ghapi_null::NullApiService;
use codeagent_git_interface::GitService;
use codeagent_sentry::with_sentry_configuration;
use codeagent_server::{ai::MetricsAiService, ghapi::MetricsApiService, git::MetricsGitService};
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();

            let api_service: Box<dyn ApiService> = {
                if config.api.driver == ApiDriver::GitHub {
                    info!("Using MetricsApiService API driver");
                    Box::new(MetricsApiService::new(config.clone()))
                } else {
                    info!("Using NullApiService API driver");
                    Box::new(NullApiService::new())
                }
            };

            info!(driver = ?config.ai.driver, "Using MetricsAiService AI driver");
            let ai_service: Box<dyn AiService> = Box::new(MetricsAiService::new(&config.ai));
            let git_service: Box<dyn GitService> = Box::new(MetricsGitService::new(&config.git));

            let ctx = CommandContext {
                config: config.clone(),
                core_module,
                api_service,
                ai_service,
                git_service,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            with_sentry_configuration(&config.clone(), || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("could not build the tokio runtime")
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
