use codeagent_ai_interface::AiService;
use codeagent_config::Config;
use codeagent_ghapi_interface::ApiService;
use codeagent_git_interface::GitService;

use crate::{workspace::WorkspaceStore, CoreModule};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub api_service: &'a (dyn ApiService + 'a),
    pub ai_service: &'a (dyn AiService + 'a),
    pub git_service: &'a (dyn GitService + 'a),
    pub workspace_store: &'a (dyn WorkspaceStore + 'a),
}
