use super::ConfigUpdate;
use super::QueryPrompt;

pub enum Action {
    BackendBootstrap(),
    ConfigFetch(),
    ConfigSave(ConfigUpdate),
    IndexRequest(String),
    QueryRequest(QueryPrompt),
}
