use tui_textarea::Input;

use super::ConfigSnapshot;
use super::IndexResponse;
use super::QueryResponse;
use super::SaveConfigResponse;

pub enum Event {
    BackendReady(ConfigSnapshot),
    BackendUnavailable(String),
    ConfigLoaded(ConfigSnapshot),
    ConfigLoadFailed(String),
    ConfigSaved(SaveConfigResponse),
    ConfigSaveFailed(String),
    IndexResponse(IndexResponse),
    IndexFailed(String),
    QueryResponse(QueryResponse),
    QueryFailed(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
