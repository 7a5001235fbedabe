//! Shared application state.

use std::sync::Arc;

use crate::config::Settings;
use crate::domain::RoomRegistry;
use crate::infrastructure::stt::TranscriptionBridge;
use crate::usecase::{
    AttachBroadcasterUseCase, CaptionPipeline, ChangeLanguageUseCase, JoinViewerUseCase,
    LeaveViewerUseCase,
};

/// Everything the handlers need, wired once in `main` and shared via `Arc`.
pub struct AppState {
    pub settings: Settings,
    pub registry: Arc<dyn RoomRegistry>,
    pub bridge: Arc<TranscriptionBridge>,
    pub attach_broadcaster_usecase: Arc<AttachBroadcasterUseCase>,
    pub join_viewer_usecase: Arc<JoinViewerUseCase>,
    pub leave_viewer_usecase: Arc<LeaveViewerUseCase>,
    pub change_language_usecase: Arc<ChangeLanguageUseCase>,
    pub caption_pipeline: Arc<CaptionPipeline>,
}
