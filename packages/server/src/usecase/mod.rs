//! UseCase layer: application services with constructor-injected
//! dependencies, one struct per operation.

mod attach_broadcaster;
mod caption_pipeline;
mod change_language;
mod fanout;
mod join_viewer;
mod leave_viewer;

pub use attach_broadcaster::AttachBroadcasterUseCase;
pub use caption_pipeline::CaptionPipeline;
pub use change_language::ChangeLanguageUseCase;
pub use fanout::BroadcastFanout;
pub use join_viewer::JoinViewerUseCase;
pub use leave_viewer::LeaveViewerUseCase;
