use crate::api::{ApiClient, ApiConfig};
use crate::application::{ShareCoordinator, ShareSession, TOAST_DURATION};
use crate::domain::{
    EmailError, FileCandidate, InputSource, SharePhase, UploadError, UploadRequest, UploadResult,
};
use crate::ui::{ShareMessage, ShareView};
use iced::{event, time, window, Event, Subscription, Task};
use std::path::PathBuf;
use std::time::Duration;

const PROGRESS_TICK: Duration = Duration::from_millis(200);
/// A multi-file drop arrives as one event per file
const DROP_SETTLE: Duration = Duration::from_millis(50);

pub struct ShareApp {
    view: ShareView,
    session: ShareSession,
    coordinator: ShareCoordinator,
    // Paths dropped since the last settle
    pending_drop: Vec<PathBuf>,
    // Toast generation of the most recently started expiry timer
    scheduled_toast: u64,
}

impl Default for ShareApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareApp {
    pub fn new() -> Self {
        let api_client = ApiClient::new(ApiConfig::default());

        Self {
            view: ShareView::default(),
            session: ShareSession::default(),
            coordinator: ShareCoordinator::new(api_client),
            pending_drop: Vec::new(),
            scheduled_toast: 0,
        }
    }

    /// The progress tick only runs while an upload is in flight.
    fn is_ticking(&self) -> bool {
        self.session.phase() == SharePhase::Uploading
    }

    fn inspect(&self, source: InputSource, paths: Vec<PathBuf>) -> Task<Message> {
        let coordinator = self.coordinator.clone();
        Task::perform(
            async move { coordinator.inspect(paths).await },
            move |result| Message::InputInspected(source, result),
        )
    }

    fn upload(&self, request: UploadRequest) -> Task<Message> {
        let coordinator = self.coordinator.clone();
        Task::perform(
            async move { coordinator.upload(request).await },
            Message::UploadFinished,
        )
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(ShareMessage),
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    DropSettled,
    PickerClosed(Option<PathBuf>),
    InputInspected(InputSource, Result<Vec<FileCandidate>, UploadError>),
    ProgressTick,
    UploadFinished(Result<UploadResult, UploadError>),
    EmailFinished(Result<(), EmailError>),
    /// Carries the toast generation the timer was started for
    ToastExpired(u64),
}

pub fn update(app: &mut ShareApp, message: Message) -> Task<Message> {
    let toast_before = app.session.toast().generation();
    let task = handle(app, message);
    let toast_after = app.session.toast().generation();

    if toast_after == toast_before {
        return task;
    }

    // A new toast restarts the expiry window; older timers are ignored.
    app.scheduled_toast = toast_after;
    Task::batch([
        task,
        Task::perform(tokio::time::sleep(TOAST_DURATION), move |_| {
            Message::ToastExpired(toast_after)
        }),
    ])
}

fn handle(app: &mut ShareApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                ShareMessage::BrowsePressed if app.session.can_browse() => {
                    let coordinator = app.coordinator.clone();
                    return Task::perform(
                        async move { coordinator.choose_file().await },
                        Message::PickerClosed,
                    );
                }
                ShareMessage::CopyPressed => {
                    if let Some(locator) = app.session.copy_locator() {
                        return iced::clipboard::write(locator);
                    }
                }
                ShareMessage::SendPressed => {
                    if let Some(request) = app
                        .session
                        .begin_email(&app.view.to_email, &app.view.from_email)
                    {
                        let coordinator = app.coordinator.clone();
                        return Task::perform(
                            async move { coordinator.send_email(request).await },
                            Message::EmailFinished,
                        );
                    }
                }
                _ => {}
            }
        }
        Message::FileHovered => {
            app.view.drop_hovered = true;
        }
        Message::FilesHoveredLeft => {
            app.view.drop_hovered = false;
        }
        Message::FileDropped(path) => {
            app.view.drop_hovered = false;
            let first = app.pending_drop.is_empty();
            app.pending_drop.push(path);

            if first {
                return Task::perform(tokio::time::sleep(DROP_SETTLE), |_| Message::DropSettled);
            }
        }
        Message::DropSettled => {
            let paths = std::mem::take(&mut app.pending_drop);
            if app.session.precheck(InputSource::Drop, paths.len()) {
                return app.inspect(InputSource::Drop, paths);
            }
        }
        Message::PickerClosed(path) => {
            // Cancelled dialog leaves everything as it was
            if let Some(path) = path {
                if app.session.precheck(InputSource::Picker, 1) {
                    return app.inspect(InputSource::Picker, vec![path]);
                }
            }
        }
        Message::InputInspected(source, result) => match result {
            Ok(candidates) => {
                if let Some(request) = app.session.accept(source, candidates) {
                    return app.upload(request);
                }
            }
            Err(e) => app.session.input_failed(e),
        },
        Message::ProgressTick => {
            app.session.tick();
        }
        Message::UploadFinished(result) => {
            app.session.finish_upload(result);
        }
        Message::EmailFinished(result) => {
            app.session.finish_email(result);
        }
        Message::ToastExpired(generation) => {
            app.session.expire_toast(generation);
        }
    }
    Task::none()
}

pub fn view(app: &ShareApp) -> iced::Element<'_, Message> {
    app.view.view(&app.session).map(Message::UiMessage)
}

pub fn subscription(app: &ShareApp) -> Subscription<Message> {
    let drops = event::listen_with(|event, _status, _window| match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    });

    // Dropping the subscription when the upload resolves stops the ticks.
    if app.is_ticking() {
        Subscription::batch([drops, time::every(PROGRESS_TICK).map(|_| Message::ProgressTick)])
    } else {
        drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MEBIBYTE;

    fn candidate(name: &str, size: u64) -> FileCandidate {
        FileCandidate {
            path: PathBuf::from(name),
            name: name.to_string(),
            size,
            media_type: "application/octet-stream".to_string(),
        }
    }

    fn uploading_app() -> ShareApp {
        let mut app = ShareApp::new();
        let _ = update(
            &mut app,
            Message::InputInspected(
                InputSource::Drop,
                Ok(vec![candidate("a.bin", 5 * MEBIBYTE)]),
            ),
        );
        app
    }

    #[tokio::test]
    async fn test_dropped_file_and_folder_rejected_as_multiple() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.pdf");
        std::fs::write(&file, b"%PDF-1.4").unwrap();
        let folder = dir.path().join("folder");
        std::fs::create_dir(&folder).unwrap();

        let mut app = ShareApp::new();
        let _ = update(&mut app, Message::FileDropped(file));
        let _ = update(&mut app, Message::FileDropped(folder));
        assert_eq!(app.pending_drop.len(), 2);

        let _ = update(&mut app, Message::DropSettled);

        assert!(app.pending_drop.is_empty());
        assert_eq!(app.session.phase(), SharePhase::Idle);
        assert_eq!(
            app.session.toast().message(),
            Some("You can't upload multiple files")
        );
    }

    #[tokio::test]
    async fn test_single_drop_is_batched_until_settled() {
        let mut app = ShareApp::new();
        let _ = update(&mut app, Message::FileHovered);
        assert!(app.view.drop_hovered);

        let _ = update(&mut app, Message::FileDropped(PathBuf::from("a.bin")));
        assert!(!app.view.drop_hovered);
        assert_eq!(app.pending_drop, vec![PathBuf::from("a.bin")]);

        let _ = update(&mut app, Message::DropSettled);
        assert!(app.pending_drop.is_empty());
        assert_eq!(app.session.toast().message(), None);
    }

    #[tokio::test]
    async fn test_ticks_stop_after_failed_upload() {
        let mut app = uploading_app();
        assert!(app.is_ticking());

        let _ = update(&mut app, Message::ProgressTick);
        let _ = update(&mut app, Message::ProgressTick);
        assert_eq!(app.session.progress().percent(), 20);

        let _ = update(
            &mut app,
            Message::UploadFinished(Err(UploadError::ServerError {
                status: 500,
                body: "boom".to_string(),
            })),
        );
        assert!(!app.is_ticking());

        let _ = update(&mut app, Message::ProgressTick);
        assert_eq!(app.session.progress().percent(), 20);
        assert!(!app.session.sharing_visible());
    }

    #[tokio::test]
    async fn test_ticks_stop_after_successful_upload() {
        let mut app = uploading_app();
        let _ = update(&mut app, Message::ProgressTick);

        let _ = update(
            &mut app,
            Message::UploadFinished(Ok(UploadResult::new("https://host/abc123"))),
        );
        assert!(!app.is_ticking());
        assert_eq!(app.session.progress().percent(), 100);
        assert_eq!(app.session.locator(), Some("https://host/abc123"));
    }

    #[tokio::test]
    async fn test_expiry_scheduled_only_for_new_toast() {
        let mut app = ShareApp::new();

        let _ = update(&mut app, Message::ProgressTick);
        let _ = update(&mut app, Message::UiMessage(ShareMessage::CopyPressed));
        assert_eq!(app.scheduled_toast, 0);

        let _ = update(&mut app, Message::FileDropped(PathBuf::from("a.bin")));
        let _ = update(&mut app, Message::FileDropped(PathBuf::from("b.bin")));
        let _ = update(&mut app, Message::DropSettled);
        let first = app.session.toast().generation();
        assert_eq!(app.scheduled_toast, first);

        let _ = update(&mut app, Message::FileDropped(PathBuf::from("a.bin")));
        let _ = update(&mut app, Message::FileDropped(PathBuf::from("b.bin")));
        let _ = update(&mut app, Message::DropSettled);
        let second = app.session.toast().generation();
        assert_ne!(first, second);
        assert_eq!(app.scheduled_toast, second);

        let _ = update(&mut app, Message::ToastExpired(first));
        assert!(app.session.toast().message().is_some());
        assert_eq!(app.scheduled_toast, second);

        let _ = update(&mut app, Message::ToastExpired(second));
        assert_eq!(app.session.toast().message(), None);
        assert_eq!(app.scheduled_toast, second);
    }
}
