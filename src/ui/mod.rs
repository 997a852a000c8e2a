use iced::{
    widget::{button, column, container, progress_bar, row, text, text_input},
    Alignment, Element, Length, Theme,
};

use crate::application::ShareSession;

/// Form fields and hover state owned by the view
#[derive(Default)]
pub struct ShareView {
    pub to_email: String,
    pub from_email: String,
    pub drop_hovered: bool,
}

#[derive(Debug, Clone)]
pub enum ShareMessage {
    BrowsePressed,
    CopyPressed,
    ToEmailChanged(String),
    FromEmailChanged(String),
    SendPressed,
}

impl ShareView {
    pub fn update(&mut self, message: ShareMessage) {
        match message {
            ShareMessage::ToEmailChanged(email) => {
                self.to_email = email;
            }
            ShareMessage::FromEmailChanged(email) => {
                self.from_email = email;
            }
            ShareMessage::BrowsePressed | ShareMessage::CopyPressed | ShareMessage::SendPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn view<'a>(&'a self, session: &'a ShareSession) -> Element<'a, ShareMessage> {
        let drop_style: fn(&Theme) -> container::Style = if self.drop_hovered {
            container::bordered_box
        } else {
            container::rounded_box
        };

        let drop_zone = container(
            column![
                text("Drop your file here or").size(18),
                button("browse")
                    .on_press_maybe(session.can_browse().then_some(ShareMessage::BrowsePressed))
                    .padding([6, 14]),
            ]
            .spacing(8)
            .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(160.0))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .style(drop_style);

        let mut content = column![text("Share a file").size(32), drop_zone]
            .padding(20)
            .spacing(16);

        if session.progress_visible() {
            let progress = session.progress();
            content = content.push(
                column![
                    text(session.status()).size(14),
                    progress_bar(0.0..=1.0, progress.scale()),
                    text(format!("{}%", progress.percent())).size(14),
                ]
                .spacing(6),
            );
        }

        if session.sharing_visible() {
            content = content.push(
                column![
                    text(session.status()).size(14),
                    row![
                        text_input("", session.locator().unwrap_or_default()).padding(8),
                        button("Copy")
                            .on_press(ShareMessage::CopyPressed)
                            .padding([8, 14]),
                    ]
                    .spacing(8),
                    text("Or send via email").size(16),
                    text_input("Receiver's email", &self.to_email)
                        .on_input(ShareMessage::ToEmailChanged)
                        .padding(8),
                    text_input("Your email", &self.from_email)
                        .on_input(ShareMessage::FromEmailChanged)
                        .padding(8),
                    button(session.send_label())
                        .on_press_maybe(session.can_send().then_some(ShareMessage::SendPressed))
                        .padding([10, 20]),
                ]
                .spacing(8),
            );
        }

        if let Some(message) = session.toast().message() {
            content = content.push(
                container(text(message).size(14))
                    .padding(10)
                    .style(container::dark),
            );
        }

        content.into()
    }
}
