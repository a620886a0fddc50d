//! Demo application hosting the loading widget.
//!
//! Plays the host-container role: schedules animation frames while the
//! widget is attached and animating, and exposes an attach/detach toggle
//! that exercises the cancellation and reattachment behavior.

use iced::time::Instant;
use iced::widget::{Space, button, column, container, row, text};
use iced::{Element, Length, Subscription, Task, Theme};

use logo_reveal::{LogoReveal, StartDirection};

pub struct App {
    reveal: LogoReveal,
    attached: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    AnimationTick,
    ToggleAttached,
    DirectionSelected(StartDirection),
}

impl App {
    pub fn new(reveal: LogoReveal) -> (Self, Task<Message>) {
        (
            Self {
                reveal,
                attached: true,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AnimationTick => {
                self.reveal.tick(Instant::now());
            }
            Message::ToggleAttached => {
                self.attached = !self.attached;
                if !self.attached {
                    self.reveal.detach();
                }
            }
            Message::DirectionSelected(direction) => {
                // A fresh configuration means a fresh widget; the reveal
                // cursor is never carried across configurations.
                let config = self.reveal.config().clone().direction(direction);
                match LogoReveal::new(config) {
                    Ok(reveal) => self.reveal = reveal,
                    Err(e) => tracing::error!("failed to rebuild the widget: {}", e),
                }
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let current = self.reveal.config().direction;
        let controls = row![
            direction_button(StartDirection::Bottom, current),
            direction_button(StartDirection::Top, current),
            direction_button(StartDirection::Cover, current),
            Space::new().width(Length::Fill),
            button(text(if self.attached { "Detach" } else { "Attach" }).size(14))
                .on_press(Message::ToggleAttached),
        ]
        .spacing(8)
        .padding(12);

        let body: Element<'_, Message> = if self.attached {
            container(self.reveal.view())
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(24)
                .into()
        } else {
            container(text("Widget detached; the animation is canceled.").size(14))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into()
        };

        column![controls, body].into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        // Frames are only requested while the widget is attached and its
        // animation is live; a finished run-once animation stops them.
        if self.attached && self.reveal.is_animating(Instant::now()) {
            iced::window::frames().map(|_| Message::AnimationTick)
        } else {
            Subscription::none()
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn direction_button(
    direction: StartDirection,
    current: StartDirection,
) -> Element<'static, Message> {
    let label = text(direction.label()).size(14);
    let mut control = button(label);
    if direction != current {
        control = control.on_press(Message::DirectionSelected(direction));
    }
    control.into()
}
