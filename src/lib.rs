//! An animated loading widget for iced that reveals a logo image through a
//! moving mask band over a solid background.
//!
//! The widget is driven by the host application: build a [`RevealConfig`]
//! (or resolve a raw [`RevealStyle`]), wrap it in a [`LogoReveal`], call
//! [`LogoReveal::tick`] on every animation frame and [`LogoReveal::view`]
//! when building the UI. Detaching the widget from the tree should be paired
//! with [`LogoReveal::detach`] so the running animation is canceled.

pub mod reveal;
pub mod style;

pub use reveal::{
    LogoReveal, RepeatCount, RepeatMode, RevealConfig, RevealError, RevealFrame, StartDirection,
};
pub use style::RevealStyle;
