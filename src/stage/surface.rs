//! The sequencer's view of the rendering layer.
//!
//! Card content (text, images, video) is owned by the host. The sequencer only ever reads layout
//! metrics and writes [`CardPlacement`]s through typed [`CardHandle`]s passed in by the owning
//! view.

use crate::foundation::core::{CardPlacement, ViewportMetrics};

/// Opaque reference to a mounted card element, issued by the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CardHandle(pub u32);

/// A card as seen by the sequencer: its position in the stack and, if mounted, its element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub index: usize,
    pub handle: Option<CardHandle>,
}

impl Card {
    pub fn mounted(index: usize, handle: CardHandle) -> Self {
        Self {
            index,
            handle: Some(handle),
        }
    }

    pub fn unmounted(index: usize) -> Self {
        Self {
            index,
            handle: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    Scroll,
    Resize,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ListenerId(pub u64);

/// Host collaborator consumed by the scroll binder.
///
/// Calls naming a handle the host no longer knows must be harmless: `card_height` returns
/// `None` and `place` returns `false`.
pub trait Stage {
    fn viewport(&self) -> ViewportMetrics;

    /// Document offset at which the wrapper's top edge meets the top of the viewport.
    fn wrapper_top(&self) -> f64;

    fn card_height(&self, card: CardHandle) -> Option<f64>;

    fn place(&mut self, card: CardHandle, placement: CardPlacement) -> bool;

    fn set_pinned(&mut self, pinned: bool);

    fn listen(&mut self, kind: ListenerKind) -> ListenerId;

    fn unlisten(&mut self, id: ListenerId);
}
