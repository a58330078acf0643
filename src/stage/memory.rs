use std::collections::BTreeMap;

use crate::foundation::core::{CardPlacement, ViewportMetrics};
use crate::stage::surface::{Card, CardHandle, ListenerId, ListenerKind, Stage};

#[derive(Clone, Debug)]
struct MemoryCard {
    height: f64,
    placement: Option<CardPlacement>,
}

/// In-memory [`Stage`] for headless simulation and tests.
#[derive(Clone, Debug)]
pub struct MemoryStage {
    viewport: ViewportMetrics,
    wrapper_top: f64,
    cards: BTreeMap<CardHandle, MemoryCard>,
    order: Vec<CardHandle>,
    pinned: bool,
    pin_changes: u32,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    next_handle: u32,
    next_listener: u64,
}

impl MemoryStage {
    pub fn new(viewport: ViewportMetrics) -> Self {
        Self {
            viewport,
            wrapper_top: 0.0,
            cards: BTreeMap::new(),
            order: Vec::new(),
            pinned: false,
            pin_changes: 0,
            listeners: BTreeMap::new(),
            next_handle: 0,
            next_listener: 0,
        }
    }

    /// A stage with `count` mounted cards of equal height.
    pub fn with_cards(viewport: ViewportMetrics, count: usize, height: f64) -> Self {
        let mut stage = Self::new(viewport);
        for _ in 0..count {
            stage.mount(height);
        }
        stage
    }

    pub fn mount(&mut self, height: f64) -> CardHandle {
        let handle = CardHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.cards.insert(
            handle,
            MemoryCard {
                height,
                placement: None,
            },
        );
        self.order.push(handle);
        handle
    }

    pub fn unmount(&mut self, handle: CardHandle) {
        self.cards.remove(&handle);
    }

    /// Cards in mount order. Unmounted cards keep their slot with no handle.
    pub fn cards(&self) -> Vec<Card> {
        self.order
            .iter()
            .enumerate()
            .map(|(index, h)| {
                if self.cards.contains_key(h) {
                    Card::mounted(index, *h)
                } else {
                    Card::unmounted(index)
                }
            })
            .collect()
    }

    pub fn set_viewport(&mut self, viewport: ViewportMetrics) {
        self.viewport = viewport;
    }

    pub fn set_wrapper_top(&mut self, top: f64) {
        self.wrapper_top = top;
    }

    pub fn set_card_heights(&mut self, height: f64) {
        for card in self.cards.values_mut() {
            card.height = height;
        }
    }

    pub fn placement(&self, handle: CardHandle) -> Option<CardPlacement> {
        self.cards.get(&handle).and_then(|c| c.placement)
    }

    /// Placements in mount order; `None` for cards never placed or unmounted.
    pub fn placements(&self) -> Vec<Option<CardPlacement>> {
        self.order.iter().map(|h| self.placement(*h)).collect()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn pin_changes(&self) -> u32 {
        self.pin_changes
    }

    pub fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn live_listeners_of(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }
}

impl Stage for MemoryStage {
    fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    fn wrapper_top(&self) -> f64 {
        self.wrapper_top
    }

    fn card_height(&self, card: CardHandle) -> Option<f64> {
        self.cards.get(&card).map(|c| c.height)
    }

    fn place(&mut self, card: CardHandle, placement: CardPlacement) -> bool {
        match self.cards.get_mut(&card) {
            Some(c) => {
                c.placement = Some(placement);
                true
            }
            None => false,
        }
    }

    fn set_pinned(&mut self, pinned: bool) {
        if self.pinned != pinned {
            self.pinned = pinned;
            self.pin_changes = self.pin_changes.saturating_add(1);
        }
    }

    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.listeners.insert(id, kind);
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
