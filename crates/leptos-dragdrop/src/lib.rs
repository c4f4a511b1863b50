//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop of numbered cards onto keyed drop zones
//! (board columns, lists). A movement threshold distinguishes click from drag,
//! and an `enabled` signal switches the whole affordance off.
//!
//! Window listeners are detached when the binding component is cleaned up;
//! handlers still read their signals with `try_*` in case an event is already
//! queued when that happens.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// DnD state signals, keyed by drop zone type `K`
pub struct DndSignals<K: Send + Sync + 'static> {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<K>>,
    pub drop_target_write: WriteSignal<Option<K>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending card id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
    /// Drag affordance on/off
    pub enabled: Signal<bool>,
}

impl<K: Send + Sync + 'static> Clone for DndSignals<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static> Copy for DndSignals<K> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set, so the trailing click can be ignored
const DRAG_END_GRACE_MS: u32 = 100;

pub fn create_dnd_signals<K>(enabled: Signal<bool>) -> DndSignals<K>
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<K>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
        enabled,
    }
}

/// Has the pointer moved far enough from `start` to count as a drag?
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// A drop only happens when a drag is live and the pointer is over a zone
pub fn resolve_drop<K: Copy>(dragging: Option<u32>, target: Option<K>) -> Option<(u32, K)> {
    match (dragging, target) {
        (Some(id), Some(key)) => Some((id, key)),
        _ => None,
    }
}

/// End drag operation
pub fn end_drag<K: Send + Sync + 'static>(dnd: &DndSignals<K>) {
    dnd.dragging_id_write.try_set(None);
    dnd.drop_target_write.try_set(None);
    dnd.pending_id_write.try_set(None);
    dnd.drag_just_ended_write.try_set(true);

    let clear = dnd.drag_just_ended_write;
    gloo_timers::callback::Timeout::new(DRAG_END_GRACE_MS, move || {
        clear.try_set(false);
    })
    .forget();
}

/// Create mousedown handler for draggable cards
/// Records pending drag with start position
pub fn make_on_mousedown<K>(dnd: DndSignals<K>, card_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || !dnd.enabled.get_untracked() {
            return;
        }
        // Form controls inside a card keep their own mouse behaviour
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
        }
        dnd.pending_id_write.set(Some(card_id));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for a drop zone
pub fn make_on_zone_mouseenter<K>(dnd: DndSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(key));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K>(dnd: DndSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Is `key` the zone currently under a live drag?
pub fn is_drop_target<K>(dnd: &DndSignals<K>, key: K) -> bool
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    dnd.drop_target_read.get() == Some(key)
}

/// Global listener handles owned by one board; removed together
#[derive(Default)]
pub struct GlobalListeners {
    removers: Vec<Box<dyn FnOnce() + Send + Sync>>,
}

impl GlobalListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register how to detach one listener
    pub fn add(&mut self, remove: impl FnOnce() + Send + Sync + 'static) {
        self.removers.push(Box::new(remove));
    }

    pub fn len(&self) -> usize {
        self.removers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removers.is_empty()
    }

    /// Detach every listener
    pub fn remove_all(self) {
        for remove in self.removers {
            remove();
        }
    }

    /// Detach every listener when the current reactive owner is cleaned up
    pub fn remove_on_cleanup(self) {
        on_cleanup(move || self.remove_all());
    }
}

fn bind_global_mousemove<K>(dnd: DndSignals<K>) -> WindowListenerHandle
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let (Some(pending), Some(dragging)) = (
            dnd.pending_id_read.try_get_untracked(),
            dnd.dragging_id_read.try_get_untracked(),
        ) else {
            return;
        };
        if pending.is_none() || dragging.is_some() {
            return;
        }
        let Some(start) = dnd.start_read.try_get_untracked() else { return };
        if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
            dnd.dragging_id_write.try_set(pending);
        }
    })
}

/// Bind the global mouseup handler for drop detection, plus the mousemove
/// handler that promotes a pending press into a drag. Both are detached
/// when the calling component's owner is cleaned up.
pub fn bind_global_mouseup<K, F>(dnd: DndSignals<K>, on_drop: F)
where
    K: Copy + PartialEq + Send + Sync + 'static,
    F: Fn(u32, K) + Clone + 'static,
{
    let on_mouseup = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let (Some(dragging), Some(target)) = (
            dnd.dragging_id_read.try_get_untracked(),
            dnd.drop_target_read.try_get_untracked(),
        ) else {
            return;
        };
        end_drag(&dnd);
        if let Some((card_id, key)) = resolve_drop(dragging, target) {
            on_drop(card_id, key);
        }
    });
    let on_mousemove = bind_global_mousemove(dnd);

    let mut listeners = GlobalListeners::new();
    listeners.add(move || on_mouseup.remove());
    listeners.add(move || on_mousemove.remove());
    listeners.remove_on_cleanup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_jitter_is_a_click() {
        assert!(!exceeds_threshold((100, 100), (103, 96)));
        assert!(!exceeds_threshold((0, 0), (5, -5)));
    }

    #[test]
    fn test_movement_past_threshold_is_a_drag() {
        assert!(exceeds_threshold((100, 100), (106, 100)));
        assert!(exceeds_threshold((100, 100), (100, 94)));
    }

    #[test]
    fn test_listeners_removed_on_owner_cleanup() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let removed = Arc::new(AtomicUsize::new(0));
        let owner = Owner::new();
        owner.with(|| {
            let mut listeners = GlobalListeners::new();
            for _ in 0..2 {
                let removed = removed.clone();
                listeners.add(move || {
                    removed.fetch_add(1, Ordering::SeqCst);
                });
            }
            assert_eq!(listeners.len(), 2);
            listeners.remove_on_cleanup();
        });
        assert_eq!(removed.load(Ordering::SeqCst), 0);

        owner.cleanup();
        assert_eq!(removed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resolve_drop_needs_drag_and_target() {
        assert_eq!(resolve_drop(Some(7), Some('a')), Some((7, 'a')));
        assert_eq!(resolve_drop::<char>(Some(7), None), None);
        assert_eq!(resolve_drop(None, Some('a')), None);
    }
}
