//! Ordered attachment collection with batched change notification.
//!
//! The registry is the only place attachment items are mutated. Each public
//! mutation rebuilds the list and then notifies its listener exactly once,
//! so observers never see a half-applied change.

use std::collections::HashSet;

use crate::models::{AttachmentItem, AttachmentKey, ExistingAttachments, RawFile};
use crate::util::{infer_content_type, normalize_text_option, unix_timestamp_millis_now};

/// Observer invoked after every registry mutation with the full snapshot.
pub trait RegistryListener {
    fn on_change(&mut self, items: &[AttachmentItem]);
}

impl<F> RegistryListener for F
where
    F: FnMut(&[AttachmentItem]),
{
    fn on_change(&mut self, items: &[AttachmentItem]) {
        self(items);
    }
}

/// Time source for synthesized attachment keys.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

impl Clock for Box<dyn Clock> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        unix_timestamp_millis_now()
    }
}

/// Attachment items for one form, in display order.
pub struct AttachmentRegistry<L: RegistryListener> {
    items: Vec<AttachmentItem>,
    listener: L,
    clock: Box<dyn Clock>,
}

impl<L: RegistryListener> AttachmentRegistry<L> {
    /// Create an empty registry. No notification is sent until the first
    /// mutation.
    pub fn new(listener: L) -> Self {
        Self {
            items: Vec::new(),
            listener,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the time source used for new-file keys.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Seed the registry from the host's existing attachments, replacing
    /// whatever it held before.
    pub fn initialize(&mut self, existing: ExistingAttachments) {
        let items = existing.into_items();
        tracing::debug!("Initializing registry with {} existing attachments", items.len());
        self.replace_all(items);
    }

    /// Append picked files as new uploads.
    ///
    /// Files whose key is already present (or repeated within the batch) are
    /// skipped. Returns how many were added.
    pub fn add_files(&mut self, files: Vec<RawFile>) -> usize {
        let now = self.clock.now_millis();
        let mut next = std::mem::take(&mut self.items);
        let mut known: HashSet<AttachmentKey> =
            next.iter().map(|item| item.key().clone()).collect();

        let mut added = 0;
        for file in files {
            let key = match normalize_text_option(file.key) {
                Some(key) => AttachmentKey::from(key),
                None => AttachmentKey::for_new_file(&file.name, now),
            };
            if !known.insert(key.clone()) {
                tracing::debug!("Skipping duplicate attachment {}", key);
                continue;
            }

            let content_type = infer_content_type(file.content_type.as_deref(), &file.name);
            next.push(AttachmentItem::new_upload(
                key,
                file.name,
                content_type,
                file.bytes,
            ));
            added += 1;
        }

        tracing::debug!("Added {} new attachments", added);
        self.replace_all(next);
        added
    }

    /// Apply a removal request to the selected keys.
    ///
    /// New uploads are dropped, existing items flip to `DEL`. Unselected
    /// items keep their place. Returns how many items matched.
    pub fn mark_for_removal(&mut self, keys: &[AttachmentKey]) -> usize {
        let selected: HashSet<&AttachmentKey> = keys.iter().collect();
        let current = std::mem::take(&mut self.items);

        let mut matched = 0;
        let next = current
            .into_iter()
            .filter_map(|item| {
                if selected.contains(item.key()) {
                    matched += 1;
                    item.marked_for_removal()
                } else {
                    Some(item)
                }
            })
            .collect();

        tracing::debug!("Marked {} attachments for removal", matched);
        self.replace_all(next);
        matched
    }

    /// Swap in a whole new list and notify once.
    ///
    /// Later entries repeating an earlier key are dropped.
    pub fn replace_all(&mut self, items: Vec<AttachmentItem>) {
        self.items = dedup_by_key(items);
        self.notify();
    }

    /// Current items in order.
    #[must_use]
    pub fn snapshot(&self) -> &[AttachmentItem] {
        &self.items
    }

    pub fn get(&self, key: &AttachmentKey) -> Option<&AttachmentItem> {
        self.items.iter().find(|item| item.key() == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub const fn listener(&self) -> &L {
        &self.listener
    }

    fn notify(&mut self) {
        self.listener.on_change(&self.items);
    }
}

fn dedup_by_key(items: Vec<AttachmentItem>) -> Vec<AttachmentItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.key().clone());
            if !fresh {
                tracing::warn!("Dropping attachment with duplicate key {}", item.key());
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    use super::*;
    use crate::models::Mode;

    #[derive(Debug, Clone, Copy)]
    pub(crate) struct FixedClock(pub i64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    #[derive(Default)]
    struct Recorder {
        renders: Vec<Vec<(String, Mode)>>,
    }

    impl RegistryListener for Recorder {
        fn on_change(&mut self, items: &[AttachmentItem]) {
            self.renders.push(
                items
                    .iter()
                    .map(|item| (item.key().to_string(), item.mode()))
                    .collect(),
            );
        }
    }

    fn registry() -> AttachmentRegistry<Recorder> {
        AttachmentRegistry::new(Recorder::default()).with_clock(FixedClock(1_000))
    }

    fn existing(key: &str, name: &str) -> AttachmentItem {
        AttachmentItem::existing(
            AttachmentKey::from(key),
            name,
            1,
            "application/octet-stream",
            Map::new(),
            false,
        )
    }

    fn keys(registry: &AttachmentRegistry<Recorder>) -> Vec<&str> {
        registry
            .snapshot()
            .iter()
            .map(|item| item.key().as_str())
            .collect()
    }

    #[test]
    fn new_registry_is_empty_and_silent() {
        let registry = registry();
        assert!(registry.is_empty());
        assert!(registry.listener().renders.is_empty());
    }

    #[test]
    fn initialize_with_nothing_yields_empty_collection() {
        let mut registry = registry();
        registry.initialize(ExistingAttachments::None);
        assert!(registry.is_empty());
        assert_eq!(registry.listener().renders.len(), 1);
    }

    #[test]
    fn initialize_is_idempotent() {
        let seed = ExistingAttachments::from_json_str(r#"[{"seq": 1, "name": "a"}]"#).unwrap();
        let mut registry = registry();
        registry.initialize(seed.clone());
        let first = registry.snapshot().to_vec();
        registry.initialize(seed);
        assert_eq!(registry.snapshot(), first.as_slice());
    }

    #[test]
    fn add_files_appends_reg_items_with_one_notification() {
        let mut registry = registry();
        let added = registry.add_files(vec![
            RawFile::new("a.png", vec![0; 100]),
            RawFile::new("b.txt", vec![1, 2]),
        ]);

        assert_eq!(added, 2);
        assert_eq!(keys(&registry), vec!["new::a.png::1000", "new::b.txt::1000"]);
        assert_eq!(registry.listener().renders.len(), 1);
        assert_eq!(registry.snapshot()[0].mode(), Mode::Reg);
        assert_eq!(registry.snapshot()[0].content_type, "image/png");
    }

    #[test]
    fn add_files_skips_colliding_keys() {
        let mut registry = registry();
        registry.add_files(vec![RawFile::new("a.png", vec![1])]);
        let before = registry.snapshot().to_vec();

        let added = registry.add_files(vec![RawFile::new("a.png", vec![2])]);
        assert_eq!(added, 0);
        assert_eq!(registry.snapshot(), before.as_slice());
    }

    #[test]
    fn add_files_dedups_within_batch() {
        let mut registry = registry();
        let added = registry.add_files(vec![
            RawFile::new("a.png", vec![1]).with_key("same"),
            RawFile::new("b.png", vec![2]).with_key("same"),
        ]);
        assert_eq!(added, 1);
        assert_eq!(keys(&registry), vec!["same"]);
    }

    #[test]
    fn re_picking_after_removal_is_treated_as_new() {
        let mut registry = registry();
        registry.add_files(vec![RawFile::new("a.png", vec![1])]);
        registry.mark_for_removal(&[AttachmentKey::from("new::a.png::1000")]);
        assert!(registry.is_empty());

        let added = registry.add_files(vec![RawFile::new("a.png", vec![1])]);
        assert_eq!(added, 1);
    }

    #[test]
    fn removing_reg_items_shrinks_collection() {
        let mut registry = registry();
        registry.replace_all(vec![existing("1", "keep")]);
        registry.add_files(vec![
            RawFile::new("a", vec![1]).with_key("ra"),
            RawFile::new("b", vec![1]).with_key("rb"),
        ]);

        let matched = registry.mark_for_removal(&["ra".into(), "rb".into()]);
        assert_eq!(matched, 2);
        assert_eq!(keys(&registry), vec!["1"]);
    }

    #[test]
    fn removing_upd_items_flips_mode_and_keeps_length() {
        let mut registry = registry();
        registry.replace_all(vec![existing("1", "a"), existing("2", "b"), existing("3", "c")]);

        registry.mark_for_removal(&["2".into()]);
        let modes: Vec<Mode> = registry.snapshot().iter().map(AttachmentItem::mode).collect();
        assert_eq!(modes, vec![Mode::Upd, Mode::Del, Mode::Upd]);
        assert_eq!(keys(&registry), vec!["1", "2", "3"]);
        assert_eq!(registry.get(&"2".into()).map(AttachmentItem::mode), Some(Mode::Del));
        assert!(registry.get(&"9".into()).is_none());
    }

    #[test]
    fn removing_del_items_is_noop() {
        let mut registry = registry();
        registry.replace_all(vec![existing("1", "a")]);
        registry.mark_for_removal(&["1".into()]);
        let before = registry.snapshot().to_vec();

        registry.mark_for_removal(&["1".into()]);
        assert_eq!(registry.snapshot(), before.as_slice());
    }

    #[test]
    fn every_mutation_notifies_exactly_once() {
        let mut registry = registry();
        registry.initialize(ExistingAttachments::None);
        registry.add_files(vec![RawFile::new("a", vec![1]), RawFile::new("b", vec![1])]);
        registry.mark_for_removal(&[]);
        registry.replace_all(Vec::new());
        assert_eq!(registry.listener().renders.len(), 4);
    }

    #[test]
    fn replace_all_keeps_first_of_duplicate_keys() {
        let mut registry = registry();
        registry.replace_all(vec![existing("1", "first"), existing("1", "second")]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.snapshot()[0].name, "first");
    }

    #[test]
    fn closures_can_listen() {
        let mut count = 0;
        {
            let mut registry = AttachmentRegistry::new(|_: &[AttachmentItem]| count += 1);
            registry.add_files(vec![RawFile::new("a", vec![1])]);
        }
        assert_eq!(count, 1);
    }
}
