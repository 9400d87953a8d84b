use crate::config::capacity;
use crate::sink::{CONTINUE, Flow, Sink};
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// 去重集合，擦除了元素的`Eq + Hash`约束，使`Op`本身不需要这些约束。
pub(crate) trait Seen<T> {
    /// 元素首次出现时记录并返回`true`。
    fn first_time(&mut self, item: &T) -> bool;
}

impl<T: Eq + Hash + Clone> Seen<T> for FxHashSet<T> {
    fn first_time(&mut self, item: &T) -> bool {
        !self.contains(item) && self.insert(item.clone())
    }
}

pub(crate) type NewSeen<'a, T> = fn(usize) -> Box<dyn Seen<T> + 'a>;

pub(crate) fn new_seen<'a, T: Eq + Hash + Clone + 'a>(capacity: usize) -> Box<dyn Seen<T> + 'a> {
    Box::new(FxHashSet::<T>::with_capacity_and_hasher(capacity, Default::default()))
}

pub(crate) struct Distinct<'n, 'a, T> {
    new_seen: NewSeen<'a, T>,
    default_capacity: usize,
    seen: Option<Box<dyn Seen<T> + 'a>>,
    next: &'n mut dyn Sink<T>,
}

impl<'n, 'a, T> Distinct<'n, 'a, T> {
    pub(crate) fn new(new_seen: NewSeen<'a, T>, default_capacity: usize, next: &'n mut dyn Sink<T>) -> Self {
        Distinct { new_seen, default_capacity, seen: None, next }
    }

    pub(crate) fn begin(&mut self, size: Option<usize>) {
        self.seen = Some((self.new_seen)(capacity(size, self.default_capacity)));
        self.next.begin(size);
    }

    pub(crate) fn accept(&mut self, item: T) -> Flow {
        let seen = self.seen.get_or_insert_with(|| (self.new_seen)(self.default_capacity));
        if seen.first_time(&item) { self.next.accept(item) } else { CONTINUE }
    }

    pub(crate) fn end(&mut self) {
        self.seen = None;
        self.next.end();
    }

    pub(crate) fn satisfied(&self) -> bool {
        self.next.satisfied()
    }
}
