use crate::sink::{CONTINUE, Flow, Halt, Sink};
use std::ops::ControlFlow;

/// 保留前`limit`个到达的元素。
pub(crate) struct Limit<'n, T> {
    limit: usize,
    count: usize,
    next: &'n mut dyn Sink<T>,
}

impl<'n, T> Limit<'n, T> {
    pub(crate) fn new(limit: usize, next: &'n mut dyn Sink<T>) -> Self {
        Limit { limit, count: 0, next }
    }

    pub(crate) fn begin(&mut self, size: Option<usize>) {
        self.count = 0;
        self.next.begin(size.map(|size| size.min(self.limit)));
    }

    pub(crate) fn satisfied(&self) -> bool {
        self.count >= self.limit || self.next.satisfied()
    }

    pub(crate) fn accept(&mut self, item: T) -> Flow {
        if self.count >= self.limit {
            return ControlFlow::Break(Halt::Satisfied);
        }
        self.count += 1;
        let flow = self.next.accept(item);
        // 达到上限后立即停止，避免再多读取一个源元素
        if flow.is_continue() && self.count == self.limit { ControlFlow::Break(Halt::Satisfied) } else { flow }
    }

    pub(crate) fn end(&mut self) {
        self.next.end();
    }
}

/// 丢弃前`skip`个到达的元素。
pub(crate) struct Skip<'n, T> {
    skip: usize,
    remaining: usize,
    next: &'n mut dyn Sink<T>,
}

impl<'n, T> Skip<'n, T> {
    pub(crate) fn new(skip: usize, next: &'n mut dyn Sink<T>) -> Self {
        Skip { skip, remaining: skip, next }
    }

    pub(crate) fn begin(&mut self, size: Option<usize>) {
        self.remaining = self.skip;
        self.next.begin(size.map(|size| size.saturating_sub(self.skip)));
    }

    pub(crate) fn satisfied(&self) -> bool {
        self.next.satisfied()
    }

    pub(crate) fn accept(&mut self, item: T) -> Flow {
        if self.remaining > 0 {
            self.remaining -= 1;
            CONTINUE
        } else {
            self.next.accept(item)
        }
    }

    pub(crate) fn end(&mut self) {
        self.next.end();
    }
}
