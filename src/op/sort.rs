use crate::config::capacity;
use crate::op::Comparator;
use crate::sink::{CONTINUE, Flow, Halt, Sink};
use std::ops::ControlFlow;

/// 缓冲全部元素，在`end`时稳定排序后依次输出。
pub(crate) struct Sort<'n, 'a, T> {
    cmp: &'n mut Comparator<'a, T>,
    default_capacity: usize,
    buffer: Vec<T>,
    next: &'n mut dyn Sink<T>,
}

impl<'n, 'a, T> Sort<'n, 'a, T> {
    pub(crate) fn new(cmp: &'n mut Comparator<'a, T>, default_capacity: usize, next: &'n mut dyn Sink<T>) -> Self {
        Sort { cmp, default_capacity, buffer: Vec::new(), next }
    }

    pub(crate) fn begin(&mut self, size: Option<usize>) {
        self.buffer = Vec::with_capacity(capacity(size, self.default_capacity));
        self.next.begin(size);
    }

    pub(crate) fn accept(&mut self, item: T) -> Flow {
        self.buffer.push(item);
        CONTINUE
    }

    pub(crate) fn end(&mut self) {
        let mut buffer = std::mem::take(&mut self.buffer);
        let cmp = &mut *self.cmp;
        buffer.sort_by(|l, r| cmp(l, r));
        // 下游已满足时仍输出全部已缓冲的元素，只有下游失败才中止
        for item in buffer {
            if let ControlFlow::Break(Halt::Failed) = self.next.accept(item) {
                break;
            }
        }
        self.next.end();
    }
}
