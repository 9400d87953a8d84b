mod distinct;
mod slice;
mod sort;

use crate::config::{Config, default_capacity};
use crate::err::RiverErr;
use crate::op::distinct::{Distinct, NewSeen};
use crate::op::slice::{Limit, Skip};
use crate::op::sort::Sort;
use crate::sink::{CONTINUE, Flow, Sink};
use crate::{Integer, RiverRes};
use op_doc::OpDoc;
use std::cmp::Ordering;
use std::hash::Hash;

pub(crate) type Predicate<'a, T> = Box<dyn FnMut(&T) -> bool + 'a>;
pub(crate) type Effect<'a, T> = Box<dyn FnMut(&T) + 'a>;
pub(crate) type Comparator<'a, T> = Box<dyn FnMut(&T, &T) -> Ordering + 'a>;
pub(crate) type MapFn<'a, I, O> = Box<dyn FnMut(I) -> O + 'a>;

/// 操作类型。
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, OpDoc)]
pub enum OpKind {
    /// source      元素源，操作链的起点。
    Source,
    /// filter      过滤，仅保留满足条件的元素。
    ///             filter(<predicate>)
    Filter,
    /// map         转换，将每个元素映射为新的值，可改变元素类型。
    ///             map(<transform>)
    Map,
    /// distinct    去重，保留每个值首次出现的元素，不改变相对顺序。
    Distinct,
    /// limit       保留前N个元素，达到上限后不再从元素源读取。
    ///             limit(<count>)
    ///                 <count> 需要保留的数量，必须为非负整数。
    Limit,
    /// skip        丢弃前N个元素，保留后续的其他元素。
    ///             skip(<count>)
    ///                 <count> 需要丢弃的数量，必须为非负整数。
    Skip,
    /// sort        稳定排序，比较相等的元素保持原有相对顺序。
    ///             需要缓冲全部元素，在遍历结束时统一输出。
    ///             sort(<comparator>)
    Sort,
    /// peek        访问每个元素，不改变元素。
    ///             peek(<effect>)
    Peek,
}

/// 除`map`和元素源外的操作描述，输入输出元素类型相同。
pub(crate) enum Op<'a, T> {
    Filter(Predicate<'a, T>),
    Distinct(NewSeen<'a, T>),
    Limit(usize),
    Skip(usize),
    Sort(Comparator<'a, T>),
    Peek(Effect<'a, T>),
}

impl<'a, T> Op<'a, T> {
    pub(crate) fn new_filter(pred: impl FnMut(&T) -> bool + 'a) -> Self {
        Op::Filter(Box::new(pred))
    }
    pub(crate) fn new_distinct() -> Self
    where
        T: Eq + Hash + Clone + 'a,
    {
        Op::Distinct(distinct::new_seen::<T>)
    }
    pub(crate) fn new_limit(count: Integer) -> RiverRes<Self> {
        RiverErr::non_negative("limit", "count", count).map(Op::Limit)
    }
    pub(crate) fn new_skip(count: Integer) -> RiverRes<Self> {
        RiverErr::non_negative("skip", "count", count).map(Op::Skip)
    }
    pub(crate) fn new_sort(cmp: impl FnMut(&T, &T) -> Ordering + 'a) -> Self {
        Op::Sort(Box::new(cmp))
    }
    pub(crate) fn new_peek(effect: impl FnMut(&T) + 'a) -> Self {
        Op::Peek(Box::new(effect))
    }

    pub(crate) fn kind(&self) -> OpKind {
        match self {
            Op::Filter(_) => OpKind::Filter,
            Op::Distinct(_) => OpKind::Distinct,
            Op::Limit(_) => OpKind::Limit,
            Op::Skip(_) => OpKind::Skip,
            Op::Sort(_) => OpKind::Sort,
            Op::Peek(_) => OpKind::Peek,
        }
    }

    /// 用于描述操作链的标签，带整数参数的操作附带参数值。
    pub(crate) fn label(&self) -> String {
        match self {
            Op::Limit(count) | Op::Skip(count) => format!("{}({count})", self.kind().name()),
            _ => self.kind().name().to_owned(),
        }
    }

    /// 以`next`为下游，构建实现本操作的消费者。
    pub(crate) fn wrap<'n>(&'n mut self, next: &'n mut dyn Sink<T>, configs: &[Config]) -> OpSink<'n, 'a, T> {
        match self {
            Op::Filter(pred) => OpSink::Filter { pred, next },
            Op::Distinct(new_seen) => OpSink::Distinct(Distinct::new(*new_seen, default_capacity(configs), next)),
            Op::Limit(count) => OpSink::Limit(Limit::new(*count, next)),
            Op::Skip(count) => OpSink::Skip(Skip::new(*count, next)),
            Op::Sort(cmp) => OpSink::Sort(Sort::new(cmp, default_capacity(configs), next)),
            Op::Peek(effect) => OpSink::Peek { effect, next },
        }
    }
}

/// 单个操作在一次遍历中的消费者，遍历结束后即丢弃。
pub(crate) enum OpSink<'n, 'a, T> {
    Filter { pred: &'n mut Predicate<'a, T>, next: &'n mut dyn Sink<T> },
    Distinct(Distinct<'n, 'a, T>),
    Limit(Limit<'n, T>),
    Skip(Skip<'n, T>),
    Sort(Sort<'n, 'a, T>),
    Peek { effect: &'n mut Effect<'a, T>, next: &'n mut dyn Sink<T> },
}

impl<T> Sink<T> for OpSink<'_, '_, T> {
    fn begin(&mut self, size: Option<usize>) {
        match self {
            OpSink::Filter { next, .. } | OpSink::Peek { next, .. } => next.begin(size),
            OpSink::Distinct(sink) => sink.begin(size),
            OpSink::Limit(sink) => sink.begin(size),
            OpSink::Skip(sink) => sink.begin(size),
            OpSink::Sort(sink) => sink.begin(size),
        }
    }

    fn accept(&mut self, item: T) -> Flow {
        match self {
            OpSink::Filter { pred, next } => {
                if pred(&item) {
                    next.accept(item)
                } else {
                    CONTINUE
                }
            }
            OpSink::Distinct(sink) => sink.accept(item),
            OpSink::Limit(sink) => sink.accept(item),
            OpSink::Skip(sink) => sink.accept(item),
            OpSink::Sort(sink) => sink.accept(item),
            OpSink::Peek { effect, next } => {
                effect(&item);
                next.accept(item)
            }
        }
    }

    fn end(&mut self) {
        match self {
            OpSink::Filter { next, .. } | OpSink::Peek { next, .. } => next.end(),
            OpSink::Distinct(sink) => sink.end(),
            OpSink::Limit(sink) => sink.end(),
            OpSink::Skip(sink) => sink.end(),
            OpSink::Sort(sink) => sink.end(),
        }
    }

    fn satisfied(&self) -> bool {
        match self {
            OpSink::Filter { next, .. } | OpSink::Peek { next, .. } => next.satisfied(),
            OpSink::Distinct(sink) => sink.satisfied(),
            OpSink::Limit(sink) => sink.satisfied(),
            OpSink::Skip(sink) => sink.satisfied(),
            // 需要先读取全部元素才能输出
            OpSink::Sort(_) => false,
        }
    }
}

/// `map`的消费者，输入输出元素类型不同，因此不在[`OpSink`]中。
pub(crate) struct MapSink<'n, 'a, I, O> {
    f: &'n mut MapFn<'a, I, O>,
    next: &'n mut dyn Sink<O>,
}

impl<'n, 'a, I, O> MapSink<'n, 'a, I, O> {
    pub(crate) fn new(f: &'n mut MapFn<'a, I, O>, next: &'n mut dyn Sink<O>) -> Self {
        MapSink { f, next }
    }
}

impl<I, O> Sink<I> for MapSink<'_, '_, I, O> {
    fn begin(&mut self, size: Option<usize>) {
        self.next.begin(size);
    }

    fn accept(&mut self, item: I) -> Flow {
        let mapped = (self.f)(item);
        self.next.accept(mapped)
    }

    fn end(&mut self) {
        self.next.end();
    }

    fn satisfied(&self) -> bool {
        self.next.satisfied()
    }
}
